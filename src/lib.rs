//! Catch the Egg - a rail-chicken arcade game
//!
//! Core modules:
//! - `sim`: Simulation (spawning, physics, scoring, power-ups, particles)
//! - `audio`: Audio cue playback for simulation events
//! - `highscores`: In-memory leaderboard
//! - `settings`: Player preferences loaded from JSON

pub mod audio;
pub mod highscores;
pub mod settings;
pub mod sim;

pub use audio::{AudioBackend, AudioManager, SoundEffect, TerminalBell};
pub use highscores::HighScores;
pub use settings::{QualityPreset, Settings};

/// Game configuration constants
///
/// Coordinates are y-up: the basket sits near y = 0 and items fall toward it.
pub mod consts {
    /// Play area dimensions
    pub const WINDOW_WIDTH: f32 = 900.0;
    pub const WINDOW_HEIGHT: f32 = 700.0;

    /// Round length (seconds)
    pub const GAME_DURATION: f32 = 60.0;

    /// Longest simulation step; longer frames are split
    pub const MAX_STEP_DT: f32 = 1.0 / 30.0;
    /// Substep cap per frame (beyond this, steps grow instead)
    pub const MAX_SUBSTEPS: u32 = 16;

    /// Basket defaults. `BASKET_Y` is the bottom edge.
    pub const BASKET_Y: f32 = 50.0;
    pub const BASKET_WIDTH: f32 = 80.0;
    pub const BASKET_LARGE_WIDTH: f32 = 120.0;
    pub const BASKET_HEIGHT: f32 = 60.0;
    /// Horizontal speed in pixels/s
    pub const BASKET_SPEED: f32 = 900.0;
    pub const SPEED_BOOST_FACTOR: f32 = 2.0;

    /// Chickens
    pub const CHICKEN_UNLOCK_TIME: f32 = 20.0;

    /// Spawner
    pub const SPAWN_INTERVAL: f32 = 1.2;
    pub const SPAWN_CHANCE: f64 = 0.5;
    pub const ITEM_MIN_FALL_SPEED: f32 = 140.0;
    pub const ITEM_MAX_FALL_SPEED: f32 = 220.0;
    /// Cosmetic spin (radians/s)
    pub const ITEM_SPIN: f32 = 2.0;
    /// Items further than this outside the side walls are dropped
    pub const EXIT_MARGIN: f32 = 50.0;

    /// Airflow
    pub const AIRFLOW_INTERVAL: f32 = 8.0;
    pub const AIRFLOW_DURATION: f32 = 3.0;
    /// Horizontal acceleration range (pixels/s²)
    pub const AIRFLOW_MIN_STRENGTH: f32 = 60.0;
    pub const AIRFLOW_MAX_STRENGTH: f32 = 160.0;
    /// Per-tick horizontal velocity damping (air resistance)
    pub const AIR_DAMPING: f32 = 0.98;

    /// Power-ups
    pub const POWER_UP_DURATION: f32 = 5.0;
    pub const SHIELD_CHARGES: u32 = 3;
    pub const EXTRA_TIME_BONUS: f32 = 10.0;
    /// World-time multiplier while slow time is active
    pub const SLOW_TIME_SCALE: f32 = 0.5;
    pub const MAGNET_RADIUS: f32 = 220.0;
    /// Horizontal pull toward the basket (pixels/s²)
    pub const MAGNET_PULL: f32 = 600.0;

    /// Scoring
    pub const SOFT_HAZARD_PENALTY: u32 = 10;
    pub const HARD_HAZARD_PENALTY: u32 = 20;

    /// Particles
    pub const BURST_PARTICLES: usize = 15;
    pub const PARTICLE_SPEED: f32 = 120.0;
    pub const PARTICLE_GRAVITY: f32 = 200.0;
    pub const PARTICLE_LIFE: f32 = 1.0;
    /// Life drains at twice the real rate
    pub const PARTICLE_DECAY: f32 = 2.0;
    pub const MAX_PARTICLES: usize = 256;
}

/// Clamp a basket center so the whole basket stays on screen
#[inline]
pub fn clamp_basket_x(x: f32, width: f32) -> f32 {
    let half = width / 2.0;
    x.clamp(half, consts::WINDOW_WIDTH - half)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_basket_x() {
        assert_eq!(clamp_basket_x(-100.0, 80.0), 40.0);
        assert_eq!(clamp_basket_x(10_000.0, 80.0), 860.0);
        assert_eq!(clamp_basket_x(450.0, 120.0), 450.0);
    }
}
