//! Game state and core simulation types
//!
//! Everything the presentation layer reads each frame lives here.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::audio::SoundEffect;
use crate::consts::*;
use crate::highscores::HighScores;

/// Current phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen
    Menu,
    /// Instructions screen
    Help,
    /// Active gameplay
    Playing,
    /// Simulation frozen, waiting for resume
    Paused,
    /// Round ended (time ran out)
    GameOver,
}

/// Plain RGB color in 0..=1
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }
}

/// Items that change score or combo when caught
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScoringKind {
    PlainEgg,
    BonusEgg,
    RareEgg,
    /// Penalizes score and combo (the "poop")
    SoftHazard,
    /// Bigger penalty and an explosion (the bomb)
    HardHazard,
}

impl ScoringKind {
    /// Eggs build combo; missing one breaks it
    pub fn is_egg(self) -> bool {
        matches!(
            self,
            ScoringKind::PlainEgg | ScoringKind::BonusEgg | ScoringKind::RareEgg
        )
    }

    pub fn is_hazard(self) -> bool {
        !self.is_egg()
    }

    /// Points for catching this egg with the given combo (0 for hazards)
    pub fn points(self, combo: u32) -> u32 {
        match self {
            ScoringKind::PlainEgg => 1 + combo,
            ScoringKind::BonusEgg => 5 + combo * 2,
            ScoringKind::RareEgg => 10 + combo * 3,
            ScoringKind::SoftHazard | ScoringKind::HardHazard => 0,
        }
    }

    /// Score deduction when caught without a shield (0 for eggs)
    pub fn penalty(self) -> u32 {
        match self {
            ScoringKind::SoftHazard => SOFT_HAZARD_PENALTY,
            ScoringKind::HardHazard => HARD_HAZARD_PENALTY,
            _ => 0,
        }
    }
}

/// Items that toggle a temporary effect when caught
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerUpKind {
    LargerBasket,
    SlowTime,
    ExtraTime,
    Shield,
    Magnet,
    SpeedBoost,
}

/// What a falling item does when caught
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemKind {
    Scoring(ScoringKind),
    PowerUp(PowerUpKind),
}

impl ItemKind {
    /// True for eggs, which break the combo when missed
    pub fn is_egg(self) -> bool {
        matches!(self, ItemKind::Scoring(kind) if kind.is_egg())
    }

    /// Particle color for catches of this kind
    pub fn color(self) -> Rgb {
        match self {
            ItemKind::Scoring(ScoringKind::PlainEgg) => Rgb::new(1.0, 1.0, 0.9),
            ItemKind::Scoring(ScoringKind::BonusEgg) => Rgb::new(0.3, 0.6, 1.0),
            ItemKind::Scoring(ScoringKind::RareEgg) => Rgb::new(1.0, 0.84, 0.0),
            ItemKind::Scoring(ScoringKind::SoftHazard) => Rgb::new(0.45, 0.3, 0.1),
            ItemKind::Scoring(ScoringKind::HardHazard) => Rgb::new(1.0, 0.35, 0.0),
            ItemKind::PowerUp(PowerUpKind::LargerBasket) => Rgb::new(0.6, 0.4, 0.2),
            ItemKind::PowerUp(PowerUpKind::SlowTime) => Rgb::new(0.5, 0.8, 1.0),
            ItemKind::PowerUp(PowerUpKind::ExtraTime) => Rgb::new(0.2, 1.0, 0.4),
            ItemKind::PowerUp(PowerUpKind::Shield) => Rgb::new(0.3, 0.9, 0.9),
            ItemKind::PowerUp(PowerUpKind::Magnet) => Rgb::new(0.9, 0.2, 0.3),
            ItemKind::PowerUp(PowerUpKind::SpeedBoost) => Rgb::new(1.0, 1.0, 0.2),
        }
    }

    /// Audio cue played on catch
    pub fn catch_sound(self) -> SoundEffect {
        match self {
            ItemKind::Scoring(ScoringKind::PlainEgg) => SoundEffect::CatchEgg,
            ItemKind::Scoring(ScoringKind::BonusEgg) => SoundEffect::CatchBonusEgg,
            ItemKind::Scoring(ScoringKind::RareEgg) => SoundEffect::CatchRareEgg,
            ItemKind::Scoring(ScoringKind::SoftHazard) => SoundEffect::HazardHit,
            ItemKind::Scoring(ScoringKind::HardHazard) => SoundEffect::Explosion,
            ItemKind::PowerUp(_) => SoundEffect::PowerUp,
        }
    }
}

/// A chicken patrolling its rail
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chicken {
    pub pos: Vec2,
    /// Horizontal speed (pixels/s)
    pub speed: f32,
    /// -1.0 walking left, 1.0 walking right
    pub direction: f32,
    pub rail_left: f32,
    pub rail_right: f32,
    pub active: bool,
}

impl Chicken {
    pub fn new(rail_y: f32, rail_left: f32, rail_right: f32, speed: f32, direction: f32) -> Self {
        Self {
            pos: Vec2::new((rail_left + rail_right) / 2.0, rail_y),
            speed,
            direction,
            rail_left,
            rail_right,
            active: true,
        }
    }

    /// Walk along the rail, turning around at either end
    pub fn walk(&mut self, dt: f32) {
        if !self.active {
            return;
        }
        self.pos.x += self.speed * self.direction * dt;
        if self.pos.x <= self.rail_left {
            self.pos.x = self.rail_left;
            self.direction = 1.0;
        } else if self.pos.x >= self.rail_right {
            self.pos.x = self.rail_right;
            self.direction = -1.0;
        }
    }
}

/// Rail layout: (y, left, right, speed, initial direction, active at start)
const RAILS: [(f32, f32, f32, f32, f32, bool); 4] = [
    (620.0, 80.0, 820.0, 120.0, 1.0, true),
    (560.0, 150.0, 750.0, 160.0, -1.0, true),
    (500.0, 60.0, 440.0, 140.0, 1.0, true),
    (500.0, 460.0, 840.0, 180.0, -1.0, false),
];

/// The fixed chicken roster for a fresh round
pub fn initial_chickens() -> Vec<Chicken> {
    RAILS
        .iter()
        .map(|&(y, left, right, speed, direction, active)| {
            let mut chicken = Chicken::new(y, left, right, speed, direction);
            chicken.active = active;
            chicken
        })
        .collect()
}

/// Something falling from a chicken
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FallingItem {
    pub pos: Vec2,
    /// Only `vel.x` accumulates; descent uses `fall_speed`
    pub vel: Vec2,
    pub kind: ItemKind,
    pub fall_speed: f32,
    /// Cosmetic spin (radians)
    pub rotation: f32,
    /// Index into `GameState::chickens`
    pub source_chicken: usize,
}

/// The player's basket
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Basket {
    /// Horizontal center
    pub x: f32,
    /// Bottom edge
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Current speed (pixels/s), boosted by power-ups
    pub speed: f32,
}

impl Default for Basket {
    fn default() -> Self {
        Self {
            x: WINDOW_WIDTH / 2.0,
            y: BASKET_Y,
            width: BASKET_WIDTH,
            height: BASKET_HEIGHT,
            speed: BASKET_SPEED,
        }
    }
}

impl Basket {
    /// Move to `x`, keeping the basket fully on screen
    pub fn set_x(&mut self, x: f32) {
        self.x = crate::clamp_basket_x(x, self.width);
    }

    /// Whether a point lies inside the basket's catch rectangle
    pub fn contains(&self, pos: Vec2) -> bool {
        (pos.x - self.x).abs() <= self.width / 2.0
            && pos.y >= self.y
            && pos.y <= self.y + self.height
    }

    /// Drop width/speed overrides
    pub fn revert(&mut self) {
        self.width = BASKET_WIDTH;
        self.speed = BASKET_SPEED;
        self.set_x(self.x);
    }
}

/// A timed gust pushing items sideways
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Airflow {
    /// Simulation clock at activation
    pub start_time: f32,
    pub duration: f32,
    /// Horizontal acceleration (pixels/s²)
    pub strength: f32,
    /// -1.0 left, 1.0 right
    pub direction: f32,
    pub active: bool,
}

impl Airflow {
    /// Signed acceleration applied to items (0 when inactive)
    pub fn force(&self) -> f32 {
        if self.active {
            self.strength * self.direction
        } else {
            0.0
        }
    }
}

/// Active power-up effects sharing a single countdown
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PowerUps {
    pub larger_basket: bool,
    pub slow_time: bool,
    pub shield: bool,
    pub magnet: bool,
    pub speed_boost: bool,
    /// Seconds until every flag above clears
    pub timer: f32,
    /// Hazards absorbed by the current shield
    pub shield_hits: u32,
}

impl PowerUps {
    pub fn any_active(&self) -> bool {
        self.larger_basket || self.slow_time || self.shield || self.magnet || self.speed_boost
    }
}

/// A particle for visual effects
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Remaining life, starts at `PARTICLE_LIFE`
    pub life: f32,
    pub color: Rgb,
}

/// Notifications for the presentation layer, drained once per frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum GameEvent {
    PhaseChanged { from: GamePhase, to: GamePhase },
    ItemCaught { kind: ItemKind, pos: Vec2 },
    EggMissed { kind: ScoringKind },
    ShieldAbsorbed { charges_left: u32 },
    PowerUpsExpired,
    AirflowStarted { direction: f32, strength: f32 },
    GameOver { score: u32, new_high_score: bool },
}

impl GameEvent {
    /// Audio cue for this event, if any
    pub fn sound(&self) -> Option<SoundEffect> {
        match self {
            GameEvent::ItemCaught { kind, .. } => Some(kind.catch_sound()),
            GameEvent::EggMissed { .. } => Some(SoundEffect::Miss),
            GameEvent::ShieldAbsorbed { .. } => Some(SoundEffect::ShieldBlock),
            GameEvent::PowerUpsExpired => Some(SoundEffect::PowerDown),
            GameEvent::AirflowStarted { .. } => Some(SoundEffect::Wind),
            GameEvent::GameOver { new_high_score: true, .. } => Some(SoundEffect::HighScore),
            GameEvent::GameOver { .. } => Some(SoundEffect::GameOver),
            GameEvent::PhaseChanged { .. } => None,
        }
    }
}

/// Complete game state
#[derive(Debug, Clone, Serialize)]
pub struct GameState {
    /// Seed the RNG was created from
    pub seed: u64,
    #[serde(skip)]
    pub(crate) rng: Pcg32,
    pub phase: GamePhase,
    pub score: u32,
    pub combo: u32,
    pub max_combo: u32,
    /// Eggs caught this round
    pub eggs_caught: u32,
    /// Countdown clock (seconds)
    pub time_remaining: f32,
    /// Real play time this round (seconds, excludes pauses)
    pub elapsed: f32,
    /// World clock, runs slower under slow time
    pub sim_clock: f32,
    pub spawn_timer: f32,
    pub airflow_timer: f32,
    pub chickens: Vec<Chicken>,
    pub items: Vec<FallingItem>,
    pub basket: Basket,
    pub airflow: Airflow,
    pub power_ups: PowerUps,
    pub particles: Vec<Particle>,
    /// Live particle cap (0 disables particles)
    pub particle_cap: usize,
    /// Leaderboard, kept across rounds
    pub high_scores: HighScores,
    /// Pending notifications (see `drain_events`)
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new game at the menu with the given RNG seed
    pub fn new(seed: u64) -> Self {
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Menu,
            score: 0,
            combo: 0,
            max_combo: 0,
            eggs_caught: 0,
            time_remaining: GAME_DURATION,
            elapsed: 0.0,
            sim_clock: 0.0,
            spawn_timer: 0.0,
            airflow_timer: 0.0,
            chickens: Vec::new(),
            items: Vec::new(),
            basket: Basket::default(),
            airflow: Airflow::default(),
            power_ups: PowerUps::default(),
            particles: Vec::new(),
            particle_cap: MAX_PARTICLES,
            high_scores: HighScores::new(),
            events: Vec::new(),
        };
        state.reset();
        state
    }

    /// Restore every per-round value. Keeps the phase, RNG and leaderboard.
    pub fn reset(&mut self) {
        self.score = 0;
        self.combo = 0;
        self.max_combo = 0;
        self.eggs_caught = 0;
        self.time_remaining = GAME_DURATION;
        self.elapsed = 0.0;
        self.sim_clock = 0.0;
        self.spawn_timer = 0.0;
        self.airflow_timer = 0.0;
        self.chickens = initial_chickens();
        self.items.clear();
        self.basket = Basket::default();
        self.airflow = Airflow::default();
        self.power_ups = PowerUps::default();
        self.particles.clear();
    }

    /// Best score recorded in this process
    pub fn high_score(&self) -> u32 {
        self.high_scores.top_score().unwrap_or(0)
    }

    /// Scale a real timestep to world time (slow time halves it)
    pub fn world_dt(&self, dt: f32) -> f32 {
        if self.power_ups.slow_time {
            dt * SLOW_TIME_SCALE
        } else {
            dt
        }
    }

    /// Switch phase and announce it
    pub fn set_phase(&mut self, to: GamePhase) {
        let from = self.phase;
        if from == to {
            return;
        }
        log::info!("Phase {:?} -> {:?}", from, to);
        self.phase = to;
        self.events.push(GameEvent::PhaseChanged { from, to });
    }

    /// Take all events produced since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_starts_at_menu() {
        let state = GameState::new(1);
        assert_eq!(state.phase, GamePhase::Menu);
        assert_eq!(state.time_remaining, GAME_DURATION);
        assert_eq!(state.chickens.len(), 4);
        assert_eq!(state.chickens.iter().filter(|c| c.active).count(), 3);
        assert_eq!(state.basket.width, BASKET_WIDTH);
    }

    #[test]
    fn test_chicken_turns_at_rail_ends() {
        let mut chicken = Chicken::new(500.0, 100.0, 200.0, 100.0, 1.0);
        chicken.walk(1.0);
        assert_eq!(chicken.pos.x, 200.0);
        assert_eq!(chicken.direction, -1.0);
        chicken.walk(2.0);
        assert_eq!(chicken.pos.x, 100.0);
        assert_eq!(chicken.direction, 1.0);
    }

    #[test]
    fn test_inactive_chicken_stays_put() {
        let mut chicken = Chicken::new(500.0, 100.0, 200.0, 100.0, 1.0);
        chicken.active = false;
        chicken.walk(0.5);
        assert_eq!(chicken.pos.x, 150.0);
    }

    #[test]
    fn test_basket_contains() {
        let basket = Basket::default();
        assert!(basket.contains(Vec2::new(450.0, 80.0)));
        assert!(basket.contains(Vec2::new(490.0, 50.0)));
        assert!(!basket.contains(Vec2::new(491.0, 80.0)));
        assert!(!basket.contains(Vec2::new(450.0, 49.0)));
        assert!(!basket.contains(Vec2::new(450.0, 111.0)));
    }

    #[test]
    fn test_points_table() {
        assert_eq!(ScoringKind::PlainEgg.points(3), 4);
        assert_eq!(ScoringKind::BonusEgg.points(1), 7);
        assert_eq!(ScoringKind::RareEgg.points(2), 16);
        assert_eq!(ScoringKind::HardHazard.points(5), 0);
        assert_eq!(ScoringKind::HardHazard.penalty(), 20);
    }

    #[test]
    fn test_reset_keeps_leaderboard() {
        let mut state = GameState::new(7);
        state.high_scores.add_score(42, 3, 10);
        state.score = 42;
        state.reset();
        assert_eq!(state.score, 0);
        assert_eq!(state.high_score(), 42);
    }
}
