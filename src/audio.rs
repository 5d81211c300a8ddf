//! Audio cues for game events
//!
//! Every cue is a single beep described by a frequency and a duration. Playback
//! is best-effort: a backend that fails is logged and ignored, never surfaced
//! to the simulation.

use std::io::{self, Write};

use serde::{Deserialize, Serialize};

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SoundEffect {
    /// Plain egg caught
    CatchEgg,
    /// Bonus egg caught
    CatchBonusEgg,
    /// Rare egg caught
    CatchRareEgg,
    /// Soft hazard caught without a shield
    HazardHit,
    /// Bomb caught
    Explosion,
    /// Shield soaked up a hazard
    ShieldBlock,
    /// Power-up collected
    PowerUp,
    /// Power-ups ran out
    PowerDown,
    /// Egg hit the ground
    Miss,
    /// Airflow gust started
    Wind,
    /// Time ran out
    GameOver,
    /// Time ran out with a new high score
    HighScore,
}

impl SoundEffect {
    /// Beep pitch in Hz
    pub fn frequency(self) -> u32 {
        match self {
            SoundEffect::CatchEgg => 800,
            SoundEffect::CatchBonusEgg => 1000,
            SoundEffect::CatchRareEgg => 1200,
            SoundEffect::HazardHit => 300,
            SoundEffect::Explosion => 150,
            SoundEffect::ShieldBlock => 600,
            SoundEffect::PowerUp => 1500,
            SoundEffect::PowerDown => 500,
            SoundEffect::Miss => 250,
            SoundEffect::Wind => 400,
            SoundEffect::GameOver => 200,
            SoundEffect::HighScore => 1800,
        }
    }

    /// Beep length in milliseconds
    pub fn duration_ms(self) -> u32 {
        match self {
            SoundEffect::Explosion | SoundEffect::GameOver | SoundEffect::HighScore => 300,
            SoundEffect::Wind => 150,
            _ => 50,
        }
    }
}

/// Something that can emit a beep
pub trait AudioBackend {
    fn beep(&mut self, frequency: u32, duration_ms: u32, volume: f32) -> io::Result<()>;
}

/// Rings the terminal bell on stderr (pitch and volume are ignored)
#[derive(Debug, Default)]
pub struct TerminalBell;

impl AudioBackend for TerminalBell {
    fn beep(&mut self, _frequency: u32, _duration_ms: u32, _volume: f32) -> io::Result<()> {
        let mut err = io::stderr().lock();
        err.write_all(b"\x07")?;
        err.flush()
    }
}

/// Audio manager for the game
pub struct AudioManager {
    backend: Option<Box<dyn AudioBackend>>,
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new(Box::new(TerminalBell))
    }
}

impl AudioManager {
    pub fn new(backend: Box<dyn AudioBackend>) -> Self {
        Self {
            backend: Some(backend),
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
        }
    }

    /// A manager that plays nothing
    pub fn disabled() -> Self {
        Self {
            backend: None,
            master_volume: 0.0,
            sfx_volume: 0.0,
            muted: true,
        }
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    /// Get effective volume
    fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Play a sound effect. Failures are logged and dropped.
    pub fn play(&mut self, effect: SoundEffect) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }
        let Some(backend) = self.backend.as_mut() else {
            return;
        };

        if let Err(e) = backend.beep(effect.frequency(), effect.duration_ms(), vol) {
            log::warn!("Audio backend failed ({:?}), disabling audio: {}", effect, e);
            self.backend = None;
        }
    }
}
