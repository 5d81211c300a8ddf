//! Simulation module
//!
//! All gameplay logic lives here:
//! - Variable timestep supplied by the driver (seconds)
//! - One seeded RNG owned by `GameState`
//! - No rendering or platform dependencies; the presentation layer reads
//!   `GameState` and drains its events

pub mod collision;
pub mod particles;
pub mod scoring;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{ItemFate, classify, integrate_item, out_of_bounds};
pub use state::{
    Airflow, Basket, Chicken, FallingItem, GameEvent, GamePhase, GameState, ItemKind, Particle,
    PowerUpKind, PowerUps, Rgb, ScoringKind,
};
pub use tick::{TickInput, tick};
