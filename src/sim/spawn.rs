//! Item spawning and airflow gusts
//!
//! Both run on world time, so slow time also slows the drop rate and the
//! wind cycle.

use glam::Vec2;
use rand::Rng;

use super::state::{FallingItem, GameEvent, GameState, ItemKind, PowerUpKind, ScoringKind};
use crate::consts::*;

/// Drop weights, out of 100
const ITEM_WEIGHTS: [(ItemKind, u32); 11] = [
    (ItemKind::Scoring(ScoringKind::PlainEgg), 40),
    (ItemKind::Scoring(ScoringKind::BonusEgg), 15),
    (ItemKind::Scoring(ScoringKind::RareEgg), 5),
    (ItemKind::Scoring(ScoringKind::SoftHazard), 12),
    (ItemKind::Scoring(ScoringKind::HardHazard), 8),
    (ItemKind::PowerUp(PowerUpKind::LargerBasket), 4),
    (ItemKind::PowerUp(PowerUpKind::SlowTime), 3),
    (ItemKind::PowerUp(PowerUpKind::ExtraTime), 3),
    (ItemKind::PowerUp(PowerUpKind::Shield), 4),
    (ItemKind::PowerUp(PowerUpKind::Magnet), 3),
    (ItemKind::PowerUp(PowerUpKind::SpeedBoost), 3),
];

/// Map a roll in `0..100` onto the weight table
pub fn kind_for_roll(roll: u32) -> ItemKind {
    let mut acc = 0;
    for &(kind, weight) in &ITEM_WEIGHTS {
        acc += weight;
        if roll < acc {
            return kind;
        }
    }
    ItemKind::Scoring(ScoringKind::PlainEgg)
}

fn total_weight() -> u32 {
    ITEM_WEIGHTS.iter().map(|&(_, w)| w).sum()
}

/// Advance the spawn clock; each active chicken has a coin-flip chance to
/// lay something when it fires
pub fn tick_spawner(state: &mut GameState, world_dt: f32) {
    state.spawn_timer += world_dt;
    if state.spawn_timer < SPAWN_INTERVAL {
        return;
    }
    state.spawn_timer = 0.0;

    let total = total_weight();
    for idx in 0..state.chickens.len() {
        if !state.chickens[idx].active || !state.rng.random_bool(SPAWN_CHANCE) {
            continue;
        }
        let kind = kind_for_roll(state.rng.random_range(0..total));
        let fall_speed = state
            .rng
            .random_range(ITEM_MIN_FALL_SPEED..ITEM_MAX_FALL_SPEED);
        let pos = state.chickens[idx].pos;
        log::debug!("Chicken {} dropped {:?} at {:.0}", idx, kind, pos.x);
        state.items.push(FallingItem {
            pos,
            vel: Vec2::ZERO,
            kind,
            fall_speed,
            rotation: 0.0,
            source_chicken: idx,
        });
    }
}

/// Advance the gust cycle: expire the current gust and start a new one
/// every `AIRFLOW_INTERVAL`
pub fn tick_airflow(state: &mut GameState, world_dt: f32) {
    if state.airflow.active
        && state.sim_clock - state.airflow.start_time >= state.airflow.duration
    {
        state.airflow.active = false;
        log::debug!("Airflow calmed");
    }

    state.airflow_timer += world_dt;
    if state.airflow_timer <= AIRFLOW_INTERVAL {
        return;
    }
    state.airflow_timer = 0.0;

    let strength = state
        .rng
        .random_range(AIRFLOW_MIN_STRENGTH..AIRFLOW_MAX_STRENGTH);
    let direction = if state.rng.random_bool(0.5) { 1.0 } else { -1.0 };
    start_airflow(state, strength, direction);
}

/// Replace any current gust with a fresh one
pub fn start_airflow(state: &mut GameState, strength: f32, direction: f32) {
    state.airflow.active = true;
    state.airflow.start_time = state.sim_clock;
    state.airflow.duration = AIRFLOW_DURATION;
    state.airflow.strength = strength;
    state.airflow.direction = direction;
    log::debug!("Airflow {:+.0} px/s² for {}s", strength * direction, AIRFLOW_DURATION);
    state.events.push(GameEvent::AirflowStarted {
        direction,
        strength,
    });
}
