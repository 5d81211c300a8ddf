//! Per-frame simulation tick
//!
//! Runs the phase state machine and, while playing, the gameplay update in a
//! fixed order: chickens, airflow, basket, spawner, items, power-up timer,
//! particles, countdown.

use super::collision::{ItemFate, classify, integrate_item};
use super::state::{Basket, GameEvent, GamePhase, GameState, ItemKind};
use super::{particles, scoring, spawn};
use crate::consts::*;

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Held movement keys
    pub move_left: bool,
    pub move_right: bool,
    /// Pointer position; sets the basket center directly (clamped)
    pub pointer_x: Option<f32>,
    /// Start / restart (Enter)
    pub confirm: bool,
    /// Open instructions from the menu
    pub help: bool,
    /// Escape: back to the menu
    pub back: bool,
    /// Pause toggle
    pub pause: bool,
    /// Demo mode - the basket steers itself
    pub autopilot: bool,
}

/// Advance the game by `dt` seconds of real time
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    match state.phase {
        GamePhase::Menu => {
            if input.confirm {
                start_round(state);
            } else if input.help {
                state.set_phase(GamePhase::Help);
            }
        }
        GamePhase::Help => {
            if input.back {
                state.set_phase(GamePhase::Menu);
            }
        }
        GamePhase::Paused => {
            if input.pause {
                state.set_phase(GamePhase::Playing);
            }
        }
        GamePhase::GameOver => {
            if input.confirm {
                start_round(state);
            } else if input.back {
                state.set_phase(GamePhase::Menu);
            }
        }
        GamePhase::Playing => {
            if input.pause {
                state.set_phase(GamePhase::Paused);
            } else if input.back {
                state.set_phase(GamePhase::Menu);
            } else {
                let steps = (dt / MAX_STEP_DT).ceil().clamp(1.0, MAX_SUBSTEPS as f32) as u32;
                let step = dt / steps as f32;
                for _ in 0..steps {
                    step_round(state, input, step);
                    if state.phase != GamePhase::Playing {
                        break;
                    }
                }
            }
        }
    }
}

/// Fresh round from the menu or game over screen
fn start_round(state: &mut GameState) {
    state.reset();
    log::info!("Round started ({}s)", GAME_DURATION);
    state.set_phase(GamePhase::Playing);
}

fn step_round(state: &mut GameState, input: &TickInput, dt: f32) {
    let world_dt = state.world_dt(dt);
    state.elapsed += dt;
    state.sim_clock += world_dt;

    if state.elapsed >= CHICKEN_UNLOCK_TIME {
        for (idx, chicken) in state.chickens.iter_mut().enumerate() {
            if !chicken.active {
                chicken.active = true;
                log::debug!("Chicken {} joined at {:.1}s", idx, state.elapsed);
            }
        }
    }
    for chicken in &mut state.chickens {
        chicken.walk(world_dt);
    }

    spawn::tick_airflow(state, world_dt);

    if input.autopilot {
        let steer = autopilot_input(state);
        move_basket(&mut state.basket, &steer, dt);
    } else {
        move_basket(&mut state.basket, input, dt);
    }

    spawn::tick_spawner(state, world_dt);
    update_items(state, world_dt);
    scoring::tick_power_ups(state, dt);
    particles::update(&mut state.particles, dt);

    state.time_remaining = (state.time_remaining - dt).max(0.0);
    if state.time_remaining <= 0.0 {
        end_round(state);
    }
}

/// Basket follows the pointer, then the held keys
fn move_basket(basket: &mut Basket, input: &TickInput, dt: f32) {
    if let Some(x) = input.pointer_x {
        basket.set_x(x);
    }
    let mut direction = 0.0;
    if input.move_left {
        direction -= 1.0;
    }
    if input.move_right {
        direction += 1.0;
    }
    if direction != 0.0 {
        basket.set_x(basket.x + direction * basket.speed * dt);
    }
}

/// Move every item, then resolve catches and misses in list order
fn update_items(state: &mut GameState, dt: f32) {
    let airflow = &state.airflow;
    let basket = &state.basket;
    let magnet = state.power_ups.magnet.then_some(basket);

    // Outcomes are deferred so effects can mutate the rest of the state
    let mut outcomes: Vec<(ItemFate, ItemKind, glam::Vec2)> = Vec::new();
    state.items.retain_mut(|item| {
        integrate_item(item, airflow, magnet, dt);
        match classify(item, basket) {
            ItemFate::Falling => true,
            fate => {
                outcomes.push((fate, item.kind, item.pos));
                false
            }
        }
    });

    for (fate, kind, pos) in outcomes {
        match fate {
            ItemFate::Caught => scoring::on_catch(state, kind, pos),
            ItemFate::Lost => scoring::on_miss(state, kind),
            ItemFate::Falling => {}
        }
    }
}

/// Time is up: record the score and show the game over screen
fn end_round(state: &mut GameState) {
    let new_high_score = state.score > state.high_score();
    state
        .high_scores
        .add_score(state.score, state.max_combo, state.eggs_caught);
    log::info!(
        "Round over: score {} (max combo {}, {} eggs){}",
        state.score,
        state.max_combo,
        state.eggs_caught,
        if new_high_score { " - new high score!" } else { "" }
    );
    state.events.push(GameEvent::GameOver {
        score: state.score,
        new_high_score,
    });
    state.set_phase(GamePhase::GameOver);
}

/// Demo steering: chase the lowest catchable non-hazard, sidestep hazards
/// that would land in the basket first
fn autopilot_input(state: &GameState) -> TickInput {
    let basket = &state.basket;
    let rim = basket.y + basket.height;

    // Predict where an item crosses the rim, ignoring future wind
    let landing_x = |pos: glam::Vec2, vel_x: f32, fall_speed: f32| {
        let t = ((pos.y - rim) / fall_speed).max(0.0);
        pos.x + vel_x * t.min(0.5)
    };

    let wanted = state
        .items
        .iter()
        .filter(|i| i.pos.y >= basket.y && !is_hazard(i.kind))
        .min_by(|a, b| a.pos.y.total_cmp(&b.pos.y));
    let threat = state
        .items
        .iter()
        .filter(|i| i.pos.y >= basket.y && i.pos.y < rim + 200.0 && is_hazard(i.kind))
        .filter(|i| (i.pos.x - basket.x).abs() < basket.width)
        .min_by(|a, b| a.pos.y.total_cmp(&b.pos.y));

    let mut target = wanted
        .map(|i| landing_x(i.pos, i.vel.x, i.fall_speed))
        .unwrap_or(WINDOW_WIDTH / 2.0);

    if let Some(hazard) = threat {
        let lands_first = wanted.is_none_or(|w| hazard.pos.y <= w.pos.y);
        if lands_first {
            // Step to whichever side has more room
            let away = if hazard.pos.x > WINDOW_WIDTH / 2.0 { -1.0 } else { 1.0 };
            target = hazard.pos.x + away * basket.width * 1.2;
        }
    }

    let dead_zone = basket.speed * (1.0 / 60.0);
    TickInput {
        move_left: target < basket.x - dead_zone,
        move_right: target > basket.x + dead_zone,
        autopilot: true,
        ..Default::default()
    }
}

fn is_hazard(kind: ItemKind) -> bool {
    matches!(kind, ItemKind::Scoring(s) if s.is_hazard())
}
