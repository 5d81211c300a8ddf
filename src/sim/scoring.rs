//! Catch effects, combo bookkeeping and the shared power-up timer

use glam::Vec2;

use super::particles;
use super::state::{GameEvent, GameState, ItemKind, PowerUpKind, ScoringKind};
use crate::consts::*;

/// Apply the effect of catching an item of `kind` at `pos`
pub fn on_catch(state: &mut GameState, kind: ItemKind, pos: Vec2) {
    let hazard = match kind {
        ItemKind::Scoring(scoring) if scoring.is_egg() => {
            state.score = state.score.saturating_add(scoring.points(state.combo));
            state.combo += 1;
            state.eggs_caught += 1;
            None
        }
        ItemKind::Scoring(hazard) => Some(hit_hazard(state, hazard, pos)),
        ItemKind::PowerUp(power) => {
            activate(state, power);
            None
        }
    };
    state.max_combo = state.max_combo.max(state.combo);

    if hazard != Some(HazardOutcome::Exploded) {
        particles::burst(state, pos, kind.color());
    }
    // An absorbed hazard is announced by the shield alone
    if hazard != Some(HazardOutcome::Absorbed) {
        state.events.push(GameEvent::ItemCaught { kind, pos });
    }
}

/// An egg hit the ground: the streak is over
pub fn on_miss(state: &mut GameState, kind: ItemKind) {
    match kind {
        ItemKind::Scoring(scoring) if scoring.is_egg() => {
            state.combo = 0;
            state.events.push(GameEvent::EggMissed { kind: scoring });
        }
        _ => {}
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum HazardOutcome {
    Absorbed,
    Hit,
    Exploded,
}

fn hit_hazard(state: &mut GameState, hazard: ScoringKind, pos: Vec2) -> HazardOutcome {
    if state.power_ups.shield {
        state.power_ups.shield_hits += 1;
        let charges_left = SHIELD_CHARGES.saturating_sub(state.power_ups.shield_hits);
        log::debug!("Shield absorbed {:?}, {} charges left", hazard, charges_left);
        state.events.push(GameEvent::ShieldAbsorbed { charges_left });
        if charges_left == 0 {
            break_shield(state);
        }
        return HazardOutcome::Absorbed;
    }

    state.score = state.score.saturating_sub(hazard.penalty());
    state.combo = 0;
    if hazard == ScoringKind::HardHazard {
        particles::explosion(state, pos, ItemKind::Scoring(hazard).color());
        return HazardOutcome::Exploded;
    }
    HazardOutcome::Hit
}

/// Last charge used: drop the shield, and the shared timer with it unless
/// another power-up is still riding on it
fn break_shield(state: &mut GameState) {
    state.power_ups.shield = false;
    state.power_ups.shield_hits = 0;
    if !state.power_ups.any_active() {
        state.power_ups.timer = 0.0;
    }
    log::debug!("Shield broke");
}

/// Turn on a power-up. Every timed power-up restarts the one shared timer.
pub fn activate(state: &mut GameState, power: PowerUpKind) {
    log::debug!("Power-up {:?}", power);
    let effects = &mut state.power_ups;
    match power {
        PowerUpKind::LargerBasket => {
            effects.larger_basket = true;
            state.basket.width = BASKET_LARGE_WIDTH;
            state.basket.set_x(state.basket.x);
        }
        PowerUpKind::SlowTime => effects.slow_time = true,
        PowerUpKind::ExtraTime => {
            state.time_remaining += EXTRA_TIME_BONUS;
            return;
        }
        PowerUpKind::Shield => {
            effects.shield = true;
            effects.shield_hits = 0;
        }
        PowerUpKind::Magnet => effects.magnet = true,
        PowerUpKind::SpeedBoost => {
            effects.speed_boost = true;
            state.basket.speed = BASKET_SPEED * SPEED_BOOST_FACTOR;
        }
    }
    state.power_ups.timer = POWER_UP_DURATION;
}

/// Count the shared timer down in real time
pub fn tick_power_ups(state: &mut GameState, dt: f32) {
    if state.power_ups.timer <= 0.0 {
        return;
    }
    state.power_ups.timer -= dt;
    if state.power_ups.timer <= 0.0 {
        expire(state);
    }
}

/// Clear every flag and restore the basket
fn expire(state: &mut GameState) {
    let was_active = state.power_ups.any_active();
    state.power_ups = Default::default();
    state.basket.revert();
    if was_active {
        log::debug!("Power-ups expired");
        state.events.push(GameEvent::PowerUpsExpired);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn playing_state() -> GameState {
        let mut state = GameState::new(21);
        state.particle_cap = 0;
        state
    }

    fn catch(state: &mut GameState, kind: ItemKind) {
        let pos = Vec2::new(state.basket.x, BASKET_Y + 10.0);
        on_catch(state, kind, pos);
    }

    const PLAIN: ItemKind = ItemKind::Scoring(ScoringKind::PlainEgg);
    const BONUS: ItemKind = ItemKind::Scoring(ScoringKind::BonusEgg);
    const RARE: ItemKind = ItemKind::Scoring(ScoringKind::RareEgg);
    const POOP: ItemKind = ItemKind::Scoring(ScoringKind::SoftHazard);
    const BOMB: ItemKind = ItemKind::Scoring(ScoringKind::HardHazard);

    #[test]
    fn test_plain_egg_adds_one_plus_combo() {
        let mut state = playing_state();
        state.combo = 4;
        state.score = 10;
        catch(&mut state, PLAIN);
        assert_eq!(state.score, 15);
        assert_eq!(state.combo, 5);
        assert_eq!(state.max_combo, 5);
    }

    #[test]
    fn test_bonus_and_rare_scale_with_combo() {
        let mut state = playing_state();
        state.combo = 2;
        catch(&mut state, BONUS);
        assert_eq!(state.score, 9);
        catch(&mut state, RARE);
        assert_eq!(state.score, 9 + 10 + 9);
        assert_eq!(state.combo, 4);
    }

    #[test]
    fn test_hazards_floor_at_zero_and_reset_combo() {
        let mut state = playing_state();
        state.score = 15;
        state.combo = 3;
        catch(&mut state, BOMB);
        assert_eq!(state.score, 0);
        assert_eq!(state.combo, 0);
        assert_eq!(state.max_combo, 0);

        state.score = 25;
        state.combo = 2;
        catch(&mut state, POOP);
        assert_eq!(state.score, 15);
        assert_eq!(state.combo, 0);
    }

    #[test]
    fn test_bomb_explodes() {
        let mut state = GameState::new(21);
        catch(&mut state, BOMB);
        assert_eq!(state.particles.len(), BURST_PARTICLES * 4);
    }

    #[test]
    fn test_shield_absorbs_three_hazards() {
        let mut state = playing_state();
        state.score = 30;
        state.combo = 2;
        activate(&mut state, PowerUpKind::Shield);
        catch(&mut state, POOP);
        catch(&mut state, BOMB);
        assert!(state.power_ups.shield);
        catch(&mut state, POOP);
        assert!(!state.power_ups.shield);
        assert_eq!(state.power_ups.timer, 0.0);
        assert_eq!(state.score, 30);
        assert_eq!(state.combo, 2);

        // Fourth hazard hurts again
        catch(&mut state, POOP);
        assert_eq!(state.score, 20);
    }

    #[test]
    fn test_broken_shield_keeps_other_power_ups() {
        let mut state = playing_state();
        activate(&mut state, PowerUpKind::Magnet);
        activate(&mut state, PowerUpKind::Shield);
        for _ in 0..SHIELD_CHARGES {
            catch(&mut state, POOP);
        }
        assert!(!state.power_ups.shield);
        assert!(state.power_ups.magnet);
        assert_eq!(state.power_ups.timer, POWER_UP_DURATION);

        tick_power_ups(&mut state, POWER_UP_DURATION + 0.01);
        assert!(!state.power_ups.magnet);
    }

    #[test]
    fn test_absorbed_hazard_only_cues_the_shield() {
        let mut state = playing_state();
        activate(&mut state, PowerUpKind::Shield);
        catch(&mut state, BOMB);
        assert_eq!(state.events, vec![GameEvent::ShieldAbsorbed { charges_left: 2 }]);
        let cues: Vec<_> = state.drain_events().iter().filter_map(|e| e.sound()).collect();
        assert_eq!(cues, vec![crate::audio::SoundEffect::ShieldBlock]);

        state.power_ups.shield = false;
        catch(&mut state, BOMB);
        assert!(matches!(
            state.events.as_slice(),
            [GameEvent::ItemCaught { kind: BOMB, .. }]
        ));
    }

    #[test]
    fn test_miss_only_breaks_combo_for_eggs() {
        let mut state = playing_state();
        state.combo = 3;
        on_miss(&mut state, POOP);
        on_miss(&mut state, ItemKind::PowerUp(PowerUpKind::Magnet));
        assert_eq!(state.combo, 3);
        on_miss(&mut state, RARE);
        assert_eq!(state.combo, 0);
        assert_eq!(
            state.events.last(),
            Some(&GameEvent::EggMissed {
                kind: ScoringKind::RareEgg
            })
        );
    }

    #[test]
    fn test_extra_time_has_no_timer() {
        let mut state = playing_state();
        let before = state.time_remaining;
        activate(&mut state, PowerUpKind::ExtraTime);
        assert_eq!(state.time_remaining, before + EXTRA_TIME_BONUS);
        assert_eq!(state.power_ups.timer, 0.0);
        assert!(!state.power_ups.any_active());
    }

    #[test]
    fn test_speed_boost_doubles_speed_until_expiry() {
        let mut state = playing_state();
        activate(&mut state, PowerUpKind::SpeedBoost);
        assert_eq!(state.basket.speed, BASKET_SPEED * 2.0);
        tick_power_ups(&mut state, POWER_UP_DURATION + 0.01);
        assert!(!state.power_ups.speed_boost);
        assert_eq!(state.basket.speed, BASKET_SPEED);
    }

    #[test]
    fn test_shared_timer_expires_all_flags_together() {
        let mut state = playing_state();
        activate(&mut state, PowerUpKind::Magnet);
        tick_power_ups(&mut state, 4.0);
        activate(&mut state, PowerUpKind::LargerBasket);
        assert_eq!(state.power_ups.timer, POWER_UP_DURATION);

        // The magnet rides along on the refreshed timer
        tick_power_ups(&mut state, 4.0);
        assert!(state.power_ups.magnet);
        tick_power_ups(&mut state, 1.5);
        assert!(!state.power_ups.magnet);
        assert!(!state.power_ups.larger_basket);
        assert_eq!(state.basket.width, BASKET_WIDTH);
        assert!(state.events.contains(&GameEvent::PowerUpsExpired));
    }
}
