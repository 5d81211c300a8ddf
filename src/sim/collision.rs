//! Item motion and basket collision
//!
//! Items fall straight down at their own speed; airflow and the magnet only
//! ever touch the horizontal velocity.

use glam::Vec2;

use super::state::{Airflow, Basket, FallingItem};
use crate::consts::*;

/// What happened to an item this tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ItemFate {
    /// Still falling
    Falling,
    /// Landed in the basket
    Caught,
    /// Left the play area
    Lost,
}

/// Advance one item by `dt` of world time
pub fn integrate_item(item: &mut FallingItem, airflow: &Airflow, magnet: Option<&Basket>, dt: f32) {
    item.pos.y -= item.fall_speed * dt;

    item.vel.x += airflow.force() * dt;
    if let Some(basket) = magnet.filter(|_| item.kind.is_egg()) {
        let dx = basket.x - item.pos.x;
        if item.pos.distance(Vec2::new(basket.x, basket.y)) <= MAGNET_RADIUS {
            item.vel.x += dx.signum() * MAGNET_PULL * dt;
        }
    }
    // Air resistance
    item.vel.x *= AIR_DAMPING;
    item.pos.x += item.vel.x * dt;

    item.rotation = (item.rotation + ITEM_SPIN * dt) % std::f32::consts::TAU;
}

/// True once an item can no longer be caught or seen
pub fn out_of_bounds(item: &FallingItem) -> bool {
    item.pos.y < 0.0
        || item.pos.y > WINDOW_HEIGHT + EXIT_MARGIN
        || item.pos.x < -EXIT_MARGIN
        || item.pos.x > WINDOW_WIDTH + EXIT_MARGIN
}

/// Catch test first, then bounds
pub fn classify(item: &FallingItem, basket: &Basket) -> ItemFate {
    if basket.contains(item.pos) {
        ItemFate::Caught
    } else if out_of_bounds(item) {
        ItemFate::Lost
    } else {
        ItemFate::Falling
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{ItemKind, PowerUpKind, ScoringKind};

    fn egg_at(x: f32, y: f32) -> FallingItem {
        FallingItem {
            pos: Vec2::new(x, y),
            vel: Vec2::ZERO,
            kind: ItemKind::Scoring(ScoringKind::PlainEgg),
            fall_speed: 100.0,
            rotation: 0.0,
            source_chicken: 0,
        }
    }

    #[test]
    fn test_item_falls_straight_without_wind() {
        let mut item = egg_at(300.0, 400.0);
        integrate_item(&mut item, &Airflow::default(), None, 0.5);
        assert_eq!(item.pos, Vec2::new(300.0, 350.0));
    }

    #[test]
    fn test_airflow_pushes_and_damps() {
        let airflow = Airflow {
            start_time: 0.0,
            duration: AIRFLOW_DURATION,
            strength: 100.0,
            direction: -1.0,
            active: true,
        };
        let mut item = egg_at(300.0, 400.0);
        integrate_item(&mut item, &airflow, None, 0.1);
        assert!((item.vel.x - (-10.0 * AIR_DAMPING)).abs() < 1e-4);
        assert!(item.pos.x < 300.0);

        // Velocity decays once the wind stops
        let calm = Airflow::default();
        let before = item.vel.x;
        integrate_item(&mut item, &calm, None, 0.1);
        assert!(item.vel.x.abs() < before.abs());
    }

    #[test]
    fn test_magnet_pulls_eggs_only() {
        let basket = Basket::default();
        let mut egg = egg_at(basket.x + 100.0, 150.0);
        integrate_item(&mut egg, &Airflow::default(), Some(&basket), 0.1);
        assert!(egg.vel.x < 0.0);

        let mut shield = egg_at(basket.x + 100.0, 150.0);
        shield.kind = ItemKind::PowerUp(PowerUpKind::Shield);
        integrate_item(&mut shield, &Airflow::default(), Some(&basket), 0.1);
        assert_eq!(shield.vel.x, 0.0);
    }

    #[test]
    fn test_classify() {
        let basket = Basket::default();
        assert_eq!(classify(&egg_at(basket.x, 80.0), &basket), ItemFate::Caught);
        assert_eq!(classify(&egg_at(basket.x, 300.0), &basket), ItemFate::Falling);
        assert_eq!(classify(&egg_at(100.0, -1.0), &basket), ItemFate::Lost);
        assert_eq!(classify(&egg_at(-60.0, 300.0), &basket), ItemFate::Lost);
        assert_eq!(
            classify(&egg_at(WINDOW_WIDTH + 60.0, 300.0), &basket),
            ItemFate::Lost
        );
    }
}
