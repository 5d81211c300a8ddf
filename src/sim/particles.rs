//! Decorative particle bursts (no gameplay effect)

use glam::Vec2;
use rand::Rng;

use super::state::{GameState, Particle, Rgb};
use crate::consts::*;

/// Emit `BURST_PARTICLES` particles flying outward from `pos`
pub fn burst(state: &mut GameState, pos: Vec2, color: Rgb) {
    if state.particle_cap == 0 {
        return;
    }
    for _ in 0..BURST_PARTICLES {
        if state.particles.len() >= state.particle_cap {
            // Remove oldest particles to make room
            state.particles.remove(0);
        }
        let angle = state.rng.random_range(0.0..std::f32::consts::TAU);
        let speed = state.rng.random_range(0.2f32..1.0) * PARTICLE_SPEED;
        state.particles.push(Particle {
            pos,
            vel: Vec2::new(angle.cos(), angle.sin()) * speed,
            life: PARTICLE_LIFE,
            color,
        });
    }
}

/// Bomb blast: a ring of bursts around the impact point
pub fn explosion(state: &mut GameState, pos: Vec2, color: Rgb) {
    burst(state, pos, color);
    for offset in [
        Vec2::new(-25.0, 10.0),
        Vec2::new(25.0, 10.0),
        Vec2::new(0.0, 30.0),
    ] {
        burst(state, pos + offset, Rgb::new(1.0, 0.8, 0.1));
    }
}

/// Integrate particle motion and drop the dead ones
pub fn update(particles: &mut Vec<Particle>, dt: f32) {
    for particle in particles.iter_mut() {
        particle.pos += particle.vel * dt;
        particle.vel.y -= PARTICLE_GRAVITY * dt;
        particle.life -= dt * PARTICLE_DECAY;
    }
    particles.retain(|p| p.life > 0.0);
}
