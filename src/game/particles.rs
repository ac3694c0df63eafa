//! Exhaust Trail Particles
//!
//! Lightweight cosmetic pool behind the engine exhaust. Emission is gated by
//! throttle treated as a probability, the pool is capped with FIFO eviction,
//! and particles fade out on a life countdown. No collision coupling.

use std::collections::VecDeque;

use glam::Vec3;
use rand::Rng;

/// Hard cap on live particles; the oldest is evicted beyond this.
pub const MAX_TRAIL_PARTICLES: usize = 200;

/// Fraction of the emitter velocity a particle drifts with (backwards).
const BACKDRIFT: f32 = -0.5;
/// Velocity scale applied during integration.
const DRIFT_SCALE: f32 = 10.0;
/// Life drained per second.
const FADE_RATE: f32 = 0.5;
/// Size gained per second.
const GROWTH_RATE: f32 = 2.0;
/// Starting life.
const INITIAL_LIFE: f32 = 1.0;
/// Starting size.
const INITIAL_SIZE: f32 = 0.5;

/// One cosmetic trail particle.
#[derive(Debug, Clone, Copy)]
pub struct TrailParticle {
    pub position: Vec3,
    pub velocity: Vec3,
    /// Remaining life; the particle is dropped at zero.
    pub life: f32,
    /// Render size, grows as the particle fades.
    pub size: f32,
}

/// FIFO-capped pool of exhaust particles.
#[derive(Debug, Clone, Default)]
pub struct TrailEmitter {
    particles: VecDeque<TrailParticle>,
}

impl TrailEmitter {
    /// Create an empty emitter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Live particles, oldest first, for the render collaborator.
    pub fn particles(&self) -> impl Iterator<Item = &TrailParticle> {
        self.particles.iter()
    }

    /// Number of live particles.
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    /// True when no particles are alive.
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Drop every live particle.
    pub fn clear(&mut self) {
        self.particles.clear();
    }

    /// Request one emission.
    ///
    /// `rate` is a probability in [0, 1] (values outside are clamped); the
    /// throttle is passed here directly so a hotter engine leaves a denser
    /// trail. Returns whether the emission was accepted. When the pool is
    /// full the oldest particle is evicted, never the new one.
    pub fn emit<R: Rng>(&mut self, position: Vec3, velocity: Vec3, rate: f32, rng: &mut R) -> bool {
        if rng.r#gen::<f32>() > rate.clamp(0.0, 1.0) {
            return false;
        }

        self.particles.push_back(TrailParticle {
            position,
            velocity: velocity * BACKDRIFT,
            life: INITIAL_LIFE,
            size: INITIAL_SIZE,
        });
        if self.particles.len() > MAX_TRAIL_PARTICLES {
            self.particles.pop_front();
        }
        true
    }

    /// Advance every particle and drop the expired ones.
    pub fn step(&mut self, dt: f32) {
        for p in &mut self.particles {
            p.position += p.velocity * dt * DRIFT_SCALE;
            p.life -= dt * FADE_RATE;
            p.size += dt * GROWTH_RATE;
        }
        self.particles.retain(|p| p.life > 0.0);
    }
}
