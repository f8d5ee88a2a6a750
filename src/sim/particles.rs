//! Cosmetic particle effects
//!
//! Two kinds share one update contract: a trail left behind the moving ball
//! and a burst thrown out by a destroyed brick. Particles never feed back into
//! gameplay. They are owned by a single `ParticleSystem`, which spawning code
//! receives as an explicit `&mut` handle.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::consts::*;
use crate::platform::{Color, Surface};

use super::entity::Body;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParticleKind {
    /// Short-lived dot following the ball
    Trail,
    /// Debris from a destroyed brick
    Burst,
}

/// Per-kind spawn parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParticleSpec {
    pub kind: ParticleKind,
    /// Initial radius
    pub size: f32,
    /// Initial lifetime in ticks
    pub life: f32,
    pub decay: f32,
}

pub const TRAIL_SPEC: ParticleSpec = ParticleSpec {
    kind: ParticleKind::Trail,
    size: TRAIL_SIZE,
    life: TRAIL_LIFETIME,
    decay: TRAIL_DECAY,
};

pub const BURST_SPEC: ParticleSpec = ParticleSpec {
    kind: ParticleKind::Burst,
    size: BURST_SIZE,
    life: BURST_LIFETIME,
    decay: BURST_DECAY,
};

/// A single particle with its own shape on the surface
#[derive(Debug, Clone)]
pub struct Particle {
    pub kind: ParticleKind,
    body: Body,
    pub vel: Vec2,
    /// Remaining lifetime in ticks
    pub life: f32,
    /// Lifetime consumed per tick
    pub decay: f32,
    pub color: Color,
}

impl Particle {
    /// Current radius
    pub fn size(&self) -> f32 {
        self.body.half_extents().x
    }

    pub fn center(&self) -> Vec2 {
        self.body.center()
    }

    /// Advance one tick. Returns false once expired; the shape is already
    /// deleted by then and the caller must drop the particle.
    pub fn update(&mut self, surface: &mut dyn Surface) -> bool {
        self.life -= self.decay;
        if self.life <= 0.0 {
            self.body.destroy(surface);
            return false;
        }

        self.body.translate(surface, self.vel.x, self.vel.y);
        let half = Vec2::splat(self.size() - PARTICLE_SHRINK);
        self.body.resize(surface, half);
        true
    }
}

/// The active-particle collection
#[derive(Debug, Clone)]
pub struct ParticleSystem {
    particles: Vec<Particle>,
    capacity: usize,
    trails: bool,
    rng: Pcg32,
}

impl ParticleSystem {
    pub fn new(seed: u64, capacity: usize, trails: bool) -> Self {
        Self {
            particles: Vec::new(),
            capacity,
            trails,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter()
    }

    fn spawn(
        &mut self,
        surface: &mut dyn Surface,
        spec: ParticleSpec,
        at: Vec2,
        vel: Vec2,
        color: Color,
    ) -> bool {
        if self.particles.len() >= self.capacity {
            log::trace!("particle budget {} reached, {:?} dropped", self.capacity, spec.kind);
            return false;
        }
        let body = Body::oval(surface, at, Vec2::splat(spec.size), color);
        self.particles.push(Particle {
            kind: spec.kind,
            body,
            vel,
            life: spec.life,
            decay: spec.decay,
            color,
        });
        true
    }

    /// Trail behind the ball: inherits half of the ball's per-tick step
    pub fn spawn_trail(&mut self, surface: &mut dyn Surface, at: Vec2, ball_step: Vec2) -> usize {
        if !self.trails {
            return 0;
        }
        let vel = ball_step * TRAIL_VELOCITY_FACTOR;
        let mut spawned = 0;
        for _ in 0..TRAIL_PER_TICK {
            if self.spawn(surface, TRAIL_SPEC, at, vel, Color::WHITE) {
                spawned += 1;
            }
        }
        spawned
    }

    /// Radial burst of debris in the brick's last color
    pub fn spawn_burst(&mut self, surface: &mut dyn Surface, at: Vec2, color: Color) -> usize {
        let mut spawned = 0;
        for _ in 0..BURST_COUNT {
            let vel = Vec2::new(
                self.rng.random_range(-BURST_SPEED..BURST_SPEED),
                self.rng.random_range(-BURST_SPEED..BURST_SPEED),
            );
            if self.spawn(surface, BURST_SPEC, at, vel, color) {
                spawned += 1;
            }
        }
        spawned
    }

    /// Advance every particle, removing the expired ones in the same pass.
    /// Returns how many expired.
    pub fn update(&mut self, surface: &mut dyn Surface) -> usize {
        let before = self.particles.len();
        self.particles.retain_mut(|p| p.update(surface));
        before - self.particles.len()
    }
}
