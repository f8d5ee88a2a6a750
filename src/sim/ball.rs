//! The ball: motion, wall reflection and collision-direction resolution

use glam::Vec2;

use crate::consts::*;
use crate::platform::{Color, ShapeId, Surface};

use super::collision::Collider;
use super::entity::{Body, Entity};
use super::particles::ParticleSystem;

/// A ball entity
#[derive(Debug, Clone)]
pub struct Ball {
    body: Body,
    /// Each component is always -1.0 or +1.0
    pub direction: Vec2,
    /// `None` while carried by the paddle or after the round ended
    pub speed: Option<f32>,
}

impl Entity for Ball {
    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }
}

impl Ball {
    /// Spawn a ball heading up-right at the default speed
    pub fn spawn(surface: &mut dyn Surface, center: Vec2) -> Self {
        Self {
            body: Body::oval(surface, center, Vec2::splat(BALL_RADIUS), Color::WHITE),
            direction: Vec2::new(1.0, -1.0),
            speed: Some(BALL_SPEED),
        }
    }

    pub fn is_moving(&self) -> bool {
        self.speed.is_some_and(|s| s > 0.0)
    }

    /// Detach the ball from the simulation
    pub fn stop(&mut self) {
        self.speed = None;
    }

    /// One tick of motion. Reflects off the side walls and the ceiling (the
    /// floor is a loss, not a bounce), moves, and leaves a trail behind.
    /// Returns false when the ball is stopped.
    pub fn advance(&mut self, surface: &mut dyn Surface, particles: &mut ParticleSystem) -> bool {
        let Some(speed) = self.speed else {
            return false;
        };

        let bounds = self.bounds();
        let width = surface.width();
        if bounds.x0 <= 0.0 || bounds.x1 >= width {
            self.direction.x = -self.direction.x;
        }
        if bounds.y0 <= 0.0 {
            self.direction.y = -self.direction.y;
        }

        let step = self.direction * speed;
        let origin = bounds.center();
        self.translate(surface, step.x, step.y);
        particles.spawn_trail(surface, origin, step);
        true
    }

    /// Pick the new direction from the overlap set and return the bricks
    /// that were hit.
    ///
    /// More than one collider is ambiguous (wedged between two bricks, or a
    /// brick and the paddle) and always resolves as a vertical bounce. A single
    /// collider pushes the ball sideways when the ball's center is past one of
    /// its side edges, otherwise it bounces vertically.
    pub fn resolve_collision(&mut self, overlapping: &[Collider]) -> Vec<ShapeId> {
        let x = self.center().x;
        match overlapping {
            [] => {}
            [single] => {
                if x > single.bounds.x1 {
                    self.direction.x = 1.0;
                } else if x < single.bounds.x0 {
                    self.direction.x = -1.0;
                } else {
                    self.direction.y = -self.direction.y;
                }
            }
            _ => self.direction.y = -self.direction.y,
        }

        overlapping.iter().filter_map(Collider::as_brick).collect()
    }
}
