//! Overlap queries against the entity registry
//!
//! The registry maps shape handles to the kind of entity that owns them.
//! Only registered shapes take part in collisions: the ball itself, particles
//! and HUD text are drawn on the same surface but never collide.

use std::collections::BTreeMap;

use crate::Bounds;
use crate::platform::{ShapeId, Surface};

/// What a registered shape belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColliderKind {
    Paddle,
    Brick,
}

/// One member of an overlap set
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Collider {
    pub shape: ShapeId,
    pub kind: ColliderKind,
    pub bounds: Bounds,
}

impl Collider {
    /// Handle of the brick behind this collider, if it is one
    pub fn as_brick(&self) -> Option<ShapeId> {
        match self.kind {
            ColliderKind::Brick => Some(self.shape),
            ColliderKind::Paddle => None,
        }
    }

    pub fn is_paddle(&self) -> bool {
        self.kind == ColliderKind::Paddle
    }
}

/// Shape handle -> entity kind for everything that can be hit
#[derive(Debug, Clone, Default)]
pub struct Registry {
    entries: BTreeMap<ShapeId, ColliderKind>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, shape: ShapeId, kind: ColliderKind) {
        self.entries.insert(shape, kind);
    }

    pub fn deregister(&mut self, shape: ShapeId) -> Option<ColliderKind> {
        self.entries.remove(&shape)
    }

    pub fn kind(&self, shape: ShapeId) -> Option<ColliderKind> {
        self.entries.get(&shape).copied()
    }

    pub fn count(&self, kind: ColliderKind) -> usize {
        self.entries.values().filter(|k| **k == kind).count()
    }

    /// Registered shapes touching `region`, excluding `exclude`
    pub fn overlapping(
        &self,
        surface: &dyn Surface,
        region: Bounds,
        exclude: Option<ShapeId>,
    ) -> Vec<Collider> {
        surface
            .find_overlapping(region)
            .into_iter()
            .filter(|shape| Some(*shape) != exclude)
            .filter_map(|shape| {
                let kind = self.kind(shape)?;
                let bounds = surface.bounds(shape)?;
                Some(Collider {
                    shape,
                    kind,
                    bounds,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::{Canvas, Color};

    #[test]
    fn test_only_registered_shapes_collide() {
        let mut canvas = Canvas::new(100.0, 100.0, Color::BLACK);
        let brick = canvas.create_rectangle(Bounds::new(0.0, 0.0, 20.0, 10.0), Color::WHITE);
        let particle = canvas.create_oval(Bounds::new(5.0, 5.0, 8.0, 8.0), Color::WHITE);
        let ball = canvas.create_oval(Bounds::new(2.0, 2.0, 12.0, 12.0), Color::WHITE);

        let mut registry = Registry::new();
        registry.register(brick, ColliderKind::Brick);

        let hits = registry.overlapping(&canvas, Bounds::new(2.0, 2.0, 12.0, 12.0), Some(ball));
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].as_brick(), Some(brick));
        assert!(!hits.iter().any(|c| c.shape == particle));
    }

    #[test]
    fn test_deregistered_shape_is_ignored() {
        let mut canvas = Canvas::new(100.0, 100.0, Color::BLACK);
        let paddle = canvas.create_rectangle(Bounds::new(0.0, 0.0, 20.0, 10.0), Color::WHITE);
        let mut registry = Registry::new();
        registry.register(paddle, ColliderKind::Paddle);
        assert_eq!(registry.count(ColliderKind::Paddle), 1);
        let corner = Bounds::new(0.0, 0.0, 1.0, 1.0);
        assert!(registry.overlapping(&canvas, corner, None)[0].is_paddle());

        registry.deregister(paddle);
        assert!(registry.overlapping(&canvas, Bounds::new(0.0, 0.0, 1.0, 1.0), None).is_empty());
    }
}
