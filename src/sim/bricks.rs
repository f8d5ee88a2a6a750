//! Brick grid: static layout, multi-hit durability and destruction

use std::collections::BTreeMap;

use glam::Vec2;

use crate::consts::*;
use crate::platform::{Color, ShapeId, Surface};

use super::entity::{Body, Entity};
use super::particles::ParticleSystem;

/// Fill color for a remaining hit count (1..=3)
pub fn color_for_hits(hits: u8) -> Option<Color> {
    BRICK_COLORS.get(usize::from(hits).checked_sub(1)?).copied()
}

/// What a single `hit()` did to a brick
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HitOutcome {
    /// Survived with `remaining` hits left
    Cracked { remaining: u8 },
    /// Depleted: burst spawned and shape deleted
    Destroyed { center: Vec2 },
}

/// A brick entity
#[derive(Debug, Clone)]
pub struct Brick {
    body: Body,
    hits: u8,
    color: Color,
}

impl Entity for Brick {
    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }
}

impl Brick {
    pub fn spawn(surface: &mut dyn Surface, center: Vec2, hits: u8) -> Self {
        debug_assert!((1..=3).contains(&hits), "brick hit count out of range: {hits}");
        let color = color_for_hits(hits).unwrap_or(Color::WHITE);
        Self {
            body: Body::rectangle(
                surface,
                center,
                Vec2::new(BRICK_WIDTH / 2.0, BRICK_HEIGHT / 2.0),
                color,
            ),
            hits,
            color,
        }
    }

    pub fn hits(&self) -> u8 {
        self.hits
    }

    /// Take one hit. A surviving brick is recolored for its new count; a
    /// depleted one bursts into particles of its last color and is destroyed.
    pub fn hit(&mut self, surface: &mut dyn Surface, particles: &mut ParticleSystem) -> HitOutcome {
        debug_assert!(self.hits > 0, "hit on a depleted brick");
        self.hits = self.hits.saturating_sub(1);

        if let Some(color) = color_for_hits(self.hits) {
            self.color = color;
            self.body.recolor(surface, color);
            return HitOutcome::Cracked {
                remaining: self.hits,
            };
        }

        let center = self.center();
        particles.spawn_burst(surface, center, self.color);
        self.destroy(surface);
        HitOutcome::Destroyed { center }
    }
}

/// Active bricks keyed by shape handle
#[derive(Debug, Clone, Default)]
pub struct BrickGrid {
    bricks: BTreeMap<ShapeId, Brick>,
}

impl BrickGrid {
    /// Brick centers and hit counts for a playfield `width` wide: one column
    /// every brick width starting at the margin, three rows per column.
    pub fn layout(width: f32) -> Vec<(Vec2, u8)> {
        let mut cells = Vec::new();
        let mut x = BRICK_MARGIN;
        while x < width - BRICK_MARGIN {
            let cx = x + BRICK_WIDTH / 2.0;
            for (y, hits) in BRICK_ROWS {
                cells.push((Vec2::new(cx, y), hits));
            }
            x += BRICK_WIDTH;
        }
        cells
    }

    /// Draw a fresh grid across the surface
    pub fn build(surface: &mut dyn Surface) -> Self {
        let mut bricks = BTreeMap::new();
        for (center, hits) in Self::layout(surface.width()) {
            let brick = Brick::spawn(surface, center, hits);
            if let Some(shape) = brick.shape() {
                bricks.insert(shape, brick);
            }
        }
        log::debug!("brick grid built with {} bricks", bricks.len());
        Self { bricks }
    }

    pub fn len(&self) -> usize {
        self.bricks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bricks.is_empty()
    }

    pub fn shapes(&self) -> impl Iterator<Item = ShapeId> + '_ {
        self.bricks.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Brick> {
        self.bricks.values()
    }

    /// Hit the brick behind `shape`; destroyed bricks leave the grid.
    pub fn hit(
        &mut self,
        shape: ShapeId,
        surface: &mut dyn Surface,
        particles: &mut ParticleSystem,
    ) -> Option<HitOutcome> {
        let brick = self.bricks.get_mut(&shape)?;
        let outcome = brick.hit(surface, particles);
        if brick.is_destroyed() {
            self.bricks.remove(&shape);
        }
        Some(outcome)
    }
}
