//! Shared position/bounding-box model for everything drawn on the surface
//!
//! Ball, paddle and bricks all embed a `Body` and expose it through the
//! `Entity` trait. Bounds are derived from center and half-extents, so they
//! can never drift out of sync with the position.

use glam::Vec2;

use crate::Bounds;
use crate::platform::{Color, ShapeId, Surface};

/// A shape handle plus the geometry it was drawn with
#[derive(Debug, Clone)]
pub struct Body {
    shape: Option<ShapeId>,
    center: Vec2,
    half: Vec2,
}

impl Body {
    /// Draw an oval inscribed in the box and track it
    pub fn oval(surface: &mut dyn Surface, center: Vec2, half: Vec2, fill: Color) -> Self {
        let shape = surface.create_oval(Bounds::from_center(center, half), fill);
        Self {
            shape: Some(shape),
            center,
            half,
        }
    }

    /// Draw a filled rectangle and track it
    pub fn rectangle(surface: &mut dyn Surface, center: Vec2, half: Vec2, fill: Color) -> Self {
        let shape = surface.create_rectangle(Bounds::from_center(center, half), fill);
        Self {
            shape: Some(shape),
            center,
            half,
        }
    }

    #[inline]
    pub fn shape(&self) -> Option<ShapeId> {
        self.shape
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.center
    }

    #[inline]
    pub fn half_extents(&self) -> Vec2 {
        self.half
    }

    #[inline]
    pub fn bounds(&self) -> Bounds {
        Bounds::from_center(self.center, self.half)
    }

    pub fn translate(&mut self, surface: &mut dyn Surface, dx: f32, dy: f32) {
        debug_assert!(self.shape.is_some(), "translate on a destroyed entity");
        let Some(shape) = self.shape else {
            log::error!("translate on a destroyed entity ignored");
            return;
        };
        surface.move_by(shape, dx, dy);
        self.center += Vec2::new(dx, dy);
    }

    /// Replace half-extents, keeping the center
    pub fn resize(&mut self, surface: &mut dyn Surface, half: Vec2) {
        debug_assert!(self.shape.is_some(), "resize on a destroyed entity");
        let Some(shape) = self.shape else {
            return;
        };
        self.half = half.max(Vec2::ZERO);
        surface.set_bounds(shape, self.bounds());
    }

    pub fn recolor(&mut self, surface: &mut dyn Surface, fill: Color) {
        if let Some(shape) = self.shape {
            surface.set_fill(shape, fill);
        }
    }

    /// Remove the shape permanently; no-op once destroyed
    pub fn destroy(&mut self, surface: &mut dyn Surface) {
        if let Some(shape) = self.shape.take() {
            surface.delete(shape);
        }
    }
}

/// Capability set shared by ball, paddle and bricks
pub trait Entity {
    fn body(&self) -> &Body;
    fn body_mut(&mut self) -> &mut Body;

    fn shape(&self) -> Option<ShapeId> {
        self.body().shape()
    }

    fn bounds(&self) -> Bounds {
        self.body().bounds()
    }

    fn center(&self) -> Vec2 {
        self.body().center()
    }

    fn is_destroyed(&self) -> bool {
        self.body().shape().is_none()
    }

    fn translate(&mut self, surface: &mut dyn Surface, dx: f32, dy: f32) {
        self.body_mut().translate(surface, dx, dy);
    }

    fn destroy(&mut self, surface: &mut dyn Surface) {
        self.body_mut().destroy(surface);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::Canvas;

    struct Dummy(Body);

    impl Entity for Dummy {
        fn body(&self) -> &Body {
            &self.0
        }
        fn body_mut(&mut self) -> &mut Body {
            &mut self.0
        }
    }

    #[test]
    fn test_translate_moves_shape_and_bounds() {
        let mut canvas = Canvas::new(100.0, 100.0, Color::BLACK);
        let mut e = Dummy(Body::rectangle(
            &mut canvas,
            Vec2::new(50.0, 50.0),
            Vec2::new(10.0, 5.0),
            Color::WHITE,
        ));
        e.translate(&mut canvas, 3.0, -4.0);
        assert_eq!(e.bounds(), Bounds::new(43.0, 41.0, 63.0, 51.0));
        assert_eq!(canvas.bounds(e.shape().unwrap()), Some(e.bounds()));
    }

    #[test]
    fn test_destroy_is_idempotent() {
        let mut canvas = Canvas::new(100.0, 100.0, Color::BLACK);
        let mut e = Dummy(Body::oval(
            &mut canvas,
            Vec2::new(10.0, 10.0),
            Vec2::splat(5.0),
            Color::WHITE,
        ));
        e.destroy(&mut canvas);
        assert!(e.is_destroyed());
        e.destroy(&mut canvas);
        assert!(canvas.is_empty());
    }

    #[test]
    fn test_resize_keeps_center() {
        let mut canvas = Canvas::new(100.0, 100.0, Color::BLACK);
        let mut body =
            Body::oval(&mut canvas, Vec2::new(20.0, 20.0), Vec2::splat(5.0), Color::WHITE);
        body.resize(&mut canvas, Vec2::splat(4.75));
        assert_eq!(body.center(), Vec2::new(20.0, 20.0));
        assert_eq!(body.bounds(), Bounds::new(15.25, 15.25, 24.75, 24.75));
    }
}
