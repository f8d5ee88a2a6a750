//! Drawable surface collaborator
//!
//! Entities own shape handles on a `Surface` and mutate them through it.
//! `Canvas` is the in-memory implementation used by the headless host and
//! the tests; a windowed host would back the same trait with real widgets.

use std::collections::BTreeMap;

use glam::Vec2;

use crate::Bounds;

/// Opaque handle to a shape on a surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ShapeId(u32);

/// 24-bit sRGB fill color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(0xFF, 0xFF, 0xFF);
    pub const BLACK: Color = Color::rgb(0x00, 0x00, 0x00);
    pub const GREEN: Color = Color::rgb(0x00, 0x80, 0x00);
    pub const RED: Color = Color::rgb(0xFF, 0x00, 0x00);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Primitive shape kinds a surface can hold
#[derive(Debug, Clone, PartialEq)]
pub enum ShapeKind {
    Oval,
    Rectangle,
    Text { text: String, size: u16 },
}

/// A shape as stored by the canvas
#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    pub kind: ShapeKind,
    pub bounds: Bounds,
    pub fill: Color,
}

/// Shape-handle interface the simulation draws through
///
/// Operations on a handle that no longer exists are ignored, mirroring a
/// retained-mode canvas. Callers are expected never to rely on that.
pub trait Surface {
    fn width(&self) -> f32;
    fn height(&self) -> f32;

    fn create_oval(&mut self, bounds: Bounds, fill: Color) -> ShapeId;
    fn create_rectangle(&mut self, bounds: Bounds, fill: Color) -> ShapeId;
    /// Text centered at `pos`
    fn create_text(&mut self, pos: Vec2, text: &str, size: u16, fill: Color) -> ShapeId;

    fn move_by(&mut self, id: ShapeId, dx: f32, dy: f32);
    fn set_bounds(&mut self, id: ShapeId, bounds: Bounds);
    fn set_fill(&mut self, id: ShapeId, fill: Color);
    fn set_text(&mut self, id: ShapeId, text: &str);
    fn delete(&mut self, id: ShapeId);

    fn bounds(&self, id: ShapeId) -> Option<Bounds>;
    /// All shapes whose bounds touch `region`, in creation (stacking) order
    fn find_overlapping(&self, region: Bounds) -> Vec<ShapeId>;
}

/// Approximate glyph advance relative to font size, for text bounds
const TEXT_ADVANCE: f32 = 0.6;

fn text_bounds(pos: Vec2, text: &str, size: u16) -> Bounds {
    let size = size as f32;
    let half = Vec2::new(text.chars().count() as f32 * size * TEXT_ADVANCE * 0.5, size * 0.5);
    Bounds::from_center(pos, half)
}

/// In-memory retained-mode canvas
#[derive(Debug, Clone)]
pub struct Canvas {
    width: f32,
    height: f32,
    pub background: Color,
    shapes: BTreeMap<ShapeId, Shape>,
    next_id: u32,
}

impl Canvas {
    pub fn new(width: f32, height: f32, background: Color) -> Self {
        Self {
            width,
            height,
            background,
            shapes: BTreeMap::new(),
            next_id: 1,
        }
    }

    fn insert(&mut self, shape: Shape) -> ShapeId {
        let id = ShapeId(self.next_id);
        self.next_id += 1;
        self.shapes.insert(id, shape);
        id
    }

    /// Shapes in stacking order (oldest first)
    pub fn shapes(&self) -> impl Iterator<Item = (ShapeId, &Shape)> + '_ {
        self.shapes.iter().map(|(id, shape)| (*id, shape))
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Text of every text shape, in stacking order
    pub fn texts(&self) -> Vec<&str> {
        self.shapes
            .values()
            .filter_map(|s| match &s.kind {
                ShapeKind::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl Surface for Canvas {
    fn width(&self) -> f32 {
        self.width
    }

    fn height(&self) -> f32 {
        self.height
    }

    fn create_oval(&mut self, bounds: Bounds, fill: Color) -> ShapeId {
        self.insert(Shape {
            kind: ShapeKind::Oval,
            bounds,
            fill,
        })
    }

    fn create_rectangle(&mut self, bounds: Bounds, fill: Color) -> ShapeId {
        self.insert(Shape {
            kind: ShapeKind::Rectangle,
            bounds,
            fill,
        })
    }

    fn create_text(&mut self, pos: Vec2, text: &str, size: u16, fill: Color) -> ShapeId {
        self.insert(Shape {
            kind: ShapeKind::Text {
                text: text.to_string(),
                size,
            },
            bounds: text_bounds(pos, text, size),
            fill,
        })
    }

    fn move_by(&mut self, id: ShapeId, dx: f32, dy: f32) {
        if let Some(shape) = self.shapes.get_mut(&id) {
            shape.bounds = shape.bounds.translated(dx, dy);
        }
    }

    fn set_bounds(&mut self, id: ShapeId, bounds: Bounds) {
        if let Some(shape) = self.shapes.get_mut(&id) {
            shape.bounds = bounds;
        }
    }

    fn set_fill(&mut self, id: ShapeId, fill: Color) {
        if let Some(shape) = self.shapes.get_mut(&id) {
            shape.fill = fill;
        }
    }

    fn set_text(&mut self, id: ShapeId, text: &str) {
        let Some(shape) = self.shapes.get_mut(&id) else {
            return;
        };
        if let ShapeKind::Text { text: current, size } = &mut shape.kind {
            *current = text.to_string();
            shape.bounds = text_bounds(shape.bounds.center(), text, *size);
        }
    }

    fn delete(&mut self, id: ShapeId) {
        if self.shapes.remove(&id).is_none() {
            log::trace!("delete of unknown shape {:?} ignored", id);
        }
    }

    fn bounds(&self, id: ShapeId) -> Option<Bounds> {
        self.shapes.get(&id).map(|s| s.bounds)
    }

    fn find_overlapping(&self, region: Bounds) -> Vec<ShapeId> {
        self.shapes
            .iter()
            .filter(|(_, shape)| shape.bounds.overlaps(&region))
            .map(|(id, _)| *id)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn canvas() -> Canvas {
        Canvas::new(200.0, 100.0, Color::BLACK)
    }

    #[test]
    fn test_move_and_bounds() {
        let mut c = canvas();
        let id = c.create_rectangle(Bounds::new(0.0, 0.0, 10.0, 10.0), Color::WHITE);
        c.move_by(id, 5.0, -2.0);
        assert_eq!(c.bounds(id), Some(Bounds::new(5.0, -2.0, 15.0, 8.0)));
    }

    #[test]
    fn test_delete_is_idempotent() {
        let mut c = canvas();
        let id = c.create_oval(Bounds::new(0.0, 0.0, 10.0, 10.0), Color::WHITE);
        c.delete(id);
        c.delete(id);
        assert!(c.bounds(id).is_none());
        assert!(c.is_empty());
    }

    #[test]
    fn test_find_overlapping_in_stacking_order() {
        let mut c = canvas();
        let a = c.create_rectangle(Bounds::new(0.0, 0.0, 10.0, 10.0), Color::WHITE);
        let b = c.create_rectangle(Bounds::new(10.0, 0.0, 20.0, 10.0), Color::WHITE);
        let _far = c.create_rectangle(Bounds::new(50.0, 50.0, 60.0, 60.0), Color::WHITE);

        let hits = c.find_overlapping(Bounds::new(5.0, 5.0, 12.0, 6.0));
        assert_eq!(hits, vec![a, b]);
    }

    #[test]
    fn test_set_text_keeps_center() {
        let mut c = canvas();
        let id = c.create_text(Vec2::new(50.0, 20.0), "Lives: 3", 15, Color::BLACK);
        c.set_text(id, "Lives: 10");
        assert_eq!(c.bounds(id).unwrap().center(), Vec2::new(50.0, 20.0));
        assert_eq!(c.texts(), vec!["Lives: 10"]);
    }
}
