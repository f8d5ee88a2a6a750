//! Frame building
//!
//! Turns the shapes on a `Canvas` into one triangle-list vertex batch in
//! stacking order, plus the text items a font renderer draws on top. No GPU
//! code lives here; a windowed host uploads `Frame::vertex_bytes` itself.

pub mod shapes;
pub mod vertex;

use glam::Vec2;

use crate::platform::{Canvas, ShapeKind};
pub use vertex::Vertex;

/// A text shape for the font renderer
#[derive(Debug, Clone, PartialEq)]
pub struct TextItem {
    pub text: String,
    /// Center position
    pub pos: Vec2,
    pub size: u16,
    pub color: [f32; 4],
}

/// Everything needed to present one frame
#[derive(Debug, Clone, Default)]
pub struct Frame {
    pub clear: [f32; 4],
    pub vertices: Vec<Vertex>,
    pub texts: Vec<TextItem>,
}

impl Frame {
    pub fn vertex_bytes(&self) -> &[u8] {
        vertex::as_bytes(&self.vertices)
    }

    pub fn triangle_count(&self) -> usize {
        self.vertices.len() / 3
    }
}

/// Build a frame from the current canvas contents
pub fn build_frame(canvas: &Canvas) -> Frame {
    let mut frame = Frame {
        clear: vertex::rgba(canvas.background),
        ..Frame::default()
    };

    for (_, shape) in canvas.shapes() {
        // Shrunk-away particles may have inverted bounds until they expire
        if shape.bounds.width() <= 0.0 || shape.bounds.height() <= 0.0 {
            continue;
        }
        let color = vertex::rgba(shape.fill);
        match &shape.kind {
            ShapeKind::Oval => frame.vertices.extend(shapes::ellipse(
                shape.bounds,
                color,
                shapes::segments_for(shape.bounds),
            )),
            ShapeKind::Rectangle => frame.vertices.extend(shapes::rectangle(shape.bounds, color)),
            ShapeKind::Text { text, size } => frame.texts.push(TextItem {
                text: text.clone(),
                pos: shape.bounds.center(),
                size: *size,
                color,
            }),
        }
    }

    log::trace!(
        "frame: {} triangles, {} texts",
        frame.triangle_count(),
        frame.texts.len()
    );
    frame
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Bounds;
    use crate::platform::{Color, Surface};

    #[test]
    fn test_frame_from_canvas() {
        let mut canvas = Canvas::new(100.0, 100.0, Color::BLACK);
        canvas.create_rectangle(Bounds::new(0.0, 0.0, 10.0, 10.0), Color::WHITE);
        canvas.create_oval(Bounds::new(20.0, 20.0, 40.0, 40.0), Color::RED);
        canvas.create_text(Vec2::new(50.0, 20.0), "Lives: 3", 15, Color::BLACK);
        // Fully shrunk particle
        canvas.create_oval(Bounds::new(5.0, 5.0, 5.0, 5.0), Color::WHITE);

        let frame = build_frame(&canvas);
        assert_eq!(frame.clear, [0.0, 0.0, 0.0, 1.0]);
        let fan = shapes::segments_for(Bounds::new(20.0, 20.0, 40.0, 40.0)) as usize;
        assert_eq!(frame.triangle_count(), 2 + fan);
        assert_eq!(frame.texts.len(), 1);
        assert_eq!(frame.texts[0].pos, Vec2::new(50.0, 20.0));
        // Rectangle drawn first (stacking order)
        assert_eq!(frame.vertices[0].color, [1.0, 1.0, 1.0, 1.0]);
        assert_eq!(frame.vertex_bytes().len(), frame.vertices.len() * 24);
    }
}
