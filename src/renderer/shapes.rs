//! Shape generation for 2D primitives

use glam::Vec2;
use std::f32::consts::PI;

use super::vertex::Vertex;
use crate::Bounds;

/// Generate vertices for a filled axis-aligned ellipse inscribed in `bounds`
pub fn ellipse(bounds: Bounds, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let center = bounds.center();
    let radii = Vec2::new(bounds.width() * 0.5, bounds.height() * 0.5);
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        // Triangle from center to edge
        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(
            center.x + radii.x * theta1.cos(),
            center.y + radii.y * theta1.sin(),
            color,
        ));
        vertices.push(Vertex::new(
            center.x + radii.x * theta2.cos(),
            center.y + radii.y * theta2.sin(),
            color,
        ));
    }

    vertices
}

/// Generate vertices for a filled rectangle (two triangles)
pub fn rectangle(bounds: Bounds, color: [f32; 4]) -> Vec<Vertex> {
    let Bounds { x0, y0, x1, y1 } = bounds;
    vec![
        Vertex::new(x0, y0, color),
        Vertex::new(x1, y0, color),
        Vertex::new(x0, y1, color),
        Vertex::new(x0, y1, color),
        Vertex::new(x1, y0, color),
        Vertex::new(x1, y1, color),
    ]
}

/// Segment count for an ellipse of the given size: small particles get a
/// coarse fan, the ball a smoother one.
pub fn segments_for(bounds: Bounds) -> u32 {
    let extent = bounds.width().max(bounds.height());
    ((extent * 1.5) as u32).clamp(6, 32)
}
