//! Tessellation of display-list shapes into triangles

use glam::Vec2;
use std::f32::consts::PI;

use super::scene::{Frame, Shape};
use super::vertex::{Color, Vertex};

/// Segments used for ellipses
const ELLIPSE_SEGMENTS: u32 = 24;

/// Flatten a frame into a triangle list in normalized device coordinates,
/// preserving paint order
pub fn tessellate(frame: &Frame) -> Vec<Vertex> {
    let viewport = frame.viewport;
    if viewport.x <= 0.0 || viewport.y <= 0.0 {
        return Vec::new();
    }

    let mut vertices = Vec::with_capacity(frame.items.len() * 6);
    for item in &frame.items {
        match &item.shape {
            Shape::Fill(points) => convex_fill(&mut vertices, points, item.color),
            Shape::Stroke { from, to, width } => line(&mut vertices, *from, *to, *width, item.color),
            Shape::Ellipse { center, radii } => {
                ellipse(&mut vertices, *center, *radii, item.color, ELLIPSE_SEGMENTS)
            }
        }
    }

    for v in vertices.iter_mut() {
        v.position = to_ndc(Vec2::from(v.position), viewport);
    }
    vertices
}

/// Pixels (origin top-left, y down) to NDC (origin center, y up)
#[inline]
pub fn to_ndc(p: Vec2, viewport: Vec2) -> [f32; 2] {
    [p.x / viewport.x * 2.0 - 1.0, 1.0 - p.y / viewport.y * 2.0]
}

/// Triangle fan over a convex polygon
fn convex_fill(out: &mut Vec<Vertex>, points: &[Vec2], color: Color) {
    if points.len() < 3 {
        return;
    }
    let origin = points[0];
    for pair in points[1..].windows(2) {
        out.push(Vertex::new(origin.x, origin.y, color));
        out.push(Vertex::new(pair[0].x, pair[0].y, color));
        out.push(Vertex::new(pair[1].x, pair[1].y, color));
    }
}

/// A line as a quad `width` pixels wide
fn line(out: &mut Vec<Vertex>, from: Vec2, to: Vec2, width: f32, color: Color) {
    let dir = (to - from).normalize_or_zero();
    if dir == Vec2::ZERO {
        return;
    }
    // Perpendicular for width
    let perp = Vec2::new(-dir.y, dir.x) * (width / 2.0);

    let a = from + perp;
    let b = from - perp;
    let c = to + perp;
    let d = to - perp;

    // Two triangles
    out.push(Vertex::new(a.x, a.y, color));
    out.push(Vertex::new(b.x, b.y, color));
    out.push(Vertex::new(c.x, c.y, color));

    out.push(Vertex::new(c.x, c.y, color));
    out.push(Vertex::new(b.x, b.y, color));
    out.push(Vertex::new(d.x, d.y, color));
}

/// Filled ellipse as a fan from the center
fn ellipse(out: &mut Vec<Vertex>, center: Vec2, radii: Vec2, color: Color, segments: u32) {
    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        out.push(Vertex::new(center.x, center.y, color));
        out.push(Vertex::new(
            center.x + radii.x * theta1.cos(),
            center.y + radii.y * theta1.sin(),
            color,
        ));
        out.push(Vertex::new(
            center.x + radii.x * theta2.cos(),
            center.y + radii.y * theta2.sin(),
            color,
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::scene::{DrawItem, Source};
    use crate::renderer::vertex::colors;

    fn frame(items: Vec<DrawItem>) -> Frame {
        Frame {
            viewport: Vec2::new(200.0, 100.0),
            clear: colors::BACKGROUND,
            items,
        }
    }

    #[test]
    fn test_ndc_corners() {
        let view = Vec2::new(200.0, 100.0);
        assert_eq!(to_ndc(Vec2::ZERO, view), [-1.0, 1.0]);
        assert_eq!(to_ndc(view, view), [1.0, -1.0]);
        assert_eq!(to_ndc(view / 2.0, view), [0.0, 0.0]);
    }

    #[test]
    fn test_triangle_counts() {
        let f = frame(vec![
            DrawItem {
                source: Source::Grid,
                shape: Shape::Fill(vec![
                    Vec2::new(0.0, 0.0),
                    Vec2::new(10.0, 0.0),
                    Vec2::new(10.0, 10.0),
                    Vec2::new(0.0, 10.0),
                ]),
                color: colors::WHITE,
            },
            DrawItem {
                source: Source::Grid,
                shape: Shape::Stroke {
                    from: Vec2::ZERO,
                    to: Vec2::new(50.0, 50.0),
                    width: 1.0,
                },
                color: colors::GRID,
            },
            DrawItem {
                source: Source::Player,
                shape: Shape::Ellipse {
                    center: Vec2::new(100.0, 50.0),
                    radii: Vec2::new(10.0, 4.0),
                },
                color: colors::SHADOW,
            },
        ]);
        let vertices = tessellate(&f);
        assert_eq!(vertices.len(), 6 + 6 + 3 * ELLIPSE_SEGMENTS as usize);
        // Paint order survives tessellation
        assert_eq!(vertices[0].color, colors::WHITE);
        assert_eq!(vertices[6].color, colors::GRID);
        assert_eq!(vertices.last().map(|v| v.color), Some(colors::SHADOW));
    }

    #[test]
    fn test_degenerate_shapes_are_skipped() {
        let f = frame(vec![
            DrawItem {
                source: Source::Grid,
                shape: Shape::Stroke {
                    from: Vec2::ONE,
                    to: Vec2::ONE,
                    width: 1.0,
                },
                color: colors::GRID,
            },
            DrawItem {
                source: Source::Grid,
                shape: Shape::Fill(vec![Vec2::ZERO, Vec2::ONE]),
                color: colors::GRID,
            },
        ]);
        assert!(tessellate(&f).is_empty());
    }
}
