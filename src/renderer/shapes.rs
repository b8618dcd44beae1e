//! Tessellation of drawing commands into coloured triangles

use glam::DVec2;

use super::scene::{Color, DrawCommand, Paint};
use super::vertex::Vertex;

#[inline]
fn vertex(p: DVec2, color: Color) -> Vertex {
    Vertex::new(p.x as f32, p.y as f32, color)
}

#[inline]
fn painted(p: DVec2, paint: &Paint) -> Vertex {
    vertex(p, paint.color_at(p))
}

/// Triangle fan over a convex polygon
pub fn convex(points: &[DVec2], paint: &Paint) -> Vec<Vertex> {
    if points.len() < 3 {
        return Vec::new();
    }

    let mut vertices = Vec::with_capacity((points.len() - 2) * 3);
    let anchor = points[0];
    for pair in points[1..].windows(2) {
        vertices.push(painted(anchor, paint));
        vertices.push(painted(pair[0], paint));
        vertices.push(painted(pair[1], paint));
    }
    vertices
}

/// Quads from each polyline segment straight down to `floor`
pub fn area(top: &[DVec2], floor: f64, paint: &Paint) -> Vec<Vertex> {
    if top.len() < 2 {
        return Vec::new();
    }

    let mut vertices = Vec::with_capacity((top.len() - 1) * 6);
    for pair in top.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        let a_floor = DVec2::new(a.x, floor);
        let b_floor = DVec2::new(b.x, floor);

        vertices.push(painted(a, paint));
        vertices.push(painted(b, paint));
        vertices.push(painted(b_floor, paint));

        vertices.push(painted(a, paint));
        vertices.push(painted(b_floor, paint));
        vertices.push(painted(a_floor, paint));
    }
    vertices
}

/// Polyline of the given width, one quad per segment
pub fn stroke(points: &[DVec2], width: f64, color: Color) -> Vec<Vertex> {
    if points.len() < 2 {
        return Vec::new();
    }

    let half = width / 2.0;
    let mut vertices = Vec::with_capacity((points.len() - 1) * 6);
    for pair in points.windows(2) {
        let (p1, p2) = (pair[0], pair[1]);
        let dir = (p2 - p1).normalize_or_zero();
        // Perpendicular for width
        let perp = DVec2::new(-dir.y, dir.x) * half;

        let v1a = p1 + perp;
        let v1b = p1 - perp;
        let v2a = p2 + perp;
        let v2b = p2 - perp;

        vertices.push(vertex(v1a, color));
        vertices.push(vertex(v1b, color));
        vertices.push(vertex(v2a, color));

        vertices.push(vertex(v2a, color));
        vertices.push(vertex(v1b, color));
        vertices.push(vertex(v2b, color));
    }
    vertices
}

/// Tessellate a whole frame, preserving painter's order
pub fn tessellate(commands: &[DrawCommand]) -> Vec<Vertex> {
    let mut vertices = Vec::new();
    for command in commands {
        match command {
            DrawCommand::FillConvex { points, paint } => {
                vertices.extend(convex(points, paint));
            }
            DrawCommand::FillArea { top, floor, paint } => {
                vertices.extend(area(top, *floor, paint));
            }
            DrawCommand::Stroke {
                points,
                width,
                color,
            } => {
                vertices.extend(stroke(points, *width, *color));
            }
        }
    }
    vertices
}
