//! Shape tessellation for 2D primitives
//!
//! All output is triangle-list vertices in canvas pixel space; the pipeline
//! maps to NDC at draw time.

use glam::Vec2;
use std::f32::consts::TAU;

use super::vertex::Vertex;

/// A constant-width stroke between two points, as a quad.
pub fn line(from: Vec2, to: Vec2, width: f32, color: [f32; 4]) -> Vec<Vertex> {
    let dir = (to - from).normalize_or_zero();
    if dir == Vec2::ZERO {
        return Vec::new();
    }
    let half = Vec2::new(-dir.y, dir.x) * (width / 2.0);

    let a = from + half;
    let b = from - half;
    let c = to + half;
    let d = to - half;

    vec![
        Vertex::new(a.x, a.y, color),
        Vertex::new(b.x, b.y, color),
        Vertex::new(c.x, c.y, color),
        Vertex::new(c.x, c.y, color),
        Vertex::new(b.x, b.y, color),
        Vertex::new(d.x, d.y, color),
    ]
}

/// Filled circle as a triangle fan.
pub fn circle(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * TAU;
        let theta2 = ((i + 1) as f32 / segments as f32) * TAU;

        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(
            center.x + radius * theta1.cos(),
            center.y + radius * theta1.sin(),
            color,
        ));
        vertices.push(Vertex::new(
            center.x + radius * theta2.cos(),
            center.y + radius * theta2.sin(),
            color,
        ));
    }

    vertices
}

/// Circle outline as a thin ring band.
pub fn ring(
    center: Vec2,
    inner_radius: f32,
    outer_radius: f32,
    color: [f32; 4],
    segments: u32,
) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 6) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * TAU;
        let theta2 = ((i + 1) as f32 / segments as f32) * TAU;
        let (s1, c1) = theta1.sin_cos();
        let (s2, c2) = theta2.sin_cos();

        let inner1 = center + Vec2::new(c1, s1) * inner_radius;
        let outer1 = center + Vec2::new(c1, s1) * outer_radius;
        let inner2 = center + Vec2::new(c2, s2) * inner_radius;
        let outer2 = center + Vec2::new(c2, s2) * outer_radius;

        vertices.push(Vertex::new(inner1.x, inner1.y, color));
        vertices.push(Vertex::new(outer1.x, outer1.y, color));
        vertices.push(Vertex::new(inner2.x, inner2.y, color));

        vertices.push(Vertex::new(inner2.x, inner2.y, color));
        vertices.push(Vertex::new(outer1.x, outer1.y, color));
        vertices.push(Vertex::new(outer2.x, outer2.y, color));
    }

    vertices
}

/// Quadratic Bézier stroke, flattened into line quads.
pub fn quadratic_strip(
    p0: Vec2,
    ctrl: Vec2,
    p1: Vec2,
    width: f32,
    color: [f32; 4],
    segments: u32,
) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 6) as usize);
    let mut prev = p0;

    for i in 1..=segments {
        let t = i as f32 / segments as f32;
        let u = 1.0 - t;
        let point = p0 * (u * u) + ctrl * (2.0 * u * t) + p1 * (t * t);
        vertices.extend(line(prev, point, width, color));
        prev = point;
    }

    vertices
}

/// Filled axis-aligned rectangle.
pub fn rect(x: f32, y: f32, width: f32, height: f32, color: [f32; 4]) -> Vec<Vertex> {
    vec![
        Vertex::new(x, y, color),
        Vertex::new(x + width, y, color),
        Vertex::new(x, y + height, color),
        Vertex::new(x, y + height, color),
        Vertex::new(x + width, y, color),
        Vertex::new(x + width, y + height, color),
    ]
}

/// Rectangle outline stroked at the given width.
pub fn rect_outline(
    x: f32,
    y: f32,
    width: f32,
    height: f32,
    stroke: f32,
    color: [f32; 4],
) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity(24);
    let corners = [
        Vec2::new(x, y),
        Vec2::new(x + width, y),
        Vec2::new(x + width, y + height),
        Vec2::new(x, y + height),
    ];
    for i in 0..4 {
        vertices.extend(line(corners[i], corners[(i + 1) % 4], stroke, color));
    }
    vertices
}
