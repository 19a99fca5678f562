//! Frame scene assembly
//!
//! Builds the whole frame's vertex list from the game state: backboard, rim,
//! rippling net, line-art ball, debris. Order matters (painter's algorithm).

use glam::Vec2;

use super::shapes;
use super::vertex::{Vertex, colors};
use crate::consts::*;
use crate::sim::{Ball, GameState, Hoop, Particle};

const BALL_SEGMENTS: u32 = 32;
const PARTICLE_SEGMENTS: u32 = 10;
const SEAM_SEGMENTS: u32 = 12;
const SEAM_STROKE: f32 = 2.0;
const BACKBOARD_STROKE: f32 = 5.0;
const NET_STROKE: f32 = 2.0;

pub fn build_scene(state: &GameState, draw_particles: bool) -> Vec<Vertex> {
    let mut verts = Vec::with_capacity(2048);

    push_hoop(&mut verts, &state.hoop);
    push_ball(&mut verts, &state.ball);
    if draw_particles {
        for p in &state.particles {
            push_particle(&mut verts, p);
        }
    }

    verts
}

fn push_hoop(verts: &mut Vec<Vertex>, hoop: &Hoop) {
    let bb = &hoop.backboard;
    verts.extend(shapes::rect(
        bb.x,
        bb.y,
        bb.width,
        bb.height,
        colors::BACKBOARD_FILL,
    ));
    verts.extend(shapes::rect_outline(
        bb.x,
        bb.y,
        bb.width,
        bb.height,
        BACKBOARD_STROKE,
        colors::BACKBOARD_LINE,
    ));

    // Rim bar straddles the scoring line
    verts.extend(shapes::rect(
        hoop.pos.x,
        hoop.pos.y - RIM_HALF_THICKNESS,
        hoop.width,
        RIM_HALF_THICKNESS * 2.0,
        colors::RIM,
    ));

    // Net strands, rippling while the swish runs
    let net_width = hoop.width * 0.8;
    let start_x = hoop.pos.x + (hoop.width - net_width) / 2.0;
    let top_y = hoop.pos.y + RIM_HALF_THICKNESS;
    let amount = hoop.swish_amount();

    for i in 0..=NET_STRANDS {
        let x1 = start_x + (net_width / NET_STRANDS as f32) * i as f32;
        let sign = if i % 2 == 0 { 1.0 } else { -1.0 };
        verts.extend(shapes::line(
            Vec2::new(x1, top_y),
            Vec2::new(x1 + amount * sign, top_y + NET_HEIGHT),
            NET_STROKE,
            colors::NET,
        ));
    }
}

fn push_ball(verts: &mut Vec<Vertex>, ball: &Ball) {
    let r = ball.radius;
    let rot = Vec2::from_angle(ball.rotation);
    let to_world = |local: Vec2| ball.pos + rot.rotate(local);

    verts.extend(shapes::circle(
        ball.pos,
        r,
        colors::BALL_FILL,
        BALL_SEGMENTS,
    ));
    verts.extend(shapes::ring(
        ball.pos,
        r - SEAM_STROKE / 2.0,
        r + SEAM_STROKE / 2.0,
        colors::BALL_LINE,
        BALL_SEGMENTS,
    ));

    // Center seam rolls with the ball
    verts.extend(shapes::line(
        to_world(Vec2::new(0.0, -r)),
        to_world(Vec2::new(0.0, r)),
        SEAM_STROKE,
        colors::BALL_LINE,
    ));

    // Side seams: quadratic arcs bulging out to either edge
    for side in [1.0, -1.0] {
        verts.extend(shapes::quadratic_strip(
            to_world(Vec2::new(side * r * 0.5, -r * 0.866)),
            to_world(Vec2::new(side * r, 0.0)),
            to_world(Vec2::new(side * r * 0.5, r * 0.866)),
            SEAM_STROKE,
            colors::BALL_LINE,
            SEAM_SEGMENTS,
        ));
    }
}

fn push_particle(verts: &mut Vec<Vertex>, particle: &Particle) {
    let mut color = colors::PARTICLE_PALETTE[particle.color as usize % colors::PARTICLE_PALETTE.len()];
    color[3] *= particle.alpha();
    verts.extend(shapes::circle(
        particle.pos,
        particle.radius,
        color,
        PARTICLE_SEGMENTS,
    ));
}
