//! Shape generation for 2D primitives
//!
//! Everything here works in screen pixels (origin top-left, y down);
//! [`RenderState`](super::RenderState) maps to NDC at upload time.

use glam::Vec2;
use std::f32::consts::PI;

use super::vertex::{Vertex, colors};
use crate::sim::{GamePhase, GameState, PipePair, Rect};

/// Height of the lip drawn at the open end of each pipe
const CAP_HEIGHT: f32 = 24.0;
/// How far the lip overhangs the pipe on each side
const CAP_OVERHANG: f32 = 4.0;
/// Width of one stripe in the ground band
const STRIPE_WIDTH: f32 = 24.0;

/// Axis-aligned filled quad
pub fn quad(min: Vec2, max: Vec2, color: [f32; 4]) -> Vec<Vertex> {
    gradient_quad(min, max, color, color)
}

/// Axis-aligned quad blending from `top` to `bottom`
pub fn gradient_quad(min: Vec2, max: Vec2, top: [f32; 4], bottom: [f32; 4]) -> Vec<Vertex> {
    vec![
        Vertex::new(min.x, min.y, top),
        Vertex::new(max.x, min.y, top),
        Vertex::new(min.x, max.y, bottom),
        Vertex::new(min.x, max.y, bottom),
        Vertex::new(max.x, min.y, top),
        Vertex::new(max.x, max.y, bottom),
    ]
}

/// Quad covering a simulation rectangle
pub fn rect(r: &Rect, color: [f32; 4]) -> Vec<Vertex> {
    quad(
        Vec2::new(r.x as f32, r.y as f32),
        Vec2::new(r.right() as f32, r.bottom() as f32),
        color,
    )
}

/// Quad of `half_size` centred at `offset` in a local frame, rotated by
/// `angle` radians about `pivot`. Positive angles turn clockwise on screen.
pub fn rotated_quad(
    pivot: Vec2,
    offset: Vec2,
    half_size: Vec2,
    angle: f32,
    color: [f32; 4],
) -> Vec<Vertex> {
    let rot = Vec2::from_angle(angle);
    let corner = |sx: f32, sy: f32| {
        let p = pivot + rot.rotate(offset + Vec2::new(sx * half_size.x, sy * half_size.y));
        Vertex::new(p.x, p.y, color)
    };
    let (tl, tr, bl, br) = (
        corner(-1.0, -1.0),
        corner(1.0, -1.0),
        corner(-1.0, 1.0),
        corner(1.0, 1.0),
    );
    vec![tl, tr, bl, bl, tr, br]
}

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        // Triangle from center to edge
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

/// Both pipes of a pair with a lip at each opening
pub fn pipe_pair(pair: &PipePair) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity(24);
    vertices.extend(rect(&pair.top, colors::PIPE));
    vertices.extend(rect(&pair.bottom, colors::PIPE));

    let left = pair.x() as f32 - CAP_OVERHANG;
    let right = pair.right() as f32 + CAP_OVERHANG;
    let top_lip = pair.top.bottom() as f32;
    let bottom_lip = pair.bottom.y as f32;
    vertices.extend(quad(
        Vec2::new(left, top_lip - CAP_HEIGHT),
        Vec2::new(right, top_lip),
        colors::PIPE_CAP,
    ));
    vertices.extend(quad(
        Vec2::new(left, bottom_lip),
        Vec2::new(right, bottom_lip + CAP_HEIGHT),
        colors::PIPE_CAP,
    ));
    vertices
}

/// The bird, tilted by its rotation about its centre
pub fn bird(state: &GameState) -> Vec<Vertex> {
    let r = &state.bird.rect;
    let pivot = r.center();
    let half = Vec2::new(r.width as f32, r.height as f32) / 2.0;
    let angle = state.bird.rotation.to_radians();

    let mut vertices = Vec::with_capacity(30);
    vertices.extend(rotated_quad(pivot, Vec2::ZERO, half, angle, colors::BIRD));
    // Wing flips up while rising
    let wing_y = if state.bird.velocity < 0.0 { -0.1 } else { 0.2 };
    vertices.extend(rotated_quad(
        pivot,
        Vec2::new(-0.35 * half.x, wing_y * half.y),
        half * Vec2::new(0.45, 0.3),
        angle,
        colors::BIRD_WING,
    ));
    vertices.extend(rotated_quad(
        pivot,
        Vec2::new(0.45 * half.x, -0.4 * half.y),
        half * 0.25,
        angle,
        colors::BIRD_EYE,
    ));
    vertices.extend(rotated_quad(
        pivot,
        Vec2::new(0.55 * half.x, -0.4 * half.y),
        half * 0.1,
        angle,
        colors::PUPIL,
    ));
    vertices.extend(rotated_quad(
        pivot,
        Vec2::new(half.x, 0.15 * half.y),
        half * Vec2::new(0.3, 0.18),
        angle,
        colors::BIRD_BEAK,
    ));
    vertices
}

/// Parallax hills and the striped ground band, both following `scroll_offset`
fn scenery(state: &GameState) -> Vec<Vertex> {
    let t = &state.tuning;
    let width = t.screen_width as f32;
    let ground_y = t.ground_y() as f32;
    let mut vertices = Vec::new();

    // Two copies of the strip so the wrap is seamless
    for copy in 0..2 {
        let base = state.scroll_offset + copy as f32 * width;
        for i in 0..4 {
            let x = base + (i as f32 + 0.5) * width / 4.0;
            vertices.extend(circle(Vec2::new(x, ground_y), width / 7.0, colors::HILLS, 24));
        }
    }

    vertices.extend(quad(
        Vec2::new(0.0, ground_y),
        Vec2::new(width, t.screen_height as f32),
        colors::GROUND,
    ));

    let stripes = (width / STRIPE_WIDTH) as i32 + 2;
    let phase = state.scroll_offset.rem_euclid(STRIPE_WIDTH * 2.0);
    for i in -1..stripes {
        if i % 2 != 0 {
            continue;
        }
        let x = phase + i as f32 * STRIPE_WIDTH - STRIPE_WIDTH;
        vertices.extend(quad(
            Vec2::new(x, ground_y),
            Vec2::new(x + STRIPE_WIDTH, ground_y + 12.0),
            colors::GROUND_STRIPE,
        ));
    }
    vertices
}

/// Build the whole frame from the game state (pure, read-only)
pub fn scene(state: &GameState) -> Vec<Vertex> {
    let t = &state.tuning;
    let screen = Vec2::new(t.screen_width as f32, t.screen_height as f32);

    let mut vertices = gradient_quad(Vec2::ZERO, screen, colors::SKY_TOP, colors::SKY_BOTTOM);
    vertices.extend(scenery(state));
    for pair in state.obstacles.pairs() {
        vertices.extend(pipe_pair(pair));
    }
    vertices.extend(bird(state));

    if state.phase == GamePhase::Ended {
        vertices.extend(quad(Vec2::ZERO, screen, colors::ENDED_SHADE));
    }
    vertices
}
