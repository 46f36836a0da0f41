//! Triangle generation for draw-list shapes

use glam::Vec2;
use std::f32::consts::TAU;

use super::vertex::Vertex;
use crate::draw::{DrawList, Shape};

/// Generate vertices for a filled circle (triangle fan as a list)
pub fn circle(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);
    push_circle(&mut vertices, center, radius, color, segments);
    vertices
}

/// Generate vertices for an axis-aligned rectangle
pub fn quad(center: Vec2, half_size: Vec2, color: [f32; 4]) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity(6);
    push_quad(&mut vertices, center, half_size, color);
    vertices
}

fn push_circle(out: &mut Vec<Vertex>, center: Vec2, radius: f32, color: [f32; 4], segments: u32) {
    let segments = segments.max(3);
    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * TAU;
        let theta2 = ((i + 1) as f32 / segments as f32) * TAU;

        out.push(Vertex::at(center, color));
        out.push(Vertex::at(center + Vec2::from_angle(theta1) * radius, color));
        out.push(Vertex::at(center + Vec2::from_angle(theta2) * radius, color));
    }
}

fn push_quad(out: &mut Vec<Vertex>, center: Vec2, half_size: Vec2, color: [f32; 4]) {
    let min = center - half_size;
    let max = center + half_size;
    let tl = Vec2::new(min.x, max.y);
    let br = Vec2::new(max.x, min.y);

    out.push(Vertex::at(min, color));
    out.push(Vertex::at(br, color));
    out.push(Vertex::at(max, color));

    out.push(Vertex::at(min, color));
    out.push(Vertex::at(max, color));
    out.push(Vertex::at(tl, color));
}

/// Tessellate every shape in paint order. Text is skipped; hosts draw it
/// separately.
pub fn tessellate(list: &DrawList, circle_segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity(list.commands().len() * circle_segments as usize * 3);
    for cmd in list.commands() {
        match &cmd.shape {
            Shape::Circle { center, radius } => {
                if *radius > 0.0 && cmd.color[3] > 0.0 {
                    push_circle(&mut vertices, *center, *radius, cmd.color, circle_segments);
                }
            }
            Shape::Rect { center, half_size } => {
                push_quad(&mut vertices, *center, *half_size, cmd.color);
            }
            Shape::Text { .. } => {}
        }
    }
    vertices
}
