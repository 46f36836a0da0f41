//! Decoration: backdrop and drifting star field
//!
//! Runs every frame in both session states and never takes part in
//! collisions.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::bounds::WorldBounds;
use super::entity::{Sprite, Update};
use crate::draw::DrawList;

const BACKDROP_COLOR: [f32; 4] = [0.08, 0.03, 0.18, 1.0];
const STAR_COLOR: [f32; 3] = [1.0, 1.0, 0.95];
const STAR_RADIUS: f32 = 0.004;

/// Full-screen backdrop that follows the world rectangle
#[derive(Debug, Clone, Default)]
pub struct Background {
    bounds: WorldBounds,
}

impl Background {
    pub fn new(bounds: WorldBounds) -> Self {
        Self { bounds }
    }

    pub fn resize(&mut self, bounds: WorldBounds) {
        self.bounds = bounds;
    }

    pub fn draw(&self, out: &mut DrawList) {
        out.rect(self.bounds.center, self.bounds.half_size, BACKDROP_COLOR);
    }
}

#[derive(Debug, Clone)]
pub struct Star {
    pos: Vec2,
    vel: Vec2,
    radius: f32,
    /// Twinkle phase in radians
    phase: f32,
    twinkle_rate: f32,
}

impl Star {
    /// Place a star anywhere inside `bounds` with a random drift
    pub fn random(rng: &mut Pcg32, bounds: &WorldBounds) -> Self {
        Self {
            pos: Vec2::new(
                rng.random_range(bounds.left()..=bounds.right()),
                rng.random_range(bounds.bottom()..=bounds.top()),
            ),
            vel: Vec2::new(rng.random_range(-0.005..=0.005), rng.random_range(-0.5..=-0.1)),
            radius: STAR_RADIUS * rng.random_range(0.5_f32..=1.5),
            phase: rng.random_range(0.0..std::f32::consts::TAU),
            twinkle_rate: rng.random_range(2.0..=6.0),
        }
    }

    fn brightness(&self) -> f32 {
        0.6 + 0.4 * self.phase.sin()
    }
}

impl Sprite for Star {
    fn pos(&self) -> Vec2 {
        self.pos
    }

    fn radius(&self) -> f32 {
        self.radius
    }

    fn is_destroyed(&self) -> bool {
        false
    }

    fn destroy(&mut self) {}

    fn draw(&self, out: &mut DrawList) {
        let [r, g, b] = STAR_COLOR;
        out.circle(self.pos, self.radius, [r, g, b, self.brightness()]);
    }
}

impl Update<WorldBounds> for Star {
    fn update(&mut self, dt: f32, bounds: &WorldBounds) {
        self.pos += self.vel * dt;
        self.phase = (self.phase + self.twinkle_rate * dt) % std::f32::consts::TAU;

        // Wrap around every edge
        if self.pos.y + self.radius < bounds.bottom() {
            self.pos.y = bounds.top() + self.radius;
        }
        if self.pos.x + self.radius < bounds.left() {
            self.pos.x = bounds.right() + self.radius;
        } else if self.pos.x - self.radius > bounds.right() {
            self.pos.x = bounds.left() - self.radius;
        }
    }
}

/// Backdrop plus star field
#[derive(Debug, Clone)]
pub struct Decoration {
    background: Background,
    stars: Vec<Star>,
    rng: Pcg32,
}

impl Decoration {
    pub fn new(star_count: usize, bounds: WorldBounds, mut rng: Pcg32) -> Self {
        let stars = (0..star_count).map(|_| Star::random(&mut rng, &bounds)).collect();
        Self {
            background: Background::new(bounds),
            stars,
            rng,
        }
    }

    pub fn stars(&self) -> &[Star] {
        &self.stars
    }

    /// Rescatter the stars over the new world rectangle
    pub fn resize(&mut self, bounds: WorldBounds) {
        self.background.resize(bounds);
        for star in &mut self.stars {
            *star = Star::random(&mut self.rng, &bounds);
        }
    }

    pub fn update(&mut self, dt: f32, bounds: &WorldBounds) {
        for star in &mut self.stars {
            star.update(dt, bounds);
        }
    }

    pub fn draw_backdrop(&self, out: &mut DrawList) {
        self.background.draw(out);
    }

    pub fn draw_stars(&self, out: &mut DrawList) {
        for star in &self.stars {
            star.draw(out);
        }
    }
}
