//! Explosion effect
//!
//! Purely visual: a short frame animation that keeps running after the game
//! ends, so a fatal hit stays visible over the end screen.

use glam::Vec2;

use super::entity::{Poolable, Sprite, Update};
use crate::consts::{EXPLOSION_FRAME_INTERVAL, EXPLOSION_FRAMES};
use crate::draw::DrawList;

#[derive(Debug, Clone, Default)]
pub struct Explosion {
    pos: Vec2,
    /// Full-size radius reached on the last frame
    radius: f32,
    frame: u32,
    timer: f32,
    destroyed: bool,
}

impl Explosion {
    pub fn set(&mut self, pos: Vec2, radius: f32) {
        self.pos = pos;
        self.radius = radius;
        self.frame = 0;
        self.timer = 0.0;
        self.destroyed = false;
    }

    pub fn frame(&self) -> u32 {
        self.frame
    }

    /// Animation progress in `[0, 1]`
    fn progress(&self) -> f32 {
        (self.frame as f32 + self.timer / EXPLOSION_FRAME_INTERVAL) / EXPLOSION_FRAMES as f32
    }
}

impl Sprite for Explosion {
    fn pos(&self) -> Vec2 {
        self.pos
    }

    fn radius(&self) -> f32 {
        self.radius
    }

    fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    fn destroy(&mut self) {
        self.destroyed = true;
    }

    fn draw(&self, out: &mut DrawList) {
        let t = self.progress().clamp(0.0, 1.0);
        let alpha = 1.0 - t;
        // Hot core inside an expanding orange shell
        out.circle(self.pos, self.radius * (0.4 + 0.6 * t), [1.0, 0.55, 0.1, alpha]);
        out.circle(self.pos, self.radius * 0.5 * (1.0 - t), [1.0, 0.95, 0.7, alpha]);
    }
}

impl Update<()> for Explosion {
    fn update(&mut self, dt: f32, _ctx: &()) {
        self.timer += dt;
        while self.timer >= EXPLOSION_FRAME_INTERVAL {
            self.timer -= EXPLOSION_FRAME_INTERVAL;
            self.frame += 1;
            if self.frame >= EXPLOSION_FRAMES {
                self.destroy();
                return;
            }
        }
    }
}

impl Poolable for Explosion {
    fn recycle(&mut self) {
        *self = Self::default();
    }
}
