//! Projectiles
//!
//! Bullets fly in a straight line and remember who fired them. The owner is
//! an identity used only for friendly-fire filtering.

use glam::Vec2;

use super::bounds::WorldBounds;
use super::entity::{EntityId, Poolable, Sprite, Update};
use super::pool::Pool;
use super::state::GameEvent;
use crate::draw::DrawList;

const PLAYER_BULLET_COLOR: [f32; 4] = [0.4, 1.0, 0.9, 1.0];
const ENEMY_BULLET_COLOR: [f32; 4] = [1.0, 0.45, 0.3, 1.0];

#[derive(Debug, Clone, Default)]
pub struct Bullet {
    pos: Vec2,
    vel: Vec2,
    radius: f32,
    damage: i32,
    owner: EntityId,
    destroyed: bool,
}

impl Bullet {
    /// Arm a pooled bullet
    pub fn set(&mut self, owner: EntityId, pos: Vec2, vel: Vec2, radius: f32, damage: i32) {
        self.owner = owner;
        self.pos = pos;
        self.vel = vel;
        self.radius = radius;
        self.damage = damage;
        self.destroyed = false;
    }

    pub fn owner(&self) -> EntityId {
        self.owner
    }

    pub fn damage(&self) -> i32 {
        self.damage
    }

    pub fn vel(&self) -> Vec2 {
        self.vel
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x - self.radius
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.radius
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y + self.radius
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y - self.radius
    }
}

/// What a shooter needs during its update: the world rectangle, the shared
/// bullet pool and the event queue
pub struct FireContext<'a> {
    pub bounds: WorldBounds,
    pub bullets: &'a mut Pool<Bullet>,
    pub events: &'a mut Vec<GameEvent>,
}

impl FireContext<'_> {
    /// Spawn a bullet and queue `event`. Returns false when the pool is full.
    pub fn fire(
        &mut self,
        owner: EntityId,
        pos: Vec2,
        vel: Vec2,
        radius: f32,
        damage: i32,
        event: GameEvent,
    ) -> bool {
        match self.bullets.obtain() {
            Some(bullet) => {
                bullet.set(owner, pos, vel, radius, damage);
                self.events.push(event);
                true
            }
            None => false,
        }
    }
}

impl Sprite for Bullet {
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
        let color = if self.owner == EntityId::PLAYER {
            PLAYER_BULLET_COLOR
        } else {
            ENEMY_BULLET_COLOR
        };
        out.circle(self.pos, self.radius, color);
    }
}

impl Update<WorldBounds> for Bullet {
    fn update(&mut self, dt: f32, bounds: &WorldBounds) {
        self.pos += self.vel * dt;
        if bounds.is_outside(self.pos, self.radius) {
            self.destroy();
        }
    }
}

impl Poolable for Bullet {
    fn recycle(&mut self) {
        *self = Self::default();
    }
}
