//! Enemy ships
//!
//! Enemies spawn just above the top edge and slide in at a fixed descent
//! speed. Once fully visible they switch to their kind's cruise speed and
//! start shooting. An enemy that leaves through the bottom edge is destroyed
//! without an explosion.

use glam::Vec2;

use super::bullet::{Bullet, FireContext};
use super::entity::{Damageable, EntityId, Health, Poolable, Sprite, UpdateMut};
use super::state::GameEvent;
use crate::consts::ENEMY_DESCENT_SPEED;
use crate::draw::DrawList;
use crate::settings::EnemyKind;

#[derive(Debug, Clone, Default)]
pub struct Enemy {
    id: EntityId,
    pos: Vec2,
    radius: f32,
    health: Health,
    contact_damage: i32,
    cruise_speed: f32,
    reload_interval: f32,
    reload_timer: f32,
    bullet_speed: f32,
    bullet_damage: i32,
    bullet_radius: f32,
    color: [f32; 4],
    /// Fully inside the world and shooting
    engaged: bool,
    destroyed: bool,
}

impl Enemy {
    /// Arm a pooled enemy from its kind
    pub fn set(&mut self, id: EntityId, kind: &EnemyKind, pos: Vec2) {
        *self = Self {
            id,
            pos,
            radius: kind.radius,
            health: Health::full(kind.health),
            contact_damage: kind.contact_damage,
            cruise_speed: kind.speed,
            reload_interval: kind.reload_interval,
            reload_timer: 0.0,
            bullet_speed: kind.bullet_speed,
            bullet_damage: kind.bullet_damage,
            bullet_radius: kind.bullet_radius,
            color: kind.color,
            engaged: false,
            destroyed: false,
        };
    }

    pub fn id(&self) -> EntityId {
        self.id
    }

    /// Damage dealt to the ship when they touch
    pub fn contact_damage(&self) -> i32 {
        self.contact_damage
    }

    pub fn is_engaged(&self) -> bool {
        self.engaged
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y + self.radius
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y - self.radius
    }

    /// Player bullet test: the upper half of the enemy's box is vulnerable
    pub fn is_bullet_collision(&self, bullet: &Bullet) -> bool {
        !(bullet.right() < self.pos.x - self.radius
            || bullet.left() > self.pos.x + self.radius
            || bullet.bottom() > self.top()
            || bullet.top() < self.pos.y)
    }

    fn shoot(&mut self, ctx: &mut FireContext<'_>) {
        let muzzle = Vec2::new(self.pos.x, self.bottom());
        if !ctx.fire(
            self.id,
            muzzle,
            Vec2::new(0.0, -self.bullet_speed),
            self.bullet_radius,
            self.bullet_damage,
            GameEvent::EnemyShot,
        ) {
            log::debug!("enemy {:?} shot skipped, bullet pool full", self.id);
        }
    }
}

impl Sprite for Enemy {
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
        let r = self.radius;
        out.circle(self.pos, r * 0.8, self.color);
        out.rect(self.pos + Vec2::new(0.0, r * 0.3), Vec2::new(r, r * 0.15), self.color);
        out.circle(self.pos - Vec2::new(0.0, r * 0.2), r * 0.25, [1.0, 1.0, 0.6, 1.0]);
    }
}

impl<'a> UpdateMut<FireContext<'a>> for Enemy {
    fn update_mut(&mut self, dt: f32, ctx: &mut FireContext<'a>) {
        if !self.engaged {
            self.pos.y -= ENEMY_DESCENT_SPEED * dt;
            if self.top() <= ctx.bounds.top() {
                self.engaged = true;
                // First shot as soon as the enemy is in view
                self.reload_timer = self.reload_interval;
            }
        } else {
            self.pos.y -= self.cruise_speed * dt;
            self.reload_timer += dt;
        }

        if self.engaged && self.reload_timer >= self.reload_interval {
            self.reload_timer = 0.0;
            self.shoot(ctx);
        }

        if self.top() < ctx.bounds.bottom() {
            self.destroy();
        }
    }
}

impl Damageable for Enemy {
    fn health(&self) -> i32 {
        self.health.current
    }

    fn damage(&mut self, amount: i32) {
        if self.destroyed {
            return;
        }
        if self.health.take(amount) {
            self.destroy();
        }
    }
}

impl Poolable for Enemy {
    fn recycle(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::bounds::WorldBounds;
    use crate::sim::pool::Pool;

    fn spawn_above(bounds: &WorldBounds) -> Enemy {
        let kind = EnemyKind::small();
        let mut e = Enemy::default();
        e.set(EntityId(5), &kind, Vec2::new(0.0, bounds.top() + kind.radius));
        e
    }

    #[test]
    fn test_descends_then_fires_once_visible() {
        let bounds = WorldBounds::from_aspect(1.0);
        let mut bullets = Pool::new();
        let mut events = Vec::new();
        let mut e = spawn_above(&bounds);

        let mut steps = 0;
        while !e.is_engaged() {
            let mut ctx = FireContext {
                bounds,
                bullets: &mut bullets,
                events: &mut events,
            };
            e.update_mut(1.0 / 60.0, &mut ctx);
            steps += 1;
            assert!(steps < 1000);
        }

        assert!(e.top() <= bounds.top());
        assert_eq!(bullets.active_count(), 1);
        let b = &bullets.active_objects()[0];
        assert_eq!(b.owner(), EntityId(5));
        assert!(b.vel().y < 0.0);
        assert_eq!(events, vec![GameEvent::EnemyShot]);
    }

    #[test]
    fn test_leaving_bottom_edge_destroys() {
        let bounds = WorldBounds::from_aspect(1.0);
        let mut bullets = Pool::with_capacity(0);
        let mut events = Vec::new();
        let mut e = spawn_above(&bounds);
        e.engaged = true;
        e.pos.y = bounds.bottom() - e.radius() - 0.001;

        let mut ctx = FireContext {
            bounds,
            bullets: &mut bullets,
            events: &mut events,
        };
        e.update_mut(0.01, &mut ctx);
        assert!(e.is_destroyed());
        assert!(bullets.is_empty());
    }

    #[test]
    fn test_damage_accumulates_to_destruction() {
        let mut e = Enemy::default();
        e.set(EntityId(2), &EnemyKind::medium(), Vec2::ZERO);
        e.damage(2);
        e.damage(2);
        assert_eq!(e.health(), 1);
        assert!(!e.is_destroyed());
        e.damage(1);
        assert!(e.is_destroyed());
    }

    #[test]
    fn test_bullet_box_covers_upper_half() {
        let mut e = Enemy::default();
        e.set(EntityId(2), &EnemyKind::big(), Vec2::ZERO);

        let mut hit = Bullet::default();
        hit.set(EntityId::PLAYER, Vec2::new(0.0, 0.05), Vec2::ZERO, 0.01, 1);
        assert!(e.is_bullet_collision(&hit));

        let mut low = Bullet::default();
        low.set(EntityId::PLAYER, Vec2::new(0.0, -0.05), Vec2::ZERO, 0.01, 1);
        assert!(!e.is_bullet_collision(&low));
    }
}
