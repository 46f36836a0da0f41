//! Player ship
//!
//! The ship is a session-scoped singleton: created once by the session and
//! reset in place for every new game. It slides horizontally along the
//! bottom of the world and fires straight up.

use glam::Vec2;

use super::bounds::WorldBounds;
use super::bullet::{Bullet, FireContext};
use super::entity::{Damageable, EntityId, Health, Sprite, UpdateMut};
use super::input::Key;
use super::state::GameEvent;
use crate::consts::SHIP_MARGIN;
use crate::draw::DrawList;
use crate::settings::ShipSettings;

const HULL_COLOR: [f32; 4] = [0.85, 0.9, 1.0, 1.0];
const COCKPIT_COLOR: [f32; 4] = [0.2, 0.6, 1.0, 1.0];
const HEALTH_BAR_COLOR: [f32; 4] = [0.3, 1.0, 0.4, 0.9];

/// Which way the ship moves when both directions are held
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Heading {
    Left,
    Right,
}

#[derive(Debug, Clone)]
pub struct PlayerShip {
    pos: Vec2,
    radius: f32,
    health: Health,
    speed: f32,
    reload_interval: f32,
    reload_timer: f32,
    bullet_speed: f32,
    bullet_damage: i32,
    bullet_radius: f32,
    auto_fire: bool,

    // Held input
    key_left: bool,
    key_right: bool,
    fire_held: bool,
    left_pointer: Option<u32>,
    right_pointer: Option<u32>,
    last_heading: Heading,

    destroyed: bool,
}

impl PlayerShip {
    pub fn new(settings: &ShipSettings, auto_fire: bool, bounds: &WorldBounds) -> Self {
        let mut ship = Self {
            pos: Vec2::ZERO,
            radius: settings.radius,
            health: Health::full(settings.health),
            speed: settings.speed,
            reload_interval: settings.reload_interval,
            reload_timer: 0.0,
            bullet_speed: settings.bullet_speed,
            bullet_damage: settings.bullet_damage,
            bullet_radius: settings.bullet_radius,
            auto_fire,
            key_left: false,
            key_right: false,
            fire_held: false,
            left_pointer: None,
            right_pointer: None,
            last_heading: Heading::Right,
            destroyed: false,
        };
        ship.start_new_game(bounds);
        ship
    }

    pub fn id(&self) -> EntityId {
        EntityId::PLAYER
    }

    pub fn max_health(&self) -> i32 {
        self.health.max
    }

    /// Full health, centred on the bottom edge, no held input
    pub fn start_new_game(&mut self, bounds: &WorldBounds) {
        self.health = Health::full(self.health.max);
        self.destroyed = false;
        self.reload_timer = 0.0;
        self.release_all();
        self.pos = Vec2::new(bounds.center.x, self.rest_y(bounds));
    }

    /// Keep the ship on the bottom edge of a resized world
    pub fn resize(&mut self, bounds: &WorldBounds) {
        self.pos.y = self.rest_y(bounds);
        self.clamp_x(bounds);
    }

    fn rest_y(&self, bounds: &WorldBounds) -> f32 {
        bounds.bottom() + SHIP_MARGIN + self.radius
    }

    fn clamp_x(&mut self, bounds: &WorldBounds) {
        let min = bounds.left() + self.radius;
        let max = bounds.right() - self.radius;
        self.pos.x = if min > max {
            bounds.center.x
        } else {
            self.pos.x.clamp(min, max)
        };
    }

    fn release_all(&mut self) {
        self.key_left = false;
        self.key_right = false;
        self.fire_held = false;
        self.left_pointer = None;
        self.right_pointer = None;
    }

    pub fn key_down(&mut self, key: Key) {
        match key {
            Key::Left => {
                self.key_left = true;
                self.last_heading = Heading::Left;
            }
            Key::Right => {
                self.key_right = true;
                self.last_heading = Heading::Right;
            }
            Key::Fire => self.fire_held = true,
        }
    }

    pub fn key_up(&mut self, key: Key) {
        match key {
            Key::Left => self.key_left = false,
            Key::Right => self.key_right = false,
            Key::Fire => self.fire_held = false,
        }
    }

    /// A press on the left half of the world steers left, the right half
    /// steers right. The pointer id is remembered until its release.
    pub fn pointer_down(&mut self, pos: Vec2, pointer: u32, bounds: &WorldBounds) {
        if pos.x < bounds.center.x {
            self.left_pointer = Some(pointer);
            self.last_heading = Heading::Left;
        } else {
            self.right_pointer = Some(pointer);
            self.last_heading = Heading::Right;
        }
    }

    pub fn pointer_up(&mut self, pointer: u32) {
        if self.left_pointer == Some(pointer) {
            self.left_pointer = None;
        }
        if self.right_pointer == Some(pointer) {
            self.right_pointer = None;
        }
    }

    /// Current horizontal direction: -1, 0 or 1
    pub fn direction(&self) -> f32 {
        let left = self.key_left || self.left_pointer.is_some();
        let right = self.key_right || self.right_pointer.is_some();
        match (left, right) {
            (true, false) => -1.0,
            (false, true) => 1.0,
            (true, true) => match self.last_heading {
                Heading::Left => -1.0,
                Heading::Right => 1.0,
            },
            (false, false) => 0.0,
        }
    }

    /// Hostile bullet test: the lower half of the ship's box is vulnerable
    pub fn is_bullet_collision(&self, bullet: &Bullet) -> bool {
        !(bullet.right() < self.pos.x - self.radius
            || bullet.left() > self.pos.x + self.radius
            || bullet.bottom() > self.pos.y
            || bullet.top() < self.pos.y - self.radius)
    }

    fn shoot(&mut self, ctx: &mut FireContext<'_>) {
        let muzzle = self.pos + Vec2::new(0.0, self.radius);
        if !ctx.fire(
            EntityId::PLAYER,
            muzzle,
            Vec2::new(0.0, self.bullet_speed),
            self.bullet_radius,
            self.bullet_damage,
            GameEvent::PlayerShot,
        ) {
            log::debug!("player shot skipped, bullet pool full");
        }
    }
}

impl Sprite for PlayerShip {
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
        // Wings, hull, cockpit
        out.rect(self.pos - Vec2::new(0.0, r * 0.4), Vec2::new(r, r * 0.2), HULL_COLOR);
        out.rect(self.pos, Vec2::new(r * 0.3, r), HULL_COLOR);
        out.circle(self.pos + Vec2::new(0.0, r * 0.3), r * 0.2, COCKPIT_COLOR);

        let fill = self.health.fraction();
        if fill > 0.0 {
            let width = r * fill;
            out.rect(
                Vec2::new(self.pos.x - r + width, self.pos.y - r * 1.15),
                Vec2::new(width, r * 0.05),
                HEALTH_BAR_COLOR,
            );
        }
    }
}

impl<'a> UpdateMut<FireContext<'a>> for PlayerShip {
    fn update_mut(&mut self, dt: f32, ctx: &mut FireContext<'a>) {
        self.pos.x += self.direction() * self.speed * dt;
        self.clamp_x(&ctx.bounds);

        self.reload_timer += dt;
        if (self.auto_fire || self.fire_held) && self.reload_timer >= self.reload_interval {
            self.reload_timer = 0.0;
            self.shoot(ctx);
        }
    }
}

impl Damageable for PlayerShip {
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
