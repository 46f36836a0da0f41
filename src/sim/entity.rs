//! Entity capabilities
//!
//! Ships, enemies, bullets and explosions share one flat capability set
//! instead of a type hierarchy. Owner and damage fields are plain data on the
//! concrete types.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::draw::DrawList;

/// Stable identity of a live entity (never an ownership handle)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct EntityId(pub u32);

impl EntityId {
    /// The player ship keeps this id for the whole run
    pub const PLAYER: EntityId = EntityId(1);
    /// Placeholder for pooled objects that have not been spawned yet
    pub const NONE: EntityId = EntityId(0);
}

/// Everything the pipeline and resolver need from an entity
pub trait Sprite {
    fn pos(&self) -> Vec2;
    /// Bounding circle radius
    fn radius(&self) -> f32;
    fn is_destroyed(&self) -> bool;
    fn destroy(&mut self);
    fn draw(&self, out: &mut DrawList);
}

/// Per-frame advance against read-only context
pub trait Update<C: ?Sized> {
    fn update(&mut self, dt: f32, ctx: &C);
}

/// Per-frame advance for entities that spawn into shared state (shooters)
pub trait UpdateMut<C: ?Sized> {
    fn update_mut(&mut self, dt: f32, ctx: &mut C);
}

/// Entities with health
pub trait Damageable: Sprite {
    fn health(&self) -> i32;

    /// Subtract `amount`; reaching zero destroys the entity. Destroyed
    /// entities ignore further damage.
    fn damage(&mut self, amount: i32);
}

/// Objects a `Pool` can recycle
pub trait Poolable: Sprite + Default {
    /// Clear per-life state before the object is parked in the free list
    fn recycle(&mut self);
}

/// Shared health bookkeeping for ships and enemies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Health {
    pub current: i32,
    pub max: i32,
}

impl Health {
    pub fn full(max: i32) -> Self {
        Self { current: max, max }
    }

    /// Apply damage, returning true when this hit emptied the bar
    pub fn take(&mut self, amount: i32) -> bool {
        if self.current <= 0 {
            return false;
        }
        self.current = (self.current - amount.max(0)).max(0);
        self.current == 0
    }

    pub fn is_empty(&self) -> bool {
        self.current <= 0
    }

    /// Fill fraction for health bars
    pub fn fraction(&self) -> f32 {
        if self.max <= 0 {
            0.0
        } else {
            self.current as f32 / self.max as f32
        }
    }
}
