//! Enemy emitter
//!
//! Every `interval` seconds rolls one of the configured enemy kinds by
//! weight and spawns it just above the top edge at a random x.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::bounds::WorldBounds;
use super::enemy::Enemy;
use super::entity::EntityId;
use super::pool::Pool;
use crate::lerp_range;
use crate::settings::{EmitterSettings, EnemyKind};

#[derive(Debug, Clone)]
pub struct EnemyEmitter {
    interval: f32,
    kinds: Vec<EnemyKind>,
    timer: f32,
    rng: Pcg32,
    /// Next enemy id; never reused within a session
    next_id: u32,
}

impl EnemyEmitter {
    pub fn new(settings: &EmitterSettings, rng: Pcg32) -> Self {
        if settings.kinds.is_empty() {
            log::warn!("emitter has no enemy kinds, nothing will spawn");
        }
        Self {
            interval: settings.interval,
            kinds: settings.kinds.clone(),
            timer: 0.0,
            rng,
            next_id: EntityId::PLAYER.0 + 1,
        }
    }

    /// Restart the spawn countdown
    pub fn reset(&mut self) {
        self.timer = 0.0;
    }

    pub fn timer(&self) -> f32 {
        self.timer
    }

    /// Advance the countdown and spawn at most one enemy. Returns the id of
    /// the spawned enemy, if any.
    pub fn generate(
        &mut self,
        dt: f32,
        enemies: &mut Pool<Enemy>,
        bounds: &WorldBounds,
    ) -> Option<EntityId> {
        self.timer += dt;
        if self.timer < self.interval {
            return None;
        }
        self.timer = 0.0;

        let kind = self.roll_kind()?.clone();
        let Some(enemy) = enemies.obtain() else {
            log::debug!("enemy pool full, {} spawn skipped", kind.name);
            return None;
        };

        let id = EntityId(self.next_id);
        self.next_id += 1;
        let t: f32 = self.rng.random();
        let x = lerp_range(bounds.left() + kind.radius, bounds.right() - kind.radius, t);
        enemy.set(id, &kind, Vec2::new(x, bounds.top() + kind.radius));
        log::debug!("spawned {} enemy {:?} at x={x:.3}", kind.name, id);
        Some(id)
    }

    /// Weighted pick over the configured kinds
    fn roll_kind(&mut self) -> Option<&EnemyKind> {
        let total: f32 = self.kinds.iter().map(|k| k.weight.max(0.0)).sum();
        if total <= 0.0 {
            return None;
        }
        let mut roll = self.rng.random::<f32>() * total;
        for kind in &self.kinds {
            let w = kind.weight.max(0.0);
            if roll < w {
                return Some(kind);
            }
            roll -= w;
        }
        self.kinds.iter().rev().find(|k| k.weight > 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::entity::Sprite;
    use rand::SeedableRng;

    fn emitter(kinds: Vec<EnemyKind>) -> EnemyEmitter {
        let settings = EmitterSettings {
            interval: 1.0,
            kinds,
        };
        EnemyEmitter::new(&settings, Pcg32::seed_from_u64(11))
    }

    #[test]
    fn test_spawns_once_per_interval() {
        let bounds = WorldBounds::default();
        let mut pool = Pool::new();
        let mut e = emitter(EmitterSettings::default().kinds);

        assert!(e.generate(0.6, &mut pool, &bounds).is_none());
        let id = e.generate(0.6, &mut pool, &bounds).expect("spawn after interval");
        assert_eq!(pool.active_count(), 1);
        assert_ne!(id, EntityId::PLAYER);

        let enemy = &pool.active_objects()[0];
        assert!(enemy.pos().y > bounds.top());
        assert!(enemy.pos().x >= bounds.left() && enemy.pos().x <= bounds.right());
    }

    #[test]
    fn test_ids_are_unique() {
        let bounds = WorldBounds::default();
        let mut pool = Pool::new();
        let mut e = emitter(EmitterSettings::default().kinds);
        let a = e.generate(1.0, &mut pool, &bounds);
        let b = e.generate(1.0, &mut pool, &bounds);
        assert!(a.is_some() && b.is_some());
        assert_ne!(a, b);
    }

    #[test]
    fn test_full_pool_skips_spawn() {
        let bounds = WorldBounds::default();
        let mut pool = Pool::with_capacity(0);
        let mut e = emitter(EmitterSettings::default().kinds);
        assert!(e.generate(2.0, &mut pool, &bounds).is_none());
        assert_eq!(e.timer(), 0.0);
    }

    #[test]
    fn test_zero_weights_never_spawn() {
        let bounds = WorldBounds::default();
        let mut pool = Pool::new();
        let mut kind = EnemyKind::small();
        kind.weight = 0.0;
        let mut e = emitter(vec![kind]);
        assert!(e.generate(5.0, &mut pool, &bounds).is_none());
        assert!(pool.is_empty());
    }

    #[test]
    fn test_single_kind_always_rolls_it() {
        let bounds = WorldBounds::default();
        let mut pool = Pool::new();
        let mut e = emitter(vec![EnemyKind::big()]);
        for _ in 0..10 {
            e.generate(1.0, &mut pool, &bounds);
        }
        assert_eq!(pool.active_count(), 10);
        assert!(pool
            .active_objects()
            .iter()
            .all(|en| (en.radius() - EnemyKind::big().radius).abs() < 1e-6));
    }
}
