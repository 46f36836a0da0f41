//! Entity pools
//!
//! A pool keeps two lists: the active set (in play, iterated in spawn order)
//! and the free set (recycled objects waiting to be reused). Objects are
//! moved between the lists, never dropped, so a long session stops allocating
//! once the pools have warmed up.
//!
//! Invariants:
//! - An object lives in exactly one of the two lists.
//! - Only `free_destroyed` and `free_all` move objects out of the active set,
//!   so an object obtained during a tick stays active until the next reclaim.

use super::entity::{Poolable, Update, UpdateMut};
use crate::draw::DrawList;

#[derive(Debug, Clone)]
pub struct Pool<T: Poolable> {
    active: Vec<T>,
    free: Vec<T>,
    /// Maximum active objects; `None` grows on demand
    capacity: Option<usize>,
}

impl<T: Poolable> Default for Pool<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Poolable> Pool<T> {
    /// Unbounded pool
    pub fn new() -> Self {
        Self {
            active: Vec::new(),
            free: Vec::new(),
            capacity: None,
        }
    }

    /// Pool that refuses to lend more than `capacity` objects at once
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            active: Vec::with_capacity(capacity),
            free: Vec::with_capacity(capacity),
            capacity: Some(capacity),
        }
    }

    pub fn from_capacity(capacity: Option<usize>) -> Self {
        match capacity {
            Some(cap) => Self::with_capacity(cap),
            None => Self::new(),
        }
    }

    /// Lend an object, reusing a free one when possible.
    ///
    /// Returns `None` when the pool is at capacity; the caller skips the spawn.
    pub fn obtain(&mut self) -> Option<&mut T> {
        if let Some(cap) = self.capacity {
            if self.active.len() >= cap {
                log::debug!("pool at capacity ({cap}), spawn skipped");
                return None;
            }
        }
        let obj = self.free.pop().unwrap_or_default();
        self.active.push(obj);
        self.active.last_mut()
    }

    /// Live view of the active set, in spawn order
    pub fn active_objects(&self) -> &[T] {
        &self.active
    }

    pub fn active_objects_mut(&mut self) -> &mut [T] {
        &mut self.active
    }

    /// Advance every active object that is still alive
    pub fn update_active<C: ?Sized>(&mut self, dt: f32, ctx: &C)
    where
        T: Update<C>,
    {
        for obj in &mut self.active {
            if !obj.is_destroyed() {
                obj.update(dt, ctx);
            }
        }
    }

    /// Like `update_active`, for objects that write into shared state
    pub fn update_active_mut<C: ?Sized>(&mut self, dt: f32, ctx: &mut C)
    where
        T: UpdateMut<C>,
    {
        for obj in &mut self.active {
            if !obj.is_destroyed() {
                obj.update_mut(dt, ctx);
            }
        }
    }

    /// Draw every active object that is still alive
    pub fn draw_active(&self, out: &mut DrawList) {
        for obj in &self.active {
            if !obj.is_destroyed() {
                obj.draw(out);
            }
        }
    }

    /// Move destroyed objects to the free set, preserving the order of the
    /// survivors. Returns how many objects were reclaimed.
    pub fn free_destroyed(&mut self) -> usize {
        // Stable partition: survivors slide down to the front, the destroyed
        // collect in the tail
        let mut alive = 0;
        for i in 0..self.active.len() {
            if !self.active[i].is_destroyed() {
                self.active.swap(alive, i);
                alive += 1;
            }
        }

        let freed = self.active.len() - alive;
        for mut obj in self.active.drain(alive..) {
            obj.recycle();
            self.free.push(obj);
        }
        freed
    }

    /// Return every active object to the free set
    pub fn free_all(&mut self) {
        for mut obj in self.active.drain(..) {
            obj.recycle();
            self.free.push(obj);
        }
    }

    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    pub fn free_count(&self) -> usize {
        self.free.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    pub fn capacity(&self) -> Option<usize> {
        self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::entity::Sprite;
    use glam::Vec2;
    use proptest::prelude::*;

    #[derive(Debug, Default, Clone)]
    struct Dummy {
        tag: u32,
        destroyed: bool,
        updates: u32,
    }

    impl Sprite for Dummy {
        fn pos(&self) -> Vec2 {
            Vec2::ZERO
        }
        fn radius(&self) -> f32 {
            1.0
        }
        fn is_destroyed(&self) -> bool {
            self.destroyed
        }
        fn destroy(&mut self) {
            self.destroyed = true;
        }
        fn draw(&self, out: &mut DrawList) {
            out.circle(Vec2::ZERO, 1.0, [1.0; 4]);
        }
    }

    impl Update<()> for Dummy {
        fn update(&mut self, _dt: f32, _ctx: &()) {
            self.updates += 1;
        }
    }

    /// Records the tag of every object it advances
    impl UpdateMut<Vec<u32>> for Dummy {
        fn update_mut(&mut self, _dt: f32, seen: &mut Vec<u32>) {
            self.updates += 1;
            seen.push(self.tag);
        }
    }

    impl Poolable for Dummy {
        fn recycle(&mut self) {
            self.destroyed = false;
            self.updates = 0;
        }
    }

    fn spawn(pool: &mut Pool<Dummy>, tag: u32) {
        pool.obtain().expect("unbounded pool").tag = tag;
    }

    #[test]
    fn test_obtain_reuses_free_objects() {
        let mut pool = Pool::<Dummy>::new();
        spawn(&mut pool, 1);
        pool.active_objects_mut()[0].destroy();
        assert_eq!(pool.free_destroyed(), 1);
        assert_eq!(pool.free_count(), 1);

        spawn(&mut pool, 2);
        assert_eq!(pool.free_count(), 0);
        assert_eq!(pool.active_count(), 1);
        assert!(!pool.active_objects()[0].is_destroyed());
    }

    #[test]
    fn test_capacity_skips_spawn() {
        let mut pool = Pool::<Dummy>::with_capacity(2);
        assert!(pool.obtain().is_some());
        assert!(pool.obtain().is_some());
        assert!(pool.obtain().is_none());
        assert_eq!(pool.active_count(), 2);
    }

    #[test]
    fn test_update_and_draw_skip_destroyed() {
        let mut pool = Pool::<Dummy>::new();
        spawn(&mut pool, 1);
        spawn(&mut pool, 2);
        pool.active_objects_mut()[1].destroy();

        pool.update_active(0.1, &());
        assert_eq!(pool.active_objects()[0].updates, 1);
        assert_eq!(pool.active_objects()[1].updates, 0);

        let mut seen = Vec::new();
        pool.update_active_mut(0.1, &mut seen);
        assert_eq!(seen, vec![1]);

        let mut list = DrawList::new();
        pool.draw_active(&mut list);
        assert_eq!(list.commands().len(), 1);
    }

    #[test]
    fn test_free_all_empties_active_set() {
        let mut pool = Pool::<Dummy>::new();
        for tag in 0..5 {
            spawn(&mut pool, tag);
        }
        pool.free_all();
        assert!(pool.is_empty());
        assert_eq!(pool.free_count(), 5);
    }

    #[test]
    fn test_second_reclaim_is_noop() {
        let mut pool = Pool::<Dummy>::new();
        for tag in 0..4 {
            spawn(&mut pool, tag);
        }
        pool.active_objects_mut()[0].destroy();
        pool.active_objects_mut()[2].destroy();

        assert_eq!(pool.free_destroyed(), 2);
        let tags: Vec<u32> = pool.active_objects().iter().map(|d| d.tag).collect();
        assert_eq!(tags, vec![1, 3]);

        assert_eq!(pool.free_destroyed(), 0);
        let again: Vec<u32> = pool.active_objects().iter().map(|d| d.tag).collect();
        assert_eq!(again, tags);
        assert_eq!(pool.free_count(), 2);
    }

    #[test]
    fn test_reclaim_recycles_into_free_set() {
        let mut pool = Pool::<Dummy>::new();
        for tag in 0..6 {
            spawn(&mut pool, tag);
        }
        pool.update_active(0.1, &());
        for i in [0, 3, 5] {
            pool.active_objects_mut()[i].destroy();
        }

        assert_eq!(pool.free_destroyed(), 3);
        let tags: Vec<u32> = pool.active_objects().iter().map(|d| d.tag).collect();
        assert_eq!(tags, vec![1, 2, 4]);
        assert_eq!(pool.free_count(), 3);

        // Reused objects come back clean
        for _ in 0..3 {
            let obj = pool.obtain().expect("unbounded pool");
            assert!(!obj.is_destroyed());
            assert_eq!(obj.updates, 0);
        }
        assert_eq!(pool.free_count(), 0);
    }

    proptest! {
        #[test]
        fn prop_reclaim_keeps_survivors_in_order(flags in proptest::collection::vec(any::<bool>(), 0..64)) {
            let mut pool = Pool::<Dummy>::new();
            for (i, _) in flags.iter().enumerate() {
                spawn(&mut pool, i as u32);
            }
            for (obj, &dead) in pool.active_objects_mut().iter_mut().zip(&flags) {
                if dead {
                    obj.destroy();
                }
            }

            let expected: Vec<u32> = flags
                .iter()
                .enumerate()
                .filter(|(_, dead)| !**dead)
                .map(|(i, _)| i as u32)
                .collect();
            let dead_count = flags.iter().filter(|d| **d).count();

            prop_assert_eq!(pool.free_destroyed(), dead_count);
            let survivors: Vec<u32> = pool.active_objects().iter().map(|d| d.tag).collect();
            prop_assert_eq!(survivors, expected);
            prop_assert!(pool.active_objects().iter().all(|d| !d.is_destroyed()));
            prop_assert_eq!(pool.active_count() + pool.free_count(), flags.len());
            prop_assert_eq!(pool.free_destroyed(), 0);
        }
    }
}
