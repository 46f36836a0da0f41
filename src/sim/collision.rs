//! Collision resolution
//!
//! One side-effecting pass per tick over the active entities. Damage and
//! destruction are applied in place, so later checks in the same pass see
//! earlier results: a destroyed enemy is not matched again and a bullet is
//! spent on its first hit.
//!
//! Enemy and ship overlap is a circle test. Bullets use the box test of the
//! entity they hit (upper half of an enemy, lower half of the ship).

use glam::Vec2;

use super::bullet::Bullet;
use super::enemy::Enemy;
use super::entity::{Damageable, EntityId, Sprite};
use super::ship::PlayerShip;
use super::state::SessionState;
use crate::circles_overlap;

/// Where to play an explosion and how big
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExplosionRequest {
    pub pos: Vec2,
    pub radius: f32,
}

/// Side effects the pipeline must apply after the pass
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CollisionOutcome {
    /// Enemies and the ship destroyed by damage in this pass
    pub explosions: Vec<ExplosionRequest>,
    /// Enemies killed by player bullets
    pub frags: u32,
    /// The pass moved the session to GAME_OVER
    pub game_over: bool,
}

impl CollisionOutcome {
    fn explode(&mut self, sprite: &impl Sprite) {
        self.explosions.push(ExplosionRequest {
            pos: sprite.pos(),
            radius: sprite.radius(),
        });
    }

    fn end_game(&mut self, state: &mut SessionState) {
        if state.end_game() {
            self.game_over = true;
        }
    }
}

/// Resolve all collisions for this tick. No-op while GAME_OVER.
pub fn resolve(
    state: &mut SessionState,
    ship: &mut PlayerShip,
    enemies: &mut [Enemy],
    bullets: &mut [Bullet],
) -> CollisionOutcome {
    let mut outcome = CollisionOutcome::default();
    if state.is_game_over() {
        return outcome;
    }

    for enemy in enemies.iter_mut() {
        if enemy.is_destroyed() {
            continue;
        }

        // Ship contact
        if !ship.is_destroyed()
            && circles_overlap(ship.pos(), ship.radius(), enemy.pos(), enemy.radius())
        {
            enemy.destroy();
            outcome.explode(&*enemy);
            ship.damage(enemy.contact_damage());
            if ship.is_destroyed() {
                outcome.explode(&*ship);
                outcome.end_game(state);
            }
            continue;
        }

        // Player bullets
        for bullet in bullets.iter_mut() {
            if bullet.is_destroyed() || bullet.owner() != EntityId::PLAYER {
                continue;
            }
            if !enemy.is_bullet_collision(bullet) {
                continue;
            }
            enemy.damage(bullet.damage());
            bullet.destroy();
            if enemy.is_destroyed() {
                outcome.frags += 1;
                outcome.explode(&*enemy);
                break;
            }
        }
    }

    // Hostile bullets against the ship
    for bullet in bullets.iter_mut() {
        if ship.is_destroyed() {
            break;
        }
        if bullet.is_destroyed() || bullet.owner() == EntityId::PLAYER {
            continue;
        }
        if ship.is_bullet_collision(bullet) {
            ship.damage(bullet.damage());
            bullet.destroy();
            if ship.is_destroyed() {
                outcome.explode(&*ship);
                outcome.end_game(state);
            }
        }
    }

    // Catch any path that destroyed the ship without flipping the state
    if ship.is_destroyed() {
        outcome.end_game(state);
    }

    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::{EnemyKind, ShipSettings};
    use crate::sim::bounds::WorldBounds;
    use proptest::prelude::*;

    fn ship_with(health: i32, radius: f32) -> PlayerShip {
        let settings = ShipSettings {
            health,
            radius,
            ..ShipSettings::default()
        };
        PlayerShip::new(&settings, false, &WorldBounds::from_aspect(1.0))
    }

    fn enemy_at(id: u32, pos: Vec2, health: i32, contact_damage: i32, radius: f32) -> Enemy {
        let kind = EnemyKind {
            health,
            contact_damage,
            radius,
            ..EnemyKind::small()
        };
        let mut e = Enemy::default();
        e.set(EntityId(id), &kind, pos);
        e
    }

    fn bullet(owner: EntityId, pos: Vec2, damage: i32) -> Bullet {
        let mut b = Bullet::default();
        b.set(owner, pos, Vec2::ZERO, 0.01, damage);
        b
    }

    #[test]
    fn test_contact_kills_enemy_and_ship() {
        let mut state = SessionState::Playing;
        let mut ship = ship_with(20, 5.0);
        let mut enemies = vec![enemy_at(2, ship.pos(), 20, 20, 5.0)];

        let outcome = resolve(&mut state, &mut ship, &mut enemies, &mut []);

        assert!(enemies[0].is_destroyed());
        assert_eq!(ship.health(), 0);
        assert!(ship.is_destroyed());
        assert_eq!(state, SessionState::GameOver);
        assert!(outcome.game_over);
        assert_eq!(outcome.explosions.len(), 2);
        assert_eq!(outcome.frags, 0);
    }

    #[test]
    fn test_bullet_kill_keeps_playing() {
        let mut state = SessionState::Playing;
        let mut ship = ship_with(100, 0.075);
        let target = Vec2::new(0.0, 0.3);
        let mut enemies = vec![enemy_at(2, target, 15, 1, 0.05)];
        let mut bullets = vec![bullet(EntityId::PLAYER, target, 15)];

        let outcome = resolve(&mut state, &mut ship, &mut enemies, &mut bullets);

        assert!(enemies[0].is_destroyed());
        assert!(bullets[0].is_destroyed());
        assert_eq!(state, SessionState::Playing);
        assert_eq!(outcome.frags, 1);
        assert_eq!(outcome.explosions, vec![ExplosionRequest { pos: target, radius: 0.05 }]);
    }

    #[test]
    fn test_damage_accumulates_and_stops_at_death() {
        let mut state = SessionState::Playing;
        let mut ship = ship_with(100, 0.075);
        let target = Vec2::new(0.0, 0.3);
        let mut enemies = vec![enemy_at(2, target, 2, 1, 0.05)];
        let mut bullets = vec![
            bullet(EntityId::PLAYER, target, 1),
            bullet(EntityId::PLAYER, target, 1),
            bullet(EntityId::PLAYER, target, 1),
        ];

        resolve(&mut state, &mut ship, &mut enemies, &mut bullets);

        assert!(enemies[0].is_destroyed());
        assert!(bullets[0].is_destroyed());
        assert!(bullets[1].is_destroyed());
        assert!(!bullets[2].is_destroyed());
    }

    #[test]
    fn test_spent_bullet_hits_only_first_enemy() {
        let mut state = SessionState::Playing;
        let mut ship = ship_with(100, 0.075);
        let target = Vec2::new(0.0, 0.3);
        let mut enemies = vec![enemy_at(2, target, 5, 1, 0.05), enemy_at(3, target, 5, 1, 0.05)];
        let mut bullets = vec![bullet(EntityId::PLAYER, target, 1)];

        resolve(&mut state, &mut ship, &mut enemies, &mut bullets);

        assert_eq!(enemies[0].health(), 4);
        assert_eq!(enemies[1].health(), 5);
    }

    #[test]
    fn test_friendly_fire_is_ignored() {
        let mut state = SessionState::Playing;
        let mut ship = ship_with(100, 0.075);
        let target = Vec2::new(0.0, 0.3);
        let mut enemies = vec![enemy_at(2, target, 5, 1, 0.05)];
        let mut bullets = vec![
            // Enemy bullet inside another enemy
            bullet(EntityId(2), target, 3),
            // Player bullet inside the ship's vulnerable half
            bullet(EntityId::PLAYER, ship.pos() - Vec2::new(0.0, 0.03), 3),
        ];

        resolve(&mut state, &mut ship, &mut enemies, &mut bullets);

        assert_eq!(enemies[0].health(), 5);
        assert_eq!(ship.health(), 100);
        assert!(bullets.iter().all(|b| !b.is_destroyed()));
    }

    #[test]
    fn test_hostile_bullet_can_end_game() {
        let mut state = SessionState::Playing;
        let mut ship = ship_with(3, 0.075);
        let hit = ship.pos() - Vec2::new(0.0, 0.03);
        let mut bullets = vec![bullet(EntityId(4), hit, 3), bullet(EntityId(4), hit, 3)];

        let outcome = resolve(&mut state, &mut ship, &mut [], &mut bullets);

        assert!(ship.is_destroyed());
        assert_eq!(state, SessionState::GameOver);
        assert!(outcome.game_over);
        assert!(bullets[0].is_destroyed());
        // The ship was already gone
        assert!(!bullets[1].is_destroyed());
        assert_eq!(outcome.explosions.len(), 1);
    }

    #[test]
    fn test_contact_and_bullet_in_same_pass() {
        let mut state = SessionState::Playing;
        let mut ship = ship_with(10, 0.075);
        let mut enemies = vec![enemy_at(2, ship.pos(), 5, 6, 0.05)];
        let mut bullets = vec![bullet(EntityId(2), ship.pos() - Vec2::new(0.0, 0.03), 6)];

        let outcome = resolve(&mut state, &mut ship, &mut enemies, &mut bullets);

        assert!(ship.is_destroyed());
        assert_eq!(state, SessionState::GameOver);
        assert!(outcome.game_over);
    }

    #[test]
    fn test_final_guard_catches_dead_ship() {
        let mut state = SessionState::Playing;
        let mut ship = ship_with(10, 0.075);
        ship.damage(10);

        let outcome = resolve(&mut state, &mut ship, &mut [], &mut []);

        assert_eq!(state, SessionState::GameOver);
        assert!(outcome.game_over);
        assert!(outcome.explosions.is_empty());
    }

    #[test]
    fn test_game_over_pass_is_noop() {
        let mut state = SessionState::GameOver;
        let mut ship = ship_with(20, 5.0);
        let mut enemies = vec![enemy_at(2, ship.pos(), 20, 20, 5.0)];
        let mut bullets = vec![bullet(EntityId(2), ship.pos(), 5)];

        let outcome = resolve(&mut state, &mut ship, &mut enemies, &mut bullets);

        assert_eq!(outcome, CollisionOutcome::default());
        assert!(!enemies[0].is_destroyed());
        assert!(!bullets[0].is_destroyed());
        assert_eq!(ship.health(), 20);
    }

    fn arb_pos() -> impl Strategy<Value = Vec2> {
        (-0.5f32..0.5, -0.5f32..0.5).prop_map(|(x, y)| Vec2::new(x, y))
    }

    proptest! {
        #[test]
        fn prop_dead_ship_means_game_over(
            ship_hp in 1i32..30,
            enemy_specs in proptest::collection::vec((arb_pos(), 1i32..10, 0i32..15), 0..8),
            bullet_specs in proptest::collection::vec((arb_pos(), any::<bool>(), 1i32..10), 0..24),
        ) {
            let mut state = SessionState::Playing;
            let mut ship = ship_with(ship_hp, 0.075);
            let mut enemies: Vec<Enemy> = enemy_specs
                .iter()
                .enumerate()
                .map(|(i, &(pos, hp, dmg))| enemy_at(i as u32 + 2, pos, hp, dmg, 0.05))
                .collect();
            let mut bullets: Vec<Bullet> = bullet_specs
                .iter()
                .map(|&(pos, mine, dmg)| {
                    let owner = if mine { EntityId::PLAYER } else { EntityId(2) };
                    bullet(owner, pos, dmg)
                })
                .collect();

            let outcome = resolve(&mut state, &mut ship, &mut enemies, &mut bullets);

            prop_assert_eq!(ship.is_destroyed(), state.is_game_over());
            prop_assert_eq!(outcome.game_over, state.is_game_over());
            prop_assert!(outcome.frags as usize <= enemies.len());
            prop_assert!(ship.health() >= 0);

            // A second pass over the same world changes nothing once over
            if state.is_game_over() {
                let before: Vec<i32> = enemies.iter().map(|e| e.health()).collect();
                let again = resolve(&mut state, &mut ship, &mut enemies, &mut bullets);
                prop_assert_eq!(again, CollisionOutcome::default());
                let after: Vec<i32> = enemies.iter().map(|e| e.health()).collect();
                prop_assert_eq!(before, after);
            }
        }

        #[test]
        fn prop_player_bullets_never_hurt_ship(
            bullet_specs in proptest::collection::vec((arb_pos(), 1i32..50), 0..24),
        ) {
            let mut state = SessionState::Playing;
            let mut ship = ship_with(10, 0.075);
            let mut bullets: Vec<Bullet> = bullet_specs
                .iter()
                .map(|&(pos, dmg)| bullet(EntityId::PLAYER, pos, dmg))
                .collect();

            resolve(&mut state, &mut ship, &mut [], &mut bullets);

            prop_assert_eq!(ship.health(), 10);
            prop_assert!(state.is_playing());
            prop_assert!(bullets.iter().all(|b| !b.is_destroyed()));
        }
    }
}
