//! Gameplay simulation
//!
//! Everything that happens between two rendered frames lives here:
//! - Seeded RNG only (stars and emitter), so a seed replays the same game
//! - Entities live in pools and are iterated in spawn order
//! - No rendering or platform dependencies; drawing goes to a `DrawList`

pub mod background;
pub mod bounds;
pub mod bullet;
pub mod collision;
pub mod emitter;
pub mod enemy;
pub mod entity;
pub mod explosion;
pub mod input;
pub mod pool;
pub mod session;
pub mod ship;
pub mod state;
pub mod tick;

pub use bounds::WorldBounds;
pub use bullet::{Bullet, FireContext};
pub use collision::{CollisionOutcome, ExplosionRequest, resolve};
pub use emitter::EnemyEmitter;
pub use enemy::Enemy;
pub use entity::{Damageable, EntityId, Health, Poolable, Sprite, Update, UpdateMut};
pub use explosion::Explosion;
pub use input::{Key, PointerButton};
pub use pool::Pool;
pub use session::Session;
pub use ship::PlayerShip;
pub use state::{GameEvent, SessionState};
pub use tick::tick;
