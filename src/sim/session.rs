//! Game session
//!
//! Owns every piece of gameplay state for one screen: world bounds, the
//! PLAYING/GAME_OVER state, the ship, the entity pools, the emitter and the
//! end-screen widgets. Hosts create one with [`Session::show`], feed input
//! between frames and call [`Session::tick`] once per rendered frame.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::background::Decoration;
use super::bounds::WorldBounds;
use super::bullet::Bullet;
use super::emitter::EnemyEmitter;
use super::enemy::Enemy;
use super::entity::{Damageable, Sprite};
use super::explosion::Explosion;
use super::input::{Key, PointerButton};
use super::pool::Pool;
use super::ship::PlayerShip;
use super::state::{GameEvent, SessionState};
use super::tick;
use crate::consts::LEVEL;
use crate::draw::DrawList;
use crate::settings::Settings;
use crate::ui::{GameOverMessage, HudStats, NewGameButton};

pub struct Session {
    pub(super) settings: Settings,
    pub(super) seed: u64,
    pub(super) bounds: WorldBounds,
    pub(super) state: SessionState,
    pub(super) decoration: Decoration,
    pub(super) ship: PlayerShip,
    pub(super) bullets: Pool<Bullet>,
    pub(super) enemies: Pool<Enemy>,
    pub(super) explosions: Pool<Explosion>,
    pub(super) emitter: EnemyEmitter,
    pub(super) new_game_button: NewGameButton,
    pub(super) game_over_message: GameOverMessage,
    /// Enemies destroyed by player bullets this game
    pub(super) frags: u32,
    pub(super) events: Vec<GameEvent>,
    /// Frames ticked since the session was shown
    pub(super) frame_count: u64,
}

impl Session {
    /// Build the screen and start playing
    pub fn show(settings: Settings, seed: u64) -> Self {
        let bounds = WorldBounds::default();
        let decoration = Decoration::new(settings.star_count(), bounds, Pcg32::seed_from_u64(seed));
        let emitter = EnemyEmitter::new(
            &settings.emitter,
            Pcg32::seed_from_u64(seed.wrapping_add(1)),
        );
        let ship = PlayerShip::new(&settings.ship, settings.auto_fire, &bounds);

        log::info!(
            "Session started (seed {seed}, quality {})",
            settings.quality.as_str()
        );

        Self {
            bullets: Pool::from_capacity(settings.pools.bullets),
            enemies: Pool::from_capacity(settings.pools.enemies),
            explosions: Pool::from_capacity(settings.pools.explosions),
            new_game_button: NewGameButton::new(&bounds),
            game_over_message: GameOverMessage::new(&bounds),
            state: SessionState::Playing,
            frags: 0,
            events: Vec::new(),
            frame_count: 0,
            settings,
            seed,
            bounds,
            decoration,
            ship,
            emitter,
        }
    }

    /// Advance one frame and fill `frame` with its draw commands
    pub fn tick(&mut self, dt: f32, frame: &mut DrawList) {
        tick::tick(self, dt, frame);
    }

    /// Adopt a new world rectangle (viewport resize)
    pub fn resize(&mut self, bounds: WorldBounds) {
        self.bounds = bounds;
        self.decoration.resize(bounds);
        self.ship.resize(&bounds);
        self.new_game_button.resize(&bounds);
        self.game_over_message.resize(&bounds);
    }

    /// Reset ship, pools, emitter and frags, then resume PLAYING
    pub fn start_new_game(&mut self) {
        self.ship.start_new_game(&self.bounds);
        self.bullets.free_all();
        self.enemies.free_all();
        self.explosions.free_all();
        self.emitter.reset();
        self.new_game_button.reset();
        self.frags = 0;
        self.state.restart();
        self.events.push(GameEvent::NewGame);
        log::info!("New game");
    }

    pub fn key_down(&mut self, key: Key) {
        if self.state.is_playing() {
            self.ship.key_down(key);
        }
    }

    pub fn key_up(&mut self, key: Key) {
        if self.state.is_playing() {
            self.ship.key_up(key);
        }
    }

    /// Pointer press in world coordinates
    pub fn pointer_down(&mut self, pos: Vec2, pointer: u32, button: PointerButton) {
        match self.state {
            SessionState::Playing => self.ship.pointer_down(pos, pointer, &self.bounds),
            SessionState::GameOver => {
                self.new_game_button.pointer_down(pos, pointer, button);
            }
        }
    }

    /// Pointer release in world coordinates
    pub fn pointer_up(&mut self, pos: Vec2, pointer: u32, button: PointerButton) {
        match self.state {
            SessionState::Playing => self.ship.pointer_up(pointer),
            SessionState::GameOver => {
                if self.new_game_button.pointer_up(pos, pointer, button) {
                    self.start_new_game();
                }
            }
        }
    }

    /// Take the events queued since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn bounds(&self) -> &WorldBounds {
        &self.bounds
    }

    pub fn ship(&self) -> &PlayerShip {
        &self.ship
    }

    pub fn bullets(&self) -> &Pool<Bullet> {
        &self.bullets
    }

    pub fn enemies(&self) -> &Pool<Enemy> {
        &self.enemies
    }

    pub fn explosions(&self) -> &Pool<Explosion> {
        &self.explosions
    }

    pub fn frags(&self) -> u32 {
        self.frags
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    pub fn hud_stats(&self) -> HudStats {
        HudStats {
            frags: self.frags,
            hp: self.ship.health(),
            level: LEVEL,
        }
    }

    /// Whether the ship is alive (false only inside GAME_OVER)
    pub fn ship_alive(&self) -> bool {
        !self.ship.is_destroyed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> Session {
        Session::show(Settings::default(), 9)
    }

    #[test]
    fn test_show_starts_playing_with_empty_pools() {
        let s = session();
        assert_eq!(s.state(), SessionState::Playing);
        assert!(s.bullets().is_empty());
        assert!(s.enemies().is_empty());
        assert!(s.explosions().is_empty());
        assert_eq!(s.hud_stats().hp, s.ship().max_health());
        assert_eq!(s.hud_stats().level, 1);
    }

    #[test]
    fn test_keys_ignored_after_game_over() {
        let mut s = session();
        s.state = SessionState::GameOver;
        s.key_down(Key::Left);
        assert_eq!(s.ship.direction(), 0.0);
    }

    #[test]
    fn test_button_press_restarts_game() {
        let mut s = session();
        s.ship.damage(10_000);
        s.state = SessionState::GameOver;
        s.frags = 4;

        let at = s.bounds.center + Vec2::new(0.0, -0.1);
        s.pointer_down(at, 7, PointerButton::Primary);
        assert_eq!(s.state(), SessionState::GameOver);
        s.pointer_up(at, 7, PointerButton::Primary);

        assert_eq!(s.state(), SessionState::Playing);
        assert!(s.ship_alive());
        assert_eq!(s.frags(), 0);
        assert_eq!(s.drain_events(), vec![GameEvent::NewGame]);
        assert!(s.drain_events().is_empty());
    }

    #[test]
    fn test_pointer_steers_ship_while_playing() {
        let mut s = session();
        let left = Vec2::new(s.bounds.left() + 0.01, 0.0);
        s.pointer_down(left, 1, PointerButton::Primary);
        assert_eq!(s.ship.direction(), -1.0);
        s.pointer_up(left, 1, PointerButton::Primary);
        assert_eq!(s.ship.direction(), 0.0);
    }

    #[test]
    fn test_resize_moves_ship_to_new_bottom() {
        let mut s = session();
        let wide = WorldBounds::from_aspect(2.0);
        s.resize(wide);
        assert_eq!(s.bounds(), &wide);
        assert!(s.ship().pos().y < wide.center.y);
        assert!(s.ship().pos().x >= wide.left() && s.ship().pos().x <= wide.right());
    }
}
