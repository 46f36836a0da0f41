//! Frame pipeline
//!
//! One call per rendered frame, always in this order:
//! 1. decoration update
//! 2. explosion update (visual only, runs in both states)
//! 3. gameplay update: bullets, enemies, ship, emitter (PLAYING only)
//! 4. collision resolution, spawning the explosions it requests
//! 5. reclaim destroyed pool entries
//! 6. draw: backdrop, stars, gameplay + HUD or end screen, effects on top
//!
//! The pipeline holds no entity state of its own.

use super::bullet::FireContext;
use super::collision::{self, CollisionOutcome};
use super::entity::{Sprite, UpdateMut};
use super::session::Session;
use super::state::{GameEvent, SessionState};
use crate::draw::{DrawList, Layer};
use crate::ui::draw_hud;

/// Advance the session by `dt` seconds and rebuild `frame`
pub fn tick(session: &mut Session, dt: f32, frame: &mut DrawList) {
    assert!(
        dt.is_finite() && dt >= 0.0,
        "frame delta must be finite and non-negative, got {dt}"
    );

    update(session, dt);
    collide(session);
    reclaim(session);
    draw(session, frame);

    session.frame_count += 1;
}

fn update(s: &mut Session, dt: f32) {
    s.decoration.update(dt, &s.bounds);
    s.explosions.update_active(dt, &());

    if s.state.is_playing() {
        s.bullets.update_active(dt, &s.bounds);

        let mut ctx = FireContext {
            bounds: s.bounds,
            bullets: &mut s.bullets,
            events: &mut s.events,
        };
        s.enemies.update_active_mut(dt, &mut ctx);
        s.ship.update_mut(dt, &mut ctx);

        s.emitter.generate(dt, &mut s.enemies, &s.bounds);
    }
}

fn collide(s: &mut Session) {
    let CollisionOutcome {
        explosions,
        frags,
        game_over,
    } = collision::resolve(
        &mut s.state,
        &mut s.ship,
        s.enemies.active_objects_mut(),
        s.bullets.active_objects_mut(),
    );

    s.frags += frags;

    for request in explosions {
        match s.explosions.obtain() {
            Some(explosion) => {
                explosion.set(request.pos, request.radius);
                s.events.push(GameEvent::Explosion);
            }
            None => log::debug!("explosion pool full, effect skipped"),
        }
    }

    if game_over {
        log::info!(
            "Game over after {} frames, frags: {}",
            s.frame_count,
            s.frags
        );
        s.events.push(GameEvent::GameOver);
    }
}

fn reclaim(s: &mut Session) {
    s.bullets.free_destroyed();
    s.enemies.free_destroyed();
    s.explosions.free_destroyed();
}

fn draw(s: &Session, frame: &mut DrawList) {
    frame.clear();

    frame.begin_layer(Layer::Background);
    s.decoration.draw_backdrop(frame);

    frame.begin_layer(Layer::Decoration);
    s.decoration.draw_stars(frame);

    match s.state {
        SessionState::Playing => {
            frame.begin_layer(Layer::Gameplay);
            s.bullets.draw_active(frame);
            s.enemies.draw_active(frame);
            if !s.ship.is_destroyed() {
                s.ship.draw(frame);
            }

            frame.begin_layer(Layer::Hud);
            draw_hud(frame, &s.bounds, s.hud_stats());
        }
        SessionState::GameOver => {
            frame.begin_layer(Layer::EndScreen);
            s.game_over_message.draw(frame);
            s.new_game_button.draw(frame);
        }
    }

    frame.begin_layer(Layer::Effects);
    s.explosions.draw_active(frame);
}
