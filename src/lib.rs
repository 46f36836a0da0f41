//! Star Shooter - A vertical-scrolling arcade shooter
//!
//! Core modules:
//! - `sim`: Frame pipeline, collision resolution and session state machine
//! - `draw`: Layered draw list produced by the pipeline each frame
//! - `renderer`: WebGPU rendering of the draw list
//! - `ui`: End-screen widgets and HUD text
//! - `settings`: Data-driven game tuning

#[cfg(target_arch = "wasm32")]
pub mod audio;
pub mod draw;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod ui;

pub use settings::{QualityPreset, Settings};
pub use sim::{Session, SessionState};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Nominal frame delta used by headless runs (60 Hz)
    pub const FRAME_DT: f32 = 1.0 / 60.0;
    /// Largest delta a host may feed into one tick (tab switches, hitches)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// World height in world units; width follows the viewport aspect
    pub const WORLD_HEIGHT: f32 = 1.0;

    /// Player ship defaults
    pub const SHIP_RADIUS: f32 = 0.075;
    pub const SHIP_MARGIN: f32 = 0.05;
    pub const SHIP_HEALTH: i32 = 100;
    pub const SHIP_SPEED: f32 = 0.5;
    pub const SHIP_RELOAD_INTERVAL: f32 = 0.25;

    /// Player bullet defaults
    pub const PLAYER_BULLET_SPEED: f32 = 0.5;
    pub const PLAYER_BULLET_DAMAGE: i32 = 1;
    pub const PLAYER_BULLET_RADIUS: f32 = 0.01;

    /// Speed enemies use to slide into view before they start shooting
    pub const ENEMY_DESCENT_SPEED: f32 = 0.3;

    /// Seconds between enemy spawns
    pub const EMITTER_INTERVAL: f32 = 4.0;

    /// Explosion animation
    pub const EXPLOSION_FRAMES: u32 = 9;
    pub const EXPLOSION_FRAME_INTERVAL: f32 = 1.0 / 60.0;

    /// Difficulty is not progressive; the HUD always shows this level
    pub const LEVEL: u32 = 1;
}

/// Euclidean distance test used by every circle-vs-circle check
#[inline]
pub fn circles_overlap(a: Vec2, ra: f32, b: Vec2, rb: f32) -> bool {
    a.distance(b) < ra + rb
}

/// Map `t` in `[0, 1)` onto `[min, max)`, tolerating an empty range
#[inline]
pub fn lerp_range(min: f32, max: f32, t: f32) -> f32 {
    if max <= min { min } else { min + (max - min) * t }
}
