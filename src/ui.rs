//! End-screen widgets and HUD
//!
//! Widgets draw into the frame's `DrawList` like any sprite. Text is emitted
//! as `Shape::Text`; the web host renders it into its DOM overlay.

use glam::Vec2;

use crate::draw::{Align, DrawList};
use crate::sim::WorldBounds;
use crate::sim::input::PointerButton;

const FONT_SIZE: f32 = 0.02;
const MARGIN: f32 = 0.01;
const TEXT_COLOR: [f32; 4] = [1.0, 1.0, 1.0, 1.0];

/// Clickable "new game" button shown on the end screen.
///
/// A press must start and end on the button with the same pointer to count.
#[derive(Debug, Clone)]
pub struct NewGameButton {
    center: Vec2,
    half_size: Vec2,
    pressed_by: Option<u32>,
}

impl NewGameButton {
    const OFFSET_Y: f32 = -0.1;
    const HALF_SIZE: Vec2 = Vec2::new(0.16, 0.045);
    const PRESSED_SCALE: f32 = 0.9;

    pub fn new(bounds: &WorldBounds) -> Self {
        let mut button = Self {
            center: Vec2::ZERO,
            half_size: Self::HALF_SIZE,
            pressed_by: None,
        };
        button.resize(bounds);
        button
    }

    pub fn resize(&mut self, bounds: &WorldBounds) {
        self.center = bounds.center + Vec2::new(0.0, Self::OFFSET_Y);
    }

    pub fn contains(&self, pos: Vec2) -> bool {
        let d = (pos - self.center).abs();
        d.x <= self.half_size.x && d.y <= self.half_size.y
    }

    pub fn is_pressed(&self) -> bool {
        self.pressed_by.is_some()
    }

    /// Start a press. Returns whether the button captured the pointer; a press
    /// never activates the button by itself.
    pub fn pointer_down(&mut self, pos: Vec2, pointer: u32, button: PointerButton) -> bool {
        if self.pressed_by.is_some() || button != PointerButton::Primary || !self.contains(pos) {
            return false;
        }
        self.pressed_by = Some(pointer);
        true
    }

    /// Finish a press. Returns true when the button was activated.
    pub fn pointer_up(&mut self, pos: Vec2, pointer: u32, _button: PointerButton) -> bool {
        if self.pressed_by != Some(pointer) {
            return false;
        }
        self.pressed_by = None;
        self.contains(pos)
    }

    /// Forget any press in progress
    pub fn reset(&mut self) {
        self.pressed_by = None;
    }

    pub fn draw(&self, out: &mut DrawList) {
        let scale = if self.is_pressed() { Self::PRESSED_SCALE } else { 1.0 };
        out.rect(self.center, self.half_size * scale, [0.2, 0.75, 0.35, 1.0]);
        out.text(
            self.center,
            FONT_SIZE * 1.5 * scale,
            Align::Center,
            "NEW GAME",
            TEXT_COLOR,
        );
    }
}

/// "GAME OVER" banner
#[derive(Debug, Clone)]
pub struct GameOverMessage {
    center: Vec2,
}

impl GameOverMessage {
    pub fn new(bounds: &WorldBounds) -> Self {
        Self {
            center: bounds.center + Vec2::new(0.0, 0.1),
        }
    }

    pub fn resize(&mut self, bounds: &WorldBounds) {
        self.center = bounds.center + Vec2::new(0.0, 0.1);
    }

    pub fn draw(&self, out: &mut DrawList) {
        out.text(self.center, FONT_SIZE * 4.0, Align::Center, "GAME OVER", [1.0, 0.3, 0.3, 1.0]);
    }
}

/// Values shown by the HUD
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HudStats {
    pub frags: u32,
    pub hp: i32,
    pub level: u32,
}

/// In-game text along the top edge: frags left, HP centre, level right
pub fn draw_hud(out: &mut DrawList, bounds: &WorldBounds, stats: HudStats) {
    let y = bounds.top() - MARGIN - FONT_SIZE;
    out.text(
        Vec2::new(bounds.left() + MARGIN, y),
        FONT_SIZE,
        Align::Left,
        format!("Frags: {}", stats.frags),
        TEXT_COLOR,
    );
    out.text(
        Vec2::new(bounds.center.x, y),
        FONT_SIZE,
        Align::Center,
        format!("HP: {}", stats.hp),
        TEXT_COLOR,
    );
    out.text(
        Vec2::new(bounds.right() - MARGIN, y),
        FONT_SIZE,
        Align::Right,
        format!("Level: {}", stats.level),
        TEXT_COLOR,
    );
}
