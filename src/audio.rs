//! Sound effects via the Web Audio API
//!
//! Every sound is synthesized from oscillators at play time; there are no
//! sample files. The host maps drained `GameEvent`s to effects.

use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

use crate::settings::Settings;
use crate::sim::GameEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Player cannon
    Shot,
    /// Enemy cannon, lower and softer
    EnemyShot,
    Explosion,
    GameOver,
    NewGame,
}

impl From<GameEvent> for SoundEffect {
    fn from(event: GameEvent) -> Self {
        match event {
            GameEvent::PlayerShot => SoundEffect::Shot,
            GameEvent::EnemyShot => SoundEffect::EnemyShot,
            GameEvent::Explosion => SoundEffect::Explosion,
            GameEvent::GameOver => SoundEffect::GameOver,
            GameEvent::NewGame => SoundEffect::NewGame,
        }
    }
}

pub struct AudioManager {
    ctx: Option<AudioContext>,
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
}

impl AudioManager {
    pub fn new(settings: &Settings) -> Self {
        // Fails outside a secure context
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("Failed to create AudioContext - audio disabled");
        }
        Self {
            ctx,
            master_volume: settings.master_volume.clamp(0.0, 1.0),
            sfx_volume: settings.sfx_volume.clamp(0.0, 1.0),
            muted: settings.muted,
        }
    }

    /// Resume audio context (required after user gesture)
    pub fn resume(&self) {
        if let Some(ctx) = &self.ctx {
            let _ = ctx.resume();
        }
    }

    fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Play the sound for each event, in order
    pub fn play_events(&self, events: &[GameEvent]) {
        for &event in events {
            self.play(event.into());
        }
    }

    pub fn play(&self, effect: SoundEffect) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }

        let Some(ctx) = &self.ctx else { return };

        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }

        match effect {
            SoundEffect::Shot => self.play_zap(ctx, vol * 0.25, 900.0, 300.0),
            SoundEffect::EnemyShot => self.play_zap(ctx, vol * 0.15, 500.0, 150.0),
            SoundEffect::Explosion => self.play_explosion(ctx, vol),
            SoundEffect::GameOver => self.play_game_over(ctx, vol),
            SoundEffect::NewGame => self.play_new_game(ctx, vol),
        }
    }

    /// Create an oscillator routed through its own gain node
    fn create_osc(
        &self,
        ctx: &AudioContext,
        freq: f32,
        osc_type: OscillatorType,
    ) -> Option<(OscillatorNode, GainNode)> {
        let osc = ctx.create_oscillator().ok()?;
        let gain = ctx.create_gain().ok()?;

        osc.set_type(osc_type);
        osc.frequency().set_value(freq);
        osc.connect_with_audio_node(&gain).ok()?;
        gain.connect_with_audio_node(&ctx.destination()).ok()?;

        Some((osc, gain))
    }

    /// Short downward sweep
    fn play_zap(&self, ctx: &AudioContext, level: f32, from: f32, to: f32) {
        let Some((osc, gain)) = self.create_osc(ctx, from, OscillatorType::Square) else {
            return;
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time(level, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.08)
            .ok();
        osc.frequency().set_value_at_time(from, t).ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(to, t + 0.08)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.1).ok();
    }

    fn play_explosion(&self, ctx: &AudioContext, vol: f32) {
        let t = ctx.current_time();

        if let Some((osc, gain)) = self.create_osc(ctx, 100.0, OscillatorType::Sawtooth) {
            gain.gain().set_value_at_time(vol * 0.5, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.4)
                .ok();
            osc.frequency().set_value_at_time(100.0, t).ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(30.0, t + 0.4)
                .ok();
            osc.start().ok();
            osc.stop_with_when(t + 0.5).ok();
        }

        // Crack on top of the rumble
        if let Some((osc, gain)) = self.create_osc(ctx, 1500.0, OscillatorType::Square) {
            gain.gain().set_value_at_time(vol * 0.2, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.1)
                .ok();
            osc.start().ok();
            osc.stop_with_when(t + 0.15).ok();
        }
    }

    /// Descending four-note phrase
    fn play_game_over(&self, ctx: &AudioContext, vol: f32) {
        self.play_phrase(ctx, vol * 0.3, &[400.0, 350.0, 300.0, 200.0], 0.2, OscillatorType::Sine);
    }

    /// Rising arpeggio
    fn play_new_game(&self, ctx: &AudioContext, vol: f32) {
        self.play_phrase(
            ctx,
            vol * 0.25,
            &[500.0, 600.0, 700.0, 800.0, 1000.0],
            0.08,
            OscillatorType::Triangle,
        );
    }

    fn play_phrase(
        &self,
        ctx: &AudioContext,
        level: f32,
        notes: &[f32],
        step: f64,
        osc_type: OscillatorType,
    ) {
        for (i, freq) in notes.iter().enumerate() {
            let Some((osc, gain)) = self.create_osc(ctx, *freq, osc_type) else {
                continue;
            };
            let t = ctx.current_time() + i as f64 * step;
            gain.gain().set_value_at_time(level, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + step * 1.5)
                .ok();
            osc.start_with_when(t).ok();
            osc.stop_with_when(t + step * 2.0).ok();
        }
    }
}
