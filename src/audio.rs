//! Audio system using Web Audio API
//!
//! Procedurally generated sound effects and a background drone, so there are
//! no asset files to load.

use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

use crate::settings::Settings;
use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Bird flaps
    Flap,
    /// Pipe pair cleared
    Point,
    /// Bird struck a pipe or the ground
    Hit,
    /// Bird fell to the ground
    Die,
}

impl From<GameEvent> for SoundEffect {
    fn from(event: GameEvent) -> Self {
        match event {
            GameEvent::Jump => SoundEffect::Flap,
            GameEvent::Score => SoundEffect::Point,
            GameEvent::Hit => SoundEffect::Hit,
            GameEvent::Death => SoundEffect::Die,
        }
    }
}

/// Drone voices: root and fifth, slightly detuned
const DRONE_VOICES: [(f32, OscillatorType); 2] =
    [(110.0, OscillatorType::Triangle), (165.4, OscillatorType::Sine)];
/// Drone level at full music volume
const DRONE_LEVEL: f32 = 0.15;

/// Audio manager for the game
pub struct AudioManager {
    ctx: Option<AudioContext>,
    sfx_volume: f32,
    /// Gain node feeding the drone; created on first use
    music_bus: Option<GainNode>,
    music_volume: f32,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioManager {
    pub fn new() -> Self {
        // Try to create audio context (may fail if not in secure context)
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("Failed to create AudioContext - audio disabled");
        }
        Self {
            ctx,
            sfx_volume: 0.0,
            music_bus: None,
            music_volume: 0.0,
        }
    }

    /// Resume audio context (required after user gesture)
    pub fn resume(&mut self) {
        let Some(ctx) = &self.ctx else { return };
        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }
        if self.music_bus.is_none() {
            self.music_bus = self.start_drone();
        }
    }

    /// Pick up volume and on/off changes
    pub fn apply_settings(&mut self, settings: &Settings) {
        self.sfx_volume = settings.effective_sfx_volume();
        self.music_volume = settings.effective_music_volume();
        if let (Some(ctx), Some(bus)) = (&self.ctx, &self.music_bus) {
            bus.gain()
                .set_target_at_time(self.music_volume * DRONE_LEVEL, ctx.current_time(), 0.05)
                .ok();
        }
    }

    /// Play the cue for a simulation event
    pub fn play_event(&self, event: GameEvent) {
        self.play(SoundEffect::from(event));
    }

    /// Play a sound effect
    pub fn play(&self, effect: SoundEffect) {
        let vol = self.sfx_volume;
        if vol <= 0.0 {
            return;
        }

        let Some(ctx) = &self.ctx else { return };

        match effect {
            SoundEffect::Flap => self.play_flap(ctx, vol),
            SoundEffect::Point => self.play_point(ctx, vol),
            SoundEffect::Hit => self.play_hit(ctx, vol),
            SoundEffect::Die => self.play_die(ctx, vol),
        }
    }

    /// Build the looping drone behind a gain node held at the music volume
    fn start_drone(&self) -> Option<GainNode> {
        let ctx = self.ctx.as_ref()?;
        let bus = ctx.create_gain().ok()?;
        bus.gain().set_value(self.music_volume * DRONE_LEVEL);
        bus.connect_with_audio_node(&ctx.destination()).ok()?;

        for (freq, osc_type) in DRONE_VOICES {
            let osc = ctx.create_oscillator().ok()?;
            osc.set_type(osc_type);
            osc.frequency().set_value(freq);
            osc.connect_with_audio_node(&bus).ok()?;
            osc.start().ok()?;
        }
        log::debug!("Music drone started");
        Some(bus)
    }

    // === Sound generators ===

    /// Create an oscillator with gain envelope
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

    /// Flap - quick rising chirp
    fn play_flap(&self, ctx: &AudioContext, vol: f32) {
        let Some((osc, gain)) = self.create_osc(ctx, 300.0, OscillatorType::Triangle) else {
            return;
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time(vol * 0.5, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.12)
            .ok();
        osc.frequency().set_value_at_time(300.0, t).ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(700.0, t + 0.08)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.14).ok();
    }

    /// Point - two-note bell
    fn play_point(&self, ctx: &AudioContext, vol: f32) {
        let t = ctx.current_time();
        for (i, freq) in [988.0, 1319.0].into_iter().enumerate() {
            let Some((osc, gain)) = self.create_osc(ctx, freq, OscillatorType::Sine) else {
                return;
            };
            let start = t + i as f64 * 0.08;
            gain.gain().set_value_at_time(0.0, t).ok();
            gain.gain().set_value_at_time(vol * 0.4, start).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, start + 0.25)
                .ok();
            osc.start().ok();
            osc.stop_with_when(start + 0.3).ok();
        }
    }

    /// Hit - short noisy smack
    fn play_hit(&self, ctx: &AudioContext, vol: f32) {
        let t = ctx.current_time();

        if let Some((osc, gain)) = self.create_osc(ctx, 180.0, OscillatorType::Square) {
            gain.gain().set_value_at_time(vol * 0.4, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.1)
                .ok();
            osc.frequency().set_value_at_time(180.0, t).ok();
            osc.frequency().set_value_at_time(1200.0, t + 0.01).ok();
            osc.frequency().set_value_at_time(90.0, t + 0.02).ok();
            osc.start().ok();
            osc.stop_with_when(t + 0.12).ok();
        }

        // Bass thump
        if let Some((osc, gain)) = self.create_osc(ctx, 70.0, OscillatorType::Sine) {
            gain.gain().set_value_at_time(vol * 0.5, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.15)
                .ok();
            osc.start().ok();
            osc.stop_with_when(t + 0.18).ok();
        }
    }

    /// Die - falling whistle, delayed so it follows the hit
    fn play_die(&self, ctx: &AudioContext, vol: f32) {
        let Some((osc, gain)) = self.create_osc(ctx, 800.0, OscillatorType::Sine) else {
            return;
        };
        let t = ctx.current_time() + 0.15;

        gain.gain().set_value_at_time(0.0, ctx.current_time()).ok();
        gain.gain().set_value_at_time(vol * 0.45, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.6)
            .ok();
        osc.frequency().set_value_at_time(800.0, t).ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(120.0, t + 0.6)
            .ok();

        osc.start_with_when(t).ok();
        osc.stop_with_when(t + 0.65).ok();
    }
}
