//! Tick audio using the Web Audio API
//!
//! Procedurally generated click - no sound files needed.

use web_sys::{AudioContext, AudioContextState, GainNode, OscillatorNode, OscillatorType};

use super::{TickSink, tick_envelope, tick_tone};

/// Lazily created AudioContext (browsers only allow it after a user gesture)
pub struct WebTickAudio {
    ctx: Option<AudioContext>,
    volume: f32,
}

impl Default for WebTickAudio {
    fn default() -> Self {
        Self::new(1.0)
    }
}

impl WebTickAudio {
    pub fn new(volume: f32) -> Self {
        Self {
            ctx: None,
            volume: volume.clamp(0.0, 1.0),
        }
    }

    /// Set tick volume (0.0 - 1.0)
    pub fn set_volume(&mut self, volume: f32) {
        self.volume = volume.clamp(0.0, 1.0);
    }

    /// Sine oscillator routed through a gain node to the speakers
    fn create_osc(&self, ctx: &AudioContext) -> Option<(OscillatorNode, GainNode)> {
        let osc = ctx.create_oscillator().ok()?;
        let gain = ctx.create_gain().ok()?;

        osc.set_type(OscillatorType::Sine);
        osc.connect_with_audio_node(&gain).ok()?;
        gain.connect_with_audio_node(&ctx.destination()).ok()?;

        Some((osc, gain))
    }
}

impl TickSink for WebTickAudio {
    fn prepare(&mut self) {
        if self.ctx.is_none() {
            self.ctx = AudioContext::new().ok();
            if self.ctx.is_none() {
                log::warn!("Failed to create AudioContext - ticks disabled");
            }
        }
        if let Some(ctx) = &self.ctx {
            if ctx.state() == AudioContextState::Suspended {
                let _ = ctx.resume();
            }
        }
    }

    fn tick(&mut self) {
        let Some((peak, floor)) = tick_envelope(self.volume) else {
            return;
        };
        let Some(ctx) = &self.ctx else { return };
        let Some((osc, gain)) = self.create_osc(ctx) else {
            return;
        };
        let t = ctx.current_time();
        let end = t + tick_tone::DURATION_S;

        osc.frequency().set_value_at_time(tick_tone::START_HZ, t).ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(tick_tone::END_HZ, end)
            .ok();
        gain.gain().set_value_at_time(peak, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(floor, end)
            .ok();

        osc.start().ok();
        osc.stop_with_when(end).ok();
    }
}
