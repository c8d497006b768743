//! Tick sound on wedge boundaries
//!
//! The spin engine only knows the [`TickSink`] seam; the browser
//! implementation synthesizes a short click with Web Audio.

#[cfg(target_arch = "wasm32")]
pub mod web;

#[cfg(target_arch = "wasm32")]
pub use web::WebTickAudio;

/// Click envelope: pitch falls from 800 Hz to 100 Hz while the gain
/// decays from 0.1 to 0.01, over 30 ms
pub mod tick_tone {
    pub const START_HZ: f32 = 800.0;
    pub const END_HZ: f32 = 100.0;
    pub const PEAK_GAIN: f32 = 0.1;
    /// Exponential ramps can't reach zero
    pub const FLOOR_GAIN: f32 = 0.01;
    pub const DURATION_S: f64 = 0.03;
}

/// Receives one call per wedge boundary crossed
pub trait TickSink {
    /// Acquire the output; called from the spin gesture, never at load
    fn prepare(&mut self);
    /// Fire-and-forget click; overlapping clicks are fine
    fn tick(&mut self);
}

/// Discards ticks (native builds, muted wheels)
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentTicks;

impl TickSink for SilentTicks {
    fn prepare(&mut self) {}

    fn tick(&mut self) {}
}

/// Peak gain for the click at a given volume (0.0 - 1.0)
pub fn tick_gain(volume: f32) -> f32 {
    tick_tone::PEAK_GAIN * volume.clamp(0.0, 1.0)
}

/// Start and end gain of the click envelope, `None` when muted
///
/// The decay always ends a decade below the peak, so quiet volumes still
/// click instead of ramping up to the floor.
pub fn tick_envelope(volume: f32) -> Option<(f32, f32)> {
    let peak = tick_gain(volume);
    (peak > 0.0).then(|| (peak, tick_tone::FLOOR_GAIN.min(peak * 0.1)))
}
