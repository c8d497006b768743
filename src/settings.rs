//! Wheel settings and preferences
//!
//! Persisted separately from the wheel lists in LocalStorage.

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// How raw list text is split into items
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ItemSeparators {
    /// One item per line
    #[default]
    Lines,
    /// Lines, and commas within a line
    LinesAndCommas,
}

/// Timing and travel of a single spin
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpinTuning {
    /// Animation length (ms)
    pub duration_ms: f64,
    /// Winner display time before it leaves the wheel (ms)
    pub settle_delay_ms: f64,
    /// Minimum random travel (degrees)
    pub min_travel_deg: f64,
    /// Maximum random travel (degrees)
    pub max_travel_deg: f64,
}

impl Default for SpinTuning {
    fn default() -> Self {
        Self {
            duration_ms: SPIN_DURATION_MS,
            settle_delay_ms: SETTLE_DELAY_MS,
            min_travel_deg: MIN_TRAVEL_DEG,
            max_travel_deg: MAX_TRAVEL_DEG,
        }
    }
}

impl SpinTuning {
    /// Travel range, ordered and at least one full turn
    pub fn travel_range(&self) -> RangeInclusive<f64> {
        let lo = self.min_travel_deg.min(self.max_travel_deg).max(360.0);
        let hi = self.min_travel_deg.max(self.max_travel_deg).max(lo);
        lo..=hi
    }

    /// Animation length, never negative
    pub fn duration(&self) -> f64 {
        self.duration_ms.max(0.0)
    }

    /// Settle delay, never negative
    pub fn settle_delay(&self) -> f64 {
        self.settle_delay_ms.max(0.0)
    }
}

/// Wheel settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Audio ===
    /// Click on every wedge boundary
    pub sound: bool,
    /// Tick volume (0.0 - 1.0)
    pub tick_volume: f32,

    // === Spin ===
    pub spin: SpinTuning,

    // === Lists ===
    /// Labels longer than this are cut
    pub label_max_chars: usize,
    pub separators: ItemSeparators,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            sound: true,
            tick_volume: 1.0,
            spin: SpinTuning::default(),
            label_max_chars: LABEL_MAX_CHARS,
            separators: ItemSeparators::Lines,
        }
    }
}

impl Settings {
    /// Effective tick volume (respects the sound toggle)
    pub fn effective_tick_volume(&self) -> f32 {
        if self.sound {
            self.tick_volume.clamp(0.0, 1.0)
        } else {
            0.0
        }
    }

    /// LocalStorage key (read-only; edited from devtools)
    #[cfg(target_arch = "wasm32")]
    const STORAGE_KEY: &'static str = "spin_wheel_settings";

    /// Parse stored settings; missing fields take their defaults
    pub fn from_json(json: &str) -> Option<Self> {
        match serde_json::from_str(json) {
            Ok(settings) => Some(settings),
            Err(e) => {
                log::warn!("Ignoring stored settings: {}", e);
                None
            }
        }
    }

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let stored = web_sys::window()
            .and_then(|w| w.local_storage().ok().flatten())
            .and_then(|storage| storage.get_item(Self::STORAGE_KEY).ok().flatten());

        match stored.as_deref().and_then(Self::from_json) {
            Some(settings) => {
                log::info!("Loaded settings from LocalStorage");
                settings
            }
            None => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    /// Native builds have no settings store
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_travel_range_default() {
        let range = SpinTuning::default().travel_range();
        assert_eq!(*range.start(), 1800.0);
        assert_eq!(*range.end(), 3600.0);
    }

    #[test]
    fn test_travel_range_swapped_and_clamped() {
        let tuning = SpinTuning {
            min_travel_deg: 900.0,
            max_travel_deg: 10.0,
            ..Default::default()
        };
        let range = tuning.travel_range();
        assert_eq!(*range.start(), 360.0);
        assert_eq!(*range.end(), 900.0);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings = Settings::from_json(r#"{"sound":false,"separators":"LinesAndCommas"}"#)
            .expect("valid settings");
        assert!(!settings.sound);
        assert_eq!(settings.separators, ItemSeparators::LinesAndCommas);
        assert_eq!(settings.label_max_chars, LABEL_MAX_CHARS);
        assert_eq!(settings.spin, SpinTuning::default());
        assert_eq!(settings.effective_tick_volume(), 0.0);
    }

    #[test]
    fn test_bad_json_is_rejected() {
        assert_eq!(Settings::from_json("{not json"), None);
        assert_eq!(Settings::from_json(r#"{"tick_volume":"loud"}"#), None);
    }

    #[test]
    fn test_native_load_is_default() {
        assert_eq!(Settings::load(), Settings::default());
    }
}
