//! Spin Wheel - a spinning wheel picker for the browser
//!
//! Core modules:
//! - `wheel`: List parsing, per-wheel state, the spin state machine and the registry
//! - `renderer`: Wedge layout and the Canvas 2D surface
//! - `audio`: Tick sound on wedge boundaries
//! - `persistence`: Raw list text in LocalStorage
//! - `settings`: User preferences

pub mod audio;
pub mod persistence;
pub mod renderer;
pub mod settings;
pub mod wheel;

pub use settings::{ItemSeparators, Settings, SpinTuning};
pub use wheel::{SpinEvent, SpinPhase, SpinRequest, Status, WheelId, WheelInstance, WheelRegistry};

/// Wheel configuration constants
pub mod consts {
    /// Spin animation length (ms)
    pub const SPIN_DURATION_MS: f64 = 5000.0;
    /// How long the winner stays on the wheel before removal (ms)
    pub const SETTLE_DELAY_MS: f64 = 1200.0;
    /// Random travel per spin, in degrees (always several full turns)
    pub const MIN_TRAVEL_DEG: f64 = 1800.0;
    pub const MAX_TRAVEL_DEG: f64 = 3600.0;

    /// Pointer position on the wheel's angle scale. Angle zero points right
    /// and angles grow clockwise, so the top of the wheel sits at 270.
    /// The renderer draws wedge 0 from angle zero; keep both in step.
    pub const POINTER_OFFSET_DEG: f64 = 270.0;

    /// Canvas dimensions (square)
    pub const WHEEL_SIZE: f64 = 400.0;
    pub const WHEEL_RADIUS: f64 = 195.0;

    /// Label placement, in the wedge's rotated frame
    pub const LABEL_X: f64 = 170.0;
    pub const LABEL_Y: f64 = 5.0;
    pub const LABEL_FONT: &str = "bold 15px sans-serif";
    pub const LABEL_MAX_CHARS: usize = 15;

    /// Wedge fill (hue comes from the wedge index)
    pub const WEDGE_SATURATION: u8 = 60;
    pub const WEDGE_LIGHTNESS: u8 = 45;

    /// LocalStorage slots for the two wheels
    pub const STUDENTS_STORAGE_KEY: &str = "wheel_students";
    pub const OBJECTS_STORAGE_KEY: &str = "wheel_objects";
}

/// Normalize an angle in degrees to [0, 360)
#[inline]
pub fn normalize_degrees(angle: f64) -> f64 {
    let net = angle.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if net >= 360.0 { 0.0 } else { net }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_degrees() {
        assert_eq!(normalize_degrees(0.0), 0.0);
        assert_eq!(normalize_degrees(360.0), 0.0);
        assert_eq!(normalize_degrees(450.0), 90.0);
        assert_eq!(normalize_degrees(-90.0), 270.0);
        assert!(normalize_degrees(-1e-20) < 360.0);
    }
}
