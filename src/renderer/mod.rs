//! Wheel rendering
//!
//! [`layout`] turns the remaining items into a draw plan; a [`WheelSurface`]
//! puts that plan on screen. Wedges are laid out un-rotated: wedge 0 starts at
//! angle zero (pointing right) and angles grow clockwise. Spinning rotates the
//! whole surface instead of redrawing.

#[cfg(target_arch = "wasm32")]
pub mod canvas;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasSurface;

use crate::consts::*;
use crate::wheel::Status;

/// Shown on a wheel with no items
pub const PLACEHOLDER_TEXT: &str = "Add items to spin!";

/// One equal-angle sector of the wheel
#[derive(Debug, Clone, PartialEq)]
pub struct Wedge {
    pub index: usize,
    /// Start angle (degrees)
    pub start_deg: f64,
    /// End angle (degrees)
    pub end_deg: f64,
    /// Fill hue (degrees)
    pub hue: f64,
    /// Item text, truncated
    pub label: String,
}

impl Wedge {
    /// Angular midpoint, where the label is drawn
    pub fn mid_deg(&self) -> f64 {
        (self.start_deg + self.end_deg) / 2.0
    }

    /// CSS fill colour
    pub fn fill_style(&self) -> String {
        format!(
            "hsl({}, {}%, {}%)",
            self.hue, WEDGE_SATURATION, WEDGE_LIGHTNESS
        )
    }
}

/// What to draw for a wheel
#[derive(Debug, Clone, PartialEq)]
pub enum WheelLayout {
    Placeholder(&'static str),
    Wedges(Vec<Wedge>),
}

impl WheelLayout {
    pub fn wedge_count(&self) -> usize {
        match self {
            WheelLayout::Placeholder(_) => 0,
            WheelLayout::Wedges(wedges) => wedges.len(),
        }
    }
}

/// Lay out one wedge per item, in list order
pub fn layout(items: &[String], label_max_chars: usize) -> WheelLayout {
    if items.is_empty() {
        return WheelLayout::Placeholder(PLACEHOLDER_TEXT);
    }

    let n = items.len() as f64;
    let arc = 360.0 / n;
    let wedges = items
        .iter()
        .enumerate()
        .map(|(i, item)| Wedge {
            index: i,
            start_deg: i as f64 * arc,
            end_deg: (i + 1) as f64 * arc,
            hue: i as f64 * 360.0 / n,
            label: truncate_label(item, label_max_chars),
        })
        .collect();
    WheelLayout::Wedges(wedges)
}

/// First `max_chars` characters of `text`
pub fn truncate_label(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

/// Something a wheel can be shown on
pub trait WheelSurface {
    /// Clear and draw the layout
    fn draw(&mut self, layout: &WheelLayout);
    /// Rotate the drawn wheel clockwise (degrees)
    fn set_rotation(&mut self, degrees: f64);
    /// Update the status line
    fn show_status(&mut self, status: &Status);
}
