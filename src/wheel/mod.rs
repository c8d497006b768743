//! Wheel logic
//!
//! Pure and platform-free: list parsing, per-wheel state, the spin state
//! machine (driven by caller timestamps) and the registry tying them to a
//! surface, a tick sink and a list store.

pub mod items;
pub mod registry;
pub mod spin;
pub mod state;

pub use items::{parse_items, parse_items_with};
pub use registry::WheelRegistry;
pub use spin::{
    Frame, SpinEvent, SpinPhase, SpinPlan, SpinRequest, advance, arc_size, ease_out_quartic,
    request_spin, winner_index,
};
pub use state::{Status, WheelId, WheelInstance};
