//! Per-wheel state
//!
//! A wheel keeps the list as last committed (`master_items`) and the items
//! still in play (`active_items`). Spins only ever remove from the active
//! list; a commit resets both.

use std::fmt;

use super::items::parse_items_with;
use super::spin::SpinPhase;
use crate::persistence::ListStore;
use crate::settings::ItemSeparators;

/// Identity of a wheel slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WheelId(pub u8);

impl fmt::Display for WheelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "wheel {}", self.0)
    }
}

/// Text shown under a wheel
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    Ready,
    ListUpdated,
    ListEmpty,
    Spinning,
    Winner(String),
}

impl Status {
    /// Status after (re)loading a list
    pub fn for_loaded(item_count: usize) -> Self {
        if item_count == 0 {
            Status::ListEmpty
        } else {
            Status::Ready
        }
    }

    /// Status after a user commit
    pub fn for_commit(item_count: usize) -> Self {
        if item_count == 0 {
            Status::ListEmpty
        } else {
            Status::ListUpdated
        }
    }

    /// Winner text gets the pulse highlight
    pub fn is_winner(&self) -> bool {
        matches!(self, Status::Winner(_))
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Ready => f.write_str("Ready!"),
            Status::ListUpdated => f.write_str("List Updated!"),
            Status::ListEmpty => f.write_str("List is Empty"),
            Status::Spinning => f.write_str("Spinning..."),
            Status::Winner(item) => write!(f, "🎯 {}", item),
        }
    }
}

/// One independent wheel
#[derive(Debug, Clone)]
pub struct WheelInstance {
    pub id: WheelId,
    /// LocalStorage slot holding the raw list text
    pub storage_key: String,
    master_items: Vec<String>,
    active_items: Vec<String>,
    /// Accumulated rotation (degrees); never reset, the next spin starts here
    pub(crate) current_rotation: f64,
    pub(crate) phase: SpinPhase,
}

impl WheelInstance {
    pub fn new(id: WheelId, storage_key: impl Into<String>) -> Self {
        Self {
            id,
            storage_key: storage_key.into(),
            master_items: Vec::new(),
            active_items: Vec::new(),
            current_rotation: 0.0,
            phase: SpinPhase::Idle,
        }
    }

    /// Full list as last committed
    pub fn master_items(&self) -> &[String] {
        &self.master_items
    }

    /// Items not yet picked
    pub fn active_items(&self) -> &[String] {
        &self.active_items
    }

    pub fn current_rotation(&self) -> f64 {
        self.current_rotation
    }

    pub fn phase(&self) -> &SpinPhase {
        &self.phase
    }

    /// True from spin start until the winner has been removed
    pub fn is_spinning(&self) -> bool {
        !matches!(self.phase, SpinPhase::Idle)
    }

    /// Replace both lists with the parsed text (no storage write)
    ///
    /// Returns the item count, or `None` while a spin is in flight.
    pub fn load(&mut self, raw: &str, separators: ItemSeparators) -> Option<usize> {
        if self.is_spinning() {
            return None;
        }
        let items = parse_items_with(raw, separators);
        self.master_items = items.clone();
        self.active_items = items;
        Some(self.active_items.len())
    }

    /// Commit new list text: parse, reset both lists, persist the raw text
    ///
    /// Ignored (returns `None`) while a spin is in flight.
    pub fn commit<S: ListStore + ?Sized>(
        &mut self,
        raw: &str,
        separators: ItemSeparators,
        store: &mut S,
    ) -> Option<Status> {
        let count = self.load(raw, separators)?;
        store.save(&self.storage_key, raw);
        log::info!("{}: list committed ({} items)", self.id, count);
        Some(Status::for_commit(count))
    }

    /// Remove the picked item from the active list
    ///
    /// Out-of-range indices (including any index on an empty list) are a no-op.
    pub fn remove_winner(&mut self, index: usize) -> Option<String> {
        if index < self.active_items.len() {
            Some(self.active_items.remove(index))
        } else {
            None
        }
    }

    /// Drop every remaining item without touching the committed list
    #[cfg(test)]
    pub(crate) fn clear_active(&mut self) {
        self.active_items.clear();
    }
}
