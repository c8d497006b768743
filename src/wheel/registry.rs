//! Wheel registry
//!
//! Owns every wheel plus the shared settings and RNG, and routes list commits,
//! spin requests and animation frames to the right wheel. Wheels never share
//! mutable state, so two spins on different wheels interleave freely.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::spin::{self, SpinEvent, SpinRequest};
use super::state::{Status, WheelId, WheelInstance};
use crate::audio::TickSink;
use crate::consts::{OBJECTS_STORAGE_KEY, STUDENTS_STORAGE_KEY};
use crate::persistence::ListStore;
use crate::renderer::{self, WheelSurface};
use crate::settings::Settings;

/// All wheels in the session
pub struct WheelRegistry {
    wheels: Vec<WheelInstance>,
    settings: Settings,
    rng: Pcg32,
}

impl WheelRegistry {
    /// Empty registry; `seed` drives spin travel
    pub fn new(settings: Settings, seed: u64) -> Self {
        Self {
            wheels: Vec::new(),
            settings,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// The two standard wheels: students (1) and objects (2)
    pub fn with_default_wheels(settings: Settings, seed: u64) -> Self {
        let mut registry = Self::new(settings, seed);
        registry.add_wheel(WheelId(1), STUDENTS_STORAGE_KEY);
        registry.add_wheel(WheelId(2), OBJECTS_STORAGE_KEY);
        registry
    }

    /// Register a wheel slot (an existing id is returned unchanged)
    pub fn add_wheel(&mut self, id: WheelId, storage_key: &str) -> &mut WheelInstance {
        let pos = match self.wheels.iter().position(|w| w.id == id) {
            Some(pos) => pos,
            None => {
                self.wheels.push(WheelInstance::new(id, storage_key));
                self.wheels.len() - 1
            }
        };
        &mut self.wheels[pos]
    }

    pub fn ids(&self) -> impl Iterator<Item = WheelId> + '_ {
        self.wheels.iter().map(|w| w.id)
    }

    pub fn get(&self, id: WheelId) -> Option<&WheelInstance> {
        self.wheels.iter().find(|w| w.id == id)
    }

    fn get_mut(&mut self, id: WheelId) -> Option<&mut WheelInstance> {
        self.wheels.iter_mut().find(|w| w.id == id)
    }

    /// Restore a wheel from storage without writing back
    ///
    /// Returns the saved text so the caller can put it back in the editor.
    pub fn load<S, W>(&mut self, id: WheelId, store: &S, surface: &mut W) -> Option<String>
    where
        S: ListStore + ?Sized,
        W: WheelSurface + ?Sized,
    {
        let separators = self.settings.separators;
        let label_max = self.settings.label_max_chars;
        let wheel = self.get_mut(id)?;

        let saved = store.load(&wheel.storage_key);
        let count = wheel.load(saved.as_deref().unwrap_or_default(), separators)?;
        log::info!("{}: loaded {} items from storage", id, count);

        redraw(wheel, label_max, surface);
        surface.show_status(&Status::for_loaded(count));
        saved
    }

    /// Commit edited list text for a wheel (ignored while it spins)
    pub fn commit<S, W>(
        &mut self,
        id: WheelId,
        raw: &str,
        store: &mut S,
        surface: &mut W,
    ) -> Option<Status>
    where
        S: ListStore + ?Sized,
        W: WheelSurface + ?Sized,
    {
        let separators = self.settings.separators;
        let label_max = self.settings.label_max_chars;
        let wheel = self.get_mut(id)?;

        let status = wheel.commit(raw, separators, store)?;
        redraw(wheel, label_max, surface);
        surface.show_status(&status);
        Some(status)
    }

    /// Handle a spin gesture; `None` for an unknown wheel
    ///
    /// The tick sink is prepared first, since audio may only start from a
    /// user gesture.
    pub fn spin<W, T>(
        &mut self,
        id: WheelId,
        now: f64,
        surface: &mut W,
        ticks: &mut T,
    ) -> Option<SpinRequest>
    where
        W: WheelSurface + ?Sized,
        T: TickSink + ?Sized,
    {
        if self.settings.sound {
            ticks.prepare();
        }
        let wheel = self.wheels.iter_mut().find(|w| w.id == id)?;
        let request = spin::request_spin(wheel, now, &self.settings.spin, &mut self.rng);
        if let SpinRequest::Started { .. } = request {
            surface.show_status(&Status::Spinning);
        }
        Some(request)
    }

    /// Run one animation frame; returns true while the wheel is still busy
    pub fn frame<W, T>(&mut self, id: WheelId, now: f64, surface: &mut W, ticks: &mut T) -> bool
    where
        W: WheelSurface + ?Sized,
        T: TickSink + ?Sized,
    {
        let sound = self.settings.sound;
        let label_max = self.settings.label_max_chars;
        let Some(wheel) = self.get_mut(id) else {
            return false;
        };

        let frame = spin::advance(wheel, now);
        surface.set_rotation(frame.rotation);
        if frame.tick && sound {
            ticks.tick();
        }

        match frame.event {
            Some(SpinEvent::Landed { winner, .. }) => {
                surface.show_status(&Status::Winner(winner));
            }
            Some(SpinEvent::Settled { .. }) => {
                redraw(wheel, label_max, surface);
            }
            None => {}
        }

        wheel.is_spinning()
    }
}

/// Draw a wheel's remaining items at its current rotation
fn redraw<W: WheelSurface + ?Sized>(wheel: &WheelInstance, label_max: usize, surface: &mut W) {
    surface.draw(&renderer::layout(wheel.active_items(), label_max));
    surface.set_rotation(wheel.current_rotation());
}
