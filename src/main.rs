//! Spin Wheel entry point
//!
//! Wires the page's list editors and buttons to the wheel registry and runs
//! spin animations on requestAnimationFrame.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_app {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, HtmlTextAreaElement};

    use spin_wheel::audio::WebTickAudio;
    use spin_wheel::persistence::LocalStore;
    use spin_wheel::renderer::CanvasSurface;
    use spin_wheel::{Settings, SpinRequest, WheelId, WheelRegistry};

    const EMPTY_WHEEL_ALERT: &str = "Please add items to the wheel first!";

    /// DOM ids for one wheel's widgets
    struct WheelSlot {
        id: WheelId,
        canvas: &'static str,
        list: &'static str,
        result: &'static str,
        update_btn: &'static str,
        spin_btn: &'static str,
    }

    const SLOTS: [WheelSlot; 2] = [
        WheelSlot {
            id: WheelId(1),
            canvas: "canvas1",
            list: "list1",
            result: "result1",
            update_btn: "update1",
            spin_btn: "spin1",
        },
        WheelSlot {
            id: WheelId(2),
            canvas: "canvas2",
            list: "list2",
            result: "result2",
            update_btn: "update2",
            spin_btn: "spin2",
        },
    ];

    /// Everything the event handlers share
    struct App {
        registry: WheelRegistry,
        store: LocalStore,
        audio: WebTickAudio,
        surfaces: Vec<(WheelId, CanvasSurface)>,
    }

    fn surface_for(
        surfaces: &mut [(WheelId, CanvasSurface)],
        id: WheelId,
    ) -> Option<&mut CanvasSurface> {
        surfaces
            .iter_mut()
            .find(|(slot, _)| *slot == id)
            .map(|(_, surface)| surface)
    }

    impl App {
        fn load(&mut self, id: WheelId) -> Option<String> {
            let App {
                registry,
                store,
                surfaces,
                ..
            } = self;
            let surface = surface_for(surfaces, id)?;
            registry.load(id, &*store, surface)
        }

        fn commit(&mut self, id: WheelId, raw: &str) {
            let App {
                registry,
                store,
                surfaces,
                ..
            } = self;
            if let Some(surface) = surface_for(surfaces, id) {
                registry.commit(id, raw, store, surface);
            }
        }

        fn spin(&mut self, id: WheelId, now: f64) -> Option<SpinRequest> {
            let App {
                registry,
                audio,
                surfaces,
                ..
            } = self;
            let surface = surface_for(surfaces, id)?;
            registry.spin(id, now, surface, audio)
        }

        fn frame(&mut self, id: WheelId, now: f64) -> bool {
            let App {
                registry,
                audio,
                surfaces,
                ..
            } = self;
            match surface_for(surfaces, id) {
                Some(surface) => registry.frame(id, now, surface, audio),
                None => false,
            }
        }
    }

    fn now_ms() -> f64 {
        web_sys::window()
            .and_then(|w| w.performance())
            .map(|p| p.now())
            .unwrap_or_else(js_sys::Date::now)
    }

    fn text_area(document: &Document, id: &str) -> Option<HtmlTextAreaElement> {
        document.get_element_by_id(id)?.dyn_into().ok()
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Spin Wheel starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let settings = Settings::load();
        let mut audio = WebTickAudio::default();
        audio.set_volume(settings.effective_tick_volume());

        let mut surfaces = Vec::new();
        for slot in &SLOTS {
            let canvas = document
                .get_element_by_id(slot.canvas)
                .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok());
            let Some(canvas) = canvas else {
                log::warn!("No canvas '{}' for {}", slot.canvas, slot.id);
                continue;
            };
            match CanvasSurface::new(canvas, document.get_element_by_id(slot.result)) {
                Some(surface) => surfaces.push((slot.id, surface)),
                None => log::warn!("No 2D context for {}", slot.id),
            }
        }

        let seed = js_sys::Date::now() as u64;
        let app = Rc::new(RefCell::new(App {
            registry: WheelRegistry::with_default_wheels(settings, seed),
            store: LocalStore::new(),
            audio,
            surfaces,
        }));

        for slot in &SLOTS {
            let saved = app.borrow_mut().load(slot.id);
            if let (Some(text), Some(list)) = (saved, text_area(&document, slot.list)) {
                list.set_value(&text);
            }
            setup_wheel_controls(&document, slot, app.clone());
        }

        log::info!("Spin Wheel ready!");
    }

    fn setup_wheel_controls(document: &Document, slot: &WheelSlot, app: Rc<RefCell<App>>) {
        let id = slot.id;

        // Update list
        if let Some(btn) = document.get_element_by_id(slot.update_btn) {
            let app = app.clone();
            let list_id = slot.list;
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                    return;
                };
                if let Some(list) = text_area(&document, list_id) {
                    app.borrow_mut().commit(id, &list.value());
                }
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Spin
        if let Some(btn) = document.get_element_by_id(slot.spin_btn) {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                let request = app.borrow_mut().spin(id, now_ms());
                match request {
                    Some(SpinRequest::Started { .. }) => request_animation_frame(app.clone(), id),
                    Some(SpinRequest::Empty) => {
                        if let Some(window) = web_sys::window() {
                            let _ = window.alert_with_message(EMPTY_WHEEL_ALERT);
                        }
                    }
                    Some(SpinRequest::Busy) | None => {}
                }
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(app: Rc<RefCell<App>>, id: WheelId) {
        let Some(window) = web_sys::window() else { return };
        let closure = Closure::once(move |time: f64| {
            spin_loop(app, id, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    /// One frame per callback until the wheel settles
    fn spin_loop(app: Rc<RefCell<App>>, id: WheelId, time: f64) {
        let busy = app.borrow_mut().frame(id, time);
        if busy {
            request_animation_frame(app, id);
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_app::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Spin Wheel (native) starting...");
    log::info!("The wheel UI runs in the browser - run with `trunk serve` for the web version");

    demo::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Headless spin with a synthetic frame clock
#[cfg(not(target_arch = "wasm32"))]
mod demo {
    use spin_wheel::audio::SilentTicks;
    use spin_wheel::persistence::MemoryStore;
    use spin_wheel::renderer::{WheelLayout, WheelSurface};
    use spin_wheel::{Settings, SpinRequest, Status, WheelId, WheelRegistry};

    /// 60 fps
    const FRAME_MS: f64 = 1000.0 / 60.0;

    /// Logs what a canvas would show
    struct LogSurface;

    impl WheelSurface for LogSurface {
        fn draw(&mut self, layout: &WheelLayout) {
            match layout {
                WheelLayout::Placeholder(text) => log::info!("draw: {}", text),
                WheelLayout::Wedges(wedges) => {
                    let labels: Vec<&str> = wedges.iter().map(|w| w.label.as_str()).collect();
                    log::info!("draw: {} wedges {:?}", wedges.len(), labels);
                }
            }
        }

        fn set_rotation(&mut self, degrees: f64) {
            log::trace!("rotate: {:.1}", degrees);
        }

        fn show_status(&mut self, status: &Status) {
            log::info!("status: {}", status);
        }
    }

    pub fn run() {
        let seed = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0);
        let mut registry = WheelRegistry::with_default_wheels(Settings::default(), seed);
        let mut store = MemoryStore::new();
        let mut surface = LogSurface;
        let mut ticks = SilentTicks;
        let id = WheelId(1);

        registry.commit(id, "Ada\nGrace\n\n Linus \nBarbara", &mut store, &mut surface);

        let mut now = 0.0;
        for _ in 0..2 {
            match registry.spin(id, now, &mut surface, &mut ticks) {
                Some(SpinRequest::Started { travel }) => {
                    log::info!("spin: {:.0} degrees", travel);
                }
                other => {
                    log::warn!("spin not started: {:?}", other);
                    return;
                }
            }
            while registry.frame(id, now, &mut surface, &mut ticks) {
                now += FRAME_MS;
            }
        }

        if let Some(wheel) = registry.get(id) {
            log::info!("left on the wheel: {:?}", wheel.active_items());
        }
    }
}
