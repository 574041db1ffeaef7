//! Tennis Bounce entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use thiserror::Error;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent, MouseEvent, TouchEvent};

    use tennis_bounce::App;
    use tennis_bounce::persistence::LocalStore;
    use tennis_bounce::renderer::{RenderError, SdfRenderState};
    use tennis_bounce::sim::Surface;
    use tennis_bounce::tuning::Tuning;
    use tennis_bounce::ui::DomHud;

    #[derive(Debug, Error)]
    enum StartupError {
        #[error("no window")]
        NoWindow,
        #[error("no document")]
        NoDocument,
        #[error("#gameCanvas missing or not a canvas")]
        NoCanvas,
        #[error(transparent)]
        Render(#[from] RenderError),
    }

    /// Game instance holding all state
    struct Game {
        app: App<LocalStore, DomHud>,
        render_state: Option<SdfRenderState>,
        canvas: HtmlCanvasElement,
    }

    impl Game {
        /// Render the current state
        fn render(&mut self) {
            if let Some(ref mut render_state) = self.render_state {
                match render_state.render(self.app.state(), self.app.settings()) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost) => {
                        let (w, h) = render_state.size;
                        let dpr = device_pixel_ratio();
                        render_state.resize(w, h, dpr);
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }
        }

        /// Pointer x relative to the canvas, in CSS pixels
        fn local_x(&self, client_x: i32) -> f32 {
            let rect = self.canvas.get_bounding_client_rect();
            (client_x as f64 - rect.left()) as f32
        }

        /// Size the backbuffer to the canvas container and tell everyone
        fn fit_to_container(&mut self) {
            let (surface, width, height, dpr) = measure(&self.canvas);
            self.canvas.set_width(width);
            self.canvas.set_height(height);
            if let Some(ref mut render_state) = self.render_state {
                render_state.resize(width, height, dpr);
            }
            self.app.resize(surface);
        }
    }

    fn device_pixel_ratio() -> f32 {
        web_sys::window()
            .map(|w| w.device_pixel_ratio() as f32)
            .unwrap_or(1.0)
    }

    /// Container size in CSS pixels plus backbuffer size in device pixels
    fn measure(canvas: &HtmlCanvasElement) -> (Surface, u32, u32, f32) {
        let dpr = device_pixel_ratio();
        let (css_w, css_h) = match canvas.parent_element() {
            Some(container) => {
                let rect = container.get_bounding_client_rect();
                (rect.width() as f32, rect.height() as f32)
            }
            None => (canvas.client_width() as f32, canvas.client_height() as f32),
        };
        let width = ((css_w * dpr) as u32).max(1);
        let height = ((css_h * dpr) as u32).max(1);
        (Surface::new(css_w, css_h), width, height, dpr)
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"Logger already initialized".into());
        }

        log::info!("Tennis Bounce starting...");

        if let Err(e) = start().await {
            log::error!("Startup failed: {}", e);
        }
    }

    async fn start() -> Result<(), StartupError> {
        let window = web_sys::window().ok_or(StartupError::NoWindow)?;
        let document = window.document().ok_or(StartupError::NoDocument)?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("gameCanvas")
            .and_then(|el| el.dyn_into().ok())
            .ok_or(StartupError::NoCanvas)?;

        let (surface, width, height, dpr) = measure(&canvas);
        canvas.set_width(width);
        canvas.set_height(height);

        let store = LocalStore::open();
        let tuning = Tuning::load(&store);
        let hud = DomHud::new(&document);
        let seed = js_sys::Date::now() as u64;
        let app = App::new(store, hud, tuning, surface, seed);

        let game = Rc::new(RefCell::new(Game {
            app,
            render_state: None,
            canvas: canvas.clone(),
        }));

        // Input works before the GPU is up; frames simply aren't drawn yet
        setup_input_handlers(&canvas, game.clone());
        setup_buttons(&document, game.clone());
        setup_resize(game.clone());

        let render_state = SdfRenderState::for_canvas(canvas, width, height, dpr).await?;
        {
            let mut g = game.borrow_mut();
            g.render_state = Some(render_state);
            // Paint the idle scene behind the start screen
            g.render();
        }

        log::info!("Tennis Bounce running!");
        Ok(())
    }

    fn listen<E, F>(target: &web_sys::EventTarget, event: &str, handler: F)
    where
        E: wasm_bindgen::convert::FromWasmAbi + 'static,
        F: FnMut(E) + 'static,
    {
        let closure = Closure::<dyn FnMut(E)>::new(handler);
        if target
            .add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
            .is_err()
        {
            log::warn!("Could not listen for {}", event);
        }
        closure.forget();
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        // Mouse
        {
            let game = game.clone();
            listen(canvas, "mousedown", move |event: MouseEvent| {
                let mut g = game.borrow_mut();
                let x = g.local_x(event.client_x());
                g.app.pointer_down(x);
            });
        }
        {
            let game = game.clone();
            listen(canvas, "mousemove", move |event: MouseEvent| {
                let mut g = game.borrow_mut();
                let x = g.local_x(event.client_x());
                g.app.pointer_move(x, event.buttons() & 1 == 1);
            });
        }
        for name in ["mouseup", "mouseleave"] {
            let game = game.clone();
            listen(canvas, name, move |_event: MouseEvent| {
                game.borrow_mut().app.pointer_up();
            });
        }

        // Touch
        {
            let game = game.clone();
            listen(canvas, "touchstart", move |event: TouchEvent| {
                event.prevent_default();
                if let Some(touch) = event.touches().get(0) {
                    let mut g = game.borrow_mut();
                    let x = g.local_x(touch.client_x());
                    g.app.pointer_down(x);
                }
            });
        }
        {
            let game = game.clone();
            listen(canvas, "touchmove", move |event: TouchEvent| {
                event.prevent_default();
                if let Some(touch) = event.touches().get(0) {
                    let mut g = game.borrow_mut();
                    let x = g.local_x(touch.client_x());
                    g.app.touch_move(x);
                }
            });
        }
        for name in ["touchend", "touchcancel"] {
            let game = game.clone();
            listen(canvas, name, move |event: TouchEvent| {
                event.prevent_default();
                game.borrow_mut().app.pointer_up();
            });
        }

        // Keyboard
        let Some(window) = web_sys::window() else {
            return;
        };
        {
            let game = game.clone();
            listen(&window, "keydown", move |event: KeyboardEvent| {
                let key = event.key();
                if matches!(key.as_str(), "ArrowLeft" | "ArrowRight" | " ") {
                    event.prevent_default();
                }
                let needs_loop = game.borrow_mut().app.key_down(&key);
                if needs_loop {
                    request_animation_frame(game.clone());
                }
            });
        }
        listen(&window, "keyup", move |event: KeyboardEvent| {
            game.borrow_mut().app.key_up(&event.key());
        });
    }

    fn setup_buttons(document: &web_sys::Document, game: Rc<RefCell<Game>>) {
        for id in ["start-btn", "restart-btn"] {
            let Some(btn) = document.get_element_by_id(id) else {
                log::warn!("#{} not found", id);
                continue;
            };
            let game = game.clone();
            listen(&btn, "click", move |_event: MouseEvent| {
                let needs_loop = game.borrow_mut().app.restart();
                if needs_loop {
                    request_animation_frame(game.clone());
                }
            });
        }
    }

    fn setup_resize(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        listen(&window, "resize", move |_event: web_sys::Event| {
            let mut g = game.borrow_mut();
            g.fit_to_container();
            // A running loop repaints on its own
            if !g.app.is_running() {
                g.render();
            }
        });
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        if let Err(e) = window.request_animation_frame(closure.as_ref().unchecked_ref()) {
            log::warn!("requestAnimationFrame failed: {:?}", e);
            return;
        }
        closure.forget();
    }

    /// Update then render; re-schedule only while the session is running
    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        let keep_going = {
            let mut g = game.borrow_mut();
            let keep_going = g.app.frame(time);
            g.render();
            keep_going
        };

        if keep_going {
            request_animation_frame(game);
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use tennis_bounce::App;
    use tennis_bounce::persistence::MemoryStore;
    use tennis_bounce::sim::Surface;
    use tennis_bounce::tuning::Tuning;
    use tennis_bounce::ui::HeadlessHud;

    env_logger::init();
    log::info!("Tennis Bounce (native) starting...");
    log::info!("Native mode has no window - run with `trunk serve` for the web version");

    // Headless demo: the autopilot plays a few sessions against an in-memory store
    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(1);
    let sessions = 3;
    let max_ticks = 60 * 60 * 5;

    let store = MemoryStore::new();
    let tuning = Tuning::load(&store);
    let mut app = App::new(
        store,
        HeadlessHud::default(),
        tuning,
        Surface::new(400.0, 600.0),
        seed,
    );
    app.set_demo(true);

    for session in 1..=sessions {
        app.start();
        let mut ticks = 0;
        while app.is_running() && ticks < max_ticks {
            app.step();
            ticks += 1;
        }
        println!(
            "Session {}: score {} after {} ticks{}",
            session,
            app.state().score,
            ticks,
            if app.is_running() { " (time limit)" } else { "" }
        );
    }
    println!("Best score: {}", app.state().best);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
