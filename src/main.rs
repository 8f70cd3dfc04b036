//! Laser Switch entry point
//!
//! On the web: sets up the canvas, input and HUD, then runs the frame loop
//! whenever a run starts. Natively: plays a few headless autopilot runs on a
//! simulated 60 Hz clock and logs the summaries.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod web_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, KeyboardEvent, PointerEvent};

    use laser_switch::driver::{LoopExit, run_loop};
    use laser_switch::platform::storage::LocalStore;
    use laser_switch::platform::time::{AnimationFrameClock, now_ms};
    use laser_switch::renderer::RenderState;
    use laser_switch::{Activation, Game, Renderer, RunState, Snapshot, Tuning};

    type SharedGame = Rc<RefCell<Game<LocalStore>>>;

    /// Canvas plus DOM HUD
    struct Page {
        document: Document,
        gpu: Option<RenderState>,
    }

    impl Page {
        fn set_text(&self, id: &str, text: &str) {
            if let Some(el) = self.document.get_element_by_id(id) {
                el.set_text_content(Some(text));
            }
        }

        fn update_hud(&self, snapshot: &Snapshot) {
            self.set_text("scoreValue", &snapshot.current_score.to_string());
            self.set_text("bestValue", &snapshot.best_score.to_string());

            if let Some(el) = self.document.get_element_by_id("message") {
                let classes = el.class_list();
                match snapshot.run_state {
                    RunState::Playing => {
                        let _ = classes.add_1("hidden");
                    }
                    RunState::Idle => {
                        el.set_text_content(Some("Tap to Start"));
                        let _ = classes.remove_1("hidden");
                    }
                    RunState::GameOver => {
                        el.set_text_content(Some("Tap to Retry"));
                        let _ = classes.remove_1("hidden");
                    }
                }
            }
        }
    }

    /// Renderer handle shared between input callbacks and frame loops.
    /// Borrows the page only for the duration of one frame.
    #[derive(Clone)]
    struct PageRenderer(Rc<RefCell<Page>>);

    impl Renderer for PageRenderer {
        fn render(&mut self, snapshot: &Snapshot) {
            let mut page = self.0.borrow_mut();
            if let Some(gpu) = page.gpu.as_mut() {
                gpu.render(snapshot);
            }
            page.update_hud(snapshot);
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        if let Err(err) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::error_1(&format!("Failed to init logger: {}", err).into());
        }

        log::info!("Laser Switch starting...");

        let Some(window) = web_sys::window() else {
            log::error!("no window");
            return;
        };
        let Some(document) = window.document() else {
            log::error!("no document");
            return;
        };
        let Some(canvas) = document
            .get_element_by_id("gameCanvas")
            .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
        else {
            log::error!("no #gameCanvas canvas element");
            return;
        };

        let (client_w, client_h) = client_size(&canvas);
        let (width, height) = pixel_size(&canvas);
        canvas.set_width(width);
        canvas.set_height(height);

        let seed = js_sys::Date::now() as u64;
        let mut game = Game::new(Tuning::load(), LocalStore::new(), seed);
        game.resize(client_w, client_h);
        let game: SharedGame = Rc::new(RefCell::new(game));
        log::info!("Game initialized with seed: {}", seed);

        let gpu = init_gpu(&canvas, width, height).await;
        if gpu.is_none() {
            log::warn!("WebGPU unavailable; running without canvas rendering");
        }

        let mut renderer = PageRenderer(Rc::new(RefCell::new(Page { document, gpu })));
        let initial = game.borrow().snapshot();
        renderer.render(&initial);

        setup_input_handlers(&canvas, game.clone(), renderer.clone());
        setup_resize(canvas, game, renderer);

        log::info!("Laser Switch ready");
    }

    async fn init_gpu(canvas: &HtmlCanvasElement, width: u32, height: u32) -> Option<RenderState> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .map_err(|e| log::error!("Failed to create surface: {}", e))
            .ok()?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| log::error!("Failed to get adapter: {}", e))
            .ok()?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);
        RenderState::new(surface, &adapter, width, height)
            .await
            .map_err(|e| log::error!("Failed to create device: {}", e))
            .ok()
    }

    fn client_size(canvas: &HtmlCanvasElement) -> (f32, f32) {
        (canvas.client_width() as f32, canvas.client_height() as f32)
    }

    fn pixel_size(canvas: &HtmlCanvasElement) -> (u32, u32) {
        let dpr = web_sys::window().map(|w| w.device_pixel_ratio()).unwrap_or(1.0);
        (
            (canvas.client_width() as f64 * dpr) as u32,
            (canvas.client_height() as f64 * dpr) as u32,
        )
    }

    /// Feed one activation to the game; a started run gets its own frame loop
    fn activate(game: &SharedGame, renderer: &PageRenderer) {
        let activation = game.borrow_mut().activate(now_ms());
        match activation {
            Activation::Started { retry } => {
                log::debug!("Run started (retry: {})", retry);
                spawn_frame_loop(game.clone(), renderer.clone());
            }
            Activation::Toggled(color) => log::trace!("Toggled to {}", color.as_str()),
            Activation::Debounced => {}
        }
    }

    fn spawn_frame_loop(game: SharedGame, mut renderer: PageRenderer) {
        wasm_bindgen_futures::spawn_local(async move {
            let mut clock = AnimationFrameClock::new();
            match run_loop(&*game, &mut clock, &mut renderer).await {
                LoopExit::GameOver(summary) => {
                    log::info!("Game over: {} gates (best {})", summary.score, summary.best);
                }
                LoopExit::NotPlaying => log::debug!("Frame loop stopped: not playing"),
                LoopExit::ClockStopped => log::warn!("Frame loop stopped: no more frames"),
            }
        });
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: SharedGame, renderer: PageRenderer) {
        // Tap / click
        {
            let game = game.clone();
            let renderer = renderer.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
                event.prevent_default();
                activate(&game, &renderer);
            });
            let _ = canvas
                .add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keyboard
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            if event.repeat() {
                return;
            }
            match event.key().as_str() {
                " " | "Enter" => {
                    event.prevent_default();
                    activate(&game, &renderer);
                }
                "i" | "I" => {
                    let mut g = game.borrow_mut();
                    let enabled = !g.autopilot();
                    g.set_autopilot(enabled);
                }
                _ => {}
            }
        });
        let _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_resize(canvas: HtmlCanvasElement, game: SharedGame, renderer: PageRenderer) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let (client_w, client_h) = client_size(&canvas);
            let (width, height) = pixel_size(&canvas);
            canvas.set_width(width);
            canvas.set_height(height);

            let snapshot = {
                let mut g = game.borrow_mut();
                g.resize(client_w, client_h);
                g.snapshot()
            };
            let mut renderer = renderer.clone();
            if let Some(gpu) = renderer.0.borrow_mut().gpu.as_mut() {
                gpu.resize(width, height);
            }
            // The frame loop repaints on its own while a run is live
            if snapshot.run_state != RunState::Playing {
                renderer.render(&snapshot);
            }
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    web_game::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use std::cell::RefCell;
    use std::time::{SystemTime, UNIX_EPOCH};

    use laser_switch::driver::{LoopExit, run_loop};
    use laser_switch::platform::storage::FileStore;
    use laser_switch::platform::time::SimulatedClock;
    use laser_switch::snapshot::NullRenderer;
    use laser_switch::{Game, Tuning};

    /// Headless runs to play
    const RUNS: u32 = 3;
    /// Frame budget per run (two minutes at 60 Hz)
    const FRAMES_PER_RUN: u64 = 60 * 120;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Laser Switch (native) starting...");
    log::info!("Native mode plays headless autopilot runs; serve `web/` for the browser version");

    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_default();
    let store = FileStore::from_env();
    log::info!("Best score file: {}", store.path().display());

    let mut game = Game::new(Tuning::load(), store, seed);
    game.set_autopilot(true);
    let game = RefCell::new(game);
    let mut renderer = NullRenderer;
    let mut now_ms = 0.0;

    for run in 1..=RUNS {
        game.borrow_mut().activate(now_ms);
        let mut clock = SimulatedClock::sixty_hz(now_ms, FRAMES_PER_RUN);

        match pollster::block_on(run_loop(&game, &mut clock, &mut renderer)) {
            LoopExit::GameOver(summary) => {
                log::info!(
                    "Run {}: {} gates in {:.1}s (best {})",
                    run,
                    summary.score,
                    summary.duration_ms / 1000.0,
                    summary.best
                );
            }
            LoopExit::ClockStopped => {
                let g = game.borrow();
                log::info!(
                    "Run {}: still alive after {} frames with {} gates",
                    run,
                    FRAMES_PER_RUN,
                    g.scores().current()
                );
                break;
            }
            LoopExit::NotPlaying => break,
        }

        // Outlast the debounce window before the retry tap
        now_ms = clock.now_ms() + 1000.0;
    }

    let stats = game.borrow().stats();
    log::info!("Deaths: {}, retries: {}", stats.deaths, stats.retries);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
