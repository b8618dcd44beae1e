//! Dune Drift entry point
//!
//! Handles platform-specific initialization and runs the frame loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::DVec3;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;
    use wasm_bindgen::prelude::*;
    use web_sys::{DeviceMotionEvent, DeviceOrientationEvent, HtmlCanvasElement, KeyboardEvent};

    use dune_drift::error::{AppError, AppResult};
    use dune_drift::renderer::{RenderState, build_scene, tessellate};
    use dune_drift::sim::{
        FrameInput, InputEvent, OrientationSample, PhysicsParams, Screen, SimulationState,
        Terrain, gaussian_kernel, step,
    };
    use dune_drift::{DebugReadout, Tuning};

    const CANVAS_ID: &str = "canvas";

    /// Game instance holding all state
    struct Game {
        state: SimulationState,
        terrain: Terrain,
        kernel: Vec<f64>,
        params: PhysicsParams,
        gravity: f64,
        render_state: RenderState,
        /// Events queued by host callbacks since the last frame
        pending: Vec<InputEvent>,
    }

    impl Game {
        /// Advance one frame and draw it
        fn frame(&mut self, now_ms: f64) {
            let input = FrameInput {
                now_ms,
                events: std::mem::take(&mut self.pending),
            };
            let next = step(&self.state, &input, &self.kernel, &self.params);
            if next.screen != self.render_state.screen {
                self.render_state.resize(next.screen);
            }
            self.state = next;

            let scene = build_scene(&self.state, &self.terrain, now_ms);
            let vertices = tessellate(&scene);
            match self.render_state.render(&vertices) {
                Ok(_) => {}
                Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                    self.render_state.reconfigure();
                }
                Err(wgpu::SurfaceError::OutOfMemory) => {
                    log::error!("Out of memory!");
                }
                Err(e) => log::warn!("Render error: {:?}", e),
            }
        }

        /// Show or hide the debug readout
        fn update_debug_overlay(&self) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };
            let Some(el) = document.get_element_by_id("debug") else {
                return;
            };
            if self.state.debug {
                let readout = DebugReadout::from_state(&self.state, self.gravity);
                el.set_text_content(Some(&readout.to_string()));
                let _ = el.set_attribute("class", "debug");
            } else {
                let _ = el.set_attribute("class", "debug hidden");
            }
        }
    }

    /// Current viewport from the window
    fn read_screen(window: &web_sys::Window) -> Screen {
        let width = window
            .inner_width()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(800.0);
        let height = window
            .inner_height()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(600.0);
        Screen::new(width, height, window.device_pixel_ratio())
    }

    fn size_canvas(canvas: &HtmlCanvasElement, screen: &Screen) {
        let (width, height) = screen.physical_size();
        canvas.set_width(width);
        canvas.set_height(height);
    }

    fn load_tuning(canvas: &HtmlCanvasElement) -> AppResult<Tuning> {
        match canvas.get_attribute("data-tuning") {
            Some(json) => {
                let tuning = Tuning::from_json(&json)?;
                log::info!("Loaded tuning overrides: {:?}", tuning);
                Ok(tuning)
            }
            None => Ok(Tuning::default()),
        }
    }

    pub async fn run() -> AppResult<()> {
        log::info!("Dune Drift starting...");

        let window = web_sys::window().ok_or(AppError::NoWindow)?;
        let document = window.document().ok_or(AppError::NoDocument)?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id(CANVAS_ID)
            .ok_or_else(|| AppError::NoCanvas(CANVAS_ID.into()))?
            .dyn_into()
            .map_err(|_| AppError::NotACanvas(CANVAS_ID.into()))?;

        let tuning = load_tuning(&canvas)?;

        let screen = read_screen(&window);
        size_canvas(&canvas, &screen);

        // Terrain is generated once and never touched again
        let seed = tuning.seed.unwrap_or(js_sys::Date::now() as u64);
        let mut rng = Pcg32::seed_from_u64(seed);
        let terrain = Terrain::generate(
            tuning.terrain_detail,
            tuning.sand_base,
            tuning.sand_relief,
            &mut rng,
        );
        log::info!("Terrain generated with seed {}: {:?}", seed, terrain.heights());

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .map_err(|e| AppError::Surface(e.to_string()))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| AppError::Adapter(e.to_string()))?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state = RenderState::new(surface, &adapter, screen).await?;

        let game = Rc::new(RefCell::new(Game {
            state: SimulationState::new(screen, tuning.smooth_length, js_sys::Date::now()),
            terrain,
            kernel: gaussian_kernel(tuning.smooth_length),
            params: tuning.physics(),
            gravity: tuning.gravity,
            render_state,
            pending: Vec::new(),
        }));

        setup_input_handlers(&window, &canvas, game.clone());

        request_animation_frame(game);

        log::info!("Dune Drift running!");
        Ok(())
    }

    fn setup_input_handlers(
        window: &web_sys::Window,
        canvas: &HtmlCanvasElement,
        game: Rc<RefCell<Game>>,
    ) {
        // Resize / pixel ratio change
        {
            let game = game.clone();
            let canvas = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                let Some(window) = web_sys::window() else {
                    return;
                };
                let screen = read_screen(&window);
                size_canvas(&canvas, &screen);
                game.borrow_mut().pending.push(InputEvent::Resize(screen));
            });
            let _ = window
                .add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Device orientation (absent hardware simply never fires)
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: DeviceOrientationEvent| {
                let sample = OrientationSample {
                    absolute: event.absolute(),
                    alpha: event.alpha().unwrap_or(0.0),
                    beta: event.beta().unwrap_or(0.0),
                    gamma: event.gamma().unwrap_or(0.0),
                };
                game.borrow_mut()
                    .pending
                    .push(InputEvent::Orientation(sample));
            });
            let _ = window.add_event_listener_with_callback_and_bool(
                "deviceorientation",
                closure.as_ref().unchecked_ref(),
                true,
            );
            closure.forget();
        }

        // Device motion
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: DeviceMotionEvent| {
                if let Some(a) = event.acceleration_including_gravity() {
                    let acceleration = DVec3::new(
                        a.x().unwrap_or(0.0),
                        a.y().unwrap_or(0.0),
                        a.z().unwrap_or(0.0),
                    );
                    game.borrow_mut()
                        .pending
                        .push(InputEvent::Motion(acceleration));
                }
            });
            let _ = window.add_event_listener_with_callback_and_bool(
                "devicemotion",
                closure.as_ref().unchecked_ref(),
                false,
            );
            closure.forget();
        }

        // Keyboard
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if event.key() == "d" {
                    game.borrow_mut().pending.push(InputEvent::ToggleDebug);
                }
            });
            let _ = window
                .add_event_listener_with_callback("keypress", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |_time: f64| {
            game_loop(game);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>) {
        {
            let mut g = game.borrow_mut();
            // Wall clock, shared by dt and the light ray animation
            g.frame(js_sys::Date::now());
            g.update_debug_overlay();
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    console_error_panic_hook::set_once();
    if let Err(e) = console_log::init_with_level(log::Level::Info) {
        web_sys::console::error_1(&format!("Failed to init logger: {e}").into());
    }

    if let Err(e) = wasm_game::run().await {
        log::error!("Dune Drift failed to start: {e}");
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Dune Drift (native) starting...");
    log::info!("Native mode has no window - run with `trunk serve` for the web version");

    run_headless_demo();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Tilt a virtual device for two seconds and print what the overlay would show
#[cfg(not(target_arch = "wasm32"))]
fn run_headless_demo() {
    use dune_drift::renderer::{build_scene, tessellate};
    use dune_drift::sim::{
        FrameInput, InputEvent, OrientationSample, Screen, SimulationState, Terrain,
        gaussian_kernel, step,
    };
    use dune_drift::{DebugReadout, Tuning};
    use glam::DVec3;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    const FRAME_MS: f64 = 1000.0 / 60.0;
    const TILT_DEGREES: f64 = 20.0;

    let tuning = Tuning::default();
    let seed = tuning.seed.unwrap_or(12345);
    let terrain = Terrain::generate(
        tuning.terrain_detail,
        tuning.sand_base,
        tuning.sand_relief,
        &mut Pcg32::seed_from_u64(seed),
    );
    log::info!("Terrain ({} samples): {:?}", terrain.len(), terrain.heights());

    let kernel = gaussian_kernel(tuning.smooth_length);
    let params = tuning.physics();
    let mut state = SimulationState::new(Screen::default(), tuning.smooth_length, 0.0);

    // Rolled to the right: gravity leaks into the device x axis
    let tilt = TILT_DEGREES.to_radians();
    let tilted = OrientationSample {
        absolute: false,
        alpha: 0.0,
        beta: 0.0,
        gamma: TILT_DEGREES,
    };
    let reading = DVec3::new(
        tuning.gravity * tilt.sin(),
        0.0,
        tuning.gravity * tilt.cos(),
    );

    let mut now_ms = 0.0;
    for frame in 1..=120 {
        now_ms = frame as f64 * FRAME_MS;
        let input = FrameInput {
            now_ms,
            events: vec![InputEvent::Orientation(tilted), InputEvent::Motion(reading)],
        };
        state = step(&state, &input, &kernel, &params);
    }

    let scene = build_scene(&state, &terrain, now_ms);
    let vertices = tessellate(&scene);
    log::info!(
        "Final frame: {} draw commands, {} vertices",
        scene.len(),
        vertices.len()
    );

    print!("{}", DebugReadout::from_state(&state, tuning.gravity));
}
