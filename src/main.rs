//! Flappy Bird entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent, MouseEvent, TouchEvent};

    use flappy_bird::Settings;
    use flappy_bird::audio::AudioManager;
    use flappy_bird::renderer::{RenderState, scene};
    use flappy_bird::sim::autopilot;
    use flappy_bird::sim::{GamePhase, GameState, InputEvent, TickInput, tick};
    use flappy_bird::tuning::Tuning;

    /// Game instance holding all state
    struct Game {
        state: GameState,
        render_state: Option<RenderState>,
        audio: AudioManager,
        settings: Settings,
        /// Inputs collected since the last frame, in delivery order
        pending: Vec<InputEvent>,
        /// Demo pilot plays instead of the player
        autopilot: bool,
        quit: bool,
        last_phase: GamePhase,
    }

    impl Game {
        fn new(seed: u64) -> Self {
            let settings = Settings::load();
            let mut audio = AudioManager::new();
            audio.apply_settings(&settings);
            Self {
                state: GameState::new(Tuning::default(), seed),
                render_state: None,
                audio,
                settings,
                pending: Vec::new(),
                autopilot: false,
                quit: false,
                last_phase: GamePhase::Waiting,
            }
        }

        /// The one action button: space, click or tap
        fn press_primary(&mut self) {
            // Browsers only allow audio after a user gesture
            self.audio.resume();
            let input = self.state.phase.primary_input();
            self.pending.push(input);
        }

        fn push(&mut self, input: InputEvent) {
            self.pending.push(input);
        }

        /// Handle audio keys and quit; everything else goes to the simulation
        fn take_sim_inputs(&mut self) -> Vec<InputEvent> {
            let mut sim_inputs = Vec::new();
            for input in std::mem::take(&mut self.pending) {
                if input == InputEvent::Quit {
                    self.quit = true;
                } else if input.is_platform_only() {
                    if self.settings.apply(input) {
                        self.audio.apply_settings(&self.settings);
                        self.settings.save();
                    }
                } else {
                    sim_inputs.push(input);
                }
            }
            sim_inputs
        }

        /// Run one simulation tick
        fn update(&mut self, time: f64) {
            let mut input = TickInput::at(time as u64);
            input.inputs = self.take_sim_inputs();

            if self.autopilot {
                match self.state.phase {
                    GamePhase::Waiting | GamePhase::Ended => {
                        input.inputs.push(self.state.phase.primary_input())
                    }
                    GamePhase::Playing if autopilot::should_flap(&self.state) => {
                        input.inputs.push(InputEvent::Impulse)
                    }
                    GamePhase::Playing => {}
                }
            }

            tick(&mut self.state, &input);

            for event in self.state.drain_events() {
                self.audio.play_event(event);
            }

            if self.state.phase != self.last_phase {
                log::debug!("Phase {:?} -> {:?}", self.last_phase, self.state.phase);
                self.last_phase = self.state.phase;
            }
        }

        /// Render the current frame
        fn render(&mut self) {
            if let Some(ref mut render_state) = self.render_state {
                let vertices = scene(&self.state);
                match render_state.render(&vertices) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost) => {
                        render_state.resize(render_state.size.0, render_state.size.1);
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }
        }

        /// Update HUD elements in DOM
        fn update_hud(&self) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };

            if let Some(el) = document.query_selector("#hud-score .hud-value").ok().flatten() {
                el.set_text_content(Some(&self.state.score.to_string()));
            }

            if let Some(el) = document.query_selector("#hud-audio .hud-value").ok().flatten() {
                let mut status = self.settings.status_line();
                if self.autopilot {
                    status.push_str(" | demo");
                }
                el.set_text_content(Some(&status));
            }

            let show = |id: &str, visible: bool| {
                if let Some(el) = document.get_element_by_id(id) {
                    let _ = el.set_attribute("class", if visible { "" } else { "hidden" });
                }
            };
            show("start-prompt", self.state.phase == GamePhase::Waiting);
            show("game-over", self.state.phase == GamePhase::Ended);

            if self.state.phase == GamePhase::Ended {
                if let Some(el) = document.get_element_by_id("final-score") {
                    el.set_text_content(Some(&self.state.score.to_string()));
                }
            }
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Flappy Bird starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        // Hide loading indicator
        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        // Set canvas size
        let dpr = window.device_pixel_ratio();
        let width = (canvas.client_width() as f64 * dpr) as u32;
        let height = (canvas.client_height() as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        // Initialize game
        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(seed)));
        let logical = {
            let g = game.borrow();
            let t = &g.state.tuning;
            glam::Vec2::new(t.screen_width as f32, t.screen_height as f32)
        };

        log::info!("Game initialized with seed: {}", seed);

        // Initialize WebGPU
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .expect("Failed to create surface");

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .expect("Failed to get adapter");

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        match RenderState::new(surface, &adapter, width, height, logical).await {
            Ok(render_state) => game.borrow_mut().render_state = Some(render_state),
            Err(e) => {
                log::error!("Failed to create device: {}", e);
                return;
            }
        }

        setup_input_handlers(&canvas, game.clone());

        if let Some(hud) = document.get_element_by_id("hud") {
            let _ = hud.set_attribute("class", "");
        }

        // Start game loop
        request_animation_frame(game);

        log::info!("Flappy Bird running!");
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };

        // Mouse click - flap / start / restart
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().press_primary();
            });
            let _ = canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch start - same as a click
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                game.borrow_mut().press_primary();
            });
            let _ = canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keyboard
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if event.repeat() {
                    return;
                }
                let mut g = game.borrow_mut();
                match event.key().as_str() {
                    " " | "Enter" => {
                        event.prevent_default();
                        g.press_primary();
                    }
                    "m" | "M" => g.push(InputEvent::ToggleMusic),
                    "s" | "S" => g.push(InputEvent::ToggleSound),
                    "ArrowUp" => {
                        event.prevent_default();
                        g.push(InputEvent::MusicVolumeUp);
                    }
                    "ArrowDown" => {
                        event.prevent_default();
                        g.push(InputEvent::MusicVolumeDown);
                    }
                    "q" | "Q" | "Escape" => g.push(InputEvent::Quit),
                    "i" | "I" => {
                        g.autopilot = !g.autopilot;
                        log::info!("Demo mode: {}", g.autopilot);
                    }
                    _ => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();
            g.update(time);
            if g.quit {
                log::info!("Quit requested, stopping at score {}", g.state.score);
                if let Some(el) = web_sys::window()
                    .and_then(|w| w.document())
                    .and_then(|d| d.get_element_by_id("quit-message"))
                {
                    let _ = el.set_attribute("class", "");
                }
                return;
            }
            g.render();
            g.update_hud();
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use flappy_bird::headless::{RunConfig, run};

    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let config = match RunConfig::from_args(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {e}");
            eprintln!("usage: flappy-bird [seed] [max_ticks]");
            std::process::exit(2);
        }
    };

    log::info!(
        "Flappy Bird (native) headless run, seed {} for up to {} ticks",
        config.seed,
        config.max_ticks
    );
    log::info!("The playable version is the web build - run it with `trunk serve`");

    let summary = run(&config);
    match serde_json::to_string_pretty(&summary) {
        Ok(json) => println!("{json}"),
        Err(e) => {
            log::error!("Failed to serialize run summary: {}", e);
            std::process::exit(1);
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
