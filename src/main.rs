//! Brick Breaker entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent};

    use brick_breaker::audio::{AudioManager, SoundEffect};
    use brick_breaker::consts::SIM_DT;
    use brick_breaker::renderer::RenderState;
    use brick_breaker::sim::KeyState;
    use brick_breaker::{Game, HighScores, Phase, Tuning};

    /// Browser-side state around the game
    struct App {
        game: Game,
        render_state: Option<RenderState>,
        /// Held keys, updated by keydown/keyup listeners
        keys: KeyState,
        last_time: f64,
        audio: AudioManager,
        high_scores: HighScores,
        // FPS tracking
        frame_times: [f64; 60],
        frame_index: usize,
        fps: u32,
        // Track phase to record finished rounds once
        last_phase: Phase,
    }

    impl App {
        fn new(tuning: Tuning, seed: u64) -> Self {
            Self {
                game: Game::new(tuning, seed),
                render_state: None,
                keys: KeyState::default(),
                last_time: 0.0,
                audio: AudioManager::new(),
                high_scores: HighScores::load(),
                frame_times: [0.0; 60],
                frame_index: 0,
                fps: 0,
                last_phase: Phase::Playing,
            }
        }

        /// Run one rendered frame of the game
        fn update(&mut self, dt: f32, time: f64) {
            self.game.advance(self.keys, dt);
            // Restart is a one-shot press
            self.keys.restart = false;

            for event in self.game.drain_events() {
                self.audio.play(event.into());
            }

            // Track frame times for FPS
            self.frame_times[self.frame_index] = time;
            self.frame_index = (self.frame_index + 1) % 60;

            let oldest_time = self.frame_times[self.frame_index];
            if oldest_time > 0.0 {
                let elapsed = time - oldest_time;
                if elapsed > 0.0 {
                    self.fps = (60000.0 / elapsed).round() as u32;
                }
            }

            let phase = self.game.phase;
            if phase != self.last_phase {
                if phase.is_over() {
                    self.record_round();
                }
                self.last_phase = phase;
            }
        }

        fn record_round(&mut self) {
            let score = self.game.score();
            let bricks = self.game.world.bricks_destroyed;
            if let Some(rank) = self.high_scores.add_score(score, bricks, js_sys::Date::now()) {
                self.high_scores.save();
                self.audio.play(SoundEffect::HighScore);
                log::info!("New high score #{rank}: {score}");
            }
        }

        /// Render the current frame
        fn render(&mut self) {
            if let Some(ref mut render_state) = self.render_state {
                match render_state.render(&self.game.world) {
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
                el.set_text_content(Some(&self.game.score().to_string()));
            }

            if let Some(el) = document.query_selector("#hud-best .hud-value").ok().flatten() {
                let best = self.high_scores.top_score().unwrap_or(0);
                el.set_text_content(Some(&best.to_string()));
            }

            if let Some(el) = document.query_selector("#hud-fps .hud-value").ok().flatten() {
                el.set_text_content(Some(&self.fps.to_string()));
            }

            if let Some(el) = document.get_element_by_id("round-over") {
                match self.game.phase {
                    Phase::Playing => {
                        let _ = el.set_attribute("class", "hidden");
                    }
                    phase => {
                        let _ = el.set_attribute("class", "");
                        if let Some(title) = document.get_element_by_id("round-title") {
                            let text = if phase == Phase::Cleared {
                                "Cleared!"
                            } else {
                                "Ball lost"
                            };
                            title.set_text_content(Some(text));
                        }
                        if let Some(score_el) = document.get_element_by_id("final-score") {
                            score_el.set_text_content(Some(&self.game.score().to_string()));
                        }
                    }
                }
            }
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Brick Breaker starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

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

        let tuning = Tuning::load();
        let arena = tuning.arena;
        let seed = js_sys::Date::now() as u64;
        let app = Rc::new(RefCell::new(App::new(tuning, seed)));

        log::info!("Game initialized with seed: {}", seed);

        // Initialize WebGPU
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .expect("Failed to create surface");

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .expect("Failed to get adapter");

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state = RenderState::new(surface, &adapter, width, height, arena).await;
        app.borrow_mut().render_state = Some(render_state);

        setup_input_handlers(app.clone());
        setup_restart_button(app.clone());

        if let Some(hud) = document.get_element_by_id("hud") {
            let _ = hud.set_attribute("class", "");
        }

        request_animation_frame(app);

        log::info!("Brick Breaker running!");
    }

    /// Apply a key press or release to the held key state
    fn apply_key(keys: &mut KeyState, key: &str, pressed: bool) {
        match key {
            "ArrowLeft" | "a" | "A" => keys.left = pressed,
            "ArrowRight" | "d" | "D" => keys.right = pressed,
            " " | "Enter" if pressed => keys.restart = true,
            _ => {}
        }
    }

    fn setup_input_handlers(app: Rc<RefCell<App>>) {
        let window = web_sys::window().expect("no window");

        // Key down
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if event.repeat() {
                    return;
                }
                let mut app = app.borrow_mut();
                let key = event.key();
                if key == "m" || key == "M" {
                    let muted = app.audio.toggle_mute();
                    log::info!("Audio {}", if muted { "muted" } else { "unmuted" });
                    return;
                }
                apply_key(&mut app.keys, key.as_str(), true);
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Key up
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                apply_key(&mut app.borrow_mut().keys, event.key().as_str(), false);
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Window blur: keyup never arrives for keys held while unfocused
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                app.borrow_mut().keys = KeyState::default();
                log::info!("Input released (window blur)");
            });
            let _ = window
                .add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_restart_button(app: Rc<RefCell<App>>) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };

        if let Some(btn) = document.get_element_by_id("restart-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                app.borrow_mut().keys.restart = true;
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(app, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(app: Rc<RefCell<App>>, time: f64) {
        {
            let mut a = app.borrow_mut();

            let dt = if a.last_time > 0.0 {
                ((time - a.last_time) / 1000.0) as f32
            } else {
                SIM_DT
            };
            a.last_time = time;

            a.update(dt, time);
            a.render();
            a.update_hud();
        }

        request_animation_frame(app);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use brick_breaker::{Game, Tuning};
    use std::path::Path;
    use std::time::{SystemTime, UNIX_EPOCH};

    env_logger::init();

    // Usage: brick-breaker [TUNING_JSON] [SECONDS]
    let mut args = std::env::args().skip(1);
    let tuning = match args.next() {
        Some(path) => Tuning::from_file(Path::new(&path)).unwrap_or_else(|e| {
            log::warn!("{e:#}; using default tuning");
            Tuning::default()
        }),
        None => Tuning::load(),
    };
    let seconds: f32 = args.next().and_then(|s| s.parse().ok()).unwrap_or(60.0);

    let now_ms = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or_default();
    let seed = now_ms as u64;

    log::info!("Brick Breaker (native) starting headless autopilot, seed {seed}");
    log::info!("Native mode has no window - run with `trunk serve` to play");

    let mut game = Game::new(tuning, seed);
    let frame_dt = 1.0 / 60.0;
    let frames = (seconds / frame_dt) as u32;

    let mut elapsed = 0.0;
    for _ in 0..frames {
        let keys = autopilot(&game);
        game.advance(keys, frame_dt);
        for event in game.drain_events() {
            log::debug!("{event:?}");
        }
        elapsed += frame_dt;
        if game.phase.is_over() {
            break;
        }
    }

    println!(
        "{:?} after {elapsed:.1}s: score {}, {} bricks destroyed, {} left",
        game.phase,
        game.score(),
        game.world.bricks_destroyed,
        game.world.bricks.len(),
    );
}

/// Follow the ball with the paddle, with a small dead zone
#[cfg(not(target_arch = "wasm32"))]
fn autopilot(game: &brick_breaker::Game) -> brick_breaker::sim::KeyState {
    const DEAD_ZONE: f32 = 4.0;

    let offset = game.world.ball.body.position.x - game.world.paddle.body.position.x;
    brick_breaker::sim::KeyState {
        left: offset < -DEAD_ZONE,
        right: offset > DEAD_ZONE,
        restart: false,
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
