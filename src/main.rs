//! Flap Dash entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;
    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::*;
    use web_sys::HtmlCanvasElement;

    use flap_dash::audio::{AudioManager, SoundEffect};
    use flap_dash::config::GameConfig;
    use flap_dash::consts::BLINK_INTERVAL_MS;
    use flap_dash::highscores::HighScore;
    use flap_dash::platform::LocalStorage;
    use flap_dash::renderer::{CanvasRenderer, Renderer};
    use flap_dash::sim::{GameEvent, GamePhase, GameState, TickInput, tick};

    /// Game instance holding all state
    pub struct Game {
        state: GameState,
        config: GameConfig,
        high: HighScore,
        storage: LocalStorage,
        renderer: CanvasRenderer,
        audio: AudioManager,
        input: TickInput,
    }

    impl Game {
        /// One scheduled frame: draw the current snapshot, then advance.
        /// Drawing first means the frame a collision lands on still shows.
        fn frame(&mut self) {
            self.renderer.draw_frame(&self.state, &self.config);

            let input = self.input;
            self.input = TickInput::default();
            tick(&mut self.state, &input, &self.config);

            for event in self.state.drain_events() {
                match event {
                    GameEvent::RoundStarted => {}
                    GameEvent::Flapped => self.audio.play(SoundEffect::Flap),
                    GameEvent::Scored => self.audio.play(SoundEffect::Score),
                    GameEvent::RoundEnded { score } => self.round_ended(score),
                }
            }

            self.update_screens();
        }

        fn round_ended(&mut self, score: u32) {
            if self.high.record(score) {
                self.high.save(&self.storage);
                self.audio.play(SoundEffect::HighScore);
                log::info!("New high score: {score}");
            } else {
                self.audio.play(SoundEffect::GameOver);
            }
        }

        /// Toggle the DOM overlay screens to match the phase
        fn update_screens(&self) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };

            let set_hidden = |id: &str, hidden: bool| {
                if let Some(el) = document.get_element_by_id(id) {
                    let _ = el.set_attribute("class", if hidden { "screen hidden" } else { "screen" });
                }
            };

            set_hidden("start-screen", self.state.phase != GamePhase::Menu);
            set_hidden("game-over-screen", self.state.phase != GamePhase::GameOver);

            if let Some(el) = document.get_element_by_id("menu-high-score") {
                el.set_text_content(Some(&self.high.best.to_string()));
            }
            if self.state.phase == GamePhase::GameOver {
                if let Some(el) = document.get_element_by_id("final-score") {
                    el.set_text_content(Some(&self.state.score.to_string()));
                }
                if let Some(el) = document.get_element_by_id("final-high-score") {
                    el.set_text_content(Some(&self.high.best.to_string()));
                }
            }
        }
    }

    fn setup_input(game: Rc<RefCell<Game>>, canvas: &HtmlCanvasElement) {
        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        // Tap: click, touch, or Space
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                let mut g = game.borrow_mut();
                g.audio.resume();
                g.input.tap = true;
            });
            let _ = canvas.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::TouchEvent| {
                event.prevent_default();
                let mut g = game.borrow_mut();
                g.audio.resume();
                g.input.tap = true;
            });
            let _ =
                canvas.add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                if event.code() == "Space" {
                    event.prevent_default();
                    game.borrow_mut().input.tap = true;
                }
            });
            let _ =
                window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Menu-level buttons
        let buttons: [(&str, fn(&mut TickInput)); 3] = [
            ("start-button", |i| i.start = true),
            ("retry-button", |i| i.retry = true),
            ("close-button", |i| i.close = true),
        ];
        for (id, set) in buttons {
            if let Some(btn) = document.get_element_by_id(id) {
                let game = game.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                    let mut g = game.borrow_mut();
                    g.audio.resume();
                    set(&mut g.input);
                });
                let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
                closure.forget();
            } else {
                log::warn!("Missing #{id} element");
            }
        }
    }

    /// Blink the "Press to Play!" prompt on a fixed interval, independent of
    /// the frame loop; the renderer only reads the flag
    fn setup_blink_timer(blink: Rc<Cell<bool>>) {
        let window = web_sys::window().expect("no window");
        let closure = Closure::<dyn FnMut()>::new(move || {
            blink.set(!blink.get());
        });
        let _ = window.set_interval_with_callback_and_timeout_and_arguments_0(
            closure.as_ref().unchecked_ref(),
            BLINK_INTERVAL_MS,
        );
        closure.forget();
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Flap Dash starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let storage = LocalStorage::new();
        let config = GameConfig::load(&storage);
        let high = HighScore::load(&storage);

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");
        canvas.set_width(config.canvas_width as u32);
        canvas.set_height(config.canvas_height as u32);

        let blink = Rc::new(Cell::new(true));
        setup_blink_timer(blink.clone());

        let renderer =
            CanvasRenderer::new(&canvas, blink).expect("Failed to create canvas renderer");

        let seed = js_sys::Date::now() as u64;
        let state = GameState::new(&config, seed).expect("invalid game config");
        log::info!("New session with seed: {seed}");

        let game = Rc::new(RefCell::new(Game {
            state,
            config,
            high,
            storage,
            renderer,
            audio: AudioManager::new(),
            input: TickInput::default(),
        }));

        setup_input(game.clone(), &canvas);

        // Self-rescheduling animation frame loop
        let f: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
        let g = f.clone();
        *g.borrow_mut() = Some(Closure::new(move || {
            game.borrow_mut().frame();
            request_animation_frame(f.borrow().as_ref().unwrap());
        }));
        request_animation_frame(g.borrow().as_ref().unwrap());
    }

    fn request_animation_frame(closure: &Closure<dyn FnMut()>) {
        web_sys::window()
            .expect("no window")
            .request_animation_frame(closure.as_ref().unchecked_ref())
            .expect("requestAnimationFrame failed");
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Flap Dash (native) starting...");

    run_headless_demo();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Scripted headless round: a simple pilot aims the bird at the next gap.
/// Exercises the whole loop - spawning, scoring, game over, persistence -
/// without a rendering surface.
#[cfg(not(target_arch = "wasm32"))]
fn run_headless_demo() {
    use flap_dash::config::GameConfig;
    use flap_dash::highscores::HighScore;
    use flap_dash::platform::MemoryStorage;
    use flap_dash::renderer::{NullRenderer, Renderer};
    use flap_dash::sim::{GameEvent, GamePhase, GameState, TickInput, tick};

    let storage = MemoryStorage::new();
    let config = GameConfig::default();
    let mut high = HighScore::load(&storage);
    let mut state = GameState::new(&config, 0xF1AB).expect("default config is valid");
    let mut renderer = NullRenderer;

    tick(
        &mut state,
        &TickInput {
            start: true,
            ..Default::default()
        },
        &config,
    );
    tick(&mut state, &TickInput::tap(), &config);

    let mut ticks = 0u32;
    while state.phase == GamePhase::Playing && ticks < 20_000 {
        renderer.draw_frame(&state, &config);

        // Aim for the center of the next gap ahead, or the start altitude
        let target_y = state
            .obstacles
            .iter()
            .find(|o| !o.passed)
            .map(|o| o.gap_top + config.gap_px() / 2.0)
            .unwrap_or(config.bird_start_y + config.bird_height / 2.0);

        let input = if state.bird.velocity >= 0.0 && state.bird.center().y > target_y {
            TickInput::tap()
        } else {
            TickInput::default()
        };
        tick(&mut state, &input, &config);
        ticks += 1;

        for event in state.drain_events() {
            match event {
                GameEvent::Scored => log::info!("Passed an obstacle (score {})", state.score),
                GameEvent::RoundEnded { score } => {
                    log::info!("Round over after {ticks} ticks with score {score}");
                    if high.record(score) {
                        high.save(&storage);
                        log::info!("New high score saved: {}", high.best);
                    }
                }
                _ => {}
            }
        }
    }

    let reloaded = HighScore::load(&storage);
    log::info!(
        "Demo finished: score {}, best this session {}",
        state.score,
        reloaded.best
    );
}
