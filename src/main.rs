//! Star Strafe entry point
//!
//! Handles platform-specific initialization and runs the frame loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{
        CanvasRenderingContext2d, Element, HtmlCanvasElement, KeyboardEvent,
    };

    use star_strafe::assets::AssetStore;
    use star_strafe::audio::{AudioSink, SoundEffect};
    use star_strafe::input::{key_to_button, Button, InputState};
    use star_strafe::platform;
    use star_strafe::renderer::{build_scene, CanvasPainter};
    use star_strafe::settings::{PerfProfile, Settings};
    use star_strafe::sim::{tick, GameEvent, GameState};

    /// Game instance holding all state
    struct Game {
        state: GameState,
        input: InputState,
        painter: CanvasPainter,
        assets: AssetStore,
        audio: AudioSink,
        profile: PerfProfile,
        last_frame_ms: f64,
        radio_indicator: Option<Element>,
    }

    impl Game {
        /// One animation frame: maybe simulate, always eligible to draw.
        fn frame(&mut self, now_ms: f64) {
            // Reduced-capability throttle: early frames are dropped
            // whole; the loop reschedules regardless.
            if self.profile.throttled()
                && now_ms - self.last_frame_ms < self.profile.frame_interval_ms()
            {
                return;
            }
            self.last_frame_ms = now_ms;

            // The tick itself skips simulation outside Playing, so the
            // menu and game-over screens stay static but keep drawing.
            tick(&mut self.state, &self.input, now_ms);
            self.input.clear_edges();

            for event in self.state.take_events() {
                match event {
                    GameEvent::EnemySplatted => self.audio.play(SoundEffect::Splat),
                    GameEvent::UltimateFired => self.audio.play(SoundEffect::Ultimate),
                    GameEvent::PlayerDestroyed => {}
                }
            }

            let cmds = build_scene(&self.state, self.assets.sprite_status());
            self.assets
                .with_images(|images| self.painter.paint(&cmds, images));

            if let Some(el) = &self.radio_indicator {
                let _ = el
                    .class_list()
                    .toggle_with_force("active", self.audio.radio_playing());
            }
        }

        /// Track the hosting container's size; the sim recomputes its
        /// bounds from whatever the surface currently is.
        fn resize_to(&mut self, canvas: &HtmlCanvasElement) {
            let (w, h) = match canvas.parent_element() {
                Some(parent) => (parent.client_width(), parent.client_height()),
                None => (canvas.client_width(), canvas.client_height()),
            };
            if w > 0 && h > 0 {
                canvas.set_width(w as u32);
                canvas.set_height(h as u32);
            }
            self.state.set_bounds(w.max(0) as f32, h.max(0) as f32);
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("failed to init logger");

        log::info!("Star Strafe starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("game-canvas")
            .expect("no game canvas")
            .dyn_into()
            .expect("not a canvas");
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .expect("no 2d context")
            .dyn_into()
            .expect("not a 2d context");

        let settings = Settings::load();
        let profile = settings.effective_profile(platform::is_mobile());
        log::info!("Capability profile: {}", profile.as_str());

        let assets = AssetStore::new();
        assets.begin_loading();
        let audio = AudioSink::new(assets.clone(), &settings);

        let seed = js_sys::Date::now() as u64;
        let mut state = GameState::new(seed);
        state.spawn = profile.spawn_tuning();
        log::info!("Game initialized with seed: {seed}");

        let game = Rc::new(RefCell::new(Game {
            state,
            input: InputState::new(),
            painter: CanvasPainter::new(ctx),
            assets,
            audio,
            profile,
            last_frame_ms: f64::NEG_INFINITY,
            radio_indicator: document.get_element_by_id("radio-indicator"),
        }));

        game.borrow_mut().resize_to(&canvas);

        setup_resize_handler(&canvas, game.clone());
        setup_keyboard(game.clone());
        setup_pad_buttons(&document, game.clone());
        setup_radio_control(&document, game.clone());

        request_animation_frame(game);

        log::info!("Star Strafe running!");
    }

    fn setup_resize_handler(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        let window = web_sys::window().expect("no window");
        let canvas = canvas.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            game.borrow_mut().resize_to(&canvas);
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_keyboard(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().expect("no window");

        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                // Any keystroke counts as the unlocking user gesture.
                g.audio.unlock();
                if let Some(button) = key_to_button(&event.code()) {
                    g.input.press(button);
                } else if event.code() == "KeyR" {
                    // Radio side channel, independent of game state
                    g.audio.play_radio();
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if let Some(button) = key_to_button(&event.code()) {
                    game.borrow_mut().input.release(button);
                }
            });
            let _ =
                window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    /// Wire the on-screen `button[data-button]` pad, mouse and touch.
    fn setup_pad_buttons(document: &web_sys::Document, game: Rc<RefCell<Game>>) {
        let Ok(buttons) = document.query_selector_all("button[data-button]") else {
            return;
        };

        // (event, is_press, needs preventDefault)
        const PAD_EVENTS: [(&str, bool, bool); 6] = [
            ("mousedown", true, false),
            ("mouseup", false, false),
            ("mouseleave", false, false),
            ("touchstart", true, true),
            ("touchend", false, true),
            ("touchcancel", false, true),
        ];

        for i in 0..buttons.length() {
            let Some(node) = buttons.item(i) else { continue };
            let Ok(el) = node.dyn_into::<Element>() else { continue };
            let Some(name) = el.get_attribute("data-button") else {
                continue;
            };
            let Some(button) = Button::from_pad_name(&name) else {
                log::warn!("Unknown pad button: {name}");
                continue;
            };

            for (event_name, is_press, prevent) in PAD_EVENTS {
                let game = game.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::Event| {
                    if prevent {
                        event.prevent_default();
                    }
                    let mut g = game.borrow_mut();
                    g.audio.unlock();
                    if is_press {
                        g.input.press(button);
                    } else {
                        g.input.release(button);
                    }
                });
                let _ =
                    el.add_event_listener_with_callback(event_name, closure.as_ref().unchecked_ref());
                closure.forget();
            }
        }
    }

    fn setup_radio_control(document: &web_sys::Document, game: Rc<RefCell<Game>>) {
        let Some(radio) = document.get_element_by_id("radio") else {
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            game.borrow_mut().audio.play_radio();
        });
        let _ = radio.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().expect("no window");
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        game.borrow_mut().frame(time);
        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use star_strafe::input::{Button, InputState};
    use star_strafe::sim::{tick, GameEvent, GamePhase, GameState};

    env_logger::init();
    log::info!("Star Strafe (native) starting...");

    // Headless demo: the whole core runs without a browser. Scripted
    // input against a synthetic 60 Hz clock.
    let mut state = GameState::new(0x5EED);
    state.set_bounds(480.0, 320.0);
    let mut input = InputState::new();
    input.press(Button::Start);

    let mut kills = 0u32;
    let mut last_frame = 0u32;
    for frame in 0..3600u32 {
        last_frame = frame;
        let now_ms = f64::from(frame) * (1000.0 / 60.0);
        if frame == 1 {
            input.press(Button::Fire);
        }
        // Weave between rows so the shots meet traffic
        match frame % 240 {
            0 => {
                input.release(Button::Down);
                input.press(Button::Up);
            }
            120 => {
                input.release(Button::Up);
                input.press(Button::Down);
            }
            _ => {}
        }

        tick(&mut state, &input, now_ms);
        input.clear_edges();
        kills += state
            .take_events()
            .iter()
            .filter(|e| matches!(e, GameEvent::EnemySplatted))
            .count() as u32;

        if state.phase == GamePhase::GameOver {
            log::info!("Run ended on frame {frame}");
            break;
        }
    }

    println!(
        "Demo run: {} frames, score {}, {} kills, final phase {:?}",
        last_frame + 1,
        state.score,
        kills,
        state.phase
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
