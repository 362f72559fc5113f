//! Ocean Cleanup entry point
//!
//! Handles platform-specific initialization and wires the session to the page.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

    use ocean_cleanup::audio::{AudioManager, cue_for};
    use ocean_cleanup::consts::{FIELD_HEIGHT, FIELD_WIDTH};
    use ocean_cleanup::platform::web::BrowserScheduler;
    use ocean_cleanup::platform::{InputAction, LoopHandle, LoopKind, action_for_key};
    use ocean_cleanup::renderer::{CanvasRenderer, build_scene};
    use ocean_cleanup::ui::{self, DomStatus};
    use ocean_cleanup::{SessionController, Settings};

    const DURATION_PROMPT: &str =
        "Choose game duration:\nEnter \"30\" for 30 seconds\nEnter \"60\" for 60 seconds";

    /// Game instance holding all state
    struct Game {
        controller: SessionController<BrowserScheduler>,
        renderer: CanvasRenderer,
        audio: AudioManager,
        status: DomStatus,
        settings: Settings,
    }

    impl Game {
        /// A scheduled loop fired
        fn on_loop(&mut self, handle: LoopHandle) {
            if self.controller.on_loop(handle) && handle.kind == LoopKind::Frame {
                self.render();
            }
            self.flush_events();
        }

        /// Render the current frame
        fn render(&self) {
            let scene = build_scene(self.controller.state(), self.renderer.sprites_ready());
            self.renderer.draw(&scene);
        }

        /// Push session events out to the HUD and audio
        fn flush_events(&mut self) {
            for event in self.controller.drain_events() {
                ui::apply_event(&mut self.status, &event);
                if let Some(cue) = cue_for(&event) {
                    self.audio.play(cue);
                }
            }
        }

        /// Ask for a duration and start a session
        fn prompt_start(&mut self, window: &web_sys::Window) {
            let default = self.settings.last_duration.to_string();
            let answer = window
                .prompt_with_message_and_default(DURATION_PROMPT, &default)
                .ok()
                .flatten();

            match self.controller.start_from_prompt(answer.as_deref()) {
                Ok(()) => {
                    self.settings.last_duration = self.controller.state().time_remaining;
                    self.settings.save();
                    self.audio.resume();
                    self.flush_events();
                    self.render();
                }
                Err(e) => {
                    log::info!("Start rejected: {:?}", e);
                    let _ = window.alert_with_message(&e.to_string());
                }
            }
        }

        fn handle_key(&mut self, event: &web_sys::KeyboardEvent) {
            let Some(action) = action_for_key(&event.key()) else {
                return;
            };
            match action {
                InputAction::Move(dir) => self.controller.set_direction(dir),
                InputAction::Collect => {
                    event.prevent_default();
                    self.controller.collect();
                }
                InputAction::ToggleAutopilot => {
                    let enabled = !self.controller.autopilot();
                    if !self.controller.set_autopilot(enabled) {
                        log::info!("Demo mode can only be switched between sessions");
                    }
                }
            }
            self.flush_events();
        }
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        log::info!("Ocean Cleanup starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("game")
            .ok_or("no canvas")?
            .dyn_into()?;
        canvas.set_width(FIELD_WIDTH as u32);
        canvas.set_height(FIELD_HEIGHT as u32);
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or("no 2d context")?
            .dyn_into()?;

        let settings = Settings::load();
        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game {
            controller: SessionController::new(seed, BrowserScheduler::new()),
            renderer: CanvasRenderer::new(ctx),
            audio: AudioManager::new(&settings),
            status: DomStatus::new(document.clone()),
            settings,
        }));
        log::info!("Game initialized with seed: {}", seed);

        // Loop firings come back through a weak handle so the scheduler
        // does not keep the game alive by itself
        {
            let weak = Rc::downgrade(&game);
            game.borrow()
                .controller
                .scheduler()
                .set_dispatch(move |handle| {
                    if let Some(game) = weak.upgrade() {
                        match game.try_borrow_mut() {
                            Ok(mut g) => g.on_loop(handle),
                            Err(_) => log::warn!("Loop {:?} fired during another handler", handle),
                        }
                    }
                });
        }

        setup_buttons(&document, game.clone());
        setup_keyboard(&window, game.clone());
        setup_focus_muting(&window, game.clone());
        setup_first_draw(game.clone());

        game.borrow().render();
        log::info!("Ocean Cleanup ready!");
        Ok(())
    }

    fn setup_buttons(document: &web_sys::Document, game: Rc<RefCell<Game>>) {
        if let Some(btn) = document.get_element_by_id("start") {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                let Some(window) = web_sys::window() else { return };
                game.borrow_mut().prompt_start(&window);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        if let Some(btn) = document.get_element_by_id("collect") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                let mut g = game.borrow_mut();
                g.controller.collect();
                g.flush_events();
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_keyboard(window: &web_sys::Window, game: Rc<RefCell<Game>>) {
        let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
            game.borrow_mut().handle_key(&event);
        });
        let _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_focus_muting(window: &web_sys::Window, game: Rc<RefCell<Game>>) {
        // Window blur (click outside, tab switch)
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                let mut g = game.borrow_mut();
                if g.settings.mute_on_blur {
                    g.audio.set_muted(true);
                }
            });
            let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                let mut g = game.borrow_mut();
                let muted = g.settings.muted;
                g.audio.set_muted(muted);
            });
            let _ = window.add_event_listener_with_callback("focus", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    /// Draw once the sprite images arrive, so the idle screen shows the diver
    fn setup_first_draw(game: Rc<RefCell<Game>>) {
        let weak = Rc::downgrade(&game);
        let closure = Closure::<dyn FnMut()>::new(move || {
            if let Some(game) = weak.upgrade() {
                if let Ok(g) = game.try_borrow() {
                    g.render();
                }
            }
        });
        game.borrow()
            .renderer
            .on_sprites_loaded(closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run()
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use ocean_cleanup::SessionController;
    use ocean_cleanup::platform::{LoopKind, ManualScheduler};
    use ocean_cleanup::session::GameEvent;

    /// Display frames per timer second in the headless run
    const FRAMES_PER_SECOND: usize = 60;

    env_logger::init();
    log::info!("Ocean Cleanup (native) starting...");
    log::info!("Native mode runs a headless autopilot session - use `trunk serve` for the web version");

    let seed = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);

    let mut controller = SessionController::new(seed, ManualScheduler::new());
    controller.set_autopilot(true);
    if let Err(e) = controller.start(30) {
        log::error!("{}", e);
        return;
    }

    while controller.is_active() {
        for _ in 0..FRAMES_PER_SECOND {
            controller.fire(LoopKind::Frame);
        }
        controller.fire(LoopKind::Timer);
    }

    for event in controller.drain_events() {
        if let GameEvent::Ended { final_score } = event {
            log::info!("Headless session finished with score {}", final_score);
            println!("Autopilot collected {} pieces in 30s (seed {})", final_score, seed);
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
