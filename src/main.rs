//! Asteroid Field entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Event, EventTarget, HtmlCanvasElement, KeyboardEvent};

    use asteroid_field::consts::*;
    use asteroid_field::input::{Control, InputState, control_for_key};
    use asteroid_field::render::canvas::CanvasSurface;
    use asteroid_field::render::{Surface, draw_frame};
    use asteroid_field::settings::{Settings, toggle_for_key};
    use asteroid_field::sim::{GameEvent, GameState, tick};
    use glam::Vec2;

    /// On-screen touch buttons (optional; attached when the host page has
    /// elements with these ids)
    const TOUCH_BUTTONS: [(&str, Control); 4] = [
        ("btn-left", Control::TurnLeft),
        ("btn-right", Control::TurnRight),
        ("btn-thrust", Control::Thrust),
        ("btn-fire", Control::Fire),
    ];

    /// Game instance holding all state
    struct Game {
        state: GameState,
        surface: CanvasSurface,
        input: InputState,
        settings: Settings,
        accumulator: f32,
        last_time: f64,
        // FPS tracking
        frame_times: [f64; 60],
        frame_index: usize,
        fps: u32,
        /// Cleared on teardown; the frame loop stops rescheduling
        active: bool,
    }

    impl Game {
        fn new(seed: u64, surface: CanvasSurface, settings: Settings) -> Self {
            let bounds = surface.size();
            Self {
                state: GameState::new(seed, bounds),
                surface,
                input: InputState::default(),
                settings,
                accumulator: 0.0,
                last_time: 0.0,
                frame_times: [0.0; 60],
                frame_index: 0,
                fps: 0,
                active: true,
            }
        }

        /// Run simulation ticks at the fixed timestep
        fn update(&mut self, dt: f32, time: f64) {
            let dt = dt.min(0.1);
            self.accumulator += dt;

            let mut substeps = 0;
            while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
                // sample() consumes the one-shot fire/start events
                let input = self.input.sample();
                tick(&mut self.state, &input, SIM_DT);
                self.dispatch_effects();
                self.accumulator -= SIM_DT;
                substeps += 1;
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
        }

        /// Forward this tick's simulation events to host-side effects.
        /// Audio hooks attach here rather than inside the simulation.
        fn dispatch_effects(&self) {
            for event in &self.state.events {
                match event {
                    GameEvent::GameOver { score } => log::info!("game over, score {score}"),
                    GameEvent::WaveSpawned { count } => log::debug!("wave of {count} spawned"),
                    GameEvent::ShipHit { lives_left } => log::debug!("ship hit, {lives_left} lives left"),
                    GameEvent::AsteroidDestroyed { .. } | GameEvent::ProjectileFired => {}
                }
            }
        }

        /// Render the current frame
        fn render(&mut self) {
            let fps = if self.settings.show_fps { Some(self.fps) } else { None };
            draw_frame(&self.state, &mut self.surface, &self.settings, fps);
        }

        /// Viewport resize: the wrap bounds follow the canvas
        fn resize(&mut self, width: f32, height: f32) {
            self.surface.set_size(width, height);
            self.state.set_bounds(Vec2::new(width, height));
        }

        /// Teardown: stop the frame loop and release held controls
        fn shutdown(&mut self) {
            self.active = false;
            self.input.clear();
            log::info!("game loop stopped");
        }
    }

    /// Registered event listeners, kept so teardown can detach them
    #[derive(Default)]
    struct Listeners {
        entries: Vec<(EventTarget, &'static str, Closure<dyn FnMut(Event)>)>,
    }

    impl Listeners {
        fn add(
            &mut self,
            target: &EventTarget,
            event: &'static str,
            closure: Closure<dyn FnMut(Event)>,
        ) {
            let _ =
                target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
            self.entries.push((target.clone(), event, closure));
        }

        /// Detach everything and drop the closures
        fn remove_all(&mut self) {
            for (target, event, closure) in self.entries.drain(..) {
                let _ = target
                    .remove_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
            }
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Asteroid Field starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        let width = canvas.client_width().max(1) as u32;
        let height = canvas.client_height().max(1) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        let ctx = canvas
            .get_context("2d")
            .expect("context lookup failed")
            .expect("no 2d context")
            .dyn_into::<web_sys::CanvasRenderingContext2d>()
            .expect("not a 2d context");
        let surface = CanvasSurface::new(ctx, width as f32, height as f32);

        let seed = js_sys::Date::now() as u64;
        let settings = Settings::load();
        let game = Rc::new(RefCell::new(Game::new(seed, surface, settings)));
        let listeners = Rc::new(RefCell::new(Listeners::default()));

        log::info!("Game initialized with seed: {seed}");

        {
            let mut listeners = listeners.borrow_mut();
            setup_resize_handler(&canvas, game.clone(), &mut listeners);
            setup_keyboard_handlers(game.clone(), &mut listeners);
            setup_touch_handlers(&document, &canvas, game.clone(), &mut listeners);
        }
        setup_teardown_handler(game.clone(), listeners);

        request_animation_frame(game);

        log::info!("Asteroid Field running!");
    }

    fn setup_resize_handler(
        canvas: &HtmlCanvasElement,
        game: Rc<RefCell<Game>>,
        listeners: &mut Listeners,
    ) {
        let window = web_sys::window().unwrap();
        let canvas = canvas.clone();
        let closure = Closure::<dyn FnMut(Event)>::new(move |_: Event| {
            let width = canvas.client_width().max(1) as u32;
            let height = canvas.client_height().max(1) as u32;
            canvas.set_width(width);
            canvas.set_height(height);
            game.borrow_mut().resize(width as f32, height as f32);
        });
        listeners.add(window.as_ref(), "resize", closure);
    }

    fn setup_keyboard_handlers(game: Rc<RefCell<Game>>, listeners: &mut Listeners) {
        let window = web_sys::window().unwrap();

        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
                let Ok(event) = event.dyn_into::<KeyboardEvent>() else {
                    return;
                };
                let key = event.key();
                if let Some(toggle) = toggle_for_key(&key) {
                    let mut game = game.borrow_mut();
                    game.settings.toggle(toggle);
                    game.settings.save();
                    return;
                }
                if control_for_key(&key).is_some() {
                    // keep space/arrows from scrolling the page
                    event.prevent_default();
                    if !event.repeat() {
                        game.borrow_mut().input.key_down(&key);
                    }
                }
            });
            listeners.add(window.as_ref(), "keydown", closure);
        }

        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
                if let Ok(event) = event.dyn_into::<KeyboardEvent>() {
                    game.borrow_mut().input.key_up(&event.key());
                }
            });
            listeners.add(window.as_ref(), "keyup", closure);
        }

        // Held keys stick without the keyup if focus leaves mid-press
        {
            let closure = Closure::<dyn FnMut(Event)>::new(move |_: Event| {
                game.borrow_mut().input.clear();
            });
            listeners.add(window.as_ref(), "blur", closure);
        }
    }

    /// Attach the on-screen touch controls, when the page provides them,
    /// driving the same logical controls as the keyboard. Tapping the canvas
    /// starts or restarts a run (ignored while one is in progress).
    fn setup_touch_handlers(
        document: &web_sys::Document,
        canvas: &HtmlCanvasElement,
        game: Rc<RefCell<Game>>,
        listeners: &mut Listeners,
    ) {
        for (id, control) in TOUCH_BUTTONS {
            let Some(button) = document.get_element_by_id(id) else {
                continue;
            };
            {
                let game = game.clone();
                let closure = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
                    event.prevent_default();
                    game.borrow_mut().input.press(control);
                });
                listeners.add(button.as_ref(), "pointerdown", closure);
            }
            for release_event in ["pointerup", "pointercancel", "pointerleave"] {
                let game = game.clone();
                let closure = Closure::<dyn FnMut(Event)>::new(move |_: Event| {
                    game.borrow_mut().input.release(control);
                });
                listeners.add(button.as_ref(), release_event, closure);
            }
        }

        let closure = Closure::<dyn FnMut(Event)>::new(move |_: Event| {
            game.borrow_mut().input.press(Control::Start);
        });
        listeners.add(canvas.as_ref(), "pointerdown", closure);
    }

    /// The pagehide closure itself is leaked: it cannot drop itself while
    /// executing, and the page is going away anyway.
    fn setup_teardown_handler(game: Rc<RefCell<Game>>, listeners: Rc<RefCell<Listeners>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::<dyn FnMut()>::new(move || {
            listeners.borrow_mut().remove_all();
            game.borrow_mut().shutdown();
        });
        let _ =
            window.add_event_listener_with_callback("pagehide", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();
            if !g.active {
                return;
            }

            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                SIM_DT
            };
            g.last_time = time;

            g.update(dt, time);
            g.render();
        }

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
    use asteroid_field::consts::SIM_DT;
    use asteroid_field::sim::{GamePhase, GameState, TickInput, tick};
    use glam::Vec2;
    use std::time::{SystemTime, UNIX_EPOCH};

    env_logger::init();

    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    let mut state = GameState::new(seed, Vec2::new(800.0, 600.0));
    log::info!("Asteroid Field headless demo (seed {seed})");

    // Scripted run: sweep the heading, thrust in bursts, fire steadily
    let start = TickInput { start: true, ..Default::default() };
    tick(&mut state, &start, SIM_DT);

    let mut frames = 0u32;
    while state.phase == GamePhase::Running && frames < 60 * 120 {
        let input = TickInput {
            turn_right: frames % 120 < 45,
            thrust: frames % 90 < 30,
            fire: frames % 15 == 0,
            ..Default::default()
        };
        tick(&mut state, &input, SIM_DT);
        frames += 1;
    }

    println!(
        "demo finished after {frames} frames: score {}, {} lives left, {:?}",
        state.score, state.lives, state.phase
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
