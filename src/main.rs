//! Streak Hoops entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, HtmlElement, MouseEvent, Touch, TouchEvent};

    use glam::Vec2;
    use streak_hoops::Settings;
    use streak_hoops::input::DragTracker;
    use streak_hoops::renderer::{RenderState, build_scene};
    use streak_hoops::sim::{FrameInput, GameEvent, GameState, Launch, tick};

    /// Message banner auto-hide delay (ms)
    const MESSAGE_HIDE_MS: i32 = 1500;
    /// Shake class removal delay (ms)
    const SHAKE_MS: i32 = 200;

    /// Game instance holding all state
    struct Game {
        state: GameState,
        render_state: Option<RenderState>,
        drag: DragTracker,
        settings: Settings,
        /// Release captured by the input handlers, consumed next frame
        pending_launch: Option<Launch>,
    }

    impl Game {
        fn new(width: f32, height: f32, seed: u64) -> Self {
            Self {
                state: GameState::new(width, height, seed),
                render_state: None,
                drag: DragTracker::new(),
                settings: Settings::default(),
                pending_launch: None,
            }
        }

        /// Run one simulation frame and hand back the events it raised.
        fn frame(&mut self) -> Vec<GameEvent> {
            let input = FrameInput {
                launch: self.pending_launch.take(),
            };
            tick(&mut self.state, &input);
            self.state.take_events()
        }

        /// Render the current frame
        fn render(&mut self) {
            if let Some(ref mut render_state) = self.render_state {
                let vertices = build_scene(&self.state, self.settings.particles);
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
    }

    /// Fire-and-forget timer; a later identical timer simply wins.
    fn set_timeout<F: FnOnce() + 'static>(ms: i32, f: F) {
        let closure = Closure::once(f);
        let window = web_sys::window().unwrap();
        let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(
            closure.as_ref().unchecked_ref(),
            ms,
        );
        closure.forget();
    }

    /// Mouse position in canvas space
    fn mouse_pos(event: &MouseEvent) -> Vec2 {
        Vec2::new(event.offset_x() as f32, event.offset_y() as f32)
    }

    /// Touch position in canvas space
    fn touch_pos(canvas: &HtmlCanvasElement, touch: &Touch) -> Vec2 {
        let rect = canvas.get_bounding_client_rect();
        Vec2::new(
            touch.client_x() as f32 - rect.left() as f32,
            touch.client_y() as f32 - rect.top() as f32,
        )
    }

    /// Update HUD text elements in the DOM
    fn update_hud(document: &Document, state: &GameState) {
        if let Some(el) = document.get_element_by_id("current-streak") {
            el.set_text_content(Some(&state.scoreboard.streak.to_string()));
        }
        if let Some(el) = document.get_element_by_id("high-score") {
            el.set_text_content(Some(&state.scoreboard.high_score.to_string()));
        }
    }

    /// Show the transient banner; it hides itself after a fixed delay.
    fn show_message(document: &Document, text: &str) {
        if let Some(el) = document.get_element_by_id("message") {
            el.set_text_content(Some(text));
        }
        let container = document
            .query_selector(".message-container")
            .ok()
            .flatten()
            .and_then(|el| el.dyn_into::<HtmlElement>().ok());
        if let Some(container) = container {
            let _ = container.style().set_property("display", "block");
            set_timeout(MESSAGE_HIDE_MS, move || {
                let _ = container.style().set_property("display", "none");
            });
        }
    }

    /// Pulse the shake class on the page container.
    fn trigger_shake(document: &Document) {
        if let Some(container) = document.query_selector(".game-container").ok().flatten() {
            let _ = container.class_list().add_1("shake");
            set_timeout(SHAKE_MS, move || {
                let _ = container.class_list().remove_1("shake");
            });
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Streak Hoops starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        // Size the drawing surface to its container
        let dpr = window.device_pixel_ratio();
        let client_w = canvas.client_width();
        let client_h = canvas.client_height();
        let width = (client_w as f64 * dpr) as u32;
        let height = (client_h as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(
            client_w as f32,
            client_h as f32,
            seed,
        )));

        log::info!("Game initialized with seed: {}", seed);

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

        let render_state = RenderState::new(
            surface,
            &adapter,
            width,
            height,
            client_w as f32,
            client_h as f32,
        )
        .await;
        game.borrow_mut().render_state = Some(render_state);

        setup_input_handlers(&canvas, game.clone());
        setup_resize_handler(canvas.clone(), game.clone());

        update_hud(&document, &game.borrow().state);

        request_animation_frame(game);

        log::info!("Streak Hoops running!");
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        // Mouse down - drag starts while the ball rests
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let mut g = game.borrow_mut();
                let moving = g.state.ball.moving;
                g.drag.press(mouse_pos(&event), moving);
            });
            let _ = canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Mouse move - charge spin
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let mut g = game.borrow_mut();
                let moving = g.state.ball.moving;
                g.drag.movement(mouse_pos(&event), moving);
            });
            let _ = canvas
                .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Mouse up - slingshot release
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let mut g = game.borrow_mut();
                let moving = g.state.ball.moving;
                if let Some(launch) = g.drag.release(mouse_pos(&event), moving) {
                    g.pending_launch = Some(launch);
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("mouseup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch start (suppress scrolling/zoom on the play surface)
        {
            let game = game.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some(touch) = event.touches().get(0) {
                    let mut g = game.borrow_mut();
                    let moving = g.state.ball.moving;
                    g.drag.press(touch_pos(&canvas_clone, &touch), moving);
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch move
        {
            let game = game.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some(touch) = event.touches().get(0) {
                    let mut g = game.borrow_mut();
                    let moving = g.state.ball.moving;
                    g.drag.movement(touch_pos(&canvas_clone, &touch), moving);
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("touchmove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch end - the finger is gone from `touches`, use changed_touches
        {
            let game = game.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some(touch) = event.changed_touches().get(0) {
                    let mut g = game.borrow_mut();
                    let moving = g.state.ball.moving;
                    if let Some(launch) = g.drag.release(touch_pos(&canvas_clone, &touch), moving) {
                        g.pending_launch = Some(launch);
                    }
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("touchend", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    /// The surface and sim bounds adopt the new size; nothing already in
    /// play is rescaled or re-centered.
    fn setup_resize_handler(canvas: HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let window = web_sys::window().unwrap();
            let dpr = window.device_pixel_ratio();
            let client_w = canvas.client_width();
            let client_h = canvas.client_height();
            let width = (client_w as f64 * dpr) as u32;
            let height = (client_h as f64 * dpr) as u32;
            canvas.set_width(width);
            canvas.set_height(height);

            let mut g = game.borrow_mut();
            g.state.set_bounds(client_w as f32, client_h as f32);
            if let Some(ref mut render_state) = g.render_state {
                render_state.resize(width, height);
                render_state.set_logical_size(client_w as f32, client_h as f32);
            }
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
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

    fn game_loop(game: Rc<RefCell<Game>>, _time: f64) {
        {
            let document = web_sys::window().unwrap().document().unwrap();
            let mut g = game.borrow_mut();

            let events = g.frame();
            for event in events {
                match event {
                    GameEvent::Scored { streak } => {
                        show_message(&document, &format!("NICE! {} STREAK!", streak));
                        if g.settings.effective_screen_shake() {
                            trigger_shake(&document);
                        }
                        if streak % 10 == 0 {
                            log::info!("streak milestone: {}", streak);
                            if let Ok(json) = serde_json::to_string(&g.state.snapshot()) {
                                log::debug!("state: {}", json);
                            }
                        }
                    }
                    GameEvent::Missed { broken_streak } => {
                        show_message(&document, "So close!");
                        log::info!("streak of {} broken", broken_streak);
                    }
                }
            }

            update_hud(&document, &g.state);
            g.render();
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Streak Hoops (native) starting...");
    log::info!("Native mode is headless - run with `trunk serve` for the web version");

    println!("\nRunning simulation self-check...");
    self_check();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn self_check() {
    use glam::Vec2;
    use streak_hoops::sim::{FrameInput, GameEvent, GameState, Launch, tick};

    let mut state = GameState::new(800.0, 600.0, 42);
    let mut input = FrameInput {
        launch: Some(Launch {
            vel: Vec2::new(0.0, -15.0),
            spin: 0.0,
        }),
    };

    // A straight lob from the spawn point rises past the rim and drops back
    // through it on the way down
    let mut scored = false;
    for _ in 0..600 {
        tick(&mut state, &input);
        input = FrameInput::default();
        if state
            .take_events()
            .iter()
            .any(|e| matches!(e, GameEvent::Scored { .. }))
        {
            scored = true;
            break;
        }
    }
    assert!(scored, "lob through the rim should score");
    assert_eq!(state.scoreboard.streak, 1);
    println!("✓ Simulation self-check passed!");
}
