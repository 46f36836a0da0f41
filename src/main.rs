//! Star Shooter entry point
//!
//! The web build drives the session from `requestAnimationFrame` and renders
//! through WebGPU. The native build runs a headless autopilot session, which
//! is handy for soak-testing the simulation with logging enabled.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, KeyboardEvent, PointerEvent};

    use star_shooter::audio::AudioManager;
    use star_shooter::consts::*;
    use star_shooter::draw::{Align, DrawList, Layer, Shape};
    use star_shooter::renderer::{RenderState, tessellate};
    use star_shooter::sim::{Key, PointerButton, Session, WorldBounds};
    use star_shooter::Settings;

    /// Game instance holding all state
    struct Game {
        session: Session,
        render_state: Option<RenderState>,
        audio: AudioManager,
        frame: DrawList,
        last_time: f64,
        /// Canvas size in CSS pixels (pointer coordinates)
        css_size: (f32, f32),
        circle_segments: u32,
        /// Text lines currently shown in the overlay
        overlay_key: String,
    }

    impl Game {
        fn new(settings: Settings, seed: u64) -> Self {
            let audio = AudioManager::new(&settings);
            let circle_segments = settings.quality.circle_segments();
            Self {
                session: Session::show(settings, seed),
                render_state: None,
                audio,
                frame: DrawList::new(),
                last_time: 0.0,
                css_size: (1.0, 1.0),
                circle_segments,
                overlay_key: String::new(),
            }
        }

        fn resize(&mut self, css_w: f32, css_h: f32, px_w: u32, px_h: u32) {
            self.css_size = (css_w, css_h);
            self.session.resize(WorldBounds::from_viewport(px_w, px_h));
            if let Some(rs) = &mut self.render_state {
                rs.resize(px_w, px_h);
            }
        }

        fn to_world(&self, x: f32, y: f32) -> glam::Vec2 {
            self.session.bounds().screen_to_world(x, y, self.css_size)
        }

        fn update(&mut self, dt: f32) {
            let dt = dt.clamp(0.0, MAX_FRAME_DT);
            self.session.tick(dt, &mut self.frame);
            let events = self.session.drain_events();
            self.audio.play_events(&events);
        }

        /// Render the current frame
        fn render(&mut self) {
            let vertices = tessellate(&self.frame, self.circle_segments);
            if let Some(ref mut render_state) = self.render_state {
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

        /// Mirror the frame's text commands into the DOM overlay
        fn update_overlay(&mut self, document: &Document) {
            let texts: Vec<(Layer, &Shape)> = self
                .frame
                .commands()
                .iter()
                .filter(|c| matches!(c.shape, Shape::Text { .. }))
                .map(|c| (c.layer, &c.shape))
                .collect();
            let key = self.frame.texts().collect::<Vec<_>>().join("|");
            if key == self.overlay_key {
                return;
            }

            let Some(overlay) = document.get_element_by_id("overlay") else {
                return;
            };
            overlay.set_inner_html("");
            let bounds = *self.session.bounds();
            for (layer, shape) in texts {
                let Shape::Text {
                    anchor,
                    size,
                    align,
                    content,
                } = shape
                else {
                    continue;
                };
                let Ok(el) = document.create_element("div") else {
                    continue;
                };
                let left = (anchor.x - bounds.left()) / bounds.width() * 100.0;
                let top = (bounds.top() - anchor.y) / bounds.height() * 100.0;
                let shift = match align {
                    Align::Left => "0%",
                    Align::Center => "-50%",
                    Align::Right => "-100%",
                };
                let _ = el.set_attribute(
                    "style",
                    &format!(
                        "position:absolute;left:{left}%;top:{top}%;font-size:{}vh;\
                         transform:translate({shift},-50%);white-space:nowrap",
                        size * 100.0
                    ),
                );
                let _ = el.set_attribute("class", &format!("text-{layer:?}").to_lowercase());
                el.set_text_content(Some(content));
                let _ = overlay.append_child(&el);
            }
            self.overlay_key = key;
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        let _ = console_log::init_with_level(log::Level::Info);

        log::info!("Star Shooter starting...");

        let Some(window) = web_sys::window() else {
            return;
        };
        let Some(document) = window.document() else {
            return;
        };

        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let Some(canvas) = document
            .get_element_by_id("canvas")
            .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
        else {
            log::error!("No #canvas element");
            return;
        };

        let (css_w, css_h, width, height) = canvas_size(&window, &canvas);
        canvas.set_width(width);
        canvas.set_height(height);

        let settings = Settings::load();
        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(settings, seed)));
        game.borrow_mut().resize(css_w, css_h, width, height);

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        match instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone())) {
            Ok(surface) => {
                let adapter = instance
                    .request_adapter(&wgpu::RequestAdapterOptions {
                        power_preference: wgpu::PowerPreference::HighPerformance,
                        compatible_surface: Some(&surface),
                        force_fallback_adapter: false,
                    })
                    .await;
                match adapter {
                    Ok(adapter) => {
                        log::info!("Using adapter: {:?}", adapter.get_info().name);
                        match RenderState::new(surface, &adapter, width, height).await {
                            Ok(rs) => game.borrow_mut().render_state = Some(rs),
                            Err(e) => log::error!("Failed to create device: {e}"),
                        }
                    }
                    Err(e) => log::error!("Failed to get adapter: {e}"),
                }
            }
            Err(e) => log::error!("Failed to create surface: {e}"),
        }

        setup_input_handlers(&window, &canvas, game.clone());
        setup_resize_handler(&window, canvas, game.clone());

        request_animation_frame(game);

        log::info!("Star Shooter running!");
    }

    /// CSS size and device-pixel size of the canvas
    fn canvas_size(window: &web_sys::Window, canvas: &HtmlCanvasElement) -> (f32, f32, u32, u32) {
        let dpr = window.device_pixel_ratio();
        let client_w = canvas.client_width().max(1);
        let client_h = canvas.client_height().max(1);
        (
            client_w as f32,
            client_h as f32,
            (client_w as f64 * dpr) as u32,
            (client_h as f64 * dpr) as u32,
        )
    }

    fn setup_input_handlers(
        window: &web_sys::Window,
        canvas: &HtmlCanvasElement,
        game: Rc<RefCell<Game>>,
    ) {
        // Pointer press
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
                let mut g = game.borrow_mut();
                g.audio.resume();
                let pos = g.to_world(event.offset_x() as f32, event.offset_y() as f32);
                let button = PointerButton::from_dom(event.button());
                g.session.pointer_down(pos, event.pointer_id() as u32, button);
            });
            let _ = canvas
                .add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Pointer release (and cancel, so a lost touch does not stick)
        for name in ["pointerup", "pointercancel"] {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
                let mut g = game.borrow_mut();
                let pos = g.to_world(event.offset_x() as f32, event.offset_y() as f32);
                let button = PointerButton::from_dom(event.button());
                g.session.pointer_up(pos, event.pointer_id() as u32, button);
            });
            let _ = canvas.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keyboard
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if let Some(key) = Key::from_key_name(&event.key()) {
                    event.prevent_default();
                    let mut g = game.borrow_mut();
                    g.audio.resume();
                    g.session.key_down(key);
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if let Some(key) = Key::from_key_name(&event.key()) {
                    game.borrow_mut().session.key_up(key);
                }
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_resize_handler(
        window: &web_sys::Window,
        canvas: HtmlCanvasElement,
        game: Rc<RefCell<Game>>,
    ) {
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let Some(window) = web_sys::window() else {
                return;
            };
            let (css_w, css_h, width, height) = canvas_size(&window, &canvas);
            canvas.set_width(width);
            canvas.set_height(height);
            game.borrow_mut().resize(css_w, css_h, width, height);
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
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

            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                FRAME_DT
            };
            g.last_time = time;

            g.update(dt);
            g.render();
            if let Some(document) = web_sys::window().and_then(|w| w.document()) {
                g.update_overlay(&document);
            }
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
    log::info!("Star Shooter (native) starting headless autopilot...");

    let seconds: f32 = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(120.0);
    let seed = std::env::args()
        .nth(2)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(1);

    let report = autopilot::run(star_shooter::Settings::load(), seed, seconds);
    log::info!(
        "Autopilot finished: {} frames, {} games, {} frags total, best {}",
        report.frames,
        report.games,
        report.total_frags,
        report.best_frags
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main
}

/// Simple pilot that chases the lowest enemy and restarts after each loss
#[cfg(not(target_arch = "wasm32"))]
mod autopilot {
    use star_shooter::Settings;
    use star_shooter::consts::FRAME_DT;
    use star_shooter::draw::DrawList;
    use star_shooter::sim::{GameEvent, Key, Session, SessionState, Sprite};

    pub struct Report {
        pub frames: u64,
        pub games: u32,
        pub total_frags: u32,
        pub best_frags: u32,
    }

    pub fn run(settings: Settings, seed: u64, seconds: f32) -> Report {
        let mut session = Session::show(settings, seed);
        let mut frame = DrawList::new();
        let frames = (seconds.max(0.0) / FRAME_DT) as u64;
        let mut report = Report {
            frames,
            games: 1,
            total_frags: 0,
            best_frags: 0,
        };

        for _ in 0..frames {
            if session.state() == SessionState::GameOver {
                report.best_frags = report.best_frags.max(session.frags());
                report.total_frags += session.frags();
                session.start_new_game();
                report.games += 1;
            }

            steer(&mut session);
            session.tick(FRAME_DT, &mut frame);

            for event in session.drain_events() {
                if event == GameEvent::GameOver {
                    log::info!("Game {} over with {} frags", report.games, session.frags());
                }
            }
        }

        report.best_frags = report.best_frags.max(session.frags());
        report.total_frags += session.frags();
        report
    }

    fn steer(session: &mut Session) {
        let ship_x = session.ship().pos().x;
        let target = session
            .enemies()
            .active_objects()
            .iter()
            .min_by(|a, b| a.pos().y.total_cmp(&b.pos().y))
            .map(|e| e.pos().x);

        session.key_up(Key::Left);
        session.key_up(Key::Right);
        match target {
            Some(x) if x < ship_x - 0.01 => session.key_down(Key::Left),
            Some(x) if x > ship_x + 0.01 => session.key_down(Key::Right),
            _ => {}
        }
    }
}
