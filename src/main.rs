//! Circle Chase entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use anyhow::{Context, anyhow};
    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, HtmlElement, KeyboardEvent, MouseEvent};

    use circle_chase::renderer::{RenderState, sprite};
    use circle_chase::session::ClickAction;
    use circle_chase::ui::HudView;
    use circle_chase::{GameConfig, Session};

    /// Game instance holding all state
    struct Game {
        session: Session,
        render_state: Option<RenderState>,
        canvas: HtmlCanvasElement,
        /// Last HUD pushed to the DOM, to skip redundant writes
        last_hud: Option<HudView>,
    }

    impl Game {
        fn new(session: Session, canvas: HtmlCanvasElement) -> Self {
            Self {
                session,
                render_state: None,
                canvas,
                last_hud: None,
            }
        }

        /// Mouse offset (CSS pixels) to logical canvas coordinates
        fn to_canvas(&self, event: &MouseEvent) -> Vec2 {
            let config = self.session.config();
            let client_w = self.canvas.client_width().max(1) as f32;
            let client_h = self.canvas.client_height().max(1) as f32;
            Vec2::new(
                event.offset_x() as f32 * config.width / client_w,
                event.offset_y() as f32 * config.height / client_h,
            )
        }

        /// Render the current frame
        fn render(&mut self) {
            let scene = self.session.scene();
            if let Some(ref mut render_state) = self.render_state {
                match render_state.render(&scene) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
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
        fn update_hud(&mut self) {
            let hud = self.session.hud();
            if self.last_hud.as_ref() == Some(&hud) {
                return;
            }
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };

            set_text(&document, "hud-score", &hud.score);
            match &hud.ammo {
                Some(ammo) => {
                    set_text(&document, "hud-ammo", ammo);
                    set_hidden(&document, "hud-ammo", false);
                }
                None => set_hidden(&document, "hud-ammo", true),
            }

            match &hud.overlay {
                Some(overlay) => {
                    set_text(&document, "overlay-title", overlay.title);
                    set_text(&document, "overlay-detail", &overlay.detail);
                    set_text(&document, "retry-label", overlay.retry_label);
                    self.place_retry_label(&document, overlay.retry_zone);
                    set_hidden(&document, "overlay", false);
                }
                None => set_hidden(&document, "overlay", true),
            }

            self.last_hud = Some(hud);
        }

        /// Pin the retry label over the hot-zone, in percent so it follows CSS scaling
        fn place_retry_label(&self, document: &Document, zone: circle_chase::ui::Rect) {
            let Some(label) = document
                .get_element_by_id("retry-label")
                .and_then(|el| el.dyn_into::<HtmlElement>().ok())
            else {
                return;
            };
            let config = self.session.config();
            let style = label.style();
            let _ = style.set_property("left", &format!("{}%", zone.min.x / config.width * 100.0));
            let _ = style.set_property("top", &format!("{}%", zone.min.y / config.height * 100.0));
            let _ = style.set_property("width", &format!("{}%", zone.size.x / config.width * 100.0));
            let _ = style.set_property(
                "height",
                &format!("{}%", zone.size.y / config.height * 100.0),
            );
        }
    }

    fn set_text(document: &Document, id: &str, text: &str) {
        if let Some(el) = document.get_element_by_id(id) {
            el.set_text_content(Some(text));
        }
    }

    fn set_hidden(document: &Document, id: &str, hidden: bool) {
        if let Some(el) = document.get_element_by_id(id) {
            let _ = el.set_attribute("class", if hidden { "hidden" } else { "" });
        }
    }

    fn js_error(e: JsValue) -> anyhow::Error {
        anyhow!("{:?}", e)
    }

    pub async fn run() -> anyhow::Result<()> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).context("Failed to init logger")?;

        log::info!("Circle Chase starting...");

        let window = web_sys::window().context("no window")?;
        let document = window.document().context("no document")?;

        // Hide loading indicator
        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let mut config = GameConfig::load();
        if config.seed == 0 {
            config.seed = js_sys::Date::now() as u64;
        }
        log::info!("Game initialized with seed: {}", config.seed);

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .context("no canvas")?
            .dyn_into()
            .map_err(|_| anyhow!("not a canvas"))?;

        // Backing store at device resolution; the scene stays in logical pixels
        let dpr = window.device_pixel_ratio();
        let width = (config.width as f64 * dpr) as u32;
        let height = (config.height as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        let sprite_url = config.sprite_url.clone();
        let game = Rc::new(RefCell::new(Game::new(Session::new(config), canvas.clone())));

        // Initialize WebGPU
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .context("Failed to create surface")?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .context("Failed to get adapter")?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let mut render_state = RenderState::new(surface, &adapter, width, height).await?;

        if let Some(url) = sprite_url {
            match sprite::load(&url).await {
                Ok(image) => render_state.set_sprite(&image),
                Err(e) => log::warn!("Projectile sprite unavailable ({:#}), using fallback", e),
            }
        }
        game.borrow_mut().render_state = Some(render_state);

        setup_input_handlers(&window, &canvas, game.clone()).map_err(js_error)?;

        // Show HUD
        if let Some(hud) = document.get_element_by_id("hud") {
            let _ = hud.set_attribute("class", "");
        }

        // Start game loop
        request_animation_frame(game);

        log::info!("Circle Chase running!");
        Ok(())
    }

    fn setup_input_handlers(
        window: &web_sys::Window,
        canvas: &HtmlCanvasElement,
        game: Rc<RefCell<Game>>,
    ) -> Result<(), JsValue> {
        // Keyboard
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if game.borrow_mut().session.key_down(&event.code()) {
                    // Arrow keys would scroll the page
                    event.prevent_default();
                }
            });
            window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                game.borrow_mut().session.key_up(&event.code());
            });
            window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }
        // Window blur: key-ups will be lost
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                game.borrow_mut().session.focus_lost();
                log::debug!("Window blur, released held keys");
            });
            window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }
        // Mouse move
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let mut g = game.borrow_mut();
                let pos = g.to_canvas(&event);
                g.session.pointer_moved(pos);
            });
            canvas.add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }
        // Mouse click - fire, or retry on the end screen
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                if event.button() != 0 {
                    return;
                }
                let mut g = game.borrow_mut();
                let pos = g.to_canvas(&event);
                if g.session.click(pos) == ClickAction::Retry {
                    log::info!("Retry requested");
                }
            });
            canvas.add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }
        Ok(())
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

    /// One simulation step per display refresh
    fn game_loop(game: Rc<RefCell<Game>>) {
        {
            let mut g = game.borrow_mut();
            g.session.frame();
            g.render();
            g.update_hud();
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    if let Err(e) = wasm_game::run().await {
        log::error!("Startup failed: {:#}", e);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Circle Chase (native) starting...");
    log::info!("Native mode has no window - serve the web build to play");

    run_scripted_session();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Headless demo: shoot at every enemy, then sit still until the game ends
#[cfg(not(target_arch = "wasm32"))]
fn run_scripted_session() {
    use circle_chase::{GameConfig, Session};

    const MAX_FRAMES: u64 = 600;

    let mut session = Session::new(GameConfig::load());
    let targets: Vec<_> = session.state().active_enemies().map(|e| e.pos).collect();
    for target in targets {
        session.click(target);
    }

    while !session.state().is_terminal() && session.frames() < MAX_FRAMES {
        session.frame();
    }

    let state = session.state();
    println!(
        "Finished after {} frames: {:?}, score {}, ammo {}/{}",
        session.frames(),
        state.phase,
        state.score,
        state.ammo,
        state.max_ammo
    );
}
