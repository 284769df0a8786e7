//! Ninja Dash entry point
//!
//! On the web this exports `launch`, which mounts the game into a canvas and
//! hands the page a control handle. Natively it runs a headless autoplay
//! session and logs what happens.

#[cfg(target_arch = "wasm32")]
mod web {
    use std::cell::RefCell;
    use std::rc::{Rc, Weak};

    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, Element, HtmlCanvasElement, KeyboardEvent, PointerEvent};

    use ninja_dash::overlay::{HIDDEN, HudView, STYLESHEET, ids};
    use ninja_dash::renderer::{Frame, RenderState};
    use ninja_dash::{
        Command, Engine, GameHost, InitError, Platform, RenderError, RenderTarget, Snapshot,
        Tuning,
    };

    type Host = GameHost<WebPlatform, CanvasTarget>;

    struct Listener {
        target: web_sys::EventTarget,
        kind: &'static str,
        closure: Closure<dyn FnMut(web_sys::Event)>,
    }

    /// requestAnimationFrame scheduling plus the DOM listeners we own
    pub struct WebPlatform {
        window: web_sys::Window,
        raf: Option<Closure<dyn FnMut(f64)>>,
        listeners: Vec<Listener>,
    }

    impl WebPlatform {
        fn new(window: web_sys::Window) -> Self {
            Self {
                window,
                raf: None,
                listeners: Vec::new(),
            }
        }

        fn listen(
            &mut self,
            target: web_sys::EventTarget,
            kind: &'static str,
            closure: Closure<dyn FnMut(web_sys::Event)>,
        ) {
            if let Err(e) =
                target.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())
            {
                log::warn!("Failed to attach {kind} listener: {e:?}");
                return;
            }
            self.listeners.push(Listener {
                target,
                kind,
                closure,
            });
        }
    }

    impl Platform for WebPlatform {
        type FrameId = i32;

        fn request_frame(&mut self) -> Option<i32> {
            let raf = self.raf.as_ref()?;
            self.window
                .request_animation_frame(raf.as_ref().unchecked_ref())
                .inspect_err(|e| log::warn!("requestAnimationFrame failed: {e:?}"))
                .ok()
        }

        fn cancel_frame(&mut self, id: i32) {
            let _ = self.window.cancel_animation_frame(id);
        }

        fn detach_input(&mut self) {
            // Closures stay alive until the platform drops; one of them may be
            // the caller
            for listener in &self.listeners {
                let _ = listener.target.remove_event_listener_with_callback(
                    listener.kind,
                    listener.closure.as_ref().unchecked_ref(),
                );
            }
        }
    }

    /// Full-window canvas backed by the wgpu pipeline
    pub struct CanvasTarget {
        window: web_sys::Window,
        canvas: HtmlCanvasElement,
        render: RenderState,
        overlay: Overlay,
    }

    impl CanvasTarget {
        fn window_size(window: &web_sys::Window) -> Option<(u32, u32)> {
            let w = window.inner_width().ok()?.as_f64()?;
            let h = window.inner_height().ok()?.as_f64()?;
            Some((w as u32, h as u32))
        }
    }

    impl RenderTarget for CanvasTarget {
        fn fit_to_viewport(&mut self) -> Vec2 {
            let (width, height) = Self::window_size(&self.window)
                .unwrap_or((self.canvas.width(), self.canvas.height()));
            if (width, height) != (self.canvas.width(), self.canvas.height()) {
                self.canvas.set_width(width);
                self.canvas.set_height(height);
            }
            self.render.resize(width, height);
            Vec2::new(width as f32, height as f32)
        }

        fn present(&mut self, frame: &Frame) -> Result<(), RenderError> {
            self.render.render(frame)
        }

        fn recover(&mut self) {
            self.render.reconfigure();
        }

        fn overlay(&mut self, snapshot: &Snapshot) {
            self.overlay.apply(HudView::new(snapshot));
        }
    }

    fn element(
        document: &Document,
        tag: &str,
        id: Option<&str>,
        class: &str,
        text: &str,
    ) -> Result<Element, JsValue> {
        let el = document.create_element(tag)?;
        if let Some(id) = id {
            el.set_id(id);
        }
        if !class.is_empty() {
            el.set_class_name(class);
        }
        if !text.is_empty() {
            el.set_text_content(Some(text));
        }
        Ok(el)
    }

    fn set_hidden(el: &Element, hidden: bool) {
        let _ = el.class_list().toggle_with_force(HIDDEN, hidden);
    }

    /// DOM HUD, title and game-over panels. Removed from the page on drop.
    struct Overlay {
        root: Element,
        score: Element,
        hearts: Vec<Element>,
        combo: Element,
        combo_value: Element,
        start_panel: Element,
        game_over_panel: Element,
        final_score: Element,
        buttons: Vec<(Element, Command)>,
        shown: Option<HudView>,
    }

    impl Overlay {
        fn mount(document: &Document, max_health: u8) -> Result<Self, JsValue> {
            let body = document
                .body()
                .ok_or_else(|| JsValue::from_str("document has no body"))?;
            let root = element(document, "div", Some(ids::ROOT), "", "")?;
            root.append_child(&element(document, "style", None, "", STYLESHEET)?)?;

            // Top bar
            let back = element(document, "button", Some(ids::BACK), "", "\u{2190}")?;
            root.append_child(&back)?;
            let score_box = element(document, "div", None, "nd-score-box", "")?;
            score_box.append_child(&element(document, "span", None, "nd-label", "Score")?)?;
            let score = element(document, "span", Some(ids::SCORE), "", "000000")?;
            score_box.append_child(&score)?;
            root.append_child(&score_box)?;

            let heart_row = element(document, "div", Some(ids::HEARTS), "", "")?;
            let hearts = (0..max_health)
                .map(|_| {
                    let heart = element(document, "span", None, "nd-heart nd-full", "\u{2665}")?;
                    heart_row.append_child(&heart)?;
                    Ok(heart)
                })
                .collect::<Result<Vec<_>, JsValue>>()?;
            root.append_child(&heart_row)?;

            // Combo callout
            let combo = element(document, "div", Some(ids::COMBO), HIDDEN, "")?;
            let combo_value = element(document, "span", Some(ids::COMBO_VALUE), "", "")?;
            combo.append_child(&combo_value)?;
            combo.append_child(&element(document, "span", None, "nd-label", "Combo")?)?;
            root.append_child(&combo)?;

            // Title panel
            let start_panel = element(document, "div", Some(ids::START_PANEL), "nd-panel", "")?;
            let title = element(document, "h1", None, "nd-title", "")?;
            title.append_child(&element(document, "span", None, "nd-cyan", "NINJA")?)?;
            title.append_child(&element(document, "span", None, "", " DASH")?)?;
            start_panel.append_child(&title)?;
            for line in [
                "Tap left or press A to strike the red enemy.",
                "Tap right or press D to jump the blue gap.",
            ] {
                start_panel.append_child(&element(document, "div", None, "nd-hint", line)?)?;
            }
            let begin = element(document, "button", Some(ids::BEGIN), "nd-primary", "START MISSION")?;
            start_panel.append_child(&begin)?;
            root.append_child(&start_panel)?;

            // Game-over panel
            let game_over_panel = element(
                document,
                "div",
                Some(ids::GAME_OVER_PANEL),
                &format!("nd-panel {HIDDEN}"),
                "",
            )?;
            game_over_panel.append_child(&element(document, "h2", None, "nd-title", "FAILURE")?)?;
            let final_score = element(document, "div", Some(ids::FINAL_SCORE), "", "SCORE: 0")?;
            game_over_panel.append_child(&final_score)?;
            let row = element(document, "div", None, "nd-row", "")?;
            let exit = element(document, "button", Some(ids::EXIT), "nd-secondary", "EXIT")?;
            let retry = element(document, "button", Some(ids::RETRY), "nd-primary", "RETRY")?;
            row.append_child(&exit)?;
            row.append_child(&retry)?;
            game_over_panel.append_child(&row)?;
            root.append_child(&game_over_panel)?;

            body.append_child(&root)?;

            Ok(Self {
                root,
                score,
                hearts,
                combo,
                combo_value,
                start_panel,
                game_over_panel,
                final_score,
                buttons: vec![
                    (back, Command::Exit),
                    (begin, Command::Begin),
                    (exit, Command::Exit),
                    (retry, Command::Retry),
                ],
                shown: None,
            })
        }

        /// Push a view to the DOM, skipping unchanged frames
        fn apply(&mut self, view: HudView) {
            if self.shown.as_ref() == Some(&view) {
                return;
            }
            self.score.set_text_content(Some(&view.score));
            for (heart, full) in self.hearts.iter().zip(&view.hearts) {
                let _ = heart.class_list().toggle_with_force("nd-full", *full);
            }
            if let Some(combo) = view.combo {
                self.combo_value.set_text_content(Some(&combo.to_string()));
            }
            self.combo.set_class_name(view.combo_class);
            set_hidden(&self.start_panel, !view.start_visible);
            set_hidden(&self.game_over_panel, !view.game_over_visible);
            self.final_score.set_text_content(Some(&view.final_score));
            self.shown = Some(view);
        }
    }

    impl Drop for Overlay {
        fn drop(&mut self) {
            self.root.remove();
        }
    }

    /// Control handle returned to the page
    #[wasm_bindgen]
    pub struct GameHandle {
        host: Rc<RefCell<Host>>,
    }

    #[wasm_bindgen]
    impl GameHandle {
        pub fn begin(&self) {
            self.command(Command::Begin);
        }

        pub fn retry(&self) {
            self.command(Command::Retry);
        }

        pub fn exit(&self) {
            self.command(Command::Exit);
        }

        pub fn attack(&self) {
            self.command(Command::Attack);
        }

        pub fn jump(&self) {
            self.command(Command::Jump);
        }

        /// Latest snapshot for the overlays
        pub fn snapshot_json(&self) -> Result<String, JsValue> {
            let snapshot = self
                .host
                .try_borrow()
                .map_err(|_| JsValue::from_str("game is busy"))?
                .snapshot();
            serde_json::to_string(&snapshot).map_err(|e| JsValue::from_str(&e.to_string()))
        }
    }

    impl GameHandle {
        fn command(&self, command: Command) {
            match self.host.try_borrow_mut() {
                Ok(mut host) => {
                    host.command(command);
                }
                Err(_) => log::warn!("Dropped {command:?}: game is busy"),
            }
        }
    }

    fn with_host(host: &Weak<RefCell<Host>>, f: impl FnOnce(&mut Host)) {
        if let Some(host) = host.upgrade()
            && let Ok(mut host) = host.try_borrow_mut()
        {
            f(&mut host);
        }
    }

    fn wire(host: &Rc<RefCell<Host>>, window: &web_sys::Window, canvas: &HtmlCanvasElement) {
        let mut guard = host.borrow_mut();
        let platform = guard.platform_mut();

        let weak = Rc::downgrade(host);
        platform.raf = Some(Closure::new(move |_time: f64| {
            with_host(&weak, |host| host.frame());
        }));

        let weak = Rc::downgrade(host);
        platform.listen(
            window.clone().into(),
            "keydown",
            Closure::new(move |event: web_sys::Event| {
                let Some(event) = event.dyn_ref::<KeyboardEvent>() else {
                    return;
                };
                with_host(&weak, |host| {
                    let code = event.code();
                    let lifecycle = host.engine().snapshot().lifecycle;
                    if host.binding().key(&code, lifecycle).is_some() {
                        event.prevent_default();
                        host.key(&code);
                    }
                });
            }),
        );

        let weak = Rc::downgrade(host);
        let surface = canvas.clone();
        platform.listen(
            canvas.clone().into(),
            "pointerdown",
            Closure::new(move |event: web_sys::Event| {
                let Some(event) = event.dyn_ref::<PointerEvent>() else {
                    return;
                };
                let width = surface.client_width() as f32;
                with_host(&weak, |host| {
                    host.pointer(event.offset_x() as f32, width);
                });
            }),
        );
    }

    /// Overlay buttons go through the platform so teardown removes them too
    fn wire_buttons(host: &Rc<RefCell<Host>>, overlay: &Overlay) {
        let mut guard = host.borrow_mut();
        let platform = guard.platform_mut();
        for (button, command) in &overlay.buttons {
            let weak = Rc::downgrade(host);
            let command = *command;
            platform.listen(
                button.clone().into(),
                "click",
                Closure::new(move |_event: web_sys::Event| {
                    with_host(&weak, |host| {
                        host.command(command);
                    });
                }),
            );
        }
    }

    async fn acquire_target(
        window: &web_sys::Window,
        canvas: HtmlCanvasElement,
        overlay: Overlay,
    ) -> Result<CanvasTarget, InitError> {
        let (width, height) =
            CanvasTarget::window_size(window).unwrap_or((canvas.width(), canvas.height()));
        canvas.set_width(width);
        canvas.set_height(height);

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .map_err(|e| InitError::Surface(e.to_string()))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| InitError::Adapter(e.to_string()))?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render = RenderState::new(surface, &adapter, width, height).await?;
        Ok(CanvasTarget {
            window: window.clone(),
            canvas,
            render,
            overlay,
        })
    }

    /// Run `on_exit` after the current call unwinds, so the page can call
    /// back into the handle
    fn deferred(on_exit: js_sys::Function) -> impl FnOnce() + 'static {
        move || {
            wasm_bindgen_futures::spawn_local(async move {
                if let Err(e) = on_exit.call0(&JsValue::NULL) {
                    log::warn!("Exit callback threw: {e:?}");
                }
            });
        }
    }

    pub async fn launch(canvas_id: &str, on_exit: js_sys::Function) -> Result<GameHandle, InitError> {
        let window =
            web_sys::window().ok_or_else(|| InitError::MissingCanvas(canvas_id.to_string()))?;
        let document = window
            .document()
            .ok_or_else(|| InitError::MissingCanvas(canvas_id.to_string()))?;
        let canvas: HtmlCanvasElement = document
            .get_element_by_id(canvas_id)
            .and_then(|el| el.dyn_into().ok())
            .ok_or_else(|| InitError::MissingCanvas(canvas_id.to_string()))?;

        let seed = js_sys::Date::now() as u64;
        let engine = Engine::new(Tuning::default(), seed);
        let max_health = engine.tuning().max_health;
        log::info!("Game initialized with seed: {seed}");

        let host = Rc::new(RefCell::new(GameHost::new(
            engine,
            WebPlatform::new(window.clone()),
            deferred(on_exit),
        )));
        wire(&host, &window, &canvas);

        // On failure the host drops here and tears its listeners down; the
        // overlay is removed with it
        let overlay = Overlay::mount(&document, max_health)
            .map_err(|e| InitError::Overlay(format!("{e:?}")))?;
        wire_buttons(&host, &overlay);
        let target = acquire_target(&window, canvas, overlay).await;
        host.borrow_mut().start(target)?;

        log::info!("Ninja Dash running!");
        Ok(GameHandle { host })
    }
}

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    console_error_panic_hook::set_once();
    if let Err(e) = console_log::init_with_level(log::Level::Info) {
        web_sys::console::warn_1(&e.to_string().into());
    }
}

/// Mount the game into `canvas_id`. `on_exit` fires once when the player
/// leaves.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub async fn launch(canvas_id: String, on_exit: js_sys::Function) -> Result<web::GameHandle, JsValue> {
    web::launch(&canvas_id, on_exit)
        .await
        .map_err(|e| {
            log::error!("Failed to start: {e}");
            JsValue::from_str(&e.to_string())
        })
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry points are wasm_main and launch
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Ninja Dash (native) starting...");
    log::info!("Native mode is headless - build for wasm32 to play");

    let tuning = match std::env::args().nth(1) {
        Some(path) => match std::fs::read_to_string(&path)
            .map_err(|e| e.to_string())
            .and_then(|json| ninja_dash::Tuning::from_json(&json).map_err(|e| e.to_string()))
        {
            Ok(tuning) => tuning,
            Err(e) => {
                log::error!("Failed to load tuning from {path}: {e}");
                std::process::exit(1);
            }
        },
        None => ninja_dash::Tuning::default(),
    };

    autoplay(tuning, 42);
}

/// Play a seeded run with an imperfect bot until game over
#[cfg(not(target_arch = "wasm32"))]
fn autoplay(tuning: ninja_dash::Tuning, seed: u64) {
    use glam::Vec2;
    use ninja_dash::renderer::{build_frame, tessellate};
    use ninja_dash::sim::Outcome;
    use ninja_dash::{Engine, Lifecycle};
    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg32;

    const MAX_TICKS: u32 = 60 * 120;
    const REACTION_TICKS: u32 = 12;
    const MISTAKE_RATE: f64 = 0.08;

    let mut engine = Engine::new(tuning, seed);
    let mut bot = Pcg32::seed_from_u64(seed.wrapping_add(1));
    let viewport = Vec2::new(1280.0, 720.0);
    engine.begin();

    let mut clears = 0u32;
    for t in 1..=MAX_TICKS {
        if t % REACTION_TICKS == 0 {
            let required = engine.state().current_tile().map(|tile| tile.kind.required_action());
            if let Some(action) = required {
                let action = if bot.random_bool(MISTAKE_RATE) {
                    action.other()
                } else {
                    action
                };
                if engine.resolve(action) == Outcome::Cleared {
                    clears += 1;
                }
            }
        }
        engine.tick();

        if t % 60 == 0 {
            let shake = engine.shake_offset();
            let frame = build_frame(engine.state(), viewport, shake);
            log::debug!(
                "Tick {t}: {} draw items, {} vertices",
                frame.items.len(),
                tessellate(&frame).len()
            );
            log::info!("Tick {t}: {:?}", engine.snapshot());
        }

        if engine.snapshot().lifecycle == Lifecycle::GameOver {
            log::info!("Game over after {t} ticks");
            break;
        }
    }

    let snapshot = engine.snapshot();
    log::info!("{clears} tiles cleared");
    match serde_json::to_string_pretty(&snapshot) {
        Ok(json) => println!("{json}"),
        Err(e) => log::error!("Failed to serialize snapshot: {e}"),
    }
}
