//! Game host: frame loop ownership and teardown
//!
//! The host owns the engine, the render target and the pending frame
//! callback. Each frame runs one tick and then paints it, so every painted
//! frame is a completed state. Teardown cancels the pending frame and removes
//! input listeners exactly once, whether or not the loop ever started.

use glam::Vec2;

use crate::error::{InitError, RenderError};
use crate::input::{Binding, Command};
use crate::renderer::{Frame, build_frame};
use crate::sim::{Engine, Lifecycle, Outcome, Snapshot};

/// Display-refresh scheduling and input listener ownership
pub trait Platform {
    type FrameId: Copy + std::fmt::Debug;

    /// Schedule the next frame callback. `None` if the platform refused.
    fn request_frame(&mut self) -> Option<Self::FrameId>;
    fn cancel_frame(&mut self, id: Self::FrameId);
    /// Remove every input listener the platform attached
    fn detach_input(&mut self);
}

/// A drawing surface
pub trait RenderTarget {
    /// Resize the surface to the current viewport; returns its pixel size
    fn fit_to_viewport(&mut self) -> Vec2;
    fn present(&mut self, frame: &Frame) -> Result<(), RenderError>;
    /// Reconfigure after a lost surface
    fn recover(&mut self) {}
    /// Refresh any HUD drawn outside the frame
    fn overlay(&mut self, _snapshot: &Snapshot) {}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LoopState {
    /// Created, surface not acquired yet
    Idle,
    Running,
    TornDown,
}

pub struct GameHost<P: Platform, T: RenderTarget> {
    engine: Engine,
    binding: Binding,
    platform: P,
    target: Option<T>,
    pending: Option<P::FrameId>,
    state: LoopState,
    on_exit: Option<Box<dyn FnOnce()>>,
    snapshot: Snapshot,
}

impl<P: Platform, T: RenderTarget> GameHost<P, T> {
    pub fn new(engine: Engine, platform: P, on_exit: impl FnOnce() + 'static) -> Self {
        let snapshot = engine.snapshot();
        Self {
            engine,
            binding: Binding::default(),
            platform,
            target: None,
            pending: None,
            state: LoopState::Idle,
            on_exit: Some(Box::new(on_exit)),
            snapshot,
        }
    }

    /// Take the acquired surface and start the loop. A failed acquisition is
    /// returned unchanged and nothing is scheduled.
    pub fn start(&mut self, target: Result<T, InitError>) -> Result<(), InitError> {
        if self.state == LoopState::TornDown {
            return Err(InitError::TornDown);
        }
        let target = target.inspect_err(|e| log::error!("Game failed to start: {e}"))?;
        self.target = Some(target);
        if self.state == LoopState::Idle {
            self.state = LoopState::Running;
            self.pending = self.platform.request_frame();
            log::info!("Frame loop started");
        }
        Ok(())
    }

    /// One display refresh: tick, paint, reschedule
    pub fn frame(&mut self) {
        if self.state != LoopState::Running {
            return;
        }
        self.pending = None;
        self.engine.tick();

        if let Some(target) = self.target.as_mut() {
            let viewport = target.fit_to_viewport();
            let shake = self.engine.shake_offset();
            let frame = build_frame(self.engine.state(), viewport, shake);
            match target.present(&frame) {
                Ok(()) => {}
                Err(RenderError::SurfaceLost) => target.recover(),
                Err(RenderError::OutOfMemory) => log::error!("Out of memory!"),
                Err(e) => log::warn!("Render error: {e}"),
            }
        }

        self.snapshot = self.engine.snapshot();
        if let Some(target) = self.target.as_mut() {
            target.overlay(&self.snapshot);
        }
        self.pending = self.platform.request_frame();
    }

    /// Apply a command immediately
    pub fn command(&mut self, command: Command) -> Outcome {
        if self.state == LoopState::TornDown {
            return Outcome::Ignored;
        }
        match command {
            Command::Attack | Command::Jump => match command.action() {
                Some(action) => self.engine.resolve(action),
                None => Outcome::Ignored,
            },
            Command::Begin => {
                self.engine.begin();
                Outcome::Ignored
            }
            Command::Retry => {
                self.engine.retry();
                Outcome::Ignored
            }
            Command::Exit => {
                self.exit();
                Outcome::Ignored
            }
        }
    }

    pub fn key(&mut self, code: &str) -> Outcome {
        match self.binding.key(code, self.engine.snapshot().lifecycle) {
            Some(command) => self.command(command),
            None => Outcome::Ignored,
        }
    }

    /// Screen-half zones are only live during play
    pub fn pointer(&mut self, x: f32, width: f32) -> Outcome {
        if self.engine.snapshot().lifecycle != Lifecycle::Playing {
            return Outcome::Ignored;
        }
        match self.binding.pointer(x, width) {
            Some(command) => self.command(command),
            None => Outcome::Ignored,
        }
    }

    /// Snapshot taken after the last frame
    pub fn snapshot(&self) -> Snapshot {
        self.snapshot
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    pub fn binding(&self) -> &Binding {
        &self.binding
    }

    /// Platforms that need a handle back to the host (frame callbacks,
    /// listeners) are wired up after construction
    pub fn platform_mut(&mut self) -> &mut P {
        &mut self.platform
    }

    pub fn is_running(&self) -> bool {
        self.state == LoopState::Running
    }

    /// Tear down and hand control back to the host page
    pub fn exit(&mut self) {
        self.teardown();
        if let Some(on_exit) = self.on_exit.take() {
            log::info!("Exiting game");
            on_exit();
        }
    }

    /// Cancel the loop and drop listeners. Idempotent.
    pub fn teardown(&mut self) {
        if self.state == LoopState::TornDown {
            return;
        }
        if let Some(id) = self.pending.take() {
            self.platform.cancel_frame(id);
        }
        self.platform.detach_input();
        self.target = None;
        self.state = LoopState::TornDown;
        log::debug!("Game host torn down");
    }
}

impl<P: Platform, T: RenderTarget> Drop for GameHost<P, T> {
    fn drop(&mut self) {
        self.teardown();
    }
}
