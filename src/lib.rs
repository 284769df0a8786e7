//! Ninja Dash - an endless attack-or-jump reflex runner
//!
//! Core modules:
//! - `sim`: Deterministic simulation (tiles, resolution, camera, particles, session)
//! - `renderer`: Perspective projection, display list and WebGPU upload
//! - `host`: Frame loop ownership, teardown and exit hand-off
//! - `input`: Key/pointer bindings to game commands
//! - `overlay`: HUD and menu panels derived from the snapshot
//! - `tuning`: Data-driven game balance

pub mod error;
pub mod host;
pub mod input;
pub mod overlay;
pub mod renderer;
pub mod sim;
pub mod tuning;

pub use error::{InitError, RenderError, TuningError};
pub use host::{GameHost, Platform, RenderTarget};
pub use input::{Binding, Command};
pub use overlay::HudView;
pub use sim::{Engine, Lifecycle, Snapshot};
pub use tuning::Tuning;

/// Fixed view geometry (not balance knobs, see `tuning` for those)
pub mod consts {
    /// Depth of the player avatar in front of the camera plane
    pub const PLAYER_DEPTH: f32 = 200.0;
    /// Tiles further than this (relative depth) are not drawn
    pub const DRAW_DISTANCE: f32 = 3000.0;
    /// Nearest depth the projection accepts; anything closer is clamped
    pub const MIN_DEPTH: f32 = 1.0;
    /// Entities closer than this are culled (grid rows, particles)
    pub const NEAR_CULL: f32 = 10.0;

    /// Floor grid layout
    pub const GRID_ROW_SPACING: f32 = 200.0;
    pub const GRID_ROWS: u32 = 15;
    pub const GRID_FLOOR_Y: f32 = 200.0;
    pub const GRID_HALF_WIDTH: f32 = 1000.0;
    pub const GRID_COLUMN_SPACING: f32 = 300.0;
    pub const GRID_COLUMNS: i32 = 2;

    /// Player rest height (screen-space y offset before projection)
    pub const PLAYER_REST_Y: f32 = 100.0;
    /// Peak height of the jump hop
    pub const JUMP_HEIGHT: f32 = 150.0;
    /// Lean applied to the avatar while attacking (radians)
    pub const ATTACK_LEAN: f32 = 0.2;
    /// Offset in front of the camera where damage particles burst
    pub const DAMAGE_BURST_DEPTH: f32 = 200.0;
}
