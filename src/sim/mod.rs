//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One tick per frame, no wall-clock time
//! - Seeded or injected randomness only
//! - No rendering or platform dependencies

pub mod camera;
pub mod engine;
pub mod particles;
pub mod player;
pub mod resolve;
pub mod sequencer;
pub mod session;
pub mod state;
pub mod tick;

pub use camera::Camera;
pub use engine::Engine;
pub use particles::Particles;
pub use player::{PlayerAction, PlayerAnim};
pub use resolve::{Outcome, resolve};
pub use sequencer::{ScriptedTiles, TileSequencer, TileSource, WindowView};
pub use session::Session;
pub use state::{
    Action, ComboTier, FeedbackColor, GameState, Lifecycle, Particle, Snapshot, Tile, TileKind,
    WorldState,
};
pub use tick::tick;
