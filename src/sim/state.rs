//! Game state and core simulation types
//!
//! Everything the engine mutates lives in `GameState`. The presentation layer
//! only ever sees a `Snapshot`.

use glam::Vec3;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::camera::Camera;
use super::particles::Particles;
use super::player::PlayerAnim;
use super::sequencer::TileSequencer;
use super::session::Session;
use crate::tuning::Tuning;

/// Session lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Lifecycle {
    /// Title screen, waiting for Begin
    Start,
    /// Active run, resolver accepts input
    Playing,
    /// Run ended, waiting for Retry or Exit
    GameOver,
}

/// The binary choice the player makes for each tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    Attack,
    Jump,
}

impl Action {
    /// The wrong answer
    pub fn other(self) -> Action {
        match self {
            Action::Attack => Action::Jump,
            Action::Jump => Action::Attack,
        }
    }
}

/// Challenge tile kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TileKind {
    /// Must be attacked
    Enemy,
    /// Must be jumped
    Gap,
}

impl TileKind {
    /// The only action that clears this tile
    pub fn required_action(self) -> Action {
        match self {
            TileKind::Enemy => Action::Attack,
            TileKind::Gap => Action::Jump,
        }
    }
}

/// One step of the endless sequence. Identity is the index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    pub id: u32,
    pub index: u32,
    pub kind: TileKind,
}

impl Tile {
    pub fn new(index: u32, kind: TileKind) -> Self {
        Self {
            id: index,
            index,
            kind,
        }
    }

    /// Absolute world depth of this tile
    #[inline]
    pub fn depth(&self, spacing: f32) -> f32 {
        self.index as f32 * spacing
    }
}

/// Feedback palette (mapped to RGBA by the renderer)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FeedbackColor {
    /// Clean attack
    Cyan,
    /// Clean jump
    Amber,
    /// Damage
    Red,
}

impl From<Action> for FeedbackColor {
    fn from(action: Action) -> Self {
        match action {
            Action::Attack => FeedbackColor::Cyan,
            Action::Jump => FeedbackColor::Amber,
        }
    }
}

/// A particle for hit/damage feedback (absolute world coordinates)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec3,
    pub vel: Vec3,
    pub life: f32, // 0-1, decreases over time
    pub color: FeedbackColor,
}

/// Combo callout intensity, as the overlay colors it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ComboTier {
    /// No callout (combo of 0 or 1)
    None,
    Normal,
    /// More than 10
    Hot,
    /// More than 20
    Blazing,
}

impl ComboTier {
    pub fn for_combo(combo: u32) -> Self {
        match combo {
            0..=1 => ComboTier::None,
            2..=10 => ComboTier::Normal,
            11..=20 => ComboTier::Hot,
            _ => ComboTier::Blazing,
        }
    }
}

/// Read-only view handed to the presentation layer once per tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub score: u64,
    pub combo: u32,
    pub health: u8,
    pub max_health: u8,
    pub lifecycle: Lifecycle,
    pub combo_tier: ComboTier,
}

/// Head position and hit-stop, plus the camera that chases the head
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorldState {
    /// Tile the player must resolve next
    pub current_tile_index: u32,
    pub camera: Camera,
    /// Ticks of remaining hit-stop
    pub freeze_ticks: u32,
}

impl WorldState {
    pub fn new() -> Self {
        Self {
            current_tile_index: 0,
            camera: Camera::default(),
            freeze_ticks: 0,
        }
    }

    #[inline]
    pub fn is_frozen(&self) -> bool {
        self.freeze_ticks > 0
    }
}

impl Default for WorldState {
    fn default() -> Self {
        Self::new()
    }
}

/// Complete engine state
#[derive(Debug, Clone)]
pub struct GameState {
    pub tuning: Tuning,
    pub world: WorldState,
    pub session: Session,
    pub player: PlayerAnim,
    pub tiles: TileSequencer,
    pub particles: Particles,
    /// Cosmetic RNG (particle jitter, shake). Never used for tiles.
    pub fx_rng: Pcg32,
    /// Simulation tick counter
    pub time_ticks: u64,
}

impl GameState {
    /// Create a state on the title screen. Tiles are seeded by the engine.
    pub fn new(tuning: Tuning, fx_seed: u64) -> Self {
        Self {
            world: WorldState::new(),
            session: Session::new(tuning.max_health),
            player: PlayerAnim::default(),
            tiles: TileSequencer::new(),
            particles: Particles::new(tuning.max_particles),
            fx_rng: Pcg32::seed_from_u64(fx_seed),
            time_ticks: 0,
            tuning,
        }
    }

    /// The tile awaiting resolution, if the window holds it
    pub fn current_tile(&self) -> Option<&Tile> {
        self.tiles.get(self.world.current_tile_index)
    }

    /// Project the authoritative state into the overlay snapshot
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            score: self.session.score,
            combo: self.session.combo,
            health: self.session.health,
            max_health: self.tuning.max_health,
            lifecycle: self.session.lifecycle,
            combo_tier: ComboTier::for_combo(self.session.combo),
        }
    }
}
