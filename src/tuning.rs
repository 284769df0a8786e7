//! Data-driven game balance
//!
//! Every gameplay constant lives here so a run can be retuned from a JSON
//! file without a rebuild. Missing fields fall back to the shipped defaults.

use serde::{Deserialize, Serialize};

use crate::error::TuningError;

/// Gameplay and feedback constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// World distance between consecutive tiles
    pub tile_spacing: f32,
    /// Projection field of view (focal distance)
    pub fov: f32,
    /// Health at the start of a run
    pub max_health: u8,

    /// Tiles kept spawned from the head onward
    pub lookahead: u32,
    /// Soft cap on retained tiles; older tiles behind the view are evicted
    pub window_cap: usize,

    /// Fraction of the remaining gap the camera closes per tick
    pub camera_lerp: f32,
    /// Gap below which the camera snaps onto its target
    pub snap_distance: f32,
    /// Per-tick multiplier applied to screen shake
    pub shake_decay: f32,
    /// Shake magnitude set by a miss
    pub miss_shake: f32,

    /// Hit-stop ticks after a clear
    pub clear_freeze: u32,
    /// Hit-stop ticks after a miss
    pub miss_freeze: u32,
    /// Avatar attack/jump pose duration (ticks)
    pub clear_action_ticks: u32,
    /// Avatar hit pose duration (ticks)
    pub hit_action_ticks: u32,

    /// Particles emitted on a clear
    pub clear_particles: usize,
    /// Particles emitted on a miss
    pub miss_particles: usize,
    /// Life lost per unfrozen tick
    pub particle_decay: f32,
    /// Spawn position jitter (full width, centered)
    pub particle_jitter: f32,
    /// Spawn velocity range per axis (full width, centered)
    pub particle_speed: f32,
    /// Hard cap on live particles
    pub max_particles: usize,

    /// Score for a clear before combo bonus
    pub base_score: u64,
    /// Extra score per combo step held before the clear
    pub combo_bonus: u64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            tile_spacing: 500.0,
            fov: 400.0,
            max_health: 3,

            lookahead: 10,
            window_cap: 20,

            camera_lerp: 0.25,
            snap_distance: 1.0,
            shake_decay: 0.9,
            miss_shake: 40.0,

            clear_freeze: 2,
            miss_freeze: 5,
            clear_action_ticks: 8,
            hit_action_ticks: 15,

            clear_particles: 15,
            miss_particles: 30,
            particle_decay: 0.05,
            particle_jitter: 100.0,
            particle_speed: 30.0,
            max_particles: 512,

            base_score: 100,
            combo_bonus: 10,
        }
    }
}

impl Tuning {
    /// Parse and validate a tuning file
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Reject values that would break engine invariants
    pub fn validate(&self) -> Result<(), TuningError> {
        fn invalid(field: &'static str, reason: &'static str) -> Result<(), TuningError> {
            Err(TuningError::Invalid { field, reason })
        }

        if !(self.tile_spacing > 0.0) {
            return invalid("tile_spacing", "must be positive");
        }
        if !(self.fov > 0.0) {
            return invalid("fov", "must be positive");
        }
        if self.max_health == 0 {
            return invalid("max_health", "must be at least 1");
        }
        if self.lookahead == 0 {
            return invalid("lookahead", "must be at least 1");
        }
        if self.window_cap < self.lookahead as usize {
            return invalid("window_cap", "must hold at least `lookahead` tiles");
        }
        if !(self.camera_lerp > 0.0 && self.camera_lerp <= 1.0) {
            return invalid("camera_lerp", "must be in (0, 1]");
        }
        if !(self.snap_distance > 0.0) {
            return invalid("snap_distance", "must be positive");
        }
        if !(0.0..1.0).contains(&self.shake_decay) {
            return invalid("shake_decay", "must be in [0, 1)");
        }
        if !(self.miss_shake >= 0.0) {
            return invalid("miss_shake", "must not be negative");
        }
        if !(self.particle_decay > 0.0) {
            return invalid("particle_decay", "must be positive");
        }
        Ok(())
    }
}
