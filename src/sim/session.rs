//! Score, combo and health bookkeeping

use serde::{Deserialize, Serialize};

use super::state::Lifecycle;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub score: u64,
    pub combo: u32,
    pub health: u8,
    pub lifecycle: Lifecycle,
}

impl Session {
    pub fn new(max_health: u8) -> Self {
        Self {
            score: 0,
            combo: 0,
            health: max_health,
            lifecycle: Lifecycle::Start,
        }
    }

    pub fn is_playing(&self) -> bool {
        self.lifecycle == Lifecycle::Playing
    }

    /// Credit a clean resolution. The bonus uses the combo held before it.
    pub fn reward(&mut self, base: u64, per_combo: u64) -> u64 {
        let gained = base.saturating_add(per_combo.saturating_mul(u64::from(self.combo)));
        self.score = self.score.saturating_add(gained);
        self.combo = self.combo.saturating_add(1);
        gained
    }

    /// Charge a miss. Returns true when this miss ended the run.
    pub fn penalize(&mut self) -> bool {
        self.health = self.health.saturating_sub(1);
        self.combo = 0;
        if self.health == 0 {
            self.lifecycle = Lifecycle::GameOver;
            return true;
        }
        false
    }
}
