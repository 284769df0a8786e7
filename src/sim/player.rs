//! Player avatar animation state

use serde::{Deserialize, Serialize};

use super::state::Action;

/// What the avatar is visibly doing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PlayerAction {
    /// Before play starts
    #[default]
    Idle,
    /// Default pose during play
    Run,
    Jump,
    Attack,
    /// Stunned after a miss. Only a clean resolution clears it.
    Hit,
}

impl From<Action> for PlayerAction {
    fn from(action: Action) -> Self {
        match action {
            Action::Attack => PlayerAction::Attack,
            Action::Jump => PlayerAction::Jump,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PlayerAnim {
    pub action: PlayerAction,
    pub timer: u32,
}

impl PlayerAnim {
    /// Enter a timed pose
    pub fn trigger(&mut self, action: PlayerAction, ticks: u32) {
        self.action = action;
        self.timer = ticks;
    }

    /// One unfrozen tick. `playing` releases the idle pose.
    pub fn decay(&mut self, playing: bool) {
        self.timer = self.timer.saturating_sub(1);
        if self.timer > 0 {
            return;
        }
        self.action = match self.action {
            PlayerAction::Hit => PlayerAction::Hit,
            PlayerAction::Idle if !playing => PlayerAction::Idle,
            _ => PlayerAction::Run,
        };
    }
}
