//! Input bindings
//!
//! Two physical bindings per action: a pair of keys, and a half of the
//! screen for pointer/touch. Menu keys confirm the title and game-over
//! panels or leave the game.

use serde::{Deserialize, Serialize};

use crate::sim::{Action, Lifecycle};

/// Everything a host can ask of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    Attack,
    Jump,
    /// Leave the title screen
    Begin,
    /// Restart after game over
    Retry,
    /// Hand control back to the host page
    Exit,
}

impl Command {
    /// The resolver action, for gameplay commands
    pub fn action(self) -> Option<Action> {
        match self {
            Command::Attack => Some(Action::Attack),
            Command::Jump => Some(Action::Jump),
            _ => None,
        }
    }
}

/// Key codes (`KeyboardEvent.code`) and pointer zones
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Binding {
    pub attack_keys: [&'static str; 2],
    pub jump_keys: [&'static str; 2],
    /// Begin on the title screen, Retry after game over
    pub confirm_keys: [&'static str; 2],
    pub exit_keys: [&'static str; 1],
}

impl Default for Binding {
    fn default() -> Self {
        Self {
            attack_keys: ["KeyA", "ArrowLeft"],
            jump_keys: ["KeyD", "ArrowRight"],
            confirm_keys: ["Enter", "Space"],
            exit_keys: ["Escape"],
        }
    }
}

impl Binding {
    pub fn key(&self, code: &str, lifecycle: Lifecycle) -> Option<Command> {
        if self.attack_keys.contains(&code) {
            Some(Command::Attack)
        } else if self.jump_keys.contains(&code) {
            Some(Command::Jump)
        } else if self.exit_keys.contains(&code) {
            Some(Command::Exit)
        } else if self.confirm_keys.contains(&code) {
            match lifecycle {
                Lifecycle::Start => Some(Command::Begin),
                Lifecycle::GameOver => Some(Command::Retry),
                Lifecycle::Playing => None,
            }
        } else {
            None
        }
    }

    /// Left half attacks, right half jumps
    pub fn pointer(&self, x: f32, width: f32) -> Option<Command> {
        if !(width > 0.0) || !x.is_finite() {
            return None;
        }
        if x < width / 2.0 {
            Some(Command::Attack)
        } else {
            Some(Command::Jump)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_bindings() {
        let binding = Binding::default();
        let key = |code| binding.key(code, Lifecycle::Playing);
        assert_eq!(key("KeyA"), Some(Command::Attack));
        assert_eq!(key("ArrowLeft"), Some(Command::Attack));
        assert_eq!(key("KeyD"), Some(Command::Jump));
        assert_eq!(key("ArrowRight"), Some(Command::Jump));
        assert_eq!(key("KeyQ"), None);
    }

    #[test]
    fn test_menu_keys_follow_lifecycle() {
        let binding = Binding::default();
        assert_eq!(binding.key("Enter", Lifecycle::Start), Some(Command::Begin));
        assert_eq!(binding.key("Space", Lifecycle::GameOver), Some(Command::Retry));
        assert_eq!(binding.key("Enter", Lifecycle::Playing), None);
        for lifecycle in [Lifecycle::Start, Lifecycle::Playing, Lifecycle::GameOver] {
            assert_eq!(binding.key("Escape", lifecycle), Some(Command::Exit));
        }
    }

    #[test]
    fn test_pointer_halves() {
        let binding = Binding::default();
        assert_eq!(binding.pointer(10.0, 800.0), Some(Command::Attack));
        assert_eq!(binding.pointer(399.0, 800.0), Some(Command::Attack));
        assert_eq!(binding.pointer(400.0, 800.0), Some(Command::Jump));
        assert_eq!(binding.pointer(10.0, 0.0), None);
    }

    #[test]
    fn test_command_actions() {
        assert_eq!(Command::Attack.action(), Some(Action::Attack));
        assert_eq!(Command::Jump.action(), Some(Action::Jump));
        assert_eq!(Command::Retry.action(), None);
    }
}
