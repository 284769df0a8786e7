//! Decision resolver
//!
//! The single authority for gameplay transitions: matches an action against
//! the head tile and applies every consequence of a clear or a miss.

use glam::Vec3;

use super::player::PlayerAction;
use super::sequencer::{TileSource, WindowView};
use super::state::{Action, FeedbackColor, GameState, Tile};
use crate::consts::DAMAGE_BURST_DEPTH;

/// What a resolve call did (for logging/tests; overlays read the snapshot)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Not playing, or no head tile
    Ignored,
    Cleared,
    Missed,
}

/// Resolve `action` against the tile at the head
pub fn resolve(state: &mut GameState, source: &mut dyn TileSource, action: Action) -> Outcome {
    if !state.session.is_playing() {
        return Outcome::Ignored;
    }
    let Some(tile) = state.current_tile().copied() else {
        log::warn!(
            "No tile at head {}; input ignored",
            state.world.current_tile_index
        );
        return Outcome::Ignored;
    };

    if tile.kind.required_action() == action {
        clear(state, source, tile, action);
        Outcome::Cleared
    } else {
        miss(state);
        Outcome::Missed
    }
}

fn clear(state: &mut GameState, source: &mut dyn TileSource, tile: Tile, action: Action) {
    let tuning = &state.tuning;
    let gained = state.session.reward(tuning.base_score, tuning.combo_bonus);

    state.world.current_tile_index += 1;
    let head = state.world.current_tile_index;
    state.world.camera.target = head as f32 * tuning.tile_spacing;
    state.world.freeze_ticks = tuning.clear_freeze;
    state
        .player
        .trigger(PlayerAction::from(action), tuning.clear_action_ticks);

    // Particles live in absolute world space at the cleared tile
    let anchor = Vec3::new(0.0, 0.0, tile.depth(tuning.tile_spacing));
    state.particles.spawn(
        &mut state.fx_rng,
        anchor,
        FeedbackColor::from(action),
        tuning.clear_particles,
        tuning.particle_jitter,
        tuning.particle_speed,
    );

    let view = WindowView {
        head,
        camera_depth: state.world.camera.position,
        tile_spacing: tuning.tile_spacing,
        fov: tuning.fov,
        lookahead: tuning.lookahead,
        cap: tuning.window_cap,
    };
    state.tiles.maintain_window(view, source);

    log::debug!(
        "Cleared tile {} ({:?}) with {:?}: +{} (combo {})",
        tile.index,
        tile.kind,
        action,
        gained,
        state.session.combo
    );
}

fn miss(state: &mut GameState) {
    let tuning = &state.tuning;
    let game_over = state.session.penalize();

    state.world.camera.kick(tuning.miss_shake);
    state.world.freeze_ticks = tuning.miss_freeze;
    state
        .player
        .trigger(PlayerAction::Hit, tuning.hit_action_ticks);

    let anchor = Vec3::new(0.0, 0.0, state.world.camera.position + DAMAGE_BURST_DEPTH);
    state.particles.spawn(
        &mut state.fx_rng,
        anchor,
        FeedbackColor::Red,
        tuning.miss_particles,
        tuning.particle_jitter,
        tuning.particle_speed,
    );

    log::debug!(
        "Missed tile {}: health {}",
        state.world.current_tile_index,
        state.session.health
    );
    if game_over {
        log::info!("Game over with score {}", state.session.score);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::sequencer::ScriptedTiles;
    use crate::sim::state::{Lifecycle, TileKind};
    use crate::tuning::Tuning;

    fn playing_state(source: &mut ScriptedTiles) -> GameState {
        let mut state = GameState::new(Tuning::default(), 1);
        state.tiles.seed(source, 10);
        state.session.lifecycle = Lifecycle::Playing;
        state
    }

    #[test]
    fn test_clear_enemy_with_attack() {
        let mut source = ScriptedTiles::new([TileKind::Enemy, TileKind::Gap]);
        let mut state = playing_state(&mut source);

        let outcome = resolve(&mut state, &mut source, Action::Attack);
        assert_eq!(outcome, Outcome::Cleared);
        assert_eq!(state.session.score, 100);
        assert_eq!(state.session.combo, 1);
        assert_eq!(state.world.current_tile_index, 1);
        assert_eq!(state.world.camera.target, 500.0);
        assert_eq!(state.world.freeze_ticks, 2);
        assert_eq!(state.player.action, PlayerAction::Attack);
        assert_eq!(state.player.timer, 8);
        assert_eq!(state.particles.len(), 15);
        assert!(state.particles.iter().all(|p| p.color == FeedbackColor::Cyan));
        assert!(state.particles.iter().all(|p| p.pos.z == 0.0));
        assert_eq!(state.tiles.last_spawned_index(), Some(10));
    }

    #[test]
    fn test_jump_clear_is_amber() {
        let mut source = ScriptedTiles::new([TileKind::Gap]);
        let mut state = playing_state(&mut source);

        assert_eq!(resolve(&mut state, &mut source, Action::Jump), Outcome::Cleared);
        assert_eq!(state.player.action, PlayerAction::Jump);
        assert!(state.particles.iter().all(|p| p.color == FeedbackColor::Amber));
    }

    #[test]
    fn test_miss_on_gap_with_attack() {
        let mut source = ScriptedTiles::new([TileKind::Enemy, TileKind::Gap]);
        let mut state = playing_state(&mut source);
        resolve(&mut state, &mut source, Action::Attack);

        let outcome = resolve(&mut state, &mut source, Action::Attack);
        assert_eq!(outcome, Outcome::Missed);
        assert_eq!(state.session.health, 2);
        assert_eq!(state.session.combo, 0);
        assert_eq!(state.session.score, 100);
        assert_eq!(state.world.current_tile_index, 1);
        assert_eq!(state.world.camera.shake, 40.0);
        assert_eq!(state.world.freeze_ticks, 5);
        assert_eq!(state.player.action, PlayerAction::Hit);
        assert_eq!(state.player.timer, 15);
        assert_eq!(
            state.particles.iter().filter(|p| p.color == FeedbackColor::Red).count(),
            30
        );
    }

    #[test]
    fn test_last_health_ends_run() {
        let mut source = ScriptedTiles::new([TileKind::Gap]);
        let mut state = playing_state(&mut source);
        state.session.health = 1;

        assert_eq!(resolve(&mut state, &mut source, Action::Attack), Outcome::Missed);
        assert_eq!(state.session.health, 0);
        assert_eq!(state.session.lifecycle, Lifecycle::GameOver);

        let before = state.snapshot();
        let head = state.world.current_tile_index;
        assert_eq!(resolve(&mut state, &mut source, Action::Jump), Outcome::Ignored);
        assert_eq!(state.snapshot(), before);
        assert_eq!(state.world.current_tile_index, head);
    }

    #[test]
    fn test_ignored_outside_play() {
        let mut source = ScriptedTiles::new([TileKind::Enemy]);
        let mut state = GameState::new(Tuning::default(), 1);
        state.tiles.seed(&mut source, 10);

        assert_eq!(resolve(&mut state, &mut source, Action::Attack), Outcome::Ignored);
        assert_eq!(state.session.score, 0);
        assert!(state.particles.is_empty());
    }

    #[test]
    fn test_ignored_without_head_tile() {
        let mut source = ScriptedTiles::new([TileKind::Enemy]);
        let mut state = GameState::new(Tuning::default(), 1);
        state.session.lifecycle = Lifecycle::Playing;

        assert_eq!(resolve(&mut state, &mut source, Action::Attack), Outcome::Ignored);
        assert_eq!(state.session.health, 3);
    }
}
