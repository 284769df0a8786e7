//! Engine facade
//!
//! Owns the authoritative state and the tile source. Hosts drive it with
//! lifecycle commands, resolver input and one `tick` per frame, and read it
//! back through `snapshot` (overlays) or `state` (renderer).

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::resolve::{Outcome, resolve};
use super::sequencer::TileSource;
use super::state::{Action, GameState, Lifecycle, Snapshot};
use super::tick::tick;
use crate::tuning::Tuning;

pub struct Engine {
    state: GameState,
    source: Box<dyn TileSource>,
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine").field("state", &self.state).finish_non_exhaustive()
    }
}

impl Engine {
    /// Seeded engine with random 50/50 tiles
    pub fn new(tuning: Tuning, seed: u64) -> Self {
        // Distinct stream so cosmetic draws never shift the tile sequence
        let tiles = Pcg32::seed_from_u64(seed);
        Self::with_source(tuning, Box::new(tiles), seed ^ 0x9E37_79B9_7F4A_7C15)
    }

    /// Engine with an injected tile source
    pub fn with_source(tuning: Tuning, mut source: Box<dyn TileSource>, fx_seed: u64) -> Self {
        let mut state = GameState::new(tuning, fx_seed);
        let lookahead = state.tuning.lookahead;
        state.tiles.seed(source.as_mut(), lookahead);
        Self { state, source }
    }

    /// Leave the title screen
    pub fn begin(&mut self) -> bool {
        if self.state.session.lifecycle != Lifecycle::Start {
            return false;
        }
        self.state.session.lifecycle = Lifecycle::Playing;
        log::info!("Run started");
        true
    }

    /// Full reset from game over, straight back into play
    pub fn retry(&mut self) -> bool {
        if self.state.session.lifecycle != Lifecycle::GameOver {
            return false;
        }
        let tuning = self.state.tuning.clone();
        let fx_rng = self.state.fx_rng.clone();

        let mut state = GameState::new(tuning, 0);
        state.fx_rng = fx_rng;
        let lookahead = state.tuning.lookahead;
        state.tiles.seed(self.source.as_mut(), lookahead);
        state.session.lifecycle = Lifecycle::Playing;
        self.state = state;

        log::info!("Run restarted");
        true
    }

    /// Resolver input entry point
    pub fn resolve(&mut self, action: Action) -> Outcome {
        resolve(&mut self.state, self.source.as_mut(), action)
    }

    /// Advance one frame
    pub fn tick(&mut self) {
        tick(&mut self.state);
    }

    pub fn snapshot(&self) -> Snapshot {
        self.state.snapshot()
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// This frame's random shake offset (draws from the cosmetic RNG)
    pub fn shake_offset(&mut self) -> Vec2 {
        let GameState { world, fx_rng, .. } = &mut self.state;
        world.camera.shake_offset(fx_rng)
    }

    pub fn tuning(&self) -> &Tuning {
        &self.state.tuning
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::player::PlayerAction;
    use crate::sim::sequencer::ScriptedTiles;
    use crate::sim::state::TileKind;

    fn scripted(kinds: &[TileKind]) -> Engine {
        Engine::with_source(
            Tuning::default(),
            Box::new(ScriptedTiles::new(kinds.to_vec())),
            5,
        )
    }

    #[test]
    fn test_scenarios_a_and_b() {
        let mut engine = scripted(&[TileKind::Enemy, TileKind::Gap]);
        assert!(engine.begin());

        assert_eq!(engine.resolve(Action::Attack), Outcome::Cleared);
        let snap = engine.snapshot();
        assert_eq!((snap.score, snap.combo), (100, 1));
        assert_eq!(engine.state().world.current_tile_index, 1);

        assert_eq!(engine.resolve(Action::Attack), Outcome::Missed);
        let snap = engine.snapshot();
        assert_eq!((snap.health, snap.combo, snap.score), (2, 0, 100));
    }

    #[test]
    fn test_input_ignored_on_title_screen() {
        let mut engine = scripted(&[TileKind::Enemy]);
        assert_eq!(engine.resolve(Action::Attack), Outcome::Ignored);
        assert_eq!(engine.snapshot().lifecycle, Lifecycle::Start);
        assert!(!engine.retry(), "retry is only valid after game over");
    }

    #[test]
    fn test_retry_resets_everything() {
        let mut engine = scripted(&[TileKind::Enemy]);
        engine.begin();
        for _ in 0..4 {
            engine.resolve(Action::Attack);
        }
        for _ in 0..3 {
            engine.resolve(Action::Jump);
        }
        assert_eq!(engine.snapshot().lifecycle, Lifecycle::GameOver);
        assert!(!engine.begin());

        assert!(engine.retry());
        let snap = engine.snapshot();
        assert_eq!(snap.lifecycle, Lifecycle::Playing);
        assert_eq!((snap.health, snap.score, snap.combo), (3, 0, 0));

        let state = engine.state();
        assert_eq!(state.world.current_tile_index, 0);
        assert_eq!(state.world.camera.position, 0.0);
        assert_eq!(state.world.camera.shake, 0.0);
        assert_eq!(state.player.action, PlayerAction::Idle);
        assert!(state.particles.is_empty());
        let indices: Vec<u32> = state.tiles.iter().map(|t| t.index).collect();
        assert_eq!(indices, (0..10).collect::<Vec<_>>());
    }

    #[test]
    fn test_seeded_engines_agree() {
        let mut a = Engine::new(Tuning::default(), 77);
        let mut b = Engine::new(Tuning::default(), 77);
        let kinds = |e: &Engine| e.state().tiles.iter().map(|t| t.kind).collect::<Vec<_>>();
        assert_eq!(kinds(&a), kinds(&b));

        a.begin();
        b.begin();
        for _ in 0..30 {
            let action = a.state().current_tile().map(|t| t.kind.required_action());
            if let Some(action) = action {
                a.resolve(action);
                b.resolve(action);
            }
            a.tick();
            b.tick();
        }
        assert_eq!(a.snapshot(), b.snapshot());
        assert_eq!(a.snapshot().score, b.snapshot().score);
    }
}
