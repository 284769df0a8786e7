//! Property-based tests for run invariants.
//!
//! Run with: cargo test --release --test properties

#![allow(clippy::unwrap_used)]

use glam::Vec2;
use proptest::prelude::*;

use ninja_dash::renderer::build_frame;
use ninja_dash::sim::{Action, Camera, Outcome};
use ninja_dash::{Engine, Lifecycle, Tuning};

fn action_strategy() -> impl Strategy<Value = Action> {
    prop_oneof![Just(Action::Attack), Just(Action::Jump)]
}

/// Input interleaved with a few ticks of frame time
fn step_strategy() -> impl Strategy<Value = (Action, u8)> {
    (action_strategy(), 0u8..30)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// Health stays in range, score never drops, combo only resets on a miss.
    #[test]
    fn prop_session_invariants(seed in any::<u64>(), steps in prop::collection::vec(step_strategy(), 1..200)) {
        let tuning = Tuning::default();
        let max_health = tuning.max_health;
        let mut engine = Engine::new(tuning, seed);
        engine.begin();

        for (action, ticks) in steps {
            let before = engine.snapshot();
            let outcome = engine.resolve(action);
            let after = engine.snapshot();

            prop_assert!(after.health <= max_health);
            prop_assert!(after.score >= before.score);
            match outcome {
                Outcome::Cleared => {
                    prop_assert_eq!(after.combo, before.combo + 1);
                    prop_assert_eq!(after.health, before.health);
                }
                Outcome::Missed => {
                    prop_assert_eq!(after.combo, 0);
                    prop_assert_eq!(after.score, before.score);
                    prop_assert_eq!(after.health, before.health - 1);
                }
                Outcome::Ignored => {
                    prop_assert_eq!(after, before);
                    prop_assert_eq!(before.lifecycle, Lifecycle::GameOver);
                }
            }
            prop_assert_eq!(after.lifecycle == Lifecycle::GameOver, after.health == 0);

            for _ in 0..ticks {
                engine.tick();
                prop_assert_eq!(engine.snapshot(), after);
            }
        }
    }

    /// A clear moves the head by one and keeps the lookahead window filled.
    #[test]
    fn prop_clear_advances_head(seed in any::<u64>(), clears in 1usize..120, ticks in 0u8..10) {
        let mut engine = Engine::new(Tuning::default(), seed);
        let lookahead = engine.tuning().lookahead;
        engine.begin();

        for _ in 0..clears {
            let head = engine.state().world.current_tile_index;
            let required = engine.state().current_tile().unwrap().kind.required_action();
            prop_assert_eq!(engine.resolve(required), Outcome::Cleared);

            let state = engine.state();
            prop_assert_eq!(state.world.current_tile_index, head + 1);
            let last = state.tiles.last_spawned_index().unwrap();
            prop_assert!(state.tiles.get(last).is_some());
            prop_assert!(last >= head + lookahead);
            prop_assert!(state.current_tile().is_some(), "head tile evicted");
            prop_assert!(state.tiles.front_index().unwrap() <= head + 1);

            for _ in 0..ticks {
                engine.tick();
            }
        }
    }

    /// The eased camera settles on any target within a bounded number of ticks.
    #[test]
    fn prop_camera_converges(start in -5000.0f32..5000.0, gap in 0.0f32..5000.0) {
        let tuning = Tuning::default();
        let mut camera = Camera {
            position: start,
            target: start + gap,
            shake: 0.0,
        };
        let mut ticks = 0;
        while !camera.settled() {
            camera.advance(tuning.camera_lerp, tuning.snap_distance);
            ticks += 1;
            prop_assert!(ticks <= 32, "camera still {} away", camera.target - camera.position);
        }
    }

    /// Particles hold during hit-stop, then lose a fixed slice of life per tick.
    #[test]
    fn prop_particle_life_decays_after_freeze(seed in any::<u64>(), live_ticks in 0u32..19) {
        let mut engine = Engine::new(Tuning::default(), seed);
        let decay = engine.tuning().particle_decay;
        let freeze = engine.tuning().clear_freeze;
        engine.begin();

        let required = engine.state().current_tile().unwrap().kind.required_action();
        engine.resolve(required);

        for _ in 0..freeze {
            engine.tick();
        }
        prop_assert!(engine.state().particles.iter().all(|p| p.life == 1.0));

        for _ in 0..live_ticks {
            engine.tick();
        }
        let expected = 1.0 - decay * live_ticks as f32;
        prop_assert!(!engine.state().particles.is_empty());
        for p in engine.state().particles.iter() {
            prop_assert!((p.life - expected).abs() < 1e-4, "life {} expected {}", p.life, expected);
        }
    }

    /// Tiles are always painted far to near.
    #[test]
    fn prop_tiles_painted_far_to_near(seed in any::<u64>(), clears in 0usize..40, width in 200.0f32..2000.0, height in 200.0f32..2000.0) {
        let mut engine = Engine::new(Tuning::default(), seed);
        engine.begin();
        for _ in 0..clears {
            let required = engine.state().current_tile().unwrap().kind.required_action();
            engine.resolve(required);
            engine.tick();
        }

        let shake = engine.shake_offset();
        let frame = build_frame(engine.state(), Vec2::new(width, height), shake);
        let order = frame.tile_order();
        prop_assert!(!order.is_empty());
        prop_assert!(order.windows(2).all(|w| w[0] > w[1]), "order {:?}", order);
    }
}
