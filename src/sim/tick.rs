//! Per-frame simulation tick
//!
//! Order matters: camera, then (unless frozen) particles and the avatar
//! timer, then pruning. Rendering always follows a completed tick.

use super::state::GameState;

/// Advance the game state by one frame
pub fn tick(state: &mut GameState) {
    state.time_ticks += 1;

    let tuning = &state.tuning;
    let world = &mut state.world;

    // Camera never stops, not even during hit-stop
    world
        .camera
        .advance(tuning.camera_lerp, tuning.snap_distance);
    world.camera.decay_shake(tuning.shake_decay);

    if world.is_frozen() {
        world.freeze_ticks -= 1;
    } else {
        state.particles.integrate(tuning.particle_decay);
        state.player.decay(state.session.is_playing());
    }

    state.particles.prune();
}
