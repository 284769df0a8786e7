//! World camera: eased dash toward the head, plus screen shake

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Shake below this is treated as settled
const SHAKE_EPSILON: f32 = 0.01;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Camera {
    /// Current (interpolated) world depth
    pub position: f32,
    /// Depth of the head tile
    pub target: f32,
    /// Screen shake magnitude in pixels
    pub shake: f32,
}

impl Camera {
    /// Ease toward the target, snapping once within `snap_distance`
    pub fn advance(&mut self, lerp: f32, snap_distance: f32) {
        let dist = self.target - self.position;
        if dist.abs() > snap_distance {
            self.position += dist * lerp;
        } else {
            self.position = self.target;
        }
    }

    /// Multiplicative shake decay (runs every tick, frozen or not)
    pub fn decay_shake(&mut self, decay: f32) {
        self.shake *= decay;
        if self.shake < SHAKE_EPSILON {
            self.shake = 0.0;
        }
    }

    pub fn kick(&mut self, magnitude: f32) {
        self.shake = magnitude;
    }

    /// Random per-frame offset scaled by the current shake
    pub fn shake_offset(&self, rng: &mut impl Rng) -> Vec2 {
        if self.shake <= 0.0 {
            return Vec2::ZERO;
        }
        let x = (rng.random::<f32>() - 0.5) * self.shake;
        let y = (rng.random::<f32>() - 0.5) * self.shake;
        Vec2::new(x, y)
    }

    /// Whether the camera has arrived at its target
    pub fn settled(&self) -> bool {
        self.position == self.target
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_advance_eases_then_snaps() {
        let mut cam = Camera {
            target: 500.0,
            ..Default::default()
        };
        cam.advance(0.25, 1.0);
        assert!((cam.position - 125.0).abs() < 1e-4);

        let mut ticks = 1;
        while !cam.settled() {
            cam.advance(0.25, 1.0);
            ticks += 1;
            assert!(ticks < 100);
        }
        assert_eq!(cam.position, 500.0);
        // ln(500) / ln(4/3) ~ 21.6, plus the snap tick
        assert!(ticks <= 24, "took {ticks} ticks");
    }

    #[test]
    fn test_shake_decays_to_zero() {
        let mut cam = Camera::default();
        cam.kick(40.0);
        cam.decay_shake(0.9);
        assert!((cam.shake - 36.0).abs() < 1e-4);
        for _ in 0..200 {
            cam.decay_shake(0.9);
        }
        assert_eq!(cam.shake, 0.0);
    }

    #[test]
    fn test_shake_offset_is_bounded() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut cam = Camera::default();
        assert_eq!(cam.shake_offset(&mut rng), Vec2::ZERO);

        cam.kick(40.0);
        for _ in 0..100 {
            let o = cam.shake_offset(&mut rng);
            assert!(o.x.abs() <= 20.0 && o.y.abs() <= 20.0);
        }
    }
}
