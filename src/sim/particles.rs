//! Ephemeral hit/damage particles

use glam::Vec3;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::state::{FeedbackColor, Particle};

/// Live particle pool with a hard cap (oldest dropped first)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Particles {
    items: Vec<Particle>,
    cap: usize,
}

impl Particles {
    pub fn new(cap: usize) -> Self {
        Self {
            items: Vec::new(),
            cap,
        }
    }

    /// Burst `count` particles around `anchor`.
    /// `jitter` and `speed` are full ranges centered on zero.
    pub fn spawn(
        &mut self,
        rng: &mut impl Rng,
        anchor: Vec3,
        color: FeedbackColor,
        count: usize,
        jitter: f32,
        speed: f32,
    ) {
        let mut centered = |range: f32| (rng.random::<f32>() - 0.5) * range;
        for _ in 0..count {
            let pos = Vec3::new(
                anchor.x + centered(jitter),
                anchor.y + centered(jitter),
                anchor.z,
            );
            let vel = Vec3::new(centered(speed), centered(speed), centered(speed));
            self.items.push(Particle {
                pos,
                vel,
                life: 1.0,
                color,
            });
        }

        if self.items.len() > self.cap {
            let excess = self.items.len() - self.cap;
            self.items.drain(..excess);
        }
    }

    /// Move and age every particle (skipped during hit-stop)
    pub fn integrate(&mut self, decay: f32) {
        for p in self.items.iter_mut() {
            p.pos += p.vel;
            p.life -= decay;
        }
    }

    /// Drop dead particles (runs every tick)
    pub fn prune(&mut self) {
        self.items.retain(|p| p.life > 0.0);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
