use glam::Vec3;

use crate::core::ring::RingBuffer;
use crate::core::rng::Rng;
use crate::renderer::instance::ParticleVertex;

/// Default particle budget per thruster.
pub const DEFAULT_MAX_PARTICLES: usize = 20;
/// Full width of the random offset cube around the emission point.
pub const PLUME_SPREAD: f32 = 0.02;

/// A short-lived exhaust particle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub position: Vec3,
    /// Seconds left before the particle disappears.
    pub life: f32,
}

/// Exhaust trail: a bounded set of fading particles.
///
/// When full, each new particle evicts the oldest one.
#[derive(Debug, Clone)]
pub struct Thruster {
    particles: RingBuffer<Particle>,
    spread: f32,
}

impl Thruster {
    pub fn new(max_particles: usize) -> Self {
        Self {
            particles: RingBuffer::new(max_particles),
            spread: PLUME_SPREAD,
        }
    }

    pub fn with_spread(mut self, spread: f32) -> Self {
        self.spread = spread.abs();
        self
    }

    /// Emit one particle near `base` that lives for `lifetime` seconds.
    pub fn emit(&mut self, base: Vec3, lifetime: f32, rng: &mut Rng) {
        let offset = Vec3::new(
            rng.symmetric(self.spread),
            rng.symmetric(self.spread),
            rng.symmetric(self.spread),
        );
        self.particles.push(Particle {
            position: base + offset,
            life: lifetime,
        });
    }

    /// Age every particle by `dt` and drop the expired ones.
    pub fn update(&mut self, dt: f32) {
        for particle in self.particles.iter_mut() {
            particle.life -= dt;
        }
        self.particles.retain(|p| p.life > 0.0);
    }

    /// Live particles, oldest first.
    pub fn particles(&self) -> impl ExactSizeIterator<Item = &Particle> + '_ {
        self.particles.iter()
    }

    pub fn vertices(&self) -> impl Iterator<Item = ParticleVertex> + '_ {
        self.particles.iter().map(|p| ParticleVertex {
            x: p.position.x,
            y: p.position.y,
            z: p.position.z,
            life: p.life,
        })
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.particles.capacity()
    }

    pub fn clear(&mut self) {
        self.particles.clear();
    }
}

impl Default for Thruster {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_PARTICLES)
    }
}
