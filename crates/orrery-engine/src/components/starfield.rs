use std::f32::consts::TAU;

use crate::core::rng::Rng;
use crate::renderer::instance::StarVertex;

pub const DEFAULT_STAR_COUNT: usize = 1000;
pub const DEFAULT_STAR_RADIUS: f32 = 200.0;

/// Background stars, generated once and never updated.
/// Twinkling is done in the shader from each star's phase and the frame time.
#[derive(Debug, Clone, Default)]
pub struct Starfield {
    stars: Vec<StarVertex>,
    radius: f32,
}

impl Starfield {
    /// Scatter `count` stars through a ball of `radius` around the origin.
    pub fn generate(count: usize, radius: f32, rng: &mut Rng) -> Self {
        let stars = (0..count)
            .map(|_| {
                let theta = rng.range(0.0, TAU);
                let phi = (2.0 * rng.next_f32() - 1.0).clamp(-1.0, 1.0).acos();
                let r = rng.next_f32() * radius;
                let (sin_phi, cos_phi) = phi.sin_cos();
                let (sin_theta, cos_theta) = theta.sin_cos();
                StarVertex {
                    x: r * sin_phi * cos_theta,
                    y: r * sin_phi * sin_theta,
                    z: r * cos_phi,
                    size: rng.range(1.0, 3.0),
                    phase: rng.range(0.0, TAU),
                    r: rng.range(0.9, 1.1),
                    g: rng.range(0.9, 1.0),
                    b: 1.0,
                }
            })
            .collect();
        Self { stars, radius }
    }

    pub fn stars(&self) -> &[StarVertex] {
        &self.stars
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn len(&self) -> usize {
        self.stars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stars.is_empty()
    }

    pub fn as_ptr(&self) -> *const f32 {
        bytemuck::cast_slice::<StarVertex, f32>(&self.stars).as_ptr()
    }
}
