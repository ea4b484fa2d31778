//! The two fixed bodies of the scene: the spinning planet and the sun.

use std::f32::consts::TAU;

use glam::{Mat4, Vec3};

/// The textured planet at the world origin, spinning about +Y.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Planet {
    pub rotation: f32,
}

impl Planet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Spin by `speed` radians (one tick's worth).
    pub fn spin(&mut self, speed: f32) {
        self.rotation = (self.rotation + speed) % TAU;
    }

    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_rotation_y(self.rotation)
    }

    pub fn center(&self) -> Vec3 {
        Vec3::ZERO
    }
}

pub const SUN_POSITION: Vec3 = Vec3::new(20.0, 1.0, 1.0);
pub const SUN_SCALE: f32 = 20.0;

/// Emissive sun. Also the light source and the comet tail reference point.
#[derive(Debug, Clone, PartialEq)]
pub struct Sun {
    pub position: Vec3,
    pub scale: f32,
}

impl Sun {
    pub fn new(position: Vec3, scale: f32) -> Self {
        Self { position, scale }
    }

    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_translation(self.position) * Mat4::from_scale(Vec3::splat(self.scale))
    }
}

impl Default for Sun {
    fn default() -> Self {
        Self::new(SUN_POSITION, SUN_SCALE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn planet_spins_about_y() {
        let mut planet = Planet::new();
        planet.spin(0.01);
        planet.spin(0.01);
        assert!((planet.rotation - 0.02).abs() < 1e-7);
        let x = planet.model_matrix().transform_vector3(Vec3::X);
        assert!((x.y).abs() < 1e-7);
        assert!((x.length() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn rotation_wraps() {
        let mut planet = Planet::new();
        for _ in 0..100 {
            planet.spin(1.0);
        }
        assert!(planet.rotation < TAU);
    }

    #[test]
    fn sun_model_translates_then_scales() {
        let sun = Sun::default();
        let p = sun.model_matrix().transform_point3(Vec3::new(0.5, 0.0, 0.0));
        assert!((p - Vec3::new(30.0, 1.0, 1.0)).length() < 1e-5);
    }
}
