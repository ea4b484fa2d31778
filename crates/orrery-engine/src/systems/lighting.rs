//! Directional sun lighting for the planet and satellites.
//!
//! The sun is far enough away that its light is treated as directional:
//! every lit surface sees the same direction, `normalize(sun_position)`.

use bytemuck::{Pod, Zeroable};
use glam::Vec3;

/// Ambient term used when shading the planet.
pub const PLANET_AMBIENT: f32 = 0.3;
/// Ambient term used when shading satellites.
pub const SATELLITE_AMBIENT: f32 = 0.2;
/// HDR light color (white, overdriven for the bloom-ish look).
pub const SUN_LIGHT_COLOR: Vec3 = Vec3::splat(3.0);

/// A directional light with a scalar ambient term.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectionalLight {
    /// Unit vector pointing from the origin towards the light.
    pub direction: Vec3,
    pub color: Vec3,
    pub ambient: f32,
}

impl DirectionalLight {
    /// Light arriving from `source`, as seen from the world origin.
    /// A source at the origin falls back to straight up.
    pub fn from_source(source: Vec3) -> Self {
        Self {
            direction: source.try_normalize().unwrap_or(Vec3::Y),
            color: SUN_LIGHT_COLOR,
            ambient: PLANET_AMBIENT,
        }
    }

    pub fn with_color(mut self, color: Vec3) -> Self {
        self.color = color;
        self
    }

    pub fn with_ambient(mut self, ambient: f32) -> Self {
        self.ambient = ambient;
        self
    }

    /// Lambert term for a surface normal, before ambient.
    pub fn diffuse(&self, normal: Vec3) -> f32 {
        normal.dot(self.direction).max(0.0)
    }
}

/// Scene lighting: one sun light with separate ambient levels per body kind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lighting {
    pub sun: DirectionalLight,
    pub satellite_ambient: f32,
    /// Center of the occluding planet (satellites behind it are shadowed).
    pub occluder_center: Vec3,
    pub occluder_radius: f32,
}

impl Lighting {
    pub fn from_sun(sun_position: Vec3) -> Self {
        Self {
            sun: DirectionalLight::from_source(sun_position),
            satellite_ambient: SATELLITE_AMBIENT,
            occluder_center: Vec3::ZERO,
            occluder_radius: 1.0,
        }
    }

    pub fn uniform(&self) -> LightUniform {
        let d = self.sun.direction;
        let c = self.sun.color;
        let o = self.occluder_center;
        LightUniform {
            direction: [d.x, d.y, d.z, 0.0],
            color: [c.x, c.y, c.z, 0.0],
            occluder: [o.x, o.y, o.z, self.occluder_radius],
            ambient: [self.sun.ambient, self.satellite_ambient, 0.0, 0.0],
        }
    }
}

/// Wire format (16 floats):
/// `[dir.xyz, _, color.rgb, _, occluder.xyz, radius, planet_ambient, satellite_ambient, _, _]`
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct LightUniform {
    pub direction: [f32; 4],
    pub color: [f32; 4],
    pub occluder: [f32; 4],
    pub ambient: [f32; 4],
}

impl LightUniform {
    pub const FLOATS: usize = 16;
}
