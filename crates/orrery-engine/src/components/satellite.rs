use std::f32::consts::TAU;

use glam::{Mat4, Vec3};

use crate::core::rng::Rng;

/// Radius of the innermost satellite orbit.
pub const BASE_ORBIT_RADIUS: f32 = 3.0;
/// Radius increment per satellite index.
pub const ORBIT_RADIUS_STEP: f32 = 0.5;
/// Speed increment per satellite index.
pub const ORBIT_SPEED_STEP: f32 = 0.2;
/// Scale from orbit speed to radians per tick.
pub const ANGLE_PER_TICK: f32 = 0.01;
/// All satellites orbit in the `y = ORBIT_HEIGHT` plane.
pub const ORBIT_HEIGHT: f32 = 1.0;
/// Exhaust is emitted this far below the satellite body center.
pub const THRUSTER_DROP: f32 = 0.12;

/// A satellite on a circular orbit around the planet.
#[derive(Debug, Clone, PartialEq)]
pub struct Satellite {
    index: usize,
    pub orbit_radius: f32,
    pub orbit_speed: f32,
    pub angle: f32,
}

impl Satellite {
    /// The `index`-th satellite: each one orbits a little wider and faster.
    pub fn new(index: usize, base_speed: f32, angle: f32) -> Self {
        Self {
            index,
            orbit_radius: BASE_ORBIT_RADIUS + ORBIT_RADIUS_STEP * index as f32,
            orbit_speed: Self::speed_for(index, base_speed),
            angle,
        }
    }

    /// Like `new`, starting at a random point on the orbit.
    pub fn spawn(index: usize, base_speed: f32, rng: &mut Rng) -> Self {
        Self::new(index, base_speed, rng.range(0.0, TAU))
    }

    fn speed_for(index: usize, base_speed: f32) -> f32 {
        base_speed + ORBIT_SPEED_STEP * index as f32
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// Advance one tick, picking up the current base speed from the GUI.
    pub fn advance(&mut self, base_speed: f32) {
        self.orbit_speed = Self::speed_for(self.index, base_speed);
        self.angle = (self.angle + self.orbit_speed * ANGLE_PER_TICK) % TAU;
    }

    pub fn position(&self) -> Vec3 {
        let (sin, cos) = self.angle.sin_cos();
        Vec3::new(cos * self.orbit_radius, ORBIT_HEIGHT, sin * self.orbit_radius)
    }

    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_translation(self.position())
    }

    /// Where this satellite's exhaust particles are emitted.
    pub fn thruster_anchor(&self) -> Vec3 {
        self.position() - Vec3::new(0.0, THRUSTER_DROP, 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn orbits_widen_and_speed_up_by_index() {
        let sats: Vec<Satellite> = (0..4).map(|i| Satellite::new(i, 0.5, 0.0)).collect();
        assert_eq!(sats[0].orbit_radius, 3.0);
        assert_eq!(sats[3].orbit_radius, 4.5);
        assert_eq!(sats[0].orbit_speed, 0.5);
        assert!((sats[3].orbit_speed - 1.1).abs() < 1e-6);
    }

    #[test]
    fn stays_on_orbit_circle() {
        let mut rng = Rng::new(11);
        let mut sat = Satellite::spawn(2, 0.5, &mut rng);
        for _ in 0..1000 {
            sat.advance(1.5);
            let p = sat.position();
            let r = (p.x * p.x + p.z * p.z).sqrt();
            assert!((r - 4.0).abs() < 1e-4);
            assert_eq!(p.y, ORBIT_HEIGHT);
        }
    }

    #[test]
    fn advance_follows_live_base_speed() {
        let mut sat = Satellite::new(1, 0.5, 0.0);
        sat.advance(1.0);
        assert!((sat.orbit_speed - 1.2).abs() < 1e-6);
        assert!((sat.angle - 0.012).abs() < 1e-6);
        sat.advance(0.0);
        assert!((sat.angle - 0.014).abs() < 1e-6);
    }

    #[test]
    fn thruster_hangs_below_body() {
        let sat = Satellite::new(0, 0.5, 0.0);
        assert_eq!(sat.position(), Vec3::new(3.0, 1.0, 0.0));
        let anchor = sat.thruster_anchor();
        assert!((anchor - Vec3::new(3.0, 0.88, 0.0)).length() < 1e-6);
        assert_eq!(sat.model_matrix().w_axis.truncate(), sat.position());
    }
}
