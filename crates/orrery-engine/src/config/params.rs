//! Live animation parameters.
//!
//! `SceneParams` is owned by the engine context and only changes through
//! `ControlEvent`s or a JSON reload, never through shared globals.

use serde::{Deserialize, Serialize};

use crate::input::queue::ControlEvent;

/// How the comet population decides how many comets to spawn per tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpawnPolicy {
    /// One Bernoulli trial with `p = spawn_rate * dt`; at most one spawn per tick.
    #[default]
    PerTick,
    /// Poisson draw with mean `spawn_rate * dt`; several spawns per tick possible.
    Poisson,
}

/// Comet population configuration.
///
/// Comets enter on the `x = spawn_x` plane, travel towards +X and are
/// removed once their head reaches `exit_x`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CometConfig {
    /// X coordinate of the spawn plane.
    pub spawn_x: f32,
    /// X coordinate past which comets are removed.
    pub exit_x: f32,
    /// Full width of the Y/Z jitter on the spawn plane.
    pub spawn_jitter: f32,
    /// Minimum speed along +X.
    pub speed_min: f32,
    /// Maximum speed along +X.
    pub speed_max: f32,
    /// Full width of the Y/Z velocity drift.
    pub drift: f32,
    /// Expected spawns per second.
    pub spawn_rate: f32,
    pub spawn_policy: SpawnPolicy,
    /// Number of past head positions kept for the tail.
    pub tail_length: usize,
    /// Head point-sprite size.
    pub head_size: f32,
    /// Population cap (matches the renderer's comet buffer capacity).
    pub max_comets: usize,
}

impl Default for CometConfig {
    fn default() -> Self {
        Self {
            spawn_x: -50.0,
            exit_x: 100.0,
            spawn_jitter: 10.0,
            speed_min: 5.0,
            speed_max: 205.0,
            drift: 2.0,
            spawn_rate: 1.8,
            spawn_policy: SpawnPolicy::PerTick,
            tail_length: 20,
            head_size: 4.0,
            max_comets: 64,
        }
    }
}

/// Replace NaN and negatives with zero.
fn non_negative(value: f32) -> f32 {
    if value >= 0.0 {
        value
    } else {
        0.0
    }
}

impl CometConfig {
    /// Clamp caller mistakes into a usable configuration instead of failing.
    pub fn sanitized(mut self) -> Self {
        self.tail_length = self.tail_length.max(1);
        self.spawn_rate = non_negative(self.spawn_rate);
        self.spawn_jitter = self.spawn_jitter.abs();
        self.drift = self.drift.abs();
        self.head_size = non_negative(self.head_size);
        if !(self.speed_max >= self.speed_min) {
            self.speed_max = self.speed_min;
        }
        // Fresh spawns must start inside the volume
        if !(self.exit_x > self.spawn_x) {
            self.exit_x = self.spawn_x + 1.0;
        }
        self
    }
}

/// Animation parameters exposed to the GUI panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneParams {
    /// Planet spin in radians per tick.
    pub planet_rotation_speed: f32,
    /// Orbit speed of the innermost satellite.
    pub satellite_base_speed: f32,
    /// Toggle thruster trails on/off.
    pub thruster_enabled: bool,
    /// Thruster particle lifetime in seconds.
    pub thruster_lifetime: f32,
    /// Thruster particle point size.
    pub point_size: f32,
    pub comets: CometConfig,
}

impl Default for SceneParams {
    fn default() -> Self {
        Self {
            planet_rotation_speed: 0.01,
            satellite_base_speed: 0.5,
            thruster_enabled: true,
            thruster_lifetime: 0.4,
            point_size: 5.0,
            comets: CometConfig::default(),
        }
    }
}

impl SceneParams {
    pub const PLANET_SPEED_RANGE: (f32, f32) = (0.0, 0.1);
    pub const SATELLITE_SPEED_RANGE: (f32, f32) = (0.0, 2.0);
    pub const THRUSTER_LIFETIME_RANGE: (f32, f32) = (0.1, 2.0);
    pub const POINT_SIZE_RANGE: (f32, f32) = (1.0, 10.0);

    /// Parse params from a JSON string. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<Self>(json).map(Self::sanitized)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Clamp every slider into the range the GUI exposes.
    pub fn sanitized(mut self) -> Self {
        self.planet_rotation_speed = clamp_range(self.planet_rotation_speed, Self::PLANET_SPEED_RANGE);
        self.satellite_base_speed = clamp_range(self.satellite_base_speed, Self::SATELLITE_SPEED_RANGE);
        self.thruster_lifetime = clamp_range(self.thruster_lifetime, Self::THRUSTER_LIFETIME_RANGE);
        self.point_size = clamp_range(self.point_size, Self::POINT_SIZE_RANGE);
        self.comets = self.comets.sanitized();
        self
    }

    /// Apply a control event. Returns true if the event changed a parameter.
    pub fn apply(&mut self, event: &ControlEvent) -> bool {
        let before = self.clone();
        match *event {
            ControlEvent::SetPlanetSpeed(v) => {
                self.planet_rotation_speed = clamp_range(v, Self::PLANET_SPEED_RANGE);
            }
            ControlEvent::SetSatelliteSpeed(v) => {
                self.satellite_base_speed = clamp_range(v, Self::SATELLITE_SPEED_RANGE);
            }
            ControlEvent::SetThrusterEnabled(on) => {
                self.thruster_enabled = on;
            }
            ControlEvent::SetThrusterLifetime(v) => {
                self.thruster_lifetime = clamp_range(v, Self::THRUSTER_LIFETIME_RANGE);
            }
            ControlEvent::SetPointSize(v) => {
                self.point_size = clamp_range(v, Self::POINT_SIZE_RANGE);
            }
            ControlEvent::SetCometSpawnRate(v) => {
                self.comets.spawn_rate = non_negative(v);
            }
            ControlEvent::ResetCamera | ControlEvent::Resize { .. } => {}
        }
        *self != before
    }
}

/// Clamp into `[lo, hi]`, mapping NaN to `lo`.
fn clamp_range(value: f32, (lo, hi): (f32, f32)) -> f32 {
    if value.is_nan() {
        lo
    } else {
        value.clamp(lo, hi)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_scene() {
        let p = SceneParams::default();
        assert_eq!(p.planet_rotation_speed, 0.01);
        assert_eq!(p.satellite_base_speed, 0.5);
        assert!(p.thruster_enabled);
        assert_eq!(p.thruster_lifetime, 0.4);
        assert_eq!(p.comets.tail_length, 20);
        assert_eq!(p.comets.exit_x, 100.0);
        assert_eq!(p.comets.spawn_policy, SpawnPolicy::PerTick);
    }

    #[test]
    fn parse_partial_json_keeps_defaults() {
        let json = r#"{
            "satellite_base_speed": 1.5,
            "comets": { "spawn_rate": 3.0, "spawn_policy": "poisson" }
        }"#;
        let p = SceneParams::from_json(json).unwrap();
        assert_eq!(p.satellite_base_speed, 1.5);
        assert_eq!(p.planet_rotation_speed, 0.01);
        assert_eq!(p.comets.spawn_rate, 3.0);
        assert_eq!(p.comets.spawn_policy, SpawnPolicy::Poisson);
        assert_eq!(p.comets.tail_length, 20);
    }

    #[test]
    fn parse_rejects_malformed_json() {
        assert!(SceneParams::from_json("{ not json").is_err());
        assert!(SceneParams::from_json(r#"{ "thruster_enabled": "yes" }"#).is_err());
    }

    #[test]
    fn json_roundtrip_of_defaults() {
        let json = SceneParams::default().to_json().unwrap();
        assert_eq!(SceneParams::from_json(&json).unwrap(), SceneParams::default());
    }

    #[test]
    fn comet_config_sanitized() {
        let c = CometConfig {
            tail_length: 0,
            spawn_rate: -2.0,
            speed_min: 50.0,
            speed_max: 10.0,
            drift: -4.0,
            ..CometConfig::default()
        }
        .sanitized();
        assert_eq!(c.tail_length, 1);
        assert_eq!(c.spawn_rate, 0.0);
        assert_eq!(c.speed_max, 50.0);
        assert_eq!(c.drift, 4.0);

        let nan = CometConfig { spawn_rate: f32::NAN, ..CometConfig::default() }.sanitized();
        assert_eq!(nan.spawn_rate, 0.0);
    }

    #[test]
    fn json_values_are_clamped() {
        let p = SceneParams::from_json(r#"{ "point_size": 50.0, "thruster_lifetime": 0.0 }"#).unwrap();
        assert_eq!(p.point_size, 10.0);
        assert_eq!(p.thruster_lifetime, 0.1);
    }

    #[test]
    fn apply_control_events() {
        let mut p = SceneParams::default();
        assert!(p.apply(&ControlEvent::SetPlanetSpeed(0.05)));
        assert_eq!(p.planet_rotation_speed, 0.05);
        assert!(p.apply(&ControlEvent::SetThrusterEnabled(false)));
        assert!(!p.thruster_enabled);
        assert!(p.apply(&ControlEvent::SetSatelliteSpeed(9.0)));
        assert_eq!(p.satellite_base_speed, 2.0);
        assert!(p.apply(&ControlEvent::SetCometSpawnRate(-1.0)));
        assert_eq!(p.comets.spawn_rate, 0.0);
        // Camera events are not parameters
        assert!(!p.apply(&ControlEvent::ResetCamera));
        // Same value twice is not a change
        assert!(!p.apply(&ControlEvent::SetPlanetSpeed(0.05)));
    }
}
