//! The comet population: spawning, motion, exit removal and frame output.

use glam::Vec3;

use crate::components::comet::Comet;
use crate::config::{CometConfig, SpawnPolicy};
use crate::core::rng::Rng;
use crate::renderer::instance::{CometHead, FrameBuffers, TailVertex};

/// Emissive multiplier of the head sprite.
pub const HEAD_INTENSITY: f32 = 3.0;
/// Glow sprite size relative to the head.
pub const GLOW_SCALE: f32 = 1.8;
pub const GLOW_INTENSITY: f32 = 2.5;
/// Tail line thickness in pixels.
pub const TAIL_WIDTH: f32 = 20.0;
pub const TAIL_GLOW: f32 = 2.0;

/// Membership changes from one `CometSystem::update`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UpdateReport {
    pub removed: usize,
    pub spawned: usize,
}

impl UpdateReport {
    pub fn changed(&self) -> bool {
        self.removed > 0 || self.spawned > 0
    }
}

/// Owns every live comet.
///
/// After `update` returns, every member's head is strictly before the exit plane.
#[derive(Debug, Clone)]
pub struct CometSystem {
    comets: Vec<Comet>,
    config: CometConfig,
}

impl CometSystem {
    pub fn new(config: CometConfig) -> Self {
        let config = config.sanitized();
        Self {
            comets: Vec::with_capacity(config.max_comets),
            config,
        }
    }

    pub fn config(&self) -> &CometConfig {
        &self.config
    }

    /// Replace the configuration. Live comets keep their tail capacity.
    pub fn set_config(&mut self, config: CometConfig) {
        self.config = config.sanitized();
        if self.comets.len() > self.config.max_comets {
            self.comets.truncate(self.config.max_comets);
        }
    }

    /// Advance every comet, drop the ones past `exit_x`, then maybe spawn.
    pub fn update(&mut self, dt: f32, rng: &mut Rng) -> UpdateReport {
        for comet in &mut self.comets {
            comet.update(dt);
        }

        let before = self.comets.len();
        let exit_x = self.config.exit_x;
        self.comets.retain(|c| !c.has_exited(exit_x));
        let removed = before - self.comets.len();

        let room = self.config.max_comets.saturating_sub(self.comets.len());
        let expected = self.config.spawn_rate * dt;
        let wanted = match self.config.spawn_policy {
            SpawnPolicy::PerTick => usize::from(rng.chance(expected)),
            SpawnPolicy::Poisson => rng.poisson(f64::from(expected), room as u32) as usize,
        };
        let spawned = wanted.min(room);
        for _ in 0..spawned {
            self.comets.push(Comet::spawn(&self.config, rng));
        }

        let report = UpdateReport { removed, spawned };
        if report.changed() {
            log::debug!(
                "comets: -{} +{} (live {})",
                removed,
                spawned,
                self.comets.len()
            );
        }
        report
    }

    /// Add a comet directly. Returns false when the population is full.
    pub fn insert(&mut self, comet: Comet) -> bool {
        if self.comets.len() >= self.config.max_comets {
            return false;
        }
        self.comets.push(comet);
        true
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = &Comet> + '_ {
        self.comets.iter()
    }

    pub fn len(&self) -> usize {
        self.comets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.comets.is_empty()
    }

    pub fn clear(&mut self) {
        self.comets.clear();
    }

    /// Write one head/glow record and one tail strip per comet.
    /// `reference` orients the tails (the sun). Returns the number written.
    pub fn write_frame(&self, reference: Vec3, frame: &mut FrameBuffers) -> usize {
        let mut written = 0;
        for comet in &self.comets {
            let head = comet.head_position();
            let dir = comet.tail_direction(reference);
            let size = comet.head_size();
            let record = CometHead {
                x: head.x,
                y: head.y,
                z: head.z,
                size,
                dir_x: dir.x,
                dir_y: dir.y,
                dir_z: dir.z,
                glow_size: size * GLOW_SCALE,
                intensity: HEAD_INTENSITY,
                glow_intensity: GLOW_INTENSITY,
                tail_width: TAIL_WIDTH,
                tail_glow: TAIL_GLOW,
            };
            let tail = comet.tail_points().map(|p| TailVertex::new(p.position, p.t));
            if frame.push_comet(record, tail) {
                written += 1;
            }
        }
        written
    }
}

impl Default for CometSystem {
    fn default() -> Self {
        Self::new(CometConfig::default())
    }
}
