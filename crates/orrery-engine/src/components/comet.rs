//! A single comet: linear motion plus a bounded trail of past head positions.

use glam::Vec3;

use crate::config::CometConfig;
use crate::core::ring::RingBuffer;
use crate::core::rng::Rng;

/// Below this head-to-reference distance the tail direction is undefined.
pub const TAIL_EPSILON: f32 = 1e-4;

/// Tail direction used when the head sits on the reference point.
pub const FALLBACK_DIRECTION: Vec3 = Vec3::X;

/// One vertex of a comet tail polyline.
///
/// `t` is the normalized position along the stored history: `0.0` for the
/// oldest entry, `1.0` for the newest. The renderer maps it to opacity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TailPoint {
    pub position: Vec3,
    pub t: f32,
}

/// Tail polyline plus the head's direction away from the reference point.
#[derive(Debug, Clone, PartialEq)]
pub struct TailGeometry {
    /// Unit vector from the reference point to the head.
    pub direction: Vec3,
    /// At least one point, in storage order (oldest first).
    pub points: Vec<TailPoint>,
}

#[derive(Debug, Clone)]
pub struct Comet {
    head: Vec3,
    velocity: Vec3,
    history: RingBuffer<Vec3>,
    head_size: f32,
}

impl Comet {
    /// A comet at `head` moving with constant `velocity`, remembering up to
    /// `tail_length` past head positions.
    pub fn new(head: Vec3, velocity: Vec3, tail_length: usize) -> Self {
        Self {
            head,
            velocity,
            history: RingBuffer::new(tail_length),
            head_size: CometConfig::default().head_size,
        }
    }

    pub fn with_head_size(mut self, size: f32) -> Self {
        self.head_size = size;
        self
    }

    /// Spawn on the `x = spawn_x` plane with jittered Y/Z and a mostly +X velocity.
    pub fn spawn(config: &CometConfig, rng: &mut Rng) -> Self {
        let head = Vec3::new(
            config.spawn_x,
            rng.symmetric(config.spawn_jitter),
            rng.symmetric(config.spawn_jitter),
        );
        let velocity = Vec3::new(
            rng.range(config.speed_min, config.speed_max),
            rng.symmetric(config.drift),
            rng.symmetric(config.drift),
        );
        Self::new(head, velocity, config.tail_length).with_head_size(config.head_size)
    }

    /// Move the head by `velocity * dt` and record the new position.
    pub fn update(&mut self, dt: f32) {
        self.head += self.velocity * dt;
        self.history.push(self.head);
    }

    pub fn head_position(&self) -> Vec3 {
        self.head
    }

    pub fn velocity(&self) -> Vec3 {
        self.velocity
    }

    pub fn head_size(&self) -> f32 {
        self.head_size
    }

    /// Past head positions, oldest first.
    pub fn tail_history(&self) -> impl ExactSizeIterator<Item = &Vec3> + '_ {
        self.history.iter()
    }

    pub fn tail_len(&self) -> usize {
        self.history.len()
    }

    pub fn tail_capacity(&self) -> usize {
        self.history.capacity()
    }

    /// Unit vector from `reference` to the head, or `+X` if they coincide.
    pub fn tail_direction(&self, reference: Vec3) -> Vec3 {
        let offset = self.head - reference;
        let distance = offset.length();
        if distance > TAIL_EPSILON {
            offset / distance
        } else {
            FALLBACK_DIRECTION
        }
    }

    /// Lazily yield the tail polyline without allocating.
    ///
    /// An empty history yields the head alone with `t = 0`. A single entry
    /// also gets `t = 0`.
    pub fn tail_points(&self) -> impl Iterator<Item = TailPoint> + '_ {
        let n = self.history.len();
        let head_only = (n == 0).then_some(TailPoint {
            position: self.head,
            t: 0.0,
        });
        let last = n.saturating_sub(1).max(1) as f32;
        head_only
            .into_iter()
            .chain(self.history.iter().enumerate().map(move |(i, &position)| TailPoint {
                position,
                t: if n > 1 { i as f32 / last } else { 0.0 },
            }))
    }

    /// Build the tail for rendering, oriented relative to `reference` (the sun).
    pub fn tail_geometry(&self, reference: Vec3) -> TailGeometry {
        TailGeometry {
            direction: self.tail_direction(reference),
            points: self.tail_points().collect(),
        }
    }

    /// Whether the head has reached the exit plane.
    pub fn has_exited(&self, exit_x: f32) -> bool {
        self.head.x >= exit_x
    }
}
