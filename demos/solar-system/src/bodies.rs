//! Scene layout constants.
//!
//! A unit planet at the origin, four satellites just outside it, and a far,
//! oversized sun off to +X.

// ── Satellites ───────────────────────────────────────────────────────

pub const SATELLITE_COUNT: usize = 4;
/// Particle budget of each satellite's thruster.
pub const THRUSTER_PARTICLES: usize = 20;

// ── Meshes ───────────────────────────────────────────────────────────

pub const PLANET_RADIUS: f32 = 1.0;
pub const PLANET_BANDS: u16 = 30;
pub const SUN_RADIUS: f32 = 0.5;
pub const SUN_BANDS: u16 = 20;

// ── Starfield ────────────────────────────────────────────────────────

pub const STAR_COUNT: usize = 1000;
pub const STAR_RADIUS: f32 = 200.0;

// ── Comets ───────────────────────────────────────────────────────────

/// Renderer capacity for live comets.
pub const MAX_COMETS: usize = 64;
/// Renderer capacity for vertices per comet tail.
pub const MAX_TAIL_POINTS: usize = 32;

// ── Scene event kinds to TypeScript ──────────────────────────────────

/// `a` = comets spawned this tick, `b` = live comets.
pub const EVENT_COMETS_SPAWNED: u32 = 1;
/// `a` = comets that left the volume this tick, `b` = live comets.
pub const EVENT_COMETS_EXITED: u32 = 2;
