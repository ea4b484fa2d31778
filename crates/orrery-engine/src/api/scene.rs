use crate::api::types::{MeshKind, SceneEvent};
use crate::components::mesh::MeshData;
use crate::components::starfield::Starfield;
use crate::config::SceneParams;
use crate::core::rng::Rng;
use crate::input::queue::ControlQueue;
use crate::renderer::instance::{FrameBuffers, FrameCapacity};

/// Engine-side capacities and timing, provided by the scene.
#[derive(Debug, Clone)]
pub struct SceneConfig {
    /// Fixed timestep in seconds (default: 1/60).
    pub fixed_dt: f32,
    /// Ticks allowed per animation frame before a stall is dropped (default: 10).
    pub max_steps_per_frame: u32,
    /// Initial viewport size in pixels.
    pub viewport_width: f32,
    pub viewport_height: f32,
    /// Maximum satellite draws per frame (default: 8).
    pub max_satellites: usize,
    /// Maximum thruster particles per frame, all thrusters together (default: 256).
    pub max_particles: usize,
    /// Maximum live comets (default: 64).
    pub max_comets: usize,
    /// Maximum tail vertices per comet (default: 32).
    pub max_tail_points: usize,
    /// Maximum scene events per frame (default: 32).
    pub max_events: usize,
    /// Seed for the scene's random generator. 0 lets the host pick one.
    pub seed: u64,
    /// Initial animation parameters.
    pub params: SceneParams,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            fixed_dt: 1.0 / 60.0,
            max_steps_per_frame: 10,
            viewport_width: 800.0,
            viewport_height: 600.0,
            max_satellites: 8,
            max_particles: 256,
            max_comets: 64,
            max_tail_points: 32,
            max_events: 32,
            seed: 42,
            params: SceneParams::default(),
        }
    }
}

impl SceneConfig {
    pub fn frame_capacity(&self) -> FrameCapacity {
        FrameCapacity {
            satellites: self.max_satellites,
            particles: self.max_particles,
            comets: self.max_comets,
            tail_vertices: self.max_comets * self.max_tail_points,
        }
    }
}

/// The contract every scene fulfills.
pub trait Scene {
    /// Return engine configuration. Called once before init.
    fn config(&self) -> SceneConfig {
        SceneConfig::default()
    }

    /// Build scene objects and the static meshes. Called once.
    fn init(&mut self, ctx: &mut EngineContext, meshes: &mut StaticMeshes);

    /// One fixed tick. Params already reflect this frame's controls.
    fn update(&mut self, ctx: &mut EngineContext, controls: &ControlQueue);

    /// Write this frame's dynamic render data.
    fn render(&self, ctx: &mut RenderContext);
}

/// Mutable engine state, passed to Scene::init and Scene::update.
pub struct EngineContext {
    pub rng: Rng,
    pub params: SceneParams,
    pub events: Vec<SceneEvent>,
    /// Fixed tick length in seconds.
    pub dt: f32,
    /// Simulated seconds since init.
    pub time: f32,
    /// Fixed ticks since init.
    pub tick: u64,
    /// Viewport size in pixels.
    pub viewport: (f32, f32),
}

impl EngineContext {
    pub fn new(config: &SceneConfig) -> Self {
        Self {
            rng: Rng::new(config.seed),
            params: config.params.clone().sanitized(),
            events: Vec::with_capacity(config.max_events),
            dt: config.fixed_dt,
            time: 0.0,
            tick: 0,
            viewport: (config.viewport_width, config.viewport_height),
        }
    }

    /// Emit a scene event to be forwarded to TypeScript.
    pub fn emit_event(&mut self, event: SceneEvent) {
        self.events.push(event);
    }

    /// Count one fixed tick.
    pub fn advance_clock(&mut self) {
        self.tick += 1;
        self.time += self.dt;
    }

    /// Clear per-frame transient data.
    pub fn clear_frame_data(&mut self) {
        self.events.clear();
    }
}

/// Write access to the frame buffers, passed to Scene::render.
pub struct RenderContext<'a> {
    pub frame: &'a mut FrameBuffers,
    pub params: &'a SceneParams,
    /// Interpolation factor between the last two ticks.
    pub alpha: f32,
    pub time: f32,
}

/// Geometry built once at init and never touched again.
/// Pointers into these vectors stay valid for the runner's lifetime.
#[derive(Debug, Clone, Default)]
pub struct StaticMeshes {
    pub planet: MeshData,
    pub sun: MeshData,
    pub satellite: MeshData,
    pub stars: Starfield,
}

impl StaticMeshes {
    pub fn get(&self, kind: MeshKind) -> &MeshData {
        match kind {
            MeshKind::Planet => &self.planet,
            MeshKind::Sun => &self.sun,
            MeshKind::Satellite => &self.satellite,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::mesh::uv_sphere;

    #[test]
    fn context_starts_from_config() {
        let config = SceneConfig {
            seed: 9,
            ..SceneConfig::default()
        };
        let mut ctx = EngineContext::new(&config);
        assert_eq!(ctx.tick, 0);
        assert_eq!(ctx.viewport, (800.0, 600.0));
        assert_eq!(ctx.params, SceneParams::default());
        assert_eq!(ctx.rng.next_f32(), Rng::new(9).next_f32());
    }

    #[test]
    fn clock_and_events() {
        let mut ctx = EngineContext::new(&SceneConfig::default());
        ctx.advance_clock();
        ctx.advance_clock();
        assert_eq!(ctx.tick, 2);
        assert!((ctx.time - 2.0 / 60.0).abs() < 1e-6);
        ctx.emit_event(SceneEvent::new(1, 1.0));
        assert_eq!(ctx.events.len(), 1);
        ctx.clear_frame_data();
        assert!(ctx.events.is_empty());
    }

    #[test]
    fn frame_capacity_from_config() {
        let cap = SceneConfig::default().frame_capacity();
        assert_eq!(cap.comets, 64);
        assert_eq!(cap.tail_vertices, 64 * 32);
    }

    #[test]
    fn meshes_by_kind() {
        let meshes = StaticMeshes {
            sun: uv_sphere(0.5, 4, 4, false),
            ..StaticMeshes::default()
        };
        assert_eq!(meshes.get(MeshKind::Sun).vertex_count(), 25);
        assert_eq!(meshes.get(MeshKind::Planet).vertex_count(), 0);
    }
}
