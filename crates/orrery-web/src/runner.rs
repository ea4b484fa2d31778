use orrery_engine::{
    ControlEvent, ControlQueue, EngineContext, FrameBuffers, FrameClock, FrameStamp, MeshKind,
    ProtocolLayout, RenderContext, Scene, SceneConfig, SceneParams, StaticMeshes,
};

/// Generic scene runner that wires up the engine loop.
///
/// Each concrete scene creates a `thread_local!` SceneRunner through
/// `export_scene!` and exports free functions via `#[wasm_bindgen]`, because
/// wasm-bindgen cannot export generic structs directly.
pub struct SceneRunner<S: Scene> {
    scene: S,
    ctx: EngineContext,
    controls: ControlQueue,
    /// Handed to every tick after the first in a multi-tick frame.
    no_controls: ControlQueue,
    clock: FrameClock,
    config: SceneConfig,
    layout: ProtocolLayout,
    meshes: StaticMeshes,
    frame: FrameBuffers,
    /// Header + every section, packed at the layout's offsets.
    packed: Vec<f32>,
    frame_counter: u32,
    initialized: bool,
}

impl<S: Scene> SceneRunner<S> {
    pub fn new(scene: S) -> Self {
        let config = scene.config();
        let layout = ProtocolLayout::from_config(&config);

        Self {
            ctx: EngineContext::new(&config),
            controls: ControlQueue::new(),
            no_controls: ControlQueue::new(),
            clock: FrameClock::new(config.fixed_dt).with_max_steps(config.max_steps_per_frame),
            frame: FrameBuffers::new(config.frame_capacity()),
            packed: vec![0.0; layout.buffer_total_floats],
            meshes: StaticMeshes::default(),
            layout,
            config,
            scene,
            frame_counter: 0,
            initialized: false,
        }
    }

    /// Initialize the scene and build static meshes. Call once after construction.
    /// A zero `seed` keeps the scene's configured seed.
    pub fn init(&mut self, width: f32, height: f32, seed: u64) {
        self.config = self.scene.config();
        if seed != 0 {
            self.config.seed = seed;
        }
        if width > 0.0 && height > 0.0 {
            self.config.viewport_width = width;
            self.config.viewport_height = height;
        }
        self.layout = ProtocolLayout::from_config(&self.config);
        self.ctx = EngineContext::new(&self.config);
        self.clock =
            FrameClock::new(self.config.fixed_dt).with_max_steps(self.config.max_steps_per_frame);
        self.frame = FrameBuffers::new(self.config.frame_capacity());
        self.packed = vec![0.0; self.layout.buffer_total_floats];

        self.scene.init(&mut self.ctx, &mut self.meshes);
        self.initialized = true;
        log::info!(
            "runner: seed {}, {} floats per frame",
            self.config.seed,
            self.layout.buffer_total_floats
        );
    }

    /// Queue a GUI control. Unknown kinds are ignored.
    pub fn push_control(&mut self, kind: u32, value: f32) {
        match ControlEvent::decode(kind, value) {
            Some(event) => self.controls.push(event),
            None => log::debug!("ignoring unknown control kind {}", kind),
        }
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        if !(width > 0.0 && height > 0.0) {
            log::warn!("ignoring resize to {}x{}", width, height);
            return;
        }
        self.ctx.viewport = (width, height);
        self.controls.push(ControlEvent::Resize { width, height });
    }

    /// Replace the animation parameters from JSON.
    /// On error the previous parameters stay in effect and `false` is returned.
    pub fn load_params(&mut self, json: &str) -> bool {
        match SceneParams::from_json(json) {
            Ok(params) => {
                self.ctx.params = params;
                log::info!("params reloaded");
                true
            }
            Err(e) => {
                log::warn!("rejected params: {}", e);
                false
            }
        }
    }

    pub fn params(&self) -> &SceneParams {
        &self.ctx.params
    }

    /// Run one animation frame: fixed ticks, then rebuild every buffer.
    pub fn tick(&mut self, now_ms: f64) {
        if !self.initialized {
            return;
        }

        // Clear per-frame transient data
        self.ctx.clear_frame_data();

        let steps = self.clock.advance(now_ms);
        if steps > 0 {
            for event in self.controls.iter() {
                self.ctx.params.apply(event);
            }
            // Each control reaches the scene once, on the frame's first tick
            for step in 0..steps {
                let controls = if step == 0 {
                    &self.controls
                } else {
                    &self.no_controls
                };
                self.scene.update(&mut self.ctx, controls);
                self.ctx.advance_clock();
            }
            // Controls are kept until a frame actually runs a tick
            self.controls.drain();
        }

        self.frame.clear();
        {
            let mut render_ctx = RenderContext {
                frame: &mut self.frame,
                params: &self.ctx.params,
                alpha: self.clock.alpha(),
                time: self.ctx.time,
            };
            self.scene.render(&mut render_ctx);
        }

        self.frame_counter = self.frame_counter.wrapping_add(1);
        let stamp = FrameStamp {
            frame: self.frame_counter,
            viewport: self.ctx.viewport,
            time: self.ctx.time,
        };
        self.layout
            .pack(&self.frame, &self.ctx.events, stamp, &mut self.packed);
    }

    pub fn scene(&self) -> &S {
        &self.scene
    }

    pub fn frame(&self) -> &FrameBuffers {
        &self.frame
    }

    // ---- Pointer accessors for SharedArrayBuffer reads ----

    pub fn buffer_ptr(&self) -> *const f32 {
        self.packed.as_ptr()
    }

    pub fn uniforms_ptr(&self) -> *const f32 {
        self.frame.uniforms_ptr()
    }

    pub fn satellites_ptr(&self) -> *const f32 {
        self.frame.satellites_ptr()
    }

    pub fn satellite_count(&self) -> u32 {
        self.frame.satellites().len() as u32
    }

    pub fn particles_ptr(&self) -> *const f32 {
        self.frame.particles_ptr()
    }

    pub fn particle_count(&self) -> u32 {
        self.frame.particles().len() as u32
    }

    pub fn comet_heads_ptr(&self) -> *const f32 {
        self.frame.comet_heads_ptr()
    }

    pub fn comet_count(&self) -> u32 {
        self.frame.comet_heads().len() as u32
    }

    pub fn tail_vertices_ptr(&self) -> *const f32 {
        self.frame.tail_vertices_ptr()
    }

    pub fn tail_vertex_count(&self) -> u32 {
        self.frame.tail_vertices().len() as u32
    }

    pub fn tail_strips_ptr(&self) -> *const f32 {
        self.frame.tail_strips_ptr()
    }

    pub fn scene_events_ptr(&self) -> *const f32 {
        self.ctx.events.as_ptr() as *const f32
    }

    pub fn scene_events_len(&self) -> u32 {
        self.ctx.events.len() as u32
    }

    // ---- Static mesh accessors ----

    pub fn mesh_vertices_ptr(&self, kind: u32) -> *const f32 {
        MeshKind::from_u32(kind).map_or(std::ptr::null(), |k| self.meshes.get(k).vertices_ptr())
    }

    pub fn mesh_vertex_floats(&self, kind: u32) -> u32 {
        MeshKind::from_u32(kind).map_or(0, |k| self.meshes.get(k).vertices.len() as u32)
    }

    pub fn mesh_stride(&self, kind: u32) -> u32 {
        MeshKind::from_u32(kind).map_or(0, |k| self.meshes.get(k).stride as u32)
    }

    pub fn mesh_indices_ptr(&self, kind: u32) -> *const u16 {
        MeshKind::from_u32(kind).map_or(std::ptr::null(), |k| self.meshes.get(k).indices_ptr())
    }

    pub fn mesh_index_count(&self, kind: u32) -> u32 {
        MeshKind::from_u32(kind).map_or(0, |k| self.meshes.get(k).index_count() as u32)
    }

    pub fn stars_ptr(&self) -> *const f32 {
        self.meshes.stars.as_ptr()
    }

    pub fn star_count(&self) -> u32 {
        self.meshes.stars.len() as u32
    }

    // ---- Capacity accessors (read by TypeScript via wasm_bindgen exports) ----

    pub fn max_satellites(&self) -> u32 {
        self.layout.max_satellites as u32
    }

    pub fn max_particles(&self) -> u32 {
        self.layout.max_particles as u32
    }

    pub fn max_comets(&self) -> u32 {
        self.layout.max_comets as u32
    }

    pub fn max_tail_vertices(&self) -> u32 {
        self.layout.max_tail_vertices as u32
    }

    pub fn max_events(&self) -> u32 {
        self.layout.max_events as u32
    }

    pub fn buffer_total_floats(&self) -> u32 {
        self.layout.buffer_total_floats as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orrery_engine::{uv_sphere, SceneEvent, ParticleVertex};

    /// Counts ticks and records the controls and params each tick saw.
    #[derive(Default)]
    struct TickCounter {
        ticks: u32,
        resets: u32,
        last_lifetime: f32,
    }

    impl Scene for TickCounter {
        fn init(&mut self, _ctx: &mut EngineContext, meshes: &mut StaticMeshes) {
            meshes.sun = uv_sphere(0.5, 4, 4, false);
        }

        fn update(&mut self, ctx: &mut EngineContext, controls: &ControlQueue) {
            self.ticks += 1;
            self.resets += controls
                .iter()
                .filter(|e| matches!(e, ControlEvent::ResetCamera))
                .count() as u32;
            self.last_lifetime = ctx.params.thruster_lifetime;
            ctx.emit_event(SceneEvent::new(1, self.ticks as f32));
        }

        fn render(&self, ctx: &mut RenderContext) {
            ctx.frame.push_particle(ParticleVertex {
                x: self.ticks as f32,
                ..ParticleVertex::default()
            });
        }
    }

    fn running() -> SceneRunner<TickCounter> {
        let mut runner = SceneRunner::new(TickCounter::default());
        runner.init(800.0, 600.0, 7);
        runner
    }

    #[test]
    fn tick_before_init_is_a_no_op() {
        let mut runner = SceneRunner::new(TickCounter::default());
        runner.tick(0.0);
        runner.tick(100.0);
        assert_eq!(runner.scene().ticks, 0);
    }

    #[test]
    fn first_frame_runs_no_ticks() {
        let mut runner = running();
        runner.tick(1000.0);
        assert_eq!(runner.scene().ticks, 0);
        assert_eq!(runner.particle_count(), 1);
    }

    #[test]
    fn ticks_follow_wall_clock() {
        let mut runner = running();
        runner.tick(0.0);
        runner.tick(60.0);
        // 60 ms at 60 Hz is three whole ticks
        assert_eq!(runner.scene().ticks, 3);
        assert_eq!(runner.scene_events_len(), 3);
        // A long stall is capped instead of replayed
        runner.tick(10_000.0);
        assert!(runner.scene().ticks > 3 && runner.scene().ticks <= 13);
    }

    #[test]
    fn controls_wait_for_a_ticking_frame() {
        let mut runner = running();
        runner.push_control(7, 0.0);
        runner.push_control(4, 1.5);
        runner.push_control(99, 1.0);
        runner.tick(0.0);
        assert_eq!(runner.scene().resets, 0);
        assert_eq!(runner.params().thruster_lifetime, 0.4);

        runner.tick(20.0);
        assert_eq!(runner.scene().resets, 1);
        assert_eq!(runner.scene().last_lifetime, 1.5);

        runner.tick(40.0);
        assert_eq!(runner.scene().resets, 1);
    }

    #[test]
    fn multi_tick_frame_applies_controls_once() {
        let mut runner = running();
        runner.push_control(7, 0.0);
        runner.tick(0.0);
        runner.tick(50.0);
        // 50 ms at 60 Hz is three whole ticks
        assert_eq!(runner.scene().ticks, 3);
        assert_eq!(runner.scene().resets, 1);
    }

    #[test]
    fn stall_is_capped_by_config() {
        let mut runner = running();
        runner.tick(0.0);
        runner.tick(10_000.0);
        assert_eq!(runner.scene().ticks, SceneConfig::default().max_steps_per_frame);
    }

    #[test]
    fn bad_params_keep_previous() {
        let mut runner = running();
        assert!(runner.load_params(r#"{ "point_size": 8.0 }"#));
        assert_eq!(runner.params().point_size, 8.0);
        assert!(!runner.load_params("{ oops"));
        assert_eq!(runner.params().point_size, 8.0);
    }

    #[test]
    fn packed_buffer_matches_layout() {
        let mut runner = running();
        runner.tick(0.0);
        runner.tick(20.0);
        let total = runner.buffer_total_floats() as usize;
        // Safety: the packed buffer holds exactly buffer_total_floats values.
        let packed = unsafe { std::slice::from_raw_parts(runner.buffer_ptr(), total) };
        assert_eq!(packed[orrery_engine::bridge::protocol::HEADER_FRAME_COUNTER], 2.0);
        assert_eq!(packed[orrery_engine::bridge::protocol::HEADER_PARTICLE_COUNT], 1.0);
    }

    #[test]
    fn mesh_lookup_by_kind() {
        let runner = running();
        assert_eq!(runner.mesh_vertex_floats(1), 25 * 3);
        assert_eq!(runner.mesh_stride(1), 3);
        assert_eq!(runner.mesh_index_count(1), 6 * 16);
        assert!(runner.mesh_vertices_ptr(9).is_null());
        assert_eq!(runner.mesh_index_count(9), 0);
    }

    #[test]
    fn resize_updates_viewport() {
        let mut runner = running();
        runner.resize(1024.0, 768.0);
        runner.resize(0.0, 768.0);
        runner.tick(0.0);
        let total = runner.buffer_total_floats() as usize;
        let packed = unsafe { std::slice::from_raw_parts(runner.buffer_ptr(), total) };
        assert_eq!(packed[orrery_engine::bridge::protocol::HEADER_VIEWPORT_WIDTH], 1024.0);
    }
}
