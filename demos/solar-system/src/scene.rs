//! Solar system scene: spinning planet, orbiting satellites with thruster
//! trails, a fixed sun, a starfield and a stream of comets.
//!
//! Everything moves on fixed ticks; the camera orbits on its own.

use orrery_engine::*;
use orrery_engine::components::body::SUN_POSITION;

use crate::bodies::*;

pub struct SolarScene {
    planet: Planet,
    sun: Sun,
    satellites: Vec<Satellite>,
    thrusters: Vec<Thruster>,
    comets: CometSystem,
    camera: OrbitCamera,
    lighting: Lighting,
}

impl SolarScene {
    pub fn new() -> Self {
        Self {
            planet: Planet::new(),
            sun: Sun::default(),
            satellites: Vec::with_capacity(SATELLITE_COUNT),
            thrusters: Vec::with_capacity(SATELLITE_COUNT),
            comets: CometSystem::default(),
            camera: OrbitCamera::new(800.0, 600.0),
            lighting: Lighting::from_sun(SUN_POSITION),
        }
    }

    /// Comet settings from the live params, capped to the renderer's buffers.
    fn comet_config(params: &SceneParams) -> CometConfig {
        let mut config = params.comets.clone();
        config.max_comets = config.max_comets.min(MAX_COMETS);
        config.tail_length = config.tail_length.min(MAX_TAIL_POINTS);
        config.sanitized()
    }

    pub fn comets(&self) -> &CometSystem {
        &self.comets
    }

    pub fn satellites(&self) -> &[Satellite] {
        &self.satellites
    }

    pub fn thrusters(&self) -> &[Thruster] {
        &self.thrusters
    }

    pub fn camera(&self) -> &OrbitCamera {
        &self.camera
    }

    pub fn planet(&self) -> &Planet {
        &self.planet
    }
}

impl Scene for SolarScene {
    fn config(&self) -> SceneConfig {
        SceneConfig {
            max_satellites: SATELLITE_COUNT,
            max_particles: SATELLITE_COUNT * THRUSTER_PARTICLES,
            max_comets: MAX_COMETS,
            max_tail_points: MAX_TAIL_POINTS,
            ..SceneConfig::default()
        }
    }

    fn init(&mut self, ctx: &mut EngineContext, meshes: &mut StaticMeshes) {
        let (width, height) = ctx.viewport;
        self.camera = OrbitCamera::new(width, height);
        self.lighting = Lighting::from_sun(self.sun.position);

        let base_speed = ctx.params.satellite_base_speed;
        self.satellites = (0..SATELLITE_COUNT)
            .map(|i| Satellite::spawn(i, base_speed, &mut ctx.rng))
            .collect();
        self.thrusters = (0..SATELLITE_COUNT)
            .map(|_| Thruster::new(THRUSTER_PARTICLES))
            .collect();
        self.comets = CometSystem::new(Self::comet_config(&ctx.params));

        meshes.planet = uv_sphere(PLANET_RADIUS, PLANET_BANDS, PLANET_BANDS, true);
        meshes.sun = uv_sphere(SUN_RADIUS, SUN_BANDS, SUN_BANDS, false);
        meshes.satellite = satellite_mesh();
        meshes.stars = Starfield::generate(STAR_COUNT, STAR_RADIUS, &mut ctx.rng);

        log::info!(
            "solar-system: {} satellites, {} stars, comet rate {}/s",
            self.satellites.len(),
            meshes.stars.len(),
            self.comets.config().spawn_rate
        );
    }

    fn update(&mut self, ctx: &mut EngineContext, controls: &ControlQueue) {
        for event in controls.iter() {
            match *event {
                ControlEvent::ResetCamera => self.camera.reset(),
                ControlEvent::Resize { width, height } => self.camera.resize(width, height),
                _ => {}
            }
        }

        self.camera.advance();
        self.planet.spin(ctx.params.planet_rotation_speed);

        let base_speed = ctx.params.satellite_base_speed;
        let lifetime = ctx.params.thruster_lifetime;
        let emit = ctx.params.thruster_enabled;
        for (satellite, thruster) in self.satellites.iter_mut().zip(&mut self.thrusters) {
            satellite.advance(base_speed);
            if emit {
                thruster.emit(satellite.thruster_anchor(), lifetime, &mut ctx.rng);
            }
            thruster.update(ctx.dt);
        }

        let wanted = Self::comet_config(&ctx.params);
        if &wanted != self.comets.config() {
            log::debug!("comet config changed: rate {}/s", wanted.spawn_rate);
            self.comets.set_config(wanted);
        }

        let report = self.comets.update(ctx.dt, &mut ctx.rng);
        let live = self.comets.len() as f32;
        if report.spawned > 0 {
            ctx.emit_event(
                SceneEvent::new(EVENT_COMETS_SPAWNED, report.spawned as f32).with_payload(live, 0.0),
            );
        }
        if report.removed > 0 {
            ctx.emit_event(
                SceneEvent::new(EVENT_COMETS_EXITED, report.removed as f32).with_payload(live, 0.0),
            );
        }
    }

    fn render(&self, ctx: &mut RenderContext) {
        let eye = self.camera.eye();
        let uniforms = &mut ctx.frame.uniforms;
        uniforms.view_proj = self.camera.view_proj().to_cols_array_2d();
        uniforms.sky_view_proj = self.camera.sky_view_proj().to_cols_array_2d();
        uniforms.planet_model = self.planet.model_matrix().to_cols_array_2d();
        uniforms.sun_model = self.sun.model_matrix().to_cols_array_2d();
        uniforms.light = self.lighting.uniform();
        uniforms.camera_eye = [eye.x, eye.y, eye.z, 1.0];
        uniforms.point_size = ctx.params.point_size;
        uniforms.time = ctx.time;
        uniforms.alpha = ctx.alpha;

        for satellite in &self.satellites {
            ctx.frame.push_satellite(satellite.model_matrix());
        }
        for thruster in &self.thrusters {
            for vertex in thruster.vertices() {
                ctx.frame.push_particle(vertex);
            }
        }
        self.comets.write_frame(self.sun.position, ctx.frame);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orrery_engine::input::queue::CONTROL_RESET_CAMERA;
    use orrery_engine::renderer::camera::ORBIT_STEP;

    fn started() -> (SolarScene, EngineContext, StaticMeshes) {
        let mut scene = SolarScene::new();
        let mut ctx = EngineContext::new(&scene.config());
        let mut meshes = StaticMeshes::default();
        scene.init(&mut ctx, &mut meshes);
        (scene, ctx, meshes)
    }

    fn run(scene: &mut SolarScene, ctx: &mut EngineContext, ticks: usize) {
        let controls = ControlQueue::new();
        for _ in 0..ticks {
            scene.update(ctx, &controls);
            ctx.advance_clock();
        }
    }

    #[test]
    fn init_builds_meshes_and_bodies() {
        let (scene, _, meshes) = started();
        assert_eq!(meshes.planet.vertex_count(), 31 * 31);
        assert_eq!(meshes.sun.index_count(), 6 * 20 * 20);
        assert_eq!(meshes.satellite.vertex_count(), 32);
        assert_eq!(meshes.stars.len(), STAR_COUNT);
        assert_eq!(scene.satellites().len(), SATELLITE_COUNT);
        assert_eq!(scene.thrusters().len(), SATELLITE_COUNT);
        assert!(scene.comets().is_empty());
    }

    #[test]
    fn thrusters_fill_then_stay_bounded() {
        let (mut scene, mut ctx, _) = started();
        run(&mut scene, &mut ctx, 120);
        for thruster in scene.thrusters() {
            // 0.4 s lifetime at 60 Hz keeps about 24 alive, capped at 20
            assert_eq!(thruster.len(), THRUSTER_PARTICLES);
        }
    }

    #[test]
    fn disabled_thrusters_drain() {
        let (mut scene, mut ctx, _) = started();
        run(&mut scene, &mut ctx, 30);
        ctx.params.apply(&ControlEvent::SetThrusterEnabled(false));
        run(&mut scene, &mut ctx, 30);
        assert!(scene.thrusters().iter().all(|t| t.is_empty()));
    }

    #[test]
    fn comets_stream_through() {
        let (mut scene, mut ctx, _) = started();
        let mut spawned = 0.0;
        for _ in 0..1800 {
            ctx.clear_frame_data();
            run(&mut scene, &mut ctx, 1);
            spawned += ctx
                .events
                .iter()
                .filter(|e| e.kind == EVENT_COMETS_SPAWNED as f32)
                .map(|e| e.a)
                .sum::<f32>();
            assert!(scene.comets().iter().all(|c| c.head_position().x < 100.0));
        }
        // 30 s at 1.8/s
        assert!(spawned > 20.0 && spawned < 100.0, "spawned {}", spawned);
    }

    #[test]
    fn spawn_rate_control_reaches_comets() {
        let (mut scene, mut ctx, _) = started();
        ctx.params.apply(&ControlEvent::SetCometSpawnRate(0.0));
        run(&mut scene, &mut ctx, 600);
        assert_eq!(scene.comets().config().spawn_rate, 0.0);
        assert!(scene.comets().is_empty());
    }

    #[test]
    fn reset_camera_control() {
        let (mut scene, mut ctx, _) = started();
        run(&mut scene, &mut ctx, 10);
        assert!(scene.camera().angle > 0.0);
        let mut controls = ControlQueue::new();
        controls.push(ControlEvent::ResetCamera);
        scene.update(&mut ctx, &controls);
        // Reset, then this tick's orbit step
        assert!((scene.camera().angle - 0.005).abs() < 1e-6);
    }

    #[test]
    fn reset_survives_a_multi_tick_frame() {
        let mut runner = orrery_web::SceneRunner::new(SolarScene::new());
        runner.init(800.0, 600.0, 5);
        runner.tick(0.0);
        runner.tick(100.0);
        assert!(runner.scene().camera().angle > 0.02);

        runner.push_control(CONTROL_RESET_CAMERA, 0.0);
        runner.tick(150.0);
        // Reset on the first tick, then every tick of the frame orbits
        let angle = runner.scene().camera().angle;
        assert!(angle >= 2.0 * ORBIT_STEP - 1e-6 && angle < 0.02, "angle {}", angle);
    }

    #[test]
    fn render_fills_frame() {
        let (mut scene, mut ctx, _) = started();
        run(&mut scene, &mut ctx, 60);

        let config = scene.config();
        let mut frame = FrameBuffers::new(config.frame_capacity());
        {
            let mut rc = RenderContext {
                frame: &mut frame,
                params: &ctx.params,
                alpha: 0.0,
                time: ctx.time,
            };
            scene.render(&mut rc);
        }
        assert_eq!(frame.satellites().len(), SATELLITE_COUNT);
        assert_eq!(frame.particles().len(), SATELLITE_COUNT * THRUSTER_PARTICLES);
        assert_eq!(frame.comet_heads().len(), scene.comets().len());
        assert_eq!(frame.tail_strips().len(), scene.comets().len());
        assert_eq!(frame.uniforms.point_size, 5.0);
        assert_eq!(frame.dropped(), 0);
    }
}
