pub mod runner;

pub use runner::SceneRunner;

/// A random 64-bit seed from the browser's `Math.random`.
/// Only callable from wasm (it goes through a JS import).
pub fn browser_seed() -> u64 {
    let hi = (js_sys::Math::random() * 4_294_967_296.0) as u64;
    let lo = (js_sys::Math::random() * 4_294_967_296.0) as u64;
    (hi << 32) | lo
}

/// Generate all `#[wasm_bindgen]` exports for a scene.
///
/// Generates:
/// - `thread_local!` storage for the SceneRunner
/// - `with_runner()` helper function
/// - All wasm-bindgen exports (scene_init, scene_tick, controls, data accessors)
///
/// # Usage
///
/// ```ignore
/// use wasm_bindgen::prelude::*;
///
/// mod scene;
/// use scene::MyScene;
///
/// orrery_web::export_scene!(MyScene, "my-scene");
/// ```
///
/// # Arguments
///
/// - `$scene_type`: The scene struct type that implements `orrery_engine::Scene`
///   and has a `new()` constructor
/// - `$scene_name`: A string literal used in the initialization log message
#[macro_export]
macro_rules! export_scene {
    ($scene_type:ty, $scene_name:literal) => {
        use std::cell::RefCell;

        thread_local! {
            static RUNNER: RefCell<Option<$crate::SceneRunner<$scene_type>>> = RefCell::new(None);
        }

        fn with_runner<R>(f: impl FnOnce(&mut $crate::SceneRunner<$scene_type>) -> R) -> R {
            RUNNER.with(|cell| {
                let mut borrow = cell.borrow_mut();
                let runner = borrow.as_mut().expect("Scene not initialized. Call scene_init() first.");
                f(runner)
            })
        }

        /// `seed == 0` picks a fresh seed from the browser.
        #[wasm_bindgen]
        pub fn scene_init(width: f32, height: f32, seed: f64) {
            console_error_panic_hook::set_once();
            let _ = console_log::init_with_level(log::Level::Info);

            let seed = if seed > 0.0 { seed as u64 } else { $crate::browser_seed() };
            let scene = <$scene_type>::new();
            let runner = $crate::SceneRunner::new(scene);

            RUNNER.with(|cell| {
                *cell.borrow_mut() = Some(runner);
            });

            with_runner(|r| r.init(width, height, seed));
            log::info!("{}: initialized", $scene_name);
        }

        #[wasm_bindgen]
        pub fn scene_tick(now_ms: f64) {
            with_runner(|r| r.tick(now_ms));
        }

        #[wasm_bindgen]
        pub fn scene_resize(width: f32, height: f32) {
            with_runner(|r| r.resize(width, height));
        }

        #[wasm_bindgen]
        pub fn scene_control(kind: u32, value: f32) {
            with_runner(|r| r.push_control(kind, value));
        }

        #[wasm_bindgen]
        pub fn scene_load_params(json: &str) -> bool {
            with_runner(|r| r.load_params(json))
        }

        // ---- Frame accessors ----

        #[wasm_bindgen]
        pub fn get_buffer_ptr() -> *const f32 {
            with_runner(|r| r.buffer_ptr())
        }

        #[wasm_bindgen]
        pub fn get_uniforms_ptr() -> *const f32 {
            with_runner(|r| r.uniforms_ptr())
        }

        #[wasm_bindgen]
        pub fn get_satellites_ptr() -> *const f32 {
            with_runner(|r| r.satellites_ptr())
        }

        #[wasm_bindgen]
        pub fn get_satellite_count() -> u32 {
            with_runner(|r| r.satellite_count())
        }

        #[wasm_bindgen]
        pub fn get_particles_ptr() -> *const f32 {
            with_runner(|r| r.particles_ptr())
        }

        #[wasm_bindgen]
        pub fn get_particle_count() -> u32 {
            with_runner(|r| r.particle_count())
        }

        #[wasm_bindgen]
        pub fn get_comet_heads_ptr() -> *const f32 {
            with_runner(|r| r.comet_heads_ptr())
        }

        #[wasm_bindgen]
        pub fn get_comet_count() -> u32 {
            with_runner(|r| r.comet_count())
        }

        #[wasm_bindgen]
        pub fn get_tail_vertices_ptr() -> *const f32 {
            with_runner(|r| r.tail_vertices_ptr())
        }

        #[wasm_bindgen]
        pub fn get_tail_vertex_count() -> u32 {
            with_runner(|r| r.tail_vertex_count())
        }

        #[wasm_bindgen]
        pub fn get_tail_strips_ptr() -> *const f32 {
            with_runner(|r| r.tail_strips_ptr())
        }

        #[wasm_bindgen]
        pub fn get_scene_events_ptr() -> *const f32 {
            with_runner(|r| r.scene_events_ptr())
        }

        #[wasm_bindgen]
        pub fn get_scene_events_len() -> u32 {
            with_runner(|r| r.scene_events_len())
        }

        // ---- Static mesh accessors ----

        #[wasm_bindgen]
        pub fn get_mesh_vertices_ptr(kind: u32) -> *const f32 {
            with_runner(|r| r.mesh_vertices_ptr(kind))
        }

        #[wasm_bindgen]
        pub fn get_mesh_vertex_floats(kind: u32) -> u32 {
            with_runner(|r| r.mesh_vertex_floats(kind))
        }

        #[wasm_bindgen]
        pub fn get_mesh_stride(kind: u32) -> u32 {
            with_runner(|r| r.mesh_stride(kind))
        }

        #[wasm_bindgen]
        pub fn get_mesh_indices_ptr(kind: u32) -> *const u16 {
            with_runner(|r| r.mesh_indices_ptr(kind))
        }

        #[wasm_bindgen]
        pub fn get_mesh_index_count(kind: u32) -> u32 {
            with_runner(|r| r.mesh_index_count(kind))
        }

        #[wasm_bindgen]
        pub fn get_stars_ptr() -> *const f32 {
            with_runner(|r| r.stars_ptr())
        }

        #[wasm_bindgen]
        pub fn get_star_count() -> u32 {
            with_runner(|r| r.star_count())
        }

        // ---- Capacity accessors ----

        #[wasm_bindgen]
        pub fn get_max_satellites() -> u32 {
            with_runner(|r| r.max_satellites())
        }

        #[wasm_bindgen]
        pub fn get_max_particles() -> u32 {
            with_runner(|r| r.max_particles())
        }

        #[wasm_bindgen]
        pub fn get_max_comets() -> u32 {
            with_runner(|r| r.max_comets())
        }

        #[wasm_bindgen]
        pub fn get_max_tail_vertices() -> u32 {
            with_runner(|r| r.max_tail_vertices())
        }

        #[wasm_bindgen]
        pub fn get_max_events() -> u32 {
            with_runner(|r| r.max_events())
        }

        #[wasm_bindgen]
        pub fn get_buffer_total_floats() -> u32 {
            with_runner(|r| r.buffer_total_floats())
        }
    };
}
