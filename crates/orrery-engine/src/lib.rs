pub mod api;
pub mod bridge;
pub mod components;
pub mod config;
pub mod core;
pub mod input;
pub mod renderer;
pub mod systems;

// Re-export key types at crate root for convenience
pub use api::scene::{EngineContext, RenderContext, Scene, SceneConfig, StaticMeshes};
pub use api::types::{MeshKind, SceneEvent};
pub use bridge::protocol::{FrameStamp, ProtocolLayout};
pub use components::body::{Planet, Sun};
pub use components::comet::{Comet, TailGeometry, TailPoint};
pub use components::mesh::{satellite_mesh, uv_sphere, MeshData};
pub use components::satellite::Satellite;
pub use components::starfield::Starfield;
pub use components::thruster::{Particle, Thruster};
pub use config::{CometConfig, SceneParams, SpawnPolicy};
pub use crate::core::ring::RingBuffer;
pub use crate::core::rng::Rng;
pub use crate::core::time::FrameClock;
pub use input::queue::{ControlEvent, ControlQueue};
pub use renderer::camera::OrbitCamera;
pub use renderer::instance::{
    CometHead, FrameBuffers, FrameCapacity, FrameUniforms, ModelInstance, ParticleVertex,
    StarVertex, StripRange, TailVertex,
};
pub use systems::comets::{CometSystem, UpdateReport};
pub use systems::lighting::{DirectionalLight, LightUniform, Lighting};
