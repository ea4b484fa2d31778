pub mod params;

pub use params::{CometConfig, SceneParams, SpawnPolicy};
