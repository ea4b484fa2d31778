use wasm_bindgen::prelude::*;

mod bodies;
mod scene;
use scene::SolarScene;

orrery_web::export_scene!(SolarScene, "solar-system");
