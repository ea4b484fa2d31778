pub mod body;
pub mod comet;
pub mod mesh;
pub mod satellite;
pub mod starfield;
pub mod thruster;
