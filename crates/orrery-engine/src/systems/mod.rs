pub mod comets;
pub mod lighting;
