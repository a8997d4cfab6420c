mod component;
mod data;
mod projection;
mod render;
mod state;
mod stepper;
mod timer;
mod types;

pub use component::OutbreakGlobe;
