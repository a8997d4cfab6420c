mod analysis;
mod component;
mod data;

pub use component::SocialMonitor;
