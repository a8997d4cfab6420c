pub mod outbreak;
pub mod social_monitor;
