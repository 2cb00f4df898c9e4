pub mod config;
pub mod group;
