// GMK67 Linux Driver - Shared Library
// Driver configuration and color map builders for the CLI

pub mod config;
pub mod frames;

pub use config::DriverConfig;
