mod config;
mod file;

pub use config::{ConfigError, DelayRange, SimulationConfig, SimulationConfigBuilder};
pub use file::FileConfig;
