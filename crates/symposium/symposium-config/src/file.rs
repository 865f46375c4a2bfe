use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

use crate::config::{ConfigError, DelayRange, SimulationConfigBuilder, defaults};

/// Optional TOML overlay for settings the command line does not carry.
///
/// ```toml
/// log_level = "debug"
/// tick_us = 1000
/// think_ticks = [100, 1000]
/// eat_ticks = [100, 1000]
/// report_interval_ms = 150
/// seed = 7
/// meals_per_seat = 50
/// ```
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    #[serde(default = "file_defaults::log_level")]
    pub log_level: String,
    #[serde(default = "file_defaults::tick_us")]
    pub tick_us: u64,
    #[serde(default = "file_defaults::think_ticks")]
    pub think_ticks: [u64; 2],
    #[serde(default = "file_defaults::eat_ticks")]
    pub eat_ticks: [u64; 2],
    #[serde(default = "file_defaults::report_interval_ms")]
    pub report_interval_ms: u64,
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub meals_per_seat: Option<u64>,
}

mod file_defaults {
    use super::defaults;

    pub fn log_level() -> String {
        "info".into()
    }

    pub fn tick_us() -> u64 {
        defaults::TICK.as_micros() as u64
    }

    pub fn think_ticks() -> [u64; 2] {
        [defaults::THINK.min, defaults::THINK.max]
    }

    pub fn eat_ticks() -> [u64; 2] {
        [defaults::EAT.min, defaults::EAT.max]
    }

    pub fn report_interval_ms() -> u64 {
        defaults::REPORT_INTERVAL.as_millis() as u64
    }
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            log_level: file_defaults::log_level(),
            tick_us: file_defaults::tick_us(),
            think_ticks: file_defaults::think_ticks(),
            eat_ticks: file_defaults::eat_ticks(),
            report_interval_ms: file_defaults::report_interval_ms(),
            seed: None,
            meals_per_seat: None,
        }
    }
}

impl FileConfig {
    pub fn load(path: impl AsRef<Path> + ToString) -> Result<Self, ConfigError> {
        let toml_to_str = std::fs::read_to_string(&path).map_err(|source| ConfigError::Read {
            path: path.to_string(),
            source,
        })?;
        Self::parse(&toml_to_str)
    }

    pub fn parse(toml_str: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Copies the file's settings onto `builder`. Validation happens later in
    /// `build()`.
    pub fn apply(&self, builder: SimulationConfigBuilder) -> SimulationConfigBuilder {
        builder
            .tick(Duration::from_micros(self.tick_us))
            .think(DelayRange::new(self.think_ticks[0], self.think_ticks[1]))
            .eat(DelayRange::new(self.eat_ticks[0], self.eat_ticks[1]))
            .report_interval(Duration::from_millis(self.report_interval_ms))
            .seed(self.seed)
            .meals_per_seat(self.meals_per_seat)
    }
}
