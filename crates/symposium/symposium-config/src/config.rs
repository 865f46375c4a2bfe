use std::time::Duration;

/// Inclusive bounds, in ticks, for a randomized delay.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DelayRange {
    pub min: u64,
    pub max: u64,
}

impl DelayRange {
    pub const fn new(min: u64, max: u64) -> Self {
        Self { min, max }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("at least 2 philosophers are required, got {0}")]
    TooFewPhilosophers(usize),

    #[error("simulation duration must be positive")]
    ZeroDuration,

    #[error("invalid {which} delay range {min}..={max}")]
    InvalidDelayRange {
        which: &'static str,
        min: u64,
        max: u64,
    },

    #[error("report interval must be positive")]
    ZeroReportInterval,

    #[error("failed to read '{path}'")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config")]
    Parse(#[from] toml::de::Error),
}

pub(crate) mod defaults {
    use super::DelayRange;
    use std::time::Duration;

    pub const DURATION: Duration = Duration::from_secs(10);
    pub const TICK: Duration = Duration::from_millis(1);
    pub const THINK: DelayRange = DelayRange::new(100, 1000);
    pub const EAT: DelayRange = DelayRange::new(100, 1000);
    pub const REPORT_INTERVAL: Duration = Duration::from_millis(150);
}

/// Validated, immutable simulation parameters.
///
/// Only obtainable through [`SimulationConfig::builder`], so every instance
/// in circulation has already passed validation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SimulationConfig {
    philosophers: usize,
    duration: Duration,
    tick: Duration,
    think: DelayRange,
    eat: DelayRange,
    report_interval: Duration,
    seed: Option<u64>,
    meals_per_seat: Option<u64>,
}

impl SimulationConfig {
    pub fn builder(philosophers: usize) -> SimulationConfigBuilder {
        SimulationConfigBuilder {
            philosophers,
            duration: defaults::DURATION,
            tick: defaults::TICK,
            think: defaults::THINK,
            eat: defaults::EAT,
            report_interval: defaults::REPORT_INTERVAL,
            seed: None,
            meals_per_seat: None,
        }
    }

    /// Ring size; also the number of forks.
    pub fn philosophers(&self) -> usize {
        self.philosophers
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Length of one delay unit.
    pub fn tick(&self) -> Duration {
        self.tick
    }

    pub fn think(&self) -> DelayRange {
        self.think
    }

    pub fn eat(&self) -> DelayRange {
        self.eat
    }

    pub fn report_interval(&self) -> Duration {
        self.report_interval
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Stop early once every seat has eaten this many times.
    pub fn meals_per_seat(&self) -> Option<u64> {
        self.meals_per_seat
    }

    /// Upper bound on one full think + eat cycle, excluding time spent
    /// waiting for forks.
    pub fn max_cycle(&self) -> Duration {
        self.tick
            .saturating_mul(u32::try_from(self.think.max.saturating_add(self.eat.max)).unwrap_or(u32::MAX))
    }
}

#[derive(Clone, Debug)]
pub struct SimulationConfigBuilder {
    philosophers: usize,
    duration: Duration,
    tick: Duration,
    think: DelayRange,
    eat: DelayRange,
    report_interval: Duration,
    seed: Option<u64>,
    meals_per_seat: Option<u64>,
}

impl SimulationConfigBuilder {
    pub fn duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    pub fn tick(mut self, tick: Duration) -> Self {
        self.tick = tick;
        self
    }

    pub fn think(mut self, think: DelayRange) -> Self {
        self.think = think;
        self
    }

    pub fn eat(mut self, eat: DelayRange) -> Self {
        self.eat = eat;
        self
    }

    pub fn report_interval(mut self, interval: Duration) -> Self {
        self.report_interval = interval;
        self
    }

    pub fn seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    pub fn meals_per_seat(mut self, meals: Option<u64>) -> Self {
        self.meals_per_seat = meals;
        self
    }

    pub fn build(self) -> Result<SimulationConfig, ConfigError> {
        if self.philosophers < 2 {
            return Err(ConfigError::TooFewPhilosophers(self.philosophers));
        }
        if self.duration.is_zero() {
            return Err(ConfigError::ZeroDuration);
        }
        check_range("think", self.think)?;
        check_range("eat", self.eat)?;
        if self.report_interval.is_zero() {
            return Err(ConfigError::ZeroReportInterval);
        }

        Ok(SimulationConfig {
            philosophers: self.philosophers,
            duration: self.duration,
            tick: self.tick,
            think: self.think,
            eat: self.eat,
            report_interval: self.report_interval,
            seed: self.seed,
            meals_per_seat: self.meals_per_seat,
        })
    }
}

fn check_range(which: &'static str, r: DelayRange) -> Result<(), ConfigError> {
    if r.min > r.max || r.max == 0 {
        return Err(ConfigError::InvalidDelayRange {
            which,
            min: r.min,
            max: r.max,
        });
    }
    Ok(())
}
