//! Tunables for the staircase looper.
//!
//! The light count and the per-direction moving capacity are const generics
//! on [`Staircase`](crate::Staircase). Everything else lives here and is
//! validated once by [`ConfigBuilder::build`].

use crate::duration::DurationCalculator;
use crate::moving::MovingConfig;
use crate::sensor::DEFAULT_DEBOUNCE_PERIOD;
use crate::types::Milliseconds;

/// Default interval between two writes of the learned durations (2 h).
pub const DEFAULT_SAVE_PERIOD: Milliseconds = 2 * 60 * 60 * 1000;

/// Traversal time assumed until something better is learned or restored.
pub const DEFAULT_MOVING_TIME: Milliseconds = 12000;

/// Validated looper configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StaircaseConfig {
    /// Sensor debounce period.
    pub debounce_period: Milliseconds,

    /// How often the learned durations are persisted.
    pub save_period: Milliseconds,

    /// Seed for both duration filters.
    pub default_moving_time: Milliseconds,

    /// Parameters handed to every new moving.
    pub moving: MovingConfig,
}

impl StaircaseConfig {
    /// Creates a builder initialised with the defaults.
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::new()
    }
}

impl Default for StaircaseConfig {
    fn default() -> Self {
        Self {
            debounce_period: DEFAULT_DEBOUNCE_PERIOD,
            save_period: DEFAULT_SAVE_PERIOD,
            default_moving_time: DEFAULT_MOVING_TIME,
            moving: MovingConfig::default(),
        }
    }
}

/// Configuration validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Debounce period must be greater than zero.
    NonPositiveDebounce,

    /// Save period must be greater than zero.
    NonPositiveSavePeriod,

    /// Default moving time must be greater than zero.
    NonPositiveMovingTime,

    /// Close threshold must not be negative.
    NegativeCloseThreshold,

    /// Light on-period must be greater than zero.
    NonPositiveOnPeriod,
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ConfigError::NonPositiveDebounce => {
                write!(f, "debounce period must be greater than zero")
            }
            ConfigError::NonPositiveSavePeriod => {
                write!(f, "save period must be greater than zero")
            }
            ConfigError::NonPositiveMovingTime => {
                write!(f, "default moving time must be greater than zero")
            }
            ConfigError::NegativeCloseThreshold => {
                write!(f, "close threshold must not be negative")
            }
            ConfigError::NonPositiveOnPeriod => {
                write!(f, "light on-period must be greater than zero")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}

/// Builder for constructing validated configurations.
#[derive(Debug, Clone)]
pub struct ConfigBuilder {
    config: StaircaseConfig,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: StaircaseConfig::default(),
        }
    }

    pub fn debounce_period(mut self, period: Milliseconds) -> Self {
        self.config.debounce_period = period;
        self
    }

    pub fn save_period(mut self, period: Milliseconds) -> Self {
        self.config.save_period = period;
        self
    }

    pub fn default_moving_time(mut self, time: Milliseconds) -> Self {
        self.config.default_moving_time = time;
        self
    }

    pub fn close_threshold(mut self, threshold: Milliseconds) -> Self {
        self.config.moving.close_threshold = threshold;
        self
    }

    pub fn light_on_period(mut self, period: Milliseconds) -> Self {
        self.config.moving.light_on_period = period;
        self
    }

    /// Sets the per-step timing strategy.
    pub fn calculator(mut self, calculator: impl Into<DurationCalculator>) -> Self {
        self.config.moving.calculator = calculator.into();
        self
    }

    /// Builds and validates the configuration.
    ///
    /// # Errors
    /// Returns the first [`ConfigError`] found.
    pub fn build(self) -> Result<StaircaseConfig, ConfigError> {
        let config = self.config;

        if config.debounce_period <= 0 {
            return Err(ConfigError::NonPositiveDebounce);
        }
        if config.save_period <= 0 {
            return Err(ConfigError::NonPositiveSavePeriod);
        }
        if config.default_moving_time <= 0 {
            return Err(ConfigError::NonPositiveMovingTime);
        }
        if config.moving.close_threshold < 0 {
            return Err(ConfigError::NegativeCloseThreshold);
        }
        if config.moving.light_on_period <= 0 {
            return Err(ConfigError::NonPositiveOnPeriod);
        }

        Ok(config)
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
