//! Per-step timing strategies for a moving.

use crate::types::Milliseconds;

/// Default number of steps lit with the fast interval.
pub const DEFAULT_FAST_RISE_COUNT: usize = 3;

/// Default interval used for the fast steps.
pub const DEFAULT_FAST_RISE_TIME: Milliseconds = 500;

/// Strategy computing how long step `index` stays current before the wave
/// advances.
pub trait StepDuration {
    /// Returns the on-time of step `index` for a wave expected to take
    /// `total` milliseconds over `light_count` lights.
    fn step_duration(&self, index: usize, total: Milliseconds, light_count: usize) -> Milliseconds;
}

fn even_share(total: Milliseconds, light_count: usize) -> Milliseconds {
    match Milliseconds::try_from(light_count) {
        Ok(count) if count > 0 => total / count,
        _ => total,
    }
}

/// A few quick steps at the start, then an even split of the total.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FastRiseCalculator {
    pub fast_rise_count: usize,
    pub fast_rise_time: Milliseconds,
}

impl FastRiseCalculator {
    pub const fn new(fast_rise_count: usize, fast_rise_time: Milliseconds) -> Self {
        Self {
            fast_rise_count,
            fast_rise_time,
        }
    }
}

impl Default for FastRiseCalculator {
    fn default() -> Self {
        Self::new(DEFAULT_FAST_RISE_COUNT, DEFAULT_FAST_RISE_TIME)
    }
}

impl StepDuration for FastRiseCalculator {
    fn step_duration(&self, index: usize, total: Milliseconds, light_count: usize) -> Milliseconds {
        if index < self.fast_rise_count {
            self.fast_rise_time
        } else {
            even_share(total, light_count)
        }
    }
}

/// First three steps grow roughly quadratically, the rest split the total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ClippedSquaredCalculator;

impl ClippedSquaredCalculator {
    const FIRST_LIGHT: Milliseconds = 500;
    const SECOND_LIGHT: Milliseconds = 750;
    const THIRD_LIGHT: Milliseconds = 1200;
}

impl StepDuration for ClippedSquaredCalculator {
    fn step_duration(&self, index: usize, total: Milliseconds, light_count: usize) -> Milliseconds {
        match index {
            0 => Self::FIRST_LIGHT,
            1 => Self::SECOND_LIGHT,
            2 => Self::THIRD_LIGHT,
            _ => even_share(total, light_count),
        }
    }
}

/// The strategy a moving carries. Copyable so each moving owns its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DurationCalculator {
    FastRise(FastRiseCalculator),
    ClippedSquared(ClippedSquaredCalculator),
}

impl Default for DurationCalculator {
    fn default() -> Self {
        DurationCalculator::FastRise(FastRiseCalculator::default())
    }
}

impl StepDuration for DurationCalculator {
    fn step_duration(&self, index: usize, total: Milliseconds, light_count: usize) -> Milliseconds {
        match self {
            DurationCalculator::FastRise(calc) => calc.step_duration(index, total, light_count),
            DurationCalculator::ClippedSquared(calc) => calc.step_duration(index, total, light_count),
        }
    }
}

impl From<FastRiseCalculator> for DurationCalculator {
    fn from(calc: FastRiseCalculator) -> Self {
        DurationCalculator::FastRise(calc)
    }
}

impl From<ClippedSquaredCalculator> for DurationCalculator {
    fn from(calc: ClippedSquaredCalculator) -> Self {
        DurationCalculator::ClippedSquared(calc)
    }
}
