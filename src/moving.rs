//! One light wave travelling along the staircase.
//!
//! A [`Moving`] walks the step lights one by one in its [`Direction`], timed
//! so that the whole walk takes roughly the expected traversal time. It does
//! not own the lights: every call that may switch a light takes the light
//! slice as a parameter.

use crate::duration::{DurationCalculator, StepDuration};
use crate::hal::BinaryOutput;
use crate::light::BinaryLight;
use crate::types::{Direction, Milliseconds};

/// Default window around the start and the expected end of a moving.
pub const DEFAULT_CLOSE_THRESHOLD: Milliseconds = 2000;

/// Default on-time of each step light, counted from the moment its step
/// becomes current.
pub const DEFAULT_LIGHT_ON_PERIOD: Milliseconds = 3000;

/// Parameters shared by every moving the looper creates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MovingConfig {
    /// Per-step timing strategy.
    pub calculator: DurationCalculator,

    /// Width of the near-begin and near-end windows, and the grace period
    /// after the expected end before a moving counts as stale.
    pub close_threshold: Milliseconds,

    /// How long each step light is switched on for, independent of the
    /// step interval.
    pub light_on_period: Milliseconds,
}

impl Default for MovingConfig {
    fn default() -> Self {
        Self {
            calculator: DurationCalculator::default(),
            close_threshold: DEFAULT_CLOSE_THRESHOLD,
            light_on_period: DEFAULT_LIGHT_ON_PERIOD,
        }
    }
}

/// An in-flight light sequence.
#[derive(Debug, Clone)]
pub struct Moving {
    direction: Direction,
    expected_duration: Milliseconds,
    config: MovingConfig,
    light_count: usize,
    current_index: usize,
    time_until_next: Milliseconds,
    time_passed: Milliseconds,
    completed: bool,
}

impl Moving {
    /// Starts a moving and lights its first step.
    ///
    /// With an empty light slice the moving is completed from the start.
    pub fn new<W: BinaryOutput>(
        direction: Direction,
        expected_duration: Milliseconds,
        config: &MovingConfig,
        lights: &mut [BinaryLight<W>],
    ) -> Self {
        let mut moving = Self {
            direction,
            expected_duration,
            config: *config,
            light_count: lights.len(),
            current_index: 0,
            time_until_next: 0,
            time_passed: 0,
            completed: lights.is_empty(),
        };

        if !moving.completed {
            moving.time_until_next = moving.interval();
            moving.light_current(lights);
        }

        moving
    }

    /// Advances the wave by `delta`.
    ///
    /// Elapsed time keeps growing after completion so staleness can still be
    /// judged.
    pub fn update<W: BinaryOutput>(&mut self, mut delta: Milliseconds, lights: &mut [BinaryLight<W>]) {
        self.time_passed = self.time_passed.saturating_add(delta);
        if self.completed {
            return;
        }

        while delta >= self.time_until_next {
            delta = delta.saturating_sub(self.time_until_next);
            self.current_index += 1;

            if self.current_index >= self.light_count {
                self.current_index = self.light_count;
                self.completed = true;
                return;
            }

            self.time_until_next = self.interval();
            self.light_current(lights);
        }

        self.time_until_next = self.time_until_next.saturating_sub(delta);
    }

    /// Marks the moving finished without lighting the remaining steps.
    pub fn complete(&mut self) {
        self.completed = true;
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    pub fn is_near_begin(&self) -> bool {
        self.time_passed < self.config.close_threshold
    }

    pub fn is_near_end(&self) -> bool {
        let diff = i64::from(self.expected_duration) - i64::from(self.time_passed);
        diff.abs() < i64::from(self.config.close_threshold)
    }

    pub fn is_too_old(&self) -> bool {
        i64::from(self.time_passed)
            > i64::from(self.expected_duration) + i64::from(self.config.close_threshold)
    }

    /// Time since the moving was created.
    pub fn time_passed(&self) -> Milliseconds {
        self.time_passed
    }

    /// Index of the current step, counted in travel order. Equals the light
    /// count once the wave has run off the end.
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn expected_duration(&self) -> Milliseconds {
        self.expected_duration
    }

    fn interval(&self) -> Milliseconds {
        self.config
            .calculator
            .step_duration(self.current_index, self.expected_duration, self.light_count)
    }

    fn physical_index(&self) -> usize {
        match self.direction {
            Direction::Up => self.current_index,
            Direction::Down => self.light_count - 1 - self.current_index,
        }
    }

    fn light_current<W: BinaryOutput>(&self, lights: &mut [BinaryLight<W>]) {
        if let Some(light) = lights.get_mut(self.physical_index()) {
            light.turn_on(self.config.light_on_period);
        }
    }
}
