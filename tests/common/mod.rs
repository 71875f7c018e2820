//! Shared test infrastructure for staircase-sequencer integration tests

#![allow(dead_code)] // Items used across multiple test files; Rust analyzes per-file

use core::cell::Cell;
use embassy_sync::blocking_mutex::raw::NoopRawMutex;
use staircase_sequencer::{
    BinaryInput, BinaryLight, BinaryOutput, BinaryValue, DOWN_MOVING_KEY, Milliseconds,
    Persistence, Staircase, StaircaseConfig, StaircaseLooper, TimeDuration, TimeInstant,
    TimeSource, UP_MOVING_KEY,
};

// ============================================================================
// Mock Outputs
// ============================================================================

/// Mock light output that records writes
pub struct MockOutput {
    writes: heapless::Vec<BinaryValue, 64>,
    count: usize,
    level: Option<BinaryValue>,
}

impl MockOutput {
    pub fn new() -> Self {
        Self {
            writes: heapless::Vec::new(),
            count: 0,
            level: None,
        }
    }

    /// First 64 writes, in order
    pub fn writes(&self) -> &[BinaryValue] {
        &self.writes
    }

    pub fn write_count(&self) -> usize {
        self.count
    }

    /// Level of the most recent write
    pub fn level(&self) -> Option<BinaryValue> {
        self.level
    }
}

impl BinaryOutput for MockOutput {
    fn write_value(&mut self, value: BinaryValue) {
        let _ = self.writes.push(value);
        self.count += 1;
        self.level = Some(value);
    }
}

// ============================================================================
// Mock Inputs
// ============================================================================

/// Mock sensor input reading a level shared with the test
pub struct MockInput<'a> {
    level: &'a Cell<BinaryValue>,
    reads: usize,
}

impl<'a> MockInput<'a> {
    pub fn new(level: &'a Cell<BinaryValue>) -> Self {
        Self { level, reads: 0 }
    }

    pub fn reads(&self) -> usize {
        self.reads
    }
}

impl BinaryInput for MockInput<'_> {
    fn read_value(&mut self) -> BinaryValue {
        self.reads += 1;
        self.level.get()
    }
}

// ============================================================================
// Mock Persistence
// ============================================================================

/// In-memory store for the two learned durations
pub struct MockPersistence {
    down: Option<i32>,
    up: Option<i32>,
    fail_reads: bool,
    writes: usize,
}

impl MockPersistence {
    pub fn new() -> Self {
        Self {
            down: None,
            up: None,
            fail_reads: false,
            writes: 0,
        }
    }

    pub fn with_value(mut self, key: &str, value: i32) -> Self {
        *self.slot(key) = Some(value);
        self
    }

    /// Keys still exist but every read fails
    pub fn failing_reads(mut self) -> Self {
        self.fail_reads = true;
        self
    }

    pub fn stored(&self, key: &str) -> Option<i32> {
        match key {
            DOWN_MOVING_KEY => self.down,
            UP_MOVING_KEY => self.up,
            _ => None,
        }
    }

    pub fn writes(&self) -> usize {
        self.writes
    }

    fn slot(&mut self, key: &str) -> &mut Option<i32> {
        match key {
            DOWN_MOVING_KEY => &mut self.down,
            UP_MOVING_KEY => &mut self.up,
            _ => panic!("unexpected persistence key {key}"),
        }
    }
}

impl Persistence for MockPersistence {
    fn key_exists(&self, key: &str) -> bool {
        self.stored(key).is_some()
    }

    fn get_value(&self, key: &str) -> Option<i32> {
        if self.fail_reads {
            return None;
        }
        self.stored(key)
    }

    fn set_value(&mut self, key: &str, value: i32) {
        self.writes += 1;
        *self.slot(key) = Some(value);
    }
}

// ============================================================================
// Mock Time Types
// ============================================================================

/// Mock duration type for testing (wraps milliseconds)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TestDuration(pub u64);

impl TimeDuration for TestDuration {
    fn as_millis(&self) -> u64 {
        self.0
    }
}

/// Mock instant type for testing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TestInstant(pub u64);

impl TimeInstant for TestInstant {
    type Duration = TestDuration;

    fn duration_since(&self, earlier: Self) -> Self::Duration {
        TestDuration(self.0 - earlier.0)
    }
}

/// Mock time source with controllable time advancement
pub struct MockTimeSource {
    current_time: Cell<TestInstant>,
}

impl MockTimeSource {
    pub fn new() -> Self {
        Self {
            current_time: Cell::new(TestInstant(0)),
        }
    }

    /// Advance time by the given number of milliseconds
    pub fn advance(&self, millis: u64) {
        let current = self.current_time.get();
        self.current_time.set(TestInstant(current.0 + millis));
    }
}

impl TimeSource<TestInstant> for MockTimeSource {
    fn now(&self) -> TestInstant {
        self.current_time.get()
    }
}

// ============================================================================
// Fixtures
// ============================================================================

pub const LIGHTS: usize = 8;

/// Tick length used by the scenario helpers
pub const TICK: Milliseconds = 100;

pub type TestStaircase<'a> = Staircase<MockOutput, MockInput<'a>, MockPersistence, LIGHTS>;

pub type TestLooper<'a> =
    StaircaseLooper<NoopRawMutex, MockOutput, MockInput<'a>, MockPersistence, LIGHTS>;

pub fn mock_lights<const L: usize>() -> [BinaryLight<MockOutput>; L] {
    core::array::from_fn(|_| BinaryLight::new(MockOutput::new()))
}

/// Levels for the bottom and top sensor, both starting far
pub struct Sensors {
    pub down: Cell<BinaryValue>,
    pub up: Cell<BinaryValue>,
}

impl Sensors {
    pub fn new() -> Self {
        Self {
            down: Cell::new(BinaryValue::Low),
            up: Cell::new(BinaryValue::Low),
        }
    }
}

pub fn staircase<'a>(
    sensors: &'a Sensors,
    persistence: MockPersistence,
    config: StaircaseConfig,
) -> TestStaircase<'a> {
    Staircase::new(
        mock_lights(),
        MockInput::new(&sensors.down),
        MockInput::new(&sensors.up),
        persistence,
        config,
    )
}

pub fn looper<'a>(
    sensors: &'a Sensors,
    persistence: MockPersistence,
    config: StaircaseConfig,
) -> TestLooper<'a> {
    StaircaseLooper::new(
        mock_lights(),
        MockInput::new(&sensors.down),
        MockInput::new(&sensors.up),
        persistence,
        config,
    )
}

/// Which sensor a scenario step acts on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Bottom,
    Top,
}

fn sensor_changed(staircase: &TestStaircase<'_>, side: Side) -> bool {
    match side {
        Side::Bottom => staircase.down_sensor().has_state_changed(),
        Side::Top => staircase.up_sensor().has_state_changed(),
    }
}

/// Drives one sensor to `level` and ticks until the debounced state commits.
///
/// Returns the time that passed.
pub fn drive(
    staircase: &mut TestStaircase<'_>,
    sensors: &Sensors,
    side: Side,
    level: BinaryValue,
) -> Milliseconds {
    let cell = match side {
        Side::Bottom => &sensors.down,
        Side::Top => &sensors.up,
    };
    cell.set(level);

    let mut elapsed = 0;
    loop {
        staircase.update(TICK);
        elapsed += TICK;
        if sensor_changed(staircase, side) {
            return elapsed;
        }
        assert!(elapsed < 10 * staircase.config().debounce_period, "sensor never committed");
    }
}

/// Someone steps in front of a sensor and walks on: close, then far again.
///
/// Returns the time that passed.
pub fn pass(staircase: &mut TestStaircase<'_>, sensors: &Sensors, side: Side) -> Milliseconds {
    drive(staircase, sensors, side, BinaryValue::High)
        + drive(staircase, sensors, side, BinaryValue::Low)
}

/// Ticks the staircase for `total` milliseconds in `TICK` steps.
pub fn advance(staircase: &mut TestStaircase<'_>, total: Milliseconds) {
    let mut left = total;
    while left > 0 {
        let delta = left.min(TICK);
        staircase.update(delta);
        left -= delta;
    }
}
