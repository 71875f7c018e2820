#![cfg_attr(not(feature = "std"), no_std)]
#![doc = include_str!("../README.md")]

//! # Core Concepts
//!
//! - **`BinaryLight`**: One step light with a countdown that toggles it back
//! - **`ProximitySensor`**: Debounced binary input with a one-tick edge flag
//! - **`DurationCalculator`**: Per-step timing strategy (`FastRise` or `ClippedSquared`)
//! - **`MovingTimeFilter`**: Moving average of completed traversal times
//! - **`Moving`**: One wave of lights travelling up or down the stairs
//! - **`MovingPool`** / **`StaticDeque`**: Fixed-capacity storage for in-flight movings
//! - **`Staircase`**: Per-tick orchestration of all of the above
//! - **`StaircaseLooper`**: `Staircase` behind a blocking mutex, shareable between tasks
//! - **`StaircaseRunner`**: Turns a platform clock into tick deltas for a `Looper`
//! - **`BinaryOutput`** / **`BinaryInput`** / **`Persistence`**: Traits to implement for your hardware
//!
//! No heap allocation is performed anywhere; every buffer is sized by const
//! generics.

pub mod types;
pub mod hal;
pub mod light;
pub mod sensor;
pub mod duration;
pub mod filter;
pub mod moving;
pub mod pool;
pub mod deque;
pub mod config;
pub mod staircase;
pub mod looper;
pub mod time;
pub mod runner;

pub use types::{BinaryValue, Direction, FOREVER, LightState, Milliseconds, SensorState};
pub use hal::{BinaryInput, BinaryOutput, Persistence, PinInput, PinOutput};
pub use light::BinaryLight;
pub use sensor::{DEFAULT_DEBOUNCE_PERIOD, ProximitySensor};
pub use duration::{ClippedSquaredCalculator, DurationCalculator, FastRiseCalculator, StepDuration};
pub use filter::MovingTimeFilter;
pub use moving::{Moving, MovingConfig};
pub use pool::{MovingId, MovingPool, PoolError};
pub use deque::StaticDeque;
pub use config::{ConfigBuilder, ConfigError, StaircaseConfig};
pub use staircase::{DEFAULT_MAX_MOVINGS, DOWN_MOVING_KEY, Staircase, UP_MOVING_KEY};
pub use looper::{Looper, StaircaseLooper};
pub use time::{TimeDuration, TimeInstant, TimeSource};
pub use runner::{DEFAULT_UPDATE_INTERVAL, StaircaseRunner};
