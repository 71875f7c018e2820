//! Time abstraction traits for platform-agnostic timing.
//!
//! The looper itself only consumes millisecond deltas. These traits let
//! [`StaircaseRunner`](crate::StaircaseRunner) derive those deltas from a
//! platform clock.

/// Trait for abstracting time sources.
pub trait TimeSource<I: TimeInstant> {
    /// Returns the current time instant.
    fn now(&self) -> I;
}

/// Trait abstraction for duration types.
pub trait TimeDuration: Copy {
    /// Converts duration to milliseconds.
    fn as_millis(&self) -> u64;
}

/// Trait abstraction for monotonic instant types.
pub trait TimeInstant: Copy {
    /// Duration type for this instant.
    type Duration: TimeDuration;

    /// Calculates duration since an earlier instant.
    fn duration_since(&self, earlier: Self) -> Self::Duration;
}
