//! Clock-driven adapter between a periodic task and a [`Looper`].

use crate::looper::Looper;
use crate::time::{TimeDuration, TimeInstant, TimeSource};
use crate::types::Milliseconds;

/// Delta used for the very first run, before there is a previous instant.
pub const DEFAULT_UPDATE_INTERVAL: Milliseconds = 10;

/// Feeds a [`Looper`] with the real time elapsed between runs.
///
/// Call [`run_once`](Self::run_once) from whatever periodic task the platform
/// provides; the runner measures the actual interval instead of trusting the
/// nominal period.
pub struct StaircaseRunner<'a, I: TimeInstant, T: TimeSource<I>, U: Looper> {
    looper: &'a U,
    time_source: &'a T,
    last_run: Option<I>,
}

impl<'a, I: TimeInstant, T: TimeSource<I>, U: Looper> StaircaseRunner<'a, I, T, U> {
    pub fn new(looper: &'a U, time_source: &'a T) -> Self {
        Self {
            looper,
            time_source,
            last_run: None,
        }
    }

    /// Updates the looper with the time since the previous run and returns
    /// the delta that was used.
    pub fn run_once(&mut self) -> Milliseconds {
        let now = self.time_source.now();
        let delta = match self.last_run {
            None => DEFAULT_UPDATE_INTERVAL,
            Some(last) => {
                let millis = now.duration_since(last).as_millis();
                Milliseconds::try_from(millis).unwrap_or(Milliseconds::MAX)
            }
        };

        self.last_run = Some(now);
        self.looper.update(delta);
        delta
    }
}
