//! Moving-average estimate of how long a full traversal takes.

use crate::types::Milliseconds;

/// Number of samples averaged by default.
pub const MTA_SIZE: usize = 5;

/// Unweighted moving average over the last `N` traversal times.
///
/// Slots that were never written hold the seed, so a fresh filter reports the
/// seed until real samples push it out.
#[derive(Debug, Clone)]
pub struct MovingTimeFilter<const N: usize = MTA_SIZE> {
    samples: [Milliseconds; N],
    cursor: usize,
    current: Milliseconds,
}

impl<const N: usize> MovingTimeFilter<N> {
    /// Creates a filter with every slot holding `seed`.
    pub fn new(seed: Milliseconds) -> Self {
        Self {
            samples: [seed; N],
            cursor: 0,
            current: seed,
        }
    }

    /// Returns the cached average.
    #[inline]
    pub fn current_moving_time(&self) -> Milliseconds {
        self.current
    }

    /// Records one completed traversal.
    pub fn process_new_moving_time(&mut self, time: Milliseconds) {
        if N == 0 {
            self.current = time;
            return;
        }

        self.samples[self.cursor] = time;
        self.cursor += 1;
        if self.cursor == N {
            self.cursor = 0;
        }

        let sum: i64 = self.samples.iter().map(|&sample| i64::from(sample)).sum();
        // The mean of i32 samples always fits back into i32.
        self.current = (sum / N as i64) as Milliseconds;
    }

    /// Overwrites every slot with `time`.
    pub fn reset(&mut self, time: Milliseconds) {
        self.samples = [time; N];
        self.cursor = 0;
        self.current = time;
    }
}
