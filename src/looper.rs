//! Mutex-guarded staircase shared between tasks.

use crate::config::StaircaseConfig;
use crate::hal::{BinaryInput, BinaryOutput, Persistence};
use crate::light::BinaryLight;
use crate::staircase::{DEFAULT_MAX_MOVINGS, Staircase};
use crate::types::Milliseconds;
use core::cell::RefCell;
use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::blocking_mutex::raw::RawMutex;

/// Anything that can be advanced by a periodic task.
pub trait Looper {
    /// Advances by `delta` milliseconds.
    fn update(&self, delta: Milliseconds);
}

/// A [`Staircase`] behind a blocking mutex.
///
/// The periodic task calls [`update`]; any other task that needs to look at
/// or change lights, sensors or filters does so inside [`block`]. A tick is
/// therefore atomic with respect to every other access.
///
/// Pick `R` for your platform, e.g. `CriticalSectionRawMutex` when an
/// interrupt or another core may call in, `ThreadModeRawMutex` for thread-mode
/// only, or `NoopRawMutex` when everything runs on one executor.
///
/// [`update`]: StaircaseLooper::update
/// [`block`]: StaircaseLooper::block
pub struct StaircaseLooper<R, W, S, P, const L: usize, const K: usize = DEFAULT_MAX_MOVINGS>
where
    R: RawMutex,
    W: BinaryOutput,
    S: BinaryInput,
    P: Persistence,
{
    inner: Mutex<R, RefCell<Staircase<W, S, P, L, K>>>,
}

impl<R, W, S, P, const L: usize, const K: usize> StaircaseLooper<R, W, S, P, L, K>
where
    R: RawMutex,
    W: BinaryOutput,
    S: BinaryInput,
    P: Persistence,
{
    /// Builds the staircase and restores learned durations from `persistence`.
    pub fn new(
        lights: [BinaryLight<W>; L],
        down_input: S,
        up_input: S,
        persistence: P,
        config: StaircaseConfig,
    ) -> Self {
        Self::from_staircase(Staircase::new(lights, down_input, up_input, persistence, config))
    }

    /// Wraps an already built staircase.
    pub fn from_staircase(staircase: Staircase<W, S, P, L, K>) -> Self {
        Self {
            inner: Mutex::new(RefCell::new(staircase)),
        }
    }

    /// Advances the whole system by one tick while holding the lock.
    pub fn update(&self, delta: Milliseconds) {
        self.inner.lock(|staircase| staircase.borrow_mut().update(delta));
    }

    /// Runs `f` with exclusive access to the staircase.
    ///
    /// The lock is held for the duration of the closure and released when it
    /// returns. Calling [`update`](Self::update) or `block` again from inside
    /// `f` is a programming error and panics.
    pub fn block<U>(&self, f: impl FnOnce(&mut Staircase<W, S, P, L, K>) -> U) -> U {
        self.inner.lock(|staircase| f(&mut staircase.borrow_mut()))
    }

    /// Consumes the looper and returns the staircase.
    pub fn into_inner(self) -> Staircase<W, S, P, L, K> {
        self.inner.into_inner().into_inner()
    }
}

impl<R, W, S, P, const L: usize, const K: usize> Looper for StaircaseLooper<R, W, S, P, L, K>
where
    R: RawMutex,
    W: BinaryOutput,
    S: BinaryInput,
    P: Persistence,
{
    fn update(&self, delta: Milliseconds) {
        StaircaseLooper::update(self, delta);
    }
}
