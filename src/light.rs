//! Step light with a countdown timer.
//!
//! [`BinaryLight`] wraps a [`BinaryOutput`] and remembers its logical state.
//! The output is only written when the state actually flips, so a tick loop
//! running every few milliseconds does not hammer the hardware.

use crate::hal::BinaryOutput;
use crate::types::{FOREVER, LightState, Milliseconds};

/// A single on/off light that flips back after a timeout.
///
/// Turning the light on for `d` milliseconds means: stay on for at least `d`,
/// then toggle. A duration of [`FOREVER`] disables the timer.
pub struct BinaryLight<W: BinaryOutput> {
    output: W,
    state: LightState,
    time_left: Milliseconds,
}

impl<W: BinaryOutput> BinaryLight<W> {
    /// Creates a light that is off with no timer and writes `Low` once.
    pub fn new(output: W) -> Self {
        Self::with_state(output, LightState::Off, FOREVER)
    }

    /// Creates a light in the given state and writes it once.
    pub fn with_state(output: W, state: LightState, duration: Milliseconds) -> Self {
        let mut light = Self {
            output,
            state,
            time_left: duration,
        };
        light.write_state();
        light
    }

    /// Turns the light on for at least `duration`.
    pub fn turn_on(&mut self, duration: Milliseconds) {
        self.set_state(LightState::On, duration);
    }

    /// Turns the light off for at least `duration`.
    pub fn turn_off(&mut self, duration: Milliseconds) {
        self.set_state(LightState::Off, duration);
    }

    /// Advances the timer. Toggles the light once `delta` reaches the
    /// remaining time.
    pub fn update(&mut self, delta: Milliseconds) {
        if self.time_left == FOREVER {
            return;
        }

        if delta >= self.time_left {
            self.state = self.state.toggled();
            self.time_left = FOREVER;
            self.write_state();
        } else {
            self.time_left -= delta;
        }
    }

    pub fn is_on(&self) -> bool {
        self.state == LightState::On
    }

    pub fn is_off(&self) -> bool {
        self.state == LightState::Off
    }

    pub fn state(&self) -> LightState {
        self.state
    }

    /// Remaining time before the next toggle, or [`FOREVER`].
    pub fn time_left(&self) -> Milliseconds {
        self.time_left
    }

    /// Returns a reference to the underlying output.
    pub fn output(&self) -> &W {
        &self.output
    }

    fn set_state(&mut self, state: LightState, duration: Milliseconds) {
        if self.state != state {
            self.state = state;
            self.write_state();
        }

        // A finite duration never shortens the timer; FOREVER always replaces it.
        self.time_left = if duration == FOREVER {
            FOREVER
        } else {
            self.time_left.max(duration)
        };
    }

    fn write_state(&mut self) {
        self.output.write_value(self.state.as_binary());
    }
}
