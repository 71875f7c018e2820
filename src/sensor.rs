//! Debounced proximity sensor.

use crate::hal::BinaryInput;
use crate::types::{Milliseconds, SensorState};

/// Default time a new reading has to persist before it is trusted.
pub const DEFAULT_DEBOUNCE_PERIOD: Milliseconds = 300;

/// A binary proximity input with a debounced, committed state.
///
/// The committed state only changes after the opposite reading has been seen
/// continuously for the debounce period. [`has_state_changed`] is true for
/// exactly the one [`update`] call that committed the transition.
///
/// [`has_state_changed`]: ProximitySensor::has_state_changed
/// [`update`]: ProximitySensor::update
pub struct ProximitySensor<S: BinaryInput> {
    input: S,
    state: SensorState,
    state_changed: bool,
    pending: Option<Milliseconds>,
    debounce_period: Milliseconds,
}

impl<S: BinaryInput> ProximitySensor<S> {
    /// Samples the input once to seed the committed state.
    pub fn new(mut input: S, debounce_period: Milliseconds) -> Self {
        let state = SensorState::from(input.read_value());
        Self {
            input,
            state,
            state_changed: false,
            pending: None,
            debounce_period,
        }
    }

    pub fn update(&mut self, delta: Milliseconds) {
        self.state_changed = false;

        let reading = SensorState::from(self.input.read_value());
        if reading == self.state {
            self.pending = None;
            return;
        }

        // The edge happened somewhere inside this tick, count half of it.
        let pending = match self.pending {
            None => delta / 2,
            Some(pending) => pending.saturating_add(delta),
        };

        if pending >= self.debounce_period {
            self.state = reading;
            self.state_changed = true;
            self.pending = None;
        } else {
            self.pending = Some(pending);
        }
    }

    pub fn has_state_changed(&self) -> bool {
        self.state_changed
    }

    pub fn is_close(&self) -> bool {
        self.state == SensorState::Close
    }

    pub fn is_far(&self) -> bool {
        self.state == SensorState::Far
    }

    pub fn state(&self) -> SensorState {
        self.state
    }

    /// Returns a mutable reference to the underlying input.
    pub fn input_mut(&mut self) -> &mut S {
        &mut self.input
    }
}
