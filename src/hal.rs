//! Hardware and storage seams consumed by the core.
//!
//! The core never talks to pins or flash directly. It drives a
//! [`BinaryOutput`] per step light, reads a [`BinaryInput`] per sensor and
//! keeps learned durations in a [`Persistence`] store. [`PinOutput`] and
//! [`PinInput`] adapt `embedded-hal` digital pins to these traits.

use crate::types::BinaryValue;
use embedded_hal::digital::{InputPin, OutputPin, PinState};

/// Trait for abstracting a single on/off output.
///
/// Implement this for whatever drives a step light (GPIO, relay, shift
/// register). Handle any hardware errors internally - this method cannot fail.
pub trait BinaryOutput {
    /// Drives the output to the given level.
    fn write_value(&mut self, value: BinaryValue);
}

/// Trait for abstracting a single binary input.
pub trait BinaryInput {
    /// Samples the input. Implementations report a failed read as `Low`.
    fn read_value(&mut self) -> BinaryValue;
}

/// Small key/value store for values that survive a power cycle.
pub trait Persistence {
    /// Returns true if the key has been written before.
    fn key_exists(&self, key: &str) -> bool;

    /// Reads a stored value. `None` means the read failed; the core treats
    /// that exactly like a missing key.
    fn get_value(&self, key: &str) -> Option<i32>;

    /// Stores a value under the key.
    fn set_value(&mut self, key: &str, value: i32);
}

/// [`BinaryOutput`] over an `embedded-hal` output pin.
pub struct PinOutput<P> {
    pin: P,
}

impl<P: OutputPin> PinOutput<P> {
    pub fn new(pin: P) -> Self {
        Self { pin }
    }

    pub fn into_inner(self) -> P {
        self.pin
    }
}

impl<P: OutputPin> BinaryOutput for PinOutput<P> {
    fn write_value(&mut self, value: BinaryValue) {
        let state = PinState::from(value.is_high());
        if self.pin.set_state(state).is_err() {
            #[cfg(feature = "defmt")]
            defmt::warn!("light pin write failed, wanted {}", value);
        }
    }
}

/// [`BinaryInput`] over an `embedded-hal` input pin.
pub struct PinInput<P> {
    pin: P,
}

impl<P: InputPin> PinInput<P> {
    pub fn new(pin: P) -> Self {
        Self { pin }
    }

    pub fn into_inner(self) -> P {
        self.pin
    }
}

impl<P: InputPin> BinaryInput for PinInput<P> {
    fn read_value(&mut self) -> BinaryValue {
        match self.pin.is_high() {
            Ok(high) => BinaryValue::from(high),
            Err(_) => {
                #[cfg(feature = "defmt")]
                defmt::warn!("sensor pin read failed, assuming far");
                BinaryValue::Low
            }
        }
    }
}
