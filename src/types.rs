//! Core types shared by lights, sensors and movings.

/// Tick and timer unit. Signed so that [`FOREVER`] fits next to real values.
pub type Milliseconds = i32;

/// Sentinel for "no timeout": a timer set to this never expires.
pub const FOREVER: Milliseconds = -1;

/// Single-bit level read from a sensor or written to a light.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BinaryValue {
    /// Logic low.
    Low,
    /// Logic high.
    High,
}

impl BinaryValue {
    /// Returns true for [`BinaryValue::High`].
    #[inline]
    pub fn is_high(self) -> bool {
        self == BinaryValue::High
    }
}

impl From<bool> for BinaryValue {
    fn from(high: bool) -> Self {
        if high {
            BinaryValue::High
        } else {
            BinaryValue::Low
        }
    }
}

/// Direction of travel on the staircase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    /// Bottom to top. Lights are walked from index 0 upwards.
    Up,
    /// Top to bottom. Lights are walked from the last index downwards.
    Down,
}

/// Logical state of a step light.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LightState {
    /// Light is dark. Written as [`BinaryValue::Low`].
    Off,
    /// Light is lit. Written as [`BinaryValue::High`].
    On,
}

impl LightState {
    /// Returns the opposite state.
    #[inline]
    pub fn toggled(self) -> Self {
        match self {
            LightState::Off => LightState::On,
            LightState::On => LightState::Off,
        }
    }

    pub(crate) fn as_binary(self) -> BinaryValue {
        match self {
            LightState::On => BinaryValue::High,
            LightState::Off => BinaryValue::Low,
        }
    }
}

/// Debounced state of a proximity sensor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SensorState {
    /// Nobody in front of the sensor.
    Far,
    /// Somebody is standing at the sensor.
    Close,
}

impl From<BinaryValue> for SensorState {
    fn from(value: BinaryValue) -> Self {
        match value {
            BinaryValue::High => SensorState::Close,
            BinaryValue::Low => SensorState::Far,
        }
    }
}
