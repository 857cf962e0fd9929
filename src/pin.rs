//! The digital pin seam.
//!
//! The scanner never talks to a HAL directly. Implement [`ButtonPin`] over
//! your platform's pin handle and pass those (or `&mut` borrows of them,
//! which implement the trait too) into [`Wiring`](crate::Wiring).

use embedded_hal::digital::PinState;

/// Logic level of a digital pin.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Level {
    Low,
    High,
}

impl From<bool> for Level {
    fn from(high: bool) -> Self {
        if high { Level::High } else { Level::Low }
    }
}

impl From<Level> for bool {
    fn from(level: Level) -> Self {
        level == Level::High
    }
}

impl From<PinState> for Level {
    fn from(state: PinState) -> Self {
        match state {
            PinState::Low => Level::Low,
            PinState::High => Level::High,
        }
    }
}

impl From<Level> for PinState {
    fn from(level: Level) -> Self {
        match level {
            Level::Low => PinState::Low,
            Level::High => PinState::High,
        }
    }
}

/// Pull resistor setting of an input pin.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Pull {
    None,
    Up,
    Down,
}

/// Which way a pin is currently configured.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    Input,
    Output,
}

/// Output driver configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DriveMode {
    PushPull,
    OpenDrain,
}

/// A digital pin the scanner can manage for the lifetime of a session.
///
/// The scanner reconfigures pins during [`Wiring`](crate::Wiring)
/// construction and afterwards only reads and writes levels from the
/// sampling context, so `read` and `write` must not block.
///
/// `read` is infallible: if the underlying driver can fail, return the
/// pin's idle level instead. A degraded sample beats stalling the sampling
/// interrupt.
pub trait ButtonPin {
    /// Whether the underlying pin handle is still usable, i.e. has not been
    /// released to another subsystem.
    fn is_valid(&self) -> bool;

    /// Current signal direction.
    fn direction(&self) -> Direction;

    /// Current pull setting. Meaningful for inputs.
    fn pull(&self) -> Pull;

    /// Switch the pin to input mode with the given pull.
    fn configure_input(&mut self, pull: Pull);

    /// Switch the pin to output mode, driving `initial` immediately.
    fn configure_output(&mut self, initial: Level, drive: DriveMode);

    /// Sample the current logic level.
    fn read(&mut self) -> Level;

    /// Drive the given logic level.
    fn write(&mut self, level: Level);
}

impl<P: ButtonPin + ?Sized> ButtonPin for &mut P {
    fn is_valid(&self) -> bool {
        (**self).is_valid()
    }

    fn direction(&self) -> Direction {
        (**self).direction()
    }

    fn pull(&self) -> Pull {
        (**self).pull()
    }

    fn configure_input(&mut self, pull: Pull) {
        (**self).configure_input(pull);
    }

    fn configure_output(&mut self, initial: Level, drive: DriveMode) {
        (**self).configure_output(initial, drive);
    }

    fn read(&mut self) -> Level {
        (**self).read()
    }

    fn write(&mut self, level: Level) {
        (**self).write(level);
    }
}
