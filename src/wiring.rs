//! How buttons are physically wired to pins.

use heapless::Vec;
use thiserror::Error;

use crate::pin::{ButtonPin, Direction, DriveMode, Level, Pull};

/// Maximum number of buttons one scan session can manage.
pub const MAX_BUTTONS: usize = 8;

/// Why a [`Wiring`] could not be built.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// No button pins were supplied.
    #[error("no button pins supplied")]
    NoButtons,
    /// More than [`MAX_BUTTONS`] pins were supplied.
    #[error("more than 8 button pins supplied")]
    TooManyButtons,
    /// A supplied pin handle has already been released.
    #[error("pin handle is no longer valid")]
    InvalidPin,
}

/// A validated, electrically configured button topology.
///
/// Built with [`direct`](Wiring::direct) or
/// [`shift_register`](Wiring::shift_register), then handed to
/// [`configure`](crate::configure). Construction performs the pin setup;
/// afterwards the wiring is immutable.
pub struct Wiring<P: ButtonPin>(pub(crate) Kind<P>);

pub(crate) enum Kind<P: ButtonPin> {
    Direct {
        pins: Vec<P, MAX_BUTTONS>,
        /// Bit set for every slot whose effective pull is not pull-down.
        /// Those slots idle high and read low when pressed.
        pulls: u8,
    },
    ShiftRegister {
        data: P,
        clock: P,
        latch: P,
    },
}

impl<P: ButtonPin> Wiring<P> {
    /// Direct wiring: one pin per button, slot *i* drives bit *i* of the
    /// pressed mask.
    ///
    /// Pins not yet configured as inputs are switched to input with a
    /// pull-up; inputs left floating get a pull-up forced as well. A pin the
    /// caller configured with an explicit pull-down keeps it and reports
    /// pressed on a high read instead.
    ///
    /// All pins are validated before any is touched.
    pub fn direct<I>(pins: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = P>,
    {
        let mut slots: Vec<P, MAX_BUTTONS> = Vec::new();
        for pin in pins {
            slots.push(pin).map_err(|_| ConfigError::TooManyButtons)?;
        }
        if slots.is_empty() {
            return Err(ConfigError::NoButtons);
        }
        if slots.iter().any(|pin| !pin.is_valid()) {
            return Err(ConfigError::InvalidPin);
        }

        let mut pulls = 0u8;
        for (slot, pin) in slots.iter_mut().enumerate() {
            if pin.direction() != Direction::Input {
                pin.configure_input(Pull::Up);
            } else if pin.pull() == Pull::None {
                // Keep an explicit pull, but a floating input needs a
                // defined idle level.
                pin.configure_input(Pull::Up);
            }
            if pin.pull() != Pull::Down {
                pulls |= 1 << slot;
            }
        }
        Ok(Self(Kind::Direct { pins: slots, pulls }))
    }

    /// Shift-register wiring: eight active-low buttons multiplexed over a
    /// parallel-in/serial-out register.
    ///
    /// `data` becomes a floating input, `clock` a push-pull output idling
    /// low, `latch` a push-pull output idling high.
    pub fn shift_register(mut data: P, mut clock: P, mut latch: P) -> Result<Self, ConfigError> {
        if !(data.is_valid() && clock.is_valid() && latch.is_valid()) {
            return Err(ConfigError::InvalidPin);
        }
        data.configure_input(Pull::None);
        clock.configure_output(Level::Low, DriveMode::PushPull);
        latch.configure_output(Level::High, DriveMode::PushPull);
        Ok(Self(Kind::ShiftRegister { data, clock, latch }))
    }

    /// Number of logical buttons this wiring provides.
    pub fn button_count(&self) -> usize {
        match &self.0 {
            Kind::Direct { pins, .. } => pins.len(),
            Kind::ShiftRegister { .. } => MAX_BUTTONS,
        }
    }
}
