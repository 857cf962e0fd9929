//! # padscan
//!
//! Accumulating button scanner for gamepad-style inputs.
//!
//! A periodic sampler, typically driven from a timer interrupt, reads up to
//! eight buttons, normalizes their electrical polarity into logical "pressed"
//! bits and ORs every snapshot into a shared 8-bit [`Accumulator`]. The
//! application drains the accumulator whenever it gets around to it with
//! [`Pad::get_pressed`]: presses are recorded between drains, so even a short
//! tap during a blocking delay is never missed, and sampling at a fixed rate
//! keeps contact bounce from registering twice.
//!
//! Two wirings are supported behind the same engine:
//! - **Direct**: one pin per button (1–8 buttons), pull-up or pull-down.
//! - **Shift register**: eight buttons multiplexed over three pins
//!   (data/clock/latch), active-low.
//!
//! The crate is hardware-agnostic: implement [`ButtonPin`] over your HAL's
//! pin type and the engine does the rest.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use padscan::{Accumulator, Wiring};
//!
//! static SCAN: Accumulator = Accumulator::new();
//!
//! // Borrow the button pins for the lifetime of the session.
//! let wiring = Wiring::direct([&mut up, &mut down, &mut a, &mut b])?;
//! let (mut sampler, pad) = padscan::configure(&SCAN, wiring);
//!
//! // From the periodic timer interrupt (10 ms is a good rate):
//! sampler.poll();
//!
//! // In the application loop:
//! let pressed = pad.get_pressed();
//! if pressed & 0b0000_0001 != 0 {
//!     // button 0 was pressed (or held) since the last drain
//! }
//! ```
//!
//! With the `async` feature the sampler can instead be driven from a task:
//!
//! ```rust,ignore
//! #[embassy_executor::task]
//! async fn scan_task(sampler: &'static mut padscan::Sampler<Pin>) {
//!     sampler.run(embassy_time::Duration::from_millis(10)).await;
//! }
//!
//! spawner.must_spawn(scan_task(mk_static!(padscan::Sampler<Pin>, sampler)));
//! ```
//!
//! Calling [`configure`] again replaces the running session (the accumulator
//! restarts from zero); [`Pad::stop`] tears it down. Handles left over from a
//! replaced or stopped session are inert: their polls record nothing and
//! their drains return 0.

#![no_std]

#[cfg(test)]
extern crate std;

// This mod MUST go first, so that the others see its macros.
mod fmt;

mod accumulator;
mod pin;
mod sampler;
mod scan;
mod wiring;

#[cfg(test)]
pub(crate) mod mock;

pub use accumulator::Accumulator;
pub use pin::{ButtonPin, Direction, DriveMode, Level, Pull};
pub use sampler::Sampler;
pub use scan::{Pad, configure};
pub use wiring::{ConfigError, MAX_BUTTONS, Wiring};

/// StaticCell helper — allocates a value into a `static` exactly once.
///
/// Handy for giving a [`Sampler`] the `'static` lifetime an interrupt
/// handler or a spawned task needs.
#[macro_export]
macro_rules! mk_static {
    ($t:ty, $val:expr) => {{
        static STATIC_CELL: static_cell::StaticCell<$t> = static_cell::StaticCell::new();
        #[deny(unused_attributes)]
        let x = STATIC_CELL.uninit().write($val);
        x
    }};
}
