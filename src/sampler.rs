//! The periodic sampling engine.

use crate::accumulator::Accumulator;
use crate::pin::{ButtonPin, Level};
use crate::scan;
use crate::wiring::{Kind, MAX_BUTTONS, Wiring};

/// The producer half of a scan session.
///
/// Owns the wired pins for the session's lifetime. Call
/// [`poll`](Self::poll) from the fixed-period timer interrupt; everything
/// it does is non-blocking and it goes inert on its own once the session
/// is stopped or replaced. Dropping the sampler returns the pin borrows
/// to the caller.
pub struct Sampler<P: ButtonPin> {
    wiring: Wiring<P>,
    accumulator: &'static Accumulator,
    generation: u32,
}

impl<P: ButtonPin> Sampler<P> {
    pub(crate) fn new(
        wiring: Wiring<P>,
        accumulator: &'static Accumulator,
        generation: u32,
    ) -> Self {
        Self {
            wiring,
            accumulator,
            generation,
        }
    }

    /// One sampling tick: read a "pressed now" snapshot and record it.
    ///
    /// Safe to call at any time; a sampler whose session has been stopped
    /// or replaced does nothing, without touching its pins.
    pub fn poll(&mut self) {
        if !scan::is_current(self.generation) {
            return;
        }
        let snapshot = sample(&mut self.wiring.0);
        scan::fold_if_current(self.generation, self.accumulator, snapshot);
    }

    /// Whether this sampler still feeds the active session.
    pub fn is_active(&self) -> bool {
        scan::is_current(self.generation)
    }

    /// Drive [`poll`](Self::poll) at a fixed period.
    ///
    /// Returns once the session is stopped or replaced.
    #[cfg(feature = "async")]
    pub async fn run(&mut self, period: embassy_time::Duration) {
        let mut ticker = embassy_time::Ticker::every(period);
        while self.is_active() {
            self.poll();
            ticker.next().await;
        }
    }
}

/// Read one snapshot from the wired buttons, bit *i* = button *i* pressed.
fn sample<P: ButtonPin>(kind: &mut Kind<P>) -> u8 {
    match kind {
        Kind::Direct { pins, pulls } => {
            let mut raw = 0u8;
            for (slot, pin) in pins.iter_mut().enumerate() {
                if pin.read() == Level::High {
                    raw |= 1 << slot;
                }
            }
            // Slots idling high (anything but an explicit pull-down) are
            // active-low; the XOR flips exactly those. Unused slots are
            // clear on both sides.
            raw ^ *pulls
        }
        Kind::ShiftRegister { data, clock, latch } => {
            // Capture the eight parallel lines into the register.
            latch.write(Level::Low);
            latch.write(Level::High);

            let mut snapshot = 0u8;
            for bit in 0..MAX_BUTTONS {
                // Active low: a grounded line is a pressed button.
                if data.read() == Level::Low {
                    snapshot |= 1 << bit;
                }
                // Clock the next line onto the data pin.
                clock.write(Level::High);
                clock.write(Level::Low);
            }
            snapshot
        }
    }
}
