//! Scan session state machine.
//!
//! At most one session is active in the process at a time. Each call to
//! [`configure`] stamps a fresh generation and publishes it; handles carry
//! the generation they were born with and go inert the moment it is no
//! longer the published one. That makes replacement atomic from both
//! sides: stale samplers stop folding, stale pads drain nothing.

use portable_atomic::{AtomicU32, Ordering};

use crate::accumulator::Accumulator;
use crate::pin::ButtonPin;
use crate::sampler::Sampler;
use crate::wiring::Wiring;

/// Generation of the active session. Zero means no session.
static ACTIVE: AtomicU32 = AtomicU32::new(0);
/// Monotonic generation source.
static GENERATIONS: AtomicU32 = AtomicU32::new(0);

/// Install a new scan session, replacing any active one.
///
/// The accumulator restarts from zero, so nothing recorded under a previous
/// wiring can surface in a later drain. Returns the two halves of the
/// session: the [`Sampler`] goes to the periodic interrupt or task, the
/// [`Pad`] stays with the application.
///
/// A replaced session's pins are left in their last configured state; the
/// old sampler no longer touches them and dropping it releases the borrows.
pub fn configure<P: ButtonPin>(
    accumulator: &'static Accumulator,
    wiring: Wiring<P>,
) -> (Sampler<P>, Pad) {
    let generation = GENERATIONS.fetch_add(1, Ordering::Relaxed).wrapping_add(1);
    critical_section::with(|_| {
        ACTIVE.store(generation, Ordering::Relaxed);
        accumulator.reset();
    });
    debug!(
        "scan session {} armed, {} buttons",
        generation,
        wiring.button_count()
    );
    (
        Sampler::new(wiring, accumulator, generation),
        Pad {
            accumulator,
            generation,
        },
    )
}

pub(crate) fn is_current(generation: u32) -> bool {
    ACTIVE.load(Ordering::Relaxed) == generation
}

/// Record a snapshot for the given session, unless it was stopped or
/// replaced after the snapshot was taken. The critical section pairs with
/// the ones in [`configure`] and [`Pad::stop`], so a stale in-flight
/// snapshot can never leak into a successor's accumulator.
pub(crate) fn fold_if_current(generation: u32, accumulator: &Accumulator, snapshot: u8) {
    critical_section::with(|_| {
        if is_current(generation) {
            accumulator.fold(snapshot);
        }
    });
}

fn drain_if_current(generation: u32, accumulator: &Accumulator) -> u8 {
    critical_section::with(|_| {
        if is_current(generation) {
            accumulator.drain()
        } else {
            0
        }
    })
}

fn stop_if_current(generation: u32, accumulator: &Accumulator) -> bool {
    critical_section::with(|_| {
        if is_current(generation) {
            ACTIVE.store(0, Ordering::Relaxed);
            accumulator.reset();
            true
        } else {
            false
        }
    })
}

/// The consumer half of a scan session.
///
/// Carries no pins, so the application can keep it anywhere and query it
/// between whatever else it is doing.
pub struct Pad {
    accumulator: &'static Accumulator,
    generation: u32,
}

impl Pad {
    /// Buttons pressed (or held) since the previous call, one bit per
    /// button, and clear the record.
    ///
    /// The read-and-clear is a single atomic exchange: a press the sampler
    /// records while this call is in flight is kept for the next call
    /// rather than lost. On a stopped or replaced session this always
    /// returns 0 and changes nothing.
    pub fn get_pressed(&self) -> u8 {
        drain_if_current(self.generation, self.accumulator)
    }

    /// Whether this pad still belongs to the active session.
    pub fn is_running(&self) -> bool {
        is_current(self.generation)
    }

    /// Tear the session down.
    ///
    /// Sampling stops, the accumulator is cleared for good, and every
    /// further [`get_pressed`](Self::get_pressed) returns 0. Idempotent; a
    /// pad whose session was already replaced cannot disturb its successor.
    pub fn stop(&self) {
        if stop_if_current(self.generation, self.accumulator) {
            debug!("scan session {} stopped", self.generation);
        }
    }
}
