//! The shared press accumulator.

use portable_atomic::{AtomicU8, Ordering};

/// Presses observed since the last drain, one bit per button.
///
/// This is the only word shared between the sampling interrupt and the
/// application, so every access is a single atomic operation: the sampler
/// ORs snapshots in, the application exchanges the whole mask for zero.
/// Neither side can tear or starve the other.
///
/// `new` is const, so the accumulator lives in a `static`:
///
/// ```rust,ignore
/// static SCAN: padscan::Accumulator = padscan::Accumulator::new();
/// ```
pub struct Accumulator {
    mask: AtomicU8,
}

impl Accumulator {
    /// An empty accumulator.
    pub const fn new() -> Self {
        Self {
            mask: AtomicU8::new(0),
        }
    }

    /// OR a snapshot into the mask.
    pub(crate) fn fold(&self, snapshot: u8) {
        self.mask.fetch_or(snapshot, Ordering::Relaxed);
    }

    /// Take the mask and leave zero behind, as one exchange. A fold landing
    /// after the exchange goes into the next window instead of vanishing.
    pub(crate) fn drain(&self) -> u8 {
        self.mask.swap(0, Ordering::Relaxed)
    }

    /// Discard everything recorded so far.
    pub(crate) fn reset(&self) {
        self.mask.store(0, Ordering::Relaxed);
    }
}

impl Default for Accumulator {
    fn default() -> Self {
        Self::new()
    }
}
