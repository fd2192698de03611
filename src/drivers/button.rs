//! ISR-debounced dump button.
//!
//! ## Hardware
//!
//! Active-low momentary switch with external pull-up.  The GPIO fires on
//! the falling edge; the ISR debounces against the last accepted edge and
//! queues [`Event::DumpRequested`] for the main loop.

use core::sync::atomic::{AtomicU32, Ordering};

use crate::events::{push_event, Event};

/// Edges closer than this to the last accepted press are contact bounce.
pub const DEBOUNCE_MS: u32 = 50;

const NEVER: u32 = u32::MAX;

/// Lock-free edge filter, usable from interrupt context.
pub struct Debouncer {
    last_ms: AtomicU32,
}

impl Debouncer {
    pub const fn new() -> Self {
        Self {
            last_ms: AtomicU32::new(NEVER),
        }
    }

    /// `true` if an edge at `now_ms` is a new press.  Wrapping-safe.
    pub fn accept(&self, now_ms: u32) -> bool {
        let last = self.last_ms.load(Ordering::Acquire);
        if last != NEVER && now_ms.wrapping_sub(last) < DEBOUNCE_MS {
            return false;
        }
        self.last_ms.store(now_ms, Ordering::Release);
        true
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new()
    }
}

static BUTTON_DEBOUNCE: Debouncer = Debouncer::new();

/// ISR handler. Register this on the button GPIO falling edge.
/// Returns whether a dump request was queued.
pub fn button_isr_handler(now_ms: u32) -> bool {
    BUTTON_DEBOUNCE.accept(now_ms) && push_event(Event::DumpRequested)
}
