//! Tracing flags for the engine.
//!
//! Three flags gate the textual traces of
//! reduction, rule matching, and conversion.
//! The traces themselves go through the `log` facade and
//! the `Display` implementations of the printed structures,
//! so the driver chooses the backend and the output format is not stable.

use core::sync::atomic::{AtomicBool, Ordering::Relaxed};

static REDUCTION: AtomicBool = AtomicBool::new(false);
static MATCHING: AtomicBool = AtomicBool::new(false);
static CONVERSION: AtomicBool = AtomicBool::new(false);

/// Enable or disable tracing of reduction steps.
pub fn trace_reduction(on: bool) {
    REDUCTION.store(on, Relaxed)
}

/// Enable or disable tracing of rule matching.
pub fn trace_matching(on: bool) {
    MATCHING.store(on, Relaxed)
}

/// Enable or disable tracing of conversion.
pub fn trace_conversion(on: bool) {
    CONVERSION.store(on, Relaxed)
}

pub(crate) fn reduction() -> bool {
    REDUCTION.load(Relaxed)
}

pub(crate) fn matching() -> bool {
    MATCHING.load(Relaxed)
}

pub(crate) fn conversion() -> bool {
    CONVERSION.load(Relaxed)
}
