//! Fault behavior for bounded integer operations.
//!
//! A [divergence][`Divergence`] determines what happens when an operation on a [`Gamut`] type
//! faults. Each fault kind is routed to a hook, and a hook may panic, record the fault, or do
//! nothing; the dispatcher calls exactly one hook per faulting operation. When a hook returns,
//! the operation continues and delivers the wrapped, truncated, or fallback result that the
//! [operator dispatcher][`ops`] documents, so a divergence that opts out of reporting still
//! leaves the numeric result defined.
//!
//! | Divergence  | On fault                                    |
//! |-------------|---------------------------------------------|
//! | [`OrPanic`] | **panics** with the fault message           |
//! | [`OrWrap`]  | continues with the wrapped result           |
//! | [`OrFlag`]  | records a sticky flag, then continues       |
//!
//! `OrPanic` is the strict divergence and the default type parameter of [`Gamut`]. Divergence is
//! a static parameter: operands of an operation must agree on it, and there is no runtime
//! negotiation.
//!
//! # Examples
//!
//! The following example defines a byte-counter type that wraps on overflow instead of
//! panicking.
//!
//! ```rust
//! use gamut::divergence::OrWrap;
//! use gamut::{Gamut, Native};
//!
//! pub type Counter = Gamut<u8, 0, 255, Native, OrWrap>;
//!
//! let x = Counter::new(250);
//! let y = x + Counter::new(10);
//! assert_eq!(y.get(), 4); // Two's-complement wraparound of 260.
//! ```
//!
//! [`Divergence`]: crate::divergence::Divergence
//! [`Gamut`]: crate::gamut::Gamut
//! [`ops`]: crate::ops

use core::sync::atomic::{AtomicBool, Ordering};

use crate::fault::{Fault, FaultKind};

/// Determines the behavior of a faulting operation.
///
/// Implementations provide one hook per fault class. A hook may panic (like [`OrPanic`]), abort,
/// record state of its own, or return; the concurrency discipline of any such state belongs to
/// the implementation. The provided [`diverge`] router maps a [`Fault`] to its hook and is what
/// the rest of the crate calls.
///
/// [`diverge`]: crate::divergence::Divergence::diverge
/// [`Fault`]: crate::fault::Fault
/// [`OrPanic`]: crate::divergence::OrPanic
pub trait Divergence {
    fn overflow_error(message: &'static str);

    fn underflow_error(message: &'static str);

    fn range_error(message: &'static str);

    fn domain_error(message: &'static str);

    fn arithmetic_error(message: &'static str);

    fn implementation_defined_error(message: &'static str);

    /// Routes a fault to the hook for its kind.
    ///
    /// Called exactly once per faulting operation.
    fn diverge(fault: &Fault) {
        let message = fault.message();
        match fault.kind() {
            FaultKind::PositiveOverflow | FaultKind::NegativeOverflow => {
                Self::overflow_error(message)
            }
            FaultKind::Underflow => Self::underflow_error(message),
            FaultKind::Range => Self::range_error(message),
            FaultKind::Domain => Self::domain_error(message),
            FaultKind::DivideByZero => Self::arithmetic_error(message),
            FaultKind::Logic => Self::implementation_defined_error(message),
        }
    }
}

/// Divergence that panics with the fault message.
///
/// This is the strict divergence: no fault goes unnoticed, and no operation ever delivers an
/// out-of-range value.
#[derive(Debug)]
pub enum OrPanic {}

impl Divergence for OrPanic {
    fn overflow_error(message: &'static str) {
        panic!("{}", message)
    }

    fn underflow_error(message: &'static str) {
        panic!("{}", message)
    }

    fn range_error(message: &'static str) {
        panic!("{}", message)
    }

    fn domain_error(message: &'static str) {
        panic!("{}", message)
    }

    fn arithmetic_error(message: &'static str) {
        panic!("{}", message)
    }

    fn implementation_defined_error(message: &'static str) {
        panic!("{}", message)
    }
}

/// Divergence that ignores faults and continues with the wrapped result.
///
/// Faulting operations behave like the `wrapping_*` family of the primitive types: the
/// delivered value is the two's-complement wraparound or truncation of the exact result, which
/// may lie outside the declared range of the result type. Use this divergence where native
/// integer semantics are wanted and the fault itself is irrelevant.
#[derive(Debug)]
pub enum OrWrap {}

impl Divergence for OrWrap {
    fn overflow_error(_: &'static str) {}

    fn underflow_error(_: &'static str) {}

    fn range_error(_: &'static str) {}

    fn domain_error(_: &'static str) {}

    fn arithmetic_error(_: &'static str) {}

    fn implementation_defined_error(_: &'static str) {}
}

// One process-wide flag, not one per instantiation. Operations on distinct `Gamut` types all
// observe it.
static FAULTED: AtomicBool = AtomicBool::new(false);

/// Divergence that records faults in a process-wide sticky flag and continues like [`OrWrap`].
///
/// The flag is sticky: it stays set across faults until [`clear`] is called. This mirrors the
/// floating-point environment idiom of checking accumulated exception flags after a computation
/// rather than after each operation.
///
/// [`clear`]: crate::divergence::OrFlag::clear
/// [`OrWrap`]: crate::divergence::OrWrap
#[derive(Debug)]
pub enum OrFlag {}

impl OrFlag {
    /// `true` if any operation has faulted since the flag was last cleared.
    pub fn is_set() -> bool {
        FAULTED.load(Ordering::Relaxed)
    }

    pub fn clear() {
        FAULTED.store(false, Ordering::Relaxed);
    }

    fn set() {
        FAULTED.store(true, Ordering::Relaxed);
    }
}

impl Divergence for OrFlag {
    fn overflow_error(_: &'static str) {
        OrFlag::set();
    }

    fn underflow_error(_: &'static str) {
        OrFlag::set();
    }

    fn range_error(_: &'static str) {
        OrFlag::set();
    }

    fn domain_error(_: &'static str) {
        OrFlag::set();
    }

    fn arithmetic_error(_: &'static str) {
        OrFlag::set();
    }

    fn implementation_defined_error(_: &'static str) {
        OrFlag::set();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checked::Checked;
    use crate::fault::{Fault, FaultKind};

    #[test]
    #[should_panic(expected = "division by zero")]
    fn or_panic_panics_with_the_message() {
        let faulted: Checked<u8> = Checked::Faulted(Fault::new(
            FaultKind::DivideByZero,
            "division by zero",
        ));
        let _ = faulted.or_diverge::<OrPanic>(0);
    }

    #[test]
    fn or_wrap_continues_with_the_fallback() {
        let faulted: Checked<u8> = Checked::Faulted(Fault::new(
            FaultKind::PositiveOverflow,
            "sum is too large for the result type",
        ));
        assert_eq!(faulted.or_diverge::<OrWrap>(44), 44);
    }

    #[test]
    fn or_flag_records_and_clears() {
        OrFlag::clear();
        let defined: Checked<u8> = Checked::Value(1);
        assert_eq!(defined.or_diverge::<OrFlag>(0), 1);
        assert!(!OrFlag::is_set());

        let faulted: Checked<u8> = Checked::Faulted(Fault::new(
            FaultKind::NegativeOverflow,
            "difference is too small for the result type",
        ));
        assert_eq!(faulted.or_diverge::<OrFlag>(7), 7);
        assert!(OrFlag::is_set());

        OrFlag::clear();
        assert!(!OrFlag::is_set());
    }
}
