//! Arithmetic fault categories and the fault error type.
//!
//! A [`Fault`] names the arithmetic condition that prevented an operation from producing an exact
//! in-range result. Faults are carried by [`Checked`] outputs and routed to a
//! [divergence][`divergence`] exactly once per faulting operation. There is no "success" kind:
//! the absence of a fault is the [`Value`] variant of the carrier.
//!
//! [`Checked`]: crate::checked::Checked
//! [`divergence`]: crate::divergence
//! [`Value`]: crate::checked::Checked::Value

#[cfg(not(feature = "std"))]
use core::fmt::{self, Display, Formatter};
#[cfg(feature = "std")]
use thiserror::Error;

/// The category of an arithmetic fault.
///
/// Each checked operation documents the subset of kinds that it can emit. The kind determines
/// which [divergence hook][`Divergence`] receives the fault.
///
/// [`Divergence`]: crate::divergence::Divergence
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum FaultKind {
    /// The exact result is greater than the maximum of the result type.
    PositiveOverflow,
    /// The exact result is less than the minimum of the result type.
    NegativeOverflow,
    /// Precision was lost below the representable magnitude.
    Underflow,
    /// A value lies outside the declared range of its destination type.
    Range,
    /// An operand is outside the domain of the operation, such as a shift amount that is negative
    /// or not less than the width of the result type.
    Domain,
    /// The divisor of a division or modulus is zero.
    DivideByZero,
    /// An internal invariant of the arithmetic engine was violated.
    Logic,
}

/// An arithmetic fault: a [kind][`FaultKind`] and a message describing the faulting operation.
///
/// Every `Fault` is a fault; the type cannot represent success. The message is a static
/// description of the condition, much like the source text of a failed assertion.
#[cfg_attr(feature = "std", derive(Error))]
#[cfg_attr(feature = "std", error("{message}"))]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Fault {
    kind: FaultKind,
    message: &'static str,
}

impl Fault {
    pub const fn new(kind: FaultKind, message: &'static str) -> Self {
        Fault { kind, message }
    }

    pub const fn kind(&self) -> FaultKind {
        self.kind
    }

    pub const fn message(&self) -> &'static str {
        self.message
    }
}

// When the `std` feature is enabled, the `thiserror` crate is used to implement `Display`.
#[cfg(not(feature = "std"))]
impl Display for Fault {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fault_reports_kind_and_message() {
        let fault = Fault::new(FaultKind::DivideByZero, "division by zero");
        assert_eq!(fault.kind(), FaultKind::DivideByZero);
        assert_eq!(fault.message(), "division by zero");
    }

    #[cfg(feature = "std")]
    #[test]
    fn fault_displays_message() {
        let fault = Fault::new(FaultKind::Domain, "shift amount out of range");
        assert_eq!(format!("{}", fault), "shift amount out of range");
    }
}
