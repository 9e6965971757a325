//! Gamut provides bounded machine integers with compile-time checked arithmetic.
//!
//! A [`Gamut`] type wraps a primitive integer and declares, as static parameters, the closed
//! range of values it admits, a [promotion][`promotion`] that selects the types of operator
//! results, and a [divergence][`divergence`] that determines the behavior of arithmetic faults.
//! The usual operators are redefined for expressions in which at least one operand is bounded:
//! each operation is first analysed over the operand ranges with the [interval
//! algebra][`interval`], and a runtime check is performed only when the analysis cannot prove
//! the operation fault-free. The checks themselves are exact and free of undefined behavior,
//! and every fault (overflow in either direction, division by zero, an out-of-domain shift, a
//! range violation) is reported through the divergence rather than silently wrapping.
//!
//! The following table summarizes the shipped policies:
//!
//! | Policy      | Kind       | Behavior                                                |
//! |-------------|------------|---------------------------------------------------------|
//! | [`Native`]  | promotion  | results keep the representative bounded operand's type  |
//! | [`OrPanic`] | divergence | faults panic with a descriptive message                 |
//! | [`OrWrap`]  | divergence | faults are ignored; the wrapped result is delivered     |
//! | [`OrFlag`]  | divergence | faults set a process-wide sticky flag, then continue    |
//!
//! # Examples
//!
//! Declaring a range and doing arithmetic within it:
//!
//! ```rust
//! use gamut::Gamut;
//!
//! type Percent = Gamut<u8, 0, 100>;
//!
//! let filled = Percent::new(60) + Percent::new(25);
//! assert_eq!(filled.get(), 85);
//! assert!(filled < Percent::new(90));
//! ```
//!
//! Mixed-sign comparisons are mathematical rather than native:
//!
//! ```rust
//! use gamut::Gamut;
//!
//! let negative = Gamut::<i32, -100, 100>::new(-1);
//! let huge = Gamut::<u32, 0, { u32::MAX as i128 }>::new(u32::MAX);
//! assert!(negative < huge);
//! ```
//!
//! Faults are governed by the divergence of the operand types:
//!
//! ```rust,should_panic
//! use gamut::Gamut;
//!
//! type Percent = Gamut<u8, 0, 100>;
//!
//! let _ = Percent::new(70) + Percent::new(40); // Panics: 110 is above the maximum.
//! ```
//!
//! [`divergence`]: crate::divergence
//! [`Gamut`]: crate::gamut::Gamut
//! [`interval`]: crate::interval
//! [`Native`]: crate::promotion::Native
//! [`OrFlag`]: crate::divergence::OrFlag
//! [`OrPanic`]: crate::divergence::OrPanic
//! [`OrWrap`]: crate::divergence::OrWrap
//! [`promotion`]: crate::promotion

#![cfg_attr(not(feature = "std"), no_std)]

mod sealed {
    pub trait Sealed {}
}

pub mod checked;
pub mod cmp;
pub mod divergence;
pub mod fault;
pub mod gamut;
pub mod interval;
pub mod ops;
pub mod primitive;
pub mod promotion;

pub use crate::checked::Checked;
pub use crate::divergence::{Divergence, OrFlag, OrPanic, OrWrap};
pub use crate::fault::{Fault, FaultKind};
pub use crate::gamut::{BoundedInteger, Gamut};
pub use crate::interval::Interval;
pub use crate::primitive::Primitive;
pub use crate::promotion::{Native, Promotion};

/// An `i8` admitting its full machine range.
pub type SafeI8<P = Native, E = OrPanic> = Gamut<i8, { i8::MIN as i128 }, { i8::MAX as i128 }, P, E>;
/// An `i16` admitting its full machine range.
pub type SafeI16<P = Native, E = OrPanic> =
    Gamut<i16, { i16::MIN as i128 }, { i16::MAX as i128 }, P, E>;
/// An `i32` admitting its full machine range.
pub type SafeI32<P = Native, E = OrPanic> =
    Gamut<i32, { i32::MIN as i128 }, { i32::MAX as i128 }, P, E>;
/// An `i64` admitting its full machine range.
pub type SafeI64<P = Native, E = OrPanic> =
    Gamut<i64, { i64::MIN as i128 }, { i64::MAX as i128 }, P, E>;
/// A `u8` admitting its full machine range.
pub type SafeU8<P = Native, E = OrPanic> = Gamut<u8, 0, { u8::MAX as i128 }, P, E>;
/// A `u16` admitting its full machine range.
pub type SafeU16<P = Native, E = OrPanic> = Gamut<u16, 0, { u16::MAX as i128 }, P, E>;
/// A `u32` admitting its full machine range.
pub type SafeU32<P = Native, E = OrPanic> = Gamut<u32, 0, { u32::MAX as i128 }, P, E>;
/// A `u64` admitting its full machine range.
pub type SafeU64<P = Native, E = OrPanic> = Gamut<u64, 0, { u64::MAX as i128 }, P, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_range_aliases_admit_the_machine_range() {
        assert_eq!(SafeU8::<Native, OrPanic>::new(255).get(), 255);
        assert_eq!(SafeI8::<Native, OrPanic>::new(-128).get(), -128);
        assert_eq!(SafeI64::<Native, OrPanic>::new(i64::MIN).get(), i64::MIN);
        assert_eq!(SafeU64::<Native, OrPanic>::new(u64::MAX).get(), u64::MAX);
    }

    #[test]
    #[should_panic(expected = "sum is too large")]
    fn full_range_arithmetic_faults_at_the_machine_edge() {
        let _ = SafeU8::<Native, OrPanic>::new(200) + SafeU8::<Native, OrPanic>::new(100);
    }

    #[test]
    fn full_range_arithmetic_within_the_machine_range() {
        let almost = SafeI32::<Native, OrPanic>::new((1 << 30) - 1);
        assert_eq!((SafeI32::<Native, OrPanic>::new(1 << 30) + almost).get(), i32::MAX);
    }
}
