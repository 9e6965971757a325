//! Primitive machine integers that can store a bounded value.
//!
//! This trait differentiates the base types that [`Gamut`] can wrap from other types that
//! implement integer traits. Every supported primitive is exactly representable in the `i128`
//! **wide domain**, which is where validation, comparison, and overflow detection are performed.
//!
//! 128-bit integers are not supported as base types: their ranges cannot be carried by the
//! `i128` bounds of a [`Gamut`] type.
//!
//! [`Gamut`]: crate::gamut::Gamut

use core::fmt::{Binary, Debug, Display, LowerHex, Octal, UpperHex};
use num_traits::{
    PrimInt, WrappingAdd, WrappingMul, WrappingNeg, WrappingShl, WrappingShr, WrappingSub,
};

use crate::sealed::Sealed;

/// A primitive machine integer.
///
/// The associated constants describe the machine range of the type in the wide domain;
/// [`to_wide`] and [`from_wide`] convert into and out of it. `to_wide` is exact for every value.
/// `from_wide` truncates to the two's-complement low bits of the type and is exact whenever the
/// wide value lies within the machine range.
///
/// [`from_wide`]: crate::primitive::Primitive::from_wide
/// [`to_wide`]: crate::primitive::Primitive::to_wide
pub trait Primitive:
    PrimInt
    + WrappingAdd
    + WrappingSub
    + WrappingMul
    + WrappingNeg
    + WrappingShl
    + WrappingShr
    + Debug
    + Display
    + Binary
    + Octal
    + LowerHex
    + UpperHex
    + Sealed
{
    /// The machine minimum in the wide domain.
    const WIDE_MIN: i128;
    /// The machine maximum in the wide domain.
    const WIDE_MAX: i128;
    /// The width of the type in bits.
    const BITS: u32;
    /// Whether the type is signed.
    const SIGNED: bool;

    fn to_wide(self) -> i128;

    fn from_wide(wide: i128) -> Self;
}

macro_rules! impl_primitive {
    (signed => $t:ty) => {
        impl_primitive!(@impl $t, true);
    };
    (unsigned => $t:ty) => {
        impl_primitive!(@impl $t, false);
    };
    (@impl $t:ty, $signed:expr) => {
        impl Primitive for $t {
            const WIDE_MIN: i128 = <$t>::MIN as i128;
            const WIDE_MAX: i128 = <$t>::MAX as i128;
            const BITS: u32 = <$t>::BITS;
            const SIGNED: bool = $signed;

            #[inline(always)]
            fn to_wide(self) -> i128 {
                self as i128
            }

            #[inline(always)]
            fn from_wide(wide: i128) -> Self {
                wide as $t
            }
        }

        impl Sealed for $t {}
    };
}

impl_primitive!(signed => i8);
impl_primitive!(signed => i16);
impl_primitive!(signed => i32);
impl_primitive!(signed => i64);
impl_primitive!(unsigned => u8);
impl_primitive!(unsigned => u16);
impl_primitive!(unsigned => u32);
impl_primitive!(unsigned => u64);

/// Invokes a macro once per supported primitive type.
///
/// The callee receives `primitive => $t`.
macro_rules! with_primitives {
    ($f:ident) => {
        $f!(primitive => i8);
        $f!(primitive => i16);
        $f!(primitive => i32);
        $f!(primitive => i64);
        $f!(primitive => u8);
        $f!(primitive => u16);
        $f!(primitive => u32);
        $f!(primitive => u64);
    };
}
pub(crate) use with_primitives;

/// Invokes a macro once per supported unsigned primitive type.
macro_rules! with_unsigned_primitives {
    ($f:ident) => {
        $f!(primitive => u8);
        $f!(primitive => u16);
        $f!(primitive => u32);
        $f!(primitive => u64);
    };
}
pub(crate) use with_unsigned_primitives;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wide_round_trips_are_exact() {
        assert_eq!(i8::from_wide(i8::MIN.to_wide()), i8::MIN);
        assert_eq!(u64::from_wide(u64::MAX.to_wide()), u64::MAX);
        assert_eq!(u64::MAX.to_wide(), u64::MAX as i128);
        assert_eq!(i64::MIN.to_wide(), i64::MIN as i128);
    }

    #[test]
    fn from_wide_truncates_to_low_bits() {
        assert_eq!(u8::from_wide(0x1_FF), 0xFF);
        assert_eq!(i8::from_wide(128), -128);
    }

    #[test]
    fn machine_ranges_match_the_types() {
        assert_eq!(<u8 as Primitive>::WIDE_MIN, 0);
        assert_eq!(<u8 as Primitive>::WIDE_MAX, 255);
        assert_eq!(<i8 as Primitive>::WIDE_MIN, -128);
        assert_eq!(<i8 as Primitive>::WIDE_MAX, 127);
        assert!(<i64 as Primitive>::SIGNED);
        assert!(!<u32 as Primitive>::SIGNED);
        assert_eq!(<u16 as Primitive>::BITS, 16);
    }
}
