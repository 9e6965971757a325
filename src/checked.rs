//! Checked arithmetic over primitive machine integers.
//!
//! This module provides the [`Checked`] carrier, which holds either the exact result of an
//! operation or the [`Fault`] that prevented it, together with checked routines for every
//! arithmetic, shift, bitwise, and conversion operation of the crate. The routines never panic
//! and are free of undefined behavior: every overflow test is performed in the `i128` wide
//! domain, where all supported operand values and exact results are representable.
//!
//! The one exception to "all exact results are representable" is multiplication of 64-bit
//! operands, whose exact product can exceed the wide domain; [`multiply`] detects this with a
//! checked wide product, and such a product is always a positive overflow of every supported
//! result type.

use crate::fault::{Fault, FaultKind};
use crate::primitive::Primitive;

pub use Checked::Faulted;
pub use Checked::Value;

/// Unwraps a [`Checked`] value or propagates its fault.
///
/// This macro mirrors the standard [`try`] macro but operates on [`Checked`] rather than
/// [`Result`]. If the given [`Checked`] is the `Value` variant, then the expression (of the
/// macro) is the accompanying value. Otherwise, the fault is returned in the constructed
/// [`Checked`].
///
/// # Examples
///
/// ```rust
/// use gamut::checked::{self, Checked};
///
/// // Sums a slice of bytes, faulting if the sum leaves `u8`.
/// fn sum(values: &[u8]) -> Checked<u8> {
///     let mut sum = 0u8;
///     for &value in values {
///         sum = gamut::try_checked!(checked::add(sum, value));
///     }
///     Checked::Value(sum)
/// }
///
/// assert_eq!(sum(&[100, 100, 55]).value(), Some(255));
/// assert!(sum(&[200, 100]).is_fault());
/// ```
///
/// [`Checked`]: crate::checked::Checked
/// [`Result`]: core::result::Result
/// [`try`]: core::try
#[macro_export]
macro_rules! try_checked {
    ($x:expr $(,)?) => {{
        let checked: $crate::checked::Checked<_> = $x;
        match checked {
            $crate::checked::Checked::Value(value) => value,
            $crate::checked::Checked::Faulted(fault) => {
                return $crate::checked::Checked::Faulted(fault);
            }
        }
    }};
}

/// The output of a checked operation: an exact value or the fault that prevented it.
///
/// `Checked` resembles [`Result`], but its error is always a [`Fault`] and it can be constructed
/// and examined in `const` contexts, which is what allows the [interval algebra][`interval`] to
/// run at compile time. The value is only observable through the `Value` variant; a carrier is
/// never both a value and a fault. There is no mutation: a `Checked` is examined or consumed,
/// never rewritten.
///
/// [`interval`]: crate::interval
/// [`Result`]: core::result::Result
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Checked<T> {
    Value(T),
    Faulted(Fault),
}

impl<T> Checked<T> {
    /// Unwraps the carried value.
    ///
    /// # Panics
    ///
    /// Panics with the fault message if the carrier is faulted.
    pub fn unwrap(self) -> T {
        match self {
            Value(value) => value,
            Faulted(fault) => panic!("{}", fault.message()),
        }
    }

    pub fn map<U, F>(self, f: F) -> Checked<U>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            Value(value) => Value(f(value)),
            Faulted(fault) => Faulted(fault),
        }
    }

    pub fn and_then<U, F>(self, f: F) -> Checked<U>
    where
        F: FnOnce(T) -> Checked<U>,
    {
        match self {
            Value(value) => f(value),
            Faulted(fault) => Faulted(fault),
        }
    }

    pub fn value(self) -> Option<T> {
        match self {
            Value(value) => Some(value),
            _ => None,
        }
    }

    /// Gets the fault, if any. The kind of a carried fault is never a success.
    pub const fn fault(&self) -> Option<Fault> {
        match self {
            Faulted(fault) => Some(*fault),
            _ => None,
        }
    }

    pub const fn is_fault(&self) -> bool {
        matches!(self, Faulted(_))
    }

    pub fn into_result(self) -> Result<T, Fault> {
        match self {
            Value(value) => Ok(value),
            Faulted(fault) => Err(fault),
        }
    }

    /// Unwraps the carried value or routes the fault through the divergence `D` and continues
    /// with `fallback`.
    ///
    /// The fault is dispatched exactly once. If `D` panics, `fallback` is never observed; if `D`
    /// returns, `fallback` stands in for the unrepresentable exact result.
    pub fn or_diverge<D>(self, fallback: T) -> T
    where
        D: crate::divergence::Divergence,
    {
        match self {
            Value(value) => value,
            Faulted(fault) => {
                D::diverge(&fault);
                fallback
            }
        }
    }
}

impl<T> From<T> for Checked<T> {
    fn from(value: T) -> Self {
        Value(value)
    }
}

/// Admits a wide exact result into the machine range of `T`.
fn fit<T>(wide: i128, positive: &'static str, negative: &'static str) -> Checked<T>
where
    T: Primitive,
{
    if wide > T::WIDE_MAX {
        Faulted(Fault::new(FaultKind::PositiveOverflow, positive))
    }
    else if wide < T::WIDE_MIN {
        Faulted(Fault::new(FaultKind::NegativeOverflow, negative))
    }
    else {
        Value(T::from_wide(wide))
    }
}

/// Checked addition.
///
/// Emits `PositiveOverflow` or `NegativeOverflow`.
pub fn add<T>(augend: T, addend: T) -> Checked<T>
where
    T: Primitive,
{
    fit(
        augend.to_wide() + addend.to_wide(),
        "sum is too large for the result type",
        "sum is too small for the result type",
    )
}

/// Checked subtraction.
///
/// Emits `PositiveOverflow` or `NegativeOverflow`.
pub fn subtract<T>(minuend: T, subtrahend: T) -> Checked<T>
where
    T: Primitive,
{
    fit(
        minuend.to_wide() - subtrahend.to_wide(),
        "difference is too large for the result type",
        "difference is too small for the result type",
    )
}

/// Checked multiplication.
///
/// Emits `PositiveOverflow` or `NegativeOverflow`.
pub fn multiply<T>(multiplicand: T, multiplier: T) -> Checked<T>
where
    T: Primitive,
{
    match multiplicand.to_wide().checked_mul(multiplier.to_wide()) {
        Some(wide) => fit(
            wide,
            "product is too large for the result type",
            "product is too small for the result type",
        ),
        // Only the product of two 64-bit magnitudes can leave the wide domain, and such a
        // product is positive and exceeds every supported result type.
        None => Faulted(Fault::new(
            FaultKind::PositiveOverflow,
            "product is too large for the result type",
        )),
    }
}

/// Checked division, truncating toward zero.
///
/// Emits `DivideByZero` on a zero divisor and `PositiveOverflow` on the signed `MIN / -1` edge,
/// where the exact quotient exceeds the machine maximum.
pub fn divide<T>(dividend: T, divisor: T) -> Checked<T>
where
    T: Primitive,
{
    if divisor.is_zero() {
        return Faulted(Fault::new(FaultKind::DivideByZero, "division by zero"));
    }
    fit(
        dividend.to_wide() / divisor.to_wide(),
        "quotient is too large for the result type",
        "quotient is too small for the result type",
    )
}

/// Checked remainder, with the sign of the dividend.
///
/// Emits `DivideByZero` on a zero divisor. The signed `MIN % -1` edge has the exact remainder
/// zero, which is always representable; computing in the wide domain sidesteps the hardware
/// trap.
pub fn modulus<T>(dividend: T, divisor: T) -> Checked<T>
where
    T: Primitive,
{
    if divisor.is_zero() {
        return Faulted(Fault::new(FaultKind::DivideByZero, "modulus by zero"));
    }
    fit(
        dividend.to_wide() % divisor.to_wide(),
        "remainder is too large for the result type",
        "remainder is too small for the result type",
    )
}

/// Checked left shift.
///
/// Emits `Domain` when the shift amount is negative or not less than the width of `T` or when
/// the shifted operand is negative, and `PositiveOverflow` when a set bit leaves the machine
/// range.
pub fn left_shift<T, U>(value: T, amount: U) -> Checked<T>
where
    T: Primitive,
    U: Primitive,
{
    let amount = amount.to_wide();
    if amount < 0 {
        return Faulted(Fault::new(FaultKind::Domain, "shift amount is negative"));
    }
    if amount >= i128::from(T::BITS) {
        return Faulted(Fault::new(
            FaultKind::Domain,
            "shift amount is not less than the width of the result type",
        ));
    }
    let wide = value.to_wide();
    if wide < 0 {
        return Faulted(Fault::new(
            FaultKind::Domain,
            "left shift of a negative value",
        ));
    }
    match wide.checked_mul(1i128 << amount) {
        Some(shifted) => fit(
            shifted,
            "left shift result is too large for the result type",
            "left shift result is too small for the result type",
        ),
        None => Faulted(Fault::new(
            FaultKind::PositiveOverflow,
            "left shift result is too large for the result type",
        )),
    }
}

/// Checked right shift.
///
/// Emits `Domain` when the shift amount is negative or not less than the width of `T` or when
/// the shifted operand is negative. A permissive divergence may elect to continue with the
/// arithmetic-shift fallback that the dispatcher supplies.
pub fn right_shift<T, U>(value: T, amount: U) -> Checked<T>
where
    T: Primitive,
    U: Primitive,
{
    let amount = amount.to_wide();
    if amount < 0 {
        return Faulted(Fault::new(FaultKind::Domain, "shift amount is negative"));
    }
    if amount >= i128::from(T::BITS) {
        return Faulted(Fault::new(
            FaultKind::Domain,
            "shift amount is not less than the width of the result type",
        ));
    }
    let wide = value.to_wide();
    if wide < 0 {
        return Faulted(Fault::new(
            FaultKind::Domain,
            "right shift of a negative value",
        ));
    }
    Value(T::from_wide(wide >> amount))
}

/// Bitwise OR.
///
/// Exact and infallible: signed operands are rejected statically by the `Unsigned` bound, which
/// is the domain restriction of the operation.
pub fn bitwise_or<T>(lhs: T, rhs: T) -> Checked<T>
where
    T: Primitive + num_traits::Unsigned,
{
    Value(lhs | rhs)
}

/// Bitwise AND. See [`bitwise_or`].
///
/// [`bitwise_or`]: crate::checked::bitwise_or
pub fn bitwise_and<T>(lhs: T, rhs: T) -> Checked<T>
where
    T: Primitive + num_traits::Unsigned,
{
    Value(lhs & rhs)
}

/// Bitwise XOR. See [`bitwise_or`].
///
/// [`bitwise_or`]: crate::checked::bitwise_or
pub fn bitwise_xor<T>(lhs: T, rhs: T) -> Checked<T>
where
    T: Primitive + num_traits::Unsigned,
{
    Value(lhs ^ rhs)
}

/// Checked negation.
///
/// Emits `PositiveOverflow` for the signed machine minimum and `NegativeOverflow` for any
/// nonzero unsigned operand.
pub fn negate<T>(value: T) -> Checked<T>
where
    T: Primitive,
{
    fit(
        -value.to_wide(),
        "negation result is too large for the result type",
        "negation result is too small for the result type",
    )
}

/// Checked conversion into another primitive type.
///
/// Emits `PositiveOverflow` or `NegativeOverflow` when the value does not fit the machine range
/// of `R`. Sign mismatches need no special casing: both ranges are exact in the wide domain.
pub fn cast<R, T>(value: T) -> Checked<R>
where
    R: Primitive,
    T: Primitive,
{
    fit(
        value.to_wide(),
        "cast value is too large for the result type",
        "cast value is too small for the result type",
    )
}
