//! Closed intervals over the wide domain and their arithmetic.
//!
//! An [`Interval`] describes the set of values that a bounded integer expression is statically
//! known to admit. The arithmetic here is pure and runs entirely over `i128` endpoints in
//! `const` contexts; it never touches runtime operand values. The [operator
//! dispatcher][`ops`] evaluates these routines in inline `const` blocks to decide, per
//! monomorphization, whether a runtime check can be elided.
//!
//! Fallible interval operations return [`Checked<Interval>`]: the carried interval brackets
//! every possible exact result, and a fault marks an operation whose result is not defined for
//! some admitted operand values (a divisor interval containing zero, a shift leaving its
//! domain) or whose endpoints leave the wide domain.
//!
//! [`Checked<Interval>`]: crate::checked::Checked
//! [`ops`]: crate::ops

use core::fmt::{self, Display, Formatter};

use crate::checked::{Checked, Faulted, Value};
use crate::fault::{Fault, FaultKind};
use crate::primitive::Primitive;

/// A closed inclusive interval `[lo, hi]` of wide-domain integers.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Interval {
    lo: i128,
    hi: i128,
}

const fn corner_product(lhs: i128, rhs: i128) -> Checked<i128> {
    match lhs.checked_mul(rhs) {
        Some(product) => Value(product),
        None => {
            if (lhs < 0) == (rhs < 0) {
                Faulted(Fault::new(
                    FaultKind::PositiveOverflow,
                    "interval product is too large for the wide domain",
                ))
            }
            else {
                Faulted(Fault::new(
                    FaultKind::NegativeOverflow,
                    "interval product is too small for the wide domain",
                ))
            }
        }
    }
}

impl Interval {
    /// Constructs an interval from its endpoints.
    ///
    /// # Panics
    ///
    /// Panics (or fails to compile, in `const` contexts) if `lo > hi`.
    pub const fn new(lo: i128, hi: i128) -> Self {
        assert!(lo <= hi, "malformed interval: lo must not exceed hi");
        Interval { lo, hi }
    }

    /// Constructs the degenerate interval that admits exactly one value.
    pub const fn point(value: i128) -> Self {
        Interval {
            lo: value,
            hi: value,
        }
    }

    /// Constructs the interval of the machine range of a primitive type.
    pub const fn machine<T>() -> Self
    where
        T: Primitive,
    {
        Interval {
            lo: T::WIDE_MIN,
            hi: T::WIDE_MAX,
        }
    }

    pub const fn lo(self) -> i128 {
        self.lo
    }

    pub const fn hi(self) -> i128 {
        self.hi
    }

    /// `true` if every value of `other` is admitted by `self`.
    pub const fn includes(self, other: Self) -> bool {
        self.lo <= other.lo && other.hi <= self.hi
    }

    pub const fn contains(self, value: i128) -> bool {
        self.lo <= value && value <= self.hi
    }

    /// `true` if the intervals share no value.
    pub const fn disjoint(self, other: Self) -> bool {
        self.hi < other.lo || other.hi < self.lo
    }

    /// The admitted value of a degenerate interval.
    ///
    /// Equality of intervals is only inferable when both are points with the same value; wider
    /// intervals admit unequal pairs.
    pub const fn as_point(self) -> Option<i128> {
        if self.lo == self.hi {
            Some(self.lo)
        }
        else {
            None
        }
    }

    /// Three-valued less-than.
    ///
    /// `Some(true)` if every admitted pair is strictly ordered, `Some(false)` if the reverse
    /// strict separation is proved, and `None` if the intervals overlap and the ordering depends
    /// on the runtime values.
    pub const fn lt(self, other: Self) -> Option<bool> {
        if self.hi < other.lo {
            Some(true)
        }
        else if self.lo > other.hi {
            Some(false)
        }
        else {
            None
        }
    }

    /// Three-valued greater-than. See [`lt`].
    ///
    /// [`lt`]: crate::interval::Interval::lt
    pub const fn gt(self, other: Self) -> Option<bool> {
        if self.lo > other.hi {
            Some(true)
        }
        else if self.hi < other.lo {
            Some(false)
        }
        else {
            None
        }
    }

    /// The interval of sums: `[lo + lo, hi + hi]`.
    pub const fn checked_add(self, rhs: Self) -> Checked<Interval> {
        let lo = match self.lo.checked_add(rhs.lo) {
            Some(lo) => lo,
            None => {
                return Faulted(Fault::new(
                    FaultKind::NegativeOverflow,
                    "interval sum is too small for the wide domain",
                ));
            }
        };
        let hi = match self.hi.checked_add(rhs.hi) {
            Some(hi) => hi,
            None => {
                return Faulted(Fault::new(
                    FaultKind::PositiveOverflow,
                    "interval sum is too large for the wide domain",
                ));
            }
        };
        Value(Interval { lo, hi })
    }

    /// The interval of differences: `[lo - hi, hi - lo]`.
    pub const fn checked_sub(self, rhs: Self) -> Checked<Interval> {
        let lo = match self.lo.checked_sub(rhs.hi) {
            Some(lo) => lo,
            None => {
                return Faulted(Fault::new(
                    FaultKind::NegativeOverflow,
                    "interval difference is too small for the wide domain",
                ));
            }
        };
        let hi = match self.hi.checked_sub(rhs.lo) {
            Some(hi) => hi,
            None => {
                return Faulted(Fault::new(
                    FaultKind::PositiveOverflow,
                    "interval difference is too large for the wide domain",
                ));
            }
        };
        Value(Interval { lo, hi })
    }

    /// The interval of products: the four-corner minimum and maximum.
    ///
    /// Zero-containing operand intervals need no tie-break: zero reaches the corners through
    /// the endpoints like any other value, and the envelope of the corners brackets it.
    pub const fn checked_mul(self, rhs: Self) -> Checked<Interval> {
        let ll = match corner_product(self.lo, rhs.lo) {
            Value(product) => product,
            Faulted(fault) => return Faulted(fault),
        };
        let lh = match corner_product(self.lo, rhs.hi) {
            Value(product) => product,
            Faulted(fault) => return Faulted(fault),
        };
        let hl = match corner_product(self.hi, rhs.lo) {
            Value(product) => product,
            Faulted(fault) => return Faulted(fault),
        };
        let hh = match corner_product(self.hi, rhs.hi) {
            Value(product) => product,
            Faulted(fault) => return Faulted(fault),
        };
        let corners = [ll, lh, hl, hh];
        let mut lo = ll;
        let mut hi = ll;
        let mut index = 1;
        while index < 4 {
            if corners[index] < lo {
                lo = corners[index];
            }
            if corners[index] > hi {
                hi = corners[index];
            }
            index += 1;
        }
        Value(Interval { lo, hi })
    }

    /// The interval of truncating quotients.
    ///
    /// Faults with `DivideByZero` if the divisor interval contains zero; the dispatcher then
    /// takes the runtime-checked path regardless of the dividend.
    pub const fn checked_div(self, rhs: Self) -> Checked<Interval> {
        if rhs.lo <= 0 && 0 <= rhs.hi {
            return Faulted(Fault::new(
                FaultKind::DivideByZero,
                "divisor interval contains zero",
            ));
        }
        // With zero excluded, quotient extremes occur at endpoint combinations. The only wide
        // quotient overflow is `i128::MIN / -1`, which no supported base type reaches.
        let mut lo = i128::MAX;
        let mut hi = i128::MIN;
        let dividends = [self.lo, self.lo, self.hi, self.hi];
        let divisors = [rhs.lo, rhs.hi, rhs.lo, rhs.hi];
        let mut index = 0;
        while index < 4 {
            let quotient = match dividends[index].checked_div(divisors[index]) {
                Some(quotient) => quotient,
                None => {
                    return Faulted(Fault::new(
                        FaultKind::PositiveOverflow,
                        "interval quotient is too large for the wide domain",
                    ));
                }
            };
            if quotient < lo {
                lo = quotient;
            }
            if quotient > hi {
                hi = quotient;
            }
            index += 1;
        }
        Value(Interval { lo, hi })
    }

    /// The envelope of remainders, signed by the dividend.
    ///
    /// Faults with `DivideByZero` if the divisor interval contains zero. Otherwise the envelope
    /// is `[0, m - 1]` for a non-negative dividend and `[-(m - 1), 0]` for a non-positive one,
    /// with `m` the largest divisor magnitude.
    pub const fn checked_rem(self, rhs: Self) -> Checked<Interval> {
        if rhs.lo <= 0 && 0 <= rhs.hi {
            return Faulted(Fault::new(
                FaultKind::DivideByZero,
                "divisor interval contains zero",
            ));
        }
        let lo_magnitude = match rhs.lo.checked_abs() {
            Some(magnitude) => magnitude,
            None => {
                return Faulted(Fault::new(
                    FaultKind::Logic,
                    "divisor magnitude is too large for the wide domain",
                ));
            }
        };
        let hi_magnitude = match rhs.hi.checked_abs() {
            Some(magnitude) => magnitude,
            None => {
                return Faulted(Fault::new(
                    FaultKind::Logic,
                    "divisor magnitude is too large for the wide domain",
                ));
            }
        };
        let bound = if lo_magnitude > hi_magnitude {
            lo_magnitude - 1
        }
        else {
            hi_magnitude - 1
        };
        let lo = if self.lo < 0 { -bound } else { 0 };
        let hi = if self.hi > 0 { bound } else { 0 };
        Value(Interval { lo, hi })
    }

    /// The interval of left shifts: `[lo << lo, hi << hi]`.
    ///
    /// Faults with `Domain` when the amount interval leaves `[0, width)` or the shifted interval
    /// admits a negative value, and with `PositiveOverflow` when a shifted endpoint leaves the
    /// wide domain.
    pub const fn checked_shl(self, amount: Self, width: u32) -> Checked<Interval> {
        if amount.lo < 0 {
            return Faulted(Fault::new(FaultKind::Domain, "shift amount is negative"));
        }
        if amount.hi >= width as i128 {
            return Faulted(Fault::new(
                FaultKind::Domain,
                "shift amount is not less than the width of the result type",
            ));
        }
        if self.lo < 0 {
            return Faulted(Fault::new(
                FaultKind::Domain,
                "left shift of a negative value",
            ));
        }
        let lo = match self.lo.checked_mul(1i128 << amount.lo) {
            Some(lo) => lo,
            None => {
                return Faulted(Fault::new(
                    FaultKind::PositiveOverflow,
                    "interval left shift is too large for the wide domain",
                ));
            }
        };
        let hi = match self.hi.checked_mul(1i128 << amount.hi) {
            Some(hi) => hi,
            None => {
                return Faulted(Fault::new(
                    FaultKind::PositiveOverflow,
                    "interval left shift is too large for the wide domain",
                ));
            }
        };
        Value(Interval { lo, hi })
    }

    /// The interval of right shifts: `[lo >> hi, hi >> lo]`.
    ///
    /// Faults with `Domain` under the constraints of [`checked_shl`].
    ///
    /// [`checked_shl`]: crate::interval::Interval::checked_shl
    pub const fn checked_shr(self, amount: Self, width: u32) -> Checked<Interval> {
        if amount.lo < 0 {
            return Faulted(Fault::new(FaultKind::Domain, "shift amount is negative"));
        }
        if amount.hi >= width as i128 {
            return Faulted(Fault::new(
                FaultKind::Domain,
                "shift amount is not less than the width of the result type",
            ));
        }
        if self.lo < 0 {
            return Faulted(Fault::new(
                FaultKind::Domain,
                "right shift of a negative value",
            ));
        }
        Value(Interval {
            lo: self.lo >> amount.hi,
            hi: self.hi >> amount.lo,
        })
    }

    /// The conservative envelope of bitwise ORs: `[0, 2^bitlen(max(hi, hi)) - 1]`.
    ///
    /// Faults with `Domain` if either interval admits a negative value.
    pub const fn bit_or(self, rhs: Self) -> Checked<Interval> {
        self.bit_envelope(rhs)
    }

    /// The conservative envelope of bitwise XORs; identical to [`bit_or`].
    ///
    /// [`bit_or`]: crate::interval::Interval::bit_or
    pub const fn bit_xor(self, rhs: Self) -> Checked<Interval> {
        self.bit_envelope(rhs)
    }

    /// The conservative envelope of bitwise ANDs: `[0, min(hi, hi)]`.
    ///
    /// Faults with `Domain` if either interval admits a negative value.
    pub const fn bit_and(self, rhs: Self) -> Checked<Interval> {
        if self.lo < 0 || rhs.lo < 0 {
            return Faulted(Fault::new(
                FaultKind::Domain,
                "bitwise operation on a signed value",
            ));
        }
        let hi = if self.hi < rhs.hi { self.hi } else { rhs.hi };
        Value(Interval { lo: 0, hi })
    }

    const fn bit_envelope(self, rhs: Self) -> Checked<Interval> {
        if self.lo < 0 || rhs.lo < 0 {
            return Faulted(Fault::new(
                FaultKind::Domain,
                "bitwise operation on a signed value",
            ));
        }
        let max_hi = if self.hi > rhs.hi { self.hi } else { rhs.hi };
        if max_hi == 0 {
            return Value(Interval { lo: 0, hi: 0 });
        }
        let bits = 128 - max_hi.leading_zeros();
        if bits >= 127 {
            return Faulted(Fault::new(
                FaultKind::PositiveOverflow,
                "bit envelope is too large for the wide domain",
            ));
        }
        Value(Interval {
            lo: 0,
            hi: (1i128 << bits) - 1,
        })
    }

    /// The interval of negations: `[-hi, -lo]`.
    pub const fn checked_neg(self) -> Checked<Interval> {
        let lo = match self.hi.checked_neg() {
            Some(lo) => lo,
            None => {
                return Faulted(Fault::new(
                    FaultKind::NegativeOverflow,
                    "interval negation is too small for the wide domain",
                ));
            }
        };
        let hi = match self.lo.checked_neg() {
            Some(hi) => hi,
            None => {
                return Faulted(Fault::new(
                    FaultKind::PositiveOverflow,
                    "interval negation is too large for the wide domain",
                ));
            }
        };
        Value(Interval { lo, hi })
    }
}

impl Display for Interval {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.lo, self.hi)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fault::FaultKind;

    fn kind(checked: Checked<Interval>) -> FaultKind {
        checked.fault().expect("expected a fault").kind()
    }

    fn interval(checked: Checked<Interval>) -> Interval {
        checked.value().expect("expected an interval")
    }

    #[test]
    #[should_panic(expected = "malformed interval")]
    fn construction_rejects_inverted_endpoints() {
        let _ = Interval::new(1, 0);
    }

    #[test]
    fn inclusion_and_disjointness() {
        let outer = Interval::new(0, 10);
        assert!(outer.includes(Interval::new(2, 8)));
        assert!(outer.includes(outer));
        assert!(!outer.includes(Interval::new(-1, 5)));
        assert!(!outer.includes(Interval::new(5, 11)));
        assert!(outer.disjoint(Interval::new(11, 20)));
        assert!(!outer.disjoint(Interval::new(10, 20)));
        assert!(outer.contains(0));
        assert!(!outer.contains(11));
    }

    #[test]
    fn three_valued_ordering() {
        let low = Interval::new(0, 10);
        let high = Interval::new(100, 200);
        assert_eq!(low.lt(high), Some(true));
        assert_eq!(high.lt(low), Some(false));
        assert_eq!(low.lt(Interval::new(5, 15)), None);
        assert_eq!(high.gt(low), Some(true));
        assert_eq!(low.gt(high), Some(false));
        assert_eq!(low.gt(Interval::new(10, 20)), None);
        // Touching endpoints still admit an equal pair.
        assert_eq!(low.lt(Interval::new(10, 20)), None);
    }

    #[test]
    fn equality_is_only_inferable_for_points() {
        assert_eq!(Interval::point(7).as_point(), Some(7));
        assert_eq!(Interval::new(7, 8).as_point(), None);
    }

    #[test]
    fn addition_and_subtraction_of_endpoints() {
        let sum = interval(Interval::new(-5, 10).checked_add(Interval::new(1, 2)));
        assert_eq!((sum.lo(), sum.hi()), (-4, 12));
        let difference = interval(Interval::new(-5, 10).checked_sub(Interval::new(1, 2)));
        assert_eq!((difference.lo(), difference.hi()), (-7, 9));
        assert_eq!(
            kind(Interval::point(i128::MAX).checked_add(Interval::point(1))),
            FaultKind::PositiveOverflow,
        );
        assert_eq!(
            kind(Interval::point(i128::MIN).checked_sub(Interval::point(1))),
            FaultKind::NegativeOverflow,
        );
    }

    #[test]
    fn multiplication_uses_all_four_corners() {
        let product = interval(Interval::new(-3, 4).checked_mul(Interval::new(-5, 2)));
        assert_eq!((product.lo(), product.hi()), (-20, 15));
        // A zero-containing operand contributes its endpoints like any other.
        let product = interval(Interval::new(-2, 0).checked_mul(Interval::new(-7, 3)));
        assert_eq!((product.lo(), product.hi()), (-6, 14));
        assert_eq!(
            kind(Interval::point(i128::MAX).checked_mul(Interval::point(2))),
            FaultKind::PositiveOverflow,
        );
        assert_eq!(
            kind(Interval::point(i128::MAX).checked_mul(Interval::point(-2))),
            FaultKind::NegativeOverflow,
        );
    }

    #[test]
    fn division_requires_a_zero_free_divisor() {
        assert_eq!(
            kind(Interval::new(1, 10).checked_div(Interval::new(-3, 3))),
            FaultKind::DivideByZero,
        );
        let quotient = interval(Interval::new(-20, 20).checked_div(Interval::new(2, 4)));
        assert_eq!((quotient.lo(), quotient.hi()), (-10, 10));
        let quotient = interval(Interval::new(10, 20).checked_div(Interval::new(-2, -1)));
        assert_eq!((quotient.lo(), quotient.hi()), (-20, -5));
    }

    #[test]
    fn remainder_envelope_follows_the_dividend_sign() {
        assert_eq!(
            kind(Interval::new(1, 10).checked_rem(Interval::new(0, 3))),
            FaultKind::DivideByZero,
        );
        let remainder = interval(Interval::new(0, 100).checked_rem(Interval::new(3, 7)));
        assert_eq!((remainder.lo(), remainder.hi()), (0, 6));
        let remainder = interval(Interval::new(-100, -1).checked_rem(Interval::new(3, 7)));
        assert_eq!((remainder.lo(), remainder.hi()), (-6, 0));
        let remainder = interval(Interval::new(-100, 100).checked_rem(Interval::new(-7, -3)));
        assert_eq!((remainder.lo(), remainder.hi()), (-6, 6));
    }

    #[test]
    fn left_shift_envelope_and_domain() {
        let shifted = interval(Interval::new(1, 4).checked_shl(Interval::new(0, 3), 8));
        assert_eq!((shifted.lo(), shifted.hi()), (1, 32));
        assert_eq!(
            kind(Interval::new(1, 4).checked_shl(Interval::new(-1, 3), 8)),
            FaultKind::Domain,
        );
        assert_eq!(
            kind(Interval::new(1, 4).checked_shl(Interval::new(0, 8), 8)),
            FaultKind::Domain,
        );
        assert_eq!(
            kind(Interval::new(-1, 4).checked_shl(Interval::new(0, 3), 8)),
            FaultKind::Domain,
        );
    }

    #[test]
    fn right_shift_envelope_and_domain() {
        let shifted = interval(Interval::new(16, 64).checked_shr(Interval::new(1, 3), 8));
        assert_eq!((shifted.lo(), shifted.hi()), (2, 32));
        assert_eq!(
            kind(Interval::new(-16, 64).checked_shr(Interval::new(1, 3), 8)),
            FaultKind::Domain,
        );
    }

    #[test]
    fn bit_envelopes() {
        let or = interval(Interval::new(0, 0xF0).bit_or(Interval::new(0, 0x0F)));
        assert_eq!((or.lo(), or.hi()), (0, 0xFF));
        // An exact power of two needs one more bit than its predecessor.
        let or = interval(Interval::new(0, 0x100).bit_or(Interval::new(0, 1)));
        assert_eq!((or.lo(), or.hi()), (0, 0x1FF));
        let and = interval(Interval::new(0, 0xF0).bit_and(Interval::new(0, 0x0F)));
        assert_eq!((and.lo(), and.hi()), (0, 0x0F));
        let xor = interval(Interval::new(0, 0).bit_xor(Interval::new(0, 0)));
        assert_eq!((xor.lo(), xor.hi()), (0, 0));
        assert_eq!(
            kind(Interval::new(-1, 0).bit_or(Interval::new(0, 1))),
            FaultKind::Domain,
        );
    }

    #[test]
    fn negation_swaps_and_negates_endpoints() {
        let negated = interval(Interval::new(-3, 10).checked_neg());
        assert_eq!((negated.lo(), negated.hi()), (-10, 3));
        assert_eq!(
            kind(Interval::point(i128::MIN).checked_neg()),
            FaultKind::PositiveOverflow,
        );
    }

    #[test]
    fn machine_intervals_match_primitive_ranges() {
        let bytes = Interval::machine::<u8>();
        assert_eq!((bytes.lo(), bytes.hi()), (0, 255));
        let signed = Interval::machine::<i16>();
        assert_eq!((signed.lo(), signed.hi()), (-32_768, 32_767));
    }

    #[test]
    fn display_is_closed_notation() {
        assert_eq!(format!("{}", Interval::new(-1, 4)), "[-1, 4]");
    }
}
