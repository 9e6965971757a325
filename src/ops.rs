//! Operators over bounded integers.
//!
//! This module redefines the arithmetic, shift, bitwise, comparison, and negation operators for
//! expressions in which at least one operand is a [`Gamut`] type; purely primitive operand
//! pairs never see these implementations. Each binary operator follows the same procedure:
//!
//! 1. The operand policies compose structurally: implementations exist only for operands that
//!    agree on promotion and divergence, and a bare primitive operand contributes neither. The
//!    representative bounded operand (the left one, when both are bounded) and the other
//!    operand select the result type through the [promotion][`promotion`].
//! 2. An inline `const` block forms the operand intervals (the declared range of a bounded
//!    operand, the machine range of a primitive one) and evaluates the [interval
//!    algebra][`interval`] against the declared range of the result type.
//! 3. When the analysis proves that no fault is reachable, the operation is performed exactly
//!    in the wide domain and wrapped without any runtime check. Division and modulus reach this
//!    path only when the divisor interval also excludes zero.
//! 4. Otherwise the [checked primitive][`checked`] runs (division and modulus through the
//!    promotion's hooks) and any fault is routed through the divergence exactly once. If the
//!    divergence returns, the delivered value is the two's-complement wrapped or truncated
//!    result; a zero divisor delivers zero and an out-of-domain shift delivers the masked
//!    shift. Such a value may lie outside the declared range of the result type, which is the
//!    documented behavior of returning divergences.
//!
//! Comparisons return plain booleans across every pair of base types and policies: the static
//! analysis short-circuits strictly separated ranges, and overlapping ranges fall through to
//! [sign-aware comparison][`cmp`] of the runtime values. Bitwise operators require unsigned
//! operands; a signed operand fails to compile.
//!
//! [`checked`]: crate::checked
//! [`cmp`]: crate::cmp
//! [`Gamut`]: crate::gamut::Gamut
//! [`interval`]: crate::interval
//! [`promotion`]: crate::promotion

use core::cmp::Ordering;
use core::ops::{
    Add, AddAssign, BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Div,
    DivAssign, Mul, MulAssign, Neg, Rem, RemAssign, Shl, ShlAssign, Shr, ShrAssign, Sub,
    SubAssign,
};
use num_traits::{
    Unsigned, WrappingAdd, WrappingMul, WrappingNeg, WrappingShl, WrappingShr, WrappingSub,
};

use crate::checked::{self, Checked};
use crate::cmp;
use crate::divergence::Divergence;
use crate::fault::{Fault, FaultKind};
use crate::gamut::{BoundedInteger, Gamut};
use crate::interval::Interval;
use crate::primitive::{with_primitives, with_unsigned_primitives, Primitive};
use crate::promotion::{
    BitAndOf, BitOrOf, BitXorOf, DifferenceOf, LeftShiftOf, NegationOf, ProductOf, Promotion,
    QuotientOf, RemainderOf, RightShiftOf, SumOf,
};

/// `true` if the analysis produced a fault-free interval within the target range.
const fn proves(analysis: Checked<Interval>, target: Interval) -> bool {
    match analysis {
        Checked::Value(interval) => target.includes(interval),
        Checked::Faulted(_) => false,
    }
}

/// The declared range of a bounded type.
const fn target<O>() -> Interval
where
    O: BoundedInteger,
{
    Interval::new(O::MIN_WIDE, O::MAX_WIDE)
}

/// The statically proved ordering of two ranges, if any.
const fn separation(lhs: Interval, rhs: Interval) -> Option<Ordering> {
    if let (Some(lhs), Some(rhs)) = (lhs.as_point(), rhs.as_point()) {
        if lhs == rhs {
            return Some(Ordering::Equal);
        }
    }
    match lhs.lt(rhs) {
        Some(true) => Some(Ordering::Less),
        _ => match lhs.gt(rhs) {
            Some(true) => Some(Ordering::Greater),
            _ => None,
        },
    }
}

/// Admits a checked result into the result type, diverging at most once.
///
/// A value outside the declared range of the result type is an overflow of that type and is
/// delivered unchanged if the divergence returns; a faulted primitive delivers `fallback`.
fn absorb<O, D>(result: Checked<O::Base>, fallback: O::Base) -> O
where
    O: BoundedInteger,
    D: Divergence,
{
    match result {
        Checked::Value(value) => {
            let wide = value.to_wide();
            if wide > O::MAX_WIDE {
                D::diverge(&Fault::new(
                    FaultKind::PositiveOverflow,
                    "result is above the maximum of the result type",
                ));
            }
            else if wide < O::MIN_WIDE {
                D::diverge(&Fault::new(
                    FaultKind::NegativeOverflow,
                    "result is below the minimum of the result type",
                ));
            }
            O::from_base_unchecked(value)
        }
        Checked::Faulted(fault) => {
            D::diverge(&fault);
            O::from_base_unchecked(fallback)
        }
    }
}

fn wrapping_quotient<T>(dividend: T, divisor: T) -> T
where
    T: Primitive,
{
    if divisor.is_zero() {
        T::zero()
    }
    else {
        T::from_wide(dividend.to_wide() / divisor.to_wide())
    }
}

fn wrapping_remainder<T>(dividend: T, divisor: T) -> T
where
    T: Primitive,
{
    if divisor.is_zero() {
        T::zero()
    }
    else {
        T::from_wide(dividend.to_wide() % divisor.to_wide())
    }
}

// Implements one wide-domain arithmetic operator for the bounded/bounded, bounded/primitive,
// and primitive/bounded operand forms. The primitive forms are expanded per primitive type:
// coherence does not permit a blanket primitive operand beside the bounded one.
macro_rules! impl_binary_operation_for_gamut {
    (
        operation => $trait:ident :: $method:ident,
        $output:ident,
        $analyze:ident,
        $checked:ident,
        $wrapping:ident :: $wrapping_method:ident $(,)?
    ) => {
        impl<T, P, E, const LHS_MIN: i128, const LHS_MAX: i128, const RHS_MIN: i128, const RHS_MAX: i128>
            $trait<Gamut<T, RHS_MIN, RHS_MAX, P, E>> for Gamut<T, LHS_MIN, LHS_MAX, P, E>
        where
            T: Primitive,
            P: Promotion,
            E: Divergence,
        {
            type Output = $output<P, Gamut<T, LHS_MIN, LHS_MAX, P, E>, Gamut<T, RHS_MIN, RHS_MAX, P, E>>;

            fn $method(self, rhs: Gamut<T, RHS_MIN, RHS_MAX, P, E>) -> Self::Output {
                let proven = const {
                    proves(
                        Interval::new(LHS_MIN, LHS_MAX).$analyze(Interval::new(RHS_MIN, RHS_MAX)),
                        target::<Self::Output>(),
                    )
                };
                if proven {
                    <Self::Output as BoundedInteger>::from_base_unchecked(T::from_wide(
                        wide::$method(self.get().to_wide(), rhs.get().to_wide()),
                    ))
                }
                else {
                    absorb::<Self::Output, E>(
                        checked::$checked(self.get(), rhs.get()),
                        $wrapping::$wrapping_method(&self.get(), &rhs.get()),
                    )
                }
            }
        }

        macro_rules! impl_primitive_binary_operation_for_gamut {
            (primitive => $t:ty) => {
                impl<P, E, const LHS_MIN: i128, const LHS_MAX: i128> $trait<$t>
                    for Gamut<$t, LHS_MIN, LHS_MAX, P, E>
                where
                    P: Promotion,
                    E: Divergence,
                {
                    type Output = $output<P, Gamut<$t, LHS_MIN, LHS_MAX, P, E>, $t>;

                    fn $method(self, rhs: $t) -> Self::Output {
                        let proven = const {
                            proves(
                                Interval::new(LHS_MIN, LHS_MAX).$analyze(Interval::machine::<$t>()),
                                target::<Self::Output>(),
                            )
                        };
                        if proven {
                            <Self::Output as BoundedInteger>::from_base_unchecked(
                                <$t as Primitive>::from_wide(wide::$method(
                                    self.get().to_wide(),
                                    rhs.to_wide(),
                                )),
                            )
                        }
                        else {
                            absorb::<Self::Output, E>(
                                checked::$checked(self.get(), rhs),
                                $wrapping::$wrapping_method(&self.get(), &rhs),
                            )
                        }
                    }
                }

                impl<P, E, const RHS_MIN: i128, const RHS_MAX: i128>
                    $trait<Gamut<$t, RHS_MIN, RHS_MAX, P, E>> for $t
                where
                    P: Promotion,
                    E: Divergence,
                {
                    type Output = $output<P, Gamut<$t, RHS_MIN, RHS_MAX, P, E>, $t>;

                    fn $method(self, rhs: Gamut<$t, RHS_MIN, RHS_MAX, P, E>) -> Self::Output {
                        let proven = const {
                            proves(
                                Interval::machine::<$t>().$analyze(Interval::new(RHS_MIN, RHS_MAX)),
                                target::<Self::Output>(),
                            )
                        };
                        if proven {
                            <Self::Output as BoundedInteger>::from_base_unchecked(
                                <$t as Primitive>::from_wide(wide::$method(
                                    self.to_wide(),
                                    rhs.get().to_wide(),
                                )),
                            )
                        }
                        else {
                            absorb::<Self::Output, E>(
                                checked::$checked(self, rhs.get()),
                                $wrapping::$wrapping_method(&self, &rhs.get()),
                            )
                        }
                    }
                }
            };
        }
        with_primitives!(impl_primitive_binary_operation_for_gamut);
    };
}

// Exact operations in the wide domain for the proven path. The interval proof brackets every
// result within a supported machine range, so none of these can leave `i128`.
mod wide {
    pub const fn add(lhs: i128, rhs: i128) -> i128 {
        lhs + rhs
    }

    pub const fn sub(lhs: i128, rhs: i128) -> i128 {
        lhs - rhs
    }

    pub const fn mul(lhs: i128, rhs: i128) -> i128 {
        lhs * rhs
    }

    pub const fn div(lhs: i128, rhs: i128) -> i128 {
        lhs / rhs
    }

    pub const fn rem(lhs: i128, rhs: i128) -> i128 {
        lhs % rhs
    }

    pub const fn shl(lhs: i128, rhs: i128) -> i128 {
        lhs << rhs
    }

    pub const fn shr(lhs: i128, rhs: i128) -> i128 {
        lhs >> rhs
    }
}

impl_binary_operation_for_gamut!(
    operation => Add::add,
    SumOf,
    checked_add,
    add,
    WrappingAdd::wrapping_add,
);
impl_binary_operation_for_gamut!(
    operation => Sub::sub,
    DifferenceOf,
    checked_sub,
    subtract,
    WrappingSub::wrapping_sub,
);
impl_binary_operation_for_gamut!(
    operation => Mul::mul,
    ProductOf,
    checked_mul,
    multiply,
    WrappingMul::wrapping_mul,
);

// Division and modulus dispatch through the promotion's hooks rather than the checked
// primitives directly, and their returning-divergence fallback is zero on a zero divisor.
macro_rules! impl_division_operation_for_gamut {
    (
        operation => $trait:ident :: $method:ident,
        $output:ident,
        $analyze:ident,
        $hook:ident,
        $fallback:ident $(,)?
    ) => {
        impl<T, P, E, const LHS_MIN: i128, const LHS_MAX: i128, const RHS_MIN: i128, const RHS_MAX: i128>
            $trait<Gamut<T, RHS_MIN, RHS_MAX, P, E>> for Gamut<T, LHS_MIN, LHS_MAX, P, E>
        where
            T: Primitive,
            P: Promotion,
            E: Divergence,
        {
            type Output = $output<P, Gamut<T, LHS_MIN, LHS_MAX, P, E>, Gamut<T, RHS_MIN, RHS_MAX, P, E>>;

            fn $method(self, rhs: Gamut<T, RHS_MIN, RHS_MAX, P, E>) -> Self::Output {
                let proven = const {
                    proves(
                        Interval::new(LHS_MIN, LHS_MAX).$analyze(Interval::new(RHS_MIN, RHS_MAX)),
                        target::<Self::Output>(),
                    )
                };
                if proven {
                    <Self::Output as BoundedInteger>::from_base_unchecked(T::from_wide(
                        wide::$method(self.get().to_wide(), rhs.get().to_wide()),
                    ))
                }
                else {
                    absorb::<Self::Output, E>(
                        P::$hook(self.get(), rhs.get()),
                        $fallback(self.get(), rhs.get()),
                    )
                }
            }
        }

        macro_rules! impl_primitive_division_operation_for_gamut {
            (primitive => $t:ty) => {
                impl<P, E, const LHS_MIN: i128, const LHS_MAX: i128> $trait<$t>
                    for Gamut<$t, LHS_MIN, LHS_MAX, P, E>
                where
                    P: Promotion,
                    E: Divergence,
                {
                    type Output = $output<P, Gamut<$t, LHS_MIN, LHS_MAX, P, E>, $t>;

                    fn $method(self, rhs: $t) -> Self::Output {
                        let proven = const {
                            proves(
                                Interval::new(LHS_MIN, LHS_MAX).$analyze(Interval::machine::<$t>()),
                                target::<Self::Output>(),
                            )
                        };
                        if proven {
                            <Self::Output as BoundedInteger>::from_base_unchecked(
                                <$t as Primitive>::from_wide(wide::$method(
                                    self.get().to_wide(),
                                    rhs.to_wide(),
                                )),
                            )
                        }
                        else {
                            absorb::<Self::Output, E>(
                                P::$hook(self.get(), rhs),
                                $fallback(self.get(), rhs),
                            )
                        }
                    }
                }

                impl<P, E, const RHS_MIN: i128, const RHS_MAX: i128>
                    $trait<Gamut<$t, RHS_MIN, RHS_MAX, P, E>> for $t
                where
                    P: Promotion,
                    E: Divergence,
                {
                    type Output = $output<P, Gamut<$t, RHS_MIN, RHS_MAX, P, E>, $t>;

                    fn $method(self, rhs: Gamut<$t, RHS_MIN, RHS_MAX, P, E>) -> Self::Output {
                        let proven = const {
                            proves(
                                Interval::machine::<$t>().$analyze(Interval::new(RHS_MIN, RHS_MAX)),
                                target::<Self::Output>(),
                            )
                        };
                        if proven {
                            <Self::Output as BoundedInteger>::from_base_unchecked(
                                <$t as Primitive>::from_wide(wide::$method(
                                    self.to_wide(),
                                    rhs.get().to_wide(),
                                )),
                            )
                        }
                        else {
                            absorb::<Self::Output, E>(
                                P::$hook(self, rhs.get()),
                                $fallback(self, rhs.get()),
                            )
                        }
                    }
                }
            };
        }
        with_primitives!(impl_primitive_division_operation_for_gamut);
    };
}

impl_division_operation_for_gamut!(
    operation => Div::div,
    QuotientOf,
    checked_div,
    divide,
    wrapping_quotient,
);
impl_division_operation_for_gamut!(
    operation => Rem::rem,
    RemainderOf,
    checked_rem,
    modulus,
    wrapping_remainder,
);

// Shift operators. The amount operand is independent of the shifted domain, so a bounded
// amount may have any base type; primitive amounts are expanded per type.
macro_rules! impl_shift_operation_for_gamut {
    (
        operation => $trait:ident :: $method:ident,
        $output:ident,
        $analyze:ident,
        $checked:ident,
        $wrapping:ident :: $wrapping_method:ident,
        $wide:ident $(,)?
    ) => {
        impl<T, U, P, E, const LHS_MIN: i128, const LHS_MAX: i128, const RHS_MIN: i128, const RHS_MAX: i128>
            $trait<Gamut<U, RHS_MIN, RHS_MAX, P, E>> for Gamut<T, LHS_MIN, LHS_MAX, P, E>
        where
            T: Primitive,
            U: Primitive,
            P: Promotion,
            E: Divergence,
        {
            type Output = $output<P, Gamut<T, LHS_MIN, LHS_MAX, P, E>, Gamut<U, RHS_MIN, RHS_MAX, P, E>>;

            fn $method(self, rhs: Gamut<U, RHS_MIN, RHS_MAX, P, E>) -> Self::Output {
                let proven = const {
                    proves(
                        Interval::new(LHS_MIN, LHS_MAX)
                            .$analyze(Interval::new(RHS_MIN, RHS_MAX), T::BITS),
                        target::<Self::Output>(),
                    )
                };
                if proven {
                    <Self::Output as BoundedInteger>::from_base_unchecked(T::from_wide(
                        wide::$wide(self.get().to_wide(), rhs.get().to_wide()),
                    ))
                }
                else {
                    absorb::<Self::Output, E>(
                        checked::$checked(self.get(), rhs.get()),
                        $wrapping::$wrapping_method(
                            &self.get(),
                            rhs.get().to_wide() as u32,
                        ),
                    )
                }
            }
        }

        macro_rules! impl_primitive_shift_operation_for_gamut {
            (primitive => $u:ty) => {
                impl<T, P, E, const LHS_MIN: i128, const LHS_MAX: i128> $trait<$u>
                    for Gamut<T, LHS_MIN, LHS_MAX, P, E>
                where
                    T: Primitive,
                    P: Promotion,
                    E: Divergence,
                {
                    type Output = $output<P, Gamut<T, LHS_MIN, LHS_MAX, P, E>, $u>;

                    fn $method(self, rhs: $u) -> Self::Output {
                        let proven = const {
                            proves(
                                Interval::new(LHS_MIN, LHS_MAX)
                                    .$analyze(Interval::machine::<$u>(), T::BITS),
                                target::<Self::Output>(),
                            )
                        };
                        if proven {
                            <Self::Output as BoundedInteger>::from_base_unchecked(T::from_wide(
                                wide::$wide(self.get().to_wide(), rhs.to_wide()),
                            ))
                        }
                        else {
                            absorb::<Self::Output, E>(
                                checked::$checked(self.get(), rhs),
                                $wrapping::$wrapping_method(&self.get(), rhs.to_wide() as u32),
                            )
                        }
                    }
                }
            };
        }
        with_primitives!(impl_primitive_shift_operation_for_gamut);
    };
}

impl_shift_operation_for_gamut!(
    operation => Shl::shl,
    LeftShiftOf,
    checked_shl,
    left_shift,
    WrappingShl::wrapping_shl,
    shl,
);
impl_shift_operation_for_gamut!(
    operation => Shr::shr,
    RightShiftOf,
    checked_shr,
    right_shift,
    WrappingShr::wrapping_shr,
    shr,
);

// Bitwise operators. Restricted to unsigned operands of one base type; the `Unsigned` bound is
// the static rejection of signed bitwise arithmetic.
macro_rules! impl_bitwise_operation_for_gamut {
    (
        operation => $trait:ident :: $method:ident,
        $output:ident,
        $analyze:ident,
        $checked:ident $(,)?
    ) => {
        impl<T, P, E, const LHS_MIN: i128, const LHS_MAX: i128, const RHS_MIN: i128, const RHS_MAX: i128>
            $trait<Gamut<T, RHS_MIN, RHS_MAX, P, E>> for Gamut<T, LHS_MIN, LHS_MAX, P, E>
        where
            T: Primitive + Unsigned,
            P: Promotion,
            E: Divergence,
        {
            type Output = $output<P, Gamut<T, LHS_MIN, LHS_MAX, P, E>, Gamut<T, RHS_MIN, RHS_MAX, P, E>>;

            fn $method(self, rhs: Gamut<T, RHS_MIN, RHS_MAX, P, E>) -> Self::Output {
                let proven = const {
                    proves(
                        Interval::new(LHS_MIN, LHS_MAX).$analyze(Interval::new(RHS_MIN, RHS_MAX)),
                        target::<Self::Output>(),
                    )
                };
                let result = checked::$checked(self.get(), rhs.get());
                if proven {
                    <Self::Output as BoundedInteger>::from_base_unchecked(result.unwrap())
                }
                else {
                    let raw = $trait::$method(self.get(), rhs.get());
                    absorb::<Self::Output, E>(result, raw)
                }
            }
        }

        macro_rules! impl_primitive_bitwise_operation_for_gamut {
            (primitive => $t:ty) => {
                impl<P, E, const LHS_MIN: i128, const LHS_MAX: i128> $trait<$t>
                    for Gamut<$t, LHS_MIN, LHS_MAX, P, E>
                where
                    P: Promotion,
                    E: Divergence,
                {
                    type Output = $output<P, Gamut<$t, LHS_MIN, LHS_MAX, P, E>, $t>;

                    fn $method(self, rhs: $t) -> Self::Output {
                        let proven = const {
                            proves(
                                Interval::new(LHS_MIN, LHS_MAX).$analyze(Interval::machine::<$t>()),
                                target::<Self::Output>(),
                            )
                        };
                        let result = checked::$checked(self.get(), rhs);
                        if proven {
                            <Self::Output as BoundedInteger>::from_base_unchecked(result.unwrap())
                        }
                        else {
                            let raw = $trait::$method(self.get(), rhs);
                            absorb::<Self::Output, E>(result, raw)
                        }
                    }
                }

                impl<P, E, const RHS_MIN: i128, const RHS_MAX: i128>
                    $trait<Gamut<$t, RHS_MIN, RHS_MAX, P, E>> for $t
                where
                    P: Promotion,
                    E: Divergence,
                {
                    type Output = $output<P, Gamut<$t, RHS_MIN, RHS_MAX, P, E>, $t>;

                    fn $method(self, rhs: Gamut<$t, RHS_MIN, RHS_MAX, P, E>) -> Self::Output {
                        let proven = const {
                            proves(
                                Interval::machine::<$t>().$analyze(Interval::new(RHS_MIN, RHS_MAX)),
                                target::<Self::Output>(),
                            )
                        };
                        let result = checked::$checked(self, rhs.get());
                        if proven {
                            <Self::Output as BoundedInteger>::from_base_unchecked(result.unwrap())
                        }
                        else {
                            let raw = $trait::$method(self, rhs.get());
                            absorb::<Self::Output, E>(result, raw)
                        }
                    }
                }
            };
        }
        with_unsigned_primitives!(impl_primitive_bitwise_operation_for_gamut);
    };
}

impl_bitwise_operation_for_gamut!(
    operation => BitOr::bitor,
    BitOrOf,
    bit_or,
    bitwise_or,
);
impl_bitwise_operation_for_gamut!(
    operation => BitAnd::bitand,
    BitAndOf,
    bit_and,
    bitwise_and,
);
impl_bitwise_operation_for_gamut!(
    operation => BitXor::bitxor,
    BitXorOf,
    bit_xor,
    bitwise_xor,
);

impl<T, P, E, const MIN: i128, const MAX: i128> Neg for Gamut<T, MIN, MAX, P, E>
where
    T: Primitive,
    P: Promotion,
    E: Divergence,
{
    type Output = NegationOf<P, Gamut<T, MIN, MAX, P, E>>;

    fn neg(self) -> Self::Output {
        let proven = const {
            proves(
                Interval::new(MIN, MAX).checked_neg(),
                target::<Self::Output>(),
            )
        };
        if proven {
            <Self::Output as BoundedInteger>::from_base_unchecked(T::from_wide(
                -self.get().to_wide(),
            ))
        }
        else {
            absorb::<Self::Output, E>(
                checked::negate(self.get()),
                WrappingNeg::wrapping_neg(&self.get()),
            )
        }
    }
}

// Compound assignment is available whenever the binary operator outputs `Self`, which holds
// under the `Native` promotion.
macro_rules! impl_compound_assignment_for_gamut {
    (operation => $trait:ident :: $method:ident, $binary:ident :: $binary_method:ident) => {
        impl<T, R, P, E, const MIN: i128, const MAX: i128> $trait<R> for Gamut<T, MIN, MAX, P, E>
        where
            T: Primitive,
            Self: $binary<R, Output = Self>,
        {
            fn $method(&mut self, rhs: R) {
                *self = $binary::$binary_method(*self, rhs);
            }
        }
    };
}
impl_compound_assignment_for_gamut!(operation => AddAssign::add_assign, Add::add);
impl_compound_assignment_for_gamut!(operation => SubAssign::sub_assign, Sub::sub);
impl_compound_assignment_for_gamut!(operation => MulAssign::mul_assign, Mul::mul);
impl_compound_assignment_for_gamut!(operation => DivAssign::div_assign, Div::div);
impl_compound_assignment_for_gamut!(operation => RemAssign::rem_assign, Rem::rem);
impl_compound_assignment_for_gamut!(operation => ShlAssign::shl_assign, Shl::shl);
impl_compound_assignment_for_gamut!(operation => ShrAssign::shr_assign, Shr::shr);
impl_compound_assignment_for_gamut!(operation => BitOrAssign::bitor_assign, BitOr::bitor);
impl_compound_assignment_for_gamut!(operation => BitAndAssign::bitand_assign, BitAnd::bitand);
impl_compound_assignment_for_gamut!(operation => BitXorAssign::bitxor_assign, BitXor::bitxor);

impl<T, U, P1, E1, P2, E2, const LHS_MIN: i128, const LHS_MAX: i128, const RHS_MIN: i128, const RHS_MAX: i128>
    PartialEq<Gamut<U, RHS_MIN, RHS_MAX, P2, E2>> for Gamut<T, LHS_MIN, LHS_MAX, P1, E1>
where
    T: Primitive,
    U: Primitive,
{
    fn eq(&self, other: &Gamut<U, RHS_MIN, RHS_MAX, P2, E2>) -> bool {
        let disjoint = const {
            Interval::new(LHS_MIN, LHS_MAX).disjoint(Interval::new(RHS_MIN, RHS_MAX))
        };
        if disjoint {
            false
        }
        else {
            cmp::equal(self.get(), other.get())
        }
    }
}

impl<T, P, E, const MIN: i128, const MAX: i128> Eq for Gamut<T, MIN, MAX, P, E> where T: Primitive {}

impl<T, U, P1, E1, P2, E2, const LHS_MIN: i128, const LHS_MAX: i128, const RHS_MIN: i128, const RHS_MAX: i128>
    PartialOrd<Gamut<U, RHS_MIN, RHS_MAX, P2, E2>> for Gamut<T, LHS_MIN, LHS_MAX, P1, E1>
where
    T: Primitive,
    U: Primitive,
{
    fn partial_cmp(&self, other: &Gamut<U, RHS_MIN, RHS_MAX, P2, E2>) -> Option<Ordering> {
        match const {
            separation(
                Interval::new(LHS_MIN, LHS_MAX),
                Interval::new(RHS_MIN, RHS_MAX),
            )
        } {
            Some(ordering) => Some(ordering),
            None => Some(cmp::ordering(self.get(), other.get())),
        }
    }
}

impl<T, P, E, const MIN: i128, const MAX: i128> Ord for Gamut<T, MIN, MAX, P, E>
where
    T: Primitive,
{
    fn cmp(&self, other: &Self) -> Ordering {
        cmp::ordering(self.get(), other.get())
    }
}

macro_rules! impl_primitive_comparison_for_gamut {
    (primitive => $t:ty) => {
        impl<T, P, E, const MIN: i128, const MAX: i128> PartialEq<$t> for Gamut<T, MIN, MAX, P, E>
        where
            T: Primitive,
        {
            fn eq(&self, other: &$t) -> bool {
                let disjoint = const {
                    Interval::new(MIN, MAX).disjoint(Interval::machine::<$t>())
                };
                if disjoint {
                    false
                }
                else {
                    cmp::equal(self.get(), *other)
                }
            }
        }

        impl<T, P, E, const MIN: i128, const MAX: i128> PartialEq<Gamut<T, MIN, MAX, P, E>> for $t
        where
            T: Primitive,
        {
            fn eq(&self, other: &Gamut<T, MIN, MAX, P, E>) -> bool {
                let disjoint = const {
                    Interval::machine::<$t>().disjoint(Interval::new(MIN, MAX))
                };
                if disjoint {
                    false
                }
                else {
                    cmp::equal(*self, other.get())
                }
            }
        }

        impl<T, P, E, const MIN: i128, const MAX: i128> PartialOrd<$t> for Gamut<T, MIN, MAX, P, E>
        where
            T: Primitive,
        {
            fn partial_cmp(&self, other: &$t) -> Option<Ordering> {
                match const {
                    separation(Interval::new(MIN, MAX), Interval::machine::<$t>())
                } {
                    Some(ordering) => Some(ordering),
                    None => Some(cmp::ordering(self.get(), *other)),
                }
            }
        }

        impl<T, P, E, const MIN: i128, const MAX: i128> PartialOrd<Gamut<T, MIN, MAX, P, E>> for $t
        where
            T: Primitive,
        {
            fn partial_cmp(&self, other: &Gamut<T, MIN, MAX, P, E>) -> Option<Ordering> {
                match const {
                    separation(Interval::machine::<$t>(), Interval::new(MIN, MAX))
                } {
                    Some(ordering) => Some(ordering),
                    None => Some(cmp::ordering(*self, other.get())),
                }
            }
        }
    };
}
with_primitives!(impl_primitive_comparison_for_gamut);

#[cfg(test)]
mod tests {
    use crate::divergence::{OrFlag, OrWrap};
    use crate::gamut::Gamut;
    use crate::promotion::Native;

    type Percent = Gamut<u8, 0, 100>;
    type Byte = Gamut<u8, 0, 255>;
    type Signed = Gamut<i8, -128, 127>;

    #[test]
    fn exact_arithmetic_matches_the_native_result() {
        type Word = Gamut<i32, -1000, 1000>;
        assert_eq!((Word::new(300) + Word::new(-500)).get(), -200);
        assert_eq!((Word::new(300) - Word::new(500)).get(), -200);
        assert_eq!((Word::new(30) * Word::new(-30)).get(), -900);
        assert_eq!((Word::new(-7) / Word::new(2)).get(), -3);
        assert_eq!((Word::new(-7) % Word::new(2)).get(), -1);
    }

    #[test]
    #[should_panic(expected = "above the maximum")]
    fn sum_above_the_declared_range_faults() {
        // The result type of `Native` promotion is the left operand's type, so 110 overflows
        // it even though the sum fits `u8`.
        let _ = Percent::new(50) + Percent::new(60);
    }

    #[test]
    fn sum_above_the_declared_range_wraps_under_a_returning_divergence() {
        type Loose = Gamut<u8, 0, 100, Native, OrWrap>;
        let sum = Loose::new(50) + Loose::new(60);
        assert_eq!(sum.get(), 110); // The computed value is delivered unchanged.
    }

    #[test]
    fn machine_overflow_wraps_under_a_returning_divergence() {
        type Loose = Gamut<u8, 0, 255, Native, OrWrap>;
        assert_eq!((Loose::new(200) + Loose::new(100)).get(), 44);
        assert_eq!((Loose::new(0) - Loose::new(1)).get(), 255);
        assert_eq!((Loose::new(16) * Loose::new(16)).get(), 0);
    }

    #[test]
    #[should_panic(expected = "difference is too small")]
    fn difference_below_the_machine_range_faults() {
        let _ = Signed::new(-100) - Signed::new(50);
    }

    #[test]
    #[should_panic(expected = "quotient is too large")]
    fn dividing_the_minimum_by_negative_one_faults() {
        let _ = Signed::new(-128) / Gamut::<i8, -1, 1>::new(-1);
    }

    #[test]
    fn division_with_a_zero_admitting_divisor_checks_at_runtime() {
        let quotient = Gamut::<i8, 1, 10>::new(7) / Gamut::<i8, -3, 3>::new(2);
        assert_eq!(quotient.get(), 3);
    }

    #[test]
    #[should_panic(expected = "division by zero")]
    fn division_by_a_runtime_zero_faults() {
        let _ = Gamut::<i8, 1, 10>::new(7) / Gamut::<i8, -3, 3>::new(0);
    }

    #[test]
    fn division_with_a_zero_free_divisor_is_proven() {
        // [0, 100] / [1, 10] stays within [0, 100]: no runtime check is reachable.
        let quotient = Percent::new(99) / Gamut::<u8, 1, 10>::new(3);
        assert_eq!(quotient.get(), 33);
    }

    #[test]
    fn remainder_is_proven_by_its_envelope() {
        let remainder = Percent::new(7) % Gamut::<u8, 3, 5>::new(4);
        assert_eq!(remainder.get(), 3);
    }

    #[test]
    #[should_panic(expected = "modulus by zero")]
    fn remainder_by_a_runtime_zero_faults() {
        let _ = Percent::new(7) % Gamut::<u8, 0, 5>::new(0);
    }

    #[test]
    #[should_panic(expected = "left shift result is too large")]
    fn left_shift_that_escapes_the_range_faults() {
        let _ = Byte::new(200) << Gamut::<u8, 0, 31>::new(3);
    }

    #[test]
    fn shifts_within_the_range_succeed() {
        assert_eq!((Byte::new(0x0F) << Gamut::<u8, 0, 4>::new(4)).get(), 0xF0);
        assert_eq!((Byte::new(0xF0) >> 4u8).get(), 0x0F);
        assert_eq!((Byte::new(1) << 7u8).get(), 0x80);
    }

    #[test]
    #[should_panic(expected = "shift amount is not less than the width")]
    fn shifting_by_the_width_faults() {
        let _ = Byte::new(1) << 8u8;
    }

    #[test]
    #[should_panic(expected = "shift amount is negative")]
    fn shifting_by_a_negative_amount_faults() {
        let _ = Byte::new(1) << -1i8;
    }

    #[test]
    #[should_panic(expected = "left shift of a negative value")]
    fn shifting_a_negative_value_faults() {
        let _ = Signed::new(-1) << 1u8;
    }

    #[test]
    fn bitwise_operators_compose_unsigned_ranges() {
        // The OR envelope of [0, 255] is [0, 255]: the check is elided.
        let or = Byte::new(0x0F) | Byte::new(0xF0);
        assert_eq!(or.get(), 0xFF);
        assert_eq!((Byte::new(0x3C) & Byte::new(0x0F)).get(), 0x0C);
        assert_eq!((Byte::new(0xFF) ^ Byte::new(0x0F)).get(), 0xF0);
        assert_eq!((Byte::new(0x0F) | 0xF0u8).get(), 0xFF);
        assert_eq!((0xF0u8 & Byte::new(0x1F)).get(), 0x10);
    }

    #[test]
    #[should_panic(expected = "above the maximum")]
    fn bitwise_or_that_escapes_the_declared_range_faults() {
        let _ = Percent::new(96) | Percent::new(5);
    }

    #[test]
    fn negation_within_a_symmetric_range_is_proven() {
        type Balanced = Gamut<i8, -10, 10>;
        assert_eq!((-Balanced::new(7)).get(), -7);
        assert_eq!((-Balanced::new(-10)).get(), 10);
    }

    #[test]
    #[should_panic(expected = "negation result is too large")]
    fn negating_the_machine_minimum_faults() {
        let _ = -Signed::new(-128);
    }

    #[test]
    fn compound_assignment_reuses_the_binary_operators() {
        let mut percent = Percent::new(10);
        percent += Percent::new(5);
        percent *= Percent::new(3);
        percent -= Percent::new(20);
        percent /= Percent::new(5);
        assert_eq!(percent.get(), 5);

        let mut byte = Byte::new(0x0F);
        byte <<= 4u8;
        byte |= Byte::new(0x0C);
        assert_eq!(byte.get(), 0xFC);
    }

    #[test]
    fn mixed_primitive_operands_compose_in_both_directions() {
        assert_eq!((Percent::new(30) + 12u8).get(), 42);
        assert_eq!((12u8 + Percent::new(30)).get(), 42);
        // The result type of a primitive dividend is the divisor's type.
        assert_eq!((99u8 / Gamut::<u8, 1, 100>::new(3)).get(), 33);
    }

    #[test]
    #[should_panic(expected = "above the maximum")]
    fn primitive_operands_still_overflow_the_declared_range() {
        let _ = 60u8 + Percent::new(50);
    }

    #[test]
    fn flagging_divergence_observes_operator_faults() {
        type Flagged = Gamut<u8, 0, 100, Native, OrFlag>;
        OrFlag::clear();
        let sum = Flagged::new(50) + Flagged::new(60);
        assert!(OrFlag::is_set());
        assert_eq!(sum.get(), 110);
        OrFlag::clear();
    }

    #[test]
    fn statically_separated_ranges_compare_without_a_runtime_check() {
        let small = Gamut::<u8, 0, 10>::new(5);
        let large = Gamut::<u8, 100, 200>::new(150);
        assert!(small < large);
        assert!(large > small);
        assert!(small != large);
        assert!(!(small >= large));
    }

    #[test]
    fn overlapping_ranges_compare_their_values() {
        let lhs = Percent::new(50);
        let rhs = Gamut::<u8, 0, 200>::new(50);
        assert!(lhs == rhs);
        assert!(lhs <= rhs);
        assert!(Percent::new(49) < rhs);
    }

    #[test]
    fn cross_sign_comparison_is_mathematical() {
        let negative = Signed::new(-1);
        let huge = Gamut::<u32, 0, 4_000_000_000>::new(4_000_000_000);
        assert!(negative < huge);
        assert!(huge > negative);
        assert!(negative != huge);
        assert!(Signed::new(42) == Gamut::<u64, 0, 100>::new(42));
    }

    #[test]
    fn comparison_against_primitives_uses_the_same_rules() {
        assert!(Percent::new(50) == 50u8);
        assert!(50u8 == Percent::new(50));
        assert!(Percent::new(50) < 51i64);
        assert!(-1i8 < Percent::new(0));
        // [200, 255] is strictly separated from the whole of `i8`.
        assert!(Gamut::<u8, 200, 255>::new(210) > 100i8);
    }

    #[test]
    fn ordering_is_total_within_one_type() {
        let mut values = [Percent::new(50), Percent::new(3), Percent::new(97)];
        values.sort();
        assert_eq!(values[0].get(), 3);
        assert_eq!(values[2].get(), 97);
    }
}
