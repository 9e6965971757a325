//! Result-type selection for bounded integer operators.
//!
//! A [promotion][`Promotion`] determines, per operator, the bounded type of the result from the
//! types of the operands. The [operator dispatcher][`ops`] consults the promotion of the
//! composed operands, analyses the operand intervals against the declared range of the selected
//! result type, and elides the runtime check when no fault is reachable.
//!
//! Promotion is a static parameter of [`Gamut`] types: operands of an operation must agree on
//! it, a bare primitive operand contributes no promotion, and conflicting promotions are
//! rejected at compile time because no operator implementation exists for them.
//!
//! The [`Native`] promotion keeps the declared range of the representative bounded operand,
//! which mirrors how native integer expressions keep the type of their operands. A promotion
//! may also interpose on the division operators themselves, for example to widen before the
//! check; the default hooks are the [checked primitives][`checked`].
//!
//! [`checked`]: crate::checked
//! [`Gamut`]: crate::gamut::Gamut
//! [`ops`]: crate::ops
//! [`Promotion`]: crate::promotion::Promotion

use crate::checked::{self, Checked};
use crate::gamut::BoundedInteger;
use crate::primitive::Primitive;

/// Determines the result types of bounded integer operators.
///
/// Each associated type selects the result of one operator. `S` is the representative bounded
/// operand (the left one when both are bounded) and `T` is the other operand, which may be a
/// bounded type or a bare primitive. The selected type must wrap the same base type as the
/// representative; its declared range is the target of the dispatcher's static analysis, and
/// results that escape it fault.
pub trait Promotion {
    type Sum<S, T>: BoundedInteger<Base = S::Base>
    where
        S: BoundedInteger;

    type Difference<S, T>: BoundedInteger<Base = S::Base>
    where
        S: BoundedInteger;

    type Product<S, T>: BoundedInteger<Base = S::Base>
    where
        S: BoundedInteger;

    type Quotient<S, T>: BoundedInteger<Base = S::Base>
    where
        S: BoundedInteger;

    type Remainder<S, T>: BoundedInteger<Base = S::Base>
    where
        S: BoundedInteger;

    type LeftShift<S, T>: BoundedInteger<Base = S::Base>
    where
        S: BoundedInteger;

    type RightShift<S, T>: BoundedInteger<Base = S::Base>
    where
        S: BoundedInteger;

    type BitOr<S, T>: BoundedInteger<Base = S::Base>
    where
        S: BoundedInteger;

    type BitAnd<S, T>: BoundedInteger<Base = S::Base>
    where
        S: BoundedInteger;

    type BitXor<S, T>: BoundedInteger<Base = S::Base>
    where
        S: BoundedInteger;

    type Negation<S>: BoundedInteger<Base = S::Base>
    where
        S: BoundedInteger;

    /// Divides on the checked path.
    ///
    /// A promotion may interpose widening here before delegating to the checked primitive.
    fn divide<T>(dividend: T, divisor: T) -> Checked<T>
    where
        T: Primitive,
    {
        checked::divide(dividend, divisor)
    }

    /// Takes the remainder on the checked path. See [`divide`].
    ///
    /// [`divide`]: crate::promotion::Promotion::divide
    fn modulus<T>(dividend: T, divisor: T) -> Checked<T>
    where
        T: Primitive,
    {
        checked::modulus(dividend, divisor)
    }
}

pub type SumOf<P, S, T> = <P as Promotion>::Sum<S, T>;
pub type DifferenceOf<P, S, T> = <P as Promotion>::Difference<S, T>;
pub type ProductOf<P, S, T> = <P as Promotion>::Product<S, T>;
pub type QuotientOf<P, S, T> = <P as Promotion>::Quotient<S, T>;
pub type RemainderOf<P, S, T> = <P as Promotion>::Remainder<S, T>;
pub type LeftShiftOf<P, S, T> = <P as Promotion>::LeftShift<S, T>;
pub type RightShiftOf<P, S, T> = <P as Promotion>::RightShift<S, T>;
pub type BitOrOf<P, S, T> = <P as Promotion>::BitOr<S, T>;
pub type BitAndOf<P, S, T> = <P as Promotion>::BitAnd<S, T>;
pub type BitXorOf<P, S, T> = <P as Promotion>::BitXor<S, T>;
pub type NegationOf<P, S> = <P as Promotion>::Negation<S>;

/// Promotion that keeps the type of the representative bounded operand.
///
/// Under `Native`, `Gamut<u8, 0, 100> + Gamut<u8, 0, 100>` has the type `Gamut<u8, 0, 100>`,
/// and a sum above `100` is a positive overflow of the result type even though it fits `u8`.
#[derive(Debug)]
pub enum Native {}

impl Promotion for Native {
    type Sum<S, T> = S
    where
        S: BoundedInteger;

    type Difference<S, T> = S
    where
        S: BoundedInteger;

    type Product<S, T> = S
    where
        S: BoundedInteger;

    type Quotient<S, T> = S
    where
        S: BoundedInteger;

    type Remainder<S, T> = S
    where
        S: BoundedInteger;

    type LeftShift<S, T> = S
    where
        S: BoundedInteger;

    type RightShift<S, T> = S
    where
        S: BoundedInteger;

    type BitOr<S, T> = S
    where
        S: BoundedInteger;

    type BitAnd<S, T> = S
    where
        S: BoundedInteger;

    type BitXor<S, T> = S
    where
        S: BoundedInteger;

    type Negation<S> = S
    where
        S: BoundedInteger;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fault::FaultKind;
    use crate::gamut::Gamut;

    type Percent = Gamut<u8, 0, 100>;

    #[test]
    fn native_promotion_keeps_the_representative_type() {
        fn select<P, S, T>(value: S::Base) -> P::Sum<S, T>
        where
            P: Promotion,
            S: BoundedInteger,
        {
            <P::Sum<S, T> as BoundedInteger>::from_base_unchecked(value)
        }

        let sum: Percent = select::<Native, Percent, Percent>(50);
        assert_eq!(sum.get(), 50);
    }

    #[test]
    fn default_hooks_are_the_checked_primitives() {
        assert_eq!(<Native as Promotion>::divide(7i8, 2).value(), Some(3));
        assert_eq!(
            <Native as Promotion>::divide(1i8, 0)
                .fault()
                .map(|fault| fault.kind()),
            Some(FaultKind::DivideByZero),
        );
        assert_eq!(<Native as Promotion>::modulus(7i8, 2).value(), Some(1));
    }
}
