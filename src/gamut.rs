//! Bounded integer types with statically declared ranges and configurable fault behavior.
//!
//! [`Gamut`] types wrap a primitive machine integer and restrict it to a declared closed range.
//! The range, the [promotion][`promotion`], and the [divergence][`divergence`] are static
//! parameters, so the set of admitted values is part of the type and the [operator
//! dispatcher][`ops`] can prove many operations fault-free at compile time. A `Gamut` value in
//! an externally observable state always satisfies `MIN <= value <= MAX` under a strict
//! divergence.
//!
//! # Examples
//!
//! ```rust
//! use gamut::Gamut;
//!
//! type Percent = Gamut<u8, 0, 100>;
//!
//! let quarter = Percent::new(25);
//! let half = Percent::new(50);
//! assert_eq!((quarter + half).get(), 75);
//! ```
//!
//! Constructing a value outside the declared range diverges:
//!
//! ```rust,should_panic
//! use gamut::Gamut;
//!
//! type Percent = Gamut<u8, 0, 100>;
//!
//! let x = Percent::new(101); // Panics per the default `OrPanic` divergence.
//! ```
//!
//! [`divergence`]: crate::divergence
//! [`ops`]: crate::ops
//! [`promotion`]: crate::promotion

use core::fmt::{self, Debug, Formatter};
use core::hash::{Hash, Hasher};
use core::marker::PhantomData;
use core::str::FromStr;
use num_traits::Num;
#[cfg(feature = "serde")]
use serde_derive::{Deserialize, Serialize};

use crate::checked::{self, Checked};
use crate::divergence::{Divergence, OrPanic};
use crate::fault::{Fault, FaultKind};
use crate::interval::Interval;
use crate::primitive::{with_primitives, Primitive};
use crate::promotion::{Native, Promotion};
use crate::sealed::Sealed;

/// A bounded integer type: the `is-safe` predicate and base extractor of the crate.
///
/// This trait is implemented by every [`Gamut`] instantiation and by nothing else. Operator
/// implementations and [promotions][`Promotion`] are generic over it; a bare primitive is not a
/// bounded integer, which is what keeps the redefined operators away from purely native operand
/// pairs.
///
/// [`Gamut`]: crate::gamut::Gamut
/// [`Promotion`]: crate::promotion::Promotion
pub trait BoundedInteger: Copy + Sealed {
    /// The primitive type that stores the value.
    type Base: Primitive;
    type Promotion: Promotion;
    type Divergence: Divergence;

    /// The declared minimum in the wide domain.
    const MIN_WIDE: i128;
    /// The declared maximum in the wide domain.
    const MAX_WIDE: i128;

    /// Extracts the stored base value.
    fn base(self) -> Self::Base;

    /// Wraps a base value without validation.
    ///
    /// The caller must ensure the value lies within the declared range, typically by having
    /// proved it with the [interval algebra][`interval`].
    ///
    /// [`interval`]: crate::interval
    fn from_base_unchecked(base: Self::Base) -> Self;
}

/// A primitive machine integer restricted to the closed range `[MIN, MAX]`.
///
/// The bounds are expressed in the wide domain (`i128`) so that one type constructor serves
/// every base type; a `Gamut` type whose bounds do not fit its base type does not compile. `P`
/// is the [promotion][`Promotion`] and `E` the [divergence][`Divergence`] used by operators on
/// the type.
///
/// Values are constructed by validation ([`new`], [`try_new`], [`TryFrom`], [`FromStr`]), by
/// conversion from another `Gamut` ([`from_bounded`]), or by the operators themselves. There is
/// no default value: a `Gamut` always carries a validated payload.
///
/// [`Divergence`]: crate::divergence::Divergence
/// [`from_bounded`]: crate::gamut::Gamut::from_bounded
/// [`new`]: crate::gamut::Gamut::new
/// [`Promotion`]: crate::promotion::Promotion
/// [`try_new`]: crate::gamut::Gamut::try_new
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
#[cfg_attr(
    feature = "serde",
    serde(
        bound(
            deserialize = "T: serde::Deserialize<'de> + Primitive",
            serialize = "T: Primitive + serde::Serialize"
        ),
        try_from = "Serde<T>",
        into = "Serde<T>"
    )
)]
#[repr(transparent)]
pub struct Gamut<T, const MIN: i128, const MAX: i128, P = Native, E = OrPanic> {
    inner: T,
    phantom: PhantomData<fn() -> (P, E)>,
}

impl<T, const MIN: i128, const MAX: i128, P, E> Gamut<T, MIN, MAX, P, E>
where
    T: Copy,
{
    /// Converts the bounded value into its base value.
    pub const fn get(self) -> T {
        self.inner
    }
}

impl<T, const MIN: i128, const MAX: i128, P, E> Gamut<T, MIN, MAX, P, E>
where
    T: Primitive,
{
    // Rejects malformed instantiations when a constructor is first monomorphized.
    const GUARD: () = {
        assert!(MIN <= MAX, "malformed gamut type: MIN exceeds MAX");
        assert!(
            MIN >= T::WIDE_MIN,
            "malformed gamut type: MIN is not representable in the base type",
        );
        assert!(
            MAX <= T::WIDE_MAX,
            "malformed gamut type: MAX is not representable in the base type",
        );
    };

    pub(crate) fn unchecked(inner: T) -> Self {
        let _ = Self::GUARD;
        Gamut {
            inner,
            phantom: PhantomData,
        }
    }

    /// The declared range as an [`Interval`].
    ///
    /// [`Interval`]: crate::interval::Interval
    pub const fn range() -> Interval {
        Interval::new(MIN, MAX)
    }

    /// The smallest admitted value.
    pub fn min_value() -> Self {
        Self::unchecked(T::from_wide(MIN))
    }

    /// The largest admitted value.
    pub fn max_value() -> Self {
        Self::unchecked(T::from_wide(MAX))
    }

    /// Fallibly constructs a bounded value from a base value.
    ///
    /// This construction is independent of the divergence of the type; it always outputs a
    /// [`Result`] and never panics.
    ///
    /// # Errors
    ///
    /// Returns a `Range` fault if the value lies outside `[MIN, MAX]`.
    ///
    /// [`Result`]: core::result::Result
    pub fn try_new(inner: T) -> Result<Self, Fault> {
        let wide = inner.to_wide();
        if wide < MIN {
            Err(Fault::new(
                FaultKind::Range,
                "value is below the minimum of the gamut type",
            ))
        }
        else if wide > MAX {
            Err(Fault::new(
                FaultKind::Range,
                "value is above the maximum of the gamut type",
            ))
        }
        else {
            Ok(Self::unchecked(inner))
        }
    }
}

impl<T, const MIN: i128, const MAX: i128, P, E> Gamut<T, MIN, MAX, P, E>
where
    T: Primitive,
    E: Divergence,
{
    /// Constructs a bounded value from a base value, diverging on a range violation.
    ///
    /// If the divergence returns after the fault, the range minimum stands in for the rejected
    /// value; this is the crate-wide convention for failed constructions.
    ///
    /// # Panics
    ///
    /// Panics on a range violation if the divergence panics, as the default [`OrPanic`] does.
    ///
    /// [`OrPanic`]: crate::divergence::OrPanic
    pub fn new(inner: T) -> Self {
        match Self::try_new(inner) {
            Ok(gamut) => gamut,
            Err(fault) => {
                E::diverge(&fault);
                Self::min_value()
            }
        }
    }

    /// Converts from another bounded value, diverging on a range violation.
    ///
    /// The source may have any base type and policies. When the declared range of `Self`
    /// includes the source range the conversion is statically known to succeed and performs no
    /// runtime check. A source whose range is disjoint from `[MIN, MAX]` could never produce a
    /// valid value, so the conversion is rejected at compile time.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use gamut::Gamut;
    ///
    /// type Word = Gamut<i16, -1000, 1000>;
    /// type Nibble = Gamut<i16, 0, 15>;
    ///
    /// let x = Word::from_bounded(Nibble::new(12)); // Unchecked: [0, 15] is within [-1000, 1000].
    /// assert_eq!(x.get(), 12);
    /// ```
    pub fn from_bounded<U, const SOURCE_MIN: i128, const SOURCE_MAX: i128, P2, E2>(
        source: Gamut<U, SOURCE_MIN, SOURCE_MAX, P2, E2>,
    ) -> Self
    where
        U: Primitive,
    {
        const {
            assert!(
                !Interval::new(MIN, MAX).disjoint(Interval::new(SOURCE_MIN, SOURCE_MAX)),
                "gamut type cannot be constructed from a source with a disjoint range",
            );
        }
        let included = const {
            Interval::new(MIN, MAX).includes(Interval::new(SOURCE_MIN, SOURCE_MAX))
        };
        let wide = source.get().to_wide();
        if included || (wide >= MIN && wide <= MAX) {
            Self::unchecked(T::from_wide(wide))
        }
        else {
            E::diverge(&Fault::new(
                FaultKind::Range,
                "source value is outside the range of the gamut type",
            ));
            Self::min_value()
        }
    }

    /// Casts the value into a bare primitive type, diverging when it does not fit.
    ///
    /// Faults are reported through the `range_error` hook of the divergence. If the divergence
    /// returns, the delivered value is the two's-complement truncation of the stored value.
    pub fn cast<R>(self) -> R
    where
        R: Primitive,
    {
        match checked::cast::<R, T>(self.inner) {
            Checked::Value(value) => value,
            Checked::Faulted(fault) => {
                E::range_error(fault.message());
                R::from_wide(self.inner.to_wide())
            }
        }
    }

    /// Fallibly casts the value into a bare primitive type.
    ///
    /// # Errors
    ///
    /// Returns an overflow fault when the value does not fit the machine range of `R`.
    pub fn try_cast<R>(self) -> Result<R, Fault>
    where
        R: Primitive,
    {
        checked::cast::<R, T>(self.inner).into_result()
    }
}

impl<T, const MIN: i128, const MAX: i128, P, E> BoundedInteger for Gamut<T, MIN, MAX, P, E>
where
    T: Primitive,
    P: Promotion,
    E: Divergence,
{
    type Base = T;
    type Promotion = P;
    type Divergence = E;

    const MIN_WIDE: i128 = MIN;
    const MAX_WIDE: i128 = MAX;

    fn base(self) -> T {
        self.inner
    }

    fn from_base_unchecked(base: T) -> Self {
        Self::unchecked(base)
    }
}

impl<T, const MIN: i128, const MAX: i128, P, E> Sealed for Gamut<T, MIN, MAX, P, E> {}

impl<T, const MIN: i128, const MAX: i128, P, E> Clone for Gamut<T, MIN, MAX, P, E>
where
    T: Copy,
{
    fn clone(&self) -> Self {
        *self
    }
}

impl<T, const MIN: i128, const MAX: i128, P, E> Copy for Gamut<T, MIN, MAX, P, E> where T: Copy {}

impl<T, const MIN: i128, const MAX: i128, P, E> Debug for Gamut<T, MIN, MAX, P, E>
where
    T: Debug,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Gamut<{}, {}>({:?})", MIN, MAX, self.inner)
    }
}

macro_rules! impl_format_for_gamut {
    ($trait:ident) => {
        impl<T, const MIN: i128, const MAX: i128, P, E> fmt::$trait for Gamut<T, MIN, MAX, P, E>
        where
            T: Primitive,
        {
            fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
                fmt::$trait::fmt(&self.inner, f)
            }
        }
    };
}
impl_format_for_gamut!(Display);
impl_format_for_gamut!(Binary);
impl_format_for_gamut!(Octal);
impl_format_for_gamut!(LowerHex);
impl_format_for_gamut!(UpperHex);

impl<T, const MIN: i128, const MAX: i128, P, E> Hash for Gamut<T, MIN, MAX, P, E>
where
    T: Primitive,
{
    fn hash<H>(&self, state: &mut H)
    where
        H: Hasher,
    {
        self.inner.to_wide().hash(state)
    }
}

impl<T, const MIN: i128, const MAX: i128, P, E> FromStr for Gamut<T, MIN, MAX, P, E>
where
    T: Primitive,
{
    type Err = Fault;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let value = <T as Num>::from_str_radix(text, 10)
            .map_err(|_| Fault::new(FaultKind::Domain, "invalid integer text"))?;
        Self::try_new(value)
    }
}

impl<T, const MIN: i128, const MAX: i128, P, E> num_traits::Bounded for Gamut<T, MIN, MAX, P, E>
where
    T: Primitive,
{
    fn min_value() -> Self {
        Self::min_value()
    }

    fn max_value() -> Self {
        Self::max_value()
    }
}

// It is not possible to implement `From` between gamut types in a generic way, because the
// source and destination parameters may be the same and conflict with the reflexive
// implementation in core; `from_bounded` takes that role. Conversions to and from the base
// types are implemented per primitive type.
macro_rules! impl_conversions_for_gamut {
    (primitive => $t:ty) => {
        impl<const MIN: i128, const MAX: i128, P, E> TryFrom<$t> for Gamut<$t, MIN, MAX, P, E> {
            type Error = Fault;

            fn try_from(value: $t) -> Result<Self, Self::Error> {
                Self::try_new(value)
            }
        }

        impl<const MIN: i128, const MAX: i128, P, E> From<Gamut<$t, MIN, MAX, P, E>> for $t {
            fn from(gamut: Gamut<$t, MIN, MAX, P, E>) -> Self {
                gamut.get()
            }
        }
    };
}
with_primitives!(impl_conversions_for_gamut);

/// Serialization container.
///
/// This type is represented and serialized transparently as its inner type `T`. `Gamut` uses it
/// for its own serialization and deserialization with a conversion that validates the declared
/// range, so it is not possible to deserialize an out-of-range value into a bounded type.
#[cfg(feature = "serde")]
#[derive(Deserialize, Serialize)]
#[serde(transparent)]
#[derive(Clone, Copy)]
#[repr(transparent)]
struct Serde<T> {
    inner: T,
}

#[cfg(feature = "serde")]
impl<T, const MIN: i128, const MAX: i128, P, E> From<Gamut<T, MIN, MAX, P, E>> for Serde<T>
where
    T: Primitive,
{
    fn from(gamut: Gamut<T, MIN, MAX, P, E>) -> Self {
        Serde {
            inner: gamut.get(),
        }
    }
}

#[cfg(feature = "serde")]
impl<T, const MIN: i128, const MAX: i128, P, E> TryFrom<Serde<T>> for Gamut<T, MIN, MAX, P, E>
where
    T: Primitive,
{
    type Error = Fault;

    fn try_from(container: Serde<T>) -> Result<Self, Self::Error> {
        Self::try_new(container.inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::divergence::{OrFlag, OrWrap};
    use crate::fault::FaultKind;

    type Percent = Gamut<u8, 0, 100>;
    type Word = Gamut<i16, -1000, 1000>;
    type Byte = Gamut<u8, 0, 255>;

    #[test]
    fn construction_validates_the_declared_range() {
        assert_eq!(Percent::new(0).get(), 0);
        assert_eq!(Percent::new(100).get(), 100);
        assert_eq!(
            Percent::try_new(101).err().map(|fault| fault.kind()),
            Some(FaultKind::Range),
        );
        assert_eq!(
            Gamut::<i8, -5, 5>::try_new(-6).err().map(|fault| fault.kind()),
            Some(FaultKind::Range),
        );
    }

    #[test]
    #[should_panic(expected = "above the maximum")]
    fn strict_construction_panics_out_of_range() {
        let _ = Percent::new(101);
    }

    #[test]
    fn returning_divergence_falls_back_to_the_range_minimum() {
        type Loose = Gamut<u8, 10, 100, Native, OrWrap>;
        assert_eq!(Loose::new(5).get(), 10);
        assert_eq!(Loose::new(200).get(), 10);
        assert_eq!(Loose::new(50).get(), 50);
    }

    #[test]
    fn conversion_is_unchecked_when_the_range_is_included() {
        let word = Word::from_bounded(Percent::new(77));
        assert_eq!(word.get(), 77);
    }

    #[test]
    fn conversion_validates_when_the_range_is_not_included() {
        // [0, 255] and [-1000, 1000] overlap, so this compiles and checks at runtime.
        let byte = Byte::from_bounded(Word::new(200));
        assert_eq!(byte.get(), 200);
    }

    #[test]
    #[should_panic(expected = "outside the range")]
    fn narrowing_conversion_faults_on_an_out_of_range_value() {
        let _ = Gamut::<u8, 0, 255>::from_bounded(Word::new(500));
    }

    #[test]
    fn flagging_divergence_records_failed_conversions() {
        type Flagged = Gamut<u8, 0, 255, Native, OrFlag>;
        OrFlag::clear();
        let byte = Flagged::from_bounded(Gamut::<i16, -1000, 1000, Native, OrFlag>::new(-4));
        assert!(OrFlag::is_set());
        assert_eq!(byte.get(), 0); // The range minimum stands in.
        OrFlag::clear();
    }

    #[test]
    fn casts_check_the_machine_range_of_the_destination() {
        assert_eq!(Word::new(255).cast::<u8>(), 255u8);
        assert_eq!(Word::new(-1).try_cast::<u8>().err().map(|fault| fault.kind()),
            Some(FaultKind::NegativeOverflow));
        assert_eq!(Word::new(1000).try_cast::<u8>().err().map(|fault| fault.kind()),
            Some(FaultKind::PositiveOverflow));
        assert_eq!(Word::new(-1000).cast::<i64>(), -1000i64);
    }

    #[test]
    #[should_panic(expected = "too large")]
    fn strict_cast_panics_when_the_value_does_not_fit() {
        let _ = Word::new(300).cast::<u8>();
    }

    #[test]
    fn wrapping_cast_truncates() {
        type Loose = Gamut<i16, -1000, 1000, Native, OrWrap>;
        assert_eq!(Loose::new(300).cast::<u8>(), 44u8);
    }

    #[test]
    fn extraction_and_bounds() {
        assert_eq!(Percent::min_value().get(), 0);
        assert_eq!(Percent::max_value().get(), 100);
        assert_eq!(<Percent as num_traits::Bounded>::max_value().get(), 100);
        assert_eq!(u8::from(Percent::new(31)), 31);
        assert_eq!((Percent::range().lo(), Percent::range().hi()), (0, 100));
    }

    #[test]
    fn try_from_mirrors_validation() {
        assert!(Percent::try_from(100u8).is_ok());
        assert!(Percent::try_from(101u8).is_err());
    }

    #[test]
    fn parsing_validates_after_parsing() {
        let percent: Percent = "42".parse().unwrap();
        assert_eq!(percent.get(), 42);
        assert_eq!(
            "101".parse::<Percent>().err().map(|fault| fault.kind()),
            Some(FaultKind::Range),
        );
        assert_eq!(
            "four".parse::<Percent>().err().map(|fault| fault.kind()),
            Some(FaultKind::Domain),
        );
        let word: Word = "-1000".parse().unwrap();
        assert_eq!(word.get(), -1000);
    }

    #[test]
    fn formatting_shows_the_base_value_and_the_range() {
        let percent = Percent::new(42);
        assert_eq!(format!("{}", percent), "42");
        assert_eq!(format!("{:?}", percent), "Gamut<0, 100>(42)");
        assert_eq!(format!("{:#x}", Byte::new(0xAB)), "0xab");
        assert_eq!(format!("{:b}", Byte::new(5)), "101");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn deserialization_validates_the_declared_range() {
        let percent: Percent = serde_json::from_str("42").unwrap();
        assert_eq!(percent.get(), 42);
        assert!(serde_json::from_str::<Percent>("101").is_err());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serialization_is_transparent() {
        assert_eq!(serde_json::to_string(&Percent::new(42)).unwrap(), "42");
    }
}
