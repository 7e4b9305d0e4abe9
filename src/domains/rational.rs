use std::{
    borrow::Cow,
    cmp::Ordering,
    fmt::{Display, Error, Formatter},
    ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign},
    str::FromStr,
};

use rug::{
    ops::{DivRounding, Pow},
    Integer,
};

use crate::{
    error::Error as ArithmeticError,
    printer::{format_integer, PrintOptions},
};

use super::{Ring, ToRational};

/// The field of rational numbers.
pub type Q = RationalField;
/// The field of rational numbers.
pub const Q: RationalField = RationalField::new();

/// The field of rational numbers.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct RationalField;

impl Default for RationalField {
    fn default() -> Self {
        Self::new()
    }
}

impl RationalField {
    pub const fn new() -> RationalField {
        RationalField
    }
}

/// An exact fraction of two arbitrary-precision integers.
///
/// A rational number is always in lowest terms: the denominator is positive and
/// coprime to the numerator. Zero is represented as `0/1`.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct Rational {
    numerator: Integer,
    denominator: Integer,
}

/// The right-hand side of an arithmetic operation on a [Rational]:
/// either a plain integer or another rational number.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Operand<'a> {
    Integer(Integer),
    Rational(Cow<'a, Rational>),
}

macro_rules! from_primitive {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Rational {
                #[inline]
                fn from(value: $t) -> Self {
                    Rational::from_integer(value)
                }
            }

            impl From<$t> for Operand<'_> {
                #[inline]
                fn from(value: $t) -> Self {
                    Operand::Integer(value.into())
                }
            }

            impl PartialEq<$t> for Rational {
                #[inline]
                fn eq(&self, other: &$t) -> bool {
                    self.denominator == 1 && self.numerator == *other
                }
            }
        )*
    };
}

from_primitive!(i32, i64, u32, u64);

impl From<Integer> for Rational {
    fn from(value: Integer) -> Self {
        Rational::from_integer(value)
    }
}

impl From<&Integer> for Rational {
    fn from(value: &Integer) -> Self {
        Rational::from_integer(value.clone())
    }
}

impl From<Integer> for Operand<'_> {
    fn from(value: Integer) -> Self {
        Operand::Integer(value)
    }
}

impl<'a> From<&'a Rational> for Operand<'a> {
    fn from(value: &'a Rational) -> Self {
        Operand::Rational(Cow::Borrowed(value))
    }
}

impl From<Rational> for Operand<'_> {
    fn from(value: Rational) -> Self {
        Operand::Rational(Cow::Owned(value))
    }
}

impl PartialEq<Integer> for Rational {
    fn eq(&self, other: &Integer) -> bool {
        self.denominator == 1 && self.numerator == *other
    }
}

impl Default for Rational {
    fn default() -> Self {
        Rational::zero()
    }
}

impl Rational {
    /// Create the reduced fraction `numerator/denominator`.
    /// Fails if the denominator is zero.
    pub fn new<N: Into<Integer>, D: Into<Integer>>(
        numerator: N,
        denominator: D,
    ) -> Result<Rational, ArithmeticError> {
        let denominator = denominator.into();
        if denominator == 0 {
            return Err(ArithmeticError::ZeroDenominator);
        }

        Ok(Rational::normalize(numerator.into(), denominator))
    }

    /// Create the rational number `n/1`.
    pub fn from_integer<N: Into<Integer>>(n: N) -> Rational {
        Rational {
            numerator: n.into(),
            denominator: Integer::from(1),
        }
    }

    /// Create the rational number `1/n`.
    pub fn inverse_of<N: Into<Integer>>(n: N) -> Result<Rational, ArithmeticError> {
        Rational::new(1, n)
    }

    /// Convert a finite floating point number to its exact rational equivalent.
    pub fn from_f64(f: f64) -> Result<Rational, ArithmeticError> {
        let r = rug::Rational::from_f64(f)
            .ok_or_else(|| ArithmeticError::NonFiniteFloat(f.to_string()))?;
        let (numerator, denominator) = r.into_numer_denom();
        Ok(Rational {
            numerator,
            denominator,
        })
    }

    /// Parse a fraction of the form `a/b`, where `a` and `b` are integers
    /// with an optional minus sign. Whitespace around both integers is allowed.
    pub fn parse_fraction(s: &str) -> Result<Rational, ArithmeticError> {
        let invalid = || ArithmeticError::InvalidFraction(s.to_string());

        let (num, den) = s.split_once('/').ok_or_else(invalid)?;
        let num = parse_signed_integer(num).ok_or_else(invalid)?;
        let den = parse_signed_integer(den).ok_or_else(invalid)?;
        Rational::new(num, den)
    }

    /// Bring the fraction into lowest terms with a positive denominator.
    /// The denominator must be non-zero.
    fn normalize(mut numerator: Integer, mut denominator: Integer) -> Rational {
        if denominator < 0 {
            numerator = -numerator;
            denominator = -denominator;
        }

        let g = Integer::from(numerator.gcd_ref(&denominator));
        if g != 1 {
            numerator.div_exact_mut(&g);
            denominator.div_exact_mut(&g);
        }

        Rational {
            numerator,
            denominator,
        }
    }

    pub fn zero() -> Rational {
        Rational::from_integer(0)
    }

    pub fn one() -> Rational {
        Rational::from_integer(1)
    }

    pub fn numerator(&self) -> &Integer {
        &self.numerator
    }

    pub fn denominator(&self) -> &Integer {
        &self.denominator
    }

    pub fn into_numer_denom(self) -> (Integer, Integer) {
        (self.numerator, self.denominator)
    }

    pub fn is_zero(&self) -> bool {
        self.numerator == 0
    }

    pub fn is_one(&self) -> bool {
        self.numerator == 1 && self.denominator == 1
    }

    pub fn is_negative(&self) -> bool {
        self.numerator < 0
    }

    /// Returns `true` iff the denominator is one.
    pub fn is_integer(&self) -> bool {
        self.denominator == 1
    }

    pub fn abs(&self) -> Rational {
        Rational {
            numerator: self.numerator.clone().abs(),
            denominator: self.denominator.clone(),
        }
    }

    pub fn neg(&self) -> Rational {
        Rational {
            numerator: Integer::from(-&self.numerator),
            denominator: self.denominator.clone(),
        }
    }

    /// Get the multiplicative inverse. Fails for zero.
    pub fn inv(&self) -> Result<Rational, ArithmeticError> {
        Rational::new(self.denominator.clone(), self.numerator.clone())
    }

    /// Round towards negative infinity.
    pub fn to_integer(&self) -> Integer {
        self.numerator.clone().div_floor(&self.denominator)
    }

    /// Convert to the closest double precision floating point number.
    pub fn to_f64(&self) -> f64 {
        rug::Rational::from((self.numerator.clone(), self.denominator.clone())).to_f64()
    }

    pub fn add<'a, O: Into<Operand<'a>>>(&self, rhs: O) -> Rational {
        match rhs.into() {
            Operand::Integer(n) => {
                let mut numerator = Integer::from(&self.denominator * &n);
                numerator += &self.numerator;
                Rational::normalize(numerator, self.denominator.clone())
            }
            Operand::Rational(r) => {
                let mut numerator = Integer::from(&self.numerator * &r.denominator);
                numerator += Integer::from(&r.numerator * &self.denominator);
                let denominator = Integer::from(&self.denominator * &r.denominator);
                Rational::normalize(numerator, denominator)
            }
        }
    }

    pub fn sub<'a, O: Into<Operand<'a>>>(&self, rhs: O) -> Rational {
        match rhs.into() {
            Operand::Integer(n) => self.add(-n),
            Operand::Rational(r) => self.add(Rational::neg(&r)),
        }
    }

    pub fn mul<'a, O: Into<Operand<'a>>>(&self, rhs: O) -> Rational {
        match rhs.into() {
            Operand::Integer(n) => {
                Rational::normalize(Integer::from(&self.numerator * &n), self.denominator.clone())
            }
            Operand::Rational(r) => Rational::normalize(
                Integer::from(&self.numerator * &r.numerator),
                Integer::from(&self.denominator * &r.denominator),
            ),
        }
    }

    /// Divide by `rhs`. Fails if `rhs` is zero.
    pub fn div<'a, O: Into<Operand<'a>>>(&self, rhs: O) -> Result<Rational, ArithmeticError> {
        match rhs.into() {
            Operand::Integer(n) => {
                Rational::new(self.numerator.clone(), Integer::from(&self.denominator * &n))
            }
            Operand::Rational(r) => Rational::new(
                Integer::from(&self.numerator * &r.denominator),
                Integer::from(&self.denominator * &r.numerator),
            ),
        }
    }

    /// Raise to the power `e`. A negative power inverts the number first,
    /// which fails for zero.
    pub fn pow(&self, e: i64) -> Result<Rational, ArithmeticError> {
        let k = u32::try_from(e.unsigned_abs())
            .map_err(|_| ArithmeticError::ExponentTooLarge(e))?;

        let (numerator, denominator) = if e >= 0 {
            (&self.numerator, &self.denominator)
        } else {
            (&self.denominator, &self.numerator)
        };

        Rational::new(numerator.clone().pow(k), denominator.clone().pow(k))
    }
}

/// Parse `\s*-?\d+\s*`.
fn parse_signed_integer(s: &str) -> Option<Integer> {
    let s = s.trim();
    let digits = s.strip_prefix('-').unwrap_or(s);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    s.parse().ok()
}

impl FromStr for Rational {
    type Err = ArithmeticError;

    /// Parse a fraction `a/b` or a plain integer `a`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.contains('/') {
            Rational::parse_fraction(s)
        } else {
            parse_signed_integer(s)
                .map(Rational::from_integer)
                .ok_or_else(|| ArithmeticError::InvalidFraction(s.to_string()))
        }
    }
}

impl Display for Rational {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Q.format(self, &PrintOptions::default().update_with_fmt(f), f)
    }
}

impl Ring for RationalField {
    type Element = Rational;

    #[inline]
    fn add(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        a.add(b)
    }

    #[inline]
    fn sub(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        a.sub(b)
    }

    #[inline]
    fn mul(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        a.mul(b)
    }

    fn add_assign(&self, a: &mut Self::Element, b: &Self::Element) {
        *a = Rational::add(a, b);
    }

    fn add_mul_assign(&self, a: &mut Self::Element, b: &Self::Element, c: &Self::Element) {
        *a = Rational::add(a, b.mul(c));
    }

    fn sub_mul_assign(&self, a: &mut Self::Element, b: &Self::Element, c: &Self::Element) {
        *a = Rational::sub(a, b.mul(c));
    }

    fn neg(&self, a: &Self::Element) -> Self::Element {
        a.neg()
    }

    fn zero(&self) -> Self::Element {
        Rational::zero()
    }

    fn one(&self) -> Self::Element {
        Rational::one()
    }

    fn is_zero(a: &Self::Element) -> bool {
        a.is_zero()
    }

    fn is_one(&self, a: &Self::Element) -> bool {
        a.is_one()
    }

    fn format<W: std::fmt::Write>(
        &self,
        element: &Self::Element,
        opts: &PrintOptions,
        f: &mut W,
    ) -> Result<(), Error> {
        format_integer(&element.numerator, opts, f)?;
        if !element.is_integer() {
            f.write_char('/')?;
            format_integer(&element.denominator, opts, f)?;
        }
        Ok(())
    }
}

impl ToRational for RationalField {
    fn to_rational(&self, element: &Rational) -> Rational {
        element.clone()
    }
}

impl PartialOrd for Rational {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Rational {
    fn cmp(&self, other: &Self) -> Ordering {
        if self.denominator == other.denominator {
            return self.numerator.cmp(&other.numerator);
        }

        let a = Integer::from(&self.numerator * &other.denominator);
        let b = Integer::from(&other.numerator * &self.denominator);
        a.cmp(&b)
    }
}

impl Add<Rational> for Rational {
    type Output = Rational;

    fn add(self, other: Rational) -> Self::Output {
        Rational::add(&self, &other)
    }
}

impl Sub<Rational> for Rational {
    type Output = Rational;

    fn sub(self, other: Rational) -> Self::Output {
        Rational::sub(&self, &other)
    }
}

impl Mul<Rational> for Rational {
    type Output = Rational;

    fn mul(self, other: Rational) -> Self::Output {
        Rational::mul(&self, &other)
    }
}

impl Div<Rational> for Rational {
    type Output = Rational;

    /// Divide two rational numbers.
    /// Panics when `other` is zero; use [Rational::div] to handle this case.
    fn div(self, other: Rational) -> Self::Output {
        &self / &other
    }
}

impl<'a, 'b> Add<&'a Rational> for &'b Rational {
    type Output = Rational;

    fn add(self, other: &'a Rational) -> Self::Output {
        Rational::add(self, other)
    }
}

impl<'a, 'b> Sub<&'a Rational> for &'b Rational {
    type Output = Rational;

    fn sub(self, other: &'a Rational) -> Self::Output {
        Rational::sub(self, other)
    }
}

impl<'a, 'b> Mul<&'a Rational> for &'b Rational {
    type Output = Rational;

    fn mul(self, other: &'a Rational) -> Self::Output {
        Rational::mul(self, other)
    }
}

impl<'a, 'b> Div<&'a Rational> for &'b Rational {
    type Output = Rational;

    /// Divide two rational numbers.
    /// Panics when `other` is zero; use [Rational::div] to handle this case.
    fn div(self, other: &'a Rational) -> Self::Output {
        match Rational::div(self, other) {
            Ok(r) => r,
            Err(e) => panic!("Cannot divide {} by {}: {}", self, other, e),
        }
    }
}

impl Neg for Rational {
    type Output = Rational;

    fn neg(self) -> Self::Output {
        Rational {
            numerator: -self.numerator,
            denominator: self.denominator,
        }
    }
}

impl Neg for &Rational {
    type Output = Rational;

    fn neg(self) -> Self::Output {
        Rational::neg(self)
    }
}

impl<'a> AddAssign<&'a Rational> for Rational {
    fn add_assign(&mut self, other: &'a Rational) {
        *self = Rational::add(self, other);
    }
}

impl<'a> SubAssign<&'a Rational> for Rational {
    fn sub_assign(&mut self, other: &'a Rational) {
        *self = Rational::sub(self, other);
    }
}

impl<'a> MulAssign<&'a Rational> for Rational {
    fn mul_assign(&mut self, other: &'a Rational) {
        *self = Rational::mul(self, other);
    }
}

impl<'a> DivAssign<&'a Rational> for Rational {
    fn div_assign(&mut self, other: &'a Rational) {
        *self = &*self / other;
    }
}

impl<'a> std::iter::Sum<&'a Rational> for Rational {
    fn sum<I: Iterator<Item = &'a Rational>>(iter: I) -> Self {
        iter.fold(Rational::zero(), |a, b| Rational::add(&a, b))
    }
}

impl std::iter::Sum<Rational> for Rational {
    fn sum<I: Iterator<Item = Rational>>(iter: I) -> Self {
        iter.fold(Rational::zero(), |a, b| Rational::add(&a, b))
    }
}
