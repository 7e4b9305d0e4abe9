use std::fmt::Error;

use crate::printer::{format_integer, PrintOptions};

use super::{rational::Rational, Ring, ToRational};

/// An arbitrary-precision integer.
pub use rug::Integer;

/// The integer ring.
pub type Z = IntegerRing;
/// The integer ring.
pub const Z: IntegerRing = IntegerRing::new();

/// The integer ring.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct IntegerRing;

impl Default for IntegerRing {
    fn default() -> Self {
        Self::new()
    }
}

impl IntegerRing {
    pub const fn new() -> IntegerRing {
        IntegerRing
    }
}

impl Ring for IntegerRing {
    type Element = Integer;

    #[inline]
    fn add(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        Integer::from(a + b)
    }

    #[inline]
    fn sub(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        Integer::from(a - b)
    }

    #[inline]
    fn mul(&self, a: &Self::Element, b: &Self::Element) -> Self::Element {
        Integer::from(a * b)
    }

    #[inline]
    fn add_assign(&self, a: &mut Self::Element, b: &Self::Element) {
        *a += b;
    }

    #[inline]
    fn add_mul_assign(&self, a: &mut Self::Element, b: &Self::Element, c: &Self::Element) {
        *a += Integer::from(b * c);
    }

    #[inline]
    fn sub_mul_assign(&self, a: &mut Self::Element, b: &Self::Element, c: &Self::Element) {
        *a -= Integer::from(b * c);
    }

    #[inline]
    fn neg(&self, a: &Self::Element) -> Self::Element {
        Integer::from(-a)
    }

    #[inline]
    fn zero(&self) -> Self::Element {
        Integer::new()
    }

    #[inline]
    fn one(&self) -> Self::Element {
        Integer::from(1)
    }

    #[inline]
    fn is_zero(a: &Self::Element) -> bool {
        *a == 0
    }

    #[inline]
    fn is_one(&self, a: &Self::Element) -> bool {
        *a == 1
    }

    fn format<W: std::fmt::Write>(
        &self,
        element: &Self::Element,
        opts: &PrintOptions,
        f: &mut W,
    ) -> Result<(), Error> {
        format_integer(element, opts, f)
    }
}

impl ToRational for IntegerRing {
    fn to_rational(&self, element: &Integer) -> Rational {
        Rational::from_integer(element.clone())
    }
}

#[cfg(test)]
mod test {
    use rug::Integer;

    use crate::domains::{integer::Z, Ring, ToRational};

    #[test]
    fn ring_operations() {
        let a = Integer::from(12);
        let b = Integer::from(-5);

        assert_eq!(Z.add(&a, &b), 7);
        assert_eq!(Z.sub(&a, &b), 17);
        assert_eq!(Z.mul(&a, &b), -60);
        assert_eq!(Z.neg(&b), 5);

        let mut c = Z.one();
        Z.add_mul_assign(&mut c, &a, &b);
        assert_eq!(c, -59);
        Z.sub_mul_assign(&mut c, &a, &b);
        assert_eq!(c, 1);
        assert!(Z.is_one(&c));
        assert!(<Z as Ring>::is_zero(&Z.zero()));
    }

    #[test]
    fn format() {
        let n = Integer::from(-1234567);
        assert_eq!(format!("{}", Z.printer(&n)), "-1,234,567");
        assert_eq!(format!("{:#}", Z.printer(&n)), "-1234567");
        assert_eq!(Z.to_rational(&n), -1234567);
    }
}
