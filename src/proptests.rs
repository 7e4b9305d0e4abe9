//! Property-based tests for rational arithmetic and row reduction.

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use rug::Integer;

    use crate::{
        domains::{
            integer::{IntegerRing, Z},
            rational::Rational,
        },
        error::Error,
        tensors::matrix::Matrix,
    };

    // Strategy for generating small integers
    fn small_int() -> impl Strategy<Value = i64> {
        -1000i64..1000i64
    }

    // Strategy for generating non-zero integers
    fn non_zero_int() -> impl Strategy<Value = i64> {
        prop_oneof![(-1000i64..=-1i64), (1i64..=1000i64)]
    }

    fn rational() -> impl Strategy<Value = Rational> {
        (small_int(), non_zero_int()).prop_map(|(n, d)| Rational::new(n, d).unwrap())
    }

    fn non_zero_rational() -> impl Strategy<Value = Rational> {
        (non_zero_int(), non_zero_int()).prop_map(|(n, d)| Rational::new(n, d).unwrap())
    }

    fn square_matrix(n: u32) -> impl Strategy<Value = Matrix<IntegerRing>> {
        prop::collection::vec(-9i64..10i64, (n * n) as usize).prop_map(move |v| {
            Matrix::from_linear(v.into_iter().map(Integer::from).collect(), n, n, Z).unwrap()
        })
    }

    proptest! {
        #[test]
        fn rational_is_reduced(n in any::<i64>(), d in non_zero_int()) {
            let r = Rational::new(n, d).unwrap();
            prop_assert!(*r.denominator() > 0);
            prop_assert_eq!(Integer::from(r.numerator().gcd_ref(r.denominator())), 1);
        }

        #[test]
        fn ordering_trichotomy(a in rational(), b in rational()) {
            let holds = [a < b, a == b, a > b];
            prop_assert_eq!(holds.iter().filter(|&&x| x).count(), 1);
        }

        #[test]
        fn add_sub_roundtrip(a in rational(), b in rational()) {
            prop_assert_eq!(a.add(&b).sub(&b), a);
        }

        #[test]
        fn mul_div_roundtrip(a in rational(), b in non_zero_rational()) {
            prop_assert_eq!(a.mul(&b).div(&b).unwrap(), a);
        }

        #[test]
        fn integer_operand(a in rational(), k in small_int()) {
            prop_assert_eq!(a.add(k), a.add(&Rational::from(k)));
            prop_assert_eq!(a.mul(k), a.mul(&Rational::from(k)));
        }

        #[test]
        fn determinant_2x2(m in square_matrix(2)) {
            let expected = Integer::from(&m[(0, 0)] * &m[(1, 1)]) - Integer::from(&m[(0, 1)] * &m[(1, 0)]);
            prop_assert_eq!(m.det().unwrap(), expected);
        }

        #[test]
        fn inverse_roundtrip(m in square_matrix(3)) {
            if m.is_invertible() {
                let inv = m.inv().unwrap();
                prop_assert!((&m.to_rational() * &inv).is_identity());
                prop_assert!((&inv * &m.to_rational()).is_identity());
            } else {
                prop_assert_eq!(m.inv(), Err(Error::Singular));
            }
        }

        #[test]
        fn row_reduction_idempotent(v in prop::collection::vec(-9i64..10i64, 12)) {
            let m = Matrix::from_linear(v.into_iter().map(Integer::from).collect(), 3, 4, Z).unwrap();
            let reduced = m.gaussian_eliminate();
            prop_assert_eq!(reduced.gaussian_eliminate(), reduced);
        }
    }
}
