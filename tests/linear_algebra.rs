use fracmat::{
    domains::{
        integer::{Integer, Z},
        rational::{Rational, Q},
    },
    tensors::{
        elimination::{gaussian_eliminate, Entry},
        matrix::Matrix,
    },
    ErrorKind,
};

fn int_matrix(rows: &[&[i64]]) -> Matrix<fracmat::domains::integer::IntegerRing> {
    Matrix::from_nested_vec(
        rows.iter()
            .map(|row| row.iter().map(|&x| Integer::from(x)).collect())
            .collect(),
        Z,
    )
    .unwrap()
}

#[test]
fn reduced_construction() {
    let r = Rational::new(2, 4).unwrap();
    assert_eq!(r.numerator(), &1);
    assert_eq!(r.denominator(), &2);
}

#[test]
fn divide_by_zero() {
    let err = Rational::from(3).div(&Rational::zero()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Domain);
}

#[test]
fn solve_system() {
    // x + 2y = 5, 3x + 4y = 6
    let m = gaussian_eliminate(&[
        vec![Entry::from(1), Entry::from(2), Entry::from(5)],
        vec![Entry::from(3), Entry::from(4), Entry::from(6)],
    ])
    .unwrap();

    assert_eq!(
        m.solution(),
        vec![Rational::from(-4), Rational::new(9, 2).unwrap()]
    );
    assert!(m.get_column(1).unwrap() == [Rational::one(), Rational::zero()]);
    assert_eq!(m.to_string(), "(1    0    |   -4)\n(0    1    |  9/2)");
}

#[test]
fn identity_is_self_inverse() {
    let id = Matrix::identity(3, Q).unwrap();
    assert_eq!(id.inv().unwrap(), id);
}

#[test]
fn determinant() {
    assert_eq!(int_matrix(&[&[1, 2], &[3, 4]]).det().unwrap(), -2);
}

#[test]
fn permutation_is_self_inverse() {
    let p = int_matrix(&[&[0, 1], &[1, 0]]);
    assert_eq!(p.inv().unwrap(), p.to_rational());
}

#[test]
fn inverse_solves_system() {
    let a = int_matrix(&[&[2, 1, -1], &[-3, -1, 2], &[-2, 1, 2]]);
    let b = Matrix::column(vec![8.into(), (-11).into(), (-3).into()], Q).unwrap();

    let x = a.inv().unwrap().mul(&b).unwrap();
    let expected: Vec<Rational> = [2, 3, -1].into_iter().map(Rational::from).collect();
    assert_eq!(x.get_column(1).unwrap(), expected);

    let columns = a
        .to_rational()
        .columns()
        .into_iter()
        .chain(b.columns())
        .collect::<Vec<_>>();
    let system = Matrix::from_nested_vec(columns, Q).unwrap().transpose();
    assert_eq!(system.gaussian_eliminate().solution(), expected);
}

#[test]
fn errors_are_classified() {
    assert_eq!(
        Matrix::new(0, 1, Q).unwrap_err().kind(),
        ErrorKind::Domain
    );
    assert_eq!(
        int_matrix(&[&[1, 2], &[2, 4]]).inv().unwrap_err().kind(),
        ErrorKind::TypeMismatch
    );
    assert_eq!(
        int_matrix(&[&[1]]).get_value(2, 1).unwrap_err().kind(),
        ErrorKind::Range
    );
    assert_eq!(
        gaussian_eliminate(&[vec![Entry::from("one/two"), Entry::from(1)]])
            .unwrap_err()
            .kind(),
        ErrorKind::Format
    );
    assert_eq!(
        gaussian_eliminate(&[vec![Entry::from(1), Entry::from(2)], vec![Entry::from(1)]])
            .unwrap_err()
            .kind(),
        ErrorKind::Domain
    );
}
