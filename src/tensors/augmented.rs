use std::{
    fmt::Display,
    ops::{Deref, DerefMut},
};

use crate::{
    domains::rational::{Rational, RationalField, Q},
    error::Error,
    printer::AugmentedMatrixPrinter,
};

use super::matrix::Matrix;

/// A rational matrix whose last column is the right-hand side of a linear system.
///
/// It behaves exactly like the underlying [Matrix] and only differs in how it is
/// printed: the columns are aligned and the last column is set apart.
#[derive(Clone, Hash, PartialEq, Eq, Debug)]
pub struct AugmentedMatrix(Matrix<RationalField>);

impl AugmentedMatrix {
    /// Create an augmented matrix from a list of rows.
    pub fn from_nested_vec(rows: Vec<Vec<Rational>>) -> Result<AugmentedMatrix, Error> {
        Matrix::from_nested_vec(rows, Q).map(AugmentedMatrix)
    }

    pub fn into_matrix(self) -> Matrix<RationalField> {
        self.0
    }

    /// Get the right-hand side column. For a reduced system with a unique
    /// solution, this is the solution.
    pub fn solution(&self) -> Vec<Rational> {
        let last = self.0.ncols - 1;
        (0..self.0.nrows).map(|i| self.0[(i, last)].clone()).collect()
    }
}

impl From<Matrix<RationalField>> for AugmentedMatrix {
    fn from(matrix: Matrix<RationalField>) -> Self {
        AugmentedMatrix(matrix)
    }
}

impl Deref for AugmentedMatrix {
    type Target = Matrix<RationalField>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for AugmentedMatrix {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl Display for AugmentedMatrix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        AugmentedMatrixPrinter::new(self).fmt(f)
    }
}

#[cfg(test)]
mod test {
    use crate::{
        domains::rational::{Rational, Q},
        printer::{AugmentedMatrixPrinter, PrintOptions},
        tensors::matrix::Matrix,
    };

    use super::AugmentedMatrix;

    fn r(n: i64, d: i64) -> Rational {
        Rational::new(n, d).unwrap()
    }

    #[test]
    fn display() {
        let m = AugmentedMatrix::from_nested_vec(vec![
            vec![r(1, 1), r(0, 1), r(-4, 1)],
            vec![r(0, 1), r(1, 1), r(9, 2)],
        ])
        .unwrap();

        assert_eq!(m.to_string(), "(1    0    |   -4)\n(0    1    |  9/2)");
        assert_eq!(m.solution(), vec![r(-4, 1), r(9, 2)]);

        let plain = m.clone().into_matrix();
        assert_eq!(plain.to_string(), "(1  0  -4)\n(0  1  9/2)");

        let printer = AugmentedMatrixPrinter {
            matrix: &m,
            opts: PrintOptions {
                column_padding: 1,
                augmented_separator: ':',
                ..PrintOptions::new()
            },
        };
        assert_eq!(printer.to_string(), "(1   0   :  -4)\n(0   1   : 9/2)");
    }

    #[test]
    fn digit_grouping() {
        let m = AugmentedMatrix::from(
            Matrix::row(vec![r(1500, 1), r(-1, 3)], Q).unwrap(),
        );
        assert_eq!(m.to_string(), "(1,500  |   -1/3)");
        assert_eq!(format!("{:#}", m), "(1500  |  -1/3)");
    }

    #[test]
    fn numeric_behaviour() {
        let mut m = AugmentedMatrix::from(Matrix::identity(2, Q).unwrap());
        m.set_value(1, 2, r(3, 1)).unwrap();
        assert_eq!(m.det().unwrap(), 1);
        assert_eq!(m.nrows(), 2);
        assert_eq!(m.solution(), vec![r(3, 1), r(1, 1)]);
    }
}
