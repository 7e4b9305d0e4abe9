//! Gaussian elimination with partial pivoting over the rational numbers.
//!
//! The last column of the input is the right-hand side of a linear system.
//! After reduction, every pivot column contains a single one, so that for a
//! uniquely solvable system the last column holds the solution.

use rug::Integer;
use smallvec::SmallVec;
use tracing::{debug, instrument};

use crate::{
    domains::{
        rational::{Rational, RationalField, Q},
        ToRational,
    },
    error::Error,
};

use super::{augmented::AugmentedMatrix, matrix::Matrix};

/// An entry of a system passed to [gaussian_eliminate].
#[derive(Clone, Debug, PartialEq)]
pub enum Entry {
    Integer(Integer),
    /// A finite float, converted exactly.
    Float(f64),
    /// A fraction written as `a/b`.
    Fraction(String),
    Rational(Rational),
}

macro_rules! entry_from_integer {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Entry {
                #[inline]
                fn from(value: $t) -> Self {
                    Entry::Integer(value.into())
                }
            }
        )*
    };
}

entry_from_integer!(i32, i64, u32, u64);

impl From<Integer> for Entry {
    fn from(value: Integer) -> Self {
        Entry::Integer(value)
    }
}

impl From<f64> for Entry {
    fn from(value: f64) -> Self {
        Entry::Float(value)
    }
}

impl From<&str> for Entry {
    fn from(value: &str) -> Self {
        Entry::Fraction(value.to_string())
    }
}

impl From<String> for Entry {
    fn from(value: String) -> Self {
        Entry::Fraction(value)
    }
}

impl From<Rational> for Entry {
    fn from(value: Rational) -> Self {
        Entry::Rational(value)
    }
}

impl Entry {
    /// Convert the entry to a rational number.
    pub fn to_rational(&self) -> Result<Rational, Error> {
        match self {
            Entry::Integer(n) => Ok(Rational::from_integer(n.clone())),
            Entry::Float(f) => Rational::from_f64(*f),
            Entry::Fraction(s) => Rational::parse_fraction(s),
            Entry::Rational(r) => Ok(r.clone()),
        }
    }
}

/// Bring the augmented system `rows` into reduced row-echelon form.
///
/// Every entry is converted to a rational number first. All rows must have
/// the same length. The input is left untouched.
#[instrument(level = "debug", skip(rows), fields(nrows = rows.len()))]
pub fn gaussian_eliminate(rows: &[Vec<Entry>]) -> Result<AugmentedMatrix, Error> {
    let ncols = match rows.first() {
        Some(r) => r.len(),
        None => return Err(Error::EmptyMatrix),
    };

    if ncols == 0 {
        return Err(Error::InvalidDimensions {
            nrows: rows.len() as u32,
            ncols: 0,
        });
    }

    for (i, row) in rows.iter().enumerate() {
        if row.len() != ncols {
            return Err(Error::RaggedRows {
                row: i as u32 + 1,
                expected: ncols as u32,
                found: row.len() as u32,
            });
        }
    }

    let mut data = SmallVec::with_capacity(rows.len() * ncols);
    for e in rows.iter().flatten() {
        data.push(e.to_rational()?);
    }

    let mut m = Matrix {
        data,
        nrows: rows.len() as u32,
        ncols: ncols as u32,
        field: Q,
    };
    m.reduce_augmented();

    Ok(m.into())
}

impl<F: ToRational> Matrix<F> {
    /// Reduce a copy of the matrix, interpreted as an augmented system,
    /// to reduced row-echelon form.
    pub fn gaussian_eliminate(&self) -> AugmentedMatrix {
        let mut m = self.to_rational();
        m.reduce_augmented();
        m.into()
    }
}

impl Matrix<RationalField> {
    /// Reduce the matrix in place to reduced row-echelon form, treating the
    /// last column as the right-hand side. It is never used as a pivot column.
    ///
    /// For every column, the remaining row with the entry of largest magnitude
    /// is chosen as pivot row, where the first such row wins a tie. Columns
    /// without a non-zero candidate are skipped. The reduction stops early once
    /// every row holds a pivot.
    ///
    /// Returns the number of pivots.
    pub fn reduce_augmented(&mut self) -> u32 {
        let mut r = 0;

        for j in 0..self.ncols - 1 {
            if r == self.nrows {
                debug!(column = j, "no rows left for pivoting");
                break;
            }

            let mut k = r;
            let mut highest = self[(r, j)].abs();
            for i in r + 1..self.nrows {
                let value = self[(i, j)].abs();
                if value > highest {
                    highest = value;
                    k = i;
                }
            }

            if highest.is_zero() {
                debug!(column = j, "no pivot found");
                continue;
            }

            let pivot = self[(k, j)].clone();
            for c in 0..self.ncols {
                self[(k, c)] /= &pivot;
            }

            if k != r {
                self.swap_rows(k, r);
            }
            debug!(column = j, row = r, from = k, "pivot {}", pivot);

            for i in 0..self.nrows {
                if i == r || self[(i, j)].is_zero() {
                    continue;
                }

                let factor = self[(i, j)].clone();
                for c in 0..self.ncols {
                    let t = Rational::mul(&self[(r, c)], &factor);
                    self[(i, c)] -= &t;
                }
            }

            r += 1;
        }

        r
    }

    fn swap_rows(&mut self, a: u32, b: u32) {
        let ncols = self.ncols as usize;
        for c in 0..ncols {
            self.data
                .swap(a as usize * ncols + c, b as usize * ncols + c);
        }
    }
}

#[cfg(test)]
mod test {
    use rug::Integer;

    use crate::{
        domains::rational::{Rational, Q},
        error::{Error, ErrorKind},
        tensors::matrix::Matrix,
    };

    use super::{gaussian_eliminate, Entry};

    fn r(n: i64, d: i64) -> Rational {
        Rational::new(n, d).unwrap()
    }

    fn rows(input: &[&[i64]]) -> Vec<Vec<Entry>> {
        input
            .iter()
            .map(|row| row.iter().map(|&x| Entry::from(x)).collect())
            .collect()
    }

    #[test]
    fn solve_two_by_two() {
        let m = gaussian_eliminate(&rows(&[&[1, 2, 5], &[3, 4, 6]])).unwrap();

        assert_eq!(m.get_row(1).unwrap(), &[r(1, 1), r(0, 1), r(-4, 1)]);
        assert_eq!(m.get_row(2).unwrap(), &[r(0, 1), r(1, 1), r(9, 2)]);
        assert_eq!(m.solution(), vec![r(-4, 1), r(9, 2)]);
    }

    #[test]
    fn pivot_selection() {
        // the pivot of the first column is the 4 in the last row
        let mut m = Matrix::from_nested_vec(
            vec![
                vec![r(1, 1), r(1, 1), r(1, 1), r(6, 1)],
                vec![r(2, 1), r(-1, 1), r(0, 1), r(0, 1)],
                vec![r(-4, 1), r(0, 1), r(1, 1), r(-1, 1)],
            ],
            Q,
        )
        .unwrap();
        assert_eq!(m.reduce_augmented(), 3);
        assert_eq!(m.get_column(4).unwrap(), vec![r(1, 1), r(2, 1), r(3, 1)]);

        // on a tie the first row wins
        let m = gaussian_eliminate(&rows(&[&[-2, 2, 1], &[2, -2, 3]])).unwrap();
        assert_eq!(m.get_row(1).unwrap(), &[r(1, 1), r(-1, 1), r(-1, 2)]);
        assert_eq!(m.get_row(2).unwrap(), &[r(0, 1), r(0, 1), r(4, 1)]);
    }

    #[test]
    fn singular_system() {
        let mut m = Matrix::from_nested_vec(
            vec![
                vec![r(1, 1), r(2, 1), r(3, 1)],
                vec![r(2, 1), r(4, 1), r(6, 1)],
            ],
            Q,
        )
        .unwrap();

        assert_eq!(m.reduce_augmented(), 1);
        assert_eq!(m.get_row(1).unwrap(), &[r(1, 1), r(2, 1), r(3, 1)]);
        assert!(m.get_row(2).unwrap().iter().all(|e| e.is_zero()));

        let zero_column = gaussian_eliminate(&rows(&[&[0, 2, 4], &[0, 1, 3]])).unwrap();
        assert_eq!(zero_column.get_row(1).unwrap(), &[r(0, 1), r(1, 1), r(2, 1)]);
        assert_eq!(zero_column.get_row(2).unwrap(), &[r(0, 1), r(0, 1), r(1, 1)]);
    }

    #[test]
    fn early_stop() {
        // one row cannot hold more than one pivot
        let m = gaussian_eliminate(&rows(&[&[2, 4, 6, 8]])).unwrap();
        assert_eq!(m.get_row(1).unwrap(), &[r(1, 1), r(2, 1), r(3, 1), r(4, 1)]);
    }

    #[test]
    fn mixed_entries() {
        let input = vec![
            vec![Entry::from("1/2"), Entry::from(0.5), Entry::from(1)],
            vec![
                Entry::from(" -1 / 4 "),
                Entry::from(Integer::from(1)),
                Entry::from(r(1, 3)),
            ],
        ];
        let m = gaussian_eliminate(&input).unwrap();

        // x/2 + y/2 = 1, -x/4 + y = 1/3
        assert_eq!(m.solution(), vec![r(4, 3), r(2, 3)]);
        assert_eq!(input[0][0], Entry::Fraction("1/2".to_string()));
    }

    #[test]
    fn invalid_input() {
        assert_eq!(gaussian_eliminate(&[]), Err(Error::EmptyMatrix));
        assert_eq!(
            gaussian_eliminate(&[vec![]]).unwrap_err().kind(),
            ErrorKind::Domain
        );
        assert_eq!(
            gaussian_eliminate(&rows(&[&[1, 2, 3], &[1, 2]])),
            Err(Error::RaggedRows {
                row: 2,
                expected: 3,
                found: 2
            })
        );
        assert_eq!(
            gaussian_eliminate(&[vec![Entry::from("1.5"), Entry::from(1)]])
                .unwrap_err()
                .kind(),
            ErrorKind::Format
        );
        assert_eq!(
            gaussian_eliminate(&[vec![Entry::from("1/0"), Entry::from(1)]]),
            Err(Error::ZeroDenominator)
        );
        assert_eq!(
            gaussian_eliminate(&[vec![Entry::from(f64::INFINITY), Entry::from(1)]])
                .unwrap_err()
                .kind(),
            ErrorKind::TypeMismatch
        );
    }

    #[test]
    fn idempotent() {
        let m = gaussian_eliminate(&rows(&[&[2, 1, -1, 8], &[-3, -1, 2, -11], &[-2, 1, 2, -3]]))
            .unwrap();
        assert_eq!(m.solution(), vec![r(2, 1), r(3, 1), r(-1, 1)]);

        let again = m.gaussian_eliminate();
        assert_eq!(again, m);
    }
}
