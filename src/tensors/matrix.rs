use std::{
    fmt::Display,
    ops::{Add, Index, IndexMut, Mul, Neg, Sub},
    slice::Chunks,
};

use ahash::AHashMap;
use smallvec::SmallVec;
use tracing::{debug, instrument};

use crate::{
    domains::{
        rational::{Rational, RationalField, Q},
        Ring, ToRational,
    },
    error::{Axis, Error},
    printer::MatrixPrinter,
};

/// A set of column indices, used as the key of the determinant cache.
type ColumnSet = SmallVec<[u32; 8]>;

/// A dense matrix with entries that are elements of a ring `F`.
/// A vector is represented as a matrix with one row or one column.
///
/// The shape of a matrix is fixed at construction and both dimensions are
/// strictly positive. The checked accessors such as [Matrix::get_value] are
/// 1-indexed, whereas indexing with `m[(i, j)]` is 0-indexed and unchecked.
#[derive(Clone, Hash, PartialEq, Eq, Debug)]
pub struct Matrix<F: Ring> {
    pub(crate) data: SmallVec<[F::Element; 16]>,
    pub(crate) nrows: u32,
    pub(crate) ncols: u32,
    pub(crate) field: F,
}

impl<F: Ring> Matrix<F> {
    fn check_dimensions(nrows: u32, ncols: u32) -> Result<(), Error> {
        if nrows == 0 || ncols == 0 {
            Err(Error::InvalidDimensions { nrows, ncols })
        } else {
            Ok(())
        }
    }

    pub(crate) fn zeroed(nrows: u32, ncols: u32, field: F) -> Matrix<F> {
        Matrix {
            data: (0..nrows as usize * ncols as usize)
                .map(|_| field.zero())
                .collect(),
            nrows,
            ncols,
            field,
        }
    }

    fn unit(n: u32, field: F) -> Matrix<F> {
        Matrix {
            data: (0..n as usize * n as usize)
                .map(|i| {
                    if i % n as usize == i / n as usize {
                        field.one()
                    } else {
                        field.zero()
                    }
                })
                .collect(),
            nrows: n,
            ncols: n,
            field,
        }
    }

    /// Create a new zeroed matrix with `nrows` rows and `ncols` columns.
    pub fn new(nrows: u32, ncols: u32, field: F) -> Result<Matrix<F>, Error> {
        Self::check_dimensions(nrows, ncols)?;
        Ok(Matrix::zeroed(nrows, ncols, field))
    }

    /// Create a new zeroed square matrix of dimension `n`.
    pub fn square(n: u32, field: F) -> Result<Matrix<F>, Error> {
        Matrix::new(n, n, field)
    }

    /// Create a new square matrix with `n` rows and ones on the main diagonal and zeroes elsewhere.
    pub fn identity(n: u32, field: F) -> Result<Matrix<F>, Error> {
        Self::check_dimensions(n, n)?;
        Ok(Matrix::unit(n, field))
    }

    /// Convert a row-major linear representation of a matrix to a `Matrix`.
    pub fn from_linear(
        data: Vec<F::Element>,
        nrows: u32,
        ncols: u32,
        field: F,
    ) -> Result<Matrix<F>, Error> {
        Self::check_dimensions(nrows, ncols)?;

        let expected = nrows as usize * ncols as usize;
        if data.len() != expected {
            return Err(Error::DataLength {
                expected,
                found: data.len(),
            });
        }

        Ok(Matrix {
            data: SmallVec::from_vec(data),
            nrows,
            ncols,
            field,
        })
    }

    /// Create a new matrix from a list of rows. Every row must have the same length.
    pub fn from_nested_vec(matrix: Vec<Vec<F::Element>>, field: F) -> Result<Matrix<F>, Error> {
        let nrows = matrix.len() as u32;
        let ncols = match matrix.first() {
            Some(r) => r.len() as u32,
            None => return Err(Error::EmptyMatrix),
        };
        Self::check_dimensions(nrows, ncols)?;

        let mut data = SmallVec::with_capacity(nrows as usize * ncols as usize);
        for (i, row) in matrix.into_iter().enumerate() {
            if row.len() != ncols as usize {
                return Err(Error::RaggedRows {
                    row: i as u32 + 1,
                    expected: ncols,
                    found: row.len() as u32,
                });
            }

            data.extend(row);
        }

        Ok(Matrix {
            data,
            nrows,
            ncols,
            field,
        })
    }

    /// Create a matrix with a single row.
    pub fn row(values: Vec<F::Element>, field: F) -> Result<Matrix<F>, Error> {
        let ncols = values.len() as u32;
        Matrix::from_linear(values, 1, ncols, field)
    }

    /// Create a matrix with a single column.
    pub fn column(values: Vec<F::Element>, field: F) -> Result<Matrix<F>, Error> {
        let nrows = values.len() as u32;
        Matrix::from_linear(values, nrows, 1, field)
    }

    /// Return the number of rows.
    pub fn nrows(&self) -> usize {
        self.nrows as usize
    }

    /// Return the number of columns.
    pub fn ncols(&self) -> usize {
        self.ncols as usize
    }

    /// Return the number of entries.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Return the field of the matrix entries.
    pub fn field(&self) -> &F {
        &self.field
    }

    /// Return an iterator over the rows of the matrix.
    pub fn row_iter(&self) -> Chunks<'_, F::Element> {
        self.data.chunks(self.ncols as usize)
    }

    pub fn is_square(&self) -> bool {
        self.nrows == self.ncols
    }

    pub fn is_row(&self) -> bool {
        self.nrows == 1
    }

    pub fn is_column(&self) -> bool {
        self.ncols == 1
    }

    fn check_row(&self, row: u32) -> Result<u32, Error> {
        if row == 0 || row > self.nrows {
            Err(Error::IndexOutOfRange {
                axis: Axis::Row,
                index: row,
                bound: self.nrows,
            })
        } else {
            Ok(row - 1)
        }
    }

    fn check_column(&self, column: u32) -> Result<u32, Error> {
        if column == 0 || column > self.ncols {
            Err(Error::IndexOutOfRange {
                axis: Axis::Column,
                index: column,
                bound: self.ncols,
            })
        } else {
            Ok(column - 1)
        }
    }

    /// Get the entry in row `row` and column `column`, counting from 1.
    pub fn get_value(&self, row: u32, column: u32) -> Result<&F::Element, Error> {
        let (i, j) = (self.check_row(row)?, self.check_column(column)?);
        Ok(&self[(i, j)])
    }

    /// Set the entry in row `row` and column `column`, counting from 1.
    pub fn set_value(&mut self, row: u32, column: u32, value: F::Element) -> Result<(), Error> {
        let (i, j) = (self.check_row(row)?, self.check_column(column)?);
        self[(i, j)] = value;
        Ok(())
    }

    /// Get row `row`, counting from 1.
    pub fn get_row(&self, row: u32) -> Result<&[F::Element], Error> {
        let i = self.check_row(row)?;
        Ok(&self[i])
    }

    /// Replace row `row`, counting from 1, by `values`.
    pub fn set_row(&mut self, row: u32, values: &[F::Element]) -> Result<(), Error> {
        let i = self.check_row(row)?;
        if values.len() != self.ncols as usize {
            return Err(Error::LengthMismatch {
                axis: Axis::Row,
                expected: self.ncols,
                found: values.len() as u32,
            });
        }

        let start = i as usize * self.ncols as usize;
        self.data[start..start + values.len()].clone_from_slice(values);
        Ok(())
    }

    /// Get column `column`, counting from 1.
    pub fn get_column(&self, column: u32) -> Result<Vec<F::Element>, Error> {
        let j = self.check_column(column)?;
        Ok((0..self.nrows).map(|i| self[(i, j)].clone()).collect())
    }

    /// Replace column `column`, counting from 1, by `values`.
    pub fn set_column(&mut self, column: u32, values: &[F::Element]) -> Result<(), Error> {
        let j = self.check_column(column)?;
        if values.len() != self.nrows as usize {
            return Err(Error::LengthMismatch {
                axis: Axis::Column,
                expected: self.nrows,
                found: values.len() as u32,
            });
        }

        for (i, v) in values.iter().enumerate() {
            self[(i as u32, j)] = v.clone();
        }
        Ok(())
    }

    /// Return the columns of the matrix as a list of rows.
    pub fn columns(&self) -> Vec<Vec<F::Element>> {
        (0..self.ncols)
            .map(|j| (0..self.nrows).map(|i| self[(i, j)].clone()).collect())
            .collect()
    }

    /// Return true iff every entry in the matrix is zero.
    pub fn is_null(&self) -> bool {
        self.data.iter().all(|e| F::is_zero(e))
    }

    /// Return true iff the matrix is square and every entry is zero.
    pub fn is_square_null(&self) -> bool {
        self.is_square() && self.is_null()
    }

    /// Return true iff the matrix is square with ones on the main diagonal and zeroes elsewhere.
    pub fn is_identity(&self) -> bool {
        self.is_square()
            && self.data.iter().enumerate().all(|(i, e)| {
                if i as u32 % self.ncols == i as u32 / self.ncols {
                    self.field.is_one(e)
                } else {
                    F::is_zero(e)
                }
            })
    }

    /// Set all entries to zero.
    pub fn reset(&mut self) {
        for e in &mut self.data {
            *e = self.field.zero();
        }
    }

    /// Turn a square matrix into the identity matrix.
    pub fn set_identity(&mut self) -> Result<(), Error> {
        if !self.is_square() {
            return Err(Error::NotSquare);
        }

        *self = Matrix::unit(self.nrows, self.field.clone());
        Ok(())
    }

    /// Compute the sum of the entries on the main diagonal of a square matrix.
    pub fn trace(&self) -> Result<F::Element, Error> {
        if !self.is_square() {
            return Err(Error::NotSquare);
        }

        let mut sum = self.field.zero();
        for i in 0..self.nrows {
            self.field.add_assign(&mut sum, &self[(i, i)]);
        }
        Ok(sum)
    }

    /// Transpose the matrix.
    pub fn transpose(&self) -> Matrix<F> {
        let mut m = Matrix::zeroed(self.ncols, self.nrows, self.field.clone());
        for i in 0..self.nrows {
            for j in 0..self.ncols {
                m[(j, i)] = self[(i, j)].clone();
            }
        }
        m
    }

    /// Multiply the scalar `e` to each entry of the matrix.
    pub fn mul_scalar(&self, e: &F::Element) -> Matrix<F> {
        Matrix {
            data: self.data.iter().map(|ee| self.field.mul(ee, e)).collect(),
            nrows: self.nrows,
            ncols: self.ncols,
            field: self.field.clone(),
        }
    }

    /// Apply a function `f` to each entry of the matrix.
    pub fn map<G: Ring>(&self, f: impl Fn(&F::Element) -> G::Element, field: G) -> Matrix<G> {
        Matrix {
            data: self.data.iter().map(f).collect(),
            nrows: self.nrows,
            ncols: self.ncols,
            field,
        }
    }

    fn check_same_shape(&self, rhs: &Matrix<F>) -> Result<(), Error> {
        if self.nrows != rhs.nrows || self.ncols != rhs.ncols {
            Err(Error::ShapeMismatch {
                lhs: (self.nrows, self.ncols),
                rhs: (rhs.nrows, rhs.ncols),
            })
        } else {
            Ok(())
        }
    }

    /// Add two matrices of the same shape.
    pub fn add(&self, rhs: &Matrix<F>) -> Result<Matrix<F>, Error> {
        self.check_same_shape(rhs)?;

        Ok(Matrix {
            data: self
                .data
                .iter()
                .zip(&rhs.data)
                .map(|(a, b)| self.field.add(a, b))
                .collect(),
            nrows: self.nrows,
            ncols: self.ncols,
            field: self.field.clone(),
        })
    }

    /// Subtract two matrices of the same shape.
    pub fn sub(&self, rhs: &Matrix<F>) -> Result<Matrix<F>, Error> {
        self.check_same_shape(rhs)?;

        Ok(Matrix {
            data: self
                .data
                .iter()
                .zip(&rhs.data)
                .map(|(a, b)| self.field.sub(a, b))
                .collect(),
            nrows: self.nrows,
            ncols: self.ncols,
            field: self.field.clone(),
        })
    }

    /// Multiply two matrices. The number of columns of `self` must
    /// equal the number of rows of `rhs`.
    pub fn mul(&self, rhs: &Matrix<F>) -> Result<Matrix<F>, Error> {
        if self.ncols != rhs.nrows {
            return Err(Error::ShapeMismatch {
                lhs: (self.nrows, self.ncols),
                rhs: (rhs.nrows, rhs.ncols),
            });
        }

        Ok(self.product(rhs))
    }

    /// Matrix product of two matrices with compatible dimensions.
    fn product(&self, rhs: &Matrix<F>) -> Matrix<F> {
        let mut m = Matrix::zeroed(self.nrows, rhs.ncols, self.field.clone());

        for i in 0..self.nrows {
            for j in 0..rhs.ncols {
                let sum = &mut m[(i, j)];
                for k in 0..self.ncols {
                    self.field.add_mul_assign(sum, &self[(i, k)], &rhs[(k, j)]);
                }
            }
        }

        m
    }

    /// Raise a square matrix to the power `e`. The zeroth power is the identity matrix.
    pub fn pow(&self, e: u64) -> Result<Matrix<F>, Error> {
        if !self.is_square() {
            return Err(Error::NotSquare);
        }

        let mut result = Matrix::unit(self.nrows, self.field.clone());
        let mut base = self.clone();
        let mut e = e;
        while e > 0 {
            if e & 1 == 1 {
                result = result.product(&base);
            }
            e >>= 1;
            if e > 0 {
                base = base.product(&base);
            }
        }

        Ok(result)
    }

    /// Compute the dot product of two row matrices or two column matrices.
    pub fn dot(&self, rhs: &Matrix<F>) -> Result<F::Element, Error> {
        let m = if self.is_row() && rhs.is_row() {
            self.mul(&rhs.transpose())?
        } else if self.is_column() && rhs.is_column() {
            self.transpose().mul(rhs)?
        } else {
            return Err(Error::NotVector);
        };

        Ok(m[(0, 0)].clone())
    }

    /// Compute the determinant of a square matrix by cofactor expansion along the first row.
    ///
    /// The determinants of the minors are cached on the set of remaining columns,
    /// so that each minor is only expanded once.
    #[instrument(level = "debug", skip(self), fields(n = self.nrows))]
    pub fn det(&self) -> Result<F::Element, Error> {
        if !self.is_square() {
            return Err(Error::NotSquare);
        }

        let columns: ColumnSet = (0..self.ncols).collect();
        let mut cache = AHashMap::default();
        let d = self.minor_det(0, &columns, &mut cache);
        debug!(minors = cache.len(), "determinant computed");
        Ok(d)
    }

    /// Determinant of the minor made of the rows from `row` onwards and the given `columns`.
    fn minor_det(
        &self,
        row: u32,
        columns: &[u32],
        cache: &mut AHashMap<ColumnSet, F::Element>,
    ) -> F::Element {
        if columns.len() == 1 {
            return self[(row, columns[0])].clone();
        }

        if let Some(d) = cache.get(columns) {
            return d.clone();
        }

        let mut det = self.field.zero();
        let mut minor = ColumnSet::with_capacity(columns.len() - 1);
        for (i, &c) in columns.iter().enumerate() {
            let e = &self[(row, c)];
            if F::is_zero(e) {
                continue;
            }

            minor.clear();
            minor.extend(columns.iter().copied().filter(|&x| x != c));
            let sub = self.minor_det(row + 1, &minor, cache);

            if i % 2 == 0 {
                self.field.add_mul_assign(&mut det, e, &sub);
            } else {
                self.field.sub_mul_assign(&mut det, e, &sub);
            }
        }

        cache.insert(columns.iter().copied().collect(), det.clone());
        det
    }

    /// Return true iff the matrix is square and has a non-zero determinant.
    pub fn is_invertible(&self) -> bool {
        matches!(self.det(), Ok(d) if !F::is_zero(&d))
    }
}

impl<F: ToRational> Matrix<F> {
    /// Convert every entry to a rational number.
    pub fn to_rational(&self) -> Matrix<RationalField> {
        self.map(|e| self.field.to_rational(e), Q)
    }

    /// Compute the inverse of a square matrix over the rational numbers.
    ///
    /// Column `i` of the inverse is the solution of the system `A x = e_i`, where
    /// `e_i` is the `i`th standard basis vector, obtained by a separate row reduction
    /// of `[A | e_i]` for every `i`.
    #[instrument(level = "debug", skip(self), fields(n = self.nrows))]
    pub fn inv(&self) -> Result<Matrix<RationalField>, Error> {
        if !self.is_square() {
            return Err(Error::NotSquare);
        }

        let a = self.to_rational();
        if a.det()?.is_zero() {
            return Err(Error::Singular);
        }

        let n = self.nrows;
        let mut inverse = Matrix::zeroed(n, n, Q);
        let mut system = Matrix::zeroed(n, n + 1, Q);
        for i in 0..n {
            for r in 0..n {
                for c in 0..n {
                    system[(r, c)] = a[(r, c)].clone();
                }
                system[(r, n)] = if r == i {
                    Rational::one()
                } else {
                    Rational::zero()
                };
            }

            system.reduce_augmented();

            for r in 0..n {
                inverse[(r, i)] = std::mem::take(&mut system[(r, n)]);
            }
        }

        Ok(inverse)
    }
}

impl Matrix<RationalField> {
    /// Raise a square matrix to the power `e`. A negative power raises the inverse
    /// to the power `|e|`.
    pub fn powi(&self, e: i64) -> Result<Matrix<RationalField>, Error> {
        if e < 0 {
            self.inv()?.pow(e.unsigned_abs())
        } else {
            self.pow(e as u64)
        }
    }

    /// Take the absolute value of each entry.
    pub fn abs(&self) -> Matrix<RationalField> {
        self.map(|e| e.abs(), Q)
    }
}

impl<F: Ring> Index<u32> for Matrix<F> {
    type Output = [F::Element];

    /// Get the `index`th row of the matrix, counting from 0.
    #[inline]
    fn index(&self, index: u32) -> &Self::Output {
        let ncols = self.ncols as usize;
        &self.data[index as usize * ncols..(index as usize + 1) * ncols]
    }
}

impl<F: Ring> Index<(u32, u32)> for Matrix<F> {
    type Output = F::Element;

    /// Get the `i`th row and `j`th column of the matrix, where `index=(i,j)`, counting from 0.
    #[inline]
    fn index(&self, index: (u32, u32)) -> &Self::Output {
        &self.data[index.0 as usize * self.ncols as usize + index.1 as usize]
    }
}

impl<F: Ring> IndexMut<(u32, u32)> for Matrix<F> {
    #[inline]
    fn index_mut(&mut self, index: (u32, u32)) -> &mut F::Element {
        &mut self.data[index.0 as usize * self.ncols as usize + index.1 as usize]
    }
}

impl<F: Ring> Display for Matrix<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        MatrixPrinter::new(self).fmt(f)
    }
}

impl<F: Ring> Add<&Matrix<F>> for &Matrix<F> {
    type Output = Matrix<F>;

    /// Add two matrices. Panics if the shapes differ.
    fn add(self, rhs: &Matrix<F>) -> Self::Output {
        match Matrix::add(self, rhs) {
            Ok(m) => m,
            Err(e) => panic!("Cannot add matrices: {}", e),
        }
    }
}

impl<F: Ring> Sub<&Matrix<F>> for &Matrix<F> {
    type Output = Matrix<F>;

    /// Subtract two matrices. Panics if the shapes differ.
    fn sub(self, rhs: &Matrix<F>) -> Self::Output {
        match Matrix::sub(self, rhs) {
            Ok(m) => m,
            Err(e) => panic!("Cannot subtract matrices: {}", e),
        }
    }
}

impl<F: Ring> Mul<&Matrix<F>> for &Matrix<F> {
    type Output = Matrix<F>;

    /// Multiply two matrices. Panics if the inner dimensions differ.
    fn mul(self, rhs: &Matrix<F>) -> Self::Output {
        match Matrix::mul(self, rhs) {
            Ok(m) => m,
            Err(e) => panic!("Cannot multiply matrices: {}", e),
        }
    }
}

impl<F: Ring> Neg for Matrix<F> {
    type Output = Matrix<F>;

    /// Negate each entry of the matrix.
    fn neg(mut self) -> Self::Output {
        for e in &mut self.data {
            *e = self.field.neg(e);
        }

        self
    }
}

impl<F: Ring> Neg for &Matrix<F> {
    type Output = Matrix<F>;

    fn neg(self) -> Self::Output {
        -self.clone()
    }
}
