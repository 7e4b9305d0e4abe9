//! Errors raised by rational arithmetic and matrix operations.
//!
//! Every error is a contract violation by the caller and is returned at the point
//! where it is detected. Use [Error::kind] to classify an error.

use std::fmt::{self, Display, Formatter};

/// The broad category of an [Error].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Structurally invalid input, such as a zero denominator or ragged rows.
    Domain,
    /// An operand with an unsupported shape or value, such as a singular matrix.
    TypeMismatch,
    /// An index outside of the bounds of a matrix.
    Range,
    /// A string that could not be parsed.
    Format,
}

/// The matrix axis an index refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    Row,
    Column,
}

impl Display for Axis {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Axis::Row => f.write_str("row"),
            Axis::Column => f.write_str("column"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Error {
    ZeroDenominator,
    InvalidDimensions {
        nrows: u32,
        ncols: u32,
    },
    EmptyMatrix,
    DataLength {
        expected: usize,
        found: usize,
    },
    RaggedRows {
        row: u32,
        expected: u32,
        found: u32,
    },
    LengthMismatch {
        axis: Axis,
        expected: u32,
        found: u32,
    },
    IndexOutOfRange {
        axis: Axis,
        index: u32,
        bound: u32,
    },
    ShapeMismatch {
        lhs: (u32, u32),
        rhs: (u32, u32),
    },
    NotSquare,
    Singular,
    NotVector,
    InvalidFraction(String),
    NonFiniteFloat(String),
    ExponentTooLarge(i64),
}

impl Error {
    /// Get the category of the error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::ZeroDenominator
            | Error::InvalidDimensions { .. }
            | Error::EmptyMatrix
            | Error::DataLength { .. }
            | Error::RaggedRows { .. }
            | Error::LengthMismatch { .. }
            | Error::ExponentTooLarge(_) => ErrorKind::Domain,
            Error::ShapeMismatch { .. }
            | Error::NotSquare
            | Error::Singular
            | Error::NotVector
            | Error::NonFiniteFloat(_) => ErrorKind::TypeMismatch,
            Error::IndexOutOfRange { .. } => ErrorKind::Range,
            Error::InvalidFraction(_) => ErrorKind::Format,
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Error::ZeroDenominator => write!(f, "The denominator cannot be zero"),
            Error::InvalidDimensions { nrows, ncols } => write!(
                f,
                "Matrix dimensions must be strictly positive: ({},{})",
                nrows, ncols
            ),
            Error::EmptyMatrix => write!(f, "The matrix has no rows"),
            Error::DataLength { expected, found } => write!(
                f,
                "Data length does not match matrix dimensions: {} vs {}",
                found, expected
            ),
            Error::RaggedRows {
                row,
                expected,
                found,
            } => write!(
                f,
                "Row {} has {} entries instead of {}",
                row, found, expected
            ),
            Error::LengthMismatch {
                axis,
                expected,
                found,
            } => write!(
                f,
                "Cannot set a {} of length {} with {} values",
                axis, expected, found
            ),
            Error::IndexOutOfRange { axis, index, bound } => write!(
                f,
                "The {} index {} is not between 1 and {}",
                axis, index, bound
            ),
            Error::ShapeMismatch { lhs, rhs } => write!(
                f,
                "Incompatible matrix dimensions: ({},{}) vs ({},{})",
                lhs.0, lhs.1, rhs.0, rhs.1
            ),
            Error::NotSquare => write!(f, "The matrix is not square"),
            Error::Singular => write!(f, "The matrix is singular"),
            Error::NotVector => write!(
                f,
                "The dot product requires two row or two column matrices"
            ),
            Error::InvalidFraction(s) => {
                write!(f, "Expected an integer fraction such as 3/4, got '{}'", s)
            }
            Error::NonFiniteFloat(s) => {
                write!(f, "Cannot represent {} as a rational number", s)
            }
            Error::ExponentTooLarge(e) => write!(f, "The exponent {} is too large", e),
        }
    }
}

impl std::error::Error for Error {}
