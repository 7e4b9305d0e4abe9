//! Rendering of numbers and matrices.
//!
//! All printing is controlled by [PrintOptions]. The `Display` implementations of the
//! number and matrix types use [PrintOptions::default], and the `{:#}` flag switches
//! off digit grouping.

use std::fmt::{self, Write};

use rug::Integer;
use smartstring::alias::String as SmartString;

use crate::{
    domains::Ring,
    tensors::{augmented::AugmentedMatrix, matrix::Matrix},
};

/// Various options for printing numbers and matrices.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct PrintOptions {
    /// The character inserted between groups of three digits, if any.
    pub number_thousands_separator: Option<char>,
    /// The number of spaces added to the widest cell of an augmented matrix.
    pub column_padding: usize,
    /// The character that separates the right-hand side of an augmented matrix.
    pub augmented_separator: char,
}

impl PrintOptions {
    pub const fn new() -> Self {
        Self {
            number_thousands_separator: Some(','),
            column_padding: 2,
            augmented_separator: '|',
        }
    }

    /// Print numbers without digit grouping.
    pub const fn plain() -> Self {
        Self {
            number_thousands_separator: None,
            ..Self::new()
        }
    }

    pub fn update_with_fmt(mut self, f: &fmt::Formatter) -> Self {
        if f.alternate() {
            self.number_thousands_separator = None;
        }
        self
    }
}

impl Default for PrintOptions {
    fn default() -> Self {
        Self::new()
    }
}

/// Write the decimal representation of `n`, grouping digits by three
/// when a separator is set.
pub(crate) fn format_integer<W: Write>(n: &Integer, opts: &PrintOptions, f: &mut W) -> fmt::Result {
    let Some(separator) = opts.number_thousands_separator else {
        return write!(f, "{}", n);
    };

    let s = n.to_string();
    let digits = match s.strip_prefix('-') {
        Some(d) => {
            f.write_char('-')?;
            d
        }
        None => s.as_str(),
    };

    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            f.write_char(separator)?;
        }
        f.write_char(c)?;
    }

    Ok(())
}

/// Prints a matrix as one parenthesized line per row.
pub struct MatrixPrinter<'a, F: Ring> {
    pub matrix: &'a Matrix<F>,
    pub opts: PrintOptions,
}

impl<'a, F: Ring> MatrixPrinter<'a, F> {
    pub fn new(matrix: &'a Matrix<F>) -> MatrixPrinter<'a, F> {
        MatrixPrinter {
            matrix,
            opts: PrintOptions::default(),
        }
    }
}

impl<'a, F: Ring> fmt::Display for MatrixPrinter<'a, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let opts = self.opts.update_with_fmt(f);
        let field = self.matrix.field();

        for (ri, row) in self.matrix.row_iter().enumerate() {
            if ri > 0 {
                f.write_char('\n')?;
            }

            f.write_char('(')?;
            for (ci, e) in row.iter().enumerate() {
                if ci > 0 {
                    f.write_str("  ")?;
                }
                field.format(e, &opts, f)?;
            }
            f.write_char(')')?;
        }

        Ok(())
    }
}

/// Prints an augmented matrix with aligned columns and the right-hand side
/// separated from the coefficients.
pub struct AugmentedMatrixPrinter<'a> {
    pub matrix: &'a AugmentedMatrix,
    pub opts: PrintOptions,
}

impl<'a> AugmentedMatrixPrinter<'a> {
    pub fn new(matrix: &'a AugmentedMatrix) -> AugmentedMatrixPrinter<'a> {
        AugmentedMatrixPrinter {
            matrix,
            opts: PrintOptions::default(),
        }
    }
}

impl<'a> fmt::Display for AugmentedMatrixPrinter<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let opts = self.opts.update_with_fmt(f);
        let field = self.matrix.field();

        let mut cells = Vec::with_capacity(self.matrix.len());
        for e in self.matrix.row_iter().flatten() {
            let mut s = SmartString::new();
            field.format(e, &opts, &mut s)?;
            cells.push(s);
        }

        let width = cells
            .iter()
            .map(|s| s.chars().count())
            .max()
            .unwrap_or(0)
            .max(1)
            + opts.column_padding;

        for (ri, row) in cells.chunks(self.matrix.ncols()).enumerate() {
            if ri > 0 {
                f.write_char('\n')?;
            }

            f.write_char('(')?;
            let (last, coefficients) = match row.split_last() {
                Some(x) => x,
                None => continue,
            };
            for c in coefficients {
                f.write_str(c)?;
                write_spaces(f, width - c.chars().count())?;
            }
            f.write_char(opts.augmented_separator)?;
            write_spaces(f, width - last.chars().count())?;
            f.write_str(last)?;
            f.write_char(')')?;
        }

        Ok(())
    }
}

fn write_spaces<W: Write>(f: &mut W, n: usize) -> fmt::Result {
    for _ in 0..n {
        f.write_char(' ')?;
    }
    Ok(())
}

#[cfg(test)]
mod test {
    use rug::Integer;

    use super::{format_integer, PrintOptions};

    fn grouped(n: i64) -> String {
        let mut s = String::new();
        format_integer(&Integer::from(n), &PrintOptions::new(), &mut s).unwrap();
        s
    }

    #[test]
    fn digit_grouping() {
        assert_eq!(grouped(0), "0");
        assert_eq!(grouped(999), "999");
        assert_eq!(grouped(1000), "1,000");
        assert_eq!(grouped(-1234567), "-1,234,567");
        assert_eq!(grouped(123456), "123,456");
    }

    #[test]
    fn custom_separator() {
        let opts = PrintOptions {
            number_thousands_separator: Some('_'),
            ..PrintOptions::new()
        };
        let mut s = String::new();
        format_integer(&Integer::from(-98765), &opts, &mut s).unwrap();
        assert_eq!(s, "-98_765");

        let mut s = String::new();
        format_integer(&Integer::from(98765), &PrintOptions::plain(), &mut s).unwrap();
        assert_eq!(s, "98765");
    }
}
