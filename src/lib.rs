//! Fracmat provides exact rational arithmetic and dense matrices over the rationals.
//!
//! Numbers are never rounded: every [Rational](domains::rational::Rational) is an
//! always-reduced fraction of two arbitrary-precision integers. On top of that,
//! [Matrix](tensors::matrix::Matrix) offers determinants, inverses and powers, and
//! [gaussian_eliminate](tensors::elimination::gaussian_eliminate) solves linear systems
//! by Gaussian elimination with partial pivoting.
//!
//! For example:
//!
//! ```
//! use fracmat::tensors::elimination::{gaussian_eliminate, Entry};
//!
//! // x + 2y = 5, 3x + 4y = 6
//! let system = vec![
//!     vec![Entry::from(1), Entry::from(2), Entry::from(5)],
//!     vec![Entry::from(3), Entry::from(4), Entry::from(6)],
//! ];
//!
//! let reduced = gaussian_eliminate(&system).unwrap();
//! println!("{}", reduced);
//! assert_eq!(reduced.solution()[1].to_string(), "9/2");
//! ```
//!
//! The library emits `tracing` events at the debug level, but never installs a subscriber.

pub mod domains;
pub mod error;
pub mod printer;
#[cfg(test)]
mod proptests;
pub mod tensors;

pub use error::{Error, ErrorKind};
