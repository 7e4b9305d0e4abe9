//! Dense matrices and exact linear algebra over the rational numbers.

pub mod augmented;
pub mod elimination;
pub mod matrix;
