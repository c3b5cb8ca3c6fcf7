//! Algebraic fields and exact linear algebra over them.
//!
//! Purpose
//! - Give geometric tools exact coordinates: every number is a rational
//!   combination of a field's basis (1, φ, ...) kept in one canonical form,
//!   so equality, hashing and set membership are exact.
//!
//! Layout
//! - `field`: the `AlgebraicField` capability trait and the shared `Field`
//!   handle (factory for numbers, vectors, matrices).
//! - `fields`: concrete variants (golden, √n, prime polygon, √φ).
//! - `number`, `vector`, `matrix`: values and their arithmetic.
//! - `format`: the four textual formats and their parsers.
//! - `nearest`: snapping real input onto the field's lattice.

mod error;
mod field;
mod fields;
mod format;
mod matrix;
mod nearest;
mod number;
mod vector;

pub use error::AlgebraError;
pub use field::{AlgebraicField, Bounds, Field};
pub use fields::{GoldenField, PolygonField, SqrtField, SqrtPhiField};
pub use format::NumberFormat;
pub use matrix::AlgebraicMatrix;
pub use nearest::NearestCfg;
pub use number::AlgebraicNumber;
pub use vector::{are_parallel, AlgebraicVector};

#[cfg(test)]
mod tests;
