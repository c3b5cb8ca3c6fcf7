//! Fixed-dimension vectors over one field.

use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Neg, Sub};

use nalgebra::{DVector, Vector3};

use super::error::AlgebraError;
use super::field::Field;
use super::format::{format_vector, NumberFormat};
use super::number::AlgebraicNumber;

/// Ordered tuple of numbers from a single field.
///
/// The ordering (`Ord`) is dimension first, then lexicographic by the
/// numbers' total order; it exists for map keys and stable output, not
/// geometry.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct AlgebraicVector {
    field: Field,
    coords: Vec<AlgebraicNumber>,
}

impl AlgebraicVector {
    /// Panics when a coordinate belongs to another field.
    pub fn new(field: Field, coords: Vec<AlgebraicNumber>) -> Self {
        assert!(
            coords.iter().all(|c| *c.field() == field),
            "vector coordinates must belong to {field}"
        );
        Self { field, coords }
    }

    #[inline]
    pub fn field(&self) -> &Field {
        &self.field
    }

    #[inline]
    pub fn dims(&self) -> usize {
        self.coords.len()
    }

    #[inline]
    pub fn coords(&self) -> &[AlgebraicNumber] {
        &self.coords
    }

    pub fn coord(&self, i: usize) -> Result<&AlgebraicNumber, AlgebraError> {
        self.coords.get(i).ok_or(AlgebraError::IndexOutOfRange {
            index: i,
            order: self.dims(),
        })
    }

    /// Exact zero test on every coordinate.
    pub fn is_origin(&self) -> bool {
        self.coords.iter().all(AlgebraicNumber::is_zero)
    }

    fn zip_with(&self, rhs: &Self, op: impl Fn(&AlgebraicNumber, &AlgebraicNumber) -> AlgebraicNumber) -> Self {
        assert_eq!(self.dims(), rhs.dims(), "vector dimension mismatch");
        let coords = self.coords.iter().zip(&rhs.coords).map(|(a, b)| op(a, b)).collect();
        Self::new(self.field.clone(), coords)
    }

    pub fn plus(&self, rhs: &Self) -> Self {
        self.zip_with(rhs, AlgebraicNumber::plus)
    }

    pub fn minus(&self, rhs: &Self) -> Self {
        self.zip_with(rhs, AlgebraicNumber::minus)
    }

    pub fn negate(&self) -> Self {
        Self::new(self.field.clone(), self.coords.iter().map(AlgebraicNumber::negate).collect())
    }

    pub fn scale(&self, k: &AlgebraicNumber) -> Self {
        Self::new(self.field.clone(), self.coords.iter().map(|c| c.times(k)).collect())
    }

    pub fn dot(&self, rhs: &Self) -> Result<AlgebraicNumber, AlgebraError> {
        if self.dims() != rhs.dims() {
            return Err(AlgebraError::DimensionMismatch {
                expected: self.dims(),
                found: rhs.dims(),
            });
        }
        Ok(self
            .coords
            .iter()
            .zip(&rhs.coords)
            .fold(self.field.zero(), |acc, (a, b)| acc.plus(&a.times(b))))
    }

    /// 3D cross product.
    pub fn cross(&self, rhs: &Self) -> Result<Self, AlgebraError> {
        for v in [self, rhs] {
            if v.dims() != 3 {
                return Err(AlgebraError::DimensionMismatch {
                    expected: 3,
                    found: v.dims(),
                });
            }
        }
        let (a, b) = (&self.coords, &rhs.coords);
        let coords = vec![
            a[1].times(&b[2]).minus(&a[2].times(&b[1])),
            a[2].times(&b[0]).minus(&a[0].times(&b[2])),
            a[0].times(&b[1]).minus(&a[1].times(&b[0])),
        ];
        Ok(Self::new(self.field.clone(), coords))
    }

    /// All coordinates evaluated to `f64`.
    pub fn to_real_vector(&self) -> DVector<f64> {
        DVector::from_iterator(self.dims(), self.coords.iter().map(AlgebraicNumber::evaluate))
    }

    /// First three coordinates as `f64`, zero padded; display only.
    pub fn to_3d_double_vector(&self) -> Vector3<f64> {
        let mut out = Vector3::zeros();
        for (slot, c) in out.iter_mut().zip(&self.coords) {
            *slot = c.evaluate();
        }
        out
    }

    pub fn to_string_format(&self, format: NumberFormat) -> String {
        format_vector(self, format)
    }
}

/// Exact parallel test: every 2×2 minor of the pair vanishes (the cross
/// product in 3D). The origin is parallel to everything; vectors of
/// different dimension never are.
pub fn are_parallel(u: &AlgebraicVector, v: &AlgebraicVector) -> bool {
    if u.dims() != v.dims() {
        return false;
    }
    let (a, b) = (u.coords(), v.coords());
    for i in 0..a.len() {
        for j in (i + 1)..a.len() {
            if a[i].times(&b[j]) != a[j].times(&b[i]) {
                return false;
            }
        }
    }
    true
}

impl PartialOrd for AlgebraicVector {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for AlgebraicVector {
    fn cmp(&self, other: &Self) -> Ordering {
        self.dims()
            .cmp(&other.dims())
            .then_with(|| self.coords.cmp(&other.coords))
    }
}

impl fmt::Display for AlgebraicVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_vector(self, NumberFormat::Default))
    }
}

impl fmt::Debug for AlgebraicVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AlgebraicVector({}: {})", self.field, self)
    }
}

impl Add for &AlgebraicVector {
    type Output = AlgebraicVector;
    fn add(self, rhs: &AlgebraicVector) -> AlgebraicVector {
        self.plus(rhs)
    }
}

impl Sub for &AlgebraicVector {
    type Output = AlgebraicVector;
    fn sub(self, rhs: &AlgebraicVector) -> AlgebraicVector {
        self.minus(rhs)
    }
}

impl Neg for &AlgebraicVector {
    type Output = AlgebraicVector;
    fn neg(self) -> AlgebraicVector {
        self.negate()
    }
}
