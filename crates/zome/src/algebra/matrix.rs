//! Square matrices over one field.
//!
//! Used chiefly as the 3×3 orientation matrices of a symmetry group, but
//! any dimension is allowed. Elimination (determinant, inverse) runs in
//! exact field arithmetic, so singularity is decided exactly.

use std::fmt;

use nalgebra::{DMatrix, Matrix3};

use super::error::AlgebraError;
use super::field::Field;
use super::number::AlgebraicNumber;
use super::vector::AlgebraicVector;

#[derive(Clone, PartialEq, Eq, Hash)]
pub struct AlgebraicMatrix {
    field: Field,
    /// Row-major, `rows.len() == rows[i].len()`.
    rows: Vec<Vec<AlgebraicNumber>>,
}

impl AlgebraicMatrix {
    /// Square matrix from rows. Fails on empty or ragged input.
    pub fn from_rows(rows: Vec<Vec<AlgebraicNumber>>) -> Result<Self, AlgebraError> {
        let n = rows.len();
        let field = rows
            .first()
            .and_then(|r| r.first())
            .map(|x| x.field().clone())
            .ok_or(AlgebraError::DimensionMismatch {
                expected: 1,
                found: 0,
            })?;
        if let Some(bad) = rows.iter().find(|r| r.len() != n) {
            return Err(AlgebraError::DimensionMismatch {
                expected: n,
                found: bad.len(),
            });
        }
        assert!(
            rows.iter().flatten().all(|x| *x.field() == field),
            "matrix elements must belong to {field}"
        );
        Ok(Self { field, rows })
    }

    /// Matrix whose columns are the given vectors.
    pub fn from_columns(columns: &[AlgebraicVector]) -> Result<Self, AlgebraError> {
        let n = columns.len();
        let rows = (0..n)
            .map(|r| {
                columns
                    .iter()
                    .map(|c| c.coord(r).cloned())
                    .collect::<Result<Vec<_>, _>>()
            })
            .collect::<Result<Vec<_>, _>>()?;
        if let Some(bad) = columns.iter().find(|c| c.dims() != n) {
            return Err(AlgebraError::DimensionMismatch {
                expected: n,
                found: bad.dims(),
            });
        }
        Self::from_rows(rows)
    }

    pub fn identity(field: &Field, dims: usize) -> Self {
        let rows = (0..dims)
            .map(|r| {
                (0..dims)
                    .map(|c| if r == c { field.one() } else { field.zero() })
                    .collect()
            })
            .collect();
        Self {
            field: field.clone(),
            rows,
        }
    }

    #[inline]
    pub fn field(&self) -> &Field {
        &self.field
    }

    #[inline]
    pub fn dims(&self) -> usize {
        self.rows.len()
    }

    pub fn element(&self, row: usize, col: usize) -> Result<&AlgebraicNumber, AlgebraError> {
        let n = self.dims();
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .ok_or(AlgebraError::IndexOutOfRange {
                index: row.max(col),
                order: n,
            })
    }

    pub fn row(&self, r: usize) -> Result<AlgebraicVector, AlgebraError> {
        let row = self.rows.get(r).ok_or(AlgebraError::IndexOutOfRange {
            index: r,
            order: self.dims(),
        })?;
        Ok(AlgebraicVector::new(self.field.clone(), row.clone()))
    }

    pub fn column(&self, c: usize) -> Result<AlgebraicVector, AlgebraError> {
        if c >= self.dims() {
            return Err(AlgebraError::IndexOutOfRange {
                index: c,
                order: self.dims(),
            });
        }
        let coords = self.rows.iter().map(|r| r[c].clone()).collect();
        Ok(AlgebraicVector::new(self.field.clone(), coords))
    }

    /// `M · v` for a column vector `v`.
    pub fn times_column(&self, v: &AlgebraicVector) -> Result<AlgebraicVector, AlgebraError> {
        if v.dims() != self.dims() {
            return Err(AlgebraError::DimensionMismatch {
                expected: self.dims(),
                found: v.dims(),
            });
        }
        let coords = self
            .rows
            .iter()
            .map(|r| {
                r.iter()
                    .zip(v.coords())
                    .fold(self.field.zero(), |acc, (a, b)| acc.plus(&a.times(b)))
            })
            .collect();
        Ok(AlgebraicVector::new(self.field.clone(), coords))
    }

    /// Matrix product `self · rhs`.
    pub fn times(&self, rhs: &Self) -> Result<Self, AlgebraError> {
        let n = self.dims();
        if rhs.dims() != n {
            return Err(AlgebraError::DimensionMismatch {
                expected: n,
                found: rhs.dims(),
            });
        }
        let rows = (0..n)
            .map(|r| {
                (0..n)
                    .map(|c| {
                        (0..n).fold(self.field.zero(), |acc, k| {
                            acc.plus(&self.rows[r][k].times(&rhs.rows[k][c]))
                        })
                    })
                    .collect()
            })
            .collect();
        Ok(Self {
            field: self.field.clone(),
            rows,
        })
    }

    pub fn transpose(&self) -> Self {
        let n = self.dims();
        let rows = (0..n)
            .map(|r| (0..n).map(|c| self.rows[c][r].clone()).collect())
            .collect();
        Self {
            field: self.field.clone(),
            rows,
        }
    }

    pub fn negate(&self) -> Self {
        let rows = self
            .rows
            .iter()
            .map(|r| r.iter().map(AlgebraicNumber::negate).collect())
            .collect();
        Self {
            field: self.field.clone(),
            rows,
        }
    }

    pub fn scale(&self, k: &AlgebraicNumber) -> Self {
        let rows = self
            .rows
            .iter()
            .map(|r| r.iter().map(|x| x.times(k)).collect())
            .collect();
        Self {
            field: self.field.clone(),
            rows,
        }
    }

    /// Determinant by exact Gaussian elimination.
    pub fn determinant(&self) -> AlgebraicNumber {
        let mut m = self.rows.clone();
        let n = m.len();
        let mut det = self.field.one();
        for col in 0..n {
            let Some(pivot) = (col..n).find(|&r| !m[r][col].is_zero()) else {
                return self.field.zero();
            };
            if pivot != col {
                m.swap(col, pivot);
                det = det.negate();
            }
            det = det.times(&m[col][col]);
            let Ok(inv) = m[col][col].reciprocal() else {
                return self.field.zero();
            };
            for r in (col + 1)..n {
                if m[r][col].is_zero() {
                    continue;
                }
                let factor = m[r][col].times(&inv);
                for c in col..n {
                    let delta = factor.times(&m[col][c]);
                    m[r][c] = m[r][c].minus(&delta);
                }
            }
        }
        det
    }

    /// Exact inverse by Gauss–Jordan elimination.
    pub fn inverse(&self) -> Result<Self, AlgebraError> {
        let n = self.dims();
        let mut a = self.rows.clone();
        let mut inv = Self::identity(&self.field, n).rows;
        for col in 0..n {
            let pivot = (col..n)
                .find(|&r| !a[r][col].is_zero())
                .ok_or(AlgebraError::DivisionByZero)?;
            a.swap(col, pivot);
            inv.swap(col, pivot);
            let p = a[col][col].reciprocal()?;
            for c in 0..n {
                a[col][c] = a[col][c].times(&p);
                inv[col][c] = inv[col][c].times(&p);
            }
            for r in 0..n {
                if r == col || a[r][col].is_zero() {
                    continue;
                }
                let factor = a[r][col].clone();
                for c in 0..n {
                    let da = factor.times(&a[col][c]);
                    let di = factor.times(&inv[col][c]);
                    a[r][c] = a[r][c].minus(&da);
                    inv[r][c] = inv[r][c].minus(&di);
                }
            }
        }
        Ok(Self {
            field: self.field.clone(),
            rows: inv,
        })
    }

    pub fn to_real_matrix(&self) -> DMatrix<f64> {
        let n = self.dims();
        DMatrix::from_fn(n, n, |r, c| self.rows[r][c].evaluate())
    }

    /// 3×3 real approximation for geometric heuristics.
    pub fn to_real_matrix3(&self) -> Result<Matrix3<f64>, AlgebraError> {
        if self.dims() != 3 {
            return Err(AlgebraError::DimensionMismatch {
                expected: 3,
                found: self.dims(),
            });
        }
        Ok(Matrix3::from_fn(|r, c| self.rows[r][c].evaluate()))
    }
}

impl fmt::Display for AlgebraicMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, r) in self.rows.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            let v = AlgebraicVector::new(self.field.clone(), r.clone());
            write!(f, "{v}")?;
        }
        f.write_str("]")
    }
}

impl fmt::Debug for AlgebraicMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AlgebraicMatrix({}: {})", self.field, self)
    }
}
