//! Snapping real input onto a field's lattice.
//!
//! Each coordinate is a closest-vector problem: the points `(c, w·(t0 + Σ
//! c_i·e_i))` form a lattice in which the target sits at `(0, w·x)`. The
//! lattice basis is LLL-reduced and the target rounded onto it by Babai's
//! nearest plane, once per value weight `w`; small weights favour small
//! coefficients, large ones favour accuracy. The rational term is always
//! re-rounded against the chosen irrationals.

use nalgebra::DVector;
use num_bigint::BigInt;
use num_traits::FromPrimitive;

use crate::cfg::TIE_EPS;

use super::error::AlgebraError;
use super::field::Field;
use super::number::AlgebraicNumber;
use super::vector::AlgebraicVector;

/// Lovász condition constant.
const LLL_DELTA: f64 = 0.75;
/// Largest value weight; keeps the reduction well inside f64 precision.
const MAX_WEIGHT: f64 = 4_294_967_296.0;

/// Search bounds for `nearest_algebraic_*`.
#[derive(Clone, Debug)]
pub struct NearestCfg {
    /// Largest |coefficient| accepted for each irrational term.
    pub max_coefficient: i64,
    /// Shared denominator of the result.
    pub denominator: i64,
    /// Safety cap on reduction rounds (one per value weight) per coordinate.
    pub max_rounds: usize,
}

impl Default for NearestCfg {
    fn default() -> Self {
        Self {
            max_coefficient: 8,
            denominator: 1,
            max_rounds: 32,
        }
    }
}

/// Best candidate so far: error, coefficient size, irrationals, rational term.
struct Candidate {
    err: f64,
    size: i64,
    irr: Vec<i64>,
    t0: f64,
}

impl Field {
    pub fn nearest_algebraic_number(&self, target: f64) -> Result<AlgebraicNumber, AlgebraError> {
        self.nearest_algebraic_number_with(target, &NearestCfg::default())
    }

    /// Close number `(t0 + Σ c_i·e_i) / den` with `|c_i| <= max_coefficient`.
    /// Among candidates of equal error the smallest coefficients win.
    pub fn nearest_algebraic_number_with(
        &self,
        target: f64,
        cfg: &NearestCfg,
    ) -> Result<AlgebraicNumber, AlgebraError> {
        if !target.is_finite() {
            return Err(AlgebraError::parse(&target.to_string(), "not a finite real"));
        }
        if cfg.denominator <= 0 {
            return Err(AlgebraError::DivisionByZero);
        }
        let values = &self.basis_values()[1..];
        let bound = cfg.max_coefficient.max(0);
        let scaled = target * cfg.denominator as f64;
        let tol = TIE_EPS * scaled.abs().max(1.0);

        let mut best = snap(scaled, values, vec![0; values.len()]);
        let consider = |best: &mut Candidate, irr: Vec<i64>| {
            if irr.iter().any(|c| c.abs() > bound) {
                return;
            }
            let next = snap(scaled, values, irr);
            if next.err < best.err - tol || (next.err <= best.err + tol && next.size < best.size) {
                *best = next;
            }
        };
        if bound > 0 && !values.is_empty() {
            let residual = scaled - scaled.floor();
            let mut weight = 1.0;
            for _ in 0..cfg.max_rounds {
                if weight > MAX_WEIGHT {
                    break;
                }
                consider(&mut best, closest_point(values, residual, weight));
                weight *= 2.0;
            }
        }
        tracing::trace!(target, err = best.err, "snapped onto the lattice");

        let mut terms = Vec::with_capacity(self.order());
        terms.push(
            BigInt::from_f64(best.t0)
                .ok_or_else(|| AlgebraError::parse(&target.to_string(), "out of range"))?,
        );
        terms.extend(best.irr.into_iter().map(BigInt::from));
        self.from_bigints(terms, BigInt::from(cfg.denominator))
    }

    pub fn nearest_algebraic_vector(&self, target: &[f64]) -> Result<AlgebraicVector, AlgebraError> {
        self.nearest_algebraic_vector_with(target, &NearestCfg::default())
    }

    pub fn nearest_algebraic_vector_with(
        &self,
        target: &[f64],
        cfg: &NearestCfg,
    ) -> Result<AlgebraicVector, AlgebraError> {
        let coords = target
            .iter()
            .map(|&x| self.nearest_algebraic_number_with(x, cfg))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(AlgebraicVector::new(self.clone(), coords))
    }
}

/// Complete `irr` with the best rational term for `scaled`.
fn snap(scaled: f64, values: &[f64], irr: Vec<i64>) -> Candidate {
    let sum: f64 = irr.iter().zip(values).map(|(&c, v)| c as f64 * v).sum();
    let t0 = (scaled - sum).round();
    Candidate {
        err: (t0 + sum - scaled).abs(),
        size: irr.iter().map(|c| c.abs()).sum(),
        irr,
        t0,
    }
}

/// Irrational coefficients of the lattice point Babai's nearest plane picks
/// for `residual` at value weight `weight`.
///
/// Row 0 is `(0.., w)` (the free rational term); row `i` is
/// `(unit_i, w·e_i)`.
fn closest_point(values: &[f64], residual: f64, weight: f64) -> Vec<i64> {
    let k = values.len();
    let mut basis: Vec<DVector<f64>> = (0..=k)
        .map(|row| {
            let mut b = DVector::zeros(k + 1);
            if row == 0 {
                b[k] = weight;
            } else {
                b[row - 1] = 1.0;
                b[k] = weight * values[row - 1];
            }
            b
        })
        .collect();
    lll_reduce(&mut basis);

    let mut t = DVector::zeros(k + 1);
    t[k] = weight * residual;
    let ortho = gram_schmidt(&basis).0;
    for j in (0..basis.len()).rev() {
        let norm = ortho[j].norm_squared();
        if norm == 0.0 {
            continue;
        }
        let r = (t.dot(&ortho[j]) / norm).round();
        if r != 0.0 {
            t -= &basis[j] * r;
        }
    }
    // The chosen lattice point is `target - t`; its first k entries are the
    // coefficients since the target has zeros there.
    (0..k).map(|i| (-t[i]).round() as i64).collect()
}

/// Orthogonalized rows and the projection coefficients `mu[i][j]`.
fn gram_schmidt(basis: &[DVector<f64>]) -> (Vec<DVector<f64>>, Vec<Vec<f64>>) {
    let n = basis.len();
    let mut ortho: Vec<DVector<f64>> = Vec::with_capacity(n);
    let mut mu = vec![vec![0.0; n]; n];
    for i in 0..n {
        let mut v = basis[i].clone();
        for j in 0..i {
            let norm = ortho[j].norm_squared();
            if norm > 0.0 {
                mu[i][j] = basis[i].dot(&ortho[j]) / norm;
                v -= &ortho[j] * mu[i][j];
            }
        }
        ortho.push(v);
    }
    (ortho, mu)
}

/// Textbook LLL over f64 rows; the dimensions here are tiny.
fn lll_reduce(basis: &mut [DVector<f64>]) {
    let n = basis.len();
    let mut k = 1;
    let mut steps = 0;
    while k < n && steps < 64 * n * n {
        steps += 1;
        for j in (0..k).rev() {
            let q = gram_schmidt(basis).1[k][j].round();
            if q != 0.0 {
                let row = basis[j].clone();
                basis[k] -= row * q;
            }
        }
        let (ortho, mu) = gram_schmidt(basis);
        let lhs = ortho[k].norm_squared();
        let rhs = (LLL_DELTA - mu[k][k - 1].powi(2)) * ortho[k - 1].norm_squared();
        if lhs >= rhs {
            k += 1;
        } else {
            basis.swap(k, k - 1);
            k = (k - 1).max(1);
        }
    }
}
