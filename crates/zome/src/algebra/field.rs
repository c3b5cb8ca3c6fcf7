//! The field capability trait and the shared `Field` handle.
//!
//! A field variant only describes its basis: how basis terms multiply, what
//! they evaluate to, and how the irrationals are written. `Field` wraps one
//! variant behind an `Arc`, caches its multiplication table, and is the
//! factory for every number, vector and matrix of that field.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::{Arc, OnceLock};

use num_bigint::BigInt;
use num_integer::Integer;
use num_rational::BigRational;
use num_traits::{One, Zero};
use rand::Rng;

use crate::cfg::SIGN_LEVELS;

use super::error::AlgebraError;
use super::format::NumberFormat;
use super::matrix::AlgebraicMatrix;
use super::number::AlgebraicNumber;
use super::vector::AlgebraicVector;

/// Closed rational interval `(lo, hi)`.
pub type Bounds = (BigRational, BigRational);

/// Capability interface implemented by each family of fields.
///
/// Term 0 of the basis is always the rational unit. Terms `1..order` are the
/// irrationals; a subset of them (the multipliers) generates the rest.
pub trait AlgebraicField: fmt::Debug + Send + Sync {
    fn name(&self) -> &str;

    /// Number of basis terms.
    fn order(&self) -> usize;

    /// Coefficients of `e_i * e_j` over the basis (length `order`).
    ///
    /// This is the field's defining multiplication rule, e.g. `φ·φ = 1 + φ`.
    fn basis_product(&self, i: usize, j: usize) -> Vec<i64>;

    /// Real value of basis term `i`.
    fn basis_value(&self, i: usize) -> f64;

    /// Rational enclosures of every basis value, about `2^-bits` wide.
    /// Term 0 is exactly one.
    fn basis_bounds(&self, bits: u32) -> Vec<Bounds>;

    /// Display symbol of irrational term `i >= 1` (e.g. `φ`).
    fn symbol(&self, i: usize) -> String;

    /// ASCII name of irrational term `i >= 1`, used by the expression format.
    fn expression_name(&self, i: usize) -> String;

    /// Basis terms that generate the field multiplicatively.
    fn multiplier_terms(&self) -> Vec<usize> {
        (1..self.order()).collect()
    }

    /// One-line definition of the multiplier at basis term `term`.
    fn define_multiplier(&self, term: usize) -> String;

    /// Numerators and shared denominator of the golden ratio, if the field
    /// contains it.
    fn golden_ratio_terms(&self) -> Option<(Vec<i64>, i64)> {
        None
    }

    /// Integer terms of the chord ratio used for affine polygons; `None`
    /// means one (the affine square), which every field supports.
    fn affine_scalar_terms(&self) -> Option<Vec<i64>> {
        None
    }
}

/// Shared, immutable handle to one field.
///
/// Cloning is cheap. Two handles are equal when they share a name and the
/// same multiplication table and real embedding.
#[derive(Clone)]
pub struct Field(Arc<FieldInner>);

struct FieldInner {
    def: Box<dyn AlgebraicField>,
    name: String,
    order: usize,
    /// `table[i][j]` = coefficients of `e_i * e_j`.
    table: Vec<Vec<Vec<BigInt>>>,
    values: Vec<f64>,
    /// Basis enclosures by precision level, filled on demand.
    bounds: Vec<OnceLock<Vec<Bounds>>>,
    symbols: Vec<String>,
    names: Vec<String>,
}

impl Field {
    /// Wrap a field variant, caching its multiplication table.
    pub fn new<F: AlgebraicField + 'static>(def: F) -> Self {
        let order = def.order();
        let table = (0..order)
            .map(|i| {
                (0..order)
                    .map(|j| {
                        let mut row: Vec<BigInt> =
                            def.basis_product(i, j).into_iter().map(BigInt::from).collect();
                        row.resize(order, BigInt::zero());
                        row
                    })
                    .collect()
            })
            .collect();
        let values = (0..order).map(|i| def.basis_value(i)).collect();
        let mut symbols = vec![String::new()];
        let mut names = vec![String::new()];
        for i in 1..order {
            symbols.push(def.symbol(i));
            names.push(def.expression_name(i));
        }
        let name = def.name().to_string();
        tracing::debug!(field = %name, order, "field created");
        Field(Arc::new(FieldInner {
            def: Box::new(def),
            name,
            order,
            table,
            values,
            bounds: (0..SIGN_LEVELS).map(|_| OnceLock::new()).collect(),
            symbols,
            names,
        }))
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.0.name
    }

    #[inline]
    pub fn order(&self) -> usize {
        self.0.order
    }

    #[inline]
    pub fn num_irrationals(&self) -> usize {
        self.0.order - 1
    }

    pub fn num_multipliers(&self) -> usize {
        self.0.def.multiplier_terms().len()
    }

    /// Symbol (default format) or ASCII name (expression format) of the
    /// irrational at basis term `term`.
    pub fn irrational(&self, term: usize, format: NumberFormat) -> Result<String, AlgebraError> {
        if term == 0 || term >= self.order() {
            return Err(AlgebraError::IndexOutOfRange {
                index: term,
                order: self.order(),
            });
        }
        Ok(match format {
            NumberFormat::Expression => self.0.names[term].clone(),
            _ => self.0.symbols[term].clone(),
        })
    }

    /// Definition line of multiplier `which` (0-based over the multipliers).
    pub fn define_multiplier(&self, which: usize) -> Result<String, AlgebraError> {
        let term = self.multiplier_term(which)?;
        Ok(self.0.def.define_multiplier(term))
    }

    fn multiplier_term(&self, which: usize) -> Result<usize, AlgebraError> {
        let terms = self.0.def.multiplier_terms();
        terms
            .get(which)
            .copied()
            .ok_or(AlgebraError::IndexOutOfRange {
                index: which,
                order: terms.len(),
            })
    }

    #[inline]
    pub(crate) fn product(&self, i: usize, j: usize) -> &[BigInt] {
        &self.0.table[i][j]
    }

    #[inline]
    pub(crate) fn basis_values(&self) -> &[f64] {
        &self.0.values
    }

    /// Basis enclosures at precision `64 << level` bits; `None` past the
    /// last level.
    pub(crate) fn basis_bounds(&self, level: usize) -> Option<&[Bounds]> {
        let slot = self.0.bounds.get(level)?;
        Some(slot.get_or_init(|| self.0.def.basis_bounds(64u32 << level)))
    }

    #[inline]
    pub(crate) fn symbols(&self) -> &[String] {
        &self.0.symbols
    }

    #[inline]
    pub(crate) fn expression_names(&self) -> &[String] {
        &self.0.names
    }

    // ---------------------------------------------------------------- numbers

    pub fn zero(&self) -> AlgebraicNumber {
        AlgebraicNumber::from_parts(self.clone(), vec![BigInt::zero(); self.order()], BigInt::one())
    }

    pub fn one(&self) -> AlgebraicNumber {
        self.unit(0)
    }

    fn unit(&self, term: usize) -> AlgebraicNumber {
        let mut terms = vec![BigInt::zero(); self.order()];
        terms[term] = BigInt::one();
        AlgebraicNumber::from_parts(self.clone(), terms, BigInt::one())
    }

    /// The rational `whole`.
    pub fn create_integer(&self, whole: i64) -> AlgebraicNumber {
        let mut terms = vec![BigInt::zero(); self.order()];
        terms[0] = BigInt::from(whole);
        AlgebraicNumber::from_parts(self.clone(), terms, BigInt::one())
    }

    /// The rational `num / den`.
    pub fn create_rational(&self, num: i64, den: i64) -> Result<AlgebraicNumber, AlgebraError> {
        let mut terms = vec![0; self.order()];
        terms[0] = num;
        self.create_algebraic_number_with_denominator(&terms, den)
    }

    /// Number with integer terms; trailing zero terms may be omitted.
    pub fn create_algebraic_number(&self, terms: &[i64]) -> Result<AlgebraicNumber, AlgebraError> {
        self.create_algebraic_number_with_denominator(terms, 1)
    }

    /// Number `(t0 + t1·e1 + ...) / den`; trailing zero terms may be omitted.
    pub fn create_algebraic_number_with_denominator(
        &self,
        numerators: &[i64],
        den: i64,
    ) -> Result<AlgebraicNumber, AlgebraError> {
        if numerators.len() > self.order() {
            return Err(AlgebraError::IndexOutOfRange {
                index: numerators.len() - 1,
                order: self.order(),
            });
        }
        let mut terms: Vec<BigInt> = numerators.iter().map(|&n| BigInt::from(n)).collect();
        terms.resize(self.order(), BigInt::zero());
        self.from_bigints(terms, BigInt::from(den))
    }

    /// Number from trailing-divisor form: `order` numerators then the divisor.
    pub fn create_algebraic_number_from_td(
        &self,
        td: &[i64],
    ) -> Result<AlgebraicNumber, AlgebraError> {
        if td.len() != self.order() + 1 {
            return Err(AlgebraError::DimensionMismatch {
                expected: self.order() + 1,
                found: td.len(),
            });
        }
        let (den, nums) = td.split_last().ok_or(AlgebraError::DivisionByZero)?;
        self.create_algebraic_number_with_denominator(nums, *den)
    }

    /// `(ones + irrat·e1) / den`, scaled by the first multiplier to `scale_power`.
    pub fn create_algebraic_number_scaled(
        &self,
        ones: i64,
        irrat: i64,
        den: i64,
        scale_power: i32,
    ) -> Result<AlgebraicNumber, AlgebraError> {
        let base = if self.order() > 1 {
            self.create_algebraic_number_with_denominator(&[ones, irrat], den)?
        } else {
            self.create_rational(ones, den)?
        };
        if scale_power == 0 {
            return Ok(base);
        }
        Ok(base.times(&self.create_power(scale_power)?))
    }

    /// Canonical number from arbitrary-precision parts.
    pub fn from_bigints(
        &self,
        terms: Vec<BigInt>,
        den: BigInt,
    ) -> Result<AlgebraicNumber, AlgebraError> {
        if terms.len() != self.order() {
            return Err(AlgebraError::DimensionMismatch {
                expected: self.order(),
                found: terms.len(),
            });
        }
        if den.is_zero() {
            return Err(AlgebraError::DivisionByZero);
        }
        Ok(AlgebraicNumber::from_parts(self.clone(), terms, den))
    }

    /// Number from one rational per basis term, over their common denominator.
    pub(crate) fn from_rationals(&self, terms: &[BigRational]) -> AlgebraicNumber {
        let den = terms
            .iter()
            .fold(BigInt::one(), |acc, t| acc.lcm(t.denom()));
        let nums = terms
            .iter()
            .map(|t| t.numer() * (&den / t.denom()))
            .collect();
        AlgebraicNumber::from_parts(self.clone(), nums, den)
    }

    /// The first multiplier raised to `power`.
    pub fn create_power(&self, power: i32) -> Result<AlgebraicNumber, AlgebraError> {
        self.create_power_of(power, 0)
    }

    /// Multiplier `which` raised to `power`; negative powers go through the
    /// reciprocal. In an order-1 field every power is one.
    pub fn create_power_of(
        &self,
        power: i32,
        which: usize,
    ) -> Result<AlgebraicNumber, AlgebraError> {
        if self.num_multipliers() == 0 && which == 0 {
            return Ok(self.one());
        }
        let term = self.multiplier_term(which)?;
        self.unit(term).pow(power)
    }

    /// The golden ratio, when this field can express it.
    pub fn golden_ratio(&self) -> Option<AlgebraicNumber> {
        let (nums, den) = self.0.def.golden_ratio_terms()?;
        self.create_algebraic_number_with_denominator(&nums, den).ok()
    }

    /// Chord ratio used to build affine polygons in this field.
    pub fn affine_scalar(&self) -> AlgebraicNumber {
        self.0
            .def
            .affine_scalar_terms()
            .and_then(|terms| self.create_algebraic_number(&terms).ok())
            .unwrap_or_else(|| self.one())
    }

    /// The number whose basis term `n` is one; negative `n` gives zero.
    pub fn unit_term(&self, n: isize) -> Result<AlgebraicNumber, AlgebraError> {
        if n < 0 {
            return Ok(self.zero());
        }
        let n = n as usize;
        if n >= self.order() {
            return Err(AlgebraError::IndexOutOfRange {
                index: n,
                order: self.order(),
            });
        }
        Ok(self.unit(n))
    }

    // ---------------------------------------------------------------- vectors

    pub fn origin(&self, dims: usize) -> AlgebraicVector {
        AlgebraicVector::new(self.clone(), vec![self.zero(); dims])
    }

    pub fn basis_vector(&self, dims: usize, axis: usize) -> Result<AlgebraicVector, AlgebraError> {
        if axis >= dims {
            return Err(AlgebraError::IndexOutOfRange {
                index: axis,
                order: dims,
            });
        }
        let mut coords = vec![self.zero(); dims];
        coords[axis] = self.one();
        Ok(AlgebraicVector::new(self.clone(), coords))
    }

    /// Vector from numerator/denominator pairs, one slice per coordinate.
    ///
    /// Trailing pairs may be omitted: `&[&[1, 2]]` is `1/2` in any field.
    pub fn create_vector(&self, nums: &[&[i64]]) -> Result<AlgebraicVector, AlgebraError> {
        let coords = nums
            .iter()
            .map(|pairs| self.number_from_pairs(pairs))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(AlgebraicVector::new(self.clone(), coords))
    }

    fn number_from_pairs(&self, pairs: &[i64]) -> Result<AlgebraicNumber, AlgebraError> {
        if pairs.len() % 2 != 0 {
            return Err(AlgebraError::DimensionMismatch {
                expected: pairs.len() + 1,
                found: pairs.len(),
            });
        }
        if pairs.len() / 2 > self.order() {
            return Err(AlgebraError::IndexOutOfRange {
                index: pairs.len() / 2 - 1,
                order: self.order(),
            });
        }
        let mut terms = vec![BigRational::zero(); self.order()];
        for (slot, pair) in terms.iter_mut().zip(pairs.chunks(2)) {
            if pair[1] == 0 {
                return Err(AlgebraError::DivisionByZero);
            }
            *slot = BigRational::new(BigInt::from(pair[0]), BigInt::from(pair[1]));
        }
        Ok(self.from_rationals(&terms))
    }

    /// Vector from trailing-divisor arrays, one per coordinate.
    pub fn create_vector_from_tds(&self, nums: &[&[i64]]) -> Result<AlgebraicVector, AlgebraError> {
        let coords = nums
            .iter()
            .map(|td| self.create_algebraic_number_from_td(td))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(AlgebraicVector::new(self.clone(), coords))
    }

    /// Vector whose coordinates have integer terms (unit denominators).
    pub fn create_integer_vector(&self, nums: &[&[i64]]) -> Result<AlgebraicVector, AlgebraError> {
        let coords = nums
            .iter()
            .map(|terms| self.create_algebraic_number(terms))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(AlgebraicVector::new(self.clone(), coords))
    }

    /// Integer-term vector where each coordinate carries its own trailing divisor.
    ///
    /// Unlike `create_vector_from_tds`, inner slices may omit trailing terms
    /// as long as the last element is the divisor.
    pub fn create_integer_vector_from_tds(
        &self,
        nums: &[&[i64]],
    ) -> Result<AlgebraicVector, AlgebraError> {
        let coords = nums
            .iter()
            .map(|td| match td.split_last() {
                Some((den, terms)) => self.create_algebraic_number_with_denominator(terms, *den),
                None => Err(AlgebraError::DimensionMismatch {
                    expected: 1,
                    found: 0,
                }),
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(AlgebraicVector::new(self.clone(), coords))
    }

    /// Drop one coordinate of a 4D vector: the first (`w_first`, the usual
    /// quaternion convention) or the last (legacy VEF import).
    pub fn project_to_3d(
        &self,
        source: &AlgebraicVector,
        w_first: bool,
    ) -> Result<AlgebraicVector, AlgebraError> {
        if source.dims() != 4 {
            return Err(AlgebraError::DimensionMismatch {
                expected: 4,
                found: source.dims(),
            });
        }
        let coords = source.coords();
        let kept = if w_first { &coords[1..] } else { &coords[..3] };
        Ok(AlgebraicVector::new(self.clone(), kept.to_vec()))
    }

    /// Random 3D vector with integer coordinates in `[-12, 12)`.
    pub fn random_vector<R: Rng>(&self, rng: &mut R) -> AlgebraicVector {
        let coords = (0..3)
            .map(|_| self.create_integer(rng.gen_range(-12..12)))
            .collect();
        AlgebraicVector::new(self.clone(), coords)
    }

    // --------------------------------------------------------------- matrices

    pub fn identity_matrix(&self, dims: usize) -> AlgebraicMatrix {
        AlgebraicMatrix::identity(self, dims)
    }

    /// Square matrix from row-major data; each element is given as
    /// numerator/denominator pairs per basis term.
    pub fn create_matrix(&self, data: &[Vec<Vec<i64>>]) -> Result<AlgebraicMatrix, AlgebraError> {
        let rows = data
            .iter()
            .map(|row| {
                row.iter()
                    .map(|pairs| self.number_from_pairs(pairs))
                    .collect::<Result<Vec<_>, _>>()
            })
            .collect::<Result<Vec<_>, _>>()?;
        AlgebraicMatrix::from_rows(rows)
    }
}

impl PartialEq for Field {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
            || (self.0.name == other.0.name
                && self.0.table == other.0.table
                && self.0.values == other.0.values)
    }
}

impl Eq for Field {}

impl Hash for Field {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.name.hash(state);
        self.0.table.hash(state);
    }
}

impl fmt::Debug for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Field")
            .field("name", &self.0.name)
            .field("order", &self.0.order)
            .finish()
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.name)
    }
}
