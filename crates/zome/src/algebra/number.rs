//! Field elements in trailing-divisor canonical form.
//!
//! Invariants (hold for every value handed out):
//! - `terms.len() == field.order()`.
//! - `den > 0` and `gcd(terms.., den) == 1`.
//! - Zero is stored as all-zero terms over `den == 1`.
//!
//! Equality and hashing compare the canonical parts directly, so two
//! arithmetic paths to the same value always compare equal.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{Add, Mul, Neg, Sub};

use num_bigint::BigInt;
use num_integer::Integer;
use num_rational::BigRational;
use num_traits::{One, Signed, ToPrimitive, Zero};

use crate::cfg::SIGN_EPS;

use super::error::AlgebraError;
use super::field::{Bounds, Field};
use super::format::{format_number, NumberFormat};

#[derive(Clone)]
pub struct AlgebraicNumber {
    field: Field,
    terms: Vec<BigInt>,
    den: BigInt,
}

/// Reduce `terms / den` to canonical form in place.
fn canonicalize(terms: &mut [BigInt], den: &mut BigInt) {
    if terms.iter().all(Zero::is_zero) {
        *den = BigInt::one();
        return;
    }
    let mut g = den.abs();
    for t in terms.iter() {
        g = g.gcd(t);
    }
    if den.is_negative() {
        g = -g;
    }
    if !g.is_one() {
        for t in terms.iter_mut() {
            *t = &*t / &g;
        }
        *den = &*den / &g;
    }
}

impl AlgebraicNumber {
    /// Canonicalizing constructor. Callers guarantee `den != 0` and
    /// `terms.len() == field.order()`.
    pub(crate) fn from_parts(field: Field, mut terms: Vec<BigInt>, mut den: BigInt) -> Self {
        debug_assert!(!den.is_zero(), "zero denominator reached from_parts");
        debug_assert_eq!(terms.len(), field.order());
        canonicalize(&mut terms, &mut den);
        Self { field, terms, den }
    }

    #[inline]
    pub fn field(&self) -> &Field {
        &self.field
    }

    /// Integer numerators, one per basis term.
    #[inline]
    pub fn numerators(&self) -> &[BigInt] {
        &self.terms
    }

    /// Shared positive denominator.
    #[inline]
    pub fn denominator(&self) -> &BigInt {
        &self.den
    }

    /// Wire form: numerators followed by the shared denominator.
    pub fn to_trailing_divisor(&self) -> Vec<BigInt> {
        let mut out = self.terms.clone();
        out.push(self.den.clone());
        out
    }

    /// Reduced rational coefficient of basis term `i`.
    pub fn term(&self, i: usize) -> Result<BigRational, AlgebraError> {
        let t = self.terms.get(i).ok_or(AlgebraError::IndexOutOfRange {
            index: i,
            order: self.terms.len(),
        })?;
        Ok(BigRational::new(t.clone(), self.den.clone()))
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.terms.iter().all(Zero::is_zero)
    }

    pub fn is_one(&self) -> bool {
        self.is_rational() && self.den.is_one() && self.terms[0].is_one()
    }

    /// True when every irrational term is zero.
    pub fn is_rational(&self) -> bool {
        self.terms[1..].iter().all(Zero::is_zero)
    }

    /// f64 sum of the numerator terms and the sum of their magnitudes;
    /// `None` when a coefficient does not fit an f64.
    fn approximate(&self) -> Option<(f64, f64)> {
        let mut sum = 0.0;
        let mut magnitude = 0.0;
        for (t, v) in self.terms.iter().zip(self.field.basis_values()) {
            let x = t.to_f64().filter(|x| x.is_finite())? * v;
            sum += x;
            magnitude += x.abs();
        }
        magnitude.is_finite().then_some((sum, magnitude))
    }

    /// The f64 numerator sum, when its sign survives the rounding error.
    fn trusted_sum(&self) -> Option<f64> {
        self.approximate()
            .filter(|&(sum, magnitude)| sum.abs() > SIGN_EPS * magnitude)
            .map(|(sum, _)| sum)
    }

    /// Exact enclosure of the numerator sum at one precision level.
    fn enclose(&self, level: usize) -> Option<Bounds> {
        let bounds = self.field.basis_bounds(level)?;
        let mut lo = BigRational::zero();
        let mut hi = BigRational::zero();
        for (t, (b_lo, b_hi)) in self.terms.iter().zip(bounds) {
            if t.is_zero() {
                continue;
            }
            let t = BigRational::from_integer(t.clone());
            if t.is_positive() {
                lo += &t * b_lo;
                hi += &t * b_hi;
            } else {
                lo += &t * b_hi;
                hi += &t * b_lo;
            }
        }
        Some((lo, hi))
    }

    /// Real approximation, correctly signed and accurate to about f64
    /// precision. For display and search heuristics only.
    pub fn evaluate(&self) -> f64 {
        let den = self.den.to_f64().filter(|d| d.is_finite());
        if let (Some(sum), Some(den)) = (self.trusted_sum(), den) {
            let value = sum / den;
            if value.is_normal() {
                return value;
            }
        }
        if self.is_zero() {
            return 0.0;
        }
        let den = BigRational::from_integer(self.den.clone());
        let mut level = 0;
        while let Some((lo, hi)) = self.enclose(level) {
            let width = &hi - &lo;
            let settled = lo.is_positive() || hi.is_negative();
            if settled && width * BigRational::from_integer(BigInt::one() << 60u32) <= lo.abs().min(hi.abs()) {
                let mid = (lo + hi) / (&den * BigRational::from_integer(BigInt::from(2)));
                return mid.to_f64().unwrap_or(f64::NAN);
            }
            level += 1;
        }
        tracing::warn!(value = %self, "real value unresolved at the last precision level");
        self.approximate().map_or(f64::NAN, |(sum, _)| sum / den.to_f64().unwrap_or(f64::NAN))
    }

    /// -1, 0 or 1, decided exactly. The f64 sum answers when it is clear
    /// of its rounding error; otherwise rational enclosures of the basis
    /// are tightened until they exclude zero.
    pub fn signum(&self) -> i32 {
        if self.is_zero() {
            return 0;
        }
        if self.is_rational() {
            return if self.terms[0].is_negative() { -1 } else { 1 };
        }
        if let Some(sum) = self.trusted_sum() {
            return if sum < 0.0 { -1 } else { 1 };
        }
        let mut level = 0;
        while let Some((lo, hi)) = self.enclose(level) {
            if lo.is_positive() {
                return 1;
            }
            if hi.is_negative() {
                return -1;
            }
            level += 1;
        }
        tracing::warn!(value = %self, "sign unresolved at the last precision level");
        match self.approximate() {
            Some((sum, _)) if sum < 0.0 => -1,
            _ => 1,
        }
    }

    fn check_field(&self, other: &Self) {
        assert!(
            self.field == other.field,
            "mixed fields: {} and {}",
            self.field,
            other.field
        );
    }

    pub fn plus(&self, rhs: &Self) -> Self {
        self.check_field(rhs);
        if self.den == rhs.den {
            let terms = self.terms.iter().zip(&rhs.terms).map(|(a, b)| a + b).collect();
            return Self::from_parts(self.field.clone(), terms, self.den.clone());
        }
        let terms = self
            .terms
            .iter()
            .zip(&rhs.terms)
            .map(|(a, b)| a * &rhs.den + b * &self.den)
            .collect();
        Self::from_parts(self.field.clone(), terms, &self.den * &rhs.den)
    }

    pub fn minus(&self, rhs: &Self) -> Self {
        self.plus(&rhs.negate())
    }

    pub fn negate(&self) -> Self {
        Self {
            field: self.field.clone(),
            terms: self.terms.iter().map(|t| -t).collect(),
            den: self.den.clone(),
        }
    }

    /// Convolution over the basis, reduced with the field's product table.
    pub fn times(&self, rhs: &Self) -> Self {
        self.check_field(rhs);
        let order = self.terms.len();
        let mut out = vec![BigInt::zero(); order];
        for (i, a) in self.terms.iter().enumerate() {
            if a.is_zero() {
                continue;
            }
            for (j, b) in rhs.terms.iter().enumerate() {
                if b.is_zero() {
                    continue;
                }
                let ab = a * b;
                for (slot, c) in out.iter_mut().zip(self.field.product(i, j)) {
                    if !c.is_zero() {
                        *slot += &ab * c;
                    }
                }
            }
        }
        Self::from_parts(self.field.clone(), out, &self.den * &rhs.den)
    }

    /// Multiply by an integer.
    pub fn times_int(&self, k: i64) -> Self {
        let k = BigInt::from(k);
        let terms = self.terms.iter().map(|t| t * &k).collect();
        Self::from_parts(self.field.clone(), terms, self.den.clone())
    }

    /// Exact inverse: solve `self · x = 1` as a linear system over Q.
    pub fn reciprocal(&self) -> Result<Self, AlgebraError> {
        if self.is_zero() {
            return Err(AlgebraError::DivisionByZero);
        }
        if self.is_rational() {
            let mut terms = vec![BigInt::zero(); self.terms.len()];
            terms[0] = self.den.clone();
            return Ok(Self::from_parts(
                self.field.clone(),
                terms,
                self.terms[0].clone(),
            ));
        }
        let n = self.terms.len();
        // Column j of the system holds self·e_j; augmented column is e_0.
        let mut m = vec![vec![BigRational::zero(); n + 1]; n];
        for j in 0..n {
            for (i, a) in self.terms.iter().enumerate() {
                if a.is_zero() {
                    continue;
                }
                for (k, c) in self.field.product(i, j).iter().enumerate() {
                    if !c.is_zero() {
                        m[k][j] += BigRational::new(a * c, self.den.clone());
                    }
                }
            }
        }
        m[0][n] = BigRational::one();
        let x = solve_augmented(m).ok_or(AlgebraError::DivisionByZero)?;
        Ok(self.field.from_rationals(&x))
    }

    pub fn checked_div(&self, rhs: &Self) -> Result<Self, AlgebraError> {
        self.check_field(rhs);
        Ok(self.times(&rhs.reciprocal()?))
    }

    /// Integer power by repeated squaring; negative powers invert first.
    pub fn pow(&self, power: i32) -> Result<Self, AlgebraError> {
        let mut base = if power < 0 {
            self.reciprocal()?
        } else {
            self.clone()
        };
        let mut e = power.unsigned_abs();
        let mut acc = self.field.one();
        while e > 0 {
            if e & 1 == 1 {
                acc = acc.times(&base);
            }
            e >>= 1;
            if e > 0 {
                base = base.times(&base);
            }
        }
        Ok(acc)
    }

    pub fn to_string_format(&self, format: NumberFormat) -> String {
        format_number(self, format)
    }
}

/// Gauss–Jordan elimination on an `n × (n+1)` augmented system.
/// Returns `None` when the system is singular.
fn solve_augmented(mut m: Vec<Vec<BigRational>>) -> Option<Vec<BigRational>> {
    let n = m.len();
    for col in 0..n {
        let pivot = (col..n).find(|&r| !m[r][col].is_zero())?;
        m.swap(col, pivot);
        let inv = m[col][col].recip();
        for v in m[col].iter_mut() {
            *v = &*v * &inv;
        }
        for r in 0..n {
            if r == col || m[r][col].is_zero() {
                continue;
            }
            let factor = m[r][col].clone();
            for c in col..=n {
                let delta = &factor * &m[col][c];
                m[r][c] -= delta;
            }
        }
    }
    Some(m.into_iter().map(|mut row| row.swap_remove(n)).collect())
}

impl PartialEq for AlgebraicNumber {
    fn eq(&self, other: &Self) -> bool {
        self.den == other.den && self.terms == other.terms && self.field == other.field
    }
}

impl Eq for AlgebraicNumber {}

impl Hash for AlgebraicNumber {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.field.hash(state);
        self.terms.hash(state);
        self.den.hash(state);
    }
}

impl PartialOrd for AlgebraicNumber {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Total order by exact real value.
impl Ord for AlgebraicNumber {
    fn cmp(&self, other: &Self) -> Ordering {
        if self == other {
            return Ordering::Equal;
        }
        if self.minus(other).signum() > 0 {
            Ordering::Greater
        } else {
            Ordering::Less
        }
    }
}

impl fmt::Display for AlgebraicNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_number(self, NumberFormat::Default))
    }
}

impl fmt::Debug for AlgebraicNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AlgebraicNumber({}: {})", self.field, self)
    }
}

macro_rules! forward_binop {
    ($imp:ident, $method:ident, $inner:ident) => {
        impl<'a, 'b> $imp<&'b AlgebraicNumber> for &'a AlgebraicNumber {
            type Output = AlgebraicNumber;
            #[inline]
            fn $method(self, rhs: &'b AlgebraicNumber) -> AlgebraicNumber {
                self.$inner(rhs)
            }
        }
        impl $imp<AlgebraicNumber> for AlgebraicNumber {
            type Output = AlgebraicNumber;
            #[inline]
            fn $method(self, rhs: AlgebraicNumber) -> AlgebraicNumber {
                self.$inner(&rhs)
            }
        }
        impl<'b> $imp<&'b AlgebraicNumber> for AlgebraicNumber {
            type Output = AlgebraicNumber;
            #[inline]
            fn $method(self, rhs: &'b AlgebraicNumber) -> AlgebraicNumber {
                self.$inner(rhs)
            }
        }
        impl<'a> $imp<AlgebraicNumber> for &'a AlgebraicNumber {
            type Output = AlgebraicNumber;
            #[inline]
            fn $method(self, rhs: AlgebraicNumber) -> AlgebraicNumber {
                self.$inner(&rhs)
            }
        }
    };
}

forward_binop!(Add, add, plus);
forward_binop!(Sub, sub, minus);
forward_binop!(Mul, mul, times);

impl Neg for AlgebraicNumber {
    type Output = AlgebraicNumber;
    #[inline]
    fn neg(self) -> AlgebraicNumber {
        self.negate()
    }
}

impl Neg for &AlgebraicNumber {
    type Output = AlgebraicNumber;
    #[inline]
    fn neg(self) -> AlgebraicNumber {
        self.negate()
    }
}
