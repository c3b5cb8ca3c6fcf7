//! Concrete field variants.
//!
//! - `GoldenField`: Q(φ), basis {1, φ}, `φ² = 1 + φ`.
//! - `SqrtField`: Q(√n) for non-square `n`, basis {1, √n}.
//! - `PolygonField`: Q(cos π/p) for an odd prime `p`, basis = the diagonal
//!   ratios `d_1 .. d_m` of the regular p-gon (`m = (p-1)/2`, `d_1 = 1`).
//! - `SqrtPhiField`: Q(√φ), basis {1, φ, √φ, φ√φ}; √φ alone generates it.

use num_bigint::BigInt;
use num_integer::Roots;
use num_rational::BigRational;
use num_traits::{One, Signed};

use super::error::AlgebraError;
use super::field::{AlgebraicField, Bounds};

const PHI: f64 = 1.618_033_988_749_895;

#[derive(Clone, Copy, Debug, Default)]
pub struct GoldenField;

impl AlgebraicField for GoldenField {
    fn name(&self) -> &str {
        "golden"
    }
    fn order(&self) -> usize {
        2
    }
    fn basis_product(&self, i: usize, j: usize) -> Vec<i64> {
        match (i, j) {
            (0, k) | (k, 0) => unit(2, k),
            // φ·φ = 1 + φ
            _ => vec![1, 1],
        }
    }
    fn basis_value(&self, i: usize) -> f64 {
        if i == 0 {
            1.0
        } else {
            PHI
        }
    }
    fn basis_bounds(&self, bits: u32) -> Vec<Bounds> {
        vec![exact(1), golden_bounds(bits)]
    }
    fn symbol(&self, _i: usize) -> String {
        "φ".into()
    }
    fn expression_name(&self, _i: usize) -> String {
        "phi".into()
    }
    fn define_multiplier(&self, _term: usize) -> String {
        "phi = ( 1 + sqrt(5) ) / 2".into()
    }
    fn golden_ratio_terms(&self) -> Option<(Vec<i64>, i64)> {
        Some((vec![0, 1], 1))
    }
    fn affine_scalar_terms(&self) -> Option<Vec<i64>> {
        Some(vec![0, 1])
    }
}

/// Q(√n) for a positive non-square `n`.
#[derive(Clone, Debug)]
pub struct SqrtField {
    n: i64,
    name: String,
}

impl SqrtField {
    pub fn new(n: i64) -> Result<Self, AlgebraError> {
        if n < 2 {
            return Err(AlgebraError::unsupported(format!("sqrt({n}) needs n >= 2")));
        }
        if is_square(n) {
            return Err(AlgebraError::unsupported(format!(
                "sqrt({n}) is rational"
            )));
        }
        let name = match n {
            2 => "rootTwo".to_string(),
            3 => "rootThree".to_string(),
            5 => "rootFive".to_string(),
            _ => format!("sqrt{n}"),
        };
        Ok(Self { n, name })
    }

    pub fn radicand(&self) -> i64 {
        self.n
    }
}

impl AlgebraicField for SqrtField {
    fn name(&self) -> &str {
        &self.name
    }
    fn order(&self) -> usize {
        2
    }
    fn basis_product(&self, i: usize, j: usize) -> Vec<i64> {
        match (i, j) {
            (0, k) | (k, 0) => unit(2, k),
            _ => vec![self.n, 0],
        }
    }
    fn basis_value(&self, i: usize) -> f64 {
        if i == 0 {
            1.0
        } else {
            (self.n as f64).sqrt()
        }
    }
    fn basis_bounds(&self, bits: u32) -> Vec<Bounds> {
        vec![exact(1), sqrt_bounds(&exact(self.n), bits)]
    }
    fn symbol(&self, _i: usize) -> String {
        format!("√{}", self.n)
    }
    fn expression_name(&self, _i: usize) -> String {
        format!("sqrt{}", self.n)
    }
    fn define_multiplier(&self, _term: usize) -> String {
        format!("sqrt{n} = sqrt({n})", n = self.n)
    }
    /// φ = 1/2 + √5/2, and `√(5k²) = k√5`.
    fn golden_ratio_terms(&self) -> Option<(Vec<i64>, i64)> {
        if self.n % 5 != 0 || !is_square(self.n / 5) {
            return None;
        }
        let k = isqrt(self.n / 5);
        Some((vec![k, 1], 2 * k))
    }
}

/// Field of the regular p-gon's diagonal ratios, `p` an odd prime >= 5.
///
/// Diagonal `d_k = sin(kπ/p) / sin(π/p)` and `d_k = d_{p-k}`. Products follow
/// `d_i·d_j = Σ d_k` for `k = |i-j|+1, |i-j|+3, .., i+j-1`.
#[derive(Clone, Debug)]
pub struct PolygonField {
    p: usize,
    name: String,
}

impl PolygonField {
    pub fn new(p: usize) -> Result<Self, AlgebraError> {
        if p < 5 || !is_prime(p) {
            return Err(AlgebraError::unsupported(format!(
                "polygon field needs an odd prime >= 5, got {p}"
            )));
        }
        let name = match p {
            5 => "pentagon".to_string(),
            7 => "heptagon".to_string(),
            _ => format!("polygon{p}"),
        };
        Ok(Self { p, name })
    }

    pub fn sides(&self) -> usize {
        self.p
    }

    fn diagonal_count(&self) -> usize {
        (self.p - 1) / 2
    }
}

impl AlgebraicField for PolygonField {
    fn name(&self) -> &str {
        &self.name
    }
    fn order(&self) -> usize {
        self.diagonal_count()
    }
    fn basis_product(&self, i: usize, j: usize) -> Vec<i64> {
        let m = self.diagonal_count();
        let (a, b) = (i + 1, j + 1);
        let mut out = vec![0; m];
        let mut k = a.abs_diff(b) + 1;
        while k < a + b {
            let folded = if k > m { self.p - k } else { k };
            out[folded - 1] += 1;
            k += 2;
        }
        out
    }
    fn basis_value(&self, i: usize) -> f64 {
        let angle = std::f64::consts::PI / self.p as f64;
        ((i + 1) as f64 * angle).sin() / angle.sin()
    }
    /// `d_1 = 1`, `d_2 = c` and `d_{k+1} = c·d_k - d_{k-1}` with
    /// `c = 2cos(π/p)`.
    fn basis_bounds(&self, bits: u32) -> Vec<Bounds> {
        let m = self.diagonal_count();
        let c = two_cos_bounds(self.p, bits + m as u32);
        let mut out = vec![exact(1), c.clone()];
        while out.len() < m {
            let k = out.len();
            let (lo, hi) = mul_bounds(&c, &out[k - 1]);
            let prev = &out[k - 2];
            out.push((lo - &prev.1, hi - &prev.0));
        }
        out.truncate(m);
        out
    }
    fn symbol(&self, i: usize) -> String {
        match (self.p, i) {
            (5, _) => "φ".into(),
            (7, 1) => "ρ".into(),
            (7, _) => "σ".into(),
            _ => format!("d{}", i + 1),
        }
    }
    fn expression_name(&self, i: usize) -> String {
        match (self.p, i) {
            (5, _) => "phi".into(),
            (7, 1) => "rho".into(),
            (7, _) => "sigma".into(),
            _ => format!("d{}", i + 1),
        }
    }
    fn define_multiplier(&self, term: usize) -> String {
        format!(
            "{} = sin({}*pi/{p}) / sin(pi/{p})",
            self.expression_name(term),
            term + 1,
            p = self.p
        )
    }
    fn golden_ratio_terms(&self) -> Option<(Vec<i64>, i64)> {
        (self.p == 5).then(|| (vec![0, 1], 1))
    }
    fn affine_scalar_terms(&self) -> Option<Vec<i64>> {
        Some(unit(self.diagonal_count(), 1))
    }
}

/// Q(√φ) with basis {1, φ, √φ, φ√φ}.
#[derive(Clone, Copy, Debug, Default)]
pub struct SqrtPhiField;

impl AlgebraicField for SqrtPhiField {
    fn name(&self) -> &str {
        "sqrtPhi"
    }
    fn order(&self) -> usize {
        4
    }
    fn basis_product(&self, i: usize, j: usize) -> Vec<i64> {
        let (lo, hi) = if i <= j { (i, j) } else { (j, i) };
        match (lo, hi) {
            (0, k) => unit(4, k),
            (1, 1) => vec![1, 1, 0, 0], // φ² = 1 + φ
            (1, 2) => vec![0, 0, 0, 1], // φ·√φ
            (1, 3) => vec![0, 0, 1, 1], // φ²√φ = √φ + φ√φ
            (2, 2) => vec![0, 1, 0, 0], // √φ² = φ
            (2, 3) => vec![1, 1, 0, 0], // φ√φ² = φ²
            _ => vec![1, 2, 0, 0],      // (φ√φ)² = φ³ = 1 + 2φ
        }
    }
    fn basis_value(&self, i: usize) -> f64 {
        let root = PHI.sqrt();
        [1.0, PHI, root, PHI * root][i]
    }
    fn basis_bounds(&self, bits: u32) -> Vec<Bounds> {
        let phi = golden_bounds(bits + 2);
        let root = sqrt_bounds(&phi, bits + 2);
        let product = mul_bounds(&phi, &root);
        vec![exact(1), phi, root, product]
    }
    fn symbol(&self, i: usize) -> String {
        ["", "φ", "√φ", "φ√φ"][i].into()
    }
    fn expression_name(&self, i: usize) -> String {
        ["", "phi", "sqrtphi", "phi*sqrtphi"][i].into()
    }
    fn multiplier_terms(&self) -> Vec<usize> {
        vec![2]
    }
    fn define_multiplier(&self, _term: usize) -> String {
        "sqrtphi = sqrt( ( 1 + sqrt(5) ) / 2 )".into()
    }
    fn golden_ratio_terms(&self) -> Option<(Vec<i64>, i64)> {
        Some((vec![0, 1, 0, 0], 1))
    }
    fn affine_scalar_terms(&self) -> Option<Vec<i64>> {
        Some(vec![0, 1, 0, 0])
    }
}

fn unit(order: usize, k: usize) -> Vec<i64> {
    let mut v = vec![0; order];
    v[k] = 1;
    v
}

fn isqrt(n: i64) -> i64 {
    Roots::sqrt(&n)
}

fn is_square(n: i64) -> bool {
    n >= 0 && isqrt(n).checked_mul(isqrt(n)) == Some(n)
}

fn is_prime(n: usize) -> bool {
    n >= 2 && (2..).take_while(|&d| d <= n / d).all(|d| n % d != 0)
}

// ------------------------------------------------------------------ bounds

fn exact(v: i64) -> Bounds {
    let r = BigRational::from_integer(BigInt::from(v));
    (r.clone(), r)
}

fn dyadic(num: BigInt, bits: u32) -> BigRational {
    BigRational::new(num, BigInt::one() << bits)
}

/// Enclosure of `√x` for every `x` in `[lo, hi]`, `lo >= 0`.
fn sqrt_bounds((lo, hi): &Bounds, bits: u32) -> Bounds {
    let scale = BigRational::from_integer(BigInt::one() << (2 * bits));
    let down = (lo * &scale).floor().to_integer().sqrt();
    let up = (hi * &scale).ceil().to_integer().sqrt() + 1;
    (dyadic(down, bits), dyadic(up, bits))
}

fn golden_bounds(bits: u32) -> Bounds {
    let (lo, hi) = sqrt_bounds(&exact(5), bits + 1);
    let half = BigRational::new(BigInt::one(), BigInt::from(2));
    let one = BigRational::one();
    ((lo + &one) * &half, (hi + &one) * &half)
}

fn mul_bounds(a: &Bounds, b: &Bounds) -> Bounds {
    let products = [&a.0 * &b.0, &a.0 * &b.1, &a.1 * &b.0, &a.1 * &b.1];
    let mut lo = products[0].clone();
    let mut hi = lo.clone();
    for p in &products[1..] {
        if *p < lo {
            lo = p.clone();
        }
        if *p > hi {
            hi = p.clone();
        }
    }
    (lo, hi)
}

/// `e_p(x)` for `e_1 = 1`, `e_2 = x`, `e_{k+1} = x·e_k - e_{k-1}`. Its roots
/// are `2cos(kπ/p)`, the largest one `k = 1`.
fn diagonal_polynomial(x: &BigRational, p: usize) -> BigRational {
    let (mut prev, mut cur) = (BigRational::one(), x.clone());
    for _ in 2..p {
        let next = x * &cur - &prev;
        prev = cur;
        cur = next;
    }
    cur
}

/// Bisects `2cos(π/p)` between the next root down and 2.
fn two_cos_bounds(p: usize, bits: u32) -> Bounds {
    let angle = std::f64::consts::PI / p as f64;
    let gap = angle.cos() + (2.0 * angle).cos();
    let mut lo = BigRational::from_float(gap).unwrap_or_else(BigRational::one);
    let mut hi = BigRational::from_integer(BigInt::from(2));
    let half = BigRational::new(BigInt::one(), BigInt::from(2));
    for _ in 0..=bits {
        let mid = (&lo + &hi) * &half;
        if diagonal_polynomial(&mid, p).is_positive() {
            hi = mid;
        } else {
            lo = mid;
        }
    }
    (lo, hi)
}
