use super::*;
use num_bigint::BigInt;
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashSet;

fn golden() -> Field {
    Field::new(GoldenField)
}

fn heptagon() -> Field {
    Field::new(PolygonField::new(7).unwrap())
}

fn sqrt_phi() -> Field {
    Field::new(SqrtPhiField)
}

fn num(f: &Field, terms: &[i64]) -> AlgebraicNumber {
    f.create_algebraic_number(terms).unwrap()
}

fn any_field() -> impl Strategy<Value = Field> {
    prop_oneof![
        Just(golden()),
        Just(heptagon()),
        Just(sqrt_phi()),
        Just(Field::new(SqrtField::new(2).unwrap())),
    ]
}

fn number_in(field: Field) -> impl Strategy<Value = AlgebraicNumber> {
    let order = field.order();
    (prop::collection::vec(-20i64..=20, order), 1i64..=12).prop_map(move |(terms, den)| {
        field
            .create_algebraic_number_with_denominator(&terms, den)
            .unwrap()
    })
}

fn triple() -> impl Strategy<Value = (AlgebraicNumber, AlgebraicNumber, AlgebraicNumber)> {
    any_field().prop_flat_map(|f| (number_in(f.clone()), number_in(f.clone()), number_in(f)))
}

proptest! {
    #[test]
    fn addition_commutes_and_associates((a, b, c) in triple()) {
        prop_assert_eq!(&a + &b, &b + &a);
        prop_assert_eq!((&a + &b) + &c, &a + (&b + &c));
    }

    #[test]
    fn multiplication_distributes((a, b, c) in triple()) {
        prop_assert_eq!(&a * (&b + &c), &a * &b + &a * &c);
        prop_assert_eq!(&a * &b, &b * &a);
    }

    #[test]
    fn additive_inverse_is_canonical_zero((a, _b, _c) in triple()) {
        let z = &a + &(-&a);
        prop_assert!(z.is_zero());
        prop_assert_eq!(z.denominator(), &BigInt::from(1));
        prop_assert_eq!(z, a.field().zero());
    }

    #[test]
    fn reciprocal_inverts_nonzero((a, _b, _c) in triple()) {
        prop_assume!(!a.is_zero());
        let inv = a.reciprocal().unwrap();
        prop_assert_eq!(&a * &inv, a.field().one());
        prop_assert_eq!(a.checked_div(&a).unwrap(), a.field().one());
    }

    #[test]
    fn canonical_form_is_idempotent((a, _b, _c) in triple()) {
        let again = a
            .field()
            .from_bigints(a.numerators().to_vec(), a.denominator().clone())
            .unwrap();
        prop_assert_eq!(&again, &a);
        prop_assert_eq!(again.numerators(), a.numerators());
    }

    #[test]
    fn every_format_round_trips((a, b, c) in triple()) {
        let f = a.field().clone();
        for fmt in NumberFormat::ALL {
            let text = a.to_string_format(fmt);
            prop_assert_eq!(f.parse_number(&text, fmt).unwrap(), a.clone(), "{} via {}", text, fmt);
            let v = AlgebraicVector::new(f.clone(), vec![a.clone(), b.clone(), c.clone()]);
            let vt = v.to_string_format(fmt);
            prop_assert_eq!(f.parse_vector(&vt, fmt).unwrap(), v, "{} via {}", vt, fmt);
        }
    }

    #[test]
    fn order_agrees_with_real_value((a, b, _c) in triple()) {
        let (x, y) = (a.evaluate(), b.evaluate());
        if (x - y).abs() > 1e-9 {
            prop_assert_eq!(a.cmp(&b), x.partial_cmp(&y).unwrap());
        }
    }
}

#[test]
fn one_plus_phi_squared_is_two_plus_three_phi() {
    let f = golden();
    let a = num(&f, &[1, 1]);
    assert_eq!(&a * &a, num(&f, &[2, 3]));
}

#[test]
fn golden_ratio_detection() {
    let f = golden();
    assert_eq!(f.golden_ratio().unwrap(), num(&f, &[0, 1]));

    let pentagon = Field::new(PolygonField::new(5).unwrap());
    assert_eq!(pentagon.golden_ratio().unwrap(), num(&pentagon, &[0, 1]));

    let root5 = Field::new(SqrtField::new(5).unwrap());
    let phi = root5.golden_ratio().unwrap();
    assert!((phi.evaluate() - 1.618_033_988_749_895).abs() < 1e-12);
    assert_eq!(&phi * &phi, &phi + &root5.one());

    let root20 = Field::new(SqrtField::new(20).unwrap());
    let phi20 = root20.golden_ratio().unwrap();
    assert_eq!(&phi20 * &phi20, &phi20 + &root20.one());

    assert!(Field::new(SqrtField::new(2).unwrap()).golden_ratio().is_none());
    assert!(heptagon().golden_ratio().is_none());
    assert_eq!(sqrt_phi().golden_ratio().unwrap(), num(&sqrt_phi(), &[0, 1]));
}

#[test]
fn constructors_canonicalize() {
    let f = golden();
    let a = f.create_algebraic_number_with_denominator(&[2, 4], 6).unwrap();
    assert_eq!(a.numerators(), &[BigInt::from(1), BigInt::from(2)]);
    assert_eq!(a.denominator(), &BigInt::from(3));

    let b = f.create_algebraic_number_with_denominator(&[1, 1], -2).unwrap();
    assert_eq!(b.numerators(), &[BigInt::from(-1), BigInt::from(-1)]);
    assert_eq!(b.denominator(), &BigInt::from(2));

    let z = f.create_algebraic_number_with_denominator(&[0, 0], 5).unwrap();
    assert_eq!(z.denominator(), &BigInt::from(1));
    assert_eq!(z, f.zero());

    let td = f.create_algebraic_number_from_td(&[3, 6, 9]).unwrap();
    assert_eq!(td, f.create_algebraic_number_with_denominator(&[1, 2], 3).unwrap());
    assert_eq!(
        td.to_trailing_divisor(),
        vec![BigInt::from(1), BigInt::from(2), BigInt::from(3)]
    );
    assert_eq!(td.term(1).unwrap().to_string(), "2/3");
}

#[test]
fn division_by_zero_is_reported() {
    let f = golden();
    assert_eq!(f.create_rational(1, 0).unwrap_err(), AlgebraError::DivisionByZero);
    assert_eq!(f.create_algebraic_number_from_td(&[1, 1, 0]).unwrap_err(), AlgebraError::DivisionByZero);
    assert_eq!(f.zero().reciprocal().unwrap_err(), AlgebraError::DivisionByZero);
    assert_eq!(f.one().checked_div(&f.zero()).unwrap_err(), AlgebraError::DivisionByZero);
    assert!(matches!(
        f.create_algebraic_number(&[1, 2, 3]),
        Err(AlgebraError::IndexOutOfRange { .. })
    ));
}

#[test]
fn golden_powers() {
    let f = golden();
    assert_eq!(f.create_power(0).unwrap(), f.one());
    assert_eq!(f.create_power(3).unwrap(), num(&f, &[1, 2]));
    assert_eq!(f.create_power(-1).unwrap(), num(&f, &[-1, 1]));
    assert_eq!(f.create_power(-2).unwrap(), num(&f, &[2, -1]));
    assert!(matches!(f.create_power_of(1, 1), Err(AlgebraError::IndexOutOfRange { .. })));
    assert_eq!(
        f.create_algebraic_number_scaled(1, 1, 2, 1).unwrap(),
        f.create_algebraic_number_with_denominator(&[1, 2], 2).unwrap()
    );
}

#[test]
fn heptagon_diagonal_products() {
    let f = heptagon();
    let rho = num(&f, &[0, 1, 0]);
    let sigma = num(&f, &[0, 0, 1]);
    assert_eq!(&rho * &sigma, &rho + &sigma);
    assert_eq!(&rho * &rho, &f.one() + &sigma);
    assert!((rho.evaluate() - 1.801_937_735_804_838).abs() < 1e-12);
    assert!((sigma.evaluate() - 2.246_979_603_717_467).abs() < 1e-12);
    assert_eq!(f.affine_scalar(), rho);
    assert_eq!(f.irrational(2, NumberFormat::Expression).unwrap(), "sigma");
}

#[test]
fn sqrt_phi_has_one_multiplier() {
    let f = sqrt_phi();
    assert_eq!(f.num_irrationals(), 3);
    assert_eq!(f.num_multipliers(), 1);
    let root = f.unit_term(2).unwrap();
    assert_eq!(&root * &root, f.unit_term(1).unwrap());
    assert_eq!(f.create_power(2).unwrap(), f.golden_ratio().unwrap());
    assert!(f.define_multiplier(0).unwrap().starts_with("sqrtphi"));
    assert!(f.define_multiplier(1).is_err());
}

#[test]
fn field_parameters_are_validated() {
    assert!(SqrtField::new(4).is_err());
    assert!(SqrtField::new(1).is_err());
    assert!(PolygonField::new(9).is_err());
    assert!(PolygonField::new(3).is_err());
    assert_eq!(Field::new(SqrtField::new(2).unwrap()).name(), "rootTwo");
    assert_eq!(Field::new(PolygonField::new(11).unwrap()).order(), 5);
}

#[test]
fn field_metadata() {
    let f = golden();
    assert_eq!(f.irrational(1, NumberFormat::Default).unwrap(), "φ");
    assert_eq!(f.irrational(1, NumberFormat::Expression).unwrap(), "phi");
    assert!(f.irrational(0, NumberFormat::Default).is_err());
    assert_eq!(f.define_multiplier(0).unwrap(), "phi = ( 1 + sqrt(5) ) / 2");
    assert_eq!(f.unit_term(-1).unwrap(), f.zero());
    assert!(matches!(f.unit_term(2), Err(AlgebraError::IndexOutOfRange { index: 2, order: 2 })));
    assert_eq!(f.affine_scalar(), num(&f, &[0, 1]));
    let root2 = Field::new(SqrtField::new(2).unwrap());
    assert_eq!(root2.affine_scalar(), root2.one());
}

#[test]
fn golden_formats() {
    let f = golden();
    let x = num(&f, &[4, 3]);
    assert_eq!(x.to_string_format(NumberFormat::Default), "4 +3φ");
    assert_eq!(x.to_string_format(NumberFormat::Expression), "4 +3*phi");
    assert_eq!(x.to_string_format(NumberFormat::Zomic), "4 3");
    assert_eq!(x.to_string_format(NumberFormat::Vef), "(3,4)");
    assert_eq!(num(&f, &[-1, -1]).to_string(), "-1 -φ");
    assert_eq!(num(&f, &[0, -1]).to_string(), "-φ");
    assert_eq!(f.zero().to_string(), "0");
    let half_phi = f.create_algebraic_number_with_denominator(&[0, 1], 2).unwrap();
    assert_eq!(half_phi.to_string(), "1/2φ");
    assert_eq!(half_phi.to_string_format(NumberFormat::Expression), "1/2*phi");
}

#[test]
fn default_parser_accepts_spaced_signs_and_rejects_junk() {
    let f = golden();
    let x = num(&f, &[4, 3]);
    assert_eq!(f.parse_number("4 + 3φ", NumberFormat::Default).unwrap(), x);
    assert_eq!(f.parse_number("3φ +4", NumberFormat::Default).unwrap(), x);
    for bad in ["", "4 3φ", "4 +", "1/0", "4 +3ψ", "φ +2φ", "+ -3"] {
        assert!(
            matches!(f.parse_number(bad, NumberFormat::Default), Err(AlgebraError::ParseFailure { .. })),
            "{bad:?} should not parse"
        );
    }
    assert!(f.parse_number("1 2 3", NumberFormat::Zomic).is_err());
    assert!(f.parse_number("(1,2,3)", NumberFormat::Vef).is_err());
    assert!(f.parse_number("2*psi", NumberFormat::Expression).is_err());
}

#[test]
fn legacy_and_vef_parsing() {
    let f = golden();
    let x = num(&f, &[4, 3]);
    assert_eq!(f.parse_legacy_number("(3,4)").unwrap(), x);
    assert_eq!(f.parse_legacy_number("4 3").unwrap(), x);
    assert_eq!(f.parse_legacy_number("4 +3φ").unwrap(), x);
    assert_eq!(f.parse_legacy_number("4 +3*phi").unwrap(), x);
    assert!(f.parse_legacy_number("four").is_err());
    assert_eq!(f.parse_vef_number("3/2", true).unwrap(), f.create_rational(3, 2).unwrap());
    assert_eq!(f.parse_vef_number("(5)", false).unwrap(), f.create_integer(5));
}

#[test]
fn format_codes() {
    for fmt in NumberFormat::ALL {
        assert_eq!(NumberFormat::from_code(fmt.code()), Some(fmt));
        assert_eq!(fmt.name().parse::<NumberFormat>().unwrap(), fmt);
    }
    assert_eq!("1".parse::<NumberFormat>().unwrap(), NumberFormat::Expression);
    assert!("7".parse::<NumberFormat>().is_err());
    assert_eq!(NumberFormat::from_code(4), None);
}

#[test]
fn golden_vector_formats() {
    let f = golden();
    let v = f.create_vector(&[&[1, 2, 1, 1], &[0, 1], &[-3, 1]]).unwrap();
    assert_eq!(v.to_string(), "(1/2 +φ, 0, -3)");
    assert_eq!(v.to_string_format(NumberFormat::Zomic), "1/2 1 0 0 -3 0");
    assert_eq!(v.to_string_format(NumberFormat::Vef), "(1,1/2) (0,0) (0,-3)");
    assert!(f.parse_vector("1 2 3", NumberFormat::Zomic).is_err());
}

#[test]
fn ordering_and_hashing() {
    let f = golden();
    let mut xs = vec![f.create_integer(2), num(&f, &[0, 1]), f.one(), num(&f, &[0, -1])];
    xs.sort();
    assert_eq!(xs, vec![num(&f, &[0, -1]), f.one(), num(&f, &[0, 1]), f.create_integer(2)]);
    assert_eq!(num(&f, &[0, -1]).signum(), -1);
    assert_eq!(f.zero().signum(), 0);

    let phi = num(&f, &[0, 1]);
    let mut set = HashSet::new();
    set.insert(&phi * &phi);
    set.insert(&phi + &f.one());
    set.insert(f.create_power(2).unwrap());
    assert_eq!(set.len(), 1);
}

#[test]
#[should_panic(expected = "mixed fields")]
fn mixed_field_arithmetic_panics() {
    let root2 = Field::new(SqrtField::new(2).unwrap());
    let _ = golden().one() + root2.one();
}

#[test]
fn vector_algebra() {
    let f = golden();
    let a = f.create_integer_vector(&[&[1], &[0, 1], &[0]]).unwrap();
    let b = f.create_integer_vector(&[&[0, 1], &[1, 1], &[0]]).unwrap();
    assert!(are_parallel(&a, &b));
    assert_eq!(a.scale(&num(&f, &[0, 1])), b);
    assert!(!are_parallel(&a, &f.basis_vector(3, 0).unwrap()));
    assert!(are_parallel(&a, &f.origin(3)));
    assert!((&a - &a).is_origin());
    assert_eq!(a.cross(&b).unwrap(), f.origin(3));
    assert_eq!(a.dot(&b).unwrap(), num(&f, &[1, 2]) + num(&f, &[0, 1]));
    assert!(a.cross(&f.origin(4)).is_err());
    assert!(a.to_3d_double_vector().y > 1.6);
    assert_eq!(a.to_real_vector().len(), 3);

    let tds = f.create_vector_from_tds(&[&[1, 0, 2], &[0, 1, 1], &[0, 0, 1]]).unwrap();
    assert_eq!(tds, f.create_integer_vector_from_tds(&[&[1, 2], &[0, 1, 1], &[1]]).unwrap());
}

#[test]
fn projection_and_random_vectors() {
    let f = golden();
    let v = f.create_integer_vector(&[&[1], &[2], &[3], &[4]]).unwrap();
    assert_eq!(
        f.project_to_3d(&v, true).unwrap(),
        f.create_integer_vector(&[&[2], &[3], &[4]]).unwrap()
    );
    assert_eq!(
        f.project_to_3d(&v, false).unwrap(),
        f.create_integer_vector(&[&[1], &[2], &[3]]).unwrap()
    );
    assert!(f.project_to_3d(&f.origin(3), true).is_err());

    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..20 {
        let r = f.random_vector(&mut rng);
        assert_eq!(r.dims(), 3);
        for c in r.coords() {
            assert!(c.is_rational());
            assert!((-12.0..12.0).contains(&c.evaluate()));
        }
    }
}

#[test]
fn matrix_inverse_and_determinant() {
    let f = golden();
    // [[1, φ], [0, 1]]
    let m = f
        .create_matrix(&[
            vec![vec![1, 1], vec![0, 1, 1, 1]],
            vec![vec![0, 1], vec![1, 1]],
        ])
        .unwrap();
    let inv = m.inverse().unwrap();
    assert_eq!(inv.element(0, 1).unwrap(), &num(&f, &[0, -1]));
    assert_eq!(m.times(&inv).unwrap(), f.identity_matrix(2));
    assert_eq!(m.determinant(), f.one());

    let n = AlgebraicMatrix::from_rows(vec![
        vec![num(&f, &[0, 1]), f.one()],
        vec![f.one(), f.one()],
    ])
    .unwrap();
    assert_eq!(n.determinant(), num(&f, &[-1, 1]));
    assert_eq!(n.transpose(), n);

    let singular = AlgebraicMatrix::from_rows(vec![
        vec![f.one(), num(&f, &[0, 1])],
        vec![num(&f, &[0, 1]), num(&f, &[1, 1])],
    ])
    .unwrap();
    assert!(singular.determinant().is_zero());
    assert_eq!(singular.inverse().unwrap_err(), AlgebraError::DivisionByZero);

    let col = f.create_integer_vector(&[&[0], &[1]]).unwrap();
    assert_eq!(m.times_column(&col).unwrap(), m.column(1).unwrap());
    assert!(AlgebraicMatrix::from_rows(vec![vec![f.one(), f.one()]]).is_err());
    assert!(m.to_real_matrix3().is_err());
    assert!((m.to_real_matrix()[(0, 1)] - 1.618_033_988_749_895).abs() < 1e-12);
}

/// Fields paired with a unit above one.
fn growing_units() -> Vec<(Field, AlgebraicNumber)> {
    let root_two = Field::new(SqrtField::new(2).unwrap());
    let root_five = Field::new(SqrtField::new(5).unwrap());
    let pentagon = Field::new(PolygonField::new(5).unwrap());
    let hept = heptagon();
    let sp = sqrt_phi();
    vec![
        (golden(), num(&golden(), &[0, 1])),
        (root_two.clone(), num(&root_two, &[1, 1])),
        (root_five.clone(), root_five.golden_ratio().unwrap()),
        (pentagon.clone(), pentagon.golden_ratio().unwrap()),
        (hept.clone(), hept.affine_scalar()),
        (sp.clone(), num(&sp, &[0, 0, 1, 0])),
        (sp.clone(), num(&sp, &[0, 1, 0, 0])),
    ]
}

#[test]
fn unit_powers_stay_positive_and_increasing() {
    for (f, u) in growing_units() {
        let mut x = u.pow(-200).unwrap();
        for n in -200..200 {
            let next = &x * &u;
            assert_eq!(x.signum(), 1, "{f} {u}^{n}");
            assert_eq!((-&x).signum(), -1, "{f} -{u}^{n}");
            assert!(x < next, "{f} {u}^{n}");
            assert_eq!(next.cmp(&x), std::cmp::Ordering::Greater);
            x = next;
        }
        assert_eq!(x, u.pow(200).unwrap());
    }
}

#[test]
fn tiny_values_with_huge_coefficients_evaluate_accurately() {
    let f = golden();
    let phi = num(&f, &[0, 1]);
    let real = 1.618_033_988_749_895f64;
    for n in [-100, -80, -60, -40, 40, 100] {
        let x = phi.pow(n).unwrap();
        let expect = real.powi(n);
        assert!(((x.evaluate() - expect) / expect).abs() < 1e-12, "φ^{n} = {}", x.evaluate());
    }
    assert!(phi.pow(-80).unwrap() < phi.pow(-79).unwrap());

    // 1 - φ^-200 sits within 1e-41 of one
    let near_one = &f.one() - &phi.pow(-200).unwrap();
    assert_eq!((&near_one - &f.one()).signum(), -1);
    assert!(near_one < f.one());

    let root_two = Field::new(SqrtField::new(2).unwrap());
    let pell = num(&root_two, &[1, -1]).pow(60).unwrap();
    assert_eq!(pell.signum(), 1);
    assert!(pell.evaluate() > 0.0 && pell.evaluate() < 1e-20);
}

#[test]
fn basis_bounds_enclose_the_real_values() {
    use num_traits::ToPrimitive;
    for (f, _) in growing_units() {
        for level in 0..3 {
            let bounds = f.basis_bounds(level).unwrap();
            assert_eq!(bounds.len(), f.order());
            for ((lo, hi), v) in bounds.iter().zip(f.basis_values()) {
                assert!(lo <= hi, "{f}");
                assert!(lo.to_f64().unwrap() <= v + 1e-12 && hi.to_f64().unwrap() >= v - 1e-12, "{f}");
                assert!((hi - lo).to_f64().unwrap() < 1e-15, "{f}");
            }
        }
    }
    assert!(golden().basis_bounds(crate::cfg::SIGN_LEVELS).is_none());
}

#[test]
fn fields_compare_by_structure() {
    #[derive(Debug)]
    struct Impostor;
    impl AlgebraicField for Impostor {
        fn name(&self) -> &str {
            "golden"
        }
        fn order(&self) -> usize {
            2
        }
        fn basis_product(&self, i: usize, j: usize) -> Vec<i64> {
            match (i, j) {
                (0, 0) => vec![1, 0],
                (0, _) | (_, 0) => vec![0, 1],
                _ => vec![2, 0],
            }
        }
        fn basis_value(&self, i: usize) -> f64 {
            [1.0, 2f64.sqrt()][i]
        }
        fn basis_bounds(&self, _bits: u32) -> Vec<Bounds> {
            Field::new(SqrtField::new(2).unwrap()).basis_bounds(0).unwrap().to_vec()
        }
        fn symbol(&self, _i: usize) -> String {
            "φ".into()
        }
        fn expression_name(&self, _i: usize) -> String {
            "phi".into()
        }
        fn define_multiplier(&self, _term: usize) -> String {
            String::new()
        }
    }
    let impostor = Field::new(Impostor);
    assert_ne!(impostor, golden());
    assert_eq!(golden(), golden());
    let mut set = HashSet::new();
    set.insert(golden());
    set.insert(golden());
    set.insert(impostor);
    assert_eq!(set.len(), 2);
}

#[test]
fn large_radicands_are_accepted() {
    let big = Field::new(SqrtField::new(i64::MAX).unwrap());
    let root = num(&big, &[0, 1]);
    assert_eq!(&root * &root, big.create_integer(i64::MAX));
    assert!(SqrtField::new(3_037_000_499 * 3_037_000_499).is_err());
    assert!(SqrtField::new(3_037_000_499 * 3_037_000_499 + 1).is_ok());
    let wide = Field::new(SqrtField::new(5 * 1_000_000_007 * 1_000_000_007).unwrap());
    let phi = wide.golden_ratio().unwrap();
    assert_eq!(&phi * &phi, &phi + &wide.one());
}

#[test]
fn nearest_snaps_onto_the_lattice() {
    let f = golden();
    assert_eq!(f.nearest_algebraic_number(1.618_034).unwrap(), num(&f, &[0, 1]));
    let v = f.nearest_algebraic_vector(&[4.236_068, 0.0, -1.0]).unwrap();
    assert_eq!(v, f.create_integer_vector(&[&[1, 2], &[0], &[-1]]).unwrap());
    assert!(f.nearest_algebraic_number(f64::NAN).is_err());

    let cfg = NearestCfg {
        denominator: 2,
        ..NearestCfg::default()
    };
    let half = f.nearest_algebraic_number_with(0.5, &cfg).unwrap();
    assert_eq!(half, f.create_rational(1, 2).unwrap());
}

#[test]
fn nearest_reduces_in_wider_fields() {
    let f = sqrt_phi();
    let x = num(&f, &[1, -1, 3, 0]);
    assert_eq!(f.nearest_algebraic_number(x.evaluate()).unwrap(), x);
    let y = num(&f, &[2, 0, 0, 1]);
    assert_eq!(f.nearest_algebraic_number(y.evaluate()).unwrap(), y);

    let h = heptagon();
    let z = num(&h, &[2, -1, 1]);
    assert_eq!(h.nearest_algebraic_number(z.evaluate()).unwrap(), z);

    let capped = NearestCfg {
        max_coefficient: 0,
        ..NearestCfg::default()
    };
    assert_eq!(f.nearest_algebraic_number_with(x.evaluate(), &capped).unwrap(), f.create_integer(3));
}
