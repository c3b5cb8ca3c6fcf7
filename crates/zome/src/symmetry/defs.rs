//! Built-in symmetry groups.
//!
//! A definition supplies geometry only: rotation generators, the vertices
//! of one fundamental chamber, and the orbits to create. Numbering the
//! orientations and closing the group is the engine's job.
//!
//! Icosahedral (order 60, fields containing φ)
//! - 5-fold about (0, 1, φ): ½[[φ-1, -φ, 1], [φ, 1, φ-1], [-1, φ-1, φ]]
//! - 3-fold about (1, 1, 1): cyclic coordinate shift
//! - 2-fold about (1, 0, 0): diag(1, -1, -1)
//! - chamber: blue (1, 0, 0), red (φ, 0, 1), yellow (φ+1, 1, 0)
//! - green (1, 1, 0), orange (φ, 1, 0), purple (1, φ+1, 0): 60 axes each,
//!   prototypes outside the chamber
//!
//! Octahedral (order 24, any field)
//! - 4-fold about (1, 0, 0) and the cyclic coordinate shift
//! - chamber: blue (1, 0, 0), green (1, 1, 0), yellow (1, 1, 1)

use std::fmt;
use std::str::FromStr;

use crate::algebra::{AlgebraicMatrix, AlgebraicNumber, AlgebraicVector, Field};

use super::error::SymmetryError;
use super::orbit::{OrbitSpec, SpecialOrbit};

pub trait SymmetryDefinition: Send + Sync {
    fn name(&self) -> &str;

    /// Number of rotations (the chiral order).
    fn order(&self) -> usize;

    fn supports(&self, _field: &Field) -> bool {
        true
    }

    /// Rotation matrices that generate the group.
    fn generators(&self, field: &Field) -> Result<Vec<AlgebraicMatrix>, SymmetryError>;

    /// Fundamental chamber vertices in blue, red, yellow order.
    fn chamber(&self, field: &Field) -> Result<[AlgebraicVector; 3], SymmetryError>;

    /// Strictly interior point of the chamber; its orbit numbers the
    /// orientations.
    fn chiral_prototype(&self, field: &Field) -> Result<AlgebraicVector, SymmetryError> {
        let [b, r, y] = self.chamber(field)?;
        Ok(b.plus(&r).plus(&y))
    }

    /// Orbits to create, frame orbit first.
    fn orbits(&self, field: &Field) -> Result<Vec<OrbitSpec>, SymmetryError>;

    /// Orbit names playing the special roles.
    fn special_orbits(&self) -> Vec<(SpecialOrbit, &'static str)>;
}

fn vector(field: &Field, coords: [AlgebraicNumber; 3]) -> AlgebraicVector {
    AlgebraicVector::new(field.clone(), coords.to_vec())
}

fn matrix(rows: [[AlgebraicNumber; 3]; 3]) -> Result<AlgebraicMatrix, SymmetryError> {
    Ok(AlgebraicMatrix::from_rows(
        rows.into_iter().map(|r| r.to_vec()).collect(),
    )?)
}

/// The coordinate shift (x, y, z) -> (z, x, y).
fn cyclic(field: &Field) -> Result<AlgebraicMatrix, SymmetryError> {
    let (o, i) = (field.zero(), field.one());
    matrix([
        [o.clone(), o.clone(), i.clone()],
        [i.clone(), o.clone(), o.clone()],
        [o.clone(), i, o],
    ])
}

#[derive(Clone, Copy, Debug, Default)]
pub struct Icosahedral;

impl Icosahedral {
    fn phi(field: &Field) -> Result<AlgebraicNumber, SymmetryError> {
        field.golden_ratio().ok_or_else(|| {
            SymmetryError::Field(crate::algebra::AlgebraError::unsupported(format!(
                "icosahedral symmetry needs the golden ratio, {field} has none"
            )))
        })
    }
}

impl SymmetryDefinition for Icosahedral {
    fn name(&self) -> &str {
        "icosahedral"
    }

    fn order(&self) -> usize {
        60
    }

    fn supports(&self, field: &Field) -> bool {
        field.golden_ratio().is_some()
    }

    fn generators(&self, field: &Field) -> Result<Vec<AlgebraicMatrix>, SymmetryError> {
        let phi = Self::phi(field)?;
        let (o, i) = (field.zero(), field.one());
        let a = phi.minus(&i);
        let half = field.create_rational(1, 2)?;
        let five = matrix([
            [a.clone(), phi.negate(), i.clone()],
            [phi.clone(), i.clone(), a.clone()],
            [i.negate(), a, phi],
        ])?
        .scale(&half);
        let two = matrix([
            [i.clone(), o.clone(), o.clone()],
            [o.clone(), i.negate(), o.clone()],
            [o.clone(), o, i.negate()],
        ])?;
        Ok(vec![five, cyclic(field)?, two])
    }

    fn chamber(&self, field: &Field) -> Result<[AlgebraicVector; 3], SymmetryError> {
        let phi = Self::phi(field)?;
        let (o, i) = (field.zero(), field.one());
        Ok([
            vector(field, [i.clone(), o.clone(), o.clone()]),
            vector(field, [phi.clone(), o.clone(), i.clone()]),
            vector(field, [phi.plus(&i), i, o]),
        ])
    }

    fn orbits(&self, field: &Field) -> Result<Vec<OrbitSpec>, SymmetryError> {
        let [blue, red, yellow] = self.chamber(field)?;
        let phi = Self::phi(field)?;
        let (o, i) = (field.zero(), field.one());
        Ok(vec![
            OrbitSpec::new("blue", blue),
            OrbitSpec::new("red", red).half_sizes(true),
            OrbitSpec::new("yellow", yellow).half_sizes(true),
            OrbitSpec::new("green", vector(field, [i.clone(), i.clone(), o.clone()])),
            OrbitSpec::new("orange", vector(field, [phi.clone(), i.clone(), o.clone()])),
            OrbitSpec::new("purple", vector(field, [i.clone(), phi.plus(&i), o])),
            OrbitSpec::new("black", self.chiral_prototype(field)?),
        ])
    }

    fn special_orbits(&self) -> Vec<(SpecialOrbit, &'static str)> {
        vec![
            (SpecialOrbit::Blue, "blue"),
            (SpecialOrbit::Red, "red"),
            (SpecialOrbit::Yellow, "yellow"),
            (SpecialOrbit::Black, "black"),
        ]
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct Octahedral;

impl SymmetryDefinition for Octahedral {
    fn name(&self) -> &str {
        "octahedral"
    }

    fn order(&self) -> usize {
        24
    }

    fn generators(&self, field: &Field) -> Result<Vec<AlgebraicMatrix>, SymmetryError> {
        let (o, i) = (field.zero(), field.one());
        let four = matrix([
            [i.clone(), o.clone(), o.clone()],
            [o.clone(), o.clone(), i.negate()],
            [o.clone(), i, o],
        ])?;
        Ok(vec![four, cyclic(field)?])
    }

    fn chamber(&self, field: &Field) -> Result<[AlgebraicVector; 3], SymmetryError> {
        Ok([
            field.create_integer_vector(&[&[1], &[0], &[0]])?,
            field.create_integer_vector(&[&[1], &[1], &[0]])?,
            field.create_integer_vector(&[&[1], &[1], &[1]])?,
        ])
    }

    fn orbits(&self, field: &Field) -> Result<Vec<OrbitSpec>, SymmetryError> {
        let [blue, green, yellow] = self.chamber(field)?;
        Ok(vec![
            OrbitSpec::new("blue", blue),
            OrbitSpec::new("green", green),
            OrbitSpec::new("yellow", yellow),
            OrbitSpec::new("black", self.chiral_prototype(field)?),
        ])
    }

    fn special_orbits(&self) -> Vec<(SpecialOrbit, &'static str)> {
        vec![
            (SpecialOrbit::Blue, "blue"),
            (SpecialOrbit::Red, "green"),
            (SpecialOrbit::Yellow, "yellow"),
            (SpecialOrbit::Black, "black"),
        ]
    }
}

/// Built-in symmetry groups by name.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SymmetryKind {
    Icosahedral,
    Octahedral,
}

impl SymmetryKind {
    pub const ALL: [SymmetryKind; 2] = [SymmetryKind::Icosahedral, SymmetryKind::Octahedral];

    pub fn definition(self) -> &'static dyn SymmetryDefinition {
        static ICOSAHEDRAL: Icosahedral = Icosahedral;
        static OCTAHEDRAL: Octahedral = Octahedral;
        match self {
            Self::Icosahedral => &ICOSAHEDRAL,
            Self::Octahedral => &OCTAHEDRAL,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Icosahedral => "icosahedral",
            Self::Octahedral => "octahedral",
        }
    }

    pub fn supports(self, field: &Field) -> bool {
        self.definition().supports(field)
    }
}

impl fmt::Display for SymmetryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SymmetryKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|k| k.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown symmetry {s:?} (icosahedral, octahedral)"))
    }
}
