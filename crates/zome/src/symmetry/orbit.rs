//! Orbits ("directions") of zone axes and the axes inside them.

use std::collections::BTreeSet;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::OnceLock;

use nalgebra::Vector3;

use crate::algebra::{AlgebraicNumber, AlgebraicVector};

/// Which way an axis points relative to its orbit's representative.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Sense {
    Plus,
    Minus,
}

impl Sense {
    pub const BOTH: [Sense; 2] = [Sense::Plus, Sense::Minus];

    pub fn flip(self) -> Self {
        match self {
            Self::Plus => Self::Minus,
            Self::Minus => Self::Plus,
        }
    }

    pub fn sign(self) -> f64 {
        match self {
            Self::Plus => 1.0,
            Self::Minus => -1.0,
        }
    }
}

/// Stable identity of an orbit inside one `Symmetry`. Ids are handed out
/// in creation order, so sorting by id gives insertion order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OrbitId(pub(crate) u32);

impl OrbitId {
    pub fn index(self) -> u32 {
        self.0
    }
}

/// Orbit membership set; iterates in creation order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OrbitSet {
    ids: BTreeSet<OrbitId>,
}

impl OrbitSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: OrbitId) -> bool {
        self.ids.insert(id)
    }

    pub fn remove(&mut self, id: OrbitId) -> bool {
        self.ids.remove(&id)
    }

    pub fn contains(&self, id: OrbitId) -> bool {
        self.ids.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = OrbitId> + '_ {
        self.ids.iter().copied()
    }
}

impl FromIterator<OrbitId> for OrbitSet {
    fn from_iter<I: IntoIterator<Item = OrbitId>>(iter: I) -> Self {
        Self {
            ids: iter.into_iter().collect(),
        }
    }
}

/// Roles a symmetry may assign to some of its orbits.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SpecialOrbit {
    Blue,
    Red,
    Yellow,
    /// The chiral orbit: one axis per fundamental region. Its presence
    /// enables the constant-time axis lookup.
    Black,
}

impl SpecialOrbit {
    pub const ALL: [SpecialOrbit; 4] = [
        SpecialOrbit::Blue,
        SpecialOrbit::Red,
        SpecialOrbit::Yellow,
        SpecialOrbit::Black,
    ];
}

/// Request to create an orbit.
#[derive(Clone, Debug)]
pub struct OrbitSpec {
    pub name: String,
    pub prototype: AlgebraicVector,
    /// Defaults to one.
    pub unit_length: Option<AlgebraicNumber>,
    pub half_sizes: bool,
    pub automatic: bool,
}

impl OrbitSpec {
    pub fn new(name: impl Into<String>, prototype: AlgebraicVector) -> Self {
        Self {
            name: name.into(),
            prototype,
            unit_length: None,
            half_sizes: false,
            automatic: false,
        }
    }

    pub fn half_sizes(mut self, yes: bool) -> Self {
        self.half_sizes = yes;
        self
    }

    pub fn unit_length(mut self, length: AlgebraicNumber) -> Self {
        self.unit_length = Some(length);
        self
    }

    pub fn automatic(mut self, yes: bool) -> Self {
        self.automatic = yes;
        self
    }
}

/// 2D location of an orbit inside the blue/red/yellow triangle, with
/// blue at (0, 0), red at (1, 0) and yellow at (1/2, √3/2).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrbitDot {
    pub x: f64,
    pub y: f64,
}

/// A named orbit of zone axes.
///
/// Axes are derived, never stored: the axis at `(sense, orientation)` has
/// normal `sense · M[orientation] · canonical`, where `canonical` is the
/// orbit's representative inside the fundamental chamber. The caller's
/// prototype is itself one of these axes, at `prototype_axis()`.
#[derive(Clone, Debug)]
pub struct Direction {
    pub(crate) id: OrbitId,
    pub(crate) name: String,
    pub(crate) prototype: AlgebraicVector,
    pub(crate) canonical: AlgebraicVector,
    pub(crate) prototype_axis: (Sense, usize),
    /// Generator of the stabilizer of `canonical`, if not trivial.
    pub(crate) rotation: Option<usize>,
    pub(crate) rotated_prototype: Option<usize>,
    pub(crate) unit_length: AlgebraicNumber,
    pub(crate) half_sizes: bool,
    pub(crate) automatic: bool,
    /// Unit real normals of the `Plus` axes, by orientation.
    pub(crate) real_axes: Vec<Vector3<f64>>,
    pub(crate) dot: OnceLock<Option<OrbitDot>>,
}

impl Direction {
    pub fn id(&self) -> OrbitId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn prototype(&self) -> &AlgebraicVector {
        &self.prototype
    }

    /// Representative inside the fundamental chamber.
    pub fn canonical(&self) -> &AlgebraicVector {
        &self.canonical
    }

    /// `(sense, orientation)` of the axis whose normal is the prototype.
    pub fn prototype_axis(&self) -> (Sense, usize) {
        self.prototype_axis
    }

    /// Orientation reached by rotating the prototype orientation (0) about
    /// the prototype axis; `None` when the axis has no rotational symmetry.
    pub fn rotated_prototype(&self) -> Option<usize> {
        self.rotated_prototype
    }

    pub fn unit_length(&self) -> &AlgebraicNumber {
        &self.unit_length
    }

    pub fn half_sizes(&self) -> bool {
        self.half_sizes
    }

    pub fn is_automatic(&self) -> bool {
        self.automatic
    }
}

/// One oriented normal of an orbit.
///
/// Equality and hashing use the orbit and the exact normal only: distinct
/// `(sense, orientation)` pairs that land on the same normal are the same
/// axis.
#[derive(Clone, Debug)]
pub struct Axis {
    pub(crate) orbit: OrbitId,
    pub(crate) sense: Sense,
    pub(crate) orientation: usize,
    pub(crate) normal: AlgebraicVector,
}

impl Axis {
    pub fn orbit(&self) -> OrbitId {
        self.orbit
    }

    pub fn sense(&self) -> Sense {
        self.sense
    }

    pub fn orientation(&self) -> usize {
        self.orientation
    }

    pub fn normal(&self) -> &AlgebraicVector {
        &self.normal
    }
}

impl PartialEq for Axis {
    fn eq(&self, other: &Self) -> bool {
        self.orbit == other.orbit && self.normal == other.normal
    }
}

impl Eq for Axis {}

impl Hash for Axis {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.orbit.hash(state);
        self.normal.hash(state);
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self.sense {
            Sense::Plus => '+',
            Sense::Minus => '-',
        };
        write!(f, "{s}{} {}", self.orientation, self.normal)
    }
}

/// Result of `map_axes`: the rotation, optionally composed with the
/// central inversion (a left-handed mapping).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AxisMap {
    pub orientation: usize,
    pub inverted: bool,
}
