//! Finite rotation groups acting on exact 3D vectors.
//!
//! Purpose
//! - Number the rotations of a point group (icosahedral: 60, octahedral:
//!   24) and keep them as both exact matrices and permutations of the
//!   numbering, so composing two orientations is a table lookup.
//! - Group zone axes into named orbits ("directions") and answer "which
//!   axis is this vector on" exactly.
//!
//! Layout
//! - `permutation`: bijections over orientation indices, group closure and
//!   subgroup closure.
//! - `orbit`: senses, orbit ids and sets, directions and axes.
//! - `defs`: generators, chamber and orbit tables of the built-in groups.
//! - `engine`: the `Symmetry` value tying it together.

mod defs;
mod engine;
mod error;
mod orbit;
mod permutation;

pub use defs::{Icosahedral, Octahedral, SymmetryDefinition, SymmetryKind};
pub use engine::Symmetry;
pub use error::SymmetryError;
pub use orbit::{
    Axis, AxisMap, Direction, OrbitDot, OrbitId, OrbitSet, OrbitSpec, Sense, SpecialOrbit,
};
pub use permutation::Permutation;
