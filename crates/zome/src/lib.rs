//! Exact arithmetic over algebraic number fields and the finite symmetry
//! groups built on top of it.
//!
//! Layers (leaves first)
//! - `algebra`: fields such as Q(φ) or Q(√2), canonical numbers, vectors and
//!   matrices over them, string formats, and snapping of real input.
//! - `symmetry`: permutation groups over orientations, group closure, orbits
//!   ("directions") of zone axes, and axis lookup for arbitrary directions.
//! - `registry`: the explicitly owned table of fields and lazily built
//!   symmetries that document loaders and tools share.
//!
//! API Policy
//! - Exact values never pass through floating point; `to_real_*` conversions
//!   are one-way and only feed display and search heuristics.
//! - Mixing numbers from different fields in one operation is a programmer
//!   error and panics; every caller-input failure is a typed `Result`.

pub(crate) mod cfg;

pub mod algebra;
pub mod registry;
pub mod symmetry;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::algebra::{
        are_parallel, AlgebraError, AlgebraicField, AlgebraicMatrix, AlgebraicNumber,
        AlgebraicVector, Field, GoldenField, NearestCfg, NumberFormat, PolygonField, SqrtField,
        SqrtPhiField,
    };
    pub use crate::registry::Registry;
    pub use crate::symmetry::{
        Axis, AxisMap, Direction, OrbitId, OrbitSet, OrbitSpec, Permutation, Sense, SpecialOrbit,
        Symmetry, SymmetryError, SymmetryKind,
    };
}
