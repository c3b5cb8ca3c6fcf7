use std::fmt;

use crate::algebra::AlgebraError;

/// Errors surfaced while building or querying a symmetry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SymmetryError {
    /// Orientation or permutation index outside `[0, order)`.
    IndexOutOfRange { index: usize, order: usize },
    /// Structural precondition of `map_axes` violated, or no group element
    /// performs the requested mapping.
    MismatchedAxes { reason: String },
    /// No orbit with this name or id.
    UnknownOrbit { name: String },
    /// No field with this name in the registry.
    UnknownField { name: String },
    /// The generators did not produce `order` distinct orientations.
    IncompleteGroup { found: usize, order: usize },
    /// A normal that cannot seed an orbit (origin, wrong dimension, other field).
    DegenerateNormal { reason: String },
    /// Failure in the underlying field arithmetic.
    Field(AlgebraError),
}

impl SymmetryError {
    pub(crate) fn mismatched(reason: impl Into<String>) -> Self {
        Self::MismatchedAxes {
            reason: reason.into(),
        }
    }

    pub(crate) fn degenerate(reason: impl Into<String>) -> Self {
        Self::DegenerateNormal {
            reason: reason.into(),
        }
    }

    pub(crate) fn out_of_range(index: usize, order: usize) -> Self {
        Self::IndexOutOfRange { index, order }
    }
}

impl fmt::Display for SymmetryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IndexOutOfRange { index, order } => {
                write!(f, "orientation {index} out of range [0, {order})")
            }
            Self::MismatchedAxes { reason } => write!(f, "mismatched axes: {reason}"),
            Self::UnknownOrbit { name } => write!(f, "unknown orbit {name:?}"),
            Self::UnknownField { name } => write!(f, "unknown field {name:?}"),
            Self::IncompleteGroup { found, order } => {
                write!(f, "generators produced {found} of {order} orientations")
            }
            Self::DegenerateNormal { reason } => write!(f, "degenerate normal: {reason}"),
            Self::Field(e) => write!(f, "field arithmetic: {e}"),
        }
    }
}

impl std::error::Error for SymmetryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Field(e) => Some(e),
            _ => None,
        }
    }
}

impl From<AlgebraError> for SymmetryError {
    fn from(e: AlgebraError) -> Self {
        Self::Field(e)
    }
}
