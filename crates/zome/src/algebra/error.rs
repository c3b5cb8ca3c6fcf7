use std::fmt;

/// Errors surfaced by field construction, arithmetic, and parsing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AlgebraError {
    /// Zero denominator, reciprocal of zero, or a singular matrix.
    DivisionByZero,
    /// Term, multiplier, or axis index outside `[0, order)`.
    IndexOutOfRange { index: usize, order: usize },
    /// Operands or input arrays of incompatible shape.
    DimensionMismatch { expected: usize, found: usize },
    /// Malformed number or vector string for the selected format.
    ParseFailure { input: String, reason: String },
    /// Field parameters that do not define a field (e.g. √4).
    UnsupportedField { reason: String },
}

impl AlgebraError {
    pub(crate) fn parse(input: &str, reason: impl Into<String>) -> Self {
        Self::ParseFailure {
            input: input.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn unsupported(reason: impl Into<String>) -> Self {
        Self::UnsupportedField {
            reason: reason.into(),
        }
    }
}

impl fmt::Display for AlgebraError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DivisionByZero => write!(f, "division by zero"),
            Self::IndexOutOfRange { index, order } => {
                write!(f, "index {index} out of range [0, {order})")
            }
            Self::DimensionMismatch { expected, found } => {
                write!(f, "dimension mismatch: expected {expected}, found {found}")
            }
            Self::ParseFailure { input, reason } => {
                write!(f, "cannot parse {input:?}: {reason}")
            }
            Self::UnsupportedField { reason } => write!(f, "unsupported field: {reason}"),
        }
    }
}

impl std::error::Error for AlgebraError {}
