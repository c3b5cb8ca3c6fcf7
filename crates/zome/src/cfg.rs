//! Tolerance defaults (internal).
//!
//! Policy
//! - Exact results never depend on these. They steer the real-valued
//!   heuristics (chiral region resolution, nearest-axis search, the cheap
//!   prefilter in front of exact parallel tests) and decide when an f64 sign
//!   is trusted before falling back to rational bounds.

/// Two cosines closer than this are treated as a tie when resolving the
/// chiral region of a direction; every tied region is tried exactly.
pub(crate) const TIE_EPS: f64 = 1e-9;
/// Real prefilter before an exact parallel test: candidates whose cosine to
/// the query falls below `1 - PARALLEL_EPS` are skipped.
pub(crate) const PARALLEL_EPS: f64 = 1e-6;
/// Squared norm below which a real vector counts as the origin.
pub(crate) const REAL_ZERO_EPS: f64 = 1e-24;
/// Relative error budget of an f64 basis sum: a sum farther than this
/// fraction of its summed magnitudes from zero has a trusted sign.
pub(crate) const SIGN_EPS: f64 = 1e-12;
/// Precision levels (`64 << level` bits) tried when the real sign is in
/// doubt.
pub(crate) const SIGN_LEVELS: usize = 16;
