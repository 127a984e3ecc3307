//! # bt-math
//!
//! Mathematical utilities: floating-point comparison and the standard normal
//! distribution (via statrs).

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Modules ───────────────────────────────────────────────────────────────────

/// Floating-point comparison utilities.
pub mod comparison;

/// Probability distributions.
pub mod distributions;

// ── Convenience re-exports ────────────────────────────────────────────────────

pub use comparison::nearest_integer;
pub use distributions::normal_cdf;
