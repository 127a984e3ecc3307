//! # bt-methods
//!
//! Numerical methods for binomial pricing: reconciliation of the time grid,
//! the Cox-Ross-Rubinstein risk-neutral factors, and the two lattice
//! builders (forward for the underlying, backward for the derivative).
//!
//! # Modules
//!
//! * [`lattice`]: step grid, risk-neutral factors, triangular storage,
//!   asset and derivative lattice builders, progress observers

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Modules ───────────────────────────────────────────────────────────────────

/// Lattice methods: binomial trees and backward induction.
pub mod lattice;

// ── Convenience re-exports ────────────────────────────────────────────────────

pub use lattice::{
    build_asset_lattice, build_derivative_lattice, check_volatility, AmericanExercise,
    CurrencyEvolution, EuropeanExercise, EvolutionRule, ExerciseRule, FnProgress,
    FuturesEvolution, NoProgress, ProgressObserver, RiskNeutralFactors, SpotEvolution, StepGrid,
    TracingProgress, TriangularLattice,
};
