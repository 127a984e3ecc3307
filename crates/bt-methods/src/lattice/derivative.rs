//! Backward induction of the derivative's value lattice.
//!
//! The maturity row is seeded with the intrinsic payoff of the matching
//! asset nodes. Each earlier node then takes the discounted risk-neutral
//! expectation of its two children,
//! `V(i, j) = e^{−r·dT}·(p·V(i+1, j+1) + (1 − p)·V(i+1, j))`,
//! and the [`ExerciseRule`] decides whether immediate exercise can replace
//! that continuation value.

use super::progress::ProgressObserver;
use super::{RiskNeutralFactors, TriangularLattice};
use bt_core::{Rate, Real, Time};
use std::fmt;
use tracing::debug;

const LABEL: &str = "derivative lattice";

/// Decides a node's value from its continuation value and the payoff of
/// exercising immediately.
pub trait ExerciseRule: fmt::Debug {
    /// Value of a node whose underlying is at `spot`.
    ///
    /// `continuation` is the discounted expectation of the children.
    fn node_value(&self, continuation: Real, spot: Real, payoff: &dyn Fn(Real) -> Real) -> Real;
}

/// Exercise only at maturity: a node is worth its continuation value.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct EuropeanExercise;

impl ExerciseRule for EuropeanExercise {
    fn node_value(&self, continuation: Real, _spot: Real, _payoff: &dyn Fn(Real) -> Real) -> Real {
        continuation
    }
}

/// Exercise at any node: a node is worth the larger of holding and
/// exercising now.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AmericanExercise;

impl ExerciseRule for AmericanExercise {
    fn node_value(&self, continuation: Real, spot: Real, payoff: &dyn Fn(Real) -> Real) -> Real {
        continuation.max(payoff(spot))
    }
}

/// Build the derivative lattice aligned with `asset`.
///
/// # Arguments
/// * `asset`: the completed asset lattice
/// * `factors`: risk-neutral factors the asset lattice was built with
/// * `rate`: risk-free rate used for discounting
/// * `dt`: step size
/// * `payoff`: intrinsic value as a function of the underlying price
/// * `rule`: European or American exercise
pub fn build_derivative_lattice(
    asset: &TriangularLattice,
    factors: &RiskNeutralFactors,
    rate: Rate,
    dt: Time,
    payoff: &dyn Fn(Real) -> Real,
    rule: &dyn ExerciseRule,
    progress: &dyn ProgressObserver,
) -> TriangularLattice {
    let steps = asset.steps();
    let mut values = TriangularLattice::new(steps);

    let maturity = steps - 1;
    for (value, &spot) in values.step_mut(maturity).iter_mut().zip(asset.terminal()) {
        *value = payoff(spot);
    }

    let discount = (-rate * dt).exp();
    let p = factors.probability();
    let q = factors.down_probability();

    progress.on_start(LABEL, maturity);
    for (done, i) in (0..maturity).rev().enumerate() {
        for j in 0..=i {
            let continuation =
                discount * (p * values.get(i + 1, j + 1) + q * values.get(i + 1, j));
            values.set(i, j, rule.node_value(continuation, asset.get(i, j), payoff));
        }
        progress.on_step(LABEL, done + 1, maturity);
    }
    progress.on_finish(LABEL);

    debug!(steps, root = values.root(), "derivative lattice built");
    values
}
