//! Lattice methods for option pricing.
//!
//! # Overview
//!
//! * [`StepGrid`]: the reconciled (horizon, step size, step count) triple
//! * [`RiskNeutralFactors`]: up/down factors and the up-probability
//! * [`TriangularLattice`]: flattened storage for a recombining tree
//! * [`build_asset_lattice`]: forward recursion driven by an [`EvolutionRule`]
//! * [`build_derivative_lattice`]: backward induction driven by an
//!   [`ExerciseRule`] and a payoff
//!
//! Node `(i, j)` is the state at time step `i` after `j` up-moves; step `i`
//! has exactly `i + 1` nodes. The down-child of `(i, j)` is `(i + 1, j)`
//! and its up-child is `(i + 1, j + 1)`.

pub mod asset;
pub mod derivative;
pub mod progress;
pub mod risk_neutral;
pub mod step_grid;

pub use asset::{
    build_asset_lattice, CurrencyEvolution, EvolutionRule, FuturesEvolution, SpotEvolution,
};
pub use derivative::{build_derivative_lattice, AmericanExercise, EuropeanExercise, ExerciseRule};
pub use progress::{FnProgress, NoProgress, ProgressObserver, TracingProgress};
pub use risk_neutral::RiskNeutralFactors;
pub use step_grid::{check_volatility, StepGrid};

use bt_core::{Real, Size};

// ─── TriangularLattice ────────────────────────────────────────────────────────

/// A recombining binomial lattice stored as a flattened triangle.
///
/// Step `i` occupies `values[i(i+1)/2 ..= i(i+1)/2 + i]`, so a lattice of
/// `steps` time steps holds `steps (steps + 1) / 2` nodes.
#[derive(Debug, Clone, PartialEq)]
pub struct TriangularLattice {
    steps: Size,
    values: Vec<Real>,
}

impl TriangularLattice {
    /// A zero-filled lattice with `steps` time steps.
    ///
    /// # Panics
    /// Panics if `steps == 0`.
    pub fn new(steps: Size) -> Self {
        assert!(steps > 0, "a lattice needs at least one time step");
        Self {
            steps,
            values: vec![0.0; node_count(steps)],
        }
    }

    /// Number of time steps (rows).
    pub fn steps(&self) -> Size {
        self.steps
    }

    /// Total number of stored nodes.
    pub fn node_count(&self) -> Size {
        self.values.len()
    }

    /// Value at node `(i, j)`.
    ///
    /// # Panics
    /// Panics if `i >= steps()` or `j > i`.
    pub fn get(&self, i: Size, j: Size) -> Real {
        self.values[self.index(i, j)]
    }

    /// Value at node `(i, j)`, or `None` outside the triangle.
    pub fn try_get(&self, i: Size, j: Size) -> Option<Real> {
        (i < self.steps && j <= i).then(|| self.values[offset(i) + j])
    }

    /// The root node `(0, 0)`.
    pub fn root(&self) -> Real {
        self.values[0]
    }

    /// The `i + 1` nodes of step `i`, ordered by number of up-moves.
    pub fn step(&self, i: Size) -> &[Real] {
        assert!(i < self.steps, "step {i} out of range [0, {})", self.steps);
        &self.values[offset(i)..offset(i + 1)]
    }

    /// The nodes of the last step.
    pub fn terminal(&self) -> &[Real] {
        self.step(self.steps - 1)
    }

    /// Iterate over the steps from the root to the last step.
    pub fn iter_steps(&self) -> impl Iterator<Item = &[Real]> + '_ {
        (0..self.steps).map(move |i| self.step(i))
    }

    pub(crate) fn set(&mut self, i: Size, j: Size, value: Real) {
        let k = self.index(i, j);
        self.values[k] = value;
    }

    pub(crate) fn step_mut(&mut self, i: Size) -> &mut [Real] {
        &mut self.values[offset(i)..offset(i + 1)]
    }

    fn index(&self, i: Size, j: Size) -> Size {
        assert!(
            i < self.steps && j <= i,
            "node ({i}, {j}) outside a lattice of {} steps",
            self.steps
        );
        offset(i) + j
    }
}

#[inline]
fn offset(i: Size) -> Size {
    i * (i + 1) / 2
}

#[inline]
fn node_count(steps: Size) -> Size {
    offset(steps)
}

// ─── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn triangular_layout() {
        let mut lattice = TriangularLattice::new(4);
        assert_eq!(lattice.steps(), 4);
        assert_eq!(lattice.node_count(), 10);

        for i in 0..4 {
            for j in 0..=i {
                lattice.set(i, j, (10 * i + j) as Real);
            }
        }
        assert_eq!(lattice.root(), 0.0);
        assert_eq!(lattice.get(3, 2), 32.0);
        assert_eq!(lattice.step(2), &[20.0, 21.0, 22.0]);
        assert_eq!(lattice.terminal(), &[30.0, 31.0, 32.0, 33.0]);
        assert_eq!(lattice.try_get(2, 3), None);
        assert_eq!(lattice.try_get(4, 0), None);
        assert_eq!(lattice.try_get(1, 1), Some(11.0));

        let widths: Vec<usize> = lattice.iter_steps().map(<[Real]>::len).collect();
        assert_eq!(widths, vec![1, 2, 3, 4]);
    }

    #[test]
    #[should_panic(expected = "at least one time step")]
    fn zero_steps_is_refused() {
        TriangularLattice::new(0);
    }

    #[test]
    #[should_panic(expected = "outside a lattice")]
    fn upper_triangle_is_not_addressable() {
        let lattice = TriangularLattice::new(3);
        lattice.get(1, 2);
    }
}
