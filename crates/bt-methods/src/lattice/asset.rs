//! Forward construction of the underlying's price lattice.
//!
//! The lattice is filled from the root outwards: every known node `(i, j)`
//! produces its two children at step `i + 1` through an [`EvolutionRule`].
//! All current underlyings move multiplicatively (`S·d`, `S·u`); they differ
//! only in the carry yield folded into the risk-neutral drift, which the
//! rule reports through [`EvolutionRule::carry_yield`] before the factors
//! are computed.

use super::progress::ProgressObserver;
use super::{RiskNeutralFactors, TriangularLattice};
use bt_core::{Rate, Real, Size};
use std::fmt;
use tracing::debug;

const LABEL: &str = "asset lattice";

/// How the underlying evolves between consecutive lattice steps.
pub trait EvolutionRule: fmt::Debug {
    /// The continuous yield `q` to use in the risk-neutral drift, given the
    /// risk-free `rate` and the nominal `dividend_yield`.
    fn carry_yield(&self, rate: Rate, dividend_yield: Rate) -> Rate;

    /// Value of the root node for a given spot price.
    fn root(&self, spot: Real) -> Real {
        spot
    }

    /// The `(down, up)` children of a node holding `parent`.
    fn children(&self, parent: Real, factors: &RiskNeutralFactors) -> (Real, Real) {
        (parent * factors.down(), parent * factors.up())
    }
}

/// A spot asset paying a continuous dividend yield (stocks, indices).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SpotEvolution;

impl EvolutionRule for SpotEvolution {
    fn carry_yield(&self, _rate: Rate, dividend_yield: Rate) -> Rate {
        dividend_yield
    }
}

/// A futures contract.
///
/// Entering a futures position costs nothing, so its risk-neutral drift is
/// zero: the yield is set equal to the risk-free rate.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FuturesEvolution;

impl EvolutionRule for FuturesEvolution {
    fn carry_yield(&self, rate: Rate, _dividend_yield: Rate) -> Rate {
        rate
    }
}

/// A currency pair quoted in domestic units per foreign unit.
///
/// Holding the foreign currency earns the foreign risk-free rate, which
/// plays the role of the dividend yield.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurrencyEvolution {
    /// Continuously compounded foreign risk-free rate.
    pub foreign_rate: Rate,
}

impl CurrencyEvolution {
    /// Rule for a pair whose foreign leg earns `foreign_rate`.
    pub fn new(foreign_rate: Rate) -> Self {
        Self { foreign_rate }
    }
}

impl EvolutionRule for CurrencyEvolution {
    fn carry_yield(&self, _rate: Rate, _dividend_yield: Rate) -> Rate {
        self.foreign_rate
    }
}

/// Build the asset lattice with `steps` time instants.
///
/// Step `i` is expanded into step `i + 1` for `i = 0 … steps − 2`; each node
/// only ever reads its own value and writes its two children, so the result
/// is independent of the observer and of iteration details.
///
/// # Panics
/// Panics if `steps == 0`.
pub fn build_asset_lattice(
    steps: Size,
    spot: Real,
    factors: &RiskNeutralFactors,
    rule: &dyn EvolutionRule,
    progress: &dyn ProgressObserver,
) -> TriangularLattice {
    let mut lattice = TriangularLattice::new(steps);
    lattice.set(0, 0, rule.root(spot));

    let expansions = lattice.steps() - 1;
    progress.on_start(LABEL, expansions);
    for i in 0..expansions {
        for j in 0..=i {
            let (down, up) = rule.children(lattice.get(i, j), factors);
            lattice.set(i + 1, j, down);
            lattice.set(i + 1, j + 1, up);
        }
        progress.on_step(LABEL, i + 1, expansions);
    }
    progress.on_finish(LABEL);

    debug!(steps, nodes = lattice.node_count(), "asset lattice built");
    lattice
}
