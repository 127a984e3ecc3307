//! Cox-Ross-Rubinstein risk-neutral factors.
//!
//! `u = exp(σ√dT)`, `d = 1/u` and `p = (exp((r − q)·dT) − d) / (u − d)`.
//! The reciprocal down factor makes the lattice recombine: an up-move
//! followed by a down-move lands on the same node as the reverse order.

use bt_core::{errors::Error, Probability, Rate, Real, Result, Time, Volatility};
use tracing::debug;

/// Up/down factors and the risk-neutral up-probability for one time step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RiskNeutralFactors {
    up: Real,
    down: Real,
    probability: Probability,
}

impl RiskNeutralFactors {
    /// Compute the factors without validating the probability.
    ///
    /// `carry_yield` is the continuous yield `q` paid by the underlying, so
    /// the risk-neutral drift per step is `(rate − carry_yield)·dt`. With a
    /// zero `volatility · √dt` the up and down factors coincide and the
    /// probability is NaN or infinite.
    pub fn new(volatility: Volatility, rate: Rate, carry_yield: Rate, dt: Time) -> Self {
        let up = (volatility * dt.sqrt()).exp();
        let down = 1.0 / up;
        let probability = (((rate - carry_yield) * dt).exp() - down) / (up - down);
        Self {
            up,
            down,
            probability,
        }
    }

    /// Compute the factors and require `0 ≤ p ≤ 1`.
    ///
    /// # Errors
    /// [`Error::InvalidProbability`] when the probability is undefined
    /// (`u = d`) or outside the unit interval, which happens when the drift
    /// per step exceeds the volatility per step (large `|r − q|`, small `σ`
    /// or a long `dt`).
    pub fn checked(
        volatility: Volatility,
        rate: Rate,
        carry_yield: Rate,
        dt: Time,
    ) -> Result<Self> {
        let factors = Self::new(volatility, rate, carry_yield, dt);
        let p = factors.probability;
        if !(p.is_finite() && (0.0..=1.0).contains(&p)) {
            return Err(Error::InvalidProbability {
                probability: p,
                up: factors.up,
                down: factors.down,
            });
        }
        debug!(
            up = factors.up,
            down = factors.down,
            probability = p,
            "risk-neutral factors"
        );
        Ok(factors)
    }

    /// Up-move factor `u`.
    pub fn up(&self) -> Real {
        self.up
    }

    /// Down-move factor `d = 1/u`.
    pub fn down(&self) -> Real {
        self.down
    }

    /// Risk-neutral probability of an up-move.
    pub fn probability(&self) -> Probability {
        self.probability
    }

    /// Risk-neutral probability of a down-move, `1 − p`.
    pub fn down_probability(&self) -> Probability {
        1.0 - self.probability
    }
}
