//! Option payoffs.
//!
//! Payoffs describe the value of exercising an option as a function of the
//! underlying asset price and the strike.

use bt_core::Real;
use std::fmt;

/// Option type (call or put).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum OptionType {
    /// A call option (right to buy).
    Call,
    /// A put option (right to sell).
    Put,
}

impl OptionType {
    /// +1 for Call, −1 for Put.
    pub fn sign(self) -> Real {
        match self {
            OptionType::Call => 1.0,
            OptionType::Put => -1.0,
        }
    }
}

impl fmt::Display for OptionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionType::Call => write!(f, "Call"),
            OptionType::Put => write!(f, "Put"),
        }
    }
}

/// Intrinsic value of exercising at a given spot.
pub trait Payoff: fmt::Debug + Send + Sync {
    /// Payoff when the underlying is at `spot` and the strike is `strike`.
    fn value(&self, spot: Real, strike: Real) -> Real;

    /// Human-readable name.
    fn name(&self) -> &str;
}

/// Plain vanilla payoff `max(φ(S − K), 0)` where `φ = +1` for Call, `−1`
/// for Put.
impl Payoff for OptionType {
    fn value(&self, spot: Real, strike: Real) -> Real {
        (self.sign() * (spot - strike)).max(0.0)
    }

    fn name(&self) -> &str {
        match self {
            OptionType::Call => "Call",
            OptionType::Put => "Put",
        }
    }
}
