//! Kinds of underlying asset.
//!
//! The kind decides the continuous yield used in the risk-neutral drift:
//! a stock pays its dividend yield, a futures contract has zero net carry,
//! and a currency earns the foreign risk-free rate.

use bt_core::Rate;
use std::fmt;

/// The asset an option is written on.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "lowercase"))]
pub enum Underlying {
    /// A stock or index paying a continuous dividend yield.
    Stock,
    /// A futures contract.
    Futures,
    /// A currency pair, in domestic units per foreign unit.
    Currency {
        /// Continuously compounded foreign risk-free rate.
        foreign_rate: Rate,
    },
}

impl Underlying {
    /// A currency pair whose foreign leg earns `foreign_rate`.
    pub fn currency(foreign_rate: Rate) -> Self {
        Underlying::Currency { foreign_rate }
    }
}

impl fmt::Display for Underlying {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Underlying::Stock => write!(f, "Stock"),
            Underlying::Futures => write!(f, "Futures"),
            Underlying::Currency { .. } => write!(f, "Currency"),
        }
    }
}
