//! Error types for bintree.
//!
//! Every failure in the library is an input problem detected before or while
//! building a lattice; there is no I/O, so nothing here is transient or worth
//! retrying.

use crate::{Probability, Real, Volatility};
use thiserror::Error;

/// The top-level error type used throughout bintree.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    /// The horizon / step size / step count triple cannot be reconciled.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Negative or non-finite volatility.
    #[error("invalid volatility: {0} (must be finite and non-negative)")]
    InvalidVolatility(Volatility),

    /// The risk-neutral up-probability is undefined or lies outside [0, 1].
    #[error(
        "invalid risk-neutral probability {probability} (up = {up}, down = {down}); \
         try a smaller step size or check rate, yield and volatility"
    )]
    InvalidProbability {
        /// The offending probability (NaN when up == down).
        probability: Probability,
        /// Up-move factor.
        up: Real,
        /// Down-move factor.
        down: Real,
    },

    /// Invalid argument.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

/// Shorthand `Result` type used throughout bintree.
pub type Result<T, E = Error> = std::result::Result<T, E>;
