//! # bt-pricingengines
//!
//! Pricing engines: the binomial lattice pricer and the closed-form
//! Black-Scholes-Merton reference, both driven by validated
//! [`PricingParameters`].

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod analytic_european_engine;
pub mod binomial_engine;
pub mod parameters;

pub use analytic_european_engine::{black_scholes_merton, AnalyticEuropeanPricer};
pub use binomial_engine::{evolution_rule, exercise_rule, BinomialPricer, Valuation};
pub use parameters::{PricingConfig, PricingParameters, PricingParametersBuilder};

