//! # bintree
//!
//! Recombining binomial lattice pricing for European and American options
//! on stocks, futures and currencies.
//!
//! This crate re-exports the `bt-*` workspace crates. Application code
//! should depend on it rather than on the individual crates.
//!
//! ## Quick start
//!
//! ```rust
//! use bintree::prelude::*;
//!
//! let params = PricingParameters::builder()
//!     .spot(100.0)
//!     .strike(100.0)
//!     .rate(0.05)
//!     .volatility(0.2)
//!     .horizon(1.0)
//!     .steps(201)
//!     .build()?;
//!
//! let put = BinomialPricer::new(params, BinomialOption::american_put(Underlying::Stock))?;
//! assert!(put.value()? > 6.0);
//! # Ok::<(), bintree::core::Error>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

/// Scalar aliases, errors and the lazy evaluation pattern.
pub use bt_core as core;

/// Floating-point comparison and the normal distribution.
pub use bt_math as math;

/// Lattice storage, time grid and tree builders.
pub use bt_methods as methods;

/// Option, underlying and exercise records.
pub use bt_instruments as instruments;

/// Binomial and closed-form pricing engines.
pub use bt_pricingengines as pricingengines;

/// The types needed to price an option.
pub mod prelude {
    pub use bt_core::{Error, LazyObject, Result};
    pub use bt_instruments::{
        BinomialOption, ExerciseType, OptionType, Payoff, PricingEngine, Underlying,
    };
    pub use bt_methods::{NoProgress, ProgressObserver, TracingProgress};
    pub use bt_pricingengines::{
        AnalyticEuropeanPricer, BinomialPricer, PricingConfig, PricingParameters,
    };
}

#[cfg(test)]
mod tests {
    use super::prelude::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn prelude_prices_a_futures_call() {
        let params = PricingParameters::builder()
            .spot(50.0)
            .strike(52.0)
            .rate(0.04)
            .volatility(0.3)
            .horizon(0.75)
            .steps(301)
            .build()
            .unwrap();
        let pricer =
            BinomialPricer::new(params, BinomialOption::european_put(Underlying::Futures)).unwrap();
        assert_abs_diff_eq!(pricer.npv().unwrap(), 6.14661, epsilon = 1e-4);
        assert!(!pricer.to_string().is_empty());
    }
}
