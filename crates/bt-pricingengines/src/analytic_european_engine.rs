//! Analytic European option pricing (Black-Scholes-Merton).
//!
//! Prices European vanilla options using the closed-form Black-Scholes-Merton
//! formula. It is the continuous-time limit the binomial lattice converges
//! to, and is handy as a reference when choosing a step count.

use crate::binomial_engine::evolution_rule;
use crate::parameters::PricingParameters;
use bt_core::{errors::Result, Price, Rate, Real, Time, Volatility};
use bt_instruments::{OptionType, PricingEngine, Underlying};
use bt_math::distributions::normal_cdf;

/// Closed-form price of a European option.
///
/// $$C = S e^{-qT} N(d_1) - K e^{-rT} N(d_2)$$
/// $$P = K e^{-rT} N(-d_2) - S e^{-qT} N(-d_1)$$
///
/// where $d_{1,2} = \frac{\ln(S/K) + (r - q \pm \sigma^2/2)T}{\sigma\sqrt{T}}$.
///
/// An expired option is worth its intrinsic value; with zero variance the
/// price is the discounted intrinsic value of the forward.
pub fn black_scholes_merton(
    option_type: OptionType,
    spot: Price,
    strike: Price,
    risk_free_rate: Rate,
    dividend_yield: Rate,
    volatility: Volatility,
    time_to_expiry: Time,
) -> Price {
    let phi = option_type.sign();
    let t = time_to_expiry;

    if t <= 0.0 {
        return (phi * (spot - strike)).max(0.0);
    }

    let r = risk_free_rate;
    let q = dividend_yield;
    let sigma = volatility;
    let std_dev = sigma * t.sqrt();
    let df_r = (-r * t).exp();
    let df_q = (-q * t).exp();

    if std_dev <= 1e-15 {
        return (phi * (spot * df_q - strike * df_r)).max(0.0);
    }

    let d1 = ((spot / strike).ln() + (r - q + 0.5 * sigma * sigma) * t) / std_dev;
    let d2 = d1 - std_dev;

    phi * (spot * df_q * normal_cdf(phi * d1) - strike * df_r * normal_cdf(phi * d2))
}

/// Closed-form engine over the same inputs as the binomial pricer.
///
/// The underlying's carry rule applies here too: futures use `q = r` (the
/// Black-76 case) and currencies use the foreign rate (Garman-Kohlhagen).
#[derive(Debug, Clone)]
pub struct AnalyticEuropeanPricer {
    parameters: PricingParameters,
    option_type: OptionType,
    carry_yield: Rate,
}

impl AnalyticEuropeanPricer {
    /// Create an engine for a European `option_type` on `underlying`.
    pub fn new(
        parameters: PricingParameters,
        underlying: Underlying,
        option_type: OptionType,
    ) -> Self {
        let carry_yield = evolution_rule(underlying)
            .carry_yield(parameters.rate(), parameters.dividend_yield());
        Self {
            parameters,
            option_type,
            carry_yield,
        }
    }

    /// The yield used in the drift after the underlying's carry rule.
    pub fn carry_yield(&self) -> Rate {
        self.carry_yield
    }

    /// The fair value.
    pub fn value(&self) -> Real {
        let p = &self.parameters;
        black_scholes_merton(
            self.option_type,
            p.spot(),
            p.strike(),
            p.rate(),
            self.carry_yield,
            p.volatility(),
            p.horizon(),
        )
    }
}

impl PricingEngine for AnalyticEuropeanPricer {
    fn npv(&self) -> Result<Price> {
        Ok(self.value())
    }
}
