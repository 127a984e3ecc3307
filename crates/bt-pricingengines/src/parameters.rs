//! Pricing parameters and their builder.
//!
//! [`PricingParameters`] is the validated, immutable set of market and grid
//! inputs shared by every engine. It can only be obtained through
//! [`PricingParametersBuilder::build`] (or the [`PricingConfig`] record),
//! which reconciles the time grid and rejects unusable inputs up front.

use bt_core::{errors::Error, Price, Rate, Real, Result, Size, Time, Volatility};
use crate::binomial_engine::BinomialPricer;
use bt_instruments::BinomialOption;
use bt_methods::{check_volatility, StepGrid};

/// Validated market and grid inputs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PricingParameters {
    spot: Price,
    strike: Price,
    rate: Rate,
    dividend_yield: Rate,
    volatility: Volatility,
    grid: StepGrid,
}

impl PricingParameters {
    /// Start building a parameter set.
    pub fn builder() -> PricingParametersBuilder {
        PricingParametersBuilder::default()
    }

    /// Spot price of the underlying `S0`.
    pub fn spot(&self) -> Price {
        self.spot
    }

    /// Strike `K`.
    pub fn strike(&self) -> Price {
        self.strike
    }

    /// Continuously compounded risk-free rate `r`.
    pub fn rate(&self) -> Rate {
        self.rate
    }

    /// Nominal continuous dividend yield `q`.
    ///
    /// Underlyings may override it (see `EvolutionRule::carry_yield`).
    pub fn dividend_yield(&self) -> Rate {
        self.dividend_yield
    }

    /// Volatility `σ`, in the time unit of the rate.
    pub fn volatility(&self) -> Volatility {
        self.volatility
    }

    /// The reconciled time grid.
    pub fn grid(&self) -> &StepGrid {
        &self.grid
    }

    /// Horizon `T`.
    pub fn horizon(&self) -> Time {
        self.grid.horizon()
    }

    /// Step size actually used.
    pub fn dt(&self) -> Time {
        self.grid.dt()
    }

    /// Number of time instants `N`.
    pub fn steps(&self) -> Size {
        self.grid.steps()
    }
}

/// Builder for [`PricingParameters`].
///
/// Exactly two of [`horizon`](Self::horizon), [`step_size`](Self::step_size)
/// and [`steps`](Self::steps) must be set. The dividend yield defaults to 0.
#[derive(Debug, Clone, Default)]
pub struct PricingParametersBuilder {
    spot: Option<Price>,
    strike: Option<Price>,
    rate: Option<Rate>,
    dividend_yield: Option<Rate>,
    volatility: Option<Volatility>,
    horizon: Option<Time>,
    step_size: Option<Time>,
    steps: Option<Size>,
}

impl PricingParametersBuilder {
    /// Spot price `S0` (> 0).
    pub fn spot(mut self, spot: Price) -> Self {
        self.spot = Some(spot);
        self
    }

    /// Strike `K` (> 0).
    pub fn strike(mut self, strike: Price) -> Self {
        self.strike = Some(strike);
        self
    }

    /// Risk-free rate `r`.
    pub fn rate(mut self, rate: Rate) -> Self {
        self.rate = Some(rate);
        self
    }

    /// Continuous dividend yield `q`.
    pub fn dividend_yield(mut self, dividend_yield: Rate) -> Self {
        self.dividend_yield = Some(dividend_yield);
        self
    }

    /// Volatility `σ` (≥ 0).
    pub fn volatility(mut self, volatility: Volatility) -> Self {
        self.volatility = Some(volatility);
        self
    }

    /// Horizon `T`.
    pub fn horizon(mut self, horizon: Time) -> Self {
        self.horizon = Some(horizon);
        self
    }

    /// Requested step size `dT`.
    pub fn step_size(mut self, step_size: Time) -> Self {
        self.step_size = Some(step_size);
        self
    }

    /// Number of time instants `N`.
    pub fn steps(mut self, steps: Size) -> Self {
        self.steps = Some(steps);
        self
    }

    /// Validate the inputs and reconcile the time grid.
    ///
    /// # Errors
    /// * [`Error::InvalidConfiguration`]: the grid cannot be reconciled
    /// * [`Error::InvalidVolatility`]: `σ` negative or non-finite
    /// * [`Error::InvalidArgument`]: a required input is missing, a price
    ///   is not positive, or a rate is not finite
    pub fn build(self) -> Result<PricingParameters> {
        let grid = StepGrid::reconcile(self.horizon, self.step_size, self.steps)?;
        let volatility = check_volatility(required(self.volatility, "volatility")?)?;
        let spot = positive(required(self.spot, "spot price")?, "spot price")?;
        let strike = positive(required(self.strike, "strike")?, "strike")?;
        let rate = finite(required(self.rate, "risk-free rate")?, "risk-free rate")?;
        let dividend_yield = finite(self.dividend_yield.unwrap_or(0.0), "dividend yield")?;
        Ok(PricingParameters {
            spot,
            strike,
            rate,
            dividend_yield,
            volatility,
            grid,
        })
    }
}

fn required<T>(value: Option<T>, name: &str) -> Result<T> {
    value.ok_or_else(|| Error::InvalidArgument(format!("{name} is required")))
}

fn positive(value: Real, name: &str) -> Result<Real> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(Error::InvalidArgument(format!(
            "{name} must be finite and positive, got {value}"
        )))
    }
}

fn finite(value: Real, name: &str) -> Result<Real> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(Error::InvalidArgument(format!("{name} must be finite, got {value}")))
    }
}

/// A complete pricing request as a flat, deserializable record.
///
/// ```json
/// {
///   "spot": 100.0, "strike": 95.0, "rate": 0.05, "volatility": 0.25,
///   "horizon": 1.0, "steps": 201,
///   "option": {
///     "underlying": {"kind": "currency", "foreign_rate": 0.03},
///     "exercise": "american",
///     "option_type": "put"
///   }
/// }
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PricingConfig {
    /// Spot price `S0`.
    pub spot: Price,
    /// Strike `K`.
    pub strike: Price,
    /// Risk-free rate `r`.
    pub rate: Rate,
    /// Continuous dividend yield `q`.
    #[cfg_attr(feature = "serde", serde(default))]
    pub dividend_yield: Rate,
    /// Volatility `σ`.
    pub volatility: Volatility,
    /// Horizon `T`.
    #[cfg_attr(feature = "serde", serde(default))]
    pub horizon: Option<Time>,
    /// Step size `dT`.
    #[cfg_attr(feature = "serde", serde(default))]
    pub step_size: Option<Time>,
    /// Number of time instants `N`.
    #[cfg_attr(feature = "serde", serde(default))]
    pub steps: Option<Size>,
    /// The option to price.
    pub option: BinomialOption,
}

impl TryFrom<&PricingConfig> for PricingParameters {
    type Error = Error;

    fn try_from(config: &PricingConfig) -> Result<Self> {
        let mut builder = PricingParameters::builder()
            .spot(config.spot)
            .strike(config.strike)
            .rate(config.rate)
            .dividend_yield(config.dividend_yield)
            .volatility(config.volatility);
        builder.horizon = config.horizon;
        builder.step_size = config.step_size;
        builder.steps = config.steps;
        builder.build()
    }
}

impl PricingConfig {
    /// Validate the request and create its binomial pricer.
    pub fn into_pricer(self) -> Result<BinomialPricer> {
        let parameters = PricingParameters::try_from(&self)?;
        BinomialPricer::new(parameters, self.option)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn base() -> PricingParametersBuilder {
        PricingParameters::builder()
            .spot(100.0)
            .strike(100.0)
            .rate(0.05)
            .volatility(0.2)
    }

    #[test]
    fn builds_with_default_yield() {
        let p = base().horizon(1.0).steps(101).build().unwrap();
        assert_eq!(p.dividend_yield(), 0.0);
        assert_eq!(p.steps(), 101);
        assert_abs_diff_eq!(p.dt(), 0.01, epsilon = 1e-15);
    }

    #[test]
    fn actual_step_size_is_readable() {
        let p = base().horizon(1.0).step_size(0.3).build().unwrap();
        assert_eq!(p.steps(), 5);
        assert_abs_diff_eq!(p.dt(), 0.25, epsilon = 1e-15);
    }

    #[test]
    fn grid_errors_come_first() {
        let err = base().volatility(-1.0).horizon(1.0).build().unwrap_err();
        assert!(matches!(err, Error::InvalidConfiguration(_)));
    }

    #[test]
    fn unrepresentable_grid_is_an_error() {
        let err = base().horizon(1.0).step_size(1e-300).build().unwrap_err();
        assert!(matches!(err, Error::InvalidConfiguration(_)));
    }

    #[test]
    fn config_becomes_a_pricer() {
        let config = PricingConfig {
            spot: 100.0,
            strike: 100.0,
            rate: 0.05,
            dividend_yield: 0.0,
            volatility: 0.2,
            horizon: Some(1.0),
            step_size: None,
            steps: Some(2),
            option: BinomialOption::european_call(bt_instruments::Underlying::Stock),
        };
        let pricer = config.into_pricer().unwrap();
        assert_abs_diff_eq!(pricer.value().unwrap(), 12.1623, epsilon = 1e-4);
    }

    #[test]
    fn negative_volatility_is_rejected() {
        let err = base().volatility(-0.2).horizon(1.0).steps(10).build().unwrap_err();
        assert_eq!(err, Error::InvalidVolatility(-0.2));
    }

    #[test]
    fn prices_must_be_positive() {
        let err = base().spot(0.0).horizon(1.0).steps(10).build().unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
        let err = base().strike(-5.0).horizon(1.0).steps(10).build().unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
    }

    #[test]
    fn missing_inputs_are_named() {
        let err = PricingParameters::builder()
            .strike(100.0)
            .rate(0.05)
            .volatility(0.2)
            .horizon(1.0)
            .steps(10)
            .build()
            .unwrap_err();
        assert_eq!(err, Error::InvalidArgument("spot price is required".into()));
    }

    #[test]
    fn config_converts_to_parameters() {
        let config = PricingConfig {
            spot: 100.0,
            strike: 95.0,
            rate: 0.05,
            dividend_yield: 0.01,
            volatility: 0.25,
            horizon: Some(2.0),
            step_size: None,
            steps: Some(5),
            option: BinomialOption::american_put(bt_instruments::Underlying::Stock),
        };
        let p = PricingParameters::try_from(&config).unwrap();
        assert_abs_diff_eq!(p.dt(), 0.5, epsilon = 1e-15);
        assert_eq!(p.dividend_yield(), 0.01);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn config_from_json() {
        let config: PricingConfig = serde_json::from_str(
            r#"{
                "spot": 100.0, "strike": 95.0, "rate": 0.05, "volatility": 0.25,
                "horizon": 1.0, "steps": 201,
                "option": {
                    "underlying": {"kind": "currency", "foreign_rate": 0.03},
                    "exercise": "american",
                    "option_type": "put"
                }
            }"#,
        )
        .unwrap();
        assert_eq!(config.dividend_yield, 0.0);
        assert_eq!(config.step_size, None);
        let p = PricingParameters::try_from(&config).unwrap();
        assert_eq!(p.steps(), 201);
    }
}
