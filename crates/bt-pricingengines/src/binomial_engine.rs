//! Binomial lattice pricing engine.
//!
//! [`BinomialPricer`] composes three strategies: how the underlying
//! evolves, when the option can be exercised, and what it pays. Inputs come
//! from a validated [`PricingParameters`]. The two lattices are built on the first
//! value request and kept for the lifetime of the pricer; new inputs need a
//! new pricer.

use crate::parameters::PricingParameters;
use bt_core::{LazyObject, Price, Rate, Result};
use bt_instruments::{BinomialOption, ExerciseType, Payoff, PricingEngine, Underlying};
use bt_methods::{
    build_asset_lattice, build_derivative_lattice, AmericanExercise, CurrencyEvolution,
    EuropeanExercise, EvolutionRule, ExerciseRule, FuturesEvolution, NoProgress,
    ProgressObserver, RiskNeutralFactors, SpotEvolution, TriangularLattice,
};
use std::cell::OnceCell;
use std::fmt;
use tracing::{debug, debug_span};

/// The evolution rule for an underlying kind.
pub fn evolution_rule(underlying: Underlying) -> Box<dyn EvolutionRule> {
    match underlying {
        Underlying::Stock => Box::new(SpotEvolution),
        Underlying::Futures => Box::new(FuturesEvolution),
        Underlying::Currency { foreign_rate } => Box::new(CurrencyEvolution::new(foreign_rate)),
    }
}

/// The exercise rule for an exercise style.
pub fn exercise_rule(exercise: ExerciseType) -> Box<dyn ExerciseRule> {
    match exercise {
        ExerciseType::European => Box::new(EuropeanExercise),
        ExerciseType::American => Box::new(AmericanExercise),
    }
}

/// Result of the lazy build.
#[derive(Debug, Clone, PartialEq)]
pub enum Valuation {
    /// Single-instant grid: the option is valued at its intrinsic payoff and
    /// no lattice is allocated.
    Intrinsic(Price),
    /// Aligned asset and derivative lattices.
    Lattices {
        /// Underlying prices.
        asset: TriangularLattice,
        /// Option values; the root is the fair value.
        derivative: TriangularLattice,
    },
}

impl Valuation {
    /// The fair value: the derivative lattice's root, or the intrinsic value.
    pub fn value(&self) -> Price {
        match self {
            Valuation::Intrinsic(value) => *value,
            Valuation::Lattices { derivative, .. } => derivative.root(),
        }
    }
}

/// Prices one option on a recombining binomial lattice.
///
/// # Example
/// ```
/// use bt_instruments::{BinomialOption, Underlying};
/// use bt_pricingengines::{BinomialPricer, PricingParameters};
///
/// let params = PricingParameters::builder()
///     .spot(100.0)
///     .strike(100.0)
///     .rate(0.05)
///     .volatility(0.2)
///     .horizon(1.0)
///     .steps(2)
///     .build()?;
/// let pricer = BinomialPricer::new(params, BinomialOption::european_call(Underlying::Stock))?;
/// assert!((pricer.value()? - 12.1623).abs() < 1e-4);
/// # Ok::<(), bt_core::Error>(())
/// ```
pub struct BinomialPricer {
    parameters: PricingParameters,
    description: String,
    evolution: Box<dyn EvolutionRule>,
    exercise: Box<dyn ExerciseRule>,
    payoff: Box<dyn Payoff>,
    carry_yield: Rate,
    // None exactly when the grid is a single instant.
    factors: Option<RiskNeutralFactors>,
    progress: Box<dyn ProgressObserver>,
    valuation: OnceCell<Valuation>,
}

impl BinomialPricer {
    /// Create a pricer for a standard option record.
    ///
    /// # Errors
    /// [`Error::InvalidProbability`](bt_core::Error::InvalidProbability) if
    /// the inputs give a risk-neutral probability outside `[0, 1]`.
    pub fn new(parameters: PricingParameters, option: BinomialOption) -> Result<Self> {
        let mut pricer = Self::with_strategies(
            parameters,
            evolution_rule(option.underlying),
            exercise_rule(option.exercise),
            Box::new(option.option_type),
        )?;
        pricer.description = option.to_string();
        Ok(pricer)
    }

    /// Create a pricer from arbitrary strategies.
    ///
    /// The payoff is evaluated as `payoff.value(spot, parameters.strike())`.
    ///
    /// # Errors
    /// As for [`new`](Self::new).
    pub fn with_strategies(
        parameters: PricingParameters,
        evolution: Box<dyn EvolutionRule>,
        exercise: Box<dyn ExerciseRule>,
        payoff: Box<dyn Payoff>,
    ) -> Result<Self> {
        let carry_yield = evolution.carry_yield(parameters.rate(), parameters.dividend_yield());
        let factors = if parameters.grid().is_degenerate() {
            None
        } else {
            Some(RiskNeutralFactors::checked(
                parameters.volatility(),
                parameters.rate(),
                carry_yield,
                parameters.dt(),
            )?)
        };
        let description = format!("{} Option", payoff.name());
        Ok(Self {
            parameters,
            description,
            evolution,
            exercise,
            payoff,
            carry_yield,
            factors,
            progress: Box::new(NoProgress),
            valuation: OnceCell::new(),
        })
    }

    /// Report lattice construction to `observer`.
    pub fn with_progress(mut self, observer: impl ProgressObserver + 'static) -> Self {
        self.progress = Box::new(observer);
        self
    }

    /// The fair value (root of the derivative lattice).
    ///
    /// The first call builds both lattices; later calls reuse them.
    pub fn value(&self) -> Result<Price> {
        self.calculate().map(Valuation::value)
    }

    /// The built lattices, or the intrinsic value for a single-instant grid.
    pub fn valuation(&self) -> Result<&Valuation> {
        self.calculate()
    }

    /// The underlying's price lattice (`None` for a single-instant grid).
    pub fn asset_lattice(&self) -> Result<Option<&TriangularLattice>> {
        Ok(match self.calculate()? {
            Valuation::Intrinsic(_) => None,
            Valuation::Lattices { asset, .. } => Some(asset),
        })
    }

    /// The option's value lattice (`None` for a single-instant grid).
    pub fn derivative_lattice(&self) -> Result<Option<&TriangularLattice>> {
        Ok(match self.calculate()? {
            Valuation::Intrinsic(_) => None,
            Valuation::Lattices { derivative, .. } => Some(derivative),
        })
    }

    /// The validated inputs, including the step size actually used.
    pub fn parameters(&self) -> &PricingParameters {
        &self.parameters
    }

    /// Risk-neutral factors (`None` for a single-instant grid).
    pub fn factors(&self) -> Option<&RiskNeutralFactors> {
        self.factors.as_ref()
    }

    /// The yield used in the drift after the underlying's carry rule.
    pub fn carry_yield(&self) -> Rate {
        self.carry_yield
    }

    /// Whether the lattices have been built.
    pub fn is_built(&self) -> bool {
        self.is_calculated()
    }
}

impl LazyObject for BinomialPricer {
    type Output = Valuation;

    fn perform_calculations(&self) -> Result<Valuation> {
        let _span = debug_span!("binomial_pricer.value", steps = self.parameters.steps()).entered();
        let p = &self.parameters;
        let strike = p.strike();
        let payoff = |spot: Price| self.payoff.value(spot, strike);

        let Some(factors) = &self.factors else {
            let value = payoff(p.spot());
            debug!(value, "single-instant grid, intrinsic value");
            return Ok(Valuation::Intrinsic(value));
        };

        let asset = build_asset_lattice(
            p.steps(),
            p.spot(),
            factors,
            self.evolution.as_ref(),
            self.progress.as_ref(),
        );
        let derivative = build_derivative_lattice(
            &asset,
            factors,
            p.rate(),
            p.dt(),
            &payoff,
            self.exercise.as_ref(),
            self.progress.as_ref(),
        );
        debug!(value = derivative.root(), "binomial valuation complete");
        Ok(Valuation::Lattices { asset, derivative })
    }

    fn cache(&self) -> &OnceCell<Valuation> {
        &self.valuation
    }
}

impl PricingEngine for BinomialPricer {
    fn npv(&self) -> Result<Price> {
        self.value()
    }
}

impl fmt::Debug for BinomialPricer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BinomialPricer")
            .field("parameters", &self.parameters)
            .field("evolution", &self.evolution)
            .field("exercise", &self.exercise)
            .field("payoff", &self.payoff)
            .field("carry_yield", &self.carry_yield)
            .field("factors", &self.factors)
            .field("built", &self.is_built())
            .finish()
    }
}

impl fmt::Display for BinomialPricer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let p = &self.parameters;
        write!(
            f,
            "{}, with spot price $ {:.3}, and strike $ {:.3} (expiration = {:.2} years, \
             risk-free rate = {:.3}% p.a.",
            self.description,
            p.spot(),
            p.strike(),
            p.horizon(),
            p.rate() * 100.0
        )?;
        if self.carry_yield > 0.0 {
            write!(f, ", dividend yield = {:.3}% p.a.", self.carry_yield * 100.0)?;
        }
        write!(f, ", Binary Tree with {} steps)", p.steps())
    }
}
