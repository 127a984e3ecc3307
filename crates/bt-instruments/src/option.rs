//! The option record priced on a binomial lattice.

use crate::exercise::ExerciseType;
use crate::payoff::OptionType;
use crate::underlying::Underlying;
use std::fmt;

/// An option on a single underlying, described by its three ingredients.
///
/// "American put on a currency pair" is
/// `BinomialOption::american_put(Underlying::currency(rf))`; there is no
/// dedicated type per combination.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BinomialOption {
    /// The asset the option is written on.
    pub underlying: Underlying,
    /// When the option can be exercised.
    pub exercise: ExerciseType,
    /// Call or put.
    pub option_type: OptionType,
}

impl BinomialOption {
    /// Create a new option record.
    pub fn new(underlying: Underlying, exercise: ExerciseType, option_type: OptionType) -> Self {
        Self {
            underlying,
            exercise,
            option_type,
        }
    }

    /// European call on `underlying`.
    pub fn european_call(underlying: Underlying) -> Self {
        Self::new(underlying, ExerciseType::European, OptionType::Call)
    }

    /// European put on `underlying`.
    pub fn european_put(underlying: Underlying) -> Self {
        Self::new(underlying, ExerciseType::European, OptionType::Put)
    }

    /// American call on `underlying`.
    pub fn american_call(underlying: Underlying) -> Self {
        Self::new(underlying, ExerciseType::American, OptionType::Call)
    }

    /// American put on `underlying`.
    pub fn american_put(underlying: Underlying) -> Self {
        Self::new(underlying, ExerciseType::American, OptionType::Put)
    }
}

impl fmt::Display for BinomialOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} Option ({} style)",
            self.option_type, self.underlying, self.exercise
        )
    }
}
