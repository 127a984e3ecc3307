//! # bt-instruments
//!
//! Option instruments as plain data: what is paid ([`OptionType`]), when it
//! can be exercised ([`ExerciseType`]) and on what ([`Underlying`]). A
//! [`BinomialOption`] names one of each; pricing engines turn the record
//! into strategies.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod exercise;
pub mod instrument;
pub mod option;
pub mod payoff;
pub mod underlying;

pub use exercise::ExerciseType;
pub use instrument::PricingEngine;
pub use option::BinomialOption;
pub use payoff::{OptionType, Payoff};
pub use underlying::Underlying;
