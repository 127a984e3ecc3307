//! Probability distributions.
//!
//! Only the standard normal is needed here; the error function comes from
//! the `statrs` crate.

pub mod normal;

pub use normal::normal_cdf;
