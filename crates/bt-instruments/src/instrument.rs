//! `PricingEngine` trait.
//!
//! The only thing consumers such as portfolio aggregation need from a
//! priced position is a plain fair value. Lattice and closed-form pricers
//! both implement this trait so they can be used interchangeably.

use bt_core::{errors::Result, Price};

/// Something that produces the fair value of one option position.
pub trait PricingEngine: std::fmt::Debug {
    /// The fair value.
    fn npv(&self) -> Result<Price>;
}
