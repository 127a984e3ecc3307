//! LazyObject pattern.
//!
//! A `LazyObject` performs an expensive computation the first time its result
//! is requested and hands out the cached result afterwards. The cache is a
//! `std::cell::OnceCell`, so the calculation can be triggered through an
//! `&self` reference and the result can be borrowed for as long as the
//! object lives.
//!
//! There is no invalidation: inputs are immutable after construction, and a
//! different set of inputs means a different object.

use std::cell::OnceCell;

/// Trait for objects that lazily compute and cache their results.
///
/// Implementors provide [`perform_calculations`][Self::perform_calculations]
/// and the cache slot; [`calculate`][Self::calculate] handles the
/// "is built" bookkeeping.
pub trait LazyObject {
    /// The cached result.
    type Output;

    /// Perform the actual (expensive) calculation.
    ///
    /// Called at most once successfully; a failed attempt leaves the cache
    /// empty and is repeated on the next request.
    fn perform_calculations(&self) -> crate::errors::Result<Self::Output>;

    /// The cache slot holding the result once built.
    fn cache(&self) -> &OnceCell<Self::Output>;

    /// Ensure results are built and return them.
    fn calculate(&self) -> crate::errors::Result<&Self::Output> {
        if let Some(output) = self.cache().get() {
            return Ok(output);
        }
        let output = self.perform_calculations()?;
        Ok(self.cache().get_or_init(|| output))
    }

    /// Return `true` if the cache holds a result.
    fn is_calculated(&self) -> bool {
        self.cache().get().is_some()
    }
}
