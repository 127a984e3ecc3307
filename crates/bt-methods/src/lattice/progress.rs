//! Progress observers for lattice construction.
//!
//! Builders report each completed step to a [`ProgressObserver`]. Observers
//! only receive counters; they cannot reach the lattice, so they never
//! influence the result or the order of evaluation.

use bt_core::Size;
use tracing::info;

/// Passive observer of a long-running lattice build.
///
/// All methods default to doing nothing.
pub trait ProgressObserver {
    /// A build labelled `label` with `total` steps is starting.
    fn on_start(&self, _label: &str, _total: Size) {}

    /// `done` of `total` steps of `label` are complete.
    fn on_step(&self, _label: &str, _done: Size, _total: Size) {}

    /// The build labelled `label` is complete.
    fn on_finish(&self, _label: &str) {}
}

/// Observer that ignores everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl ProgressObserver for NoProgress {}

/// Observer that logs progress through `tracing` at `INFO` level, about
/// every tenth of the way.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingProgress;

impl ProgressObserver for TracingProgress {
    fn on_start(&self, label: &str, total: Size) {
        info!(total, "building {label}");
    }

    fn on_step(&self, label: &str, done: Size, total: Size) {
        let stride = (total / 10).max(1);
        if done % stride == 0 || done == total {
            info!(done, total, "{label}: {}%", done * 100 / total.max(1));
        }
    }

    fn on_finish(&self, label: &str) {
        info!("{label} complete");
    }
}

/// Observer forwarding step notifications to a closure.
pub struct FnProgress<F> {
    f: F,
}

impl<F> FnProgress<F>
where
    F: Fn(&str, Size, Size),
{
    /// Wrap `f(label, done, total)`.
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F> ProgressObserver for FnProgress<F>
where
    F: Fn(&str, Size, Size),
{
    fn on_step(&self, label: &str, done: Size, total: Size) {
        (self.f)(label, done, total)
    }
}

impl<F> std::fmt::Debug for FnProgress<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("FnProgress")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn closure_receives_counters() {
        let last = Cell::new((0, 0));
        let observer = FnProgress::new(|_: &str, done, total| last.set((done, total)));
        observer.on_start("x", 3);
        observer.on_step("x", 2, 3);
        observer.on_finish("x");
        assert_eq!(last.get(), (2, 3));
    }

    #[test]
    fn tracing_progress_handles_empty_builds() {
        TracingProgress.on_start("x", 0);
        TracingProgress.on_step("x", 0, 0);
        TracingProgress.on_finish("x");
    }
}
