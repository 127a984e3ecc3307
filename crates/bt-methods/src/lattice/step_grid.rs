//! Reconciliation of the lattice time grid.
//!
//! A binomial lattice over a horizon `T` with `N` time instants spaced `dT`
//! apart satisfies `(N − 1)·dT = T`. Callers give any two of the three and
//! [`StepGrid::reconcile`] derives the third. When `T` is not a whole
//! multiple of `dT`, `N` is rounded up and `dT` recomputed, so the grid
//! always spans the full horizon; the step size actually used is available
//! through [`StepGrid::dt`].

use bt_core::{errors::Error, Result, Size, Time, Volatility};
use bt_math::comparison::nearest_integer;
use tracing::{debug, warn};

/// Relative tolerance under which `T / dT` counts as integral.
const INTEGRAL_RATIO_TOLERANCE: f64 = 1e-9;

/// A consistent (horizon, step size, step count) triple.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepGrid {
    horizon: Time,
    dt: Time,
    steps: Size,
}

impl StepGrid {
    /// Derive the missing member of `(horizon, step_size, steps)`.
    ///
    /// Exactly one argument must be `None`. `steps` counts time instants
    /// including the start, so `steps == 1` describes pricing at maturity
    /// and is only valid for a zero horizon.
    ///
    /// # Errors
    /// [`Error::InvalidConfiguration`] if zero or more than one member is
    /// missing, or if a given member is non-finite, negative, or otherwise
    /// cannot produce a grid (`steps == 0`, a zero step size, or a positive
    /// horizon with a single instant).
    pub fn reconcile(
        horizon: Option<Time>,
        step_size: Option<Time>,
        steps: Option<Size>,
    ) -> Result<Self> {
        let grid = match (horizon, step_size, steps) {
            (Some(t), Some(dt), None) => Self::from_horizon_and_step(t, dt)?,
            (None, Some(dt), Some(n)) => Self::from_step_and_count(dt, n)?,
            (Some(t), None, Some(n)) => Self::from_horizon_and_count(t, n)?,
            _ => {
                let given = [horizon.is_some(), step_size.is_some(), steps.is_some()]
                    .iter()
                    .filter(|&&g| g)
                    .count();
                return Err(Error::InvalidConfiguration(format!(
                    "exactly two of horizon (T), step size (dT) and step count (N) \
                     must be given, got {given}"
                )));
            }
        };
        debug!(
            horizon = grid.horizon,
            dt = grid.dt,
            steps = grid.steps,
            "step grid reconciled"
        );
        Ok(grid)
    }

    fn from_horizon_and_step(t: Time, dt: Time) -> Result<Self> {
        check_horizon(t)?;
        if !(dt.is_finite() && dt > 0.0) {
            return Err(Error::InvalidConfiguration(format!(
                "step size must be finite and positive, got {dt}"
            )));
        }
        let ratio = t / dt;
        if let Some(intervals) = nearest_integer(ratio, INTEGRAL_RATIO_TOLERANCE) {
            return Ok(Self {
                horizon: t,
                dt,
                steps: instant_count(intervals)?,
            });
        }
        // Round the step count up and shrink dT so the grid ends exactly at T.
        let intervals = ratio.ceil();
        let steps = instant_count(intervals)?;
        let actual = t / intervals;
        warn!(
            requested = dt,
            actual,
            horizon = t,
            "horizon is not a multiple of the step size, step size adjusted"
        );
        Ok(Self {
            horizon: t,
            dt: actual,
            steps,
        })
    }

    fn from_step_and_count(dt: Time, n: Size) -> Result<Self> {
        check_count(n)?;
        if !(dt.is_finite() && dt > 0.0) {
            return Err(Error::InvalidConfiguration(format!(
                "step size must be finite and positive, got {dt}"
            )));
        }
        let horizon = (n - 1) as Time * dt;
        if !horizon.is_finite() {
            return Err(Error::InvalidConfiguration(format!(
                "{n} time instants of size {dt} overflow the horizon"
            )));
        }
        Ok(Self {
            horizon,
            dt,
            steps: n,
        })
    }

    fn from_horizon_and_count(t: Time, n: Size) -> Result<Self> {
        check_horizon(t)?;
        check_count(n)?;
        if n == 1 {
            if t != 0.0 {
                return Err(Error::InvalidConfiguration(format!(
                    "a single time instant cannot span a horizon of {t}"
                )));
            }
            return Ok(Self {
                horizon: 0.0,
                dt: 0.0,
                steps: 1,
            });
        }
        if t == 0.0 {
            return Err(Error::InvalidConfiguration(format!(
                "a zero horizon cannot be split into {n} time instants"
            )));
        }
        Ok(Self {
            horizon: t,
            dt: t / (n - 1) as Time,
            steps: n,
        })
    }

    /// Total horizon `T`.
    pub fn horizon(&self) -> Time {
        self.horizon
    }

    /// Step size `dT` actually used (may differ from the requested one).
    pub fn dt(&self) -> Time {
        self.dt
    }

    /// Number of time instants `N`, including the start.
    pub fn steps(&self) -> Size {
        self.steps
    }

    /// Number of moves between the start and the horizon (`N − 1`).
    pub fn intervals(&self) -> Size {
        self.steps - 1
    }

    /// Time of instant `i`.
    pub fn time(&self, i: Size) -> Time {
        i as Time * self.dt
    }

    /// `true` when the grid is a single instant (pricing at maturity).
    pub fn is_degenerate(&self) -> bool {
        self.steps == 1
    }
}

/// Validate a volatility: finite and non-negative.
///
/// # Errors
/// [`Error::InvalidVolatility`] otherwise.
pub fn check_volatility(volatility: Volatility) -> Result<Volatility> {
    if volatility.is_finite() && volatility >= 0.0 {
        Ok(volatility)
    } else {
        Err(Error::InvalidVolatility(volatility))
    }
}

fn check_horizon(t: Time) -> Result<()> {
    if t.is_finite() && t >= 0.0 {
        Ok(())
    } else {
        Err(Error::InvalidConfiguration(format!(
            "horizon must be finite and non-negative, got {t}"
        )))
    }
}

/// Instant count `intervals + 1` for a whole number of intervals.
fn instant_count(intervals: Time) -> Result<Size> {
    if !(intervals < Size::MAX as Time) {
        return Err(too_many(intervals));
    }
    let steps = (intervals as Size)
        .checked_add(1)
        .ok_or_else(|| too_many(intervals))?;
    check_count(steps)?;
    Ok(steps)
}

fn too_many(intervals: Time) -> Error {
    Error::InvalidConfiguration(format!("{intervals} intervals is too many for a lattice"))
}

fn check_count(n: Size) -> Result<()> {
    if n == 0 {
        return Err(Error::InvalidConfiguration(
            "step count must be at least 1".into(),
        ));
    }
    // The lattice stores n (n + 1) / 2 nodes.
    if n.checked_add(1).and_then(|m| m.checked_mul(n)).is_none() {
        return Err(Error::InvalidConfiguration(format!(
            "{n} time instants is too many for a lattice"
        )));
    }
    Ok(())
}

// ─── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use proptest::prelude::*;

    #[test]
    fn count_from_exact_multiple() {
        let g = StepGrid::reconcile(Some(1.0), Some(0.25), None).unwrap();
        assert_eq!(g.steps(), 5);
        assert_eq!(g.intervals(), 4);
        assert_abs_diff_eq!(g.dt(), 0.25, epsilon = 1e-15);
        assert_abs_diff_eq!(g.time(4), 1.0, epsilon = 1e-15);
    }

    #[test]
    fn count_rounded_up_and_step_recomputed() {
        // 1.0 / 0.3 = 3.33.. → 4 intervals, dT = 0.25
        let g = StepGrid::reconcile(Some(1.0), Some(0.3), None).unwrap();
        assert_eq!(g.steps(), 5);
        assert_abs_diff_eq!(g.dt(), 0.25, epsilon = 1e-15);
        assert_abs_diff_eq!(g.horizon(), 1.0, epsilon = 1e-15);
    }

    #[test]
    fn representation_noise_does_not_add_a_step() {
        let g = StepGrid::reconcile(Some(0.3), Some(0.1), None).unwrap();
        assert_eq!(g.steps(), 4);
        assert_abs_diff_eq!(g.dt(), 0.1, epsilon = 1e-15);
    }

    #[test]
    fn unrepresentable_step_count_is_an_error() {
        for dt in [1e-300, 3e-300, f64::MIN_POSITIVE] {
            let err = StepGrid::reconcile(Some(1.0), Some(dt), None).unwrap_err();
            assert!(matches!(err, Error::InvalidConfiguration(_)), "dt = {dt}: {err:?}");
        }
        let err = StepGrid::reconcile(None, Some(1e308), Some(1000)).unwrap_err();
        assert!(matches!(err, Error::InvalidConfiguration(_)));
        let err = StepGrid::reconcile(Some(1.0), None, Some(Size::MAX)).unwrap_err();
        assert!(matches!(err, Error::InvalidConfiguration(_)));
    }

    #[test]
    fn horizon_from_step_and_count() {
        let g = StepGrid::reconcile(None, Some(0.5), Some(3)).unwrap();
        assert_abs_diff_eq!(g.horizon(), 1.0, epsilon = 1e-15);
        assert_eq!(g.steps(), 3);
    }

    #[test]
    fn step_from_horizon_and_count() {
        let g = StepGrid::reconcile(Some(2.0), None, Some(5)).unwrap();
        assert_abs_diff_eq!(g.dt(), 0.5, epsilon = 1e-15);
    }

    #[test]
    fn single_instant_grid() {
        let g = StepGrid::reconcile(Some(0.0), None, Some(1)).unwrap();
        assert!(g.is_degenerate());
        assert_eq!(g.dt(), 0.0);

        let g = StepGrid::reconcile(None, Some(0.1), Some(1)).unwrap();
        assert!(g.is_degenerate());
        assert_eq!(g.horizon(), 0.0);

        let g = StepGrid::reconcile(Some(0.0), Some(0.1), None).unwrap();
        assert!(g.is_degenerate());
    }

    #[test]
    fn rejects_wrong_number_of_members() {
        for (t, dt, n) in [
            (None, None, Some(10)),
            (Some(1.0), None, None),
            (None, Some(0.1), None),
            (None, None, None),
            (Some(1.0), Some(0.1), Some(11)),
        ] {
            assert!(
                matches!(
                    StepGrid::reconcile(t, dt, n),
                    Err(Error::InvalidConfiguration(_))
                ),
                "({t:?}, {dt:?}, {n:?}) should be rejected"
            );
        }
    }

    #[test]
    fn rejects_unusable_members() {
        let bad = [
            StepGrid::reconcile(Some(1.0), Some(0.0), None),
            StepGrid::reconcile(Some(1.0), Some(-0.1), None),
            StepGrid::reconcile(Some(-1.0), None, Some(3)),
            StepGrid::reconcile(Some(1.0), None, Some(0)),
            StepGrid::reconcile(Some(1.0), None, Some(1)),
            StepGrid::reconcile(Some(0.0), None, Some(3)),
            StepGrid::reconcile(Some(f64::NAN), Some(0.1), None),
            StepGrid::reconcile(None, Some(f64::INFINITY), Some(3)),
        ];
        for result in bad {
            assert!(matches!(result, Err(Error::InvalidConfiguration(_))));
        }
    }

    #[test]
    fn volatility_must_be_non_negative() {
        assert_eq!(check_volatility(0.0), Ok(0.0));
        assert_eq!(check_volatility(0.2), Ok(0.2));
        assert_eq!(check_volatility(-0.01), Err(Error::InvalidVolatility(-0.01)));
        assert!(check_volatility(f64::NAN).is_err());
    }

    proptest! {
        #[test]
        fn reconciled_grid_is_consistent(t in 0.01f64..10.0, dt in 0.001f64..0.5) {
            let g = StepGrid::reconcile(Some(t), Some(dt), None).unwrap();
            prop_assert!(g.steps() >= 2);
            prop_assert!(g.dt() <= dt * (1.0 + 1e-9));
            let span = (g.steps() - 1) as f64 * g.dt();
            prop_assert!((span - g.horizon()).abs() <= 1e-8 * t.max(1.0));
        }

        #[test]
        fn horizon_and_count_round_trip(t in 0.01f64..10.0, n in 2usize..2000) {
            let g = StepGrid::reconcile(Some(t), None, Some(n)).unwrap();
            prop_assert_eq!(g.steps(), n);
            prop_assert!(((n - 1) as f64 * g.dt() - t).abs() <= 1e-12 * t.max(1.0));
        }
    }
}
