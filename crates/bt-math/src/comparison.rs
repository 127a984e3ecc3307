//! Floating-point comparison against integers.

use bt_core::Real;

/// The integer nearest to `x` when `x` is integral up to a relative
/// tolerance `rel_tol`, `None` otherwise.
///
/// Ratios such as `0.3 / 0.1 = 2.9999999999999996` count as integral for any
/// sensible tolerance.
pub fn nearest_integer(x: Real, rel_tol: Real) -> Option<Real> {
    if !x.is_finite() {
        return None;
    }
    let rounded = x.round();
    if (x - rounded).abs() <= rel_tol * rounded.abs().max(1.0) {
        Some(rounded)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nearest_integer_absorbs_representation_noise() {
        assert_eq!(nearest_integer(0.3 / 0.1, 1e-9), Some(3.0));
        assert_eq!(nearest_integer(0.7 / 0.1, 1e-9), Some(7.0));
        assert_eq!(nearest_integer(10.0, 1e-9), Some(10.0));
        assert_eq!(nearest_integer(2.5, 1e-9), None);
        assert_eq!(nearest_integer(3.0001, 1e-9), None);
        assert_eq!(nearest_integer(Real::NAN, 1e-9), None);
        assert_eq!(nearest_integer(Real::INFINITY, 1e-9), None);
    }
}
