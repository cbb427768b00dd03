//! statistical_tests::statistics — Ljung-Box and Box-Pierce Q statistics.
//!
//! Purpose
//! -------
//! Fold the sample autocorrelations r(1),…,r(L) of a signal into a single
//! portmanteau statistic Q for a fixed test depth L.
//!
//! Key behaviors
//! -------------
//! - Ljung-Box:   Q = n(n + 2) ∑ₖ₌₁ᴸ r(k)² / (n − k).
//! - Box-Pierce:  Q = n ∑ₖ₌₁ᴸ r(k)².
//! - Both share one inner loop over a `CenteredSeries`, so they are
//!   functions of r(1),…,r(L) and n only, computed with the same mean and
//!   normalisation constant.
//!
//! Invariants & assumptions
//! ------------------------
//! - The depth satisfies 1 ≤ L < n, which keeps every n − k > 0. Violations
//!   return `PortmanteauError::InvalidMaxLag` instead of Inf/NaN.
//! - Terms are summed in increasing k so floating-point rounding is
//!   reproducible.
//! - Q ≥ 0, and Q_LB ≥ Q_BP for the same inputs since (n + 2)/(n − k) ≥ 1.
//!
//! Conventions
//! -----------
//! - `lags` here is a single depth, not a set of lags; the test driver in
//!   `statistical_tests::portmanteau` calls these once per requested lag.
use crate::statistical_tests::autocorrelation::CenteredSeries;
use crate::statistical_tests::errors::PortmanteauResult;
use crate::statistical_tests::validation::{validate_max_lag, validate_signal};

/// Ljung-Box statistic Q at depth `lags`.
///
/// Parameters
/// ----------
/// - `data`: `&[f64]`
///   Finite, non-constant signal of length n.
/// - `lags`: `usize`
///   Depth L with 1 ≤ L < n.
///
/// Returns
/// -------
/// `PortmanteauResult<f64>`
///   Q = n(n + 2) ∑ₖ₌₁ᴸ r(k)² / (n − k).
///
/// Errors
/// ------
/// - `InsufficientData` / `InvalidData` from signal validation.
/// - `InvalidMaxLag` when `lags == 0` or `lags >= n`.
/// - `ZeroVariance` for a constant signal.
/// - `NonFiniteMoments` when the centred sums overflow.
///
/// Examples
/// --------
/// ```rust
/// use rust_portmanteau::statistical_tests::ljung_box_statistic;
///
/// let x: Vec<f64> = (1..=10).map(f64::from).collect();
/// let q = ljung_box_statistic(&x, 1).unwrap();
/// // n(n + 2) · r(1)² / (n − 1) = 120 · 0.49 / 9
/// assert!((q - 120.0 * 0.49 / 9.0).abs() < 1e-10);
/// ```
pub fn ljung_box_statistic(data: &[f64], lags: usize) -> PortmanteauResult<f64> {
    let series = centered_for_depth(data, lags)?;
    let n = series.len() as f64;
    let weighted = sum_weighted_sq_autocorrelations(&series, lags, |k| 1.0 / (n - k as f64));
    let q = n * (n + 2.0) * weighted;
    log::trace!("ljung-box: n = {n}, lags = {lags}, Q = {q}");
    Ok(q)
}

/// Box-Pierce statistic Q at depth `lags`.
///
/// Same parameters, errors and preconditions as [`ljung_box_statistic`];
/// returns Q = n ∑ₖ₌₁ᴸ r(k)².
pub fn box_pierce_statistic(data: &[f64], lags: usize) -> PortmanteauResult<f64> {
    let series = centered_for_depth(data, lags)?;
    let n = series.len() as f64;
    let q = n * sum_weighted_sq_autocorrelations(&series, lags, |_| 1.0);
    log::trace!("box-pierce: n = {n}, lags = {lags}, Q = {q}");
    Ok(q)
}

fn centered_for_depth(data: &[f64], lags: usize) -> PortmanteauResult<CenteredSeries<'_>> {
    validate_signal(data, 1)?;
    validate_max_lag(lags, data.len())?;
    CenteredSeries::new(data)
}

/// ∑ₖ₌₁ᴸ w(k) · r(k)², accumulated in increasing k.
#[inline]
fn sum_weighted_sq_autocorrelations(
    series: &CenteredSeries<'_>, lags: usize, weight: impl Fn(usize) -> f64,
) -> f64 {
    (1..=lags).map(|k| weight(k) * series.rho(k).powi(2)).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::statistical_tests::autocorrelation::sample_autocorrelations;
    use crate::statistical_tests::errors::PortmanteauError;
    use approx::assert_relative_eq;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Closed-form Ljung-Box and Box-Pierce values on the ramp 1..=10.
    // - Agreement with a direct evaluation from r(1),…,r(L).
    // - Non-negativity and Q_LB ≥ Q_BP.
    // - Depth validation (0 and ≥ n) and the zero-variance path.
    //
    // They intentionally DO NOT cover:
    // - χ² p-values and critical values (see `portmanteau`).
    // -------------------------------------------------------------------------

    fn wavy_series() -> Vec<f64> {
        (0..40).map(|t| (t as f64 * 0.7).sin() + 0.25 * (t as f64 * 2.3).cos()).collect()
    }

    #[test]
    // Purpose
    // -------
    // Pin both statistics on the ramp at depth 1.
    //
    // Given
    // -----
    // - x = [1, …, 10], r(1) = 0.7.
    //
    // Expect
    // ------
    // - Q_LB = 10 · 12 · 0.49 / 9, Q_BP = 10 · 0.49.
    fn statistics_linear_ramp_depth_one_match_closed_form() {
        // Arrange
        let x: Vec<f64> = (1..=10).map(f64::from).collect();

        // Act
        let q_lb = ljung_box_statistic(&x, 1).unwrap();
        let q_bp = box_pierce_statistic(&x, 1).unwrap();

        // Assert
        assert_relative_eq!(q_lb, 120.0 * 0.49 / 9.0, epsilon = 1e-10);
        assert_relative_eq!(q_bp, 4.9, epsilon = 1e-10);
    }

    #[test]
    // Purpose
    // -------
    // Verify both accumulators reduce to their formulas in r(1),…,r(L)
    // and n, using the public estimator as the reference.
    //
    // Given
    // -----
    // - A 40-point wavy series and L = 6.
    //
    // Expect
    // ------
    // - Q_LB and Q_BP equal the direct sums up to rounding.
    fn statistics_match_direct_evaluation_from_autocorrelations() {
        // Arrange
        let x = wavy_series();
        let n = x.len() as f64;
        let lags = 6;
        let ks: Vec<usize> = (1..=lags).collect();
        let rs = sample_autocorrelations(&x, &ks).unwrap();

        let expected_lb: f64 = n
            * (n + 2.0)
            * ks.iter().zip(&rs).map(|(&k, r)| r * r / (n - k as f64)).sum::<f64>();
        let expected_bp: f64 = n * rs.iter().map(|r| r * r).sum::<f64>();

        // Act
        let q_lb = ljung_box_statistic(&x, lags).unwrap();
        let q_bp = box_pierce_statistic(&x, lags).unwrap();

        // Assert
        assert_relative_eq!(q_lb, expected_lb, max_relative = 1e-12);
        assert_relative_eq!(q_bp, expected_bp, max_relative = 1e-12);
    }

    #[test]
    // Purpose
    // -------
    // Check Q ≥ 0, Q_LB ≥ Q_BP and monotonicity in the depth.
    //
    // Given
    // -----
    // - A 40-point wavy series and depths 1..=39.
    //
    // Expect
    // ------
    // - Both statistics non-negative and non-decreasing in L.
    // - Q_LB ≥ Q_BP at every depth.
    fn statistics_are_non_negative_and_ordered() {
        // Arrange
        let x = wavy_series();
        let mut prev_lb = 0.0_f64;
        let mut prev_bp = 0.0_f64;

        // Act & Assert
        for lags in 1..x.len() {
            let q_lb = ljung_box_statistic(&x, lags).unwrap();
            let q_bp = box_pierce_statistic(&x, lags).unwrap();
            assert!(q_bp >= 0.0 && q_lb >= 0.0, "negative Q at lags = {lags}");
            assert!(q_lb >= q_bp, "Q_LB < Q_BP at lags = {lags}: {q_lb} < {q_bp}");
            assert!(q_lb >= prev_lb && q_bp >= prev_bp, "Q decreased at lags = {lags}");
            prev_lb = q_lb;
            prev_bp = q_bp;
        }
    }

    #[test]
    // Purpose
    // -------
    // Ensure depths outside 1 ≤ L < n are rejected rather than producing
    // Inf/NaN from the n − k = 0 term.
    //
    // Given
    // -----
    // - n = 10 with L = 10, L = 11 and L = 0.
    //
    // Expect
    // ------
    // - `InvalidMaxLag` from both accumulators.
    fn statistics_invalid_depth_returns_invalid_max_lag() {
        // Arrange
        let x: Vec<f64> = (1..=10).map(f64::from).collect();

        // Act & Assert
        for lags in [0_usize, 10, 11] {
            let expected = Err(PortmanteauError::InvalidMaxLag { lags, len: 10 });
            assert_eq!(ljung_box_statistic(&x, lags), expected);
            assert_eq!(box_pierce_statistic(&x, lags), expected);
        }
    }

    #[test]
    // Purpose
    // -------
    // Ensure a constant signal surfaces as `ZeroVariance`.
    //
    // Given
    // -----
    // - x = [3.0; 6] and L = 2.
    //
    // Expect
    // ------
    // - `Err(ZeroVariance)` from both accumulators.
    fn statistics_constant_signal_returns_zero_variance() {
        // Arrange
        let x = vec![3.0_f64; 6];

        // Act & Assert
        assert_eq!(ljung_box_statistic(&x, 2), Err(PortmanteauError::ZeroVariance));
        assert_eq!(box_pierce_statistic(&x, 2), Err(PortmanteauError::ZeroVariance));
    }

    #[test]
    // Purpose
    // -------
    // Ensure overflow in the normalisation constant is an error, not Q = NaN.
    //
    // Given
    // -----
    // - x = [1e200, −1e200, …] (n = 6) and depth 2.
    //
    // Expect
    // ------
    // - `Err(NonFiniteMoments)` from both accumulators.
    fn statistics_overflowing_signal_returns_non_finite_moments() {
        // Arrange
        let x = [1e200, -1e200, 1e200, -1e200, 1e200, -1e200];

        // Act & Assert
        assert_eq!(ljung_box_statistic(&x, 2), Err(PortmanteauError::NonFiniteMoments));
        assert_eq!(box_pierce_statistic(&x, 2), Err(PortmanteauError::NonFiniteMoments));
    }
}
