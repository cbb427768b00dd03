//! statistical_tests::portmanteau — Ljung-Box / Box-Pierce test driver.
//!
//! Purpose
//! -------
//! Run a portmanteau test for serial independence at each lag of a
//! caller-supplied lag set and report, per lag, the Q statistic, its χ²
//! p-value, the χ² critical value at level alpha and the rejection flag.
//!
//! Key behaviors
//! -------------
//! - For each requested lag h (independently, from scratch):
//!   - Q_h from the selected accumulator at depth h,
//!   - p_h  = 1 − F_{χ²(h)}(Q_h),
//!   - cv_h = F⁻¹_{χ²(h)}(1 − alpha),
//!   - reject_h = Q_h > cv_h.
//! - Collect the four per-lag sequences in a [`PortmanteauOutcome`] aligned
//!   index-for-index with the input lag set.
//! - With the `parallel` feature, lags are evaluated on the rayon pool; the
//!   output order still follows the input.
//!
//! Invariants & assumptions
//! ------------------------
//! - Every lag satisfies 1 ≤ h < n; duplicates and any order are allowed.
//! - The χ² degrees of freedom equal the lag under test.
//! - `rejected()[i] == (statistics()[i] > critical_values()[i])` for every i.
//! - An empty lag set yields an empty outcome; no statistic is evaluated,
//!   so a constant signal is only reported once a lag is requested.
//!
//! Downstream usage
//! ----------------
//! - Typical residual check:
//!
//!   ```rust
//!   use rust_portmanteau::statistical_tests::{PortmanteauOptions, PortmanteauOutcome};
//!
//!   let residuals: Vec<f64> = (1..=10).map(f64::from).collect();
//!   let outcome =
//!       PortmanteauOutcome::portmanteau_test(&residuals, &[1, 2, 3], &PortmanteauOptions::default())
//!           .unwrap();
//!   assert!(outcome.rejected().iter().all(|&r| r));
//!   ```
//!
//! Testing notes
//! -------------
//! - Unit tests pin the ramp scenario, closed-form χ²(2) quantities, the
//!   rejection/p-value consistency, ordering with duplicates and every
//!   error branch.
//! - Run the suite a second time with `cargo test --features parallel` to
//!   exercise the rayon path; `portmanteau_test_parallel_matches_sequential_order`
//!   only compiles in that configuration.
use crate::statistical_tests::errors::{PortmanteauError, PortmanteauResult};
use crate::statistical_tests::options::{PortmanteauMethod, PortmanteauOptions};
use crate::statistical_tests::validation::{validate_signal, validate_test_lags};
use ndarray::Array1;
use statrs::distribution::{ChiSquared, ContinuousCDF};

/// LagTest — test result at a single lag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LagTest {
    pub lag: usize,
    pub statistic: f64,
    pub p_value: f64,
    pub critical_value: f64,
    pub rejected: bool,
}

/// PortmanteauOutcome — per-lag results of a Ljung-Box or Box-Pierce test.
///
/// Fields
/// ------
/// - `lags`: the lag set as supplied.
/// - `statistics`: Q per lag.
/// - `p_values`: 1 − χ² CDF at Q, df = lag.
/// - `critical_values`: χ² quantile at 1 − alpha, df = lag.
/// - `rejected`: `true` where the independence hypothesis is rejected.
/// - `alpha`, `method`: the configuration used.
///
/// Invariants
/// ----------
/// - All per-lag arrays have the length of `lags` and share its order.
/// - Values are computed once at construction and never mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct PortmanteauOutcome {
    lags: Vec<usize>,
    statistics: Array1<f64>,
    p_values: Array1<f64>,
    critical_values: Array1<f64>,
    rejected: Array1<bool>,
    alpha: f64,
    method: PortmanteauMethod,
}

impl PortmanteauOutcome {
    /// Run the portmanteau test at every lag in `lags`.
    ///
    /// Parameters
    /// ----------
    /// - `data`: `&[f64]`
    ///   Finite, non-constant signal of length n.
    /// - `lags`: `&[usize]`
    ///   Lags to test, each 1 ≤ h < n. Order and duplicates are preserved.
    /// - `opts`: `&PortmanteauOptions`
    ///   Significance level and statistic.
    ///
    /// Returns
    /// -------
    /// `PortmanteauResult<PortmanteauOutcome>`
    ///
    /// Errors
    /// ------
    /// - `InsufficientData` / `InvalidData` from signal validation.
    /// - `InvalidTestLag` for the first lag equal to 0 or ≥ n.
    /// - `ZeroVariance` for a constant signal (non-empty lag set).
    /// - `NonFiniteMoments` when the signal's centred sums overflow.
    /// - `Distribution` if statrs rejects the χ² parameters.
    pub fn portmanteau_test(
        data: &[f64], lags: &[usize], opts: &PortmanteauOptions,
    ) -> PortmanteauResult<Self> {
        validate_signal(data, 1)?;
        validate_test_lags(lags, data.len())?;

        let results = evaluate_lags(data, lags, opts)?;
        log::debug!(
            "{} test: n = {}, alpha = {}, {} lag(s), {} rejected",
            opts.method(),
            data.len(),
            opts.alpha(),
            results.len(),
            results.iter().filter(|r| r.rejected).count()
        );

        Ok(PortmanteauOutcome {
            lags: lags.to_vec(),
            statistics: results.iter().map(|r| r.statistic).collect(),
            p_values: results.iter().map(|r| r.p_value).collect(),
            critical_values: results.iter().map(|r| r.critical_value).collect(),
            rejected: results.iter().map(|r| r.rejected).collect(),
            alpha: opts.alpha(),
            method: opts.method(),
        })
    }

    pub fn lags(&self) -> &[usize] {
        &self.lags
    }

    /// Q statistic per lag.
    pub fn statistics(&self) -> &Array1<f64> {
        &self.statistics
    }

    /// Upper-tail χ² p-value per lag.
    pub fn p_values(&self) -> &Array1<f64> {
        &self.p_values
    }

    /// χ² critical value at 1 − alpha per lag.
    pub fn critical_values(&self) -> &Array1<f64> {
        &self.critical_values
    }

    /// Rejection flag per lag (`true` = independence rejected).
    pub fn rejected(&self) -> &Array1<bool> {
        &self.rejected
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    pub fn method(&self) -> PortmanteauMethod {
        self.method
    }

    pub fn len(&self) -> usize {
        self.lags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lags.is_empty()
    }

    /// `true` if independence is rejected at any tested lag.
    pub fn rejects_any(&self) -> bool {
        self.rejected.iter().any(|&r| r)
    }

    /// Result at position `i` of the lag set.
    pub fn get(&self, i: usize) -> Option<LagTest> {
        let &lag = self.lags.get(i)?;
        Some(LagTest {
            lag,
            statistic: self.statistics[i],
            p_value: self.p_values[i],
            critical_value: self.critical_values[i],
            rejected: self.rejected[i],
        })
    }

    /// Per-lag results in input order.
    pub fn iter(&self) -> impl Iterator<Item = LagTest> + '_ {
        (0..self.len()).filter_map(move |i| self.get(i))
    }
}

/// Free-function form of [`PortmanteauOutcome::portmanteau_test`].
///
/// # Errors
/// - `InvalidAlpha` unless `0 < alpha < 1`, plus every error of
///   [`PortmanteauOutcome::portmanteau_test`].
pub fn portmanteau_test(
    data: &[f64], lags: &[usize], alpha: f64, method: PortmanteauMethod,
) -> PortmanteauResult<PortmanteauOutcome> {
    let opts = PortmanteauOptions::new(alpha, method)?;
    PortmanteauOutcome::portmanteau_test(data, lags, &opts)
}

#[cfg(feature = "parallel")]
fn evaluate_lags(
    data: &[f64], lags: &[usize], opts: &PortmanteauOptions,
) -> PortmanteauResult<Vec<LagTest>> {
    use rayon::prelude::*;

    lags.par_iter().map(|&lag| evaluate_lag(data, lag, opts)).collect()
}

#[cfg(not(feature = "parallel"))]
fn evaluate_lags(
    data: &[f64], lags: &[usize], opts: &PortmanteauOptions,
) -> PortmanteauResult<Vec<LagTest>> {
    lags.iter().map(|&lag| evaluate_lag(data, lag, opts)).collect()
}

fn evaluate_lag(data: &[f64], lag: usize, opts: &PortmanteauOptions) -> PortmanteauResult<LagTest> {
    let statistic = opts.method().statistic(data, lag)?;
    let reference = chi_squared(lag)?;
    let p_value = 1.0 - reference.cdf(statistic);
    let critical_value = reference.inverse_cdf(1.0 - opts.alpha());
    let rejected = statistic > critical_value;

    log::debug!(
        "lag {lag}: Q = {statistic:.6}, p = {p_value:.6}, cv = {critical_value:.6}, reject = {rejected}"
    );
    Ok(LagTest { lag, statistic, p_value, critical_value, rejected })
}

#[inline]
fn chi_squared(df: usize) -> PortmanteauResult<ChiSquared> {
    ChiSquared::new(df as f64)
        .map_err(|e| PortmanteauError::Distribution { df, reason: e.to_string() })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::statistical_tests::statistics::{box_pierce_statistic, ljung_box_statistic};
    use approx::assert_relative_eq;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - The ramp scenario (rejection at lags 1, 2, 3).
    // - Closed-form χ²(2) critical values and p-values.
    // - Consistency between rejection flags, statistics, critical values
    //   and p-values.
    // - Ordering with duplicates, empty lag sets, method dispatch.
    // - Under `parallel`, agreement of the rayon path with per-lag calls.
    // - Error branches: lag 0, lag ≥ n, constant signal, overflowing
    //   signal, bad alpha.
    //
    // They intentionally DO NOT cover:
    // - Size or power of the tests under simulated nulls.
    // -------------------------------------------------------------------------

    fn ramp() -> Vec<f64> {
        (1..=10).map(f64::from).collect()
    }

    fn wavy_series() -> Vec<f64> {
        (0..60).map(|t| (t as f64 * 1.9).sin() + 0.5 * (t as f64 * 0.37).cos()).collect()
    }

    #[test]
    // Purpose
    // -------
    // Reproduce the strongly autocorrelated ramp scenario.
    //
    // Given
    // -----
    // - x = [1, …, 10], lags [1, 2, 3], alpha = 0.1, Ljung-Box.
    //
    // Expect
    // ------
    // - Independence rejected at all three lags.
    // - Statistics equal the direct accumulator calls.
    fn portmanteau_test_linear_ramp_rejects_at_all_lags() {
        // Arrange
        let x = ramp();
        let opts = PortmanteauOptions::default();

        // Act
        let outcome = PortmanteauOutcome::portmanteau_test(&x, &[1, 2, 3], &opts).unwrap();

        // Assert
        assert_eq!(outcome.len(), 3);
        assert!(outcome.rejected().iter().all(|&r| r), "got {:?}", outcome.rejected());
        for (i, &lag) in outcome.lags().iter().enumerate() {
            assert_relative_eq!(outcome.statistics()[i], ljung_box_statistic(&x, lag).unwrap());
        }
        assert!(outcome.rejects_any());
        assert_eq!(outcome.method(), PortmanteauMethod::LjungBox);
        assert_eq!(outcome.alpha(), 0.1);
    }

    #[test]
    // Purpose
    // -------
    // Check χ² quantities against closed forms for df = 2, where
    // F(x) = 1 − e^{−x/2} and F⁻¹(1 − α) = −2 ln α.
    //
    // Given
    // -----
    // - The ramp, lag 2, alpha = 0.1 and 0.05.
    //
    // Expect
    // ------
    // - cv = −2 ln α and p = e^{−Q/2}.
    fn portmanteau_test_chi_squared_two_matches_closed_form() {
        // Arrange
        let x = ramp();

        for alpha in [0.1_f64, 0.05] {
            // Act
            let outcome = portmanteau_test(&x, &[2], alpha, PortmanteauMethod::LjungBox).unwrap();
            let q = outcome.statistics()[0];

            // Assert
            assert_relative_eq!(outcome.critical_values()[0], -2.0 * alpha.ln(), epsilon = 1e-10);
            assert_relative_eq!(outcome.p_values()[0], (-q / 2.0).exp(), epsilon = 1e-9);
        }
    }

    #[test]
    // Purpose
    // -------
    // Verify `rejected[i] == Q[i] > cv[i]` and that p-values agree with the
    // decision away from the boundary, for both methods.
    //
    // Given
    // -----
    // - A 60-point wavy series, lags 1..=20, alpha = 0.05.
    //
    // Expect
    // ------
    // - Exact agreement of flags with Q > cv.
    // - p < alpha exactly where rejected (when |Q − cv| > 1e-8, which
    //   absorbs rounding in 1 − F(Q)).
    // - p-values in [0, 1].
    fn portmanteau_test_flags_agree_with_critical_values_and_p_values() {
        // Arrange
        let x = wavy_series();
        let lags: Vec<usize> = (1..=20).collect();
        let alpha = 0.05;

        for method in [PortmanteauMethod::LjungBox, PortmanteauMethod::BoxPierce] {
            // Act
            let outcome = portmanteau_test(&x, &lags, alpha, method).unwrap();

            // Assert
            for t in outcome.iter() {
                assert_eq!(t.rejected, t.statistic > t.critical_value, "lag {}", t.lag);
                assert!((0.0..=1.0).contains(&t.p_value), "lag {}: p = {}", t.lag, t.p_value);
                if (t.statistic - t.critical_value).abs() > 1e-8 {
                    assert_eq!(t.p_value < alpha, t.rejected, "lag {}: {t:?}", t.lag);
                }
            }
        }
    }

    #[test]
    // Purpose
    // -------
    // Ensure unsorted and duplicated lags are evaluated independently and
    // returned in input order.
    //
    // Given
    // -----
    // - The ramp and lags [3, 1, 3, 2] with Box-Pierce.
    //
    // Expect
    // ------
    // - Statistics [Q(3), Q(1), Q(3), Q(2)] from `box_pierce_statistic`.
    fn portmanteau_test_preserves_order_and_duplicates() {
        // Arrange
        let x = ramp();
        let lags = [3_usize, 1, 3, 2];
        let opts = PortmanteauOptions::parse(0.1, "bp").unwrap();

        // Act
        let outcome = PortmanteauOutcome::portmanteau_test(&x, &lags, &opts).unwrap();

        // Assert
        assert_eq!(outcome.lags(), &lags);
        let expected: Vec<f64> =
            lags.iter().map(|&h| box_pierce_statistic(&x, h).unwrap()).collect();
        assert_eq!(outcome.statistics().to_vec(), expected);
        assert_eq!(outcome.get(0), outcome.get(2));
        assert_eq!(outcome.get(4), None);
    }

    #[cfg(feature = "parallel")]
    #[test]
    // Purpose
    // -------
    // Ensure the rayon path keeps results aligned with the input lag set.
    //
    // Given
    // -----
    // - The 60-point wavy series and 59 lags in descending order with
    //   repeats, enough work to be split across the pool.
    //
    // Expect
    // ------
    // - `lags()` echoes the input and each `LagTest` matches a direct
    //   `ljung_box_statistic` / χ² evaluation at the same index.
    fn portmanteau_test_parallel_matches_sequential_order() {
        // Arrange
        let x = wavy_series();
        let lags: Vec<usize> = (1..60).rev().chain([5, 1, 5]).collect();
        let opts = PortmanteauOptions::default();

        // Act
        let outcome = PortmanteauOutcome::portmanteau_test(&x, &lags, &opts).unwrap();

        // Assert
        assert_eq!(outcome.lags(), &lags[..]);
        for (i, &h) in lags.iter().enumerate() {
            let t = outcome.get(i).unwrap();
            assert_eq!(t.lag, h);
            assert_eq!(t.statistic, ljung_box_statistic(&x, h).unwrap());
            let reference = ChiSquared::new(h as f64).unwrap();
            assert_eq!(t.critical_value, reference.inverse_cdf(1.0 - opts.alpha()));
        }
    }

    #[test]
    // Purpose
    // -------
    // An empty lag set yields an empty outcome.
    //
    // Given
    // -----
    // - The ramp and `lags = []`.
    //
    // Expect
    // ------
    // - `is_empty()` and no rejection.
    fn portmanteau_test_empty_lag_set_returns_empty_outcome() {
        // Act
        let outcome =
            PortmanteauOutcome::portmanteau_test(&ramp(), &[], &PortmanteauOptions::default())
                .unwrap();

        // Assert
        assert!(outcome.is_empty());
        assert!(!outcome.rejects_any());
        assert_eq!(outcome.statistics().len(), 0);
    }

    #[test]
    // Purpose
    // -------
    // Ensure invalid lags, invalid alpha and constant signals surface as
    // errors rather than panics or NaNs.
    //
    // Given
    // -----
    // - The ramp (n = 10) with lags [0], [10]; alpha = 1.0; a constant
    //   signal with lag 1; a ±1e200 signal whose squares overflow.
    //
    // Expect
    // ------
    // - `InvalidTestLag`, `InvalidTestLag`, `InvalidAlpha`, `ZeroVariance`,
    //   `NonFiniteMoments`.
    fn portmanteau_test_invalid_inputs_return_error() {
        // Arrange
        let x = ramp();
        let opts = PortmanteauOptions::default();

        // Act & Assert
        assert_eq!(
            PortmanteauOutcome::portmanteau_test(&x, &[0], &opts),
            Err(PortmanteauError::InvalidTestLag { lag: 0, len: 10 })
        );
        assert_eq!(
            PortmanteauOutcome::portmanteau_test(&x, &[1, 10], &opts),
            Err(PortmanteauError::InvalidTestLag { lag: 10, len: 10 })
        );
        assert_eq!(
            portmanteau_test(&x, &[1], 1.0, PortmanteauMethod::LjungBox),
            Err(PortmanteauError::InvalidAlpha(1.0))
        );
        assert_eq!(
            PortmanteauOutcome::portmanteau_test(&[2.0; 5], &[1], &opts),
            Err(PortmanteauError::ZeroVariance)
        );
        let huge = [1e200, -1e200, 1e200, -1e200, 1e200, -1e200];
        for method in [PortmanteauMethod::LjungBox, PortmanteauMethod::BoxPierce] {
            assert_eq!(
                portmanteau_test(&huge, &[1, 2], 0.1, method),
                Err(PortmanteauError::NonFiniteMoments)
            );
        }
    }
}
