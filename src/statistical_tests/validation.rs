//! statistical_tests::validation — shared input guards for test statistics.
//!
//! Purpose
//! -------
//! Centralize input validation for the autocorrelation estimator, the
//! Ljung-Box / Box-Pierce accumulators and the portmanteau driver, so
//! checks on signal length, finiteness, lag bounds and the significance
//! level are written once.
//!
//! Key behaviors
//! -------------
//! - Enforce preconditions on signals and lags before any lag-based sum is
//!   evaluated, so no caller ever reaches an empty sum or a division by
//!   `n − k = 0`.
//! - Map invalid inputs into structured [`PortmanteauError`] values.
//!
//! Invariants & assumptions
//! ------------------------
//! - A signal must be non-empty and contain only finite values.
//! - An estimator lag must satisfy `0 ≤ k < n`.
//! - An accumulator depth must satisfy `1 ≤ lags < n`.
//! - A significance level must satisfy `0 < alpha < 1` (NaN rejected).
//!
//! Conventions
//! -----------
//! - This module is purely about *validation*; it performs no I/O and
//!   allocates only when building error payloads.
//! - Zero variance is not checked here: it is detected where the
//!   normalisation constant is computed.

use crate::statistical_tests::errors::{PortmanteauError, PortmanteauResult};

/// Validate that `data` is non-empty and every observation is finite.
///
/// Errors
/// ------
/// - `PortmanteauError::InsufficientData` when `data.len() < min_len`.
/// - `PortmanteauError::InvalidData(value)` for the first non-finite entry.
pub fn validate_signal(data: &[f64], min_len: usize) -> PortmanteauResult<()> {
    let min_len = min_len.max(1);
    if data.len() < min_len {
        return Err(PortmanteauError::InsufficientData { needed: min_len, got: data.len() });
    }

    if let Some(&value) = data.iter().find(|v| !v.is_finite()) {
        return Err(PortmanteauError::InvalidData(value));
    }

    Ok(())
}

/// Validate an estimator lag `k` against a series of length `len`.
///
/// Errors
/// ------
/// - `PortmanteauError::InvalidLag` when `k >= len`.
#[inline]
pub fn validate_lag(k: usize, len: usize) -> PortmanteauResult<()> {
    if k >= len {
        return Err(PortmanteauError::InvalidLag { lag: k as i64, len });
    }
    Ok(())
}

/// Validate an accumulator depth `lags` against a series of length `len`.
///
/// Errors
/// ------
/// - `PortmanteauError::InvalidMaxLag` when `lags == 0` or `lags >= len`.
#[inline]
pub fn validate_max_lag(lags: usize, len: usize) -> PortmanteauResult<()> {
    if lags == 0 || lags >= len {
        return Err(PortmanteauError::InvalidMaxLag { lags, len });
    }
    Ok(())
}

/// Validate every entry of a test lag set: each must satisfy `1 ≤ lag < len`.
///
/// Duplicates and arbitrary ordering are accepted; an empty set is valid.
///
/// Errors
/// ------
/// - `PortmanteauError::InvalidTestLag` for the first offending entry.
pub fn validate_test_lags(lags: &[usize], len: usize) -> PortmanteauResult<()> {
    match lags.iter().find(|&&lag| lag == 0 || lag >= len) {
        Some(&lag) => Err(PortmanteauError::InvalidTestLag { lag: lag as i64, len }),
        None => Ok(()),
    }
}

/// Validate a significance level.
///
/// Errors
/// ------
/// - `PortmanteauError::InvalidAlpha` unless `0 < alpha < 1`.
#[inline]
pub fn validate_alpha(alpha: f64) -> PortmanteauResult<()> {
    if !(alpha > 0.0 && alpha < 1.0) {
        return Err(PortmanteauError::InvalidAlpha(alpha));
    }
    Ok(())
}
