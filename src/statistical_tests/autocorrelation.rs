//! statistical_tests::autocorrelation — normalized sample autocorrelation.
//!
//! Purpose
//! -------
//! Estimate the sample autocorrelation r(k) of a one-dimensional signal,
//! the building block of the Ljung-Box and Box-Pierce statistics.
//!
//! Key behaviors
//! -------------
//! - Compute
//!   r(k) = ∑ᵢ₌₀^{n−1−k} (xᵢ − x̄)(xᵢ₊ₖ − x̄) / (n · σ̂²),
//!   where σ̂² is the population variance (divisor n). At k = 0 the
//!   numerator equals the denominator, so r(0) = 1.
//! - Offer two explicitly named entry points, [`sample_autocorrelation`]
//!   for one lag and [`sample_autocorrelations`] for a lag sequence, plus
//!   the tagged form [`autocorrelation`] over [`Lags`] / [`Autocorrelation`].
//! - Share the crate-internal `CenteredSeries` with the accumulators so
//!   that every sub-lag in one statistic uses a single mean and
//!   normalisation constant.
//!
//! Invariants & assumptions
//! ------------------------
//! - Signals are non-empty and finite; lags satisfy 0 ≤ k < n. Both are
//!   checked by `statistical_tests::validation` before any sum is formed.
//! - A constant signal has n · σ̂² = 0 and is reported as
//!   `PortmanteauError::ZeroVariance`. A finite signal whose mean or
//!   n · σ̂² overflows is reported as `PortmanteauError::NonFiniteMoments`.
//!   r(k) is never NaN.
//! - The lag-sequence form recomputes x̄ and n · σ̂² for each entry. It
//!   keeps no state between lags.
//!
//! Conventions
//! -----------
//! - Lag k pairs (xᵢ, xᵢ₊ₖ) for i = 0,…,n−1−k, i.e. the first n − k values
//!   against the last n − k values.
//! - The numerator is *not* rescaled by 1 / (n − k); the biased (1 / n)
//!   normalisation is what the portmanteau statistics expect.
//!
//! Testing notes
//! -------------
//! - Unit tests check r(0) = 1, invariance under x + c, the largest lag
//!   k = n − 1, closed-form values on linear and alternating signals, and
//!   every error branch.
use crate::statistical_tests::errors::{PortmanteauError, PortmanteauResult};
use crate::statistical_tests::validation::{validate_lag, validate_signal};

/// Lags — lag argument for [`autocorrelation`].
///
/// Replaces "an integer or an iterable of integers" with an explicit
/// discriminant. `From` conversions let callers write
/// `autocorrelation(&x, 1_usize)` or `autocorrelation(&x, vec![1_usize, 2, 3])`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lags {
    Single(usize),
    Many(Vec<usize>),
}

impl From<usize> for Lags {
    fn from(k: usize) -> Self {
        Lags::Single(k)
    }
}

impl From<Vec<usize>> for Lags {
    fn from(ks: Vec<usize>) -> Self {
        Lags::Many(ks)
    }
}

impl From<&[usize]> for Lags {
    fn from(ks: &[usize]) -> Self {
        Lags::Many(ks.to_vec())
    }
}

/// Autocorrelation — result of [`autocorrelation`], shaped like its [`Lags`].
#[derive(Debug, Clone, PartialEq)]
pub enum Autocorrelation {
    Scalar(f64),
    Series(Vec<f64>),
}

impl Autocorrelation {
    /// The scalar value, if this came from [`Lags::Single`].
    pub fn as_scalar(&self) -> Option<f64> {
        match self {
            Autocorrelation::Scalar(r) => Some(*r),
            Autocorrelation::Series(_) => None,
        }
    }

    /// Values as a vector; a scalar becomes a one-element vector.
    pub fn into_vec(self) -> Vec<f64> {
        match self {
            Autocorrelation::Scalar(r) => vec![r],
            Autocorrelation::Series(rs) => rs,
        }
    }
}

/// Compute the sample autocorrelation r(k) of `data` at a single lag.
///
/// Parameters
/// ----------
/// - `data`: `&[f64]`
///   Signal of length n ≥ 1 with finite values. Not modified.
/// - `k`: `usize`
///   Lag, 0 ≤ k < n. `k = n − 1` is the largest lag and uses one pair.
///
/// Returns
/// -------
/// `PortmanteauResult<f64>`
///   r(k), nominally in [−1, 1].
///
/// Errors
/// ------
/// - `InsufficientData` / `InvalidData` from signal validation.
/// - `InvalidLag` when `k >= n`.
/// - `ZeroVariance` when `data` is constant.
///
/// Examples
/// --------
/// ```rust
/// use rust_portmanteau::statistical_tests::sample_autocorrelation;
///
/// let x = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0];
/// let r1 = sample_autocorrelation(&x, 1).unwrap();
/// assert!((r1 - 0.7).abs() < 1e-12);
/// ```
pub fn sample_autocorrelation(data: &[f64], k: usize) -> PortmanteauResult<f64> {
    validate_signal(data, 1)?;
    validate_lag(k, data.len())?;
    Ok(CenteredSeries::new(data)?.rho(k))
}

/// Compute r(k) for every lag in `ks`, in order.
///
/// Each entry is evaluated independently through
/// [`sample_autocorrelation`]; duplicates and unsorted lags are fine and
/// the output is aligned index-for-index with `ks`.
///
/// Errors
/// ------
/// - The first error produced by any entry (see [`sample_autocorrelation`]).
pub fn sample_autocorrelations(data: &[f64], ks: &[usize]) -> PortmanteauResult<Vec<f64>> {
    ks.iter().map(|&k| sample_autocorrelation(data, k)).collect()
}

/// Tagged form of the estimator: one lag gives a scalar, a lag sequence
/// gives an aligned series.
pub fn autocorrelation(data: &[f64], lags: impl Into<Lags>) -> PortmanteauResult<Autocorrelation> {
    match lags.into() {
        Lags::Single(k) => sample_autocorrelation(data, k).map(Autocorrelation::Scalar),
        Lags::Many(ks) => sample_autocorrelations(data, &ks).map(Autocorrelation::Series),
    }
}

/// CenteredSeries — a validated signal with its mean and normalisation
/// constant n · σ̂² fixed.
///
/// The accumulators build one of these per statistic and evaluate
/// [`rho`](Self::rho) for each sub-lag, so r(1),…,r(L) share the same
/// denominator.
#[derive(Debug, Clone, Copy)]
pub(crate) struct CenteredSeries<'a> {
    data: &'a [f64],
    mean: f64,
    denom: f64,
}

impl<'a> CenteredSeries<'a> {
    /// Fix x̄ and n · σ̂² for `data`.
    ///
    /// Assumes `data` already passed `validate_signal`.
    ///
    /// Errors
    /// ------
    /// - `ZeroVariance` when every observation is identical, or the centred
    ///   sum of squares underflows to zero.
    /// - `NonFiniteMoments` when the mean or the centred sum of squares
    ///   overflows.
    pub(crate) fn new(data: &'a [f64]) -> PortmanteauResult<Self> {
        // Rounding in the mean can leave tiny residuals on a constant
        // series, so equality is checked on the raw values.
        if data.iter().all(|&x| x == data[0]) {
            log::warn!("constant signal of length {}: autocorrelation is undefined", data.len());
            return Err(PortmanteauError::ZeroVariance);
        }
        let mean = calc_mean(data);
        let denom = calc_lagged_cross_sum(data, 0, mean);
        if !mean.is_finite() || !denom.is_finite() {
            log::warn!("mean {mean} or sum of squares {denom} overflowed (n = {})", data.len());
            return Err(PortmanteauError::NonFiniteMoments);
        }
        if denom == 0.0 {
            log::warn!("centred sum of squares underflowed to zero (n = {})", data.len());
            return Err(PortmanteauError::ZeroVariance);
        }
        Ok(CenteredSeries { data, mean, denom })
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.data.len()
    }

    /// r(k) under the fixed normalisation. Caller guarantees `k < n`.
    #[inline]
    pub(crate) fn rho(&self, k: usize) -> f64 {
        calc_lagged_cross_sum(self.data, k, self.mean) / self.denom
    }
}

#[inline]
fn calc_mean(data: &[f64]) -> f64 {
    data.iter().sum::<f64>() / data.len() as f64
}

/// ∑ᵢ₌₀^{n−1−k} (xᵢ₊ₖ − x̄)(xᵢ − x̄). At k = 0 this is n · σ̂².
///
/// Panics if `k > data.len()` (slice bounds); callers validate first.
#[inline]
fn calc_lagged_cross_sum(data: &[f64], k: usize, mean: f64) -> f64 {
    data[k..].iter().zip(data).map(|(x_ik, x_i): (&f64, &f64)| (x_ik - mean) * (x_i - mean)).sum()
}
