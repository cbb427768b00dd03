//! statistical_tests — autocorrelation and portmanteau whiteness tests.
//!
//! Purpose
//! -------
//! Collect the sample autocorrelation estimator, the Ljung-Box and
//! Box-Pierce statistics and the portmanteau test driver, together with
//! their shared validation and error handling.
//!
//! Key behaviors
//! -------------
//! - [`sample_autocorrelation`], [`sample_autocorrelations`] and the tagged
//!   [`autocorrelation`] estimate r(k) with the biased (1 / n) normalisation.
//! - [`ljung_box_statistic`] and [`box_pierce_statistic`] fold r(1),…,r(L)
//!   into a single Q for a fixed depth L.
//! - [`PortmanteauOutcome::portmanteau_test`] (and the free function
//!   [`portmanteau_test`]) evaluate Q, its χ² p-value, the χ² critical
//!   value and the rejection flag at every lag of a lag set.
//!
//! Invariants & assumptions
//! ------------------------
//! - Inputs are finite, in-memory `&[f64]` signals; modules call the
//!   guards in [`validation`] before any lag-based computation.
//! - Routines report failures via [`PortmanteauResult`] and never panic on
//!   user-facing invalid inputs.
//! - Constant signals are always a [`PortmanteauError::ZeroVariance`] error.
//!
//! Downstream usage
//! ----------------
//! - Typical Rust code imports the main surface as:
//!
//!   ```rust
//!   use rust_portmanteau::statistical_tests::{PortmanteauMethod, portmanteau_test};
//!
//!   let residuals = [0.4, -0.1, 0.3, -0.5, 0.2, 0.1, -0.3, 0.6, -0.2, 0.0];
//!   let outcome = portmanteau_test(&residuals, &[1, 2, 4], 0.05, PortmanteauMethod::BoxPierce)?;
//!   assert_eq!(outcome.len(), 3);
//!   # Ok::<(), rust_portmanteau::statistical_tests::PortmanteauError>(())
//!   ```
//!
//! - Python bindings expose thin wrappers around the same entry points and
//!   rely on `From<PortmanteauError> for PyErr` to raise `ValueError`.

pub mod autocorrelation;
pub mod errors;
pub mod options;
pub mod portmanteau;
pub mod statistics;
pub mod validation;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::autocorrelation::{
    Autocorrelation, Lags, autocorrelation, sample_autocorrelation, sample_autocorrelations,
};
pub use self::errors::{PortmanteauError, PortmanteauResult};
pub use self::options::{DEFAULT_ALPHA, PortmanteauMethod, PortmanteauOptions};
pub use self::portmanteau::{LagTest, PortmanteauOutcome, portmanteau_test};
pub use self::statistics::{box_pierce_statistic, ljung_box_statistic};

pub mod prelude {
    pub use super::autocorrelation::{sample_autocorrelation, sample_autocorrelations};
    pub use super::errors::{PortmanteauError, PortmanteauResult};
    pub use super::options::{PortmanteauMethod, PortmanteauOptions};
    pub use super::portmanteau::{PortmanteauOutcome, portmanteau_test};
    pub use super::statistics::{box_pierce_statistic, ljung_box_statistic};
}
