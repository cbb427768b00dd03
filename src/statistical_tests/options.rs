//! statistical_tests::options — configuration for the portmanteau driver.
//!
//! - [`PortmanteauMethod`]: which Q statistic to compute.
//! - [`PortmanteauOptions`]: significance level and method, validated on
//!   construction.
//!
//! Defaults follow common practice for residual whiteness checks:
//! `alpha = 0.1`, method Ljung-Box.
use crate::statistical_tests::errors::{PortmanteauError, PortmanteauResult};
use crate::statistical_tests::statistics::{box_pierce_statistic, ljung_box_statistic};
use crate::statistical_tests::validation::validate_alpha;
use std::str::FromStr;

pub const DEFAULT_ALPHA: f64 = 0.1;

/// Choice of portmanteau statistic.
///
/// Variants:
/// - `LjungBox`: small-sample corrected Q = n(n + 2) ∑ r(k)² / (n − k).
/// - `BoxPierce`: Q = n ∑ r(k)².
///
/// Parsing:
/// `FromStr` accepts, case-insensitively, `"Ljung-Box"`, `"LjungBox"`,
/// `"ljung_box"`, `"lb"` and `"Box-Pierce"`, `"BoxPierce"`, `"box_pierce"`,
/// `"bp"`. Anything else returns [`PortmanteauError::InvalidMethod`]; there
/// is no silent fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PortmanteauMethod {
    #[default]
    LjungBox,
    BoxPierce,
}

impl PortmanteauMethod {
    /// Evaluate this method's Q statistic at depth `lags`.
    pub fn statistic(self, data: &[f64], lags: usize) -> PortmanteauResult<f64> {
        match self {
            PortmanteauMethod::LjungBox => ljung_box_statistic(data, lags),
            PortmanteauMethod::BoxPierce => box_pierce_statistic(data, lags),
        }
    }

    /// Canonical display name.
    pub fn name(self) -> &'static str {
        match self {
            PortmanteauMethod::LjungBox => "Ljung-Box",
            PortmanteauMethod::BoxPierce => "Box-Pierce",
        }
    }
}

impl std::fmt::Display for PortmanteauMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PortmanteauMethod {
    type Err = PortmanteauError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "ljung-box" | "ljungbox" | "ljung_box" | "lb" => Ok(PortmanteauMethod::LjungBox),
            "box-pierce" | "boxpierce" | "box_pierce" | "bp" => Ok(PortmanteauMethod::BoxPierce),
            _ => Err(PortmanteauError::InvalidMethod(s.to_string())),
        }
    }
}

/// Driver configuration.
///
/// - `alpha`: significance level, 0 < alpha < 1. Critical values are the
///   χ² quantiles at 1 − alpha.
/// - `method`: which statistic to compute.
///
/// Build through [`PortmanteauOptions::new`] (validates `alpha`) or
/// [`Default`]. Fields stay private so a constructed value is always valid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PortmanteauOptions {
    alpha: f64,
    method: PortmanteauMethod,
}

impl PortmanteauOptions {
    /// Construct validated options.
    ///
    /// # Errors
    /// - [`PortmanteauError::InvalidAlpha`] unless `0 < alpha < 1`.
    pub fn new(alpha: f64, method: PortmanteauMethod) -> PortmanteauResult<Self> {
        validate_alpha(alpha)?;
        Ok(Self { alpha, method })
    }

    /// Parse `method` with [`PortmanteauMethod::from_str`] and validate
    /// `alpha`.
    pub fn parse(alpha: f64, method: &str) -> PortmanteauResult<Self> {
        Self::new(alpha, method.parse()?)
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    pub fn method(&self) -> PortmanteauMethod {
        self.method
    }

    /// Same options with a different method.
    pub fn with_method(self, method: PortmanteauMethod) -> Self {
        Self { method, ..self }
    }
}

impl Default for PortmanteauOptions {
    fn default() -> Self {
        Self { alpha: DEFAULT_ALPHA, method: PortmanteauMethod::LjungBox }
    }
}
