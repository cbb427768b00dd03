//! rust_portmanteau — sample autocorrelation and portmanteau whiteness tests.
//!
//! Purpose
//! -------
//! Serve as the crate root for Rust callers and as the PyO3 bridge that
//! exposes the Ljung-Box / Box-Pierce machinery to Python via the
//! `_rust_portmanteau` extension module when the `python-bindings` feature
//! is enabled.
//!
//! Key behaviors
//! -------------
//! - Re-export the core Rust module `statistical_tests` as the public crate
//!   surface.
//! - Define `#[pyclass]` / `#[pyfunction]` wrappers and the `#[pymodule]`
//!   initializer for the `_rust_portmanteau` Python extension.
//! - Register the `statistical_tests` Python submodule in `sys.modules` so
//!   dotted imports work.
//!
//! Invariants & assumptions
//! ------------------------
//! - All numerical work lives in `statistical_tests`; this file performs
//!   only FFI glue, argument conversion, and error mapping.
//! - Python-visible functions mirror the Rust signatures and invariants
//!   (lags `1 ≤ h < n`, `0 < alpha < 1`, method "Ljung-Box" or
//!   "Box-Pierce").
//!
//! Conventions
//! -----------
//! - Errors from core Rust code are [`statistical_tests::PortmanteauError`]
//!   values, raised in Python as `ValueError` with the same message.
//! - Malformed Python argument types (e.g. a string as a lag) raise
//!   `TypeError`.
//!
//! Downstream usage
//! ----------------
//! - Native Rust code should depend on `statistical_tests` directly and can
//!   ignore the items guarded by `python-bindings`.
//! - With the `parallel` feature the test driver evaluates lags on the
//!   rayon pool; results are unchanged.
//!
//! Testing notes
//! -------------
//! - Numerical behavior is covered by unit tests in the inner modules and by
//!   the integration tests under `tests/`.

pub mod statistical_tests;
pub mod utils;

#[cfg(feature = "python-bindings")]
use numpy::PyReadonlyArray1;

#[cfg(feature = "python-bindings")]
use pyo3::{exceptions::PyValueError, prelude::*, types::PyAny};

#[cfg(feature = "python-bindings")]
use crate::{
    statistical_tests::{
        Autocorrelation, PortmanteauOptions, PortmanteauOutcome, autocorrelation,
        box_pierce_statistic, ljung_box_statistic,
    },
    utils::{extract_f64_array, extract_lag_set, extract_lags, lag_from_signed},
};

#[cfg(feature = "python-bindings")]
fn contiguous_slice<'a>(arr: &'a PyReadonlyArray1<'_, f64>) -> PyResult<&'a [f64]> {
    arr.as_slice().map_err(|_| {
        PyValueError::new_err("data must be a 1-D contiguous float64 array or sequence")
    })
}

/// PortmanteauTest — Python-facing wrapper for the Ljung-Box / Box-Pierce test.
///
/// Constructed from Python via
/// `PortmanteauTest(data, lags, alpha=0.1, method="Ljung-Box")`:
/// - `data`: one-dimensional array-like of finite `float64` values.
/// - `lags`: an int or a sequence of ints, each `1 ≤ h < len(data)`.
/// - `alpha`: significance level in (0, 1).
/// - `method`: "Ljung-Box"/"lb" or "Box-Pierce"/"bp"; anything else raises.
///
/// Getters return per-lag lists aligned with `lags`.
#[cfg(feature = "python-bindings")]
#[pyclass(module = "rust_portmanteau.statistical_tests")]
pub struct PortmanteauTest {
    inner: PortmanteauOutcome,
}

#[cfg(feature = "python-bindings")]
#[pymethods]
impl PortmanteauTest {
    #[new]
    #[pyo3(
        text_signature = "(data, lags, /, alpha=0.1, method='Ljung-Box')",
        signature = (raw_data, lags, alpha = 0.1, method = "Ljung-Box")
    )]
    pub fn new<'py>(
        py: Python<'py>, raw_data: &Bound<'py, PyAny>, lags: &Bound<'py, PyAny>, alpha: f64,
        method: &str,
    ) -> PyResult<PortmanteauTest> {
        let arr = extract_f64_array(py, raw_data)?;
        let data = contiguous_slice(&arr)?;
        let lags = extract_lag_set(lags, data.len())?;
        let opts = PortmanteauOptions::parse(alpha, method)?;
        let inner = PortmanteauOutcome::portmanteau_test(data, &lags, &opts)?;
        Ok(PortmanteauTest { inner })
    }

    /// Rejection flags (`True` = independence rejected) per lag.
    #[getter]
    pub fn rejected(&self) -> Vec<bool> {
        self.inner.rejected().to_vec()
    }

    #[getter]
    pub fn pvalues(&self) -> Vec<f64> {
        self.inner.p_values().to_vec()
    }

    #[getter]
    pub fn statistics(&self) -> Vec<f64> {
        self.inner.statistics().to_vec()
    }

    #[getter]
    pub fn critical_values(&self) -> Vec<f64> {
        self.inner.critical_values().to_vec()
    }

    #[getter]
    pub fn lags(&self) -> Vec<usize> {
        self.inner.lags().to_vec()
    }

    #[getter]
    pub fn alpha(&self) -> f64 {
        self.inner.alpha()
    }

    #[getter]
    pub fn method(&self) -> &'static str {
        self.inner.method().name()
    }
}

/// Sample autocorrelation at one lag (returns a float) or at a sequence of
/// lags (returns a list aligned with the input).
#[cfg(feature = "python-bindings")]
#[pyfunction]
#[pyo3(name = "autocorrelation", signature = (raw_data, k = None))]
fn py_autocorrelation<'py>(
    py: Python<'py>, raw_data: &Bound<'py, PyAny>, k: Option<&Bound<'py, PyAny>>,
) -> PyResult<Bound<'py, PyAny>> {
    let arr = extract_f64_array(py, raw_data)?;
    let data = contiguous_slice(&arr)?;
    let lags = match k {
        Some(raw) => extract_lags(raw, data.len())?,
        None => 1_usize.into(),
    };

    match autocorrelation(data, lags)? {
        Autocorrelation::Scalar(r) => Ok(r.into_pyobject(py)?.into_any()),
        Autocorrelation::Series(rs) => rs.into_pyobject(py),
    }
}

/// Ljung-Box Q statistic at depth `lags`.
#[cfg(feature = "python-bindings")]
#[pyfunction]
#[pyo3(name = "ljung_box")]
fn py_ljung_box<'py>(py: Python<'py>, raw_data: &Bound<'py, PyAny>, lags: i64) -> PyResult<f64> {
    let arr = extract_f64_array(py, raw_data)?;
    let data = contiguous_slice(&arr)?;
    Ok(ljung_box_statistic(data, lag_from_signed(lags, data.len())?)?)
}

/// Box-Pierce Q statistic at depth `lags`.
#[cfg(feature = "python-bindings")]
#[pyfunction]
#[pyo3(name = "box_pierce")]
fn py_box_pierce<'py>(py: Python<'py>, raw_data: &Bound<'py, PyAny>, lags: i64) -> PyResult<f64> {
    let arr = extract_f64_array(py, raw_data)?;
    let data = contiguous_slice(&arr)?;
    Ok(box_pierce_statistic(data, lag_from_signed(lags, data.len())?)?)
}

/// _rust_portmanteau — PyO3 module initializer for the Python extension.
///
/// Creates the `statistical_tests` submodule, attaches it to the parent
/// module and registers it in `sys.modules` so it is importable via a
/// dotted path.
#[cfg(feature = "python-bindings")]
#[pymodule]
fn _rust_portmanteau<'py>(_py: Python<'py>, m: &Bound<'py, PyModule>) -> PyResult<()> {
    let statistical_tests_mod = PyModule::new(_py, "statistical_tests")?;
    statistical_tests(_py, m, &statistical_tests_mod)?;

    // Manually add the submodule into sys.modules to allow for dot notation.
    _py.import("sys")?
        .getattr("modules")?
        .set_item("rust_portmanteau.statistical_tests", statistical_tests_mod)?;
    Ok(())
}

#[cfg(feature = "python-bindings")]
fn statistical_tests<'py>(
    _py: Python, rust_portmanteau: &Bound<'py, PyModule>, m: &Bound<'py, PyModule>,
) -> PyResult<()> {
    m.add_class::<PortmanteauTest>()?;
    m.add_function(wrap_pyfunction!(py_autocorrelation, m)?)?;
    m.add_function(wrap_pyfunction!(py_ljung_box, m)?)?;
    m.add_function(wrap_pyfunction!(py_box_pierce, m)?)?;
    rust_portmanteau.add_submodule(m)?;
    Ok(())
}
