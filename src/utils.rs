#[cfg(feature = "python-bindings")]
use pyo3::{
    exceptions::PyTypeError,
    prelude::*,
    types::{PyAny, PySequence},
};

#[cfg(feature = "python-bindings")]
use numpy::{
    IntoPyArray,    // Vec → PyArray
    PyArrayMethods, // .readonly()
    PyReadonlyArray1,
};

#[cfg(feature = "python-bindings")]
use crate::statistical_tests::{Lags, PortmanteauError, PortmanteauResult};

#[cfg(feature = "python-bindings")]
#[inline]
pub fn extract_f64_array<'py>(
    py: Python<'py>, raw_data: &Bound<'py, PyAny>,
) -> PyResult<PyReadonlyArray1<'py, f64>> {
    if let Ok(arr_ro) = raw_data.extract::<PyReadonlyArray1<f64>>() {
        if arr_ro.as_slice().is_ok() {
            return Ok(arr_ro);
        }
    }

    if let Ok(obj) = raw_data.call_method("to_numpy", (false,), None) {
        if let Ok(series_ro) = obj.extract::<PyReadonlyArray1<f64>>() {
            if series_ro.as_slice().is_ok() {
                return Ok(series_ro);
            }
        }
    }

    let vec: Vec<f64> = raw_data.extract().map_err(|_| {
        PyTypeError::new_err("expected a 1-D numpy.ndarray, pandas.Series, or sequence of float64")
    })?;
    Ok(vec.into_pyarray(py).readonly())
}

/// Convert a Python lag argument into [`Lags`].
///
/// Sequences (lists, tuples, 1-D integer arrays) become [`Lags::Many`];
/// anything else must be a single integer and becomes [`Lags::Single`].
/// Negative entries are reported as `InvalidLag` against `len`.
#[cfg(feature = "python-bindings")]
pub fn extract_lags(raw_lags: &Bound<'_, PyAny>, len: usize) -> PyResult<Lags> {
    if raw_lags.downcast::<PySequence>().is_ok() {
        let values: Vec<i64> = raw_lags
            .extract()
            .map_err(|_| PyTypeError::new_err("lags must be a sequence of integers"))?;
        let lags = values
            .into_iter()
            .map(|v| lag_from_signed(v, len))
            .collect::<PortmanteauResult<Vec<usize>>>()?;
        return Ok(Lags::Many(lags));
    }

    let value: i64 = raw_lags
        .extract()
        .map_err(|_| PyTypeError::new_err("lag must be an integer or a sequence of integers"))?;
    Ok(Lags::Single(lag_from_signed(value, len)?))
}

/// Extract a lag set; a bare integer is accepted as a one-element set.
#[cfg(feature = "python-bindings")]
pub fn extract_lag_set(raw_lags: &Bound<'_, PyAny>, len: usize) -> PyResult<Vec<usize>> {
    Ok(match extract_lags(raw_lags, len)? {
        Lags::Single(k) => vec![k],
        Lags::Many(ks) => ks,
    })
}

#[cfg(feature = "python-bindings")]
pub fn lag_from_signed(value: i64, len: usize) -> PortmanteauResult<usize> {
    usize::try_from(value).map_err(|_| PortmanteauError::InvalidLag { lag: value, len })
}
