//! PyO3 bindings.
//!
//! Exposes compiled regexes as `wfa.rustylib.regex.Regex` and the graph
//! algorithms over nested Python lists as `wfa.rustylib.graph`.

use crate::error::{Error, LookupError, ShapeError};
use crate::graph;
use crate::matrix::Matrix;
use crate::regex::Regex;
use pyo3::exceptions::{PyKeyError, PyValueError};
use pyo3::prelude::*;

fn shape_err(err: ShapeError) -> PyErr {
    PyValueError::new_err(err.to_string())
}

fn lookup_err(err: LookupError) -> PyErr {
    PyKeyError::new_err(err.to_string())
}

fn compile_err(err: Error) -> PyErr {
    match err {
        Error::Lookup(err) => lookup_err(err),
        other => PyValueError::new_err(other.to_string()),
    }
}

fn to_matrix<R: Clone>(rows: Vec<Vec<R>>) -> PyResult<Matrix<R>> {
    Matrix::from_rows(rows).map_err(shape_err)
}

/// A regular expression compiled over a fixed alphabet.
#[pyclass(name = "Regex", module = "wfa.rustylib.regex", frozen)]
pub struct PyRegex {
    inner: Regex,
}

#[pymethods]
impl PyRegex {
    #[new]
    fn new(pattern: &str, alphabet: Vec<char>) -> PyResult<Self> {
        let inner = Regex::new(pattern, &alphabet).map_err(compile_err)?;
        Ok(Self { inner })
    }

    /// Whether the whole of `text` matches. Raises `KeyError` for characters
    /// outside the alphabet.
    fn is_match(&self, text: &str) -> PyResult<bool> {
        self.inner.is_match(text).map_err(lookup_err)
    }

    #[getter]
    fn pattern(&self) -> &str {
        self.inner.as_str()
    }

    #[getter]
    fn num_states(&self) -> usize {
        self.inner.automaton().num_states()
    }

    fn __repr__(&self) -> String {
        format!("Regex({:?})", self.inner.as_str())
    }
}

/// Number of walks of exactly `length` edges.
#[pyfunction]
fn count_paths_of_length(adj: Vec<Vec<u64>>, length: u32) -> PyResult<Vec<Vec<u64>>> {
    let adj = to_matrix(adj)?;
    Ok(graph::count_paths_of_length(&adj, length)
        .map_err(shape_err)?
        .to_rows())
}

/// Reachability in at most `max_len` edges.
#[pyfunction]
fn reachable_within(adj: Vec<Vec<bool>>, max_len: u32) -> PyResult<Vec<Vec<bool>>> {
    let adj = to_matrix(adj)?;
    Ok(graph::reachable_within(&adj, max_len)
        .map_err(shape_err)?
        .to_rows())
}

/// Lightest walks of at most `max_len` edges; use `inf` for missing edges.
#[pyfunction]
fn shortest_paths_up_to(weights: Vec<Vec<f64>>, max_len: u32) -> PyResult<Vec<Vec<f64>>> {
    let weights = to_matrix(weights)?;
    Ok(graph::shortest_paths_up_to(&weights, max_len)
        .map_err(shape_err)?
        .to_rows())
}

/// Exact transitive closure.
#[pyfunction]
#[pyo3(signature = (adj, reflexive = false))]
fn transitive_closure(adj: Vec<Vec<bool>>, reflexive: bool) -> PyResult<Vec<Vec<bool>>> {
    let adj = to_matrix(adj)?;
    Ok(graph::transitive_closure_bool(&adj, reflexive)
        .map_err(shape_err)?
        .to_rows())
}

/// Register the regex submodule.
pub fn regex(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyRegex>()?;
    Ok(())
}

/// Register the graph submodule.
pub fn graph(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(count_paths_of_length, m)?)?;
    m.add_function(wrap_pyfunction!(reachable_within, m)?)?;
    m.add_function(wrap_pyfunction!(shortest_paths_up_to, m)?)?;
    m.add_function(wrap_pyfunction!(transitive_closure, m)?)?;
    Ok(())
}
