//! Semiring-weighted matrices and automata.
//!
//! One dense matrix algebra, parameterised by a [`Semiring`], drives
//! everything else in the crate:
//! - [`automaton`]: weighted automata, execution and synchronized product
//! - [`regex`]: pattern → Thompson NFA → ε-free Boolean automaton
//! - [`graph`]: reachability, walk counting, shortest paths, Warshall closure
//! - [`hmm`]: the forward algorithm (likelihood or Viterbi, by semiring)
//!
//! All computations are pure and synchronous. Malformed input is reported
//! through [`ParseError`], [`ShapeError`] or [`LookupError`].

pub mod alphabet;
pub mod automaton;
pub mod error;
pub mod graph;
pub mod hmm;
pub mod matrix;
pub mod regex;
pub mod semiring;
pub mod state;

#[cfg(feature = "python")]
mod python_bindings;

pub use alphabet::Alphabet;
pub use automaton::WeightedAutomaton;
pub use error::{Error, LookupError, ParseError, ParseErrorKind, ShapeError};
pub use hmm::Hmm;
pub use matrix::Matrix;
pub use regex::{Regex, RegexOptions, compile_regex_to_wa};
pub use semiring::{Field, Ring, Semiring};
pub use state::{StateId, StateSet};

#[cfg(feature = "python")]
use pyo3::prelude::*;

#[cfg(feature = "python")]
fn import_submodule<'py>(
    py: Python<'py>,
    m: &Bound<'py, PyModule>,
    package: &str,
    name: &str,
    import_func: impl FnOnce(&Bound<'py, PyModule>) -> PyResult<()>,
) -> PyResult<()> {
    let submodule = PyModule::new(py, name)?;
    import_func(&submodule)?;

    // Register in sys.modules so `import wfa.rustylib.<name>` works
    let sys_modules = PyModule::import(py, "sys")?.getattr("modules")?;
    sys_modules.set_item(format!("{}.{}", package, name), submodule.clone())?;

    m.add_submodule(&submodule)?;
    Ok(())
}

#[cfg(feature = "python")]
#[pymodule]
fn rustylib(m: &Bound<'_, PyModule>) -> PyResult<()> {
    import_submodule(m.py(), m, "wfa.rustylib", "regex", python_bindings::regex)?;
    import_submodule(m.py(), m, "wfa.rustylib", "graph", python_bindings::graph)?;

    m.add_class::<python_bindings::PyRegex>()?;
    Ok(())
}
