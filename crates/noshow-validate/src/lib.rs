//! Data-quality expectation engine.
//!
//! Expectations are small JSON documents naming a dataset, a rule type and
//! its parameters. The engine evaluates each one against the named
//! DataFrame and always produces exactly one [`CheckResult`] per
//! expectation, in input order.
//!
//! [`CheckResult`]: noshow_model::CheckResult

mod check;
pub mod checks;
mod engine;
mod error;
mod loader;
mod summary;

pub use check::{Check, CheckSpecError};
pub use checks::{MAX_INVALID_SAMPLES, Outcome};
pub use engine::{evaluate_expectation, run_checks};
pub use error::{DqError, Result};
pub use loader::{load_expectations, load_expectations_file};
pub use summary::{issue_register, summarize};
