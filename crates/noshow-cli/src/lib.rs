//! CLI library components for the no-show pipeline runner.

pub mod logging;
pub mod pipeline;
