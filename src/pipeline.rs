//! Sequential step execution with fail-fast short-circuiting
//!
//! The report pipeline is an ordered list of fallible steps: the first
//! failure of a fatal step aborts the run, while best-effort steps (display,
//! cleanup) only warn. Teardown of scoped resources such as the Python
//! environment is handled by guard drops, not by the runner.

use crate::errors::AppResult;
use tracing::{info, warn};

/// Run a fatal pipeline step; its error aborts the pipeline
pub fn run_step<T>(name: &'static str, step: impl FnOnce() -> AppResult<T>) -> AppResult<T> {
    info!("Step: {}", name);
    step()
}

/// Run a best-effort step; failures are surfaced as warnings only
pub fn run_lenient(name: &'static str, step: impl FnOnce() -> AppResult<()>) {
    info!("Step: {}", name);
    match step() {
        Ok(()) => {}
        Err(e) => warn!("Warning: {} failed: {}", name, e),
    }
}
