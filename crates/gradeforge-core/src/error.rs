//! Runner error types.
//!
//! Defined in `gradeforge-core` so the grading engine can classify runner
//! failures without string matching.

use thiserror::Error;

/// Errors a runner backend can produce while replaying one test input.
#[derive(Debug, Error)]
pub enum RunError {
    /// A test input could not be parsed as the matched rule requires.
    #[error("invalid integer input: '{0}'")]
    InvalidInteger(String),
}

impl RunError {
    /// Returns `true` if the failure was caused by the test input rather
    /// than the backend itself.
    pub fn is_input_error(&self) -> bool {
        matches!(self, RunError::InvalidInteger(_))
    }
}
