//! Core trait definitions for submission runners.
//!
//! The async trait here is the seam between the grading engine and whatever
//! produces a submission's output; the `gradeforge-runner` crate implements
//! it.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Trait for backends that produce a submission's output for one test input.
#[async_trait]
pub trait CodeRunner: Send + Sync {
    /// Short backend name (e.g. "simulated").
    fn name(&self) -> &str;

    /// Produce the stdout the submitted code yields for `request.input`.
    async fn run(&self, request: &RunRequest) -> anyhow::Result<String>;
}

/// Request to run a submission against one test input.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunRequest {
    /// Submitted source text.
    pub code: String,
    /// Test case stdin text.
    pub input: String,
    /// Per-run timeout in seconds. The simulated backend does not enforce
    /// it.
    pub timeout_secs: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_request_serde_roundtrip() {
        let request = RunRequest {
            code: "public class Sum {}".into(),
            input: "5 3".into(),
            timeout_secs: 30,
        };
        let json = serde_json::to_string(&request).unwrap();
        let deserialized: RunRequest = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized.input, "5 3");
        assert_eq!(deserialized.timeout_secs, 30);
    }
}
