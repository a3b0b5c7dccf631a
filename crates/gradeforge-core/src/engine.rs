//! Central grading orchestrator.
//!
//! Ties the classifier, catalog, and runner together: classify the
//! submission, replay its category's battery, aggregate a verdict. The
//! engine holds no per-call state; one instance grades any number of
//! submissions concurrently.

use std::sync::Arc;

use anyhow::Result;
use chrono::Utc;
use futures::stream::{self, StreamExt};
use uuid::Uuid;

use crate::catalog::Catalog;
use crate::classifier::classify;
use crate::error::RunError;
use crate::model::{Submission, TestCase};
use crate::results::{EvaluationVerdict, GradeRecord, TestOutcome};
use crate::scoring::aggregate_outcomes;
use crate::traits::{CodeRunner, RunRequest};

/// Remark used when a category resolves to an empty battery.
const EMPTY_BATTERY_REMARKS: &str = "No test cases found for this assignment type";

/// Configuration for the grading engine.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Maximum test cases of one battery replayed concurrently.
    pub parallelism: usize,
    /// Minimum percentage counted as a pass.
    pub pass_threshold: f64,
    /// Per-test timeout in seconds, forwarded to the runner. The simulated
    /// backend does not enforce it.
    pub timeout_secs: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            parallelism: 4,
            pass_threshold: 60.0,
            timeout_secs: 30,
        }
    }
}

/// The central grading engine.
pub struct GradingEngine {
    catalog: Arc<Catalog>,
    runner: Arc<dyn CodeRunner>,
    config: EngineConfig,
}

impl GradingEngine {
    pub fn new(catalog: Arc<Catalog>, runner: Arc<dyn CodeRunner>, config: EngineConfig) -> Self {
        Self {
            catalog,
            runner,
            config,
        }
    }

    /// Grade a submission into a persisted record.
    ///
    /// Never fails: any unexpected orchestration error degrades to a
    /// zero-score verdict carrying the reason in its remarks.
    pub async fn grade(&self, submission: &Submission) -> GradeRecord {
        match self.try_grade(submission).await {
            Ok(record) => {
                tracing::info!(
                    title = %record.title,
                    category = %record.category,
                    runner = self.runner.name(),
                    score = record.verdict.percentage,
                    passed = record.verdict.passed,
                    "submission graded"
                );
                record
            }
            Err(e) => {
                tracing::error!(title = %submission.title, "evaluation failed: {e:#}");
                failure_record(submission, &e)
            }
        }
    }

    /// Grade a submission and return only the verdict.
    pub async fn evaluate(&self, submission: &Submission) -> EvaluationVerdict {
        self.grade(submission).await.verdict
    }

    async fn try_grade(&self, submission: &Submission) -> Result<GradeRecord> {
        let category = classify(&self.catalog, submission).to_string();
        let battery = self.catalog.battery(&category);

        if battery.is_empty() {
            tracing::warn!(title = %submission.title, category = %category, "empty test battery");
            return Ok(GradeRecord {
                id: Uuid::new_v4(),
                created_at: Utc::now(),
                title: submission.title.clone(),
                category,
                verdict: EvaluationVerdict {
                    percentage: 0.0,
                    passed: false,
                    remarks: EMPTY_BATTERY_REMARKS.to_string(),
                    feedback: String::new(),
                },
                outcomes: Vec::new(),
            });
        }

        let outcomes = self.run_battery(&submission.source, battery).await;
        let verdict = aggregate_outcomes(&outcomes, self.config.pass_threshold);

        Ok(GradeRecord {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            title: submission.title.clone(),
            category,
            verdict,
            outcomes,
        })
    }

    /// Replay a battery, bounded by `parallelism`. Outcomes come back in
    /// battery order regardless of completion order.
    async fn run_battery(&self, source: &str, battery: &[TestCase]) -> Vec<TestOutcome> {
        let timeout_secs = self.config.timeout_secs;

        stream::iter(battery.to_vec())
            .map(|case| {
                let runner = Arc::clone(&self.runner);
                let code = source.to_string();
                async move {
                    let request = RunRequest {
                        code,
                        input: case.input.clone(),
                        timeout_secs,
                    };

                    match runner.run(&request).await {
                        Ok(output) => {
                            let passed = case.validate_output(&output);
                            let awarded = if passed { case.weight } else { 0.0 };
                            TestOutcome {
                                test_case: case,
                                output,
                                passed,
                                awarded,
                            }
                        }
                        Err(e) => {
                            match e.downcast_ref::<RunError>() {
                                Some(run_err) if run_err.is_input_error() => {
                                    tracing::debug!(input = %case.input, "test input rejected: {run_err}");
                                }
                                _ => {
                                    tracing::warn!(input = %case.input, "runner failure: {e:#}");
                                }
                            }
                            TestOutcome {
                                test_case: case,
                                output: format!("Error: {e}"),
                                passed: false,
                                awarded: 0.0,
                            }
                        }
                    }
                }
            })
            .buffered(self.config.parallelism.max(1))
            .collect()
            .await
    }
}

/// Zero-score record for a submission whose evaluation failed outright.
fn failure_record(submission: &Submission, reason: &anyhow::Error) -> GradeRecord {
    GradeRecord {
        id: Uuid::new_v4(),
        created_at: Utc::now(),
        title: submission.title.clone(),
        category: String::new(),
        verdict: EvaluationVerdict {
            percentage: 0.0,
            passed: false,
            remarks: format!("Evaluation failed: {reason:#}"),
            feedback: String::new(),
        },
        outcomes: Vec::new(),
    }
}
