//! Grading outcome types with JSON persistence.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::TestCase;

/// Outcome of replaying one test case. Created once per case per
/// evaluation; never mutated afterward.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestOutcome {
    /// The test case that was replayed.
    pub test_case: TestCase,
    /// Output the runner produced, or an error description.
    pub output: String,
    pub passed: bool,
    /// Either 0.0 or exactly the case weight.
    pub awarded: f64,
}

/// Final aggregated grading outcome for one submission.
///
/// Carries no timestamps or identifiers, so evaluating the same submission
/// twice against the same catalog yields an identical verdict.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationVerdict {
    /// Weighted score in [0, 100].
    pub percentage: f64,
    /// True iff the percentage reached the pass threshold.
    pub passed: bool,
    /// One-line summary, e.g. "Passed 3 out of 4 test cases. Score: 75.00%".
    pub remarks: String,
    /// Newline-terminated per-test lines in battery order.
    pub feedback: String,
}

impl EvaluationVerdict {
    /// Letter grade on the usual 90/80/70/60 boundaries.
    pub fn grade_letter(&self) -> char {
        if self.percentage >= 90.0 {
            'A'
        } else if self.percentage >= 80.0 {
            'B'
        } else if self.percentage >= 70.0 {
            'C'
        } else if self.percentage >= 60.0 {
            'D'
        } else {
            'F'
        }
    }
}

/// A graded submission as persisted: the verdict plus identity and
/// provenance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GradeRecord {
    /// Unique record identifier.
    pub id: Uuid,
    /// When the submission was graded.
    pub created_at: DateTime<Utc>,
    /// Submission title.
    pub title: String,
    /// Category the submission was graded under. Empty if evaluation failed
    /// before classification completed.
    pub category: String,
    pub verdict: EvaluationVerdict,
    /// Per-test outcomes in battery order.
    pub outcomes: Vec<TestOutcome>,
}

impl GradeRecord {
    /// Save the record as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize record")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write record to {}", path.display()))?;
        Ok(())
    }

    /// Load a record from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read record from {}", path.display()))?;
        let record: GradeRecord =
            serde_json::from_str(&content).context("failed to parse record JSON")?;
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_verdict(percentage: f64) -> EvaluationVerdict {
        EvaluationVerdict {
            percentage,
            passed: percentage >= 60.0,
            remarks: format!("Passed ? out of ? test cases. Score: {percentage:.2}%"),
            feedback: String::new(),
        }
    }

    #[test]
    fn grade_letter_boundaries() {
        assert_eq!(make_verdict(100.0).grade_letter(), 'A');
        assert_eq!(make_verdict(90.0).grade_letter(), 'A');
        assert_eq!(make_verdict(89.99).grade_letter(), 'B');
        assert_eq!(make_verdict(80.0).grade_letter(), 'B');
        assert_eq!(make_verdict(70.0).grade_letter(), 'C');
        assert_eq!(make_verdict(60.0).grade_letter(), 'D');
        assert_eq!(make_verdict(59.99).grade_letter(), 'F');
        assert_eq!(make_verdict(0.0).grade_letter(), 'F');
    }

    #[test]
    fn json_roundtrip() {
        let record = GradeRecord {
            id: Uuid::nil(),
            created_at: Utc::now(),
            title: "Add Two Numbers".into(),
            category: "add-numbers".into(),
            verdict: make_verdict(75.0),
            outcomes: vec![TestOutcome {
                test_case: TestCase::new("5 3", "8", 1.0, "Add positive numbers"),
                output: "8".into(),
                passed: true,
                awarded: 1.0,
            }],
        };

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("results").join("record.json");

        record.save_json(&path).unwrap();
        let loaded = GradeRecord::load_json(&path).unwrap();

        assert_eq!(loaded.title, "Add Two Numbers");
        assert_eq!(loaded.category, "add-numbers");
        assert_eq!(loaded.outcomes.len(), 1);
        assert_eq!(loaded.verdict, record.verdict);
    }

    #[test]
    fn load_missing_file_is_contextual_error() {
        let err = GradeRecord::load_json(Path::new("/nonexistent/record.json")).unwrap_err();
        assert!(err.to_string().contains("failed to read record"));
    }
}
