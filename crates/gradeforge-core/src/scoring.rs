//! Verdict aggregation and batch statistics.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::results::{EvaluationVerdict, GradeRecord, TestOutcome};

/// Fold a battery's outcomes into a verdict.
///
/// percentage = 100 × Σ awarded / Σ weight, or 0 for an empty battery;
/// feedback lines are emitted in outcome order, one per case, each
/// newline-terminated.
pub fn aggregate_outcomes(outcomes: &[TestOutcome], pass_threshold: f64) -> EvaluationVerdict {
    let mut total_awarded = 0.0;
    let mut total_weight = 0.0;
    let mut passed_count = 0usize;
    let mut feedback = String::new();

    for outcome in outcomes {
        total_awarded += outcome.awarded;
        total_weight += outcome.test_case.weight;
        if outcome.passed {
            passed_count += 1;
        }

        feedback.push_str(&format!(
            "Test: {} - {} (Score: {:.1}/{:.1})\n",
            outcome.test_case.description,
            if outcome.passed { "PASSED" } else { "FAILED" },
            outcome.awarded,
            outcome.test_case.weight,
        ));
    }

    let percentage = if total_weight > 0.0 {
        total_awarded / total_weight * 100.0
    } else {
        0.0
    };
    let passed = percentage >= pass_threshold;

    let remarks = format!(
        "Passed {} out of {} test cases. Score: {:.2}%",
        passed_count,
        outcomes.len(),
        percentage,
    );

    EvaluationVerdict {
        percentage,
        passed,
        remarks,
        feedback,
    }
}

/// Aggregate statistics across many graded submissions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchStats {
    /// Per-category statistics keyed by category id.
    pub per_category: HashMap<String, CategoryStats>,
    /// Total submissions graded.
    pub submissions: usize,
    /// Submissions that passed.
    pub passed: usize,
    /// Mean percentage across all submissions.
    pub mean_percentage: f64,
}

/// Statistics for one category across a batch of submissions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryStats {
    pub category: String,
    pub submissions: usize,
    pub passed: usize,
    /// Fraction of submissions that passed, in [0, 1].
    pub pass_rate: f64,
    pub mean_percentage: f64,
}

/// Compute batch statistics from a set of grade records.
pub fn compute_batch_stats(records: &[GradeRecord]) -> BatchStats {
    let mut grouped: HashMap<String, Vec<&GradeRecord>> = HashMap::new();
    for record in records {
        grouped
            .entry(record.category.clone())
            .or_default()
            .push(record);
    }

    let mut per_category = HashMap::new();
    for (category, group) in &grouped {
        let submissions = group.len();
        let passed = group.iter().filter(|r| r.verdict.passed).count();
        let mean_percentage = group
            .iter()
            .map(|r| r.verdict.percentage)
            .sum::<f64>()
            / submissions.max(1) as f64;

        per_category.insert(
            category.clone(),
            CategoryStats {
                category: category.clone(),
                submissions,
                passed,
                pass_rate: passed as f64 / submissions.max(1) as f64,
                mean_percentage,
            },
        );
    }

    let submissions = records.len();
    let passed = records.iter().filter(|r| r.verdict.passed).count();
    let mean_percentage = records
        .iter()
        .map(|r| r.verdict.percentage)
        .sum::<f64>()
        / submissions.max(1) as f64;

    BatchStats {
        per_category,
        submissions,
        passed,
        mean_percentage,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TestCase;
    use chrono::Utc;
    use uuid::Uuid;

    fn make_outcome(description: &str, weight: f64, passed: bool) -> TestOutcome {
        TestOutcome {
            test_case: TestCase::new("in", "out", weight, description),
            output: if passed { "out".into() } else { "wrong".into() },
            passed,
            awarded: if passed { weight } else { 0.0 },
        }
    }

    fn make_record(category: &str, percentage: f64) -> GradeRecord {
        GradeRecord {
            id: Uuid::nil(),
            created_at: Utc::now(),
            title: category.into(),
            category: category.into(),
            verdict: EvaluationVerdict {
                percentage,
                passed: percentage >= 60.0,
                remarks: String::new(),
                feedback: String::new(),
            },
            outcomes: vec![],
        }
    }

    #[test]
    fn aggregate_all_passed() {
        let outcomes = vec![
            make_outcome("first", 1.0, true),
            make_outcome("second", 1.0, true),
        ];
        let verdict = aggregate_outcomes(&outcomes, 60.0);
        assert_eq!(verdict.percentage, 100.0);
        assert!(verdict.passed);
        assert_eq!(verdict.remarks, "Passed 2 out of 2 test cases. Score: 100.00%");
    }

    #[test]
    fn aggregate_weighted_partial() {
        // 3.0 of 4.0 weight awarded: 75%.
        let outcomes = vec![
            make_outcome("light", 1.0, false),
            make_outcome("heavy", 3.0, true),
        ];
        let verdict = aggregate_outcomes(&outcomes, 60.0);
        assert_eq!(verdict.percentage, 75.0);
        assert!(verdict.passed);
        assert_eq!(verdict.remarks, "Passed 1 out of 2 test cases. Score: 75.00%");
    }

    #[test]
    fn aggregate_below_threshold_fails() {
        let outcomes = vec![
            make_outcome("a", 1.0, true),
            make_outcome("b", 1.0, false),
        ];
        let verdict = aggregate_outcomes(&outcomes, 60.0);
        assert_eq!(verdict.percentage, 50.0);
        assert!(!verdict.passed);
    }

    #[test]
    fn aggregate_empty_battery_is_zero() {
        let verdict = aggregate_outcomes(&[], 60.0);
        assert_eq!(verdict.percentage, 0.0);
        assert!(!verdict.passed);
        assert_eq!(verdict.remarks, "Passed 0 out of 0 test cases. Score: 0.00%");
        assert!(verdict.feedback.is_empty());
    }

    #[test]
    fn feedback_lines_follow_battery_order() {
        let outcomes = vec![
            make_outcome("first case", 1.0, true),
            make_outcome("second case", 1.0, false),
        ];
        let verdict = aggregate_outcomes(&outcomes, 60.0);
        assert_eq!(
            verdict.feedback,
            "Test: first case - PASSED (Score: 1.0/1.0)\n\
             Test: second case - FAILED (Score: 0.0/1.0)\n"
        );
    }

    #[test]
    fn batch_stats_group_by_category() {
        let records = vec![
            make_record("add-numbers", 100.0),
            make_record("add-numbers", 50.0),
            make_record("fibonacci", 100.0),
        ];
        let stats = compute_batch_stats(&records);

        assert_eq!(stats.submissions, 3);
        assert_eq!(stats.passed, 2);

        let add = &stats.per_category["add-numbers"];
        assert_eq!(add.submissions, 2);
        assert_eq!(add.passed, 1);
        assert!((add.pass_rate - 0.5).abs() < f64::EPSILON);
        assert!((add.mean_percentage - 75.0).abs() < f64::EPSILON);
    }

    #[test]
    fn batch_stats_empty_input() {
        let stats = compute_batch_stats(&[]);
        assert_eq!(stats.submissions, 0);
        assert_eq!(stats.passed, 0);
        assert_eq!(stats.mean_percentage, 0.0);
        assert!(stats.per_category.is_empty());
    }
}
