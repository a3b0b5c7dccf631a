//! Plain-text report renderer.

use gradeforge_core::results::GradeRecord;

/// Render a graded submission as a plain-text report.
pub fn render_text_report(record: &GradeRecord) -> String {
    let mut report = String::new();

    report.push_str("Evaluation Report\n");
    report.push_str(&format!("Assignment: {}\n", record.title));
    if !record.category.is_empty() {
        report.push_str(&format!("Category: {}\n", record.category));
    }
    report.push_str(&format!("Score: {:.2}/100\n", record.verdict.percentage));
    report.push_str(&format!("Grade: {}\n", record.verdict.grade_letter()));
    report.push_str(&format!(
        "Status: {}\n",
        if record.verdict.passed { "PASSED" } else { "FAILED" }
    ));
    report.push_str(&format!("Remarks: {}\n", record.verdict.remarks));
    report.push_str(&format!(
        "Timestamp: {}\n",
        record.created_at.format("%Y-%m-%dT%H:%M:%S")
    ));

    if !record.verdict.feedback.is_empty() {
        report.push('\n');
        report.push_str(&record.verdict.feedback);
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use gradeforge_core::model::TestCase;
    use gradeforge_core::results::{EvaluationVerdict, TestOutcome};
    use uuid::Uuid;

    fn make_record() -> GradeRecord {
        GradeRecord {
            id: Uuid::nil(),
            created_at: Utc::now(),
            title: "Add Two Numbers".into(),
            category: "add-numbers".into(),
            verdict: EvaluationVerdict {
                percentage: 75.0,
                passed: true,
                remarks: "Passed 3 out of 4 test cases. Score: 75.00%".into(),
                feedback: "Test: Add positive numbers - PASSED (Score: 1.0/1.0)\n".into(),
            },
            outcomes: vec![TestOutcome {
                test_case: TestCase::new("5 3", "8", 1.0, "Add positive numbers"),
                output: "8".into(),
                passed: true,
                awarded: 1.0,
            }],
        }
    }

    #[test]
    fn report_contains_header_and_verdict() {
        let report = render_text_report(&make_record());

        assert!(report.starts_with("Evaluation Report\n"));
        assert!(report.contains("Assignment: Add Two Numbers\n"));
        assert!(report.contains("Category: add-numbers\n"));
        assert!(report.contains("Score: 75.00/100\n"));
        assert!(report.contains("Grade: C\n"));
        assert!(report.contains("Status: PASSED\n"));
        assert!(report.contains("Remarks: Passed 3 out of 4 test cases. Score: 75.00%\n"));
        assert!(report.contains("Timestamp: "));
        assert!(report.contains("Test: Add positive numbers - PASSED (Score: 1.0/1.0)\n"));
    }

    #[test]
    fn failed_record_without_category() {
        let mut record = make_record();
        record.category = String::new();
        record.verdict = EvaluationVerdict {
            percentage: 0.0,
            passed: false,
            remarks: "Evaluation failed: boom".into(),
            feedback: String::new(),
        };

        let report = render_text_report(&record);
        assert!(!report.contains("Category:"));
        assert!(report.contains("Status: FAILED\n"));
        assert!(report.contains("Grade: F\n"));
        assert!(report.contains("Remarks: Evaluation failed: boom\n"));
        // No feedback block for an empty feedback string.
        assert!(!report.contains("\n\nTest:"));
    }
}
