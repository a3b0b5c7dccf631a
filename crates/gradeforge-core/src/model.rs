//! Core data model types for gradeforge.
//!
//! These are the fundamental types the grading pipeline passes around: the
//! submission handed in by a student, the test cases it is replayed against,
//! and the classification rules that route a submission to a category.

use serde::{Deserialize, Serialize};

/// A student submission handed to the grading engine.
///
/// Immutable input to evaluation; the engine never mutates it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Submission {
    /// Assignment title as entered by the student.
    pub title: String,
    /// Raw source text of the submitted program.
    pub source: String,
}

impl Submission {
    pub fn new(title: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            source: source.into(),
        }
    }
}

/// A single input/expected-output check within a category's battery.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestCase {
    /// Text fed to the submission as stdin.
    pub input: String,
    /// Output the submission must produce.
    pub expected_output: String,
    /// Positive score weight awarded on an exact match.
    pub weight: f64,
    /// Human-readable description, shown in feedback lines.
    pub description: String,
}

impl TestCase {
    pub fn new(
        input: impl Into<String>,
        expected_output: impl Into<String>,
        weight: f64,
        description: impl Into<String>,
    ) -> Self {
        Self {
            input: input.into(),
            expected_output: expected_output.into(),
            weight,
            description: description.into(),
        }
    }

    /// Compare produced output against the expectation.
    ///
    /// Whitespace at both ends is ignored; internal whitespace is
    /// significant.
    pub fn validate_output(&self, actual: &str) -> bool {
        self.expected_output.trim() == actual.trim()
    }

    /// Score contribution for the given output: the full weight on an exact
    /// match, otherwise nothing.
    pub fn partial_score(&self, actual: &str) -> f64 {
        if self.validate_output(actual) {
            return self.weight;
        }
        // Fuzzy matching for partial credit could slot in here.
        0.0
    }
}

/// One classification rule: keyword sets matched against the submission
/// title and source text.
///
/// Keywords are stored lowercase; `matches` expects inputs that have already
/// been lowercased so a battery of rules folds the submission only once.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifyRule {
    /// Category id this rule routes to.
    pub category: String,
    /// Substrings looked up in the submission title.
    #[serde(default)]
    pub title_keywords: Vec<String>,
    /// Substrings looked up in the submission source.
    #[serde(default)]
    pub source_keywords: Vec<String>,
}

impl ClassifyRule {
    /// Returns `true` if any title keyword occurs in `title` or any source
    /// keyword occurs in `source`. Both arguments must be lowercased.
    pub fn matches(&self, title: &str, source: &str) -> bool {
        self.title_keywords.iter().any(|k| title.contains(k.as_str()))
            || self.source_keywords.iter().any(|k| source.contains(k.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_output_trims_both_ends() {
        let case = TestCase::new("", "Hello World\n", 1.0, "newline expected");
        assert!(case.validate_output("Hello World"));
        assert!(case.validate_output("  Hello World  "));
        assert!(!case.validate_output("Hello  World"));
    }

    #[test]
    fn partial_score_is_all_or_nothing() {
        let case = TestCase::new("5 3", "8", 2.5, "weighted sum");
        assert_eq!(case.partial_score("8"), 2.5);
        assert_eq!(case.partial_score("9"), 0.0);
        assert_eq!(case.partial_score("almost 8"), 0.0);
    }

    #[test]
    fn rule_matches_title_or_source() {
        let rule = ClassifyRule {
            category: "add-numbers".into(),
            title_keywords: vec!["add".into(), "sum".into()],
            source_keywords: vec!["add".into()],
        };
        assert!(rule.matches("sum of two numbers", ""));
        assert!(rule.matches("", "int add(int a, int b)"));
        assert!(!rule.matches("multiply", "int mul(int a, int b)"));
    }

    #[test]
    fn submission_serde_roundtrip() {
        let submission = Submission::new("Fibonacci", "public class Fib {}");
        let json = serde_json::to_string(&submission).unwrap();
        let deserialized: Submission = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized.title, "Fibonacci");
        assert_eq!(deserialized.source, "public class Fib {}");
    }
}
