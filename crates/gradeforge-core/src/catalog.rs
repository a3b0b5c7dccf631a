//! The assignment category catalog.
//!
//! Holds the fixed set of categories, their test batteries, and the ordered
//! classification rules. Built once at process startup and never mutated
//! afterward; share it with `Arc`.

use serde::{Deserialize, Serialize};

use crate::model::{ClassifyRule, TestCase};

/// Category every unmatched submission falls back to.
pub const FALLBACK_CATEGORY: &str = "hello-world";

/// A named assignment category and its ordered test battery.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    /// Stable identifier, e.g. "add-numbers".
    pub id: String,
    #[serde(default)]
    pub description: String,
    /// Ordered test cases replayed against every submission in this
    /// category.
    pub battery: Vec<TestCase>,
}

/// The full set of categories plus classification rules.
///
/// Rule order is classification priority; category order is listing order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Catalog {
    name: String,
    description: String,
    categories: Vec<Category>,
    rules: Vec<ClassifyRule>,
}

impl Catalog {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        categories: Vec<Category>,
        rules: Vec<ClassifyRule>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            categories,
            rules,
        }
    }

    /// The stock catalog: the four classic assignment archetypes.
    pub fn builtin() -> Self {
        let categories = vec![
            Category {
                id: "hello-world".into(),
                description: "Print Hello World".into(),
                battery: vec![
                    TestCase::new("", "Hello World", 1.0, "Basic Hello World output"),
                    TestCase::new("", "Hello World\n", 1.0, "Hello World with newline"),
                ],
            },
            Category {
                id: "add-numbers".into(),
                description: "Read two integers and print their sum".into(),
                battery: vec![
                    TestCase::new("5 3", "8", 1.0, "Add positive numbers"),
                    TestCase::new("10 20", "30", 1.0, "Add larger numbers"),
                    TestCase::new("0 0", "0", 1.0, "Add zeros"),
                    TestCase::new("-5 3", "-2", 1.0, "Add negative and positive"),
                ],
            },
            Category {
                id: "fibonacci".into(),
                description: "Print the first n Fibonacci numbers".into(),
                battery: vec![
                    TestCase::new("5", "0 1 1 2 3", 1.0, "First 5 Fibonacci numbers"),
                    TestCase::new("1", "0", 1.0, "First Fibonacci number"),
                    TestCase::new("8", "0 1 1 2 3 5 8 13", 1.0, "First 8 Fibonacci numbers"),
                ],
            },
            Category {
                id: "prime-check".into(),
                description: "Decide whether an integer is prime".into(),
                battery: vec![
                    TestCase::new("7", "Prime", 1.0, "Check prime number"),
                    TestCase::new("4", "Not Prime", 1.0, "Check composite number"),
                    TestCase::new("2", "Prime", 1.0, "Check smallest prime"),
                    TestCase::new("1", "Not Prime", 1.0, "Check number 1"),
                ],
            },
        ];

        // Priority order matters: "hello" is checked before the others even
        // if several keywords appear in one submission.
        let rules = vec![
            ClassifyRule {
                category: "hello-world".into(),
                title_keywords: vec!["hello".into()],
                source_keywords: vec!["hello world".into()],
            },
            ClassifyRule {
                category: "add-numbers".into(),
                title_keywords: vec!["add".into(), "sum".into()],
                source_keywords: vec!["add".into()],
            },
            ClassifyRule {
                category: "fibonacci".into(),
                title_keywords: vec!["fibonacci".into()],
                source_keywords: vec!["fibonacci".into()],
            },
            ClassifyRule {
                category: "prime-check".into(),
                title_keywords: vec!["prime".into()],
                source_keywords: vec!["prime".into()],
            },
        ];

        Self::new("Built-in assignments", "Stock assignment categories", categories, rules)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// The ordered test battery for a category. Never fails; an unknown
    /// category yields an empty battery.
    pub fn battery(&self, category: &str) -> &[TestCase] {
        self.categories
            .iter()
            .find(|c| c.id == category)
            .map(|c| c.battery.as_slice())
            .unwrap_or(&[])
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Classification rules in priority order.
    pub fn rules(&self) -> &[ClassifyRule] {
        &self.rules
    }

    /// Total number of test cases across all categories.
    pub fn case_count(&self) -> usize {
        self.categories.iter().map(|c| c.battery.len()).sum()
    }

    /// Overlay another catalog onto this one.
    ///
    /// A category with a known id replaces the existing battery and
    /// description; new ids are appended. Incoming rules are appended after
    /// the existing ones, so built-in routing priority is unchanged.
    pub fn merge(&mut self, other: Catalog) {
        for category in other.categories {
            match self.categories.iter_mut().find(|c| c.id == category.id) {
                Some(existing) => *existing = category,
                None => self.categories.push(category),
            }
        }
        self.rules.extend(other.rules);
    }
}
