//! Keyword classifier: maps a submission to exactly one category.

use crate::catalog::{Catalog, FALLBACK_CATEGORY};
use crate::model::Submission;

/// Resolve the category a submission is graded under.
///
/// Rules are consulted in catalog priority order with case-insensitive
/// substring matching; the first matching rule wins. Never fails: a
/// submission matching no rule falls back to [`FALLBACK_CATEGORY`].
pub fn classify<'a>(catalog: &'a Catalog, submission: &Submission) -> &'a str {
    let title = submission.title.to_lowercase();
    let source = submission.source.to_lowercase();

    catalog
        .rules()
        .iter()
        .find(|rule| rule.matches(&title, &source))
        .map(|rule| rule.category.as_str())
        .unwrap_or(FALLBACK_CATEGORY)
}
