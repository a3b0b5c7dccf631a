//! gradeforge-report — Report rendering for graded submissions.
//!
//! Derives formatted reports from a grade record; no new data is computed
//! here.

pub mod html;
pub mod text;
