//! HTML report generator.
//!
//! Produces a self-contained HTML file with all CSS inlined.

use anyhow::Result;
use std::path::Path;

use gradeforge_core::results::GradeRecord;

/// Escape a string for safe HTML insertion.
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

/// Generate an HTML report from a grade record.
pub fn generate_html(record: &GradeRecord) -> String {
    let mut html = String::new();

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    html.push_str(&format!(
        "<title>gradeforge report — {}</title>\n",
        html_escape(&record.title)
    ));
    html.push_str("<style>\n");
    html.push_str(CSS);
    html.push_str("</style>\n");
    html.push_str("</head>\n<body>\n");

    // Header
    let status_class = if record.verdict.passed { "pass" } else { "fail" };
    html.push_str("<header>\n");
    html.push_str("<h1>gradeforge report</h1>\n");
    html.push_str(&format!(
        "<p class=\"meta\">Assignment: <strong>{}</strong> | Category: {} | {}</p>\n",
        html_escape(&record.title),
        html_escape(if record.category.is_empty() {
            "-"
        } else {
            record.category.as_str()
        }),
        record.created_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    html.push_str("</header>\n");

    // Verdict summary
    html.push_str("<section class=\"dashboard\">\n");
    html.push_str("<h2>Verdict</h2>\n");
    html.push_str("<table class=\"summary\">\n");
    html.push_str("<thead><tr><th>Score</th><th>Grade</th><th>Status</th><th>Remarks</th></tr></thead>\n");
    html.push_str("<tbody>\n");
    html.push_str(&format!(
        "<tr><td>{:.2}%</td><td>{}</td><td class=\"{}\">{}</td><td>{}</td></tr>\n",
        record.verdict.percentage,
        record.verdict.grade_letter(),
        status_class,
        if record.verdict.passed { "PASSED" } else { "FAILED" },
        html_escape(&record.verdict.remarks),
    ));
    html.push_str("</tbody></table>\n");
    html.push_str("</section>\n");

    // Per-test outcomes
    if !record.outcomes.is_empty() {
        html.push_str("<section class=\"results\">\n");
        html.push_str("<h2>Test cases</h2>\n");
        html.push_str("<table class=\"results-table\">\n");
        html.push_str("<thead><tr><th>Test</th><th>Input</th><th>Expected</th><th>Output</th><th>Result</th><th>Score</th></tr></thead>\n");
        html.push_str("<tbody>\n");

        for outcome in &record.outcomes {
            let result_class = if outcome.passed { "pass" } else { "fail" };
            let result_text = if outcome.passed { "PASSED" } else { "FAILED" };
            html.push_str(&format!(
                "<tr class=\"{}\"><td>{}</td><td><code>{}</code></td><td><code>{}</code></td><td><code>{}</code></td><td class=\"{}\">{}</td><td>{:.1}/{:.1}</td></tr>\n",
                result_class,
                html_escape(&outcome.test_case.description),
                html_escape(&outcome.test_case.input),
                html_escape(&outcome.test_case.expected_output),
                html_escape(&outcome.output),
                result_class,
                result_text,
                outcome.awarded,
                outcome.test_case.weight,
            ));
        }

        html.push_str("</tbody></table>\n");
        html.push_str("</section>\n");
    }

    // Raw JSON
    html.push_str("<section class=\"raw-data\">\n");
    html.push_str("<details>\n<summary>Raw JSON Data</summary>\n");
    html.push_str("<pre><code>");
    html.push_str(
        &serde_json::to_string_pretty(record)
            .unwrap_or_default()
            .replace('<', "&lt;")
            .replace('>', "&gt;"),
    );
    html.push_str("</code></pre>\n");
    html.push_str("</details>\n</section>\n");

    html.push_str("</body>\n</html>");
    html
}

/// Write an HTML report to a file.
pub fn write_html_report(record: &GradeRecord, path: &Path) -> Result<()> {
    let html = generate_html(record);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, html)?;
    Ok(())
}

const CSS: &str = r#"
body {
    font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, sans-serif;
    margin: 0 auto;
    max-width: 960px;
    padding: 1.5rem;
    color: #1f2328;
    background: #fff;
}
header { border-bottom: 1px solid #d0d7de; margin-bottom: 1.5rem; }
h1 { font-size: 1.5rem; margin-bottom: 0.25rem; }
h2 { font-size: 1.15rem; margin-top: 1.5rem; }
.meta { color: #57606a; margin-top: 0; }
table { border-collapse: collapse; width: 100%; margin: 0.75rem 0; }
th, td { border: 1px solid #d0d7de; padding: 0.4rem 0.6rem; text-align: left; }
th { background: #f6f8fa; }
code { font-family: ui-monospace, SFMono-Regular, Menlo, monospace; white-space: pre-wrap; }
td.pass { color: #1a7f37; font-weight: 600; }
td.fail { color: #cf222e; font-weight: 600; }
tr.fail td { background: #fff5f5; }
details { margin: 1rem 0; }
pre { background: #f6f8fa; padding: 0.75rem; overflow-x: auto; }
"#;
