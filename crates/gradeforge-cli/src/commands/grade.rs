//! The `gradeforge grade` command.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use comfy_table::{Cell, Table};

use gradeforge_core::engine::{EngineConfig, GradingEngine};
use gradeforge_core::model::Submission;
use gradeforge_core::parser::load_catalog_overlay;
use gradeforge_core::results::GradeRecord;
use gradeforge_core::scoring::compute_batch_stats;
use gradeforge_report::html::write_html_report;
use gradeforge_report::text::render_text_report;
use gradeforge_runner::SimulatedRunner;

#[allow(clippy::too_many_arguments)]
pub async fn execute(
    files: Vec<PathBuf>,
    title: Option<String>,
    catalog_path: Option<PathBuf>,
    output: Option<PathBuf>,
    format: String,
    parallelism: usize,
    fail_on_failing: bool,
) -> Result<()> {
    anyhow::ensure!(parallelism >= 1, "parallelism must be at least 1");
    anyhow::ensure!(
        title.is_none() || files.len() == 1,
        "--title applies to a single submission file"
    );

    let formats: Vec<&str> = if format == "all" {
        vec!["text", "json", "html"]
    } else {
        format.split(',').map(str::trim).collect()
    };
    for fmt in &formats {
        anyhow::ensure!(
            matches!(*fmt, "text" | "json" | "html"),
            "unknown format: {fmt}"
        );
    }

    let catalog = Arc::new(load_catalog_overlay(catalog_path.as_deref())?);
    let config = EngineConfig {
        parallelism,
        ..EngineConfig::default()
    };
    let engine = GradingEngine::new(catalog, Arc::new(SimulatedRunner::new()), config);

    let mut records = Vec::new();
    for file in &files {
        let source = std::fs::read_to_string(file)
            .with_context(|| format!("failed to read submission: {}", file.display()))?;
        let submission_title = title.clone().unwrap_or_else(|| title_from_path(file));
        let submission = Submission::new(submission_title, source);

        let record = engine.grade(&submission).await;
        print_verdict(&record);

        if let Some(dir) = &output {
            save_reports(&record, file, dir, &formats)?;
        }

        records.push(record);
    }

    if records.len() > 1 {
        print_batch_stats(&records);
    }

    if fail_on_failing && records.iter().any(|r| !r.verdict.passed) {
        std::process::exit(1);
    }

    Ok(())
}

/// Submission title derived from the file name, e.g. "Sum.java" → "Sum".
fn title_from_path(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "Untitled".to_string())
}

fn print_verdict(record: &GradeRecord) {
    let mut table = Table::new();
    table.set_header(vec!["Title", "Category", "Score", "Grade", "Status"]);
    table.add_row(vec![
        Cell::new(&record.title),
        Cell::new(if record.category.is_empty() {
            "-"
        } else {
            record.category.as_str()
        }),
        Cell::new(format!("{:.2}%", record.verdict.percentage)),
        Cell::new(record.verdict.grade_letter()),
        Cell::new(if record.verdict.passed { "PASSED" } else { "FAILED" }),
    ]);

    println!("{table}");
    println!("{}", record.verdict.remarks);
    if !record.verdict.feedback.is_empty() {
        // Feedback lines are already newline-terminated.
        print!("{}", record.verdict.feedback);
    }
    println!();
}

fn save_reports(
    record: &GradeRecord,
    source_file: &Path,
    dir: &Path,
    formats: &[&str],
) -> Result<()> {
    let stem = title_from_path(source_file);

    for fmt in formats {
        match *fmt {
            "text" => {
                let path = dir.join(format!("{stem}-report.txt"));
                std::fs::create_dir_all(dir)?;
                std::fs::write(&path, render_text_report(record))
                    .with_context(|| format!("failed to write report to {}", path.display()))?;
                eprintln!("Report saved to: {}", path.display());
            }
            "json" => {
                let path = dir.join(format!("{stem}-report.json"));
                record.save_json(&path)?;
                eprintln!("Report saved to: {}", path.display());
            }
            "html" => {
                let path = dir.join(format!("{stem}-report.html"));
                write_html_report(record, &path)?;
                eprintln!("Report saved to: {}", path.display());
            }
            _ => unreachable!("formats validated above"),
        }
    }

    Ok(())
}

fn print_batch_stats(records: &[GradeRecord]) {
    let stats = compute_batch_stats(records);

    let mut table = Table::new();
    table.set_header(vec![
        "Category",
        "Submissions",
        "Passed",
        "Pass rate",
        "Mean score",
    ]);

    let mut categories: Vec<_> = stats.per_category.values().collect();
    categories.sort_by(|a, b| a.category.cmp(&b.category));

    for category in categories {
        table.add_row(vec![
            Cell::new(&category.category),
            Cell::new(category.submissions),
            Cell::new(category.passed),
            Cell::new(format!("{:.1}%", category.pass_rate * 100.0)),
            Cell::new(format!("{:.2}%", category.mean_percentage)),
        ]);
    }

    println!("{table}");
    println!(
        "Total: {} submissions, {} passed, mean score {:.2}%",
        stats.submissions, stats.passed, stats.mean_percentage
    );
}
