use criterion::{black_box, criterion_group, criterion_main, Criterion};

use chrono::Utc;
use gradeforge_core::model::TestCase;
use gradeforge_core::results::{EvaluationVerdict, GradeRecord, TestOutcome};
use gradeforge_core::scoring::{aggregate_outcomes, compute_batch_stats};
use uuid::Uuid;

fn make_outcomes(n: usize) -> Vec<TestOutcome> {
    (0..n)
        .map(|i| {
            let passed = i % 3 != 0;
            TestOutcome {
                test_case: TestCase::new(
                    format!("{i}"),
                    format!("{}", i * 2),
                    1.0 + (i % 4) as f64,
                    format!("Case {i}"),
                ),
                output: if passed {
                    format!("{}", i * 2)
                } else {
                    "wrong".to_string()
                },
                passed,
                awarded: if passed { 1.0 + (i % 4) as f64 } else { 0.0 },
            }
        })
        .collect()
}

fn make_records(n: usize) -> Vec<GradeRecord> {
    let categories = ["hello-world", "add-numbers", "fibonacci", "prime-check"];
    (0..n)
        .map(|i| {
            let percentage = (i % 5) as f64 * 25.0;
            GradeRecord {
                id: Uuid::nil(),
                created_at: Utc::now(),
                title: format!("Submission {i}"),
                category: categories[i % categories.len()].to_string(),
                verdict: EvaluationVerdict {
                    percentage,
                    passed: percentage >= 60.0,
                    remarks: String::new(),
                    feedback: String::new(),
                },
                outcomes: vec![],
            }
        })
        .collect()
}

fn bench_aggregate_outcomes(c: &mut Criterion) {
    let mut group = c.benchmark_group("aggregate_outcomes");

    for n in [4usize, 50, 500] {
        let outcomes = make_outcomes(n);
        group.bench_function(format!("{n}_cases"), |b| {
            b.iter(|| aggregate_outcomes(black_box(&outcomes), black_box(60.0)))
        });
    }

    group.finish();
}

fn bench_batch_stats(c: &mut Criterion) {
    let mut group = c.benchmark_group("batch_stats");

    for n in [10usize, 100, 1000] {
        let records = make_records(n);
        group.bench_function(format!("{n}_records"), |b| {
            b.iter(|| compute_batch_stats(black_box(&records)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_aggregate_outcomes, bench_batch_stats);
criterion_main!(benches);
