//! gradeforge-runner — Simulated submission execution.
//!
//! Produces the output a submission "would" print for a test input by
//! pattern matching the source text against an ordered rule chain. Nothing
//! is compiled or executed; reproducing the rule chain exactly is the
//! compatibility target, not replacing it with a real sandbox.

use async_trait::async_trait;

use gradeforge_core::error::RunError;
use gradeforge_core::traits::{CodeRunner, RunRequest};

/// Simulated runner backend.
///
/// The rule chain is checked in order and the first match wins. It scans the
/// source text independently of how the submission was classified, so a
/// submission can be graded under one category while a different rule
/// produces its output.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimulatedRunner;

impl SimulatedRunner {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl CodeRunner for SimulatedRunner {
    fn name(&self) -> &str {
        "simulated"
    }

    async fn run(&self, request: &RunRequest) -> anyhow::Result<String> {
        let (rule, output) = simulate(&request.code, &request.input)?;
        tracing::debug!(rule, "simulation rule matched");
        Ok(output)
    }
}

/// Apply the rule chain; returns the matched rule's label and output.
fn simulate(code: &str, input: &str) -> Result<(&'static str, String), RunError> {
    if code.contains("System.out.println(\"Hello World\")") && input.is_empty() {
        return Ok(("hello", "Hello World".to_string()));
    }

    if code.contains("Scanner") && code.contains("nextInt()") && code.contains('+') {
        let tokens: Vec<&str> = input.split_whitespace().collect();
        if tokens.len() == 2 {
            let a = parse_int(tokens[0])?;
            let b = parse_int(tokens[1])?;
            return Ok(("sum", a.wrapping_add(b).to_string()));
        }
        // Any other token count falls through to the remaining rules.
    }

    let lowered = code.to_lowercase();

    if lowered.contains("fibonacci") {
        let n = parse_int(input)?;
        return Ok(("fibonacci", fibonacci_sequence(n)));
    }

    if lowered.contains("prime") {
        let n = parse_int(input)?;
        let answer = if is_prime(n) { "Prime" } else { "Not Prime" };
        return Ok(("prime", answer.to_string()));
    }

    Ok(("default", "No output".to_string()))
}

fn parse_int(token: &str) -> Result<i64, RunError> {
    token
        .trim()
        .parse::<i64>()
        .map_err(|_| RunError::InvalidInteger(token.to_string()))
}

/// The first `n` Fibonacci numbers, space-separated, starting 0 1 1 2 3.
fn fibonacci_sequence(n: i64) -> String {
    if n <= 0 {
        return String::new();
    }
    if n == 1 {
        return "0".to_string();
    }

    let mut out = String::from("0");
    let (mut a, mut b) = (0i64, 1i64);
    for _ in 1..n {
        out.push(' ');
        out.push_str(&b.to_string());
        let next = a.wrapping_add(b);
        a = b;
        b = next;
    }
    out
}

fn is_prime(n: i64) -> bool {
    if n <= 1 {
        return false;
    }
    if n == 2 {
        return true;
    }
    if n % 2 == 0 {
        return false;
    }

    // i <= n / i avoids overflowing i * i near i64::MAX.
    let mut i = 3i64;
    while i <= n / i {
        if n % i == 0 {
            return false;
        }
        i += 2;
    }
    true
}
