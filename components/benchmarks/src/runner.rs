//! Benchmark runner and result types
//!
//! Provides infrastructure for running benchmarks and collecting results.

use segmented_stack::StackError;
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Workload driven by a benchmark: performs `ops` stack operations.
pub type Workload = fn(ops: usize) -> Result<(), StackError>;

/// A single benchmark
#[derive(Debug, Clone)]
pub struct Benchmark {
    /// Name of the benchmark
    pub name: String,
    /// Description of what the benchmark exercises
    pub description: String,
    /// Number of stack operations per run
    pub operations: usize,
    /// Code to time
    pub workload: Workload,
}

/// Result of running a benchmark
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchmarkResult {
    /// Name of the benchmark
    pub name: String,
    /// Description of the benchmark
    pub description: String,
    /// Number of stack operations per run
    pub operations: usize,
    /// Duration in milliseconds
    pub duration_ms: f64,
    /// Operations per second
    pub ops_per_sec: Option<f64>,
    /// Whether the benchmark completed successfully
    pub success: bool,
    /// Error message if failed
    pub error: Option<String>,
}

fn ops_per_sec(operations: usize, duration_ms: f64) -> Option<f64> {
    if duration_ms > 0.0 {
        Some(operations as f64 / (duration_ms / 1000.0))
    } else {
        None
    }
}

impl Benchmark {
    /// Create a benchmark
    pub fn new(name: &str, description: &str, operations: usize, workload: Workload) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            operations,
            workload,
        }
    }

    /// Run this benchmark once
    ///
    /// # Returns
    /// A `BenchmarkResult` containing timing and success information
    pub fn run(&self) -> BenchmarkResult {
        let start = Instant::now();

        let result = (self.workload)(self.operations);

        let duration_ms = start.elapsed().as_secs_f64() * 1000.0;
        tracing::debug!(benchmark = %self.name, duration_ms, "benchmark finished");

        BenchmarkResult {
            name: self.name.clone(),
            description: self.description.clone(),
            operations: self.operations,
            duration_ms,
            ops_per_sec: result
                .as_ref()
                .ok()
                .and_then(|_| ops_per_sec(self.operations, duration_ms)),
            success: result.is_ok(),
            error: result.err().map(|e| e.to_string()),
        }
    }

    /// Run this benchmark multiple times and return the average
    ///
    /// Stops at the first failing run and returns its result.
    pub fn run_multiple(&self, iterations: usize) -> BenchmarkResult {
        let iterations = iterations.max(1);
        let mut total_duration_ms = 0.0;
        let mut last_result = self.run();

        for i in 0..iterations {
            if i > 0 {
                last_result = self.run();
            }
            if !last_result.success {
                return last_result;
            }
            total_duration_ms += last_result.duration_ms;
        }

        last_result.duration_ms = total_duration_ms / iterations as f64;
        last_result.ops_per_sec = ops_per_sec(self.operations, last_result.duration_ms);
        last_result
    }
}

/// Suite of benchmarks
pub struct BenchmarkSuite {
    /// Name of the suite
    pub name: String,
    /// Benchmarks in this suite
    pub benchmarks: Vec<Benchmark>,
}

impl BenchmarkSuite {
    /// Create a new benchmark suite
    pub fn new(name: String) -> Self {
        Self {
            name,
            benchmarks: Vec::new(),
        }
    }

    /// Add a benchmark to this suite
    pub fn add(&mut self, benchmark: Benchmark) {
        self.benchmarks.push(benchmark);
    }

    /// Override the operation count of every benchmark
    pub fn with_operations(mut self, operations: usize) -> Self {
        for benchmark in &mut self.benchmarks {
            benchmark.operations = operations;
        }
        self
    }

    /// Run all benchmarks in this suite
    pub fn run(&self) -> Vec<BenchmarkResult> {
        self.benchmarks.iter().map(Benchmark::run).collect()
    }

    /// Run all benchmarks multiple times and average
    pub fn run_multiple(&self, iterations: usize) -> Vec<BenchmarkResult> {
        self.benchmarks
            .iter()
            .map(|b| b.run_multiple(iterations))
            .collect()
    }
}

/// Format benchmark results as a human-readable table
pub fn format_results(results: &[BenchmarkResult]) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "\n{:<30} {:>12} {:>15} {:>16} {:<10}\n",
        "Benchmark", "Ops", "Duration (ms)", "Ops/sec", "Status"
    ));
    output.push_str(&format!("{}\n", "=".repeat(88)));

    for result in results {
        let status = if result.success { "✓ PASS" } else { "✗ FAIL" };
        let rate = result
            .ops_per_sec
            .map(|r| format!("{:.0}", r))
            .unwrap_or_else(|| "-".to_string());
        output.push_str(&format!(
            "{:<30} {:>12} {:>12.2} ms {:>16} {:<10}\n",
            result.name, result.operations, result.duration_ms, rate, status
        ));

        if let Some(error) = &result.error {
            output.push_str(&format!("  Error: {}\n", error));
        }
    }

    output
}

/// Format benchmark results as JSON
pub fn format_results_json(results: &[BenchmarkResult]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(results)
}
