//! Benchmark harness driving the stack end to end

use benchmarks::{micro, runner};

/// Test: every micro-benchmark completes on a reduced operation count
#[test]
fn test_micro_suite_runs() {
    let results = micro::create_suite().with_operations(20_000).run_multiple(2);
    assert_eq!(results.len(), 6);
    for result in &results {
        assert!(result.success, "{} failed: {:?}", result.name, result.error);
        assert_eq!(result.operations, 20_000);
    }
}

/// Test: results serialize to JSON the CLI can emit
#[test]
fn test_results_json_round_trip() {
    let results = micro::create_suite().with_operations(1_000).run();
    let json = runner::format_results_json(&results).unwrap();
    let parsed: Vec<runner::BenchmarkResult> = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed.len(), results.len());
    assert_eq!(parsed[0].name, results[0].name);
}
