//! Segmented stack benchmark CLI
//!
//! Runs the micro-benchmarks and prints the segment layout diagnostic.

use benchmarks::{micro, runner};
use clap::Parser;
use segmented_stack::layout;
use std::process;
use tracing_subscriber::EnvFilter;

/// Command-line arguments
#[derive(Parser, Debug)]
#[command(name = "segstack-bench", version, about = "Segmented stack benchmarks")]
struct Args {
    /// Stack operations per benchmark
    #[arg(long, default_value_t = micro::DEFAULT_OPERATIONS)]
    ops: usize,

    /// Runs to average per benchmark
    #[arg(long, default_value_t = 1)]
    iterations: usize,

    /// Output results as JSON
    #[arg(long)]
    json: bool,

    /// Print the segment memory layout instead of running benchmarks
    #[arg(long)]
    layout: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    if args.layout {
        let layouts = layout::segment_layout();
        if args.json {
            match serde_json::to_string_pretty(&layouts) {
                Ok(json) => println!("{}", json),
                Err(e) => {
                    eprintln!("Error formatting JSON: {}", e);
                    process::exit(1);
                }
            }
        } else {
            for layout in &layouts {
                print!("{}", layout);
            }
        }
        return;
    }

    if !args.json {
        println!(
            "Running micro-benchmarks ({} ops, {} iteration(s))...",
            args.ops, args.iterations
        );
    }
    let results = micro::create_suite()
        .with_operations(args.ops)
        .run_multiple(args.iterations);

    // Output results
    if args.json {
        match runner::format_results_json(&results) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Error formatting JSON: {}", e);
                process::exit(1);
            }
        }
    } else {
        println!("{}", runner::format_results(&results));

        // Summary statistics
        let successful = results.iter().filter(|r| r.success).count();
        let failed = results.len() - successful;
        let total_time: f64 = results.iter().map(|r| r.duration_ms).sum();

        println!("\nSummary:");
        println!("  Total benchmarks: {}", results.len());
        println!("  Successful: {}", successful);
        println!("  Failed: {}", failed);
        println!("  Total time: {:.2} ms ({:.2} s)", total_time, total_time / 1000.0);

        if failed > 0 {
            process::exit(1);
        }
    }
}
