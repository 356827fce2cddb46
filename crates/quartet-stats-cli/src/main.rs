//! Runs Anscombe's quartet through the dual-path estimator
//!
//! Usage: `quartet-stats [--parallel]`. Set `RUST_LOG=debug` to see which path
//! each regression took.

mod report;

use std::process::ExitCode;

use quartet_stats_core::batch::{par_regress_all, regress_all};
use quartet_stats_core::datasets::{anscombe_quartet, ANSCOMBE_REFERENCE};
use quartet_stats_core::Estimator;
use tracing_subscriber::EnvFilter;

use report::{batch_exit_code, EntryBlock, ReferenceBlock, SummaryTable};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    init_tracing();

    let parallel = std::env::args().skip(1).any(|arg| arg == "--parallel");

    println!("=== Anscombe Quartet Regression Analysis ===");
    println!("Loading datasets and performing linear regression...");

    let datasets = anscombe_quartet();
    let estimator = Estimator::new();
    let report = if parallel {
        par_regress_all(&estimator, &datasets)
    } else {
        regress_all(&estimator, &datasets)
    };

    for entry in &report.entries {
        println!();
        print!("{}", EntryBlock(entry));
    }
    println!();
    print!("{}", SummaryTable(&report));
    println!();
    print!("{}", ReferenceBlock(&ANSCOMBE_REFERENCE));

    batch_exit_code(&report).into()
}
