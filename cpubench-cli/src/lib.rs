#![warn(missing_docs)]
//! CPUBench CLI
//!
//! Command-line front end for the benchmark suite: argument parsing,
//! `cpubench.toml` discovery, logging setup, a live progress bar fed by
//! the orchestrator's event stream, and report output.

mod config;

pub use config::{BenchConfig, OutputConfig, RunnerConfig};

use std::io::Write;
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::Context;
use clap::{Parser, Subcommand};
use cpubench_core::{DeviceTier, WorkloadParams, SUITE};
use cpubench_report::{
    build_report_meta, format_human_output, generate_json_report, OutputFormat, RunReport,
};
use cpubench_runner::Orchestrator;
use indicatif::{ProgressBar, ProgressStyle};

/// CPUBench CLI arguments.
#[derive(Parser, Debug)]
#[command(name = "cpubench")]
#[command(author, version, about = "CPUBench - CPU benchmark suite with weighted scoring")]
pub struct Cli {
    /// Optional subcommand; defaults to running the suite.
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Device tier sizing the workloads: slow, mid, flagship.
    #[arg(long)]
    pub tier: Option<String>,

    /// Output format: human, json.
    #[arg(long)]
    pub format: Option<String>,

    /// Output file (stdout if not specified).
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Skip the warmup pass.
    #[arg(long)]
    pub no_warmup: bool,

    /// Verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

/// CPUBench subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the benchmark suite without running it.
    List,
}

/// Parse arguments from the environment and run.
pub fn run() -> anyhow::Result<()> {
    run_with_cli(Cli::parse())
}

/// Run the CLI with pre-parsed arguments.
pub fn run_with_cli(cli: Cli) -> anyhow::Result<()> {
    if cli.verbose {
        tracing_subscriber::fmt()
            .with_env_filter("cpubench=debug")
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter("cpubench=info")
            .init();
    }

    let config = BenchConfig::discover().unwrap_or_default();

    match cli.command {
        Some(Commands::List) => list_suite(),
        None => run_suite(&cli, &config),
    }
}

fn list_suite() -> anyhow::Result<()> {
    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "Benchmark suite ({} entries):", SUITE.len())?;
    for (i, entry) in SUITE.iter().enumerate() {
        writeln!(stdout, "  {:>2}. [{:?}] {}", i + 1, entry.category, entry.name)?;
    }
    Ok(())
}

fn run_suite(cli: &Cli, config: &BenchConfig) -> anyhow::Result<()> {
    let tier_name = cli.tier.as_deref().unwrap_or(&config.runner.tier);
    let tier = DeviceTier::from_str(tier_name)
        .map_err(|e| anyhow::anyhow!(e))
        .context("invalid --tier")?;
    let format_name = cli
        .format
        .as_deref()
        .unwrap_or(&config.output.format);
    let format: OutputFormat = format_name.parse().context("invalid --format")?;
    let output_path = cli
        .output
        .clone()
        .or_else(|| config.output.path.as_ref().map(PathBuf::from));

    let params = WorkloadParams::for_tier(tier);
    let orchestrator = Orchestrator::new(params, config.scoring.clone());

    if config.runner.warmup && !cli.no_warmup {
        orchestrator.warmup();
    }

    // Progress display runs off the event stream; the run itself stays on
    // this thread.
    let events = orchestrator.subscribe_events();
    let total = orchestrator.total_tests();
    let progress = std::thread::spawn(move || {
        let pb = ProgressBar::new(total as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template(
                    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}",
                )
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-"),
        );
        for _ in 0..total {
            match events.recv() {
                Ok(event) => {
                    pb.set_message(event.test_name);
                    pb.inc(1);
                }
                Err(_) => break,
            }
        }
        pb.finish_with_message("Complete");
    });

    let result = orchestrator.run_suite();
    let _ = progress.join();
    let summary = result.context("benchmark run failed")?;

    let report = RunReport {
        meta: build_report_meta(),
        tier,
        summary,
    };
    let rendered = match format {
        OutputFormat::Human => format_human_output(&report),
        OutputFormat::Json => generate_json_report(&report)?,
    };

    match output_path {
        Some(path) => {
            std::fs::write(&path, &rendered)
                .with_context(|| format!("failed to write report to {}", path.display()))?;
            println!("Report written to {}", path.display());
        }
        None => println!("{rendered}"),
    }
    Ok(())
}
