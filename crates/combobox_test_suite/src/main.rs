//! Combobox scenario runner
//!
//! Usage:
//!   combobox-replay scenarios                    # Run all scenario suites
//!   combobox-replay scenarios --filter pointer   # Run scenarios matching "pointer"
//!   combobox-replay scenarios --list             # List all scenarios
//!   combobox-replay replay script.json           # Replay a script, print the transcript

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use combobox_core::ComboboxConfig;
use combobox_test_suite::{replay, scenarios, Script, TestRunner};
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "combobox-replay")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Headless combobox scenario runner", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the built-in scenario suites
    Scenarios {
        /// Only run scenarios whose name contains this pattern
        #[arg(short, long)]
        filter: Option<String>,

        /// List scenarios without running them
        #[arg(short, long)]
        list: bool,
    },

    /// Replay a JSON event script and print the transcript
    Replay {
        /// Script file
        script: PathBuf,

        /// Combobox config (TOML)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    match cli.command {
        Commands::Scenarios { filter, list } => cmd_scenarios(filter.as_deref(), list),
        Commands::Replay { script, config } => cmd_replay(&script, config.as_deref()),
    }
}

fn cmd_scenarios(filter: Option<&str>, list: bool) -> Result<()> {
    if list {
        println!("Available scenario suites:");
        for suite in scenarios::all_suites() {
            println!("\n  {}:", suite.name);
            for case in &suite.cases {
                println!("    - {}", case.name);
            }
        }
        return Ok(());
    }

    println!("╔══════════════════════════════════════════╗");
    println!("║          COMBOBOX SCENARIO TESTS         ║");
    println!("╚══════════════════════════════════════════╝\n");

    let mut runner = TestRunner::new();
    for suite in scenarios::all_suites() {
        runner.add_suite(suite);
    }

    if let Some(pattern) = filter {
        println!("Running scenarios matching: {}\n", pattern);
        runner.filter(pattern);
    }

    let result = runner.run();
    result.print_summary();

    if result.all_passed() {
        println!("\nAll scenarios passed!");
        Ok(())
    } else {
        std::process::exit(1);
    }
}

fn cmd_replay(script_path: &Path, config_path: Option<&Path>) -> Result<()> {
    let config = match config_path {
        Some(path) => ComboboxConfig::load(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => ComboboxConfig::default(),
    };
    let script = Script::load(script_path)?;
    info!(
        "Replaying {} steps from {}",
        script.steps.len(),
        script_path.display()
    );

    let transcript = replay(config, &script)?;
    println!("{}", transcript.to_json()?);

    let failures = transcript.failures();
    if failures.is_empty() {
        info!("All expectations held");
        Ok(())
    } else {
        for failure in &failures {
            warn!("{}", failure);
        }
        std::process::exit(1);
    }
}
