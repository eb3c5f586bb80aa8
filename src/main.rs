// SPDX-License-Identifier: PMPL-1.0-or-later
//! Conformancebot CLI - Trusted Tester Conformance Evaluation
//!
//! Part of the gitbot-fleet ecosystem.

use anyhow::Context;
use clap::{Args, Parser, Subcommand, ValueEnum};
use conformancebot::aggregator::ConformanceLevel;
use conformancebot::catalog::Catalog;
use conformancebot::config::{self, Config};
use conformancebot::engine::Engine;
use conformancebot::evidence::Evidence;
use conformancebot::model::PageContext;
use conformancebot::normalizer::ManualAction;
use conformancebot::report::{generate_catalog_report, generate_report, ConformanceReport, OutputFormat};
use conformancebot::scanner::AutomatedScan;
use conformancebot::snapshot::ExportSnapshot;
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Trusted Tester conformance evaluation bot for gitbot-fleet
#[derive(Parser)]
#[command(name = "conformancebot")]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate a page from scan, evidence and manual inputs
    Evaluate {
        #[command(flatten)]
        inputs: Inputs,

        /// Output format
        #[arg(long, default_value = "text")]
        format: FormatArg,

        /// Output file (stdout if not specified)
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Evaluate a page and write an export snapshot
    Export {
        #[command(flatten)]
        inputs: Inputs,

        /// Output file (stdout if not specified)
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Summarize a previously exported snapshot
    Summarize {
        /// Snapshot file
        snapshot: PathBuf,

        /// Output format
        #[arg(long, default_value = "text")]
        format: FormatArg,

        /// Enable verbose logging
        #[arg(long, short)]
        verbose: bool,
    },

    /// Check a snapshot for unperformed critical tests and incomplete categories
    Validate {
        /// Snapshot file
        snapshot: PathBuf,

        /// Enable verbose logging
        #[arg(long, short)]
        verbose: bool,
    },

    /// List catalog tests
    Catalog {
        /// Filter by test id, title or WCAG criterion
        #[arg(long)]
        search: Option<String>,

        /// Output format
        #[arg(long, default_value = "text")]
        format: FormatArg,
    },

    /// Write a default configuration file
    Init {
        /// Config path
        #[arg(long)]
        path: Option<PathBuf>,
    },
}

/// Inputs shared by the evaluating subcommands
#[derive(Args)]
struct Inputs {
    /// URL of the page under evaluation
    #[arg(long)]
    url: String,

    /// Page title
    #[arg(long, default_value = "")]
    title: String,

    /// Automated scan results (scanner output plus heuristic checks)
    #[arg(long)]
    scan: Option<PathBuf>,

    /// Structured evidence payload
    #[arg(long)]
    evidence: Option<PathBuf>,

    /// Manual judgments
    #[arg(long)]
    manual: Option<PathBuf>,

    /// Config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(long, short)]
    verbose: bool,
}

/// Output format CLI argument
#[derive(Debug, Clone, Copy, ValueEnum)]
enum FormatArg {
    /// Human-readable text
    Text,
    /// Structured JSON
    Json,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Text => OutputFormat::Text,
            FormatArg::Json => OutputFormat::Json,
        }
    }
}

fn init_logging(verbose: bool, level: Option<&str>) {
    let filter = if verbose {
        EnvFilter::new("conformancebot=debug")
    } else {
        EnvFilter::new(format!("conformancebot={}", level.unwrap_or("warn")))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Evaluate { inputs, format, output } => {
            let engine = run_inputs(&inputs)?;
            let report = ConformanceReport::from_session(engine.session());
            write_output(&generate_report(&report, format.into()), output.as_deref())?;

            if report.summary.level == ConformanceLevel::CriticalFailures {
                std::process::exit(1);
            }
        }

        Commands::Export { inputs, output } => {
            let engine = run_inputs(&inputs)?;
            let snapshot = engine.export()?;
            write_output(&snapshot.to_json()?, output.as_deref())?;
        }

        Commands::Summarize { snapshot, format, verbose } => {
            init_logging(verbose, None);
            let engine = restore(&snapshot)?;
            let report = ConformanceReport::from_session(engine.session());
            println!("{}", generate_report(&report, format.into()));
        }

        Commands::Validate { snapshot, verbose } => {
            init_logging(verbose, None);
            let validation = restore(&snapshot)?.validate();
            for error in &validation.errors {
                println!("ERROR: {}", error);
            }
            for warning in &validation.warnings {
                println!("WARNING: {}", warning);
            }

            if !validation.is_valid {
                std::process::exit(1);
            }
            println!("Snapshot is valid for export");
        }

        Commands::Catalog { search, format } => {
            let catalog = Catalog::standard();
            let tests = catalog.search(search.as_deref().unwrap_or(""));
            println!("{}", generate_catalog_report(&catalog, &tests, format.into()));
        }

        Commands::Init { path } => {
            let path = path.unwrap_or_else(config::default_config_path);
            config::write_default_config(&path)?;
            eprintln!("Configuration written to {}", path.display());
        }
    }

    Ok(())
}

/// Build an engine and feed it the inputs: scan, then evidence, then manual
fn run_inputs(inputs: &Inputs) -> anyhow::Result<Engine> {
    let config_path = inputs.config.clone().unwrap_or_else(config::default_config_path);
    let config = config::load_config(&config_path)?;
    init_logging(inputs.verbose, Some(config.log.level.as_str()));

    let mut engine = Engine::from_config(&config, PageContext::new(&inputs.url, &inputs.title));
    info!("Evaluating {}", inputs.url);

    if let Some(ref path) = inputs.scan {
        let scan: AutomatedScan = read_json(path)?;
        engine.apply_scan(&scan)?;
    }
    if let Some(ref path) = inputs.evidence {
        let evidence: Evidence = read_json(path)?;
        engine.apply_evidence(&evidence)?;
    }
    if let Some(ref path) = inputs.manual {
        let actions: Vec<ManualAction> = read_json(path)?;
        for action in &actions {
            engine.apply_manual(action)?;
        }
    }

    Ok(engine)
}

fn restore(path: &Path) -> anyhow::Result<Engine> {
    let snapshot: ExportSnapshot = read_json(path)?;
    let mut engine = Engine::from_config(&Config::default(), snapshot.page_context.clone());
    engine.restore(&snapshot)?;
    Ok(engine)
}

fn read_json<T: DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let content = std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("parsing {}", path.display()))
}

/// Write output to file or stdout
fn write_output(content: &str, path: Option<&Path>) -> anyhow::Result<()> {
    match path {
        Some(p) => {
            std::fs::write(p, content)?;
            eprintln!("Report written to {}", p.display());
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}
