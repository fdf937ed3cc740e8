//! Continuity CLI
//!
//! Command-line interface for forced continuity detection.
//!
//! ## Usage
//!
//! ```bash
//! # Analyze an element inventory captured by an extractor
//! continuity analyze --url https://site.com/account --elements page.json
//!
//! # Analyze a saved HTML snapshot
//! continuity analyze --url https://site.com/account --html page.html
//!
//! # Pipe an inventory on stdin, JSON report out
//! cat page.json | continuity analyze --url https://site.com/account --format json
//!
//! # Show what the static extractor sees
//! continuity extract --html page.html
//! ```
//!
//! ## Exit Codes
//!
//! - 0: Low
//! - 1: Moderate
//! - 2: High (or at/above `--fail-on` when gating)
//! - 3: Critical
//! - 4: Error

mod config;
mod extract;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::info;

use continuity_core::{inventory, PageType, Report, Severity, SignalKind, UiElement};

use crate::config::{CliConfig, OutputFormat};

const ERROR_EXIT: u8 = 4;

/// Continuity: forced continuity dark pattern detection
#[derive(Parser)]
#[command(name = "continuity")]
#[command(version)]
#[command(about = "Detect forced continuity subscription traps on web pages", long_about = None)]
struct Cli {
    /// Path to a YAML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze one page for forced continuity
    Analyze {
        /// URL the elements were captured from
        #[arg(short, long)]
        url: String,

        /// Element inventory (JSON, or YAML for other extensions)
        #[arg(short, long, conflicts_with = "html")]
        elements: Option<PathBuf>,

        /// Saved HTML snapshot to extract elements from
        #[arg(long)]
        html: Option<PathBuf>,

        /// Output format (overrides config)
        #[arg(short, long)]
        format: Option<OutputFormat>,

        /// Show per-signal detail
        #[arg(long)]
        explain: bool,

        /// Exit 2 at or above this severity, 0 below (overrides config)
        #[arg(long, value_parser = parse_severity)]
        fail_on: Option<Severity>,

        /// Explicit analysis timestamp for reproducible text output (RFC 3339).
        /// Example: --analyzed-at 2025-12-20T00:00:00Z
        #[arg(long, value_parser = parse_datetime)]
        analyzed_at: Option<DateTime<Utc>>,
    },

    /// Extract an element inventory from a saved HTML snapshot
    Extract {
        /// Path to the HTML file
        #[arg(long)]
        html: PathBuf,
    },

    /// Print the page type inferred from a URL
    PageType {
        url: String,
    },
}

fn parse_severity(s: &str) -> Result<Severity, String> {
    s.parse()
}

/// Parse RFC 3339 datetime string to DateTime<Utc>.
fn parse_datetime(s: &str) -> Result<DateTime<Utc>, String> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| {
            format!(
                "Invalid datetime format: {}. Expected RFC 3339 (e.g., 2025-12-20T00:00:00Z)",
                e
            )
        })
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match CliConfig::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {:#}", anyhow::Error::new(e).context("Failed to load config"));
            return ExitCode::from(ERROR_EXIT);
        }
    };

    init_tracing(&config.log_level);

    match run(cli.command, config) {
        Ok(exit_code) => exit_code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(ERROR_EXIT)
        }
    }
}

/// Logs go to stderr so JSON on stdout stays parseable.
fn init_tracing(default_level: &str) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run(command: Commands, mut config: CliConfig) -> Result<ExitCode> {
    match command {
        Commands::Analyze {
            url,
            elements,
            html,
            format,
            explain,
            fail_on,
            analyzed_at,
        } => {
            if let Some(format) = format {
                config.format = format;
            }
            if fail_on.is_some() {
                config.fail_on = fail_on;
            }
            config.explain |= explain;

            let inventory = load_inventory(elements.as_deref(), html.as_deref())?;
            analyze_command(&url, &inventory, &config, analyzed_at.unwrap_or_else(Utc::now))
        }

        Commands::Extract { html } => {
            let elements = extract_file(&html)?;
            println!("{}", serde_json::to_string_pretty(&elements)?);
            Ok(ExitCode::from(0))
        }

        Commands::PageType { url } => {
            println!("{}", PageType::from_url(&url));
            Ok(ExitCode::from(0))
        }
    }
}

fn load_inventory(elements: Option<&Path>, html: Option<&Path>) -> Result<Vec<UiElement>> {
    match (elements, html) {
        (Some(path), _) => inventory::from_file(path)
            .with_context(|| format!("Failed to load inventory from {:?}", path)),
        (None, Some(path)) => extract_file(path),
        (None, None) => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read from stdin")?;
            inventory::from_json(&buffer).context("Failed to parse inventory from stdin")
        }
    }
}

fn extract_file(path: &Path) -> Result<Vec<UiElement>> {
    let html = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read HTML from {:?}", path))?;
    Ok(extract::extract_html(&html))
}

fn analyze_command(
    url: &str,
    elements: &[UiElement],
    config: &CliConfig,
    analyzed_at: DateTime<Utc>,
) -> Result<ExitCode> {
    let report = continuity_core::detect(elements, url);

    info!(
        url,
        severity = %report.severity,
        score = report.risk_score_raw,
        "Page analyzed"
    );

    match config.format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        OutputFormat::Text => {
            print!("{}", render_text(&report, url, analyzed_at, config.explain));
        }
    }

    Ok(ExitCode::from(config.exit_code(report.severity)))
}

fn render_text(report: &Report, url: &str, analyzed_at: DateTime<Utc>, explain: bool) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "{}: {}\n",
        report.pattern.to_uppercase(),
        report.severity.as_str().to_uppercase()
    ));
    out.push('\n');
    out.push_str(&format!("URL: {}\n", url));
    out.push_str(&format!("Analyzed: {}\n", analyzed_at.to_rfc3339()));
    out.push_str(&format!("Page type: {}\n", report.page_type));
    out.push_str(&format!(
        "Subscription context: {}\n",
        if report.subscription_context { "yes" } else { "no" }
    ));
    out.push('\n');
    out.push_str(&format!(
        "Risk score: {}/{} ({:.2}%)\n",
        report.risk_score_raw, report.max_score, report.risk_percentage
    ));
    out.push('\n');

    if report.reasons.is_empty() {
        out.push_str("Reasons: none\n");
    } else {
        out.push_str("Reasons:\n");
        for (i, reason) in report.reasons.iter().enumerate() {
            out.push_str(&format!("  {}. {}\n", i + 1, reason));
        }
    }
    out.push('\n');

    out.push_str("CTA metrics:\n");
    out.push_str(&format!(
        "  Subscription CTAs: {}\n",
        report.cta_metrics.subscription_cta_count
    ));
    out.push_str(&format!("  Cancel CTAs: {}\n", report.cta_metrics.cancel_cta_count));

    if explain {
        out.push('\n');
        out.push_str("--- Signals ---\n");
        out.push('\n');
        for kind in SignalKind::ALL {
            let status = if report.signals.get(kind) { "ACTIVE" } else { "-" };
            out.push_str(&format!(
                "{:<22} {:<6} (weight {})\n",
                kind.name(),
                status,
                kind.weight()
            ));
        }
    }

    out
}
