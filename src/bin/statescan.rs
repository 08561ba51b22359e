// src/bin/statescan.rs
use std::fs;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::process;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;

use statescan_core::actions::{ActionReport, ImpactType, RemediationCatalog};
use statescan_core::csv;
use statescan_core::ecosystem::Ecosystem;
use statescan_core::engine::{AnalysisOutcome, Engine};
use statescan_core::rules::RuleRegistry;
use statescan_core::summary::SummaryReport;
use statescan_core::types::Severity;

#[derive(Parser)]
#[command(
    name = "statescan",
    version,
    about = "Stateful anti-pattern scanner for .NET and Java source trees"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan a source tree and print the summary and remediation plan
    Analyze {
        /// Root of the extracted source tree
        path: PathBuf,
        /// Force the ecosystem instead of probing build files
        #[arg(long, value_enum)]
        ecosystem: Option<Ecosystem>,
        /// Override the built-in rule catalog (JSON)
        #[arg(long, value_name = "FILE")]
        rules: Option<PathBuf>,
        /// Override the built-in remediation catalog (JSON)
        #[arg(long, value_name = "FILE")]
        actions: Option<PathBuf>,
        /// Backward-scan window for enclosing-method resolution
        #[arg(long, default_value = "50")]
        window: usize,
        #[arg(long, value_enum, default_value = "text")]
        format: Format,
        /// Also persist the flat findings as CSV
        #[arg(long, value_name = "FILE")]
        csv: Option<PathBuf>,
    },
    /// List the loaded pattern catalog
    Rules {
        /// Restrict the listing to one ecosystem
        #[arg(long, value_enum)]
        ecosystem: Option<Ecosystem>,
        /// Override the built-in rule catalog (JSON)
        #[arg(long, value_name = "FILE")]
        rules: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
}

fn main() {
    if let Err(e) = run() {
        eprintln!("{} {e:#}", "error:".red().bold());
        process::exit(1);
    }
}

fn run() -> Result<()> {
    match Cli::parse().command {
        Commands::Analyze {
            path,
            ecosystem,
            rules,
            actions,
            window,
            format,
            csv,
        } => handle_analyze(&path, ecosystem, rules, actions, window, format, csv),
        Commands::Rules { ecosystem, rules } => handle_rules(ecosystem, rules),
    }
}

fn handle_analyze(
    path: &Path,
    ecosystem: Option<Ecosystem>,
    rules: Option<PathBuf>,
    actions: Option<PathBuf>,
    window: usize,
    format: Format,
    csv_out: Option<PathBuf>,
) -> Result<()> {
    let registry = load_registry(rules)?;
    let catalog = load_catalog(actions)?;
    let engine = Engine::new(registry, catalog).with_method_window(window);

    let outcome = engine.analyze(path, ecosystem)?;

    if let Some(csv_path) = csv_out {
        write_csv(&csv_path, &outcome)?;
        eprintln!("findings written to {}", csv_path.display());
    }

    match format {
        Format::Json => println!("{}", serde_json::to_string_pretty(&outcome)?),
        Format::Text => print_outcome(&outcome),
    }
    Ok(())
}

fn handle_rules(ecosystem: Option<Ecosystem>, rules: Option<PathBuf>) -> Result<()> {
    let registry = load_registry(rules)?;
    let ecosystems = match ecosystem {
        Some(eco) => vec![eco],
        None => vec![Ecosystem::DotNet, Ecosystem::Java],
    };
    for eco in ecosystems {
        println!("{}", format!("[{eco}]").bold());
        for pattern in registry.patterns(eco) {
            println!(
                "  {:>3}  {}  {}  {}",
                pattern.id,
                paint_severity(pattern.severity),
                pattern.category.bold(),
                pattern.matcher.as_str().dimmed()
            );
        }
    }
    Ok(())
}

fn load_registry(path: Option<PathBuf>) -> Result<RuleRegistry> {
    match path {
        Some(p) => {
            let raw = fs::read_to_string(&p)
                .with_context(|| format!("reading rule catalog {}", p.display()))?;
            Ok(RuleRegistry::from_json(&raw)?)
        }
        None => Ok(RuleRegistry::builtin()?),
    }
}

fn load_catalog(path: Option<PathBuf>) -> Result<RemediationCatalog> {
    match path {
        Some(p) => {
            let raw = fs::read_to_string(&p)
                .with_context(|| format!("reading remediation catalog {}", p.display()))?;
            Ok(RemediationCatalog::from_json(&raw)?)
        }
        None => Ok(RemediationCatalog::builtin()?),
    }
}

fn write_csv(path: &Path, outcome: &AnalysisOutcome) -> Result<()> {
    let file = fs::File::create(path)
        .with_context(|| format!("creating {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    csv::write_findings(&mut writer, &outcome.findings)
        .with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

fn print_outcome(outcome: &AnalysisOutcome) {
    println!(
        "{} ecosystem={} complexity={}",
        "analysis".bold(),
        outcome.ecosystem,
        outcome.complexity_factor
    );
    println!();
    print_summary(&outcome.summary);
    print_actions(&outcome.actions);
}

fn print_summary(report: &SummaryReport) {
    println!("{}", "== Issue summary ==".bold());
    if report.summary.is_empty() {
        println!("  {}", "no stateful patterns detected".green());
    }
    for entry in &report.summary {
        println!(
            "  {} {:<28} x{:<4} effort {:>6.1}  {}",
            paint_severity(entry.severity),
            entry.category,
            entry.occurrences,
            entry.effort_score,
            entry.remediation.dimmed()
        );
    }
    let stats = &report.stats;
    println!(
        "  {} files={} issues={} (high={} medium={} low={}) total effort={:.1}",
        "--".dimmed(),
        stats.total_files,
        stats.total_issues,
        stats.high_severity,
        stats.medium_severity,
        stats.low_severity,
        stats.total_effort_score
    );
    println!();
}

fn print_actions(report: &ActionReport) {
    println!("{}", "== Remediation plan ==".bold());
    for action in &report.actions {
        let impact = match action.impact_type {
            ImpactType::OneTime => "one-time".to_string(),
            ImpactType::PerOccurrence => format!("x{}", action.occurrences),
        };
        println!(
            "  {:<24} [{}] {:<10} effort {:>7.1}  {}",
            action.id.bold(),
            action.category,
            impact,
            action.final_effort,
            action.description
        );
        for sub in &action.sub_actions {
            println!("      - {}", sub.dimmed());
        }
    }
    println!(
        "  {} actions={} total effort={:.1}",
        "--".dimmed(),
        report.total_actions,
        report.total_effort
    );
}

fn paint_severity(severity: Severity) -> colored::ColoredString {
    match severity {
        Severity::High => severity.as_str().red().bold(),
        Severity::Medium => severity.as_str().yellow(),
        Severity::Low => severity.as_str().dimmed(),
    }
}
