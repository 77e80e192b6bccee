//! fretwork - chord fingering command-line tool
//!
//! - `lint`: scan fingering datasets for physically impossible records
//! - `chord`: print the ranked fingerings of a chord symbol
//! - `transpose`: transpose a chord symbol

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use fretwork::dataset::validate_source;
use fretwork::validate::join_slots;
use fretwork::{
    generate_fingerings_with_config, parse_chord_symbol, transpose_chord_symbol, EngineConfig,
    FaultKind, ValidationReport,
};
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "fretwork")]
#[command(about = "Guitar chord fingering engine")]
#[command(version)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check fingering records in source files for impossible shapes
    Lint {
        /// Files containing `frets: [...]`, `fingers: [...]`, `baseFret: N` records
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,

        /// Exit with status 1 when any issue is found
        #[arg(long)]
        strict: bool,
    },

    /// Show fingerings for a chord symbol
    Chord {
        symbol: String,

        /// Engine configuration (YAML)
        #[arg(short, long, env = "FRETWORK_CONFIG")]
        config: Option<PathBuf>,

        /// Print fingerings as JSON
        #[arg(long)]
        json: bool,
    },

    /// Transpose a chord symbol by a number of semitones
    Transpose {
        symbol: String,

        #[arg(allow_negative_numbers = true)]
        semitones: i32,
    },
}

fn main() -> Result<ExitCode> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "fretwork=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();
    debug!(?args, "parsed arguments");

    match args.command {
        Command::Lint { files, json, strict } => lint(&files, json, strict),
        Command::Chord { symbol, config, json } => {
            chord(&symbol, config, json)?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Transpose { symbol, semitones } => {
            let transposed = transpose_chord_symbol(&symbol, semitones)
                .with_context(|| format!("Cannot transpose '{}'", symbol))?;
            println!("{}", transposed);
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn lint(files: &[PathBuf], json: bool, strict: bool) -> Result<ExitCode> {
    info!("Linting {} file(s)", files.len());

    let mut reports: Vec<(String, ValidationReport)> = Vec::with_capacity(files.len());
    for path in files {
        let source = fs::read_to_string(path)
            .with_context(|| format!("Error reading file '{}'", path.display()))?;
        let report = validate_source(&source)
            .with_context(|| format!("Error scanning '{}'", path.display()))?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());
        reports.push((name, report));
    }

    let total_issues: usize = reports.iter().map(|(_, r)| r.total()).sum();
    let analyzed: usize = reports.iter().map(|(_, r)| r.records_analyzed).sum();
    let skipped: usize = reports.iter().map(|(_, r)| r.skipped).sum();

    if json {
        let files: Vec<serde_json::Value> = reports
            .iter()
            .map(|(file, report)| serde_json::json!({ "file": file, "report": report }))
            .collect();
        let counts: serde_json::Map<String, serde_json::Value> = FaultKind::ALL
            .iter()
            .map(|kind| {
                let count: usize = reports.iter().map(|(_, r)| r.count(*kind)).sum();
                (kind.to_string(), count.into())
            })
            .collect();
        let output = serde_json::json!({
            "files": files,
            "counts": counts,
            "totalIssues": total_issues,
            "recordsAnalyzed": analyzed,
            "recordsSkipped": skipped,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        print_lint_report(&reports, analyzed, skipped, total_issues);
    }

    if strict && total_issues > 0 {
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}

fn print_lint_report(reports: &[(String, ValidationReport)], analyzed: usize, skipped: usize, total: usize) {
    for (file, report) in reports {
        println!("\n=== {} ===", file);
        println!(
            "Found {} fingerings ({} skipped)",
            report.records_analyzed, report.skipped
        );
    }

    println!("\n========================================");
    println!("DETECTION RESULTS");
    println!("========================================\n");

    for (number, kind) in FaultKind::ALL.iter().enumerate() {
        println!("--- Issue Type {}: {} ---\n", number + 1, kind.title());
        let mut found = false;
        for (file, report) in reports {
            for issue in report.by_kind(*kind) {
                found = true;
                println!("[{}] {}", file, issue.chord_id);
                println!("  {}", issue.details);
                println!("  frets: [{}]", join_slots(&issue.frets));
                println!("  baseFret: {}\n", issue.base_fret);
            }
        }
        if !found {
            println!("No issues found.\n");
        }
    }

    println!("========================================");
    println!("SUMMARY");
    println!("========================================");
    for kind in FaultKind::ALL {
        let count: usize = reports.iter().map(|(_, r)| r.count(kind)).sum();
        println!("{}: {}", kind, count);
    }
    println!("Total issues: {}", total);
    println!("Total fingerings analyzed: {}", analyzed);
    println!("Records skipped: {}", skipped);
}

fn chord(text: &str, config_path: Option<PathBuf>, json: bool) -> Result<()> {
    let config = match config_path {
        Some(path) => EngineConfig::load(&path)
            .with_context(|| format!("Failed to load config '{}'", path.display()))?,
        None => EngineConfig::default(),
    };

    let symbol = parse_chord_symbol(text).with_context(|| format!("Unknown chord '{}'", text))?;
    let fingerings = generate_fingerings_with_config(&symbol, None, &[], &config);
    info!("{} fingering(s) for {}", fingerings.len(), symbol);

    if json {
        println!("{}", serde_json::to_string_pretty(&fingerings)?);
        return Ok(());
    }

    if fingerings.is_empty() {
        println!("No fingering available for {}", text);
        return Ok(());
    }
    for fingering in &fingerings {
        let marker = if fingering.is_default { " (default)" } else { "" };
        println!(
            "{}{} [base fret {}, {:?}]",
            fingering.id, marker, fingering.base_fret, fingering.difficulty
        );
        for line in fingering.tab_lines() {
            println!("  {}", line);
        }
        println!();
    }
    Ok(())
}
