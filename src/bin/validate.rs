//! Registry Validator CLI
//!
//! Validates every library entry and exits non-zero when any entry fails.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use library_registry::{load_entries, RegistryConfig, ValidationReport, Validator};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "registry-validate")]
#[command(about = "Validate shadcn registry entries")]
struct Cli {
    /// Config file to load (optional)
    #[arg(short, long)]
    config: Option<String>,

    /// Registry root directory
    #[arg(short, long)]
    root: Option<PathBuf>,

    /// Aggregate registry document (relative to root)
    #[arg(long)]
    aggregate: Option<PathBuf>,

    /// Legacy per-entry directory (relative to root)
    #[arg(long)]
    legacy_dir: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: Format,

    /// Only print failures, warnings and the summary
    #[arg(short, long)]
    quiet: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("❌ Error: {}", e);
            std::process::exit(1);
        }
    }
}

fn run(cli: Cli) -> Result<bool, Box<dyn std::error::Error>> {
    let config = RegistryConfig::load_from(cli.config.as_deref())?
        .with_overrides(cli.root, cli.aggregate, cli.legacy_dir, None);

    let loaded = load_entries(&config.paths)?;
    let report = Validator::new(config.validation.clone()).validate_loaded(&loaded);

    match cli.format {
        Format::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        Format::Text => print_text_report(&report, cli.quiet),
    }

    Ok(report.is_valid())
}

fn print_text_report(report: &ValidationReport, quiet: bool) {
    println!("🔍 Validating shadcn registry entries...\n");

    for entry in &report.entries {
        for warning in entry.warnings() {
            println!("⚠️  {}: {}", entry.id, warning.message);
        }
        if entry.is_valid() {
            if !quiet {
                println!("✅ {}: Valid", entry.id);
            }
        } else {
            for error in entry.errors() {
                println!("❌ {}: {}", entry.id, error.message);
            }
        }
    }

    for warning in &report.warnings {
        println!("⚠️  {}", warning.message);
    }

    println!("\n📊 Validated {} registry entries", report.total);

    if report.is_valid() {
        println!("🎉 All shadcn registry entries are valid!");
    } else {
        println!(
            "❌ Some registry entries have validation errors. ({} of {} failed)",
            report.failure_count(),
            report.total
        );
    }
}
