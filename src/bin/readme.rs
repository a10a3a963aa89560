//! README Generator CLI
//!
//! Renders the library list from the registry and splices it into the main
//! README between the import markers.

use std::fs;
use std::path::PathBuf;

use clap::Parser;
use library_registry::{load_entries, readme, render, RegistryConfig};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "registry-readme")]
#[command(about = "Generate the README library list from registry entries")]
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

    /// Host document to update (relative to root)
    #[arg(long)]
    readme: Option<PathBuf>,

    /// Don't write; fail if the README is out of date
    #[arg(long)]
    check: bool,

    /// Print the rendered library list instead of updating the README
    #[arg(long, conflicts_with = "check")]
    stdout: bool,

    /// Also write the rendered library list to this file
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("❌ Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = RegistryConfig::load_from(cli.config.as_deref())?
        .with_overrides(cli.root, cli.aggregate, cli.legacy_dir, cli.readme);

    if cli.stdout {
        let loaded = load_entries(&config.paths)?;
        println!("{}", render::render(&loaded.entries));
        return Ok(());
    }

    println!("📝 Generating README from registry entries...\n");

    let Some((loaded, update)) = readme::generate(&config.paths)? else {
        println!("📊 Found 0 libraries");
        println!("⚠️  No libraries found to generate README");
        return Ok(());
    };
    println!("📊 Found {} libraries", loaded.entries.len());

    if let Some(output) = &cli.output {
        fs::write(output, format!("{}\n", update.body))?;
        println!("✅ Wrote library list to {:?}", output);
    }

    if cli.check {
        match update.diff() {
            Some(diff) => {
                println!("{}", diff);
                println!("❌ {:?} is out of date. Run registry-readme to update it.", update.path);
                std::process::exit(1);
            }
            None => println!("✅ {:?} is up to date", update.path),
        }
        return Ok(());
    }

    if update.write()? {
        println!("✅ Updated {:?}", update.path);
    } else {
        println!("✅ {:?} already up to date", update.path);
    }

    println!("\n🎉 README generation complete!");
    Ok(())
}
