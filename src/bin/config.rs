//! Registry Config CLI
//!
//! View and manage registry tool configuration.

use clap::{Parser, Subcommand};
use library_registry::{detect_source, RegistryConfig, SourceKind};

#[derive(Parser)]
#[command(name = "registry-config")]
#[command(about = "View and manage registry tool configuration")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show current configuration
    Show {
        /// Config file to load (optional)
        #[arg(short, long)]
        config: Option<String>,

        /// Output as TOML
        #[arg(long)]
        toml: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Initialize a new config file
    Init {
        /// Output path (default: registry.toml)
        #[arg(short, long, default_value = "registry.toml")]
        output: String,
    },

    /// Check that the configuration loads and points at an entry source
    Validate {
        /// Config file to validate
        #[arg(short, long)]
        config: Option<String>,
    },
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Show { config, toml, json } => {
            let cfg = RegistryConfig::load_from(config.as_deref())?;

            if json {
                println!("{}", serde_json::to_string_pretty(&cfg)?);
            } else if toml {
                println!("{}", ::toml::to_string_pretty(&cfg)?);
            } else {
                println!("📋 Registry Configuration\n");
                println!("Paths:");
                println!("  Root: {:?}", cfg.paths.root);
                println!("  Aggregate: {:?}", cfg.paths.aggregate_path());
                println!("  Legacy dir: {:?}", cfg.paths.legacy_dir_path());
                println!("  Legacy document: {}", cfg.paths.legacy_document);
                println!("  Host document: {:?}", cfg.paths.host_document_path());

                println!("\nValidation:");
                println!("  Expected $schema: {}", cfg.validation.expected_schema);
                println!("  Warn on missing $schema: {}", cfg.validation.warn_on_missing_schema);
            }
        }

        Commands::Init { output } => {
            let cfg = RegistryConfig::default();
            cfg.save(&output)?;
            println!("✅ Created config file: {}", output);
        }

        Commands::Validate { config } => {
            let cfg = match RegistryConfig::load_from(config.as_deref()) {
                Ok(cfg) => cfg,
                Err(e) => {
                    eprintln!("❌ Configuration error: {}", e);
                    std::process::exit(1);
                }
            };

            let aggregate = cfg.paths.aggregate_path();
            let legacy_dir = cfg.paths.legacy_dir_path();
            let host_document = cfg.paths.host_document_path();

            match detect_source(&cfg.paths) {
                SourceKind::Aggregate => {
                    println!("✅ Entries will be read from aggregate {:?}", aggregate);
                }
                SourceKind::Legacy => {
                    println!("✅ Entries will be read from legacy dir {:?}", legacy_dir);
                    println!("   (no aggregate document at {:?})", aggregate);
                }
                SourceKind::Empty => {
                    eprintln!("❌ No entry source found");
                    eprintln!("   Aggregate {:?} does not exist", aggregate);
                    eprintln!("   Legacy dir {:?} is not a directory", legacy_dir);
                    std::process::exit(1);
                }
            }

            if host_document.is_file() {
                println!("✅ Host document: {:?}", host_document);
            } else {
                println!("⚠️  Host document {:?} not found; README generation will fail", host_document);
            }
        }
    }

    Ok(())
}
