//! petfacts CLI entry point

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use petfacts::{
    commands::{
        cmd_gather, cmd_init, cmd_report, cmd_status, print_gather_stats, print_report_stats,
        print_status, GatherOptions,
    },
    config::Config,
    error::Result,
    store::FactStore,
};
use std::path::PathBuf;
use tracing::error;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "petfacts")]
#[command(version, about = "Collect cat and dog facts and report word frequencies", long_about = None)]
struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize petfacts configuration and database
    Init {
        /// Force overwrite existing config
        #[arg(long)]
        force: bool,
    },

    /// Fetch new unique facts and store them
    Gather {
        /// Number of cat facts to collect
        #[arg(long)]
        cats: Option<usize>,

        /// Number of dog facts to collect
        #[arg(long)]
        dogs: Option<usize>,
    },

    /// Write the word-frequency CSV and bar charts from stored facts
    Report,

    /// Show paths and stored row counts
    Status,

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("{}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    // Handle init command specially (doesn't need existing config)
    if let Commands::Init { force } = cli.command {
        return handle_init(cli.config, force).await;
    }

    // Handle completions command (doesn't need config/db)
    if let Commands::Completions { shell } = cli.command {
        let mut cmd = Cli::command();
        generate(shell, &mut cmd, "petfacts", &mut std::io::stdout());
        return Ok(());
    }

    // Load configuration
    let config = load_config(cli.config.as_deref())?;

    // Open the store
    let store = FactStore::new(&config.paths.db_file).await?;

    match cli.command {
        Commands::Init { .. } | Commands::Completions { .. } => unreachable!(),

        Commands::Gather { cats, dogs } => {
            let options = GatherOptions {
                cat_count: cats.unwrap_or(config.fetch.cat_count),
                dog_count: dogs.unwrap_or(config.fetch.dog_count),
            };

            let stats = cmd_gather(&config, &store, options).await?;

            if cli.json {
                println!("{}", serde_json::to_string_pretty(&stats)?);
            } else {
                print_gather_stats(&stats);
            }
        }

        Commands::Report => {
            let stats = cmd_report(&config, &store).await?;

            if cli.json {
                println!("{}", serde_json::to_string_pretty(&stats)?);
            } else {
                print_report_stats(&stats);
            }
        }

        Commands::Status => {
            let status = cmd_status(&config, &store).await?;

            if cli.json {
                println!("{}", serde_json::to_string_pretty(&status)?);
            } else {
                print_status(&status);
            }
        }
    }

    Ok(())
}

async fn handle_init(config_path: Option<PathBuf>, force: bool) -> Result<()> {
    // If the user points at a config file, its parent is the base directory
    let base_dir = config_path.and_then(|p| {
        if p.extension().map_or(false, |e| e == "toml") {
            p.parent().map(PathBuf::from)
        } else {
            Some(p)
        }
    });

    let config = cmd_init(base_dir, force).await?;

    println!("✓ petfacts initialized successfully");
    println!("  Config: {}", config.paths.config_file.display());
    println!("  Database: {}", config.paths.db_file.display());
    println!("\nNext steps:");
    println!("  1. Edit the config file to customize endpoints and counts");
    println!("  2. Collect facts: petfacts gather");
    println!("  3. Build the report: petfacts report");

    Ok(())
}

fn load_config(path: Option<&std::path::Path>) -> Result<Config> {
    let config_path = path
        .map(PathBuf::from)
        .unwrap_or_else(Config::default_config_path);

    if !config_path.exists() {
        eprintln!(
            "Config file not found: {}\nRun 'petfacts init' first.",
            config_path.display()
        );
        std::process::exit(1);
    }

    Config::load(&config_path)
}
