//! Page Analyzer main entry point
//!
//! This is the command-line interface for the Page Analyzer.

use clap::{Parser, Subcommand};
use page_analyzer::config::{load_config, Config};
use page_analyzer::output::{format_url_detail, format_url_list};
use page_analyzer::storage::SqliteStorage;
use page_analyzer::{Analyzer, AnalyzerError, Submission};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Log filter used when neither `-v` nor `-q` is given
const DEFAULT_LOG_FILTER: &str = "page_analyzer=info,warn";

/// Page Analyzer: on-demand SEO checks for stored URLs
///
/// Page Analyzer stores submitted sites and, on request, fetches them to
/// record the HTTP status, first heading, title and meta description.
#[derive(Parser, Debug)]
#[command(name = "page-analyzer")]
#[command(version)]
#[command(about = "On-demand SEO checks for stored URLs", long_about = None)]
struct Cli {
    /// Path to TOML configuration file (defaults are used if omitted)
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose", global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Submit a URL; it is stored as scheme://host
    Add {
        /// The URL to submit
        url: String,
    },

    /// List URLs with their latest check
    List,

    /// Show one URL and all of its checks
    Show {
        /// The URL id
        id: i64,
    },

    /// Run a new check against a stored URL
    Check {
        /// The URL id
        id: i64,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let config = match load(cli.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    tracing::debug!("Using database: {}", config.database.path);
    let storage = SqliteStorage::new(Path::new(&config.database.path))?;
    let analyzer = Analyzer::new(config, storage)?;

    let result = match cli.command {
        Command::Add { url } => handle_add(&analyzer, &url),
        Command::List => handle_list(&analyzer),
        Command::Show { id } => handle_show(&analyzer, id),
        Command::Check { id } => handle_check(&analyzer, id).await,
    };

    if let Err(e) = result {
        tracing::debug!("Command failed: {:?}", e);
        report_error(&e);
        std::process::exit(1);
    }

    Ok(())
}

/// Loads the configuration file (if given) and applies environment overrides
fn load(path: Option<&Path>) -> Result<Config, AnalyzerError> {
    let mut config = match path {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            load_config(path)?
        }
        None => Config::default(),
    };
    config.apply_env_overrides()?;
    Ok(config)
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new(DEFAULT_LOG_FILTER),
            1 => EnvFilter::new("page_analyzer=debug,info"),
            2 => EnvFilter::new("page_analyzer=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Prints the user-facing message for a failed command
fn report_error(error: &AnalyzerError) {
    match error {
        AnalyzerError::Validation(errors) => {
            for e in errors.errors() {
                eprintln!("✗ {}", e);
            }
        }
        AnalyzerError::UrlNotFound(_) => eprintln!("✗ Page not found"),
        AnalyzerError::CheckFailed { .. } => eprintln!("✗ An error occurred during the check"),
        other => eprintln!("✗ Error: {}", other),
    }
}

/// Handles `add`: validates and stores a URL
fn handle_add(analyzer: &Analyzer<SqliteStorage>, url: &str) -> Result<(), AnalyzerError> {
    match analyzer.submit_url(url)? {
        Submission::Added(id) => println!("✓ Page successfully added (id {})", id),
        Submission::Existing(id) => println!("✓ Page already exists (id {})", id),
    }
    Ok(())
}

/// Handles `list`: prints URLs with their latest check
fn handle_list(analyzer: &Analyzer<SqliteStorage>) -> Result<(), AnalyzerError> {
    let urls = analyzer.list_urls()?;
    print!("{}", format_url_list(&urls));
    Ok(())
}

/// Handles `show`: prints one URL and its checks
fn handle_show(analyzer: &Analyzer<SqliteStorage>, id: i64) -> Result<(), AnalyzerError> {
    let detail = analyzer.url_detail(id)?;
    print!("{}", format_url_detail(&detail));
    Ok(())
}

/// Handles `check`: runs and records a new check
async fn handle_check(analyzer: &Analyzer<SqliteStorage>, id: i64) -> Result<(), AnalyzerError> {
    let check = analyzer.run_check(id).await?;
    println!(
        "✓ Page successfully checked (status {}, check id {})",
        check.status_code, check.id
    );
    Ok(())
}
