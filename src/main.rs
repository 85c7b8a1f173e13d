//! RAT main entry point
//!
//! This is the command-line interface for the RAT thread reader.

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use rat::config::{load_config_with_hash, Config};
use rat::output::{format_forest_text, format_listing_text, format_post_text, to_json};
use rat::{RatError, SiteClient};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// RAT: read discussion threads without the lazy loading
///
/// RAT loads a post together with every lazily loaded reply branch and
/// prints the complete, ordered thread.
#[derive(Parser, Debug)]
#[command(name = "rat")]
#[command(version = "1.0.0")]
#[command(about = "Reads complete discussion threads", long_about = None)]
struct Cli {
    /// Path to TOML configuration file (defaults are used when omitted)
    #[arg(short, long, value_name = "CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose", global = true)]
    quiet: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Text, global = true)]
    format: Format,

    /// Validate config and print the effective settings without fetching
    #[arg(long)]
    dry_run: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Load a post and its full comment thread
    Post {
        /// Post permalink, absolute or site-relative
        permalink: String,
    },

    /// List the posts of a subreddit
    Subreddit {
        /// Subreddit name, path or URL
        name: String,
    },

    /// Crawl a raw comment fragment and print the assembled thread
    Thread {
        /// Root comment fragment address
        fragment: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("could not load {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            config
        }
        None => Config::default(),
    };

    if cli.dry_run {
        handle_dry_run(&config);
        return Ok(());
    }

    let Some(command) = cli.command else {
        anyhow::bail!("no command given, see --help");
    };

    let client = SiteClient::from_config(&config).context("could not build HTTP client")?;

    let rendered = match command {
        Command::Post { permalink } => {
            let post = client
                .fetch_post(&permalink)
                .await
                .map_err(report_branch)
                .context("could not load thread")?;
            match cli.format {
                Format::Text => format_post_text(&post),
                Format::Json => to_json(&post)?,
            }
        }
        Command::Subreddit { name } => {
            let listing = client
                .fetch_listing(&name)
                .await
                .context("could not load subreddit")?;
            match cli.format {
                Format::Text => format_listing_text(&listing),
                Format::Json => to_json(&listing)?,
            }
        }
        Command::Thread { fragment } => {
            let forest = client
                .fetch_thread(&fragment)
                .await
                .map_err(report_branch)
                .context("could not load thread")?;
            match cli.format {
                Format::Text => format_forest_text(&forest),
                Format::Json => to_json(&forest.roots)?,
            }
        }
    };

    println!("{}", rendered);
    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("rat=warn"),
            1 => EnvFilter::new("rat=info,warn"),
            2 => EnvFilter::new("rat=debug,info"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Names the failing lazy branch before the error chain is printed
fn report_branch(err: RatError) -> RatError {
    if let Some(link) = err.failing_link() {
        tracing::error!(
            "Lazy branch {} could not be loaded, set branch-failure = \"skip\" to leave it out",
            link
        );
    }
    err
}

/// Handles the --dry-run mode: prints the effective configuration
fn handle_dry_run(config: &Config) {
    println!("=== RAT Dry Run ===\n");

    println!("Site:");
    println!("  Base URL: {}", config.site.base_url);

    println!("\nUser Agent:");
    println!("  Header: {}", config.user_agent.header_value());

    println!("\nCrawler:");
    println!("  Branch failure: {:?}", config.crawler.branch_failure);
    println!("  Request timeout: {}ms", config.crawler.request_timeout);
    println!("  Connect timeout: {}ms", config.crawler.connect_timeout);
    match config.crawler.crawl_deadline {
        Some(deadline) => println!("  Crawl deadline: {}ms", deadline),
        None => println!("  Crawl deadline: none"),
    }

    println!("\n✓ Configuration is valid");
}
