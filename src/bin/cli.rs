//! Community Digest CLI
//!
//! Local execution entry point. For AWS Lambda, use `community-digest-lambda`.

use std::path::PathBuf;

use chrono::Utc;
use clap::{Parser, Subcommand};
use community_digest::{
    error::Result,
    models::{BoardId, Config},
    pipeline::DigestPipeline,
    utils::http,
};
use futures::future::join_all;

/// Community Digest - stock discussion board ranking
#[derive(Parser, Debug)]
#[command(
    name = "community-digest",
    version,
    about = "Ranks stock discussion-board posts by engagement"
)]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch, rank and print the digest for one or more stock codes
    Digest {
        /// Stock codes (e.g. 005930)
        #[arg(required = true)]
        codes: Vec<String>,

        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },

    /// Print the board link for a stock code
    Url {
        code: String,
    },

    /// Validate the configuration file
    Validate,
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = Config::load_or_default(&cli.config);

    match cli.command {
        Command::Digest { codes, pretty } => {
            config.validate()?;
            let pipeline = DigestPipeline::from_config(&config)?;

            // Boards run concurrently; pages within a board stay sequential.
            let responses = join_all(
                codes
                    .iter()
                    .map(|code| pipeline.respond(Some(code.as_str()), Utc::now())),
            )
            .await;

            for (code, response) in codes.iter().zip(responses) {
                let json = if pretty {
                    serde_json::to_string_pretty(&response)?
                } else {
                    serde_json::to_string(&response)?
                };
                if codes.len() > 1 {
                    println!("{code}\t{json}");
                } else {
                    println!("{json}");
                }
            }
        }

        Command::Url { code } => {
            let board_id = BoardId::parse(&code)?;
            println!("{}", http::board_url(&config.portal, &board_id)?);
        }

        Command::Validate => {
            log::info!("Validating configuration...");

            if let Err(e) = config.validate() {
                log::error!("Config validation failed: {}", e);
                return Err(e);
            }
            log::info!("✓ Config OK");
            log::info!(
                "Fetching {} pages per board, cache lifetime {}s",
                config.digest.page_count,
                config.digest.cache_ttl_secs
            );
        }
    }

    Ok(())
}
