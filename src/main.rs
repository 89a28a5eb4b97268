use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::info;

use ember::config::Config;
use ember::geo::NominatimGeocoder;
use ember::model::{Analyzer, RawPost};

/// Ember: disaster signal scoring for social post streams.
///
/// Scores short posts for disaster severity and sentiment, and aggregates
/// them into a dashboard summary.
#[derive(Parser)]
#[command(name = "ember", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the dashboard backend
    Serve {
        /// Port to listen on
        #[arg(long, default_value = "8000")]
        port: u16,

        /// Bind address
        #[arg(long, default_value = "127.0.0.1")]
        bind: String,
    },

    /// Score the posts in the stream spool and print a report
    Analyze {
        /// Spool file to drain (defaults to EMBER_SPOOL_PATH)
        #[arg(long)]
        file: Option<PathBuf>,
    },

    /// Score a single text from the command line
    Score {
        /// The post text to score
        text: String,
    },

    /// Run the filtered-stream listener, appending posts to the spool
    Stream {
        /// Keyword rule to install
        #[arg(long, default_value = "#earthquake")]
        keyword: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Set up structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("ember=info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { port, bind } => {
            let config = Config::load()?;
            let geocoder = Arc::new(NominatimGeocoder::new(&config.nominatim_url)?);
            ember::web::run_server(config, geocoder, port, &bind).await?;
        }

        Commands::Analyze { file } => {
            let config = Config::load()?;
            let path = file.unwrap_or(config.spool_path);

            let entries = ember::ingest::spool::read_spool(&path)?;
            if entries.is_empty() {
                anyhow::bail!(
                    "No posts in {} — run `ember stream` to collect some first.",
                    path.display()
                );
            }

            let posts: Vec<RawPost> = entries
                .into_iter()
                .map(|entry| RawPost {
                    text: entry.text,
                    ..Default::default()
                })
                .collect();

            let result = Analyzer::default().analyze(&posts);
            ember::output::print_report(&result);
        }

        Commands::Score { text } => {
            let post = RawPost {
                text,
                ..Default::default()
            };
            let result = Analyzer::default().analyze(std::slice::from_ref(&post));
            ember::output::print_report(&result);
        }

        Commands::Stream { keyword } => {
            let config = Config::load()?;
            config.require_bearer()?;

            let listener =
                ember::ingest::stream::StreamListener::new(&config.feed_api_url, &config.bearer_token)?;
            listener.reset_rules(&keyword).await?;

            info!(path = %config.spool_path.display(), "Spooling posts");
            listener.listen(&config.spool_path).await?;
        }
    }

    Ok(())
}
