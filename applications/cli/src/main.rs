//! CR8TE - command-line player for the CR8TE platform

use clap::{Parser, Subcommand};
use cr8te_cli::{
    commands::{self, PlayOptions},
    config::{CliConfig, DEFAULT_CONFIG_FILE},
};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "cr8te")]
#[command(about = "CR8TE Player command-line client", long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the newest tracks on the platform
    Feed,
    /// Play the feed headlessly and report qualifying listens
    Play {
        /// Position in the feed to start from
        #[arg(short, long, default_value_t = 0)]
        start: usize,
        /// Stop after this many tracks
        #[arg(short, long)]
        max_tracks: Option<usize>,
        /// Run the media clock at wall-clock speed
        #[arg(long)]
        realtime: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "cr8te_cli=info,cr8te_playback=info,cr8te_server_client=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let config = CliConfig::load(&cli.config)?;
    config.validate()?;

    match cli.command {
        Commands::Feed => {
            let listing = commands::feed(&config).await?;
            print!("{}", listing);
        }
        Commands::Play {
            start,
            max_tracks,
            realtime,
        } => {
            let options = PlayOptions {
                start,
                max_tracks,
                realtime,
            };
            let summary = commands::play(&config, &options).await?;
            println!(
                "Played {} track(s), {} stream(s) counted",
                summary.started.len(),
                summary.counted.len()
            );
        }
    }

    Ok(())
}
