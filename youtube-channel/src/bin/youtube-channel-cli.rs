use clap::{Parser, Subcommand};
use eyre::Context;
use std::io::IsTerminal;
use std::path::PathBuf;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;
use youtube_channel::{ChannelConfig, ChannelManager, ReqwestAccessor, load_stored_tokens};

/// Query a YouTube channel and its playlists.
#[derive(Debug, Parser)]
#[command(name = "youtube-channel-cli", version)]
struct Cli {
    /// JSON configuration file.
    #[arg(long, default_value = "youtube-channel.json")]
    config: PathBuf,

    /// Stored OAuth tokens; the first one is used when no --token is given.
    #[arg(long, default_value = "tokens.json")]
    tokens: PathBuf,

    /// Access token to use instead of the stored tokens.
    #[arg(long, env = "YOUTUBE_ACCESS_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Channel to query, overriding the configuration file.
    #[arg(long)]
    channel: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Whether the token owner subscribes to the channel.
    Subscribed,
    /// The channel's view, subscriber and video counts.
    Stats,
    /// Details of a single video.
    Video { id: String },
    /// A range of a playlist, counted from 1.
    Playlist {
        id: String,
        #[arg(long, default_value_t = 1)]
        start: u32,
        /// Last entry to include; the whole rest of the playlist when omitted.
        #[arg(long)]
        end: Option<u32>,
    },
}

#[tokio::main]
async fn main() -> eyre::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .from_env_lossy(),
        )
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .init();

    let cli = Cli::parse();

    let mut config = ChannelConfig::load(&cli.config)
        .await
        .context("load configuration")?;
    if let Some(channel) = cli.channel {
        config.channel_id = channel;
    }

    let http = ReqwestAccessor::with_timeout(config.request_timeout())?;
    let mut yt = ChannelManager::new(config, http);
    if cli.token.is_none() {
        let tokens = load_stored_tokens(&cli.tokens)
            .await
            .context("load stored tokens")?;
        match tokens.into_iter().next() {
            Some(token) => {
                yt.set_session(token);
            }
            None => tracing::warn!("no access token given and none stored"),
        }
    }
    let token = cli.token.as_deref();

    let output = match cli.command {
        Command::Subscribed => serde_json::to_string_pretty(&yt.is_user_subscribed(token).await),
        Command::Stats => serde_json::to_string_pretty(&yt.channel_statistics(token).await),
        Command::Video { id } => serde_json::to_string_pretty(&yt.video(&id, token).await),
        Command::Playlist { id, start, end } => {
            serde_json::to_string_pretty(&yt.playlist(&id, token, start, end).await)
        }
    }
    .context("serialize result")?;
    println!("{output}");

    Ok(())
}
