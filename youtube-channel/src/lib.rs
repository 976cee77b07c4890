//! Read-only access to a YouTube channel: subscription status, display-ready channel
//! statistics, video details, and ranges of playlists.
//!
//! ```rust,no_run
//! use youtube_channel::{ChannelConfig, ChannelManager, ReqwestAccessor};
//!
//! # async fn example() -> eyre::Result<()> {
//! let config = ChannelConfig::load("youtube-channel.json").await?;
//! let http = ReqwestAccessor::with_timeout(config.request_timeout())?;
//! let yt = ChannelManager::new(config, http).with_session("ya29.token".to_string());
//!
//! if let Some(stats) = yt.channel_statistics(None).await {
//!     println!("{} views", stats["viewCount"]);
//! }
//! if let Some(playlist) = yt.playlist("PLxyz", None, 1, Some(10)).await {
//!     for (position, video) in playlist.iter() {
//!         println!("{position}: {}", video.title());
//!     }
//! }
//! # Ok(())
//! # }
//! ```

mod assembler;
pub mod config;
pub mod credentials;
pub mod format;
mod manager;
#[cfg(any(test, feature = "mock"))]
pub mod mock;
pub mod youtube_api;

pub use config::{ChannelConfig, MissingItemPolicy};
pub use credentials::{CredentialSource, load_stored_tokens};
pub use format::{NumberLocale, format_magnitude, format_statistics};
pub use manager::{ChannelManager, STATISTICS};
pub use youtube_api::{HttpAccessor, Playlist, ReqwestAccessor, Thumbnail, Video};
