//! Runtime configuration for [`crate::ChannelManager`].

use crate::format::NumberLocale;
use eyre::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Base URL of the YouTube Data API v3.
pub const DEFAULT_API_BASE: &str = "https://www.googleapis.com/youtube/v3";

/// Environment variable that overrides [`ChannelConfig::channel_id`].
pub const CHANNEL_ID_ENV: &str = "YOUTUBE_CHANNEL_ID";

/// What to do when a playlist entry's video details cannot be fetched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingItemPolicy {
    /// Leave the entry's position empty and keep assembling.
    #[default]
    LeaveGap,
    /// Give up on the whole playlist.
    Abort,
}

/// Configuration for a channel accessor.
///
/// Usually read from a JSON file with [`ChannelConfig::load`]:
///
/// ```json
/// {
///   "channel_id": "UC_x5XG1OV2P6uZZ5FSM9Ttw",
///   "locale": { "decimal_separator": ".", "thousands_separator": "," },
///   "detail_concurrency": 4
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelConfig {
    /// The channel whose statistics and subscription status are queried.
    #[serde(default)]
    pub channel_id: String,
    /// Base URL that endpoint paths such as `/videos` are appended to.
    #[serde(default = "default_api_base")]
    pub api_base: String,
    /// Separators used for formatted statistics.
    #[serde(default)]
    pub locale: NumberLocale,
    /// How many video detail requests of one playlist page may be in flight at once.
    ///
    /// `1` keeps playlist assembly strictly sequential.
    #[serde(default = "default_detail_concurrency")]
    pub detail_concurrency: usize,
    #[serde(default)]
    pub missing_item_policy: MissingItemPolicy,
    /// Per-request timeout for the HTTP accessor. No timeout when absent.
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

fn default_api_base() -> String {
    DEFAULT_API_BASE.to_string()
}

fn default_detail_concurrency() -> usize {
    1
}

impl Default for ChannelConfig {
    fn default() -> Self {
        Self {
            channel_id: String::new(),
            api_base: default_api_base(),
            locale: NumberLocale::default(),
            detail_concurrency: default_detail_concurrency(),
            missing_item_policy: MissingItemPolicy::default(),
            request_timeout_secs: None,
        }
    }
}

impl ChannelConfig {
    /// Configuration for `channel_id` with every other setting at its default.
    pub fn new(channel_id: impl Into<String>) -> Self {
        Self {
            channel_id: channel_id.into(),
            ..Self::default()
        }
    }

    /// Reads configuration from a JSON file, then applies environment overrides.
    ///
    /// A missing file is not an error; defaults are used instead.
    pub async fn load(path: impl AsRef<Path>) -> eyre::Result<Self> {
        let path = path.as_ref();
        let mut config = if tokio::fs::try_exists(path)
            .await
            .with_context(|| format!("check for config file {}", path.display()))?
        {
            let raw = tokio::fs::read_to_string(path)
                .await
                .with_context(|| format!("read config file {}", path.display()))?;
            Self::from_json(&raw).with_context(|| format!("parse {}", path.display()))?
        } else {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            Self::default()
        };

        if let Ok(channel_id) = std::env::var(CHANNEL_ID_ENV) {
            config.apply_channel_override(channel_id);
        }

        Ok(config)
    }

    pub fn from_json(raw: &str) -> eyre::Result<Self> {
        serde_json::from_str(raw).context("parse channel configuration JSON")
    }

    /// The configured request timeout, if any.
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    fn apply_channel_override(&mut self, channel_id: String) {
        if channel_id.is_empty() {
            return;
        }
        tracing::debug!(%channel_id, "channel id overridden from environment");
        self.channel_id = channel_id;
    }
}
