//! The public entry point: channel statistics, subscription checks, videos and playlists.

use crate::assembler::RangeAssembler;
use crate::config::ChannelConfig;
use crate::credentials::CredentialSource;
use crate::format::format_statistics;
use crate::youtube_api::{HttpAccessor, Playlist, Video, YouTubeClient};
use std::collections::BTreeMap;
use tracing::instrument;

/// Channel counters reported by [`ChannelManager::channel_statistics`].
pub const STATISTICS: [&str; 3] = ["viewCount", "subscriberCount", "videoCount"];

/// Read-only access to a YouTube channel and its playlists.
///
/// Every operation takes an optional access token. A non-empty token passed explicitly
/// is used as-is; otherwise the session credential set with
/// [`ChannelManager::with_session`] is used. Without either, operations return `None`
/// without contacting YouTube.
///
/// Failures never surface as errors: anything that prevents an answer (missing token,
/// network failure, an error response from YouTube) yields `None` and is logged.
#[derive(Debug)]
pub struct ChannelManager<H> {
    client: YouTubeClient<H>,
    config: ChannelConfig,
    session: Option<Box<dyn CredentialSource>>,
}

impl<H: HttpAccessor> ChannelManager<H> {
    pub fn new(config: ChannelConfig, http: H) -> Self {
        Self {
            client: YouTubeClient::new(http, config.api_base.as_str()),
            config,
            session: None,
        }
    }

    /// Uses `session` for operations that are not given an explicit token.
    pub fn with_session(mut self, session: impl CredentialSource + 'static) -> Self {
        self.set_session(session);
        self
    }

    pub fn set_session(&mut self, session: impl CredentialSource + 'static) -> &mut Self {
        self.session = Some(Box::new(session));
        self
    }

    pub fn clear_session(&mut self) -> &mut Self {
        self.session = None;
        self
    }

    /// The channel that statistics and subscriptions refer to.
    pub fn channel_id(&self) -> &str {
        &self.config.channel_id
    }

    pub fn set_channel_id(&mut self, channel_id: impl Into<String>) -> &mut Self {
        self.config.channel_id = channel_id.into();
        self
    }

    pub fn config(&self) -> &ChannelConfig {
        &self.config
    }

    fn resolve_token(&self, token: Option<&str>) -> Option<String> {
        match token {
            Some(token) if !token.is_empty() => Some(token.to_string()),
            _ => self.session.as_ref()?.access_token(),
        }
    }

    /// The channel ID and token needed for channel-level calls, if both are available.
    fn channel_call(&self, token: Option<&str>) -> Option<(&str, String)> {
        if self.config.channel_id.is_empty() {
            tracing::debug!("no channel configured");
            return None;
        }
        let Some(token) = self.resolve_token(token) else {
            tracing::debug!("no access token available");
            return None;
        };
        Some((self.config.channel_id.as_str(), token))
    }

    /// Whether the token owner is subscribed to the configured channel.
    ///
    /// `None` if that cannot be determined, including when YouTube answers with an
    /// error.
    #[instrument(skip(self, token), fields(channel_id = %self.config.channel_id))]
    pub async fn is_user_subscribed(&self, token: Option<&str>) -> Option<bool> {
        let (channel_id, token) = self.channel_call(token)?;
        let subscriptions = self.client.list_subscriptions_to(channel_id, &token).await?;
        Some(!subscriptions.items.is_empty())
    }

    /// The configured channel's view, subscriber and video counts, formatted for display.
    ///
    /// Counters are keyed by their API names (`viewCount`, `subscriberCount`,
    /// `videoCount`) and abbreviated with [`crate::format::format_magnitude`]. Counters
    /// the channel does not report are left out.
    #[instrument(skip(self, token), fields(channel_id = %self.config.channel_id))]
    pub async fn channel_statistics(&self, token: Option<&str>) -> Option<BTreeMap<String, String>> {
        let (channel_id, token) = self.channel_call(token)?;
        let Some(statistics) = self
            .client
            .list_channel_statistics(channel_id, &token)
            .await?
            .into_statistics()
        else {
            tracing::debug!("channel response has no statistics");
            return None;
        };
        Some(format_statistics(&statistics, &STATISTICS, &self.config.locale))
    }

    /// A single video by ID.
    #[instrument(skip(self, token))]
    pub async fn video(&self, video_id: &str, token: Option<&str>) -> Option<Video> {
        if video_id.is_empty() {
            return None;
        }
        let token = self.resolve_token(token)?;
        self.client.get_video(video_id, &token).await
    }

    /// Entries `start..=end` of a playlist, with the details of each video.
    ///
    /// `start` and `end` count from 1; an `end` of `None`, or one past the last entry,
    /// means "through the last entry". Videos are stored at their zero-based playlist
    /// position, so entry `start` lands at position `start - 1`.
    ///
    /// Returns `None` if the playlist does not exist or is empty. If a page after the
    /// first cannot be fetched, the entries collected so far are returned. Videos whose
    /// details cannot be fetched are handled according to
    /// [`ChannelConfig::missing_item_policy`].
    #[instrument(skip(self, token))]
    pub async fn playlist(
        &self,
        playlist_id: &str,
        token: Option<&str>,
        start: u32,
        end: Option<u32>,
    ) -> Option<Playlist> {
        if playlist_id.is_empty() {
            return None;
        }
        let Some(token) = self.resolve_token(token) else {
            tracing::debug!("no access token available");
            return None;
        };
        RangeAssembler::new(
            &self.client,
            &token,
            self.config.detail_concurrency,
            self.config.missing_item_policy,
        )
        .assemble(playlist_id, start, end)
        .await
    }
}
