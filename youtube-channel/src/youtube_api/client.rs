//! HTTP access to the YouTube Data API and the typed endpoint calls built on it.

use crate::youtube_api::{
    channels::ChannelListResponse,
    playlists::PlaylistItemListResponse,
    subscriptions::SubscriptionListResponse,
    types::decode,
    videos::{Video, VideoListResponse},
};
use eyre::Context;
use std::future::Future;
use std::time::Duration;
use tracing::instrument;

/// Number of entries requested per `playlistItems.list` page (the API maximum).
pub const PAGE_SIZE: u32 = 50;

/// Performs GET requests against the YouTube API and decodes JSON bodies.
///
/// Implementations return `None` when no JSON body could be obtained (connection
/// failures, timeouts, non-JSON bodies). Bodies of failed requests that are JSON are
/// returned as-is, so callers get to see YouTube's `{"error": ...}` responses.
pub trait HttpAccessor: Send + Sync {
    fn get(
        &self,
        url: &str,
        query: &[(&str, &str)],
    ) -> impl Future<Output = Option<serde_json::Value>> + Send;
}

/// [`HttpAccessor`] backed by a [`reqwest::Client`].
#[derive(Debug, Clone, Default)]
pub struct ReqwestAccessor {
    client: reqwest::Client,
}

impl ReqwestAccessor {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// Builds an accessor whose requests give up after `timeout`.
    pub fn with_timeout(timeout: Option<Duration>) -> eyre::Result<Self> {
        let mut builder = reqwest::ClientBuilder::new();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().context("build HTTP client")?;
        Ok(Self { client })
    }

    // The query carries the access token, so it stays out of the span and reqwest errors
    // lose their URL before they are wrapped.
    #[instrument(skip(self, query), level = tracing::Level::TRACE)]
    async fn fetch_json(
        &self,
        url: &str,
        query: &[(&str, &str)],
    ) -> eyre::Result<serde_json::Value> {
        let response = self
            .client
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(reqwest::Error::without_url)
            .with_context(|| format!("send GET request to YouTube API: {url}"))?;

        let status_code = response.status();
        let body = response
            .text()
            .await
            .map_err(reqwest::Error::without_url)
            .with_context(|| format!("read YouTube API response body from {url}"))?;

        match serde_json::from_str(&body) {
            Ok(json) => {
                if !status_code.is_success() {
                    tracing::debug!(url, %status_code, "YouTube API request failed with JSON body");
                }
                Ok(json)
            }
            Err(e) if status_code.is_success() => {
                Err(e).with_context(|| format!("parse YouTube API response from {url} as JSON"))
            }
            Err(_) => Err(eyre::eyre!(
                "YouTube API GET request failed with status {}: {}",
                status_code,
                body
            )),
        }
    }
}

impl HttpAccessor for ReqwestAccessor {
    async fn get(&self, url: &str, query: &[(&str, &str)]) -> Option<serde_json::Value> {
        match self.fetch_json(url, query).await {
            Ok(json) => Some(json),
            Err(e) => {
                tracing::warn!(url, "YouTube API request failed: {e:#}");
                None
            }
        }
    }
}

/// Typed calls to the YouTube Data API v3 endpoints this crate uses.
///
/// Every call authenticates with an `access_token` query parameter. Any failure,
/// whether transport, an upstream error response, or a body without the expected keys,
/// comes back as `None` after being logged.
#[derive(Debug, Clone)]
pub struct YouTubeClient<H> {
    http: H,
    api_base: String,
}

impl<H: HttpAccessor> YouTubeClient<H> {
    pub fn new(http: H, api_base: impl Into<String>) -> Self {
        let mut api_base = api_base.into();
        while api_base.ends_with('/') {
            api_base.pop();
        }
        Self { http, api_base }
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}/{}", self.api_base, endpoint)
    }

    /// Calls `subscriptions.list` for the token owner's subscriptions to `channel_id`.
    ///
    /// # API Reference
    ///
    /// <https://developers.google.com/youtube/v3/docs/subscriptions/list>
    #[instrument(skip(self, access_token))]
    pub async fn list_subscriptions_to(
        &self,
        channel_id: &str,
        access_token: &str,
    ) -> Option<SubscriptionListResponse> {
        let query_params = [
            ("part", "snippet"),
            ("mine", "true"),
            ("forChannelId", channel_id),
            ("access_token", access_token),
        ];
        let body = self
            .http
            .get(&self.url("subscriptions"), &query_params)
            .await?;
        let subscriptions: SubscriptionListResponse = decode("subscriptions", body)?;

        tracing::debug!(
            returned_items = subscriptions.items.len(),
            "fetched subscriptions"
        );
        Some(subscriptions)
    }

    /// Calls `channels.list` for the statistics of `channel_id`.
    ///
    /// # API Reference
    ///
    /// <https://developers.google.com/youtube/v3/docs/channels/list>
    #[instrument(skip(self, access_token))]
    pub async fn list_channel_statistics(
        &self,
        channel_id: &str,
        access_token: &str,
    ) -> Option<ChannelListResponse> {
        let query_params = [
            ("part", "statistics"),
            ("id", channel_id),
            ("access_token", access_token),
        ];
        let body = self.http.get(&self.url("channels"), &query_params).await?;
        let channels: ChannelListResponse = decode("channels", body)?;

        tracing::debug!(
            returned_items = channels.items.len(),
            "fetched channel statistics"
        );
        Some(channels)
    }

    /// Calls `videos.list` for the snippet of a single video.
    ///
    /// # API Reference
    ///
    /// <https://developers.google.com/youtube/v3/docs/videos/list>
    #[instrument(skip(self, access_token))]
    pub async fn list_videos(&self, video_id: &str, access_token: &str) -> Option<VideoListResponse> {
        let query_params = [
            ("part", "snippet"),
            ("id", video_id),
            ("access_token", access_token),
        ];
        let body = self.http.get(&self.url("videos"), &query_params).await?;
        let videos: VideoListResponse = decode("videos", body)?;

        tracing::trace!(returned_items = videos.items.len(), "fetched video details");
        Some(videos)
    }

    /// Fetches a single video, or `None` if it does not exist or cannot be fetched.
    pub async fn get_video(&self, video_id: &str, access_token: &str) -> Option<Video> {
        let response = self.list_videos(video_id, access_token).await?;
        match Video::try_from(response) {
            Ok(video) => Some(video),
            Err(e) => {
                tracing::debug!(video_id, "no video details: {e:#}");
                None
            }
        }
    }

    /// Calls `playlistItems.list` for one page of `playlist_id`.
    ///
    /// The first page is requested with an empty `pageToken`; later pages with the
    /// `nextPageToken` of the page before.
    ///
    /// # API Reference
    ///
    /// <https://developers.google.com/youtube/v3/docs/playlistItems/list>
    #[instrument(skip(self, access_token))]
    pub async fn list_playlist_items(
        &self,
        playlist_id: &str,
        access_token: &str,
        page_token: Option<&str>,
    ) -> Option<PlaylistItemListResponse> {
        let max_results_string = PAGE_SIZE.to_string();
        let query_params = [
            ("part", "snippet"),
            ("playlistId", playlist_id),
            ("access_token", access_token),
            ("pageToken", page_token.unwrap_or("")),
            ("maxResults", max_results_string.as_str()),
        ];
        let body = self
            .http
            .get(&self.url("playlistItems"), &query_params)
            .await?;
        let page: PlaylistItemListResponse = decode("playlistItems", body)?;

        tracing::debug!(
            total_results = page.page_info.total_results,
            returned_items = page.items.len(),
            "fetched playlist items"
        );
        Some(page)
    }
}
