//! In-memory YouTube API for testing code built on [`crate::ChannelManager`].
//!
//! [`MockYouTube`] implements [`HttpAccessor`] by answering requests from canned data
//! instead of the network, and records every request it receives so tests can assert
//! on how many pages and videos were fetched.
//!
//! Playlists are synthetic: a playlist registered with [`MockYouTube::with_playlist`]
//! has `len` entries whose video IDs come from [`mock_video_id`], served in pages whose
//! tokens are `page-2`, `page-3`, and so on.

use crate::youtube_api::HttpAccessor;
use serde_json::{Value, json};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// A request received by [`MockYouTube`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockRequest {
    /// Last path segment of the URL, e.g. `playlistItems`.
    pub endpoint: String,
    pub query: Vec<(String, String)>,
}

impl MockRequest {
    /// The value of query parameter `key`.
    pub fn param(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

#[derive(Debug, Default)]
struct MockState {
    playlists: HashMap<String, usize>,
    empty_pages: HashSet<(String, u32)>,
    missing_videos: HashSet<String>,
    channels_response: Option<Value>,
    subscriptions_response: Option<Value>,
    requests: Vec<MockRequest>,
}

/// A fake YouTube API. Clones share state.
#[derive(Debug, Clone, Default)]
pub struct MockYouTube {
    state: Arc<Mutex<MockState>>,
}

/// The video ID at zero-based `position` of a mock playlist.
pub fn mock_video_id(playlist_id: &str, position: usize) -> String {
    format!("{playlist_id}-v{position:03}")
}

impl MockYouTube {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Registers a playlist with `len` entries.
    pub fn with_playlist(self, playlist_id: &str, len: usize) -> Self {
        self.state().playlists.insert(playlist_id.to_string(), len);
        self
    }

    /// Makes page `page` (1-based) of `playlist_id` come back without items.
    pub fn with_empty_page(self, playlist_id: &str, page: u32) -> Self {
        self.state()
            .empty_pages
            .insert((playlist_id.to_string(), page));
        self
    }

    /// Makes `videos.list` for `video_id` come back without items.
    pub fn with_missing_video(self, video_id: &str) -> Self {
        self.state().missing_videos.insert(video_id.to_string());
        self
    }

    /// The body returned for every `channels.list` request.
    pub fn with_channels_response(self, body: Value) -> Self {
        self.state().channels_response = Some(body);
        self
    }

    /// The body returned for every `subscriptions.list` request.
    pub fn with_subscriptions_response(self, body: Value) -> Self {
        self.state().subscriptions_response = Some(body);
        self
    }

    /// Every request received so far, oldest first.
    pub fn requests(&self) -> Vec<MockRequest> {
        self.state().requests.clone()
    }

    /// Number of requests received so far.
    pub fn request_count(&self) -> usize {
        self.state().requests.len()
    }

    /// Number of `playlistItems.list` requests received so far.
    pub fn page_fetches(&self) -> usize {
        self.count("playlistItems")
    }

    /// Number of `videos.list` requests received so far.
    pub fn video_fetches(&self) -> usize {
        self.count("videos")
    }

    fn count(&self, endpoint: &str) -> usize {
        self.state()
            .requests
            .iter()
            .filter(|r| r.endpoint == endpoint)
            .count()
    }

    fn respond(&self, url: &str, query: &[(&str, &str)]) -> Option<Value> {
        let request = MockRequest {
            endpoint: url.rsplit('/').next().unwrap_or_default().to_string(),
            query: query
                .iter()
                .map(|&(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        };
        tracing::trace!(?request, "mock YouTube request");

        let mut state = self.state();
        let response = match request.endpoint.as_str() {
            "playlistItems" => Some(state.playlist_page(&request)),
            "videos" => Some(state.video(&request)),
            "channels" => Some(
                state
                    .channels_response
                    .clone()
                    .unwrap_or_else(|| json!({ "items": [] })),
            ),
            "subscriptions" => Some(
                state
                    .subscriptions_response
                    .clone()
                    .unwrap_or_else(|| json!({ "items": [] })),
            ),
            _ => None,
        };
        state.requests.push(request);
        response
    }
}

impl MockState {
    fn playlist_page(&self, request: &MockRequest) -> Value {
        let playlist_id = request.param("playlistId").unwrap_or_default();
        let Some(&len) = self.playlists.get(playlist_id) else {
            return json!({ "error": { "code": 404, "message": "playlistNotFound" } });
        };

        let page_size = request
            .param("maxResults")
            .and_then(|v| v.parse::<usize>().ok())
            .unwrap_or(5);
        let page = match request.param("pageToken").unwrap_or_default() {
            "" => 1,
            token => match token
                .strip_prefix("page-")
                .and_then(|n| n.parse::<u32>().ok())
                .filter(|&page| page > 0)
            {
                Some(page) => page,
                None => return json!({ "error": { "code": 400, "message": "invalidPageToken" } }),
            },
        };

        let first = (page as usize - 1) * page_size;
        let last = (first + page_size).min(len);
        let items: Vec<Value> = if self.empty_pages.contains(&(playlist_id.to_string(), page)) {
            Vec::new()
        } else {
            (first..last)
                .map(|position| {
                    json!({
                        "kind": "youtube#playlistItem",
                        "snippet": {
                            "playlistId": playlist_id,
                            "position": position,
                            "resourceId": {
                                "kind": "youtube#video",
                                "videoId": mock_video_id(playlist_id, position),
                            },
                        },
                    })
                })
                .collect()
        };

        let mut body = json!({
            "kind": "youtube#playlistItemListResponse",
            "items": items,
            "pageInfo": { "totalResults": len, "resultsPerPage": page_size },
        });
        if last < len {
            body["nextPageToken"] = json!(format!("page-{}", page + 1));
        }
        body
    }

    fn video(&self, request: &MockRequest) -> Value {
        let video_id = request.param("id").unwrap_or_default();
        if video_id.is_empty() || self.missing_videos.contains(video_id) {
            return json!({ "kind": "youtube#videoListResponse", "items": [] });
        }
        json!({
            "kind": "youtube#videoListResponse",
            "items": [{
                "id": video_id,
                "snippet": {
                    "channelId": "UCmock",
                    "channelTitle": "Mock Channel",
                    "categoryId": "22",
                    "publishedAt": "2024-01-01T00:00:00Z",
                    "title": format!("Video {video_id}"),
                    "description": "",
                    "thumbnails": {
                        "default": {
                            "url": format!("https://i.ytimg.com/vi/{video_id}/default.jpg"),
                            "width": 120,
                            "height": 90,
                        },
                    },
                },
            }],
        })
    }
}

impl HttpAccessor for MockYouTube {
    async fn get(&self, url: &str, query: &[(&str, &str)]) -> Option<Value> {
        self.respond(url, query)
    }
}
