//! YouTube PlaylistItems API types and the assembled [`Playlist`].

use crate::youtube_api::types::PageInfo;
use crate::youtube_api::videos::Video;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, VecDeque};

/// Response structure for the `playlistItems.list` API call.
///
/// See: <https://developers.google.com/youtube/v3/docs/playlistItems/list>
#[derive(Debug, Serialize, Deserialize)]
pub struct PlaylistItemListResponse {
    /// The entries of this page, in playlist order.
    #[serde(default)]
    pub items: VecDeque<PlaylistItem>,
    #[serde(rename = "pageInfo")]
    pub page_info: PageInfo,
    /// Token that can be used as the value of the pageToken parameter to retrieve the next page in the result set.
    #[serde(rename = "nextPageToken", default)]
    pub next_page_token: Option<String>,
}

/// A `playlistItem` resource: one entry of a playlist.
///
/// See: <https://developers.google.com/youtube/v3/docs/playlistItems#resource>
#[derive(Debug, Serialize, Deserialize)]
pub struct PlaylistItem {
    pub snippet: PlaylistItemSnippet,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PlaylistItemSnippet {
    /// Zero-based order of the entry within the playlist.
    pub position: u32,
    #[serde(rename = "resourceId")]
    pub resource_id: ResourceId,
    /// The ID of the playlist the entry belongs to.
    #[serde(rename = "playlistId", default)]
    pub playlist_id: String,
}

/// The resource a playlist entry refers to.
#[derive(Debug, Serialize, Deserialize)]
pub struct ResourceId {
    #[serde(rename = "videoId")]
    pub video_id: String,
}

/// Videos of a playlist, indexed by their zero-based playlist position.
///
/// Positions need not be contiguous: a playlist assembled for a range only holds the
/// positions inside that range, and entries whose details could not be fetched may be
/// missing.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Playlist {
    id: String,
    items: BTreeMap<usize, Video>,
    // Kept in lockstep with `items`: same keys, and the id of the video stored there.
    positions: BTreeMap<usize, String>,
}

impl Playlist {
    /// Creates an empty playlist.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            items: BTreeMap::new(),
            positions: BTreeMap::new(),
        }
    }

    /// The playlist's ID.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Stores `video` at `position`, replacing whatever was there.
    ///
    /// Without a position the video goes one past the highest occupied position, or to
    /// position 0 in an empty playlist.
    pub fn insert(&mut self, video: Video, position: Option<usize>) -> &mut Self {
        let position = position.unwrap_or_else(|| self.next_position());
        self.positions.insert(position, video.id().to_string());
        self.items.insert(position, video);
        self
    }

    /// The lowest position holding the video with ID `video_id`.
    pub fn find_position(&self, video_id: &str) -> Option<usize> {
        self.positions
            .iter()
            .find_map(|(&position, id)| (id == video_id).then_some(position))
    }

    /// The video with ID `video_id`.
    pub fn get(&self, video_id: &str) -> Option<&Video> {
        self.find_position(video_id)
            .and_then(|position| self.items.get(&position))
    }

    /// The video at `position`.
    pub fn get_at(&self, position: usize) -> Option<&Video> {
        self.items.get(&position)
    }

    /// Number of videos held.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Occupied positions and the ID of the video at each, in ascending order.
    pub fn positions(&self) -> impl Iterator<Item = (usize, &str)> {
        self.positions
            .iter()
            .map(|(&position, id)| (position, id.as_str()))
    }

    /// Videos in ascending position order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &Video)> {
        self.items.iter().map(|(&position, video)| (position, video))
    }

    fn next_position(&self) -> usize {
        self.items
            .last_key_value()
            .map_or(0, |(&position, _)| position + 1)
    }
}
