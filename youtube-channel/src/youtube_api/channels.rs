//! YouTube Channels API types and functionality.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Response structure for the `channels.list` API call.
///
/// See: <https://developers.google.com/youtube/v3/docs/channels/list>
#[derive(Debug, Serialize, Deserialize)]
pub struct ChannelListResponse {
    /// A list of channels that match the request criteria.
    #[serde(default)]
    pub items: VecDeque<Channel>,
}

/// A `channel` resource as returned with `part=statistics`.
///
/// See: <https://developers.google.com/youtube/v3/docs/channels#resource>
#[derive(Debug, Serialize, Deserialize)]
pub struct Channel {
    /// The ID that YouTube uses to uniquely identify the channel.
    #[serde(default)]
    pub id: String,
    /// Counters such as `viewCount`, `subscriberCount` and `videoCount`.
    ///
    /// Kept as raw JSON: the counters arrive as decimal strings, and the set of keys
    /// varies (e.g. `hiddenSubscriberCount`).
    ///
    /// See: <https://developers.google.com/youtube/v3/docs/channels#statistics>
    #[serde(default)]
    pub statistics: Option<serde_json::Map<String, serde_json::Value>>,
}

impl ChannelListResponse {
    /// The statistics of the first channel in the response, if it has any.
    pub fn into_statistics(self) -> Option<serde_json::Map<String, serde_json::Value>> {
        self.items.into_iter().next()?.statistics
    }
}
