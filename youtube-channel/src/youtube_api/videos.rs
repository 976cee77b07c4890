//! YouTube Videos API types and functionality.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, VecDeque};

/// Response structure for the `videos.list` API call.
///
/// See: <https://developers.google.com/youtube/v3/docs/videos/list>
#[derive(Debug, Serialize, Deserialize)]
pub struct VideoListResponse {
    /// A list of videos that match the request criteria.
    #[serde(default)]
    pub items: VecDeque<VideoResource>,
}

/// A `video` resource as returned with `part=snippet`.
///
/// See: <https://developers.google.com/youtube/v3/docs/videos#resource>
#[derive(Debug, Serialize, Deserialize)]
pub struct VideoResource {
    /// The ID that YouTube uses to uniquely identify the video.
    pub id: String,
    pub snippet: VideoSnippet,
}

/// Basic details about a video.
///
/// See: <https://developers.google.com/youtube/v3/docs/videos#snippet>
#[derive(Debug, Serialize, Deserialize)]
pub struct VideoSnippet {
    /// The ID of the channel that the video was uploaded to.
    #[serde(rename = "channelId")]
    pub channel_id: String,
    /// Channel title for the channel that the video belongs to.
    #[serde(rename = "channelTitle")]
    pub channel_title: String,
    /// The YouTube video category associated with the video.
    #[serde(rename = "categoryId", default)]
    pub category_id: String,
    /// The date and time that the video was published.
    ///
    /// The value is specified in ISO 8601 format.
    #[serde(rename = "publishedAt")]
    pub published_at: Timestamp,
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Thumbnail images keyed by size name (`default`, `medium`, `high`, ...).
    #[serde(default)]
    pub thumbnails: BTreeMap<String, Thumbnail>,
    /// Keyword tags. Absent for videos without tags.
    #[serde(default)]
    pub tags: Vec<String>,
}

/// A single thumbnail image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Thumbnail {
    pub url: String,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
}

/// A YouTube video with the details of its `videos.list` snippet.
///
/// Built from a detail response with [`Video::try_from`], and not modified afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Video {
    id: String,
    channel_id: String,
    channel_title: String,
    category_id: String,
    published_at: Timestamp,
    title: String,
    description: String,
    thumbnails: BTreeMap<String, Thumbnail>,
    tags: Vec<String>,
}

impl TryFrom<VideoListResponse> for Video {
    type Error = eyre::Report;

    /// Takes the first video of a `videos.list` response.
    ///
    /// Fails if the response has no items or the first item has an empty id.
    fn try_from(response: VideoListResponse) -> eyre::Result<Self> {
        let Some(VideoResource { id, snippet }) = response.items.into_iter().next() else {
            eyre::bail!("video list response contains no videos");
        };
        if id.is_empty() {
            eyre::bail!("video list response contains a video without an id");
        }

        Ok(Self {
            id,
            channel_id: snippet.channel_id,
            channel_title: snippet.channel_title,
            category_id: snippet.category_id,
            published_at: snippet.published_at,
            title: snippet.title,
            description: snippet.description,
            thumbnails: snippet.thumbnails,
            tags: snippet.tags,
        })
    }
}

impl Video {
    /// The ID that YouTube uses to uniquely identify the video.
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn channel_id(&self) -> &str {
        &self.channel_id
    }

    pub fn channel_title(&self) -> &str {
        &self.channel_title
    }

    pub fn category_id(&self) -> &str {
        &self.category_id
    }

    pub fn published_at(&self) -> Timestamp {
        self.published_at
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Thumbnails keyed by size name.
    pub fn thumbnails(&self) -> &BTreeMap<String, Thumbnail> {
        &self.thumbnails
    }

    pub fn thumbnail(&self, size: &str) -> Option<&Thumbnail> {
        self.thumbnails.get(size)
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn response(body: serde_json::Value) -> VideoListResponse {
        serde_json::from_value(body).unwrap()
    }

    #[test]
    fn from_detail_response() {
        let video = Video::try_from(response(json!({
            "kind": "youtube#videoListResponse",
            "items": [{
                "id": "dQw4w9WgXcQ",
                "snippet": {
                    "channelId": "UCuAXFkgsw1L7xaCfnd5JJOw",
                    "channelTitle": "Rick Astley",
                    "categoryId": "10",
                    "publishedAt": "2009-10-25T06:57:33Z",
                    "title": "Never Gonna Give You Up",
                    "description": "The official video",
                    "thumbnails": {
                        "default": { "url": "https://i.ytimg.com/vi/dQw4w9WgXcQ/default.jpg", "width": 120, "height": 90 },
                        "high": { "url": "https://i.ytimg.com/vi/dQw4w9WgXcQ/hqdefault.jpg", "width": 480, "height": 360 }
                    },
                    "tags": ["rick astley", "never gonna give you up"]
                }
            }]
        })))
        .unwrap();

        assert_eq!(video.id(), "dQw4w9WgXcQ");
        assert_eq!(video.channel_id(), "UCuAXFkgsw1L7xaCfnd5JJOw");
        assert_eq!(video.channel_title(), "Rick Astley");
        assert_eq!(video.category_id(), "10");
        assert_eq!(
            video.published_at(),
            "2009-10-25T06:57:33Z".parse::<Timestamp>().unwrap()
        );
        assert_eq!(video.title(), "Never Gonna Give You Up");
        assert_eq!(video.description(), "The official video");
        assert_eq!(video.thumbnails().len(), 2);
        assert_eq!(
            video.thumbnail("high"),
            Some(&Thumbnail {
                url: "https://i.ytimg.com/vi/dQw4w9WgXcQ/hqdefault.jpg".to_string(),
                width: Some(480),
                height: Some(360),
            })
        );
        assert_eq!(video.tags(), ["rick astley", "never gonna give you up"]);
    }

    #[test]
    fn optional_snippet_fields() {
        let video = Video::try_from(response(json!({
            "items": [{
                "id": "abc",
                "snippet": {
                    "channelId": "UC1",
                    "channelTitle": "One",
                    "publishedAt": "2024-01-01T00:00:00Z",
                    "title": "Untagged"
                }
            }]
        })))
        .unwrap();

        assert!(video.tags().is_empty());
        assert!(video.thumbnails().is_empty());
        assert_eq!(video.description(), "");
        assert_eq!(video.category_id(), "");
    }

    #[test]
    fn empty_response_is_an_error() {
        let result = Video::try_from(response(json!({ "items": [] })));
        assert!(result.is_err(), "{result:?}");

        let result = Video::try_from(response(json!({})));
        assert!(result.is_err(), "{result:?}");
    }

    #[test]
    fn empty_id_is_an_error() {
        let result = Video::try_from(response(json!({
            "items": [{
                "id": "",
                "snippet": {
                    "channelId": "UC1",
                    "channelTitle": "One",
                    "publishedAt": "2024-01-01T00:00:00Z",
                    "title": "No id"
                }
            }]
        })));
        assert!(result.is_err(), "{result:?}");
    }
}
