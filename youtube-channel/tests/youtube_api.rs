//! End-to-end tests of `ChannelManager` over HTTP against a mock YouTube API server.

use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};
use youtube_channel::{ChannelConfig, ChannelManager, HttpAccessor, ReqwestAccessor};

const PLAYLIST: &str = "PLwire";

fn manager(server: &MockServer) -> ChannelManager<ReqwestAccessor> {
    let config = ChannelConfig {
        api_base: format!("{}/youtube/v3", server.uri()),
        ..ChannelConfig::new("UC123")
    };
    ChannelManager::new(config, ReqwestAccessor::default())
}

fn playlist_page(positions: std::ops::Range<u32>, total: u32, next: Option<&str>) -> Value {
    let items: Vec<Value> = positions
        .map(|position| {
            json!({
                "kind": "youtube#playlistItem",
                "snippet": {
                    "playlistId": PLAYLIST,
                    "position": position,
                    "resourceId": { "kind": "youtube#video", "videoId": format!("vid{position}") }
                }
            })
        })
        .collect();
    let mut body = json!({
        "kind": "youtube#playlistItemListResponse",
        "items": items,
        "pageInfo": { "totalResults": total, "resultsPerPage": 50 }
    });
    if let Some(next) = next {
        body["nextPageToken"] = json!(next);
    }
    body
}

fn video_body(id: &str) -> Value {
    json!({
        "kind": "youtube#videoListResponse",
        "items": [{
            "id": id,
            "snippet": {
                "channelId": "UC123",
                "channelTitle": "Wire Channel",
                "categoryId": "28",
                "publishedAt": "2023-05-17T12:00:00Z",
                "title": format!("Title of {id}"),
                "description": "",
                "thumbnails": {},
                "tags": ["wire"]
            }
        }]
    })
}

#[tokio::test]
async fn statistics_over_http() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/youtube/v3/channels"))
        .and(query_param("part", "statistics"))
        .and(query_param("id", "UC123"))
        .and(query_param("access_token", "tok"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "kind": "youtube#channelListResponse",
            "items": [{
                "id": "UC123",
                "statistics": {
                    "viewCount": "1234567",
                    "subscriberCount": "999",
                    "hiddenSubscriberCount": false,
                    "videoCount": "42"
                }
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let statistics = manager(&server).channel_statistics(Some("tok")).await.unwrap();

    assert_eq!(statistics["viewCount"], "1,2M");
    assert_eq!(statistics["subscriberCount"], "999");
    assert_eq!(statistics["videoCount"], "42");
    assert_eq!(statistics.len(), 3);
}

#[tokio::test]
async fn subscription_over_http() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/youtube/v3/subscriptions"))
        .and(query_param("mine", "true"))
        .and(query_param("forChannelId", "UC123"))
        .and(query_param("access_token", "subscriber"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [{ "kind": "youtube#subscription", "id": "abc" }]
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/youtube/v3/subscriptions"))
        .and(query_param("access_token", "stranger"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "items": [] })))
        .mount(&server)
        .await;

    let yt = manager(&server);
    assert_eq!(yt.is_user_subscribed(Some("subscriber")).await, Some(true));
    assert_eq!(yt.is_user_subscribed(Some("stranger")).await, Some(false));
}

#[tokio::test]
async fn error_status_with_json_body_is_unknown() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/youtube/v3/subscriptions"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": {
                "code": 401,
                "message": "Request had invalid authentication credentials.",
                "errors": [{ "reason": "authError" }]
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    assert_eq!(manager(&server).is_user_subscribed(Some("expired")).await, None);
}

#[tokio::test]
async fn non_json_failure_is_none() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/youtube/v3/videos"))
        .respond_with(ResponseTemplate::new(502).set_body_string("<html>Bad Gateway</html>"))
        .mount(&server)
        .await;

    let accessor = ReqwestAccessor::default();
    let body = accessor
        .get(&format!("{}/youtube/v3/videos", server.uri()), &[("id", "x")])
        .await;
    assert_eq!(body, None);

    assert_eq!(manager(&server).video("x", Some("tok")).await, None);
}

#[tokio::test]
async fn unreachable_server_is_none() {
    let config = ChannelConfig {
        // nothing listens on the discard port
        api_base: "http://127.0.0.1:9/youtube/v3".to_string(),
        ..ChannelConfig::new("UC123")
    };
    let yt = ChannelManager::new(config, ReqwestAccessor::default());
    assert_eq!(yt.channel_statistics(Some("tok")).await, None);
}

#[tokio::test]
async fn playlist_range_across_pages() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/youtube/v3/playlistItems"))
        .and(query_param("playlistId", PLAYLIST))
        .and(query_param("maxResults", "50"))
        .and(query_param("pageToken", ""))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(playlist_page(0..50, 55, Some("CDIQAA"))),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/youtube/v3/playlistItems"))
        .and(query_param("playlistId", PLAYLIST))
        .and(query_param("pageToken", "CDIQAA"))
        .respond_with(ResponseTemplate::new(200).set_body_json(playlist_page(50..55, 55, None)))
        .expect(1)
        .mount(&server)
        .await;
    for position in 48..52 {
        let id = format!("vid{position}");
        Mock::given(method("GET"))
            .and(path("/youtube/v3/videos"))
            .and(query_param("part", "snippet"))
            .and(query_param("id", id.as_str()))
            .respond_with(ResponseTemplate::new(200).set_body_json(video_body(&id)))
            .expect(1)
            .mount(&server)
            .await;
    }

    let playlist = manager(&server)
        .playlist(PLAYLIST, Some("tok"), 49, Some(52))
        .await
        .unwrap();

    assert_eq!(playlist.id(), PLAYLIST);
    assert_eq!(
        playlist.positions().collect::<Vec<_>>(),
        [(48, "vid48"), (49, "vid49"), (50, "vid50"), (51, "vid51")]
    );
    let video = playlist.get("vid50").unwrap();
    assert_eq!(video.title(), "Title of vid50");
    assert_eq!(video.tags(), ["wire"]);
}

#[tokio::test]
async fn playlist_page_failure_keeps_first_page() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/youtube/v3/playlistItems"))
        .and(query_param("pageToken", ""))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(playlist_page(0..50, 60, Some("CDIQAA"))),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/youtube/v3/playlistItems"))
        .and(query_param("pageToken", "CDIQAA"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "error": { "code": 500, "message": "Backend Error" }
        })))
        .expect(1)
        .mount(&server)
        .await;
    for position in 45..50 {
        let id = format!("vid{position}");
        Mock::given(method("GET"))
            .and(path("/youtube/v3/videos"))
            .and(query_param("id", id.as_str()))
            .respond_with(ResponseTemplate::new(200).set_body_json(video_body(&id)))
            .mount(&server)
            .await;
    }

    let playlist = manager(&server)
        .playlist(PLAYLIST, Some("tok"), 46, None)
        .await
        .unwrap();

    assert_eq!(
        playlist.positions().map(|(p, _)| p).collect::<Vec<_>>(),
        [45, 46, 47, 48, 49]
    );
}
