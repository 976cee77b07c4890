//! YouTube Subscriptions API types.

use serde::{Deserialize, Serialize};

/// Response structure for the `subscriptions.list` API call.
///
/// See: <https://developers.google.com/youtube/v3/docs/subscriptions/list>
#[derive(Debug, Serialize, Deserialize)]
pub struct SubscriptionListResponse {
    /// The subscriptions that match the request criteria.
    #[serde(default)]
    pub items: Vec<Subscription>,
}

/// A `subscription` resource.
///
/// Only presence matters to this crate, so every field is optional.
///
/// See: <https://developers.google.com/youtube/v3/docs/subscriptions#resource>
#[derive(Debug, Serialize, Deserialize)]
pub struct Subscription {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub snippet: Option<SubscriptionSnippet>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SubscriptionSnippet {
    /// The subscription's title.
    #[serde(default)]
    pub title: String,
}
