//! YouTube Data API v3 client library.
//!
//! This module covers the read-only endpoints needed to inspect a channel and its
//! playlists:
//!
//! - `subscriptions.list`: whether the token owner subscribes to a channel
//! - `channels.list`: channel statistics (views, subscribers, videos)
//! - `videos.list`: the snippet of a single video, decoded into a [`videos::Video`]
//! - `playlistItems.list`: one page of playlist entries
//!
//! # Transport
//!
//! Requests go through an [`HttpAccessor`], which turns a URL and query parameters into
//! a decoded JSON body. [`ReqwestAccessor`] is the production implementation; tests
//! substitute their own. [`YouTubeClient`] builds the query parameters for each
//! endpoint and decodes bodies into the typed responses found in the submodules.
//!
//! # Pagination
//!
//! `playlistItems.list` pages hold at most [`client::PAGE_SIZE`] entries and can only be
//! walked forward: the token for page *n + 1* is in the response for page *n*. Each
//! entry reports its zero-based `position` within the playlist, which is what
//! [`playlists::Playlist`] is indexed by.

pub mod channels;
pub mod client;
pub mod playlists;
pub mod subscriptions;
pub mod types;
pub mod videos;

// Re-export main types for convenience
pub use client::{HttpAccessor, PAGE_SIZE, ReqwestAccessor, YouTubeClient};
pub use types::PageInfo;

pub use channels::{Channel, ChannelListResponse};
pub use playlists::{Playlist, PlaylistItem, PlaylistItemListResponse};
pub use subscriptions::{Subscription, SubscriptionListResponse};
pub use videos::{Thumbnail, Video, VideoListResponse};
