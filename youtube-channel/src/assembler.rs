//! Assembles a range of a playlist from its cursor-paginated listing.
//!
//! `playlistItems.list` can only be walked forward, one page token at a time, so
//! reaching entry `start` always costs the pages before it. Those pages are fetched for
//! their `nextPageToken` only: video details are requested solely for entries inside
//! the range, and no page past the one holding `end` is requested.

use crate::config::MissingItemPolicy;
use crate::youtube_api::{
    HttpAccessor, PAGE_SIZE, Playlist, PlaylistItemListResponse, YouTubeClient,
};
use futures::StreamExt;
use tracing::instrument;

/// The listing pages covering a range of 1-based playlist ordinals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct PageWindow {
    start: u32,
    end: u32,
    first_page: u32,
    last_page: u32,
}

impl PageWindow {
    /// Resolves `start..=end` against a playlist of `total_results` entries.
    ///
    /// An `end` that is absent or past the last entry means "through the last entry".
    /// Returns `None` if no entry of the playlist falls in the range.
    pub(crate) fn new(start: u32, end: Option<u32>, total_results: u32) -> Option<Self> {
        let start = start.max(1);
        let end = match end {
            Some(end) if end <= total_results => end,
            _ => total_results,
        };
        (start <= end).then(|| Self {
            start,
            end,
            first_page: page_of(start),
            last_page: page_of(end),
        })
    }

    /// Whether the entry at zero-based `position` is in the range.
    pub(crate) fn contains(&self, position: u32) -> bool {
        position >= self.start - 1 && position < self.end
    }
}

/// 1-based number of the page holding 1-based `ordinal`.
fn page_of(ordinal: u32) -> u32 {
    (ordinal - 1) / PAGE_SIZE + 1
}

/// Fetches one range of a playlist, page by page.
pub(crate) struct RangeAssembler<'a, H> {
    client: &'a YouTubeClient<H>,
    access_token: &'a str,
    detail_concurrency: usize,
    missing_item_policy: MissingItemPolicy,
}

impl<'a, H: HttpAccessor> RangeAssembler<'a, H> {
    pub(crate) fn new(
        client: &'a YouTubeClient<H>,
        access_token: &'a str,
        detail_concurrency: usize,
        missing_item_policy: MissingItemPolicy,
    ) -> Self {
        Self {
            client,
            access_token,
            detail_concurrency: detail_concurrency.max(1),
            missing_item_policy,
        }
    }

    /// Assembles entries `start..=end` (1-based) of `playlist_id`.
    ///
    /// Returns `None` if the first page cannot be fetched or is empty, or if a video is
    /// missing under [`MissingItemPolicy::Abort`]. A later page that cannot be fetched
    /// ends assembly early with whatever was collected up to that point.
    #[instrument(skip(self))]
    pub(crate) async fn assemble(
        &self,
        playlist_id: &str,
        start: u32,
        end: Option<u32>,
    ) -> Option<Playlist> {
        // Page 1 is needed regardless of the range: it carries the total and the
        // playlist's own ID, and every later page token descends from it.
        let mut page = self
            .client
            .list_playlist_items(playlist_id, self.access_token, None)
            .await?;
        let Some(first_item) = page.items.front() else {
            tracing::debug!("playlist has no items");
            return None;
        };
        let mut playlist = if first_item.snippet.playlist_id.is_empty() {
            Playlist::new(playlist_id)
        } else {
            Playlist::new(first_item.snippet.playlist_id.as_str())
        };

        let total_results = page.page_info.total_results;
        let Some(window) = PageWindow::new(start, end, total_results) else {
            tracing::debug!(total_results, "requested range holds no entries");
            return Some(playlist);
        };
        tracing::debug!(?window, total_results, "assembling playlist range");

        let mut page_number = 1;
        loop {
            if page_number < window.first_page {
                tracing::trace!(page_number, "page precedes requested range");
            } else if let Err(e) = self.collect_page(&page, &window, &mut playlist).await {
                tracing::warn!(page_number, "abandoning playlist: {e:#}");
                return None;
            }

            if page_number == window.last_page {
                break;
            }
            let Some(page_token) = page.next_page_token.take() else {
                tracing::debug!(page_number, "listing ended before the requested range did");
                break;
            };

            page_number += 1;
            match self
                .client
                .list_playlist_items(playlist_id, self.access_token, Some(&page_token))
                .await
            {
                Some(next) if !next.items.is_empty() => page = next,
                _ => {
                    tracing::warn!(
                        page_number,
                        assembled = playlist.len(),
                        "playlist page unavailable, returning partial playlist"
                    );
                    break;
                }
            }
        }

        tracing::debug!(assembled = playlist.len(), "assembled playlist range");
        Some(playlist)
    }

    /// Fetches details for the entries of `page` inside `window` and inserts them.
    async fn collect_page(
        &self,
        page: &PlaylistItemListResponse,
        window: &PageWindow,
        playlist: &mut Playlist,
    ) -> eyre::Result<()> {
        let client = self.client;
        let access_token = self.access_token;

        let selected = page
            .items
            .iter()
            .map(|item| &item.snippet)
            .filter(|snippet| window.contains(snippet.position));
        let fetched = futures::stream::iter(selected)
            .map(|snippet| async move {
                let video = client
                    .get_video(&snippet.resource_id.video_id, access_token)
                    .await;
                (snippet, video)
            })
            .buffered(self.detail_concurrency);
        let mut fetched = std::pin::pin!(fetched);

        while let Some((snippet, video)) = fetched.next().await {
            let position = snippet.position;
            let video_id = snippet.resource_id.video_id.as_str();
            match (video, self.missing_item_policy) {
                (Some(video), _) => {
                    playlist.insert(video, Some(position as usize));
                }
                (None, MissingItemPolicy::LeaveGap) => {
                    tracing::warn!(position, video_id, "video details unavailable, leaving gap");
                }
                (None, MissingItemPolicy::Abort) => {
                    eyre::bail!("video {video_id} at position {position} could not be fetched");
                }
            }
        }
        Ok(())
    }
}
