//! Paged retrieval of a whole upstream collection.

use crate::config::FetchConfig;
use crate::glpi::{ItemType, RawRecord, SessionCredentials, Upstream, UpstreamError, Window};

/// Records requested per search page
pub const PAGE_SIZE: u64 = 20;

/// Ceiling on pages per fetch, in case the upstream never reports a reachable totalcount
pub const DEFAULT_MAX_PAGES: u64 = 10_000;

#[derive(Debug, Clone, Copy)]
pub struct FetchOptions {
    pub page_size: u64,
    pub max_pages: u64,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            page_size: PAGE_SIZE,
            max_pages: DEFAULT_MAX_PAGES,
        }
    }
}

impl From<&FetchConfig> for FetchOptions {
    fn from(config: &FetchConfig) -> Self {
        Self {
            page_size: config.page_size.max(1),
            max_pages: config.max_pages.max(1),
        }
    }
}

/// Retrieve every record of `item_type`, one page at a time.
///
/// The loop keeps requesting windows until the last one reaches `totalcount - 1`
/// as reported by the most recent page. A single failed page aborts the fetch and
/// nothing accumulated so far is returned.
pub async fn fetch_all<U>(
    upstream: &U,
    item_type: &ItemType,
    credentials: &SessionCredentials,
    options: &FetchOptions,
) -> Result<Vec<RawRecord>, UpstreamError>
where
    U: Upstream + ?Sized,
{
    let mut records = Vec::new();
    let mut window = Window::first(options.page_size);

    for page in 1..=options.max_pages {
        let result = upstream.search(item_type, window, credentials).await;
        let response = match result {
            Ok(response) => response,
            Err(e) => {
                tracing::error!("Fetching {} range {} failed: {}", item_type, window.to_range(), e);
                return Err(e);
            }
        };

        let received = response.data.len();
        records.extend(response.data);

        let remaining = response.totalcount.saturating_sub(window.end + 1);
        tracing::debug!(
            "{} page {} ({}): {} records, totalcount {}, {} remaining",
            item_type,
            page,
            window.to_range(),
            received,
            response.totalcount,
            remaining
        );

        if window.covers(response.totalcount) {
            tracing::info!("Fetched {} {} records in {} page(s)", records.len(), item_type, page);
            return Ok(records);
        }

        window = window.next();
    }

    tracing::error!("{} pagination exceeded {} pages", item_type, options.max_pages);
    Err(UpstreamError::PageLimitExceeded {
        pages: options.max_pages,
    })
}
