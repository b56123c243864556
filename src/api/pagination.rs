// src/api/pagination.rs
//! Cursor-following pagination without BoxFuture.

use super::responses::PaginatedResponse;
use crate::constants::NOTION_API_PAGE_SIZE;
use crate::error::FetchError;

/// Fetches every page of a paginated listing.
///
/// Stops when the API reports no further results. Reaching `max_pages`
/// while `has_more` is still set fails with [`FetchError::PaginationLimit`]
/// so a long page is never silently cut short. A response that claims more
/// results without a cursor to reach them is malformed.
pub async fn fetch_all_pages<T, F, Fut>(
    listing: &str,
    mut fetch_fn: F,
    max_pages: u32,
) -> Result<Vec<T>, FetchError>
where
    F: FnMut(u32, Option<String>) -> Fut,
    Fut: std::future::Future<Output = Result<PaginatedResponse<T>, FetchError>>,
{
    let mut all_items = Vec::new();
    let mut cursor = None;
    let mut pages_fetched = 0u32;

    loop {
        if pages_fetched >= max_pages {
            log::warn!("Reached maximum page limit: {}", max_pages);
            return Err(FetchError::PaginationLimit { max_pages });
        }

        let response = fetch_fn(NOTION_API_PAGE_SIZE, cursor).await?;
        pages_fetched += 1;

        let has_more = response.has_more;
        cursor = response.next_cursor;
        all_items.extend(response.results);

        log::debug!(
            "Fetched result page {} ({} items so far, more: {})",
            pages_fetched,
            all_items.len(),
            has_more
        );

        if !has_more {
            break;
        }
        if cursor.is_none() {
            log::warn!("{} reported more results without a cursor", listing);
            return Err(FetchError::MalformedResponse {
                url: listing.to_string(),
                reason: "has_more without next_cursor".to_string(),
            });
        }
    }

    Ok(all_items)
}
