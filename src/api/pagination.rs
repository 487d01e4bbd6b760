// src/api/pagination.rs
//! Cursor pagination driven by plain async closures.

use super::responses::CursorPage;
use crate::error::AppError;
use crate::types::PageSize;

/// Everything a pagination loop collected.
#[derive(Debug, Clone, PartialEq)]
pub struct PaginationResult<T> {
    pub items: Vec<T>,
    pub pages_fetched: u32,
}

/// Fetches every page, one call at a time, until no cursor is returned.
///
/// The first call gets no cursor; each later call gets the cursor from the
/// call before it. Any failing call aborts the loop and the items gathered
/// so far are dropped.
pub async fn fetch_all_pages<T, F, Fut>(
    page_size: PageSize,
    mut fetch_fn: F,
) -> Result<PaginationResult<T>, AppError>
where
    F: FnMut(PageSize, Option<String>) -> Fut,
    Fut: std::future::Future<Output = Result<CursorPage<T>, AppError>>,
{
    let mut all_items = Vec::new();
    let mut cursor: Option<String> = None;
    let mut pages_fetched = 0u32;

    loop {
        let page = fetch_fn(page_size, cursor.clone()).await?;
        pages_fetched += 1;
        all_items.extend(page.results);

        match page.next_cursor {
            Some(next) if cursor.as_deref() == Some(next.as_str()) => {
                // Re-requesting the same cursor would duplicate records forever.
                return Err(AppError::MalformedResponse(format!(
                    "upstream returned cursor '{}' twice in a row",
                    next
                )));
            }
            Some(next) => cursor = Some(next),
            None => break,
        }
    }

    log::debug!(
        "Pagination finished: {} items over {} pages",
        all_items.len(),
        pages_fetched
    );

    Ok(PaginationResult {
        items: all_items,
        pages_fetched,
    })
}
