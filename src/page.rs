// src/page.rs
//! Single page retrieval, passed through unchanged.

use crate::api::responses::PageRecord;
use crate::api::UpstreamClient;
use crate::error::AppError;
use crate::query::PageRequest;

/// Fetches one page object on behalf of the caller.
pub async fn fetch_page(
    upstream: &dyn UpstreamClient,
    request: &PageRequest,
) -> Result<PageRecord, AppError> {
    log::info!("Retrieving page {}", request.page_id);
    upstream.retrieve_page(&request.token, &request.page_id).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::responses::{DatabaseMetadata, RecordPage};
    use crate::constants::PAGE_FETCH_FAILED;
    use crate::error::NotionErrorCode;
    use crate::types::{AccessToken, DataSourceId, DatabaseId, PageId, PageSize};
    use serde_json::json;

    struct OnePage;

    #[async_trait::async_trait]
    impl UpstreamClient for OnePage {
        async fn retrieve_database(
            &self,
            _token: &AccessToken,
            _id: &DatabaseId,
        ) -> Result<DatabaseMetadata, AppError> {
            unreachable!()
        }

        async fn query_data_source(
            &self,
            _token: &AccessToken,
            _id: &DataSourceId,
            _cursor: Option<&str>,
            _page_size: PageSize,
        ) -> Result<RecordPage, AppError> {
            unreachable!()
        }

        async fn query_database(
            &self,
            _token: &AccessToken,
            _id: &DatabaseId,
            _cursor: Option<&str>,
            _page_size: PageSize,
        ) -> Result<RecordPage, AppError> {
            unreachable!()
        }

        async fn retrieve_page(&self, _token: &AccessToken, id: &PageId) -> Result<PageRecord, AppError> {
            if id.as_str() == "p1" {
                Ok(PageRecord::new(json!({ "object": "page", "id": "p1", "archived": false })))
            } else {
                Err(AppError::upstream(
                    404,
                    NotionErrorCode::ObjectNotFound,
                    None,
                    PAGE_FETCH_FAILED,
                ))
            }
        }
    }

    fn request(page: &str) -> PageRequest {
        PageRequest::new(
            AccessToken::new("secret_test_token").unwrap(),
            PageId::parse(page).unwrap(),
        )
    }

    #[tokio::test]
    async fn test_page_is_returned_verbatim() {
        let page = fetch_page(&OnePage, &request("p1")).await.unwrap();
        assert_eq!(
            page.into_json(),
            json!({ "object": "page", "id": "p1", "archived": false })
        );
    }

    #[tokio::test]
    async fn test_missing_page_keeps_upstream_status() {
        let err = fetch_page(&OnePage, &request("p404")).await.unwrap_err();
        assert_eq!(err.status_class().http_status(), 404);
        assert_eq!(err.to_string(), PAGE_FETCH_FAILED);
    }
}
