// src/api/client.rs
//! HTTP client for the Notion API.
//!
//! This module wraps reqwest for the handful of endpoints the relay calls.
//! The caller's bearer token travels with each request, so one client can
//! serve any number of concurrent callers without session state.

use super::parser::{parse_database_response, parse_page_response, parse_query_response};
use super::responses::{DatabaseMetadata, PageRecord, RecordPage};
use crate::error::AppError;
use crate::types::{
    AccessToken, DataSourceId, DatabaseId, NotionVersion, PageId, PageSize, ValidatedUrl,
    ValidationError,
};
use reqwest::{header, Client, Response};
use serde::Serialize;

/// A thin wrapper around reqwest Client for Notion API requests.
#[derive(Clone)]
pub struct NotionHttpClient {
    client: Client,
    base_url: ValidatedUrl,
}

impl NotionHttpClient {
    /// Creates a client that talks to `base_url` with the given API version.
    pub fn new(base_url: ValidatedUrl, version: &NotionVersion) -> Result<Self, AppError> {
        let client = Client::builder()
            .default_headers(Self::create_headers(version)?)
            .build()?;
        Ok(Self { client, base_url })
    }

    /// Creates the headers shared by every request.
    fn create_headers(version: &NotionVersion) -> Result<header::HeaderMap, AppError> {
        let mut headers = header::HeaderMap::new();

        headers.insert(
            "Notion-Version",
            header::HeaderValue::from_str(version.as_str())
                .map_err(|_| ValidationError::InvalidVersion(version.to_string()))?,
        );

        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );

        Ok(headers)
    }

    fn authorization(token: &AccessToken) -> Result<header::HeaderValue, AppError> {
        let mut value = header::HeaderValue::from_str(&format!("Bearer {}", token.as_str()))
            .map_err(|e| ValidationError::InvalidAccessToken {
                reason: e.to_string(),
            })?;
        value.set_sensitive(true);
        Ok(value)
    }

    /// Makes a GET request to the specified endpoint.
    ///
    /// # Arguments
    ///
    /// * `token` - The caller's bearer token
    /// * `segments` - Path segments under the base URL, each percent-encoded
    pub async fn get(&self, token: &AccessToken, segments: &[&str]) -> Result<Response, AppError> {
        let url = self.base_url.endpoint(segments)?;
        log::debug!("GET {}", url);

        let response = self
            .client
            .get(url.as_str())
            .header(header::AUTHORIZATION, Self::authorization(token)?)
            .send()
            .await?;

        log::debug!("GET {} -> {}", url, response.status());
        Ok(response)
    }

    /// Makes a POST request with JSON body to the specified endpoint.
    ///
    /// # Arguments
    ///
    /// * `token` - The caller's bearer token
    /// * `segments` - Path segments under the base URL, each percent-encoded
    /// * `body` - The request body to serialize as JSON
    pub async fn post<T: Serialize>(
        &self,
        token: &AccessToken,
        segments: &[&str],
        body: &T,
    ) -> Result<Response, AppError> {
        let url = self.base_url.endpoint(segments)?;
        log::debug!("POST {}", url);

        let response = self
            .client
            .post(url.as_str())
            .header(header::AUTHORIZATION, Self::authorization(token)?)
            .json(body)
            .send()
            .await?;

        log::debug!("POST {} -> {}", url, response.status());
        Ok(response)
    }

    async fn query(
        &self,
        token: &AccessToken,
        segments: &[&str],
        cursor: Option<&str>,
        page_size: PageSize,
    ) -> Result<RecordPage, AppError> {
        let body = QueryBody {
            page_size,
            start_cursor: cursor,
        };
        let response = self.post(token, segments, &body).await?;
        let result = extract_response_text(response).await?;
        parse_query_response(result)
    }
}

/// Body of a query call. Filters and sorts are never sent.
#[derive(Debug, Serialize)]
struct QueryBody<'a> {
    page_size: PageSize,
    #[serde(skip_serializing_if = "Option::is_none")]
    start_cursor: Option<&'a str>,
}

#[async_trait::async_trait]
impl super::UpstreamClient for NotionHttpClient {
    async fn retrieve_database(
        &self,
        token: &AccessToken,
        id: &DatabaseId,
    ) -> Result<DatabaseMetadata, AppError> {
        let response = self.get(token, &["databases", id.as_str()]).await?;
        let result = extract_response_text(response).await?;
        parse_database_response(result)
    }

    async fn query_data_source(
        &self,
        token: &AccessToken,
        id: &DataSourceId,
        cursor: Option<&str>,
        page_size: PageSize,
    ) -> Result<RecordPage, AppError> {
        self.query(token, &["data_sources", id.as_str(), "query"], cursor, page_size)
            .await
    }

    async fn query_database(
        &self,
        token: &AccessToken,
        id: &DatabaseId,
        cursor: Option<&str>,
        page_size: PageSize,
    ) -> Result<RecordPage, AppError> {
        self.query(token, &["databases", id.as_str(), "query"], cursor, page_size)
            .await
    }

    async fn retrieve_page(&self, token: &AccessToken, id: &PageId) -> Result<PageRecord, AppError> {
        let response = self.get(token, &["pages", id.as_str()]).await?;
        let result = extract_response_text(response).await?;
        parse_page_response(result)
    }
}

/// Result of an HTTP operation with response metadata.
#[derive(Debug)]
pub struct ApiResponse<T> {
    pub data: T,
    pub status: reqwest::StatusCode,
    pub url: String,
}

/// Extracts the response body as text with metadata.
pub async fn extract_response_text(response: Response) -> Result<ApiResponse<String>, AppError> {
    let status = response.status();
    let url = response.url().to_string();
    let text = response.text().await?;

    Ok(ApiResponse {
        data: text,
        status,
        url,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_body_omits_missing_cursor() {
        let first = QueryBody {
            page_size: PageSize::default(),
            start_cursor: None,
        };
        assert_eq!(
            serde_json::to_value(&first).unwrap(),
            serde_json::json!({ "page_size": 100 })
        );

        let next = QueryBody {
            page_size: PageSize::new(25).unwrap(),
            start_cursor: Some("cursor-2"),
        };
        assert_eq!(
            serde_json::to_value(&next).unwrap(),
            serde_json::json!({ "page_size": 25, "start_cursor": "cursor-2" })
        );
    }

    #[test]
    fn test_authorization_header_is_sensitive() {
        let token = AccessToken::new("secret_abcdefghijklmnopqrs").unwrap();
        let value = NotionHttpClient::authorization(&token).unwrap();
        assert!(value.is_sensitive());
        assert_eq!(value.to_str().unwrap(), "Bearer secret_abcdefghijklmnopqrs");
    }

    #[test]
    fn test_client_builds_with_configured_version() {
        let base = ValidatedUrl::parse("http://localhost:9").unwrap();
        let version = NotionVersion::new("2022-06-28").unwrap();
        assert!(NotionHttpClient::new(base, &version).is_ok());
    }
}
