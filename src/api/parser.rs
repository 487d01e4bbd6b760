// src/api/parser.rs
//! Turns raw Notion HTTP responses into typed values or classified errors.

use super::client::ApiResponse;
use super::responses::{
    DatabaseMetadata, DatabaseResponse, NotionError, PageRecord, QueryResponse, RecordPage,
};
use crate::constants::{
    DATABASE_FETCH_FAILED, ERROR_BODY_PREVIEW_LENGTH, PAGE_FETCH_FAILED, QUERY_FAILED,
};
use crate::error::{AppError, NotionErrorCode};
use serde_json::Value;

/// Parse any Notion API response.
///
/// Non-success statuses become [`AppError::Upstream`] carrying the HTTP
/// status; `fallback` is used when Notion did not say what went wrong.
pub fn parse_api_response<T>(result: ApiResponse<String>, fallback: &str) -> Result<T, AppError>
where
    T: serde::de::DeserializeOwned,
{
    if result.status.is_success() {
        parse_success(&result.data, &result.url)
    } else {
        Err(parse_error(&result.data, result.status.as_u16(), &result.url, fallback))
    }
}

fn parse_success<T>(body: &str, url: &str) -> Result<T, AppError>
where
    T: serde::de::DeserializeOwned,
{
    serde_json::from_str(body).map_err(|e| {
        log::error!("Failed to parse response from {}: {}", url, e);
        AppError::MalformedResponse(format!("{} (body: {})", e, preview(body)))
    })
}

/// Classifies an error body.
///
/// Well-formed Notion error objects keep their code and message. Partial
/// bodies still contribute a `message` when they have one.
fn parse_error(body: &str, status: u16, url: &str, fallback: &str) -> AppError {
    if let Ok(notion_error) = serde_json::from_str::<NotionError>(body) {
        log::debug!(
            "Notion error from {}: {} (request {:?})",
            url,
            notion_error.code,
            notion_error.request_id
        );
        return AppError::upstream(
            status,
            NotionErrorCode::from_api_response(&notion_error.code),
            Some(notion_error.message),
            fallback,
        );
    }

    let message = serde_json::from_str::<Value>(body).ok().and_then(|json| {
        json.get("message")
            .and_then(Value::as_str)
            .map(str::to_string)
    });
    log::debug!("Unstructured error from {} (HTTP {}): {}", url, status, preview(body));

    AppError::upstream(
        status,
        NotionErrorCode::from_http_status(status),
        message,
        fallback,
    )
}

fn preview(body: &str) -> String {
    if body.chars().count() > ERROR_BODY_PREVIEW_LENGTH {
        let head: String = body.chars().take(ERROR_BODY_PREVIEW_LENGTH).collect();
        format!("{}...", head)
    } else {
        body.to_string()
    }
}

/// Parse a database metadata response.
pub fn parse_database_response(result: ApiResponse<String>) -> Result<DatabaseMetadata, AppError> {
    let database: DatabaseResponse = parse_api_response(result, DATABASE_FETCH_FAILED)?;
    Ok(database.into())
}

/// Parse one page of a data source or legacy database query.
pub fn parse_query_response(result: ApiResponse<String>) -> Result<RecordPage, AppError> {
    let response: QueryResponse = parse_api_response(result, QUERY_FAILED)?;
    Ok(response.into())
}

/// Parse a single page object.
pub fn parse_page_response(result: ApiResponse<String>) -> Result<PageRecord, AppError> {
    parse_api_response(result, PAGE_FETCH_FAILED)
}
