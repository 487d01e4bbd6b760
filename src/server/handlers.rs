// src/server/handlers.rs
//! Endpoint handlers.

use super::response::method_not_allowed;
use super::RelayState;
use crate::api::responses::PageRecord;
use crate::error::AppError;
use crate::query::{PageRequest, QueryRequest, QueryResult};
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;

/// `/api/notion`: aggregate a database's records.
pub async fn query_database(
    State(state): State<RelayState>,
    method: Method,
    body: Bytes,
) -> Response {
    if let Some(early) = preflight(&method) {
        return early;
    }

    match run_query(&state, &body).await {
        Ok(result) => Json(result).into_response(),
        Err(e) => e.into_response(),
    }
}

/// `/api/notion-page`: fetch one page.
pub async fn fetch_page(State(state): State<RelayState>, method: Method, body: Bytes) -> Response {
    if let Some(early) = preflight(&method) {
        return early;
    }

    match run_page(&state, &body).await {
        Ok(page) => Json(page).into_response(),
        Err(e) => e.into_response(),
    }
}

async fn run_query(state: &RelayState, body: &[u8]) -> Result<QueryResult, AppError> {
    let request = QueryRequest::from_json(body)?;
    state.aggregator.aggregate(&request).await
}

async fn run_page(state: &RelayState, body: &[u8]) -> Result<PageRecord, AppError> {
    let request = PageRequest::from_json(body)?;
    crate::page::fetch_page(state.upstream.as_ref(), &request).await
}

/// Answers `OPTIONS` and rejects anything but `POST`.
fn preflight(method: &Method) -> Option<Response> {
    if *method == Method::OPTIONS {
        Some(StatusCode::OK.into_response())
    } else if *method != Method::POST {
        Some(method_not_allowed())
    } else {
        None
    }
}
