// src/lib.rs
//! notion-relay library: queries Notion databases on a caller's behalf and
//! returns a flattened JSON envelope.
//!
//! # Public API
//!
//! The library exposes types organized by concern:
//! - **Error handling**: `AppError`, `StatusClass`, `ValidationError`
//! - **Configuration**: `RelayConfig`, `CommandLineInput`
//! - **Domain types**: `AccessToken`, `DatabaseId`, `DataSourceId`, `PageId`, etc.
//! - **API client**: `UpstreamClient`, `NotionHttpClient`, parsers
//! - **Aggregation**: `DatabaseQueryAggregator`, `QueryRequest`, `QueryResult`
//! - **HTTP front end**: `router`, `serve`, `RelayState`

pub mod api;
pub mod config;
pub mod constants;
pub mod error;
pub mod page;
pub mod query;
pub mod server;
pub mod types;

// --- Error Handling ---
pub use crate::error::{AppError, NotionErrorCode, StatusClass};
pub use crate::types::ValidationError;

// --- Configuration ---
pub use crate::config::{CommandLineInput, RelayAction, RelayConfig};

// --- Domain Types ---
pub use crate::types::{
    AccessToken, DataSourceId, DatabaseId, NotionVersion, PageId, PageSize, ValidatedUrl,
};

// --- API Client ---
pub use crate::api::{
    client::ApiResponse,
    parser::{parse_database_response, parse_page_response, parse_query_response},
    responses::{CursorPage, DataSourceRef, DatabaseMetadata, PageRecord, RecordPage},
    NotionHttpClient, UpstreamClient,
};

// --- Aggregation ---
pub use crate::page::fetch_page;
pub use crate::query::{
    DatabaseQueryAggregator, PageRequest, QueryMode, QueryRequest, QueryResult, SourceResults,
};

// --- HTTP Front End ---
pub use crate::server::{router, serve, ErrorBody, RelayState};
