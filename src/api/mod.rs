// src/api/mod.rs
//! Notion API interaction: the calls the relay makes on a caller's behalf.
//!
//! Business logic depends on the [`UpstreamClient`] trait, never on HTTP
//! details, so the aggregator can be driven by an in-memory upstream in
//! tests and benchmarks.

pub mod client;
pub mod pagination;
pub mod parser;
pub mod responses;

use crate::error::AppError;
use crate::types::{AccessToken, DataSourceId, DatabaseId, PageId, PageSize};
use responses::{DatabaseMetadata, PageRecord, RecordPage};

/// The calls the relay needs from a Notion-like API.
///
/// Implementations hold no per-caller state: the token is passed on every
/// call, and independent aggregations may use one client concurrently.
#[async_trait::async_trait]
pub trait UpstreamClient: Send + Sync {
    /// `GET /databases/{id}`
    async fn retrieve_database(
        &self,
        token: &AccessToken,
        id: &DatabaseId,
    ) -> Result<DatabaseMetadata, AppError>;

    /// `POST /data_sources/{id}/query`
    async fn query_data_source(
        &self,
        token: &AccessToken,
        id: &DataSourceId,
        cursor: Option<&str>,
        page_size: PageSize,
    ) -> Result<RecordPage, AppError>;

    /// `POST /databases/{id}/query`, used for databases without data sources.
    async fn query_database(
        &self,
        token: &AccessToken,
        id: &DatabaseId,
        cursor: Option<&str>,
        page_size: PageSize,
    ) -> Result<RecordPage, AppError>;

    /// `GET /pages/{id}`
    async fn retrieve_page(&self, token: &AccessToken, id: &PageId) -> Result<PageRecord, AppError>;
}

// Re-export the public interface
pub use client::NotionHttpClient;
pub use responses::{CursorPage, DataSourceRef};
