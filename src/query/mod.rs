// src/query/mod.rs
//! Database query aggregation.
//!
//! Given a database id, the aggregator discovers the database's data
//! sources, decides which of them to query (see [`QueryMode`]), pages
//! through each one to completion and merges the records into a single
//! [`QueryResult`]. Calls are strictly sequential: one outstanding upstream
//! request at a time.

mod mode;
mod request;
mod result;

pub use mode::QueryMode;
pub use request::{
    PagePayload, PageRequest, QueryPayload, QueryRequest, PAGE_FIELDS_REQUIRED,
    QUERY_FIELDS_REQUIRED,
};
pub use result::{QueryResult, SourceResults};

use crate::api::pagination::fetch_all_pages;
use crate::api::responses::{DataSourceRef, PageRecord};
use crate::api::UpstreamClient;
use crate::error::AppError;
use crate::types::{AccessToken, DataSourceId, DatabaseId, PageSize};
use std::sync::Arc;

/// Runs aggregation calls against an upstream client.
///
/// Holds no per-call state; one aggregator can serve concurrent requests.
#[derive(Clone)]
pub struct DatabaseQueryAggregator {
    upstream: Arc<dyn UpstreamClient>,
    page_size: PageSize,
}

impl DatabaseQueryAggregator {
    pub fn new(upstream: Arc<dyn UpstreamClient>, page_size: PageSize) -> Self {
        Self {
            upstream,
            page_size,
        }
    }

    /// Queries a database and merges the records of every selected source.
    ///
    /// Metadata, single-source and legacy failures abort the call. In
    /// multi-source mode a source that Notion rejects is logged and left
    /// out; the other sources still contribute.
    pub async fn aggregate(&self, request: &QueryRequest) -> Result<QueryResult, AppError> {
        let metadata = self
            .upstream
            .retrieve_database(&request.token, &request.database_id)
            .await?;

        let mode = QueryMode::select(request.source_id.as_ref(), metadata)?;
        log::info!(
            "Querying database {} in {} mode",
            request.database_id,
            mode.name()
        );

        let result = match mode {
            QueryMode::SingleSource(source) => {
                let results = self.collect_source(&request.token, &source.id).await?;
                QueryResult::from_sources(vec![SourceResults {
                    id: source.id,
                    results,
                }])
            }
            QueryMode::MultiSource(sources) => {
                self.collect_all_sources(&request.token, sources).await?
            }
            QueryMode::Legacy => {
                let results = self
                    .collect_legacy(&request.token, &request.database_id)
                    .await?;
                QueryResult::legacy(results)
            }
        };

        log::info!(
            "Database {}: {} records from {} sources",
            request.database_id,
            result.len(),
            result.sources.len()
        );
        Ok(result)
    }

    async fn collect_all_sources(
        &self,
        token: &AccessToken,
        sources: Vec<DataSourceRef>,
    ) -> Result<QueryResult, AppError> {
        let mut collected = Vec::with_capacity(sources.len());

        for source in sources {
            match self.collect_source(token, &source.id).await {
                Ok(results) => collected.push(SourceResults {
                    id: source.id,
                    results,
                }),
                Err(e) if e.is_upstream() => {
                    log::warn!("Skipping data source {}: {}", source.id, e);
                }
                Err(e) => return Err(e),
            }
        }

        Ok(QueryResult::from_sources(collected))
    }

    async fn collect_source(
        &self,
        token: &AccessToken,
        id: &DataSourceId,
    ) -> Result<Vec<PageRecord>, AppError> {
        let upstream = Arc::clone(&self.upstream);
        let pagination = fetch_all_pages(self.page_size, |page_size, cursor| {
            let upstream = Arc::clone(&upstream);
            let token = token.clone();
            let id = id.clone();
            async move {
                upstream
                    .query_data_source(&token, &id, cursor.as_deref(), page_size)
                    .await
            }
        })
        .await?;

        log::debug!(
            "Data source {}: {} records over {} pages",
            id,
            pagination.items.len(),
            pagination.pages_fetched
        );
        Ok(pagination.items)
    }

    async fn collect_legacy(
        &self,
        token: &AccessToken,
        id: &DatabaseId,
    ) -> Result<Vec<PageRecord>, AppError> {
        let upstream = Arc::clone(&self.upstream);
        let pagination = fetch_all_pages(self.page_size, |page_size, cursor| {
            let upstream = Arc::clone(&upstream);
            let token = token.clone();
            let id = id.clone();
            async move {
                upstream
                    .query_database(&token, &id, cursor.as_deref(), page_size)
                    .await
            }
        })
        .await?;

        Ok(pagination.items)
    }
}
