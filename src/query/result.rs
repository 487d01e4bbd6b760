// src/query/result.rs
//! The flattened envelope returned to callers.

use crate::api::responses::PageRecord;
use crate::types::DataSourceId;
use serde::{Deserialize, Serialize};

/// Records gathered from one data source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceResults {
    pub id: DataSourceId,
    pub results: Vec<PageRecord>,
}

/// Outcome of one aggregation call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryResult {
    /// Every record, in source-iteration order.
    pub results: Vec<PageRecord>,
    /// Per-source breakdown; empty in legacy mode.
    #[serde(default)]
    pub sources: Vec<SourceResults>,
}

impl QueryResult {
    /// Result of querying a database directly.
    pub fn legacy(results: Vec<PageRecord>) -> Self {
        Self {
            results,
            sources: Vec::new(),
        }
    }

    /// Flattens per-source results, keeping their order.
    pub fn from_sources(sources: Vec<SourceResults>) -> Self {
        let results = sources
            .iter()
            .flat_map(|source| source.results.iter().cloned())
            .collect();
        Self { results, sources }
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}
