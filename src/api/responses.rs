// src/api/responses.rs
//! Wire shapes of the Notion responses the relay reads.
//!
//! Page records stay opaque JSON; only the fields the relay branches on
//! (`data_sources`, `next_cursor`, `has_more`) are typed.

use crate::types::DataSourceId;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub use notion_client::objects::error::Error as NotionError;

/// One row-equivalent item returned by a query, passed through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PageRecord(Value);

impl PageRecord {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    pub fn as_json(&self) -> &Value {
        &self.0
    }

    pub fn into_json(self) -> Value {
        self.0
    }

    /// The record's `id` field, when it has one.
    pub fn id(&self) -> Option<&str> {
        self.0.get("id").and_then(Value::as_str)
    }
}

/// One queryable source declared by a database.
///
/// Fields other than `id` and `name` are kept so they can be echoed back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataSourceRef {
    pub id: DataSourceId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl DataSourceRef {
    pub fn new(id: DataSourceId) -> Self {
        Self {
            id,
            name: None,
            extra: Map::new(),
        }
    }
}

/// Body of `GET /databases/{id}` as far as the relay cares.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseResponse {
    /// Absent on databases predating multi-source support.
    #[serde(default)]
    pub data_sources: Option<Vec<DataSourceRef>>,
}

/// Database metadata reduced to what mode selection needs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DatabaseMetadata {
    /// Declared sources in declaration order; empty means legacy.
    pub data_sources: Vec<DataSourceRef>,
}

impl DatabaseMetadata {
    pub fn new(data_sources: Vec<DataSourceRef>) -> Self {
        Self { data_sources }
    }

    /// The declared source that `candidate` refers to, if any.
    pub fn find_source(&self, candidate: &DataSourceId) -> Option<&DataSourceRef> {
        self.data_sources
            .iter()
            .find(|source| source.id.refers_to(candidate.as_str()))
    }
}

impl From<DatabaseResponse> for DatabaseMetadata {
    fn from(response: DatabaseResponse) -> Self {
        Self {
            data_sources: response.data_sources.unwrap_or_default(),
        }
    }
}

/// Generic paginated response wrapper
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginatedResponse<T> {
    #[serde(default)]
    pub object: String,
    #[serde(default = "Vec::new")]
    pub results: Vec<T>,
    #[serde(default)]
    pub next_cursor: Option<String>,
    #[serde(default)]
    pub has_more: bool,
}

/// One page of results plus the cursor for the next one.
#[derive(Debug, Clone, PartialEq)]
pub struct CursorPage<T> {
    pub results: Vec<T>,
    /// `None` once the upstream reports no more results.
    pub next_cursor: Option<String>,
}

impl<T> CursorPage<T> {
    pub fn last(results: Vec<T>) -> Self {
        Self {
            results,
            next_cursor: None,
        }
    }

    pub fn with_cursor(results: Vec<T>, cursor: impl Into<String>) -> Self {
        Self {
            results,
            next_cursor: Some(cursor.into()),
        }
    }
}

impl<T> From<PaginatedResponse<T>> for CursorPage<T> {
    fn from(response: PaginatedResponse<T>) -> Self {
        // A cursor without has_more (or the reverse) is treated as the end.
        let next_cursor = if response.has_more {
            response.next_cursor
        } else {
            None
        };
        Self {
            results: response.results,
            next_cursor,
        }
    }
}

/// A page of query results.
pub type RecordPage = CursorPage<PageRecord>;

/// Database query / data source query response body.
pub type QueryResponse = PaginatedResponse<PageRecord>;
