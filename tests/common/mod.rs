// tests/common/mod.rs
//! Shared fixtures: an in-memory Notion workspace implementing `UpstreamClient`.

#![allow(dead_code)]

use notion_relay::{
    AccessToken, AppError, CursorPage, DataSourceId, DataSourceRef, DatabaseId, DatabaseMetadata,
    NotionErrorCode, PageId, PageRecord, PageSize, RecordPage, UpstreamClient,
};
use serde_json::json;
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

/// One upstream call, as seen by the fake.
#[derive(Debug, Clone, PartialEq)]
pub enum UpstreamCall {
    RetrieveDatabase(String),
    QueryDataSource { id: String, cursor: Option<String> },
    QueryDatabase { id: String, cursor: Option<String> },
    RetrievePage(String),
}

/// In-memory workspace that serves records in pages of `page_size`.
pub struct FakeNotion {
    page_size: usize,
    databases: HashMap<String, Vec<String>>,
    records: HashMap<String, Vec<PageRecord>>,
    pages: HashMap<String, PageRecord>,
    failing: HashSet<String>,
    failing_at: HashMap<String, String>,
    calls: Mutex<Vec<UpstreamCall>>,
}

impl FakeNotion {
    pub fn new(page_size: usize) -> Self {
        Self {
            page_size,
            databases: HashMap::new(),
            records: HashMap::new(),
            pages: HashMap::new(),
            failing: HashSet::new(),
            failing_at: HashMap::new(),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Declares a database and its data sources (empty for legacy).
    pub fn with_database(mut self, id: &str, sources: &[&str]) -> Self {
        self.databases
            .insert(id.to_string(), sources.iter().map(|s| s.to_string()).collect());
        self
    }

    /// Records returned when querying `target` (a data source or legacy database).
    pub fn with_records(mut self, target: &str, ids: &[&str]) -> Self {
        self.records
            .insert(target.to_string(), ids.iter().map(|id| record(id)).collect());
        self
    }

    pub fn with_page(mut self, id: &str, page: serde_json::Value) -> Self {
        self.pages.insert(id.to_string(), PageRecord::new(page));
        self
    }

    /// Every query against `target` is rejected with HTTP 403.
    pub fn failing(mut self, target: &str) -> Self {
        self.failing.insert(target.to_string());
        self
    }

    /// Queries against `target` succeed until `cursor` is requested, which
    /// is rejected with HTTP 502.
    pub fn failing_at(mut self, target: &str, cursor: &str) -> Self {
        self.failing_at.insert(target.to_string(), cursor.to_string());
        self
    }

    pub fn calls(&self) -> Vec<UpstreamCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn query_calls(&self) -> usize {
        self.calls()
            .iter()
            .filter(|call| {
                matches!(
                    call,
                    UpstreamCall::QueryDataSource { .. } | UpstreamCall::QueryDatabase { .. }
                )
            })
            .count()
    }

    fn record_call(&self, call: UpstreamCall) {
        self.calls.lock().unwrap().push(call);
    }

    fn serve_page(&self, target: &str, cursor: Option<&str>) -> Result<RecordPage, AppError> {
        if self.failing.contains(target) {
            return Err(AppError::upstream(
                403,
                NotionErrorCode::RestrictedResource,
                Some(format!("Integration cannot access {}", target)),
                "Notion error",
            ));
        }

        if let (Some(bad), Some(requested)) = (self.failing_at.get(target), cursor) {
            if bad == requested {
                return Err(AppError::upstream(
                    502,
                    NotionErrorCode::HttpStatus(502),
                    None,
                    "Notion error",
                ));
            }
        }

        let all = self.records.get(target).cloned().unwrap_or_default();
        let start = match cursor {
            Some(c) => c
                .parse::<usize>()
                .map_err(|_| AppError::MalformedResponse(format!("bad cursor {}", c)))?,
            None => 0,
        };
        let end = (start + self.page_size).min(all.len());
        let chunk = all[start..end].to_vec();

        Ok(if end < all.len() {
            CursorPage::with_cursor(chunk, end.to_string())
        } else {
            CursorPage::last(chunk)
        })
    }
}

#[async_trait::async_trait]
impl UpstreamClient for FakeNotion {
    async fn retrieve_database(
        &self,
        _token: &AccessToken,
        id: &DatabaseId,
    ) -> Result<DatabaseMetadata, AppError> {
        self.record_call(UpstreamCall::RetrieveDatabase(id.to_string()));
        let sources = self.databases.get(id.as_str()).ok_or_else(|| {
            AppError::upstream(
                404,
                NotionErrorCode::ObjectNotFound,
                Some(format!("Could not find database with ID: {}", id)),
                "DB fetch failed",
            )
        })?;

        Ok(DatabaseMetadata::new(
            sources
                .iter()
                .map(|s| DataSourceRef::new(DataSourceId::parse(s).unwrap()))
                .collect(),
        ))
    }

    async fn query_data_source(
        &self,
        _token: &AccessToken,
        id: &DataSourceId,
        cursor: Option<&str>,
        _page_size: PageSize,
    ) -> Result<RecordPage, AppError> {
        self.record_call(UpstreamCall::QueryDataSource {
            id: id.to_string(),
            cursor: cursor.map(str::to_string),
        });
        self.serve_page(id.as_str(), cursor)
    }

    async fn query_database(
        &self,
        _token: &AccessToken,
        id: &DatabaseId,
        cursor: Option<&str>,
        _page_size: PageSize,
    ) -> Result<RecordPage, AppError> {
        self.record_call(UpstreamCall::QueryDatabase {
            id: id.to_string(),
            cursor: cursor.map(str::to_string),
        });
        self.serve_page(id.as_str(), cursor)
    }

    async fn retrieve_page(&self, _token: &AccessToken, id: &PageId) -> Result<PageRecord, AppError> {
        self.record_call(UpstreamCall::RetrievePage(id.to_string()));
        self.pages.get(id.as_str()).cloned().ok_or_else(|| {
            AppError::upstream(
                404,
                NotionErrorCode::ObjectNotFound,
                None,
                "Failed to fetch page",
            )
        })
    }
}

pub fn record(id: &str) -> PageRecord {
    PageRecord::new(json!({ "object": "page", "id": id }))
}

pub fn record_ids(records: &[PageRecord]) -> Vec<String> {
    records
        .iter()
        .filter_map(PageRecord::id)
        .map(str::to_string)
        .collect()
}

/// `db1` declares `s1` (2 records in one page) and `s2` (3 records, 2 + 1).
pub fn workspace() -> FakeNotion {
    FakeNotion::new(2)
        .with_database("db1", &["s1", "s2"])
        .with_records("s1", &["r1", "r2"])
        .with_records("s2", &["r3", "r4", "r5"])
}

/// `db2` declares no data sources; its 4 records come back in one page.
pub fn legacy_workspace() -> FakeNotion {
    FakeNotion::new(4)
        .with_database("db2", &[])
        .with_records("db2", &["d1", "d2", "d3", "d4"])
}
