// src/query/mode.rs
//! The three-way decision between single-source, multi-source and legacy
//! querying.

use crate::api::responses::{DataSourceRef, DatabaseMetadata};
use crate::error::AppError;
use crate::types::DataSourceId;

/// How a database is queried.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryMode {
    /// The caller picked one declared source.
    SingleSource(DataSourceRef),
    /// Every declared source, in declaration order.
    MultiSource(Vec<DataSourceRef>),
    /// The database declares no sources; query it directly.
    Legacy,
}

impl QueryMode {
    /// Picks the mode for a request.
    ///
    /// A requested source must be declared by the database, even when the
    /// database declares none at all; otherwise the call fails before any
    /// query is issued.
    pub fn select(
        requested: Option<&DataSourceId>,
        metadata: DatabaseMetadata,
    ) -> Result<Self, AppError> {
        if let Some(requested) = requested {
            return match metadata.find_source(requested) {
                Some(source) => Ok(Self::SingleSource(source.clone())),
                None => Err(AppError::SourceNotFound {
                    source_id: requested.to_string(),
                }),
            };
        }

        if metadata.data_sources.is_empty() {
            Ok(Self::Legacy)
        } else {
            Ok(Self::MultiSource(metadata.data_sources))
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::SingleSource(_) => "single-source",
            Self::MultiSource(_) => "multi-source",
            Self::Legacy => "legacy",
        }
    }
}
