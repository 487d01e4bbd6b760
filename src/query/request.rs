// src/query/request.rs
//! Validation of incoming query and page requests.

use crate::types::{AccessToken, DataSourceId, DatabaseId, PageId, ValidationError};
use serde::Deserialize;

/// Reported when the token or database id is absent or blank.
pub const QUERY_FIELDS_REQUIRED: &str = "token & databaseId required";

/// Reported when the token or page id is absent or blank.
pub const PAGE_FIELDS_REQUIRED: &str = "Missing token or pageId";

/// Query request body as sent by clients. Unknown fields are ignored.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryPayload {
    #[serde(default, alias = "accessToken")]
    pub token: Option<String>,
    #[serde(default)]
    pub database_id: Option<String>,
    #[serde(default)]
    pub source_id: Option<String>,
}

/// Page request body as sent by clients.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PagePayload {
    #[serde(default, alias = "accessToken")]
    pub token: Option<String>,
    #[serde(default)]
    pub page_id: Option<String>,
}

/// A validated aggregation request.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryRequest {
    pub token: AccessToken,
    pub database_id: DatabaseId,
    pub source_id: Option<DataSourceId>,
}

impl QueryRequest {
    pub fn new(token: AccessToken, database_id: DatabaseId, source_id: Option<DataSourceId>) -> Self {
        Self {
            token,
            database_id,
            source_id,
        }
    }

    /// Parses a raw JSON body.
    pub fn from_json(body: &[u8]) -> Result<Self, ValidationError> {
        let payload: QueryPayload = parse_body(body)?;
        Self::from_payload(payload)
    }

    /// Validates a deserialized payload.
    pub fn from_payload(payload: QueryPayload) -> Result<Self, ValidationError> {
        let token = required(payload.token).ok_or(ValidationError::MissingFields(QUERY_FIELDS_REQUIRED));
        let database_id =
            required(payload.database_id).ok_or(ValidationError::MissingFields(QUERY_FIELDS_REQUIRED));
        let (token, database_id) = (token?, database_id?);

        let source_id = match payload.source_id {
            None => None,
            Some(raw) if raw.trim().is_empty() => {
                return Err(ValidationError::EmptyField("sourceId"));
            }
            Some(raw) => Some(DataSourceId::parse(&raw)?),
        };

        Ok(Self {
            token: AccessToken::new(token)?,
            database_id: DatabaseId::parse(&database_id)?,
            source_id,
        })
    }
}

/// A validated page fetch request.
#[derive(Debug, Clone, PartialEq)]
pub struct PageRequest {
    pub token: AccessToken,
    pub page_id: PageId,
}

impl PageRequest {
    pub fn new(token: AccessToken, page_id: PageId) -> Self {
        Self { token, page_id }
    }

    pub fn from_json(body: &[u8]) -> Result<Self, ValidationError> {
        let payload: PagePayload = parse_body(body)?;
        Self::from_payload(payload)
    }

    pub fn from_payload(payload: PagePayload) -> Result<Self, ValidationError> {
        let token = required(payload.token).ok_or(ValidationError::MissingFields(PAGE_FIELDS_REQUIRED))?;
        let page_id =
            required(payload.page_id).ok_or(ValidationError::MissingFields(PAGE_FIELDS_REQUIRED))?;

        Ok(Self {
            token: AccessToken::new(token)?,
            page_id: PageId::parse(&page_id)?,
        })
    }
}

/// An empty body counts as `{}` so the missing-field message wins.
fn parse_body<T>(body: &[u8]) -> Result<T, ValidationError>
where
    T: serde::de::DeserializeOwned + Default,
{
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }
    serde_json::from_slice(body).map_err(|e| ValidationError::MalformedBody(e.to_string()))
}

fn required(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
