//! Domain constants that define the operational boundaries of the relay.
//!
//! Each constant is named for the domain concept it constrains, not its
//! technical role.

// ---------------------------------------------------------------------------
// Notion API boundaries
// ---------------------------------------------------------------------------

/// How many records the Notion API returns per page of query results.
///
/// The Notion API maximum is 100. We use the maximum to minimize
/// round-trips while paginating a data source.
pub const NOTION_API_PAGE_SIZE: u32 = 100;

/// Smallest page size the Notion API accepts.
pub const NOTION_API_MIN_PAGE_SIZE: u32 = 1;

/// Base URL of the public Notion REST API.
pub const NOTION_API_BASE_URL: &str = "https://api.notion.com/v1";

/// `Notion-Version` sent when none is configured.
///
/// Data sources only appear in database metadata from this version on.
pub const DEFAULT_NOTION_VERSION: &str = "2025-09-03";

// ---------------------------------------------------------------------------
// Fallback messages
// ---------------------------------------------------------------------------

/// Sent when database metadata cannot be fetched and Notion gave no message.
pub const DATABASE_FETCH_FAILED: &str = "DB fetch failed";

/// Sent when a query call fails and Notion gave no message.
pub const QUERY_FAILED: &str = "Notion error";

/// Sent when a page cannot be fetched and Notion gave no message.
pub const PAGE_FETCH_FAILED: &str = "Failed to fetch page";

// ---------------------------------------------------------------------------
// HTTP front end
// ---------------------------------------------------------------------------

/// Default bind address for `serve`.
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default port for `serve`.
pub const DEFAULT_PORT: u16 = 3000;

// ---------------------------------------------------------------------------
// Error display
// ---------------------------------------------------------------------------

/// Maximum characters shown when previewing unparseable response bodies.
pub const ERROR_BODY_PREVIEW_LENGTH: usize = 200;
