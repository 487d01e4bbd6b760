// src/config.rs
use crate::constants::{
    DEFAULT_HOST, DEFAULT_NOTION_VERSION, DEFAULT_PORT, NOTION_API_BASE_URL, NOTION_API_PAGE_SIZE,
};
use crate::error::AppError;
use crate::query::{PageRequest, QueryRequest};
use crate::types::{
    AccessToken, DataSourceId, DatabaseId, NotionVersion, PageId, PageSize, ValidatedUrl,
};
use clap::{Parser, Subcommand};

/// Environment variable holding the token for `query` and `page`.
pub const TOKEN_ENV: &str = "NOTION_API_KEY";

/// Environment variable overriding the `Notion-Version` header.
pub const VERSION_ENV: &str = "NOTION_VERSION";

/// Parsed command-line input.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct CommandLineInput {
    #[command(subcommand)]
    pub command: RelayCommand,

    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true, default_value_t = false)]
    pub verbose: bool,

    /// Notion-Version header to send (defaults to $NOTION_VERSION, then 2025-09-03)
    #[arg(long, global = true)]
    pub notion_version: Option<String>,

    /// Base URL of the Notion API
    #[arg(long, global = true, default_value = NOTION_API_BASE_URL)]
    pub api_base_url: String,

    /// Records requested per query call (1-100)
    #[arg(long, global = true, default_value_t = NOTION_API_PAGE_SIZE)]
    pub page_size: u32,
}

#[derive(Subcommand, Debug)]
pub enum RelayCommand {
    /// Query a database, across its data sources when it has any
    Query {
        /// Database ID
        database_id: String,

        /// Only query this data source
        #[arg(short, long)]
        source: Option<String>,

        /// Integration token (defaults to $NOTION_API_KEY)
        #[arg(long)]
        token: Option<String>,
    },

    /// Fetch a single page
    Page {
        /// Page ID
        page_id: String,

        /// Integration token (defaults to $NOTION_API_KEY)
        #[arg(long)]
        token: Option<String>,
    },

    /// Serve the relay endpoints over HTTP
    Serve {
        /// Address to bind
        #[arg(long, default_value = DEFAULT_HOST)]
        host: String,

        /// Port to bind
        #[arg(long, default_value_t = DEFAULT_PORT)]
        port: u16,
    },
}

/// What the binary was asked to do, with its inputs validated.
#[derive(Debug, Clone, PartialEq)]
pub enum RelayAction {
    Query(QueryRequest),
    Page(PageRequest),
    Serve { addr: String },
}

/// Resolved relay configuration shared by every action.
#[derive(Debug, Clone, PartialEq)]
pub struct RelayConfig {
    pub api_base_url: ValidatedUrl,
    pub notion_version: NotionVersion,
    pub page_size: PageSize,
    pub verbose: bool,
}

impl RelayConfig {
    /// Resolves configuration and action from CLI input and the process environment.
    pub fn resolve(cli: CommandLineInput) -> Result<(Self, RelayAction), AppError> {
        Self::resolve_with(cli, |name| std::env::var(name).ok())
    }

    /// Like [`RelayConfig::resolve`], reading variables through `env`.
    pub fn resolve_with<E>(cli: CommandLineInput, env: E) -> Result<(Self, RelayAction), AppError>
    where
        E: Fn(&str) -> Option<String>,
    {
        let notion_version = cli
            .notion_version
            .or_else(|| env(VERSION_ENV))
            .unwrap_or_else(|| DEFAULT_NOTION_VERSION.to_string());

        let config = RelayConfig {
            api_base_url: ValidatedUrl::parse(&cli.api_base_url)?,
            notion_version: NotionVersion::new(notion_version)?,
            page_size: PageSize::new(cli.page_size)?,
            verbose: cli.verbose,
        };

        let token_for = |explicit: Option<String>| -> Result<AccessToken, AppError> {
            let raw = explicit.or_else(|| env(TOKEN_ENV)).ok_or_else(|| {
                AppError::MissingConfiguration(format!(
                    "pass --token or set the {} environment variable",
                    TOKEN_ENV
                ))
            })?;
            Ok(AccessToken::new(raw)?)
        };

        let action = match cli.command {
            RelayCommand::Query {
                database_id,
                source,
                token,
            } => RelayAction::Query(QueryRequest::new(
                token_for(token)?,
                DatabaseId::parse(&database_id)?,
                source.as_deref().map(DataSourceId::parse).transpose()?,
            )),
            RelayCommand::Page { page_id, token } => RelayAction::Page(PageRequest::new(
                token_for(token)?,
                PageId::parse(&page_id)?,
            )),
            RelayCommand::Serve { host, port } => RelayAction::Serve {
                addr: format!("{}:{}", host, port),
            },
        };

        Ok((config, action))
    }
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            api_base_url: ValidatedUrl::parse(NOTION_API_BASE_URL)
                .expect("Default base URL should be valid"),
            notion_version: NotionVersion::new(DEFAULT_NOTION_VERSION)
                .expect("Default Notion-Version should be valid"),
            page_size: PageSize::default(),
            verbose: false,
        }
    }
}
