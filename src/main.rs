// src/main.rs

use anyhow::Context;
use clap::Parser;
use log::LevelFilter;
use log4rs::{
    append::console::{ConsoleAppender, Target},
    append::file::FileAppender,
    config::{Appender, Root},
    encode::pattern::PatternEncoder,
    filter::threshold::ThresholdFilter,
    Config,
};
use notion_relay::{
    fetch_page, serve, CommandLineInput, DatabaseQueryAggregator, NotionHttpClient, RelayAction,
    RelayConfig, RelayState, UpstreamClient,
};
use std::fs;
use std::path::Path;
use std::sync::Arc;

/// Sets up logging configuration.
fn setup_logging(verbose: bool) -> anyhow::Result<()> {
    let log_file_path = std::env::temp_dir().join("notion_relay.log");
    if let Some(parent) = log_file_path.parent() {
        fs::create_dir_all(parent)?;
    }

    log4rs::init_config(logging_config(verbose, &log_file_path)?)?;
    log::info!("Logging initialized. Log file: {}", log_file_path.display());
    Ok(())
}

/// Builds the log4rs configuration.
///
/// Console output goes to stderr so that `query` and `page` can pipe JSON.
/// The log file records everything at debug level; `--verbose` only widens
/// what reaches stderr.
fn logging_config(verbose: bool, log_file_path: &Path) -> anyhow::Result<Config> {
    let stderr_level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };

    let pattern = if verbose {
        "{d(%Y-%m-%d %H:%M:%S)} [{l}] - {m}{n}"
    } else {
        "{m}{n}"
    };

    let stderr_appender = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new(pattern)))
        .build();

    let file_appender = FileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(
            "{d(%Y-%m-%d %H:%M:%S)} [{l}] - {m}{n}",
        )))
        .build(log_file_path)?;

    let config = Config::builder()
        .appender(
            Appender::builder()
                .filter(Box::new(ThresholdFilter::new(stderr_level)))
                .build("stderr", Box::new(stderr_appender)),
        )
        .appender(Appender::builder().build("file", Box::new(file_appender)))
        .build(
            Root::builder()
                .appender("stderr")
                .appender("file")
                .build(LevelFilter::Debug),
        )?;

    Ok(config)
}

/// Runs the requested action against the live Notion API.
async fn run(config: RelayConfig, action: RelayAction) -> anyhow::Result<()> {
    let upstream: Arc<dyn UpstreamClient> = Arc::new(
        NotionHttpClient::new(config.api_base_url.clone(), &config.notion_version)
            .context("building Notion HTTP client")?,
    );
    log::info!(
        "Using {} with Notion-Version {}",
        config.api_base_url,
        config.notion_version
    );

    match action {
        RelayAction::Query(request) => {
            let aggregator = DatabaseQueryAggregator::new(upstream, config.page_size);
            let result = aggregator
                .aggregate(&request)
                .await
                .with_context(|| format!("querying database {}", request.database_id))?;
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        RelayAction::Page(request) => {
            let page = fetch_page(upstream.as_ref(), &request)
                .await
                .with_context(|| format!("fetching page {}", request.page_id))?;
            println!("{}", serde_json::to_string_pretty(&page)?);
        }
        RelayAction::Serve { addr } => {
            let state = RelayState::new(upstream, config.page_size);
            serve(&addr, state).await.context("serving relay")?;
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CommandLineInput::parse();

    setup_logging(cli.verbose)?;

    let (config, action) = RelayConfig::resolve(cli)?;

    run(config, action).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use log::{Level, Log, Record};

    #[test]
    fn test_log_file_receives_debug_without_verbose() {
        let path = std::env::temp_dir().join(format!(
            "notion_relay_logging_test_{}.log",
            std::process::id()
        ));
        let _ = fs::remove_file(&path);

        let config = logging_config(false, &path).unwrap();
        assert_eq!(config.root().level(), LevelFilter::Debug);

        let logger = log4rs::Logger::new(config);
        logger.log(
            &Record::builder()
                .level(Level::Debug)
                .target("notion_relay")
                .args(format_args!("paginating data source s1"))
                .build(),
        );
        logger.flush();

        let written = fs::read_to_string(&path).unwrap();
        assert!(written.contains("[DEBUG] - paginating data source s1"));
        let _ = fs::remove_file(&path);
    }
}
