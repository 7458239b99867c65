use crate::config::{Overrides, Settings, SyncConfig};
use crate::error::Result;
use crate::export;
use crate::extract;
use crate::fetch::{ActionClient, BODY_PREVIEW_CHARS};
use crate::utils::truncate_chars;
use chrono::{DateTime, Utc};
use std::path::PathBuf;

const BANNER_WIDTH: usize = 60;

/// Summary of a completed run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncResult {
    pub count: usize,
    pub generated_at: DateTime<Utc>,
    pub path: PathBuf,
}

/// How a run ended without error
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    /// Document written
    Written(SyncResult),
    /// No bookmarks located; the output file was left untouched
    Empty,
}

/// One fetch, extract, render and write cycle
pub struct SyncJob {
    config: SyncConfig,
    client: ActionClient,
}

impl SyncJob {
    pub fn new(config: SyncConfig) -> Result<Self> {
        let client = ActionClient::new(&config)?;
        Ok(Self { config, client })
    }

    pub fn run(&self) -> Result<SyncOutcome> {
        self.run_at(Utc::now())
    }

    /// Run with a fixed generation timestamp
    pub fn run_at(&self, now: DateTime<Utc>) -> Result<SyncOutcome> {
        banner();
        log::info!("Starting Twitter Bookmarks Sync");
        banner();

        log::info!("Fetching bookmarks for user {}...", self.config.user_id);
        let response = self
            .client
            .fetch_bookmarks(&self.config.user_id, self.config.page_size)?;
        log::info!("API response received");

        log::info!("Extracting bookmarks from response...");
        let extraction = extract::extract_bookmarks(&response)?;

        let Some(shape) = extraction.shape else {
            log::warn!("No bookmarks found or unable to parse response");
            let pretty = serde_json::to_string_pretty(&response).unwrap_or_default();
            log::warn!("Response: {}", truncate_chars(&pretty, BODY_PREVIEW_CHARS));
            return Ok(SyncOutcome::Empty);
        };
        let bookmarks = extraction.bookmarks;
        log::info!("Found {} bookmarks (via {})", bookmarks.len(), shape);

        log::info!("Creating markdown file...");
        let document = export::render_markdown(&bookmarks, now);
        log::debug!("Rendered {} bytes of markdown", document.len());

        let path = &self.config.output;
        log::info!("Writing {}...", path.display());
        export::write_document(path, &document)?;

        log::info!(
            "Successfully wrote {} bookmarks to {}",
            bookmarks.len(),
            path.display()
        );
        banner();
        log::info!("Sync completed successfully!");
        banner();

        Ok(SyncOutcome::Written(SyncResult {
            count: bookmarks.len(),
            generated_at: now,
            path: path.clone(),
        }))
    }
}

/// Resolve configuration and run one sync.
///
/// A missing API key fails here, before any HTTP client exists.
pub fn run_sync<F>(settings: &Settings, overrides: &Overrides, lookup: F) -> Result<SyncOutcome>
where
    F: Fn(&str) -> Option<String>,
{
    log::info!("Loading configuration...");
    let config = SyncConfig::resolve(settings, overrides, lookup)?;
    log::info!(
        "Configuration loaded (user {}, output {})",
        config.user_id,
        config.output.display()
    );
    log::debug!("Resolved configuration: {:?}", config);
    SyncJob::new(config)?.run()
}

fn banner() {
    log::info!("{}", "=".repeat(BANNER_WIDTH));
}
