use crate::config::SyncConfig;
use crate::error::{Result, SyncError};
use crate::utils::truncate_chars;
use reqwest::blocking::Client;
use reqwest::StatusCode;
use serde_json::{json, Value};

/// Action that lists a user's bookmarked tweets
pub const BOOKMARKS_ACTION: &str = "TWITTER_BOOKMARKS_BY_USER";

/// Characters of a response body kept in diagnostics
pub const BODY_PREVIEW_CHARS: usize = 500;

const USER_AGENT: &str = concat!("bookmark-sync/", env!("CARGO_PKG_VERSION"));

/// Blocking client for the action-execution endpoint
pub struct ActionClient {
    http: Client,
    base_url: String,
    api_key: String,
}

impl ActionClient {
    pub fn new(config: &SyncConfig) -> Result<Self> {
        let http = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
        })
    }

    /// Endpoint that executes `action`
    pub fn action_url(&self, action: &str) -> String {
        format!("{}/actions/{}/execute", self.base_url, action)
    }

    /// Execute a named action once and return the parsed JSON body.
    /// Only HTTP 200 counts as success.
    pub fn execute(&self, action: &str, input: Value) -> Result<Value> {
        let url = self.action_url(action);
        log::debug!("POST {}", url);

        let resp = self
            .http
            .post(&url)
            .header("X-API-Key", &self.api_key)
            .json(&json!({ "input": input }))
            .send()?;

        let status = resp.status();
        let body = resp.text()?;
        log::debug!("{} answered {} ({} bytes)", action, status, body.len());

        if status != StatusCode::OK {
            return Err(SyncError::Status {
                status: status.as_u16(),
                body: truncate_chars(&body, BODY_PREVIEW_CHARS).to_string(),
            });
        }

        serde_json::from_str(&body).map_err(|e| {
            SyncError::MalformedResponse(format!(
                "{} (body: {})",
                e,
                truncate_chars(&body, BODY_PREVIEW_CHARS)
            ))
        })
    }

    /// Fetch one page of bookmarks for `user_id`
    pub fn fetch_bookmarks(&self, user_id: &str, max_results: u32) -> Result<Value> {
        self.execute(
            BOOKMARKS_ACTION,
            json!({
                "id": user_id,
                "max_results": max_results,
            }),
        )
    }
}
