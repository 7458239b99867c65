use std::path::PathBuf;

/// Error type for a bookmark sync run
///
/// Every variant is fatal for the run and maps to exit status 1. Finding no
/// bookmarks is not an error; see [`crate::sync::SyncOutcome::Empty`].
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    /// Missing or unusable credential, raised before any network activity
    #[error("Configuration error: {0}")]
    Config(String),

    /// Settings file could not be read or parsed
    #[error("Settings error: {0}")]
    Settings(String),

    /// Network-level failure (timeout, DNS, connection refused)
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The action endpoint answered with something other than HTTP 200
    #[error("Action endpoint returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// HTTP 200 whose body is not JSON
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// The execution envelope reported the action as unsuccessful
    #[error("Upstream action failed: {0}")]
    UpstreamExecution(String),

    /// Writing the markdown document failed
    #[error("Failed to write {}: {source}", path.display())]
    Output {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl SyncError {
    /// Process exit status for this error
    pub fn exit_code(&self) -> u8 {
        1
    }
}

/// Result type alias using SyncError
pub type Result<T> = std::result::Result<T, SyncError>;

impl From<serde_yaml::Error> for SyncError {
    fn from(err: serde_yaml::Error) -> Self {
        SyncError::Settings(err.to_string())
    }
}
