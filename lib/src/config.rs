use crate::error::{Result, SyncError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable holding the Composio API key
pub const API_KEY_VAR: &str = "COMPOSIO_API_KEY";
/// Environment variable selecting whose bookmarks to fetch
pub const USER_ID_VAR: &str = "TWITTER_USER_ID";

pub const DEFAULT_BASE_URL: &str = "https://backend.composio.dev/api/v2";
pub const DEFAULT_USER_ID: &str = "1675200858425016320";
pub const DEFAULT_OUTPUT: &str = "twitter_bookmarks.md";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Bookmarks requested per run; only the first page is fetched
pub const PAGE_SIZE: u32 = 100;

/// Optional settings file (~/.config/bookmark-sync/config.yml)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Base URL of the action-execution API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Markdown file to overwrite on each run
    #[serde(default = "default_output")]
    pub output: PathBuf,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Fallback user id when TWITTER_USER_ID is unset
    #[serde(default)]
    pub user_id: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            output: default_output(),
            timeout_secs: default_timeout_secs(),
            user_id: None,
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_output() -> PathBuf {
    PathBuf::from(DEFAULT_OUTPUT)
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Settings {
    /// Load settings from a file path
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|e| {
            SyncError::Settings(format!("cannot read {}: {}", path.display(), e))
        })?;
        let settings: Settings = serde_yaml::from_str(&contents)?;
        check_timeout(settings.timeout_secs)?;
        Ok(settings)
    }

    /// Load settings from the default location.
    /// Falls back to defaults if the file is missing or unreadable.
    pub fn load() -> Self {
        let config_path = crate::utils::get_config_dir().join("config.yml");

        if !config_path.exists() {
            return Self::default();
        }

        match Self::load_from_path(&config_path) {
            Ok(settings) => {
                log::debug!("Loaded settings from {}", config_path.display());
                settings
            }
            Err(e) => {
                log::warn!(
                    "Failed to load settings from {}: {}; using defaults",
                    config_path.display(),
                    e
                );
                Self::default()
            }
        }
    }
}

/// Values given on the command line; these win over everything else
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub output: Option<PathBuf>,
    pub user_id: Option<String>,
    pub base_url: Option<String>,
    pub timeout_secs: Option<u64>,
}

/// Fully resolved configuration for one sync run
#[derive(Clone)]
pub struct SyncConfig {
    pub api_key: String,
    pub user_id: String,
    pub base_url: String,
    pub output: PathBuf,
    pub timeout: Duration,
    pub page_size: u32,
}

impl fmt::Debug for SyncConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SyncConfig")
            .field("api_key", &"<redacted>")
            .field("user_id", &self.user_id)
            .field("base_url", &self.base_url)
            .field("output", &self.output)
            .field("timeout", &self.timeout)
            .field("page_size", &self.page_size)
            .finish()
    }
}

impl SyncConfig {
    /// Resolve configuration from CLI overrides, the environment and settings.
    ///
    /// `lookup` reads an environment variable; pass [`env_lookup`] in
    /// production. Fails with [`SyncError::Config`] when the API key is
    /// unset or blank.
    pub fn resolve<F>(settings: &Settings, overrides: &Overrides, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup(API_KEY_VAR)
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
            .ok_or_else(|| SyncError::Config(missing_key_guidance()))?;

        let user_id = overrides
            .user_id
            .clone()
            .or_else(|| lookup(USER_ID_VAR))
            .or_else(|| settings.user_id.clone())
            .map(|id| id.trim().to_string())
            .filter(|id| !id.is_empty())
            .unwrap_or_else(|| DEFAULT_USER_ID.to_string());

        let base_url = overrides
            .base_url
            .as_deref()
            .unwrap_or(&settings.base_url)
            .trim_end_matches('/')
            .to_string();

        let output = overrides
            .output
            .clone()
            .unwrap_or_else(|| settings.output.clone());

        let timeout_secs = overrides.timeout_secs.unwrap_or(settings.timeout_secs);
        check_timeout(timeout_secs)?;

        Ok(Self {
            api_key,
            user_id,
            base_url,
            output,
            timeout: Duration::from_secs(timeout_secs),
            page_size: PAGE_SIZE,
        })
    }
}

/// A zero timeout would fail every request immediately
fn check_timeout(timeout_secs: u64) -> Result<()> {
    if timeout_secs == 0 {
        return Err(SyncError::Settings(
            "timeout_secs must be at least 1".to_string(),
        ));
    }
    Ok(())
}

/// Read a variable from the process environment
pub fn env_lookup(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

fn missing_key_guidance() -> String {
    format!(
        "{API_KEY_VAR} is not set\n\
         \n\
         Get an API key from https://app.composio.dev and export it:\n  \
         export {API_KEY_VAR}=<your key>\n\
         \n\
         When running from GitHub Actions, add it as a repository secret:\n  \
         1. Go to Settings → Secrets and variables → Actions\n  \
         2. Click 'New repository secret'\n  \
         3. Name: {API_KEY_VAR}\n  \
         4. Value: your API key"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::NamedTempFile;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.base_url, DEFAULT_BASE_URL);
        assert_eq!(settings.output, PathBuf::from("twitter_bookmarks.md"));
        assert_eq!(settings.timeout_secs, 30);
        assert!(settings.user_id.is_none());
    }

    #[test]
    fn test_missing_api_key_is_config_error() {
        let result = SyncConfig::resolve(
            &Settings::default(),
            &Overrides::default(),
            lookup_from(&[]),
        );
        match result {
            Err(SyncError::Config(msg)) => {
                assert!(msg.contains("COMPOSIO_API_KEY"));
                assert!(msg.contains("https://app.composio.dev"));
            }
            other => panic!("Expected Config error, got {:?}", other),
        }
    }

    #[test]
    fn test_blank_api_key_is_config_error() {
        let result = SyncConfig::resolve(
            &Settings::default(),
            &Overrides::default(),
            lookup_from(&[(API_KEY_VAR, "   ")]),
        );
        assert!(matches!(result, Err(SyncError::Config(_))));
    }

    #[test]
    fn test_defaults_applied() {
        let config = SyncConfig::resolve(
            &Settings::default(),
            &Overrides::default(),
            lookup_from(&[(API_KEY_VAR, "secret")]),
        )
        .unwrap();

        assert_eq!(config.api_key, "secret");
        assert_eq!(config.user_id, DEFAULT_USER_ID);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.output, PathBuf::from(DEFAULT_OUTPUT));
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.page_size, 100);
    }

    #[test]
    fn test_user_id_precedence() {
        let settings = Settings {
            user_id: Some("from-file".to_string()),
            ..Settings::default()
        };
        let env = lookup_from(&[(API_KEY_VAR, "k"), (USER_ID_VAR, "from-env")]);

        let config = SyncConfig::resolve(&settings, &Overrides::default(), &env).unwrap();
        assert_eq!(config.user_id, "from-env");

        let overrides = Overrides {
            user_id: Some("from-cli".to_string()),
            ..Overrides::default()
        };
        let config = SyncConfig::resolve(&settings, &overrides, &env).unwrap();
        assert_eq!(config.user_id, "from-cli");

        let config =
            SyncConfig::resolve(&settings, &Overrides::default(), lookup_from(&[(API_KEY_VAR, "k")]))
                .unwrap();
        assert_eq!(config.user_id, "from-file");
    }

    #[test]
    fn test_overrides_and_trailing_slash() {
        let overrides = Overrides {
            output: Some(PathBuf::from("notes/bookmarks.md")),
            base_url: Some("http://localhost:8080/api/".to_string()),
            timeout_secs: Some(5),
            ..Overrides::default()
        };
        let config = SyncConfig::resolve(
            &Settings::default(),
            &overrides,
            lookup_from(&[(API_KEY_VAR, "k")]),
        )
        .unwrap();

        assert_eq!(config.base_url, "http://localhost:8080/api");
        assert_eq!(config.output, PathBuf::from("notes/bookmarks.md"));
        assert_eq!(config.timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let config = SyncConfig::resolve(
            &Settings::default(),
            &Overrides::default(),
            lookup_from(&[(API_KEY_VAR, "super-secret-key")]),
        )
        .unwrap();
        let debug = format!("{:?}", config);
        assert!(!debug.contains("super-secret-key"));
        assert!(debug.contains("<redacted>"));
    }

    #[test]
    fn test_load_settings_file() {
        let temp_file = NamedTempFile::new().unwrap();
        fs::write(
            temp_file.path(),
            "output: out/bookmarks.md\ntimeout_secs: 10\nuser_id: \"42\"\n",
        )
        .unwrap();

        let settings = Settings::load_from_path(temp_file.path()).unwrap();
        assert_eq!(settings.output, PathBuf::from("out/bookmarks.md"));
        assert_eq!(settings.timeout_secs, 10);
        assert_eq!(settings.user_id.as_deref(), Some("42"));
        // Should use default for missing field
        assert_eq!(settings.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn test_load_zero_timeout_rejected() {
        let temp_file = NamedTempFile::new().unwrap();
        fs::write(temp_file.path(), "timeout_secs: 0\n").unwrap();

        let result = Settings::load_from_path(temp_file.path());
        assert!(matches!(result, Err(SyncError::Settings(_))));
    }

    #[test]
    fn test_zero_timeout_override_rejected() {
        let overrides = Overrides {
            timeout_secs: Some(0),
            ..Overrides::default()
        };
        let result = SyncConfig::resolve(
            &Settings::default(),
            &overrides,
            lookup_from(&[(API_KEY_VAR, "k")]),
        );
        assert!(matches!(result, Err(SyncError::Settings(_))));
    }

    #[test]
    fn test_load_invalid_yaml() {
        let temp_file = NamedTempFile::new().unwrap();
        fs::write(temp_file.path(), "invalid: yaml: content:").unwrap();

        let result = Settings::load_from_path(temp_file.path());
        assert!(matches!(result, Err(SyncError::Settings(_))));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = Settings::load_from_path(&dir.path().join("nope.yml"));
        assert!(matches!(result, Err(SyncError::Settings(_))));
    }
}
