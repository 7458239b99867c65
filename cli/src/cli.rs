use bookmark_sync::config::{Overrides, Settings};
use bookmark_sync::error::Result;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None, disable_version_flag = true)]
pub struct Cli {
    /// Show the program version and exit
    #[arg(short = 'v', long = "version")]
    pub version: bool,

    /// Optional custom settings file path
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Markdown file to write (default: twitter_bookmarks.md)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Twitter user whose bookmarks are fetched (overrides TWITTER_USER_ID)
    #[arg(short, long)]
    pub user_id: Option<String>,

    /// Base URL of the action-execution API
    #[arg(long)]
    pub base_url: Option<String>,

    /// Request timeout in seconds
    #[arg(short, long, value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: Option<u64>,

    /// Show debug information
    #[arg(short = 'g', long = "debug")]
    pub debug: bool,
}

impl Cli {
    /// Settings from --config, or the default location when not given
    pub fn settings(&self) -> Result<Settings> {
        match &self.config {
            Some(path) => Settings::load_from_path(path),
            None => Ok(Settings::load()),
        }
    }

    pub fn overrides(&self) -> Overrides {
        Overrides {
            output: self.output.clone(),
            user_id: self.user_id.clone(),
            base_url: self.base_url.clone(),
            timeout_secs: self.timeout,
        }
    }
}
