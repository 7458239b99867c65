use crate::error::{Result, SyncError};
use crate::models::bookmark::Bookmark;
use chrono::{DateTime, Utc};
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Render bookmarks as the markdown document, in the order given.
///
/// Count and Tweet ID lines end in two spaces (markdown hard breaks).
pub fn render_markdown(bookmarks: &[Bookmark], generated_at: DateTime<Utc>) -> String {
    let mut doc = String::new();

    // Writing into a String cannot fail
    let _ = write!(
        doc,
        "# Twitter Bookmarks\n\
         \n\
         **Total Bookmarks:** {}  \n\
         **Last Updated:** {} UTC\n\
         \n\
         ---\n\
         \n",
        bookmarks.len(),
        generated_at.format(TIMESTAMP_FORMAT)
    );

    for bookmark in bookmarks {
        let link = bookmark.permalink();
        let _ = write!(
            doc,
            "### {}\n\
             \n\
             **Tweet ID:** `{}`  \n\
             **Link:** [{}]({})\n\
             \n\
             ---\n\
             \n",
            bookmark.single_line_text(),
            bookmark.id_or_empty(),
            link,
            link
        );
    }

    doc
}

/// Replace the file at `path` with `document` (UTF-8).
/// Missing parent directories are created.
pub fn write_document(path: &Path, document: &str) -> Result<()> {
    let to_output_error = |source| SyncError::Output {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(to_output_error)?;
    }

    fs::write(path, document).map_err(to_output_error)
}
