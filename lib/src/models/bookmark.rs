use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

const PERMALINK_BASE: &str = "https://twitter.com/i/web/status/";

/// A saved tweet as returned by the bookmarks action
///
/// Both fields are optional upstream; ids arrive as strings or numbers.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Bookmark {
    #[serde(default, deserialize_with = "lenient_string")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub text: Option<String>,
}

impl Bookmark {
    /// Create a new Bookmark
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            text: Some(text.into()),
        }
    }

    /// Build from an upstream record. Anything that is not an object
    /// becomes an empty bookmark.
    pub fn from_value(value: &Value) -> Self {
        if !value.is_object() {
            log::warn!("Skipping non-object bookmark record: {}", value);
            return Self::default();
        }

        match Bookmark::deserialize(value) {
            Ok(bookmark) => bookmark,
            Err(e) => {
                log::warn!("Unreadable bookmark record ({}): {}", e, value);
                Self::default()
            }
        }
    }

    pub fn id_or_empty(&self) -> &str {
        self.id.as_deref().unwrap_or_default()
    }

    /// Canonical tweet URL
    pub fn permalink(&self) -> String {
        format!("{}{}", PERMALINK_BASE, self.id_or_empty())
    }

    /// Text with line breaks collapsed to spaces, trimmed
    pub fn single_line_text(&self) -> String {
        self.text
            .as_deref()
            .unwrap_or_default()
            .replace("\r\n", " ")
            .replace(['\r', '\n'], " ")
            .trim()
            .to_string()
    }
}

/// Strings pass through, anything else keeps its JSON text; null/missing is None
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(other) => Some(other.to_string()),
    })
}
