//! Locating bookmark records inside an action response.
//!
//! The action endpoint does not document where the records live, and the
//! layout has moved between upstream versions. Observed layouts are tried in
//! a fixed order, narrowest first, and the first one holding a non-empty
//! list wins:
//!
//! | Shape               | Layout                                                  |
//! |---------------------|---------------------------------------------------------|
//! | `BareList`          | `[...]`                                                 |
//! | `DataList`          | `{"data": [...]}`                                       |
//! | `NestedData`        | `{"data": {"data": [...]}}` or `response_data`          |
//! | `ExecutionEnvelope` | `{"execution_details": {"executed_response": {...}}}`   |
//!
//! An envelope whose success flag is `false` fails extraction regardless of
//! any data that is also present.

use crate::error::{Result, SyncError};
use crate::models::bookmark::Bookmark;
use serde_json::Value;
use std::fmt;

/// Sub-fields of a `data` object that may hold the record list
const NESTED_LIST_KEYS: [&str; 2] = ["data", "response_data"];

/// Success flag spellings; upstream uses "successfull"
const SUCCESS_KEYS: [&str; 2] = ["successfull", "successful"];

const ERROR_KEYS: [&str; 2] = ["error", "message"];

/// A known response layout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseShape {
    BareList,
    DataList,
    NestedData,
    ExecutionEnvelope,
}

impl ResponseShape {
    /// Priority order in which shapes are tried
    pub const ORDER: [ResponseShape; 4] = [
        ResponseShape::BareList,
        ResponseShape::DataList,
        ResponseShape::NestedData,
        ResponseShape::ExecutionEnvelope,
    ];

    /// Records under this layout, if the response has it and it is non-empty
    pub fn records<'a>(&self, response: &'a Value) -> Option<&'a Vec<Value>> {
        let list = match self {
            Self::BareList => response.as_array(),
            Self::DataList => response.get("data").and_then(Value::as_array),
            Self::NestedData => response
                .get("data")
                .filter(|data| data.is_object())
                .and_then(nested_list),
            Self::ExecutionEnvelope => executed_response(response)
                .and_then(|executed| executed.get("data"))
                .and_then(|data| data.as_array().or_else(|| nested_list(data))),
        };
        list.filter(|records| !records.is_empty())
    }
}

impl fmt::Display for ResponseShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::BareList => "top-level list",
            Self::DataList => "data",
            Self::NestedData => "data.data",
            Self::ExecutionEnvelope => "execution_details.executed_response.data",
        };
        f.write_str(name)
    }
}

/// Result of a successful extraction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    /// Layout the records were found under; None when nothing matched
    pub shape: Option<ResponseShape>,
    pub bookmarks: Vec<Bookmark>,
}

impl Extraction {
    pub fn is_empty(&self) -> bool {
        self.bookmarks.is_empty()
    }
}

/// Pull bookmark records out of an action response.
///
/// Returns [`SyncError::UpstreamExecution`] when an envelope reports the
/// action as unsuccessful. Finding no records is not an error.
pub fn extract_bookmarks(response: &Value) -> Result<Extraction> {
    if let Some(message) = execution_failure(response) {
        return Err(SyncError::UpstreamExecution(message));
    }

    for shape in ResponseShape::ORDER {
        if let Some(records) = shape.records(response) {
            log::debug!("Matched response shape: {}", shape);
            return Ok(Extraction {
                shape: Some(shape),
                bookmarks: records.iter().map(Bookmark::from_value).collect(),
            });
        }
    }

    Ok(Extraction {
        shape: None,
        bookmarks: Vec::new(),
    })
}

fn nested_list(data: &Value) -> Option<&Vec<Value>> {
    NESTED_LIST_KEYS
        .iter()
        .find_map(|key| data.get(*key).and_then(Value::as_array))
}

fn executed_response(response: &Value) -> Option<&Value> {
    response
        .get("execution_details")
        .and_then(|details| details.get("executed_response"))
}

/// Error message if any envelope level carries `success == false`
fn execution_failure(response: &Value) -> Option<String> {
    let details = response.get("execution_details");
    let envelopes = [Some(response), details, executed_response(response)];

    envelopes
        .into_iter()
        .flatten()
        .find(|envelope| reports_failure(envelope))
        .map(|envelope| {
            failure_message(envelope).unwrap_or_else(|| "action reported failure".to_string())
        })
}

fn reports_failure(envelope: &Value) -> bool {
    SUCCESS_KEYS
        .iter()
        .any(|key| envelope.get(*key).and_then(Value::as_bool) == Some(false))
}

fn failure_message(envelope: &Value) -> Option<String> {
    ERROR_KEYS.iter().find_map(|key| match envelope.get(*key) {
        Some(Value::String(s)) if !s.trim().is_empty() => Some(s.clone()),
        Some(Value::Object(obj)) => obj
            .get("message")
            .and_then(Value::as_str)
            .map(str::to_string),
        _ => None,
    })
}
