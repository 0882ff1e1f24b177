//! Message formatting: pretty-printing a trailing JSON object in a log line.
//!
//! Log lines often look like `2024-01-01T00:00:00Z INFO request {"id":7} done`.
//! When a message is expanded, the JSON object is re-serialized with two-space
//! indentation and spliced back between the text before and after it:
//!
//! ```text
//! 2024-01-01T00:00:00Z INFO request
//! {
//!   "id": 7
//! }
//! done
//! ```
//!
//! Both functions are pure. Malformed JSON is never an error; the input is
//! returned as-is.

use serde_json::{Map, Value};
use tracing::debug;

/// A message split around its trailing JSON object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonParts {
    /// Text before the object, trailing whitespace removed.
    pub prefix: String,
    /// The object pretty-printed with two-space indentation, keys in source order.
    pub json: String,
    /// Text after the object, leading whitespace removed.
    pub suffix: String,
}

impl JsonParts {
    /// Non-empty parts joined by newlines.
    pub fn join(&self) -> String {
        [self.prefix.as_str(), self.json.as_str(), self.suffix.as_str()]
            .into_iter()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Locate and pretty-print the trailing JSON object in `raw`.
///
/// The object is the one ending at the last `}`; its start is the earliest `{`
/// from which the enclosed text parses as an object. Tabs become spaces before
/// matching. Returns `None` when no such object exists.
pub fn split_json(raw: &str) -> Option<JsonParts> {
    let text = raw.replace('\t', " ");
    let end = text.rfind('}')?;

    let (start, object) = text[..=end]
        .match_indices('{')
        .find_map(|(start, _)| parse_object(&text[start..=end]).map(|obj| (start, obj)))?;

    let json = match serde_json::to_string_pretty(&Value::Object(object)) {
        Ok(json) => json,
        Err(e) => {
            debug!(error = %e, "Failed to re-serialize JSON object");
            return None;
        }
    };

    Some(JsonParts {
        prefix: text[..start].trim_end().to_string(),
        json,
        suffix: text[end + 1..].trim_start().to_string(),
    })
}

fn parse_object(candidate: &str) -> Option<Map<String, Value>> {
    serde_json::from_str::<Map<String, Value>>(candidate).ok()
}

/// Format a message for display.
///
/// With `expand == false` the input is returned unchanged. Otherwise the
/// trailing JSON object (see [`split_json`]) is pretty-printed and placed on
/// its own lines between the surrounding text. Text without a parseable
/// object is returned unchanged.
pub fn format_message(raw: &str, expand: bool) -> String {
    if !expand {
        return raw.to_string();
    }
    match split_json(raw) {
        Some(parts) => parts.join(),
        None => {
            if raw.contains('{') {
                debug!(len = raw.len(), "No parseable JSON object in message, showing raw text");
            }
            raw.to_string()
        }
    }
}
