use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;
use tracing::{debug, warn};

/// Greedy match from the first `[` to the last `]`, across newlines.
static JSON_ARRAY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\[.*\]").expect("valid JSON array pattern"));

/// Pulls the detected object list out of free-form model output.
///
/// The first `[...]` span is parsed if there is one, otherwise the whole
/// text. Anything unparseable yields an empty list. Entries are returned
/// exactly as the model wrote them.
pub fn extract_objects(content: &str) -> Vec<Value> {
    let candidate = match JSON_ARRAY.find(content) {
        Some(found) => found.as_str(),
        None => {
            debug!("No JSON array in model output, parsing whole text");
            content
        }
    };

    match serde_json::from_str::<Value>(candidate) {
        Ok(Value::Array(objects)) => objects,
        Ok(object @ Value::Object(_)) => vec![object],
        Ok(other) => {
            warn!(content = %content, "Model output is JSON but not an object list: {}", other);
            Vec::new()
        }
        Err(e) => {
            warn!(content = %content, "Failed to parse objects: {}", e);
            Vec::new()
        }
    }
}
