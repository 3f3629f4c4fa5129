//! Atlassian Document Format flattening.
//!
//! Worklog comments and issue comments arrive as ADF trees. Reports only
//! need plain text, so this module flattens paragraph/text nodes and drops
//! everything else (mentions, marks, media). Total function: any input
//! degrades to some string, never an error.

use serde_json::Value;

/// Flatten an ADF document to plain text.
///
/// Paragraph text nodes are joined with single spaces. Values that are not
/// ADF objects degrade to their natural string form; `null`/absent bodies
/// degrade to the empty string.
pub fn adf_to_text(value: &Value) -> String {
    match value {
        Value::Object(obj) if obj.contains_key("content") => {
            let mut parts: Vec<&str> = Vec::new();
            if let Some(blocks) = obj.get("content").and_then(Value::as_array) {
                for block in blocks {
                    if block.get("type").and_then(Value::as_str) != Some("paragraph") {
                        continue;
                    }
                    let Some(items) = block.get("content").and_then(Value::as_array) else {
                        continue;
                    };
                    for item in items {
                        if item.get("type").and_then(Value::as_str) == Some("text") {
                            if let Some(text) = item.get("text").and_then(Value::as_str) {
                                parts.push(text);
                            }
                        }
                    }
                }
            }
            parts.join(" ")
        }
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
