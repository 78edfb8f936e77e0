//! Two-stage response parser.
//!
//! Stage one parses the whole (trimmed) content as a JSON object. Stage two
//! scans at most [`MAX_SCAN_BYTES`] of the content for balanced `{...}`
//! candidates and parses each in order until one is an object.

use advisor_core::error::AdvisorError;
use serde_json::{Map, Value};

/// Upper bound on how much of a response the brace scanner looks at.
pub const MAX_SCAN_BYTES: usize = 64 * 1024;

/// Upper bound on opening braces tried, whether or not they close.
const MAX_CANDIDATES: usize = 32;

/// Parse completion content into a JSON object.
pub fn parse_response(content: &str) -> Result<Map<String, Value>, AdvisorError> {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        return Err(AdvisorError::ParseFailure("empty response".to_string()));
    }

    if let Ok(Value::Object(map)) = serde_json::from_str::<Value>(trimmed) {
        return Ok(map);
    }

    let window = scan_window(trimmed);
    let starts = window.match_indices('{').map(|(index, _)| index);
    for start in starts.take(MAX_CANDIDATES) {
        // A brace that never closes is skipped; a later one may still balance.
        let Some(end) = balanced_end(window, start) else {
            continue;
        };
        if let Ok(Value::Object(map)) = serde_json::from_str::<Value>(&window[start..end]) {
            return Ok(map);
        }
    }

    Err(AdvisorError::ParseFailure(format!(
        "no JSON object found in {} bytes of response",
        window.len()
    )))
}

/// Longest prefix of `content` within the scan limit, cut on a char boundary.
fn scan_window(content: &str) -> &str {
    if content.len() <= MAX_SCAN_BYTES {
        return content;
    }
    let mut end = MAX_SCAN_BYTES;
    while !content.is_char_boundary(end) {
        end -= 1;
    }
    &content[..end]
}

/// End (exclusive) of the balanced object opened by the `{` at `start`.
///
/// Braces inside string literals are ignored, escapes included.
fn balanced_end(text: &str, start: usize) -> Option<usize> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, &b) in text.as_bytes().get(start..)?.iter().enumerate() {
        if in_string {
            match b {
                _ if escaped => escaped = false,
                b'\\' => escaped = true,
                b'"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match b {
            b'"' => in_string = true,
            b'{' => depth += 1,
            b'}' => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some(start + offset + 1);
                }
            }
            _ => {}
        }
    }

    None
}
