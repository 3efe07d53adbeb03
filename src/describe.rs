//! Human-readable renderings of headers and payloads for debug logs.

use http::HeaderMap;
use serde_json::Value;

/// One ` │ Name: value` line per header, sorted by name.
pub(crate) fn headers(headers: &HeaderMap) -> String {
    let mut lines: Vec<(&str, String)> = headers
        .iter()
        .map(|(name, value)| {
            let line = format!(
                " │ {}: {}",
                canonical_name(name.as_str()),
                String::from_utf8_lossy(value.as_bytes())
            );
            (name.as_str(), line)
        })
        .collect();
    lines.sort();
    lines
        .into_iter()
        .map(|(_, line)| line)
        .collect::<Vec<_>>()
        .join("\n")
}

/// `content-type` -> `Content-Type`. `HeaderName` always stores lowercase.
fn canonical_name(name: &str) -> String {
    name.split('-')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join("-")
}

/// Pretty JSON when the payload parses, lossy UTF-8 otherwise; indented by two spaces.
pub(crate) fn payload(bytes: &[u8]) -> String {
    let text = serde_json::from_slice::<Value>(bytes)
        .ok()
        .and_then(|value| serde_json::to_string_pretty(&value).ok())
        .unwrap_or_else(|| String::from_utf8_lossy(bytes).into_owned());

    text.lines()
        .map(|line| format!("  {line}"))
        .collect::<Vec<_>>()
        .join("\n")
}
