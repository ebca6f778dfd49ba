//! Helpers for interpreting raw values.
//!
//! The store keeps values exactly as written (`"quoted"` values keep their
//! quotes) so that saving never alters them.  Callers that want the text
//! inside the quotes, or a number or flag, go through these helpers.

/// Removes one pair of surrounding double quotes, if present.
///
/// ```rust
/// use m64_config::unquote;
///
/// assert_eq!(unquote("\"Mupen64Plus\""), "Mupen64Plus");
/// assert_eq!(unquote("plain"), "plain");
/// assert_eq!(unquote("\"unterminated"), "\"unterminated");
/// ```
pub fn unquote(value: &str) -> &str {
    value
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
        .unwrap_or(value)
}

/// Parses the boolean spellings found in Mupen64Plus config files.
pub(crate) fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" => Some(true),
        "false" | "0" => Some(false),
        _ => None,
    }
}
