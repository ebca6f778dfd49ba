//! One physical line of a config file.

use std::collections::HashMap;

use super::section::ConfigParameter;

/// A stored line of a [`super::ConfigSection`].
///
/// Comment and header lines are opaque: their text is kept exactly as read,
/// newline included, and written back unchanged.  Parameter lines keep only
/// the raw text in front of the value; the value itself is looked up by key
/// when the line is written, so changing a parameter never touches this list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigLine {
    /// A comment or blank line (`#`, `;`, `//`, or whitespace only).
    Comment(String),
    /// A `[Section]` header.
    Header(String),
    /// A `name=value` line.
    Parameter {
        /// Raw text in front of the value: everything up to and including
        /// the first `=` plus the whitespace after it, e.g. `"  volume = "`.
        prefix: String,
        /// Key into the owning section's parameter map.
        key: String,
    },
}

impl ConfigLine {
    /// Builds the line for a parameter added through `put`.
    pub(crate) fn synthesized(key: &str) -> Self {
        ConfigLine::Parameter {
            prefix: format!("{key}="),
            key: key.to_owned(),
        }
    }

    /// Appends the on-disk text of this line to `out`.
    ///
    /// A parameter line whose key is no longer in `parameters` writes
    /// nothing.  An empty value is written as `name=` with nothing after
    /// the `=`, whatever spacing the prefix carries.
    pub(crate) fn render(&self, parameters: &HashMap<String, ConfigParameter>, out: &mut String) {
        match self {
            ConfigLine::Comment(raw) | ConfigLine::Header(raw) => out.push_str(raw),
            ConfigLine::Parameter { prefix, key } => {
                if let Some(param) = parameters.get(key) {
                    // An empty value ends the line right after `=`.
                    if param.value().is_empty() {
                        out.push_str(prefix.trim_end());
                    } else {
                        out.push_str(prefix);
                        out.push_str(param.value());
                    }
                    out.push('\n');
                }
            }
        }
    }

    /// Returns the parameter key for parameter lines.
    pub fn key(&self) -> Option<&str> {
        match self {
            ConfigLine::Parameter { key, .. } => Some(key),
            ConfigLine::Comment(_) | ConfigLine::Header(_) => None,
        }
    }
}
