//! A single `[Section]` of a config file.

use std::collections::HashMap;
use std::str::FromStr;

use tracing::warn;

use super::line::ConfigLine;
use super::value::{parse_bool, unquote};
use super::SECTIONLESS_NAME;
use crate::ordered::Keyed;

/// A parameter name and its current value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigParameter {
    name: String,
    value: String,
}

impl ConfigParameter {
    pub(crate) fn new(name: &str, value: &str) -> Self {
        Self {
            name: name.to_owned(),
            value: value.to_owned(),
        }
    }

    /// The parameter name, trimmed and case-sensitive.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The raw value, trimmed, with any quotes still in place.
    pub fn value(&self) -> &str {
        &self.value
    }
}

/// The lines and parameters of one section.
///
/// `lines` is the on-disk order and is what gets written back; `parameters`
/// is the lookup table.  Every entry in `parameters` has exactly one
/// [`ConfigLine::Parameter`] in `lines`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigSection {
    name: String,
    lines: Vec<ConfigLine>,
    parameters: HashMap<String, ConfigParameter>,
}

impl ConfigSection {
    /// Creates an empty section.
    ///
    /// Unless `name` is the sentinel, the section starts with a synthesized
    /// `[name]` header line so that it is written out as a proper section.
    pub fn new(name: &str) -> Self {
        let mut section = Self::headerless(name);
        if !name.is_empty() && name != SECTIONLESS_NAME {
            section.lines.push(ConfigLine::Header(format!("[{name}]\n")));
        }
        section
    }

    /// Creates a section with no lines at all; the parser adds the raw
    /// header itself.
    pub(crate) fn headerless(name: &str) -> Self {
        Self {
            name: name.to_owned(),
            lines: Vec::new(),
            parameters: HashMap::new(),
        }
    }

    /// The section name (without brackets).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns `true` for the implicit section holding lines that appear
    /// before the first header.
    pub fn is_sentinel(&self) -> bool {
        self.name == SECTIONLESS_NAME
    }

    /// Every stored line, in file order.
    pub fn lines(&self) -> &[ConfigLine] {
        &self.lines
    }

    /// Number of parameters.
    pub fn len(&self) -> usize {
        self.parameters.len()
    }

    /// Returns `true` if the section has no parameters.
    pub fn is_empty(&self) -> bool {
        self.parameters.is_empty()
    }

    /// Returns `true` if the section holds no lines at all (no header, no
    /// comments, no parameters).
    pub fn has_no_lines(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.parameters.contains_key(key)
    }

    /// Parameter names in file order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().filter_map(ConfigLine::key)
    }

    /// Parameters in file order.
    pub fn parameters(&self) -> impl Iterator<Item = &ConfigParameter> {
        self.keys().filter_map(|key| self.parameters.get(key))
    }

    /// Returns the raw value of `key`, or `None` if it is not set.
    pub fn get(&self, key: &str) -> Option<&str> {
        if key.is_empty() {
            return None;
        }
        self.parameters.get(key).map(ConfigParameter::value)
    }

    /// Returns the value of `key` with one pair of surrounding double
    /// quotes removed.
    pub fn get_unquoted(&self, key: &str) -> Option<&str> {
        self.get(key).map(unquote)
    }

    /// Parses the unquoted value of `key` as `T`.
    ///
    /// Returns `None` when the key is missing or the value does not parse.
    pub fn get_parsed<T: FromStr>(&self, key: &str) -> Option<T> {
        self.get_unquoted(key)?.parse().ok()
    }

    /// Reads `key` as a boolean (`true`/`false`/`1`/`0`, any case).
    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.get_unquoted(key).and_then(parse_bool)
    }

    /// Sets `key` to `value`, returning whether the section changed.
    ///
    /// An existing parameter keeps its line and position; a new one gets a
    /// `key=value` line appended to the end of the section.  Both sides are
    /// trimmed.
    ///
    /// Nothing is stored, and a warning is logged, when the pair would not
    /// read back the same after a save: an empty key, a key containing `=`
    /// or a line break, a key that starts like a comment, or a value with a
    /// line break.
    pub fn put(&mut self, key: &str, value: &str) -> bool {
        let key = key.trim();
        let value = value.trim();
        if let Some(reason) = unstorable_parameter(key, value) {
            warn!(section = %self.name, key, "ignoring put: {reason}");
            return false;
        }
        if !self.set_existing(key, value) {
            self.lines.push(ConfigLine::synthesized(key));
            self.parameters
                .insert(key.to_owned(), ConfigParameter::new(key, value));
        }
        true
    }

    /// Removes `key` and its line, returning the old value.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        let removed = self.parameters.remove(key)?;
        self.lines.retain(|line| line.key() != Some(key));
        Some(removed.value)
    }

    /// Appends an opaque line exactly as read.
    pub(crate) fn push_opaque(&mut self, line: ConfigLine) {
        self.lines.push(line);
    }

    /// Stores a parsed `name=value` line.
    ///
    /// A repeated name updates the first occurrence and does not add a line.
    pub(crate) fn upsert_parsed(&mut self, prefix: &str, key: &str, value: &str) {
        if self.set_existing(key, value) {
            return;
        }
        self.lines.push(ConfigLine::Parameter {
            prefix: prefix.to_owned(),
            key: key.to_owned(),
        });
        self.parameters
            .insert(key.to_owned(), ConfigParameter::new(key, value));
    }

    fn set_existing(&mut self, key: &str, value: &str) -> bool {
        match self.parameters.get_mut(key) {
            Some(param) => {
                param.value = value.to_owned();
                true
            }
            None => false,
        }
    }

    /// Appends the on-disk text of every line to `out`.
    pub(crate) fn render(&self, out: &mut String) {
        for line in &self.lines {
            line.render(&self.parameters, out);
        }
    }
}

/// Says why `key=value` cannot be written as a single parameter line.
fn unstorable_parameter(key: &str, value: &str) -> Option<&'static str> {
    let breaks_line = |text: &str| text.contains(['\n', '\r']);
    if key.is_empty() {
        Some("empty parameter name")
    } else if key.contains('=') || breaks_line(key) {
        Some("parameter name contains `=` or a line break")
    } else if key.starts_with(['#', ';']) || key.starts_with("//") {
        Some("parameter name starts like a comment")
    } else if breaks_line(value) {
        Some("value contains a line break")
    } else {
        None
    }
}

impl Keyed for ConfigSection {
    fn key(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rendered(section: &ConfigSection) -> String {
        let mut out = String::new();
        section.render(&mut out);
        out
    }

    #[test]
    fn test_new_named_section_has_header_line() {
        let section = ConfigSection::new("Video-General");
        assert_eq!(rendered(&section), "[Video-General]\n");
        assert!(!section.is_sentinel());
    }

    #[test]
    fn test_new_sentinel_section_has_no_header() {
        let section = ConfigSection::new(SECTIONLESS_NAME);
        assert!(section.has_no_lines());
        assert!(section.is_sentinel());
    }

    #[test]
    fn test_put_new_key_appends_line() {
        // Arrange
        let mut section = ConfigSection::new("Core");
        section.put("R4300Emulator", "2");

        // Act
        section.put("NoCompiledJump", "False");

        // Assert
        assert_eq!(
            rendered(&section),
            "[Core]\nR4300Emulator=2\nNoCompiledJump=False\n"
        );
        assert_eq!(section.len(), 2);
    }

    #[test]
    fn test_put_existing_key_updates_in_place() {
        let mut section = ConfigSection::new("Core");
        section.put("a", "1");
        section.put("b", "2");

        section.put("a", "9");

        assert_eq!(rendered(&section), "[Core]\na=9\nb=2\n");
    }

    #[test]
    fn test_put_trims_key_and_value() {
        let mut section = ConfigSection::new("S");
        section.put("  key ", "  v  ");
        assert_eq!(section.get("key"), Some("v"));
        assert_eq!(rendered(&section), "[S]\nkey=v\n");
    }

    #[test]
    fn test_put_empty_key_is_ignored() {
        let mut section = ConfigSection::new("S");
        section.put("   ", "value");
        assert!(section.is_empty());
        assert_eq!(rendered(&section), "[S]\n");
    }

    #[test]
    fn test_put_rejects_pairs_that_would_not_reload() {
        // Arrange
        let mut section = ConfigSection::new("S");
        section.put("kept", "1");

        // Act
        let stored = [
            section.put("a=b", "v"),
            section.put("a\nb", "v"),
            section.put("; note", "v"),
            section.put("//note", "v"),
            section.put("multi", "one\ntwo"),
            section.put("kept", "x\r\ny"),
        ];

        // Assert
        assert_eq!(stored, [false; 6]);
        assert_eq!(section.len(), 1);
        assert_eq!(section.get("kept"), Some("1"));
        assert_eq!(rendered(&section), "[S]\nkept=1\n");
    }

    #[test]
    fn test_put_reports_stored() {
        let mut section = ConfigSection::new("S");
        assert!(section.put("a", "1"));
        assert!(section.put("a", "2"));
        assert_eq!(section.get("a"), Some("2"));
    }

    #[test]
    fn test_put_empty_value_is_stored_as_empty_string() {
        let mut section = ConfigSection::new("S");
        section.put("key", "");
        assert_eq!(section.get("key"), Some(""));
        assert_eq!(rendered(&section), "[S]\nkey=\n");
    }

    #[test]
    fn test_get_empty_key_is_none() {
        let section = ConfigSection::new("S");
        assert_eq!(section.get(""), None);
    }

    #[test]
    fn test_remove_drops_parameter_and_line() {
        // Arrange
        let mut section = ConfigSection::new("S");
        section.put("a", "1");
        section.put("b", "2");

        // Act
        let old = section.remove("a");

        // Assert
        assert_eq!(old.as_deref(), Some("1"));
        assert!(!section.contains_key("a"));
        assert_eq!(rendered(&section), "[S]\nb=2\n");
    }

    #[test]
    fn test_remove_missing_key_returns_none() {
        let mut section = ConfigSection::new("S");
        assert_eq!(section.remove("nope"), None);
    }

    #[test]
    fn test_upsert_parsed_duplicate_updates_first_line() {
        let mut section = ConfigSection::headerless("S");
        section.upsert_parsed("k = ", "k", "1");
        section.upsert_parsed("k=", "k", "2");
        assert_eq!(section.lines().len(), 1);
        assert_eq!(rendered(&section), "k = 2\n");
    }

    #[test]
    fn test_keys_follow_line_order() {
        let mut section = ConfigSection::new("S");
        for key in ["zeta", "alpha", "mid"] {
            section.put(key, "x");
        }
        let keys: Vec<&str> = section.keys().collect();
        assert_eq!(keys, ["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_typed_getters() {
        // Arrange
        let mut section = ConfigSection::new("Audio");
        section.put("Volume", "\"80\"");
        section.put("Enabled", "True");
        section.put("Name", "\"speaker\"");
        section.put("Broken", "loud");

        // Act / Assert
        assert_eq!(section.get_parsed::<u32>("Volume"), Some(80));
        assert_eq!(section.get_bool("Enabled"), Some(true));
        assert_eq!(section.get_unquoted("Name"), Some("speaker"));
        assert_eq!(section.get("Name"), Some("\"speaker\""));
        assert_eq!(section.get_parsed::<u32>("Broken"), None);
        assert_eq!(section.get_bool("Broken"), None);
    }
}
