//! The in-memory model of one config file.

use std::fmt;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use super::parser::parse_sections;
use super::section::ConfigSection;
use super::SECTIONLESS_NAME;
use crate::error::ConfigError;
use crate::ordered::OrderedSections;
use crate::pattern::SectionPattern;
use crate::storage;

/// An ordered, editable config file.
///
/// Sections are kept in file order alongside a name index; every section
/// appears exactly once in both.
///
/// # Loading never fails
///
/// [`ConfigDocument::load`] always returns a usable document.  When the file
/// is missing or unreadable the document is empty and
/// [`ConfigDocument::is_loaded`] is `false`; [`ConfigDocument::save`] then
/// creates the file.  Use [`ConfigDocument::try_load`] to get the error
/// instead.
#[derive(Debug, Clone, Default)]
pub struct ConfigDocument {
    path: Option<PathBuf>,
    sections: OrderedSections<ConfigSection>,
    loaded: bool,
}

impl ConfigDocument {
    /// Creates an empty document with no backing file.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads `path`, falling back to an empty document bound to `path`.
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::try_load(path) {
            Ok(doc) => doc,
            Err(err) => {
                match err {
                    ConfigError::NotFound { .. } => debug!("{err}; starting empty"),
                    _ => warn!("{err}; starting empty"),
                }
                Self::empty_at(path)
            }
        }
    }

    /// Creates an empty, not-loaded document whose [`save`](Self::save)
    /// writes to `path`.
    pub fn empty_at(path: impl AsRef<Path>) -> Self {
        Self {
            path: Some(path.as_ref().to_path_buf()),
            ..Self::default()
        }
    }

    /// Loads `path`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NotFound`] if the file does not exist and
    /// [`ConfigError::Io`] if it cannot be read.
    pub fn try_load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = storage::read_text(path)?;
        let mut doc = Self::parse_str(&text);
        doc.path = Some(path.to_path_buf());
        doc.loaded = true;
        debug!(sections = doc.len(), "loaded {}", path.display());
        Ok(doc)
    }

    /// Parses config text.  The result has no backing file.
    pub fn parse_str(text: &str) -> Self {
        let mut doc = Self::new();
        for section in parse_sections(text) {
            doc.insert_parsed(section);
        }
        doc
    }

    /// Reads and parses everything from `reader`.  The result has no
    /// backing file.
    ///
    /// # Errors
    ///
    /// Returns any error raised by `reader`.
    pub fn from_reader<R: Read>(mut reader: R) -> std::io::Result<Self> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;
        Ok(Self::parse_str(&String::from_utf8_lossy(&bytes)))
    }

    /// Re-reads the backing file, discarding unsaved changes.
    ///
    /// Returns `true` if the file was read.  On failure the document is left
    /// empty; a document without a backing file is left untouched.
    pub fn reload(&mut self) -> bool {
        let Some(path) = self.path.clone() else {
            return false;
        };
        match Self::try_load(&path) {
            Ok(doc) => {
                *self = doc;
                true
            }
            Err(err) => {
                warn!("reload failed: {err}");
                self.clear();
                self.loaded = false;
                false
            }
        }
    }

    /// The file this document was loaded from and saves to.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// `true` if the last load actually read a file.
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Number of sections, including the sentinel.
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Sections in file order.
    pub fn sections(&self) -> impl Iterator<Item = &ConfigSection> {
        self.sections.iter()
    }

    /// Section names in file order.
    pub fn section_names(&self) -> impl Iterator<Item = &str> {
        self.sections.iter().map(ConfigSection::name)
    }

    /// Looks up a section by exact name.
    pub fn section(&self, name: &str) -> Option<&ConfigSection> {
        self.sections.get(name)
    }

    pub fn section_mut(&mut self, name: &str) -> Option<&mut ConfigSection> {
        self.sections.get_mut(name)
    }

    /// Returns the section called `name`, appending an empty one (with a
    /// `[name]` header) if it does not exist yet.
    pub fn section_or_insert(&mut self, name: &str) -> &mut ConfigSection {
        self.sections
            .get_or_insert_with(name, || ConfigSection::new(name))
    }

    /// Returns the first section, in file order, whose whole name matches
    /// `pattern`.
    ///
    /// When several sections match, the earliest one wins.
    pub fn match_section(&self, pattern: &SectionPattern) -> Option<&ConfigSection> {
        self.sections.iter().find(|s| pattern.is_match(s.name()))
    }

    /// Compiles `pattern` and calls [`ConfigDocument::match_section`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidPattern`] if `pattern` does not compile.
    pub fn match_pattern(&self, pattern: &str) -> Result<Option<&ConfigSection>, ConfigError> {
        let pattern = SectionPattern::new(pattern)?;
        Ok(self.match_section(&pattern))
    }

    /// Returns the raw value of `key` in `section`.
    pub fn get(&self, section: &str, key: &str) -> Option<&str> {
        self.section(section)?.get(key)
    }

    /// Sets `key` in `section` to `value`, creating the section at the end
    /// of the document if needed.  Returns whether the value was stored.
    ///
    /// An existing parameter is updated at its original line.  A section
    /// name that could not be written as a `[name]` header (empty, padded
    /// with spaces, or containing `]`, `=` or a line break) is refused with a
    /// warning, as are the keys and values [`ConfigSection::put`] refuses.
    pub fn put(&mut self, section: &str, key: &str, value: &str) -> bool {
        if section != SECTIONLESS_NAME && !is_storable_section_name(section) {
            warn!(section, "ignoring put: section name cannot be written as a header");
            return false;
        }
        if let Some(existing) = self.sections.get_mut(section) {
            return existing.put(key, value);
        }
        // A refused pair must not leave an empty new section behind.
        let mut fresh = ConfigSection::new(section);
        if !fresh.put(key, value) {
            return false;
        }
        self.sections.insert(fresh);
        true
    }

    /// Removes a whole section.  Takes effect on disk at the next save.
    pub fn remove_section(&mut self, name: &str) -> Option<ConfigSection> {
        self.sections.remove(name)
    }

    /// Drops every section.  The document stays usable.
    pub fn clear(&mut self) {
        self.sections.clear();
    }

    /// Writes the document to its backing file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NoPath`] if the document has no backing file,
    /// or [`ConfigError::Io`] if writing fails.
    pub fn save(&self) -> Result<(), ConfigError> {
        let path = self.path.as_deref().ok_or(ConfigError::NoPath)?;
        self.save_to(path)
    }

    /// Writes the document to `path`, replacing any existing file.
    ///
    /// The write goes through a temporary file that is renamed into place,
    /// so a failure leaves the old file as it was.  In-memory state is never
    /// modified.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if writing fails.
    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        storage::write_atomically(path, &self.to_string())?;
        info!(sections = self.len(), "saved {}", path.display());
        Ok(())
    }

    /// Writes the serialized document to `writer`.
    ///
    /// # Errors
    ///
    /// Returns any error raised by `writer`.
    pub fn write_to<W: Write>(&self, mut writer: W) -> std::io::Result<()> {
        writer.write_all(self.to_string().as_bytes())
    }

    /// Adds a parsed section.  A repeated name replaces the earlier
    /// section's contents but keeps its position.
    fn insert_parsed(&mut self, section: ConfigSection) {
        if let Some(earlier) = self.sections.insert(section) {
            debug!(section = %earlier.name(), "duplicate section replaces earlier one");
        }
    }
}

/// A name that reads back unchanged from its `[name]` header line.
fn is_storable_section_name(name: &str) -> bool {
    !name.is_empty()
        && name.trim() == name
        && !name.contains([']', '=', '\n', '\r'])
}

impl fmt::Display for ConfigDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::new();
        for section in self.sections.iter() {
            section.render(&mut out);
        }
        f.write_str(&out)
    }
}
