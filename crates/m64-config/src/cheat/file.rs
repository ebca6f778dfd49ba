//! The in-memory model of a whole cheat database.

use std::fmt;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use super::parser::parse_sections;
use super::section::CheatSection;
use crate::error::ConfigError;
use crate::ordered::OrderedSections;
use crate::pattern::SectionPattern;
use crate::storage;

/// An ordered, editable cheat database.
///
/// Loading follows the same rules as [`crate::ConfigDocument`]:
/// [`CheatFile::load`] never fails and a missing file gives an empty
/// database that [`CheatFile::save`] will create.
#[derive(Debug, Clone, Default)]
pub struct CheatFile {
    path: Option<PathBuf>,
    sections: OrderedSections<CheatSection>,
    loaded: bool,
}

impl CheatFile {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads `path`, falling back to an empty database bound to `path`.
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::try_load(path) {
            Ok(file) => file,
            Err(err) => {
                match err {
                    ConfigError::NotFound { .. } => debug!("{err}; starting empty"),
                    _ => warn!("{err}; starting empty"),
                }
                Self {
                    path: Some(path.to_path_buf()),
                    ..Self::default()
                }
            }
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
        let mut file = Self::parse_str(&text);
        file.path = Some(path.to_path_buf());
        file.loaded = true;
        debug!(sections = file.len(), "loaded cheats from {}", path.display());
        Ok(file)
    }

    /// Parses cheat text.  The result has no backing file.
    pub fn parse_str(text: &str) -> Self {
        let mut file = Self::new();
        for section in parse_sections(text) {
            if let Some(earlier) = file.sections.insert(section) {
                debug!(section = %earlier.key(), "duplicate cheat section replaces earlier one");
            }
        }
        file
    }

    /// Reads and parses everything from `reader`.
    ///
    /// # Errors
    ///
    /// Returns any error raised by `reader`.
    pub fn from_reader<R: Read>(mut reader: R) -> std::io::Result<Self> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;
        Ok(Self::parse_str(&String::from_utf8_lossy(&bytes)))
    }

    /// Re-reads the backing file, discarding unsaved changes.  Returns
    /// `true` if the file was read.
    pub fn reload(&mut self) -> bool {
        let Some(path) = self.path.clone() else {
            return false;
        };
        match Self::try_load(&path) {
            Ok(file) => {
                *self = file;
                true
            }
            Err(err) => {
                warn!("cheat reload failed: {err}");
                self.sections.clear();
                self.loaded = false;
                false
            }
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Number of sections, including the [`super::NO_KEY`] preamble.
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Section keys in file order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.sections.iter().map(CheatSection::key)
    }

    pub fn sections(&self) -> impl Iterator<Item = &CheatSection> {
        self.sections.iter()
    }

    pub fn get(&self, key: &str) -> Option<&CheatSection> {
        self.sections.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut CheatSection> {
        self.sections.get_mut(key)
    }

    /// Returns the first section, in file order, whose whole key matches
    /// `pattern`.
    pub fn match_section(&self, pattern: &SectionPattern) -> Option<&CheatSection> {
        self.sections.iter().find(|s| pattern.is_match(s.key()))
    }

    /// Compiles `pattern` and calls [`CheatFile::match_section`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidPattern`] if `pattern` does not compile.
    pub fn match_pattern(&self, pattern: &str) -> Result<Option<&CheatSection>, ConfigError> {
        let pattern = SectionPattern::new(pattern)?;
        Ok(self.match_section(&pattern))
    }

    /// Finds the cheats for a ROM by its CRC as shown in ROM headers
    /// (`"635A2BFF 8B022326"`), whatever the country suffix.
    pub fn find_by_crc(&self, crc: &str) -> Option<&CheatSection> {
        let prefix = regex::escape(&crc.trim().replace(' ', "-"));
        // An escaped literal followed by `.*` always compiles.
        let pattern = SectionPattern::new(&format!("{prefix}.*")).ok()?;
        self.match_section(&pattern)
    }

    /// Stores `section` under its key.  A section with the same key is
    /// replaced in place and returned; otherwise the new one is appended.
    pub fn add(&mut self, section: CheatSection) -> Option<CheatSection> {
        self.sections.insert(section)
    }

    pub fn remove(&mut self, key: &str) -> Option<CheatSection> {
        self.sections.remove(key)
    }

    pub fn clear(&mut self) {
        self.sections.clear();
    }

    /// Writes the database to its backing file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NoPath`] without a backing file, or
    /// [`ConfigError::Io`] if writing fails.
    pub fn save(&self) -> Result<(), ConfigError> {
        let path = self.path.as_deref().ok_or(ConfigError::NoPath)?;
        self.save_to(path)
    }

    /// Writes the database to `path` through a temporary file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if writing fails.
    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        storage::write_atomically(path, &self.to_string())?;
        info!(sections = self.len(), "saved cheats to {}", path.display());
        Ok(())
    }

    /// # Errors
    ///
    /// Returns any error raised by `writer`.
    pub fn write_to<W: Write>(&self, mut writer: W) -> std::io::Result<()> {
        writer.write_all(self.to_string().as_bytes())
    }
}

impl fmt::Display for CheatFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::new();
        for section in self.sections.iter() {
            section.render(&mut out);
        }
        f.write_str(&out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cheat::{CheatBlock, CheatCode, NO_KEY};

    const SAMPLE: &str = "\
crc 635A2BFF-8B022326-C:45
gn SUPER MARIO 64
 cn Infinite Lives
  8033B21D 0064

crc 635A2BFF-8B022326-C:4A
gn SUPER MARIO 64 (J)
 cn Infinite Lives
  8033B21D 0064

";

    #[test]
    fn test_unmodified_file_renders_identically() {
        let file = CheatFile::parse_str(SAMPLE);
        assert_eq!(file.to_string(), SAMPLE);
    }

    #[test]
    fn test_keys_in_file_order() {
        let file = CheatFile::parse_str(SAMPLE);
        let keys: Vec<&str> = file.keys().collect();
        assert_eq!(
            keys,
            [NO_KEY, "635A2BFF-8B022326-C:45", "635A2BFF-8B022326-C:4A"]
        );
    }

    #[test]
    fn test_find_by_crc_ignores_country() {
        // Arrange
        let file = CheatFile::parse_str(SAMPLE);

        // Act
        let found = file.find_by_crc("635A2BFF 8B022326");

        // Assert
        assert_eq!(found.map(CheatSection::key), Some("635A2BFF-8B022326-C:45"));
        assert!(file.find_by_crc("00000000 00000000").is_none());
    }

    #[test]
    fn test_add_new_section_appends() {
        // Arrange
        let mut file = CheatFile::parse_str(SAMPLE);
        let mut section = CheatSection::new("11111111-22222222", "New Game", "45");
        let mut block = CheatBlock::new("Moon Jump", None);
        block.push(CheatCode::new("D033AFA1", "0020"));
        section.push_block(block);

        // Act
        let replaced = file.add(section);

        // Assert
        assert!(replaced.is_none());
        assert!(file.to_string().ends_with(
            "crc 11111111-22222222-C:45\ngn New Game\n cn Moon Jump\n  D033AFA1 0020\n\n"
        ));
    }

    #[test]
    fn test_add_existing_key_replaces_in_place() {
        let mut file = CheatFile::parse_str(SAMPLE);
        let section = CheatSection::new("635A2BFF-8B022326", "Renamed", "45");

        let replaced = file.add(section);

        assert_eq!(replaced.map(|s| s.good_name().to_owned()).as_deref(), Some("SUPER MARIO 64"));
        assert_eq!(file.keys().nth(1), Some("635A2BFF-8B022326-C:45"));
        assert_eq!(file.get("635A2BFF-8B022326-C:45").map(CheatSection::good_name), Some("Renamed"));
    }

    #[test]
    fn test_remove_section() {
        let mut file = CheatFile::parse_str(SAMPLE);
        assert!(file.remove("635A2BFF-8B022326-C:45").is_some());
        assert!(file.get("635A2BFF-8B022326-C:45").is_none());
        assert!(file.get("635A2BFF-8B022326-C:4A").is_some());
        assert!(!file.to_string().contains("C:45"));
    }

    #[test]
    fn test_edit_block_through_get_mut() {
        let mut file = CheatFile::parse_str(SAMPLE);

        let section = file.get_mut("635A2BFF-8B022326-C:4A").unwrap();
        section.block_mut(0).unwrap().code_mut(0).unwrap().code = "0063".to_owned();

        assert!(file.to_string().contains("gn SUPER MARIO 64 (J)\n cn Infinite Lives\n  8033B21D 0063\n"));
    }

    #[test]
    fn test_save_without_path_is_no_path_error() {
        assert!(matches!(CheatFile::new().save(), Err(ConfigError::NoPath)));
    }

    #[test]
    fn test_match_invalid_pattern_is_error() {
        let file = CheatFile::new();
        assert!(matches!(file.match_pattern("("), Err(ConfigError::InvalidPattern(_))));
    }
}
