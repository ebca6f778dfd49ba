//! In-memory edits.  The caller saves the document afterwards.

use m64_config::ConfigDocument;
use tracing::info;

use super::CommandError;

/// Sets `key` in `section`, creating either as needed.
///
/// # Errors
///
/// Returns [`CommandError::Unstorable`] when the names or the value could
/// not be read back from the saved file unchanged.  The document is left
/// as it was.
pub fn put_value(
    doc: &mut ConfigDocument,
    section: &str,
    key: &str,
    value: &str,
) -> Result<(), CommandError> {
    if !doc.put(section, key, value) {
        return Err(CommandError::Unstorable {
            section: section.to_owned(),
            key: key.to_owned(),
        });
    }
    info!(section, key, "parameter set");
    Ok(())
}

/// Removes `key` from `section`, or the whole section when `key` is `None`.
///
/// # Errors
///
/// Returns [`CommandError::NoSuchSection`] or [`CommandError::NoSuchKey`]
/// when there is nothing to remove.
pub fn remove(doc: &mut ConfigDocument, section: &str, key: Option<&str>) -> Result<(), CommandError> {
    match key {
        Some(key) => {
            doc.section_mut(section)
                .ok_or_else(|| CommandError::NoSuchSection(section.to_owned()))?
                .remove(key)
                .ok_or_else(|| CommandError::NoSuchKey {
                    section: section.to_owned(),
                    key: key.to_owned(),
                })?;
            info!(section, key, "parameter removed");
        }
        None => {
            doc.remove_section(section)
                .ok_or_else(|| CommandError::NoSuchSection(section.to_owned()))?;
            info!(section, "section removed");
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_put_value_updates_in_place() {
        // Arrange
        let mut doc = ConfigDocument::parse_str("[Core]\nVersion = 1\nOSD = True\n");

        // Act
        put_value(&mut doc, "Core", "Version", "2").unwrap();

        // Assert
        assert_eq!(doc.to_string(), "[Core]\nVersion = 2\nOSD = True\n");
    }

    #[test]
    fn test_put_value_creates_section() {
        let mut doc = ConfigDocument::parse_str("[Core]\nVersion = 1\n");
        put_value(&mut doc, "Audio", "Volume", "80").unwrap();
        assert_eq!(doc.to_string(), "[Core]\nVersion = 1\n[Audio]\nVolume=80\n");
    }

    #[test]
    fn test_put_value_unstorable_is_error_and_leaves_document() {
        // Arrange
        let mut doc = ConfigDocument::parse_str("[Core]\nVersion = 1\n");

        // Act
        let result = put_value(&mut doc, "S]x", "a=b", "v");

        // Assert
        assert!(matches!(
            result,
            Err(CommandError::Unstorable { ref section, ref key }) if section == "S]x" && key == "a=b"
        ));
        assert_eq!(doc.to_string(), "[Core]\nVersion = 1\n");
    }

    #[test]
    fn test_remove_key_and_section() {
        // Arrange
        let mut doc = ConfigDocument::parse_str("[A]\nx=1\ny=2\n[B]\nz=3\n");

        // Act
        remove(&mut doc, "A", Some("x")).unwrap();
        remove(&mut doc, "B", None).unwrap();

        // Assert
        assert_eq!(doc.to_string(), "[A]\ny=2\n");
    }

    #[test]
    fn test_remove_missing_is_error() {
        let mut doc = ConfigDocument::parse_str("[A]\nx=1\n");
        assert!(matches!(
            remove(&mut doc, "Z", None),
            Err(CommandError::NoSuchSection(_))
        ));
        assert!(matches!(
            remove(&mut doc, "A", Some("nope")),
            Err(CommandError::NoSuchKey { .. })
        ));
    }
}
