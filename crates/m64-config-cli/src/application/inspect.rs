//! Read-only queries: section names, single values, pattern lookup.

use m64_config::{unquote, ConfigDocument};

use super::CommandError;

/// One section name per line, in file order.
///
/// The sentinel section is listed only when it holds lines or when
/// `show_sentinel` is set.
pub fn list_sections(doc: &ConfigDocument, show_sentinel: bool) -> String {
    let mut out = String::new();
    for section in doc.sections() {
        if section.is_sentinel() && !show_sentinel && section.has_no_lines() {
            continue;
        }
        out.push_str(section.name());
        out.push('\n');
    }
    out
}

/// The value of `key` in `section`, followed by a newline.
///
/// # Errors
///
/// Returns [`CommandError::NoSuchSection`] or [`CommandError::NoSuchKey`]
/// when the value does not exist.
pub fn get_value(
    doc: &ConfigDocument,
    section: &str,
    key: &str,
    strip_quotes: bool,
) -> Result<String, CommandError> {
    let found = doc
        .section(section)
        .ok_or_else(|| CommandError::NoSuchSection(section.to_owned()))?;
    let value = found.get(key).ok_or_else(|| CommandError::NoSuchKey {
        section: section.to_owned(),
        key: key.to_owned(),
    })?;
    let value = if strip_quotes { unquote(value) } else { value };
    Ok(format!("{value}\n"))
}

/// The name of the first section whose whole name matches `pattern`.
///
/// # Errors
///
/// Returns [`CommandError::Config`] for an invalid pattern and
/// [`CommandError::NoMatch`] when nothing matches.
pub fn match_section(doc: &ConfigDocument, pattern: &str) -> Result<String, CommandError> {
    let section = doc
        .match_pattern(pattern)?
        .ok_or_else(|| CommandError::NoMatch(pattern.to_owned()))?;
    Ok(format!("{}\n", section.name()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use m64_config::SECTIONLESS_NAME;

    const TEXT: &str = "\
version = 2
[Core]
ScreenshotPath = \"/sdcard/shots\"
[Video-General]
Fullscreen = True
";

    #[test]
    fn test_list_sections_shows_sentinel_with_content() {
        // Arrange
        let doc = ConfigDocument::parse_str(TEXT);

        // Act
        let out = list_sections(&doc, false);

        // Assert
        assert_eq!(out, format!("{SECTIONLESS_NAME}\nCore\nVideo-General\n"));
    }

    #[test]
    fn test_list_sections_hides_empty_sentinel() {
        let doc = ConfigDocument::parse_str("[Core]\n");
        assert_eq!(list_sections(&doc, false), "Core\n");
        assert_eq!(
            list_sections(&doc, true),
            format!("{SECTIONLESS_NAME}\nCore\n")
        );
    }

    #[test]
    fn test_get_value_raw_and_unquoted() {
        let doc = ConfigDocument::parse_str(TEXT);
        assert_eq!(
            get_value(&doc, "Core", "ScreenshotPath", false).unwrap(),
            "\"/sdcard/shots\"\n"
        );
        assert_eq!(
            get_value(&doc, "Core", "ScreenshotPath", true).unwrap(),
            "/sdcard/shots\n"
        );
    }

    #[test]
    fn test_get_value_missing_section_and_key() {
        let doc = ConfigDocument::parse_str(TEXT);
        assert!(matches!(
            get_value(&doc, "Audio", "Volume", false),
            Err(CommandError::NoSuchSection(name)) if name == "Audio"
        ));
        assert!(matches!(
            get_value(&doc, "Core", "Volume", false),
            Err(CommandError::NoSuchKey { .. })
        ));
    }

    #[test]
    fn test_match_section_first_match_and_no_match() {
        let doc = ConfigDocument::parse_str(TEXT);
        assert_eq!(match_section(&doc, "Video-.*").unwrap(), "Video-General\n");
        assert!(matches!(
            match_section(&doc, "Audio.*"),
            Err(CommandError::NoMatch(_))
        ));
        assert!(matches!(
            match_section(&doc, "("),
            Err(CommandError::Config(_))
        ));
    }
}
