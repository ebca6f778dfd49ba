//! Whole-document output.
//!
//! `text` is the exact on-disk serialization.  `json` is a structured view
//! for scripts:
//!
//! ```json
//! [
//!   { "name": "Core", "parameters": [ { "key": "Version", "value": "1.01" } ] }
//! ]
//! ```
//!
//! Values are the raw stored strings, quotes included.

use clap::ValueEnum;
use m64_config::ConfigDocument;
use serde::Serialize;

use super::CommandError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum DumpFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Serialize)]
struct SectionView<'a> {
    name: &'a str,
    parameters: Vec<ParameterView<'a>>,
}

#[derive(Debug, Serialize)]
struct ParameterView<'a> {
    key: &'a str,
    value: &'a str,
}

/// Renders `doc` in `format`.  JSON output skips an empty sentinel section.
///
/// # Errors
///
/// Returns [`CommandError::Json`] if JSON encoding fails.
pub fn dump(doc: &ConfigDocument, format: DumpFormat) -> Result<String, CommandError> {
    match format {
        DumpFormat::Text => Ok(doc.to_string()),
        DumpFormat::Json => {
            let view: Vec<SectionView<'_>> = doc
                .sections()
                .filter(|section| !(section.is_sentinel() && section.is_empty()))
                .map(|section| SectionView {
                    name: section.name(),
                    parameters: section
                        .parameters()
                        .map(|p| ParameterView {
                            key: p.name(),
                            value: p.value(),
                        })
                        .collect(),
                })
                .collect();
            let mut json = serde_json::to_string_pretty(&view)?;
            json.push('\n');
            Ok(json)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEXT: &str = "; comment\n[Core]\nVersion = 1.01\nPath = \"x\"\n[Empty]\n";

    #[test]
    fn test_text_dump_is_verbatim() {
        let doc = ConfigDocument::parse_str(TEXT);
        assert_eq!(dump(&doc, DumpFormat::Text).unwrap(), TEXT);
    }

    #[test]
    fn test_json_dump_lists_sections_and_parameters_in_order() {
        // Arrange
        let doc = ConfigDocument::parse_str(TEXT);

        // Act
        let json = dump(&doc, DumpFormat::Json).unwrap();

        // Assert
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(
            parsed,
            serde_json::json!([
                { "name": "Core", "parameters": [
                    { "key": "Version", "value": "1.01" },
                    { "key": "Path", "value": "\"x\"" }
                ] },
                { "name": "Empty", "parameters": [] }
            ])
        );
    }

    #[test]
    fn test_default_format_is_text() {
        assert_eq!(DumpFormat::default(), DumpFormat::Text);
    }
}
