//! Listing the cheats available for one ROM.
//!
//! ROM headers show the CRC as two words separated by a space
//! (`635A2BFF 8B022326`) while cheat section keys use a dash and carry a
//! country suffix (`635A2BFF-8B022326-C:45`).  The lookup replaces spaces
//! with dashes and matches the result literally, followed by any suffix.

use std::fmt::Write as _;

use m64_config::{CheatFile, CheatSection};

use super::CommandError;

/// Formats every block of the first section whose key starts with `crc`.
///
/// ```text
/// 635A2BFF-8B022326-C:45  Super Mario 64 (U)
/// 0: Have 255 Lives
///      8033B21D 00FF
/// 1: Level Select - Pick the course to start in
///      8033B21E ????
///        0001 Bob-omb Battlefield
/// ```
///
/// # Errors
///
/// Returns [`CommandError::NoMatch`] if no section key starts with `crc`.
pub fn list_cheats(file: &CheatFile, crc: &str) -> Result<String, CommandError> {
    let section = file
        .find_by_crc(crc)
        .ok_or_else(|| CommandError::NoMatch(crc.trim().to_owned()))?;
    Ok(format_section(section))
}

fn format_section(section: &CheatSection) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = writeln!(out, "{}  {}", section.key(), section.good_name());
    for (i, block) in section.blocks().enumerate() {
        match &block.description {
            Some(description) => {
                let _ = writeln!(out, "{i}: {} - {description}", block.name);
            }
            None => {
                let _ = writeln!(out, "{i}: {}", block.name);
            }
        }
        for code in block.codes() {
            let _ = writeln!(out, "     {} {}", code.address, code.code);
            for option in code.options() {
                let _ = writeln!(out, "       {} {}", option.code, option.name);
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const CHEATS: &str = "\
crc 635A2BFF-8B022326-C:45
gn Super Mario 64 (U)
 cn Have 255 Lives
  8033B21D 00FF

 cn Level Select
  cd Pick the course to start in
  8033B21E ???? 0001:\"Bob-omb Battlefield\"

crc 4EAA3D0E-74757C24-C:45
gn Mario Kart 64 (U)
";

    #[test]
    fn test_list_cheats_formats_blocks_codes_and_options() {
        // Arrange
        let file = CheatFile::parse_str(CHEATS);

        // Act
        let out = list_cheats(&file, "635A2BFF 8B022326").unwrap();

        // Assert
        assert_eq!(
            out,
            "\
635A2BFF-8B022326-C:45  Super Mario 64 (U)
0: Have 255 Lives
     8033B21D 00FF
1: Level Select - Pick the course to start in
     8033B21E ????
       0001 Bob-omb Battlefield
"
        );
    }

    #[test]
    fn test_list_cheats_section_without_blocks() {
        let file = CheatFile::parse_str(CHEATS);
        let out = list_cheats(&file, "4EAA3D0E-74757C24").unwrap();
        assert_eq!(out, "4EAA3D0E-74757C24-C:45  Mario Kart 64 (U)\n");
    }

    #[test]
    fn test_list_cheats_unknown_crc_is_no_match() {
        let file = CheatFile::parse_str(CHEATS);
        assert!(matches!(
            list_cheats(&file, "00000000 00000000"),
            Err(CommandError::NoMatch(_))
        ));
    }

    #[test]
    fn test_list_cheats_treats_crc_as_literal_text() {
        // Arrange: `.` and `(` would be regex syntax if passed through
        let file = CheatFile::parse_str(CHEATS);

        // Act
        let dotted = list_cheats(&file, "635A2BFF.8B022326");
        let unbalanced = list_cheats(&file, "635A2BFF (");

        // Assert
        assert!(matches!(dotted, Err(CommandError::NoMatch(ref crc)) if crc == "635A2BFF.8B022326"));
        assert!(matches!(unbalanced, Err(CommandError::NoMatch(_))));
    }
}
