//! Line parser for cheat files.
//!
//! Parsing happens in two passes.  The text is first cut into sections at
//! every `crc ` line (text before the first one goes to the [`NO_KEY`]
//! section), then each section body is read line by line:
//!
//! | Line              | Meaning                                   |
//! |-------------------|-------------------------------------------|
//! | empty, `//...`    | kept verbatim                             |
//! | `gn NAME`         | ROM name, kept verbatim                   |
//! | ` cn NAME`        | starts a cheat block                      |
//! | anything else     | warning; the rest of the section is lost  |
//!
//! Inside a block, `  cd TEXT` sets the description and code lines add
//! codes.  A blank line ends the block, another ` cn ` starts the next one,
//! and unrecognised text ends the block with a warning.  Comments inside a
//! block are kept, but they are written back ahead of the block.

use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, warn};

use super::block::CheatBlock;
use super::code::{CheatCode, CheatOption, OPTION_PLACEHOLDER};
use super::section::{CheatElement, CheatSection};
use super::NO_KEY;

/// `  ADDRESS VALUE[ OPTIONS]`, where VALUE is four hex digits or `???? `.
static CODE_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^  ([0-9a-fA-F]{8}) ([0-9a-fA-F]{4}|\?{4} )(.*)$")
        .expect("cheat code pattern is valid")
});

/// `CODE:"NAME"` with `\"` allowed inside the name.
static OPTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"([0-9a-fA-F]{4}):"([^\\"]*(?:\\"[^\\"]*)*)""#)
        .expect("cheat option pattern is valid")
});

/// How a cheat block ended.
enum BlockEnd {
    /// A ` cn ` line started the block with this name.
    Next(String),
    /// A blank line closed the block.
    Blank,
    /// End of section or unrecognised text.
    Stop,
}

/// Splits `text` into cheat sections in file order.  The first section is
/// always the [`NO_KEY`] preamble.
pub(crate) fn parse_sections(text: &str) -> Vec<CheatSection> {
    let mut sections = Vec::new();
    let mut key = NO_KEY;
    let mut body: Vec<&str> = Vec::new();
    for line in text.lines() {
        if let Some(next) = line.strip_prefix("crc ") {
            sections.push(parse_section(key, &body));
            key = next;
            body.clear();
        } else {
            body.push(line);
        }
    }
    sections.push(parse_section(key, &body));
    sections
}

fn parse_section(key: &str, body: &[&str]) -> CheatSection {
    let mut section = CheatSection::parsed(key);
    let mut lines = body.iter().copied();
    while let Some(line) = lines.next() {
        if line.is_empty() || line.starts_with("//") {
            section.push_element(CheatElement::Line(line.to_owned()));
        } else if let Some(name) = line.strip_prefix("gn ") {
            section.set_parsed_good_name(name);
            section.push_element(CheatElement::Line(line.to_owned()));
        } else if let Some(first) = line.strip_prefix(" cn ") {
            let mut name = first.to_owned();
            while !name.is_empty() {
                let (block, end) = parse_block(&name, &mut lines, &mut section);
                section.push_element(CheatElement::Block(block));
                match end {
                    BlockEnd::Next(next) => name = next,
                    BlockEnd::Blank => {
                        section.push_element(CheatElement::Line(String::new()));
                        break;
                    }
                    BlockEnd::Stop => break,
                }
            }
        } else {
            warn!(section = %key, "unknown cheat syntax {line:?}; skipping rest of section");
            break;
        }
    }
    debug!(section = %key, blocks = section.len(), "parsed cheat section");
    section
}

fn parse_block<'a, I>(name: &str, lines: &mut I, section: &mut CheatSection) -> (CheatBlock, BlockEnd)
where
    I: Iterator<Item = &'a str>,
{
    let mut block = CheatBlock::new(name, None);
    for line in lines.by_ref() {
        if line.is_empty() {
            return (block, BlockEnd::Blank);
        } else if line.starts_with("//") {
            section.push_element(CheatElement::Line(line.to_owned()));
        } else if let Some(description) = line.strip_prefix("  cd ") {
            block.description = Some(description.to_owned());
        } else if let Some(next) = line.strip_prefix(" cn ") {
            return (block, BlockEnd::Next(next.to_owned()));
        } else if let Some(code) = parse_code(line) {
            block.push(code);
        } else {
            warn!(
                section = %section.key(),
                block = %name,
                "unknown cheat syntax {line:?}; ending block"
            );
            return (block, BlockEnd::Stop);
        }
    }
    (block, BlockEnd::Stop)
}

fn parse_code(line: &str) -> Option<CheatCode> {
    let caps = CODE_LINE.captures(line)?;
    let address = &caps[1];
    let value = caps[2].trim_end();
    if value == OPTION_PLACEHOLDER {
        let options = OPTION
            .captures_iter(&caps[3])
            .map(|option| CheatOption::new(&option[1], &option[2]))
            .collect();
        Some(CheatCode::with_options(address, options))
    } else {
        Some(CheatCode::new(address, value))
    }
}
