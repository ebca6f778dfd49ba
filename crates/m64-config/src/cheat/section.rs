//! The cheats of one ROM (`crc ...` up to the next `crc ...`).

use super::block::CheatBlock;
use super::NO_KEY;
use crate::error::ConfigError;
use crate::ordered::Keyed;

/// A stored element of a section: either a line kept verbatim or a parsed
/// cheat block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheatElement {
    /// Header, good-name, comment, or blank line, without its newline.
    Line(String),
    Block(CheatBlock),
}

/// The cheats of a single ROM.
///
/// Blocks are stored among the verbatim lines in file order; the block
/// accessors count blocks only, so `block(0)` is the first ` cn ` entry no
/// matter how many comment lines precede it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheatSection {
    key: String,
    good_name: String,
    elements: Vec<CheatElement>,
}

impl CheatSection {
    /// Creates an empty section for a ROM.
    ///
    /// The key is `"<crc>-C:<country>"` and the section starts with the
    /// `crc <key>` and `gn <name>` header lines.
    ///
    /// ```rust
    /// use m64_config::CheatSection;
    ///
    /// let section = CheatSection::new("635A2BFF-8B022326", "SUPER MARIO 64", "45");
    /// assert_eq!(section.key(), "635A2BFF-8B022326-C:45");
    /// assert_eq!(section.good_name(), "SUPER MARIO 64");
    /// ```
    pub fn new(crc: &str, good_name: &str, country: &str) -> Self {
        let key = format!("{crc}-C:{country}");
        let mut elements = Vec::new();
        if !crc.is_empty() && crc != NO_KEY {
            elements.push(CheatElement::Line(format!("crc {key}")));
            elements.push(CheatElement::Line(format!("gn {good_name}")));
        }
        Self {
            key,
            good_name: good_name.to_owned(),
            elements,
        }
    }

    /// Creates a section holding only its `crc` line (none for the
    /// sentinel); the parser fills in the rest.
    pub(crate) fn parsed(key: &str) -> Self {
        let mut elements = Vec::new();
        if key != NO_KEY {
            elements.push(CheatElement::Line(format!("crc {key}")));
        }
        Self {
            key: key.to_owned(),
            good_name: String::new(),
            elements,
        }
    }

    /// The text after `crc ` on the header line.
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn is_sentinel(&self) -> bool {
        self.key == NO_KEY
    }

    /// The ROM name from the `gn` line (empty if there is none).
    pub fn good_name(&self) -> &str {
        &self.good_name
    }

    /// Changes the ROM name, rewriting the `gn` line or adding one after
    /// the `crc` line.
    pub fn set_good_name(&mut self, name: &str) {
        self.good_name = name.to_owned();
        let line = CheatElement::Line(format!("gn {name}"));
        let existing = self
            .elements
            .iter()
            .position(|element| matches!(element, CheatElement::Line(text) if text.starts_with("gn ")));
        match existing {
            Some(i) => self.elements[i] = line,
            None => {
                let at = usize::from(!self.is_sentinel()).min(self.elements.len());
                self.elements.insert(at, line);
            }
        }
    }

    pub fn elements(&self) -> &[CheatElement] {
        &self.elements
    }

    /// Number of cheat blocks.
    pub fn len(&self) -> usize {
        self.blocks().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Cheat blocks in file order.
    pub fn blocks(&self) -> impl Iterator<Item = &CheatBlock> {
        self.elements.iter().filter_map(|element| match element {
            CheatElement::Block(block) => Some(block),
            CheatElement::Line(_) => None,
        })
    }

    pub fn block(&self, index: usize) -> Option<&CheatBlock> {
        self.blocks().nth(index)
    }

    pub fn block_mut(&mut self, index: usize) -> Option<&mut CheatBlock> {
        self.elements
            .iter_mut()
            .filter_map(|element| match element {
                CheatElement::Block(block) => Some(block),
                CheatElement::Line(_) => None,
            })
            .nth(index)
    }

    /// Appends a block after the existing content, ahead of any trailing
    /// blank lines.
    pub fn push_block(&mut self, block: CheatBlock) {
        let trailing_blanks = self
            .elements
            .iter()
            .rev()
            .take_while(|element| matches!(element, CheatElement::Line(text) if text.is_empty()))
            .count();
        let at = self.elements.len() - trailing_blanks;
        self.elements.insert(at, CheatElement::Block(block));
    }

    /// Inserts `block` so that it becomes block number `index`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::IndexOutOfRange`] if `index > len`.
    pub fn insert_block(&mut self, index: usize, block: CheatBlock) -> Result<(), ConfigError> {
        let len = self.len();
        if index > len {
            return Err(ConfigError::IndexOutOfRange { index, len });
        }
        if index == len {
            self.push_block(block);
            return Ok(());
        }
        let at = self.element_position(index).unwrap_or(self.elements.len());
        self.elements.insert(at, CheatElement::Block(block));
        Ok(())
    }

    /// Removes and returns block number `index`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::IndexOutOfRange`] if there is no such block.
    pub fn remove_block(&mut self, index: usize) -> Result<CheatBlock, ConfigError> {
        let at = self
            .element_position(index)
            .ok_or(ConfigError::IndexOutOfRange {
                index,
                len: self.len(),
            })?;
        match self.elements.remove(at) {
            CheatElement::Block(block) => Ok(block),
            CheatElement::Line(_) => unreachable!("element_position only returns block positions"),
        }
    }

    /// Removes every block, keeping the verbatim lines.
    pub fn clear_blocks(&mut self) {
        self.elements
            .retain(|element| matches!(element, CheatElement::Line(_)));
    }

    pub(crate) fn set_parsed_good_name(&mut self, name: &str) {
        self.good_name = name.to_owned();
    }

    pub(crate) fn push_element(&mut self, element: CheatElement) {
        self.elements.push(element);
    }

    /// Position in `elements` of block number `index`.
    fn element_position(&self, index: usize) -> Option<usize> {
        self.elements
            .iter()
            .enumerate()
            .filter(|(_, element)| matches!(element, CheatElement::Block(_)))
            .map(|(position, _)| position)
            .nth(index)
    }

    /// Appends the on-disk text.  Keyed sections always end with one blank
    /// line so consecutive sections stay separated.
    pub(crate) fn render(&self, out: &mut String) {
        for element in &self.elements {
            match element {
                CheatElement::Line(text) => {
                    out.push_str(text);
                    out.push('\n');
                }
                CheatElement::Block(block) => block.render(out),
            }
        }
        let ends_blank = matches!(self.elements.last(), Some(CheatElement::Line(text)) if text.is_empty());
        if !self.is_sentinel() && !ends_blank {
            out.push('\n');
        }
    }
}

impl Keyed for CheatSection {
    fn key(&self) -> &str {
        &self.key
    }
}
