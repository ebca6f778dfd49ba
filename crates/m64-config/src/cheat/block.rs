//! A named cheat and its codes.

use super::code::CheatCode;
use crate::error::ConfigError;

/// One ` cn Name` entry of a cheat section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheatBlock {
    pub name: String,
    /// Text of the optional `  cd ...` line.
    pub description: Option<String>,
    codes: Vec<CheatCode>,
}

impl CheatBlock {
    pub fn new(name: impl Into<String>, description: Option<String>) -> Self {
        Self {
            name: name.into(),
            description,
            codes: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    pub fn codes(&self) -> &[CheatCode] {
        &self.codes
    }

    pub fn code(&self, index: usize) -> Option<&CheatCode> {
        self.codes.get(index)
    }

    pub fn code_mut(&mut self, index: usize) -> Option<&mut CheatCode> {
        self.codes.get_mut(index)
    }

    pub fn push(&mut self, code: CheatCode) {
        self.codes.push(code);
    }

    /// Inserts `code` at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::IndexOutOfRange`] if `index > len`.
    pub fn insert(&mut self, index: usize, code: CheatCode) -> Result<(), ConfigError> {
        if index > self.codes.len() {
            return Err(ConfigError::IndexOutOfRange {
                index,
                len: self.codes.len(),
            });
        }
        self.codes.insert(index, code);
        Ok(())
    }

    /// Removes and returns the code at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::IndexOutOfRange`] if there is no such code.
    pub fn remove(&mut self, index: usize) -> Result<CheatCode, ConfigError> {
        if index >= self.codes.len() {
            return Err(ConfigError::IndexOutOfRange {
                index,
                len: self.codes.len(),
            });
        }
        Ok(self.codes.remove(index))
    }

    pub fn clear(&mut self) {
        self.codes.clear();
    }

    pub(crate) fn render(&self, out: &mut String) {
        out.push_str(" cn ");
        out.push_str(&self.name);
        out.push('\n');
        if let Some(description) = &self.description {
            out.push_str("  cd ");
            out.push_str(description);
            out.push('\n');
        }
        for code in &self.codes {
            code.render(out);
        }
    }
}
