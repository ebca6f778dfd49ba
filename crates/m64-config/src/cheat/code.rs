//! Cheat codes and their selectable options.

use crate::error::ConfigError;

/// The value written in place of a code whose value comes from an option.
pub const OPTION_PLACEHOLDER: &str = "????";

/// One selectable value of an option code, e.g. `0001:"Bob-omb Battlefield"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheatOption {
    /// Four hex digits substituted for `????` when the option is picked.
    pub code: String,
    /// Display name, without the surrounding quotes.
    pub name: String,
}

impl CheatOption {
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
        }
    }
}

/// A single `ADDRESS VALUE` line of a cheat block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheatCode {
    /// Eight hex digits.
    pub address: String,
    /// Four hex digits, or [`OPTION_PLACEHOLDER`] for option codes.
    pub code: String,
    options: Vec<CheatOption>,
}

impl CheatCode {
    /// Creates a plain code.
    pub fn new(address: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            code: code.into(),
            options: Vec::new(),
        }
    }

    /// Creates an option code (`????`) with the given choices.
    pub fn with_options(address: impl Into<String>, options: Vec<CheatOption>) -> Self {
        Self {
            address: address.into(),
            code: OPTION_PLACEHOLDER.to_owned(),
            options,
        }
    }

    /// `true` if the value is picked from [`CheatCode::options`].
    pub fn is_option_code(&self) -> bool {
        self.code == OPTION_PLACEHOLDER
    }

    pub fn options(&self) -> &[CheatOption] {
        &self.options
    }

    pub fn option(&self, index: usize) -> Option<&CheatOption> {
        self.options.get(index)
    }

    pub fn push_option(&mut self, option: CheatOption) {
        self.options.push(option);
    }

    /// Inserts `option` at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::IndexOutOfRange`] if `index > len`.
    pub fn insert_option(&mut self, index: usize, option: CheatOption) -> Result<(), ConfigError> {
        if index > self.options.len() {
            return Err(ConfigError::IndexOutOfRange {
                index,
                len: self.options.len(),
            });
        }
        self.options.insert(index, option);
        Ok(())
    }

    /// Removes and returns the option at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::IndexOutOfRange`] if there is no such option.
    pub fn remove_option(&mut self, index: usize) -> Result<CheatOption, ConfigError> {
        if index >= self.options.len() {
            return Err(ConfigError::IndexOutOfRange {
                index,
                len: self.options.len(),
            });
        }
        Ok(self.options.remove(index))
    }

    /// Appends the on-disk line, e.g. `  8033B21E ???? 0001:"One",0002:"Two"`.
    pub(crate) fn render(&self, out: &mut String) {
        out.push_str("  ");
        out.push_str(&self.address);
        out.push(' ');
        out.push_str(&self.code);
        let mut delimiter = ' ';
        for option in &self.options {
            out.push(delimiter);
            out.push_str(&option.code);
            out.push_str(":\"");
            out.push_str(&option.name);
            out.push('"');
            delimiter = ',';
        }
        out.push('\n');
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rendered(code: &CheatCode) -> String {
        let mut out = String::new();
        code.render(&mut out);
        out
    }

    #[test]
    fn test_plain_code_renders() {
        assert_eq!(rendered(&CheatCode::new("8033B21D", "0064")), "  8033B21D 0064\n");
    }

    #[test]
    fn test_option_code_renders_comma_separated() {
        // Arrange
        let code = CheatCode::with_options(
            "8033B21E",
            vec![
                CheatOption::new("0001", "Bob-omb Battlefield"),
                CheatOption::new("0002", "Whomp's Fortress"),
            ],
        );

        // Act / Assert
        assert!(code.is_option_code());
        assert_eq!(
            rendered(&code),
            "  8033B21E ???? 0001:\"Bob-omb Battlefield\",0002:\"Whomp's Fortress\"\n"
        );
    }

    #[test]
    fn test_option_editing() {
        // Arrange
        let mut code = CheatCode::with_options("80000000", Vec::new());

        // Act
        code.push_option(CheatOption::new("0002", "two"));
        code.insert_option(0, CheatOption::new("0001", "one")).unwrap();
        let removed = code.remove_option(1).unwrap();

        // Assert
        assert_eq!(removed.name, "two");
        assert_eq!(code.options().len(), 1);
        assert_eq!(code.option(0).map(|o| o.code.as_str()), Some("0001"));
        assert!(code.option(5).is_none());
    }

    #[test]
    fn test_option_index_errors() {
        let mut code = CheatCode::new("80000000", "0001");
        assert!(matches!(
            code.insert_option(2, CheatOption::new("0001", "x")),
            Err(ConfigError::IndexOutOfRange { index: 2, len: 0 })
        ));
        assert!(matches!(
            code.remove_option(0),
            Err(ConfigError::IndexOutOfRange { index: 0, len: 0 })
        ));
    }
}
