//! Whole-name section patterns.
//!
//! Section lookup by pattern succeeds only when the regular expression
//! matches the *entire* section name, so `Video` does not match
//! `Video-General`.  A plain [`Regex::is_match`] would accept any substring,
//! and checking the span of the leftmost match is not enough either (`a|ab`
//! finds `a` in `ab`), so the pattern is compiled wrapped in `^(?:...)$`.

use regex::Regex;

use crate::error::ConfigError;

/// A compiled pattern that must match a whole section name.
#[derive(Debug, Clone)]
pub struct SectionPattern {
    source: String,
    regex: Regex,
}

impl SectionPattern {
    /// Compiles `pattern`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidPattern`] if `pattern` is not a valid
    /// regular expression.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use m64_config::pattern::SectionPattern;
    ///
    /// let pattern = SectionPattern::new("Video-.*").unwrap();
    /// assert!(pattern.is_match("Video-General"));
    /// assert!(!pattern.is_match("UI-Video-General"));
    /// ```
    pub fn new(pattern: &str) -> Result<Self, ConfigError> {
        let regex = Regex::new(&format!("^(?:{pattern})$"))?;
        Ok(Self {
            source: pattern.to_owned(),
            regex,
        })
    }

    /// Returns `true` if the pattern matches all of `name`.
    pub fn is_match(&self, name: &str) -> bool {
        self.regex.is_match(name)
    }

    /// The pattern as given to [`SectionPattern::new`].
    pub fn as_str(&self) -> &str {
        &self.source
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alternation_requires_full_match() {
        // Arrange: leftmost-first matching would stop at "a"
        let pattern = SectionPattern::new("a|ab").unwrap();

        // Act / Assert
        assert!(pattern.is_match("ab"));
        assert!(pattern.is_match("a"));
        assert!(!pattern.is_match("abc"));
    }

    #[test]
    fn test_substring_is_not_a_match() {
        let pattern = SectionPattern::new("Core").unwrap();
        assert!(!pattern.is_match("CoreEvents"));
        assert!(pattern.is_match("Core"));
    }

    #[test]
    fn test_invalid_pattern_is_reported() {
        let result = SectionPattern::new("(unclosed");
        assert!(matches!(result, Err(ConfigError::InvalidPattern(_))));
    }

    #[test]
    fn test_as_str_returns_original_text() {
        let pattern = SectionPattern::new("^ABCD.*").unwrap();
        assert_eq!(pattern.as_str(), "^ABCD.*");
        assert!(pattern.is_match("ABCD-1234-C:45"));
    }
}
