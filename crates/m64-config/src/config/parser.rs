//! Line classification and section splitting for config files.
//!
//! Each physical line is trimmed and classified, in this order:
//!
//! 1. empty, or starting with `#`, `;` or `//`  → comment, kept verbatim
//! 2. contains `=`                              → `name=value` parameter
//! 3. contains `[`                              → start of the next section
//! 4. anything else                             → malformed
//!
//! A malformed line (including a parameter with an empty name or a header
//! with an empty name) ends the parse: the lines before it are kept and the
//! rest of the input is ignored.

use tracing::{debug, warn};

use super::line::ConfigLine;
use super::section::ConfigSection;
use super::SECTIONLESS_NAME;

/// What a single line turned out to be.
#[derive(Debug, PartialEq, Eq)]
enum LineKind<'a> {
    Comment,
    Parameter {
        prefix: &'a str,
        key: &'a str,
        value: &'a str,
    },
    Header(&'a str),
    Malformed(&'static str),
}

/// Splits `text` into sections in file order.
///
/// The first element is always the sentinel section, even when the input
/// starts with a header or is empty.  Duplicate section names are returned
/// as separate elements; the document decides how to merge them.
pub(crate) fn parse_sections(text: &str) -> Vec<ConfigSection> {
    let mut sections = Vec::new();
    let mut current = ConfigSection::headerless(SECTIONLESS_NAME);

    for (number, raw) in text.lines().enumerate() {
        match classify(raw) {
            LineKind::Comment => current.push_opaque(ConfigLine::Comment(format!("{raw}\n"))),
            LineKind::Parameter { prefix, key, value } => current.upsert_parsed(prefix, key, value),
            LineKind::Header(name) => {
                debug!(section = %current.name(), parameters = current.len(), "section parsed");
                let finished = std::mem::replace(&mut current, ConfigSection::headerless(name));
                sections.push(finished);
                current.push_opaque(ConfigLine::Header(format!("{raw}\n")));
            }
            LineKind::Malformed(reason) => {
                warn!(
                    line = number + 1,
                    section = %current.name(),
                    "{reason}; ignoring the rest of the input"
                );
                break;
            }
        }
    }

    debug!(section = %current.name(), parameters = current.len(), "section parsed");
    sections.push(current);
    sections
}

fn classify(raw: &str) -> LineKind<'_> {
    let line = raw.trim();

    if line.is_empty() || line.starts_with('#') || line.starts_with(';') || line.starts_with("//")
    {
        return LineKind::Comment;
    }

    if let Some(eq) = raw.find('=') {
        return classify_parameter(raw, eq);
    }

    if line.contains('[') {
        return classify_header(line);
    }

    LineKind::Malformed("unrecognised line")
}

/// `eq` is the byte offset of the first `=` in `raw`.
fn classify_parameter(raw: &str, eq: usize) -> LineKind<'_> {
    let key = raw[..eq].trim();
    if key.is_empty() {
        return LineKind::Malformed("parameter without a name");
    }

    let after = &raw[eq + 1..];
    let value = after.trim();
    let value_start = eq + 1 + (after.len() - after.trim_start().len());

    LineKind::Parameter {
        prefix: &raw[..value_start],
        key,
        value,
    }
}

fn classify_header(line: &str) -> LineKind<'_> {
    let (Some(open), Some(close)) = (line.find('['), line.find(']')) else {
        return LineKind::Malformed("section header without a closing bracket");
    };
    if close <= open + 1 {
        return LineKind::Malformed("section header without a name");
    }

    let name = line[open + 1..close].trim();
    if name.is_empty() {
        return LineKind::Malformed("section header without a name");
    }
    LineKind::Header(name)
}
