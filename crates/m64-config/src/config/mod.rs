//! The key/value configuration store.
//!
//! # File format
//!
//! ```text
//! ; leading comment
//! key1=value1
//! key2=
//! [SectionName]
//! # another comment
//! key3="quoted value"
//! ```
//!
//! - Comments are whole lines starting with `#`, `;` or `//` (after
//!   trimming).  They are kept and written back verbatim, as are blank lines.
//! - `[Name]` starts a section.  Lines before the first header belong to the
//!   sentinel section named [`SECTIONLESS_NAME`].
//! - `name=value` splits on the first `=`.  Name and value are trimmed;
//!   quotes are kept as part of the value (see [`unquote`]).
//!
//! # Why lines and parameters are stored separately
//!
//! A section keeps two views of its content: the ordered list of lines that
//! make up the file, and a map from parameter name to value.  Parameter lines
//! refer to the map by key instead of holding a copy of the value, so
//! [`ConfigDocument::put`] only has to touch the map and the next save picks
//! up the new value at the line's original position.

pub mod document;
pub mod line;
mod parser;
pub mod section;
pub mod value;

pub use document::ConfigDocument;
pub use line::ConfigLine;
pub use section::{ConfigParameter, ConfigSection};
pub use value::unquote;

/// Name of the implicit section holding lines that precede the first
/// `[Section]` header.  A parsed section name never contains `]`, so this
/// never collides with a real one.
pub const SECTIONLESS_NAME: &str = "[<sectionless!>]";
