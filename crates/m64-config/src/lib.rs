//! # m64-config
//!
//! Readers and writers for the plain-text files a Mupen64Plus front end keeps
//! on disk: the INI-like configuration files and the cheat database.
//!
//! Both stores share the same idea: a file is an ordered list of sections,
//! each section is an ordered list of lines, and every line that the store
//! does not understand (comments, blank lines, headers) is written back
//! exactly as it was read.  Only values that the caller changed are
//! regenerated, so a load followed by a save leaves a file untouched.
//!
//! # Architecture overview
//!
//! - **`config`** – The key/value store.  [`ConfigDocument`] holds the
//!   sections of one file; [`ConfigSection`] holds the lines and parameters
//!   of one `[Section]`.
//!
//! - **`cheat`** – The cheat database.  [`CheatFile`] holds one
//!   [`CheatSection`] per ROM (`crc ...` line), each with its named
//!   [`CheatBlock`]s and their codes.
//!
//! - **`pattern`** – [`SectionPattern`], the whole-name regular expression
//!   used to look sections up by ROM CRC.
//!
//! - **`storage`** – File access shared by both stores: reading with a
//!   "missing file is not an error" policy and atomic saves.
//!
//! Documents are plain owned values.  There is no global instance; whoever
//! needs a document owns it or borrows it.
//!
//! # Example
//!
//! ```rust
//! use m64_config::ConfigDocument;
//!
//! let mut doc = ConfigDocument::parse_str("[Alice]\nscore=10\n[Bob]\nscore=20\n");
//! assert_eq!(doc.get("Bob", "score"), Some("20"));
//!
//! doc.put("Bob", "score", "99");
//! assert_eq!(doc.to_string(), "[Alice]\nscore=10\n[Bob]\nscore=99\n");
//! ```

pub mod cheat;
pub mod config;
pub mod error;
mod ordered;
pub mod pattern;
pub mod storage;

pub use cheat::{
    CheatBlock, CheatCode, CheatElement, CheatFile, CheatOption, CheatSection, NO_KEY,
};
pub use config::{
    unquote, ConfigDocument, ConfigLine, ConfigParameter, ConfigSection, SECTIONLESS_NAME,
};
pub use error::ConfigError;
pub use pattern::SectionPattern;
