//! Use cases behind the `m64cfg` sub-commands.
//!
//! Each function takes a document that the caller has already loaded and
//! returns the text to print (or edits the document in place).  Loading and
//! saving stay in `main.rs`, which keeps these functions free of I/O.
//!
//! # Sub-modules
//!
//! - **`inspect`** – `sections`, `get` and `match`.
//! - **`edit`**    – `put` and `remove`.
//! - **`dump`**    – Whole-document output as text or JSON.
//! - **`cheats`**  – Listing the cheats of one ROM.

pub mod cheats;
pub mod dump;
pub mod edit;
pub mod inspect;

use m64_config::ConfigError;
use thiserror::Error;

/// Why a sub-command could not produce its result.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("no section named [{0}]")]
    NoSuchSection(String),

    #[error("no parameter {key:?} in section [{section}]")]
    NoSuchKey { section: String, key: String },

    #[error("no section matches {0:?}")]
    NoMatch(String),

    #[error("cannot store {key:?} in section [{section}]: names and values must fit on one line")]
    Unstorable { section: String, key: String },

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to encode JSON: {0}")]
    Json(#[from] serde_json::Error),
}
