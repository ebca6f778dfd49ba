//! m64-config-cli library crate.
//!
//! Everything behind the `m64cfg` binary except argument parsing and process
//! setup, so the sub-commands can be tested without spawning a process.
//!
//! # Architecture
//!
//! ```text
//! m64cfg (main.rs)      clap parsing, logging, file resolution, load/save
//!   ├── application/    one use case per sub-command, in-memory only
//!   └── infrastructure/
//!         └── settings  the tool's own TOML settings file
//! ```
//!
//! # Layer rules
//!
//! - `application` works on already loaded documents and returns the text to
//!   print.  It never touches the file system.
//! - `infrastructure` owns every path and file the tool itself reads.

/// Application layer: the sub-command use cases.
pub mod application;

/// Infrastructure layer: the settings file.
pub mod infrastructure;
