//! Infrastructure layer: files the tool owns.
//!
//! - **`settings`** – Loads `settings.toml` from the platform config
//!   directory (or `$M64CFG_SETTINGS`).

pub mod settings;
