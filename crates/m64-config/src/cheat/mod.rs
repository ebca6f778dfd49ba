//! The cheat database (`mupencheat.txt`).
//!
//! # File format
//!
//! ```text
//! crc 635A2BFF-8B022326-C:45
//! gn SUPER MARIO 64
//!  cn Infinite Lives
//!   cd Never lose a life
//!   8033B21D 0064
//!
//!  cn Level Select
//!   8033B21E ???? 0001:"Bob-omb Battlefield",0002:"Whomp's Fortress"
//! ```
//!
//! Each `crc` line opens the section for one ROM; its key is the rest of
//! the line (`<crc1>-<crc2>-C:<country>`).  ` cn` (one leading space) names
//! a cheat, `  cd` (two spaces) describes it, and indented hex pairs are its
//! codes.  A code whose value is `????` lists the values the user can pick
//! from.
//!
//! Anything before the first `crc` line is kept in a section called
//! [`NO_KEY`].  Comments and blank lines are written back unchanged, so a
//! file saved without edits is identical to the one that was loaded.

pub mod block;
pub mod code;
pub mod file;
mod parser;
pub mod section;

pub use block::CheatBlock;
pub use code::{CheatCode, CheatOption, OPTION_PLACEHOLDER};
pub use file::CheatFile;
pub use section::{CheatElement, CheatSection};

/// Key of the section holding the lines before the first `crc` line.
pub const NO_KEY: &str = "[<sectionless!>]";
