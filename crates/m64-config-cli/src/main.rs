//! m64cfg: inspect and edit Mupen64Plus config and cheat files.
//!
//! # Usage
//!
//! ```text
//! m64cfg [--settings <PATH>] <COMMAND>
//!
//! Commands:
//!   sections [-f FILE]                          List section names
//!   get      [-f FILE] <SECTION> <KEY> [--unquote]
//!   put      [-f FILE] <SECTION> <KEY> <VALUE>  Set a value and save
//!   remove   [-f FILE] <SECTION> [--key KEY]    Remove a section or a value
//!   match    [-f FILE] <PATTERN>                First section matching a regex
//!   dump     [-f FILE] [--format text|json]
//!   cheats   [-f FILE] <CRC>                    Cheats for one ROM
//! ```
//!
//! `-f` may be left out when the settings file names a default file (see
//! [`m64_config_cli::infrastructure::settings`]).  Edits are written back in
//! place; every line the command did not touch is saved exactly as it was.
//!
//! # Environment variables
//!
//! | Variable          | Description                                     |
//! |-------------------|-------------------------------------------------|
//! | `RUST_LOG`        | `tracing` filter, overrides `log_level`         |
//! | `M64CFG_SETTINGS` | Settings file, same as `--settings`             |

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use m64_config::{CheatFile, ConfigDocument, ConfigError};
use m64_config_cli::application::dump::DumpFormat;
use m64_config_cli::application::{cheats, dump, edit, inspect};
use m64_config_cli::infrastructure::settings::{self, CliSettings};

// ── CLI argument definitions ──────────────────────────────────────────────────

/// Inspect and edit Mupen64Plus config and cheat files.
///
/// Comments, blank lines and the order of sections and parameters are
/// preserved on save.
#[derive(Debug, Parser)]
#[command(name = "m64cfg", version)]
struct Cli {
    /// Settings file to use instead of the platform default.
    #[arg(long, global = true, env = "M64CFG_SETTINGS")]
    settings: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List section names in file order.
    Sections {
        #[arg(short, long)]
        file: Option<PathBuf>,
    },

    /// Print one value.
    Get {
        #[arg(short, long)]
        file: Option<PathBuf>,
        section: String,
        key: String,
        /// Strip one pair of surrounding double quotes.
        #[arg(long)]
        unquote: bool,
    },

    /// Set a value, creating the section if needed, and save.
    Put {
        #[arg(short, long)]
        file: Option<PathBuf>,
        section: String,
        key: String,
        value: String,
    },

    /// Remove a whole section, or one value with `--key`, and save.
    Remove {
        #[arg(short, long)]
        file: Option<PathBuf>,
        section: String,
        #[arg(long)]
        key: Option<String>,
    },

    /// Print the name of the first section whose whole name matches a regex.
    Match {
        #[arg(short, long)]
        file: Option<PathBuf>,
        pattern: String,
    },

    /// Print the whole file.
    Dump {
        #[arg(short, long)]
        file: Option<PathBuf>,
        #[arg(long, value_enum, default_value_t = DumpFormat::Text)]
        format: DumpFormat,
    },

    /// List the cheats of the ROM whose CRC starts with the given value.
    Cheats {
        #[arg(short, long)]
        file: Option<PathBuf>,
        /// ROM CRC, e.g. "635A2BFF 8B022326".
        crc: String,
    },
}

impl Cli {
    /// Loads the settings file named on the command line or the platform
    /// default.
    ///
    /// # Errors
    ///
    /// Returns an error if the default location cannot be resolved or the
    /// file exists but cannot be read or parsed.
    fn load_settings(&self) -> anyhow::Result<CliSettings> {
        let path = match &self.settings {
            Some(path) => path.clone(),
            None => match settings::default_settings_path() {
                Ok(path) => path,
                // No home directory: run with defaults.
                Err(settings::SettingsError::NoPlatformConfigDir) => {
                    return Ok(CliSettings::default())
                }
                Err(e) => return Err(e.into()),
            },
        };
        settings::load_settings(&path)
            .with_context(|| format!("failed to load settings from {}", path.display()))
    }
}

// ── Command execution ─────────────────────────────────────────────────────────

/// Picks the explicit file, else the configured default.
fn resolve_file(
    explicit: Option<PathBuf>,
    fallback: Option<&Path>,
    setting: &str,
) -> anyhow::Result<PathBuf> {
    explicit
        .or_else(|| fallback.map(Path::to_path_buf))
        .with_context(|| format!("no file given; pass --file or set `{setting}` in the settings file"))
}

fn open_config(path: &Path) -> anyhow::Result<ConfigDocument> {
    ConfigDocument::try_load(path).with_context(|| format!("failed to read {}", path.display()))
}

/// Like [`open_config`], but a missing file gives an empty document that
/// the next save creates.  Any other read failure is an error, so an
/// unreadable file is never overwritten.
fn open_or_create_config(path: &Path) -> anyhow::Result<ConfigDocument> {
    match ConfigDocument::try_load(path) {
        Ok(doc) => Ok(doc),
        Err(ConfigError::NotFound { .. }) => Ok(ConfigDocument::empty_at(path)),
        Err(e) => Err(anyhow::Error::new(e).context(format!("failed to read {}", path.display()))),
    }
}

fn save_config(doc: &ConfigDocument) -> anyhow::Result<()> {
    doc.save().with_context(|| {
        format!(
            "failed to save {}",
            doc.path().map(Path::display).map(|d| d.to_string()).unwrap_or_default()
        )
    })
}

/// Runs `command` and returns the text to print on stdout.
fn run(command: Command, settings: &CliSettings) -> anyhow::Result<String> {
    let config_default = settings.files.config.as_deref();
    let output = match command {
        Command::Sections { file } => {
            let doc = open_config(&resolve_file(file, config_default, "files.config")?)?;
            inspect::list_sections(&doc, settings.output.show_sentinel)
        }
        Command::Get {
            file,
            section,
            key,
            unquote,
        } => {
            let doc = open_config(&resolve_file(file, config_default, "files.config")?)?;
            inspect::get_value(&doc, &section, &key, unquote)?
        }
        Command::Put {
            file,
            section,
            key,
            value,
        } => {
            let mut doc = open_or_create_config(&resolve_file(file, config_default, "files.config")?)?;
            edit::put_value(&mut doc, &section, &key, &value)?;
            save_config(&doc)?;
            String::new()
        }
        Command::Remove { file, section, key } => {
            let mut doc = open_config(&resolve_file(file, config_default, "files.config")?)?;
            edit::remove(&mut doc, &section, key.as_deref())?;
            save_config(&doc)?;
            String::new()
        }
        Command::Match { file, pattern } => {
            let doc = open_config(&resolve_file(file, config_default, "files.config")?)?;
            inspect::match_section(&doc, &pattern)?
        }
        Command::Dump { file, format } => {
            let doc = open_config(&resolve_file(file, config_default, "files.config")?)?;
            dump::dump(&doc, format)?
        }
        Command::Cheats { file, crc } => {
            let path = resolve_file(file, settings.files.cheats.as_deref(), "files.cheats")?;
            let cheats_file = CheatFile::try_load(&path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            cheats::list_cheats(&cheats_file, &crc)?
        }
    };
    Ok(output)
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let settings = cli.load_settings()?;

    // `RUST_LOG` wins over the settings file.  Logs go to stderr so stdout
    // carries only command output.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&settings.log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    debug!(?cli, "starting");
    let output = run(cli.command, &settings)?;
    print!("{output}");
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
