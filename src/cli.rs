//! CLI command implementations for Ludema.

pub(crate) mod campaign;
pub(crate) mod play;
pub(crate) mod show;

mod output;

use clap::{Args, ValueEnum};
use ludema::game::BoardConfig;
use ludema::level::{self, Level};
use std::error::Error;
use std::fmt;
use std::fs;
use std::path::PathBuf;

/// Output format for the `show` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum ShowFormat {
    /// The board as text.
    Text,
    /// Machine-readable JSON snapshot.
    Json,
}

/// Board settings: an optional JSON config file, overridden by flags.
#[derive(Args, Debug, Clone, Default)]
pub(crate) struct BoardArgs {
    /// JSON file with board settings (name, empty_glyph, turn_limit, seed)
    #[arg(short, long)]
    pub(crate) config: Option<PathBuf>,

    /// Random seed for NPC behaviour
    #[arg(short, long)]
    pub(crate) seed: Option<u64>,

    /// Last turn that may be played
    #[arg(short, long)]
    pub(crate) turn_limit: Option<u32>,
}

impl BoardArgs {
    /// Build the board configuration from the config file and the flags.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be read or parsed.
    pub(crate) fn config(&self) -> Result<BoardConfig, CliError> {
        let mut config = match &self.config {
            Some(path) => {
                let text = fs::read_to_string(path).map_err(|e| {
                    CliError::new(format!("Failed to read {}: {e}", path.display()))
                })?;
                serde_json::from_str(&text).map_err(|e| {
                    CliError::new(format!("Invalid config {}: {e}", path.display()))
                })?
            }
            None => BoardConfig::default(),
        };
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if self.turn_limit.is_some() {
            config.turn_limit = self.turn_limit;
        }
        Ok(config)
    }
}

/// Which level to load and how to configure its board.
#[derive(Args, Debug, Clone)]
pub(crate) struct LevelArgs {
    /// Built-in level name (sokoban, dungeon)
    #[arg(default_value = "sokoban", conflicts_with = "file")]
    pub(crate) level: String,

    /// Load a blueprint file instead of a built-in level
    #[arg(short, long)]
    pub(crate) file: Option<PathBuf>,

    #[command(flatten)]
    pub(crate) board: BoardArgs,
}

impl LevelArgs {
    /// Load the requested level.
    ///
    /// # Errors
    ///
    /// Returns an error if the config is invalid, or the level does not
    /// exist or cannot be built.
    pub(crate) fn load(&self) -> Result<Level, CliError> {
        let config = self.board.config()?;
        let level = match &self.file {
            Some(path) => Level::load(path, config)?,
            None => level::builtin(&self.level, config)?,
        };
        Ok(level)
    }
}

/// CLI error type.
#[derive(Debug)]
pub(crate) struct CliError {
    message: String,
}

impl CliError {
    /// Create a new CLI error.
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Error for CliError {}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        Self::new(e.to_string())
    }
}

impl From<ludema::LevelError> for CliError {
    fn from(e: ludema::LevelError) -> Self {
        Self::new(e.to_string())
    }
}

impl From<ludema::Error> for CliError {
    fn from(e: ludema::Error) -> Self {
        Self::new(e.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        Self::new(format!("Failed to serialize board: {e}"))
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_flags_override_config_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, r#"{{"name": "cellar", "seed": 7, "turn_limit": 30}}"#).unwrap();
        let args = BoardArgs {
            config: Some(file.path().to_path_buf()),
            seed: Some(11),
            turn_limit: None,
        };
        let config = args.config().unwrap();
        assert_eq!(config.name, "cellar");
        assert_eq!(config.seed, 11);
        assert_eq!(config.turn_limit, Some(30));
        assert_eq!(config.empty_glyph, BoardConfig::default().empty_glyph);
    }

    #[test]
    fn test_no_config_file_uses_defaults() {
        let args = BoardArgs {
            turn_limit: Some(4),
            ..BoardArgs::default()
        };
        let config = args.config().unwrap();
        assert_eq!(config.turn_limit, Some(4));
        assert_eq!(config.seed, 0);
    }

    #[test]
    fn test_bad_config_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "seed = 3").unwrap();
        let args = BoardArgs {
            config: Some(file.path().to_path_buf()),
            ..BoardArgs::default()
        };
        let err = args.config().unwrap_err();
        assert!(err.to_string().starts_with("Invalid config"));
    }
}
