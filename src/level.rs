//! Levels: a board, its player and the conditions that end the game.
//!
//! Boards are built from text blueprints (see [`blueprint`]); [`catalog`]
//! holds the standard legend and the built-in levels.

pub mod blueprint;
pub mod campaign;
pub mod catalog;

use std::fs;
use std::ops::ControlFlow;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::{BlueprintError, Error};
use crate::game::{
    Board, BoardConfig, PieceId, PieceKind, PlayerAction, Status, all_crates_in_position,
    all_doors_open, piece_dead,
};

pub use blueprint::{Legend, LegendEntry, Placed, parse_rows};
pub use campaign::{Campaign, CampaignOutcome};
pub use catalog::{BUILTIN_LEVELS, PLAYER_SYMBOL, builtin, dungeon, sokoban, standard_legend};

/// Failure to load a level.
#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum LevelError {
    /// The level file could not be read.
    #[display("failed to read {}: {source}", path.display())]
    Io {
        /// The file that was read.
        path: PathBuf,
        /// The underlying error.
        source: std::io::Error,
    },
    /// The blueprint is invalid.
    #[display("{_0}")]
    Blueprint(BlueprintError),
    /// No built-in level has this name.
    #[display("unknown level '{_0}'")]
    Unknown(#[error(not(source))] String),
}

impl From<BlueprintError> for LevelError {
    fn from(e: BlueprintError) -> Self {
        Self::Blueprint(e)
    }
}

/// A board ready to play, with its player.
#[derive(Debug)]
pub struct Level {
    /// The board.
    pub board: Board,
    /// The piece the user controls.
    pub player: PieceId,
}

impl Level {
    /// Build a level from a blueprint read with the standard legend.
    ///
    /// The level is won when every crate is on a marker (if there are
    /// crates) or every door is open (if there are doors), and lost when the
    /// player dies.
    ///
    /// # Errors
    ///
    /// Any [`BlueprintError`]; [`BlueprintError::MissingPlayer`] if the
    /// blueprint does not place a player.
    pub fn from_blueprint(blueprint: &str, config: BoardConfig) -> Result<Self, BlueprintError> {
        let (mut board, placed) =
            Board::from_blueprint(blueprint, &mut standard_legend(), config)?;
        let player = placed
            .get(&PLAYER_SYMBOL)
            .and_then(|ids| ids.first())
            .copied()
            .ok_or(BlueprintError::MissingPlayer)?;

        let has_crates = board.pieces().any(|(_, p)| matches!(p.kind(), PieceKind::Crate));
        let has_doors = board.pieces().any(|(_, p)| matches!(p.kind(), PieceKind::Door { .. }));
        if has_crates {
            board.add_win_condition(all_crates_in_position());
        }
        if has_doors {
            board.add_win_condition(all_doors_open());
        }
        board.add_lose_condition(piece_dead(player));
        Ok(Self { board, player })
    }

    /// Load a blueprint file with the standard legend. The board is named
    /// after the file unless `config` already names it.
    ///
    /// # Errors
    ///
    /// [`LevelError::Io`] if the file cannot be read, or
    /// [`LevelError::Blueprint`] if its content is not a valid level.
    pub fn load(path: &Path, mut config: BoardConfig) -> Result<Self, LevelError> {
        let blueprint = fs::read_to_string(path).map_err(|source| LevelError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let unnamed = config.name == BoardConfig::default().name;
        if let Some(stem) = path.file_stem().filter(|_| unnamed) {
            config.name = stem.to_string_lossy().into_owned();
        }
        info!(path = %path.display(), "loading level");
        Ok(Self::from_blueprint(&blueprint, config)?)
    }

    /// Where the game stands.
    #[must_use]
    pub fn status(&self) -> Status {
        self.board.status()
    }

    /// Whether the game has ended.
    #[must_use]
    pub fn is_over(&self) -> bool {
        self.status() != Status::Playing
    }

    /// Have the player perform `action`.
    ///
    /// # Errors
    ///
    /// See [`Board::perform`].
    pub fn perform(&mut self, action: &PlayerAction) -> Result<bool, Error> {
        self.board.perform(self.player, action)
    }

    /// Hand the level to `control` until the game ends or `control` breaks
    /// off, and report where the game stands. A level abandoned this way
    /// is still [`Status::Playing`].
    ///
    /// # Errors
    ///
    /// The first error returned by `control`.
    pub fn play<E>(
        &mut self,
        mut control: impl FnMut(&mut Self) -> Result<ControlFlow<()>, E>,
    ) -> Result<Status, E> {
        while !self.is_over() {
            if control(self)?.is_break() {
                break;
            }
        }
        let status = self.status();
        info!(level = self.board.name(), ?status, "level finished");
        Ok(status)
    }
}
