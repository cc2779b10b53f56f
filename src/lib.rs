// Allow unwrap and unreadable literals in tests (test code is not production)
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::unreadable_literal))]
//! Ludema: a turn-based tile-grid game engine for puzzle and dungeon games.
//!
//! This crate provides:
//! - A board of tiles occupied by pieces, with placement and movement rules
//! - Move, attack and grab capabilities, including collision ("touch") hooks
//!   used for box-pushing puzzles
//! - A turn counter that runs every character's passive behaviour
//! - Win and lose predicates, text rendering and blueprint-based levels
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │   Levels, campaigns, blueprints     │
//! ├─────────────────────────────────────┤
//! │   Turns, conditions, rendering      │
//! ├─────────────────────────────────────┤
//! │   Board ↔ Tile ↔ Piece core         │
//! └─────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```
//! use ludema::game::{Board, BoardConfig, Piece, Position, all_crates_in_position};
//!
//! let mut board = Board::new(3, 1, BoardConfig::default());
//! let guy = board.place(Piece::new_player("Bruma", "@"), Position::new(0, 0))?;
//! board.place(Piece::new_crate(), Position::new(1, 0))?;
//! board.place(Piece::new_marker(), Position::new(2, 0))?;
//! board.add_win_condition(all_crates_in_position());
//!
//! assert!(board.moving(guy).right());
//! assert!(board.won());
//! # Ok::<(), ludema::Error>(())
//! ```

pub mod error;
pub mod game;
pub mod level;
pub mod render;

pub use error::{
    ActionError, BlueprintError, Error, PieceStateError, PlacementError, Result, TurnError,
};

// Re-export key types at crate root for convenience
pub use game::{Board, BoardConfig, Direction, Piece, PieceId, Position, Status};
pub use level::{Campaign, Level, LevelError};
pub use render::{BoardSnapshot, render_text};
