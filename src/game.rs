//! Board and piece layer of Ludema.
//!
//! Implements the board and piece interaction core:
//! - Board of tiles with a one-piece-per-tile rule (walkable pieces may be stacked on)
//! - Pieces with move/attack/grab capabilities and collision hooks
//! - Characters with health, inventory and per-turn passive behaviour
//! - Turn counter with passive-action dispatch and win/lose predicates

mod actions;
mod board;
mod character;
mod conditions;
mod invariants;
mod item;
mod piece;
mod position;
mod tile;
mod turn;

pub use actions::{ActionTarget, Actions, Capability, CapabilityKind, NamedAction};
pub use board::{Board, BoardConfig, Condition, Hook, Status};
pub use character::{
    ActionClass, Character, DEFAULT_ATTACK_DAMAGE, DEFAULT_HEALTH, Passive, PlayerAction, Role,
};
pub use conditions::{
    all_crates_in_position, all_doors_open, crate_in_position, door_open, piece_dead,
};
pub use invariants::{InvariantViolation, assert_invariants, check_invariants};
pub use item::{Item, ItemEffect};
pub use piece::{CRATE_GLYPH, MARKER_GLYPH, Piece, PieceId, PieceKind, WALL_GLYPH};
pub use position::{Adjacent, Direction, Position};
pub use tile::{BoardId, Tile, TileHandle};
