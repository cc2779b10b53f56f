//! Tiles and the handles pieces use to refer back to them.

use std::sync::atomic::{AtomicU32, Ordering};

use serde::Serialize;

use crate::game::{PieceId, Position};

/// Identity of a board, unique for the lifetime of the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct BoardId(u32);

impl BoardId {
    pub(crate) fn next() -> Self {
        static NEXT: AtomicU32 = AtomicU32::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

/// Lightweight reference to a tile: the board it lives on and its position.
///
/// Handles are only handed out by a [`Board`](crate::game::Board), so the
/// position is always inside that board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileHandle {
    board: BoardId,
    position: Position,
}

impl TileHandle {
    pub(crate) const fn new(board: BoardId, position: Position) -> Self {
        Self { board, position }
    }

    /// The board this tile belongs to.
    #[must_use]
    pub const fn board(self) -> BoardId {
        self.board
    }

    /// Position of the tile on its board.
    #[must_use]
    pub const fn position(self) -> Position {
        self.position
    }
}

/// A single cell of the board.
///
/// Pieces are kept as a stack: the last entry is the visible occupant, and
/// every entry below it is walkable.
#[derive(Debug, Clone)]
pub struct Tile {
    position: Position,
    stack: Vec<PieceId>,
}

impl Tile {
    pub(crate) const fn new(position: Position) -> Self {
        Self {
            position,
            stack: Vec::new(),
        }
    }

    /// Position of this tile.
    #[must_use]
    pub const fn position(&self) -> Position {
        self.position
    }

    /// The visible occupant, if any.
    #[must_use]
    pub fn piece(&self) -> Option<PieceId> {
        self.stack.last().copied()
    }

    /// Every piece on the tile, bottom first.
    #[must_use]
    pub fn pieces(&self) -> &[PieceId] {
        &self.stack
    }

    /// Whether the tile holds no piece at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    /// Whether `piece` is anywhere in this tile's stack.
    #[must_use]
    pub fn contains(&self, piece: PieceId) -> bool {
        self.stack.contains(&piece)
    }

    pub(crate) fn push(&mut self, piece: PieceId) {
        self.stack.push(piece);
    }

    pub(crate) fn pop(&mut self) -> Option<PieceId> {
        self.stack.pop()
    }

    /// Remove `piece` wherever it sits in the stack.
    pub(crate) fn take(&mut self, piece: PieceId) -> bool {
        let before = self.stack.len();
        self.stack.retain(|&p| p != piece);
        self.stack.len() != before
    }
}
