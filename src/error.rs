//! Error types for the board, its pieces and level construction.

use crate::game::Position;

/// Failure to put a piece on a tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum PlacementError {
    /// The position lies outside the board.
    #[display("position {position} is outside of the board")]
    OutOfBounds {
        /// The rejected position.
        position: Position,
    },
    /// The tile already holds a piece that cannot be walked over.
    #[display("position {position} is already occupied")]
    PositionOccupied {
        /// The rejected position.
        position: Position,
    },
}

/// A piece is not where an operation needs it to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum PieceStateError {
    /// The piece is not linked to any tile.
    #[display("piece is not on a tile; put it on a board first")]
    NotOnATile,
    /// The piece or tile belongs to a different board.
    #[display("piece is not on this board")]
    NotOnThisBoard,
}

/// Precondition failures of the unchecked action operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ActionError {
    /// The inventory has no item at the requested slot.
    #[display("there is no item at inventory slot {index}")]
    NoSuchItem {
        /// The requested inventory slot.
        index: usize,
    },
    /// The occupant of the target tile is not an item.
    #[display("the target piece cannot be grabbed")]
    NotGrabbable,
    /// The target tile holds nothing the action can act on.
    #[display("the target tile holds nothing to act on")]
    TargetEmpty,
    /// The acting piece has no attack damage.
    #[display("the piece has no attack damage and cannot attack")]
    CannotAttack,
    /// The acting piece cannot carry items.
    #[display("the piece has no inventory")]
    NoInventory,
    /// The acting piece is not placed where it needs to be.
    #[display("{_0}")]
    Piece(PieceStateError),
}

impl From<PieceStateError> for ActionError {
    fn from(e: PieceStateError) -> Self {
        Self::Piece(e)
    }
}

/// Invalid turn transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum TurnError {
    /// The requested turn does not move time forward.
    #[display("cannot set the turn to {requested}: it is already turn {current}")]
    NonIncreasingTurn {
        /// Turn before the request.
        current: u32,
        /// Requested turn.
        requested: u32,
    },
    /// The board went past its turn limit.
    #[display("turns are over: turn {turn} exceeds the limit of {limit}")]
    TurnsExhausted {
        /// Current turn.
        turn: u32,
        /// Configured turn limit.
        limit: u32,
    },
}

/// A blueprint could not be turned into a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum BlueprintError {
    /// The blueprint has no rows.
    #[display("the blueprint is empty")]
    Empty,
    /// The number of rows does not match the board height.
    #[display("the blueprint has {found} rows but the board is {expected} tall")]
    WrongHeight {
        /// Board height.
        expected: u16,
        /// Rows found.
        found: usize,
    },
    /// The first row does not match the board width.
    #[display("the blueprint rows are {found} wide but the board is {expected} wide")]
    WrongWidth {
        /// Board width.
        expected: u16,
        /// Width of the first row.
        found: usize,
    },
    /// Rows have different lengths.
    #[display("blueprint row {row} has a different length; the board must be a rectangle")]
    RaggedRows {
        /// Index of the first offending row, counted from the top.
        row: usize,
    },
    /// A legend entry ran out of pieces.
    #[display("the legend entry for '{symbol}' has no pieces left")]
    LegendExhausted {
        /// The blueprint symbol.
        symbol: char,
    },
    /// The blueprint has no player.
    #[display("the blueprint does not place a player")]
    MissingPlayer,
    /// Placing a piece failed.
    #[display("{_0}")]
    Placement(PlacementError),
}

impl From<PlacementError> for BlueprintError {
    fn from(e: PlacementError) -> Self {
        Self::Placement(e)
    }
}

/// Any error raised by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum Error {
    /// See [`PlacementError`].
    #[display("{_0}")]
    Placement(PlacementError),
    /// See [`PieceStateError`].
    #[display("{_0}")]
    PieceState(PieceStateError),
    /// See [`ActionError`].
    #[display("{_0}")]
    Action(ActionError),
    /// See [`TurnError`].
    #[display("{_0}")]
    Turn(TurnError),
    /// See [`BlueprintError`].
    #[display("{_0}")]
    Blueprint(BlueprintError),
}

impl From<PlacementError> for Error {
    fn from(e: PlacementError) -> Self {
        Self::Placement(e)
    }
}

impl From<PieceStateError> for Error {
    fn from(e: PieceStateError) -> Self {
        Self::PieceState(e)
    }
}

impl From<ActionError> for Error {
    fn from(e: ActionError) -> Self {
        Self::Action(e)
    }
}

impl From<TurnError> for Error {
    fn from(e: TurnError) -> Self {
        Self::Turn(e)
    }
}

impl From<BlueprintError> for Error {
    fn from(e: BlueprintError) -> Self {
        Self::Blueprint(e)
    }
}

/// Result type used across the engine.
pub type Result<T, E = Error> = std::result::Result<T, E>;
