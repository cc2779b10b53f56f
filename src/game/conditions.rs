//! Ready-made win and lose predicates.
//!
//! Each function returns a closure suitable for
//! [`Board::add_win_condition`] or [`Board::add_lose_condition`].

use crate::game::{Board, Piece, PieceId, PieceKind};

/// Every crate rests on a marker. False when the board has no crates.
pub fn all_crates_in_position() -> impl Fn(&Board) -> bool + 'static {
    |board: &Board| {
        let mut crates = board
            .pieces()
            .filter(|(_, piece)| matches!(piece.kind(), PieceKind::Crate))
            .peekable();
        crates.peek().is_some()
            && crates.all(|(id, _)| crate_in_position(board, id))
    }
}

/// Whether the crate `id` rests on a marker.
#[must_use]
pub fn crate_in_position(board: &Board, id: PieceId) -> bool {
    let Some(tile) = board
        .piece(id)
        .and_then(Piece::home_tile)
        .and_then(|home| board.tile(home.position()))
    else {
        return false;
    };
    tile.pieces()
        .iter()
        .filter_map(|&below| board.piece(below))
        .any(|piece| matches!(piece.kind(), PieceKind::Marker))
}

/// Every door on the board is open. False when there are no doors.
pub fn all_doors_open() -> impl Fn(&Board) -> bool + 'static {
    |board: &Board| {
        let mut doors = board
            .pieces()
            .filter(|(_, piece)| matches!(piece.kind(), PieceKind::Door { .. }))
            .peekable();
        doors.peek().is_some() && doors.all(|(_, piece)| piece.is_open_door())
    }
}

/// The door `door` is open.
pub fn door_open(door: PieceId) -> impl Fn(&Board) -> bool + 'static {
    move |board: &Board| board.piece(door).is_some_and(Piece::is_open_door)
}

/// The character `id` is dead or gone from the board.
pub fn piece_dead(id: PieceId) -> impl Fn(&Board) -> bool + 'static {
    move |board: &Board| {
        board
            .piece(id)
            .is_none_or(|piece| piece.character().is_some_and(|c| c.is_dead()))
    }
}
