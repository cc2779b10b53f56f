//! Board invariants - sanity checks that detect bugs.
//!
//! Every mutation goes through the board's link and unlink operations, so
//! these should NEVER trigger. If they do, it indicates a bug in the engine.

use std::collections::HashSet;

use crate::game::{Board, Piece};

/// Invariant violation error.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Invariant violation: {message}")]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub message: String,
}

impl InvariantViolation {
    fn new(message: String) -> Self {
        Self { message }
    }
}

/// Check all board invariants.
///
/// Returns a list of violations found, or empty if all invariants hold.
#[must_use]
pub fn check_invariants(board: &Board) -> Vec<InvariantViolation> {
    let mut violations = Vec::new();

    // Piece -> tile
    for (id, piece) in board.pieces() {
        match piece.home_tile() {
            None => violations.push(InvariantViolation::new(format!(
                "Piece {id:?} is on the board but has no home tile"
            ))),
            Some(home) if home.board() != board.id() => violations.push(InvariantViolation::new(
                format!("Piece {id:?} points at a tile of another board"),
            )),
            Some(home) => {
                if !board.tile(home.position()).is_some_and(|t| t.contains(id)) {
                    violations.push(InvariantViolation::new(format!(
                        "Piece {id:?} points at {} but that tile does not hold it",
                        home.position()
                    )));
                }
            }
        }
    }

    // Tile -> piece
    let mut seen = HashSet::new();
    for tile in board.tiles() {
        let stack = tile.pieces();
        for (depth, &id) in stack.iter().enumerate() {
            if !seen.insert(id) {
                violations.push(InvariantViolation::new(format!(
                    "Piece {id:?} sits on more than one tile"
                )));
            }
            let Some(piece) = board.piece(id) else {
                violations.push(InvariantViolation::new(format!(
                    "Tile {} holds unknown piece {id:?}",
                    tile.position()
                )));
                continue;
            };
            if piece.home_tile().map(|h| h.position()) != Some(tile.position()) {
                violations.push(InvariantViolation::new(format!(
                    "Tile {} holds piece {id:?} whose home is elsewhere",
                    tile.position()
                )));
            }
            let is_top = depth + 1 == stack.len();
            if !is_top && !piece.is_walkable() {
                violations.push(InvariantViolation::new(format!(
                    "Tile {} has non-walkable piece {id:?} below the top",
                    tile.position()
                )));
            }
        }
    }

    // Roster
    let mut in_roster = HashSet::new();
    for &id in board.roster() {
        if !in_roster.insert(id) {
            violations.push(InvariantViolation::new(format!(
                "Piece {id:?} is on the roster twice"
            )));
        }
        if !board.piece(id).is_some_and(Piece::is_character) {
            violations.push(InvariantViolation::new(format!(
                "Roster entry {id:?} is not a placed character"
            )));
        }
    }
    for (id, piece) in board.pieces() {
        if piece.is_character() && !in_roster.contains(&id) {
            violations.push(InvariantViolation::new(format!(
                "Character {id:?} is missing from the roster"
            )));
        }
    }

    violations
}

/// Assert all board invariants hold, panicking if any are violated.
///
/// Only active in debug builds. No-op in release builds.
///
/// # Panics
///
/// Panics with detailed message if any invariant is violated.
#[cfg(debug_assertions)]
pub fn assert_invariants(board: &Board) {
    let violations = check_invariants(board);
    if !violations.is_empty() {
        let messages: Vec<_> = violations.iter().map(|v| v.message.as_str()).collect();
        panic!("Board invariant violations:\n  - {}", messages.join("\n  - "));
    }
}

/// No-op in release builds.
#[cfg(not(debug_assertions))]
pub fn assert_invariants(_board: &Board) {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{BoardConfig, Position};

    fn create_valid_board() -> Board {
        let mut board = Board::new(4, 4, BoardConfig::default());
        board.fill_row(3, &[], Piece::new_wall).unwrap();
        board.place(Piece::new_marker(), Position::new(1, 1)).unwrap();
        board.place(Piece::new_crate(), Position::new(1, 1)).unwrap();
        board.place(Piece::new_player("Bruma", "@"), Position::new(0, 0)).unwrap();
        board.place(Piece::new_enemy("Grub", "E"), Position::new(2, 2)).unwrap();
        board
    }

    #[test]
    fn test_valid_board_passes() {
        let board = create_valid_board();
        let violations = check_invariants(&board);
        assert!(violations.is_empty(), "{violations:?}");
    }

    #[test]
    fn test_empty_board_passes() {
        let board = Board::new(3, 3, BoardConfig::default());
        assert!(check_invariants(&board).is_empty());
    }

    #[test]
    fn test_missing_back_reference_detected() {
        let mut board = create_valid_board();
        let player = board.players()[0];
        if let Some(piece) = board.piece_mut(player) {
            piece.home = None;
        }

        let violations = check_invariants(&board);
        assert!(violations.iter().any(|v| v.message.contains("no home tile")));
        assert!(violations.iter().any(|v| v.message.contains("whose home is elsewhere")));
    }

    #[test]
    fn test_non_walkable_below_top_detected() {
        let mut board = create_valid_board();
        let marker = board.tile(Position::new(1, 1)).unwrap().pieces()[0];
        if let Some(piece) = board.piece_mut(marker) {
            piece.set_walkable(false);
        }

        let violations = check_invariants(&board);
        assert_eq!(violations.len(), 1, "{violations:?}");
        assert!(violations[0].message.contains("below the top"));
    }

    #[test]
    fn test_invariants_hold_after_removal() {
        let mut board = create_valid_board();
        let top = board.tile(Position::new(1, 1)).unwrap().piece().unwrap();
        board.remove(top).unwrap();
        let player = board.players()[0];
        board.remove(player).unwrap();
        assert!(check_invariants(&board).is_empty());
    }

    #[test]
    fn test_assert_invariants_on_valid_board() {
        assert_invariants(&create_valid_board());
    }
}
