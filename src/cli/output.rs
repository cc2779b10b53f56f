//! Output formatting utilities for CLI.

use ludema::game::{Board, PieceId, Status};
use ludema::render_text;

/// The board followed by a status line for the player.
pub(super) fn format_frame(board: &Board, player: PieceId) -> String {
    let mut output = render_text(board);
    output.push('\n');
    output.push_str(&format!("{} | turn {}", board.name(), board.turn()));
    if let Some(limit) = board.turn_limit() {
        output.push_str(&format!(" of {limit}"));
    }
    if let Some(piece) = board.piece(player) {
        let name = piece.name().unwrap_or("player");
        if let Some(character) = piece.character() {
            let health = match character.health() {
                Some(health) => format!("{health} HP"),
                None => "invulnerable".to_string(),
            };
            output.push_str(&format!(
                " | {name}: {health}, {} item(s)",
                character.inventory().len()
            ));
        }
    }
    output.push('\n');
    output
}

/// Closing message for a finished game.
pub(super) fn format_outcome(status: Status) -> &'static str {
    match status {
        Status::Won => "You won!",
        Status::Lost => "You died.",
        Status::TurnsExhausted => "Out of turns.",
        Status::Playing => "Game abandoned.",
    }
}

/// Key bindings shown before the first frame.
pub(super) const HELP: &str = "\
Moves: w/a/s/d  Attack: i/j/k/l  Grab: g  Use item: u  Quit: q
";

#[cfg(test)]
mod tests {
    use super::*;
    use ludema::game::{BoardConfig, Character, Piece, PieceKind, Position, Role};

    #[test]
    fn test_frame_has_status_line() {
        let mut board = Board::new(
            2,
            1,
            BoardConfig {
                turn_limit: Some(9),
                ..BoardConfig::default()
            },
        );
        let guy = board.place(Piece::new_player("Bruma", "@"), Position::new(0, 0)).unwrap();
        let frame = format_frame(&board, guy);
        assert!(frame.starts_with(" @    \n"));
        assert!(frame.contains("turn 0 of 9"));
        assert!(frame.contains("Bruma: 10 HP, 0 item(s)"));
    }

    #[test]
    fn test_frame_shows_invulnerable_player() {
        let mut board = Board::new(1, 1, BoardConfig::default());
        let ghost = Piece::new(
            "G",
            PieceKind::Character(Character::new(Role::player()).invulnerable()),
        );
        let id = board.place(ghost, Position::new(0, 0)).unwrap();
        assert!(format_frame(&board, id).contains("player: invulnerable, 0 item(s)"));
    }

    #[test]
    fn test_outcomes() {
        assert_eq!(format_outcome(Status::Won), "You won!");
        assert_eq!(format_outcome(Status::Lost), "You died.");
    }
}
