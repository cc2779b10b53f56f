//! Plain-text rendering of a board.
//!
//! Rows are printed top first. Every cell takes three columns: one-glyph
//! pieces are centred, two-glyph pieces are right aligned and longer glyphs
//! are printed as they are.

use std::fmt;

use serde::Serialize;

use crate::game::{Board, Position, Status};

/// Render `board` as text, one line per row, top row first.
///
/// ```text
///  #  #  #
///  #  @  #
///  #  #  #
/// ```
#[must_use]
pub fn render_text(board: &Board) -> String {
    let mut output = String::new();
    for row in glyph_rows(board) {
        for glyph in &row {
            output.push_str(&pad_cell(glyph.as_deref(), board.empty_glyph()));
        }
        output.push('\n');
    }
    output
}

/// Pad one cell to three columns.
fn pad_cell(glyph: Option<&str>, empty: &str) -> String {
    let Some(glyph) = glyph.filter(|g| !g.is_empty()) else {
        return empty.to_string();
    };
    match glyph.chars().count() {
        1 => format!(" {glyph} "),
        2 => format!(" {glyph}"),
        3 => glyph.to_string(),
        _ => format!(" {glyph} "),
    }
}

/// Glyph of the visible occupant of every tile, top row first.
fn glyph_rows(board: &Board) -> Vec<Vec<Option<String>>> {
    (0..i32::from(board.size_y()))
        .rev()
        .map(|y| {
            (0..i32::from(board.size_x()))
                .map(|x| top_glyph(board, Position::new(x, y)))
                .collect()
        })
        .collect()
}

fn top_glyph(board: &Board, position: Position) -> Option<String> {
    let top = board.tile(position)?.piece()?;
    board.piece(top).map(|piece| piece.glyph().into_owned())
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render_text(self))
    }
}

/// Serializable picture of a board at one moment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BoardSnapshot {
    /// Board name.
    pub name: String,
    /// Number of columns.
    pub size_x: u16,
    /// Number of rows.
    pub size_y: u16,
    /// Current turn.
    pub turn: u32,
    /// Turn limit, if any.
    pub turn_limit: Option<u32>,
    /// Game status.
    pub status: Status,
    /// Glyphs of the visible occupants, top row first; `null` for empty tiles.
    pub rows: Vec<Vec<Option<String>>>,
}

impl BoardSnapshot {
    /// Take a snapshot of `board`.
    #[must_use]
    pub fn capture(board: &Board) -> Self {
        Self {
            name: board.name().to_string(),
            size_x: board.size_x(),
            size_y: board.size_y(),
            turn: board.turn(),
            turn_limit: board.turn_limit(),
            status: board.status(),
            rows: glyph_rows(board),
        }
    }
}
