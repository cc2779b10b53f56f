//! Blueprints: text layouts turned into pieces on a board.
//!
//! ```text
//! # # # # #
//! # @ - $ #
//! # - - . #
//! # # # # #
//! ```
//!
//! Whitespace inside a row is ignored, as are blank lines before and after
//! the layout. Each remaining character is looked up in a [`Legend`];
//! characters without an entry leave their tile empty.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use crate::error::BlueprintError;
use crate::game::{Board, BoardConfig, Piece, PieceId, Position};

/// Where the pieces for one blueprint symbol come from.
pub enum LegendEntry {
    /// A fresh piece for every occurrence.
    Factory(Box<dyn FnMut() -> Piece>),
    /// A fixed set of pieces, handed out from the end of the list.
    Pool(Vec<Piece>),
    /// Exactly one piece.
    Single(Option<Piece>),
}

impl fmt::Debug for LegendEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Factory(_) => f.write_str("Factory"),
            Self::Pool(pieces) => f.debug_tuple("Pool").field(&pieces.len()).finish(),
            Self::Single(piece) => f.debug_tuple("Single").field(&piece.is_some()).finish(),
        }
    }
}

impl LegendEntry {
    fn take(&mut self) -> Option<Piece> {
        match self {
            Self::Factory(factory) => Some(factory()),
            Self::Pool(pieces) => pieces.pop(),
            Self::Single(piece) => piece.take(),
        }
    }
}

/// Maps blueprint symbols to pieces.
#[derive(Debug, Default)]
pub struct Legend {
    entries: HashMap<char, LegendEntry>,
}

impl Legend {
    /// An empty legend.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a fresh piece with `factory` for every `symbol`.
    #[must_use]
    pub fn with_factory(mut self, symbol: char, factory: impl FnMut() -> Piece + 'static) -> Self {
        self.entries.insert(symbol, LegendEntry::Factory(Box::new(factory)));
        self
    }

    /// Hand out `pieces` for `symbol`, last piece first.
    #[must_use]
    pub fn with_pool(mut self, symbol: char, pieces: Vec<Piece>) -> Self {
        self.entries.insert(symbol, LegendEntry::Pool(pieces));
        self
    }

    /// Use `piece` for the one occurrence of `symbol`.
    #[must_use]
    pub fn with_single(mut self, symbol: char, piece: Piece) -> Self {
        self.entries.insert(symbol, LegendEntry::Single(Some(piece)));
        self
    }

    /// Whether `symbol` has an entry.
    #[must_use]
    pub fn contains(&self, symbol: char) -> bool {
        self.entries.contains_key(&symbol)
    }

    /// The next piece for `symbol`. `None` if the symbol has no entry.
    ///
    /// # Errors
    ///
    /// [`BlueprintError::LegendExhausted`] if the entry has no pieces left.
    pub fn take(&mut self, symbol: char) -> Option<Result<Piece, BlueprintError>> {
        let entry = self.entries.get_mut(&symbol)?;
        Some(entry.take().ok_or(BlueprintError::LegendExhausted { symbol }))
    }
}

/// Ids of the placed pieces, grouped by blueprint symbol in placement order.
pub type Placed = BTreeMap<char, Vec<PieceId>>;

/// Rows of symbols with whitespace and surrounding blank lines removed.
fn split_rows(blueprint: &str) -> Vec<Vec<char>> {
    let mut rows: Vec<Vec<char>> = blueprint
        .lines()
        .map(|line| line.chars().filter(|c| !c.is_whitespace()).collect())
        .collect();
    while rows.last().is_some_and(Vec::is_empty) {
        rows.pop();
    }
    let first = rows.iter().position(|row| !row.is_empty()).unwrap_or(rows.len());
    rows.drain(..first);
    rows
}

fn check_rectangular(rows: &[Vec<char>]) -> Result<(), BlueprintError> {
    let width = rows.first().map_or(0, Vec::len);
    match rows.iter().position(|row| row.len() != width) {
        Some(row) => Err(BlueprintError::RaggedRows { row }),
        None => Ok(()),
    }
}

/// Split a blueprint into rows of symbols, top row first.
///
/// # Errors
///
/// [`BlueprintError::Empty`] if there is no row, [`BlueprintError::RaggedRows`]
/// if the rows differ in length.
pub fn parse_rows(blueprint: &str) -> Result<Vec<Vec<char>>, BlueprintError> {
    let rows = split_rows(blueprint);
    if rows.is_empty() {
        return Err(BlueprintError::Empty);
    }
    check_rectangular(&rows)?;
    Ok(rows)
}

impl Board {
    /// Create a board sized after `blueprint` and fill it.
    ///
    /// # Errors
    ///
    /// See [`parse_rows`] and [`Board::fill_with_blueprint`].
    pub fn from_blueprint(
        blueprint: &str,
        legend: &mut Legend,
        config: BoardConfig,
    ) -> Result<(Self, Placed), BlueprintError> {
        let rows = parse_rows(blueprint)?;
        let size_y = u16::try_from(rows.len()).map_err(|_| BlueprintError::WrongHeight {
            expected: u16::MAX,
            found: rows.len(),
        })?;
        let size_x = u16::try_from(rows[0].len()).map_err(|_| BlueprintError::WrongWidth {
            expected: u16::MAX,
            found: rows[0].len(),
        })?;
        let mut board = Self::new(size_x, size_y, config);
        let placed = board.fill_with_blueprint(blueprint, legend)?;
        Ok((board, placed))
    }

    /// Place pieces on this board as laid out in `blueprint`.
    ///
    /// Cells are filled bottom row first, left to right within a row.
    ///
    /// # Errors
    ///
    /// [`BlueprintError::WrongHeight`] if the row count differs from the board
    /// height (checked first), [`BlueprintError::WrongWidth`] if the first row
    /// differs from the board width, [`BlueprintError::RaggedRows`] for rows of
    /// different lengths, [`BlueprintError::LegendExhausted`] if an entry runs
    /// out and [`BlueprintError::Placement`] if a piece cannot be placed.
    pub fn fill_with_blueprint(
        &mut self,
        blueprint: &str,
        legend: &mut Legend,
    ) -> Result<Placed, BlueprintError> {
        let rows = split_rows(blueprint);
        if rows.len() != usize::from(self.size_y()) {
            return Err(BlueprintError::WrongHeight {
                expected: self.size_y(),
                found: rows.len(),
            });
        }
        let width = rows.first().map_or(0, Vec::len);
        if width != usize::from(self.size_x()) {
            return Err(BlueprintError::WrongWidth {
                expected: self.size_x(),
                found: width,
            });
        }
        check_rectangular(&rows)?;

        let mut placed = Placed::new();
        for (y, row) in (0_i32..).zip(rows.iter().rev()) {
            for (x, &symbol) in (0_i32..).zip(row) {
                let Some(piece) = legend.take(symbol) else {
                    continue;
                };
                let id = self.place(piece?, Position::new(x, y))?;
                placed.entry(symbol).or_default().push(id);
            }
        }
        Ok(placed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PlacementError;

    fn walls() -> Legend {
        Legend::new().with_factory('#', Piece::new_wall)
    }

    #[test]
    fn test_parse_rows_trims_blank_lines_and_spaces() {
        let rows = parse_rows("\n\n  # - #\n  - # -\n\n").unwrap();
        assert_eq!(rows, vec![vec!['#', '-', '#'], vec!['-', '#', '-']]);
    }

    #[test]
    fn test_parse_rows_rejects_ragged() {
        assert_eq!(
            parse_rows("###\n##\n###"),
            Err(BlueprintError::RaggedRows { row: 1 })
        );
        assert_eq!(parse_rows("\n   \n"), Err(BlueprintError::Empty));
    }

    #[test]
    fn test_cells_are_placed_bottom_row_first() {
        let mut board = Board::new(2, 2, BoardConfig::default());
        let mut legend = Legend::new().with_pool(
            'c',
            vec![
                Piece::new_crate().with_name("placed last"),
                Piece::new_crate().with_name("placed first"),
            ],
        );
        let placed = board.fill_with_blueprint("c -\n- c", &mut legend).unwrap();
        let ids = &placed[&'c'];
        assert_eq!(ids.len(), 2);
        assert_eq!(board.position_of(ids[0]), Ok(Position::new(1, 0)));
        assert_eq!(board.piece(ids[0]).unwrap().name(), Some("placed first"));
        assert_eq!(board.position_of(ids[1]), Ok(Position::new(0, 1)));
    }

    #[test]
    fn test_wrong_height_and_width() {
        let mut board = Board::new(3, 2, BoardConfig::default());
        assert_eq!(
            board.fill_with_blueprint("###\n###\n###", &mut walls()),
            Err(BlueprintError::WrongHeight { expected: 2, found: 3 })
        );
        assert_eq!(
            board.fill_with_blueprint("##\n##", &mut walls()),
            Err(BlueprintError::WrongWidth { expected: 3, found: 2 })
        );
        assert_eq!(
            board.fill_with_blueprint("###\n##", &mut walls()),
            Err(BlueprintError::RaggedRows { row: 1 })
        );
        assert!(board.tiles().all(crate::game::Tile::is_empty));
    }

    #[test]
    fn test_single_entry_runs_out() {
        let mut board = Board::new(2, 1, BoardConfig::default());
        let mut legend = Legend::new().with_single('@', Piece::new_player("Bruma", "@"));
        assert_eq!(
            board.fill_with_blueprint("@@", &mut legend),
            Err(BlueprintError::LegendExhausted { symbol: '@' })
        );
    }

    #[test]
    fn test_unknown_symbols_leave_tiles_empty() {
        let (board, placed) =
            Board::from_blueprint("#x#\n-#-", &mut walls(), BoardConfig::default()).unwrap();
        assert_eq!(board.size_x(), 3);
        assert_eq!(board.size_y(), 2);
        assert_eq!(placed[&'#'].len(), 3);
        assert!(board.tile(Position::new(1, 1)).unwrap().is_empty());
    }

    #[test]
    fn test_placement_failure_is_reported() {
        let mut board = Board::new(1, 1, BoardConfig::default());
        board.place(Piece::new_wall(), Position::new(0, 0)).unwrap();
        assert_eq!(
            board.fill_with_blueprint("#", &mut walls()),
            Err(BlueprintError::Placement(PlacementError::PositionOccupied {
                position: Position::new(0, 0)
            }))
        );
    }
}
