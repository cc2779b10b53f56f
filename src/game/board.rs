//! The board: a grid of tiles, the pieces standing on them and the rules
//! that keep the two in sync.

use std::collections::HashMap;
use std::fmt;
use std::ops::Range;
use std::rc::Rc;

use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{PieceStateError, PlacementError};
use crate::game::{Adjacent, BoardId, Piece, PieceId, Position, Tile, TileHandle};

/// A named callback registered on a board.
///
/// Hooks receive the board and the piece on whose behalf they run, and report
/// whether they did anything.
pub type Hook = Rc<dyn Fn(&mut Board, PieceId) -> bool>;

/// A win or lose predicate, re-evaluated on every query.
pub type Condition = Box<dyn Fn(&Board) -> bool>;

/// Board settings that are not part of the layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    /// Name shown by the renderer.
    pub name: String,
    /// What an empty tile renders as.
    pub empty_glyph: String,
    /// Last turn that may be played; `None` means no limit.
    pub turn_limit: Option<u32>,
    /// Seed for random action selection.
    pub seed: u64,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            name: "board".to_string(),
            empty_glyph: "   ".to_string(),
            turn_limit: None,
            seed: 0,
        }
    }
}

/// Where the game stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    /// Nothing decided yet.
    Playing,
    /// A win condition holds.
    Won,
    /// A lose condition holds.
    Lost,
    /// The turn limit was exceeded.
    TurnsExhausted,
}

/// A rectangular grid of tiles and the pieces placed on it.
///
/// The board owns every piece standing on it. Pieces are addressed by
/// [`PieceId`]; tiles store ids and pieces store a [`TileHandle`] back to
/// their tile, and both sides are only ever changed together.
pub struct Board {
    id: BoardId,
    name: String,
    size_x: u16,
    size_y: u16,
    empty_glyph: String,
    /// Column-major: the tile at `(x, y)` is at `x * size_y + y`.
    tiles: Vec<Tile>,
    pieces: Vec<Option<Piece>>,
    roster: Vec<PieceId>,
    pub(super) turn: u32,
    pub(super) turn_limit: Option<u32>,
    win_conditions: Vec<Condition>,
    lose_conditions: Vec<Condition>,
    hooks: HashMap<String, Hook>,
    pub(super) rng: StdRng,
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Board")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("size_x", &self.size_x)
            .field("size_y", &self.size_y)
            .field("turn", &self.turn)
            .field("turn_limit", &self.turn_limit)
            .field("pieces", &self.pieces().count())
            .field("roster", &self.roster)
            .field("hooks", &self.hooks.keys().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}

impl Board {
    /// Create an empty board of `size_x` columns and `size_y` rows.
    #[must_use]
    pub fn new(size_x: u16, size_y: u16, config: BoardConfig) -> Self {
        let tiles = (0..i32::from(size_x))
            .flat_map(|x| (0..i32::from(size_y)).map(move |y| Tile::new(Position::new(x, y))))
            .collect();
        Self {
            id: BoardId::next(),
            name: config.name,
            size_x,
            size_y,
            empty_glyph: config.empty_glyph,
            tiles,
            pieces: Vec::new(),
            roster: Vec::new(),
            turn: 0,
            turn_limit: config.turn_limit,
            win_conditions: Vec::new(),
            lose_conditions: Vec::new(),
            hooks: HashMap::new(),
            rng: StdRng::seed_from_u64(config.seed),
        }
    }

    /// Identity of this board.
    #[must_use]
    pub const fn id(&self) -> BoardId {
        self.id
    }

    /// Name of the board.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of columns.
    #[must_use]
    pub const fn size_x(&self) -> u16 {
        self.size_x
    }

    /// Number of rows.
    #[must_use]
    pub const fn size_y(&self) -> u16 {
        self.size_y
    }

    /// What an empty tile renders as.
    #[must_use]
    pub fn empty_glyph(&self) -> &str {
        &self.empty_glyph
    }

    fn index(&self, position: Position) -> Option<usize> {
        if !self.in_bounds(position) {
            return None;
        }
        // Both coordinates are non-negative here.
        let x = usize::try_from(position.x).ok()?;
        let y = usize::try_from(position.y).ok()?;
        Some(x * usize::from(self.size_y) + y)
    }

    /// Whether `position` lies inside the board.
    #[must_use]
    pub fn in_bounds(&self, position: Position) -> bool {
        (0..i32::from(self.size_x)).contains(&position.x)
            && (0..i32::from(self.size_y)).contains(&position.y)
    }

    /// Whether the tile at `position` holds a piece that cannot be walked over.
    ///
    /// Positions off the board are never occupied.
    #[must_use]
    pub fn is_occupied(&self, position: Position) -> bool {
        self.tile(position)
            .and_then(Tile::piece)
            .is_some_and(|top| !self.is_walkable(top))
    }

    /// Whether a new piece could be placed at `position`.
    #[must_use]
    pub fn is_valid_position(&self, position: Position) -> bool {
        self.in_bounds(position) && !self.is_occupied(position)
    }

    /// The tile at `position`.
    #[must_use]
    pub fn tile(&self, position: Position) -> Option<&Tile> {
        self.index(position).map(|i| &self.tiles[i])
    }

    fn tile_mut(&mut self, position: Position) -> Option<&mut Tile> {
        self.index(position).map(|i| &mut self.tiles[i])
    }

    /// A handle to the tile at `position`, if it is on the board.
    #[must_use]
    pub fn tile_handle(&self, position: Position) -> Option<TileHandle> {
        self.in_bounds(position).then(|| TileHandle::new(self.id, position))
    }

    /// Every tile, column by column.
    pub fn tiles(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.iter()
    }

    /// Tiles of column `x`, bottom first. Empty if `x` is off the board.
    pub fn column(&self, x: i32) -> impl Iterator<Item = &Tile> {
        let ys = if (0..i32::from(self.size_x)).contains(&x) {
            0..i32::from(self.size_y)
        } else {
            0..0
        };
        ys.filter_map(move |y| self.tile(Position::new(x, y)))
    }

    /// Tiles of row `y`, left first. Empty if `y` is off the board.
    pub fn row(&self, y: i32) -> impl Iterator<Item = &Tile> {
        let xs = if (0..i32::from(self.size_y)).contains(&y) {
            0..i32::from(self.size_x)
        } else {
            0..0
        };
        xs.filter_map(move |x| self.tile(Position::new(x, y)))
    }

    /// The neighbours of `tile`. Directions leading off the board are `None`.
    #[must_use]
    pub fn adjacent_to(&self, tile: TileHandle) -> Adjacent {
        self.adjacent_to_position(tile.position())
    }

    /// The neighbours of `position`.
    #[must_use]
    pub fn adjacent_to_position(&self, position: Position) -> Adjacent {
        Adjacent::from_fn(|direction| self.tile_handle(position.step(direction)))
    }

    /// The neighbours of the tile `piece` stands on.
    ///
    /// # Errors
    ///
    /// Fails if the piece is not placed on this board.
    pub fn adjacent_to_piece(&self, piece: PieceId) -> Result<Adjacent, PieceStateError> {
        self.position_of(piece)
            .map(|position| self.adjacent_to_position(position))
    }

    /// The piece with the given id, if it is on this board.
    #[must_use]
    pub fn piece(&self, id: PieceId) -> Option<&Piece> {
        if id.board() != self.id {
            return None;
        }
        self.pieces.get(id.slot()).and_then(Option::as_ref)
    }

    /// Mutable access to a piece on this board.
    pub fn piece_mut(&mut self, id: PieceId) -> Option<&mut Piece> {
        if id.board() != self.id {
            return None;
        }
        self.pieces.get_mut(id.slot()).and_then(Option::as_mut)
    }

    /// Every piece on the board, in placement order.
    pub fn pieces(&self) -> impl Iterator<Item = (PieceId, &Piece)> {
        self.pieces.iter().enumerate().filter_map(|(slot, piece)| {
            let slot = u32::try_from(slot).ok()?;
            piece.as_ref().map(|p| (PieceId::new(self.id, slot), p))
        })
    }

    /// Ids of the pieces matching `predicate`, in placement order.
    pub fn find_pieces(&self, predicate: impl Fn(&Piece) -> bool) -> Vec<PieceId> {
        self.pieces()
            .filter(|(_, piece)| predicate(piece))
            .map(|(id, _)| id)
            .collect()
    }

    /// The first piece with the given name.
    #[must_use]
    pub fn find_by_name(&self, name: &str) -> Option<PieceId> {
        self.pieces()
            .find(|(_, piece)| piece.name() == Some(name))
            .map(|(id, _)| id)
    }

    /// Position of a piece.
    ///
    /// # Errors
    ///
    /// [`PieceStateError::NotOnThisBoard`] if the id belongs to another board,
    /// [`PieceStateError::NotOnATile`] if the piece has been removed.
    pub fn position_of(&self, id: PieceId) -> Result<Position, PieceStateError> {
        if id.board() != self.id {
            return Err(PieceStateError::NotOnThisBoard);
        }
        self.piece(id)
            .ok_or(PieceStateError::NotOnATile)?
            .position()
    }

    /// The visible occupant of `tile`.
    #[must_use]
    pub fn top_piece(&self, tile: TileHandle) -> Option<PieceId> {
        if tile.board() != self.id {
            return None;
        }
        self.tile(tile.position()).and_then(Tile::piece)
    }

    /// Whether the piece can be walked over. Unknown pieces are not walkable.
    #[must_use]
    pub fn is_walkable(&self, id: PieceId) -> bool {
        self.piece(id).is_some_and(Piece::is_walkable)
    }

    /// Characters in the order they were placed; passive actions run in this order.
    #[must_use]
    pub fn roster(&self) -> &[PieceId] {
        &self.roster
    }

    /// The players on the board, in roster order.
    #[must_use]
    pub fn players(&self) -> Vec<PieceId> {
        self.roster
            .iter()
            .copied()
            .filter(|&id| self.piece(id).is_some_and(Piece::is_player))
            .collect()
    }

    /// Put `piece` on the tile at `position`.
    ///
    /// Characters are added to the roster.
    ///
    /// # Errors
    ///
    /// [`PlacementError::OutOfBounds`] if `position` is off the board (checked
    /// first), [`PlacementError::PositionOccupied`] if the tile's top piece is
    /// not walkable.
    pub fn place(
        &mut self,
        mut piece: Piece,
        position: Position,
    ) -> Result<PieceId, PlacementError> {
        if !self.in_bounds(position) {
            return Err(PlacementError::OutOfBounds { position });
        }
        if self.is_occupied(position) {
            return Err(PlacementError::PositionOccupied { position });
        }

        let slot = u32::try_from(self.pieces.len())
            .map_err(|_| PlacementError::PositionOccupied { position })?;
        let id = PieceId::new(self.id, slot);
        let is_character = piece.is_character();
        piece.home = None;
        self.pieces.push(Some(piece));
        self.link(position, id);
        if is_character {
            self.roster.push(id);
        }
        debug!(piece = ?id, %position, "placed");
        Ok(id)
    }

    /// Place a fresh piece from `factory` on every cell of column `x` covered by
    /// `ranges` of rows. An empty slice fills the whole column.
    ///
    /// # Errors
    ///
    /// Stops at the first placement error; pieces placed before it stay.
    pub fn fill_column(
        &mut self,
        x: i32,
        ranges: &[Range<i32>],
        mut factory: impl FnMut() -> Piece,
    ) -> Result<Vec<PieceId>, PlacementError> {
        let whole = [0..i32::from(self.size_y)];
        let ranges = if ranges.is_empty() { &whole[..] } else { ranges };
        let mut placed = Vec::new();
        for y in ranges.iter().flat_map(Clone::clone) {
            placed.push(self.place(factory(), Position::new(x, y))?);
        }
        Ok(placed)
    }

    /// Place a fresh piece from `factory` on every cell of row `y` covered by
    /// `ranges` of columns. An empty slice fills the whole row.
    ///
    /// # Errors
    ///
    /// Stops at the first placement error; pieces placed before it stay.
    pub fn fill_row(
        &mut self,
        y: i32,
        ranges: &[Range<i32>],
        mut factory: impl FnMut() -> Piece,
    ) -> Result<Vec<PieceId>, PlacementError> {
        let whole = [0..i32::from(self.size_x)];
        let ranges = if ranges.is_empty() { &whole[..] } else { ranges };
        let mut placed = Vec::new();
        for x in ranges.iter().flat_map(Clone::clone) {
            placed.push(self.place(factory(), Position::new(x, y))?);
        }
        Ok(placed)
    }

    /// Take `id` off the board and hand it back.
    ///
    /// Any piece it was standing on becomes visible again.
    ///
    /// # Errors
    ///
    /// [`PieceStateError::NotOnThisBoard`] if the id belongs to another board,
    /// [`PieceStateError::NotOnATile`] if it was already removed.
    pub fn remove(&mut self, id: PieceId) -> Result<Piece, PieceStateError> {
        if id.board() != self.id {
            return Err(PieceStateError::NotOnThisBoard);
        }
        self.detach(id)
    }

    /// Remove the visible occupant of the tile at `position`, if any.
    pub fn take_top(&mut self, position: Position) -> Option<Piece> {
        let top = self.tile(position).and_then(Tile::piece)?;
        self.detach(top).ok()
    }

    /// Unlink `id` from its tile and from the arena.
    pub(super) fn detach(&mut self, id: PieceId) -> Result<Piece, PieceStateError> {
        let home = self
            .piece(id)
            .and_then(Piece::home_tile)
            .ok_or(PieceStateError::NotOnATile)?;
        self.unlink(home.position(), id);
        self.roster.retain(|&r| r != id);
        let mut piece = self
            .pieces
            .get_mut(id.slot())
            .and_then(Option::take)
            .ok_or(PieceStateError::NotOnATile)?;
        piece.home = None;
        debug!(piece = ?id, position = %home.position(), "removed");
        Ok(piece)
    }

    /// Push `id` onto the tile at `position` and point the piece back at it.
    ///
    /// Refuses when the tile's top piece is not walkable.
    pub(super) fn link(&mut self, position: Position, id: PieceId) -> bool {
        if self.is_occupied(position) {
            return false;
        }
        let handle = TileHandle::new(self.id, position);
        let Some(tile) = self.tile_mut(position) else {
            return false;
        };
        tile.push(id);
        if let Some(piece) = self.piece_mut(id) {
            piece.home = Some(handle);
        }
        true
    }

    /// Take `id` off the tile at `position` and clear its back-reference.
    pub(super) fn unlink(&mut self, position: Position, id: PieceId) {
        if let Some(tile) = self.tile_mut(position) {
            tile.take(id);
        }
        if let Some(piece) = self.piece_mut(id) {
            piece.home = None;
        }
    }

    /// Register `hook` under `name`, replacing any hook of the same name.
    pub fn register_hook(
        &mut self,
        name: impl Into<String>,
        hook: impl Fn(&mut Board, PieceId) -> bool + 'static,
    ) {
        self.hooks.insert(name.into(), Rc::new(hook));
    }

    /// Whether a hook is registered under `name`.
    #[must_use]
    pub fn has_hook(&self, name: &str) -> bool {
        self.hooks.contains_key(name)
    }

    /// Run the hook registered under `name` for `piece`.
    ///
    /// Unknown hooks do nothing and return `false`.
    pub fn call_hook(&mut self, name: &str, piece: PieceId) -> bool {
        let Some(hook) = self.hooks.get(name).cloned() else {
            warn!(hook = name, ?piece, "no hook registered under this name");
            return false;
        };
        hook(self, piece)
    }

    /// Add a predicate that makes the game won.
    pub fn add_win_condition(&mut self, condition: impl Fn(&Board) -> bool + 'static) {
        self.win_conditions.push(Box::new(condition));
    }

    /// Add a predicate that makes the game lost.
    pub fn add_lose_condition(&mut self, condition: impl Fn(&Board) -> bool + 'static) {
        self.lose_conditions.push(Box::new(condition));
    }

    /// Whether any win condition holds.
    #[must_use]
    pub fn won(&self) -> bool {
        self.win_conditions.iter().any(|condition| condition(self))
    }

    /// Whether any lose condition holds.
    #[must_use]
    pub fn lost(&self) -> bool {
        self.lose_conditions.iter().any(|condition| condition(self))
    }
}
