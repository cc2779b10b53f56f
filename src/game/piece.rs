//! Pieces: anything that can stand on a tile.

use std::borrow::Cow;

use serde::Serialize;

use crate::error::PieceStateError;
use crate::game::{
    BoardId, Capability, CapabilityKind, Character, Item, ItemEffect, NamedAction, Passive,
    Position, Role, TileHandle,
};

/// Glyph used by walls unless told otherwise.
pub const WALL_GLYPH: &str = "#";
/// Glyph used by destination markers.
pub const MARKER_GLYPH: &str = "\u{25CC}";
/// Glyph used by crates.
pub const CRATE_GLYPH: &str = "\u{25A1}";
/// Suffix appended to the glyph of a closed door.
pub const CLOSED_DOOR_SUFFIX: &str = "*";

/// Identity of a piece on a board.
///
/// Ids are handed out by [`Board::place`](crate::game::Board::place) and stay
/// valid until the piece is removed. Slots are never reused, so a stale id
/// never refers to another piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct PieceId {
    board: BoardId,
    slot: u32,
}

impl PieceId {
    pub(crate) const fn new(board: BoardId, slot: u32) -> Self {
        Self { board, slot }
    }

    /// The board that issued this id.
    #[must_use]
    pub const fn board(self) -> BoardId {
        self.board
    }

    pub(crate) const fn slot(self) -> usize {
        self.slot as usize
    }
}

/// What a piece is, with the state specific to that variant.
#[derive(Debug, Clone)]
pub enum PieceKind {
    /// An inert obstacle.
    Wall,
    /// A walkable destination marker.
    Marker,
    /// A pushable box; repeats the last move of whoever touches it.
    Crate,
    /// A door that can be opened with a key.
    Door {
        /// Whether the door has been opened.
        open: bool,
    },
    /// Something a character can carry and use.
    Item(Item),
    /// A player or non-playable character.
    Character(Character),
}

/// Anything that can be put on a tile.
#[derive(Debug, Clone)]
pub struct Piece {
    glyph: String,
    name: Option<String>,
    walkable: bool,
    pub(super) home: Option<TileHandle>,
    pub(super) kind: PieceKind,
    pub(super) moving: Capability,
    pub(super) attacking: Capability,
    pub(super) grabbing: Capability,
    on_touch: Option<String>,
}

impl Piece {
    /// Create a piece of the given kind with no capabilities.
    #[must_use]
    pub fn new(glyph: impl Into<String>, kind: PieceKind) -> Self {
        Self {
            glyph: glyph.into(),
            name: None,
            walkable: false,
            home: None,
            kind,
            moving: Capability::none(CapabilityKind::Moving),
            attacking: Capability::none(CapabilityKind::Attacking),
            grabbing: Capability::none(CapabilityKind::Grabbing),
            on_touch: None,
        }
    }

    /// A wall.
    #[must_use]
    pub fn new_wall() -> Self {
        Self::new(WALL_GLYPH, PieceKind::Wall)
    }

    /// A walkable destination marker.
    #[must_use]
    pub fn new_marker() -> Self {
        Self::new(MARKER_GLYPH, PieceKind::Marker).walkable(true)
    }

    /// A crate that can be pushed in the four directions.
    #[must_use]
    pub fn new_crate() -> Self {
        Self::new(CRATE_GLYPH, PieceKind::Crate)
            .with_capability(Capability::with_defaults(CapabilityKind::Moving))
    }

    /// A closed door.
    #[must_use]
    pub fn new_door(name: impl Into<String>) -> Self {
        Self::new("D", PieceKind::Door { open: false }).with_name(name)
    }

    /// An item with the given effect.
    #[must_use]
    pub fn new_item(name: impl Into<String>, glyph: impl Into<String>, effect: ItemEffect) -> Self {
        Self::new(glyph, PieceKind::Item(Item::new(effect))).with_name(name)
    }

    /// A key. With `door` set it opens only that door, otherwise any door in range.
    #[must_use]
    pub fn new_key(name: impl Into<String>, door: Option<PieceId>) -> Self {
        Self::new_item(name, "K", ItemEffect::OpenDoor { door })
    }

    /// A player character with default movement, attacks and grabs.
    #[must_use]
    pub fn new_player(name: impl Into<String>, glyph: impl Into<String>) -> Self {
        Self::new_character(glyph, Character::new(Role::player())).with_name(name)
    }

    /// A non-playable character with the given passive behaviour.
    #[must_use]
    pub fn new_npc(name: impl Into<String>, glyph: impl Into<String>, passive: Passive) -> Self {
        Self::new_character(glyph, Character::new(Role::Npc).with_passive(passive)).with_name(name)
    }

    /// An NPC that attacks and wanders at random every turn.
    #[must_use]
    pub fn new_enemy(name: impl Into<String>, glyph: impl Into<String>) -> Self {
        Self::new_npc(name, glyph, Passive::Aggressive)
    }

    fn new_character(glyph: impl Into<String>, character: Character) -> Self {
        Self::new(glyph, PieceKind::Character(character))
            .with_capability(Capability::with_defaults(CapabilityKind::Moving))
            .with_capability(Capability::with_defaults(CapabilityKind::Attacking))
            .with_capability(Capability::with_defaults(CapabilityKind::Grabbing))
    }

    /// Set the name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the glyph.
    #[must_use]
    pub fn with_glyph(mut self, glyph: impl Into<String>) -> Self {
        self.glyph = glyph.into();
        self
    }

    /// Set whether other pieces may stand on this one.
    #[must_use]
    pub fn walkable(mut self, walkable: bool) -> Self {
        self.walkable = walkable;
        self
    }

    /// Replace one capability (chosen by its kind).
    #[must_use]
    pub fn with_capability(mut self, capability: Capability) -> Self {
        let kind = capability.kind();
        *self.capability_mut(kind) = capability;
        self
    }

    /// Replace the actions of one capability.
    #[must_use]
    pub fn with_actions(self, kind: CapabilityKind, actions: Vec<NamedAction>) -> Self {
        self.with_capability(Capability::custom(kind, actions))
    }

    /// Run the named board hook whenever another piece moves into this one.
    #[must_use]
    pub fn with_touch_hook(mut self, hook: impl Into<String>) -> Self {
        self.on_touch = Some(hook.into());
        self
    }

    /// Glyph to render for this piece.
    #[must_use]
    pub fn glyph(&self) -> Cow<'_, str> {
        match self.kind {
            PieceKind::Door { open: false } => {
                Cow::Owned(format!("{}{CLOSED_DOOR_SUFFIX}", self.glyph))
            }
            _ => Cow::Borrowed(&self.glyph),
        }
    }

    /// Name of the piece, if it has one.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Whether other pieces may stand on this one.
    #[must_use]
    pub const fn is_walkable(&self) -> bool {
        self.walkable
    }

    pub(super) fn set_walkable(&mut self, walkable: bool) {
        self.walkable = walkable;
    }

    /// The tile this piece stands on.
    #[must_use]
    pub const fn home_tile(&self) -> Option<TileHandle> {
        self.home
    }

    /// Position of the piece.
    ///
    /// # Errors
    ///
    /// Returns [`PieceStateError::NotOnATile`] if the piece is not placed.
    pub fn position(&self) -> Result<Position, PieceStateError> {
        self.home
            .map(TileHandle::position)
            .ok_or(PieceStateError::NotOnATile)
    }

    /// Variant data of this piece.
    #[must_use]
    pub const fn kind(&self) -> &PieceKind {
        &self.kind
    }

    /// Character data, if this piece is a character.
    #[must_use]
    pub const fn character(&self) -> Option<&Character> {
        match &self.kind {
            PieceKind::Character(c) => Some(c),
            _ => None,
        }
    }

    /// Mutable character data, if this piece is a character.
    #[must_use]
    pub fn character_mut(&mut self) -> Option<&mut Character> {
        match &mut self.kind {
            PieceKind::Character(c) => Some(c),
            _ => None,
        }
    }

    /// Item data, if this piece is an item.
    #[must_use]
    pub const fn item(&self) -> Option<&Item> {
        match &self.kind {
            PieceKind::Item(i) => Some(i),
            _ => None,
        }
    }

    pub(super) fn item_mut(&mut self) -> Option<&mut Item> {
        match &mut self.kind {
            PieceKind::Item(i) => Some(i),
            _ => None,
        }
    }

    /// Whether this piece is a player or NPC.
    #[must_use]
    pub const fn is_character(&self) -> bool {
        matches!(self.kind, PieceKind::Character(_))
    }

    /// Whether this piece is a player.
    #[must_use]
    pub fn is_player(&self) -> bool {
        self.character().is_some_and(Character::is_player)
    }

    /// Whether this piece is an item.
    #[must_use]
    pub const fn is_item(&self) -> bool {
        matches!(self.kind, PieceKind::Item(_))
    }

    /// Whether this piece is an open door.
    #[must_use]
    pub const fn is_open_door(&self) -> bool {
        matches!(self.kind, PieceKind::Door { open: true })
    }

    /// One of the piece's capabilities.
    #[must_use]
    pub const fn capability(&self, kind: CapabilityKind) -> &Capability {
        match kind {
            CapabilityKind::Moving => &self.moving,
            CapabilityKind::Attacking => &self.attacking,
            CapabilityKind::Grabbing => &self.grabbing,
        }
    }

    pub(super) fn capability_mut(&mut self, kind: CapabilityKind) -> &mut Capability {
        match kind {
            CapabilityKind::Moving => &mut self.moving,
            CapabilityKind::Attacking => &mut self.attacking,
            CapabilityKind::Grabbing => &mut self.grabbing,
        }
    }

    /// Hook run when another piece moves into this one.
    #[must_use]
    pub fn touch_hook(&self) -> Option<&str> {
        self.on_touch.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wall_has_no_capabilities() {
        let wall = Piece::new_wall();
        assert!(!wall.is_walkable());
        assert!(!wall.capability(CapabilityKind::Moving).is_implemented());
        assert!(!wall.capability(CapabilityKind::Attacking).is_implemented());
        assert!(!wall.capability(CapabilityKind::Grabbing).is_implemented());
    }

    #[test]
    fn test_character_has_default_directions() {
        let guy = Piece::new_player("Bruma", "@");
        let names: Vec<_> = guy.capability(CapabilityKind::Moving).names().collect();
        assert_eq!(names, ["up", "right", "down", "left"]);
        assert!(guy.is_player());
        assert!(guy.is_character());
    }

    #[test]
    fn test_unplaced_piece_has_no_position() {
        let marker = Piece::new_marker();
        assert!(marker.is_walkable());
        assert_eq!(marker.position(), Err(PieceStateError::NotOnATile));
        assert_eq!(marker.home_tile(), None);
    }

    #[test]
    fn test_closed_door_glyph() {
        let door = Piece::new_door("Door1");
        assert_eq!(door.glyph(), "D*");
        assert_eq!(door.name(), Some("Door1"));
    }

    #[test]
    fn test_custom_actions_replace_defaults() {
        let piece = Piece::new_crate().with_actions(
            CapabilityKind::Moving,
            vec![NamedAction::toward(crate::game::Direction::Up)],
        );
        assert_eq!(piece.capability(CapabilityKind::Moving).actions().len(), 1);
    }
}
