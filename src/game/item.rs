//! Items: pieces a character can pick up and use.

use tracing::debug;

use crate::game::{Board, PieceId, PieceKind, TileHandle};

/// What happens when an item is used.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemEffect {
    /// Open a door next to the holder. With `door` set only that door opens.
    OpenDoor {
        /// The only door this item opens, if it is picky.
        door: Option<PieceId>,
    },
    /// Restore health to the holder.
    Heal {
        /// Health points restored.
        amount: u32,
    },
    /// Run a hook registered on the board, on behalf of the holder.
    Hook(String),
}

/// Item state: its effect and who carries it.
#[derive(Debug, Clone)]
pub struct Item {
    effect: ItemEffect,
    owner: Option<PieceId>,
}

impl Item {
    /// A new item nobody owns yet.
    #[must_use]
    pub const fn new(effect: ItemEffect) -> Self {
        Self {
            effect,
            owner: None,
        }
    }

    /// What the item does.
    #[must_use]
    pub const fn effect(&self) -> &ItemEffect {
        &self.effect
    }

    /// The character carrying the item.
    #[must_use]
    pub const fn owner(&self) -> Option<PieceId> {
        self.owner
    }

    pub(super) fn set_owner(&mut self, owner: Option<PieceId>) {
        self.owner = owner;
    }
}

impl Board {
    /// Tiles a short-range item reaches: around its owner when carried,
    /// around itself when lying on the board.
    #[must_use]
    pub fn item_range(&self, item: &crate::game::Piece) -> Vec<TileHandle> {
        let centre = match item.item().and_then(Item::owner) {
            Some(owner) => self.position_of(owner).ok(),
            None => item.position().ok(),
        };
        centre
            .map(|position| self.adjacent_to_position(position).tiles().collect())
            .unwrap_or_default()
    }

    /// Apply `effect` on behalf of `holder`, whose range is `range`.
    pub(super) fn apply_item_effect(
        &mut self,
        effect: &ItemEffect,
        holder: PieceId,
        range: &[TileHandle],
    ) -> bool {
        match effect {
            ItemEffect::OpenDoor { door } => {
                let target = range.iter().filter_map(|&tile| self.top_piece(tile)).find(|&id| {
                    door.is_none_or(|wanted| wanted == id)
                        && matches!(
                            self.piece(id).map(crate::game::Piece::kind),
                            Some(PieceKind::Door { open: false })
                        )
                });
                target.is_some_and(|id| self.open_door(id))
            }
            ItemEffect::Heal { amount } => {
                let Some(character) = self.piece_mut(holder).and_then(|p| p.character_mut()) else {
                    return false;
                };
                character.heal(*amount);
                true
            }
            ItemEffect::Hook(hook) => self.call_hook(hook, holder),
        }
    }

    /// Open the door `door`, making it walkable. Returns `false` if `door`
    /// is not a closed door on this board.
    pub fn open_door(&mut self, door: PieceId) -> bool {
        let Some(piece) = self.piece_mut(door) else {
            return false;
        };
        let PieceKind::Door { open } = &mut piece.kind else {
            return false;
        };
        if *open {
            return false;
        }
        *open = true;
        piece.set_walkable(true);
        debug!(?door, "door opened");
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{BoardConfig, Piece, Position};

    #[test]
    fn test_item_on_board_has_range_around_itself() {
        let mut board = Board::new(3, 3, BoardConfig::default());
        let key = board.place(Piece::new_key("Key", None), Position::new(0, 0)).unwrap();
        let range = board.item_range(board.piece(key).unwrap());
        assert_eq!(range.len(), 2);
    }

    #[test]
    fn test_loose_item_has_no_range() {
        let board = Board::new(3, 3, BoardConfig::default());
        assert!(board.item_range(&Piece::new_key("Key", None)).is_empty());
    }

    #[test]
    fn test_open_door_once() {
        let mut board = Board::new(1, 1, BoardConfig::default());
        let door = board.place(Piece::new_door("Door1"), Position::new(0, 0)).unwrap();
        assert!(!board.is_walkable(door));
        assert!(board.open_door(door));
        assert!(board.is_walkable(door));
        assert_eq!(board.piece(door).unwrap().glyph(), "D");
        assert!(!board.open_door(door));
    }

    #[test]
    fn test_open_door_rejects_other_pieces() {
        let mut board = Board::new(1, 1, BoardConfig::default());
        let wall = board.place(Piece::new_wall(), Position::new(0, 0)).unwrap();
        assert!(!board.open_door(wall));
    }
}
