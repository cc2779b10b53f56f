//! Capabilities: what a piece can do to the tiles around it.
//!
//! Every piece owns three capabilities (moving, attacking, grabbing). Each one
//! holds an ordered list of named actions and the history of the names that
//! were invoked. [`Actions`] binds a capability to a board so the actions can
//! be run, sampled at random or replayed.

use rand::Rng;
use serde::Serialize;
use tracing::debug;

use crate::error::{ActionError, PieceStateError};
use crate::game::{Board, Direction, PieceId, PieceKind, TileHandle};

/// The three kinds of capability a piece has.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum CapabilityKind {
    /// Move onto a tile.
    Moving,
    /// Damage the character on a tile.
    Attacking,
    /// Pick up the item on a tile.
    Grabbing,
}

/// What a named action does when invoked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionTarget {
    /// Act on the neighbouring tile in this direction.
    Toward(Direction),
    /// Run a hook registered on the board under this name.
    Hook(String),
}

/// An action in a capability's list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedAction {
    name: String,
    target: ActionTarget,
}

impl NamedAction {
    /// The default action for a direction, named after it.
    #[must_use]
    pub fn toward(direction: Direction) -> Self {
        Self {
            name: direction.name().to_string(),
            target: ActionTarget::Toward(direction),
        }
    }

    /// An action that runs the board hook `hook`.
    #[must_use]
    pub fn hook(name: impl Into<String>, hook: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            target: ActionTarget::Hook(hook.into()),
        }
    }

    /// Name of the action.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// What the action does.
    #[must_use]
    pub const fn target(&self) -> &ActionTarget {
        &self.target
    }
}

/// A set of named actions of one kind, plus the history of invocations.
#[derive(Debug, Clone)]
pub struct Capability {
    kind: CapabilityKind,
    actions: Vec<NamedAction>,
    history: Vec<String>,
}

impl Capability {
    /// A capability with no actions.
    #[must_use]
    pub const fn none(kind: CapabilityKind) -> Self {
        Self::custom(kind, Vec::new())
    }

    /// A capability with one action per direction: up, right, down, left.
    #[must_use]
    pub fn with_defaults(kind: CapabilityKind) -> Self {
        Self::custom(kind, Direction::ALL.map(NamedAction::toward).to_vec())
    }

    /// A capability with the given actions.
    #[must_use]
    pub const fn custom(kind: CapabilityKind, actions: Vec<NamedAction>) -> Self {
        Self {
            kind,
            actions,
            history: Vec::new(),
        }
    }

    /// Which capability this is.
    #[must_use]
    pub const fn kind(&self) -> CapabilityKind {
        self.kind
    }

    /// The actions, in order.
    #[must_use]
    pub fn actions(&self) -> &[NamedAction] {
        &self.actions
    }

    /// Names of the actions, in order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.actions.iter().map(NamedAction::name)
    }

    /// Whether there is at least one action.
    #[must_use]
    pub fn is_implemented(&self) -> bool {
        !self.actions.is_empty()
    }

    /// Find an action by name.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<&NamedAction> {
        self.actions.iter().find(|a| a.name == name)
    }

    /// Names of every action invoked so far, oldest first.
    #[must_use]
    pub fn history(&self) -> &[String] {
        &self.history
    }

    /// The most recently invoked action name.
    #[must_use]
    pub fn last(&self) -> Option<&str> {
        self.history.last().map(String::as_str)
    }

    fn record(&mut self, name: &str) {
        self.history.push(name.to_string());
    }
}

/// A capability of one piece, bound to the board it stands on.
///
/// Obtained from [`Board::moving`], [`Board::attacking`] and [`Board::grabbing`].
/// Every method here is safe for I/O: failures come back as `false`.
#[derive(Debug)]
pub struct Actions<'a> {
    board: &'a mut Board,
    piece: PieceId,
    kind: CapabilityKind,
}

impl<'a> Actions<'a> {
    pub(super) fn new(board: &'a mut Board, piece: PieceId, kind: CapabilityKind) -> Self {
        Self { board, piece, kind }
    }

    /// Perform the action on `tile`; `None` stands for a tile off the board.
    pub fn act_on(&mut self, tile: Option<TileHandle>) -> bool {
        self.board.act_on(self.piece, self.kind, tile)
    }

    /// Perform the action on `tile`, reporting why it could not be done.
    ///
    /// # Errors
    ///
    /// Returns the first violated precondition, see [`ActionError`].
    pub fn act_on_unchecked(&mut self, tile: TileHandle) -> Result<bool, ActionError> {
        self.board.act_on_unchecked(self.piece, self.kind, tile)
    }

    /// Invoke the action called `name`.
    ///
    /// The name is appended to the history before the action resolves, so
    /// touch hooks fired by it can look up the move being made.
    pub fn invoke(&mut self, name: &str) -> bool {
        let Some(action) = self
            .board
            .piece(self.piece)
            .and_then(|p| p.capability(self.kind).find(name))
            .cloned()
        else {
            debug!(piece = ?self.piece, kind = ?self.kind, name, "no such action");
            return false;
        };
        if let Some(piece) = self.board.piece_mut(self.piece) {
            piece.capability_mut(self.kind).record(name);
        }
        self.board.execute(self.piece, self.kind, action.target())
    }

    /// Invoke the action named after `direction`.
    pub fn toward(&mut self, direction: Direction) -> bool {
        self.invoke(direction.name())
    }

    /// Invoke the `up` action.
    pub fn up(&mut self) -> bool {
        self.toward(Direction::Up)
    }

    /// Invoke the `right` action.
    pub fn right(&mut self) -> bool {
        self.toward(Direction::Right)
    }

    /// Invoke the `down` action.
    pub fn down(&mut self) -> bool {
        self.toward(Direction::Down)
    }

    /// Invoke the `left` action.
    pub fn left(&mut self) -> bool {
        self.toward(Direction::Left)
    }

    fn names(&self) -> Vec<String> {
        self.board
            .piece(self.piece)
            .map(|p| p.capability(self.kind).names().map(str::to_string).collect())
            .unwrap_or_default()
    }

    /// Invoke one action chosen uniformly at random.
    ///
    /// The chosen action may well fail; see [`Actions::random_and_valid`].
    pub fn random(&mut self) -> bool {
        let names = self.names();
        if names.is_empty() {
            return false;
        }
        let choice = self.board.rng.random_range(0..names.len());
        self.invoke(&names[choice])
    }

    /// Sample random actions until one succeeds.
    ///
    /// Gives up after as many attempts as there are actions. Samples are drawn
    /// with replacement, so an action that would succeed may never be tried.
    pub fn random_and_valid(&mut self) -> bool {
        let attempts = self
            .board
            .piece(self.piece)
            .map_or(0, |p| p.capability(self.kind).actions().len());
        (0..attempts).any(|_| self.random())
    }

    /// Invoke every action once, in order, returning each outcome.
    pub fn all(&mut self) -> Vec<(String, bool)> {
        self.names()
            .into_iter()
            .map(|name| {
                let done = self.invoke(&name);
                (name, done)
            })
            .collect()
    }

    /// Invoke actions in order until one succeeds.
    pub fn until_success(&mut self) -> bool {
        self.names().iter().any(|name| self.invoke(name))
    }
}

impl Board {
    /// Run `target` for `piece` with the given capability.
    pub(super) fn execute(
        &mut self,
        piece: PieceId,
        kind: CapabilityKind,
        target: &ActionTarget,
    ) -> bool {
        match target {
            ActionTarget::Toward(direction) => {
                let tile = self
                    .adjacent_to_piece(piece)
                    .ok()
                    .and_then(|adjacent| adjacent[*direction]);
                self.act_on(piece, kind, tile)
            }
            ActionTarget::Hook(hook) => self.call_hook(hook, piece),
        }
    }

    /// Safe entry point behind [`Actions::act_on`].
    pub(super) fn act_on(
        &mut self,
        piece: PieceId,
        kind: CapabilityKind,
        tile: Option<TileHandle>,
    ) -> bool {
        let Some(tile) = tile else {
            return false;
        };
        match self.act_on_unchecked(piece, kind, tile) {
            Ok(done) => done,
            Err(e) => {
                debug!(?piece, ?kind, position = %tile.position(), error = %e, "action refused");
                false
            }
        }
    }

    pub(super) fn act_on_unchecked(
        &mut self,
        piece: PieceId,
        kind: CapabilityKind,
        tile: TileHandle,
    ) -> Result<bool, ActionError> {
        match kind {
            CapabilityKind::Moving => self.move_unchecked(piece, tile),
            CapabilityKind::Attacking => self.attack_unchecked(piece, tile),
            CapabilityKind::Grabbing => self.grab_unchecked(piece, tile),
        }
    }

    /// The home tile of `piece`, checked to be on the same board as `tile`.
    fn acting_home(&self, piece: PieceId, tile: TileHandle) -> Result<TileHandle, PieceStateError> {
        let home = self
            .piece(piece)
            .and_then(|p| p.home_tile())
            .ok_or(PieceStateError::NotOnATile)?;
        if home.board() != tile.board() || tile.board() != self.id() {
            return Err(PieceStateError::NotOnThisBoard);
        }
        Ok(home)
    }

    /// Move `piece` onto `tile`.
    ///
    /// If the tile is occupied, its occupant is touched first; the move then
    /// goes ahead only if the tile is free or its top piece is walkable.
    ///
    /// # Errors
    ///
    /// Fails if the piece is not placed or `tile` is on another board.
    pub fn move_unchecked(
        &mut self,
        piece: PieceId,
        tile: TileHandle,
    ) -> Result<bool, ActionError> {
        let home = self.acting_home(piece, tile)?;
        if home == tile {
            return Ok(false);
        }

        if let Some(occupant) = self.top_piece(tile) {
            self.touch(occupant, piece);
            if self.top_piece(tile).is_some_and(|top| !self.is_walkable(top)) {
                return Ok(false);
            }
        }

        // The touch hook may have moved or removed the mover.
        let Some(current) = self.piece(piece).and_then(|p| p.home_tile()) else {
            return Ok(false);
        };
        self.unlink(current.position(), piece);
        if self.link(tile.position(), piece) {
            Ok(true)
        } else {
            self.link(current.position(), piece);
            Ok(false)
        }
    }

    /// Fire the touch reaction of `touched` after `toucher` moved into it.
    fn touch(&mut self, touched: PieceId, toucher: PieceId) {
        let Some(piece) = self.piece(touched) else {
            return;
        };
        if let Some(hook) = piece.touch_hook().map(str::to_string) {
            self.call_hook(&hook, touched);
            return;
        }
        if !matches!(piece.kind(), PieceKind::Crate) {
            return;
        }
        // Neighbours push the crate straight on; from further away it repeats
        // the toucher's last move.
        let step = self
            .position_of(toucher)
            .ok()
            .zip(piece.position().ok())
            .and_then(|(from, to)| Direction::between(from, to));
        if let Some(direction) = step {
            self.moving(touched).toward(direction);
            return;
        }
        let last = self
            .piece(toucher)
            .and_then(|p| p.capability(CapabilityKind::Moving).last())
            .map(str::to_string);
        if let Some(name) = last {
            self.moving(touched).invoke(&name);
        }
    }

    /// Subtract the attack damage of `piece` from the character on `tile`.
    ///
    /// # Errors
    ///
    /// Fails if the piece is not placed, has no attack damage, or the tile
    /// holds no character.
    pub fn attack_unchecked(
        &mut self,
        piece: PieceId,
        tile: TileHandle,
    ) -> Result<bool, ActionError> {
        self.acting_home(piece, tile)?;
        let damage = self
            .piece(piece)
            .and_then(|p| p.character())
            .and_then(|c| c.attack_damage())
            .ok_or(ActionError::CannotAttack)?;
        let target = self.top_piece(tile).ok_or(ActionError::TargetEmpty)?;
        let victim = self
            .piece_mut(target)
            .and_then(|p| p.character_mut())
            .ok_or(ActionError::TargetEmpty)?;
        victim.take_damage(damage);
        debug!(attacker = ?piece, ?target, damage, health = ?victim.health(), "attack");
        Ok(true)
    }

    /// Move the item on `tile` into the inventory of `piece`.
    ///
    /// # Errors
    ///
    /// Fails if the piece is not placed or is not a character, the tile is
    /// empty, or its occupant is not an item.
    pub fn grab_unchecked(
        &mut self,
        piece: PieceId,
        tile: TileHandle,
    ) -> Result<bool, ActionError> {
        self.acting_home(piece, tile)?;
        if !self.piece(piece).is_some_and(|p| p.is_character()) {
            return Err(ActionError::NoInventory);
        }
        let target = self.top_piece(tile).ok_or(ActionError::TargetEmpty)?;
        if !self.piece(target).is_some_and(|p| p.is_item()) {
            return Err(ActionError::NotGrabbable);
        }
        let mut item = self.detach(target)?;
        if let Some(data) = item.item_mut() {
            data.set_owner(Some(piece));
        }
        if let Some(character) = self.piece_mut(piece).and_then(|p| p.character_mut()) {
            character.inventory.push(item);
        }
        Ok(true)
    }

    /// The moving capability of `piece`.
    pub fn moving(&mut self, piece: PieceId) -> Actions<'_> {
        Actions::new(self, piece, CapabilityKind::Moving)
    }

    /// The attacking capability of `piece`.
    pub fn attacking(&mut self, piece: PieceId) -> Actions<'_> {
        Actions::new(self, piece, CapabilityKind::Attacking)
    }

    /// The grabbing capability of `piece`.
    pub fn grabbing(&mut self, piece: PieceId) -> Actions<'_> {
        Actions::new(self, piece, CapabilityKind::Grabbing)
    }

    /// Any capability of `piece`.
    pub fn capability(&mut self, piece: PieceId, kind: CapabilityKind) -> Actions<'_> {
        Actions::new(self, piece, kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{BoardConfig, Character, Piece, Position, Role};

    fn board(x: u16, y: u16) -> Board {
        Board::new(x, y, BoardConfig::default())
    }

    #[test]
    fn test_move_into_free_tile() {
        let mut board = board(3, 3);
        let guy = board.place(Piece::new_player("Bruma", "@"), Position::new(1, 1)).unwrap();
        assert!(board.moving(guy).up());
        assert_eq!(board.position_of(guy), Ok(Position::new(1, 2)));
        assert!(board.tile(Position::new(1, 1)).unwrap().is_empty());
        assert_eq!(board.piece(guy).unwrap().capability(CapabilityKind::Moving).history(), ["up"]);
    }

    #[test]
    fn test_move_off_the_board_fails() {
        let mut board = board(2, 2);
        let guy = board.place(Piece::new_player("Bruma", "@"), Position::new(0, 0)).unwrap();
        assert!(!board.moving(guy).left());
        assert!(!board.moving(guy).down());
        assert_eq!(board.position_of(guy), Ok(Position::new(0, 0)));
    }

    #[test]
    fn test_act_on_none_is_false() {
        let mut board = board(2, 2);
        let guy = board.place(Piece::new_player("Bruma", "@"), Position::new(0, 0)).unwrap();
        assert!(!board.moving(guy).act_on(None));
    }

    #[test]
    fn test_move_onto_wall_fails_without_mutation() {
        let mut board = board(2, 1);
        let guy = board.place(Piece::new_player("Bruma", "@"), Position::new(0, 0)).unwrap();
        let wall = board.place(Piece::new_wall(), Position::new(1, 0)).unwrap();
        assert!(!board.moving(guy).right());
        assert_eq!(board.position_of(guy), Ok(Position::new(0, 0)));
        assert_eq!(board.tile(Position::new(1, 0)).unwrap().piece(), Some(wall));
    }

    #[test]
    fn test_move_to_another_board_is_refused() {
        let mut a = board(2, 2);
        let b = board(2, 2);
        let guy = a.place(Piece::new_player("Bruma", "@"), Position::new(0, 0)).unwrap();
        let foreign = b.tile_handle(Position::new(1, 1)).unwrap();
        assert_eq!(
            a.move_unchecked(guy, foreign),
            Err(ActionError::Piece(PieceStateError::NotOnThisBoard))
        );
        assert!(!a.moving(guy).act_on(Some(foreign)));
    }

    #[test]
    fn test_removed_piece_cannot_move() {
        let mut board = board(2, 2);
        let guy = board.place(Piece::new_player("Bruma", "@"), Position::new(0, 0)).unwrap();
        let target = board.tile_handle(Position::new(1, 0)).unwrap();
        board.remove(guy).unwrap();
        assert_eq!(
            board.move_unchecked(guy, target),
            Err(ActionError::Piece(PieceStateError::NotOnATile))
        );
    }

    #[test]
    fn test_push_crate_into_free_tile() {
        let mut board = board(3, 1);
        let guy = board.place(Piece::new_player("Bruma", "@"), Position::new(0, 0)).unwrap();
        let crate_ = board.place(Piece::new_crate(), Position::new(1, 0)).unwrap();
        assert!(board.moving(guy).right());
        assert_eq!(board.position_of(crate_), Ok(Position::new(2, 0)));
        assert_eq!(board.position_of(guy), Ok(Position::new(1, 0)));
    }

    #[test]
    fn test_act_on_pushes_crate_away_from_mover() {
        let mut board = board(3, 3);
        let guy = board.place(Piece::new_player("Bruma", "@"), Position::new(0, 0)).unwrap();
        assert!(board.moving(guy).up());
        let crate_ = board.place(Piece::new_crate(), Position::new(1, 1)).unwrap();

        // The last recorded move was "up", but the crate sits to the right.
        let target = board.tile_handle(Position::new(1, 1));
        assert!(board.moving(guy).act_on(target));
        assert_eq!(board.position_of(crate_), Ok(Position::new(2, 1)));
        assert_eq!(board.position_of(guy), Ok(Position::new(1, 1)));
    }

    #[test]
    fn test_act_on_without_history_pushes_crate() {
        let mut board = board(3, 1);
        let guy = board.place(Piece::new_player("Bruma", "@"), Position::new(0, 0)).unwrap();
        let crate_ = board.place(Piece::new_crate(), Position::new(1, 0)).unwrap();
        let target = board.tile_handle(Position::new(1, 0));
        assert!(board.moving(guy).act_on(target));
        assert_eq!(board.position_of(crate_), Ok(Position::new(2, 0)));
    }

    #[test]
    fn test_push_crate_against_wall_fails() {
        let mut board = board(3, 1);
        let guy = board.place(Piece::new_player("Bruma", "@"), Position::new(0, 0)).unwrap();
        let crate_ = board.place(Piece::new_crate(), Position::new(1, 0)).unwrap();
        board.place(Piece::new_wall(), Position::new(2, 0)).unwrap();
        assert!(!board.moving(guy).right());
        assert_eq!(board.position_of(crate_), Ok(Position::new(1, 0)));
        assert_eq!(board.position_of(guy), Ok(Position::new(0, 0)));
    }

    #[test]
    fn test_push_crate_off_the_board_fails() {
        let mut board = board(2, 1);
        let guy = board.place(Piece::new_player("Bruma", "@"), Position::new(0, 0)).unwrap();
        board.place(Piece::new_crate(), Position::new(1, 0)).unwrap();
        assert!(!board.moving(guy).right());
        assert_eq!(board.position_of(guy), Ok(Position::new(0, 0)));
    }

    #[test]
    fn test_attack_reduces_health() {
        let mut board = board(2, 1);
        let guy = board.place(Piece::new_player("Bruma", "@"), Position::new(0, 0)).unwrap();
        let enemy = board.place(Piece::new_enemy("E", "E"), Position::new(1, 0)).unwrap();
        let before = board.piece(enemy).unwrap().character().unwrap().health();
        assert!(board.attacking(guy).right());
        let after = board.piece(enemy).unwrap().character().unwrap().health();
        assert_eq!(after, before.map(|h| h - 1));
    }

    #[test]
    fn test_invulnerable_character_takes_no_damage() {
        let mut board = board(2, 1);
        let guy = board.place(Piece::new_player("Bruma", "@"), Position::new(0, 0)).unwrap();
        let spirit = Character::new(Role::Npc).invulnerable();
        let ghost = Piece::new("G", PieceKind::Character(spirit));
        let ghost = board.place(ghost, Position::new(1, 0)).unwrap();
        for _ in 0..20 {
            assert!(board.attacking(guy).right());
        }
        let character = board.piece(ghost).unwrap().character().unwrap();
        assert_eq!(character.health(), None);
        assert!(!character.is_dead());
    }

    #[test]
    fn test_attack_on_empty_or_wall_fails() {
        let mut board = board(3, 1);
        let guy = board.place(Piece::new_player("Bruma", "@"), Position::new(1, 0)).unwrap();
        board.place(Piece::new_wall(), Position::new(2, 0)).unwrap();
        let left = board.tile_handle(Position::new(0, 0)).unwrap();
        let right = board.tile_handle(Position::new(2, 0)).unwrap();
        assert_eq!(board.attack_unchecked(guy, left), Err(ActionError::TargetEmpty));
        assert_eq!(board.attack_unchecked(guy, right), Err(ActionError::TargetEmpty));
    }

    #[test]
    fn test_crate_cannot_attack() {
        let mut board = board(2, 1);
        let crate_ = board.place(Piece::new_crate(), Position::new(0, 0)).unwrap();
        board.place(Piece::new_enemy("E", "E"), Position::new(1, 0)).unwrap();
        let right = board.tile_handle(Position::new(1, 0)).unwrap();
        assert_eq!(board.attack_unchecked(crate_, right), Err(ActionError::CannotAttack));
    }

    #[test]
    fn test_grab_item_clears_tile() {
        let mut board = board(2, 1);
        let guy = board.place(Piece::new_player("Bruma", "@"), Position::new(0, 0)).unwrap();
        board.place(Piece::new_key("Key", None), Position::new(1, 0)).unwrap();
        assert!(board.grabbing(guy).right());
        assert!(board.tile(Position::new(1, 0)).unwrap().is_empty());
        let inventory = board.piece(guy).unwrap().character().unwrap().inventory();
        assert_eq!(inventory.len(), 1);
        assert_eq!(inventory[0].item().unwrap().owner(), Some(guy));
        assert_eq!(inventory[0].home_tile(), None);
    }

    #[test]
    fn test_grab_non_item_fails() {
        let mut board = board(2, 1);
        let guy = board.place(Piece::new_player("Bruma", "@"), Position::new(0, 0)).unwrap();
        board.place(Piece::new_wall(), Position::new(1, 0)).unwrap();
        let right = board.tile_handle(Position::new(1, 0)).unwrap();
        assert_eq!(board.grab_unchecked(guy, right), Err(ActionError::NotGrabbable));
        assert!(!board.grabbing(guy).right());
    }

    #[test]
    fn test_random_and_valid_without_actions() {
        let mut board = board(2, 2);
        let wall = board.place(Piece::new_wall(), Position::new(0, 0)).unwrap();
        assert!(!board.moving(wall).random_and_valid());
        assert!(!board.moving(wall).random());
        assert!(board.piece(wall).unwrap().capability(CapabilityKind::Moving).history().is_empty());
    }

    #[test]
    fn test_random_and_valid_finds_a_move_when_boxed_in_on_three_sides() {
        let mut board = board(3, 3);
        let guy = board.place(Piece::new_player("Bruma", "@"), Position::new(1, 1)).unwrap();
        board.place(Piece::new_wall(), Position::new(1, 2)).unwrap();
        board.place(Piece::new_wall(), Position::new(2, 1)).unwrap();
        board.place(Piece::new_wall(), Position::new(0, 1)).unwrap();
        // Only "down" works; with four samples it may still be missed.
        let moved = board.moving(guy).random_and_valid();
        let position = board.position_of(guy).unwrap();
        if moved {
            assert_eq!(position, Position::new(1, 0));
        } else {
            assert_eq!(position, Position::new(1, 1));
        }
    }

    #[test]
    fn test_all_reports_every_outcome() {
        let mut board = board(1, 1);
        let guy = board.place(Piece::new_player("Bruma", "@"), Position::new(0, 0)).unwrap();
        let outcomes = board.moving(guy).all();
        let names: Vec<_> = outcomes.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, ["up", "right", "down", "left"]);
        assert!(outcomes.iter().all(|(_, done)| !done));
    }

    #[test]
    fn test_until_success_stops_at_first() {
        let mut board = board(2, 2);
        let guy = board.place(Piece::new_player("Bruma", "@"), Position::new(0, 0)).unwrap();
        // "up" is the first action and succeeds.
        assert!(board.moving(guy).until_success());
        assert_eq!(board.position_of(guy), Ok(Position::new(0, 1)));
        assert_eq!(board.piece(guy).unwrap().capability(CapabilityKind::Moving).history(), ["up"]);
    }

    #[test]
    fn test_hook_action() {
        let mut board = board(2, 2);
        board.register_hook("teleport", |board, piece| {
            let target = board.tile_handle(Position::new(1, 1));
            board.moving(piece).act_on(target)
        });
        let guy = board
            .place(
                Piece::new_player("Bruma", "@").with_actions(
                    CapabilityKind::Moving,
                    vec![NamedAction::hook("blink", "teleport")],
                ),
                Position::new(0, 0),
            )
            .unwrap();
        assert!(board.moving(guy).invoke("blink"));
        assert_eq!(board.position_of(guy), Ok(Position::new(1, 1)));
        assert!(!board.moving(guy).up());
    }
}
