//! Turn counter, passive-action dispatch and turn-passing player actions.

use tracing::{debug, trace};

use crate::error::{ActionError, Error, TurnError};
use crate::game::{
    Board, CapabilityKind, Passive, PieceId, PlayerAction, Status, assert_invariants,
};

impl Board {
    /// The current turn. Starts at zero.
    #[must_use]
    pub const fn turn(&self) -> u32 {
        self.turn
    }

    /// The last turn that may be played, if there is one.
    #[must_use]
    pub const fn turn_limit(&self) -> Option<u32> {
        self.turn_limit
    }

    /// Set or clear the turn limit.
    pub fn set_turn_limit(&mut self, limit: Option<u32>) {
        self.turn_limit = limit;
    }

    /// Move the turn counter forward to `turn`.
    ///
    /// One passive-action pass over the roster runs for every elapsed turn,
    /// before the new value is stored. Going past the turn limit is allowed;
    /// [`Board::check_turns`] reports it afterwards.
    ///
    /// # Errors
    ///
    /// [`TurnError::NonIncreasingTurn`] if `turn` is not greater than the
    /// current turn. Nothing runs in that case.
    pub fn set_turn(&mut self, turn: u32) -> Result<(), TurnError> {
        if turn <= self.turn {
            return Err(TurnError::NonIncreasingTurn {
                current: self.turn,
                requested: turn,
            });
        }
        for _ in self.turn..turn {
            self.passive_pass();
        }
        self.turn = turn;
        debug!(turn, "turn advanced");
        Ok(())
    }

    /// Move the turn counter forward by `turns`.
    ///
    /// # Errors
    ///
    /// [`TurnError::NonIncreasingTurn`] if `turns` is zero or the counter
    /// would overflow.
    pub fn advance_turns(&mut self, turns: u32) -> Result<(), TurnError> {
        let requested = self.turn.checked_add(turns).ok_or(TurnError::NonIncreasingTurn {
            current: self.turn,
            requested: u32::MAX,
        })?;
        self.set_turn(requested)
    }

    /// Whether the turn limit has been exceeded.
    ///
    /// # Errors
    ///
    /// [`TurnError::TurnsExhausted`] once the turn is past the limit.
    pub fn check_turns(&self) -> Result<(), TurnError> {
        match self.turn_limit {
            Some(limit) if self.turn > limit => Err(TurnError::TurnsExhausted {
                turn: self.turn,
                limit,
            }),
            _ => Ok(()),
        }
    }

    /// Where the game stands. A win takes precedence over a loss, and both
    /// over running out of turns.
    #[must_use]
    pub fn status(&self) -> Status {
        if self.won() {
            Status::Won
        } else if self.lost() {
            Status::Lost
        } else if self.check_turns().is_err() {
            Status::TurnsExhausted
        } else {
            Status::Playing
        }
    }

    /// Run the passive action of every character on the roster once, in
    /// registration order.
    fn passive_pass(&mut self) {
        // Passive actions may remove characters; iterate over a snapshot.
        let roster = self.roster().to_vec();
        for id in roster {
            self.run_passive(id);
        }
    }

    /// Run the passive action of `id` once. Dead or removed characters do nothing.
    pub fn run_passive(&mut self, id: PieceId) -> bool {
        let Some(character) = self.piece(id).and_then(|p| p.character()) else {
            return false;
        };
        if character.is_dead() {
            return false;
        }
        let passive = character.passive().clone();
        trace!(piece = ?id, ?passive, "passive action");
        match passive {
            Passive::Idle => false,
            Passive::Wander => self.moving(id).random_and_valid(),
            Passive::Aggressive => {
                let attacked = self.attacking(id).random_and_valid();
                let moved = self.moving(id).random_and_valid();
                attacked || moved
            }
            Passive::Hook(hook) => self.call_hook(&hook, id),
        }
    }

    /// Have `player` perform `action`.
    ///
    /// If the action succeeds and its class passes the player's turn, the
    /// turn advances by exactly one, running every passive action. Returns
    /// whether the action succeeded.
    ///
    /// # Errors
    ///
    /// [`PieceStateError::NotOnATile`](crate::error::PieceStateError) or
    /// `NotOnThisBoard` if the player is not placed on this board.
    pub fn perform(&mut self, player: PieceId, action: &PlayerAction) -> Result<bool, Error> {
        self.position_of(player)?;
        let class = action.class();
        let passes = self
            .piece(player)
            .and_then(|p| p.character())
            .is_some_and(|c| c.passes_turn(class));

        let done = match action {
            PlayerAction::Move(direction) => self.moving(player).toward(*direction),
            PlayerAction::Attack(direction) => self.attacking(player).toward(*direction),
            PlayerAction::GrabItem => self.grab_item_from_surroundings(player),
            PlayerAction::UseItem(index) => match self.use_item_unchecked(player, *index) {
                Ok(done) => done,
                Err(ActionError::Piece(e)) => return Err(e.into()),
                Err(e) => {
                    debug!(piece = ?player, error = %e, "item not used");
                    false
                }
            },
            PlayerAction::Named { kind, name } => self.capability(player, *kind).invoke(name),
        };

        if done && passes {
            self.advance_turns(1)?;
        }
        assert_invariants(self);
        Ok(done)
    }

    /// Like [`Board::perform`], for the capability named by `kind`.
    ///
    /// # Errors
    ///
    /// See [`Board::perform`].
    pub fn perform_named(
        &mut self,
        player: PieceId,
        kind: CapabilityKind,
        name: &str,
    ) -> Result<bool, Error> {
        self.perform(
            player,
            &PlayerAction::Named {
                kind,
                name: name.to_string(),
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;
    use crate::error::PieceStateError;
    use crate::game::{BoardConfig, Direction, Piece, Position};

    fn board(x: u16, y: u16) -> Board {
        Board::new(x, y, BoardConfig::default())
    }

    #[test]
    fn test_set_turn_must_increase() {
        let mut board = board(1, 1);
        assert_eq!(
            board.set_turn(0),
            Err(TurnError::NonIncreasingTurn { current: 0, requested: 0 })
        );
        board.set_turn(3).unwrap();
        assert_eq!(board.turn(), 3);
        assert_eq!(
            board.set_turn(2),
            Err(TurnError::NonIncreasingTurn { current: 3, requested: 2 })
        );
        assert!(board.advance_turns(0).is_err());
        assert_eq!(board.turn(), 3);
    }

    #[test]
    fn test_passive_runs_once_per_elapsed_turn() {
        let mut board = board(3, 3);
        let count = Rc::new(Cell::new(0));
        let seen = Rc::clone(&count);
        board.register_hook("count", move |_, _| {
            seen.set(seen.get() + 1);
            true
        });
        board
            .place(
                Piece::new_npc("Counter", "C", Passive::Hook("count".to_string())),
                Position::new(1, 1),
            )
            .unwrap();
        board.advance_turns(4).unwrap();
        assert_eq!(count.get(), 4);
        board.set_turn(5).unwrap();
        assert_eq!(count.get(), 5);
    }

    #[test]
    fn test_passive_runs_in_registration_order() {
        let mut board = board(3, 1);
        let order = Rc::new(std::cell::RefCell::new(Vec::new()));
        let log = Rc::clone(&order);
        board.register_hook("log", move |board, id| {
            let name = board.piece(id).and_then(Piece::name).unwrap_or_default().to_string();
            log.borrow_mut().push(name);
            true
        });
        for (x, name) in [(2, "first"), (0, "second"), (1, "third")] {
            board
                .place(
                    Piece::new_npc(name, "N", Passive::Hook("log".to_string())),
                    Position::new(x, 0),
                )
                .unwrap();
        }
        board.advance_turns(1).unwrap();
        assert_eq!(*order.borrow(), ["first", "second", "third"]);
    }

    #[test]
    fn test_turn_limit_still_applies_increment() {
        let mut board = Board::new(
            1,
            1,
            BoardConfig {
                turn_limit: Some(2),
                ..BoardConfig::default()
            },
        );
        board.advance_turns(2).unwrap();
        assert_eq!(board.check_turns(), Ok(()));
        assert_eq!(board.status(), Status::Playing);
        board.advance_turns(1).unwrap();
        assert_eq!(board.turn(), 3);
        assert_eq!(
            board.check_turns(),
            Err(TurnError::TurnsExhausted { turn: 3, limit: 2 })
        );
        assert_eq!(board.status(), Status::TurnsExhausted);
    }

    #[test]
    fn test_perform_move_passes_turn() {
        let mut board = board(2, 2);
        let guy = board.place(Piece::new_player("Bruma", "@"), Position::new(0, 0)).unwrap();
        assert_eq!(board.perform(guy, &PlayerAction::Move(Direction::Up)), Ok(true));
        assert_eq!(board.turn(), 1);
        assert_eq!(board.perform(guy, &PlayerAction::Move(Direction::Up)), Ok(false));
        assert_eq!(board.turn(), 1);
    }

    #[test]
    fn test_perform_attack_does_not_pass_turn_by_default() {
        let mut board = board(2, 1);
        let guy = board.place(Piece::new_player("Bruma", "@"), Position::new(0, 0)).unwrap();
        board.place(Piece::new_npc("Dummy", "d", Passive::Idle), Position::new(1, 0)).unwrap();
        assert_eq!(board.perform(guy, &PlayerAction::Attack(Direction::Right)), Ok(true));
        assert_eq!(board.turn(), 0);
    }

    #[test]
    fn test_perform_named_action() {
        let mut board = board(2, 2);
        let guy = board.place(Piece::new_player("Bruma", "@"), Position::new(0, 0)).unwrap();
        assert_eq!(board.perform_named(guy, CapabilityKind::Moving, "right"), Ok(true));
        assert_eq!(board.turn(), 1);
        assert_eq!(board.perform_named(guy, CapabilityKind::Moving, "jump"), Ok(false));
        assert_eq!(board.turn(), 1);
        assert_eq!(board.position_of(guy), Ok(Position::new(1, 0)));
    }

    #[test]
    fn test_perform_on_unplaced_player_fails() {
        let mut board = board(2, 2);
        let guy = board.place(Piece::new_player("Bruma", "@"), Position::new(0, 0)).unwrap();
        board.remove(guy).unwrap();
        assert_eq!(
            board.perform(guy, &PlayerAction::Move(Direction::Up)),
            Err(Error::PieceState(PieceStateError::NotOnATile))
        );
        assert_eq!(board.turn(), 0);
    }

    #[test]
    fn test_dead_characters_skip_passive() {
        let mut board = board(3, 3);
        let npc = board
            .place(Piece::new_npc("Walker", "W", Passive::Wander), Position::new(1, 1))
            .unwrap();
        if let Some(c) = board.piece_mut(npc).and_then(Piece::character_mut) {
            c.take_damage(100);
        }
        board.advance_turns(5).unwrap();
        assert_eq!(board.position_of(npc), Ok(Position::new(1, 1)));
    }

    #[test]
    fn test_wanderer_stays_on_board() {
        let mut board = board(2, 2);
        let npc = board
            .place(Piece::new_npc("Walker", "W", Passive::Wander), Position::new(0, 0))
            .unwrap();
        board.advance_turns(20).unwrap();
        assert!(board.in_bounds(board.position_of(npc).unwrap()));
    }
}
