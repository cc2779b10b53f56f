#![no_main]

//! Action sequence fuzzer.
//!
//! Builds a level from an arbitrary blueprint, then plays arbitrary player
//! actions and named actions on it, checking board invariants after each
//! step. Parse failures are fine; panics and inconsistent boards are not.

use arbitrary::Arbitrary;
use ludema::game::{BoardConfig, CapabilityKind, Direction, PlayerAction, check_invariants};
use ludema::level::Level;
use libfuzzer_sys::fuzz_target;

/// A fuzzer-generated player input.
#[derive(Arbitrary, Debug, Clone)]
enum FuzzAction {
    Move(u8),
    Attack(u8),
    Grab,
    Use(u8),
    /// A named action, which may not exist.
    Named { kind: u8, name: String },
    /// Let the NPCs act without the player.
    Wait(u8),
}

#[derive(Arbitrary, Debug)]
struct LevelInput {
    /// Blueprint text, read with the standard legend.
    blueprint: String,
    seed: u64,
    turn_limit: Option<u8>,
    actions: Vec<FuzzAction>,
}

fn direction(n: u8) -> Direction {
    match n % 4 {
        0 => Direction::Up,
        1 => Direction::Right,
        2 => Direction::Down,
        _ => Direction::Left,
    }
}

fn kind(n: u8) -> CapabilityKind {
    match n % 3 {
        0 => CapabilityKind::Moving,
        1 => CapabilityKind::Attacking,
        _ => CapabilityKind::Grabbing,
    }
}

fuzz_target!(|input: LevelInput| {
    // Keep boards small
    if input.blueprint.len() > 512 {
        return;
    }
    let config = BoardConfig {
        seed: input.seed,
        turn_limit: input.turn_limit.map(u32::from),
        ..BoardConfig::default()
    };
    let Ok(mut level) = Level::from_blueprint(&input.blueprint, config) else {
        return;
    };

    let violations = check_invariants(&level.board);
    assert!(violations.is_empty(), "Invariants violated at start: {violations:?}");

    for action in input.actions.iter().take(64) {
        let turn = level.board.turn();
        let result = match action {
            FuzzAction::Move(d) => level.perform(&PlayerAction::Move(direction(*d))),
            FuzzAction::Attack(d) => level.perform(&PlayerAction::Attack(direction(*d))),
            FuzzAction::Grab => level.perform(&PlayerAction::GrabItem),
            FuzzAction::Use(i) => level.perform(&PlayerAction::UseItem(usize::from(*i % 4))),
            FuzzAction::Named { kind: k, name } => level.perform(&PlayerAction::Named {
                kind: kind(*k),
                name: name.clone(),
            }),
            FuzzAction::Wait(n) => {
                let n = u32::from(*n % 8).max(1);
                level.board.advance_turns(n).map(|()| true).map_err(Into::into)
            }
        };

        let violations = check_invariants(&level.board);
        assert!(violations.is_empty(), "Invariants violated after {action:?}: {violations:?}");

        match result {
            Ok(_) => assert!(level.board.turn() >= turn),
            Err(_) => break,
        }
        if level.is_over() {
            break;
        }
    }

    let _ = ludema::render_text(&level.board);
});
