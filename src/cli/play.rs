//! Play command implementation: a line-based game loop.

use super::output::{HELP, format_frame, format_outcome};
use super::{CliError, LevelArgs};
use ludema::game::{Direction, PlayerAction, Status};
use ludema::level::Level;
use std::io::{self, BufRead, Write};
use tracing::{debug, info};

/// One line of user input.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Act(PlayerAction),
    Quit,
}

/// Map an input token onto a command.
fn parse_command(token: &str) -> Option<Command> {
    let action = match token {
        "w" => PlayerAction::Move(Direction::Up),
        "a" => PlayerAction::Move(Direction::Left),
        "s" => PlayerAction::Move(Direction::Down),
        "d" => PlayerAction::Move(Direction::Right),
        "i" => PlayerAction::Attack(Direction::Up),
        "j" => PlayerAction::Attack(Direction::Left),
        "k" => PlayerAction::Attack(Direction::Down),
        "l" => PlayerAction::Attack(Direction::Right),
        "g" => PlayerAction::GrabItem,
        "u" => PlayerAction::UseItem(0),
        "q" => return Some(Command::Quit),
        _ => return None,
    };
    Some(Command::Act(action))
}

/// Execute the play command on stdin and stdout.
///
/// # Errors
///
/// Returns an error if the level cannot be loaded or the terminal fails.
pub(crate) fn execute(args: &LevelArgs) -> Result<(), CliError> {
    let mut level = args.load()?;
    let stdin = io::stdin();
    let stdout = io::stdout();
    run(&mut level, stdin.lock(), stdout.lock())?;
    Ok(())
}

/// Drive `level` with one command per input line until the game ends, the
/// user quits or the input runs out.
///
/// # Errors
///
/// Returns an error if reading or writing fails, or the player is no longer
/// on the board.
pub(crate) fn run(
    level: &mut Level,
    input: impl BufRead,
    mut output: impl Write,
) -> Result<Status, CliError> {
    info!(level = level.board.name(), "starting game");
    write!(output, "{HELP}")?;
    write!(output, "{}", format_frame(&level.board, level.player))?;

    for line in input.lines() {
        let line = line?;
        let token = line.trim();
        if token.is_empty() {
            continue;
        }
        match parse_command(token) {
            Some(Command::Quit) => break,
            Some(Command::Act(action)) => {
                let done = level.perform(&action)?;
                debug!(?action, done, turn = level.board.turn(), "player action");
                if !done {
                    writeln!(output, "Nothing happens.")?;
                }
            }
            None => {
                writeln!(output, "That's not an action. Try again")?;
                continue;
            }
        }
        write!(output, "{}", format_frame(&level.board, level.player))?;
        if level.is_over() {
            break;
        }
    }

    let status = level.status();
    writeln!(output, "{}", format_outcome(status))?;
    Ok(status)
}
