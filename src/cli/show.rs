//! Show command implementation.

use super::{CliError, LevelArgs, ShowFormat};
use ludema::level::BUILTIN_LEVELS;
use ludema::{BoardSnapshot, render_text};

/// Execute the show command.
///
/// # Errors
///
/// Returns an error if the level cannot be loaded or serialized.
pub(crate) fn execute(args: &LevelArgs, format: ShowFormat) -> Result<(), CliError> {
    let level = args.load()?;
    match format {
        ShowFormat::Text => {
            print!("{}", render_text(&level.board));
        }
        ShowFormat::Json => {
            let snapshot = BoardSnapshot::capture(&level.board);
            println!("{}", serde_json::to_string_pretty(&snapshot)?);
        }
    }
    Ok(())
}

/// Execute the levels command.
pub(crate) fn list() {
    for name in BUILTIN_LEVELS {
        println!("{name}");
    }
}
