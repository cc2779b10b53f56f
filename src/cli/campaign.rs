//! Campaign command implementation: several levels played in a row.

use super::play;
use super::{BoardArgs, CliError};
use ludema::level::{Campaign, CampaignOutcome, Level};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

/// Execute the campaign command on stdin and stdout.
///
/// With no files, the built-in levels are played in order.
///
/// # Errors
///
/// Returns an error if a level cannot be loaded or the terminal fails.
pub(crate) fn execute(files: &[PathBuf], board: &BoardArgs) -> Result<(), CliError> {
    let config = board.config()?;
    let mut campaign = if files.is_empty() {
        Campaign::builtin(&config)?
    } else {
        let levels = files
            .iter()
            .map(|path| Level::load(path, config.clone()))
            .collect::<Result<Vec<_>, _>>()?;
        Campaign::new(levels)
    };
    let stdin = io::stdin();
    let stdout = io::stdout();
    run(&mut campaign, stdin.lock(), stdout.lock())?;
    Ok(())
}

/// Play every level of `campaign` from the same input until one is not won.
///
/// # Errors
///
/// Returns an error if reading or writing fails.
pub(crate) fn run(
    campaign: &mut Campaign,
    mut input: impl BufRead,
    mut output: impl Write,
) -> Result<CampaignOutcome, CliError> {
    let total = campaign.len();
    let mut number = 0;
    let outcome = campaign.play_all(|level| {
        number += 1;
        writeln!(output, "Level {number} of {total}: {}", level.board.name())?;
        play::run(level, &mut input, &mut output)
    })?;
    if outcome.is_complete() {
        writeln!(output, "Campaign complete.")?;
    } else {
        writeln!(
            output,
            "Campaign over after {} of {} level(s).",
            outcome.cleared, outcome.total
        )?;
    }
    Ok(outcome)
}
