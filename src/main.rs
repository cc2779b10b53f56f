//! Ludema CLI - Command-line interface for playing and viewing Ludema levels.

// Allow print in the CLI binary
#![allow(clippy::print_stdout, clippy::print_stderr)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

mod cli;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Ludema - A turn-based tile-grid game engine
#[derive(Parser, Debug)]
#[command(name = "ludema")]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Play a level, reading one command per line from stdin
    Play {
        #[command(flatten)]
        level: cli::LevelArgs,
    },

    /// Print a level's starting board
    Show {
        #[command(flatten)]
        level: cli::LevelArgs,

        /// Output format: text or json
        #[arg(long, default_value = "text")]
        format: cli::ShowFormat,
    },

    /// Play several levels in a row, stopping at the first one not won
    Campaign {
        /// Blueprint files to play, in order; the built-in levels if none
        files: Vec<PathBuf>,

        #[command(flatten)]
        board: cli::BoardArgs,
    },

    /// List the built-in levels
    Levels,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let result = match args.command {
        Commands::Play { level } => cli::play::execute(&level),
        Commands::Show { level, format } => cli::show::execute(&level, format),
        Commands::Campaign { files, board } => cli::campaign::execute(&files, &board),
        Commands::Levels => {
            cli::show::list();
            Ok(())
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
