//! The standard legend and the built-in levels.

use crate::error::BlueprintError;
use crate::game::{BoardConfig, Piece};
use crate::level::{Legend, Level, LevelError};

/// Blueprint symbol of the player.
pub const PLAYER_SYMBOL: char = '@';

/// Names accepted by [`builtin`].
pub const BUILTIN_LEVELS: [&str; 2] = ["sokoban", "dungeon"];

/// Four crates to push onto four markers.
const SOKOBAN: &str = "
    - - # # # - - -
    - - # - # - - -
    - - # . # # # #
    # # # $ - $ . #
    # . - $ @ # # #
    # # # # $ # - -
    - - - # . # - -
    - - - # # # - -
";

/// Fetch the key and open the door while two brutes roam around.
const DUNGEON: &str = "
    - K - - D
    - - - - -
    - - - - E
    - - - - -
    - - - - -
    - E - - -
    @ - - - -
";

/// The legend understood by level files:
///
/// | symbol | piece |
/// |--------|-------|
/// | `#` | wall |
/// | `@` | the player (one only) |
/// | `$` | crate |
/// | `.` | marker |
/// | `D` | closed door |
/// | `K` | key that opens any door next to its holder |
/// | `E` | aggressive enemy |
///
/// Any other symbol leaves its tile empty; `-` is the customary choice.
#[must_use]
pub fn standard_legend() -> Legend {
    let mut doors = 0_u32;
    let mut enemies = 0_u32;
    Legend::new()
        .with_factory('#', Piece::new_wall)
        .with_single(PLAYER_SYMBOL, Piece::new_player("Bruma", "\u{03A8}"))
        .with_factory('$', Piece::new_crate)
        .with_factory('.', Piece::new_marker)
        .with_factory('D', move || {
            doors += 1;
            Piece::new_door(format!("Door{doors}"))
        })
        .with_factory('K', || Piece::new_key("Key", None))
        .with_factory('E', move || {
            enemies += 1;
            Piece::new_enemy(format!("Enemy{enemies}"), "E")
        })
}

fn named(config: BoardConfig, name: &str) -> BoardConfig {
    if config.name == BoardConfig::default().name {
        BoardConfig {
            name: name.to_string(),
            ..config
        }
    } else {
        config
    }
}

/// The sokoban level: won once every crate rests on a marker.
///
/// # Errors
///
/// Never fails for the built-in layout; the error is kept for symmetry with
/// [`Level::from_blueprint`].
pub fn sokoban(config: BoardConfig) -> Result<Level, BlueprintError> {
    Level::from_blueprint(SOKOBAN, named(config, "sokoban"))
}

/// The dungeon level: won once the door is open, lost if the player dies.
///
/// # Errors
///
/// As for [`sokoban`].
pub fn dungeon(config: BoardConfig) -> Result<Level, BlueprintError> {
    Level::from_blueprint(DUNGEON, named(config, "dungeon"))
}

/// A built-in level by name.
///
/// # Errors
///
/// [`LevelError::Unknown`] for a name not in [`BUILTIN_LEVELS`].
pub fn builtin(name: &str, config: BoardConfig) -> Result<Level, LevelError> {
    match name {
        "sokoban" => Ok(sokoban(config)?),
        "dungeon" => Ok(dungeon(config)?),
        other => Err(LevelError::Unknown(other.to_string())),
    }
}
