//! Levels played one after another.

use tracing::info;

use crate::game::{BoardConfig, Status};
use crate::level::{BUILTIN_LEVELS, Level, LevelError, builtin};

/// How a campaign ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CampaignOutcome {
    /// Levels won before the campaign stopped.
    pub cleared: usize,
    /// Levels in the campaign.
    pub total: usize,
    /// Status of the last level played. `Won` for an empty campaign.
    pub last: Status,
}

impl CampaignOutcome {
    /// Whether every level was won.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.cleared == self.total
    }
}

/// An ordered run of levels. The campaign stops at the first level that is
/// not won.
#[derive(Debug, Default)]
pub struct Campaign {
    levels: Vec<Level>,
}

impl Campaign {
    /// A campaign over `levels`, played in iteration order.
    pub fn new(levels: impl IntoIterator<Item = Level>) -> Self {
        Self {
            levels: levels.into_iter().collect(),
        }
    }

    /// Every built-in level, in [`BUILTIN_LEVELS`] order, on boards built
    /// from `config`.
    ///
    /// # Errors
    ///
    /// Any [`LevelError`] from building a level.
    pub fn builtin(config: &BoardConfig) -> Result<Self, LevelError> {
        let levels = BUILTIN_LEVELS
            .iter()
            .map(|name| builtin(name, config.clone()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { levels })
    }

    /// Append a level.
    pub fn push(&mut self, level: Level) {
        self.levels.push(level);
    }

    /// The levels, in playing order.
    #[must_use]
    pub fn levels(&self) -> &[Level] {
        &self.levels
    }

    /// Number of levels.
    #[must_use]
    pub fn len(&self) -> usize {
        self.levels.len()
    }

    /// Whether there are no levels.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Hand each level to `play` in turn and stop at the first one it does
    /// not win. Later levels are left untouched.
    ///
    /// # Errors
    ///
    /// The first error returned by `play`.
    pub fn play_all<E>(
        &mut self,
        mut play: impl FnMut(&mut Level) -> Result<Status, E>,
    ) -> Result<CampaignOutcome, E> {
        let total = self.levels.len();
        let mut cleared = 0;
        let mut last = Status::Won;
        for level in &mut self.levels {
            last = play(level)?;
            if last != Status::Won {
                info!(level = level.board.name(), status = ?last, "campaign stopped");
                break;
            }
            cleared += 1;
        }
        info!(cleared, total, "campaign over");
        Ok(CampaignOutcome {
            cleared,
            total,
            last,
        })
    }
}
