use core::ops::RangeInclusive;
use serde::{Deserialize, Serialize};

use crate::*;

/// Rows and columns the menus accept for custom boards.
pub const CUSTOM_SIDE_RANGE: RangeInclusive<Coord> = 5..=40;

/// Board presets offered by the game menu.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
    Custom {
        rows: Coord,
        cols: Coord,
        mines: CellCount,
    },
}

impl Difficulty {
    /// Resolves the preset into a board configuration.
    ///
    /// Custom boards are held to the menu limits, which are tighter than what the engine accepts.
    pub fn config(self) -> Result<GameConfig> {
        use Difficulty::*;

        match self {
            Easy => Ok(GameConfig::new_unchecked((9, 9), 10)),
            Medium => Ok(GameConfig::new_unchecked((16, 16), 40)),
            Hard => Ok(GameConfig::new_unchecked((30, 16), 99)),
            Custom { rows, cols, mines } => {
                if !CUSTOM_SIDE_RANGE.contains(&rows) || !CUSTOM_SIDE_RANGE.contains(&cols) {
                    return Err(GameError::InvalidConfiguration);
                }
                GameConfig::new(rows, cols, mines)
            }
        }
    }
}
