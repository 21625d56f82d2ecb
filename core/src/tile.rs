use serde::{Deserialize, Serialize};

/// Canonical player-visible state stored by the gameplay engine.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum EngineCell {
    #[default]
    Hidden,
    Flagged,
    /// Safe cell with its adjacent mine count.
    Revealed(u8),
    /// Mine disclosed after the game was lost.
    Mine,
}

impl EngineCell {
    pub const fn is_unrevealed(self) -> bool {
        matches!(self, Self::Hidden | Self::Flagged)
    }

    pub const fn is_revealed(self) -> bool {
        !self.is_unrevealed()
    }

    pub const fn is_flagged(self) -> bool {
        matches!(self, Self::Flagged)
    }

    /// Only revealed mines are reported, hidden ones stay secret.
    pub const fn is_mine(self) -> bool {
        matches!(self, Self::Mine)
    }

    pub const fn adjacent_mines(self) -> Option<u8> {
        match self {
            Self::Revealed(count) => Some(count),
            _ => None,
        }
    }
}
