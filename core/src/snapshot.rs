use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Read-only copy of everything a UI may display after a command.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoardView {
    pub size: Coord2,
    pub state: SessionState,
    pub total_mines: CellCount,
    pub flags_placed: CellCount,
    pub mines_remaining: isize,
    pub triggered_mine: Option<Coord2>,
    pub cells: Array2<EngineCell>,
}

impl BoardView {
    pub fn from_session<G>(session: &GameSession<G>) -> Self {
        Self {
            size: session.size(),
            state: session.state(),
            total_mines: session.total_mines(),
            flags_placed: session.flags_placed(),
            mines_remaining: session.mines_remaining(),
            triggered_mine: session.triggered_mine(),
            cells: session.cells().to_owned(),
        }
    }

    pub fn terminal(&self) -> Terminal {
        self.state.terminal()
    }

    pub fn cell_at(&self, coords: Coord2) -> Option<EngineCell> {
        self.cells.get(coords.to_nd_index()).copied()
    }

    pub fn revealed_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_revealed()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_maps_revealed_and_flagged_cells() {
        let layout = MineLayout::from_mine_coords((2, 2), &[(0, 0)]).unwrap();
        let mut session = GameSession::with_layout(layout);

        session.open((1, 1)).unwrap();
        session.toggle_flag((0, 0)).unwrap();

        let view = session.snapshot();

        assert_eq!(view.state, SessionState::InProgress);
        assert_eq!(view.cell_at((1, 1)), Some(EngineCell::Revealed(1)));
        assert_eq!(view.cell_at((0, 0)), Some(EngineCell::Flagged));
        assert_eq!(view.cell_at((2, 0)), None);
        assert_eq!(view.mines_remaining, 0);
        assert_eq!(view.revealed_count(), 1);
    }

    #[test]
    fn snapshot_is_detached_from_session() {
        let layout = MineLayout::from_mine_coords((3, 1), &[(0, 0)]).unwrap();
        let mut session = GameSession::with_layout(layout);
        let before = session.snapshot();

        session.open((2, 0)).unwrap();

        assert_eq!(before.state, SessionState::Fresh);
        assert_eq!(before.cell_at((2, 0)), Some(EngineCell::Hidden));
        assert_eq!(session.snapshot().terminal(), Terminal::Won);
    }

    #[test]
    fn snapshot_serializes_to_json() {
        let layout = MineLayout::from_mine_coords((2, 1), &[(0, 0)]).unwrap();
        let mut session = GameSession::with_layout(layout);
        session.open((1, 0)).unwrap();

        let json = serde_json::to_value(session.snapshot()).unwrap();

        assert_eq!(json["state"], "Won");
        assert_eq!(json["mines_remaining"], 1);
        assert_eq!(json["triggered_mine"], serde_json::Value::Null);
    }
}
