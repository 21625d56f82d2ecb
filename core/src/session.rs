use alloc::vec;
use hashbrown::HashSet;
use ndarray::{Array2, ArrayView2};
use serde::{Deserialize, Serialize};

use crate::*;

/// Valid transitions:
/// - Fresh -> InProgress
/// - Fresh -> Won (first open clears the board)
/// - Fresh -> Lost (only with a preset layout mined under the first open)
/// - InProgress -> Won
/// - InProgress -> Lost
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionState {
    /// No cell opened yet, mines are not placed
    #[default]
    Fresh,
    InProgress,
    Lost,
    Won,
}

/// Terminal signal reported to the UI.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Terminal {
    None,
    Lost,
    Won,
}

impl SessionState {
    pub const fn is_fresh(self) -> bool {
        matches!(self, Self::Fresh)
    }

    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }

    /// Whether an external clock should be ticking.
    pub const fn timer_running(self) -> bool {
        matches!(self, Self::InProgress)
    }

    pub const fn terminal(self) -> Terminal {
        match self {
            Self::Fresh | Self::InProgress => Terminal::None,
            Self::Lost => Terminal::Lost,
            Self::Won => Terminal::Won,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
enum Status {
    InProgress,
    Lost { triggered: Coord2 },
    Won,
}

/// Mines only exist once the first cell is opened.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
enum Phase<G> {
    Fresh(G),
    Started { layout: MineLayout, status: Status },
}

/// One game from reset to win or loss.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameSession<G = RandomMinefieldGenerator> {
    config: GameConfig,
    board: Array2<EngineCell>,
    revealed_count: CellCount,
    flagged_count: CellCount,
    phase: Phase<G>,
}

impl GameSession<MineLayout> {
    /// Session that plays out a prepared layout instead of a random one.
    pub fn with_layout(layout: MineLayout) -> Self {
        Self::new(layout.game_config(), layout)
    }
}

impl<G: MinefieldGenerator> GameSession<G> {
    pub fn new(config: GameConfig, generator: G) -> Self {
        Self {
            config,
            board: Array2::default(config.size.to_nd_index()),
            revealed_count: 0,
            flagged_count: 0,
            phase: Phase::Fresh(generator),
        }
    }

    pub fn open(&mut self, coords: Coord2) -> Result<OpenOutcome> {
        use OpenOutcome::*;

        let coords = self.config.validate_coords(coords)?;
        self.check_not_finished()?;

        if let Phase::Fresh(generator) = &self.phase {
            let layout = generator.generate(self.config, coords)?;
            log::debug!("First open at {:?}, mines placed", coords);
            self.phase = Phase::Started {
                layout,
                status: Status::InProgress,
            };
        }
        let Phase::Started { layout, status } = &mut self.phase else {
            return Ok(NoChange);
        };

        let index = coords.to_nd_index();
        if self.board[index] != EngineCell::Hidden {
            return Ok(NoChange);
        }

        if layout.contains_mine(coords) {
            self.board[index] = EngineCell::Mine;
            let cleared_flags = disclose_mines(&mut self.board, layout);
            self.flagged_count -= cleared_flags;
            *status = Status::Lost { triggered: coords };
            log::debug!("Mine hit at {:?}, game lost", coords);
            return Ok(HitMine);
        }

        self.revealed_count += flood_reveal(&mut self.board, layout, coords);
        log::debug!(
            "Open cell at {:?}, revealed {} of {} safe cells",
            coords,
            self.revealed_count,
            layout.safe_cell_count()
        );

        Ok(if update_win(status, self.revealed_count, layout) {
            Won
        } else {
            Revealed
        })
    }

    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<FlagOutcome> {
        use FlagOutcome::*;

        let coords = self.config.validate_coords(coords)?;
        self.check_not_finished()?;

        let Phase::Started { layout, status } = &mut self.phase else {
            log::debug!("Ignoring flag at {:?} before the first open", coords);
            return Ok(NoChange);
        };

        let index = coords.to_nd_index();
        let outcome = match self.board[index] {
            EngineCell::Flagged => {
                self.board[index] = EngineCell::Hidden;
                self.flagged_count -= 1;
                Unflagged
            }
            EngineCell::Hidden if self.flagged_count < layout.mine_count() => {
                self.board[index] = EngineCell::Flagged;
                self.flagged_count += 1;
                Flagged
            }
            EngineCell::Hidden => {
                log::debug!("No flags left, refusing flag at {:?}", coords);
                NoChange
            }
            EngineCell::Revealed(_) | EngineCell::Mine => NoChange,
        };

        if outcome.has_update() {
            update_win(status, self.revealed_count, layout);
        }
        Ok(outcome)
    }
}

impl<G> GameSession<G> {
    pub fn state(&self) -> SessionState {
        match &self.phase {
            Phase::Fresh(_) => SessionState::Fresh,
            Phase::Started { status, .. } => match status {
                Status::InProgress => SessionState::InProgress,
                Status::Lost { .. } => SessionState::Lost,
                Status::Won => SessionState::Won,
            },
        }
    }

    pub fn is_finished(&self) -> bool {
        self.state().is_finished()
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn size(&self) -> Coord2 {
        self.config.size
    }

    pub fn total_mines(&self) -> CellCount {
        self.config.mines
    }

    pub fn flags_placed(&self) -> CellCount {
        self.flagged_count
    }

    /// Number of safe cells revealed so far.
    pub fn revealed_count(&self) -> CellCount {
        self.revealed_count
    }

    pub fn mines_remaining(&self) -> isize {
        (self.config.mines as isize) - (self.flagged_count as isize)
    }

    pub fn cell_at(&self, coords: Coord2) -> Result<EngineCell> {
        let coords = self.config.validate_coords(coords)?;
        Ok(self.board[coords.to_nd_index()])
    }

    pub fn cells(&self) -> ArrayView2<'_, EngineCell> {
        self.board.view()
    }

    pub fn triggered_mine(&self) -> Option<Coord2> {
        match &self.phase {
            Phase::Started {
                status: Status::Lost { triggered },
                ..
            } => Some(*triggered),
            _ => None,
        }
    }

    /// Mine placement, only available after the first open.
    pub fn mine_layout(&self) -> Option<&MineLayout> {
        match &self.phase {
            Phase::Fresh(_) => None,
            Phase::Started { layout, .. } => Some(layout),
        }
    }

    pub fn snapshot(&self) -> BoardView {
        BoardView::from_session(self)
    }

    fn check_not_finished(&self) -> Result<()> {
        if self.is_finished() {
            Err(GameError::SessionTerminal)
        } else {
            Ok(())
        }
    }
}

/// Reveals the connected zero region around `start` plus its numbered border.
///
/// Flagged cells are never opened and stop the expansion. Returns how many cells were revealed.
fn flood_reveal(board: &mut Array2<EngineCell>, layout: &MineLayout, start: Coord2) -> CellCount {
    let mut revealed = 0;
    let mut visited = HashSet::new();
    let mut to_visit = vec![start];

    while let Some(coords) = to_visit.pop() {
        if !visited.insert(coords) {
            continue;
        }

        let cell = &mut board[coords.to_nd_index()];
        if *cell != EngineCell::Hidden {
            log::trace!("Skipping cell at {:?}", coords);
            continue;
        }

        let count = layout.adjacent_mine_count(coords);
        *cell = EngineCell::Revealed(count);
        revealed += 1;
        log::trace!("Flood opened cell at {:?}, mine count: {}", coords, count);

        if count == 0 {
            to_visit.extend(
                layout
                    .iter_neighbors(coords)
                    .filter(|pos| !visited.contains(pos)),
            );
        }
    }

    revealed
}

/// Shows every mine after a loss, returns how many flags were lifted off mines.
fn disclose_mines(board: &mut Array2<EngineCell>, layout: &MineLayout) -> CellCount {
    let mut cleared_flags = 0;
    for coords in layout.iter_mines() {
        let cell = &mut board[coords.to_nd_index()];
        if cell.is_flagged() {
            cleared_flags += 1;
        }
        *cell = EngineCell::Mine;
    }
    cleared_flags
}

fn update_win(status: &mut Status, revealed_count: CellCount, layout: &MineLayout) -> bool {
    if *status == Status::InProgress && revealed_count == layout.safe_cell_count() {
        log::debug!("All {} safe cells revealed, game won", revealed_count);
        *status = Status::Won;
    }
    *status == Status::Won
}
