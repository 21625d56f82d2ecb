//! Minesweeper board engine.
//!
//! A [`BoardEngine`] owns one [`GameSession`] at a time. Mines are only placed on the first
//! [`open`](BoardEngine::open), always avoiding the clicked cell, and the UI reads back
//! [`BoardView`] snapshots after each command.

#![no_std]

extern crate alloc;

use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

pub use difficulty::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use session::*;
pub use snapshot::*;
pub use tile::*;
pub use types::*;

mod difficulty;
mod engine;
mod error;
mod generator;
mod session;
mod snapshot;
mod tile;
mod types;

/// Board dimensions and mine count, `size` is `(cols, rows)`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub size: Coord2,
    pub mines: CellCount,
}

impl GameConfig {
    pub const fn new_unchecked(size: Coord2, mines: CellCount) -> Self {
        Self { size, mines }
    }

    /// Checked constructor: at least one row and column, at least one mine and one safe cell.
    pub fn new(rows: Coord, cols: Coord, mines: CellCount) -> Result<Self> {
        Self::new_unchecked((cols, rows), mines).validate()
    }

    /// Applies the checks of [`GameConfig::new`] to an already built config.
    pub fn validate(self) -> Result<Self> {
        let (cols, rows) = self.size;
        if rows == 0 || cols == 0 || self.mines == 0 || self.mines >= mult(cols, rows) {
            return Err(GameError::InvalidConfiguration);
        }
        Ok(self)
    }

    pub const fn rows(&self) -> Coord {
        self.size.1
    }

    pub const fn cols(&self) -> Coord {
        self.size.0
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }

    pub const fn safe_cells(&self) -> CellCount {
        self.total_cells() - self.mines
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        if coords.0 < self.size.0 && coords.1 < self.size.1 {
            Ok(coords)
        } else {
            Err(GameError::OutOfRange)
        }
    }
}

/// Mine placement for one game together with the adjacency counts derived from it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MineLayout {
    mine_mask: Array2<bool>,
    adjacent: Array2<u8>,
    mine_count: CellCount,
}

impl MineLayout {
    pub fn from_mine_mask(mine_mask: Array2<bool>) -> Self {
        let mine_count = mine_mask.iter().filter(|&&is_mine| is_mine).count() as CellCount;

        let adjacent = Array2::from_shape_fn(mine_mask.dim(), |(y, x)| {
            if mine_mask[(y, x)] {
                return 0;
            }
            mine_mask
                .iter_neighbors((x as Coord, y as Coord))
                .filter(|&pos| mine_mask[pos.to_nd_index()])
                .count() as u8
        });

        Self {
            mine_mask,
            adjacent,
            mine_count,
        }
    }

    pub fn from_mine_coords(size: Coord2, mine_coords: &[Coord2]) -> Result<Self> {
        let mut mine_mask: Array2<bool> = Array2::default(size.to_nd_index());

        for &coords in mine_coords {
            if coords.0 >= size.0 || coords.1 >= size.1 {
                return Err(GameError::OutOfRange);
            }
            mine_mask[coords.to_nd_index()] = true;
        }

        Ok(Self::from_mine_mask(mine_mask))
    }

    pub fn game_config(&self) -> GameConfig {
        GameConfig::new_unchecked(self.size(), self.mine_count)
    }

    pub fn size(&self) -> Coord2 {
        array_size(&self.mine_mask)
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.total_cells() - self.mine_count
    }

    pub fn total_cells(&self) -> CellCount {
        self.mine_mask.len() as CellCount
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn contains_mine(&self, coords: Coord2) -> bool {
        self[coords]
    }

    /// Precomputed count of mines around `coords`, always 0 on a mine.
    pub fn adjacent_mine_count(&self, coords: Coord2) -> u8 {
        self.adjacent[coords.to_nd_index()]
    }

    pub fn iter_mines(&self) -> impl Iterator<Item = Coord2> + '_ {
        let size = self.size();
        self.mine_mask
            .iter()
            .enumerate()
            .filter(|&(_, &is_mine)| is_mine)
            .map(move |(index, _)| coords_from_flat(index, size))
    }

    pub fn iter_neighbors(&self, coords: Coord2) -> NeighborIter {
        self.mine_mask.iter_neighbors(coords)
    }
}

impl Index<Coord2> for MineLayout {
    type Output = bool;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.mine_mask[coords.to_nd_index()]
    }
}

/// Outcome of toggling a flag.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlagOutcome {
    NoChange,
    Flagged,
    Unflagged,
}

impl FlagOutcome {
    /// Whether the flag counter moved.
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::NoChange)
    }
}

/// Outcome of opening a cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum OpenOutcome {
    NoChange,
    Revealed,
    HitMine,
    Won,
}

impl OpenOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::NoChange)
    }

    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::HitMine | Self::Won)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_rejects_degenerate_boards() {
        assert_eq!(GameConfig::new(0, 5, 1), Err(GameError::InvalidConfiguration));
        assert_eq!(GameConfig::new(5, 0, 1), Err(GameError::InvalidConfiguration));
        assert_eq!(GameConfig::new(3, 3, 0), Err(GameError::InvalidConfiguration));
        assert_eq!(GameConfig::new(3, 3, 9), Err(GameError::InvalidConfiguration));
    }

    #[test]
    fn validate_catches_unchecked_configs() {
        assert_eq!(
            GameConfig::new_unchecked((0, 0), 0).validate(),
            Err(GameError::InvalidConfiguration)
        );
        assert_eq!(
            GameConfig::new_unchecked((3, 3), 9).validate(),
            Err(GameError::InvalidConfiguration)
        );
        let config = GameConfig::new_unchecked((4, 2), 7);
        assert_eq!(config.validate(), Ok(config));
    }

    #[test]
    fn config_stores_cols_then_rows() {
        let config = GameConfig::new(2, 7, 3).unwrap();

        assert_eq!(config.size, (7, 2));
        assert_eq!(config.rows(), 2);
        assert_eq!(config.cols(), 7);
        assert_eq!(config.safe_cells(), 11);
        assert_eq!(config.validate_coords((6, 1)), Ok((6, 1)));
        assert_eq!(config.validate_coords((1, 6)), Err(GameError::OutOfRange));
    }

    #[test]
    fn layout_counts_adjacent_mines() {
        // . * .
        // . . .
        // * . *
        let layout = MineLayout::from_mine_coords((3, 3), &[(1, 0), (0, 2), (2, 2)]).unwrap();

        assert_eq!(layout.mine_count(), 3);
        assert_eq!(layout.safe_cell_count(), 6);
        assert_eq!(layout.adjacent_mine_count((0, 0)), 1);
        assert_eq!(layout.adjacent_mine_count((1, 1)), 3);
        assert_eq!(layout.adjacent_mine_count((1, 2)), 2);
        assert_eq!(layout.adjacent_mine_count((1, 0)), 0);
    }

    #[test]
    fn layout_rejects_mines_outside_the_grid() {
        assert_eq!(
            MineLayout::from_mine_coords((2, 2), &[(2, 0)]),
            Err(GameError::OutOfRange)
        );
    }

    #[test]
    fn iter_mines_lists_row_major_coords() {
        let layout = MineLayout::from_mine_coords((4, 2), &[(3, 1), (1, 0)]).unwrap();
        let mines: alloc::vec::Vec<_> = layout.iter_mines().collect();

        assert_eq!(mines, [(1, 0), (3, 1)]);
    }
}
