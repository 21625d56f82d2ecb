use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use super::*;

/// Uniform placement over every cell except the first opened one.
///
/// Shuffles the eligible cells and keeps a prefix, so placement always finishes in one pass.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RandomMinefieldGenerator {
    seed: u64,
}

impl RandomMinefieldGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl MinefieldGenerator for RandomMinefieldGenerator {
    fn generate(&self, config: GameConfig, start: Coord2) -> Result<MineLayout> {
        use rand::prelude::*;

        let start = config.validate_coords(start)?;
        if config.mines == 0 || config.mines >= config.total_cells() {
            return Err(GameError::InvalidConfiguration);
        }

        let start_index = flat_from_coords(start, config.size);
        let mut eligible: Vec<usize> = (0..usize::from(config.total_cells()))
            .filter(|&index| index != start_index)
            .collect();

        let mut rng = SmallRng::seed_from_u64(self.seed);
        let (chosen, _) = eligible.partial_shuffle(&mut rng, usize::from(config.mines));

        let mut mines: Array2<bool> = Array2::default(config.size.to_nd_index());
        for &index in chosen.iter() {
            mines[coords_from_flat(index, config.size).to_nd_index()] = true;
        }

        let layout = MineLayout::from_mine_mask(mines);
        log::debug!(
            "Placed {} mines on {}x{} board avoiding {:?}, seed: {}",
            layout.mine_count(),
            config.cols(),
            config.rows(),
            start,
            self.seed
        );
        Ok(layout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn places_exact_mine_count_and_spares_start() {
        let config = GameConfig::new(9, 9, 10).unwrap();

        for seed in 0..64 {
            let layout = RandomMinefieldGenerator::new(seed)
                .generate(config, (4, 4))
                .unwrap();

            assert_eq!(layout.mine_count(), 10);
            assert!(!layout.contains_mine((4, 4)));
        }
    }

    #[test]
    fn dense_board_fills_every_other_cell() {
        let config = GameConfig::new(3, 3, 8).unwrap();
        let layout = RandomMinefieldGenerator::new(7)
            .generate(config, (1, 2))
            .unwrap();

        assert_eq!(layout.mine_count(), 8);
        assert!(!layout.contains_mine((1, 2)));
        assert_eq!(layout.adjacent_mine_count((1, 2)), 5);
    }

    #[test]
    fn same_seed_same_layout() {
        let config = GameConfig::new(16, 30, 99).unwrap();
        let a = RandomMinefieldGenerator::new(42).generate(config, (0, 0));
        let b = RandomMinefieldGenerator::new(42).generate(config, (0, 0));

        assert_eq!(a, b);
    }

    #[test]
    fn every_other_cell_can_receive_the_mine() {
        let config = GameConfig::new(3, 3, 1).unwrap();
        let mut seen: Array2<bool> = Array2::default(config.size.to_nd_index());

        for seed in 0..512 {
            let layout = RandomMinefieldGenerator::new(seed)
                .generate(config, (0, 0))
                .unwrap();
            for coords in layout.iter_mines() {
                seen[coords.to_nd_index()] = true;
            }
        }

        assert!(!seen[[0, 0]]);
        assert_eq!(seen.iter().filter(|&&hit| hit).count(), 8);
    }

    #[test]
    fn rejects_start_outside_board() {
        let config = GameConfig::new(2, 2, 1).unwrap();

        assert_eq!(
            RandomMinefieldGenerator::new(0).generate(config, (2, 0)),
            Err(GameError::OutOfRange)
        );
    }
}
