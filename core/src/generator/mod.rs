use crate::*;
pub use random::*;

mod random;

/// Produces the mine layout of a session once the first cell to open is known.
pub trait MinefieldGenerator {
    fn generate(&self, config: GameConfig, start: Coord2) -> Result<MineLayout>;
}

/// A prepared layout is used as-is, which gives scripted and reproducible boards.
impl MinefieldGenerator for MineLayout {
    fn generate(&self, config: GameConfig, start: Coord2) -> Result<MineLayout> {
        if self.game_config() != config {
            return Err(GameError::InvalidConfiguration);
        }
        if self.contains_mine(start) {
            log::warn!("Preset layout has a mine under the first opened cell {:?}", start);
        }
        Ok(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preset_layout_must_match_config() {
        let layout = MineLayout::from_mine_coords((3, 3), &[(0, 0)]).unwrap();
        let config = GameConfig::new(3, 3, 2).unwrap();

        assert_eq!(
            layout.generate(config, (2, 2)),
            Err(GameError::InvalidConfiguration)
        );
    }

    #[test]
    fn preset_layout_is_returned_unchanged() {
        let layout = MineLayout::from_mine_coords((3, 2), &[(2, 1)]).unwrap();
        let config = layout.game_config();

        assert_eq!(layout.generate(config, (0, 0)), Ok(layout.clone()));
    }
}
