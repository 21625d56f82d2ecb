use rand::prelude::*;

use crate::*;

/// Front door for a UI: owns the current session and replaces it on every reset.
///
/// Each reset draws a fresh placement seed from the engine's own generator, so a whole run of
/// games is reproducible from the seed given to [`BoardEngine::new`].
#[derive(Clone, Debug)]
pub struct BoardEngine {
    rng: SmallRng,
    session: GameSession,
}

impl BoardEngine {
    pub fn new(config: GameConfig, seed: u64) -> Result<Self> {
        let config = config.validate()?;
        let mut rng = SmallRng::seed_from_u64(seed);
        let session = GameSession::new(config, RandomMinefieldGenerator::new(rng.random()));
        Ok(Self { rng, session })
    }

    /// Starts a new game with new dimensions. Invalid input keeps the current game.
    pub fn reset(&mut self, rows: Coord, cols: Coord, mines: CellCount) -> Result<&GameSession> {
        self.reset_with(GameConfig::new(rows, cols, mines)?)
    }

    /// Starts a new game, typically with the current [`GameSession::config`].
    /// Invalid configs keep the current game.
    pub fn reset_with(&mut self, config: GameConfig) -> Result<&GameSession> {
        let config = config.validate()?;
        let generator = RandomMinefieldGenerator::new(self.rng.random());
        log::debug!(
            "New {}x{} game with {} mines, seed: {}",
            config.cols(),
            config.rows(),
            config.mines,
            generator.seed()
        );
        self.session = GameSession::new(config, generator);
        Ok(&self.session)
    }

    pub fn open(&mut self, x: Coord, y: Coord) -> Result<OpenOutcome> {
        self.session.open((x, y))
    }

    pub fn toggle_flag(&mut self, x: Coord, y: Coord) -> Result<FlagOutcome> {
        self.session.toggle_flag((x, y))
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn state(&self) -> SessionState {
        self.session.state()
    }

    pub fn snapshot(&self) -> BoardView {
        self.session.snapshot()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn easy() -> GameConfig {
        GameConfig::new(9, 9, 10).unwrap()
    }

    #[test]
    fn reset_builds_blank_board_without_mines() {
        let mut engine = BoardEngine::new(easy(), 1).unwrap();

        let session = engine.reset(5, 7, 4).unwrap();

        assert_eq!(session.size(), (7, 5));
        assert_eq!(session.state(), SessionState::Fresh);
        assert_eq!(session.flags_placed(), 0);
        assert!(session.mine_layout().is_none());
    }

    #[test]
    fn invalid_reset_keeps_current_game() {
        let mut engine = BoardEngine::new(easy(), 1).unwrap();
        engine.open(4, 4).unwrap();
        let before = engine.session().clone();

        assert_eq!(
            engine.reset(3, 3, 9).map(|_| ()),
            Err(GameError::InvalidConfiguration)
        );
        assert_eq!(engine.session(), &before);
    }

    #[test]
    fn reset_with_unchecked_config_keeps_current_game() {
        let mut engine = BoardEngine::new(easy(), 1).unwrap();
        engine.open(4, 4).unwrap();
        let before = engine.session().clone();

        for config in [
            GameConfig::new_unchecked((0, 0), 0),
            GameConfig::new_unchecked((3, 3), 9),
        ] {
            assert_eq!(
                engine.reset_with(config).map(|_| ()),
                Err(GameError::InvalidConfiguration)
            );
            assert_eq!(engine.session(), &before);
        }
    }

    #[test]
    fn new_rejects_unchecked_config() {
        assert_eq!(
            BoardEngine::new(GameConfig::new_unchecked((5, 0), 1), 1).map(|_| ()),
            Err(GameError::InvalidConfiguration)
        );
    }

    #[test]
    fn first_open_is_always_safe() {
        for seed in 0..32 {
            let mut engine = BoardEngine::new(easy(), seed).unwrap();

            let outcome = engine.open(0, 8).unwrap();

            assert_ne!(outcome, OpenOutcome::HitMine);
            let layout = engine.session().mine_layout().unwrap();
            assert!(!layout.contains_mine((0, 8)));
            assert_eq!(layout.mine_count(), 10);
        }
    }

    #[test]
    fn reset_after_loss_starts_over() {
        let mut engine = BoardEngine::new(easy(), 3).unwrap();
        engine.open(4, 4).unwrap();
        if !engine.state().is_finished() {
            let mine = engine.session().mine_layout().unwrap().iter_mines().next().unwrap();
            assert_eq!(engine.open(mine.0, mine.1), Ok(OpenOutcome::HitMine));
        }
        assert!(engine.state().is_finished());

        let config = engine.session().config();
        engine.reset_with(config).unwrap();

        assert_eq!(engine.state(), SessionState::Fresh);
        assert_eq!(engine.snapshot().revealed_count(), 0);
    }

    #[test]
    fn engine_seed_makes_runs_reproducible() {
        let mut a = BoardEngine::new(easy(), 99).unwrap();
        let mut b = BoardEngine::new(easy(), 99).unwrap();

        for _ in 0..3 {
            a.open(2, 2).unwrap();
            b.open(2, 2).unwrap();
            assert_eq!(a.session().mine_layout(), b.session().mine_layout());
            a.reset_with(easy()).unwrap();
            b.reset_with(easy()).unwrap();
        }
    }
}
