use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use sweeper_core::*;
use web_time::{Instant, SystemTime, UNIX_EPOCH};

use command::{Command, HELP};

mod command;
mod render;

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Preset {
    Easy,
    Medium,
    Hard,
}

#[derive(Parser, Debug)]
#[command(version, about = "Minesweeper in the terminal", long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Board preset, ignored when a custom board is given
    #[arg(short, long, value_enum, default_value = "easy")]
    difficulty: Preset,

    /// Rows of a custom board (5-40)
    #[arg(long, requires_all = ["cols", "mines"])]
    rows: Option<Coord>,

    /// Columns of a custom board (5-40)
    #[arg(long, requires_all = ["rows", "mines"])]
    cols: Option<Coord>,

    /// Mines of a custom board
    #[arg(long, requires_all = ["rows", "cols"])]
    mines: Option<CellCount>,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,
}

impl Args {
    fn difficulty(&self) -> Difficulty {
        match (self.rows, self.cols, self.mines) {
            (Some(rows), Some(cols), Some(mines)) => Difficulty::Custom { rows, cols, mines },
            _ => match self.difficulty {
                Preset::Easy => Difficulty::Easy,
                Preset::Medium => Difficulty::Medium,
                Preset::Hard => Difficulty::Hard,
            },
        }
    }
}

/// Engine plus the wall clock the UI shows next to the board.
struct Game {
    engine: BoardEngine,
    started_at: Option<Instant>,
    ended_at: Option<Instant>,
}

impl Game {
    fn new(config: GameConfig, seed: u64) -> sweeper_core::Result<Self> {
        Ok(Self {
            engine: BoardEngine::new(config, seed)?,
            started_at: None,
            ended_at: None,
        })
    }

    fn elapsed_secs(&self) -> u64 {
        match self.started_at {
            Some(started_at) => self
                .ended_at
                .unwrap_or_else(Instant::now)
                .duration_since(started_at)
                .as_secs(),
            None => 0,
        }
    }

    fn restart(&mut self, config: GameConfig) -> sweeper_core::Result<()> {
        self.engine.reset_with(config)?;
        self.started_at = None;
        self.ended_at = None;
        Ok(())
    }

    fn sync_clock(&mut self) {
        let state = self.engine.state();
        if self.started_at.is_none() && !state.is_fresh() {
            self.started_at = Some(Instant::now());
        }
        if self.ended_at.is_none() && state.is_finished() {
            self.ended_at = Some(Instant::now());
        }
    }

    fn print(&self, out: &mut impl Write) -> io::Result<()> {
        let view = self.engine.snapshot();
        write!(out, "{}", render::board(&view))?;
        writeln!(out, "{}", render::status(&view, self.elapsed_secs()))
    }

    /// Runs one command, returns `false` once the player wants to leave.
    fn apply(&mut self, command: Command, out: &mut impl Write) -> Result<bool> {
        let result = match command {
            Command::Open((x, y)) => self.engine.open(x, y).map(|outcome| {
                log::debug!("open ({x}, {y}): {outcome:?}");
                outcome.has_update()
            }),
            Command::Flag((x, y)) => self.engine.toggle_flag(x, y).map(|outcome| {
                log::debug!("flag ({x}, {y}): {outcome:?}");
                outcome.has_update()
            }),
            Command::New => self.restart(self.engine.session().config()).map(|()| true),
            Command::Reset { rows, cols, mines } => GameConfig::new(rows, cols, mines)
                .and_then(|config| self.restart(config))
                .map(|()| true),
            Command::Show { json: true } => {
                serde_json::to_writer(&mut *out, &self.engine.snapshot())?;
                writeln!(out)?;
                return Ok(true);
            }
            Command::Show { json: false } => Ok(true),
            Command::Help => {
                writeln!(out, "{HELP}")?;
                return Ok(true);
            }
            Command::Quit => return Ok(false),
        };

        match result {
            Ok(changed) => {
                self.sync_clock();
                if changed || matches!(command, Command::Show { .. }) {
                    self.print(out)?;
                }
                match self.engine.state().terminal() {
                    Terminal::Won if changed => {
                        writeln!(out, "You won in {}s! Type `new` to play again.", self.elapsed_secs())?
                    }
                    Terminal::Lost if changed => writeln!(out, "You hit a mine! Type `new` to try again.")?,
                    _ => {}
                }
            }
            Err(GameError::SessionTerminal) => {
                writeln!(out, "This game is over, type `new` or `reset ROWS COLS MINES`.")?
            }
            Err(err) => writeln!(out, "{err}")?,
        }
        Ok(true)
    }
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos() as u64)
        .unwrap_or_default()
}

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(args.verbose.tracing_level_filter())
        .with_writer(io::stderr)
        .init();

    let config = args
        .difficulty()
        .config()
        .context("Invalid board, rows and cols must be 5-40 and mines below rows*cols")?;
    let seed = args.seed.unwrap_or_else(clock_seed);
    log::debug!("seed: {seed}");

    let mut game = Game::new(config, seed)?;
    let mut out = io::stdout().lock();
    writeln!(out, "{HELP}")?;
    game.print(&mut out)?;

    for line in io::stdin().lock().lines() {
        let line = line.context("Could not read from stdin")?;
        let keep_going = match Command::parse(&line) {
            Ok(Some(command)) => game.apply(command, &mut out)?,
            Ok(None) => true,
            Err(err) => {
                writeln!(out, "{err:#}")?;
                true
            }
        };
        if !keep_going {
            break;
        }
        out.flush()?;
    }

    Ok(())
}
