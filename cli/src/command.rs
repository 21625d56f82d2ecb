use anyhow::{Context, Result, anyhow, bail};
use sweeper_core::{CellCount, Coord, Coord2};

pub const HELP: &str = "\
commands:
  open X Y               (o)  open the cell at column X, row Y
  flag X Y               (f)  toggle a flag
  new                    (n)  restart with the same board
  reset ROWS COLS MINES  (r)  restart with a new board
  show [--json]          (s)  print the board again
  help                   (h)
  quit                   (q)";

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Open(Coord2),
    Flag(Coord2),
    New,
    Reset {
        rows: Coord,
        cols: Coord,
        mines: CellCount,
    },
    Show {
        json: bool,
    },
    Help,
    Quit,
}

impl Command {
    /// Parses one input line, `None` for a blank line.
    pub fn parse(line: &str) -> Result<Option<Self>> {
        let mut words = line.split_whitespace();
        let Some(name) = words.next() else {
            return Ok(None);
        };
        let args: Vec<&str> = words.collect();

        let wrong_args = || anyhow!("Wrong arguments for `{name}`, type `help` for usage");
        let command = match name.to_ascii_lowercase().as_str() {
            "o" | "open" => match args.as_slice() {
                &[x, y] => Self::Open(coords(x, y)?),
                _ => return Err(wrong_args()),
            },
            "f" | "flag" => match args.as_slice() {
                &[x, y] => Self::Flag(coords(x, y)?),
                _ => return Err(wrong_args()),
            },
            "r" | "reset" => match args.as_slice() {
                &[rows, cols, mines] => Self::Reset {
                    rows: number(rows, "rows")?,
                    cols: number(cols, "cols")?,
                    mines: number(mines, "mines")?,
                },
                _ => return Err(wrong_args()),
            },
            "s" | "show" => match args.as_slice() {
                [] => Self::Show { json: false },
                ["--json"] => Self::Show { json: true },
                _ => return Err(wrong_args()),
            },
            "n" | "new" => match args.as_slice() {
                [] => Self::New,
                _ => return Err(wrong_args()),
            },
            "h" | "help" | "?" => match args.as_slice() {
                [] => Self::Help,
                _ => return Err(wrong_args()),
            },
            "q" | "quit" | "exit" => match args.as_slice() {
                [] => Self::Quit,
                _ => return Err(wrong_args()),
            },
            _ => bail!("Unknown command `{name}`, type `help` for usage"),
        };
        Ok(Some(command))
    }
}

fn coords(x: &str, y: &str) -> Result<Coord2> {
    Ok((number(x, "X")?, number(y, "Y")?))
}

fn number<T: std::str::FromStr>(word: &str, what: &str) -> Result<T>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    word.parse()
        .with_context(|| format!("`{word}` is not a valid value for {what}"))
}
