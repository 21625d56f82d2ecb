use sweeper_core::{BoardView, Coord, EngineCell, SessionState};

fn cell_char(cell: EngineCell, triggered: bool) -> char {
    match cell {
        EngineCell::Hidden => '#',
        EngineCell::Flagged => 'F',
        EngineCell::Revealed(0) => '.',
        EngineCell::Revealed(count) => char::from(b'0' + count),
        EngineCell::Mine if triggered => 'X',
        EngineCell::Mine => '*',
    }
}

/// Plain text board with column and row labels, columns are labelled modulo 10.
pub fn board(view: &BoardView) -> String {
    let (cols, _) = view.size;
    let mut out = String::from("    ");
    for x in 0..cols {
        out.push(char::from(b'0' + x % 10));
        out.push(' ');
    }
    out.push('\n');

    for (y, row) in view.cells.rows().into_iter().enumerate() {
        out.push_str(&format!("{y:>3} "));
        for (x, &cell) in row.iter().enumerate() {
            let triggered = view.triggered_mine == Some((x as Coord, y as Coord));
            out.push(cell_char(cell, triggered));
            out.push(' ');
        }
        out.push('\n');
    }
    out
}

pub fn status(view: &BoardView, elapsed_secs: u64) -> String {
    let state = match view.state {
        SessionState::Fresh => "open any cell to start",
        SessionState::InProgress => "in progress",
        SessionState::Lost => "boom, you hit a mine",
        SessionState::Won => "cleared, you won",
    };
    format!(
        "flags left: {}  time: {}s  {}",
        view.mines_remaining, elapsed_secs, state
    )
}
