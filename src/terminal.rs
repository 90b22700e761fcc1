//! Line-oriented terminal front-end.
//!
//! Reads one command per line and renders the board, status and history
//! list after each one. All game logic stays in [`HistoryController`].

use std::io::{self, BufRead, Write};

use strictly_timetravel::{HistoryController, Position, SlotStore};
use tracing::{debug, instrument};

/// A parsed input line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Input {
    Move(Position),
    Jump(usize),
    Reset,
    Help,
    Quit,
}

impl Input {
    fn parse(line: &str) -> Option<Self> {
        let line = line.trim();
        let mut words = line.split_whitespace();
        match words.next()?.to_lowercase().as_str() {
            "jump" | "j" => words.next()?.parse().ok().map(Input::Jump),
            "reset" | "restart" => Some(Input::Reset),
            "help" | "?" => Some(Input::Help),
            "quit" | "q" | "exit" => Some(Input::Quit),
            _ => Position::from_label_or_number(line).map(Input::Move),
        }
    }
}

const HELP: &str = "Commands: 0-8 or a square name (e.g. center) to move, \
jump N to view snapshot N, reset to start over, quit to leave.";

/// Label of the history button for snapshot `index`.
pub fn history_label(index: usize, is_current: bool) -> String {
    let label = if index == 0 {
        "Go to game start".to_string()
    } else {
        format!("Go to move #{}", index)
    };
    if is_current {
        format!("{} (current)", label)
    } else {
        label
    }
}

/// Writes the board, status line and history list.
pub fn render<S: SlotStore, W: Write>(game: &HistoryController<S>, out: &mut W) -> io::Result<()> {
    let state = game.state();
    writeln!(out, "{}", game.derived().status())?;
    writeln!(out, "{}", state.board().display())?;
    if !state.history().is_empty() {
        writeln!(out, "History:")?;
        for index in 0..state.history().len() {
            let current = state.pointer().index() == Some(index);
            writeln!(out, "  {}. {}", index, history_label(index, current))?;
        }
    }
    Ok(())
}

/// Runs the interactive loop until `quit` or end of input.
#[instrument(skip_all, fields(namespace = %game.namespace()))]
pub fn play<S, R, W>(game: &mut HistoryController<S>, input: R, out: &mut W) -> io::Result<()>
where
    S: SlotStore,
    R: BufRead,
    W: Write,
{
    render(game, out)?;
    writeln!(out, "{}", HELP)?;

    for line in input.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        match Input::parse(&line) {
            Some(Input::Move(pos)) => {
                // Illegal moves are silently ignored.
                game.apply_move(pos.to_index());
            }
            Some(Input::Jump(index)) => {
                if let Err(e) = game.jump_to(index) {
                    writeln!(out, "{}", e)?;
                    continue;
                }
            }
            Some(Input::Reset) => game.reset(),
            Some(Input::Help) => {
                writeln!(out, "{}", HELP)?;
                continue;
            }
            Some(Input::Quit) => break,
            None => {
                debug!(line = %line, "Unrecognized input");
                writeln!(out, "Unrecognized input. {}", HELP)?;
                continue;
            }
        }
        render(game, out)?;
    }
    out.flush()
}
