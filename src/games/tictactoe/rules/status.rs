//! Human-readable game status.

use super::super::{Board, Player};
use super::draw::is_full;
use derive_more::Display;
use tracing::instrument;

/// Status line shown above the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Status {
    /// Someone completed a line.
    #[display("Winner: {_0}")]
    Winner(Player),
    /// Board full without a line.
    #[display("Scratch: Cat's game")]
    CatsGame,
    /// Game still open.
    #[display("Next player: {_0}")]
    NextPlayer(Player),
}

impl Status {
    /// Picks the status in priority order: winner, then draw, then next player.
    #[instrument(skip(board))]
    pub fn evaluate(winner: Option<Player>, board: &Board, next: Player) -> Self {
        match winner {
            Some(player) => Status::Winner(player),
            None if is_full(board) => Status::CatsGame,
            None => Status::NextPlayer(next),
        }
    }
}

/// Formats the status line for a board.
#[instrument(skip(board))]
pub fn format_status(winner: Option<Player>, board: &Board, next: Player) -> String {
    Status::evaluate(winner, board, next).to_string()
}
