//! Turn resolution: whose mark goes down next.

use super::super::{Board, Player};
use tracing::instrument;

/// Derives the next mark from the board alone.
///
/// X always opens, so an even number of occupied squares means X is up.
#[instrument(skip(board))]
pub fn next_mark(board: &Board) -> Player {
    if board.occupied() % 2 == 0 {
        Player::X
    } else {
        Player::O
    }
}
