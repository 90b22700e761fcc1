//! Values computed from the board after every change.

use super::rules::{Status, check_winner, is_full, next_mark};
use super::{Board, Player};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Coarse game phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// No winner and at least one empty square.
    InProgress,
    /// Someone won or the board is full. Moves are ignored.
    Terminal,
}

/// Derived view of a board. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct DerivedState {
    next_mark: Player,
    winner: Option<Player>,
    status: String,
    phase: Phase,
}

impl DerivedState {
    /// Recomputes everything from `board`.
    #[instrument(skip(board))]
    pub fn of(board: &Board) -> Self {
        let next_mark = next_mark(board);
        let winner = check_winner(board);
        let status = Status::evaluate(winner, board, next_mark).to_string();
        let phase = if winner.is_some() || is_full(board) {
            Phase::Terminal
        } else {
            Phase::InProgress
        };
        Self {
            next_mark,
            winner,
            status,
            phase,
        }
    }
}

impl Default for DerivedState {
    fn default() -> Self {
        Self::of(&Board::new())
    }
}
