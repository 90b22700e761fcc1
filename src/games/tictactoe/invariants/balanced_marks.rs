//! Balanced-marks invariant: X leads O by at most one.

use super::super::{Board, GameState, Player};
use super::Invariant;

/// Invariant: X count equals O count, or exceeds it by exactly one.
///
/// Players alternate and X moves first, so no other split is reachable.
pub struct BalancedMarks;

impl Invariant<Board> for BalancedMarks {
    fn holds(board: &Board) -> bool {
        let x = board.count(Player::X);
        let o = board.count(Player::O);
        x == o || x == o + 1
    }

    fn description() -> &'static str {
        "X leads O by zero or one marks"
    }
}

impl Invariant<GameState> for BalancedMarks {
    fn holds(state: &GameState) -> bool {
        <Self as Invariant<Board>>::holds(state.board())
    }

    fn description() -> &'static str {
        <Self as Invariant<Board>>::description()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::tictactoe::{Position, Square};

    #[test]
    fn test_empty_board_holds() {
        assert!(<BalancedMarks as Invariant<Board>>::holds(&Board::new()));
    }

    #[test]
    fn test_x_one_ahead_holds() {
        let mut board = Board::new();
        board.set(Position::Center, Square::Occupied(Player::X));
        assert!(<BalancedMarks as Invariant<Board>>::holds(&board));
    }

    #[test]
    fn test_o_first_violates() {
        let mut board = Board::new();
        board.set(Position::Center, Square::Occupied(Player::O));
        assert!(!<BalancedMarks as Invariant<Board>>::holds(&board));
    }

    #[test]
    fn test_x_two_ahead_violates() {
        let mut board = Board::new();
        board.set(Position::Center, Square::Occupied(Player::X));
        board.set(Position::TopLeft, Square::Occupied(Player::X));
        assert!(!<BalancedMarks as Invariant<Board>>::holds(&board));
    }
}
