//! Pointer invariants: the pointer is in range and the board follows it.

use super::super::GameState;
use super::Invariant;

/// Invariant: the pointer is unset exactly when history is empty, and
/// otherwise indexes an existing snapshot.
pub struct PointerInRange;

impl Invariant<GameState> for PointerInRange {
    fn holds(state: &GameState) -> bool {
        match state.pointer().index() {
            None => state.history().is_empty(),
            Some(index) => index < state.history().len(),
        }
    }

    fn description() -> &'static str {
        "Pointer indexes an existing snapshot, or is unset with empty history"
    }
}

/// Invariant: the displayed board is the snapshot under the pointer.
pub struct BoardMatchesPointer;

impl Invariant<GameState> for BoardMatchesPointer {
    fn holds(state: &GameState) -> bool {
        match state.pointer().index() {
            None => true,
            Some(index) => state.history().get(index) == Some(state.board()),
        }
    }

    fn description() -> &'static str {
        "Board equals the snapshot under the pointer"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::tictactoe::{Board, HistoryPointer, Player, Position, Square};

    #[test]
    fn test_fresh_state_holds() {
        let state = GameState::new();
        assert!(PointerInRange::holds(&state));
        assert!(BoardMatchesPointer::holds(&state));
    }

    #[test]
    fn test_unset_pointer_with_history_violates() {
        let state = GameState::from_parts(Board::new(), vec![Board::new()], HistoryPointer::UNSET);
        assert!(!PointerInRange::holds(&state));
    }

    #[test]
    fn test_board_off_pointer_violates() {
        let mut board = Board::new();
        board.set(Position::Center, Square::Occupied(Player::X));
        let state = GameState::from_parts(board, vec![Board::new(), board], HistoryPointer::at(0));
        assert!(PointerInRange::holds(&state));
        assert!(!BoardMatchesPointer::holds(&state));
    }
}
