//! First-class invariants for tic-tac-toe state.
//!
//! Invariants are logical properties that must hold after every mutation.
//! They guard freshly loaded state and are re-checked in debug builds after
//! each history operation.

pub mod balanced_marks;
pub mod pointer;
pub mod single_ply;

pub use balanced_marks::BalancedMarks;
pub use pointer::{BoardMatchesPointer, PointerInRange};
pub use single_ply::SinglePlyHistory;

/// A logical property that must hold for a given state.
pub trait Invariant<S: ?Sized> {
    /// Checks if the invariant holds for the given state.
    fn holds(state: &S) -> bool;

    /// Human-readable description of the invariant.
    fn description() -> &'static str;
}

/// Violation of an invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub description: String,
}

impl InvariantViolation {
    /// Creates a new invariant violation.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// A set of invariants that can be checked together.
///
/// Implemented for tuples of [`Invariant`]s.
pub trait InvariantSet<S: ?Sized> {
    /// Checks all invariants in the set, collecting every violation.
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>>;
}

macro_rules! impl_invariant_set {
    ($($inv:ident),+) => {
        impl<S: ?Sized, $($inv),+> InvariantSet<S> for ($($inv,)+)
        where
            $($inv: Invariant<S>),+
        {
            fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
                let mut violations = Vec::new();
                $(
                    if !$inv::holds(state) {
                        violations.push(InvariantViolation::new($inv::description()));
                    }
                )+
                if violations.is_empty() {
                    Ok(())
                } else {
                    Err(violations)
                }
            }
        }
    };
}

impl_invariant_set!(I1, I2);
impl_invariant_set!(I1, I2, I3);
impl_invariant_set!(I1, I2, I3, I4);

/// Every invariant a [`GameState`](super::GameState) must satisfy.
pub type GameStateInvariants = (
    PointerInRange,
    BoardMatchesPointer,
    SinglePlyHistory,
    BalancedMarks,
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::tictactoe::{Board, GameState, HistoryPointer, Player, Position, Square};

    #[test]
    fn test_invariant_set_holds_for_empty_game() {
        assert!(GameStateInvariants::check_all(&GameState::new()).is_ok());
    }

    #[test]
    fn test_invariant_set_holds_after_moves() {
        let mut state = GameState::new();
        for pos in [Position::TopLeft, Position::Center, Position::TopRight] {
            state.apply_move(pos);
        }
        state.jump_to(1).unwrap();
        assert!(GameStateInvariants::check_all(&state).is_ok());
    }

    #[test]
    fn test_invariant_set_reports_every_violation() {
        let mut board = Board::new();
        board.set(Position::TopLeft, Square::Occupied(Player::O));
        // Unbalanced board, pointer past the end, board not in history.
        let state = GameState::from_parts(board, vec![Board::new()], HistoryPointer::at(3));

        let violations = GameStateInvariants::check_all(&state).unwrap_err();
        assert_eq!(violations.len(), 3);
    }

    #[test]
    fn test_two_invariants_as_set() {
        type TwoInvariants = (PointerInRange, BoardMatchesPointer);
        assert!(TwoInvariants::check_all(&GameState::new()).is_ok());
    }
}
