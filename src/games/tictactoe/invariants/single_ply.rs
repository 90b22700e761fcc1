//! Single-ply history invariant: each snapshot is one move after the last.

use super::super::{Board, GameState, Position, Square};
use super::{BalancedMarks, Invariant};

/// Invariant: consecutive snapshots differ in exactly one square, which was
/// empty before, and every snapshot has balanced marks.
pub struct SinglePlyHistory;

impl SinglePlyHistory {
    /// True when `after` is `before` plus one newly placed mark.
    pub fn is_single_ply(before: &Board, after: &Board) -> bool {
        let mut changed = Position::ALL
            .iter()
            .filter(|pos| before.get(**pos) != after.get(**pos));
        match (changed.next(), changed.next()) {
            (Some(pos), None) => before.get(*pos) == Square::Empty,
            _ => false,
        }
    }
}

impl Invariant<[Board]> for SinglePlyHistory {
    fn holds(history: &[Board]) -> bool {
        history
            .iter()
            .all(<BalancedMarks as Invariant<Board>>::holds)
            && history
                .windows(2)
                .all(|pair| Self::is_single_ply(&pair[0], &pair[1]))
    }

    fn description() -> &'static str {
        "Each snapshot adds exactly one mark to an empty square"
    }
}

impl Invariant<GameState> for SinglePlyHistory {
    fn holds(state: &GameState) -> bool {
        <Self as Invariant<[Board]>>::holds(state.history())
    }

    fn description() -> &'static str {
        <Self as Invariant<[Board]>>::description()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::tictactoe::Player;

    fn with(board: &Board, pos: Position, player: Player) -> Board {
        let mut next = *board;
        next.set(pos, Square::Occupied(player));
        next
    }

    #[test]
    fn test_empty_history_holds() {
        assert!(<SinglePlyHistory as Invariant<[Board]>>::holds(&[]));
    }

    #[test]
    fn test_played_history_holds() {
        let b0 = Board::new();
        let b1 = with(&b0, Position::Center, Player::X);
        let b2 = with(&b1, Position::TopLeft, Player::O);
        assert!(<SinglePlyHistory as Invariant<[Board]>>::holds(&[b0, b1, b2]));
    }

    #[test]
    fn test_skipped_ply_violates() {
        let b0 = Board::new();
        let b1 = with(&b0, Position::Center, Player::X);
        let b2 = with(&b1, Position::TopLeft, Player::O);
        assert!(!<SinglePlyHistory as Invariant<[Board]>>::holds(&[b0, b2]));
    }

    #[test]
    fn test_overwrite_violates() {
        let b0 = with(&Board::new(), Position::Center, Player::X);
        let b1 = with(&Board::new(), Position::Center, Player::O);
        assert!(!SinglePlyHistory::is_single_ply(&b0, &b1));
    }

    #[test]
    fn test_repeated_snapshot_violates() {
        let b0 = Board::new();
        assert!(!<SinglePlyHistory as Invariant<[Board]>>::holds(&[b0, b0]));
    }

    #[test]
    fn test_wrong_mark_violates() {
        let b0 = Board::new();
        let b1 = with(&b0, Position::Center, Player::O);
        assert!(!<SinglePlyHistory as Invariant<[Board]>>::holds(&[b0, b1]));
    }
}
