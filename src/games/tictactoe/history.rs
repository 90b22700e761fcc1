//! Board snapshots with a movable pointer ("time travel").
//!
//! History stores whole boards rather than moves. Index 0 is the board the
//! session started from; every later entry is one ply further. Navigating
//! back never destroys anything, but a new move from an earlier snapshot
//! discards the snapshots that came after it.

use super::rules::{check_winner, next_mark};
use super::{Board, Position, Square};
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Errors raised by history navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum HistoryError {
    /// `jump_to` was asked for a snapshot that does not exist.
    #[display("history index {index} is out of range (history has {len} snapshots)")]
    OutOfRange {
        /// Requested snapshot index.
        index: usize,
        /// Number of snapshots available.
        len: usize,
    },
    /// A stored pointer below the `-1` sentinel.
    #[display("history pointer {value} is invalid")]
    InvalidPointer {
        /// Raw stored value.
        value: i64,
    },
}

/// Index of the displayed snapshot.
///
/// `None` means "before the first move" and is only valid while history is
/// empty. It is stored as `-1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(into = "i64", try_from = "i64")]
pub struct HistoryPointer(Option<usize>);

impl HistoryPointer {
    /// The pre-first-move sentinel.
    pub const UNSET: Self = Self(None);

    /// Pointer at snapshot `index`.
    pub fn at(index: usize) -> Self {
        Self(Some(index))
    }

    /// Snapshot index, if set.
    pub fn index(self) -> Option<usize> {
        self.0
    }

    /// True for the sentinel.
    pub fn is_unset(self) -> bool {
        self.0.is_none()
    }
}

impl From<HistoryPointer> for i64 {
    fn from(pointer: HistoryPointer) -> Self {
        pointer.0.map_or(-1, |index| index as i64)
    }
}

impl TryFrom<i64> for HistoryPointer {
    type Error = HistoryError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            -1 => Ok(Self::UNSET),
            v if v >= 0 => Ok(Self::at(v as usize)),
            _ => Err(HistoryError::InvalidPointer { value }),
        }
    }
}

impl std::fmt::Display for HistoryPointer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", i64::from(*self))
    }
}

/// Board, snapshot history and pointer.
///
/// `board` always equals `history[pointer]` while the pointer is set.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GameState {
    board: Board,
    history: Vec<Board>,
    pointer: HistoryPointer,
}

impl GameState {
    /// Fresh game: empty board, no history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a state from already-reconciled parts.
    pub(crate) fn from_parts(board: Board, history: Vec<Board>, pointer: HistoryPointer) -> Self {
        Self {
            board,
            history,
            pointer,
        }
    }

    /// The displayed board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// All snapshots, oldest first.
    pub fn history(&self) -> &[Board] {
        &self.history
    }

    /// The displayed snapshot index.
    pub fn pointer(&self) -> HistoryPointer {
        self.pointer
    }

    /// Places the next mark at `pos`.
    ///
    /// Returns `false` without touching anything when the game already has a
    /// winner or the square is taken. Otherwise the history is cut back to
    /// the displayed snapshot and the new board is appended.
    #[instrument(skip(self), fields(pointer = %self.pointer, len = self.history.len()))]
    pub fn apply_move(&mut self, pos: Position) -> bool {
        if check_winner(&self.board).is_some() || !self.board.is_empty(pos) {
            return false;
        }

        let mut next = self.board;
        next.set(pos, Square::Occupied(next_mark(&self.board)));

        // First ply of a session: record where we started from.
        if self.history.is_empty() {
            self.history.push(self.board);
            self.pointer = HistoryPointer::at(0);
        }

        let at = self.pointer.index().unwrap_or(0);
        if self.history.get(at) != Some(&next) {
            let discarded = self.history.len().saturating_sub(at + 1);
            if discarded > 0 {
                debug!(discarded, "Dropping snapshots after the displayed one");
            }
            self.history.truncate(at + 1);
            self.history.push(next);
            self.pointer = HistoryPointer::at(at + 1);
        }
        self.board = next;
        true
    }

    /// Displays snapshot `index` without altering history.
    ///
    /// # Errors
    ///
    /// Returns [`HistoryError::OutOfRange`] when no such snapshot exists;
    /// the state is left untouched.
    #[instrument(skip(self), fields(len = self.history.len()))]
    pub fn jump_to(&mut self, index: usize) -> Result<(), HistoryError> {
        let board = *self.history.get(index).ok_or(HistoryError::OutOfRange {
            index,
            len: self.history.len(),
        })?;
        self.board = board;
        self.pointer = HistoryPointer::at(index);
        Ok(())
    }

    /// Forgets everything: empty board, empty history, unset pointer.
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::tictactoe::Player;

    fn play(state: &mut GameState, moves: &[usize]) {
        for &m in moves {
            let pos = Position::from_index(m).unwrap();
            assert!(state.apply_move(pos), "move {} rejected", m);
        }
    }

    #[test]
    fn test_first_move_records_starting_board() {
        let mut state = GameState::new();
        assert!(state.pointer().is_unset());

        play(&mut state, &[4]);
        assert_eq!(state.history().len(), 2);
        assert_eq!(state.history()[0], Board::new());
        assert_eq!(state.pointer(), HistoryPointer::at(1));
        assert_eq!(state.board().get(Position::Center), Square::Occupied(Player::X));
    }

    #[test]
    fn test_occupied_square_is_ignored() {
        let mut state = GameState::new();
        play(&mut state, &[4]);
        let before = state.clone();
        assert!(!state.apply_move(Position::Center));
        assert_eq!(state, before);
    }

    #[test]
    fn test_move_after_win_is_ignored() {
        let mut state = GameState::new();
        play(&mut state, &[0, 3, 1, 4, 2]);
        let before = state.clone();
        assert!(!state.apply_move(Position::BottomRight));
        assert_eq!(state, before);
    }

    #[test]
    fn test_jump_keeps_history() {
        let mut state = GameState::new();
        play(&mut state, &[0, 4, 8]);
        state.jump_to(1).unwrap();
        assert_eq!(state.history().len(), 4);
        assert_eq!(state.pointer(), HistoryPointer::at(1));
        assert_eq!(state.board(), &state.history()[1]);
    }

    #[test]
    fn test_jump_out_of_range_rejected() {
        let mut state = GameState::new();
        assert_eq!(
            state.jump_to(0),
            Err(HistoryError::OutOfRange { index: 0, len: 0 })
        );

        play(&mut state, &[0]);
        let before = state.clone();
        assert!(state.jump_to(2).is_err());
        assert_eq!(state, before);
    }

    #[test]
    fn test_branch_truncates_future() {
        let mut state = GameState::new();
        play(&mut state, &[0, 1, 2, 3]);
        assert_eq!(state.history().len(), 5);

        state.jump_to(1).unwrap();
        play(&mut state, &[8]);
        assert_eq!(state.history().len(), 3);
        assert_eq!(state.pointer(), HistoryPointer::at(2));
        assert_eq!(state.board().get(Position::BottomRight), Square::Occupied(Player::O));
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut state = GameState::new();
        play(&mut state, &[0, 1]);
        state.reset();
        assert_eq!(state, GameState::new());
    }

    #[test]
    fn test_pointer_wire_format() {
        assert_eq!(serde_json::to_string(&HistoryPointer::UNSET).unwrap(), "-1");
        assert_eq!(serde_json::to_string(&HistoryPointer::at(3)).unwrap(), "3");
        let p: HistoryPointer = serde_json::from_str("2").unwrap();
        assert_eq!(p.index(), Some(2));
        assert!(serde_json::from_str::<HistoryPointer>("-5").is_err());
    }
}
