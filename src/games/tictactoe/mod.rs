mod controller;
mod derived;
mod history;
mod invariants;
mod position;
mod rules;
mod types;

pub use controller::{DEFAULT_NAMESPACE, HistoryController, SlotName};
pub use derived::{DerivedState, Phase};
pub use history::{GameState, HistoryError, HistoryPointer};
pub use invariants::{
    BalancedMarks, BoardMatchesPointer, GameStateInvariants, Invariant, InvariantSet,
    InvariantViolation, PointerInRange, SinglePlyHistory,
};
pub use position::Position;
pub use rules::{Status, check_winner, format_status, is_draw, is_full, next_mark};
pub use types::{Board, Player, Square};
