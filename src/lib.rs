//! Strictly Timetravel - tic-tac-toe with a rewindable history
//!
//! A small game engine: rules are pure functions of the board, the game
//! keeps every board snapshot so play can jump back, and a new move from an
//! earlier snapshot discards the snapshots that followed it. State is saved
//! to a key/value slot store after every change and reloaded on open.
//!
//! # Architecture
//!
//! - **Rules**: winner, next mark and status line, derived from the board
//! - **History**: board snapshots with a pointer and branch truncation
//! - **Controller**: the single mutation entry point, wired to a store
//! - **Store**: slot persistence (in-memory or SQLite)
//!
//! # Example
//!
//! ```
//! use strictly_timetravel::{HistoryController, MemoryStore, DEFAULT_NAMESPACE};
//!
//! let mut game = HistoryController::open(MemoryStore::new(), DEFAULT_NAMESPACE);
//! game.apply_move(4);
//! assert_eq!(game.derived().status(), "Next player: O");
//!
//! game.jump_to(0).unwrap();
//! assert_eq!(game.derived().status(), "Next player: X");
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod config;
mod db;
mod games;

// Crate-level exports - Configuration
pub use config::{Backend, ConfigError, EngineConfig};

// Crate-level exports - Persistence
pub use db::{
    MIGRATIONS, MemoryStore, NewSlot, Slot, SlotOp, SlotStore, SqliteStore, StoreError,
};

// Crate-level exports - Game types (tic-tac-toe)
pub use games::tictactoe::{
    BalancedMarks, Board, BoardMatchesPointer, DEFAULT_NAMESPACE, DerivedState, GameState,
    GameStateInvariants, HistoryController, HistoryError, HistoryPointer, Invariant,
    InvariantSet, InvariantViolation, Phase, Player, PointerInRange, Position, SinglePlyHistory,
    SlotName, Square, Status, check_winner, format_status, is_draw, is_full, next_mark,
};
