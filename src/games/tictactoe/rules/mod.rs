//! Game rules for tic-tac-toe.
//!
//! This module contains pure functions for evaluating a board according to
//! tic-tac-toe rules. Nothing here is stored: every value is recomputed from
//! the board on demand.

pub mod draw;
pub mod status;
pub mod turn;
pub mod win;

pub use draw::{is_draw, is_full};
pub use status::{Status, format_status};
pub use turn::next_mark;
pub use win::check_winner;
