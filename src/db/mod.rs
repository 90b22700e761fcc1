//! Persistence layer: the slot store contract and its backends.

mod error;
mod models;
mod repository;
mod schema; // Diesel generated schema - internal use only
mod store;

pub use error::{SlotOp, StoreError};
pub use models::{NewSlot, Slot};
pub use repository::{MIGRATIONS, SqliteStore};
pub use store::{MemoryStore, SlotStore};
