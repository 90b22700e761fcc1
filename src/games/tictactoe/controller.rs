//! The only entry point that mutates a game.
//!
//! Every operation runs to completion in three steps: mutate the
//! [`GameState`], recompute the [`DerivedState`], then write the touched
//! slots to the injected [`SlotStore`]. Store failures are logged and
//! otherwise ignored; the in-memory game is the source of truth.

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, info, instrument, warn};

use super::derived::DerivedState;
use super::history::{GameState, HistoryError, HistoryPointer};
use super::invariants::{BalancedMarks, GameStateInvariants, Invariant, InvariantSet, SinglePlyHistory};
use super::{Board, Position};
use crate::db::{SlotStore, StoreError};

/// Namespace used when none is configured.
pub const DEFAULT_NAMESPACE: &str = "tictactoe";

/// Named slots a game occupies in the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "kebab-case")]
pub enum SlotName {
    /// The displayed board.
    BoardState,
    /// Every snapshot.
    HistoryState,
    /// Index of the displayed snapshot.
    HistoryPointer,
}

impl SlotName {
    /// Every slot, in write order.
    pub const ALL: [SlotName; 3] = [
        SlotName::BoardState,
        SlotName::HistoryState,
        SlotName::HistoryPointer,
    ];

    /// Full store key for this slot under `namespace`.
    pub fn key(self, namespace: &str) -> String {
        format!("{}/{}", namespace, self)
    }
}

/// Applies moves, history jumps and resets, keeping derived state and the
/// store in step with the game.
#[derive(Debug)]
pub struct HistoryController<S> {
    store: S,
    namespace: String,
    state: GameState,
    derived: DerivedState,
}

impl<S: SlotStore> HistoryController<S> {
    /// Loads the game saved under `namespace`, or starts a fresh one.
    ///
    /// Slots that are missing, unreadable or fail validation count as
    /// absent. A pointer past the end of a valid history is clamped to the
    /// last snapshot.
    #[instrument(skip_all)]
    pub fn open(store: S, namespace: impl Into<String>) -> Self {
        let namespace = namespace.into();

        let board = load_slot::<_, Board>(&store, &namespace, SlotName::BoardState)
            .filter(|board| validated::<Board, BalancedMarks>(board, SlotName::BoardState));
        let history = load_slot::<_, Vec<Board>>(&store, &namespace, SlotName::HistoryState)
            .filter(|history| validated::<[Board], SinglePlyHistory>(history, SlotName::HistoryState))
            .unwrap_or_default();
        let pointer = load_slot::<_, HistoryPointer>(&store, &namespace, SlotName::HistoryPointer);

        let state = reconcile(board, history, pointer);
        info!(
            namespace = %namespace,
            snapshots = state.history().len(),
            pointer = %state.pointer(),
            "Game opened"
        );

        let mut controller = Self {
            store,
            namespace,
            state,
            derived: DerivedState::default(),
        };
        controller.refresh();
        controller
    }

    /// Current game state.
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Values derived from the displayed board.
    pub fn derived(&self) -> &DerivedState {
        &self.derived
    }

    /// Namespace this game's slots live under.
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// The backing store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Gives the store back, ending the session.
    pub fn into_store(self) -> S {
        self.store
    }

    /// Places the next mark at board index `index` (0-8).
    ///
    /// Moves on an occupied square, after a win, or off the board are
    /// ignored. Returns whether the game changed.
    #[instrument(skip(self))]
    pub fn apply_move(&mut self, index: usize) -> bool {
        let Some(pos) = Position::from_index(index) else {
            return false;
        };
        if !self.state.apply_move(pos) {
            return false;
        }

        self.refresh();
        debug!(status = %self.derived.status(), "Move applied");
        self.persist(&SlotName::ALL);
        true
    }

    /// Displays snapshot `index`. History is left intact.
    ///
    /// # Errors
    ///
    /// Returns [`HistoryError::OutOfRange`] for a missing snapshot; nothing
    /// changes and nothing is written.
    #[instrument(skip(self))]
    pub fn jump_to(&mut self, index: usize) -> Result<(), HistoryError> {
        self.state.jump_to(index)?;
        self.refresh();
        debug!(status = %self.derived.status(), "Jumped in history");
        self.persist(&[SlotName::BoardState, SlotName::HistoryPointer]);
        Ok(())
    }

    /// Forgets the game and removes its slots from the store.
    #[instrument(skip(self), fields(namespace = %self.namespace))]
    pub fn reset(&mut self) {
        self.state.reset();
        self.refresh();
        for slot in SlotName::ALL {
            let key = slot.key(&self.namespace);
            if let Err(e) = self.store.clear(&key) {
                warn!(key = %key, error = %e, "Failed to clear slot");
            }
        }
        info!("Game reset");
    }

    /// Recomputes derived state from the board.
    fn refresh(&mut self) {
        self.derived = DerivedState::of(self.state.board());
        debug_assert!(
            GameStateInvariants::check_all(&self.state).is_ok(),
            "Game state invariants violated: {:?}",
            GameStateInvariants::check_all(&self.state)
        );
    }

    /// Writes `slots`. Failures are logged, never retried.
    fn persist(&mut self, slots: &[SlotName]) {
        for &slot in slots {
            let key = slot.key(&self.namespace);
            let written = match slot {
                SlotName::BoardState => encode(self.state.board()),
                SlotName::HistoryState => encode(self.state.history()),
                SlotName::HistoryPointer => encode(&self.state.pointer()),
            }
            .and_then(|value| self.store.save(&key, &value));

            if let Err(e) = written {
                warn!(key = %key, error = %e, "Failed to save slot");
            }
        }
    }
}

fn encode<T: Serialize + ?Sized>(value: &T) -> Result<String, StoreError> {
    Ok(serde_json::to_string(value)?)
}

/// Reads and parses one slot; any failure reads as absent.
fn load_slot<S: SlotStore, T: DeserializeOwned>(
    store: &S,
    namespace: &str,
    slot: SlotName,
) -> Option<T> {
    let key = slot.key(namespace);
    let raw = match store.load(&key) {
        Ok(raw) => raw?,
        Err(e) => {
            warn!(key = %key, error = %e, "Slot unreadable, treating as absent");
            return None;
        }
    };
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            warn!(key = %key, error = %e, "Slot malformed, treating as absent");
            None
        }
    }
}

fn validated<T: ?Sized, I: Invariant<T>>(value: &T, slot: SlotName) -> bool {
    let holds = I::holds(value);
    if !holds {
        warn!(slot = %slot, invariant = I::description(), "Slot invalid, treating as absent");
    }
    holds
}

/// Builds a consistent state from whatever slots survived loading.
///
/// History wins over the board slot: with any snapshots present the board is
/// the one under the pointer.
fn reconcile(
    board: Option<Board>,
    history: Vec<Board>,
    pointer: Option<HistoryPointer>,
) -> GameState {
    if history.is_empty() {
        return GameState::from_parts(board.unwrap_or_default(), history, HistoryPointer::UNSET);
    }

    let last = history.len() - 1;
    let index = match pointer.and_then(HistoryPointer::index) {
        Some(index) if index <= last => index,
        other => {
            warn!(stored = ?other, last, "Stored pointer out of range, using last snapshot");
            last
        }
    };
    let current = history[index];
    if board.is_some_and(|b| b != current) {
        warn!(index, "Stored board disagrees with history, using snapshot");
    }
    GameState::from_parts(current, history, HistoryPointer::at(index))
}
