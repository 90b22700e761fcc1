//! SQLite-backed slot store.

use diesel::prelude::*;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::{debug, info, instrument};

use crate::db::{NewSlot, Slot, SlotOp, SlotStore, StoreError, schema};

/// Schema migrations, applied on open.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Slot store persisted in a SQLite file.
///
/// Each call opens its own connection, so the store holds no handle between
/// operations.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    db_path: String,
}

impl SqliteStore {
    /// Opens (creating if needed) the database at `db_path` and applies
    /// pending migrations.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the database cannot be opened or migrated.
    #[instrument(skip(db_path), fields(db_path = %db_path))]
    pub fn open(db_path: String) -> Result<Self, StoreError> {
        info!(path = %db_path, "Opening SqliteStore");
        let store = Self { db_path };
        let mut conn = store.connection()?;
        let applied = conn
            .run_pending_migrations(MIGRATIONS)
            .map_err(|e| StoreError::new(format!("Migrations failed: {}", e)))?;
        debug!(count = applied.len(), "Migrations applied");
        Ok(store)
    }

    /// Establishes a database connection.
    #[instrument(skip(self))]
    fn connection(&self) -> Result<SqliteConnection, StoreError> {
        debug!(path = %self.db_path, "Establishing connection");
        SqliteConnection::establish(&self.db_path)
            .map_err(|e| StoreError::new(format!("Failed to connect to '{}': {}", self.db_path, e)))
    }

    /// Lists every stored slot, ordered by key.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if a database error occurs.
    #[instrument(skip(self))]
    pub fn list(&self) -> Result<Vec<Slot>, StoreError> {
        let mut conn = self.connection()?;
        let slots = schema::slots::table
            .order(schema::slots::key.asc())
            .select(Slot::as_select())
            .load(&mut conn)?;
        debug!(count = slots.len(), "Slots listed");
        Ok(slots)
    }
}

impl SlotStore for SqliteStore {
    #[instrument(skip(self))]
    fn load(&self, key: &str) -> Result<Option<String>, StoreError> {
        let mut conn = self.connection()?;
        let value = schema::slots::table
            .filter(schema::slots::key.eq(key))
            .select(schema::slots::value)
            .first::<String>(&mut conn)
            .optional()
            .map_err(|e| StoreError::slot(SlotOp::Load, key, e))?;

        debug!(found = value.is_some(), "Slot loaded");
        Ok(value)
    }

    #[instrument(skip(self, value))]
    fn save(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut conn = self.connection()?;
        diesel::replace_into(schema::slots::table)
            .values(&NewSlot::new(key, value))
            .execute(&mut conn)
            .map_err(|e| StoreError::slot(SlotOp::Save, key, e))?;

        debug!(bytes = value.len(), "Slot saved");
        Ok(())
    }

    #[instrument(skip(self))]
    fn clear(&mut self, key: &str) -> Result<(), StoreError> {
        let mut conn = self.connection()?;
        let removed = diesel::delete(schema::slots::table.filter(schema::slots::key.eq(key)))
            .execute(&mut conn)
            .map_err(|e| StoreError::slot(SlotOp::Clear, key, e))?;

        debug!(removed, "Slot cleared");
        Ok(())
    }
}
