//! Database models for persisted slots.

use derive_getters::Getters;
use derive_new::new;
use diesel::prelude::*;

use crate::db::schema;

/// One stored key/value slot.
#[derive(Debug, Clone, Queryable, Selectable, Getters)]
#[diesel(table_name = schema::slots)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Slot {
    key: String,
    value: String,
}

/// Insertable slot, used for upserts.
#[derive(Debug, Clone, Insertable, new)]
#[diesel(table_name = schema::slots)]
pub struct NewSlot<'a> {
    key: &'a str,
    value: &'a str,
}
