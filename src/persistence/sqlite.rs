//! A slot stored as a row in a SQLite key-value table.

use std::path::Path;

use rusqlite::{Connection, OptionalExtension};

use crate::{Error, persistence::SlotStorage};

/// Create the table that holds named slots.
///
/// Each slot is one row, so replacing a payload is a single statement and a
/// reader never sees half of a write.
///
/// # Errors
/// Returns an error if there is an SQL error.
fn create_slot_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS slot (
            name TEXT PRIMARY KEY,
            payload TEXT NOT NULL
        )",
        (),
    )?;

    Ok(())
}

/// A named slot in a SQLite database.
#[derive(Debug)]
pub struct SqliteSlot {
    connection: Connection,
    name: String,
}

impl SqliteSlot {
    /// Use the slot `name` in the database behind `connection`, creating the
    /// slot table if needed.
    ///
    /// # Errors
    /// Returns an [Error::SqlError] if the slot table could not be created.
    pub fn new(connection: Connection, name: &str) -> Result<Self, Error> {
        create_slot_table(&connection)?;

        Ok(Self {
            connection,
            name: name.to_owned(),
        })
    }

    /// Open (or create) the database file at `path` and use the slot `name`.
    ///
    /// # Errors
    /// Returns an [Error::SqlError] if the database could not be opened or the
    /// slot table could not be created.
    pub fn open(path: &Path, name: &str) -> Result<Self, Error> {
        let connection = Connection::open(path)?;
        tracing::debug!("Opened slot \"{name}\" in the database at {path:?}.");

        Self::new(connection, name)
    }

    /// The name of the slot.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl SlotStorage for SqliteSlot {
    fn read_slot(&self) -> Result<Option<String>, Error> {
        let payload = self
            .connection
            .query_row(
                "SELECT payload FROM slot WHERE name = ?1",
                [&self.name],
                |row| row.get(0),
            )
            .optional()?;

        Ok(payload)
    }

    fn write_slot(&mut self, payload: &str) -> Result<(), Error> {
        self.connection.execute(
            "INSERT INTO slot (name, payload) VALUES (?1, ?2)
             ON CONFLICT(name) DO UPDATE SET payload = excluded.payload",
            (&self.name, payload),
        )?;

        Ok(())
    }
}
