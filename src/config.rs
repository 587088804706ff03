//! Where transactions are stored.

use std::path::PathBuf;

use crate::{
    Error,
    persistence::{DEFAULT_SLOT_NAME, JsonFileSlot, MemorySlot, Persistence, SlotStorage, SqliteSlot},
    store::TransactionStore,
};

/// The kind of storage that holds the transaction slot.
#[derive(Debug, Clone, PartialEq)]
pub enum StorageBackend {
    /// A table of named slots in the SQLite database at this path.
    Sqlite(PathBuf),
    /// One JSON file per slot in this directory.
    JsonDir(PathBuf),
    /// Nothing is kept once the program exits.
    Memory,
}

/// The application configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Where the slot lives.
    pub backend: StorageBackend,
    /// The name of the slot holding the transactions.
    pub slot_name: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend: StorageBackend::Memory,
            slot_name: DEFAULT_SLOT_NAME.to_owned(),
        }
    }
}

impl Config {
    /// Use `backend` with the default slot name.
    pub fn new(backend: StorageBackend) -> Self {
        Self {
            backend,
            ..Default::default()
        }
    }

    /// Open the configured slot.
    ///
    /// # Errors
    /// Returns an [Error::SqlError] if the SQLite database could not be opened.
    pub fn open_storage(&self) -> Result<Box<dyn SlotStorage>, Error> {
        let storage: Box<dyn SlotStorage> = match &self.backend {
            StorageBackend::Sqlite(path) => Box::new(SqliteSlot::open(path, &self.slot_name)?),
            StorageBackend::JsonDir(dir) => Box::new(JsonFileSlot::new(dir, &self.slot_name)),
            StorageBackend::Memory => Box::new(MemorySlot::new()),
        };

        tracing::debug!("Using {:?} for slot \"{}\".", self.backend, self.slot_name);

        Ok(storage)
    }

    /// Open the configured slot and hydrate a store from it.
    ///
    /// # Errors
    /// Returns an [Error::SqlError] if the SQLite database could not be opened.
    pub fn open_store(&self) -> Result<TransactionStore<Box<dyn SlotStorage>>, Error> {
        Ok(TransactionStore::new(Persistence::new(self.open_storage()?)))
    }
}
