//! Mirrors the transaction collection to a durable, named storage slot.
//!
//! The slot holds a JSON array of transactions:
//!
//! ```json
//! [{"id": 1, "type": "income", "description": "Salary", "amount": 1000, "date": "2024-01-01"}]
//! ```
//!
//! [Persistence] owns that layout, while a [SlotStorage] implementation only
//! knows how to read and overwrite a string. The collection is written in full
//! after every change and there is no schema version. The `id` field may be
//! missing, as it is in payloads written before IDs were stored.

mod json_file;
mod memory;
mod sqlite;

pub use json_file::JsonFileSlot;
pub use memory::MemorySlot;
pub use sqlite::SqliteSlot;

use serde::{Deserialize, Serialize};

use crate::{
    Error,
    store::{TransactionEntry, TransactionId},
    transaction::Transaction,
};

/// The slot name used when none is configured.
pub const DEFAULT_SLOT_NAME: &str = "transactions";

/// A single named slot that can hold one string payload.
pub trait SlotStorage {
    /// Read the payload, or `None` if nothing has been written yet.
    ///
    /// # Errors
    /// Returns an error if the underlying storage could not be read.
    fn read_slot(&self) -> Result<Option<String>, Error>;

    /// Replace the payload.
    ///
    /// Implementers must not leave a partially written payload behind.
    ///
    /// # Errors
    /// Returns an error if the underlying storage could not be written.
    fn write_slot(&mut self, payload: &str) -> Result<(), Error>;
}

impl SlotStorage for Box<dyn SlotStorage> {
    fn read_slot(&self) -> Result<Option<String>, Error> {
        (**self).read_slot()
    }

    fn write_slot(&mut self, payload: &str) -> Result<(), Error> {
        (**self).write_slot(payload)
    }
}

/// A transaction as read back from the slot.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StoredTransaction {
    /// The ID the transaction was saved with, if any.
    #[serde(default)]
    pub id: Option<TransactionId>,
    /// The stored transaction.
    #[serde(flatten)]
    pub transaction: Transaction,
}

#[derive(Serialize)]
struct StoredTransactionRef<'a> {
    id: TransactionId,
    #[serde(flatten)]
    transaction: &'a Transaction,
}

/// Loads and saves the transaction collection.
#[derive(Debug)]
pub struct Persistence<S> {
    storage: S,
}

impl<S: SlotStorage> Persistence<S> {
    /// Persist to `storage`.
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Read the stored transactions in stored order.
    ///
    /// An empty slot gives an empty list. So does a slot that cannot be read
    /// or whose payload is not a list of valid transactions: the problem is
    /// logged and the stored payload is left untouched until the next save.
    pub fn load(&self) -> Vec<StoredTransaction> {
        let payload = match self.storage.read_slot() {
            Ok(Some(payload)) => payload,
            Ok(None) => {
                tracing::debug!("No stored transactions, starting with an empty list.");
                return Vec::new();
            }
            Err(error) => {
                tracing::warn!("Could not read stored transactions, starting empty: {error}");
                return Vec::new();
            }
        };

        match serde_json::from_str::<Vec<StoredTransaction>>(&payload) {
            Ok(transactions) => {
                tracing::debug!("Loaded {} stored transactions.", transactions.len());
                transactions
            }
            Err(error) => {
                tracing::warn!("Stored transactions are malformed, starting empty: {error}");
                Vec::new()
            }
        }
    }

    /// Overwrite the slot with `entries`, IDs included.
    ///
    /// # Errors
    /// Returns an [Error::SerializationError] if the transactions could not be
    /// encoded, or the storage error if the slot could not be written.
    pub fn save(&mut self, entries: &[TransactionEntry]) -> Result<(), Error> {
        let records: Vec<StoredTransactionRef> = entries
            .iter()
            .map(|entry| StoredTransactionRef {
                id: entry.id,
                transaction: &entry.transaction,
            })
            .collect();
        let payload = serde_json::to_string(&records)?;

        self.storage.write_slot(&payload)?;
        tracing::debug!("Saved {} transactions.", records.len());

        Ok(())
    }

    /// The slot behind this persistence.
    pub fn storage(&self) -> &S {
        &self.storage
    }
}
