//! The in-memory source of truth for transactions.
//!
//! The store is hydrated from [Persistence] when it is created and writes the
//! full collection back after every change, before the change is visible to
//! anyone else.

use std::{collections::HashSet, fmt::Display};

use serde::{Deserialize, Serialize};

use crate::{
    Error,
    persistence::{Persistence, SlotStorage, StoredTransaction},
    transaction::Transaction,
};

/// A stable identifier for a stored transaction.
///
/// IDs are assigned by the store in insertion order and saved alongside each
/// transaction, so the same ID names the same transaction across reloads.
/// Stored transactions without an ID are numbered after the highest stored
/// ID when the store is hydrated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TransactionId(u64);

impl TransactionId {
    /// Wrap a raw ID, e.g. one typed in by the user.
    pub fn new(id: u64) -> Self {
        Self(id)
    }
}

impl Display for TransactionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(&self.0.to_string())
    }
}

/// A transaction together with its ID.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionEntry {
    /// The ID of `transaction`.
    pub id: TransactionId,
    /// The stored transaction.
    pub transaction: Transaction,
}

/// The change that a listener is being told about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreEvent {
    /// A transaction with this ID was appended.
    Added(TransactionId),
    /// The transaction with this ID was replaced.
    Updated(TransactionId),
    /// The transaction with this ID was deleted.
    Removed(TransactionId),
}

type Listener = Box<dyn FnMut(&StoreEvent, &[TransactionEntry])>;

/// Owns the ordered list of transactions.
pub struct TransactionStore<S> {
    entries: Vec<TransactionEntry>,
    next_id: u64,
    persistence: Persistence<S>,
    listeners: Vec<Listener>,
}

impl<S: SlotStorage> TransactionStore<S> {
    /// Create a store holding whatever `persistence` has stored.
    pub fn new(persistence: Persistence<S>) -> Self {
        let entries = assign_ids(persistence.load());
        let next_id = entries
            .iter()
            .map(|entry| entry.id.0)
            .max()
            .unwrap_or(0)
            + 1;

        tracing::debug!("Hydrated transaction store with {} entries.", entries.len());

        Self {
            entries,
            next_id,
            persistence,
            listeners: Vec::new(),
        }
    }

    /// Append `transaction` to the end of the list.
    ///
    /// # Errors
    /// Returns the persistence error if the new list could not be saved, in
    /// which case the store is unchanged.
    pub fn add(&mut self, transaction: Transaction) -> Result<TransactionId, Error> {
        let id = TransactionId(self.next_id);

        let mut entries = self.entries.clone();
        entries.push(TransactionEntry { id, transaction });
        self.commit(entries, StoreEvent::Added(id))?;
        self.next_id += 1;

        Ok(id)
    }

    /// Replace the transaction with the ID `id`, keeping its position.
    ///
    /// # Errors
    /// Returns an [Error::TransactionNotFound] if no transaction has the ID
    /// `id`, or the persistence error if the new list could not be saved. The
    /// store is unchanged in both cases.
    pub fn update(&mut self, id: TransactionId, transaction: Transaction) -> Result<(), Error> {
        let index = self.position_or_warn(id)?;
        self.replace(index, transaction)
    }

    /// Replace the transaction at `index`, keeping its ID.
    ///
    /// # Errors
    /// Returns an [Error::IndexOutOfRange] if `index` is not a position in the
    /// list, or the persistence error if the new list could not be saved. The
    /// store is unchanged in both cases.
    pub fn update_at(&mut self, index: usize, transaction: Transaction) -> Result<(), Error> {
        self.check_index(index)?;
        self.replace(index, transaction)
    }

    /// Delete the transaction with the ID `id`.
    ///
    /// Any confirmation must happen before calling this, the store deletes
    /// unconditionally.
    ///
    /// # Errors
    /// Returns an [Error::TransactionNotFound] if no transaction has the ID
    /// `id`, or the persistence error if the new list could not be saved. The
    /// store is unchanged in both cases.
    pub fn remove(&mut self, id: TransactionId) -> Result<Transaction, Error> {
        let index = self.position_or_warn(id)?;
        self.delete(index)
    }

    /// Delete the transaction at `index`. Later transactions move down by one.
    ///
    /// # Errors
    /// Returns an [Error::IndexOutOfRange] if `index` is not a position in the
    /// list, or the persistence error if the new list could not be saved. The
    /// store is unchanged in both cases.
    pub fn remove_at(&mut self, index: usize) -> Result<Transaction, Error> {
        self.check_index(index)?;
        self.delete(index)
    }

    /// Call `listener` after every successful change.
    pub fn subscribe<F>(&mut self, listener: F)
    where
        F: FnMut(&StoreEvent, &[TransactionEntry]) + 'static,
    {
        self.listeners.push(Box::new(listener));
    }

    /// The transaction with the ID `id`, if there is one.
    pub fn get(&self, id: TransactionId) -> Option<&Transaction> {
        self.entries
            .iter()
            .find(|entry| entry.id == id)
            .map(|entry| &entry.transaction)
    }

    /// The current position of the transaction with the ID `id`.
    pub fn position(&self, id: TransactionId) -> Option<usize> {
        self.entries.iter().position(|entry| entry.id == id)
    }

    /// All transactions with their IDs, in insertion order.
    pub fn entries(&self) -> &[TransactionEntry] {
        &self.entries
    }

    /// All transactions in insertion order.
    pub fn transactions(&self) -> impl Iterator<Item = &Transaction> {
        self.entries.iter().map(|entry| &entry.transaction)
    }

    /// The number of transactions.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether there are no transactions.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Where the transactions are saved.
    pub fn persistence(&self) -> &Persistence<S> {
        &self.persistence
    }

    fn replace(&mut self, index: usize, transaction: Transaction) -> Result<(), Error> {
        let mut entries = self.entries.clone();
        let id = entries[index].id;
        entries[index].transaction = transaction;

        self.commit(entries, StoreEvent::Updated(id))
    }

    fn delete(&mut self, index: usize) -> Result<Transaction, Error> {
        let mut entries = self.entries.clone();
        let removed = entries.remove(index);

        self.commit(entries, StoreEvent::Removed(removed.id))?;

        Ok(removed.transaction)
    }

    /// Save `entries`, then make them the current list and notify listeners.
    fn commit(&mut self, entries: Vec<TransactionEntry>, event: StoreEvent) -> Result<(), Error> {
        if let Err(error) = self.persistence.save(&entries) {
            tracing::error!("Could not save transactions, discarding {event:?}: {error}");
            return Err(error);
        }

        self.entries = entries;

        for listener in &mut self.listeners {
            listener(&event, &self.entries);
        }

        Ok(())
    }

    fn position_or_warn(&self, id: TransactionId) -> Result<usize, Error> {
        self.position(id).ok_or_else(|| {
            tracing::warn!("Ignoring change to transaction {id}, which does not exist.");
            Error::TransactionNotFound(id)
        })
    }

    fn check_index(&self, index: usize) -> Result<(), Error> {
        let len = self.entries.len();

        if index < len {
            Ok(())
        } else {
            tracing::warn!("Ignoring change to position {index}, there are {len} transactions.");
            Err(Error::IndexOutOfRange { index, len })
        }
    }
}

/// Give every stored transaction an ID, keeping the stored ones.
///
/// Missing and repeated IDs get fresh ones above the highest stored ID, in
/// stored order.
fn assign_ids(stored: Vec<StoredTransaction>) -> Vec<TransactionEntry> {
    let mut next_id = stored
        .iter()
        .filter_map(|stored| stored.id)
        .map(|id| id.0)
        .max()
        .unwrap_or(0)
        + 1;
    let mut seen = HashSet::new();

    stored
        .into_iter()
        .map(|StoredTransaction { id, transaction }| {
            let id = match id {
                Some(id) if seen.insert(id) => id,
                id => {
                    if let Some(id) = id {
                        tracing::warn!("Stored transaction ID {id} is repeated, giving it a new ID.");
                    }

                    let fresh = TransactionId(next_id);
                    next_id += 1;
                    seen.insert(fresh);
                    fresh
                }
            };

            TransactionEntry { id, transaction }
        })
        .collect()
}
