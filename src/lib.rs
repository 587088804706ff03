//! Cashbook is a personal finance tracker for recording income and expenses.
//!
//! This library holds the transaction store and everything derived from it:
//! - [TransactionStore]: the ordered list of transactions, saved after every change
//! - [Persistence]: loads and saves the list to a named storage slot
//! - [filter_transactions]: the type filter and description search
//! - [summarise] and [chart_series]: totals and chart data for the dashboard

#![warn(missing_docs)]

pub mod commands;
pub mod config;
pub mod dashboard;
mod html;
pub mod logging;
pub mod persistence;
pub mod store;
pub mod transaction;

pub use config::{Config, StorageBackend};
pub use dashboard::{
    ChartMode, ChartSeries, DashboardView, Summary, chart_series, render_dashboard, summarise,
};
pub use html::format_currency;
pub use persistence::{
    DEFAULT_SLOT_NAME, JsonFileSlot, MemorySlot, Persistence, SlotStorage, SqliteSlot,
    StoredTransaction,
};
pub use store::{StoreEvent, TransactionEntry, TransactionId, TransactionStore};
pub use transaction::{
    FormErrors, Transaction, TransactionForm, TransactionQuery, TransactionType, TypeFilter,
    ValidationError, filter_transactions,
};

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// A transaction broke one of the transaction invariants.
    #[error("invalid transaction: {0}")]
    InvalidTransaction(#[from] ValidationError),

    /// The user's input did not pass validation.
    ///
    /// Each field has its own message so it can be shown next to the field.
    #[error("invalid input: {0}")]
    InvalidForm(FormErrors),

    /// No transaction has the given ID, for example because it was deleted.
    #[error("could not find a transaction with the ID {0}")]
    TransactionNotFound(TransactionId),

    /// A position-based change referred to a position past the end of the list.
    #[error("position {index} is out of range for {len} transactions")]
    IndexOutOfRange {
        /// The requested position.
        index: usize,
        /// The number of transactions at the time of the request.
        len: usize,
    },

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// The transaction file or its directory could not be read or written.
    ///
    /// Callers should pass in the original error as a string.
    #[error("could not access the transaction file: {0}")]
    FileError(String),

    /// The transactions could not be converted to or from JSON.
    #[error("could not serialize transactions: {0}")]
    SerializationError(String),

    /// The rendered dashboard could not be written.
    #[error("could not write the dashboard to {0}: {1}")]
    ReportError(String, String),
}

impl From<rusqlite::Error> for Error {
    fn from(error: rusqlite::Error) -> Self {
        tracing::error!("an unhandled SQL error occurred: {}", error);
        Error::SqlError(error)
    }
}

impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Error::FileError(error.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Error::SerializationError(error.to_string())
    }
}

impl From<FormErrors> for Error {
    fn from(errors: FormErrors) -> Self {
        Error::InvalidForm(errors)
    }
}
