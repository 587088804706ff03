//! Transactions and everything needed to admit and find them.
//!
//! This module contains:
//! - The `Transaction` model and the invariants it enforces
//! - Validation of raw form input into transactions
//! - Filtering transactions by type and description

mod core;
mod form;
mod query;

pub use core::{Transaction, TransactionType, ValidationError, parse_iso_date};
pub use form::{
    AMOUNT_NOT_A_NUMBER, AMOUNT_NOT_POSITIVE, AMOUNT_REQUIRED, DATE_INVALID, DATE_REQUIRED,
    DESCRIPTION_REQUIRED, FormErrors, TYPE_INVALID, TransactionForm,
};
pub use query::{TransactionQuery, TypeFilter, UnknownTypeFilter, filter_transactions};
