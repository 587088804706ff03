//! Filtering the transaction list by type and description.

use std::{fmt::Display, str::FromStr};

use crate::{
    store::TransactionEntry,
    transaction::core::{Transaction, TransactionType},
};

/// Which transaction types to keep.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TypeFilter {
    /// Keep everything.
    #[default]
    All,
    /// Keep income only.
    Income,
    /// Keep expenses only.
    Expense,
}

impl TypeFilter {
    /// Whether a transaction of type `transaction_type` passes the filter.
    pub fn matches(self, transaction_type: TransactionType) -> bool {
        match self {
            TypeFilter::All => true,
            TypeFilter::Income => transaction_type == TransactionType::Income,
            TypeFilter::Expense => transaction_type == TransactionType::Expense,
        }
    }

    /// The lowercase name accepted by [TypeFilter::from_str].
    pub fn as_str(&self) -> &'static str {
        match self {
            TypeFilter::All => "all",
            TypeFilter::Income => "income",
            TypeFilter::Expense => "expense",
        }
    }
}

impl Display for TypeFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

/// The text given to [TypeFilter::from_str] was not a known filter.
#[derive(Debug, Clone, thiserror::Error, PartialEq)]
#[error("unknown transaction filter \"{0}\", expected all, income or expense")]
pub struct UnknownTypeFilter(pub String);

impl FromStr for TypeFilter {
    type Err = UnknownTypeFilter;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(TypeFilter::All),
            "income" => Ok(TypeFilter::Income),
            "expense" => Ok(TypeFilter::Expense),
            _ => Err(UnknownTypeFilter(s.to_owned())),
        }
    }
}

/// Defines which transactions are shown in the transaction list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionQuery {
    /// Keep transactions of this type.
    pub type_filter: TypeFilter,
    /// Keep transactions whose description contains this text, ignoring case.
    /// An empty string matches every description.
    pub search: String,
}

impl TransactionQuery {
    /// Create a query from a filter and search text.
    pub fn new(type_filter: TypeFilter, search: &str) -> Self {
        Self {
            type_filter,
            search: search.to_owned(),
        }
    }

    /// Whether `transaction` passes both the type filter and the search.
    pub fn matches(&self, transaction: &Transaction) -> bool {
        self.type_filter.matches(transaction.transaction_type())
            && contains_ignoring_case(transaction.description(), &self.search.to_lowercase())
    }

    /// Apply the query to `entries`, keeping their order.
    pub fn apply<'a>(&self, entries: &'a [TransactionEntry]) -> Vec<&'a TransactionEntry> {
        filter_transactions(entries, self.type_filter, &self.search)
    }
}

/// Keep the entries that match `type_filter` and whose description contains
/// `search` case-insensitively.
///
/// The result keeps the insertion order of `entries` and each entry keeps its
/// ID, so an edit or delete from a filtered list targets the right transaction.
pub fn filter_transactions<'a>(
    entries: &'a [TransactionEntry],
    type_filter: TypeFilter,
    search: &str,
) -> Vec<&'a TransactionEntry> {
    let needle = search.to_lowercase();

    entries
        .iter()
        .filter(|entry| {
            type_filter.matches(entry.transaction.transaction_type())
                && contains_ignoring_case(entry.transaction.description(), &needle)
        })
        .collect()
}

/// `lowercase_needle` must already be lowercase.
fn contains_ignoring_case(haystack: &str, lowercase_needle: &str) -> bool {
    lowercase_needle.is_empty() || haystack.to_lowercase().contains(lowercase_needle)
}
