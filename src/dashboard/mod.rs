//! Everything derived from the transaction list for display.
//!
//! A [DashboardView] bundles what a front end needs to draw the dashboard:
//! - **Rows**: the transactions that pass the current filter, with their IDs
//! - **Summary**: income, expense and profit/loss totals over all transactions
//! - **Chart**: the expense and income series over all transactions

mod aggregation;
mod charts;
mod report;

pub use aggregation::{
    ChartMode, ChartSeries, Summary, UnknownChartMode, chart_series, summarise,
};
pub use charts::{EXPENSE_COLOR, INCOME_COLOR, transaction_chart};
pub use report::{TRANSACTION_CHART_ID, render_dashboard};

use crate::{
    persistence::SlotStorage,
    store::{TransactionEntry, TransactionStore},
    transaction::TransactionQuery,
};

/// The derived views of the transaction list.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardView {
    /// The query used to select `rows`.
    pub query: TransactionQuery,
    /// The transactions matching `query`, in insertion order.
    pub rows: Vec<TransactionEntry>,
    /// Totals over every transaction, ignoring `query`.
    pub summary: Summary,
    /// Chart series over every transaction, ignoring `query`.
    pub chart: ChartSeries,
}

impl DashboardView {
    /// Derive the view from a snapshot of the store, e.g. the entries a
    /// listener is given.
    pub fn from_entries(
        entries: &[TransactionEntry],
        query: &TransactionQuery,
        mode: ChartMode,
    ) -> Self {
        let transactions = entries.iter().map(|entry| &entry.transaction);

        Self {
            query: query.clone(),
            rows: query.apply(entries).into_iter().cloned().collect(),
            summary: summarise(transactions.clone()),
            chart: chart_series(transactions, mode),
        }
    }

    /// Derive the view from the current contents of `store`.
    pub fn from_store<S: SlotStorage>(
        store: &TransactionStore<S>,
        query: &TransactionQuery,
        mode: ChartMode,
    ) -> Self {
        Self::from_entries(store.entries(), query, mode)
    }
}
