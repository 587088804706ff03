//! The user intents a front end can send to the transaction store.
//!
//! Each command returns the text to show the user. Validation problems come
//! back as [Error::InvalidForm] and stale IDs as [Error::TransactionNotFound];
//! in both cases the store is left as it was.

use std::{fs, path::Path};

use crate::{
    Error,
    dashboard::{ChartMode, DashboardView, render_dashboard, summarise, transaction_chart},
    html::format_currency,
    persistence::SlotStorage,
    store::{TransactionEntry, TransactionId, TransactionStore},
    transaction::{TransactionForm, TransactionQuery},
};

/// Asked before a transaction is deleted.
pub const DELETE_CONFIRMATION_PROMPT: &str = "Are you sure you want to delete this transaction?";

/// Changes to apply to an existing transaction. `None` keeps the current value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionEdit {
    /// The new type, "income" or "expense".
    pub transaction_type: Option<String>,
    /// The new description.
    pub description: Option<String>,
    /// The new amount.
    pub amount: Option<String>,
    /// The new date as YYYY-MM-DD.
    pub date: Option<String>,
}

impl TransactionEdit {
    /// Overwrite the fields of `form` that this edit sets.
    pub fn apply_to(self, form: TransactionForm) -> TransactionForm {
        TransactionForm {
            transaction_type: self.transaction_type.unwrap_or(form.transaction_type),
            description: self.description.unwrap_or(form.description),
            amount: self.amount.unwrap_or(form.amount),
            date: self.date.unwrap_or(form.date),
        }
    }
}

/// Validate `form` and append it to the store.
///
/// # Errors
/// Returns an [Error::InvalidForm] if the form does not pass validation, or
/// the persistence error if the store could not be saved.
pub fn add<S: SlotStorage>(
    store: &mut TransactionStore<S>,
    form: &TransactionForm,
) -> Result<String, Error> {
    let transaction = form.validate()?;
    let id = store.add(transaction)?;

    tracing::info!("Added transaction {id}.");
    Ok(format!("Added transaction {id}."))
}

/// Apply `edit` to the transaction `id` and save it.
///
/// # Errors
/// Returns an [Error::TransactionNotFound] if `id` does not exist, an
/// [Error::InvalidForm] if the edited transaction does not pass validation,
/// or the persistence error if the store could not be saved.
pub fn edit<S: SlotStorage>(
    store: &mut TransactionStore<S>,
    id: TransactionId,
    edit: TransactionEdit,
) -> Result<String, Error> {
    let current = store
        .get(id)
        .ok_or(Error::TransactionNotFound(id))
        .inspect_err(|_| tracing::warn!("Cannot edit transaction {id}, it does not exist."))?;

    let transaction = edit.apply_to(TransactionForm::from(current)).validate()?;
    store.update(id, transaction)?;

    tracing::info!("Updated transaction {id}.");
    Ok(format!("Updated transaction {id}."))
}

/// Delete the transaction `id` if `confirm` agrees.
///
/// `confirm` is shown the transaction about to be deleted. Declining is not
/// an error, nothing is deleted.
///
/// # Errors
/// Returns an [Error::TransactionNotFound] if `id` does not exist, or the
/// persistence error if the store could not be saved.
pub fn delete<S, F>(store: &mut TransactionStore<S>, id: TransactionId, confirm: F) -> Result<String, Error>
where
    S: SlotStorage,
    F: FnOnce(&TransactionEntry) -> bool,
{
    let entry = store
        .entries()
        .iter()
        .find(|entry| entry.id == id)
        .cloned()
        .ok_or(Error::TransactionNotFound(id))
        .inspect_err(|_| tracing::warn!("Cannot delete transaction {id}, it does not exist."))?;

    if !confirm(&entry) {
        tracing::debug!("Deletion of transaction {id} was cancelled.");
        return Ok("Nothing was deleted.".to_owned());
    }

    store.remove(id)?;

    tracing::info!("Deleted transaction {id}.");
    Ok(format!("Deleted transaction {id}."))
}

/// The transactions matching `query` as a text table.
pub fn list<S: SlotStorage>(store: &TransactionStore<S>, query: &TransactionQuery) -> String {
    let rows = query.apply(store.entries());

    if rows.is_empty() {
        return "No transactions.".to_owned();
    }

    let header = format!(
        "{:>4}  {:<10}  {:<7}  {:>14}  {}",
        "ID", "Date", "Type", "Amount", "Description"
    );

    std::iter::once(header)
        .chain(rows.into_iter().map(|row| {
            let transaction = &row.transaction;
            format!(
                "{:>4}  {:<10}  {:<7}  {:>14}  {}",
                row.id,
                transaction.date().to_string(),
                transaction.transaction_type(),
                format_currency(transaction.amount()),
                transaction.description()
            )
        }))
        .collect::<Vec<_>>()
        .join("\n")
}

/// The income, expense and profit/loss totals over every transaction.
pub fn summary<S: SlotStorage>(store: &TransactionStore<S>) -> String {
    let summary = summarise(store.transactions());
    let label = if summary.is_loss() { "Loss" } else { "Profit" };

    format!(
        "Total Income: {}\nTotal Expenses: {}\n{label}: {}",
        format_currency(summary.income_total),
        format_currency(summary.expense_total),
        format_currency(summary.profit_loss)
    )
}

/// The ECharts options for the transaction chart as JSON.
pub fn chart<S: SlotStorage>(store: &TransactionStore<S>, mode: ChartMode) -> String {
    let view = DashboardView::from_store(store, &TransactionQuery::default(), mode);
    transaction_chart(&view.chart).to_string()
}

/// Render the dashboard as HTML and write it to `out`.
///
/// # Errors
/// Returns an [Error::ReportError] if the file could not be written.
pub fn report<S: SlotStorage>(
    store: &TransactionStore<S>,
    query: &TransactionQuery,
    mode: ChartMode,
    out: &Path,
) -> Result<String, Error> {
    let view = DashboardView::from_store(store, query, mode);
    let page = render_dashboard(&view).into_string();

    fs::write(out, page)
        .map_err(|error| Error::ReportError(out.display().to_string(), error.to_string()))?;

    tracing::info!("Wrote dashboard to {out:?}.");
    Ok(format!("Wrote dashboard to {}.", out.display()))
}

#[cfg(test)]
mod tests {
    use std::fs;

    use time::macros::date;

    use crate::{
        Error,
        config::{Config, StorageBackend},
        dashboard::ChartMode,
        persistence::{MemorySlot, Persistence},
        store::{TransactionId, TransactionStore},
        transaction::{
            AMOUNT_NOT_POSITIVE, DESCRIPTION_REQUIRED, FormErrors, Transaction, TransactionForm,
            TransactionQuery, TypeFilter,
        },
    };

    use super::{TransactionEdit, add, chart, delete, edit, list, report, summary};

    fn get_test_store() -> TransactionStore<MemorySlot> {
        TransactionStore::new(Persistence::new(MemorySlot::new()))
    }

    fn form(transaction_type: &str, description: &str, amount: &str, date: &str) -> TransactionForm {
        TransactionForm {
            transaction_type: transaction_type.to_owned(),
            description: description.to_owned(),
            amount: amount.to_owned(),
            date: date.to_owned(),
        }
    }

    fn sample_store() -> TransactionStore<MemorySlot> {
        let mut store = get_test_store();
        add(&mut store, &form("income", "Salary", "1000", "2024-01-01")).unwrap();
        add(&mut store, &form("expense", "Rent", "400", "2024-01-02")).unwrap();
        store
    }

    #[test]
    fn add_valid_form() {
        let mut store = get_test_store();

        let message = add(&mut store, &form("income", "Salary", "1000", "2024-01-01")).unwrap();

        assert_eq!(message, "Added transaction 1.");
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn add_rejects_empty_description_before_store() {
        let mut store = sample_store();

        let result = add(&mut store, &form("expense", "", "5", "2024-01-01"));

        assert_eq!(
            result,
            Err(Error::InvalidForm(FormErrors {
                description: Some(DESCRIPTION_REQUIRED),
                ..Default::default()
            }))
        );
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn edit_overrides_only_given_fields() {
        let mut store = sample_store();

        edit(
            &mut store,
            TransactionId::new(2),
            TransactionEdit {
                amount: Some("420".to_owned()),
                ..Default::default()
            },
        )
        .unwrap();

        assert_eq!(
            store.get(TransactionId::new(2)),
            Some(&Transaction::expense("Rent", 420.0, date!(2024 - 01 - 02)).unwrap())
        );
    }

    #[test]
    fn edit_rejects_invalid_changes() {
        let mut store = sample_store();

        let result = edit(
            &mut store,
            TransactionId::new(2),
            TransactionEdit {
                amount: Some("-1".to_owned()),
                ..Default::default()
            },
        );

        assert!(matches!(
            result,
            Err(Error::InvalidForm(FormErrors {
                amount: Some(AMOUNT_NOT_POSITIVE),
                ..
            }))
        ));
        assert_eq!(store.get(TransactionId::new(2)).unwrap().amount(), 400.0);
    }

    #[test]
    fn edit_unknown_id() {
        let mut store = sample_store();

        let result = edit(&mut store, TransactionId::new(9), TransactionEdit::default());

        assert_eq!(result, Err(Error::TransactionNotFound(TransactionId::new(9))));
    }

    #[test]
    fn delete_after_confirmation() {
        let mut store = sample_store();

        let message = delete(&mut store, TransactionId::new(1), |entry| {
            entry.transaction.description() == "Salary"
        })
        .unwrap();

        assert_eq!(message, "Deleted transaction 1.");
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn declined_delete_is_a_no_op() {
        let mut store = sample_store();

        let message = delete(&mut store, TransactionId::new(1), |_| false).unwrap();

        assert_eq!(message, "Nothing was deleted.");
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn delete_unknown_id_never_asks() {
        let mut store = sample_store();

        let result = delete(&mut store, TransactionId::new(5), |_| {
            panic!("should not ask to delete a missing transaction")
        });

        assert_eq!(result, Err(Error::TransactionNotFound(TransactionId::new(5))));
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn list_applies_query() {
        let store = sample_store();

        let table = list(&store, &TransactionQuery::new(TypeFilter::Income, "sal"));

        let lines: Vec<_> = table.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[1].contains("Salary"));
        assert!(lines[1].contains("$1,000.00"));
    }

    #[test]
    fn list_without_matches() {
        let store = sample_store();

        let table = list(&store, &TransactionQuery::new(TypeFilter::Expense, "salary"));

        assert_eq!(table, "No transactions.");
    }

    #[test]
    fn summary_shows_totals() {
        let store = sample_store();

        assert_eq!(
            summary(&store),
            "Total Income: $1,000.00\nTotal Expenses: $400.00\nProfit: $600.00"
        );
    }

    #[test]
    fn chart_is_json() {
        let store = sample_store();

        let options: serde_json::Value =
            serde_json::from_str(&chart(&store, ChartMode::ByDate)).unwrap();

        assert!(options["series"].is_array());
    }

    #[test]
    fn report_writes_html_file() {
        let store = sample_store();
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("dashboard.html");

        report(&store, &TransactionQuery::default(), ChartMode::PerTransaction, &out).unwrap();

        let page = fs::read_to_string(&out).unwrap();
        assert!(page.starts_with("<!DOCTYPE html>"));
        assert!(page.contains("Salary"));
    }

    #[test]
    fn report_to_missing_directory_fails() {
        let store = sample_store();
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("missing").join("dashboard.html");

        let result = report(&store, &TransactionQuery::default(), ChartMode::ByDate, &out);

        assert!(matches!(result, Err(Error::ReportError(_, _))));
    }

    #[test]
    fn ids_in_list_stay_valid_across_runs() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::new(StorageBackend::JsonDir(dir.path().to_owned()));
        for (description, amount) in [("A", "1"), ("B", "2"), ("C", "3")] {
            let mut store = config.open_store().unwrap();
            add(&mut store, &form("expense", description, amount, "2024-01-01")).unwrap();
        }

        delete(&mut config.open_store().unwrap(), TransactionId::new(1), |_| true).unwrap();
        edit(
            &mut config.open_store().unwrap(),
            TransactionId::new(2),
            TransactionEdit {
                amount: Some("99".to_owned()),
                ..Default::default()
            },
        )
        .unwrap();

        let store = config.open_store().unwrap();
        assert_eq!(store.get(TransactionId::new(2)).unwrap().description(), "B");
        assert_eq!(store.get(TransactionId::new(2)).unwrap().amount(), 99.0);
        assert_eq!(store.get(TransactionId::new(3)).unwrap().amount(), 3.0);
        let table = list(&store, &TransactionQuery::default());
        assert!(table.lines().nth(1).unwrap().trim_start().starts_with("2 "));
    }
}
