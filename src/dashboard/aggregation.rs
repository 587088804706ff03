//! Summary totals and chart series derived from the transaction list.
//!
//! Everything here is a pure function of the full, unfiltered list and is
//! recomputed from scratch on every call.

use std::{collections::BTreeMap, fmt::Display, str::FromStr};

use time::Date;

use crate::transaction::{Transaction, TransactionType};

/// Income, expense and profit/loss totals.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Summary {
    /// The sum of all income amounts.
    pub income_total: f64,
    /// The sum of all expense amounts.
    pub expense_total: f64,
    /// `income_total - expense_total`.
    pub profit_loss: f64,
}

impl Summary {
    /// Whether more was spent than earned.
    pub fn is_loss(&self) -> bool {
        self.profit_loss < 0.0
    }
}

/// Sum the income and expenses in `transactions`.
///
/// An empty list gives zero for every total.
pub fn summarise<'a, I>(transactions: I) -> Summary
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let (income_total, expense_total) =
        transactions
            .into_iter()
            .fold((0.0, 0.0), |(income, expenses), transaction| {
                match transaction.transaction_type() {
                    TransactionType::Income => (income + transaction.amount(), expenses),
                    TransactionType::Expense => (income, expenses + transaction.amount()),
                }
            });

    Summary {
        income_total,
        expense_total,
        profit_loss: income_total - expense_total,
    }
}

/// How transactions become points on the chart.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ChartMode {
    /// One point per transaction, in insertion order, labelled with its date.
    /// Transactions on the same date are not combined.
    #[default]
    PerTransaction,
    /// One point per unique date, in chronological order, holding the total
    /// income and expenses on that date.
    ByDate,
}

impl ChartMode {
    /// The name accepted on the command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            ChartMode::PerTransaction => "per-transaction",
            ChartMode::ByDate => "by-date",
        }
    }
}

impl Display for ChartMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

/// The text given to [ChartMode::from_str] was not a known chart mode.
#[derive(Debug, Clone, thiserror::Error, PartialEq)]
#[error("unknown chart mode \"{0}\", expected per-transaction or by-date")]
pub struct UnknownChartMode(pub String);

impl FromStr for ChartMode {
    type Err = UnknownChartMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "per-transaction" | "transaction" => Ok(ChartMode::PerTransaction),
            "by-date" | "date" => Ok(ChartMode::ByDate),
            _ => Err(UnknownChartMode(s.to_owned())),
        }
    }
}

/// Two parallel series of values sharing one set of labels.
///
/// `expenses[i]` and `income[i]` belong to `labels[i]`; `None` means there is
/// no bar of that type at that label.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChartSeries {
    /// The x-axis labels, ISO-8601 dates.
    pub labels: Vec<String>,
    /// The expense bar at each label.
    pub expenses: Vec<Option<f64>>,
    /// The income bar at each label.
    pub income: Vec<Option<f64>>,
}

impl ChartSeries {
    /// The number of labels.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Whether there is nothing to plot.
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// Project `transactions` into chart series according to `mode`.
pub fn chart_series<'a, I>(transactions: I, mode: ChartMode) -> ChartSeries
where
    I: IntoIterator<Item = &'a Transaction>,
{
    match mode {
        ChartMode::PerTransaction => per_transaction_series(transactions),
        ChartMode::ByDate => by_date_series(transactions),
    }
}

fn per_transaction_series<'a, I>(transactions: I) -> ChartSeries
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut series = ChartSeries::default();

    for transaction in transactions {
        series.labels.push(transaction.date().to_string());

        let amount = Some(transaction.amount());
        match transaction.transaction_type() {
            TransactionType::Income => {
                series.expenses.push(None);
                series.income.push(amount);
            }
            TransactionType::Expense => {
                series.expenses.push(amount);
                series.income.push(None);
            }
        }
    }

    series
}

fn by_date_series<'a, I>(transactions: I) -> ChartSeries
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut totals_by_date: BTreeMap<Date, (Option<f64>, Option<f64>)> = BTreeMap::new();

    for transaction in transactions {
        let (expenses, income) = totals_by_date.entry(transaction.date()).or_default();
        let total = match transaction.transaction_type() {
            TransactionType::Income => income,
            TransactionType::Expense => expenses,
        };
        *total = Some(total.unwrap_or(0.0) + transaction.amount());
    }

    let mut series = ChartSeries::default();

    for (date, (expenses, income)) in totals_by_date {
        series.labels.push(date.to_string());
        series.expenses.push(expenses);
        series.income.push(income);
    }

    series
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use crate::transaction::Transaction;

    use super::{ChartMode, ChartSeries, Summary, UnknownChartMode, chart_series, summarise};

    fn income(amount: f64, date: time::Date) -> Transaction {
        Transaction::income("Income", amount, date).unwrap()
    }

    fn expense(amount: f64, date: time::Date) -> Transaction {
        Transaction::expense("Expense", amount, date).unwrap()
    }

    #[test]
    fn summarise_salary_and_rent() {
        let transactions = vec![
            Transaction::income("Salary", 1000.0, date!(2024 - 01 - 01)).unwrap(),
            Transaction::expense("Rent", 400.0, date!(2024 - 01 - 02)).unwrap(),
        ];

        let summary = summarise(&transactions);

        assert_eq!(
            summary,
            Summary {
                income_total: 1000.0,
                expense_total: 400.0,
                profit_loss: 600.0,
            }
        );
        assert!(!summary.is_loss());
    }

    #[test]
    fn summarise_empty_list_is_all_zero() {
        let transactions: Vec<Transaction> = Vec::new();

        let summary = summarise(&transactions);

        assert_eq!(summary, Summary::default());
        assert_eq!(summary.income_total - summary.expense_total, summary.profit_loss);
        assert!(!summary.is_loss());
    }

    #[test]
    fn summarise_reports_loss() {
        let transactions = vec![
            income(100.0, date!(2024 - 01 - 01)),
            expense(250.5, date!(2024 - 01 - 02)),
            expense(10.0, date!(2024 - 01 - 03)),
        ];

        let summary = summarise(&transactions);

        assert_eq!(summary.income_total, 100.0);
        assert_eq!(summary.expense_total, 260.5);
        assert_eq!(summary.profit_loss, -160.5);
        assert!(summary.is_loss());
    }

    #[test]
    fn profit_loss_is_income_minus_expenses() {
        let transactions = vec![
            income(0.1, date!(2024 - 01 - 01)),
            income(0.2, date!(2024 - 01 - 01)),
            expense(0.3, date!(2024 - 01 - 02)),
        ];

        let summary = summarise(&transactions);

        assert_eq!(
            summary.income_total - summary.expense_total,
            summary.profit_loss
        );
    }

    #[test]
    fn per_transaction_series_has_one_point_per_transaction() {
        let transactions = vec![
            income(1000.0, date!(2024 - 01 - 02)),
            expense(400.0, date!(2024 - 01 - 01)),
            expense(50.0, date!(2024 - 01 - 01)),
        ];

        let series = chart_series(&transactions, ChartMode::PerTransaction);

        assert_eq!(
            series,
            ChartSeries {
                labels: vec![
                    "2024-01-02".to_owned(),
                    "2024-01-01".to_owned(),
                    "2024-01-01".to_owned(),
                ],
                expenses: vec![None, Some(400.0), Some(50.0)],
                income: vec![Some(1000.0), None, None],
            }
        );
    }

    #[test]
    fn by_date_series_sums_per_date_in_date_order() {
        let transactions = vec![
            income(1000.0, date!(2024 - 01 - 02)),
            expense(400.0, date!(2024 - 01 - 01)),
            expense(50.0, date!(2024 - 01 - 01)),
            income(20.0, date!(2024 - 01 - 02)),
        ];

        let series = chart_series(&transactions, ChartMode::ByDate);

        assert_eq!(
            series,
            ChartSeries {
                labels: vec!["2024-01-01".to_owned(), "2024-01-02".to_owned()],
                expenses: vec![Some(450.0), None],
                income: vec![None, Some(1020.0)],
            }
        );
    }

    #[test]
    fn empty_list_gives_empty_series() {
        let transactions: Vec<Transaction> = Vec::new();

        for mode in [ChartMode::PerTransaction, ChartMode::ByDate] {
            let series = chart_series(&transactions, mode);

            assert!(series.is_empty());
            assert_eq!(series.len(), 0);
        }
    }

    #[test]
    fn parses_chart_mode() {
        assert_eq!("per-transaction".parse(), Ok(ChartMode::PerTransaction));
        assert_eq!("By-Date".parse(), Ok(ChartMode::ByDate));
        assert_eq!(
            "monthly".parse::<ChartMode>(),
            Err(UnknownChartMode("monthly".to_owned()))
        );
    }
}
