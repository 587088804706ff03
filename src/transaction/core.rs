//! Defines the core transaction model and the invariants every transaction upholds.

use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};
use time::Date;

time::serde::format_description!(iso_date, Date, "[year]-[month]-[day]");

// ============================================================================
// MODELS
// ============================================================================

/// Whether money was earned or spent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    /// Money earned, e.g. a salary payment.
    Income,
    /// Money spent, e.g. rent.
    Expense,
}

impl TransactionType {
    /// The lowercase name used in forms and in the persisted layout.
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Income => "income",
            TransactionType::Expense => "expense",
        }
    }
}

impl Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for TransactionType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            value if value.eq_ignore_ascii_case("income") => Ok(TransactionType::Income),
            value if value.eq_ignore_ascii_case("expense") => Ok(TransactionType::Expense),
            value => Err(ValidationError::InvalidType(value.to_owned())),
        }
    }
}

/// The reasons a transaction can be rejected.
#[derive(Debug, Clone, thiserror::Error, PartialEq)]
pub enum ValidationError {
    /// The description was empty.
    #[error("description cannot be empty")]
    EmptyDescription,

    /// The amount was zero or negative.
    #[error("amount must be positive, got {0}")]
    NonPositiveAmount(f64),

    /// The amount was NaN or infinite.
    #[error("amount must be a finite number, got {0}")]
    NonFiniteAmount(f64),

    /// The transaction type was neither "income" nor "expense".
    #[error("\"{0}\" is not a transaction type, expected income or expense")]
    InvalidType(String),
}

/// An expense or income, i.e. an event where money was either spent or earned.
///
/// The fields are private so that every `Transaction` in the program has
/// passed through [Transaction::new]: the amount is finite and positive and
/// the description is not empty. Deserialization goes through the same checks.
///
/// A description of only whitespace is a valid transaction. Rejecting blank
/// input is up to the form that collects it, see [crate::TransactionForm].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "TransactionRecord", into = "TransactionRecord")]
pub struct Transaction {
    transaction_type: TransactionType,
    description: String,
    amount: f64,
    date: Date,
}

impl Transaction {
    /// Create a new transaction.
    ///
    /// # Errors
    /// Returns a:
    /// - [ValidationError::EmptyDescription] if `description` is empty,
    /// - [ValidationError::NonFiniteAmount] if `amount` is NaN or infinite,
    /// - or [ValidationError::NonPositiveAmount] if `amount` is zero or negative.
    pub fn new(
        transaction_type: TransactionType,
        description: &str,
        amount: f64,
        date: Date,
    ) -> Result<Self, ValidationError> {
        if description.is_empty() {
            return Err(ValidationError::EmptyDescription);
        }

        if !amount.is_finite() {
            return Err(ValidationError::NonFiniteAmount(amount));
        }

        if amount <= 0.0 {
            return Err(ValidationError::NonPositiveAmount(amount));
        }

        Ok(Self {
            transaction_type,
            description: description.to_owned(),
            amount,
            date,
        })
    }

    /// Shortcut for creating an income transaction.
    pub fn income(description: &str, amount: f64, date: Date) -> Result<Self, ValidationError> {
        Self::new(TransactionType::Income, description, amount, date)
    }

    /// Shortcut for creating an expense transaction.
    pub fn expense(description: &str, amount: f64, date: Date) -> Result<Self, ValidationError> {
        Self::new(TransactionType::Expense, description, amount, date)
    }

    /// Whether this is income or an expense.
    pub fn transaction_type(&self) -> TransactionType {
        self.transaction_type
    }

    /// What the money was earned or spent on.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// The amount of money earned or spent. Always positive.
    pub fn amount(&self) -> f64 {
        self.amount
    }

    /// When the transaction happened.
    pub fn date(&self) -> Date {
        self.date
    }

    /// Shortcut for checking the type is [TransactionType::Income].
    pub fn is_income(&self) -> bool {
        self.transaction_type == TransactionType::Income
    }

    /// Shortcut for checking the type is [TransactionType::Expense].
    pub fn is_expense(&self) -> bool {
        self.transaction_type == TransactionType::Expense
    }
}

/// The persisted shape of a transaction.
#[derive(Serialize, Deserialize)]
struct TransactionRecord {
    #[serde(rename = "type")]
    transaction_type: TransactionType,
    description: String,
    amount: f64,
    #[serde(with = "iso_date")]
    date: Date,
}

impl TryFrom<TransactionRecord> for Transaction {
    type Error = ValidationError;

    fn try_from(record: TransactionRecord) -> Result<Self, Self::Error> {
        Transaction::new(
            record.transaction_type,
            &record.description,
            record.amount,
            record.date,
        )
    }
}

impl From<Transaction> for TransactionRecord {
    fn from(transaction: Transaction) -> Self {
        Self {
            transaction_type: transaction.transaction_type,
            description: transaction.description,
            amount: transaction.amount,
            date: transaction.date,
        }
    }
}

/// Parse an ISO-8601 calendar date such as "2024-01-31".
pub fn parse_iso_date(text: &str) -> Result<Date, time::error::Parse> {
    Date::parse(
        text.trim(),
        time::macros::format_description!("[year]-[month]-[day]"),
    )
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use super::{Transaction, TransactionType, ValidationError, parse_iso_date};

    #[test]
    fn new_accepts_valid_transaction() {
        let transaction =
            Transaction::new(TransactionType::Income, "Salary", 1000.0, date!(2024 - 01 - 01))
                .unwrap();

        assert_eq!(transaction.transaction_type(), TransactionType::Income);
        assert_eq!(transaction.description(), "Salary");
        assert_eq!(transaction.amount(), 1000.0);
        assert_eq!(transaction.date(), date!(2024 - 01 - 01));
        assert!(transaction.is_income());
        assert!(!transaction.is_expense());
    }

    #[test]
    fn new_rejects_empty_description() {
        let result = Transaction::expense("", 5.0, date!(2024 - 01 - 01));

        assert_eq!(result, Err(ValidationError::EmptyDescription));
    }

    #[test]
    fn new_accepts_whitespace_description() {
        let result = Transaction::expense("   ", 5.0, date!(2024 - 01 - 01));

        assert_eq!(result.map(|transaction| transaction.description().len()), Ok(3));
    }

    #[test]
    fn deserialize_accepts_whitespace_description() {
        let json = r#"{"type":"expense","description":" ","amount":5,"date":"2024-01-01"}"#;

        let transaction = serde_json::from_str::<Transaction>(json).unwrap();

        assert_eq!(transaction.description(), " ");
    }

    #[test]
    fn new_rejects_zero_and_negative_amounts() {
        assert_eq!(
            Transaction::expense("Rent", 0.0, date!(2024 - 01 - 01)),
            Err(ValidationError::NonPositiveAmount(0.0))
        );
        assert_eq!(
            Transaction::expense("Rent", -1.0, date!(2024 - 01 - 01)),
            Err(ValidationError::NonPositiveAmount(-1.0))
        );
    }

    #[test]
    fn new_rejects_non_finite_amounts() {
        assert!(matches!(
            Transaction::income("Salary", f64::NAN, date!(2024 - 01 - 01)),
            Err(ValidationError::NonFiniteAmount(_))
        ));
        assert_eq!(
            Transaction::income("Salary", f64::INFINITY, date!(2024 - 01 - 01)),
            Err(ValidationError::NonFiniteAmount(f64::INFINITY))
        );
    }

    #[test]
    fn serializes_to_persisted_layout() {
        let transaction = Transaction::expense("Rent", 400.5, date!(2024 - 01 - 02)).unwrap();

        let json = serde_json::to_value(&transaction).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "type": "expense",
                "description": "Rent",
                "amount": 400.5,
                "date": "2024-01-02",
            })
        );
    }

    #[test]
    fn deserialize_enforces_invariants() {
        let json = r#"{"type":"income","description":"Gift","amount":0,"date":"2024-01-01"}"#;

        let result = serde_json::from_str::<Transaction>(json);

        assert!(result.is_err());
    }

    #[test]
    fn deserialize_rejects_unknown_type() {
        let json = r#"{"type":"transfer","description":"Gift","amount":5,"date":"2024-01-01"}"#;

        let result = serde_json::from_str::<Transaction>(json);

        assert!(result.is_err());
    }

    #[test]
    fn parses_transaction_type_ignoring_case() {
        assert_eq!("Income".parse(), Ok(TransactionType::Income));
        assert_eq!(" expense ".parse(), Ok(TransactionType::Expense));
        assert_eq!(
            "transfer".parse::<TransactionType>(),
            Err(ValidationError::InvalidType("transfer".to_owned()))
        );
    }

    #[test]
    fn parses_iso_dates() {
        assert_eq!(parse_iso_date("2024-02-29").unwrap(), date!(2024 - 02 - 29));
        assert!(parse_iso_date("2023-02-29").is_err());
        assert!(parse_iso_date("01/02/2024").is_err());
    }
}
