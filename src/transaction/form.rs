//! Validation of raw transaction input coming from a form or the command line.

use std::fmt::Display;

use crate::transaction::core::{
    Transaction, TransactionType, ValidationError, parse_iso_date,
};

/// The description was empty or only whitespace.
pub const DESCRIPTION_REQUIRED: &str = "Description is required";
/// The amount was left empty.
pub const AMOUNT_REQUIRED: &str = "Amount is required";
/// The amount could not be read as a finite number.
pub const AMOUNT_NOT_A_NUMBER: &str = "Amount must be a number";
/// The amount was zero or negative.
pub const AMOUNT_NOT_POSITIVE: &str = "Amount must be positive";
/// The date was left empty.
pub const DATE_REQUIRED: &str = "Date is required";
/// The date was not a valid calendar date.
pub const DATE_INVALID: &str = "Date must be in the format YYYY-MM-DD";
/// The type was neither income nor expense.
pub const TYPE_INVALID: &str = "Type must be income or expense";

/// Unvalidated transaction fields, exactly as the user typed them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionForm {
    /// "income" or "expense". An empty value defaults to income.
    pub transaction_type: String,
    /// Any non-blank text.
    pub description: String,
    /// A positive number, e.g. "12.50".
    pub amount: String,
    /// An ISO-8601 date, e.g. "2024-01-31".
    pub date: String,
}

/// Inline error messages for each field of a [TransactionForm].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormErrors {
    /// The message for [TransactionForm::transaction_type].
    pub transaction_type: Option<&'static str>,
    /// The message for [TransactionForm::description].
    pub description: Option<&'static str>,
    /// The message for [TransactionForm::amount].
    pub amount: Option<&'static str>,
    /// The message for [TransactionForm::date].
    pub date: Option<&'static str>,
}

impl FormErrors {
    /// Whether every field passed.
    pub fn is_empty(&self) -> bool {
        self.transaction_type.is_none()
            && self.description.is_none()
            && self.amount.is_none()
            && self.date.is_none()
    }

    /// The field name and message of every error, in form order.
    pub fn messages(&self) -> Vec<(&'static str, &'static str)> {
        [
            ("type", self.transaction_type),
            ("description", self.description),
            ("amount", self.amount),
            ("date", self.date),
        ]
        .into_iter()
        .filter_map(|(field, message)| message.map(|message| (field, message)))
        .collect()
    }
}

impl Display for FormErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let messages = self
            .messages()
            .into_iter()
            .map(|(_, message)| message)
            .collect::<Vec<_>>()
            .join(", ");

        f.write_str(&messages)
    }
}

impl From<&Transaction> for TransactionForm {
    fn from(transaction: &Transaction) -> Self {
        Self {
            transaction_type: transaction.transaction_type().to_string(),
            description: transaction.description().to_owned(),
            amount: transaction.amount().to_string(),
            date: transaction.date().to_string(),
        }
    }
}

impl TransactionForm {
    /// Check every field and build a [Transaction] from the form.
    ///
    /// All fields are checked so that every problem can be shown next to its
    /// field at once.
    ///
    /// # Errors
    /// Returns [FormErrors] with a message for each offending field.
    pub fn validate(&self) -> Result<Transaction, FormErrors> {
        let mut errors = FormErrors::default();

        let transaction_type = if self.transaction_type.trim().is_empty() {
            Some(TransactionType::Income)
        } else {
            match self.transaction_type.parse::<TransactionType>() {
                Ok(transaction_type) => Some(transaction_type),
                Err(_) => {
                    errors.transaction_type = Some(TYPE_INVALID);
                    None
                }
            }
        };

        if self.description.trim().is_empty() {
            errors.description = Some(DESCRIPTION_REQUIRED);
        }

        let amount = match self.amount.trim() {
            "" => {
                errors.amount = Some(AMOUNT_REQUIRED);
                None
            }
            text => match text.parse::<f64>() {
                Ok(amount) if !amount.is_finite() => {
                    errors.amount = Some(AMOUNT_NOT_A_NUMBER);
                    None
                }
                Ok(amount) if amount <= 0.0 => {
                    errors.amount = Some(AMOUNT_NOT_POSITIVE);
                    None
                }
                Ok(amount) => Some(amount),
                Err(_) => {
                    errors.amount = Some(AMOUNT_NOT_A_NUMBER);
                    None
                }
            },
        };

        let date = match self.date.trim() {
            "" => {
                errors.date = Some(DATE_REQUIRED);
                None
            }
            text => match parse_iso_date(text) {
                Ok(date) => Some(date),
                Err(_) => {
                    errors.date = Some(DATE_INVALID);
                    None
                }
            },
        };

        match (transaction_type, amount, date) {
            (Some(transaction_type), Some(amount), Some(date)) if errors.is_empty() => {
                Transaction::new(transaction_type, &self.description, amount, date)
                    .map_err(FormErrors::from)
            }
            _ => Err(errors),
        }
    }
}

impl From<ValidationError> for FormErrors {
    fn from(error: ValidationError) -> Self {
        let mut errors = FormErrors::default();

        match error {
            ValidationError::EmptyDescription => errors.description = Some(DESCRIPTION_REQUIRED),
            ValidationError::NonPositiveAmount(_) => errors.amount = Some(AMOUNT_NOT_POSITIVE),
            ValidationError::NonFiniteAmount(_) => errors.amount = Some(AMOUNT_NOT_A_NUMBER),
            ValidationError::InvalidType(_) => errors.transaction_type = Some(TYPE_INVALID),
        }

        errors
    }
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use crate::transaction::{Transaction, TransactionType};

    use super::{
        AMOUNT_NOT_A_NUMBER, AMOUNT_NOT_POSITIVE, AMOUNT_REQUIRED, DATE_INVALID, DATE_REQUIRED,
        DESCRIPTION_REQUIRED, FormErrors, TYPE_INVALID, TransactionForm,
    };

    fn form(transaction_type: &str, description: &str, amount: &str, date: &str) -> TransactionForm {
        TransactionForm {
            transaction_type: transaction_type.to_owned(),
            description: description.to_owned(),
            amount: amount.to_owned(),
            date: date.to_owned(),
        }
    }

    #[test]
    fn valid_form_produces_transaction() {
        let transaction = form("expense", "Rent", "400", "2024-01-02")
            .validate()
            .unwrap();

        assert_eq!(
            transaction,
            Transaction::new(TransactionType::Expense, "Rent", 400.0, date!(2024 - 01 - 02))
                .unwrap()
        );
    }

    #[test]
    fn empty_type_defaults_to_income() {
        let transaction = form("", "Salary", "1000", "2024-01-01").validate().unwrap();

        assert_eq!(transaction.transaction_type(), TransactionType::Income);
    }

    #[test]
    fn empty_description_is_rejected() {
        let errors = form("expense", "", "5", "2024-01-01").validate().unwrap_err();

        assert_eq!(
            errors,
            FormErrors {
                description: Some(DESCRIPTION_REQUIRED),
                ..Default::default()
            }
        );
    }

    #[test]
    fn blank_description_is_rejected() {
        let errors = form("expense", "   ", "5", "2024-01-01").validate().unwrap_err();

        assert_eq!(errors.description, Some(DESCRIPTION_REQUIRED));
    }

    #[test]
    fn missing_amount_is_rejected() {
        let errors = form("expense", "Rent", "  ", "2024-01-01")
            .validate()
            .unwrap_err();

        assert_eq!(errors.amount, Some(AMOUNT_REQUIRED));
    }

    #[test]
    fn non_positive_amount_is_rejected() {
        let zero = form("expense", "Rent", "0", "2024-01-01")
            .validate()
            .unwrap_err();
        let negative = form("expense", "Rent", "-3.50", "2024-01-01")
            .validate()
            .unwrap_err();

        assert_eq!(zero.amount, Some(AMOUNT_NOT_POSITIVE));
        assert_eq!(negative.amount, Some(AMOUNT_NOT_POSITIVE));
    }

    #[test]
    fn non_numeric_amount_is_rejected() {
        let text = form("expense", "Rent", "lots", "2024-01-01")
            .validate()
            .unwrap_err();
        let infinite = form("expense", "Rent", "inf", "2024-01-01")
            .validate()
            .unwrap_err();

        assert_eq!(text.amount, Some(AMOUNT_NOT_A_NUMBER));
        assert_eq!(infinite.amount, Some(AMOUNT_NOT_A_NUMBER));
    }

    #[test]
    fn missing_and_malformed_dates_are_rejected() {
        let missing = form("income", "Salary", "10", "").validate().unwrap_err();
        let malformed = form("income", "Salary", "10", "31/01/2024")
            .validate()
            .unwrap_err();

        assert_eq!(missing.date, Some(DATE_REQUIRED));
        assert_eq!(malformed.date, Some(DATE_INVALID));
    }

    #[test]
    fn reports_every_invalid_field_at_once() {
        let errors = form("transfer", "", "", "").validate().unwrap_err();

        assert_eq!(
            errors.messages(),
            vec![
                ("type", TYPE_INVALID),
                ("description", DESCRIPTION_REQUIRED),
                ("amount", AMOUNT_REQUIRED),
                ("date", DATE_REQUIRED),
            ]
        );
        assert_eq!(
            errors.to_string(),
            format!("{TYPE_INVALID}, {DESCRIPTION_REQUIRED}, {AMOUNT_REQUIRED}, {DATE_REQUIRED}")
        );
    }

    #[test]
    fn form_from_transaction_round_trips() {
        let transaction = Transaction::income("Salary", 1234.5, date!(2024 - 03 - 09)).unwrap();

        let form = TransactionForm::from(&transaction);

        assert_eq!(form.transaction_type, "income");
        assert_eq!(form.date, "2024-03-09");
        assert_eq!(form.validate().unwrap(), transaction);
    }
}
