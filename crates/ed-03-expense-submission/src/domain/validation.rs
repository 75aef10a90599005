//! # Draft Validation
//!
//! | Field | Rule |
//! |-------|------|
//! | `account_id` | non-empty |
//! | `paid_through_account_id` | non-empty, differs from `account_id` |
//! | `amount` | positive decimal |
//! | `date` | valid `YYYY-MM-DD` calendar date |

use chrono::NaiveDate;
use rust_decimal::Decimal;
use shared_types::{local_id, parse_amount, parse_date, Expense, DATE_FORMAT};

use super::draft::{DraftField, ExpenseDraft};
use super::errors::{FieldError, ValidationError};

/// A draft whose fields passed validation, with typed values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedExpense {
    /// Expense account.
    pub account_id: String,
    /// Paying account.
    pub paid_through_account_id: String,
    /// Positive amount.
    pub amount: Decimal,
    /// Calendar date.
    pub date: NaiveDate,
    /// Free text, trimmed.
    pub description: String,
    /// Billed contact, if any.
    pub customer_id: Option<String>,
}

impl ValidatedExpense {
    /// Request body with the trimmed, normalized field values.
    pub fn to_request(&self) -> ExpenseDraft {
        ExpenseDraft {
            account_id: self.account_id.clone(),
            amount: self.amount.to_string(),
            paid_through_account_id: self.paid_through_account_id.clone(),
            date: self.date.format(DATE_FORMAT).to_string(),
            description: self.description.clone(),
            customer_id: self.customer_id.clone().unwrap_or_default(),
        }
    }

    /// Local record for the optimistic insert, under a fresh local id.
    pub fn into_expense(self) -> Expense {
        Expense {
            id: local_id(),
            account_id: self.account_id,
            paid_through_account_id: self.paid_through_account_id,
            amount: self.amount,
            date: self.date,
            description: self.description,
            customer_id: self.customer_id,
        }
    }
}

/// Validate every field, collecting all failures.
pub fn validate(draft: &ExpenseDraft) -> Result<ValidatedExpense, ValidationError> {
    let mut errors = Vec::new();
    let mut fail = |field, reason| errors.push(FieldError { field, reason });

    let account_id = draft.account_id.trim();
    let paid_through = draft.paid_through_account_id.trim();

    if account_id.is_empty() {
        fail(DraftField::AccountId, "is required");
    }

    let amount = parse_amount(&draft.amount)
        .map_err(|reason| fail(DraftField::Amount, reason))
        .ok();

    if paid_through.is_empty() {
        fail(DraftField::PaidThroughAccountId, "is required");
    } else if paid_through == account_id {
        fail(DraftField::PaidThroughAccountId, "must differ from account_id");
    }

    let date = parse_date(&draft.date)
        .map_err(|reason| fail(DraftField::Date, reason))
        .ok();

    match (amount, date) {
        (Some(amount), Some(date)) if errors.is_empty() => Ok(ValidatedExpense {
            account_id: account_id.to_string(),
            paid_through_account_id: paid_through.to_string(),
            amount,
            date,
            description: draft.description.trim().to_string(),
            customer_id: Some(draft.customer_id.trim())
                .filter(|id| !id.is_empty())
                .map(str::to_string),
        }),
        _ => Err(ValidationError { errors }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_draft() -> ExpenseDraft {
        ExpenseDraft {
            account_id: "acc-travel".to_string(),
            amount: "42.10".to_string(),
            paid_through_account_id: "acc-bank".to_string(),
            date: "2024-03-15".to_string(),
            description: " Taxi to client ".to_string(),
            customer_id: String::new(),
        }
    }

    #[test]
    fn test_valid_draft() {
        let validated = validate(&valid_draft()).unwrap();
        assert_eq!(validated.amount, Decimal::new(4210, 2));
        assert_eq!(validated.date, NaiveDate::from_ymd_opt(2024, 3, 15).unwrap());
        assert_eq!(validated.description, "Taxi to client");
        assert_eq!(validated.customer_id, None);
    }

    #[test]
    fn test_negative_amount_rejected() {
        let mut draft = valid_draft();
        draft.amount = "-5".to_string();
        let err = validate(&draft).unwrap_err();
        assert!(err.mentions(DraftField::Amount));
        assert_eq!(err.errors.len(), 1);
    }

    #[test]
    fn test_same_accounts_rejected() {
        let mut draft = valid_draft();
        draft.paid_through_account_id = draft.account_id.clone();
        let err = validate(&draft).unwrap_err();
        assert!(err.mentions(DraftField::PaidThroughAccountId));
    }

    #[test]
    fn test_empty_draft_reports_all_required_fields() {
        let err = validate(&ExpenseDraft::default()).unwrap_err();
        let fields: Vec<_> = err.errors.iter().map(|e| e.field).collect();
        assert_eq!(
            fields,
            vec![
                DraftField::AccountId,
                DraftField::Amount,
                DraftField::PaidThroughAccountId,
                DraftField::Date,
            ]
        );
    }

    #[test]
    fn test_invalid_calendar_date() {
        let mut draft = valid_draft();
        draft.date = "2024-13-01".to_string();
        assert!(validate(&draft).unwrap_err().mentions(DraftField::Date));
    }

    #[test]
    fn test_oversized_amount_rejected() {
        let mut draft = valid_draft();
        draft.amount = "79228162514264337593543950335".to_string();
        let err = validate(&draft).unwrap_err();
        assert!(err.mentions(DraftField::Amount));
    }

    #[test]
    fn test_request_body_is_trimmed() {
        let draft = ExpenseDraft {
            account_id: " acc-travel ".to_string(),
            amount: " 12.50 ".to_string(),
            paid_through_account_id: "acc-bank\t".to_string(),
            date: " 2024-03-15".to_string(),
            description: " Taxi to client ".to_string(),
            customer_id: "  ".to_string(),
        };
        let request = validate(&draft).unwrap().to_request();
        assert_eq!(
            request,
            ExpenseDraft {
                account_id: "acc-travel".to_string(),
                amount: "12.50".to_string(),
                paid_through_account_id: "acc-bank".to_string(),
                date: "2024-03-15".to_string(),
                description: "Taxi to client".to_string(),
                customer_id: String::new(),
            }
        );
    }

    #[test]
    fn test_customer_kept_when_set() {
        let mut draft = valid_draft();
        draft.customer_id = "cust-7".to_string();
        let expense = validate(&draft).unwrap().into_expense();
        assert_eq!(expense.customer_id.as_deref(), Some("cust-7"));
        assert!(shared_types::is_local_id(&expense.id));
    }
}
