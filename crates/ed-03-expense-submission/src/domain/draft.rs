//! # Expense Draft
//!
//! The editable form state. Fields stay raw strings until validation.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Unsaved expense as typed by the user.
///
/// Field order is the wire order of the create request body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseDraft {
    /// Expense account.
    pub account_id: String,
    /// Amount as entered, e.g. `"12.50"`.
    pub amount: String,
    /// Bank or cash account the expense was paid from.
    pub paid_through_account_id: String,
    /// `YYYY-MM-DD`.
    pub date: String,
    /// Free text.
    pub description: String,
    /// Optional contact billed for the expense; empty when unset.
    pub customer_id: String,
}

impl ExpenseDraft {
    /// Set one field.
    pub fn set(&mut self, field: DraftField, value: impl Into<String>) {
        *self.slot_mut(field) = value.into();
    }

    /// Read one field.
    pub fn get(&self, field: DraftField) -> &str {
        match field {
            DraftField::AccountId => &self.account_id,
            DraftField::Amount => &self.amount,
            DraftField::PaidThroughAccountId => &self.paid_through_account_id,
            DraftField::Date => &self.date,
            DraftField::Description => &self.description,
            DraftField::CustomerId => &self.customer_id,
        }
    }

    /// Whether every field is empty.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    fn slot_mut(&mut self, field: DraftField) -> &mut String {
        match field {
            DraftField::AccountId => &mut self.account_id,
            DraftField::Amount => &mut self.amount,
            DraftField::PaidThroughAccountId => &mut self.paid_through_account_id,
            DraftField::Date => &mut self.date,
            DraftField::Description => &mut self.description,
            DraftField::CustomerId => &mut self.customer_id,
        }
    }
}

/// Names of the draft fields, as used by form inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DraftField {
    /// `account_id`
    AccountId,
    /// `amount`
    Amount,
    /// `paid_through_account_id`
    PaidThroughAccountId,
    /// `date`
    Date,
    /// `description`
    Description,
    /// `customer_id`
    CustomerId,
}

impl DraftField {
    /// All fields in wire order.
    pub const ALL: [DraftField; 6] = [
        DraftField::AccountId,
        DraftField::Amount,
        DraftField::PaidThroughAccountId,
        DraftField::Date,
        DraftField::Description,
        DraftField::CustomerId,
    ];

    /// Field name.
    pub fn as_str(&self) -> &'static str {
        match self {
            DraftField::AccountId => "account_id",
            DraftField::Amount => "amount",
            DraftField::PaidThroughAccountId => "paid_through_account_id",
            DraftField::Date => "date",
            DraftField::Description => "description",
            DraftField::CustomerId => "customer_id",
        }
    }
}

impl fmt::Display for DraftField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DraftField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DraftField::ALL
            .into_iter()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_and_get() {
        let mut draft = ExpenseDraft::default();
        assert!(draft.is_empty());
        draft.set(DraftField::Amount, "12.50");
        assert_eq!(draft.get(DraftField::Amount), "12.50");
        assert!(!draft.is_empty());
    }

    #[test]
    fn test_field_names_round_trip() {
        for field in DraftField::ALL {
            assert_eq!(field.as_str().parse::<DraftField>(), Ok(field));
        }
        assert_eq!("vendor".parse::<DraftField>(), Err("vendor".to_string()));
    }

    #[test]
    fn test_wire_field_order() {
        let json = serde_json::to_string(&ExpenseDraft::default()).unwrap();
        assert_eq!(
            json,
            r#"{"account_id":"","amount":"","paid_through_account_id":"","date":"","description":"","customer_id":""}"#
        );
    }
}
