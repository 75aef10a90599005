//! # Core Domain Entities
//!
//! Defines the records the dashboard keeps in memory.
//!
//! ## Clusters
//!
//! - **Reference data** (replaced wholesale by a sync): `Account`, `Contact`
//! - **Locally created** (optimistic inserts): `Expense`, `Receipt`
//! - **Addressing**: `ResourceKey`

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

// =============================================================================
// RESOURCE KEYS
// =============================================================================

/// Names one remotely synchronized collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKey {
    /// The chart of accounts.
    ChartOfAccounts,
    /// Customer and vendor contacts.
    Contacts,
    /// Receipt attachments.
    Receipts,
}

impl ResourceKey {
    /// Every resource key, in display order.
    pub const ALL: [ResourceKey; 3] = [
        ResourceKey::ChartOfAccounts,
        ResourceKey::Contacts,
        ResourceKey::Receipts,
    ];

    /// Stable machine name (`chart_of_accounts`, `contacts`, `receipts`).
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKey::ChartOfAccounts => "chart_of_accounts",
            ResourceKey::Contacts => "contacts",
            ResourceKey::Receipts => "receipts",
        }
    }

    /// Title used in user-facing messages ("Syncing Chart of Accounts...").
    pub fn title(&self) -> &'static str {
        match self {
            ResourceKey::ChartOfAccounts => "Chart of Accounts",
            ResourceKey::Contacts => "Contacts",
            ResourceKey::Receipts => "Receipts",
        }
    }

    /// Lower-case phrase used inside failure messages.
    pub fn phrase(&self) -> &'static str {
        match self {
            ResourceKey::ChartOfAccounts => "chart of accounts",
            ResourceKey::Contacts => "contacts",
            ResourceKey::Receipts => "receipts",
        }
    }
}

impl fmt::Display for ResourceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string names no known resource.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown resource: {0}")]
pub struct UnknownResource(pub String);

impl FromStr for ResourceKey {
    type Err = UnknownResource;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "chart_of_accounts" | "accounts" | "chartofaccounts" => Ok(ResourceKey::ChartOfAccounts),
            "contacts" => Ok(ResourceKey::Contacts),
            "receipts" => Ok(ResourceKey::Receipts),
            _ => Err(UnknownResource(s.to_string())),
        }
    }
}

/// Anything stored in a local collection is addressed by a string id.
pub trait Identified {
    /// The record's identifier, unique within its collection.
    fn id(&self) -> &str;
}

// =============================================================================
// REFERENCE DATA
// =============================================================================

/// Account classification as reported by the accounting backend.
///
/// The backend knows many more types; everything that is not expense, bank
/// or cash is folded into `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountType {
    Expense,
    Bank,
    Cash,
    #[default]
    #[serde(other)]
    Other,
}

impl AccountType {
    /// Whether an account of this type can pay for an expense.
    pub fn is_paid_through(&self) -> bool {
        matches!(self, AccountType::Bank | AccountType::Cash)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AccountType::Expense => "expense",
            AccountType::Bank => "bank",
            AccountType::Cash => "cash",
            AccountType::Other => "other",
        }
    }
}

/// One entry of the chart of accounts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    #[serde(rename = "account_id")]
    pub id: String,
    #[serde(rename = "account_name")]
    pub name: String,
    #[serde(rename = "account_type", default)]
    pub account_type: AccountType,
}

impl Account {
    pub fn new(id: impl Into<String>, name: impl Into<String>, account_type: AccountType) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            account_type,
        }
    }
}

impl Identified for Account {
    fn id(&self) -> &str {
        &self.id
    }
}

/// A customer or vendor contact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    #[serde(rename = "contact_id")]
    pub id: String,
    #[serde(rename = "contact_name")]
    pub name: String,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub phone: Option<String>,
}

impl Contact {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            email: None,
            phone: None,
        }
    }

    /// Builder-style email setter.
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Builder-style phone setter.
    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }
}

impl Identified for Contact {
    fn id(&self) -> &str {
        &self.id
    }
}

// The backend sends "" rather than omitting empty contact fields.
fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<String> = Option::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.trim().is_empty()))
}

// =============================================================================
// LOCALLY CREATED RECORDS
// =============================================================================

/// An expense created through the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expense {
    pub id: String,
    pub account_id: String,
    pub paid_through_account_id: String,
    pub amount: Decimal,
    pub date: NaiveDate,
    pub description: String,
    pub customer_id: Option<String>,
}

impl Identified for Expense {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Metadata of an uploaded receipt attachment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Receipt {
    pub id: String,
    pub filename: String,
    pub description: Option<String>,
    /// Size in bytes.
    pub file_size: Option<u64>,
    pub upload_date: DateTime<Utc>,
    /// MIME type, e.g. `application/pdf`.
    pub file_type: Option<String>,
}

impl Identified for Receipt {
    fn id(&self) -> &str {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_key_parse_aliases() {
        assert_eq!("accounts".parse(), Ok(ResourceKey::ChartOfAccounts));
        assert_eq!("chart-of-accounts".parse(), Ok(ResourceKey::ChartOfAccounts));
        assert_eq!("Contacts".parse(), Ok(ResourceKey::Contacts));
        assert_eq!("receipts".parse(), Ok(ResourceKey::Receipts));
        assert!("invoices".parse::<ResourceKey>().is_err());
    }

    #[test]
    fn test_resource_key_messages() {
        assert_eq!(ResourceKey::ChartOfAccounts.title(), "Chart of Accounts");
        assert_eq!(ResourceKey::ChartOfAccounts.phrase(), "chart of accounts");
        assert_eq!(ResourceKey::Contacts.to_string(), "contacts");
    }

    #[test]
    fn test_account_from_backend_payload() {
        let json = r#"{"account_id":"460000000000388","account_name":"Office Supplies","account_type":"expense"}"#;
        let account: Account = serde_json::from_str(json).unwrap();
        assert_eq!(account.id, "460000000000388");
        assert_eq!(account.name, "Office Supplies");
        assert_eq!(account.account_type, AccountType::Expense);
    }

    #[test]
    fn test_unknown_account_type_is_other() {
        let json = r#"{"account_id":"1","account_name":"Retained Earnings","account_type":"equity"}"#;
        let account: Account = serde_json::from_str(json).unwrap();
        assert_eq!(account.account_type, AccountType::Other);

        let json = r#"{"account_id":"2","account_name":"No type"}"#;
        let account: Account = serde_json::from_str(json).unwrap();
        assert_eq!(account.account_type, AccountType::Other);
    }

    #[test]
    fn test_paid_through_types() {
        assert!(AccountType::Bank.is_paid_through());
        assert!(AccountType::Cash.is_paid_through());
        assert!(!AccountType::Expense.is_paid_through());
        assert!(!AccountType::Other.is_paid_through());
    }

    #[test]
    fn test_contact_empty_fields_are_none() {
        let json = r#"{"contact_id":"c1","contact_name":"Acme","email":"","phone":"555-0100"}"#;
        let contact: Contact = serde_json::from_str(json).unwrap();
        assert_eq!(contact.email, None);
        assert_eq!(contact.phone.as_deref(), Some("555-0100"));

        let json = r#"{"contact_id":"c2","contact_name":"Globex"}"#;
        let contact: Contact = serde_json::from_str(json).unwrap();
        assert_eq!(contact.email, None);
        assert_eq!(contact.phone, None);
    }
}
