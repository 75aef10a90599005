//! # Local Collection Store
//!
//! Owns the accounts, contacts, expenses and receipts collections.
//!
//! Controllers receive an `Arc<LocalCollectionStore>` at construction and
//! mutate only the collection their operation owns.

use crate::collection::Collection;
use crate::search::Searchable;
use crate::stats::DashboardStats;
use rust_decimal::Decimal;
use shared_types::{Account, AccountType, Contact, Expense, Receipt};

/// The dashboard's in-memory state.
pub struct LocalCollectionStore {
    accounts: Collection<Account>,
    contacts: Collection<Contact>,
    expenses: Collection<Expense>,
    receipts: Collection<Receipt>,
}

impl LocalCollectionStore {
    /// Create a store with four empty collections.
    pub fn new() -> Self {
        Self {
            accounts: Collection::new("accounts"),
            contacts: Collection::new("contacts"),
            expenses: Collection::new("expenses"),
            receipts: Collection::new("receipts"),
        }
    }

    pub fn accounts(&self) -> &Collection<Account> {
        &self.accounts
    }

    pub fn contacts(&self) -> &Collection<Contact> {
        &self.contacts
    }

    pub fn expenses(&self) -> &Collection<Expense> {
        &self.expenses
    }

    pub fn receipts(&self) -> &Collection<Receipt> {
        &self.receipts
    }

    /// Accounts an expense can be booked against.
    pub fn expense_accounts(&self) -> Vec<Account> {
        self.accounts
            .filtered(|account| account.account_type == AccountType::Expense)
    }

    /// Accounts an expense can be paid through (bank or cash).
    pub fn paid_through_accounts(&self) -> Vec<Account> {
        self.accounts
            .filtered(|account| account.account_type.is_paid_through())
    }

    pub fn search_accounts(&self, term: &str) -> Vec<Account> {
        self.accounts.filtered(|account| account.matches(term))
    }

    pub fn search_contacts(&self, term: &str) -> Vec<Contact> {
        self.contacts.filtered(|contact| contact.matches(term))
    }

    pub fn search_receipts(&self, term: &str) -> Vec<Receipt> {
        self.receipts.filtered(|receipt| receipt.matches(term))
    }

    /// Summary figures for the stats cards.
    ///
    /// The total saturates at `Decimal::MAX`.
    pub fn stats(&self) -> DashboardStats {
        let expenses = self.expenses.snapshot();
        let total_amount = expenses
            .iter()
            .map(|expense| expense.amount)
            .fold(Decimal::ZERO, |acc, amount| {
                acc.checked_add(amount).unwrap_or(Decimal::MAX)
            });

        DashboardStats {
            total_accounts: self.accounts.len(),
            active_contacts: self.contacts.len(),
            expense_count: expenses.len(),
            total_amount,
            receipt_count: self.receipts.len(),
        }
    }
}

impl Default for LocalCollectionStore {
    fn default() -> Self {
        Self::new()
    }
}
