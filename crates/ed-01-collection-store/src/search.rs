//! Case-insensitive search over the fields a table displays.

use shared_types::{Account, Contact, Receipt};

/// A record that can be matched against a free-text search term.
pub trait Searchable {
    /// Field values shown to the user.
    fn search_fields(&self) -> Vec<&str>;

    /// Whether any displayed field contains `term`, ignoring case.
    ///
    /// A blank term matches everything.
    fn matches(&self, term: &str) -> bool {
        let term = term.trim().to_lowercase();
        if term.is_empty() {
            return true;
        }
        self.search_fields()
            .iter()
            .any(|field| field.to_lowercase().contains(&term))
    }
}

impl Searchable for Account {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.name.as_str(), self.account_type.as_str()]
    }
}

impl Searchable for Contact {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.name.as_str()];
        fields.extend(self.email.as_deref());
        fields.extend(self.phone.as_deref());
        fields
    }
}

impl Searchable for Receipt {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.filename.as_str()];
        fields.extend(self.description.as_deref());
        fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_types::AccountType;

    #[test]
    fn test_account_matches_name_and_type() {
        let a = Account::new("1", "Petty Cash", AccountType::Cash);
        assert!(a.matches("petty"));
        assert!(a.matches("CASH"));
        assert!(!a.matches("bank"));
    }

    #[test]
    fn test_blank_term_matches_all() {
        let a = Account::new("1", "Travel", AccountType::Expense);
        assert!(a.matches(""));
        assert!(a.matches("   "));
    }

    #[test]
    fn test_contact_matches_optional_fields() {
        let c = Contact::new("c1", "Acme Corp").with_email("billing@acme.test");
        assert!(c.matches("billing@"));
        assert!(!c.matches("555"));
        let c = c.with_phone("555-0100");
        assert!(c.matches("555"));
    }
}
