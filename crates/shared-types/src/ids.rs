//! Client-side identifiers for optimistic records.
//!
//! Records inserted before the backend has echoed a canonical id get a
//! prefixed UUID so they can never collide with a server-issued id.

use uuid::Uuid;

/// Prefix carried by every locally generated identifier.
pub const LOCAL_ID_PREFIX: &str = "local-";

/// Generate a fresh local identifier.
pub fn local_id() -> String {
    format!("{}{}", LOCAL_ID_PREFIX, Uuid::new_v4().simple())
}

/// Whether `id` was generated on this client.
pub fn is_local_id(id: &str) -> bool {
    id.starts_with(LOCAL_ID_PREFIX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_ids_are_unique_and_tagged() {
        let a = local_id();
        let b = local_id();
        assert_ne!(a, b);
        assert!(is_local_id(&a));
        assert!(!is_local_id("460000000000388"));
    }
}
