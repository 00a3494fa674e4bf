//! Role domain model.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::new_stamp;

/// A role users can be assigned to.
///
/// The normalized name is the uppercase form used for case-insensitive
/// uniqueness lookups; it is unique across roles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    /// Unique identifier.
    pub id: Uuid,
    /// Display role name.
    pub name: String,
    /// Uppercase form of the name, unique across roles.
    pub normalized_name: String,
    /// Opaque token rotated on every update, used for
    /// optimistic-concurrency detection.
    pub concurrency_stamp: Option<String>,
}

impl Role {
    /// Creates a new role with the given name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let normalized_name = name.to_uppercase();
        Self {
            id: Uuid::now_v7(),
            name,
            normalized_name,
            concurrency_stamp: Some(new_stamp()),
        }
    }

    /// Rotates the concurrency stamp.
    pub fn touch_concurrency_stamp(&mut self) {
        self.concurrency_stamp = Some(new_stamp());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_role_normalizes_name() {
        let role = Role::new("admin");

        assert_eq!(role.name, "admin");
        assert_eq!(role.normalized_name, "ADMIN");
        assert!(role.concurrency_stamp.is_some());
    }

    #[test]
    fn touch_concurrency_stamp_rotates() {
        let mut role = Role::new("admin");
        let before = role.concurrency_stamp.clone();

        role.touch_concurrency_stamp();
        assert_ne!(role.concurrency_stamp, before);
    }
}
