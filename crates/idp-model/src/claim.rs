//! Claim domain models.
//!
//! A claim is a type/value pair attached to either a user or a role. The
//! claim row itself lives in a shared table; the owner link lives in a join
//! table, so every claim belongs to exactly one of {user, role}.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A claim attached to a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserClaim {
    /// Database-assigned identifier; zero until the claim is stored.
    pub id: i64,
    /// Claim type (e.g. "dept").
    pub claim_type: String,
    /// Claim value (e.g. "eng").
    pub claim_value: String,
    /// Owning user.
    pub user_id: Uuid,
}

impl UserClaim {
    /// Creates a claim for the given user, not yet stored.
    #[must_use]
    pub fn new(
        user_id: Uuid,
        claim_type: impl Into<String>,
        claim_value: impl Into<String>,
    ) -> Self {
        Self {
            id: 0,
            claim_type: claim_type.into(),
            claim_value: claim_value.into(),
            user_id,
        }
    }

    /// Checks whether this claim matches the given type/value pair.
    #[must_use]
    pub fn matches(&self, claim_type: &str, claim_value: &str) -> bool {
        self.claim_type == claim_type && self.claim_value == claim_value
    }
}

/// A claim attached to a role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleClaim {
    /// Database-assigned identifier; zero until the claim is stored.
    pub id: i64,
    /// Claim type.
    pub claim_type: String,
    /// Claim value.
    pub claim_value: String,
    /// Owning role.
    pub role_id: Uuid,
}

impl RoleClaim {
    /// Creates a claim for the given role, not yet stored.
    #[must_use]
    pub fn new(
        role_id: Uuid,
        claim_type: impl Into<String>,
        claim_value: impl Into<String>,
    ) -> Self {
        Self {
            id: 0,
            claim_type: claim_type.into(),
            claim_value: claim_value.into(),
            role_id,
        }
    }

    /// Checks whether this claim matches the given type/value pair.
    #[must_use]
    pub fn matches(&self, claim_type: &str, claim_value: &str) -> bool {
        self.claim_type == claim_type && self.claim_value == claim_value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_user_claim_is_unstored() {
        let user_id = Uuid::now_v7();
        let claim = UserClaim::new(user_id, "dept", "eng");

        assert_eq!(claim.id, 0);
        assert_eq!(claim.user_id, user_id);
        assert!(claim.matches("dept", "eng"));
        assert!(!claim.matches("dept", "sales"));
    }

    #[test]
    fn new_role_claim_is_unstored() {
        let role_id = Uuid::now_v7();
        let claim = RoleClaim::new(role_id, "scope", "admin:read");

        assert_eq!(claim.id, 0);
        assert_eq!(claim.role_id, role_id);
        assert!(claim.matches("scope", "admin:read"));
    }
}
