//! Claim wire models.

use idp_model::{RoleClaim, UserClaim};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Wire representation of a claim: a type/value pair.
///
/// The owner (user or role) is carried by the route, not the body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimModel {
    /// Claim type.
    #[serde(rename = "type")]
    pub claim_type: String,
    /// Claim value.
    #[serde(rename = "value")]
    pub claim_value: String,
}

impl ClaimModel {
    /// Creates a claim model.
    #[must_use]
    pub fn new(claim_type: impl Into<String>, claim_value: impl Into<String>) -> Self {
        Self {
            claim_type: claim_type.into(),
            claim_value: claim_value.into(),
        }
    }

    /// Attaches this claim to a user, producing the domain entity.
    #[must_use]
    pub fn into_user_claim(self, user_id: Uuid) -> UserClaim {
        UserClaim::new(user_id, self.claim_type, self.claim_value)
    }

    /// Attaches this claim to a role, producing the domain entity.
    #[must_use]
    pub fn into_role_claim(self, role_id: Uuid) -> RoleClaim {
        RoleClaim::new(role_id, self.claim_type, self.claim_value)
    }
}

impl From<UserClaim> for ClaimModel {
    fn from(claim: UserClaim) -> Self {
        Self {
            claim_type: claim.claim_type,
            claim_value: claim.claim_value,
        }
    }
}

impl From<RoleClaim> for ClaimModel {
    fn from(claim: RoleClaim) -> Self {
        Self {
            claim_type: claim.claim_type,
            claim_value: claim.claim_value,
        }
    }
}

/// Request body for replacing one user claim with another.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplaceUserClaimModel {
    /// The claim to replace.
    pub claim: ClaimModel,
    /// The claim that takes its place.
    pub new_claim: ClaimModel,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_user_claim() {
        let user_id = Uuid::now_v7();
        let model = ClaimModel::new("dept", "eng");
        let claim = model.clone().into_user_claim(user_id);

        assert_eq!(claim.user_id, user_id);
        assert_eq!(ClaimModel::from(claim), model);
    }

    #[test]
    fn type_and_value_on_the_wire() {
        let json = serde_json::to_value(ClaimModel::new("dept", "eng")).unwrap();
        assert_eq!(json["type"], "dept");
        assert_eq!(json["value"], "eng");
    }

    #[test]
    fn replace_model_shape() {
        let model = ReplaceUserClaimModel {
            claim: ClaimModel::new("dept", "eng"),
            new_claim: ClaimModel::new("dept", "sales"),
        };
        let json = serde_json::to_value(&model).unwrap();

        assert_eq!(json["claim"]["type"], "dept");
        assert_eq!(json["newClaim"]["value"], "sales");
    }
}
