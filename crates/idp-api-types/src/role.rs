//! Role wire models.

use idp_model::Role;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Wire representation of a role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleModel {
    /// Unique identifier.
    pub id: Uuid,
    /// Display role name.
    pub name: String,
    /// Uppercase form of the name.
    pub normalized_name: String,
    /// Concurrency stamp.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub concurrency_stamp: Option<String>,
}

impl RoleModel {
    /// Converts this wire model into the domain entity.
    #[must_use]
    pub fn into_role(self) -> Role {
        Role {
            id: self.id,
            name: self.name,
            normalized_name: self.normalized_name,
            concurrency_stamp: self.concurrency_stamp,
        }
    }
}

impl From<Role> for RoleModel {
    fn from(role: Role) -> Self {
        Self {
            id: role.id,
            name: role.name,
            normalized_name: role.normalized_name,
            concurrency_stamp: role.concurrency_stamp,
        }
    }
}

/// Request body for adding a user to a role by name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddRoleModel {
    /// Normalized name of the role to add the user to.
    pub role_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_every_field() {
        let role = Role::new("admin");
        let round_tripped = RoleModel::from(role.clone()).into_role();
        assert_eq!(round_tripped, role);
    }

    #[test]
    fn serializes_camel_case() {
        let json = serde_json::to_value(RoleModel::from(Role::new("admin"))).unwrap();
        assert!(json.get("normalizedName").is_some());
        assert!(json.get("concurrencyStamp").is_some());
    }
}
