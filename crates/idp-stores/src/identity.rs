//! Framework-facing identity records.
//!
//! The host authentication framework works with string-keyed user and role
//! records; these map field-for-field onto the domain entities. Pure state
//! (password hash, stamps, lockout counters, phone, two-factor) lives on
//! the record and is persisted as a whole through the store's `update`, so
//! the accessor methods here never touch a backend.

use chrono::{DateTime, Utc};
use idp_model::{Role, User};
use uuid::Uuid;

use crate::error::{StoreError, StoreResult};

fn new_stamp() -> String {
    Uuid::now_v7().simple().to_string()
}

/// User record as seen by the host authentication framework.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct IdentityUser {
    /// String form of the user's UUID.
    pub id: String,
    /// Display user name.
    pub user_name: String,
    /// Uppercase form of the user name.
    pub normalized_user_name: String,
    /// Email address.
    pub email: Option<String>,
    /// Uppercase form of the email.
    pub normalized_email: Option<String>,
    /// Whether the email address has been confirmed.
    pub email_confirmed: bool,
    /// Hashed password.
    pub password_hash: Option<String>,
    /// Security stamp.
    pub security_stamp: Option<String>,
    /// Concurrency stamp.
    pub concurrency_stamp: Option<String>,
    /// Phone number.
    pub phone_number: Option<String>,
    /// Whether the phone number has been confirmed.
    pub phone_number_confirmed: bool,
    /// Whether two-factor authentication is enabled.
    pub two_factor_enabled: bool,
    /// When the current lockout window ends.
    pub lockout_end: Option<DateTime<Utc>>,
    /// Whether lockout is enabled.
    pub lockout_enabled: bool,
    /// Consecutive failed access attempts.
    pub access_failed_count: i32,
}

impl IdentityUser {
    /// Creates a record for a new user with fresh stamps.
    #[must_use]
    pub fn new(user_name: impl Into<String>) -> Self {
        let user_name = user_name.into();
        let normalized_user_name = user_name.to_uppercase();
        Self {
            id: Uuid::now_v7().to_string(),
            user_name,
            normalized_user_name,
            security_stamp: Some(new_stamp()),
            concurrency_stamp: Some(new_stamp()),
            lockout_enabled: true,
            ..Self::default()
        }
    }

    /// Parses the record's id as a UUID.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::InvalidUserId` if the id is not a UUID.
    pub fn uuid(&self) -> StoreResult<Uuid> {
        Uuid::parse_str(&self.id).map_err(|_| StoreError::InvalidUserId(self.id.clone()))
    }

    /// Converts this record into the domain entity.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::InvalidUserId` if the id is not a UUID.
    pub fn to_user(&self) -> StoreResult<User> {
        Ok(User {
            id: self.uuid()?,
            user_name: self.user_name.clone(),
            normalized_user_name: self.normalized_user_name.clone(),
            email: self.email.clone(),
            normalized_email: self.normalized_email.clone(),
            email_confirmed: self.email_confirmed,
            password_hash: self.password_hash.clone(),
            security_stamp: self.security_stamp.clone(),
            concurrency_stamp: self.concurrency_stamp.clone(),
            phone_number: self.phone_number.clone(),
            phone_number_confirmed: self.phone_number_confirmed,
            two_factor_enabled: self.two_factor_enabled,
            lockout_end: self.lockout_end,
            lockout_enabled: self.lockout_enabled,
            access_failed_count: self.access_failed_count,
        })
    }

    /// Whether a password hash has been set.
    #[must_use]
    pub const fn has_password(&self) -> bool {
        self.password_hash.is_some()
    }

    /// Records a failed access attempt and returns the new count.
    pub fn increment_access_failed_count(&mut self) -> i32 {
        self.access_failed_count += 1;
        self.access_failed_count
    }

    /// Clears the failed access counter after a successful sign-in.
    pub fn reset_access_failed_count(&mut self) {
        self.access_failed_count = 0;
    }

    /// Rotates the security stamp, invalidating existing sessions.
    pub fn rotate_security_stamp(&mut self) {
        self.security_stamp = Some(new_stamp());
    }

    /// Rotates the concurrency stamp; called before every persist.
    pub fn touch_concurrency_stamp(&mut self) {
        self.concurrency_stamp = Some(new_stamp());
    }
}

impl From<User> for IdentityUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id.to_string(),
            user_name: user.user_name,
            normalized_user_name: user.normalized_user_name,
            email: user.email,
            normalized_email: user.normalized_email,
            email_confirmed: user.email_confirmed,
            password_hash: user.password_hash,
            security_stamp: user.security_stamp,
            concurrency_stamp: user.concurrency_stamp,
            phone_number: user.phone_number,
            phone_number_confirmed: user.phone_number_confirmed,
            two_factor_enabled: user.two_factor_enabled,
            lockout_end: user.lockout_end,
            lockout_enabled: user.lockout_enabled,
            access_failed_count: user.access_failed_count,
        }
    }
}

/// Role record as seen by the host authentication framework.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct IdentityRole {
    /// String form of the role's UUID.
    pub id: String,
    /// Display role name.
    pub name: String,
    /// Uppercase form of the name.
    pub normalized_name: String,
    /// Concurrency stamp.
    pub concurrency_stamp: Option<String>,
}

impl IdentityRole {
    /// Creates a record for a new role with a fresh stamp.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let normalized_name = name.to_uppercase();
        Self {
            id: Uuid::now_v7().to_string(),
            name,
            normalized_name,
            concurrency_stamp: Some(new_stamp()),
        }
    }

    /// Parses the record's id as a UUID.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::InvalidRoleId` if the id is not a UUID.
    pub fn uuid(&self) -> StoreResult<Uuid> {
        Uuid::parse_str(&self.id).map_err(|_| StoreError::InvalidRoleId(self.id.clone()))
    }

    /// Rotates the concurrency stamp; called before every persist.
    pub fn touch_concurrency_stamp(&mut self) {
        self.concurrency_stamp = Some(new_stamp());
    }

    /// Converts this record into the domain entity.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::InvalidRoleId` if the id is not a UUID.
    pub fn to_role(&self) -> StoreResult<Role> {
        Ok(Role {
            id: self.uuid()?,
            name: self.name.clone(),
            normalized_name: self.normalized_name.clone(),
            concurrency_stamp: self.concurrency_stamp.clone(),
        })
    }
}

impl From<Role> for IdentityRole {
    fn from(role: Role) -> Self {
        Self {
            id: role.id.to_string(),
            name: role.name,
            normalized_name: role.normalized_name,
            concurrency_stamp: role.concurrency_stamp,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_round_trips_every_field() {
        let mut user = User::new("alice").with_email("alice@example.com");
        user.password_hash = Some("hash".to_string());
        user.phone_number = Some("555-0100".to_string());
        user.two_factor_enabled = true;
        user.lockout_end = Some(Utc::now());
        user.access_failed_count = 2;

        let record = IdentityUser::from(user.clone());
        assert_eq!(record.to_user().unwrap(), user);
    }

    #[test]
    fn role_round_trips_every_field() {
        let role = Role::new("admin");
        let record = IdentityRole::from(role.clone());
        assert_eq!(record.to_role().unwrap(), role);
    }

    #[test]
    fn malformed_user_id_is_rejected() {
        let record = IdentityUser {
            id: "not-a-uuid".to_string(),
            ..IdentityUser::new("alice")
        };

        assert!(matches!(
            record.to_user(),
            Err(StoreError::InvalidUserId(_))
        ));
    }

    #[test]
    fn access_failed_counter() {
        let mut record = IdentityUser::new("alice");

        assert_eq!(record.increment_access_failed_count(), 1);
        assert_eq!(record.increment_access_failed_count(), 2);

        record.reset_access_failed_count();
        assert_eq!(record.access_failed_count, 0);
    }

    #[test]
    fn new_user_record_has_stamps() {
        let record = IdentityUser::new("alice");

        assert!(record.security_stamp.is_some());
        assert!(record.concurrency_stamp.is_some());
        assert!(record.lockout_enabled);
        assert!(!record.has_password());
    }
}
