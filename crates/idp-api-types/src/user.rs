//! User wire model.

use chrono::{DateTime, Utc};
use idp_model::User;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Wire representation of a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserModel {
    /// Unique identifier.
    pub id: Uuid,
    /// Display user name.
    pub user_name: String,
    /// Uppercase form of the user name.
    pub normalized_user_name: String,
    /// Email address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Uppercase form of the email.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub normalized_email: Option<String>,
    /// Whether the email address has been confirmed.
    #[serde(default)]
    pub email_confirmed: bool,
    /// Hashed password.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password_hash: Option<String>,
    /// Security stamp.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub security_stamp: Option<String>,
    /// Concurrency stamp.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub concurrency_stamp: Option<String>,
    /// Phone number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    /// Whether the phone number has been confirmed.
    #[serde(default)]
    pub phone_number_confirmed: bool,
    /// Whether two-factor authentication is enabled.
    #[serde(default)]
    pub two_factor_enabled: bool,
    /// When the current lockout window ends.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lockout_end: Option<DateTime<Utc>>,
    /// Whether lockout is enabled for this user.
    #[serde(default)]
    pub lockout_enabled: bool,
    /// Consecutive failed access attempts.
    #[serde(default)]
    pub access_failed_count: i32,
}

impl UserModel {
    /// Converts this wire model into the domain entity.
    #[must_use]
    pub fn into_user(self) -> User {
        User {
            id: self.id,
            user_name: self.user_name,
            normalized_user_name: self.normalized_user_name,
            email: self.email,
            normalized_email: self.normalized_email,
            email_confirmed: self.email_confirmed,
            password_hash: self.password_hash,
            security_stamp: self.security_stamp,
            concurrency_stamp: self.concurrency_stamp,
            phone_number: self.phone_number,
            phone_number_confirmed: self.phone_number_confirmed,
            two_factor_enabled: self.two_factor_enabled,
            lockout_end: self.lockout_end,
            lockout_enabled: self.lockout_enabled,
            access_failed_count: self.access_failed_count,
        }
    }
}

impl From<User> for UserModel {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_every_field() {
        let mut user = User::new("alice").with_email("alice@example.com");
        user.password_hash = Some("hash".to_string());
        user.phone_number = Some("555-0100".to_string());
        user.phone_number_confirmed = true;
        user.two_factor_enabled = true;
        user.lockout_end = Some(Utc::now());
        user.access_failed_count = 3;

        let round_tripped = UserModel::from(user.clone()).into_user();
        assert_eq!(round_tripped, user);
    }

    #[test]
    fn serializes_camel_case() {
        let user = User::new("alice").with_email("alice@example.com");
        let json = serde_json::to_value(UserModel::from(user)).unwrap();

        assert!(json.get("userName").is_some());
        assert!(json.get("normalizedUserName").is_some());
        assert!(json.get("normalizedEmail").is_some());
        assert!(json.get("accessFailedCount").is_some());
        assert!(json.get("user_name").is_none());
    }
}
