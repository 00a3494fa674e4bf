//! User domain model.
//!
//! Users are the primary identity entities. They own claims, logins and
//! tokens, and participate in a many-to-many relationship with roles.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::new_stamp;

/// A user account.
///
/// The normalized user name and normalized email are the uppercase forms
/// used for case-insensitive uniqueness lookups; both are unique across
/// users (enforced by the database schema, not by this type).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    // === Identity ===
    /// Unique identifier.
    pub id: Uuid,
    /// Display user name.
    pub user_name: String,
    /// Uppercase form of the user name, unique across users.
    pub normalized_user_name: String,

    // === Email ===
    /// Email address.
    pub email: Option<String>,
    /// Uppercase form of the email, unique across users.
    pub normalized_email: Option<String>,
    /// Whether the email address has been confirmed.
    pub email_confirmed: bool,

    // === Credentials ===
    /// Hashed password, if one has been set.
    pub password_hash: Option<String>,
    /// Opaque token invalidated on credential changes to force
    /// re-authentication of existing sessions.
    pub security_stamp: Option<String>,
    /// Opaque token rotated on every update, used by the host framework
    /// for optimistic-concurrency detection.
    pub concurrency_stamp: Option<String>,

    // === Phone ===
    /// Phone number.
    pub phone_number: Option<String>,
    /// Whether the phone number has been confirmed.
    pub phone_number_confirmed: bool,

    // === Two-factor ===
    /// Whether two-factor authentication is enabled.
    pub two_factor_enabled: bool,

    // === Lockout ===
    /// When the current lockout window ends, if the user is locked out.
    pub lockout_end: Option<DateTime<Utc>>,
    /// Whether lockout is enabled for this user.
    pub lockout_enabled: bool,
    /// Consecutive failed access attempts since the last success.
    pub access_failed_count: i32,
}

impl User {
    /// Creates a new user with the given user name.
    ///
    /// Assigns a fresh identifier, derives the normalized user name, and
    /// issues initial security and concurrency stamps.
    #[must_use]
    pub fn new(user_name: impl Into<String>) -> Self {
        let user_name = user_name.into();
        let normalized_user_name = user_name.to_uppercase();
        Self {
            id: Uuid::now_v7(),
            user_name,
            normalized_user_name,
            email: None,
            normalized_email: None,
            email_confirmed: false,
            password_hash: None,
            security_stamp: Some(new_stamp()),
            concurrency_stamp: Some(new_stamp()),
            phone_number: None,
            phone_number_confirmed: false,
            two_factor_enabled: false,
            lockout_end: None,
            lockout_enabled: true,
            access_failed_count: 0,
        }
    }

    /// Sets the email and its normalized form.
    #[must_use]
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        let email = email.into();
        self.normalized_email = Some(email.to_uppercase());
        self.email = Some(email);
        self
    }

    /// Sets the phone number.
    #[must_use]
    pub fn with_phone_number(mut self, phone: impl Into<String>) -> Self {
        self.phone_number = Some(phone.into());
        self
    }

    /// Rotates the concurrency stamp.
    ///
    /// Must be called whenever the record is about to be persisted with
    /// changed fields.
    pub fn touch_concurrency_stamp(&mut self) {
        self.concurrency_stamp = Some(new_stamp());
    }

    /// Rotates the security stamp, invalidating existing sessions.
    pub fn rotate_security_stamp(&mut self) {
        self.security_stamp = Some(new_stamp());
    }

    /// Checks whether the user is locked out at the given instant.
    #[must_use]
    pub fn is_locked_out(&self, at: DateTime<Utc>) -> bool {
        self.lockout_enabled && self.lockout_end.is_some_and(|end| end > at)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn new_user_has_defaults() {
        let user = User::new("alice");

        assert_eq!(user.user_name, "alice");
        assert_eq!(user.normalized_user_name, "ALICE");
        assert!(user.email.is_none());
        assert!(!user.email_confirmed);
        assert!(user.security_stamp.is_some());
        assert!(user.concurrency_stamp.is_some());
        assert_eq!(user.access_failed_count, 0);
    }

    #[test]
    fn with_email_normalizes() {
        let user = User::new("alice").with_email("Alice@Example.com");

        assert_eq!(user.email.as_deref(), Some("Alice@Example.com"));
        assert_eq!(user.normalized_email.as_deref(), Some("ALICE@EXAMPLE.COM"));
    }

    #[test]
    fn touch_concurrency_stamp_rotates() {
        let mut user = User::new("alice");
        let before = user.concurrency_stamp.clone();

        user.touch_concurrency_stamp();
        assert_ne!(user.concurrency_stamp, before);
    }

    #[test]
    fn rotate_security_stamp_rotates() {
        let mut user = User::new("alice");
        let before = user.security_stamp.clone();

        user.rotate_security_stamp();
        assert_ne!(user.security_stamp, before);
    }

    #[test]
    fn lockout_window() {
        let now = Utc::now();
        let mut user = User::new("alice");
        assert!(!user.is_locked_out(now));

        user.lockout_end = Some(now + Duration::minutes(5));
        assert!(user.is_locked_out(now));

        user.lockout_enabled = false;
        assert!(!user.is_locked_out(now));

        user.lockout_enabled = true;
        user.lockout_end = Some(now - Duration::minutes(5));
        assert!(!user.is_locked_out(now));
    }
}
