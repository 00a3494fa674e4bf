//! External login domain model.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An external login linked to a user (e.g. a social provider).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserLogin {
    /// Provider that issued the login (e.g. "google").
    pub login_provider: String,
    /// The user's key at the provider.
    pub provider_key: String,
    /// Display name for the provider.
    pub provider_display_name: Option<String>,
    /// Owning user.
    pub user_id: Uuid,
}

impl UserLogin {
    /// Creates a login link for the given user.
    #[must_use]
    pub fn new(
        user_id: Uuid,
        login_provider: impl Into<String>,
        provider_key: impl Into<String>,
    ) -> Self {
        Self {
            login_provider: login_provider.into(),
            provider_key: provider_key.into(),
            provider_display_name: None,
            user_id,
        }
    }

    /// Sets the provider display name.
    #[must_use]
    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.provider_display_name = Some(name.into());
        self
    }

    /// The composite key of this login.
    #[must_use]
    pub fn key(&self) -> UserLoginKey {
        UserLoginKey {
            login_provider: self.login_provider.clone(),
            provider_key: self.provider_key.clone(),
        }
    }
}

/// Composite key identifying a login: (provider, provider key).
///
/// Unique across all logins.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserLoginKey {
    /// Provider that issued the login.
    pub login_provider: String,
    /// The user's key at the provider.
    pub provider_key: String,
}

impl UserLoginKey {
    /// Creates a login key.
    #[must_use]
    pub fn new(login_provider: impl Into<String>, provider_key: impl Into<String>) -> Self {
        Self {
            login_provider: login_provider.into(),
            provider_key: provider_key.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_key_round_trip() {
        let user_id = Uuid::now_v7();
        let login = UserLogin::new(user_id, "google", "abc123").with_display_name("Google");

        assert_eq!(login.key(), UserLoginKey::new("google", "abc123"));
        assert_eq!(login.provider_display_name.as_deref(), Some("Google"));
    }
}
