//! Authentication token domain model.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A named token stored for a user under a login provider
/// (e.g. a refresh token or an authenticator key).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserToken {
    /// Owning user.
    pub user_id: Uuid,
    /// Provider namespace for the token.
    pub login_provider: String,
    /// Token name within the provider namespace.
    pub name: String,
    /// Token value.
    pub value: Option<String>,
}

impl UserToken {
    /// Creates a token for the given user.
    #[must_use]
    pub fn new(
        user_id: Uuid,
        login_provider: impl Into<String>,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            user_id,
            login_provider: login_provider.into(),
            name: name.into(),
            value: Some(value.into()),
        }
    }

    /// The composite key of this token.
    #[must_use]
    pub fn key(&self) -> UserTokenKey {
        UserTokenKey {
            user_id: self.user_id,
            login_provider: self.login_provider.clone(),
            name: self.name.clone(),
        }
    }
}

/// Composite key identifying a token: (user, provider, name).
///
/// Unique across all tokens.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserTokenKey {
    /// Owning user.
    pub user_id: Uuid,
    /// Provider namespace for the token.
    pub login_provider: String,
    /// Token name within the provider namespace.
    pub name: String,
}

impl UserTokenKey {
    /// Creates a token key.
    #[must_use]
    pub fn new(
        user_id: Uuid,
        login_provider: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            user_id,
            login_provider: login_provider.into(),
            name: name.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_key_round_trip() {
        let user_id = Uuid::now_v7();
        let token = UserToken::new(user_id, "authenticator", "recovery", "xyz");

        assert_eq!(
            token.key(),
            UserTokenKey::new(user_id, "authenticator", "recovery")
        );
        assert_eq!(token.value.as_deref(), Some("xyz"));
    }
}
