//! Token wire model.

use idp_model::UserToken;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Wire representation of a user token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenModel {
    /// Provider namespace for the token.
    pub login_provider: String,
    /// Token name within the provider namespace.
    pub name: String,
    /// Token value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl TokenModel {
    /// Attaches this token to a user, producing the domain entity.
    #[must_use]
    pub fn into_user_token(self, user_id: Uuid) -> UserToken {
        UserToken {
            user_id,
            login_provider: self.login_provider,
            name: self.name,
            value: self.value,
        }
    }
}

impl From<UserToken> for TokenModel {
    fn from(token: UserToken) -> Self {
        Self {
            login_provider: token.login_provider,
            name: token.name,
            value: token.value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_user_token() {
        let user_id = Uuid::now_v7();
        let model = TokenModel {
            login_provider: "authenticator".to_string(),
            name: "recovery".to_string(),
            value: Some("xyz".to_string()),
        };

        let token = model.clone().into_user_token(user_id);
        assert_eq!(token.user_id, user_id);
        assert_eq!(TokenModel::from(token), model);
    }
}
