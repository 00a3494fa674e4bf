//! Login wire model.

use idp_model::UserLogin;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Wire representation of an external login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginModel {
    /// Provider that issued the login.
    pub login_provider: String,
    /// The user's key at the provider.
    pub provider_key: String,
    /// Display name for the provider.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider_display_name: Option<String>,
}

impl LoginModel {
    /// Attaches this login to a user, producing the domain entity.
    #[must_use]
    pub fn into_user_login(self, user_id: Uuid) -> UserLogin {
        UserLogin {
            login_provider: self.login_provider,
            provider_key: self.provider_key,
            provider_display_name: self.provider_display_name,
            user_id,
        }
    }
}

impl From<UserLogin> for LoginModel {
    fn from(login: UserLogin) -> Self {
        Self {
            login_provider: login.login_provider,
            provider_key: login.provider_key,
            provider_display_name: login.provider_display_name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_user_login() {
        let user_id = Uuid::now_v7();
        let model = LoginModel {
            login_provider: "google".to_string(),
            provider_key: "abc123".to_string(),
            provider_display_name: Some("Google".to_string()),
        };

        let login = model.clone().into_user_login(user_id);
        assert_eq!(login.user_id, user_id);
        assert_eq!(LoginModel::from(login), model);
    }
}
