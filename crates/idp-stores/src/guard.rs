//! Call-boundary guards shared by the store adapters.

use tokio_util::sync::CancellationToken;

use crate::error::{StoreError, StoreResult};

/// Fails fast if the caller has already cancelled.
///
/// Checked at the top of every store method; cancellation is not
/// propagated into in-flight I/O.
pub(crate) fn ensure_not_cancelled(token: &CancellationToken) -> StoreResult<()> {
    if token.is_cancelled() {
        return Err(StoreError::Cancelled);
    }
    Ok(())
}

/// Rejects empty or whitespace-only required arguments before any I/O.
pub(crate) fn ensure_not_blank(value: &str, name: &'static str) -> StoreResult<()> {
    if value.trim().is_empty() {
        return Err(StoreError::InvalidArgument(name));
    }
    Ok(())
}

/// Parses a host-framework user id string.
pub(crate) fn parse_user_id(user_id: &str) -> StoreResult<uuid::Uuid> {
    uuid::Uuid::parse_str(user_id).map_err(|_| StoreError::InvalidUserId(user_id.to_string()))
}

/// Parses a host-framework role id string.
pub(crate) fn parse_role_id(role_id: &str) -> StoreResult<uuid::Uuid> {
    uuid::Uuid::parse_str(role_id).map_err(|_| StoreError::InvalidRoleId(role_id.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cancelled_token_fails_fast() {
        let token = CancellationToken::new();
        assert!(ensure_not_cancelled(&token).is_ok());

        token.cancel();
        assert!(matches!(
            ensure_not_cancelled(&token),
            Err(StoreError::Cancelled)
        ));
    }

    #[test]
    fn blank_arguments_are_rejected() {
        assert!(ensure_not_blank("admin", "role_name").is_ok());
        assert!(matches!(
            ensure_not_blank("  ", "role_name"),
            Err(StoreError::InvalidArgument("role_name"))
        ));
    }
}
