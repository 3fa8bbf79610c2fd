//! Resolving who the logged-in user is
//!
//! The login response carries only a token, so the user id is resolved in
//! order: the id already stored with the session, then a lookup of the
//! stored email through `/users/by-email`, which is cached back into the
//! session file. Without a stored session the caller is asked to log in.

use tracing::debug;

use super::{ClientError, FinanceClient, TokenStore};
use crate::models::UserId;

const LOGIN_HINT: &str = "run `fintrack login` first";

/// Resolve the current user's id
pub async fn resolve_user_id(
    client: &FinanceClient,
    store: &TokenStore,
) -> Result<UserId, ClientError> {
    let mut stored = store
        .load()?
        .ok_or_else(|| ClientError::NotLoggedIn(LOGIN_HINT.into()))?;

    if stored.is_expired() {
        return Err(ClientError::NotLoggedIn(format!(
            "session expired, {}",
            LOGIN_HINT
        )));
    }

    if let Some(id) = stored.user_id {
        return Ok(id);
    }

    debug!(email = %stored.email, "resolving user id by email");
    let user = match client.users().by_email(&stored.email).await {
        Ok(user) => user,
        Err(e) if e.is_not_found() || e.status() == Some(401) => {
            return Err(ClientError::NotLoggedIn(format!(
                "could not resolve {}, {}",
                stored.email, LOGIN_HINT
            )))
        }
        Err(e) => return Err(e),
    };

    let id = user.id.ok_or_else(|| {
        ClientError::NotLoggedIn(format!("server returned no id for {}", stored.email))
    })?;
    stored.user_id = Some(id);
    store.save(&stored)?;

    Ok(id)
}
