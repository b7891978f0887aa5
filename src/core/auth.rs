//! Admin session logic - login, logout and credential change.
//!
//! There is one shared admin login. Sessions live in the local store regardless of which
//! tier holds the credential row.

use super::{
    repository::Repository,
    shim::{DataShim, Source},
};
use crate::{
    errors::{Error, Result},
    models::{AdminCredentials, AdminSession, Patch, Table},
};
use chrono::Utc;
use tracing::{debug, info, instrument};

/// Minimum length of a new admin username
pub const MIN_USERNAME_LEN: usize = 3;
/// Minimum length of a new admin password
pub const MIN_PASSWORD_LEN: usize = 6;

/// The settings-page form for changing the admin login
#[derive(Clone, Debug)]
pub struct CredentialsChange {
    /// Password of the logged-in admin, re-checked before anything changes
    pub current_password: String,
    #[allow(missing_docs)]
    pub new_username: String,
    #[allow(missing_docs)]
    pub new_password: String,
    /// Must equal `new_password`
    pub confirm_password: String,
}

impl CredentialsChange {
    fn validate(&self) -> Result<()> {
        if self.current_password.is_empty() {
            return Err(Error::validation("Current password is required"));
        }
        if self.new_username.trim().chars().count() < MIN_USERNAME_LEN {
            return Err(Error::validation(format!(
                "Username must be at least {MIN_USERNAME_LEN} characters"
            )));
        }
        if self.new_password.chars().count() < MIN_PASSWORD_LEN {
            return Err(Error::validation(format!(
                "Password must be at least {MIN_PASSWORD_LEN} characters"
            )));
        }
        if self.new_password != self.confirm_password {
            return Err(Error::validation("Passwords must match"));
        }
        Ok(())
    }
}

/// Checks the credentials and, on success, records the session.
#[instrument(skip(shim, password))]
pub async fn login(shim: &DataShim, username: &str, password: &str) -> Result<AdminSession> {
    shim.authenticate(username, password).await?;
    let session = AdminSession {
        username: username.to_string(),
        login_time: Utc::now(),
    };
    shim.local().save_session(&session).await?;
    info!("Admin logged in");
    Ok(session)
}

/// Ends the session.
pub async fn logout(shim: &DataShim) -> Result<()> {
    shim.local().clear_session().await
}

/// The logged-in admin, if any.
pub async fn current_session(shim: &DataShim) -> Option<AdminSession> {
    shim.local().session().await
}

/// Replaces the admin username and password.
///
/// Requires a session, re-verifies the current password against the session's username,
/// then rewrites the credential row and the session. Passwords stay plaintext.
///
/// The row may have been found in the local store while a remote backend is configured.
/// A write that matches nothing remotely is then applied locally, and the session is only
/// rewritten once some tier reports the row as changed.
#[instrument(skip(shim, change))]
pub async fn change_credentials(
    shim: &DataShim,
    change: &CredentialsChange,
) -> Result<AdminSession> {
    let session = current_session(shim).await.ok_or(Error::NotAuthenticated)?;
    change.validate()?;

    let credentials = shim
        .authenticate(&session.username, &change.current_password)
        .await
        .map_err(|_| Error::validation("Current password is incorrect"))?;

    let now = Utc::now();
    let patch = Patch::new()
        .set("username", change.new_username.trim())?
        .set("password", &change.new_password)?
        .set("updated_at", now)?;
    let outcome = shim
        .update::<AdminCredentials>(&credentials.id, &patch)
        .await?;
    let matched = if outcome.matched == 0 && outcome.source == Source::Remote {
        debug!("Credential row not held remotely, updating local store");
        shim.local()
            .update(Table::AdminCredentials, &credentials.id, &patch)
            .await?
    } else {
        outcome.matched
    };
    if matched == 0 {
        return Err(Error::Storage {
            message: "Admin credential row disappeared before it could be updated".to_string(),
        });
    }

    let updated = AdminSession {
        username: change.new_username.trim().to_string(),
        login_time: now,
    };
    shim.local().save_session(&updated).await?;
    info!("Admin credentials updated");
    Ok(updated)
}
