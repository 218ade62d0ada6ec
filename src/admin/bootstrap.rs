//! Bootstrap administrator account.

use tracing::{debug, info, warn};

use crate::auth::{register_with_grade, RegistrationRequest};
use crate::config::AdminConfig;
use crate::db::{Database, Grade, User, UserRepository};
use crate::Result;

/// Create the configured ADMIN account if its login id is not taken yet.
///
/// Returns the new account, or `None` when it already exists or no
/// password is configured.
pub async fn ensure_admin(db: &Database, config: &AdminConfig) -> Result<Option<User>> {
    if config.password.is_empty() {
        warn!(
            login_id = %config.login_id,
            "No admin password configured; skipping admin account creation"
        );
        return Ok(None);
    }

    let mut tx = db.begin().await?;
    let mut repo = UserRepository::new(&mut tx);

    if repo.login_id_exists(&config.login_id).await? {
        debug!(login_id = %config.login_id, "Admin account already exists");
        return Ok(None);
    }

    let request = RegistrationRequest::new(&config.nickname, &config.login_id, &config.password);
    let admin = register_with_grade(&mut repo, request, Grade::Admin).await?;
    tx.commit().await?;

    info!(user_id = admin.id, login_id = %admin.login_id, "Admin account created");
    Ok(Some(admin))
}
