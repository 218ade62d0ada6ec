//! Ownership and role checks.
//!
//! Every edit or delete of a board, comment, reply, or account passes
//! through [`require_owner`] before anything is written. The check is a
//! plain identity comparison; administrators go through the separate
//! [`crate::admin`] operations instead of bypassing it here.

use tracing::debug;

use crate::db::User;
use crate::{BulletinError, Result};

/// Fail with `InvalidRequest` unless `actor` is the owner.
///
/// # Examples
///
/// ```ignore
/// use bulletin::auth::require_owner;
///
/// assert!(require_owner(&alice, board.user_id).is_ok());
/// assert!(require_owner(&bob, board.user_id).is_err());
/// ```
pub fn require_owner(actor: &User, owner_id: i64) -> Result<()> {
    if actor.id != owner_id {
        debug!(actor_id = actor.id, owner_id, "Ownership check failed");
        return Err(BulletinError::InvalidRequest);
    }
    Ok(())
}

/// Fail with `InvalidRequest` unless `actor` holds the ADMIN grade.
pub fn require_admin(actor: &User) -> Result<()> {
    if !actor.is_admin() {
        debug!(actor_id = actor.id, grade = %actor.grade, "Admin check failed");
        return Err(BulletinError::InvalidRequest);
    }
    Ok(())
}
