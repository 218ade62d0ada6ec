//! Acting-user resolution.
//!
//! The request layer owns sessions and hands over whatever user id it has
//! (or none). Core operations only ever receive the resolved [`User`].

use tracing::debug;

use crate::db::{DbConn, User, UserRepository};
use crate::{BulletinError, Result};

/// Resolve the acting user from a session's user id.
///
/// A missing id, or one whose account no longer exists, is `Auth`.
pub async fn resolve_actor(conn: &mut DbConn, session_user_id: Option<i64>) -> Result<User> {
    let Some(user_id) = session_user_id else {
        return Err(BulletinError::Auth);
    };

    match UserRepository::new(conn).get_by_id(user_id).await? {
        Some(user) => Ok(user),
        None => {
            debug!(user_id, "Session refers to a deleted account");
            Err(BulletinError::Auth)
        }
    }
}

/// Load a user that an operation refers to, failing with `UserNotFound`.
///
/// Unlike [`resolve_actor`], absence here is an ordinary not-found result:
/// the account vanished between session resolution and the operation, or
/// the id names a target rather than the caller.
pub async fn require_user(conn: &mut DbConn, user_id: i64) -> Result<User> {
    UserRepository::new(conn)
        .get_by_id(user_id)
        .await?
        .ok_or(BulletinError::UserNotFound)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::NewUser;
    use crate::Database;

    #[tokio::test]
    async fn test_resolve_actor() {
        let db = Database::open_in_memory().await.unwrap();
        let mut conn = db.acquire().await.unwrap();
        let user = UserRepository::new(&mut conn)
            .create(&NewUser::new("alice", "hash", "Alice"))
            .await
            .unwrap();

        let actor = resolve_actor(&mut conn, Some(user.id)).await.unwrap();
        assert_eq!(actor.id, user.id);
    }

    #[tokio::test]
    async fn test_resolve_actor_without_session() {
        let db = Database::open_in_memory().await.unwrap();
        let mut conn = db.acquire().await.unwrap();

        let result = resolve_actor(&mut conn, None).await;
        assert!(matches!(result, Err(BulletinError::Auth)));
    }

    #[tokio::test]
    async fn test_require_user_missing() {
        let db = Database::open_in_memory().await.unwrap();
        let mut conn = db.acquire().await.unwrap();

        let result = require_user(&mut conn, 5).await;
        assert!(matches!(result, Err(BulletinError::UserNotFound)));
    }

    #[tokio::test]
    async fn test_resolve_actor_stale_session() {
        let db = Database::open_in_memory().await.unwrap();
        let mut conn = db.acquire().await.unwrap();

        let result = resolve_actor(&mut conn, Some(42)).await;
        assert!(matches!(result, Err(BulletinError::Auth)));
    }
}
