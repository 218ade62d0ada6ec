//! User service.

use tracing::info;

use crate::auth::{self, hash_password, require_owner, require_user, RegistrationRequest};
use crate::board::{Board, BoardRepository};
use crate::cascade::{self, CascadeReport};
use crate::db::{Database, User, UserRepository};
use crate::{BulletinError, Result};

/// User service for account self-service.
pub struct UserService<'a> {
    db: &'a Database,
}

impl<'a> UserService<'a> {
    /// Create a new UserService.
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Register a new SILVER account.
    pub async fn register(&self, request: RegistrationRequest) -> Result<User> {
        let mut tx = self.db.begin().await?;
        let user = auth::register(&mut UserRepository::new(&mut tx), request).await?;
        tx.commit().await?;
        Ok(user)
    }

    /// Check credentials. Unknown id and wrong password are both `UserNotFound`.
    pub async fn login(&self, login_id: &str, password: &str) -> Result<User> {
        let mut conn = self.db.acquire().await?;
        auth::login(&mut UserRepository::new(&mut conn), login_id, password).await
    }

    /// Boards written by a user, newest first.
    pub async fn get_user_boards(&self, user_id: i64) -> Result<Vec<Board>> {
        let mut conn = self.db.acquire().await?;
        require_user(&mut conn, user_id).await?;
        BoardRepository::new(&mut conn).list_by_user(user_id).await
    }

    /// Boards a user has liked, most recent like first.
    pub async fn get_like_boards(&self, user_id: i64) -> Result<Vec<Board>> {
        let mut conn = self.db.acquire().await?;
        require_user(&mut conn, user_id).await?;
        BoardRepository::new(&mut conn).list_liked_by(user_id).await
    }

    /// Replace a user's password. Only the user themself may do this.
    pub async fn edit_password(&self, user_id: i64, actor: &User, new_password: &str) -> Result<()> {
        let mut tx = self.db.begin().await?;

        let user = require_user(&mut tx, user_id).await?;
        require_owner(actor, user.id)?;
        let new_hash = hash_password(new_password)?;

        if !UserRepository::new(&mut tx)
            .update_password(user.id, &new_hash)
            .await?
        {
            return Err(BulletinError::UserNotFound);
        }

        tx.commit().await?;

        info!(user_id, login_id = %user.login_id, "Password changed");
        Ok(())
    }

    /// Delete an account and everything attached to it. Only the user
    /// themself may do this.
    pub async fn delete_user(&self, user_id: i64, actor: &User) -> Result<CascadeReport> {
        let mut tx = self.db.begin().await?;
        let report = cascade::delete_user(&mut tx, user_id, actor).await?;
        tx.commit().await?;
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::BoardService;
    use crate::like::LikeService;

    async fn setup() -> (Database, User, User) {
        let db = Database::open_in_memory().await.unwrap();
        let service = UserService::new(&db);
        let alice = service
            .register(RegistrationRequest::new("Alice", "alice", "pw1"))
            .await
            .unwrap();
        let bob = service
            .register(RegistrationRequest::new("Bob", "bob", "pw2"))
            .await
            .unwrap();
        (db, alice, bob)
    }

    #[tokio::test]
    async fn test_register_and_login() {
        let (db, alice, _) = setup().await;
        let service = UserService::new(&db);

        let user = service.login("alice", "pw1").await.unwrap();
        assert_eq!(user.id, alice.id);

        let duplicate = service
            .register(RegistrationRequest::new("Other", "alice", "x"))
            .await;
        assert!(matches!(duplicate, Err(BulletinError::DuplicateLoginId)));
    }

    #[tokio::test]
    async fn test_user_and_liked_boards() {
        let (db, alice, bob) = setup().await;
        let boards = BoardService::new(&db);
        let first = boards.write(&alice, "one", "c").await.unwrap().board;
        let second = boards.write(&alice, "two", "c").await.unwrap().board;
        LikeService::new(&db).like(first.id, &bob).await.unwrap();

        let service = UserService::new(&db);
        let written = service.get_user_boards(alice.id).await.unwrap();
        assert_eq!(written.len(), 2);
        assert_eq!(written[0].id, second.id);

        let liked = service.get_like_boards(bob.id).await.unwrap();
        assert_eq!(liked.len(), 1);
        assert_eq!(liked[0].id, first.id);

        assert!(matches!(
            service.get_user_boards(999).await,
            Err(BulletinError::UserNotFound)
        ));
    }

    #[tokio::test]
    async fn test_edit_password() {
        let (db, alice, bob) = setup().await;
        let service = UserService::new(&db);

        let result = service.edit_password(alice.id, &bob, "hacked").await;
        assert!(matches!(result, Err(BulletinError::InvalidRequest)));

        let result = service.edit_password(alice.id, &alice, " ").await;
        assert!(matches!(result, Err(BulletinError::Validation(_))));

        service.edit_password(alice.id, &alice, "newpw").await.unwrap();
        assert!(service.login("alice", "pw1").await.is_err());
        assert!(service.login("alice", "newpw").await.is_ok());
    }

    #[tokio::test]
    async fn test_delete_user() {
        let (db, alice, bob) = setup().await;
        BoardService::new(&db).write(&alice, "t", "c").await.unwrap();
        let service = UserService::new(&db);

        let result = service.delete_user(alice.id, &bob).await;
        assert!(matches!(result, Err(BulletinError::InvalidRequest)));

        let report = service.delete_user(alice.id, &alice).await.unwrap();
        assert_eq!(report.users, 1);
        assert_eq!(report.boards, 1);
        assert!(matches!(
            service.login("alice", "pw1").await,
            Err(BulletinError::UserNotFound)
        ));
    }
}
