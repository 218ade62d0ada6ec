//! Like service.

use tracing::debug;

use crate::auth::require_user;
use crate::board::BoardRepository;
use crate::db::{Database, User};
use crate::guard::check_like;
use crate::{BulletinError, Result};

use super::repository::LikeRepository;
use super::types::Like;

/// Like service for liking and un-liking boards.
pub struct LikeService<'a> {
    db: &'a Database,
}

impl<'a> LikeService<'a> {
    /// Create a new LikeService.
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Like a board.
    ///
    /// A second like for the same pair fails with `DuplicateLike`.
    pub async fn like(&self, board_id: i64, actor: &User) -> Result<Like> {
        let mut tx = self.db.begin().await?;

        let user = require_user(&mut tx, actor.id).await?;
        BoardRepository::new(&mut tx)
            .get_by_id(board_id)
            .await?
            .ok_or(BulletinError::BoardNotFound)?;

        let mut likes = LikeRepository::new(&mut tx);
        check_like(&mut likes, user.id, board_id).await?;
        let like = likes.create(user.id, board_id).await?;

        tx.commit().await?;

        debug!(user_id = user.id, board_id, "Board liked");
        Ok(like)
    }

    /// Withdraw a like. Fails with `LikeNotFound` if there is none.
    pub async fn cancel(&self, board_id: i64, actor: &User) -> Result<()> {
        let mut tx = self.db.begin().await?;

        let user = require_user(&mut tx, actor.id).await?;
        BoardRepository::new(&mut tx)
            .get_by_id(board_id)
            .await?
            .ok_or(BulletinError::BoardNotFound)?;

        let mut likes = LikeRepository::new(&mut tx);
        let like = likes
            .find(user.id, board_id)
            .await?
            .ok_or(BulletinError::LikeNotFound)?;
        likes.delete(like.id).await?;

        tx.commit().await?;

        debug!(user_id = user.id, board_id, "Like withdrawn");
        Ok(())
    }

    /// Number of likes on a board.
    pub async fn count(&self, board_id: i64) -> Result<i64> {
        let mut conn = self.db.acquire().await?;
        BoardRepository::new(&mut conn)
            .get_by_id(board_id)
            .await?
            .ok_or(BulletinError::BoardNotFound)?;
        LikeRepository::new(&mut conn).count_by_board(board_id).await
    }
}
