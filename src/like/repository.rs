//! Like repository.

use super::types::Like;
use crate::db::DbConn;
use crate::error::is_unique_violation;
use crate::{BulletinError, Result};

/// Repository for like operations.
pub struct LikeRepository<'a> {
    conn: &'a mut DbConn,
}

impl<'a> LikeRepository<'a> {
    /// Create a new LikeRepository.
    pub fn new(conn: &'a mut DbConn) -> Self {
        Self { conn }
    }

    /// Insert a like for the pair.
    ///
    /// A second like for the same pair is reported as `DuplicateLike`.
    pub async fn create(&mut self, user_id: i64, board_id: i64) -> Result<Like> {
        let like = sqlx::query_as::<_, Like>(
            "INSERT INTO likes (user_id, board_id) VALUES (?, ?)
             RETURNING id, user_id, board_id, created_at",
        )
        .bind(user_id)
        .bind(board_id)
        .fetch_one(&mut *self.conn)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                BulletinError::DuplicateLike
            } else {
                BulletinError::Database(e.to_string())
            }
        })?;
        Ok(like)
    }

    /// Find the like for a (user, board) pair.
    pub async fn find(&mut self, user_id: i64, board_id: i64) -> Result<Option<Like>> {
        let like = sqlx::query_as::<_, Like>(
            "SELECT id, user_id, board_id, created_at FROM likes
             WHERE user_id = ? AND board_id = ?",
        )
        .bind(user_id)
        .bind(board_id)
        .fetch_optional(&mut *self.conn)
        .await?;
        Ok(like)
    }

    /// Delete a like by ID.
    pub async fn delete(&mut self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM likes WHERE id = ?")
            .bind(id)
            .execute(&mut *self.conn)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete every like on a board.
    pub async fn delete_by_board(&mut self, board_id: i64) -> Result<u64> {
        let result = sqlx::query("DELETE FROM likes WHERE board_id = ?")
            .bind(board_id)
            .execute(&mut *self.conn)
            .await?;
        Ok(result.rows_affected())
    }

    /// Delete every like given by a user.
    pub async fn delete_by_user(&mut self, user_id: i64) -> Result<u64> {
        let result = sqlx::query("DELETE FROM likes WHERE user_id = ?")
            .bind(user_id)
            .execute(&mut *self.conn)
            .await?;
        Ok(result.rows_affected())
    }

    /// Count likes on a board.
    pub async fn count_by_board(&mut self, board_id: i64) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM likes WHERE board_id = ?")
            .bind(board_id)
            .fetch_one(&mut *self.conn)
            .await?;
        Ok(count)
    }
}
