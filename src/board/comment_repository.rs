//! Comment repository.

use super::comment::{Comment, CommentWithAuthor, NewComment};
use crate::db::DbConn;
use crate::{BulletinError, Result};

const COMMENT_COLUMNS: &str = "id, board_id, user_id, comment, created_at, modified_at";

/// Repository for comment operations.
pub struct CommentRepository<'a> {
    conn: &'a mut DbConn,
}

impl<'a> CommentRepository<'a> {
    /// Create a new CommentRepository.
    pub fn new(conn: &'a mut DbConn) -> Self {
        Self { conn }
    }

    /// Create a new comment and return it.
    pub async fn create(&mut self, new_comment: &NewComment) -> Result<Comment> {
        let id: i64 = sqlx::query_scalar(
            "INSERT INTO comments (board_id, user_id, comment) VALUES (?, ?, ?) RETURNING id",
        )
        .bind(new_comment.board_id)
        .bind(new_comment.user_id)
        .bind(&new_comment.comment)
        .fetch_one(&mut *self.conn)
        .await?;

        self.get_by_id(id)
            .await?
            .ok_or(BulletinError::CommentNotFound)
    }

    /// Get a comment by ID.
    pub async fn get_by_id(&mut self, id: i64) -> Result<Option<Comment>> {
        let comment = sqlx::query_as::<_, Comment>(&format!(
            "SELECT {COMMENT_COLUMNS} FROM comments WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(&mut *self.conn)
        .await?;
        Ok(comment)
    }

    /// Replace the comment text.
    ///
    /// Returns the updated comment, or None if not found.
    pub async fn update_text(&mut self, id: i64, text: &str) -> Result<Option<Comment>> {
        let result = sqlx::query(
            "UPDATE comments SET comment = ?, modified_at = datetime('now') WHERE id = ?",
        )
        .bind(text)
        .bind(id)
        .execute(&mut *self.conn)
        .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }
        self.get_by_id(id).await
    }

    /// Delete a single comment row.
    pub async fn delete(&mut self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM comments WHERE id = ?")
            .bind(id)
            .execute(&mut *self.conn)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete all comments on a board.
    pub async fn delete_by_board(&mut self, board_id: i64) -> Result<u64> {
        let result = sqlx::query("DELETE FROM comments WHERE board_id = ?")
            .bind(board_id)
            .execute(&mut *self.conn)
            .await?;
        Ok(result.rows_affected())
    }

    /// Delete all comments written by a user, wherever they are.
    pub async fn delete_by_user(&mut self, user_id: i64) -> Result<u64> {
        let result = sqlx::query("DELETE FROM comments WHERE user_id = ?")
            .bind(user_id)
            .execute(&mut *self.conn)
            .await?;
        Ok(result.rows_affected())
    }

    /// List a board's comments with author nicknames, oldest first.
    pub(crate) async fn list_by_board(&mut self, board_id: i64) -> Result<Vec<CommentWithAuthor>> {
        let rows = sqlx::query_as::<_, CommentWithAuthor>(
            "SELECT c.id, u.nickname, c.comment
             FROM comments c JOIN users u ON u.id = c.user_id
             WHERE c.board_id = ? ORDER BY c.id ASC",
        )
        .bind(board_id)
        .fetch_all(&mut *self.conn)
        .await?;
        Ok(rows)
    }

    /// Count comments on a board.
    pub async fn count_by_board(&mut self, board_id: i64) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM comments WHERE board_id = ?")
            .bind(board_id)
            .fetch_one(&mut *self.conn)
            .await?;
        Ok(count)
    }

    /// Count comments written by a user.
    pub async fn count_by_user(&mut self, user_id: i64) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM comments WHERE user_id = ?")
            .bind(user_id)
            .fetch_one(&mut *self.conn)
            .await?;
        Ok(count)
    }
}
