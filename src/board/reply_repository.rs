//! Reply repository.

use super::comment::{NewReply, Reply, ReplyWithAuthor};
use crate::db::DbConn;
use crate::{BulletinError, Result};

const REPLY_COLUMNS: &str = "id, board_id, comment_id, user_id, reply, created_at, modified_at";

/// Repository for reply operations.
pub struct ReplyRepository<'a> {
    conn: &'a mut DbConn,
}

impl<'a> ReplyRepository<'a> {
    /// Create a new ReplyRepository.
    pub fn new(conn: &'a mut DbConn) -> Self {
        Self { conn }
    }

    /// Create a new reply and return it.
    pub async fn create(&mut self, new_reply: &NewReply) -> Result<Reply> {
        let id: i64 = sqlx::query_scalar(
            "INSERT INTO replies (board_id, comment_id, user_id, reply)
             VALUES (?, ?, ?, ?) RETURNING id",
        )
        .bind(new_reply.board_id)
        .bind(new_reply.comment_id)
        .bind(new_reply.user_id)
        .bind(&new_reply.reply)
        .fetch_one(&mut *self.conn)
        .await?;

        self.get_by_id(id).await?.ok_or(BulletinError::ReplyNotFound)
    }

    /// Get a reply by ID.
    pub async fn get_by_id(&mut self, id: i64) -> Result<Option<Reply>> {
        let reply = sqlx::query_as::<_, Reply>(&format!(
            "SELECT {REPLY_COLUMNS} FROM replies WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(&mut *self.conn)
        .await?;
        Ok(reply)
    }

    /// Replace the reply text.
    pub async fn update_text(&mut self, id: i64, text: &str) -> Result<Option<Reply>> {
        let result =
            sqlx::query("UPDATE replies SET reply = ?, modified_at = datetime('now') WHERE id = ?")
                .bind(text)
                .bind(id)
                .execute(&mut *self.conn)
                .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }
        self.get_by_id(id).await
    }

    /// Delete a single reply row.
    pub async fn delete(&mut self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM replies WHERE id = ?")
            .bind(id)
            .execute(&mut *self.conn)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete all replies on a board.
    pub async fn delete_by_board(&mut self, board_id: i64) -> Result<u64> {
        let result = sqlx::query("DELETE FROM replies WHERE board_id = ?")
            .bind(board_id)
            .execute(&mut *self.conn)
            .await?;
        Ok(result.rows_affected())
    }

    /// Delete all replies to a comment.
    pub async fn delete_by_comment(&mut self, comment_id: i64) -> Result<u64> {
        let result = sqlx::query("DELETE FROM replies WHERE comment_id = ?")
            .bind(comment_id)
            .execute(&mut *self.conn)
            .await?;
        Ok(result.rows_affected())
    }

    /// Delete all replies written by a user.
    pub async fn delete_by_user(&mut self, user_id: i64) -> Result<u64> {
        let result = sqlx::query("DELETE FROM replies WHERE user_id = ?")
            .bind(user_id)
            .execute(&mut *self.conn)
            .await?;
        Ok(result.rows_affected())
    }

    /// Delete all replies to comments written by a user.
    pub async fn delete_by_comment_author(&mut self, user_id: i64) -> Result<u64> {
        let result = sqlx::query(
            "DELETE FROM replies WHERE comment_id IN (SELECT id FROM comments WHERE user_id = ?)",
        )
        .bind(user_id)
        .execute(&mut *self.conn)
        .await?;
        Ok(result.rows_affected())
    }

    /// List a board's replies with author nicknames, oldest first.
    pub(crate) async fn list_by_board(&mut self, board_id: i64) -> Result<Vec<ReplyWithAuthor>> {
        let rows = sqlx::query_as::<_, ReplyWithAuthor>(
            "SELECT r.id, r.comment_id, u.nickname, r.reply
             FROM replies r JOIN users u ON u.id = r.user_id
             WHERE r.board_id = ? ORDER BY r.id ASC",
        )
        .bind(board_id)
        .fetch_all(&mut *self.conn)
        .await?;
        Ok(rows)
    }

    /// Count replies on a board.
    pub async fn count_by_board(&mut self, board_id: i64) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM replies WHERE board_id = ?")
            .bind(board_id)
            .fetch_one(&mut *self.conn)
            .await?;
        Ok(count)
    }

    /// Count replies written by a user.
    pub async fn count_by_user(&mut self, user_id: i64) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM replies WHERE user_id = ?")
            .bind(user_id)
            .fetch_one(&mut *self.conn)
            .await?;
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{BoardRepository, CommentRepository, NewBoard, NewComment};
    use crate::db::{NewUser, UserRepository};
    use crate::Database;

    async fn setup_db() -> (Database, i64, i64, i64) {
        let db = Database::open_in_memory().await.unwrap();
        let mut conn = db.acquire().await.unwrap();
        let user = UserRepository::new(&mut conn)
            .create(&NewUser::new("alice", "hash", "Alice"))
            .await
            .unwrap();
        let board = BoardRepository::new(&mut conn)
            .create(&NewBoard::new(user.id, "Title", "Body"))
            .await
            .unwrap();
        let comment = CommentRepository::new(&mut conn)
            .create(&NewComment::new(board.id, user.id, "c"))
            .await
            .unwrap();
        drop(conn);
        (db, user.id, board.id, comment.id)
    }

    #[tokio::test]
    async fn test_create_reply() {
        let (db, user_id, board_id, comment_id) = setup_db().await;
        let mut conn = db.acquire().await.unwrap();
        let mut repo = ReplyRepository::new(&mut conn);

        let reply = repo
            .create(&NewReply::new(board_id, comment_id, user_id, "agreed"))
            .await
            .unwrap();
        assert_eq!(reply.comment_id, comment_id);
        assert_eq!(reply.board_id, board_id);
        assert_eq!(reply.reply, "agreed");

        let listed = repo.list_by_board(board_id).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].comment_id, comment_id);
    }

    #[tokio::test]
    async fn test_delete_by_comment_author() {
        let (db, user_id, board_id, comment_id) = setup_db().await;
        let mut conn = db.acquire().await.unwrap();
        let mut repo = ReplyRepository::new(&mut conn);

        for text in ["a", "b", "c"] {
            repo.create(&NewReply::new(board_id, comment_id, user_id, text))
                .await
                .unwrap();
        }

        assert_eq!(repo.delete_by_comment_author(user_id).await.unwrap(), 3);
        assert_eq!(repo.count_by_board(board_id).await.unwrap(), 0);
        assert_eq!(repo.delete_by_comment(comment_id).await.unwrap(), 0);
    }
}
