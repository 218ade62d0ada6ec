//! Board repository.
//!
//! This module provides CRUD operations for boards in the database.

use super::types::{Board, BoardSummary, NewBoard};
use crate::db::DbConn;
use crate::pagination::Pagination;
use crate::{BulletinError, Result};

const BOARD_COLUMNS: &str = "id, user_id, title, content, created_at, modified_at";

/// Repository for board CRUD operations.
pub struct BoardRepository<'a> {
    conn: &'a mut DbConn,
}

impl<'a> BoardRepository<'a> {
    /// Create a new BoardRepository over a pooled connection or open transaction.
    pub fn new(conn: &'a mut DbConn) -> Self {
        Self { conn }
    }

    /// Create a new board in the database.
    ///
    /// Returns the created board with the assigned ID.
    pub async fn create(&mut self, new_board: &NewBoard) -> Result<Board> {
        let id: i64 = sqlx::query_scalar(
            "INSERT INTO boards (user_id, title, content) VALUES (?, ?, ?) RETURNING id",
        )
        .bind(new_board.user_id)
        .bind(&new_board.title)
        .bind(&new_board.content)
        .fetch_one(&mut *self.conn)
        .await?;

        self.get_by_id(id).await?.ok_or(BulletinError::BoardNotFound)
    }

    /// Get a board by ID.
    pub async fn get_by_id(&mut self, id: i64) -> Result<Option<Board>> {
        let board = sqlx::query_as::<_, Board>(&format!(
            "SELECT {BOARD_COLUMNS} FROM boards WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(&mut *self.conn)
        .await?;
        Ok(board)
    }

    /// Replace title and content together, stamping `modified_at`.
    ///
    /// Returns the updated board, or None if not found.
    pub async fn update(&mut self, id: i64, title: &str, content: &str) -> Result<Option<Board>> {
        let result = sqlx::query(
            "UPDATE boards SET title = ?, content = ?, modified_at = datetime('now') WHERE id = ?",
        )
        .bind(title)
        .bind(content)
        .bind(id)
        .execute(&mut *self.conn)
        .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }
        self.get_by_id(id).await
    }

    /// Delete a board row by ID.
    ///
    /// Returns true if a board was deleted, false if not found.
    pub async fn delete(&mut self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM boards WHERE id = ?")
            .bind(id)
            .execute(&mut *self.conn)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete every board authored by a user. Returns the number removed.
    pub async fn delete_by_user(&mut self, user_id: i64) -> Result<u64> {
        let result = sqlx::query("DELETE FROM boards WHERE user_id = ?")
            .bind(user_id)
            .execute(&mut *self.conn)
            .await?;
        Ok(result.rows_affected())
    }

    /// List boards authored by a user, newest first.
    pub async fn list_by_user(&mut self, user_id: i64) -> Result<Vec<Board>> {
        let boards = sqlx::query_as::<_, Board>(&format!(
            "SELECT {BOARD_COLUMNS} FROM boards WHERE user_id = ? ORDER BY id DESC"
        ))
        .bind(user_id)
        .fetch_all(&mut *self.conn)
        .await?;
        Ok(boards)
    }

    /// List boards a user has liked, most recent like first.
    pub async fn list_liked_by(&mut self, user_id: i64) -> Result<Vec<Board>> {
        let boards = sqlx::query_as::<_, Board>(
            "SELECT b.id, b.user_id, b.title, b.content, b.created_at, b.modified_at
             FROM likes l JOIN boards b ON b.id = l.board_id
             WHERE l.user_id = ? ORDER BY l.id DESC",
        )
        .bind(user_id)
        .fetch_all(&mut *self.conn)
        .await?;
        Ok(boards)
    }

    /// List boards with their author nicknames.
    pub async fn list_summaries(&mut self, pagination: Pagination) -> Result<Vec<BoardSummary>> {
        let rows = sqlx::query_as::<_, BoardSummary>(&format!(
            "SELECT b.id AS board_id, u.nickname, b.title, b.content
             FROM boards b JOIN users u ON u.id = b.user_id
             ORDER BY b.id {} LIMIT ? OFFSET ?",
            pagination.direction.as_sql()
        ))
        .bind(pagination.limit)
        .bind(pagination.offset)
        .fetch_all(&mut *self.conn)
        .await?;
        Ok(rows)
    }

    /// List boards whose title contains `fragment`.
    pub async fn search_summaries(
        &mut self,
        fragment: &str,
        pagination: Pagination,
    ) -> Result<Vec<BoardSummary>> {
        let rows = sqlx::query_as::<_, BoardSummary>(&format!(
            "SELECT b.id AS board_id, u.nickname, b.title, b.content
             FROM boards b JOIN users u ON u.id = b.user_id
             WHERE instr(b.title, ?) > 0
             ORDER BY b.id {} LIMIT ? OFFSET ?",
            pagination.direction.as_sql()
        ))
        .bind(fragment)
        .bind(pagination.limit)
        .bind(pagination.offset)
        .fetch_all(&mut *self.conn)
        .await?;
        Ok(rows)
    }

    /// Count all boards.
    pub async fn count(&mut self) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM boards")
            .fetch_one(&mut *self.conn)
            .await?;
        Ok(count)
    }

    /// Count boards whose title contains `fragment`.
    pub async fn count_matching(&mut self, fragment: &str) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM boards WHERE instr(title, ?) > 0")
            .bind(fragment)
            .fetch_one(&mut *self.conn)
            .await?;
        Ok(count)
    }

    /// Count boards authored by a user.
    pub async fn count_by_user(&mut self, user_id: i64) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM boards WHERE user_id = ?")
            .bind(user_id)
            .fetch_one(&mut *self.conn)
            .await?;
        Ok(count)
    }
}
