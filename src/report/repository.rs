//! Report repository.

use super::types::{NewReport, Report, ReportEntry};
use crate::db::DbConn;
use crate::error::is_unique_violation;
use crate::pagination::Pagination;
use crate::{BulletinError, Result};

const REPORT_COLUMNS: &str = "id, user_id, board_id, report_content, created_at";

/// Repository for report operations.
pub struct ReportRepository<'a> {
    conn: &'a mut DbConn,
}

impl<'a> ReportRepository<'a> {
    /// Create a new ReportRepository.
    pub fn new(conn: &'a mut DbConn) -> Self {
        Self { conn }
    }

    /// Insert a report.
    ///
    /// A second report for the same pair is reported as `DuplicateReport`.
    pub async fn create(&mut self, new_report: &NewReport) -> Result<Report> {
        let report = sqlx::query_as::<_, Report>(&format!(
            "INSERT INTO reports (user_id, board_id, report_content) VALUES (?, ?, ?)
             RETURNING {REPORT_COLUMNS}"
        ))
        .bind(new_report.user_id)
        .bind(new_report.board_id)
        .bind(&new_report.report_content)
        .fetch_one(&mut *self.conn)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                BulletinError::DuplicateReport
            } else {
                BulletinError::Database(e.to_string())
            }
        })?;
        Ok(report)
    }

    /// Get a report by ID.
    pub async fn get_by_id(&mut self, id: i64) -> Result<Option<Report>> {
        let report = sqlx::query_as::<_, Report>(&format!(
            "SELECT {REPORT_COLUMNS} FROM reports WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(&mut *self.conn)
        .await?;
        Ok(report)
    }

    /// Find the report for a (user, board) pair.
    pub async fn find(&mut self, user_id: i64, board_id: i64) -> Result<Option<Report>> {
        let report = sqlx::query_as::<_, Report>(&format!(
            "SELECT {REPORT_COLUMNS} FROM reports WHERE user_id = ? AND board_id = ?"
        ))
        .bind(user_id)
        .bind(board_id)
        .fetch_optional(&mut *self.conn)
        .await?;
        Ok(report)
    }

    /// Delete a report by ID.
    pub async fn delete(&mut self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM reports WHERE id = ?")
            .bind(id)
            .execute(&mut *self.conn)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete every report against a board.
    pub async fn delete_by_board(&mut self, board_id: i64) -> Result<u64> {
        let result = sqlx::query("DELETE FROM reports WHERE board_id = ?")
            .bind(board_id)
            .execute(&mut *self.conn)
            .await?;
        Ok(result.rows_affected())
    }

    /// Delete every report filed by a user.
    pub async fn delete_by_user(&mut self, user_id: i64) -> Result<u64> {
        let result = sqlx::query("DELETE FROM reports WHERE user_id = ?")
            .bind(user_id)
            .execute(&mut *self.conn)
            .await?;
        Ok(result.rows_affected())
    }

    /// List the moderation queue with the reported board's text.
    pub async fn list_entries(&mut self, pagination: Pagination) -> Result<Vec<ReportEntry>> {
        let rows = sqlx::query_as::<_, ReportEntry>(&format!(
            "SELECT r.id AS report_id, r.report_content, b.id AS board_id, b.title, b.content
             FROM reports r JOIN boards b ON b.id = r.board_id
             ORDER BY r.id {} LIMIT ? OFFSET ?",
            pagination.direction.as_sql()
        ))
        .bind(pagination.limit)
        .bind(pagination.offset)
        .fetch_all(&mut *self.conn)
        .await?;
        Ok(rows)
    }

    /// Count all reports.
    pub async fn count(&mut self) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM reports")
            .fetch_one(&mut *self.conn)
            .await?;
        Ok(count)
    }

    /// Count reports against a board.
    pub async fn count_by_board(&mut self, board_id: i64) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM reports WHERE board_id = ?")
            .bind(board_id)
            .fetch_one(&mut *self.conn)
            .await?;
        Ok(count)
    }
}
