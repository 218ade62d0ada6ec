//! Report model and views.

use chrono::NaiveDateTime;
use serde::Serialize;

/// A report filed against a board.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow, Serialize)]
pub struct Report {
    /// Unique report ID.
    pub id: i64,
    /// Reporting user.
    pub user_id: i64,
    /// Reported board.
    pub board_id: i64,
    /// Free-text reason.
    pub report_content: String,
    /// Filing timestamp.
    pub created_at: NaiveDateTime,
}

/// Data for filing a new report.
#[derive(Debug, Clone)]
pub struct NewReport {
    pub user_id: i64,
    pub board_id: i64,
    pub report_content: String,
}

impl NewReport {
    /// Create a new report by `user_id` against `board_id`.
    pub fn new(user_id: i64, board_id: i64, report_content: impl Into<String>) -> Self {
        Self {
            user_id,
            board_id,
            report_content: report_content.into(),
        }
    }
}

/// What the reporter sees after filing.
#[derive(Debug, Clone, Serialize)]
pub struct ReportReceipt {
    pub report_id: i64,
    /// Reporter nickname.
    pub nickname: String,
    pub board_id: i64,
    /// Title of the reported board.
    pub title: String,
    /// Content of the reported board.
    pub content: String,
    pub report_content: String,
}

/// One row of the moderation queue.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow, Serialize)]
pub struct ReportEntry {
    pub report_id: i64,
    pub report_content: String,
    pub board_id: i64,
    pub title: String,
    pub content: String,
}
