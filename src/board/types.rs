//! Board model and read views.

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::db::Grade;

/// A board post. The owning user never changes after creation.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow, Serialize)]
pub struct Board {
    /// Unique board ID.
    pub id: i64,
    /// Author.
    pub user_id: i64,
    /// Title.
    pub title: String,
    /// Body text.
    pub content: String,
    /// Creation timestamp.
    pub created_at: NaiveDateTime,
    /// Last edit timestamp.
    pub modified_at: NaiveDateTime,
}

/// Data for creating a new board.
#[derive(Debug, Clone)]
pub struct NewBoard {
    /// Author.
    pub user_id: i64,
    /// Title.
    pub title: String,
    /// Body text.
    pub content: String,
}

impl NewBoard {
    /// Create a new board for `user_id`.
    pub fn new(user_id: i64, title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            user_id,
            title: title.into(),
            content: content.into(),
        }
    }
}

/// Outcome of writing a board, including the author's grade after
/// promotion was evaluated.
#[derive(Debug, Clone, Serialize)]
pub struct WriteBoardResult {
    /// The stored board.
    pub board: Board,
    /// Author nickname.
    pub nickname: String,
    /// Author grade after this board was counted.
    pub grade: Grade,
}

/// One row of a board listing.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow, Serialize)]
pub struct BoardSummary {
    /// Board ID.
    pub board_id: i64,
    /// Author nickname.
    pub nickname: String,
    /// Title.
    pub title: String,
    /// Body text.
    pub content: String,
}

/// A reply as shown under its comment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReplyView {
    /// Reply ID.
    pub reply_id: i64,
    /// Author nickname.
    pub nickname: String,
    /// Reply text.
    pub reply: String,
}

/// A comment with its replies, oldest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommentView {
    /// Comment ID.
    pub comment_id: i64,
    /// Author nickname.
    pub nickname: String,
    /// Comment text.
    pub comment: String,
    /// Replies to this comment.
    pub replies: Vec<ReplyView>,
}

/// Full board page.
#[derive(Debug, Clone, Serialize)]
pub struct BoardDetail {
    /// Board ID.
    pub board_id: i64,
    /// Author nickname.
    pub nickname: String,
    /// Title.
    pub title: String,
    /// Body text.
    pub content: String,
    /// Number of likes.
    pub like_count: i64,
    /// Comments, oldest first.
    pub comments: Vec<CommentView>,
}
