//! Comment and reply models.

use chrono::NaiveDateTime;
use serde::Serialize;

/// A comment on a board.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow, Serialize)]
pub struct Comment {
    /// Unique comment ID.
    pub id: i64,
    /// Parent board.
    pub board_id: i64,
    /// Author.
    pub user_id: i64,
    /// Comment text.
    pub comment: String,
    /// Creation timestamp.
    pub created_at: NaiveDateTime,
    /// Last edit timestamp.
    pub modified_at: NaiveDateTime,
}

/// Data for creating a new comment.
#[derive(Debug, Clone)]
pub struct NewComment {
    /// Parent board.
    pub board_id: i64,
    /// Author.
    pub user_id: i64,
    /// Comment text.
    pub comment: String,
}

impl NewComment {
    /// Create a new comment by `user_id` on `board_id`.
    pub fn new(board_id: i64, user_id: i64, comment: impl Into<String>) -> Self {
        Self {
            board_id,
            user_id,
            comment: comment.into(),
        }
    }
}

/// A reply to a comment. Carries both ancestors.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow, Serialize)]
pub struct Reply {
    /// Unique reply ID.
    pub id: i64,
    /// Board of the parent comment.
    pub board_id: i64,
    /// Parent comment.
    pub comment_id: i64,
    /// Author.
    pub user_id: i64,
    /// Reply text.
    pub reply: String,
    /// Creation timestamp.
    pub created_at: NaiveDateTime,
    /// Last edit timestamp.
    pub modified_at: NaiveDateTime,
}

/// Data for creating a new reply.
#[derive(Debug, Clone)]
pub struct NewReply {
    pub board_id: i64,
    pub comment_id: i64,
    pub user_id: i64,
    pub reply: String,
}

impl NewReply {
    /// Create a new reply by `user_id` to `comment_id` on `board_id`.
    pub fn new(board_id: i64, comment_id: i64, user_id: i64, reply: impl Into<String>) -> Self {
        Self {
            board_id,
            comment_id,
            user_id,
            reply: reply.into(),
        }
    }
}

/// Comment row joined with its author's nickname.
#[derive(Debug, Clone, sqlx::FromRow)]
pub(crate) struct CommentWithAuthor {
    pub id: i64,
    pub nickname: String,
    pub comment: String,
}

/// Reply row joined with its author's nickname.
#[derive(Debug, Clone, sqlx::FromRow)]
pub(crate) struct ReplyWithAuthor {
    pub id: i64,
    pub comment_id: i64,
    pub nickname: String,
    pub reply: String,
}
