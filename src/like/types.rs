//! Like model.

use chrono::NaiveDateTime;
use serde::Serialize;

/// A user's like on a board.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow, Serialize)]
pub struct Like {
    pub id: i64,
    pub user_id: i64,
    pub board_id: i64,
    pub created_at: NaiveDateTime,
}
