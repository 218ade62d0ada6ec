//! Ordered deletion of boards, comments, and users with their dependents.
//!
//! Storage declares foreign keys without any cascade, so every dependent row
//! is removed here, children before parents:
//!
//! ```text
//! reports, replies  ->  comments  ->  likes  ->  board
//! ```
//!
//! Each step is a batch delete. An empty batch is fine; only the guarded
//! entry points treat a missing root entity as an error. Callers pass an
//! open transaction so a failure part way leaves nothing removed.

use serde::Serialize;
use tracing::{debug, info};

use crate::auth::require_owner;
use crate::board::{BoardRepository, CommentRepository, ReplyRepository};
use crate::db::{DbConn, User, UserRepository};
use crate::like::LikeRepository;
use crate::report::ReportRepository;
use crate::{BulletinError, Result};

/// Rows removed by one cascade.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CascadeReport {
    pub users: u64,
    pub boards: u64,
    pub comments: u64,
    pub replies: u64,
    pub likes: u64,
    pub reports: u64,
}

impl CascadeReport {
    fn absorb(&mut self, other: CascadeReport) {
        self.users += other.users;
        self.boards += other.boards;
        self.comments += other.comments;
        self.replies += other.replies;
        self.likes += other.likes;
        self.reports += other.reports;
    }

    /// Total rows removed.
    pub fn total(&self) -> u64 {
        self.users + self.boards + self.comments + self.replies + self.likes + self.reports
    }
}

/// Remove everything that references a board, leaving the board row.
pub async fn purge_board_dependents(conn: &mut DbConn, board_id: i64) -> Result<CascadeReport> {
    let reports = ReportRepository::new(conn).delete_by_board(board_id).await?;
    let replies = ReplyRepository::new(conn).delete_by_board(board_id).await?;
    let comments = CommentRepository::new(conn).delete_by_board(board_id).await?;
    let likes = LikeRepository::new(conn).delete_by_board(board_id).await?;

    debug!(board_id, reports, replies, comments, likes, "Board dependents removed");
    Ok(CascadeReport {
        comments,
        replies,
        likes,
        reports,
        ..Default::default()
    })
}

/// Remove a board and everything that references it. No ownership check.
pub async fn purge_board(conn: &mut DbConn, board_id: i64) -> Result<CascadeReport> {
    let mut report = purge_board_dependents(conn, board_id).await?;
    if BoardRepository::new(conn).delete(board_id).await? {
        report.boards = 1;
    }
    Ok(report)
}

/// Remove a comment and its replies. No ownership check.
pub async fn purge_comment(conn: &mut DbConn, comment_id: i64) -> Result<CascadeReport> {
    let replies = ReplyRepository::new(conn).delete_by_comment(comment_id).await?;
    let comments = u64::from(CommentRepository::new(conn).delete(comment_id).await?);
    Ok(CascadeReport {
        comments,
        replies,
        ..Default::default()
    })
}

/// Remove a user and everything they own or that hangs off what they own.
/// No ownership check.
///
/// Order:
/// 1. reports and likes the user filed
/// 2. all dependents of each of the user's boards
/// 3. the user's remaining replies on other boards
/// 4. replies under the user's remaining comments, then those comments
/// 5. the user's boards, then the user row
pub async fn purge_user(conn: &mut DbConn, user_id: i64) -> Result<CascadeReport> {
    let mut report = CascadeReport {
        reports: ReportRepository::new(conn).delete_by_user(user_id).await?,
        likes: LikeRepository::new(conn).delete_by_user(user_id).await?,
        ..Default::default()
    };

    let boards = BoardRepository::new(conn).list_by_user(user_id).await?;
    for board in &boards {
        report.absorb(purge_board_dependents(conn, board.id).await?);
    }

    report.replies += ReplyRepository::new(conn).delete_by_user(user_id).await?;
    report.replies += ReplyRepository::new(conn)
        .delete_by_comment_author(user_id)
        .await?;
    report.comments += CommentRepository::new(conn).delete_by_user(user_id).await?;

    report.boards += BoardRepository::new(conn).delete_by_user(user_id).await?;
    report.users = u64::from(UserRepository::new(conn).delete(user_id).await?);

    Ok(report)
}

/// Delete a board on behalf of its owner.
///
/// `BoardNotFound` if absent, `InvalidRequest` if `actor` is not the owner.
pub async fn delete_board(conn: &mut DbConn, board_id: i64, actor: &User) -> Result<CascadeReport> {
    let board = BoardRepository::new(conn)
        .get_by_id(board_id)
        .await?
        .ok_or(BulletinError::BoardNotFound)?;
    require_owner(actor, board.user_id)?;

    let report = purge_board(conn, board_id).await?;
    info!(
        board_id,
        actor_id = actor.id,
        comments = report.comments,
        replies = report.replies,
        likes = report.likes,
        reports = report.reports,
        "Board deleted"
    );
    Ok(report)
}

/// Delete an account on behalf of its owner.
///
/// `UserNotFound` if absent, `InvalidRequest` if `actor` is someone else.
pub async fn delete_user(conn: &mut DbConn, user_id: i64, actor: &User) -> Result<CascadeReport> {
    let user = UserRepository::new(conn)
        .get_by_id(user_id)
        .await?
        .ok_or(BulletinError::UserNotFound)?;
    require_owner(actor, user.id)?;

    let report = purge_user(conn, user_id).await?;
    info!(
        user_id,
        boards = report.boards,
        comments = report.comments,
        replies = report.replies,
        likes = report.likes,
        reports = report.reports,
        "User deleted"
    );
    Ok(report)
}
