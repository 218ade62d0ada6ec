//! Duplicate checks for likes and reports.
//!
//! These run before the insert so the caller gets a named error without
//! touching the table. The `UNIQUE(user_id, board_id)` constraints remain
//! the backstop when two requests race past the check.

use tracing::{debug, warn};

use crate::board::Board;
use crate::like::LikeRepository;
use crate::report::ReportRepository;
use crate::{BulletinError, Result};

/// Fail with `DuplicateLike` if `user_id` already likes `board_id`.
pub async fn check_like(
    likes: &mut LikeRepository<'_>,
    user_id: i64,
    board_id: i64,
) -> Result<()> {
    if likes.find(user_id, board_id).await?.is_some() {
        debug!(user_id, board_id, "Duplicate like rejected");
        return Err(BulletinError::DuplicateLike);
    }
    Ok(())
}

/// Check that `user_id` may report `board`.
///
/// Self-report is checked first, so reporting your own board is always
/// `SelfReport` whatever else exists. Otherwise an earlier report for the
/// same pair is `DuplicateReport`.
pub async fn check_report(
    reports: &mut ReportRepository<'_>,
    user_id: i64,
    board: &Board,
) -> Result<()> {
    if board.user_id == user_id {
        warn!(user_id, board_id = board.id, "Self-report rejected");
        return Err(BulletinError::SelfReport);
    }
    if reports.find(user_id, board.id).await?.is_some() {
        debug!(user_id, board_id = board.id, "Duplicate report rejected");
        return Err(BulletinError::DuplicateReport);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{BoardRepository, NewBoard};
    use crate::db::{NewUser, UserRepository};
    use crate::report::NewReport;
    use crate::Database;

    async fn setup_db() -> (Database, i64, i64, Board) {
        let db = Database::open_in_memory().await.unwrap();
        let mut conn = db.acquire().await.unwrap();
        let author = UserRepository::new(&mut conn)
            .create(&NewUser::new("alice", "hash", "Alice"))
            .await
            .unwrap();
        let other = UserRepository::new(&mut conn)
            .create(&NewUser::new("bob", "hash", "Bob"))
            .await
            .unwrap();
        let board = BoardRepository::new(&mut conn)
            .create(&NewBoard::new(author.id, "t", "c"))
            .await
            .unwrap();
        drop(conn);
        (db, author.id, other.id, board)
    }

    #[tokio::test]
    async fn test_check_like() {
        let (db, _, other_id, board) = setup_db().await;
        let mut conn = db.acquire().await.unwrap();
        let mut likes = LikeRepository::new(&mut conn);

        check_like(&mut likes, other_id, board.id).await.unwrap();
        likes.create(other_id, board.id).await.unwrap();

        let result = check_like(&mut likes, other_id, board.id).await;
        assert!(matches!(result, Err(BulletinError::DuplicateLike)));
    }

    #[tokio::test]
    async fn test_check_report_duplicate() {
        let (db, _, other_id, board) = setup_db().await;
        let mut conn = db.acquire().await.unwrap();
        let mut reports = ReportRepository::new(&mut conn);

        check_report(&mut reports, other_id, &board).await.unwrap();
        reports
            .create(&NewReport::new(other_id, board.id, "spam"))
            .await
            .unwrap();

        let result = check_report(&mut reports, other_id, &board).await;
        assert!(matches!(result, Err(BulletinError::DuplicateReport)));
    }

    #[tokio::test]
    async fn test_self_report_checked_before_duplicate() {
        let (db, author_id, _, board) = setup_db().await;
        let mut conn = db.acquire().await.unwrap();
        let mut reports = ReportRepository::new(&mut conn);

        // A row the service would never allow, inserted directly.
        reports
            .create(&NewReport::new(author_id, board.id, "mine"))
            .await
            .unwrap();

        let result = check_report(&mut reports, author_id, &board).await;
        assert!(matches!(result, Err(BulletinError::SelfReport)));
    }
}
