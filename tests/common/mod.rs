//! Test helpers for integration tests.
//!
//! Provides an in-memory database with registered users and shortcuts for
//! building up boards, comments, and replies.

#![allow(dead_code)]

use bulletin::board::{BoardRepository, CommentRepository, ReplyRepository};
use bulletin::like::LikeRepository;
use bulletin::report::ReportRepository;
use bulletin::{BoardService, Database, RegistrationRequest, User, UserService};
use tempfile::TempDir;

/// Open a fresh in-memory database.
pub async fn setup_db() -> Database {
    Database::open_in_memory().await.unwrap()
}

/// Open a fresh on-disk database, so several connections can write at once.
///
/// The directory is removed when the returned `TempDir` drops.
pub async fn setup_file_db() -> (TempDir, Database) {
    let temp_dir = TempDir::new().unwrap();
    let db = Database::open(temp_dir.path().join("bulletin.db"))
        .await
        .unwrap();
    (temp_dir, db)
}

/// Register a SILVER user whose nickname and password derive from `login_id`.
pub async fn create_test_user(db: &Database, login_id: &str) -> User {
    UserService::new(db)
        .register(RegistrationRequest::new(
            login_id.to_uppercase(),
            login_id,
            format!("{login_id}-password"),
        ))
        .await
        .unwrap()
}

/// Write a board and return its ID.
pub async fn create_test_board(db: &Database, author: &User, title: &str) -> i64 {
    BoardService::new(db)
        .write(author, title, "content")
        .await
        .unwrap()
        .board
        .id
}

/// Write `comments` comments on a board, each with `replies` replies.
pub async fn populate_thread(
    db: &Database,
    board_id: i64,
    commenter: &User,
    replier: &User,
    comments: usize,
    replies: usize,
) {
    let service = BoardService::new(db);
    for i in 0..comments {
        let comment = service
            .write_comment(board_id, commenter, &format!("comment {i}"))
            .await
            .unwrap();
        for j in 0..replies {
            service
                .write_reply(board_id, comment.id, replier, &format!("reply {i}.{j}"))
                .await
                .unwrap();
        }
    }
}

/// Row counts referencing one board.
#[derive(Debug, PartialEq, Eq)]
pub struct BoardFootprint {
    pub comments: i64,
    pub replies: i64,
    pub likes: i64,
    pub reports: i64,
}

/// Count every row that references `board_id`.
pub async fn board_footprint(db: &Database, board_id: i64) -> BoardFootprint {
    let mut conn = db.acquire().await.unwrap();
    BoardFootprint {
        comments: CommentRepository::new(&mut conn)
            .count_by_board(board_id)
            .await
            .unwrap(),
        replies: ReplyRepository::new(&mut conn)
            .count_by_board(board_id)
            .await
            .unwrap(),
        likes: LikeRepository::new(&mut conn)
            .count_by_board(board_id)
            .await
            .unwrap(),
        reports: ReportRepository::new(&mut conn)
            .count_by_board(board_id)
            .await
            .unwrap(),
    }
}

/// Whether a board row exists.
pub async fn board_exists(db: &Database, board_id: i64) -> bool {
    let mut conn = db.acquire().await.unwrap();
    BoardRepository::new(&mut conn)
        .get_by_id(board_id)
        .await
        .unwrap()
        .is_some()
}
