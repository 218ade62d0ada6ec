//! Board service.
//!
//! This module provides the lifecycle of boards and of the comments and
//! replies under them. Every mutation runs in one transaction: guards first,
//! then writes, then commit.

use std::collections::HashMap;

use tracing::{debug, info};

use crate::auth::{require_owner, require_user};
use crate::cascade::{self, CascadeReport};
use crate::config::PaginationConfig;
use crate::db::{Database, DbConn, User};
use crate::grade::{upgrade_grade, GradePolicy};
use crate::like::LikeRepository;
use crate::pagination::{PaginatedResult, Pagination};
use crate::validation::require_text;
use crate::{BulletinError, Result};

use super::comment::{Comment, NewComment, NewReply, Reply};
use super::comment_repository::CommentRepository;
use super::reply_repository::ReplyRepository;
use super::repository::BoardRepository;
use super::types::{
    Board, BoardDetail, BoardSummary, CommentView, NewBoard, ReplyView, WriteBoardResult,
};

/// Board service for board, comment, and reply operations.
pub struct BoardService<'a> {
    db: &'a Database,
    grade_policy: GradePolicy,
    page_limits: PaginationConfig,
}

impl<'a> BoardService<'a> {
    /// Create a new BoardService with default grade thresholds and page limits.
    pub fn new(db: &'a Database) -> Self {
        Self {
            db,
            grade_policy: GradePolicy::default(),
            page_limits: PaginationConfig::default(),
        }
    }

    /// Use a configured grade policy for promotions on write.
    pub fn with_grade_policy(mut self, policy: GradePolicy) -> Self {
        self.grade_policy = policy;
        self
    }

    /// Use configured page size bounds for list operations.
    pub fn with_page_limits(mut self, limits: PaginationConfig) -> Self {
        self.page_limits = limits;
        self
    }

    // ------------------------------------------------------------------
    // Boards
    // ------------------------------------------------------------------

    /// Write a new board and re-evaluate the author's grade.
    ///
    /// Fails with `UserNotFound` if the author no longer exists.
    pub async fn write(&self, actor: &User, title: &str, content: &str) -> Result<WriteBoardResult> {
        let mut tx = self.db.begin().await?;

        let author = require_user(&mut tx, actor.id).await?;
        require_text("title", title)?;
        require_text("content", content)?;

        let board = BoardRepository::new(&mut tx)
            .create(&NewBoard::new(author.id, title, content))
            .await?;
        let grade = upgrade_grade(&mut tx, &self.grade_policy, &author).await?;

        tx.commit().await?;

        info!(board_id = board.id, user_id = author.id, "Board written");
        Ok(WriteBoardResult {
            board,
            nickname: author.nickname,
            grade,
        })
    }

    /// Get a board with its comments, their replies, and the like count.
    pub async fn get(&self, board_id: i64) -> Result<BoardDetail> {
        let mut conn = self.db.acquire().await?;
        load_detail(&mut conn, board_id).await
    }

    /// List boards, newest first by default.
    pub async fn list(&self, pagination: Pagination) -> Result<PaginatedResult<BoardSummary>> {
        let pagination = pagination.clamped(&self.page_limits);
        let mut conn = self.db.acquire().await?;
        let mut repo = BoardRepository::new(&mut conn);

        let total = repo.count().await?;
        let items = repo.list_summaries(pagination).await?;
        Ok(PaginatedResult::new(items, total, pagination))
    }

    /// List boards whose title contains `fragment`.
    pub async fn search(
        &self,
        fragment: &str,
        pagination: Pagination,
    ) -> Result<PaginatedResult<BoardSummary>> {
        let pagination = pagination.clamped(&self.page_limits);
        let mut conn = self.db.acquire().await?;
        let mut repo = BoardRepository::new(&mut conn);

        let total = repo.count_matching(fragment).await?;
        let items = repo.search_summaries(fragment, pagination).await?;
        Ok(PaginatedResult::new(items, total, pagination))
    }

    /// Replace a board's title and content. Owner only.
    pub async fn edit(&self, board_id: i64, actor: &User, title: &str, content: &str) -> Result<Board> {
        let mut tx = self.db.begin().await?;

        let board = BoardRepository::new(&mut tx)
            .get_by_id(board_id)
            .await?
            .ok_or(BulletinError::BoardNotFound)?;
        require_owner(actor, board.user_id)?;
        require_text("title", title)?;
        require_text("content", content)?;

        let updated = BoardRepository::new(&mut tx)
            .update(board_id, title, content)
            .await?
            .ok_or(BulletinError::BoardNotFound)?;

        tx.commit().await?;

        debug!(board_id, "Board edited");
        Ok(updated)
    }

    /// Delete a board with everything under it. Owner only.
    pub async fn delete(&self, board_id: i64, actor: &User) -> Result<CascadeReport> {
        let mut tx = self.db.begin().await?;
        let report = cascade::delete_board(&mut tx, board_id, actor).await?;
        tx.commit().await?;
        Ok(report)
    }

    // ------------------------------------------------------------------
    // Comments
    // ------------------------------------------------------------------

    /// Write a comment on an existing board.
    pub async fn write_comment(&self, board_id: i64, actor: &User, text: &str) -> Result<Comment> {
        let mut tx = self.db.begin().await?;

        let author = require_user(&mut tx, actor.id).await?;
        BoardRepository::new(&mut tx)
            .get_by_id(board_id)
            .await?
            .ok_or(BulletinError::BoardNotFound)?;
        require_text("comment", text)?;

        let comment = CommentRepository::new(&mut tx)
            .create(&NewComment::new(board_id, author.id, text))
            .await?;

        tx.commit().await?;

        debug!(comment_id = comment.id, board_id, "Comment written");
        Ok(comment)
    }

    /// Replace a comment's text. Author only.
    pub async fn edit_comment(
        &self,
        board_id: i64,
        comment_id: i64,
        actor: &User,
        text: &str,
    ) -> Result<Comment> {
        let mut tx = self.db.begin().await?;

        let comment = load_comment_on(&mut tx, board_id, comment_id).await?;
        require_owner(actor, comment.user_id)?;
        require_text("comment", text)?;

        let updated = CommentRepository::new(&mut tx)
            .update_text(comment_id, text)
            .await?
            .ok_or(BulletinError::CommentNotFound)?;

        tx.commit().await?;
        Ok(updated)
    }

    /// Delete a comment and its replies. Author only.
    pub async fn delete_comment(
        &self,
        board_id: i64,
        comment_id: i64,
        actor: &User,
    ) -> Result<CascadeReport> {
        let mut tx = self.db.begin().await?;

        let comment = load_comment_on(&mut tx, board_id, comment_id).await?;
        require_owner(actor, comment.user_id)?;
        let report = cascade::purge_comment(&mut tx, comment_id).await?;

        tx.commit().await?;

        debug!(comment_id, replies = report.replies, "Comment deleted");
        Ok(report)
    }

    // ------------------------------------------------------------------
    // Replies
    // ------------------------------------------------------------------

    /// Reply to a comment.
    ///
    /// The board and the comment must both exist, and the comment must
    /// belong to that board (`CommentNotFound` otherwise).
    pub async fn write_reply(
        &self,
        board_id: i64,
        comment_id: i64,
        actor: &User,
        text: &str,
    ) -> Result<Reply> {
        let mut tx = self.db.begin().await?;

        let author = require_user(&mut tx, actor.id).await?;
        BoardRepository::new(&mut tx)
            .get_by_id(board_id)
            .await?
            .ok_or(BulletinError::BoardNotFound)?;
        let comment = CommentRepository::new(&mut tx)
            .get_by_id(comment_id)
            .await?
            .ok_or(BulletinError::CommentNotFound)?;
        if comment.board_id != board_id {
            return Err(BulletinError::CommentNotFound);
        }
        require_text("reply", text)?;

        let reply = ReplyRepository::new(&mut tx)
            .create(&NewReply::new(board_id, comment_id, author.id, text))
            .await?;

        tx.commit().await?;

        debug!(reply_id = reply.id, comment_id, board_id, "Reply written");
        Ok(reply)
    }

    /// Replace a reply's text. Author only.
    pub async fn edit_reply(
        &self,
        board_id: i64,
        comment_id: i64,
        reply_id: i64,
        actor: &User,
        text: &str,
    ) -> Result<Reply> {
        let mut tx = self.db.begin().await?;

        let reply = load_reply_on(&mut tx, board_id, comment_id, reply_id).await?;
        require_owner(actor, reply.user_id)?;
        require_text("reply", text)?;

        let updated = ReplyRepository::new(&mut tx)
            .update_text(reply_id, text)
            .await?
            .ok_or(BulletinError::ReplyNotFound)?;

        tx.commit().await?;
        Ok(updated)
    }

    /// Delete a reply. Author only.
    pub async fn delete_reply(
        &self,
        board_id: i64,
        comment_id: i64,
        reply_id: i64,
        actor: &User,
    ) -> Result<()> {
        let mut tx = self.db.begin().await?;

        let reply = load_reply_on(&mut tx, board_id, comment_id, reply_id).await?;
        require_owner(actor, reply.user_id)?;
        ReplyRepository::new(&mut tx).delete(reply_id).await?;

        tx.commit().await?;
        Ok(())
    }
}

/// Load a comment and check it sits on `board_id`.
pub(crate) async fn load_comment_on(
    conn: &mut DbConn,
    board_id: i64,
    comment_id: i64,
) -> Result<Comment> {
    let comment = CommentRepository::new(conn)
        .get_by_id(comment_id)
        .await?
        .ok_or(BulletinError::CommentNotFound)?;
    if comment.board_id != board_id {
        return Err(BulletinError::BoardNotFound);
    }
    Ok(comment)
}

/// Load a reply and check it sits under `comment_id` on `board_id`.
pub(crate) async fn load_reply_on(
    conn: &mut DbConn,
    board_id: i64,
    comment_id: i64,
    reply_id: i64,
) -> Result<Reply> {
    let reply = ReplyRepository::new(conn)
        .get_by_id(reply_id)
        .await?
        .ok_or(BulletinError::ReplyNotFound)?;
    if reply.board_id != board_id {
        return Err(BulletinError::BoardNotFound);
    }
    if reply.comment_id != comment_id {
        return Err(BulletinError::CommentNotFound);
    }
    Ok(reply)
}

async fn load_detail(conn: &mut DbConn, board_id: i64) -> Result<BoardDetail> {
    let board = BoardRepository::new(conn)
        .get_by_id(board_id)
        .await?
        .ok_or(BulletinError::BoardNotFound)?;
    // The author row outlives the board; a miss here means a broken cascade.
    let author = require_user(conn, board.user_id).await?;

    let comments = CommentRepository::new(conn).list_by_board(board_id).await?;
    let replies = ReplyRepository::new(conn).list_by_board(board_id).await?;
    let like_count = LikeRepository::new(conn).count_by_board(board_id).await?;

    let mut by_comment: HashMap<i64, Vec<ReplyView>> = HashMap::new();
    for reply in replies {
        by_comment.entry(reply.comment_id).or_default().push(ReplyView {
            reply_id: reply.id,
            nickname: reply.nickname,
            reply: reply.reply,
        });
    }

    let comments = comments
        .into_iter()
        .map(|c| CommentView {
            comment_id: c.id,
            nickname: c.nickname,
            comment: c.comment,
            replies: by_comment.remove(&c.id).unwrap_or_default(),
        })
        .collect();

    Ok(BoardDetail {
        board_id: board.id,
        nickname: author.nickname,
        title: board.title,
        content: board.content,
        like_count,
        comments,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{register, RegistrationRequest};
    use crate::db::{Grade, UserRepository};

    async fn setup() -> (Database, User, User) {
        let db = Database::open_in_memory().await.unwrap();
        let mut conn = db.acquire().await.unwrap();
        let mut repo = UserRepository::new(&mut conn);
        let alice = register(&mut repo, RegistrationRequest::new("Alice", "alice", "pw"))
            .await
            .unwrap();
        let bob = register(&mut repo, RegistrationRequest::new("Bob", "bob", "pw"))
            .await
            .unwrap();
        drop(conn);
        (db, alice, bob)
    }

    #[tokio::test]
    async fn test_write_board() {
        let (db, alice, _) = setup().await;
        let service = BoardService::new(&db);

        let result = service.write(&alice, "Hello", "World").await.unwrap();
        assert_eq!(result.board.title, "Hello");
        assert_eq!(result.board.user_id, alice.id);
        assert_eq!(result.nickname, "Alice");
        assert_eq!(result.grade, Grade::Silver);
    }

    #[tokio::test]
    async fn test_write_board_deleted_author() {
        let (db, alice, _) = setup().await;
        let service = BoardService::new(&db);

        let mut conn = db.acquire().await.unwrap();
        UserRepository::new(&mut conn).delete(alice.id).await.unwrap();
        drop(conn);

        let result = service.write(&alice, "t", "c").await;
        assert!(matches!(result, Err(BulletinError::UserNotFound)));
    }

    #[tokio::test]
    async fn test_write_board_blank_title() {
        let (db, alice, _) = setup().await;
        let service = BoardService::new(&db);

        let result = service.write(&alice, "  ", "c").await;
        assert!(matches!(result, Err(BulletinError::Validation(_))));
        assert_eq!(service.list(Pagination::default()).await.unwrap().total, 0);
    }

    #[tokio::test]
    async fn test_write_promotes_with_custom_policy() {
        let (db, alice, _) = setup().await;
        let policy = GradePolicy::from_config(&crate::config::GradeConfig {
            gold_threshold: 2,
            red_threshold: 3,
        });
        let service = BoardService::new(&db).with_grade_policy(policy);

        assert_eq!(service.write(&alice, "1", "c").await.unwrap().grade, Grade::Silver);
        assert_eq!(service.write(&alice, "2", "c").await.unwrap().grade, Grade::Gold);
        assert_eq!(service.write(&alice, "3", "c").await.unwrap().grade, Grade::Red);
    }

    #[tokio::test]
    async fn test_edit_board_owner_only() {
        let (db, alice, bob) = setup().await;
        let service = BoardService::new(&db);
        let board = service.write(&alice, "t", "c").await.unwrap().board;

        let result = service.edit(board.id, &bob, "x", "y").await;
        assert!(matches!(result, Err(BulletinError::InvalidRequest)));

        let edited = service.edit(board.id, &alice, "t2", "c2").await.unwrap();
        assert_eq!(edited.title, "t2");
        assert_eq!(edited.content, "c2");

        let result = service.edit(999, &alice, "x", "y").await;
        assert!(matches!(result, Err(BulletinError::BoardNotFound)));
    }

    #[tokio::test]
    async fn test_get_board_detail() {
        let (db, alice, bob) = setup().await;
        let service = BoardService::new(&db);
        let board = service.write(&alice, "Title", "Body").await.unwrap().board;

        let first = service.write_comment(board.id, &bob, "first").await.unwrap();
        let second = service.write_comment(board.id, &alice, "second").await.unwrap();
        service
            .write_reply(board.id, first.id, &alice, "thanks")
            .await
            .unwrap();
        service
            .write_reply(board.id, first.id, &bob, "welcome")
            .await
            .unwrap();

        let detail = service.get(board.id).await.unwrap();
        assert_eq!(detail.nickname, "Alice");
        assert_eq!(detail.like_count, 0);
        assert_eq!(detail.comments.len(), 2);
        assert_eq!(detail.comments[0].comment_id, first.id);
        assert_eq!(detail.comments[0].nickname, "Bob");
        let replies: Vec<&str> = detail.comments[0]
            .replies
            .iter()
            .map(|r| r.reply.as_str())
            .collect();
        assert_eq!(replies, vec!["thanks", "welcome"]);
        assert_eq!(detail.comments[1].comment_id, second.id);
        assert!(detail.comments[1].replies.is_empty());

        assert!(matches!(
            service.get(999).await,
            Err(BulletinError::BoardNotFound)
        ));
    }

    #[tokio::test]
    async fn test_list_clamps_page_size() {
        let (db, alice, _) = setup().await;
        let service = BoardService::new(&db).with_page_limits(PaginationConfig {
            default_page_size: 2,
            max_page_size: 3,
        });
        for i in 0..5 {
            service.write(&alice, &format!("b{i}"), "c").await.unwrap();
        }

        let page = service.list(Pagination::first(50)).await.unwrap();
        assert_eq!(page.items.len(), 3);
        assert_eq!(page.total, 5);
        assert!(page.has_more());
        assert_eq!(page.items[0].title, "b4");

        let page = service.list(Pagination::first(0)).await.unwrap();
        assert_eq!(page.items.len(), 2);
    }

    #[tokio::test]
    async fn test_search_by_title() {
        let (db, alice, _) = setup().await;
        let service = BoardService::new(&db);
        service.write(&alice, "rust async", "c").await.unwrap();
        service.write(&alice, "gardening", "c").await.unwrap();

        let found = service.search("rust", Pagination::default()).await.unwrap();
        assert_eq!(found.total, 1);
        assert_eq!(found.items[0].title, "rust async");
    }

    #[tokio::test]
    async fn test_comment_requires_board() {
        let (db, alice, _) = setup().await;
        let service = BoardService::new(&db);

        let result = service.write_comment(42, &alice, "hi").await;
        assert!(matches!(result, Err(BulletinError::BoardNotFound)));
    }

    #[tokio::test]
    async fn test_comment_edit_and_delete_guards() {
        let (db, alice, bob) = setup().await;
        let service = BoardService::new(&db);
        let board = service.write(&alice, "t", "c").await.unwrap().board;
        let other = service.write(&alice, "t2", "c").await.unwrap().board;
        let comment = service.write_comment(board.id, &bob, "hi").await.unwrap();

        assert!(matches!(
            service.edit_comment(board.id, comment.id, &alice, "x").await,
            Err(BulletinError::InvalidRequest)
        ));
        assert!(matches!(
            service.edit_comment(board.id, 999, &bob, "x").await,
            Err(BulletinError::CommentNotFound)
        ));
        assert!(matches!(
            service.delete_comment(other.id, comment.id, &bob).await,
            Err(BulletinError::BoardNotFound)
        ));

        let edited = service
            .edit_comment(board.id, comment.id, &bob, "hello")
            .await
            .unwrap();
        assert_eq!(edited.comment, "hello");
    }

    #[tokio::test]
    async fn test_delete_comment_removes_replies() {
        let (db, alice, bob) = setup().await;
        let service = BoardService::new(&db);
        let board = service.write(&alice, "t", "c").await.unwrap().board;
        let comment = service.write_comment(board.id, &bob, "hi").await.unwrap();
        for _ in 0..3 {
            service
                .write_reply(board.id, comment.id, &alice, "re")
                .await
                .unwrap();
        }

        let report = service
            .delete_comment(board.id, comment.id, &bob)
            .await
            .unwrap();
        assert_eq!(report.comments, 1);
        assert_eq!(report.replies, 3);
        assert!(service.get(board.id).await.unwrap().comments.is_empty());
    }

    #[tokio::test]
    async fn test_reply_requires_comment_on_same_board() {
        let (db, alice, bob) = setup().await;
        let service = BoardService::new(&db);
        let board = service.write(&alice, "t", "c").await.unwrap().board;
        let other = service.write(&alice, "t2", "c").await.unwrap().board;
        let comment = service.write_comment(board.id, &bob, "hi").await.unwrap();

        assert!(matches!(
            service.write_reply(other.id, comment.id, &bob, "re").await,
            Err(BulletinError::CommentNotFound)
        ));
        assert!(matches!(
            service.write_reply(999, comment.id, &bob, "re").await,
            Err(BulletinError::BoardNotFound)
        ));
        assert!(matches!(
            service.write_reply(board.id, 999, &bob, "re").await,
            Err(BulletinError::CommentNotFound)
        ));
    }

    #[tokio::test]
    async fn test_reply_edit_and_delete_guards() {
        let (db, alice, bob) = setup().await;
        let service = BoardService::new(&db);
        let board = service.write(&alice, "t", "c").await.unwrap().board;
        let comment = service.write_comment(board.id, &bob, "hi").await.unwrap();
        let other_comment = service.write_comment(board.id, &bob, "yo").await.unwrap();
        let reply = service
            .write_reply(board.id, comment.id, &alice, "re")
            .await
            .unwrap();

        assert!(matches!(
            service
                .edit_reply(board.id, comment.id, reply.id, &bob, "x")
                .await,
            Err(BulletinError::InvalidRequest)
        ));
        assert!(matches!(
            service
                .delete_reply(board.id, other_comment.id, reply.id, &alice)
                .await,
            Err(BulletinError::CommentNotFound)
        ));
        assert!(matches!(
            service
                .delete_reply(board.id + 1, comment.id, reply.id, &alice)
                .await,
            Err(BulletinError::BoardNotFound)
        ));

        let edited = service
            .edit_reply(board.id, comment.id, reply.id, &alice, "re2")
            .await
            .unwrap();
        assert_eq!(edited.reply, "re2");

        service
            .delete_reply(board.id, comment.id, reply.id, &alice)
            .await
            .unwrap();
        assert!(matches!(
            service
                .delete_reply(board.id, comment.id, reply.id, &alice)
                .await,
            Err(BulletinError::ReplyNotFound)
        ));
    }
}
