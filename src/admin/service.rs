//! Admin service.

use tracing::info;

use crate::auth::{hash_password, require_admin, require_user};
use crate::board::{
    load_comment_on, load_reply_on, BoardRepository, BoardService, BoardSummary, ReplyRepository,
};
use crate::cascade::{self, CascadeReport};
use crate::config::PaginationConfig;
use crate::db::{Database, User, UserRepository};
use crate::pagination::{PaginatedResult, Pagination};
use crate::report::{ReportEntry, ReportRepository, ReportService};
use crate::{BulletinError, Result};

/// Admin service for moderation and user management.
pub struct AdminService<'a> {
    db: &'a Database,
    page_limits: PaginationConfig,
}

impl<'a> AdminService<'a> {
    /// Create a new AdminService.
    pub fn new(db: &'a Database) -> Self {
        Self {
            db,
            page_limits: PaginationConfig::default(),
        }
    }

    /// Use configured page size bounds for list operations.
    pub fn with_page_limits(mut self, limits: PaginationConfig) -> Self {
        self.page_limits = limits;
        self
    }

    /// List accounts, optionally only those with an exact nickname.
    pub async fn list_users(
        &self,
        admin: &User,
        nickname: Option<&str>,
        pagination: Pagination,
    ) -> Result<PaginatedResult<User>> {
        require_admin(admin)?;
        let pagination = pagination.clamped(&self.page_limits);

        let mut conn = self.db.acquire().await?;
        let mut repo = UserRepository::new(&mut conn);
        let total = repo.count(nickname).await?;
        let items = repo.list_paginated(nickname, pagination).await?;
        Ok(PaginatedResult::new(items, total, pagination))
    }

    /// Look up a single account.
    pub async fn get_user(&self, admin: &User, user_id: i64) -> Result<User> {
        require_admin(admin)?;
        let mut conn = self.db.acquire().await?;
        require_user(&mut conn, user_id).await
    }

    /// List all boards.
    pub async fn list_boards(
        &self,
        admin: &User,
        pagination: Pagination,
    ) -> Result<PaginatedResult<BoardSummary>> {
        require_admin(admin)?;
        self.boards().list(pagination).await
    }

    /// Search boards by title fragment.
    pub async fn search_boards(
        &self,
        admin: &User,
        fragment: &str,
        pagination: Pagination,
    ) -> Result<PaginatedResult<BoardSummary>> {
        require_admin(admin)?;
        self.boards().search(fragment, pagination).await
    }

    /// View the report queue.
    pub async fn report_queue(
        &self,
        admin: &User,
        pagination: Pagination,
    ) -> Result<PaginatedResult<ReportEntry>> {
        require_admin(admin)?;
        ReportService::new(self.db)
            .with_page_limits(self.page_limits.clone())
            .queue(pagination)
            .await
    }

    /// Close a report without touching the board.
    pub async fn dismiss_report(&self, admin: &User, report_id: i64) -> Result<()> {
        require_admin(admin)?;

        let mut tx = self.db.begin().await?;
        if !ReportRepository::new(&mut tx).delete(report_id).await? {
            return Err(BulletinError::ReportNotFound);
        }
        tx.commit().await?;

        info!(report_id, admin_id = admin.id, "Report dismissed");
        Ok(())
    }

    /// Set a new password for any account.
    pub async fn reset_password(&self, admin: &User, user_id: i64, new_password: &str) -> Result<()> {
        require_admin(admin)?;

        let mut tx = self.db.begin().await?;
        let user = require_user(&mut tx, user_id).await?;
        let new_hash = hash_password(new_password)?;
        UserRepository::new(&mut tx)
            .update_password(user.id, &new_hash)
            .await?;
        tx.commit().await?;

        info!(
            user_id,
            login_id = %user.login_id,
            admin_id = admin.id,
            "Password reset by admin"
        );
        Ok(())
    }

    /// Delete any account with everything attached to it.
    pub async fn delete_user(&self, admin: &User, user_id: i64) -> Result<CascadeReport> {
        require_admin(admin)?;

        let mut tx = self.db.begin().await?;
        require_user(&mut tx, user_id).await?;
        let report = cascade::purge_user(&mut tx, user_id).await?;
        tx.commit().await?;

        info!(
            user_id,
            admin_id = admin.id,
            boards = report.boards,
            "User removed by admin"
        );
        Ok(report)
    }

    /// Delete any board with everything under it.
    pub async fn delete_board(&self, admin: &User, board_id: i64) -> Result<CascadeReport> {
        require_admin(admin)?;

        let mut tx = self.db.begin().await?;
        BoardRepository::new(&mut tx)
            .get_by_id(board_id)
            .await?
            .ok_or(BulletinError::BoardNotFound)?;
        let report = cascade::purge_board(&mut tx, board_id).await?;
        tx.commit().await?;

        info!(
            board_id,
            admin_id = admin.id,
            comments = report.comments,
            reports = report.reports,
            "Board removed by admin"
        );
        Ok(report)
    }

    /// Delete any comment with its replies.
    pub async fn delete_comment(
        &self,
        admin: &User,
        board_id: i64,
        comment_id: i64,
    ) -> Result<CascadeReport> {
        require_admin(admin)?;

        let mut tx = self.db.begin().await?;
        load_comment_on(&mut tx, board_id, comment_id).await?;
        let report = cascade::purge_comment(&mut tx, comment_id).await?;
        tx.commit().await?;

        info!(comment_id, admin_id = admin.id, "Comment removed by admin");
        Ok(report)
    }

    /// Delete any reply.
    pub async fn delete_reply(
        &self,
        admin: &User,
        board_id: i64,
        comment_id: i64,
        reply_id: i64,
    ) -> Result<()> {
        require_admin(admin)?;

        let mut tx = self.db.begin().await?;
        load_reply_on(&mut tx, board_id, comment_id, reply_id).await?;
        ReplyRepository::new(&mut tx).delete(reply_id).await?;
        tx.commit().await?;

        info!(reply_id, admin_id = admin.id, "Reply removed by admin");
        Ok(())
    }

    fn boards(&self) -> BoardService<'a> {
        BoardService::new(self.db).with_page_limits(self.page_limits.clone())
    }
}
