//! Report service.

use tracing::info;

use crate::auth::require_user;
use crate::board::BoardRepository;
use crate::config::PaginationConfig;
use crate::db::{Database, User};
use crate::guard::check_report;
use crate::pagination::{PaginatedResult, Pagination};
use crate::validation::require_text;
use crate::{BulletinError, Result};

use super::repository::ReportRepository;
use super::types::{NewReport, ReportEntry, ReportReceipt};

/// Report service for filing reports and reading the queue.
pub struct ReportService<'a> {
    db: &'a Database,
    page_limits: PaginationConfig,
}

impl<'a> ReportService<'a> {
    /// Create a new ReportService.
    pub fn new(db: &'a Database) -> Self {
        Self {
            db,
            page_limits: PaginationConfig::default(),
        }
    }

    /// Use configured page size bounds for the queue.
    pub fn with_page_limits(mut self, limits: PaginationConfig) -> Self {
        self.page_limits = limits;
        self
    }

    /// Report someone else's board.
    ///
    /// Fails with `SelfReport` on the actor's own board, and with
    /// `DuplicateReport` if the actor already reported it.
    pub async fn report(&self, board_id: i64, actor: &User, content: &str) -> Result<ReportReceipt> {
        let mut tx = self.db.begin().await?;

        let board = BoardRepository::new(&mut tx)
            .get_by_id(board_id)
            .await?
            .ok_or(BulletinError::BoardNotFound)?;
        let reporter = require_user(&mut tx, actor.id).await?;

        let mut reports = ReportRepository::new(&mut tx);
        check_report(&mut reports, reporter.id, &board).await?;
        require_text("report content", content)?;
        let report = reports
            .create(&NewReport::new(reporter.id, board.id, content))
            .await?;

        tx.commit().await?;

        info!(
            report_id = report.id,
            board_id,
            reporter_id = reporter.id,
            "Board reported"
        );
        Ok(ReportReceipt {
            report_id: report.id,
            nickname: reporter.nickname,
            board_id: board.id,
            title: board.title,
            content: board.content,
            report_content: report.report_content,
        })
    }

    /// Reports awaiting moderation, newest first by default.
    pub async fn queue(&self, pagination: Pagination) -> Result<PaginatedResult<ReportEntry>> {
        let pagination = pagination.clamped(&self.page_limits);
        let mut conn = self.db.acquire().await?;
        let mut repo = ReportRepository::new(&mut conn);

        let total = repo.count().await?;
        let items = repo.list_entries(pagination).await?;
        Ok(PaginatedResult::new(items, total, pagination))
    }
}
