//! Report module.
//!
//! A report flags someone else's board for moderation. Each user may report
//! a given board once, and never their own.

mod repository;
mod service;
mod types;

pub use repository::ReportRepository;
pub use service::ReportService;
pub use types::{NewReport, Report, ReportEntry, ReportReceipt};
