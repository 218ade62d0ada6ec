//! Bulletin - entity consistency and authorization core for a bulletin board.
//!
//! Users write boards, comment on them, reply to comments, like boards, and
//! report boards. This crate owns the rules around those entities: who may
//! change what, which pairs may exist only once, how grades advance, and in
//! what order dependents are removed when a board or account goes away.
//!
//! Request handling and sessions live outside. Callers resolve the acting
//! [`User`] (see [`auth::resolve_actor`]) and pass it into every service call.

pub mod admin;
pub mod auth;
pub mod board;
pub mod cascade;
pub mod config;
pub mod db;
pub mod error;
pub mod grade;
pub mod guard;
pub mod like;
pub mod logging;
pub mod pagination;
pub mod report;
pub mod user;
pub mod validation;

pub use admin::{ensure_admin, AdminService};
pub use auth::{login, register, require_owner, resolve_actor, RegistrationRequest};
pub use board::{Board, BoardDetail, BoardService, Comment, Reply, WriteBoardResult};
pub use cascade::CascadeReport;
pub use config::Config;
pub use db::{Database, Grade, NewUser, User, UserRepository};
pub use error::{BulletinError, ErrorCode, Result};
pub use grade::{upgrade_grade, GradePolicy};
pub use like::{Like, LikeService};
pub use pagination::{PaginatedResult, Pagination, SortDirection};
pub use report::{ReportEntry, ReportReceipt, ReportService};
pub use user::UserService;
