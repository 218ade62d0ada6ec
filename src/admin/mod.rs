//! Administration module.
//!
//! This module provides moderation for ADMIN accounts:
//! - User management (list, reset password, delete)
//! - Content removal (boards, comments, replies) without the owner check
//! - The report queue (view, dismiss)
//! - Bootstrapping the first administrator at startup
//!
//! Every [`AdminService`] operation starts with [`crate::auth::require_admin`].

mod bootstrap;
mod service;

pub use bootstrap::ensure_admin;
pub use service::AdminService;
