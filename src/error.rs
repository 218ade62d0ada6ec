//! Error types for the bulletin core.

use thiserror::Error;

/// Error category used by the request layer to pick a transport status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Bad request (400).
    BadRequest,
    /// Unauthenticated (401).
    Unauthorized,
    /// Not found (404).
    NotFound,
    /// Conflict (409).
    Conflict,
    /// Internal server error (500).
    InternalError,
}

impl ErrorCode {
    /// Get the HTTP status code for this category.
    pub fn status_code(&self) -> u16 {
        match self {
            ErrorCode::BadRequest => 400,
            ErrorCode::Unauthorized => 401,
            ErrorCode::NotFound => 404,
            ErrorCode::Conflict => 409,
            ErrorCode::InternalError => 500,
        }
    }
}

/// Common error type for the bulletin core.
#[derive(Error, Debug)]
pub enum BulletinError {
    /// Referenced user does not exist.
    #[error("user not found")]
    UserNotFound,

    /// Referenced board does not exist (or is not the parent of the target).
    #[error("board not found")]
    BoardNotFound,

    /// Referenced comment does not exist.
    #[error("comment not found")]
    CommentNotFound,

    /// Referenced reply does not exist.
    #[error("reply not found")]
    ReplyNotFound,

    /// No like exists for the (user, board) pair.
    #[error("like not found")]
    LikeNotFound,

    /// Referenced report does not exist.
    #[error("report not found")]
    ReportNotFound,

    /// Acting user is not allowed to touch the target entity.
    #[error("invalid request")]
    InvalidRequest,

    /// Login identifier already registered.
    #[error("login id is already in use")]
    DuplicateLoginId,

    /// The user already liked this board.
    #[error("board is already liked")]
    DuplicateLike,

    /// The user already reported this board.
    #[error("board is already reported")]
    DuplicateReport,

    /// A user tried to report their own board.
    #[error("cannot report your own board")]
    SelfReport,

    /// No authenticated acting user.
    #[error("authentication required")]
    Auth,

    /// Validation error for user input.
    #[error("validation error: {0}")]
    Validation(String),

    /// Database error.
    #[error("database error: {0}")]
    Database(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// Password hashing failure.
    #[error("password error: {0}")]
    Password(String),
}

impl BulletinError {
    /// Category of this error for the request layer.
    pub fn code(&self) -> ErrorCode {
        match self {
            BulletinError::UserNotFound
            | BulletinError::BoardNotFound
            | BulletinError::CommentNotFound
            | BulletinError::ReplyNotFound
            | BulletinError::LikeNotFound
            | BulletinError::ReportNotFound => ErrorCode::NotFound,
            BulletinError::InvalidRequest
            | BulletinError::SelfReport
            | BulletinError::Validation(_) => ErrorCode::BadRequest,
            BulletinError::DuplicateLoginId
            | BulletinError::DuplicateLike
            | BulletinError::DuplicateReport => ErrorCode::Conflict,
            BulletinError::Auth => ErrorCode::Unauthorized,
            BulletinError::Database(_)
            | BulletinError::Io(_)
            | BulletinError::Config(_)
            | BulletinError::Password(_) => ErrorCode::InternalError,
        }
    }

    /// Shorthand for `self.code().status_code()`.
    pub fn status_code(&self) -> u16 {
        self.code().status_code()
    }
}

impl From<sqlx::Error> for BulletinError {
    fn from(e: sqlx::Error) -> Self {
        BulletinError::Database(e.to_string())
    }
}

/// Result type alias for bulletin operations.
pub type Result<T> = std::result::Result<T, BulletinError>;

/// Whether a sqlx error is a UNIQUE constraint violation.
pub(crate) fn is_unique_violation(e: &sqlx::Error) -> bool {
    match e {
        sqlx::Error::Database(db_err) => db_err.is_unique_violation(),
        _ => false,
    }
}
