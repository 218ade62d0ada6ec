//! User model.
//!
//! This module defines the User struct and the Grade membership tiers.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::Serialize;

/// Membership tier, unlocked by authoring boards.
///
/// Variants are declared lowest first; ADMIN is only ever assigned
/// explicitly, never by promotion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Grade {
    /// Entry tier for every new account.
    #[default]
    Silver,
    /// First promotion tier.
    Gold,
    /// Second promotion tier.
    Red,
    /// Administrator.
    Admin,
}

impl Grade {
    /// Convert grade to database string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Grade::Silver => "silver",
            Grade::Gold => "gold",
            Grade::Red => "red",
            Grade::Admin => "admin",
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Grade {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "silver" => Ok(Grade::Silver),
            "gold" => Ok(Grade::Gold),
            "red" => Ok(Grade::Red),
            "admin" => Ok(Grade::Admin),
            _ => Err(format!("unknown grade: {s}")),
        }
    }
}

/// Registered user.
#[derive(Debug, Clone)]
pub struct User {
    /// Unique user ID.
    pub id: i64,
    /// Login identifier (unique).
    pub login_id: String,
    /// Password hash (Argon2).
    pub password: String,
    /// Display name.
    pub nickname: String,
    /// Membership tier.
    pub grade: Grade,
    /// Account creation timestamp.
    pub created_at: NaiveDateTime,
}

impl User {
    /// Check if this user is an administrator.
    pub fn is_admin(&self) -> bool {
        self.grade == Grade::Admin
    }
}

/// Data for creating a new user.
#[derive(Debug, Clone)]
pub struct NewUser {
    /// Login identifier.
    pub login_id: String,
    /// Password hash (should be pre-hashed with Argon2).
    pub password: String,
    /// Display name.
    pub nickname: String,
    /// Initial grade (defaults to SILVER).
    pub grade: Grade,
}

impl NewUser {
    /// Create a new user with minimal required fields.
    pub fn new(
        login_id: impl Into<String>,
        password: impl Into<String>,
        nickname: impl Into<String>,
    ) -> Self {
        Self {
            login_id: login_id.into(),
            password: password.into(),
            nickname: nickname.into(),
            grade: Grade::Silver,
        }
    }

    /// Set the initial grade.
    pub fn with_grade(mut self, grade: Grade) -> Self {
        self.grade = grade;
        self
    }
}
