//! Authentication module.
//!
//! This module provides password hashing, registration and login, acting-user
//! resolution, and the ownership guard used by every mutating operation.

mod password;
mod permission;
mod registration;
mod session;

pub use password::{
    hash_password, validate_password, verify_password, PasswordError, MAX_PASSWORD_LENGTH,
};
pub use permission::{require_admin, require_owner};
pub use registration::{login, register, register_with_grade, RegistrationRequest};
pub use session::{require_user, resolve_actor};
