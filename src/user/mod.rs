//! User self-service.
//!
//! Account operations a user performs on their own account: signing up,
//! logging in, viewing their boards and likes, changing their password, and
//! deleting the account with everything attached to it.

mod service;

pub use service::UserService;
