//! Like module.
//!
//! A like links one user to one board, at most once per pair.

mod repository;
mod service;
mod types;

pub use repository::LikeRepository;
pub use service::LikeService;
pub use types::Like;
