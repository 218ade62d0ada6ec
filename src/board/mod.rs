//! Board module.
//!
//! This module provides the board lifecycle, including:
//! - Boards (write, read, list, search, edit, delete)
//! - Comments on boards
//! - Replies to comments
//! - Read views assembled from all three

mod comment;
mod comment_repository;
mod reply_repository;
mod repository;
mod service;
mod types;

pub use comment::{Comment, NewComment, NewReply, Reply};
pub use comment_repository::CommentRepository;
pub use reply_repository::ReplyRepository;
pub use repository::BoardRepository;
pub use service::BoardService;
pub(crate) use service::{load_comment_on, load_reply_on};
pub use types::{
    Board, BoardDetail, BoardSummary, CommentView, NewBoard, ReplyView, WriteBoardResult,
};
