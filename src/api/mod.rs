//! Client for the Distributed backend API.
//!
//! This module provides:
//! - `ApiClient`, which POSTs JSON to `/api/<endpoint>` and returns a single
//!   typed result per call
//! - Typed wrappers for every endpoint
//! - The records and requests exchanged with the server
//! - `ApiError`, including the unwrapping of structured server errors

mod client;
mod endpoints;
mod error;
mod types;

pub use client::{ApiClient, JSON_CONTENT_TYPE};
pub use endpoints::Endpoint;
pub use error::{server_error_message, ApiError, ServerErrorDetail};
pub use types::{
    Account, Acknowledged, Board, BoardsRequest, Comment, CommentsRequest, LoginRequest,
    NewBoard, NewBoardRequest, NewComment, NewCommentRequest, NewPost, NewPostRequest, Post,
    PostsRequest, RecordsResponse, Session, SessionRequest, SessionResponse, SignupRequest,
    VoteRequest,
};
