//! Distributed - message board client
//!
//! A client for the Distributed message board backend: an API client for
//! its JSON-over-HTTP endpoints, a hash router that maps location fragments
//! to pages or boards, and an application that renders pages into an
//! in-process document.

pub mod api;
pub mod app;
pub mod config;
pub mod datetime;
pub mod dom;
pub mod error;
pub mod logging;
pub mod router;
pub mod session;

pub use api::{ApiClient, ApiError, Board, Comment, Endpoint, Post, Session};
pub use app::{
    Application, CommentForm, LoginForm, NewBoardForm, NewPostForm, Page, SignupForm,
};
pub use config::Config;
pub use datetime::time_since;
pub use dom::{Document, ElementId};
pub use error::{DistributedError, Result};
pub use router::{HashRouter, Resolution, RouteTable};
pub use session::{CookieJar, SessionStore};
