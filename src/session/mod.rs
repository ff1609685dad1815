//! Session handling for Distributed.
//!
//! The session token lives in a cookie (`sess` by default) whose expiry
//! mirrors the server-side session. This module provides the cookie jar
//! and the store the application reads the token from.

mod cookie;
mod store;

pub use cookie::{Cookie, CookieJar};
pub use store::SessionStore;
