//! Typed wrappers for the endpoints the Distributed server exposes.

use std::fmt;

use super::client::ApiClient;
use super::error::ApiError;
use super::types::{
    Acknowledged, Board, BoardsRequest, Comment, CommentsRequest, LoginRequest, NewBoardRequest,
    NewCommentRequest, NewPostRequest, Post, PostsRequest, RecordsResponse, SessionRequest,
    SessionResponse, SignupRequest, VoteRequest,
};

/// Known API endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    /// Log in with username and password.
    Login,
    /// Create an account and log in.
    Signup,
    /// End a session.
    Logout,
    /// Look up a session and its account.
    ReadSession,
    /// Create a post.
    Post,
    /// List posts.
    Posts,
    /// Create a board.
    Board,
    /// List boards.
    Boards,
    /// Create a comment.
    Comment,
    /// List the comments of a post.
    Comments,
    /// Upvote a post.
    UpvotePost,
    /// Downvote a post.
    DownvotePost,
    /// Upvote a comment.
    UpvoteComment,
    /// Downvote a comment.
    DownvoteComment,
}

impl Endpoint {
    /// Endpoint name as appended to the API prefix.
    pub fn as_str(&self) -> &'static str {
        match self {
            Endpoint::Login => "login",
            Endpoint::Signup => "signup",
            Endpoint::Logout => "logout",
            Endpoint::ReadSession => "readSession",
            Endpoint::Post => "post",
            Endpoint::Posts => "posts",
            Endpoint::Board => "board",
            Endpoint::Boards => "boards",
            Endpoint::Comment => "comment",
            Endpoint::Comments => "comments",
            Endpoint::UpvotePost => "upvotePost",
            Endpoint::DownvotePost => "downvotePost",
            Endpoint::UpvoteComment => "upvoteComment",
            Endpoint::DownvoteComment => "downvoteComment",
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

type ApiResult<T> = std::result::Result<T, ApiError>;

impl ApiClient {
    /// `login`: exchange credentials for a session.
    pub async fn login(&self, request: &LoginRequest) -> ApiResult<SessionResponse> {
        self.call(Endpoint::Login.as_str(), request).await
    }

    /// `signup`: create an account (if needed) and log in.
    pub async fn signup(&self, request: &SignupRequest) -> ApiResult<SessionResponse> {
        self.call(Endpoint::Signup.as_str(), request).await
    }

    /// `logout`: end a session.
    pub async fn logout(&self, session_id: &str) -> ApiResult<Acknowledged> {
        let request = SessionRequest {
            session_id: session_id.to_string(),
        };
        self.call(Endpoint::Logout.as_str(), &request).await
    }

    /// `readSession`: look up a session and its account.
    pub async fn read_session(&self, session_id: &str) -> ApiResult<SessionResponse> {
        let request = SessionRequest {
            session_id: session_id.to_string(),
        };
        self.call(Endpoint::ReadSession.as_str(), &request).await
    }

    /// `posts`: list posts matching the query.
    pub async fn posts(&self, request: &PostsRequest) -> ApiResult<Vec<Post>> {
        let rsp: RecordsResponse<Post> = self.call(Endpoint::Posts.as_str(), request).await?;
        Ok(rsp.records)
    }

    /// `post`: create a post.
    pub async fn create_post(&self, request: &NewPostRequest) -> ApiResult<Acknowledged> {
        self.call(Endpoint::Post.as_str(), request).await
    }

    /// `boards`: list boards matching the query.
    pub async fn boards(&self, request: &BoardsRequest) -> ApiResult<Vec<Board>> {
        let rsp: RecordsResponse<Board> = self.call(Endpoint::Boards.as_str(), request).await?;
        Ok(rsp.records)
    }

    /// `board`: create a board.
    pub async fn create_board(&self, request: &NewBoardRequest) -> ApiResult<Acknowledged> {
        self.call(Endpoint::Board.as_str(), request).await
    }

    /// `comments`: list the comments of a post.
    pub async fn comments(&self, post_id: &str) -> ApiResult<Vec<Comment>> {
        let request = CommentsRequest {
            post_id: post_id.to_string(),
        };
        let rsp: RecordsResponse<Comment> =
            self.call(Endpoint::Comments.as_str(), &request).await?;
        Ok(rsp.records)
    }

    /// `comment`: create a comment.
    pub async fn create_comment(&self, request: &NewCommentRequest) -> ApiResult<Acknowledged> {
        self.call(Endpoint::Comment.as_str(), request).await
    }

    /// Cast a vote through one of the four vote endpoints.
    pub async fn vote(&self, endpoint: Endpoint, request: &VoteRequest) -> ApiResult<Acknowledged> {
        debug_assert!(matches!(
            endpoint,
            Endpoint::UpvotePost
                | Endpoint::DownvotePost
                | Endpoint::UpvoteComment
                | Endpoint::DownvoteComment
        ));
        self.call(endpoint.as_str(), request).await
    }

    /// `upvotePost`: upvote a post.
    pub async fn upvote_post(&self, request: &VoteRequest) -> ApiResult<Acknowledged> {
        self.vote(Endpoint::UpvotePost, request).await
    }

    /// `downvotePost`: downvote a post.
    pub async fn downvote_post(&self, request: &VoteRequest) -> ApiResult<Acknowledged> {
        self.vote(Endpoint::DownvotePost, request).await
    }

    /// `upvoteComment`: upvote a comment.
    pub async fn upvote_comment(&self, request: &VoteRequest) -> ApiResult<Acknowledged> {
        self.vote(Endpoint::UpvoteComment, request).await
    }

    /// `downvoteComment`: downvote a comment.
    pub async fn downvote_comment(&self, request: &VoteRequest) -> ApiResult<Acknowledged> {
        self.vote(Endpoint::DownvoteComment, request).await
    }
}
