//! Request and response records exchanged with the Distributed API.

use serde::{Deserialize, Deserializer, Serialize};

// ============================================================================
// Records
// ============================================================================

/// A board containing posts.
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct Board {
    /// Board ID.
    #[serde(default)]
    pub id: String,
    /// Board name, also its routing fragment.
    pub name: String,
    /// Free-form description.
    #[serde(default)]
    pub description: String,
    /// Usernames of the board moderators.
    #[serde(default)]
    pub moderators: Vec<String>,
    /// Creation timestamp.
    #[serde(default)]
    pub created: String,
}

/// A post on a board.
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    /// Post ID.
    #[serde(default)]
    pub id: String,
    /// Title.
    pub title: String,
    /// Author's user ID.
    #[serde(default)]
    pub user_id: String,
    /// Author's username.
    #[serde(default)]
    pub user_name: String,
    /// Body text.
    #[serde(default)]
    pub content: String,
    /// External link, empty when the post is text only.
    #[serde(default)]
    pub url: String,
    /// Board the post belongs to.
    #[serde(default)]
    pub board: String,
    /// Creation timestamp.
    #[serde(default)]
    pub created: String,
    /// Upvote total.
    #[serde(default)]
    pub upvotes: f64,
    /// Downvote total.
    #[serde(default)]
    pub downvotes: f64,
    /// Upvotes minus downvotes.
    #[serde(default)]
    pub score: f64,
    /// Number of comments.
    #[serde(default)]
    pub comment_count: f64,
}

/// A comment on a post.
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    /// Comment ID.
    #[serde(default)]
    pub id: String,
    /// Body text.
    #[serde(default)]
    pub content: String,
    /// Author's user ID.
    #[serde(default)]
    pub user_id: String,
    /// Author's username.
    #[serde(default)]
    pub user_name: String,
    /// Parent comment, empty for top-level comments.
    #[serde(default)]
    pub parent: String,
    /// Post the comment belongs to.
    #[serde(default)]
    pub post_id: String,
    /// Creation timestamp.
    #[serde(default)]
    pub created: String,
    /// Upvote total.
    #[serde(default)]
    pub upvotes: f64,
    /// Downvote total.
    #[serde(default)]
    pub downvotes: f64,
    /// Upvotes minus downvotes.
    #[serde(default)]
    pub score: f64,
}

/// An authenticated session.
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    /// Session token.
    pub id: String,
    /// User the session belongs to.
    #[serde(default)]
    pub user_id: String,
    /// Creation time in epoch seconds.
    #[serde(default, deserialize_with = "epoch_secs")]
    pub created: i64,
    /// Expiry time in epoch seconds.
    #[serde(default, deserialize_with = "epoch_secs")]
    pub expires: i64,
}

impl Session {
    /// Whether the session has expired at `now` (epoch seconds).
    pub fn is_expired_at(&self, now: i64) -> bool {
        self.expires < now
    }
}

/// A user account.
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct Account {
    /// User ID.
    #[serde(default)]
    pub id: String,
    /// Username.
    #[serde(default)]
    pub username: String,
    /// Email address.
    #[serde(default)]
    pub email: String,
}

/// Epoch seconds arrive either as JSON numbers or as numeric strings.
fn epoch_secs<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Int(i64),
        Float(f64),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Int(v) => Ok(v),
        Raw::Float(v) => Ok(v.trunc() as i64),
        Raw::Text(s) => s
            .trim()
            .parse::<i64>()
            .map_err(|e| serde::de::Error::custom(format!("invalid epoch seconds {s:?}: {e}"))),
    }
}

// ============================================================================
// Responses
// ============================================================================

/// Response carrying a list of records.
#[derive(Debug, Clone, Deserialize)]
pub struct RecordsResponse<T> {
    /// Matching records, empty when none.
    #[serde(default = "Vec::new")]
    pub records: Vec<T>,
}

/// Response of `login`, `signup` and `readSession`.
#[derive(Debug, Clone, Deserialize)]
pub struct SessionResponse {
    /// The session.
    pub session: Session,
    /// The account, returned by `readSession` only.
    #[serde(default)]
    pub account: Option<Account>,
}

/// Acknowledgement of a write; some endpoints return the new record's ID.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Acknowledged {
    /// ID of the created record, when reported.
    #[serde(default)]
    pub id: String,
}

// ============================================================================
// Requests
// ============================================================================

/// Login request.
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    /// Username.
    pub username: String,
    /// Password.
    pub password: String,
}

/// Signup request.
#[derive(Debug, Clone, Serialize)]
pub struct SignupRequest {
    /// Username.
    pub username: String,
    /// Password.
    pub password: String,
    /// Email.
    pub email: String,
}

/// Request carrying only a session token (`logout`, `readSession`).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRequest {
    /// Session token.
    pub session_id: String,
}

/// Query for posts.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PostsRequest {
    /// Board name; `all` or empty lists every board.
    pub board: String,
    /// Fetch a single post by ID.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Minimum score.
    #[serde(skip_serializing_if = "is_zero")]
    pub min: i32,
    /// Maximum score.
    #[serde(skip_serializing_if = "is_zero")]
    pub max: i32,
    /// Maximum number of posts.
    #[serde(skip_serializing_if = "is_zero")]
    pub limit: i32,
}

impl PostsRequest {
    /// Posts on a board.
    pub fn board(board: impl Into<String>) -> Self {
        Self {
            board: board.into(),
            ..Default::default()
        }
    }

    /// A single post.
    pub fn by_id(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            ..Default::default()
        }
    }
}

/// Query for boards.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BoardsRequest {
    /// Board ID.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub id: String,
    /// Board name.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,
    /// Maximum number of boards.
    #[serde(skip_serializing_if = "is_zero")]
    pub limit: i32,
}

/// Post fields submitted by the new-post form.
#[derive(Debug, Clone, Default, Serialize)]
pub struct NewPost {
    /// Title.
    pub title: String,
    /// Target board.
    pub board: String,
    /// External link.
    pub url: String,
    /// Body text.
    pub content: String,
}

/// Create a post.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPostRequest {
    /// The post.
    pub post: NewPost,
    /// Session token of the author.
    pub session_id: String,
}

/// Board fields submitted by the new-board form.
#[derive(Debug, Clone, Default, Serialize)]
pub struct NewBoard {
    /// Board name.
    pub name: String,
    /// Description.
    pub description: String,
}

/// Create a board.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBoardRequest {
    /// The board.
    pub board: NewBoard,
    /// Session token of the creator.
    pub session_id: String,
}

/// Comment fields submitted by the comment form.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewComment {
    /// Body text.
    pub content: String,
    /// Post being commented on.
    pub post_id: String,
}

/// Create a comment.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCommentRequest {
    /// The comment.
    pub comment: NewComment,
    /// Session token of the author.
    pub session_id: String,
}

/// Query for the comments of a post.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentsRequest {
    /// Post ID.
    pub post_id: String,
}

/// Up- or downvote a post or comment.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteRequest {
    /// Post or comment ID.
    pub id: String,
    /// Session token of the voter.
    pub session_id: String,
}

fn is_zero(v: &i32) -> bool {
    *v == 0
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_post_defaults() {
        let post: Post = serde_json::from_value(json!({ "title": "Hello" })).unwrap();
        assert_eq!(post.title, "Hello");
        assert_eq!(post.url, "");
        assert_eq!(post.score, 0.0);
        assert_eq!(post.comment_count, 0.0);
    }

    #[test]
    fn test_post_requires_title() {
        let result: Result<Post, _> = serde_json::from_value(json!({ "id": "1" }));
        assert!(result.is_err());
    }

    #[test]
    fn test_post_camel_case_fields() {
        let post: Post = serde_json::from_value(json!({
            "id": "p1",
            "title": "Standup notes",
            "userName": "alice",
            "commentCount": 3,
            "board": "checkins",
            "upvotes": 4.0,
            "score": 2
        }))
        .unwrap();
        assert_eq!(post.user_name, "alice");
        assert_eq!(post.comment_count, 3.0);
        assert_eq!(post.score, 2.0);
    }

    #[test]
    fn test_session_expires_number_or_string() {
        let a: Session =
            serde_json::from_value(json!({ "id": "s", "expires": 1700000000 })).unwrap();
        let b: Session =
            serde_json::from_value(json!({ "id": "s", "expires": "1700000000" })).unwrap();
        let c: Session =
            serde_json::from_value(json!({ "id": "s", "expires": 1700000000.5 })).unwrap();
        assert_eq!(a.expires, 1_700_000_000);
        assert_eq!(b.expires, 1_700_000_000);
        assert_eq!(c.expires, 1_700_000_000);
    }

    #[test]
    fn test_session_expires_invalid_string() {
        let result: Result<Session, _> =
            serde_json::from_value(json!({ "id": "s", "expires": "soon" }));
        assert!(result.is_err());
    }

    #[test]
    fn test_session_expiry() {
        let session = Session {
            id: "s".into(),
            user_id: String::new(),
            created: 0,
            expires: 100,
        };
        assert!(!session.is_expired_at(100));
        assert!(session.is_expired_at(101));
    }

    #[test]
    fn test_records_response_missing_records() {
        let rsp: RecordsResponse<Board> = serde_json::from_value(json!({})).unwrap();
        assert!(rsp.records.is_empty());
    }

    #[test]
    fn test_posts_request_serialization() {
        let value = serde_json::to_value(PostsRequest::board("general")).unwrap();
        assert_eq!(value, json!({ "board": "general" }));

        let value = serde_json::to_value(PostsRequest::by_id("42")).unwrap();
        assert_eq!(value, json!({ "board": "", "id": "42" }));
    }

    #[test]
    fn test_session_id_field_names() {
        let value = serde_json::to_value(VoteRequest {
            id: "p1".into(),
            session_id: "abc".into(),
        })
        .unwrap();
        assert_eq!(value, json!({ "id": "p1", "sessionId": "abc" }));

        let value = serde_json::to_value(NewCommentRequest {
            comment: NewComment {
                content: "nice".into(),
                post_id: "p1".into(),
            },
            session_id: "abc".into(),
        })
        .unwrap();
        assert_eq!(
            value,
            json!({ "comment": { "content": "nice", "postId": "p1" }, "sessionId": "abc" })
        );
    }
}
