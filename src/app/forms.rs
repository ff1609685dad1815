//! Form input and validation.
//!
//! Forms are checked before anything is sent to the backend; a failed
//! check produces a message for the error region.

use validator::{Validate, ValidationError, ValidationErrors};

use crate::api::{LoginRequest, NewBoard, NewComment, NewPost, SignupRequest};
use crate::{DistributedError, Result};

/// Maximum length of a board name.
pub const MAX_BOARD_NAME: u64 = 50;
/// Maximum length of a post title or link.
pub const MAX_TITLE: u64 = 200;
/// Maximum length of post, comment, or board description text.
pub const MAX_TEXT: u64 = 3000;

/// Login form.
#[derive(Debug, Clone, Default, Validate)]
pub struct LoginForm {
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
}

impl LoginForm {
    /// Create a form.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Validate the form.
    pub fn check(&self) -> Result<()> {
        self.validate().map_err(into_error)?;
        check_field(not_empty_trimmed(&self.username), "username")?;
        check_field(no_control_chars(&self.username), "username")
    }

    /// The request to send.
    pub fn to_request(&self) -> LoginRequest {
        LoginRequest {
            username: self.username.trim().to_string(),
            password: self.password.clone(),
        }
    }
}

/// Signup form.
#[derive(Debug, Clone, Default, Validate)]
pub struct SignupForm {
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
    #[validate(email(message = "Email address is invalid"))]
    pub email: String,
}

impl SignupForm {
    /// Create a form.
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            email: email.into(),
        }
    }

    /// Validate the form.
    pub fn check(&self) -> Result<()> {
        self.validate().map_err(into_error)?;
        check_field(not_empty_trimmed(&self.username), "username")?;
        check_field(no_control_chars(&self.username), "username")
    }

    /// The request to send.
    pub fn to_request(&self) -> SignupRequest {
        SignupRequest {
            username: self.username.trim().to_string(),
            password: self.password.clone(),
            email: self.email.trim().to_string(),
        }
    }
}

/// New post form. A post needs a link, some text, or both.
#[derive(Debug, Clone, Default, Validate)]
pub struct NewPostForm {
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: String,
    #[validate(length(min = 1, max = 50, message = "Board must be 1-50 characters"))]
    pub board: String,
    #[validate(
        url(message = "Link must be a valid URL"),
        length(max = 200, message = "Link must be at most 200 characters")
    )]
    pub url: Option<String>,
    #[validate(length(max = 3000, message = "Text must be at most 3000 characters"))]
    pub content: String,
}

impl NewPostForm {
    /// Create a form; an empty link is treated as no link.
    pub fn new(
        title: impl Into<String>,
        board: impl Into<String>,
        url: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        let url: String = url.into();
        Self {
            title: title.into(),
            board: board.into(),
            url: (!url.trim().is_empty()).then(|| url.trim().to_string()),
            content: content.into(),
        }
    }

    /// Validate the form.
    pub fn check(&self) -> Result<()> {
        self.validate().map_err(into_error)?;
        check_field(not_empty_trimmed(&self.title), "title")?;
        check_field(no_control_chars(&self.title), "title")?;
        check_field(not_empty_trimmed(&self.board), "board")?;
        if self.url.is_none() && self.content.trim().is_empty() {
            return Err(DistributedError::Validation(
                "A post needs a link or some text".to_string(),
            ));
        }
        Ok(())
    }

    /// Board name as it is stored.
    pub fn board_name(&self) -> String {
        self.board.trim().to_lowercase()
    }

    /// The post to send.
    pub fn to_post(&self) -> NewPost {
        NewPost {
            title: self.title.trim().to_string(),
            board: self.board_name(),
            url: self.url.clone().unwrap_or_default(),
            content: self.content.clone(),
        }
    }
}

/// New board form.
#[derive(Debug, Clone, Default, Validate)]
pub struct NewBoardForm {
    #[validate(length(min = 1, max = 50, message = "Name must be 1-50 characters"))]
    pub name: String,
    #[validate(length(max = 3000, message = "Description must be at most 3000 characters"))]
    pub description: String,
}

impl NewBoardForm {
    /// Create a form.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }

    /// Validate the form.
    pub fn check(&self) -> Result<()> {
        self.validate().map_err(into_error)?;
        check_field(not_empty_trimmed(&self.name), "name")?;
        check_field(no_control_chars(&self.name), "name")?;
        if self.name.contains(['=', '#']) {
            return Err(DistributedError::Validation(
                "name: Must not contain '=' or '#'".to_string(),
            ));
        }
        Ok(())
    }

    /// Board name as it is stored.
    pub fn board_name(&self) -> String {
        self.name.trim().to_lowercase()
    }

    /// The board to send.
    pub fn to_board(&self) -> NewBoard {
        NewBoard {
            name: self.board_name(),
            description: self.description.trim().to_string(),
        }
    }
}

/// Comment form.
#[derive(Debug, Clone, Default, Validate)]
pub struct CommentForm {
    #[validate(length(min = 1, message = "Post is required"))]
    pub post_id: String,
    #[validate(length(min = 1, max = 3000, message = "Comment must be 1-3000 characters"))]
    pub content: String,
}

impl CommentForm {
    /// Create a form.
    pub fn new(post_id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            post_id: post_id.into(),
            content: content.into(),
        }
    }

    /// Validate the form.
    pub fn check(&self) -> Result<()> {
        self.validate().map_err(into_error)?;
        check_field(not_empty_trimmed(&self.content), "content")
    }

    /// The comment to send.
    pub fn to_comment(&self) -> NewComment {
        NewComment {
            content: self.content.clone(),
            post_id: self.post_id.clone(),
        }
    }
}

/// Reject strings containing control characters other than whitespace.
pub fn no_control_chars(value: &str) -> std::result::Result<(), ValidationError> {
    if value
        .chars()
        .any(|c| c.is_control() && c != '\n' && c != '\r' && c != '\t')
    {
        return Err(ValidationError::new("no_control_chars")
            .with_message("Must not contain control characters".into()));
    }
    Ok(())
}

/// Reject strings that are empty after trimming.
pub fn not_empty_trimmed(value: &str) -> std::result::Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("not_empty_trimmed")
            .with_message("Must not be empty".into()));
    }
    Ok(())
}

/// Flatten validation errors into one message, ordered by field.
pub fn validation_message(errors: &ValidationErrors) -> String {
    let mut fields: Vec<(String, Vec<String>)> = errors
        .field_errors()
        .into_iter()
        .map(|(field, errs)| {
            let messages = errs
                .iter()
                .map(|e| {
                    e.message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| e.code.to_string())
                })
                .collect();
            (field.to_string(), messages)
        })
        .collect();
    fields.sort();
    fields
        .into_iter()
        .map(|(_, messages)| messages.join(", "))
        .collect::<Vec<_>>()
        .join("; ")
}

fn into_error(errors: ValidationErrors) -> DistributedError {
    DistributedError::Validation(validation_message(&errors))
}

fn check_field(result: std::result::Result<(), ValidationError>, field: &str) -> Result<()> {
    result.map_err(|e| {
        let message = e
            .message
            .map(|m| m.to_string())
            .unwrap_or_else(|| e.code.to_string());
        DistributedError::Validation(format!("{field}: {message}"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(result: Result<()>) -> String {
        match result {
            Err(DistributedError::Validation(msg)) => msg,
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_login_form() {
        assert!(LoginForm::new("alice", "password123").check().is_ok());
        assert_eq!(
            message(LoginForm::new("alice", "short").check()),
            "Password must be at least 8 characters"
        );
        assert_eq!(
            message(LoginForm::new("   ", "password123").check()),
            "username: Must not be empty"
        );
    }

    #[test]
    fn test_login_request_trims_username() {
        let req = LoginForm::new(" alice ", "password123").to_request();
        assert_eq!(req.username, "alice");
        assert_eq!(req.password, "password123");
    }

    #[test]
    fn test_signup_form_email() {
        assert!(SignupForm::new("alice", "password123", "alice@example.com")
            .check()
            .is_ok());
        assert_eq!(
            message(SignupForm::new("alice", "password123", "not-an-email").check()),
            "Email address is invalid"
        );
    }

    #[test]
    fn test_signup_multiple_errors_ordered_by_field() {
        let msg = message(SignupForm::new("", "short", "nope").check());
        assert_eq!(
            msg,
            "Email address is invalid; Password must be at least 8 characters; Username is required"
        );
    }

    #[test]
    fn test_new_post_needs_link_or_text() {
        let form = NewPostForm::new("Hello", "general", "", "");
        assert_eq!(form.url, None);
        assert_eq!(message(form.check()), "A post needs a link or some text");

        assert!(NewPostForm::new("Hello", "general", "https://example.com", "")
            .check()
            .is_ok());
        assert!(NewPostForm::new("Hello", "general", "", "some text")
            .check()
            .is_ok());
    }

    #[test]
    fn test_new_post_limits() {
        let long_title = "t".repeat(201);
        assert!(NewPostForm::new(long_title, "general", "", "text")
            .check()
            .is_err());
        let long_board = "b".repeat(51);
        assert!(NewPostForm::new("Hello", long_board, "", "text")
            .check()
            .is_err());
        let long_text = "x".repeat(3001);
        assert!(NewPostForm::new("Hello", "general", "", long_text)
            .check()
            .is_err());
        assert_eq!(
            message(NewPostForm::new("Hello", "general", "not a url", "").check()),
            "Link must be a valid URL"
        );
    }

    #[test]
    fn test_new_post_board_is_lowercased() {
        let post = NewPostForm::new(" Hello ", " General ", "", "text").to_post();
        assert_eq!(post.title, "Hello");
        assert_eq!(post.board, "general");
        assert_eq!(post.url, "");
    }

    #[test]
    fn test_new_board_form() {
        assert!(NewBoardForm::new("rust", "All things Rust").check().is_ok());
        assert!(NewBoardForm::new("", "desc").check().is_err());
        assert!(NewBoardForm::new("a=b", "").check().is_err());
        assert_eq!(NewBoardForm::new(" Rust ", "").to_board().name, "rust");
    }

    #[test]
    fn test_comment_form() {
        assert!(CommentForm::new("42", "Nice post").check().is_ok());
        assert_eq!(
            message(CommentForm::new("42", "").check()),
            "Comment must be 1-3000 characters"
        );
        assert_eq!(
            message(CommentForm::new("42", "   ").check()),
            "content: Must not be empty"
        );
        assert_eq!(
            message(CommentForm::new("", "text").check()),
            "Post is required"
        );
    }

    #[test]
    fn test_custom_validators() {
        assert!(no_control_chars("line\nbreak\ttab").is_ok());
        assert!(no_control_chars("null\0byte").is_err());
        assert!(not_empty_trimmed(" x ").is_ok());
        assert!(not_empty_trimmed(" \t ").is_err());
    }
}
