//! Posts: creation, the comments page, commenting and upvoting.

use chrono::Utc;
use tracing::{debug, info};

use super::forms::{CommentForm, NewPostForm};
use super::{render, View};
use crate::api::{NewCommentRequest, NewPostRequest, PostsRequest, VoteRequest};
use crate::dom::ElementId;

/// Show the new post form; `board` pre-fills the board field.
pub(super) fn new_post_page(view: &View, board: &str) {
    let html = render::new_post_form(board);
    view.render(|doc| doc.set_html(ElementId::Content, html));
}

pub(super) fn submit_post(view: &View, form: NewPostForm) {
    view.render(|doc| doc.clear(ElementId::Error));
    if let Err(e) = form.check() {
        view.report_local("post", &e);
        return;
    }
    let request = NewPostRequest {
        post: form.to_post(),
        session_id: view.session().token().unwrap_or_default(),
    };
    let task = view.clone();
    view.spawn(async move {
        match task.api().create_post(&request).await {
            Ok(ack) => {
                info!(id = %ack.id, board = %request.post.board, "post created");
                task.navigate(&request.post.board);
            }
            Err(e) => task.report("post", &e),
        }
    });
}

/// Show a post with its comments and the comment form.
pub(super) fn load_comments(view: &View, post_id: &str) {
    if post_id.is_empty() {
        view.show_error("No post selected");
        return;
    }
    let form = render::comment_form(post_id);
    view.render(|doc| doc.set_html(ElementId::Content, form.clone()));

    let task = view.clone();
    let id = post_id.to_string();
    view.spawn(async move {
        match task.api().posts(&PostsRequest::by_id(&id)).await {
            Ok(posts) => match posts.first() {
                Some(post) => {
                    let html = render::post_detail(post, Utc::now());
                    task.render(|doc| doc.set_html(ElementId::Description, html));
                }
                None => {
                    debug!(id = %id, "post not found");
                    task.show_error("Post not found");
                }
            },
            Err(e) => task.report("posts", &e),
        }
    });

    let task = view.clone();
    let id = post_id.to_string();
    view.spawn(async move {
        match task.api().comments(&id).await {
            Ok(comments) => {
                debug!(id = %id, count = comments.len(), "comments loaded");
                let mut html = render::comment_list(&comments, Utc::now());
                html.push_str(&form);
                task.render(|doc| doc.set_html(ElementId::Content, html));
            }
            Err(e) => task.report("comments", &e),
        }
    });
}

pub(super) fn submit_comment(view: &View, form: CommentForm) {
    view.render(|doc| doc.clear(ElementId::Error));
    if let Err(e) = form.check() {
        view.report_local("comment", &e);
        return;
    }
    let request = NewCommentRequest {
        comment: form.to_comment(),
        session_id: view.session().token().unwrap_or_default(),
    };
    let task = view.clone();
    view.spawn(async move {
        match task.api().create_comment(&request).await {
            Ok(ack) => {
                info!(id = %ack.id, post = %request.comment.post_id, "comment created");
                task.navigate(&format!("comments={}", request.comment.post_id));
            }
            Err(e) => task.report("comment", &e),
        }
    });
}

/// Upvote a post, then show its comments.
pub(super) fn upvote(view: &View, post_id: &str) {
    if post_id.is_empty() {
        view.show_error("No post selected");
        return;
    }
    let request = VoteRequest {
        id: post_id.to_string(),
        session_id: view.session().token().unwrap_or_default(),
    };
    let task = view.clone();
    view.spawn(async move {
        match task.api().upvote_post(&request).await {
            Ok(_) => {
                info!(id = %request.id, "post upvoted");
                task.navigate(&format!("comments={}", request.id));
            }
            Err(e) => task.report("upvotePost", &e),
        }
    });
}
