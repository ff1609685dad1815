//! HTML for the page regions.

use chrono::{DateTime, Utc};

use crate::api::{Board, Comment, Post};
use crate::datetime::time_since_at;
use crate::dom::escape_html;

/// Shown on a board without posts.
pub const NO_POSTS: &str = "<p>There are no posts on this board</p>";

/// Shown on a post without comments.
pub const NO_COMMENTS: &str = "<p>No comments yet</p>";

/// The about page.
pub const ABOUT: &str = "<p>Distributed is a message board run as a set of small services. \
Boards hold posts, posts hold comments, and anyone with an account can start a board.</p>\
<p>Pick a board from the heading, browse <a href='#'>all posts</a>, \
or <a href='#new-post'>write one</a>.</p>";

/// A list of posts; `show_board` adds the board each post belongs to.
pub fn post_list(posts: &[Post], show_board: bool, now: DateTime<Utc>) -> String {
    if posts.is_empty() {
        return NO_POSTS.to_string();
    }
    posts
        .iter()
        .map(|post| post_item(post, show_board, now))
        .collect()
}

/// One post in a listing.
pub fn post_item(post: &Post, show_board: bool, now: DateTime<Utc>) -> String {
    let mut html = String::from("<div class='post'>");
    html.push_str(&format!("<h4>{}</h4>", escape_html(&post.title)));
    html.push_str("<span class='meta'>");
    if !post.url.is_empty() {
        html.push_str(&format!("<a href='{}'>Link</a> | ", escape_html(&post.url)));
    }
    html.push_str(&byline(&post.user_name, &post.created, now));
    if show_board && !post.board.is_empty() {
        let board = escape_html(&post.board);
        html.push_str(&format!(" to <a href='#{board}'>{board}</a>"));
    }
    html.push_str(&format!(
        " | {} points | <a href='#comments={id}'>{} comments</a> | <a href='#upvote={id}'>upvote</a>",
        post.score,
        post.comment_count,
        id = escape_html(&post.id),
    ));
    html.push_str("</span></div>");
    html
}

/// A post shown above its comments.
pub fn post_detail(post: &Post, now: DateTime<Utc>) -> String {
    let mut html = String::from("<div class='post'>");
    html.push_str(&format!("<h4>{}</h4>", escape_html(&post.title)));
    if !post.url.is_empty() {
        let url = escape_html(&post.url);
        html.push_str(&format!("<p><a href='{url}'>{url}</a></p>"));
    }
    if !post.content.is_empty() {
        html.push_str(&format!("<p>{}</p>", multiline(&post.content)));
    }
    html.push_str("<span class='meta'>");
    html.push_str(&byline(&post.user_name, &post.created, now));
    if !post.board.is_empty() {
        let board = escape_html(&post.board);
        html.push_str(&format!(" to <a href='#{board}'>{board}</a>"));
    }
    html.push_str(&format!(
        " | {} points | <a href='#upvote={}'>upvote</a></span></div>",
        post.score,
        escape_html(&post.id)
    ));
    html
}

/// Comments on a post, oldest first as returned by the backend.
pub fn comment_list(comments: &[Comment], now: DateTime<Utc>) -> String {
    if comments.is_empty() {
        return NO_COMMENTS.to_string();
    }
    comments
        .iter()
        .map(|c| {
            format!(
                "<div class='comment'><p>{}</p><span class='meta'>{} | {} points</span></div>",
                multiline(&c.content),
                byline(&c.user_name, &c.created, now),
                c.score
            )
        })
        .collect()
}

/// Board description shown above the post list.
pub fn board_description(board: &Board) -> String {
    format!("<p>{}</p>", multiline(&board.description))
}

/// Login and signup forms.
pub fn login_forms() -> String {
    concat!(
        "<h4>Login</h4>",
        "<form id='login-form'>",
        "<input id='login-username' name='username' placeholder='Username'>",
        "<input id='login-password' name='password' type='password' placeholder='Password'>",
        "<button type='submit'>Login</button>",
        "</form>",
        "<h4>Signup</h4>",
        "<form id='signup-form'>",
        "<input id='signup-username' name='username' placeholder='Username'>",
        "<input id='signup-email' name='email' placeholder='Email'>",
        "<input id='signup-password' name='password' type='password' placeholder='Password'>",
        "<button type='submit'>Signup</button>",
        "</form>",
    )
    .to_string()
}

/// The new post form, with the board pre-filled.
pub fn new_post_form(board: &str) -> String {
    format!(
        concat!(
            "<form id='post-form'>",
            "<input id='post-title' name='title' placeholder='Title'>",
            "<input id='post-board' name='board' placeholder='Board' value='{}'>",
            "<input id='post-url' name='url' placeholder='Link (optional)'>",
            "<textarea id='post-content' name='content' placeholder='Text'></textarea>",
            "<button type='submit'>Submit</button>",
            "</form>",
        ),
        escape_html(board)
    )
}

/// The new board form.
pub fn new_board_form() -> String {
    concat!(
        "<form id='board-form'>",
        "<input id='board-name' name='name' placeholder='Name'>",
        "<textarea id='board-description' name='description' placeholder='Description'></textarea>",
        "<button type='submit'>Create</button>",
        "</form>",
    )
    .to_string()
}

/// The comment form for a post.
pub fn comment_form(post_id: &str) -> String {
    format!(
        concat!(
            "<form id='comment-form'>",
            "<input type='hidden' name='postId' value='{}'>",
            "<textarea id='comment-content' name='content' placeholder='Comment'></textarea>",
            "<button type='submit'>Comment</button>",
            "</form>",
        ),
        escape_html(post_id)
    )
}

fn byline(user: &str, created: &str, now: DateTime<Utc>) -> String {
    format!(
        "Posted by {} {} ago",
        escape_html(user),
        time_since_at(created, now)
    )
}

fn multiline(text: &str) -> String {
    escape_html(text).replace('\n', "<br>")
}
