//! Board listing and board creation.

use chrono::Utc;
use tracing::{debug, info, warn};

use super::forms::NewBoardForm;
use super::{render, View};
use crate::api::{BoardsRequest, NewBoardRequest, PostsRequest};
use crate::dom::ElementId;
use crate::router::ALL_BOARDS;

/// List the posts on `name`, and its description unless it is the
/// all-boards listing.
pub(super) fn load_board(view: &View, name: &str) {
    if name.is_empty() {
        return;
    }
    let board = name.to_lowercase();
    let show_board = board == ALL_BOARDS;

    let task = view.clone();
    let posts_board = board.clone();
    view.spawn(async move {
        match task.api().posts(&PostsRequest::board(&posts_board)).await {
            Ok(posts) => {
                debug!(board = %posts_board, count = posts.len(), "posts loaded");
                let html = render::post_list(&posts, show_board, Utc::now());
                task.render(|doc| doc.set_html(ElementId::Content, html));
            }
            Err(e) => task.report("posts", &e),
        }
    });

    if show_board {
        return;
    }
    let task = view.clone();
    view.spawn(async move {
        let request = BoardsRequest {
            name: board.clone(),
            ..Default::default()
        };
        match task.api().boards(&request).await {
            Ok(boards) => {
                let Some(found) = boards.into_iter().find(|b| b.name == board) else {
                    debug!(board = %board, "board has no record");
                    return;
                };
                if found.description.is_empty() {
                    return;
                }
                let html = render::board_description(&found);
                task.render(|doc| doc.set_html(ElementId::Description, html));
            }
            Err(e) => task.report("boards", &e),
        }
    });
}

pub(super) fn new_board_page(view: &View) {
    view.render(|doc| doc.set_html(ElementId::Content, render::new_board_form()));
}

pub(super) fn submit_board(view: &View, form: NewBoardForm) {
    view.render(|doc| doc.clear(ElementId::Error));
    if let Err(e) = form.check() {
        view.report_local("board", &e);
        return;
    }
    let board = form.to_board();
    if view.app.router().shadows(&board.name) {
        warn!(board = %board.name, "board name matches a route and will not be reachable by fragment");
    }
    let session_id = view.session().token().unwrap_or_default();
    let task = view.clone();
    view.spawn(async move {
        let name = board.name.clone();
        let request = NewBoardRequest { board, session_id };
        match task.api().create_board(&request).await {
            Ok(_) => {
                info!(board = %name, "board created");
                task.navigate(&name);
            }
            Err(e) => task.report("board", &e),
        }
    });
}
