//! Application module.
//!
//! Ties the API client, the session store and the router to the document.
//! Navigating to a fragment starts a new view: the page regions are reset,
//! the route (or board) is loaded, and the session check runs alongside it.

mod auth;
mod boards;
pub mod forms;
mod posts;
pub mod render;
mod view;

pub use forms::{CommentForm, LoginForm, NewBoardForm, NewPostForm, SignupForm};

use std::future::Future;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::api::{ApiClient, ApiError};
use crate::config::Config;
use crate::dom::{Document, ElementId};
use crate::router::{HashRouter, Resolution, RouteTable};
use crate::session::SessionStore;
use crate::{DistributedError, Result};

use view::ViewTracker;

/// Pages reachable through a named route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    About,
    Login,
    Logout,
    NewPost,
    NewBoard,
    /// `comments=<postId>`
    Comments,
    /// `upvote=<postId>`
    Upvote,
}

impl Page {
    fn load(self, view: &View, id: &str) {
        match self {
            Page::About => {
                view.render(|doc| doc.set_html(ElementId::Content, render::ABOUT));
            }
            Page::Login => {
                view.render(|doc| doc.set_html(ElementId::Content, render::login_forms()));
            }
            Page::Logout => auth::logout(view),
            Page::NewPost => posts::new_post_page(view, id),
            Page::NewBoard => boards::new_board_page(view),
            Page::Comments => posts::load_comments(view, id),
            Page::Upvote => posts::upvote(view, id),
        }
    }
}

/// The built-in route table.
pub fn routes() -> RouteTable<Page> {
    RouteTable::builder()
        .route("about", Page::About)
        .route("login", Page::Login)
        .route("logout", Page::Logout)
        .route("new-post", Page::NewPost)
        .route("new-board", Page::NewBoard)
        .route("comments", Page::Comments)
        .route("upvote", Page::Upvote)
        .build()
}

struct Inner {
    api: ApiClient,
    session: SessionStore,
    document: Document,
    router: HashRouter<Page>,
    views: ViewTracker,
}

/// The Distributed client application.
#[derive(Clone)]
pub struct Application {
    inner: Arc<Inner>,
}

impl Application {
    /// Create an application with the built-in routes.
    pub fn new(api: ApiClient, session: SessionStore) -> Self {
        let router = HashRouter::new(routes());
        debug!(routes = ?router.table().names(), "routes registered");
        Self {
            inner: Arc::new(Inner {
                api,
                session,
                document: Document::new(),
                router,
                views: ViewTracker::default(),
            }),
        }
    }

    /// Create an application from configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        let api = ApiClient::new(&config.api)?;
        let session = SessionStore::open(&config.session)?;
        Ok(Self::new(api, session))
    }

    /// The API client.
    pub fn api(&self) -> &ApiClient {
        &self.inner.api
    }

    /// The session store.
    pub fn session(&self) -> &SessionStore {
        &self.inner.session
    }

    /// The page.
    pub fn document(&self) -> &Document {
        &self.inner.document
    }

    /// The router.
    pub fn router(&self) -> &HashRouter<Page> {
        &self.inner.router
    }

    /// Dispatch the current fragment, as on first load.
    pub fn load(&self) {
        self.dispatch(None, None);
    }

    /// Change the fragment and dispatch it.
    pub fn navigate(&self, fragment: &str) {
        self.dispatch(Some(fragment), None);
    }

    /// Wait for all outstanding work of the current and previous views.
    pub async fn settle(&self) {
        self.inner.views.settle().await;
    }

    /// Submit the login form.
    pub fn submit_login(&self, form: LoginForm) {
        auth::submit_login(&self.current_view(), form);
    }

    /// Submit the signup form.
    pub fn submit_signup(&self, form: SignupForm) {
        auth::submit_signup(&self.current_view(), form);
    }

    /// Submit the new post form.
    pub fn submit_post(&self, form: NewPostForm) {
        posts::submit_post(&self.current_view(), form);
    }

    /// Submit the new board form.
    pub fn submit_board(&self, form: NewBoardForm) {
        boards::submit_board(&self.current_view(), form);
    }

    /// Submit a comment.
    pub fn submit_comment(&self, form: CommentForm) {
        posts::submit_comment(&self.current_view(), form);
    }

    fn current_view(&self) -> View {
        View {
            app: self.clone(),
            generation: self.inner.views.current(),
        }
    }

    fn dispatch(&self, fragment: Option<&str>, expected: Option<u64>) -> bool {
        let Some(generation) = self.inner.views.begin(expected) else {
            return false;
        };
        let doc = self.document();
        if let Some(fragment) = fragment {
            doc.set_fragment(fragment);
        }
        doc.clear(ElementId::Error);
        doc.clear(ElementId::Content);
        doc.clear(ElementId::Description);

        let view = View {
            app: self.clone(),
            generation,
        };
        let fragment = doc.fragment();
        match self.router().resolve(&fragment) {
            Resolution::Route {
                handler,
                name,
                id,
                heading,
            } => {
                debug!(route = %name, id = %id, "loading route");
                doc.set_text(ElementId::Heading, &heading);
                handler.load(&view, &id);
            }
            Resolution::Board { board, heading } => {
                debug!(board = %board, "loading board");
                doc.set_text(ElementId::Heading, &heading);
                boards::load_board(&view, &board);
            }
        }
        let check = view.clone();
        view.spawn(async move { auth::check_session(&check).await });
        true
    }
}

/// Handle on one view: renders and navigations only take effect while the
/// view is current.
#[derive(Clone)]
pub(crate) struct View {
    app: Application,
    generation: u64,
}

impl View {
    fn api(&self) -> &ApiClient {
        self.app.api()
    }

    fn session(&self) -> &SessionStore {
        self.app.session()
    }

    fn spawn<F>(&self, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.app.inner.views.spawn(self.generation, task);
    }

    /// Apply `f` to the document if this view is still current.
    fn render(&self, f: impl FnOnce(&Document)) -> bool {
        let doc = self.app.document();
        let applied = self.app.inner.views.if_current(self.generation, || f(doc));
        if applied.is_none() {
            debug!(generation = self.generation, "dropping render for stale view");
        }
        applied.is_some()
    }

    /// Navigate if this view is still current.
    fn navigate(&self, fragment: &str) {
        self.app.dispatch(Some(fragment), Some(self.generation));
    }

    /// Show an error in the error region.
    fn show_error(&self, message: &str) {
        self.render(|doc| doc.set_text(ElementId::Error, message));
    }

    /// Report a failed API call: server messages are shown, anything else
    /// is only logged.
    fn report(&self, operation: &str, err: &ApiError) {
        match err.user_message() {
            Some(message) => {
                debug!(operation, message, "server error");
                self.show_error(message);
            }
            None => warn!(operation, error = %err, "API call failed"),
        }
    }

    /// Report a local failure, showing validation messages.
    fn report_local(&self, operation: &str, err: &DistributedError) {
        match err {
            DistributedError::Validation(message) => self.show_error(message),
            DistributedError::Api(api) => self.report(operation, api),
            other => warn!(operation, error = %other, "operation failed"),
        }
    }
}
