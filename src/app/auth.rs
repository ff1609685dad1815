//! Login, signup, logout and the session check.

use chrono::Utc;
use tracing::{debug, info, warn};

use super::forms::{LoginForm, SignupForm};
use super::View;
use crate::api::{ApiError, SessionResponse};
use crate::dom::ElementId;

/// Check the stored session and switch the login link to logout when it
/// is still valid.
pub(super) async fn check_session(view: &View) {
    let Some(token) = view.session().token() else {
        debug!("no session cookie");
        return;
    };
    match view.api().read_session(&token).await {
        Ok(rsp) => {
            if rsp.session.is_expired_at(Utc::now().timestamp()) {
                debug!(expires = rsp.session.expires, "session expired");
                return;
            }
            view.render(|doc| {
                // A logout may have finished while the check was in flight.
                if view.session().token().as_deref() != Some(token.as_str()) {
                    debug!("session changed during check, leaving login link");
                    return;
                }
                doc.set_text(ElementId::Login, "Logout");
                doc.set_href(ElementId::Login, "#logout");
            });
        }
        Err(e) => view.report("readSession", &e),
    }
}

pub(super) fn submit_login(view: &View, form: LoginForm) {
    view.render(|doc| doc.clear(ElementId::Error));
    if let Err(e) = form.check() {
        view.report_local("login", &e);
        return;
    }
    let task = view.clone();
    view.spawn(async move {
        let result = task.api().login(&form.to_request()).await;
        start_session(&task, "login", result);
    });
}

pub(super) fn submit_signup(view: &View, form: SignupForm) {
    view.render(|doc| doc.clear(ElementId::Error));
    if let Err(e) = form.check() {
        view.report_local("signup", &e);
        return;
    }
    let task = view.clone();
    view.spawn(async move {
        let result = task.api().signup(&form.to_request()).await;
        start_session(&task, "signup", result);
    });
}

fn start_session(view: &View, operation: &str, result: Result<SessionResponse, ApiError>) {
    match result {
        Ok(rsp) => {
            if let Err(e) = view.session().store(&rsp.session) {
                view.report_local(operation, &e);
                return;
            }
            info!(operation, user = %rsp.session.user_id, "logged in");
            view.navigate("");
        }
        Err(e) => view.report(operation, &e),
    }
}

/// End the current session.
pub(super) fn logout(view: &View) {
    let Some(token) = view.session().token() else {
        debug!("logout without a session");
        return;
    };
    let task = view.clone();
    view.spawn(async move {
        match task.api().logout(&token).await {
            Ok(_) => {
                if let Err(e) = task.session().clear() {
                    warn!(error = %e, "failed to clear session cookie");
                }
                info!("logged out");
                task.render(|doc| {
                    doc.set_text(ElementId::Login, "Login");
                    doc.set_href(ElementId::Login, "#login");
                });
                task.navigate("");
            }
            Err(e) => task.report("logout", &e),
        }
    });
}
