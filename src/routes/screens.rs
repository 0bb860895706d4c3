//! Protected dashboard screens.
//!
//! Each handler runs the route guard against the live session and either
//! redirects or renders a JSON view for the presentational layer. Views only
//! read the identity; all session mutation goes through the auth routes.

use axum::extract::State;
use axum::http::{StatusCode, Uri};
use axum::response::{IntoResponse, Json, Redirect, Response};
use serde::Serialize;
use tracing::debug;

use super::guard::{Screen, authorize, nav_screens};
use crate::services::identity::{Identity, Role};
use crate::state::AppState;

pub const LOGOUT_PATH: &str = "/logout";

// =============================================================================
// VIEWS
// =============================================================================

#[derive(Debug, Serialize)]
pub struct Viewer {
    pub name: String,
    pub role: Role,
    pub role_label: &'static str,
}

#[derive(Debug, Serialize)]
pub struct NavLink {
    pub label: &'static str,
    pub path: &'static str,
    pub active: bool,
}

/// What a protected screen hands to the renderer.
#[derive(Debug, Serialize)]
pub struct ScreenView {
    pub screen: Screen,
    pub title: &'static str,
    pub path: &'static str,
    pub viewer: Viewer,
    pub nav: Vec<NavLink>,
    pub logout_path: &'static str,
}

impl ScreenView {
    #[must_use]
    pub fn new(screen: Screen, identity: &Identity) -> Self {
        let nav = nav_screens(identity.role)
            .iter()
            .map(|&link| NavLink { label: link.title(), path: link.path(), active: link == screen })
            .collect();
        Self {
            screen,
            title: screen.title(),
            path: screen.path(),
            viewer: Viewer {
                name: identity.name.clone(),
                role: identity.role,
                role_label: identity.role.label(),
            },
            nav,
            logout_path: LOGOUT_PATH,
        }
    }
}

/// Guard `screen` and render it for the current identity.
pub fn render_protected(state: &AppState, screen: Screen) -> Response {
    let session = state.session.state();
    let decision = authorize(screen.required_roles(), &session);
    if let Some(target) = decision.redirect_path() {
        debug!(?screen, to = target, "guard redirect");
        return Redirect::temporary(target).into_response();
    }
    match session.identity() {
        Some(identity) => Json(ScreenView::new(screen, identity)).into_response(),
        None => Redirect::temporary(Screen::Login.path()).into_response(),
    }
}

// =============================================================================
// HANDLERS
// =============================================================================

/// `GET /dashboard`
pub async fn user_dashboard(State(state): State<AppState>) -> Response {
    render_protected(&state, Screen::UserDashboard)
}

/// `GET /my-reports`
pub async fn user_reports(State(state): State<AppState>) -> Response {
    render_protected(&state, Screen::UserReports)
}

/// `GET /contact`
pub async fn user_contact(State(state): State<AppState>) -> Response {
    render_protected(&state, Screen::UserContact)
}

/// `GET /admin`
pub async fn admin_dashboard(State(state): State<AppState>) -> Response {
    render_protected(&state, Screen::AdminDashboard)
}

/// `GET /admin/reports`
pub async fn admin_reports(State(state): State<AppState>) -> Response {
    render_protected(&state, Screen::AdminReports)
}

/// `GET /admin/contact`
pub async fn admin_contact(State(state): State<AppState>) -> Response {
    render_protected(&state, Screen::AdminContact)
}

/// Fallback for unknown paths.
pub async fn not_found(uri: Uri) -> Response {
    let body = serde_json::json!({ "screen": "not_found", "path": uri.path() });
    (StatusCode::NOT_FOUND, Json(body)).into_response()
}

#[cfg(test)]
#[path = "screens_test.rs"]
mod tests;
