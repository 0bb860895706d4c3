//! Auth routes — login screen, login submission, logout, session read surface.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Redirect, Response};
use axum::Form;
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use super::guard::{Screen, authorize_login, home_screen};
use crate::services::identity::Role;
use crate::services::session::{LoginError, SessionSnapshot};
use crate::state::AppState;

const FILL_ALL_FIELDS: &str = "Please fill in all fields";
const CHECK_CREDENTIALS: &str = "Please check your credentials and try again";
const SIGN_IN_IN_PROGRESS: &str = "A sign-in is already in progress";
const DEMO_EMAIL: &str = "demo@cloudcycle.com";
const DEMO_PASSWORD: &str = "demo123";

// =============================================================================
// INPUT
// =============================================================================

fn default_role() -> Role {
    Role::Cyclist
}

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default = "default_role")]
    pub role: Role,
}

/// Form pre-check run before the session store is touched.
pub(crate) fn validate_login_input(email: &str, password: &str) -> Result<(String, String), &'static str> {
    let email = email.trim();
    if email.is_empty() || password.is_empty() {
        return Err(FILL_ALL_FIELDS);
    }
    Ok((email.to_owned(), password.to_owned()))
}

// =============================================================================
// VIEWS
// =============================================================================

#[derive(Debug, Serialize)]
pub struct RoleOption {
    pub value: Role,
    pub label: &'static str,
}

#[derive(Debug, Serialize)]
pub struct DemoCredentials {
    pub email: &'static str,
    pub password: &'static str,
}

#[derive(Debug, Serialize)]
pub struct LoginView {
    pub screen: Screen,
    pub title: &'static str,
    pub busy: bool,
    pub submit_label: &'static str,
    pub roles: Vec<RoleOption>,
    pub default_role: Role,
    pub demo: DemoCredentials,
}

impl LoginView {
    #[must_use]
    pub fn new(busy: bool) -> Self {
        Self {
            screen: Screen::Login,
            title: Screen::Login.title(),
            busy,
            submit_label: if busy { "Signing in..." } else { "Sign In" },
            roles: Role::ALL
                .into_iter()
                .map(|role| RoleOption { value: role, label: role.label() })
                .collect(),
            default_role: default_role(),
            demo: DemoCredentials { email: DEMO_EMAIL, password: DEMO_PASSWORD },
        }
    }
}

/// Toast-style message returned for rejected submissions.
#[derive(Debug, Serialize)]
pub struct Notice {
    pub title: &'static str,
    pub description: &'static str,
}

fn notice(status: StatusCode, title: &'static str, description: &'static str) -> Response {
    (status, Json(Notice { title, description })).into_response()
}

// =============================================================================
// HANDLERS
// =============================================================================

/// `GET /login` — render the login screen unless already signed in.
pub async fn login_page(State(state): State<AppState>) -> Response {
    let snapshot = state.session.snapshot();
    if let Some(target) = authorize_login(&snapshot.state).redirect_path() {
        return Redirect::temporary(target).into_response();
    }
    Json(LoginView::new(snapshot.busy)).into_response()
}

/// `POST /login` — validate the form, sign in, redirect to the role home.
pub async fn login(State(state): State<AppState>, Form(form): Form<LoginForm>) -> Response {
    if let Some(target) = authorize_login(&state.session.state()).redirect_path() {
        return Redirect::to(target).into_response();
    }

    let (email, password) = match validate_login_input(&form.email, &form.password) {
        Ok(input) => input,
        Err(message) => return notice(StatusCode::UNPROCESSABLE_ENTITY, "Error", message),
    };

    match state.session.try_login(&email, &password, form.role).await {
        Ok(identity) => {
            info!(role = %identity.role, name = %identity.name, "welcome to CloudCycle");
            Redirect::to(home_screen(identity.role).path()).into_response()
        }
        Err(LoginError::MissingCredentials) => notice(StatusCode::UNPROCESSABLE_ENTITY, "Error", FILL_ALL_FIELDS),
        Err(LoginError::Busy) => notice(StatusCode::CONFLICT, "Signing in...", SIGN_IN_IN_PROGRESS),
        Err(LoginError::Failed(_)) => notice(StatusCode::UNAUTHORIZED, "Login Failed", CHECK_CREDENTIALS),
        Err(e) => {
            error!(error = %e, "login could not be completed");
            notice(StatusCode::INTERNAL_SERVER_ERROR, "Login Failed", CHECK_CREDENTIALS)
        }
    }
}

/// `POST /logout` — clear the session and return to the login screen.
pub async fn logout(State(state): State<AppState>) -> Redirect {
    state.session.logout();
    Redirect::to(Screen::Login.path())
}

/// `GET /api/session` — read-only snapshot for presentational components.
pub async fn session_snapshot(State(state): State<AppState>) -> Json<SessionSnapshot> {
    Json(state.session.snapshot())
}

#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;
