//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! This module binds the dashboard's navigation surface: the public login
//! screen, the guarded cyclist and official screens, logout, and the session
//! read endpoint. `/` always lands on `/login`, which forwards signed-in users
//! to their role home.

pub mod auth;
pub mod guard;
pub mod screens;

use axum::Router;
use axum::http::StatusCode;
use axum::response::Redirect;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;
use guard::Screen;

/// Build the application router.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(redirect_root_to_login))
        .route(Screen::Login.path(), get(auth::login_page).post(auth::login))
        .route(screens::LOGOUT_PATH, post(auth::logout))
        .route(Screen::UserDashboard.path(), get(screens::user_dashboard))
        .route(Screen::UserReports.path(), get(screens::user_reports))
        .route(Screen::UserContact.path(), get(screens::user_contact))
        .route(Screen::AdminDashboard.path(), get(screens::admin_dashboard))
        .route(Screen::AdminReports.path(), get(screens::admin_reports))
        .route(Screen::AdminContact.path(), get(screens::admin_contact))
        .route("/api/session", get(auth::session_snapshot))
        .route("/healthz", get(healthz))
        .fallback(screens::not_found)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

async fn redirect_root_to_login() -> Redirect {
    Redirect::temporary(Screen::Login.path())
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}
