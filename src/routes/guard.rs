//! Role-based route guard.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every screen handler asks the guard before rendering. The guard is a pure
//! function of the required role set and the current `SessionState`, so it is
//! evaluated fresh on each navigation.
//!
//! A signed-in identity whose role is not in the required set is sent to
//! `/login`, not to its own home. The login guard is what then bounces it on
//! to the role home.

use serde::Serialize;

use crate::services::identity::Role;
use crate::services::session::SessionState;

// =============================================================================
// SCREENS
// =============================================================================

/// Navigable screens of the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Screen {
    Login,
    UserDashboard,
    UserReports,
    UserContact,
    AdminDashboard,
    AdminReports,
    AdminContact,
}

impl Screen {
    pub const ALL: [Screen; 7] = [
        Screen::Login,
        Screen::UserDashboard,
        Screen::UserReports,
        Screen::UserContact,
        Screen::AdminDashboard,
        Screen::AdminReports,
        Screen::AdminContact,
    ];

    #[must_use]
    pub fn path(self) -> &'static str {
        match self {
            Self::Login => "/login",
            Self::UserDashboard => "/dashboard",
            Self::UserReports => "/my-reports",
            Self::UserContact => "/contact",
            Self::AdminDashboard => "/admin",
            Self::AdminReports => "/admin/reports",
            Self::AdminContact => "/admin/contact",
        }
    }

    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Self::Login => "Sign In",
            Self::UserDashboard => "Dashboard",
            Self::UserReports => "My Reports",
            Self::UserContact => "Contact",
            Self::AdminDashboard => "Admin Dashboard",
            Self::AdminReports => "Reports",
            Self::AdminContact => "Contact",
        }
    }

    /// Roles allowed to view the screen. Empty for the public login screen.
    #[must_use]
    pub fn required_roles(self) -> &'static [Role] {
        match self {
            Self::Login => &[],
            Self::UserDashboard | Self::UserReports | Self::UserContact => &[Role::Cyclist],
            Self::AdminDashboard | Self::AdminReports | Self::AdminContact => &[Role::Official],
        }
    }
}

/// Landing screen for a role.
#[must_use]
pub fn home_screen(role: Role) -> Screen {
    match role {
        Role::Cyclist => Screen::UserDashboard,
        Role::Official => Screen::AdminDashboard,
    }
}

/// Navigation bar entries of a role partition, in display order.
#[must_use]
pub fn nav_screens(role: Role) -> &'static [Screen] {
    match role {
        Role::Cyclist => &[Screen::UserDashboard, Screen::UserReports, Screen::UserContact],
        Role::Official => &[Screen::AdminDashboard, Screen::AdminReports, Screen::AdminContact],
    }
}

// =============================================================================
// DECISIONS
// =============================================================================

/// Outcome of a guard check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Render,
    RedirectToLogin,
    RedirectToRoleHome(Role),
}

impl Decision {
    /// Target path for redirects, `None` for `Render`.
    #[must_use]
    pub fn redirect_path(self) -> Option<&'static str> {
        match self {
            Self::Render => None,
            Self::RedirectToLogin => Some(Screen::Login.path()),
            Self::RedirectToRoleHome(role) => Some(home_screen(role).path()),
        }
    }
}

/// Decide whether a protected screen requiring `required` may render.
#[must_use]
pub fn authorize(required: &[Role], session: &SessionState) -> Decision {
    match session.role() {
        Some(role) if required.contains(&role) => Decision::Render,
        _ => Decision::RedirectToLogin,
    }
}

/// Guard for the login screen: signed-in identities go to their role home.
#[must_use]
pub fn authorize_login(session: &SessionState) -> Decision {
    match session.role() {
        Some(role) => Decision::RedirectToRoleHome(role),
        None => Decision::Render,
    }
}

#[cfg(test)]
#[path = "guard_test.rs"]
mod tests;
