//! Credential verification seam.
//!
//! ARCHITECTURE
//! ============
//! The session store never inspects credentials itself; it hands them to an
//! `Authenticator`. The shipped `MockAuthenticator` waits out a simulated
//! network delay and accepts everything, fabricating an identity for the
//! requested role. A real backend replaces it without touching callers.

use std::time::Duration;

use async_trait::async_trait;
use uuid::Uuid;

use super::identity::{Identity, Role};

/// Login form input handed to an authenticator.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
    pub role: Role,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("role", &self.role)
            .finish()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("authentication backend unavailable: {0}")]
    Unavailable(String),
}

/// Verifies credentials and produces the identity to install in the session.
#[async_trait]
pub trait Authenticator: Send + Sync {
    async fn authenticate(&self, credentials: &Credentials) -> Result<Identity, AuthError>;
}

// =============================================================================
// MOCK AUTHENTICATOR
// =============================================================================

pub const DEFAULT_LOGIN_DELAY: Duration = Duration::from_millis(1000);

/// Always-succeeding authenticator used until a real backend exists.
#[derive(Debug, Clone)]
pub struct MockAuthenticator {
    delay: Duration,
}

impl MockAuthenticator {
    #[must_use]
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

/// Display name the mock assigns per role.
#[must_use]
pub fn mock_display_name(role: Role) -> &'static str {
    match role {
        Role::Cyclist => "John Cyclist",
        Role::Official => "Admin User",
    }
}

/// Generate an opaque identity id prefixed with the role name.
#[must_use]
pub fn generate_identity_id(role: Role) -> String {
    format!("{role}_{}", Uuid::new_v4().simple())
}

#[async_trait]
impl Authenticator for MockAuthenticator {
    async fn authenticate(&self, credentials: &Credentials) -> Result<Identity, AuthError> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        let role = credentials.role;
        Ok(Identity::new(
            generate_identity_id(role),
            mock_display_name(role),
            credentials.email.clone(),
            role,
        ))
    }
}

#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;
