use super::*;

fn credentials(role: Role) -> Credentials {
    Credentials { email: "demo@cloudcycle.com".into(), password: "demo123".into(), role }
}

// =============================================================================
// Credentials
// =============================================================================

#[test]
fn credentials_debug_redacts_password() {
    let debug = format!("{:?}", credentials(Role::Cyclist));
    assert!(debug.contains("demo@cloudcycle.com"));
    assert!(!debug.contains("demo123"));
}

// =============================================================================
// generate_identity_id
// =============================================================================

#[test]
fn generate_identity_id_prefixed_with_role() {
    assert!(generate_identity_id(Role::Cyclist).starts_with("cyclist_"));
    assert!(generate_identity_id(Role::Official).starts_with("official_"));
}

#[test]
fn generate_identity_id_two_calls_differ() {
    assert_ne!(generate_identity_id(Role::Cyclist), generate_identity_id(Role::Cyclist));
}

// =============================================================================
// MockAuthenticator
// =============================================================================

#[tokio::test]
async fn mock_fabricates_identity_for_each_role() {
    let auth = MockAuthenticator::new(Duration::ZERO);
    for role in Role::ALL {
        let identity = auth.authenticate(&credentials(role)).await.unwrap();
        assert_eq!(identity.role, role);
        assert_eq!(identity.name, mock_display_name(role));
        assert_eq!(identity.email, "demo@cloudcycle.com");
    }
}

#[tokio::test]
async fn mock_waits_for_configured_delay() {
    let auth = MockAuthenticator::new(Duration::from_millis(30));
    let started = std::time::Instant::now();
    auth.authenticate(&credentials(Role::Official)).await.unwrap();
    assert!(started.elapsed() >= Duration::from_millis(30));
}

#[test]
fn auth_error_display() {
    assert_eq!(AuthError::InvalidCredentials.to_string(), "invalid credentials");
    assert!(AuthError::Unavailable("timeout".into()).to_string().contains("timeout"));
}
