//! CloudCycle dashboard shell: session store, role guard, and the HTTP routes
//! that expose them.
//!
//! SYSTEM CONTEXT
//! ==============
//! The binary restores the session once at startup and serves the router.
//! Everything session-related flows through the `SessionHandle` held in
//! `AppState`.

pub mod config;
pub mod routes;
pub mod services;
pub mod state;
