//! Session domain services used by the HTTP routes.
//!
//! ARCHITECTURE
//! ============
//! Service modules own identity, storage, and authentication concerns so route
//! handlers can stay focused on navigation and protocol translation.

pub mod auth;
pub mod identity;
pub mod session;
pub mod storage;
