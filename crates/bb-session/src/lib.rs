//! Session state and TTL-based session management for the BinBot gateway.

pub mod manager;
pub mod session;

pub use manager::SessionManager;
pub use session::*;
