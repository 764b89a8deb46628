//! Core engine: per-session state and the registry that isolates sessions.

pub mod registry;
pub mod session;
