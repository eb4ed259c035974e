//! Shared client-side state modules.
//!
//! DESIGN
//! ======
//! State is split by domain so individual components can depend on small
//! focused models: `roles` is the pure role model, `session` the auth
//! session state machine.

pub mod roles;
pub mod session;
