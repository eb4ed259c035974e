//! Reusable components.

pub mod route_guards;
