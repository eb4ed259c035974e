//! Network boundary: REST client and wire types.
//!
//! All backend shapes are validated and normalized in `types`; `api` turns
//! requests into a uniform success/failure result and never panics on
//! HTTP-level errors.

pub mod api;
pub mod types;
