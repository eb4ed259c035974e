//! Top-level route pages.

pub mod dashboard;
pub mod login;
pub mod profile;
pub mod signup;
