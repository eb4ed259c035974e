//! Small utilities shared across the client.

pub mod storage;
