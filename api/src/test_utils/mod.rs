//! Test utilities
//!
//! Manual mock implementations and test fixtures for unit testing.
//!
//! Manual mocks instead of mockall: the port traits take `&str` and borrowed
//! ids, and hand-written in-memory repositories keep state across calls so
//! service tests can assert on what was stored.

pub mod fixtures;
pub mod mocks;

pub use fixtures::*;
pub use mocks::*;
