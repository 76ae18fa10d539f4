//! Test utilities for HTTP and use case tests.
//!
//! This module provides:
//! - Test data factories for waitlist entries
//! - In-memory store and rate limiter implementations
//! - `TestAppStateBuilder` for HTTP-level tests

mod app_state_builder;
mod factories;
mod waitlist_mocks;

pub use app_state_builder::*;
pub use factories::*;
pub use waitlist_mocks::*;
