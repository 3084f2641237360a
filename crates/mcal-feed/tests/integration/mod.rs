//! Integration tests for mcal-feed.
//!
//! These tests drive real WebSocket sessions against a local mock
//! server: frame delivery, reconnect behavior, and teardown.

pub mod common;
