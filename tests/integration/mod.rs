//! Integration tests for sqlrag.

pub mod common;
pub mod executor_test;
pub mod session_test;
