//! Query execution for sqlrag.
//!
//! This module isolates SQL execution and outcome rendering from the
//! session orchestrator.

pub mod executor;

pub use executor::{execute_to_outcome, QueryOutcome};
