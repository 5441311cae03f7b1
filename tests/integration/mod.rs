//! Integration test suite for pomflat
//!
//! End-to-end tests that run the `pomflat` binary against projects written
//! to temporary directories.
//!
//! # Running Integration Tests
//!
//! ```bash
//! cargo test --test integration
//! ```
//!
//! # Test Organization
//!
//! - **generate_pom**: effective descriptor generation, overrides, parents
//! - **list_dependencies**: dependency report, separators, degraded output
//! - **errors**: failures and their user-facing messages

// Shared test utilities (from parent tests/ directory)
#[path = "../common/mod.rs"]
mod common;

mod errors;
mod generate_pom;
mod list_dependencies;
