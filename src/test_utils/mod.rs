//! Test utilities for pomflat
//!
//! Sample descriptors, graphs and a one-time tracing setup shared by unit
//! and integration tests.
//!
//! # Example
//!
//! ```rust,no_run
//! use pomflat_cli::test_utils::ProjectFixture;
//!
//! let temp = tempfile::TempDir::new().unwrap();
//! let pom = ProjectFixture::sample().write_to(temp.path()).unwrap();
//! ```

pub mod fixtures;

pub use fixtures::{
    MANAGED_MODULE_GRAPH, MANAGED_MODULE_POM, MANAGED_PARENT_POM, MODULE_GRAPH, MODULE_POM,
    PARENT_POM, ProjectFixture, SAMPLE_GRAPH, SAMPLE_POM,
};

use std::sync::Once;
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Global flag to ensure logging is only initialized once in tests
static INIT_LOGGING: Once = Once::new();

/// Initialize logging for tests.
///
/// Uses `level` when given, otherwise `RUST_LOG`; with neither, logging
/// stays off. Only the first call has an effect.
///
/// ```bash
/// RUST_LOG=debug cargo test
/// ```
pub fn init_test_logging(level: Option<Level>) {
    INIT_LOGGING.call_once(|| {
        let filter = if let Some(level) = level {
            EnvFilter::new(level.to_string())
        } else if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            return;
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .try_init();
    });
}
