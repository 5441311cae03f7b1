//! Shared helpers.
//!
//! - [`fs`] - output directory creation and replace-on-write file output

pub mod fs;

pub use fs::{ensure_dir, ensure_parent_dir, write_output};
