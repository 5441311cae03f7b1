//! Core types shared across pomflat.
//!
//! Currently this is the error layer: [`PomflatError`] for typed failures and
//! [`ErrorContext`] / [`user_friendly_error`] for presenting them on the CLI.

pub mod error;

pub use error::{ErrorContext, PomflatError, user_friendly_error};
