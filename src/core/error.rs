//! Error handling for pomflat
//!
//! This module provides the error types and user-facing error reporting for
//! the descriptor flattening engine. The design mirrors two layers:
//! 1. **Strongly-typed errors** ([`PomflatError`]) raised by the library
//! 2. **User-friendly messages** ([`ErrorContext`]) with suggestions for CLI users
//!
//! # Error Categories
//!
//! - **Graph build**: [`PomflatError::GraphBuildFailed`] when the resolved dependency
//!   graph cannot be obtained. Report mode degrades, descriptor mode aborts.
//! - **File system**: [`PomflatError::FileSystemError`], [`PomflatError::IoError`].
//!   Always fatal.
//! - **Descriptor**: [`PomflatError::DescriptorParseError`] and
//!   [`PomflatError::SerializationFailed`].
//! - **Configuration**: [`PomflatError::ConfigError`], [`PomflatError::DescriptorNotFound`].
//!
//! # Examples
//!
//! ```rust,no_run
//! use pomflat_cli::core::{PomflatError, user_friendly_error};
//!
//! let error = PomflatError::GraphBuildFailed {
//!     source_path: "target/dependency-graph.json".to_string(),
//!     reason: "file not found".to_string(),
//! };
//! let context = user_friendly_error(anyhow::Error::from(error));
//! context.display();
//! ```

use colored::Colorize;
use std::fmt;
use thiserror::Error;

/// Failure cases raised by the flattening engine and its host adapters.
#[derive(Error, Debug)]
pub enum PomflatError {
    /// The resolved dependency graph could not be built or loaded.
    ///
    /// In report mode this is logged and the dependency section is omitted.
    /// In descriptor mode it aborts the run, since a descriptor missing
    /// resolvable dependencies is unsafe to publish.
    #[error("Failed to build dependency graph from {source_path}: {reason}")]
    GraphBuildFailed {
        /// Where the graph was read from
        source_path: String,
        /// Why the graph could not be built
        reason: String,
    },

    /// No descriptor exists at the requested location
    #[error("Project descriptor not found: {path}")]
    DescriptorNotFound {
        /// Path that was searched
        path: String,
    },

    /// The descriptor could not be parsed into a project model
    #[error("Invalid project descriptor {file}: {reason}")]
    DescriptorParseError {
        /// Descriptor file that failed to parse
        file: String,
        /// Parser diagnostic
        reason: String,
    },

    /// The mutated model could not be serialized
    #[error("Failed to serialize descriptor: {reason}")]
    SerializationFailed {
        /// Why serialization was rejected
        reason: String,
    },

    /// Invalid tool configuration
    #[error("Configuration error: {message}")]
    ConfigError {
        /// Description of the configuration problem
        message: String,
    },

    /// File system error
    #[error("File system error: failed to {operation} {path}")]
    FileSystemError {
        /// The file system operation that failed
        operation: String,
        /// Path where the file system error occurred
        path: String,
    },

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Other error
    #[error("{message}")]
    Other {
        /// Generic error message
        message: String,
    },
}

/// A [`PomflatError`] paired with optional suggestion and details for display.
///
/// # Examples
///
/// ```rust,no_run
/// use pomflat_cli::core::{PomflatError, ErrorContext};
///
/// let context = ErrorContext::new(PomflatError::DescriptorNotFound { path: "pom.xml".into() })
///     .with_suggestion("Run pomflat from the project directory or pass --pom");
/// context.display();
/// ```
#[derive(Debug)]
pub struct ErrorContext {
    /// The underlying error
    pub error: PomflatError,
    /// Optional suggestion for resolving the error
    pub suggestion: Option<String>,
    /// Optional additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    /// Create a new error context with no suggestion or details.
    #[must_use]
    pub const fn new(error: PomflatError) -> Self {
        Self {
            error,
            suggestion: None,
            details: None,
        }
    }

    /// Add a suggestion for resolving the error
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add additional details explaining the error
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Print the error to stderr: error in red, details in yellow, suggestion in green.
    pub fn display(&self) {
        eprintln!("{}: {}", "error".red().bold(), self.error);

        if let Some(details) = &self.details {
            eprintln!("{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("{}: {}", "suggestion".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

impl std::error::Error for ErrorContext {}

/// Convert any error into an [`ErrorContext`] with actionable suggestions.
///
/// Recognizes [`PomflatError`] anywhere in the chain, [`std::io::Error`] and
/// [`toml::de::Error`]; everything else is reported with its full cause chain.
#[must_use]
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    let causes: Vec<String> = error.chain().skip(1).map(ToString::to_string).collect();
    let error = match error.downcast::<PomflatError>() {
        Ok(pomflat_error) => {
            let context = create_error_context(pomflat_error);
            if context.details.is_none() && !causes.is_empty() {
                return context.with_details(causes.join(": "));
            }
            return context;
        }
        Err(error) => error,
    };

    if let Some(io_error) = error.downcast_ref::<std::io::Error>() {
        match io_error.kind() {
            std::io::ErrorKind::PermissionDenied => {
                return ErrorContext::new(PomflatError::FileSystemError {
                    operation: "access".to_string(),
                    path: "a required path".to_string(),
                })
                .with_suggestion("Check ownership and permissions of the output directory")
                .with_details(error_chain(&error));
            }
            std::io::ErrorKind::NotFound => {
                return ErrorContext::new(PomflatError::FileSystemError {
                    operation: "access".to_string(),
                    path: "a required path".to_string(),
                })
                .with_suggestion("Check that the file or directory exists and the path is correct")
                .with_details(error_chain(&error));
            }
            _ => {}
        }
    }

    if let Some(toml_error) = error.downcast_ref::<toml::de::Error>() {
        return ErrorContext::new(PomflatError::ConfigError {
            message: toml_error.to_string(),
        })
        .with_suggestion("Check the TOML syntax in pomflat.toml");
    }

    ErrorContext::new(PomflatError::Other {
        message: error_chain(&error),
    })
}

/// Render an error and its causes as `msg\n\nCaused by:\n  1: ...`.
fn error_chain(error: &anyhow::Error) -> String {
    let mut message = error.to_string();
    let chain: Vec<String> = error.chain().skip(1).map(ToString::to_string).collect();

    if !chain.is_empty() {
        message.push_str("\n\nCaused by:");
        for (i, cause) in chain.iter().enumerate() {
            message.push_str(&format!("\n  {}: {}", i + 1, cause));
        }
    }

    message
}

fn create_error_context(error: PomflatError) -> ErrorContext {
    match error {
        PomflatError::GraphBuildFailed { .. } => ErrorContext::new(error)
            .with_suggestion("Export the resolved graph first (see README) or pass --graph with its location")
            .with_details("An effective descriptor is only written when every dependency could be resolved"),

        PomflatError::DescriptorNotFound { .. } => ErrorContext::new(error)
            .with_suggestion("Run pomflat from the project directory or pass --pom <path>"),

        PomflatError::DescriptorParseError { .. } => ErrorContext::new(error)
            .with_suggestion("Check that the descriptor is well-formed XML with a <project> root element"),

        PomflatError::SerializationFailed { .. } => ErrorContext::new(error)
            .with_details("The merged model could not be written back as a descriptor"),

        PomflatError::ConfigError { .. } | PomflatError::TomlError(_) => ErrorContext::new(error)
            .with_suggestion("Check the option values passed on the command line and in pomflat.toml"),

        PomflatError::FileSystemError { .. } | PomflatError::IoError(_) => ErrorContext::new(error)
            .with_suggestion("Check that the output location is writable"),

        other => ErrorContext::new(other),
    }
}
