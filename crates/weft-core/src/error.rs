//! Error types and handling for traversal, rule execution and fix application

use std::path::PathBuf;
use thiserror::Error;

use crate::ast::SyntaxKind;
use crate::path::NodeLocation;

/// Main error type for engine operations
///
/// Only conditions that abort a pass live here. Stale fixes, overlapping
/// replacements and the fix-iteration cap are reported as values on the
/// engine outcome instead.
#[derive(Debug, Error)]
pub enum WeftError {
    /// A rule with the same name is already registered
    #[error("Rule '{name}' is already registered")]
    DuplicateRule { name: String },

    /// The tree handed to the engine violates a structural invariant
    #[error("Malformed tree at {location}: {reason}")]
    MalformedTree {
        location: NodeLocation,
        reason: String,
    },

    /// A node kind reached a dispatch table that does not support it
    #[error("Node kind '{kind}' is not handled by {component}")]
    UnhandledKind {
        kind: SyntaxKind,
        component: &'static str,
    },

    /// A multi-pass run was cancelled between passes
    #[error("Run cancelled before pass {pass}")]
    Cancelled { pass: usize },

    /// Configuration loading or validation errors
    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    /// File system I/O errors
    #[error("IO error for path '{path}': {source}")]
    IoError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Generic internal errors
    #[error("Internal error: {message}")]
    InternalError { message: String },
}

/// Error kind enumeration for categorizing errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    Registry,
    Tree,
    Dispatch,
    Cancelled,
    Config,
    Io,
    Internal,
}

impl WeftError {
    /// Get the error kind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            WeftError::DuplicateRule { .. } => ErrorKind::Registry,
            WeftError::MalformedTree { .. } => ErrorKind::Tree,
            WeftError::UnhandledKind { .. } => ErrorKind::Dispatch,
            WeftError::Cancelled { .. } => ErrorKind::Cancelled,
            WeftError::ConfigError { .. } => ErrorKind::Config,
            WeftError::IoError { .. } => ErrorKind::Io,
            WeftError::InternalError { .. } => ErrorKind::Internal,
        }
    }

    /// Check if this error is recoverable (a batch run can continue with other trees)
    pub fn is_recoverable(&self) -> bool {
        matches!(self.kind(), ErrorKind::Tree | ErrorKind::Io)
    }

    /// Create a duplicate rule error
    pub fn duplicate_rule(name: impl Into<String>) -> Self {
        Self::DuplicateRule { name: name.into() }
    }

    /// Create a malformed tree error
    pub fn malformed_tree(location: NodeLocation, reason: impl Into<String>) -> Self {
        Self::MalformedTree {
            location,
            reason: reason.into(),
        }
    }

    /// Create an unhandled kind error
    pub fn unhandled_kind(kind: SyntaxKind, component: &'static str) -> Self {
        Self::UnhandledKind { kind, component }
    }

    /// Create a configuration error
    pub fn config_error(message: impl Into<String>) -> Self {
        Self::ConfigError {
            message: message.into(),
        }
    }

    /// Create an IO error with path context
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::IoError {
            path: path.into(),
            source,
        }
    }

    /// Create an internal error
    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::InternalError {
            message: message.into(),
        }
    }
}

/// Convert from std::io::Error
impl From<std::io::Error> for WeftError {
    fn from(err: std::io::Error) -> Self {
        Self::IoError {
            path: PathBuf::new(),
            source: err,
        }
    }
}
