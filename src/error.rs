//! Error types for scour.
//!
//! Uses thiserror for derive macros. `ErrorKind` is the plain classification
//! recorded against individual paths in a `DeletionResult`; `ScourError` is what
//! crosses the public API boundary.

use crate::delete::DeletionResult;
use crate::exit_codes;
use serde::Serialize;
use std::fmt;
use std::io;
use thiserror::Error;

/// Windows `ERROR_SHARING_VIOLATION`.
const WIN_SHARING_VIOLATION: i32 = 32;
/// Windows `ERROR_LOCK_VIOLATION`.
const WIN_LOCK_VIOLATION: i32 = 33;

/// Classification of a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// A configured path exists but is not of the expected type.
    InvalidTarget,
    /// The request is malformed; rejected before any deletion.
    InvalidRequest,
    /// A directory slated for removal still has children.
    NotEmpty,
    /// The path is held open or locked by another process.
    LockedOrBusy,
    /// The process lacks permission to remove the path.
    PermissionDenied,
    /// Aggregate failure raised after the whole plan was attempted.
    DeletionFailed,
    /// Any other filesystem error.
    Io,
}

impl ErrorKind {
    /// Whether retrying the same operation shortly afterwards can succeed.
    pub fn is_transient(self) -> bool {
        matches!(self, ErrorKind::LockedOrBusy)
    }

    /// Classify a raw I/O error.
    pub fn from_io(err: &io::Error) -> Self {
        if cfg!(windows)
            && matches!(
                err.raw_os_error(),
                Some(WIN_SHARING_VIOLATION | WIN_LOCK_VIOLATION)
            )
        {
            return ErrorKind::LockedOrBusy;
        }

        match err.kind() {
            io::ErrorKind::PermissionDenied => ErrorKind::PermissionDenied,
            io::ErrorKind::ResourceBusy | io::ErrorKind::WouldBlock => ErrorKind::LockedOrBusy,
            io::ErrorKind::DirectoryNotEmpty => ErrorKind::NotEmpty,
            io::ErrorKind::NotADirectory | io::ErrorKind::IsADirectory => {
                ErrorKind::InvalidTarget
            }
            _ => ErrorKind::Io,
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorKind::InvalidTarget => "invalid target",
            ErrorKind::InvalidRequest => "invalid request",
            ErrorKind::NotEmpty => "directory not empty",
            ErrorKind::LockedOrBusy => "locked or busy",
            ErrorKind::PermissionDenied => "permission denied",
            ErrorKind::DeletionFailed => "deletion failed",
            ErrorKind::Io => "i/o error",
        };
        f.write_str(s)
    }
}

/// Main error type for scour operations.
#[derive(Error, Debug)]
pub enum ScourError {
    /// A configured directory exists but is not a directory.
    #[error("Invalid target: {0}")]
    InvalidTarget(String),

    /// The request is malformed.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// At least one path could not be deleted while `fail_on_error` was set.
    #[error("{}", describe_failures(.0))]
    DeletionFailed(Box<DeletionResult>),

    /// Bad arguments or an unreadable request file.
    #[error("{0}")]
    UserError(String),
}

impl ScourError {
    /// The `ErrorKind` this error reports as.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ScourError::InvalidTarget(_) => ErrorKind::InvalidTarget,
            ScourError::InvalidRequest(_) | ScourError::UserError(_) => ErrorKind::InvalidRequest,
            ScourError::DeletionFailed(_) => ErrorKind::DeletionFailed,
        }
    }

    /// Returns the appropriate exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            ScourError::UserError(_) => exit_codes::USER_ERROR,
            ScourError::InvalidTarget(_) | ScourError::InvalidRequest(_) => {
                exit_codes::INVALID_TARGET
            }
            ScourError::DeletionFailed(_) => exit_codes::DELETION_FAILURE,
        }
    }

    /// The partial result carried by a `DeletionFailed` error.
    pub fn result(&self) -> Option<&DeletionResult> {
        match self {
            ScourError::DeletionFailed(result) => Some(&**result),
            _ => None,
        }
    }
}

fn describe_failures(result: &DeletionResult) -> String {
    let mut msg = format!(
        "Failed to delete {} path(s) ({} deleted, {} skipped):",
        result.failures.len(),
        result.deleted.len(),
        result.skipped.len()
    );
    for failure in &result.failures {
        msg.push_str(&format!(
            "\n  x {}  ({}, {} attempt(s))",
            failure.path.display(),
            failure.cause,
            failure.attempts
        ));
    }
    msg
}

/// Result type alias for scour operations.
pub type Result<T> = std::result::Result<T, ScourError>;
