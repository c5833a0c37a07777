//! Error types for MAC address change operations.
//!
//! All errors implement `std::error::Error` via `thiserror`. The variants fall
//! into four groups: usage errors (bad flags or a malformed address), lookup
//! errors (the interface is not in the listing), external command errors
//! (the `ip` tool could not be run, failed, or hung) and privilege errors.
//! A post-change address mismatch is not an error; it is reported as `false`
//! by the verification step.

use std::io;
use std::time::Duration;
use thiserror::Error;

/// Result type alias for macchanger operations.
pub type MacResult<T> = Result<T, MacChangerError>;

/// Errors that can occur while inspecting or changing an interface address.
#[derive(Debug, Error)]
pub enum MacChangerError {
    /// Failed to execute a shell command (spawn error).
    #[error("Failed to execute shell command '{command}': {source}")]
    ShellExec {
        /// The command that failed to execute.
        command: String,
        /// The underlying IO error.
        #[source]
        source: io::Error,
    },

    /// Shell command returned non-zero exit code.
    #[error("Shell command failed: '{command}' (exit code {exit_code}): {output}")]
    ShellCommandFailed {
        /// The command that failed.
        command: String,
        /// The exit code.
        exit_code: i32,
        /// Combined stdout/stderr output.
        output: String,
    },

    /// Shell command did not finish in time and was killed.
    #[error("Shell command timed out after {}s: '{command}'", .timeout.as_secs())]
    CommandTimeout {
        /// The command that timed out.
        command: String,
        /// The limit that was exceeded.
        timeout: Duration,
    },

    /// Interface missing from the listing, or listed without a hardware address.
    #[error("Interface '{interface}' not found or has no hardware address")]
    InterfaceNotFound {
        /// The interface name.
        interface: String,
    },

    /// Address argument is not of the form `XX:XX:XX:XX:XX:XX`.
    #[error("invalid MAC address format: {0}")]
    InvalidMacAddress(String),

    /// Flags missing or given in a contradictory combination.
    #[error("{message}")]
    InvalidArguments {
        /// Message shown to the user.
        message: String,
    },

    /// Neither a change nor a listing was requested.
    #[error("Enter 'macchanger --help' for further information!")]
    NoAction,

    /// Writing the report to the terminal failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The operation needs elevated privileges.
    #[error("{message}")]
    PermissionDenied {
        /// Message shown to the user.
        message: String,
    },
}

impl MacChangerError {
    /// Creates an interface not found error.
    pub fn interface_not_found(interface: impl Into<String>) -> Self {
        Self::InterfaceNotFound {
            interface: interface.into(),
        }
    }

    /// Creates an invalid arguments error.
    pub fn invalid_arguments(message: impl Into<String>) -> Self {
        Self::InvalidArguments {
            message: message.into(),
        }
    }

    /// Creates a permission denied error.
    pub fn permission_denied(message: impl Into<String>) -> Self {
        Self::PermissionDenied {
            message: message.into(),
        }
    }

    /// Returns true for errors caused by the command line rather than the host.
    pub fn is_usage_error(&self) -> bool {
        matches!(
            self,
            MacChangerError::InvalidArguments { .. }
                | MacChangerError::InvalidMacAddress(_)
                | MacChangerError::NoAction
        )
    }
}
