// SPDX-License-Identifier: Apache-2.0

//! Error types for labsync.
//!
//! Uses `thiserror` for deriving `std::error::Error` implementations.
//! Transport failures are classified into [`LabsyncError`] once, when they
//! cross from the transport layer into session validation or the connection
//! cache. Application code should use `anyhow::Result` for top-level error
//! handling.

use thiserror::Error;

use crate::transport::TransportError;

/// Stable discriminant of a [`LabsyncError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Certificate validation failed during the TLS handshake.
    Tls,
    /// The remote host refused the connection.
    ConnectionRefused,
    /// The remote host is unreachable.
    NoRouteToHost,
    /// Connecting or reading timed out.
    Timeout,
    /// The resource does not exist at the given host/path.
    NotFoundInPath,
    /// Any other I/O failure during an authenticated call.
    InvalidCredentials,
    /// The repository URL could not be split into host and project path.
    InvalidProjectUrl,
    /// No visible project matches the configured project path.
    UnknownProject,
    /// An issue query could not be built.
    InvalidQuery,
    /// Configuration could not be loaded or is incomplete.
    Config,
    /// Anything unclassified.
    Unknown,
}

/// Errors that can occur during labsync operations.
#[derive(Error, Debug)]
pub enum LabsyncError {
    /// Certificate validation failed.
    #[error("Invalid TLS certificate: {message}")]
    Tls {
        /// Error message from the TLS layer.
        message: String,
    },

    /// Connection refused by the remote host.
    #[error("Connection refused")]
    ConnectionRefused {
        /// Underlying transport failure.
        #[source]
        source: TransportError,
    },

    /// Remote host unreachable.
    #[error("No route to host")]
    NoRouteToHost {
        /// Underlying transport failure.
        #[source]
        source: TransportError,
    },

    /// Connect or read timeout. Never retried by the library.
    #[error("Request timed out: {message}")]
    Timeout {
        /// Error message from the transport.
        message: String,
    },

    /// The requested resource does not exist on the host.
    #[error("Invalid path in host: {url}")]
    NotFoundInPath {
        /// URL that returned not found.
        url: String,
    },

    /// Authentication failed, or the server answered with an unexpected error.
    #[error("Invalid username/password/private token combination")]
    InvalidCredentials {
        /// Underlying transport failure.
        #[source]
        source: TransportError,
    },

    /// The repository URL is not a valid project URL.
    #[error("Invalid project URL: {url}")]
    InvalidProjectUrl {
        /// The offending repository URL.
        url: String,
    },

    /// The project path did not match any project visible to the token.
    #[error("Unknown project: {path}")]
    UnknownProject {
        /// The resolved project path.
        path: String,
    },

    /// An issue query could not be built (e.g. invalid label pattern).
    #[error("Invalid issue query: {message}")]
    InvalidQuery {
        /// Error message.
        message: String,
    },

    /// Configuration file or environment error.
    #[error("Configuration error: {message}")]
    Config {
        /// Error message.
        message: String,
    },

    /// Unclassified failure.
    #[error("Unknown error: {message}")]
    Unknown {
        /// Original error message.
        message: String,
    },
}

impl LabsyncError {
    /// Returns the kind of this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            LabsyncError::Tls { .. } => ErrorKind::Tls,
            LabsyncError::ConnectionRefused { .. } => ErrorKind::ConnectionRefused,
            LabsyncError::NoRouteToHost { .. } => ErrorKind::NoRouteToHost,
            LabsyncError::Timeout { .. } => ErrorKind::Timeout,
            LabsyncError::NotFoundInPath { .. } => ErrorKind::NotFoundInPath,
            LabsyncError::InvalidCredentials { .. } => ErrorKind::InvalidCredentials,
            LabsyncError::InvalidProjectUrl { .. } => ErrorKind::InvalidProjectUrl,
            LabsyncError::UnknownProject { .. } => ErrorKind::UnknownProject,
            LabsyncError::InvalidQuery { .. } => ErrorKind::InvalidQuery,
            LabsyncError::Config { .. } => ErrorKind::Config,
            LabsyncError::Unknown { .. } => ErrorKind::Unknown,
        }
    }
}

/// Classifies a transport failure.
impl From<TransportError> for LabsyncError {
    fn from(err: TransportError) -> Self {
        match err {
            TransportError::Tls { message } => LabsyncError::Tls { message },
            e @ TransportError::ConnectionRefused { .. } => {
                LabsyncError::ConnectionRefused { source: e }
            }
            e @ TransportError::NoRouteToHost { .. } => LabsyncError::NoRouteToHost { source: e },
            TransportError::Timeout { message } => LabsyncError::Timeout { message },
            TransportError::NotFound { url } => LabsyncError::NotFoundInPath { url },
            e @ (TransportError::Api { .. } | TransportError::Io { .. }) => {
                LabsyncError::InvalidCredentials { source: e }
            }
            e @ (TransportError::Decode { .. }
            | TransportError::Attachment { .. }
            | TransportError::InvalidRequest { .. }
            | TransportError::Request(_)) => LabsyncError::Unknown {
                message: e.to_string(),
            },
        }
    }
}

impl From<config::ConfigError> for LabsyncError {
    fn from(err: config::ConfigError) -> Self {
        LabsyncError::Config {
            message: err.to_string(),
        }
    }
}
