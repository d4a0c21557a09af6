// SPDX-License-Identifier: Apache-2.0

//! CLI-specific error formatting with user-friendly hints.
//!
//! Downcasts `anyhow::Error` to `LabsyncError` and appends a hint for each
//! error kind. The library keeps the structured error; presentation lives
//! here.

use anyhow::Error;
use labsync_core::LabsyncError;

/// Formats an error for CLI display with helpful hints.
///
/// If the error is not a `LabsyncError`, returns the full error chain.
pub fn format_error(error: &Error) -> String {
    let Some(err) = error.downcast_ref::<LabsyncError>() else {
        return format!("{error:#}");
    };

    let hint = match err {
        LabsyncError::Tls { .. } => {
            "Set http.ignore_certificate_errors = true if the server uses a self-signed certificate."
                .to_string()
        }
        LabsyncError::ConnectionRefused { .. } => {
            "Check that the GitLab server is running and the repository URL port is correct."
                .to_string()
        }
        LabsyncError::NoRouteToHost { .. } => {
            "Check your network connection and proxy settings (http.proxy).".to_string()
        }
        LabsyncError::Timeout { .. } => {
            "The server did not answer in time. Raise http.read_timeout_seconds or pass --retry-timeouts."
                .to_string()
        }
        LabsyncError::NotFoundInPath { .. } => {
            "The host answered 404. If GitLab is installed under a path prefix, pass --base-url."
                .to_string()
        }
        LabsyncError::InvalidCredentials { .. } => {
            "Check the username and password, or pass --private-token if the password is a personal access token."
                .to_string()
        }
        LabsyncError::InvalidProjectUrl { .. } => {
            "Use the project URL as shown in the browser, e.g. https://gitlab.example.com/group/project."
                .to_string()
        }
        LabsyncError::UnknownProject { .. } => {
            "The project path must match a project visible to this user, including subgroups."
                .to_string()
        }
        LabsyncError::InvalidQuery { .. } => {
            "Label filters are regular expressions; escape special characters.".to_string()
        }
        LabsyncError::Config { .. } => format!(
            "Check your config file at {}",
            labsync_core::config::config_file_path().display()
        ),
        LabsyncError::Unknown { .. } => return format!("{error:#}"),
    };

    format!("{err}\n\nTip: {hint}")
}
