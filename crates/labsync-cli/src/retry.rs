// SPDX-License-Identifier: Apache-2.0

//! Retry policy for timed-out queries.
//!
//! The library never retries; the CLI retries timeouts only when asked.

use std::time::Duration;

use backon::ExponentialBuilder;
use labsync_core::{ErrorKind, LabsyncError};

/// Backoff for timed-out requests.
///
/// - Factor: 2 (exponential growth)
/// - Min delay: 1 second
/// - Max times: 3
/// - Jitter: enabled
#[must_use]
pub fn timeout_backoff() -> ExponentialBuilder {
    ExponentialBuilder::default()
        .with_factor(2.0)
        .with_min_delay(Duration::from_secs(1))
        .with_max_times(3)
        .with_jitter()
}

/// Only timeouts are worth another attempt.
pub fn is_retryable(error: &LabsyncError) -> bool {
    error.kind() == ErrorKind::Timeout
}

#[cfg(test)]
mod tests {
    use super::*;
    use labsync_core::TransportError;

    #[test]
    fn test_timeout_is_retryable() {
        assert!(is_retryable(&LabsyncError::Timeout {
            message: "read timed out".to_string()
        }));
    }

    #[test]
    fn test_other_errors_are_not_retryable() {
        assert!(!is_retryable(&LabsyncError::ConnectionRefused {
            source: TransportError::ConnectionRefused {
                message: "refused".to_string()
            }
        }));
        assert!(!is_retryable(&LabsyncError::UnknownProject {
            path: "g/p".to_string()
        }));
    }
}
