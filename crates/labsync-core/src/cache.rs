// SPDX-License-Identifier: Apache-2.0

//! In-process cache of validated connections.
//!
//! Connections are keyed by [`RepositoryIdentity`]: repository URL,
//! username and a SHA-256 fingerprint of the credentials. The raw secret is
//! never stored in the key. A miss validates the settings and loads project
//! metadata before anything is inserted, so a failed refresh leaves the
//! previous entry in place.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use secrecy::{ExposeSecret, SecretString};
use sha2::{Digest, Sha256};
use tracing::{debug, instrument, warn};

use crate::config::RepositorySettings;
use crate::connection::Connection;
use crate::error::LabsyncError;
use crate::session::SessionValidator;

/// Cache key for a connection.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepositoryIdentity {
    repository_url: String,
    username: String,
    fingerprint: String,
}

impl RepositoryIdentity {
    /// Builds an identity from a URL, username and secret.
    #[must_use]
    pub fn new(repository_url: &str, username: &str, secret: &SecretString) -> Self {
        Self {
            repository_url: repository_url.to_string(),
            username: username.to_string(),
            fingerprint: credential_fingerprint(username, secret),
        }
    }

    /// Builds the identity of a set of repository settings.
    #[must_use]
    pub fn from_settings(settings: &RepositorySettings) -> Self {
        Self::new(&settings.url, &settings.username, &settings.password)
    }

    /// Repository URL.
    #[must_use]
    pub fn repository_url(&self) -> &str {
        &self.repository_url
    }

    /// Username.
    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Hex-encoded credential fingerprint.
    #[must_use]
    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }
}

fn credential_fingerprint(username: &str, secret: &SecretString) -> String {
    let mut hasher = Sha256::new();
    hasher.update(username.as_bytes());
    hasher.update([0u8]);
    hasher.update(secret.expose_secret().as_bytes());
    hex::encode(hasher.finalize())
}

/// Shared map of validated connections.
#[derive(Debug)]
pub struct ConnectionCache {
    validator: SessionValidator,
    connections: Mutex<HashMap<RepositoryIdentity, Arc<Connection>>>,
}

impl ConnectionCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new(validator: SessionValidator) -> Self {
        Self {
            validator,
            connections: Mutex::new(HashMap::new()),
        }
    }

    /// The validator used on misses.
    #[must_use]
    pub fn validator(&self) -> &SessionValidator {
        &self.validator
    }

    /// Returns the cached connection for `settings`, validating on a miss.
    ///
    /// With `force_refresh` the entry is rebuilt even if present. Validation
    /// and metadata loading run without holding the lock; concurrent misses
    /// for one identity may both validate, and the last insert wins.
    #[instrument(skip(self, settings), fields(url = %settings.url))]
    pub fn get(
        &self,
        settings: &RepositorySettings,
        force_refresh: bool,
    ) -> Result<Arc<Connection>, LabsyncError> {
        let identity = RepositoryIdentity::from_settings(settings);

        if !force_refresh && let Some(connection) = self.lookup(&identity) {
            debug!("Connection cache hit");
            return Ok(connection);
        }

        debug!("Connection cache miss");
        let connection = self.validator.validate(settings)?;
        connection.update()?;

        let connection = Arc::new(connection);
        self.lock().insert(identity, Arc::clone(&connection));
        Ok(connection)
    }

    /// Like [`get`](Self::get) without a forced refresh, but logs failures
    /// and returns `None`.
    pub fn get_safe(&self, settings: &RepositorySettings) -> Option<Arc<Connection>> {
        match self.get(settings, false) {
            Ok(connection) => Some(connection),
            Err(e) => {
                warn!(url = %settings.url, error = %e, "Could not open repository connection");
                None
            }
        }
    }

    /// Returns the cached connection for an identity, if any.
    #[must_use]
    pub fn lookup(&self, identity: &RepositoryIdentity) -> Option<Arc<Connection>> {
        self.lock().get(identity).cloned()
    }

    /// Removes the entry for `settings`.
    pub fn evict(&self, settings: &RepositorySettings) -> Option<Arc<Connection>> {
        self.lock()
            .remove(&RepositoryIdentity::from_settings(settings))
    }

    /// Number of cached connections.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// True when nothing is cached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<RepositoryIdentity, Arc<Connection>>> {
        self.connections.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
