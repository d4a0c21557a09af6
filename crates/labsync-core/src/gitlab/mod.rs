// SPDX-License-Identifier: Apache-2.0

//! GitLab REST API v4 client.
//!
//! [`GitlabApi`] binds a shared [`Transport`] to one host and one set of
//! credentials. Operations are grouped by resource in the submodules.

pub mod auth;
pub mod issues;
pub mod projects;

use std::sync::Arc;

use reqwest::Url;
use serde::de::DeserializeOwned;

use crate::pagination::Paginator;
use crate::transport::{AuthContext, Request, Transport, TransportError};

/// Path prefix of every REST endpoint.
pub const API_NAMESPACE: &str = "/api/v4";

/// Authenticated client for one GitLab host.
#[derive(Debug, Clone)]
pub struct GitlabApi {
    transport: Arc<Transport>,
    host: String,
    auth: AuthContext,
}

impl GitlabApi {
    /// Creates a client for `host` (scheme and authority, optionally with a
    /// path prefix).
    #[must_use]
    pub fn new(transport: Arc<Transport>, host: impl Into<String>, auth: AuthContext) -> Self {
        Self {
            transport,
            host: host.into(),
            auth,
        }
    }

    /// Host this client talks to.
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Credentials attached to every call.
    #[must_use]
    pub fn auth(&self) -> &AuthContext {
        &self.auth
    }

    /// Builds an API URL from an endpoint path such as `/projects`.
    pub fn api_url(&self, tail: &str) -> Result<Url, TransportError> {
        build_url(&self.host, &format!("{API_NAMESPACE}{tail}"))
    }

    fn execute<T: DeserializeOwned>(&self, request: &Request) -> Result<T, TransportError> {
        self.transport.execute(request, Some(&self.auth))
    }

    fn paginate<T: DeserializeOwned>(&self, tail: &str) -> Result<Paginator<'_, T>, TransportError> {
        let request = Request::get(self.api_url(tail)?);
        Paginator::new(&self.transport, &request, Some(&self.auth))
    }
}

/// Joins `host` and `path` into a URL.
pub(crate) fn build_url(host: &str, path: &str) -> Result<Url, TransportError> {
    let raw = format!("{}{path}", host.trim_end_matches('/'));
    Url::parse(&raw).map_err(|e| TransportError::InvalidRequest {
        message: format!("invalid URL {raw}: {e}"),
    })
}

#[cfg(test)]
mod tests {
    use secrecy::SecretString;

    use super::*;
    use crate::config::HttpConfig;
    use crate::transport::TokenKind;

    fn api(host: &str) -> GitlabApi {
        let transport = Arc::new(Transport::new(&HttpConfig::default()).unwrap());
        let auth = AuthContext::new(SecretString::from("token"), TokenKind::PrivateToken);
        GitlabApi::new(transport, host, auth)
    }

    #[test]
    fn test_api_url_joins_namespace() {
        let url = api("https://gitlab.example.com").api_url("/projects").unwrap();
        assert_eq!(url.as_str(), "https://gitlab.example.com/api/v4/projects");
    }

    #[test]
    fn test_api_url_keeps_host_prefix() {
        let url = api("https://example.com/gitlab/").api_url("/user").unwrap();
        assert_eq!(url.as_str(), "https://example.com/gitlab/api/v4/user");
    }

    #[test]
    fn test_invalid_host_is_rejected() {
        let err = api("not a host").api_url("/user").unwrap_err();
        assert!(matches!(err, TransportError::InvalidRequest { .. }));
    }
}
