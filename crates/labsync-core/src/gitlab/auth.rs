// SPDX-License-Identifier: Apache-2.0

//! Credential checks and OAuth session tokens.

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use tracing::{debug, instrument};

use super::{GitlabApi, build_url};
use crate::models::User;
use crate::transport::{Request, Transport, TransportError};

#[derive(Deserialize)]
struct OAuthToken {
    access_token: String,
}

impl GitlabApi {
    /// Fetches the user the credentials belong to.
    #[instrument(skip(self), fields(host = %self.host))]
    pub fn current_user(&self) -> Result<User, TransportError> {
        let user: User = self.execute(&Request::get(self.api_url("/user")?))?;
        debug!(username = %user.username, "Authenticated");
        Ok(user)
    }
}

/// Exchanges a username and password for an OAuth access token using the
/// resource-owner password grant.
#[instrument(skip(transport, password))]
pub fn request_session_token(
    transport: &Transport,
    host: &str,
    username: &str,
    password: &SecretString,
) -> Result<SecretString, TransportError> {
    let request = Request::post(build_url(host, "/oauth/token")?)
        .with("grant_type", "password")
        .with("username", username)
        .with("password", password.expose_secret());

    let token: OAuthToken = transport.execute(&request, None)?;
    debug!("Obtained session token");
    Ok(SecretString::from(token.access_token))
}
