// SPDX-License-Identifier: Apache-2.0

//! Authenticated HTTP transport for the GitLab REST API.
//!
//! A [`Transport`] executes exactly one request per call, decodes the
//! response body (transparently inflating `gzip` payloads) and reports
//! failures as [`TransportError`]. Requests are described by [`Request`];
//! credentials are attached from an [`AuthContext`] either as a header or as
//! a query parameter, never both.

use std::collections::BTreeMap;
use std::io::{self, Read};
use std::path::PathBuf;
use std::time::Duration;

use flate2::read::GzDecoder;
use reqwest::blocking::multipart::{Form, Part};
use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::header::{ACCEPT_ENCODING, CONTENT_ENCODING, CONTENT_LENGTH, HeaderName, HeaderValue};
use reqwest::{Method, StatusCode, Url};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, instrument};

use crate::config::HttpConfig;

/// Content type used for scalar fields of a multipart body.
const TEXT_PART_MIME: &str = "text/plain; charset=UTF-8";

/// Failures raised by a single HTTP exchange.
#[derive(Error, Debug)]
pub enum TransportError {
    /// The server answered 404.
    #[error("Resource not found: {url}")]
    NotFound {
        /// Request URL, without authentication parameters.
        url: String,
    },

    /// Connect or read timeout.
    #[error("Request timed out: {message}")]
    Timeout {
        /// Error chain from the HTTP client.
        message: String,
    },

    /// The remote host refused the connection.
    #[error("Connection refused: {message}")]
    ConnectionRefused {
        /// Error chain from the HTTP client.
        message: String,
    },

    /// The remote host or network is unreachable.
    #[error("No route to host: {message}")]
    NoRouteToHost {
        /// Error chain from the HTTP client.
        message: String,
    },

    /// Certificate validation failed.
    #[error("TLS handshake failed: {message}")]
    Tls {
        /// Error chain from the HTTP client.
        message: String,
    },

    /// The connection failed at the I/O layer for another reason, such as a
    /// failed name lookup, a TLS protocol error or a truncated body.
    #[error("I/O failure: {message}")]
    Io {
        /// Error chain from the HTTP client.
        message: String,
    },

    /// Non-success HTTP status other than 404.
    #[error("API error (HTTP {status}): {}", .message.as_deref().unwrap_or("no response body"))]
    Api {
        /// HTTP status code.
        status: u16,
        /// Response body text, if any.
        message: Option<String>,
    },

    /// The response body could not be decoded.
    #[error("Failed to decode response: {message}")]
    Decode {
        /// Decoder error message.
        message: String,
    },

    /// A file attachment could not be read.
    #[error("Failed to read attachment {}: {source}", .path.display())]
    Attachment {
        /// Path of the attachment.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The request cannot be executed as described.
    #[error("Invalid request: {message}")]
    InvalidRequest {
        /// Error message.
        message: String,
    },

    /// Any other HTTP client failure.
    #[error("HTTP request failed: {0}")]
    Request(#[source] reqwest::Error),
}

impl TransportError {
    /// Classifies a client-side failure by inspecting the error chain.
    fn from_reqwest(err: reqwest::Error) -> Self {
        // The URL may carry an access token as a query parameter.
        let err = err.without_url();
        let message = error_chain(&err);

        if err.is_timeout() {
            return TransportError::Timeout { message };
        }
        let io_kind = io_error_kind(&err);
        match io_kind {
            Some(io::ErrorKind::ConnectionRefused) => {
                return TransportError::ConnectionRefused { message };
            }
            Some(io::ErrorKind::HostUnreachable | io::ErrorKind::NetworkUnreachable) => {
                return TransportError::NoRouteToHost { message };
            }
            Some(io::ErrorKind::TimedOut) => return TransportError::Timeout { message },
            _ => {}
        }
        if is_certificate_failure(&message) {
            return TransportError::Tls { message };
        }
        if err.is_connect() || err.is_body() || err.is_decode() || io_kind.is_some() {
            return TransportError::Io { message };
        }
        TransportError::Request(err)
    }
}

fn error_chain(err: &(dyn std::error::Error + 'static)) -> String {
    let mut parts = vec![err.to_string()];
    let mut source = err.source();
    while let Some(cause) = source {
        parts.push(cause.to_string());
        source = cause.source();
    }
    parts.join(": ")
}

fn io_error_kind(err: &(dyn std::error::Error + 'static)) -> Option<io::ErrorKind> {
    let mut current: Option<&(dyn std::error::Error + 'static)> = Some(err);
    while let Some(cause) = current {
        if let Some(io_err) = cause.downcast_ref::<io::Error>() {
            return Some(io_err.kind());
        }
        current = cause.source();
    }
    None
}

fn is_certificate_failure(message: &str) -> bool {
    message.to_ascii_lowercase().contains("certificate")
}

/// Kind of token presented to the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
    /// Long-lived personal token, sent as `PRIVATE-TOKEN`.
    PrivateToken,
    /// OAuth session token, sent as a bearer token.
    AccessToken,
}

impl TokenKind {
    /// Query parameter name used when authenticating by URL parameter.
    #[must_use]
    pub fn param_name(self) -> &'static str {
        match self {
            TokenKind::PrivateToken => "private_token",
            TokenKind::AccessToken => "access_token",
        }
    }

    /// Header name used when authenticating by header.
    #[must_use]
    pub fn header_name(self) -> &'static str {
        match self {
            TokenKind::PrivateToken => "private-token",
            TokenKind::AccessToken => "authorization",
        }
    }

    fn header_value(self, token: &str) -> String {
        match self {
            TokenKind::PrivateToken => token.to_string(),
            TokenKind::AccessToken => format!("Bearer {token}"),
        }
    }
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenKind::PrivateToken => write!(f, "private token"),
            TokenKind::AccessToken => write!(f, "access token"),
        }
    }
}

/// Where credentials are attached to outgoing requests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthMethod {
    /// Token sent in a request header.
    #[default]
    Header,
    /// Token sent as a query parameter.
    UrlParameter,
}

/// A token plus the way it is presented to the server.
#[derive(Debug, Clone)]
pub struct AuthContext {
    token: SecretString,
    kind: TokenKind,
    method: AuthMethod,
}

impl AuthContext {
    /// Creates a header-based auth context.
    #[must_use]
    pub fn new(token: SecretString, kind: TokenKind) -> Self {
        Self {
            token,
            kind,
            method: AuthMethod::Header,
        }
    }

    /// Switches how the token is attached.
    #[must_use]
    pub fn with_method(mut self, method: AuthMethod) -> Self {
        self.method = method;
        self
    }

    /// The token itself.
    #[must_use]
    pub fn token(&self) -> &SecretString {
        &self.token
    }

    /// The token kind.
    #[must_use]
    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    /// How the token is attached.
    #[must_use]
    pub fn method(&self) -> AuthMethod {
        self.method
    }

    fn authorize_url(&self, url: &mut Url) {
        if self.method == AuthMethod::UrlParameter {
            url.query_pairs_mut()
                .append_pair(self.kind.param_name(), self.token.expose_secret());
        }
    }

    fn authorize_headers(&self, builder: RequestBuilder) -> Result<RequestBuilder, TransportError> {
        if self.method != AuthMethod::Header {
            return Ok(builder);
        }
        let mut value = HeaderValue::from_str(&self.kind.header_value(self.token.expose_secret()))
            .map_err(|_| TransportError::InvalidRequest {
                message: "token contains characters not allowed in a header".to_string(),
            })?;
        value.set_sensitive(true);
        Ok(builder.header(HeaderName::from_static(self.kind.header_name()), value))
    }
}

/// Description of one HTTP request.
///
/// `data` holds scalar form fields (null values are never stored) and
/// `attachments` holds files to upload. When attachments are present the
/// body is `multipart/form-data`; otherwise `POST` requests, and `PUT`
/// requests with data, send `data` as a JSON object.
#[derive(Debug, Clone)]
pub struct Request {
    method: Method,
    url: Url,
    data: BTreeMap<String, Value>,
    attachments: BTreeMap<String, PathBuf>,
}

impl Request {
    /// Creates a request with no body.
    #[must_use]
    pub fn new(method: Method, url: Url) -> Self {
        Self {
            method,
            url,
            data: BTreeMap::new(),
            attachments: BTreeMap::new(),
        }
    }

    /// Shorthand for a `GET` request.
    #[must_use]
    pub fn get(url: Url) -> Self {
        Self::new(Method::GET, url)
    }

    /// Shorthand for a `POST` request.
    #[must_use]
    pub fn post(url: Url) -> Self {
        Self::new(Method::POST, url)
    }

    /// Shorthand for a `PUT` request.
    #[must_use]
    pub fn put(url: Url) -> Self {
        Self::new(Method::PUT, url)
    }

    /// Adds a form field. Null values are dropped.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        let value = value.into();
        if !value.is_null() {
            self.data.insert(key.into(), value);
        }
        self
    }

    /// Adds a file attachment.
    #[must_use]
    pub fn with_attachment(mut self, key: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        self.attachments.insert(key.into(), path.into());
        self
    }

    /// HTTP method.
    #[must_use]
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Target URL, without authentication parameters.
    #[must_use]
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Form fields.
    #[must_use]
    pub fn data(&self) -> &BTreeMap<String, Value> {
        &self.data
    }

    /// True when the request carries form fields or attachments.
    #[must_use]
    pub fn has_form_data(&self) -> bool {
        !self.data.is_empty() || !self.attachments.is_empty()
    }

    fn has_output(&self) -> bool {
        self.method == Method::POST || (self.method == Method::PUT && !self.data.is_empty())
    }

    fn multipart_form(&self) -> Result<Form, TransportError> {
        let mut form = Form::new();
        for (key, value) in &self.data {
            let text = serde_json::to_string(value).map_err(|e| TransportError::InvalidRequest {
                message: e.to_string(),
            })?;
            let part = Part::text(text)
                .mime_str(TEXT_PART_MIME)
                .map_err(TransportError::Request)?;
            form = form.part(key.clone(), part);
        }
        for (key, path) in &self.attachments {
            let part = Part::file(path).map_err(|source| TransportError::Attachment {
                path: path.clone(),
                source,
            })?;
            form = form.part(key.clone(), part);
        }
        Ok(form)
    }
}

/// Blocking HTTP transport.
///
/// Connections are not kept alive between calls.
#[derive(Debug, Clone)]
pub struct Transport {
    http: Client,
}

impl Transport {
    /// Creates a transport from HTTP settings.
    pub fn new(config: &HttpConfig) -> Result<Self, TransportError> {
        let mut builder = Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_seconds))
            .timeout(Duration::from_secs(config.read_timeout_seconds))
            .user_agent(config.user_agent.clone())
            .pool_max_idle_per_host(0)
            .danger_accept_invalid_certs(config.ignore_certificate_errors);

        if let Some(proxy) = config.proxy.as_deref().map(str::trim).filter(|p| !p.is_empty()) {
            builder = builder.proxy(reqwest::Proxy::all(proxy).map_err(TransportError::Request)?);
        }

        let http = builder.build().map_err(TransportError::Request)?;
        Ok(Self { http })
    }

    /// Executes the request and decodes the JSON response into `T`.
    ///
    /// An empty body decodes as JSON `null`.
    #[instrument(skip(self, request, auth), fields(method = %request.method, url = %request.url))]
    pub fn execute<T: DeserializeOwned>(
        &self,
        request: &Request,
        auth: Option<&AuthContext>,
    ) -> Result<T, TransportError> {
        let body = self.send(request, auth)?;
        decode_json(&body)
    }

    /// Executes the request and returns the decoded payload bytes.
    #[instrument(skip(self, request, auth), fields(method = %request.method, url = %request.url))]
    pub fn execute_bytes(
        &self,
        request: &Request,
        auth: Option<&AuthContext>,
    ) -> Result<Vec<u8>, TransportError> {
        self.send(request, auth)
    }

    fn send(&self, request: &Request, auth: Option<&AuthContext>) -> Result<Vec<u8>, TransportError> {
        let mut url = request.url.clone();
        if let Some(auth) = auth {
            auth.authorize_url(&mut url);
        }

        let mut builder = self
            .http
            .request(request.method.clone(), url)
            .header(ACCEPT_ENCODING, "gzip");
        if let Some(auth) = auth {
            builder = auth.authorize_headers(builder)?;
        }

        builder = if !request.attachments.is_empty() {
            builder.multipart(request.multipart_form()?)
        } else if request.has_output() {
            builder.json(&request.data)
        } else if request.method == Method::PUT {
            builder
                .header(CONTENT_LENGTH, HeaderValue::from_static("0"))
                .body(Vec::new())
        } else {
            builder
        };

        let response = builder.send().map_err(TransportError::from_reqwest)?;
        read_response(response, &request.url)
    }
}

fn read_response(response: Response, url: &Url) -> Result<Vec<u8>, TransportError> {
    let status = response.status();
    let encoding = response
        .headers()
        .get(CONTENT_ENCODING)
        .map(|v| String::from_utf8_lossy(v.as_bytes()).trim().to_string());
    let raw = response.bytes().map_err(TransportError::from_reqwest)?;

    if status == StatusCode::NOT_FOUND {
        return Err(TransportError::NotFound {
            url: url.to_string(),
        });
    }

    let body = decode_body(encoding.as_deref(), &raw)?;
    if !status.is_success() {
        let text = String::from_utf8_lossy(&body).trim().to_string();
        debug!(status = status.as_u16(), "Server returned an error status");
        return Err(TransportError::Api {
            status: status.as_u16(),
            message: (!text.is_empty()).then_some(text),
        });
    }

    debug!(status = status.as_u16(), bytes = body.len(), "Received response");
    Ok(body)
}

/// Decodes a response payload according to its `Content-Encoding`.
///
/// Only an absent encoding or `gzip` is accepted.
pub(crate) fn decode_body(encoding: Option<&str>, raw: &[u8]) -> Result<Vec<u8>, TransportError> {
    match encoding {
        None => Ok(raw.to_vec()),
        Some(enc) if enc.eq_ignore_ascii_case("gzip") => {
            if raw.is_empty() {
                return Ok(Vec::new());
            }
            let mut decoded = Vec::new();
            GzDecoder::new(raw)
                .read_to_end(&mut decoded)
                .map_err(|e| TransportError::Decode {
                    message: format!("invalid gzip payload: {e}"),
                })?;
            Ok(decoded)
        }
        Some(other) => Err(TransportError::Decode {
            message: format!("Unexpected Content-Encoding: {other}"),
        }),
    }
}

fn decode_json<T: DeserializeOwned>(body: &[u8]) -> Result<T, TransportError> {
    let payload: &[u8] = if body.iter().all(u8::is_ascii_whitespace) {
        b"null"
    } else {
        body
    };
    serde_json::from_slice(payload).map_err(|e| TransportError::Decode {
        message: e.to_string(),
    })
}
