// SPDX-License-Identifier: Apache-2.0

#![warn(missing_docs)]

//! # Labsync Core
//!
//! Core library for labsync - issue synchronization against self-hosted
//! GitLab instances.
//!
//! This crate provides reusable components for:
//! - An authenticated HTTP transport with gzip decoding and failure classification
//! - Lazy pagination over GitLab list endpoints
//! - Session validation (private token or password grant)
//! - A cache of validated connections with project metadata
//! - Client-side issue filtering
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use labsync_core::{Connector, IssueQuery, RepositorySettings, load_config};
//! use secrecy::SecretString;
//!
//! # fn example() -> labsync_core::Result<()> {
//! let config = load_config()?;
//! let connector = Connector::new(&config.http)?;
//!
//! let settings = RepositorySettings::builder()
//!     .url("https://gitlab.example.com/tools/labsync")
//!     .password(SecretString::from("glpat-xxxx"))
//!     .use_private_token(true)
//!     .build();
//!
//! let query = IssueQuery::new("alice", "", true, false, &["bug"])?;
//! let count = connector.perform_query(&settings, &query, false, |record| {
//!     println!("#{} {}", record.issue.iid, record.issue.title);
//! })?;
//! println!("{count} issues");
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`transport`] - HTTP requests, authentication and response decoding
//! - [`pagination`] - Page cursors over list endpoints
//! - [`gitlab`] - GitLab REST API v4 operations
//! - [`session`] - Session validation
//! - [`connection`] - Validated connections and project metadata
//! - [`cache`] - Connection cache
//! - [`filter`] - Issue queries
//! - [`facade`] - Frontend entry point
//! - [`config`] - Configuration loading and paths
//! - [`error`] - Error types

// ============================================================================
// Error Handling
// ============================================================================

pub use error::{ErrorKind, LabsyncError};

/// Convenience Result type for labsync operations.
pub type Result<T> = std::result::Result<T, LabsyncError>;

// ============================================================================
// Configuration
// ============================================================================

pub use config::{AppConfig, HttpConfig, RepositorySettings, load_config};

// ============================================================================
// Transport
// ============================================================================

pub use pagination::{PageCursor, Paginator};
pub use transport::{AuthContext, AuthMethod, Request, TokenKind, Transport, TransportError};

// ============================================================================
// GitLab Models
// ============================================================================

pub use models::{Issue, IssueState, Member, Milestone, Note, Project, StateEvent, Upload, User};

// ============================================================================
// Sessions and Connections
// ============================================================================

pub use cache::{ConnectionCache, RepositoryIdentity};
pub use connection::{Connection, ProjectMetadata};
pub use session::{ProjectLocation, SessionValidator, resolve_project_location};

// ============================================================================
// Issue Filtering
// ============================================================================

pub use filter::{IssueQuery, QuerySummary};

// ============================================================================
// Platform-Agnostic Facade
// ============================================================================

pub use facade::{Connector, IssueRecord};

// ============================================================================
// Modules
// ============================================================================

pub mod cache;
pub mod config;
pub mod connection;
pub mod error;
pub mod facade;
pub mod filter;
pub mod gitlab;
pub mod models;
pub mod pagination;
pub mod session;
pub mod transport;
