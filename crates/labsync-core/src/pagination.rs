// SPDX-License-Identifier: Apache-2.0

//! Lazy page-by-page iteration over GitLab list endpoints.
//!
//! The first request goes to the URL as given. Each non-empty page advances
//! the cursor by rewriting the `page` query parameter (or appending
//! `page=2` when there is none). A `null` or empty page ends the sequence.

use std::marker::PhantomData;
use std::sync::LazyLock;

use regex::{Captures, Regex};
use reqwest::Url;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::transport::{AuthContext, Request, Transport, TransportError};

static PAGE_PARAM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([&?])page=(\d+)").expect("valid page parameter regex"));

/// Position of a paginated read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageCursor {
    /// URL of the next page to fetch.
    Next(Url),
    /// No more pages.
    Exhausted,
}

/// Fetches one page per call and advances a [`PageCursor`].
///
/// Not safe for concurrent use; each caller gets its own paginator.
pub struct Paginator<'a, T> {
    transport: &'a Transport,
    auth: Option<&'a AuthContext>,
    cursor: PageCursor,
    pages_fetched: usize,
    _item: PhantomData<fn() -> T>,
}

impl<'a, T: DeserializeOwned> Paginator<'a, T> {
    /// Creates a paginator starting at the request URL.
    ///
    /// Pages are always fetched with `GET`; requests carrying form data or
    /// attachments are refused.
    pub fn new(
        transport: &'a Transport,
        request: &Request,
        auth: Option<&'a AuthContext>,
    ) -> Result<Self, TransportError> {
        if request.has_form_data() {
            return Err(TransportError::InvalidRequest {
                message: "cannot paginate a request that carries form data".to_string(),
            });
        }
        Ok(Self {
            transport,
            auth,
            cursor: PageCursor::Next(request.url().clone()),
            pages_fetched: 0,
            _item: PhantomData,
        })
    }

    /// Current cursor.
    #[must_use]
    pub fn cursor(&self) -> &PageCursor {
        &self.cursor
    }

    /// Number of non-empty pages returned so far.
    #[must_use]
    pub fn pages_fetched(&self) -> usize {
        self.pages_fetched
    }

    /// True once a `null` or empty page has been seen.
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.cursor == PageCursor::Exhausted
    }

    /// Fetches the next page.
    ///
    /// Returns `Ok(None)` once the sequence is exhausted. On error the cursor
    /// is left unchanged.
    pub fn fetch_next(&mut self) -> Result<Option<Vec<T>>, TransportError> {
        let url = match &self.cursor {
            PageCursor::Next(url) => url.clone(),
            PageCursor::Exhausted => return Ok(None),
        };

        let page: Option<Vec<T>> = self.transport.execute(&Request::get(url.clone()), self.auth)?;
        match page {
            Some(items) if !items.is_empty() => {
                self.cursor = PageCursor::Next(next_page_url(&url)?);
                self.pages_fetched += 1;
                debug!(page = self.pages_fetched, items = items.len(), "Fetched page");
                Ok(Some(items))
            }
            _ => {
                self.cursor = PageCursor::Exhausted;
                Ok(None)
            }
        }
    }

    /// Drains every remaining page into one list.
    pub fn collect_all(mut self) -> Result<Vec<T>, TransportError> {
        let mut all = Vec::new();
        while let Some(page) = self.fetch_next()? {
            all.extend(page);
        }
        Ok(all)
    }
}

impl<T: DeserializeOwned> Iterator for Paginator<'_, T> {
    type Item = Result<Vec<T>, TransportError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.fetch_next().transpose()
    }
}

impl<T> std::fmt::Debug for Paginator<'_, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Paginator")
            .field("cursor", &self.cursor)
            .field("pages_fetched", &self.pages_fetched)
            .finish_non_exhaustive()
    }
}

/// Computes the URL of the page after `url`.
///
/// Every `page=N` parameter is rewritten to the first one's value plus one.
/// Without a page parameter, `page=2` is appended.
pub fn next_page_url(url: &Url) -> Result<Url, TransportError> {
    let current = url.as_str();
    let next = if let Some(caps) = PAGE_PARAM.captures(current) {
        let page: u64 = caps[2].parse().map_err(|_| TransportError::InvalidRequest {
            message: format!("page number out of range in {current}"),
        })?;
        let next_page = page
            .checked_add(1)
            .ok_or_else(|| TransportError::InvalidRequest {
                message: format!("page number out of range in {current}"),
            })?;
        PAGE_PARAM
            .replace_all(current, |c: &Captures| format!("{}page={next_page}", &c[1]))
            .into_owned()
    } else {
        let separator = if current.contains('?') { '&' } else { '?' };
        format!("{current}{separator}page=2")
    };
    Url::parse(&next).map_err(|e| TransportError::InvalidRequest {
        message: format!("invalid next page URL: {e}"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn next(url: &str) -> String {
        next_page_url(&Url::parse(url).unwrap()).unwrap().to_string()
    }

    #[test]
    fn test_appends_page_two() {
        assert_eq!(
            next("https://host.org/api/v4/projects"),
            "https://host.org/api/v4/projects?page=2"
        );
        assert_eq!(
            next("https://host.org/api/v4/projects?state=opened"),
            "https://host.org/api/v4/projects?state=opened&page=2"
        );
    }

    #[test]
    fn test_increments_existing_page() {
        assert_eq!(
            next("https://host.org/api/v4/projects?page=3"),
            "https://host.org/api/v4/projects?page=4"
        );
        assert_eq!(
            next("https://host.org/api/v4/projects?state=opened&page=9"),
            "https://host.org/api/v4/projects?state=opened&page=10"
        );
    }

    #[test]
    fn test_per_page_is_not_a_page_parameter() {
        assert_eq!(
            next("https://host.org/api/v4/projects?per_page=50"),
            "https://host.org/api/v4/projects?per_page=50&page=2"
        );
        assert_eq!(
            next("https://host.org/api/v4/projects?per_page=50&page=2"),
            "https://host.org/api/v4/projects?per_page=50&page=3"
        );
    }

    #[test]
    fn test_last_representable_page_is_rejected() {
        let url = Url::parse("https://host.org/api/v4/projects?page=18446744073709551615").unwrap();
        assert!(matches!(
            next_page_url(&url),
            Err(TransportError::InvalidRequest { .. })
        ));
    }

    #[test]
    fn test_refuses_form_data() {
        let transport = Transport::new(&crate::config::HttpConfig::default()).unwrap();
        let request = Request::get(Url::parse("https://host.org/api/v4/projects").unwrap())
            .with("search", "labsync");
        let result = Paginator::<serde_json::Value>::new(&transport, &request, None);
        assert!(matches!(result, Err(TransportError::InvalidRequest { .. })));
    }

    #[test]
    fn test_new_paginator_points_at_request_url() {
        let transport = Transport::new(&crate::config::HttpConfig::default()).unwrap();
        let url = Url::parse("https://host.org/api/v4/projects").unwrap();
        let paginator =
            Paginator::<serde_json::Value>::new(&transport, &Request::get(url.clone()), None).unwrap();
        assert_eq!(paginator.cursor(), &PageCursor::Next(url));
        assert!(!paginator.is_exhausted());
        assert_eq!(paginator.pages_fetched(), 0);
    }
}
