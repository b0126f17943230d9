use std::fmt;

use serde::{Deserialize, Serialize};

/// Default page size when the caller does not pick one
pub const DEFAULT_PAGE_LIMIT: u32 = 100;

/// Endpoint and credentials for one Gitea instance
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Integration {
    /// API base URL (e.g. "https://gitea.example.com/api/v1")
    pub api_url: String,
    /// Access token sent as `Authorization: token <api_key>`
    pub api_key: String,
}

impl Integration {
    /// Create a new integration
    #[must_use]
    pub fn new(api_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
            api_key: api_key.into(),
        }
    }

    /// API key with everything after the first four characters hidden
    #[must_use]
    pub fn masked_key(&self) -> String {
        format!("{}***", self.api_key.chars().take(4).collect::<String>())
    }
}

impl fmt::Debug for Integration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Integration")
            .field("api_url", &self.api_url)
            .field("api_key", &self.masked_key())
            .finish()
    }
}

/// Which page(s) to fetch from a list endpoint.
///
/// Without a page (or with page `0`) every page is fetched and concatenated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Pagination {
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

impl Pagination {
    /// Fetch every page
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Fetch only the given page
    #[must_use]
    pub fn page(page: u32) -> Self {
        Self {
            page: Some(page),
            limit: None,
        }
    }

    #[must_use]
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// True when no explicit page was requested
    #[must_use]
    pub fn fetch_all(&self) -> bool {
        self.start_page().is_none()
    }

    /// Explicit page number, treating `0` like "no page"
    #[must_use]
    pub fn start_page(&self) -> Option<u32> {
        self.page.filter(|page| *page > 0)
    }

    /// Page size, falling back to [`DEFAULT_PAGE_LIMIT`] when unset or zero
    #[must_use]
    pub fn effective_limit(&self) -> u32 {
        self.limit
            .filter(|limit| *limit > 0)
            .unwrap_or(DEFAULT_PAGE_LIMIT)
    }
}

/// One page of a list endpoint
#[derive(Debug, Clone, PartialEq)]
pub struct PageResponse<T> {
    pub items: Vec<T>,
    /// Total number of items across all pages, when the server reported one
    pub total_count: Option<u64>,
}

/// Items aggregated across one or more pages
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Paginated<T> {
    /// Items in page order, then in server order within each page
    pub items: Vec<T>,
    /// Total reported by the last page fetched (0 when it reported none)
    pub total: u64,
}

impl<T> Default for Paginated<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            total: 0,
        }
    }
}
