//! Authenticated GET, paginated GET and POST helpers for a Gitea-style REST API.

pub mod client;
pub mod error;
pub mod http;
pub mod query;
pub mod types;

pub use client::{GiteaApi, TOTAL_COUNT_HEADER};
pub use error::{ApiError, Result};
pub use http::{
    HttpRequest, HttpResponse, HttpTransport, Method, ReqwestTransport, TransportConfig,
    DEFAULT_TIMEOUT_SECS,
};
pub use query::{join_url, with_query, Query};
pub use types::{Integration, PageResponse, Paginated, Pagination, DEFAULT_PAGE_LIMIT};
