//! Authenticated request helpers for a Gitea-style REST API.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{ApiError, Result};
use crate::http::{HttpRequest, HttpResponse, HttpTransport, Method, ReqwestTransport};
use crate::query::{join_url, with_query, Query};
use crate::types::{Integration, PageResponse, Paginated, Pagination};

/// Response header carrying the total item count of a list endpoint
pub const TOTAL_COUNT_HEADER: &str = "x-total-count";

/// Gitea API helper over an injectable transport
#[derive(Debug, Clone)]
pub struct GiteaApi<T = ReqwestTransport> {
    transport: T,
}

impl GiteaApi<ReqwestTransport> {
    /// Create a helper backed by a default `reqwest` transport
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created
    pub fn new() -> Result<Self> {
        Ok(Self::with_transport(ReqwestTransport::new()?))
    }
}

impl<T: HttpTransport> GiteaApi<T> {
    #[must_use]
    pub fn with_transport(transport: T) -> Self {
        Self { transport }
    }

    #[must_use]
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Make an authenticated GET request and decode the JSON body
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::RequestFailed`] on a non-2xx status, a transport
    /// error if the request cannot be sent, or [`ApiError::Decode`] if the
    /// body does not decode as `R`.
    pub async fn get<R: DeserializeOwned>(
        &self,
        integration: &Integration,
        path: &str,
        query: Option<&Query>,
    ) -> Result<R> {
        let mut url = join_url(&integration.api_url, path);
        if let Some(query) = query {
            url = with_query(&url, query);
        }

        self.send(integration, Method::Get, url, None)
            .await?
            .json()
    }

    /// Make an authenticated POST request with a JSON body
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Encode`] if the body cannot be serialized, plus
    /// every error [`GiteaApi::get`] can return.
    pub async fn post<B: Serialize + ?Sized, R: DeserializeOwned>(
        &self,
        integration: &Integration,
        path: &str,
        body: &B,
    ) -> Result<R> {
        let url = join_url(&integration.api_url, path);
        let body = serde_json::to_vec(body).map_err(ApiError::Encode)?;

        self.send(integration, Method::Post, url, Some(body))
            .await?
            .json()
    }

    /// Fetch a single page of a list endpoint
    ///
    /// `limit` and `page` are appended after the caller's query parameters.
    ///
    /// # Errors
    ///
    /// Same as [`GiteaApi::get`]; the body must be a JSON array.
    pub async fn get_page<R: DeserializeOwned>(
        &self,
        integration: &Integration,
        path: &str,
        query: Option<&Query>,
        page: u32,
        limit: u32,
    ) -> Result<PageResponse<R>> {
        let mut page_query = query.cloned().unwrap_or_default();
        page_query.push("limit", limit);
        page_query.push("page", page);
        let url = with_query(&join_url(&integration.api_url, path), &page_query);

        let response = self.send(integration, Method::Get, url, None).await?;
        let items: Vec<R> = response.json()?;

        Ok(PageResponse {
            items,
            total_count: total_count(&response),
        })
    }

    /// GET a list endpoint, following pages until the reported total is reached.
    ///
    /// With an explicit page only that page is fetched. Otherwise pages are
    /// requested one after another starting at 1, and the loop stops once the
    /// accumulated item count reaches the total from the last page, or a page
    /// comes back empty. A page without a usable total reports 0, which ends
    /// the loop.
    ///
    /// # Errors
    ///
    /// The first failing page aborts the whole aggregation; items from
    /// earlier pages are dropped.
    pub async fn get_paginated<R: DeserializeOwned>(
        &self,
        integration: &Integration,
        path: &str,
        query: Option<&Query>,
        pagination: Pagination,
    ) -> Result<Paginated<R>> {
        let fetch_all = pagination.fetch_all();
        let limit = pagination.effective_limit();
        let mut page = pagination.start_page().unwrap_or(1);
        let mut result = Paginated::default();

        loop {
            let PageResponse { items, total_count } = self
                .get_page::<R>(integration, path, query, page, limit)
                .await?;
            let page_len = items.len();

            result.items.extend(items);
            result.total = total_count.unwrap_or(0);

            log::debug!(
                "Fetched page {page} of {path}: {page_len} items, {}/{} total",
                result.items.len(),
                result.total
            );

            let has_more = fetch_all && page_len > 0 && result.total > result.items.len() as u64;
            if !has_more {
                break;
            }
            page += 1;
        }

        Ok(result)
    }

    async fn send(
        &self,
        integration: &Integration,
        method: Method,
        url: String,
        body: Option<Vec<u8>>,
    ) -> Result<HttpResponse> {
        log::debug!("{} {url}", method.as_str());

        let request = HttpRequest {
            method,
            url,
            headers: auth_headers(integration),
            body,
        };

        self.transport.execute(request).await?.ensure_success()
    }
}

fn auth_headers(integration: &Integration) -> Vec<(String, String)> {
    vec![
        (
            "Authorization".to_string(),
            format!("token {}", integration.api_key),
        ),
        ("Content-Type".to_string(), "application/json".to_string()),
    ]
}

/// Total item count reported by a list response, if present and numeric
fn total_count(response: &HttpResponse) -> Option<u64> {
    let raw = response.header(TOTAL_COUNT_HEADER)?;
    match raw.trim().parse() {
        Ok(total) => Some(total),
        Err(_) => {
            log::warn!("Ignoring non-numeric {TOTAL_COUNT_HEADER} header: {raw:?}");
            None
        }
    }
}
