//! Paged category fetching from the Poe2Scout API

use serde::de::DeserializeOwned;
use tokio_util::sync::CancellationToken;

use crate::data::CategoryDef;
use crate::error::{Result, SyncError};
use crate::logging::StatusLog;
use crate::scout::models::Paged;

/// Public Poe2Scout API root
pub const DEFAULT_BASE_URL: &str = "https://poe2scout.com/api";

/// Items requested per page
const PER_PAGE: u32 = 250;

const USER_AGENT: &str = "scout_sync/0.1";

/// HTTP client for the paged category endpoints
#[derive(Debug, Clone)]
pub struct ScoutClient {
    client: reqwest::Client,
    base_url: String,
}

impl ScoutClient {
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Creates a client against a custom API root (mock servers in tests)
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Fetches every page of one category and returns the items in page
    /// order.
    ///
    /// Any network error, HTTP error status, empty body or unparseable body
    /// fails the whole fetch; a partial page set is never returned.
    /// Cancellation is checked before each page request and surfaces as
    /// `SyncError::Cancelled`.
    pub async fn fetch_category<T>(
        &self,
        category: &CategoryDef,
        league: &str,
        log: &StatusLog,
        token: &CancellationToken,
    ) -> Result<Vec<T>>
    where
        T: DeserializeOwned,
    {
        let url = format!("{}/{}", self.base_url, category.endpoint);
        let mut items = Vec::new();
        let mut page = 1u32;
        let mut pages_hint = String::from("?");

        loop {
            if token.is_cancelled() {
                return Err(SyncError::Cancelled);
            }

            log.debug(&format!(
                "Downloading {} ({}/{})",
                category.backup_file, page, pages_hint
            ));

            let page_param = page.to_string();
            let per_page_param = PER_PAGE.to_string();
            let response = self
                .client
                .get(&url)
                .query(&[
                    ("league", league),
                    ("page", page_param.as_str()),
                    ("perPage", per_page_param.as_str()),
                ])
                .header("User-Agent", USER_AGENT)
                .send()
                .await?;

            if !response.status().is_success() {
                return Err(SyncError::HttpStatus(response.status()));
            }

            let body = response.text().await?;
            if body.trim().is_empty() {
                return Err(SyncError::EmptyResponse);
            }

            let paged: Paged<T> = serde_json::from_str(&body)?;
            items.extend(paged.items);

            if paged.current_page >= paged.pages {
                break;
            }
            pages_hint = paged.pages.to_string();
            page += 1;
        }

        Ok(items)
    }
}

impl Default for ScoutClient {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "client_tests.rs"]
mod tests;
