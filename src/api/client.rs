// src/api/client.rs
//! HTTP client for the official Notion API.
//!
//! Authenticates with an integration token passed in explicitly and reads a
//! page's blocks through `GET /v1/blocks/{id}/children`.

use super::pagination::fetch_all_pages;
use super::parser::{extract_response_text, parse_blocks_pagination};
use super::{BlockSource, FetchOptions};
use crate::error::{AppError, FetchError};
use crate::model::{Block, BlockKind};
use crate::types::{ApiKey, NotionId, PageReference};
use futures::future::{BoxFuture, FutureExt};
use reqwest::{header, Client, Response};

const NOTION_VERSION: &str = "2022-06-28";
const API_BASE_URL: &str = "https://api.notion.com/v1";

/// A thin wrapper around reqwest Client for Notion API requests.
#[derive(Clone)]
pub struct NotionApiClient {
    client: Client,
    base_url: String,
    options: FetchOptions,
}

impl NotionApiClient {
    /// Creates a new HTTP client with Notion API authentication.
    pub fn new(api_key: &ApiKey, options: FetchOptions) -> Result<Self, AppError> {
        let client = Client::builder()
            .default_headers(Self::create_headers(api_key)?)
            .timeout(options.timeout)
            .user_agent(concat!("notion-exercises/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            client,
            base_url: API_BASE_URL.to_string(),
            options,
        })
    }

    /// Points the client at another API root, e.g. a local mock server.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Creates the default headers for Notion API requests.
    fn create_headers(api_key: &ApiKey) -> Result<header::HeaderMap, AppError> {
        let mut headers = header::HeaderMap::new();

        let auth_header = format!("Bearer {}", api_key.as_str());
        headers.insert(
            header::AUTHORIZATION,
            header::HeaderValue::from_str(&auth_header).map_err(|e| {
                AppError::MissingConfiguration(format!("Invalid API token format: {}", e))
            })?,
        );

        headers.insert(
            "Notion-Version",
            header::HeaderValue::from_static(NOTION_VERSION),
        );

        Ok(headers)
    }

    /// Makes a GET request to the specified endpoint with query parameters.
    async fn get(&self, endpoint: &str, query: &[(&str, String)]) -> Result<Response, FetchError> {
        let url = format!("{}/{}", self.base_url, endpoint);
        log::debug!("GET {}", url);
        Ok(self.client.get(url).query(query).send().await?)
    }

    /// Fetches every child of `parent`, following pagination cursors.
    async fn retrieve_children(&self, parent: &NotionId) -> Result<Vec<Block>, FetchError> {
        let endpoint = format!("blocks/{}/children", parent.to_hyphenated());

        fetch_all_pages(
            &endpoint,
            |page_size, cursor| {
                let endpoint = endpoint.clone();
                async move {
                    let mut query = vec![("page_size", page_size.to_string())];
                    if let Some(cursor) = cursor {
                        query.push(("start_cursor", cursor));
                    }
                    let response = self.get(&endpoint, &query).await?;
                    let result = extract_response_text(response).await?;
                    parse_blocks_pagination(result)
                }
            },
            self.options.max_pages,
        )
        .await
    }

    /// Fetches children and, while `depth` allows, their nested children.
    ///
    /// Child pages are separate documents and are never descended into.
    fn retrieve_tree<'a>(
        &'a self,
        parent: &'a NotionId,
        depth: u8,
    ) -> BoxFuture<'a, Result<Vec<Block>, FetchError>> {
        async move {
            let mut blocks = self.retrieve_children(parent).await?;
            if depth == 0 {
                return Ok(blocks);
            }

            for block in blocks.iter_mut() {
                let descend = block.common.has_children
                    && !matches!(block.kind, BlockKind::ChildPage { .. });
                if descend {
                    let id = block.id().clone();
                    block.common.children = self.retrieve_tree(&id, depth - 1).await?;
                }
            }

            Ok(blocks)
        }
        .boxed()
    }
}

#[async_trait::async_trait]
impl BlockSource for NotionApiClient {
    async fn fetch_blocks(&self, page: &PageReference) -> Result<Vec<Block>, FetchError> {
        log::info!(
            "Fetching blocks of {} from the Notion API (child depth {})",
            page.page_id(),
            self.options.depth
        );
        let blocks = self.retrieve_tree(page.page_id(), self.options.depth).await?;
        log::info!("Fetched {} top-level blocks", blocks.len());
        Ok(blocks)
    }
}
