// src/api/public.rs
//! Client for the public `loadPageChunk` endpoint of a Notion site.
//!
//! Pages published to the web can be read without an integration token;
//! the endpoint lives on the page's own domain.

use super::parser::{extract_response_text, parse_api_response};
use super::record_map::assemble_page;
use super::responses::{
    ChunkCursor, LoadPageChunkRequest, LoadPageChunkResponse, PageSelector, RecordMap,
};
use super::{BlockSource, FetchOptions};
use crate::constants::PUBLIC_CHUNK_LIMIT;
use crate::error::{AppError, FetchError};
use crate::model::Block;
use crate::types::PageReference;
use reqwest::Client;

/// Reads published pages through `https://{domain}/api/v3/loadPageChunk`.
#[derive(Clone)]
pub struct PublicPageClient {
    client: Client,
    base_url: Option<String>,
    options: FetchOptions,
}

impl PublicPageClient {
    pub fn new(options: FetchOptions) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(options.timeout)
            .user_agent(concat!("notion-exercises/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            client,
            base_url: None,
            options,
        })
    }

    /// Sends requests to `base_url` instead of the page's own domain.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into().trim_end_matches('/').to_string());
        self
    }

    fn endpoint(&self, page: &PageReference) -> String {
        match &self.base_url {
            Some(base) => format!("{}/api/v3/loadPageChunk", base),
            None => format!("https://{}/api/v3/loadPageChunk", page.domain()),
        }
    }

    async fn load_chunk(
        &self,
        url: &str,
        request: &LoadPageChunkRequest,
    ) -> Result<LoadPageChunkResponse, FetchError> {
        log::debug!("POST {} (chunk {})", url, request.chunk_number);
        let response = self.client.post(url).json(request).send().await?;
        let result = extract_response_text(response).await?;
        parse_api_response(result)
    }

    /// Loads every chunk of the page and merges their block records.
    async fn load_record_map(&self, page: &PageReference) -> Result<RecordMap, FetchError> {
        let url = self.endpoint(page);
        let mut records = RecordMap::default();
        let mut cursor = ChunkCursor::default();
        let mut chunk_number = 0u32;

        loop {
            if chunk_number >= self.options.max_pages {
                log::warn!("Reached maximum chunk limit: {}", self.options.max_pages);
                return Err(FetchError::PaginationLimit {
                    max_pages: self.options.max_pages,
                });
            }

            let request = LoadPageChunkRequest {
                page: PageSelector {
                    id: page.page_id().to_hyphenated(),
                },
                limit: PUBLIC_CHUNK_LIMIT,
                cursor,
                chunk_number,
                vertical_columns: false,
            };

            let response = self.load_chunk(&url, &request).await?;
            records.block.extend(response.record_map.block);
            chunk_number += 1;

            log::debug!(
                "Loaded chunk {} ({} records so far)",
                chunk_number,
                records.block.len()
            );

            if response.cursor.stack.is_empty() {
                break;
            }
            cursor = response.cursor;
        }

        Ok(records)
    }
}

#[async_trait::async_trait]
impl BlockSource for PublicPageClient {
    async fn fetch_blocks(&self, page: &PageReference) -> Result<Vec<Block>, FetchError> {
        log::info!("Fetching public page {}", page);
        let records = self.load_record_map(page).await?;
        let blocks = assemble_page(&records, page.page_id());
        log::info!(
            "Assembled {} top-level blocks from {} records",
            blocks.len(),
            records.block.len()
        );
        Ok(blocks)
    }
}
