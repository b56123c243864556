//! Notion API interaction: the ability to read a page's blocks.
//!
//! Two sources implement [`BlockSource`]: the official, token-authenticated
//! API and the public endpoint that serves pages published to the web.

pub mod client;
mod pagination;
pub mod parser;
pub mod public;
mod record_map;
pub mod responses;

use crate::constants::{DEFAULT_MAX_RESULT_PAGES, DEFAULT_TIMEOUT_SECS};
use crate::error::FetchError;
use crate::model::Block;
use crate::types::PageReference;
use std::time::Duration;

pub use client::NotionApiClient;
pub use public::PublicPageClient;
pub use record_map::assemble_page;

/// The ability to read the blocks of a Notion page.
///
/// Business logic depends on this trait, never on HTTP details.
#[async_trait::async_trait]
pub trait BlockSource: Send + Sync {
    /// Returns the page's top-level blocks in document order.
    ///
    /// Any failed request fails the whole fetch; there is no partial result.
    async fn fetch_blocks(&self, page: &PageReference) -> Result<Vec<Block>, FetchError>;
}

/// Limits shared by both block sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchOptions {
    /// Per-request timeout.
    pub timeout: Duration,
    /// Most result pages (or chunks) followed for one listing.
    pub max_pages: u32,
    /// Levels of nested children fetched below the top-level blocks.
    pub depth: u8,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            max_pages: DEFAULT_MAX_RESULT_PAGES,
            depth: 0,
        }
    }
}
