// src/constants.rs
//! Domain constants that define the operational boundaries of the system.

// ---------------------------------------------------------------------------
// Notion API boundaries
// ---------------------------------------------------------------------------

/// How many blocks the official Notion API returns per page of results.
///
/// The Notion API maximum is 100.
pub const NOTION_API_PAGE_SIZE: u32 = 100;

/// How many records the public `loadPageChunk` endpoint returns per chunk.
pub const PUBLIC_CHUNK_LIMIT: u32 = 50;

/// Upper bound on result pages followed for one block list.
///
/// Reaching it with more content pending is an error, not a truncation.
pub const DEFAULT_MAX_RESULT_PAGES: u32 = 100;

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Deepest child fetch the official API client will attempt.
pub const MAX_CHILD_FETCH_DEPTH: u8 = 10;

// ---------------------------------------------------------------------------
// Formatting boundaries
// ---------------------------------------------------------------------------

/// Number of spaces per nesting level in plain output.
pub const INDENT_SPACES: usize = 2;

/// Estimated characters per block, used to pre-allocate output strings.
pub const CHARS_PER_BLOCK_ESTIMATE: usize = 96;

// ---------------------------------------------------------------------------
// Error display
// ---------------------------------------------------------------------------

/// Maximum characters shown when previewing error response bodies.
pub const ERROR_BODY_PREVIEW_LENGTH: usize = 200;
