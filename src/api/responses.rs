// src/api/responses.rs
//! Wire types for the two Notion endpoints this crate reads from.
//!
//! Block payloads stay as raw JSON here; `parser` and `record_map` turn
//! them into the tagged [`crate::model::BlockKind`].

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub use notion_client::objects::error::Error as NotionError;

/// Generic paginated response from the official API.
#[derive(Debug, Clone, Deserialize)]
pub struct PaginatedResponse<T> {
    #[serde(default)]
    pub object: String,
    pub results: Vec<T>,
    pub next_cursor: Option<String>,
    #[serde(default)]
    pub has_more: bool,
}

/// A block object from `GET /v1/blocks/{id}/children`.
///
/// The type-specific payload lives under a key named after the block type,
/// e.g. `"paragraph": {"rich_text": [...]}`; it is kept in `payloads`.
#[derive(Debug, Clone, Deserialize)]
pub struct RawBlock {
    pub id: String,
    #[serde(rename = "type")]
    pub block_type: String,
    #[serde(default)]
    pub has_children: bool,
    #[serde(flatten)]
    pub payloads: Map<String, Value>,
}

impl RawBlock {
    /// The payload object for this block's own type.
    pub fn payload(&self) -> Option<&Value> {
        self.payloads.get(&self.block_type)
    }
}

/// One run of rich text from the official API.
#[derive(Debug, Clone, Deserialize)]
pub struct RawRichText {
    #[serde(default)]
    pub plain_text: String,
    pub href: Option<String>,
}

/// Request body for the public `loadPageChunk` endpoint.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadPageChunkRequest {
    pub page: PageSelector,
    pub limit: u32,
    pub cursor: ChunkCursor,
    pub chunk_number: u32,
    pub vertical_columns: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct PageSelector {
    pub id: String,
}

/// Continuation cursor of the public endpoint; an empty stack means done.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ChunkCursor {
    #[serde(default)]
    pub stack: Vec<Value>,
}

/// Response of the public `loadPageChunk` endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadPageChunkResponse {
    pub record_map: RecordMap,
    #[serde(default)]
    pub cursor: ChunkCursor,
}

/// The records returned by `loadPageChunk`, in the order Notion sent them.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecordMap {
    #[serde(default)]
    pub block: IndexMap<String, RecordEntry>,
}

/// A record wrapper. Notion has shipped both `{value: {...}}` and
/// `{value: {value: {...}, role}}` shapes; see [`RecordEntry::record`].
#[derive(Debug, Clone, Deserialize)]
pub struct RecordEntry {
    pub value: Option<Value>,
}

impl RecordEntry {
    /// The block record itself, unwrapping the doubly nested shape.
    pub fn record(&self) -> Option<BlockRecord> {
        let value = self.value.as_ref()?;
        let inner = match value.get("value") {
            Some(nested) if value.get("type").is_none() => nested,
            _ => value,
        };
        serde_json::from_value(inner.clone()).ok()
    }
}

/// A block record from the public endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct BlockRecord {
    pub id: String,
    #[serde(rename = "type")]
    pub block_type: String,
    #[serde(default)]
    pub properties: Option<Map<String, Value>>,
    #[serde(default)]
    pub content: Vec<String>,
    #[serde(default = "default_alive")]
    pub alive: bool,
}

fn default_alive() -> bool {
    true
}
