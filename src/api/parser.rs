// src/api/parser.rs
//! Turns HTTP responses into domain blocks.
//!
//! Status handling and error-body classification live here so both
//! clients share one definition of "the fetch failed".

use super::responses::{NotionError, PaginatedResponse, RawBlock, RawRichText};
use crate::constants::ERROR_BODY_PREVIEW_LENGTH;
use crate::error::{FetchError, NotionErrorCode};
use crate::model::{Block, BlockCommon, BlockKind, RichTextItem};
use crate::types::NotionId;
use reqwest::{Response, StatusCode};
use serde_json::Value;

/// Result of an HTTP operation with response metadata.
#[derive(Debug)]
pub struct ApiResponse<T> {
    pub data: T,
    pub status: StatusCode,
    pub url: String,
}

/// Extracts the response body as text with metadata.
pub async fn extract_response_text(response: Response) -> Result<ApiResponse<String>, FetchError> {
    let status = response.status();
    let url = response.url().to_string();
    let text = response.text().await?;

    Ok(ApiResponse {
        data: text,
        status,
        url,
    })
}

/// Parse any Notion response, mapping non-success statuses to [`FetchError::Api`].
pub fn parse_api_response<T>(result: ApiResponse<String>) -> Result<T, FetchError>
where
    T: serde::de::DeserializeOwned,
{
    if !result.status.is_success() {
        return Err(parse_error_response(
            &result.data,
            result.status,
            &result.url,
        ));
    }

    serde_json::from_str(&result.data).map_err(|e| {
        log::error!("Failed to parse response from {}: {}", result.url, e);
        FetchError::MalformedResponse {
            url: result.url.clone(),
            reason: format!("{} (body: {})", e, preview(&result.data)),
        }
    })
}

/// Classifies an error body, falling back to the bare HTTP status.
fn parse_error_response(body: &str, status: StatusCode, url: &str) -> FetchError {
    if let Ok(notion_error) = serde_json::from_str::<NotionError>(body) {
        log::warn!(
            "Notion API error {} from {}: {}",
            notion_error.code,
            url,
            notion_error.message
        );
        return FetchError::Api {
            code: NotionErrorCode::from_api_response(&notion_error.code),
            message: notion_error.message,
            status,
        };
    }

    log::warn!("HTTP {} from {}: {}", status, url, preview(body));
    FetchError::Api {
        code: NotionErrorCode::from_http_status(status.as_u16()),
        message: format!("HTTP {} from {}", status, url),
        status,
    }
}

fn preview(body: &str) -> String {
    if body.chars().count() > ERROR_BODY_PREVIEW_LENGTH {
        let cut: String = body.chars().take(ERROR_BODY_PREVIEW_LENGTH).collect();
        format!("{}...", cut)
    } else {
        body.to_string()
    }
}

/// Parses one page of `blocks/{id}/children` into domain blocks.
pub fn parse_blocks_pagination(
    result: ApiResponse<String>,
) -> Result<PaginatedResponse<Block>, FetchError> {
    let url = result.url.clone();
    let response: PaginatedResponse<RawBlock> = parse_api_response(result)?;

    let blocks = response
        .results
        .into_iter()
        .map(|raw| convert_block(raw, &url))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(PaginatedResponse {
        object: response.object,
        results: blocks,
        next_cursor: response.next_cursor,
        has_more: response.has_more,
    })
}

/// Converts an official API block into the domain model.
///
/// Unknown types never fail here; they become [`BlockKind::Unsupported`]
/// with whatever caption or rich text the payload carried.
pub fn convert_block(raw: RawBlock, url: &str) -> Result<Block, FetchError> {
    let id = NotionId::parse(&raw.id).map_err(|e| FetchError::MalformedResponse {
        url: url.to_string(),
        reason: format!("block id '{}': {}", raw.id, e),
    })?;

    let payload = raw.payload();
    let text = payload
        .map(|p| rich_text_field(p, "rich_text"))
        .unwrap_or_default();

    let kind = match raw.block_type.as_str() {
        "paragraph" => BlockKind::Paragraph { text },
        "heading_1" => BlockKind::Heading { level: 1, text },
        "heading_2" => BlockKind::Heading { level: 2, text },
        "heading_3" => BlockKind::Heading { level: 3, text },
        "bulleted_list_item" => BlockKind::BulletedListItem { text },
        "numbered_list_item" => BlockKind::NumberedListItem { text },
        "to_do" => BlockKind::ToDo {
            text,
            checked: payload
                .and_then(|p| p.get("checked"))
                .and_then(Value::as_bool)
                .unwrap_or(false),
        },
        "toggle" => BlockKind::Toggle { text },
        "quote" => BlockKind::Quote { text },
        "callout" => BlockKind::Callout { text },
        "code" => BlockKind::Code {
            text,
            language: payload
                .and_then(|p| p.get("language"))
                .and_then(Value::as_str)
                .map(str::to_string),
        },
        "divider" => BlockKind::Divider,
        "child_page" => BlockKind::ChildPage {
            title: payload
                .and_then(|p| p.get("title"))
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
        },
        other => {
            let text = if text.is_empty() {
                payload
                    .map(|p| rich_text_field(p, "caption"))
                    .unwrap_or_default()
            } else {
                text
            };
            log::debug!("Block {} has unsupported type '{}'", raw.id, other);
            BlockKind::Unsupported {
                block_type: other.to_string(),
                text,
            }
        }
    };

    let mut common = BlockCommon::new(id);
    common.has_children = raw.has_children;

    Ok(Block { common, kind })
}

/// Reads a rich text array field, skipping segments that fail to parse.
fn rich_text_field(payload: &Value, field: &str) -> Vec<RichTextItem> {
    let Some(items) = payload.get(field).and_then(Value::as_array) else {
        return Vec::new();
    };

    items
        .iter()
        .filter_map(|item| serde_json::from_value::<RawRichText>(item.clone()).ok())
        .map(|raw| RichTextItem {
            plain_text: raw.plain_text,
            href: raw.href,
        })
        .collect()
}
