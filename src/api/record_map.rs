// src/api/record_map.rs
//! Rebuilds a page's block tree from a `loadPageChunk` record map.
//!
//! Records arrive as a flat id → record map. Document order comes from the
//! page record's `content` list, and recursively from each block's own
//! `content`.

use super::responses::{BlockRecord, RecordMap};
use crate::model::{Block, BlockCommon, BlockKind, RichTextItem};
use crate::types::NotionId;
use indexmap::IndexMap;
use serde_json::{Map, Value};
use std::collections::HashSet;

/// Assembles the top-level blocks of `page_id`, children attached.
///
/// When the page record itself is missing from the map, falls back to every
/// non-page record in the order Notion sent them, without nesting.
pub fn assemble_page(records: &RecordMap, page_id: &NotionId) -> Vec<Block> {
    let index = index_records(records);

    match index.get(page_id) {
        Some(page) => {
            let mut visited = HashSet::from([page_id.clone()]);
            build_children(&index, &page.content, &mut visited)
        }
        None => {
            log::warn!(
                "Page record {} not found in response; using record order",
                page_id
            );
            index
                .iter()
                .filter(|(_, record)| record.alive && record.block_type != "page")
                .map(|(id, record)| convert_record(id.clone(), record))
                .collect()
        }
    }
}

/// Parses every usable record once, keyed by normalized id.
fn index_records(records: &RecordMap) -> IndexMap<NotionId, BlockRecord> {
    records
        .block
        .iter()
        .filter_map(|(key, entry)| {
            let Some(record) = entry.record() else {
                log::debug!("Skipping record {} without a readable value", key);
                return None;
            };
            match NotionId::parse(&record.id) {
                Ok(id) => Some((id, record)),
                Err(e) => {
                    log::debug!("Skipping record with invalid id {}: {}", record.id, e);
                    None
                }
            }
        })
        .collect()
}

fn build_children(
    index: &IndexMap<NotionId, BlockRecord>,
    content: &[String],
    visited: &mut HashSet<NotionId>,
) -> Vec<Block> {
    let mut blocks = Vec::with_capacity(content.len());

    for raw_id in content {
        let Ok(id) = NotionId::parse(raw_id) else {
            log::debug!("Skipping child with invalid id {}", raw_id);
            continue;
        };
        let Some(record) = index.get(&id) else {
            log::debug!("Child {} was not included in the loaded chunks", id);
            continue;
        };
        if !record.alive || !visited.insert(id.clone()) {
            continue;
        }

        let mut block = convert_record(id, record);
        if !matches!(block.kind, BlockKind::ChildPage { .. }) && !record.content.is_empty() {
            let children = build_children(index, &record.content, visited);
            block = block.with_children(children);
        }
        blocks.push(block);
    }

    blocks
}

/// Maps a record's type name and properties onto a tagged block kind.
fn convert_record(id: NotionId, record: &BlockRecord) -> Block {
    let empty = Map::new();
    let properties = record.properties.as_ref().unwrap_or(&empty);
    let text = decode_title(properties.get("title"));

    let kind = match record.block_type.as_str() {
        "text" => BlockKind::Paragraph { text },
        "header" => BlockKind::Heading { level: 1, text },
        "sub_header" => BlockKind::Heading { level: 2, text },
        "sub_sub_header" => BlockKind::Heading { level: 3, text },
        "bulleted_list" => BlockKind::BulletedListItem { text },
        "numbered_list" => BlockKind::NumberedListItem { text },
        "to_do" => BlockKind::ToDo {
            text,
            checked: first_value(properties.get("checked")).as_deref() == Some("Yes"),
        },
        "toggle" => BlockKind::Toggle { text },
        "quote" => BlockKind::Quote { text },
        "callout" => BlockKind::Callout { text },
        "code" => BlockKind::Code {
            text,
            language: first_value(properties.get("language")),
        },
        "divider" => BlockKind::Divider,
        "page" => BlockKind::ChildPage {
            title: crate::model::plain_text_of(&text),
        },
        other => BlockKind::Unsupported {
            block_type: other.to_string(),
            text: if text.is_empty() {
                decode_title(properties.get("caption"))
            } else {
                text
            },
        },
    };

    Block {
        common: BlockCommon::new(id),
        kind,
    }
}

/// Decodes Notion's segment arrays: `[["plain"], ["link", [["a", "https://…"]]]]`.
///
/// Bare strings are accepted as segments too.
fn decode_title(value: Option<&Value>) -> Vec<RichTextItem> {
    let Some(segments) = value.and_then(Value::as_array) else {
        return Vec::new();
    };

    segments
        .iter()
        .filter_map(|segment| match segment {
            Value::String(text) => Some(RichTextItem::plain_text(text)),
            Value::Array(parts) => {
                let text = parts.first()?.as_str()?;
                let href = parts
                    .get(1)
                    .and_then(Value::as_array)
                    .and_then(|decorations| {
                        decorations.iter().find_map(|decoration| {
                            let decoration = decoration.as_array()?;
                            if decoration.first()?.as_str()? == "a" {
                                decoration.get(1)?.as_str().map(str::to_string)
                            } else {
                                None
                            }
                        })
                    });
                Some(RichTextItem {
                    plain_text: text.to_string(),
                    href,
                })
            }
            _ => None,
        })
        .collect()
}

/// The first plain value of a property, e.g. `[["Yes"]]` → `Yes`.
fn first_value(value: Option<&Value>) -> Option<String> {
    decode_title(value)
        .into_iter()
        .next()
        .map(|item| item.plain_text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const PAGE: &str = "0d91ec86-78c6-4230-b81f-512855125d52";

    fn record_map(value: Value) -> RecordMap {
        serde_json::from_value(json!({ "block": value })).unwrap()
    }

    fn page_id() -> NotionId {
        NotionId::parse(PAGE).unwrap()
    }

    #[test]
    fn test_decode_title_with_link_and_bold() {
        let items = decode_title(Some(&json!([
            ["Open "],
            ["the docs", [["b"], ["a", "https://docs.rs"]]],
            "!"
        ])));
        assert_eq!(
            items,
            vec![
                RichTextItem::plain_text("Open "),
                RichTextItem::plain_text("the docs").with_href("https://docs.rs"),
                RichTextItem::plain_text("!"),
            ]
        );
    }

    #[test]
    fn test_assembles_in_content_order_with_children() {
        let records = record_map(json!({
            "00000000-0000-0000-0000-000000000002": {"value": {
                "id": "00000000-0000-0000-0000-000000000002", "type": "text",
                "properties": {"title": [["second"]]}
            }},
            PAGE: {"value": {
                "id": PAGE, "type": "page",
                "properties": {"title": [["Exercises"]]},
                "content": [
                    "00000000-0000-0000-0000-000000000001",
                    "00000000-0000-0000-0000-000000000002"
                ]
            }},
            "00000000-0000-0000-0000-000000000001": {"value": {
                "id": "00000000-0000-0000-0000-000000000001", "type": "toggle",
                "properties": {"title": [["first"]]},
                "content": ["00000000-0000-0000-0000-000000000003"]
            }},
            "00000000-0000-0000-0000-000000000003": {"value": {
                "id": "00000000-0000-0000-0000-000000000003", "type": "to_do",
                "properties": {"title": [["nested"]], "checked": [["Yes"]]}
            }}
        }));

        let blocks = assemble_page(&records, &page_id());
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].plain_text(), "first");
        assert_eq!(blocks[1].plain_text(), "second");
        assert_eq!(
            blocks[0].children()[0].kind,
            BlockKind::ToDo {
                text: vec![RichTextItem::plain_text("nested")],
                checked: true,
            }
        );
    }

    #[test]
    fn test_falls_back_to_record_order_without_page() {
        let records = record_map(json!({
            "00000000-0000-0000-0000-000000000001": {"value": {
                "id": "00000000-0000-0000-0000-000000000001", "type": "header",
                "properties": {"title": [["Task"]]}
            }},
            "00000000-0000-0000-0000-000000000002": {"value": {
                "id": "00000000-0000-0000-0000-000000000002", "type": "divider"
            }},
            "00000000-0000-0000-0000-000000000009": {"value": {
                "id": "00000000-0000-0000-0000-000000000009", "type": "page",
                "properties": {"title": [["Other page"]]}
            }}
        }));

        let blocks = assemble_page(&records, &page_id());
        let types: Vec<_> = blocks.iter().map(Block::block_type).collect();
        assert_eq!(types, vec!["heading_1", "divider"]);
    }

    #[test]
    fn test_cycles_and_missing_children_are_skipped() {
        let records = record_map(json!({
            PAGE: {"value": {
                "id": PAGE, "type": "page",
                "content": [
                    "00000000-0000-0000-0000-000000000001",
                    "00000000-0000-0000-0000-0000000000ff"
                ]
            }},
            "00000000-0000-0000-0000-000000000001": {"value": {
                "id": "00000000-0000-0000-0000-000000000001", "type": "toggle",
                "properties": {"title": [["loop"]]},
                "content": ["00000000-0000-0000-0000-000000000001"]
            }}
        }));

        let blocks = assemble_page(&records, &page_id());
        assert_eq!(blocks.len(), 1);
        assert!(blocks[0].children().is_empty());
    }

    #[test]
    fn test_unknown_record_type_is_unsupported() {
        let block = convert_record(
            page_id(),
            &serde_json::from_value(json!({
                "id": PAGE, "type": "image",
                "properties": {"caption": [["diagram"]]}
            }))
            .unwrap(),
        );
        assert_eq!(block.block_type(), "image");
        assert_eq!(block.plain_text(), "diagram");
    }
}
