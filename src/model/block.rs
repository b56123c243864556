use super::rich_text::{plain_text_of, RichTextItem};
use crate::types::NotionId;
use serde::{Deserialize, Serialize};

/// Common fields for all blocks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockCommon {
    pub id: NotionId,
    pub has_children: bool,
    pub children: Vec<Block>,
}

impl BlockCommon {
    pub fn new(id: NotionId) -> Self {
        Self {
            id,
            has_children: false,
            children: Vec::new(),
        }
    }
}

impl Default for BlockCommon {
    fn default() -> Self {
        Self::new(NotionId::new_v4())
    }
}

/// What a block is, together with its type-specific payload.
///
/// Anything the parsers do not recognise lands in `Unsupported`, carrying
/// the raw type name and whatever text could be recovered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum BlockKind {
    Paragraph { text: Vec<RichTextItem> },
    Heading { level: u8, text: Vec<RichTextItem> },
    BulletedListItem { text: Vec<RichTextItem> },
    NumberedListItem { text: Vec<RichTextItem> },
    ToDo { text: Vec<RichTextItem>, checked: bool },
    Toggle { text: Vec<RichTextItem> },
    Quote { text: Vec<RichTextItem> },
    Callout { text: Vec<RichTextItem> },
    Code { text: Vec<RichTextItem>, language: Option<String> },
    Divider,
    ChildPage { title: String },
    Unsupported { block_type: String, text: Vec<RichTextItem> },
}

/// One node of a Notion page tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub common: BlockCommon,
    pub kind: BlockKind,
}

impl Block {
    pub fn new(kind: BlockKind) -> Self {
        Self {
            common: BlockCommon::default(),
            kind,
        }
    }

    /// Set children
    pub fn with_children(mut self, children: Vec<Block>) -> Self {
        self.common.has_children = !children.is_empty();
        self.common.children = children;
        self
    }

    pub fn paragraph(text: &str) -> Self {
        Self::new(BlockKind::Paragraph {
            text: vec![RichTextItem::plain_text(text)],
        })
    }

    pub fn divider() -> Self {
        Self::new(BlockKind::Divider)
    }

    pub fn id(&self) -> &NotionId {
        &self.common.id
    }

    pub fn children(&self) -> &[Block] {
        &self.common.children
    }

    pub fn is_divider(&self) -> bool {
        matches!(self.kind, BlockKind::Divider)
    }

    /// Get block type name, as Notion spells it
    pub fn block_type(&self) -> &str {
        match &self.kind {
            BlockKind::Paragraph { .. } => "paragraph",
            BlockKind::Heading { level: 1, .. } => "heading_1",
            BlockKind::Heading { level: 2, .. } => "heading_2",
            BlockKind::Heading { .. } => "heading_3",
            BlockKind::BulletedListItem { .. } => "bulleted_list_item",
            BlockKind::NumberedListItem { .. } => "numbered_list_item",
            BlockKind::ToDo { .. } => "to_do",
            BlockKind::Toggle { .. } => "toggle",
            BlockKind::Quote { .. } => "quote",
            BlockKind::Callout { .. } => "callout",
            BlockKind::Code { .. } => "code",
            BlockKind::Divider => "divider",
            BlockKind::ChildPage { .. } => "child_page",
            BlockKind::Unsupported { block_type, .. } => block_type.as_str(),
        }
    }

    /// The rich text this block carries, if its kind has any.
    pub fn rich_text(&self) -> Option<&[RichTextItem]> {
        match &self.kind {
            BlockKind::Paragraph { text }
            | BlockKind::Heading { text, .. }
            | BlockKind::BulletedListItem { text }
            | BlockKind::NumberedListItem { text }
            | BlockKind::ToDo { text, .. }
            | BlockKind::Toggle { text }
            | BlockKind::Quote { text }
            | BlockKind::Callout { text }
            | BlockKind::Code { text, .. }
            | BlockKind::Unsupported { text, .. } => Some(text.as_slice()),
            BlockKind::Divider | BlockKind::ChildPage { .. } => None,
        }
    }

    /// The block's textual content with styling dropped.
    pub fn plain_text(&self) -> String {
        match &self.kind {
            BlockKind::ChildPage { title } => title.clone(),
            _ => self.rich_text().map(plain_text_of).unwrap_or_default(),
        }
    }
}
