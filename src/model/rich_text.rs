use serde::{Deserialize, Serialize};

/// One styled run of text inside a block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RichTextItem {
    pub plain_text: String,
    pub href: Option<String>,
}

impl RichTextItem {
    /// Create a plain text item without a link.
    pub fn plain_text(text: &str) -> Self {
        Self {
            plain_text: text.to_string(),
            href: None,
        }
    }

    pub fn with_href(mut self, href: impl Into<String>) -> Self {
        self.href = Some(href.into());
        self
    }
}

/// Concatenates the plain text of every segment.
pub fn plain_text_of(items: &[RichTextItem]) -> String {
    items.iter().map(|item| item.plain_text.as_str()).collect()
}
