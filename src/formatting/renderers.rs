// src/formatting/renderers.rs
//! Block renderers for the two exercise output styles.

use super::state::RenderState;
use crate::error::AppError;
use crate::model::{Block, BlockKind};

/// The result of rendering a single block: content plus the state for the next sibling.
#[derive(Debug, Clone)]
pub struct BlockRenderResult {
    pub content: String,
    pub state: RenderState,
}

/// Trait for formatting blocks into output strings.
pub trait BlockRenderer {
    /// Format a block, its children included.
    fn render_block(&self, block: &Block, state: RenderState)
        -> Result<BlockRenderResult, AppError>;

    /// Format sibling blocks in order, threading state through them.
    fn render_children(
        &self,
        blocks: &[Block],
        state: RenderState,
    ) -> Result<Vec<BlockRenderResult>, AppError> {
        let mut results = Vec::with_capacity(blocks.len());
        let mut current = state;

        for block in blocks {
            let result = self.render_block(block, current)?;
            current = result.state;
            results.push(result);
        }

        Ok(results)
    }
}

/// Text shown for a block of a kind the renderers have no rule for.
///
/// Strict mode refuses such blocks instead.
fn fallback_text(block: &Block, state: RenderState, strict: bool) -> Result<String, AppError> {
    if strict {
        return Err(AppError::UnexpectedBlock {
            block_type: block.block_type().to_string(),
            exercise: state.exercise + 1,
        });
    }

    log::debug!(
        "Rendering unsupported block '{}' with fallback text",
        block.block_type()
    );

    let text = block.plain_text();
    if text.trim().is_empty() {
        Ok(format!("[{}]", block.block_type()))
    } else {
        Ok(text)
    }
}

fn non_empty(text: String) -> Option<String> {
    if text.trim().is_empty() {
        None
    } else {
        Some(text)
    }
}

/// One task per line; children indented below their parent.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainRenderer {
    pub strict: bool,
}

impl PlainRenderer {
    fn own_line(
        &self,
        block: &Block,
        state: RenderState,
    ) -> Result<(Option<String>, RenderState), AppError> {
        let text = block.plain_text();

        if let BlockKind::NumberedListItem { .. } = block.kind {
            return Ok(match non_empty(text) {
                Some(text) => {
                    let (number, next) = state.next_number();
                    (Some(format!("{}. {}", number, text)), next)
                }
                None => (None, state),
            });
        }

        let line = match &block.kind {
            BlockKind::Paragraph { .. }
            | BlockKind::Toggle { .. }
            | BlockKind::Callout { .. }
            | BlockKind::ChildPage { .. } => non_empty(text),
            BlockKind::Heading { level, .. } => {
                non_empty(text).map(|t| format!("{} {}", "#".repeat(*level as usize), t))
            }
            BlockKind::BulletedListItem { .. } => non_empty(text).map(|t| format!("- {}", t)),
            BlockKind::ToDo { checked, .. } => {
                let mark = if *checked { "[x]" } else { "[ ]" };
                non_empty(text).map(|t| format!("{} {}", mark, t))
            }
            BlockKind::Quote { .. } => non_empty(text).map(|t| format!("> {}", t)),
            BlockKind::Code { language, .. } => non_empty(text).map(|t| {
                format!("```{}\n{}\n```", language.as_deref().unwrap_or(""), t)
            }),
            BlockKind::Divider => Some("---".to_string()),
            BlockKind::Unsupported { .. } => Some(fallback_text(block, state, self.strict)?),
            BlockKind::NumberedListItem { .. } => None,
        };

        Ok((line, state.end_list()))
    }
}

impl BlockRenderer for PlainRenderer {
    fn render_block(
        &self,
        block: &Block,
        state: RenderState,
    ) -> Result<BlockRenderResult, AppError> {
        let (line, next) = self.own_line(block, state)?;
        let indent = state.indent();

        let mut lines: Vec<String> = line
            .map(|line| {
                line.lines()
                    .map(|l| format!("{}{}", indent, l))
                    .collect::<Vec<_>>()
            })
            .unwrap_or_default();

        let children = self.render_children(block.children(), state.enter_children())?;
        lines.extend(
            children
                .into_iter()
                .map(|child| child.content)
                .filter(|content| !content.is_empty()),
        );

        Ok(BlockRenderResult {
            content: lines.join("\n"),
            state: next,
        })
    }
}

/// Quill-compatible HTML: headings as `<h3>`, code as `<pre class="ql-syntax">`,
/// every other line followed by `<br>`. Child pages are left out.
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlRenderer {
    pub strict: bool,
}

impl BlockRenderer for HtmlRenderer {
    fn render_block(
        &self,
        block: &Block,
        state: RenderState,
    ) -> Result<BlockRenderResult, AppError> {
        let text = block.plain_text();

        let own = match &block.kind {
            BlockKind::Heading { .. } => {
                non_empty(text).map(|t| format!("<h3>{}</h3>", escape_html(&t)))
            }
            BlockKind::Code { .. } => non_empty(text)
                .map(|t| format!("<pre class=\"ql-syntax\">{}</pre>", escape_html(&t))),
            BlockKind::Divider => Some("<hr>".to_string()),
            // Sub-pages are separate documents, not tasks
            BlockKind::ChildPage { .. } => None,
            BlockKind::Unsupported { .. } => {
                let t = fallback_text(block, state, self.strict)?;
                Some(format!("{}<br>", escape_html(&t)))
            }
            _ => non_empty(text).map(|t| format!("{}<br>", escape_html(&t))),
        };

        let mut content = own.unwrap_or_default();
        for child in self.render_children(block.children(), state.enter_children())? {
            content.push_str(&child.content);
        }

        Ok(BlockRenderResult { content, state })
    }
}

/// Escapes the characters that would otherwise open markup.
fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RichTextItem;

    fn text(s: &str) -> Vec<RichTextItem> {
        vec![RichTextItem::plain_text(s)]
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("a < b && c"), "a &lt; b &amp;&amp; c");
    }

    #[test]
    fn test_plain_numbered_list_counts_siblings() {
        let blocks = vec![
            Block::new(BlockKind::NumberedListItem { text: text("one") }),
            Block::new(BlockKind::NumberedListItem { text: text("two") }),
            Block::paragraph("break"),
            Block::new(BlockKind::NumberedListItem { text: text("again") }),
        ];
        let results = PlainRenderer::default()
            .render_children(&blocks, RenderState::default())
            .unwrap();
        let lines: Vec<_> = results.into_iter().map(|r| r.content).collect();
        assert_eq!(lines, vec!["1. one", "2. two", "break", "1. again"]);
    }

    #[test]
    fn test_plain_children_are_indented() {
        let block = Block::new(BlockKind::BulletedListItem { text: text("parent") })
            .with_children(vec![Block::new(BlockKind::BulletedListItem {
                text: text("child"),
            })]);
        let result = PlainRenderer::default()
            .render_block(&block, RenderState::default())
            .unwrap();
        assert_eq!(result.content, "- parent\n  - child");
    }

    #[test]
    fn test_plain_code_is_fenced() {
        let block = Block::new(BlockKind::Code {
            text: text("fn main() {}"),
            language: Some("rust".to_string()),
        });
        let result = PlainRenderer::default()
            .render_block(&block, RenderState::default())
            .unwrap();
        assert_eq!(result.content, "```rust\nfn main() {}\n```");
    }

    #[test]
    fn test_strict_mode_rejects_unsupported() {
        let block = Block::new(BlockKind::Unsupported {
            block_type: "image".to_string(),
            text: vec![],
        });
        let err = PlainRenderer { strict: true }
            .render_block(&block, RenderState::for_exercise(1))
            .unwrap_err();
        match err {
            AppError::UnexpectedBlock {
                block_type,
                exercise,
            } => {
                assert_eq!(block_type, "image");
                assert_eq!(exercise, 2);
            }
            other => panic!("Expected UnexpectedBlock, got {other:?}"),
        }
    }

    #[test]
    fn test_html_matches_quill_markup() {
        let blocks = vec![
            Block::new(BlockKind::Heading {
                level: 1,
                text: text("Task 1"),
            }),
            Block::paragraph("Sum two numbers"),
            Block::new(BlockKind::Code {
                text: text("a + b"),
                language: None,
            }),
        ];
        let content: String = HtmlRenderer::default()
            .render_children(&blocks, RenderState::default())
            .unwrap()
            .into_iter()
            .map(|r| r.content)
            .collect();
        assert_eq!(
            content,
            "<h3>Task 1</h3>Sum two numbers<br><pre class=\"ql-syntax\">a + b</pre>"
        );
    }

    #[test]
    fn test_html_leaves_out_child_pages() {
        let blocks = vec![
            Block::paragraph("Read the notes"),
            Block::new(BlockKind::ChildPage {
                title: "Week 2".to_string(),
            }),
        ];
        let content: String = HtmlRenderer::default()
            .render_children(&blocks, RenderState::default())
            .unwrap()
            .into_iter()
            .map(|r| r.content)
            .collect();
        assert_eq!(content, "Read the notes<br>");
    }
}
