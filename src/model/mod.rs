//! Domain model for page content: blocks and the text they carry.

mod block;
mod rich_text;

pub use block::{Block, BlockCommon, BlockKind};
pub use rich_text::{plain_text_of, RichTextItem};
