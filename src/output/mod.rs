//! Output handling with clear separation of planning and execution.
//!
//! Planning (building the document and the list of targets) is pure; only
//! `writer` touches stdout or the filesystem.

mod document;
mod types;
mod writer;

pub use document::{render_document, OutputFormat};
pub use types::{DeliveryTarget, OutputPlan, OutputReport};
pub use writer::deliver;
