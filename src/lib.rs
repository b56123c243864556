// src/lib.rs
//! notion-exercises library - extracts divider-separated exercises from Notion pages.
//!
//! # Public API
//!
//! The library exposes types organized by concern:
//! - **Error handling** - `AppError`, `FetchError`, `ValidationError`
//! - **Configuration** - `CommandLineInput`, `RunConfig`
//! - **Domain model** - `Block`, `BlockKind`, `RichTextItem`
//! - **Domain types** - `PageReference`, `NotionId`, `ApiKey`
//! - **API client** - `BlockSource`, `NotionApiClient`, `PublicPageClient`
//! - **Exercises** - `split_exercises`, `format_exercises`

pub mod api;
pub mod config;
pub mod constants;
pub mod error;
pub mod exercises;
pub mod formatting;
pub mod model;
pub mod output;
pub mod pipeline;
pub mod types;

// --- Error Handling ---
pub use crate::error::{AppError, FetchError, NotionErrorCode};
pub use crate::types::ValidationError;

// --- Configuration ---
pub use crate::config::{CommandLineInput, RunConfig, SourceConfig, SourceKind};

// --- Domain Model ---
pub use crate::model::{Block, BlockCommon, BlockKind, RichTextItem};

// --- Domain Types ---
pub use crate::types::{ApiKey, NotionId, PageReference, RenderedExercise};

// --- API Client ---
pub use crate::api::{BlockSource, FetchOptions, NotionApiClient, PublicPageClient};

// --- Exercises ---
pub use crate::exercises::{split_exercises, Exercise, ExerciseSplit};
pub use crate::formatting::{format_exercise, format_exercises, FormatOptions, FormatStyle};

// --- Output ---
pub use crate::output::{render_document, OutputFormat};

// --- Pipeline ---
pub use crate::pipeline::{extract_exercises, ContentSource, ExerciseComposer, ExerciseDelivery};
