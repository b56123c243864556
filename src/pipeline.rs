// src/pipeline.rs
//! Pipeline capability traits and the one-call extraction entry point.
//!
//! Each trait describes a single stage, so stages can be tested in isolation.

use crate::api::BlockSource;
use crate::error::AppError;
use crate::formatting::{format_exercises, FormatOptions};
use crate::model::Block;
use crate::output::OutputReport;
use crate::types::{PageReference, RenderedExercise};

/// Retrieves the blocks of a page.
#[async_trait::async_trait]
pub trait ContentSource {
    async fn fetch(&self, page: &PageReference) -> Result<Vec<Block>, AppError>;
}

/// Turns a page's blocks into rendered exercises.
pub trait ExerciseComposer {
    fn compose(&self, blocks: &[Block]) -> Result<Vec<RenderedExercise>, AppError>;
}

/// Delivers rendered exercises to their destinations.
pub trait ExerciseDelivery {
    fn deliver(&self, exercises: &[RenderedExercise]) -> Result<OutputReport, AppError>;
}

/// Fetches a page and returns its formatted exercises.
///
/// Nothing is returned unless every stage succeeds.
pub async fn extract_exercises(
    source: &dyn BlockSource,
    page: &PageReference,
    options: &FormatOptions,
) -> Result<Vec<RenderedExercise>, AppError> {
    let blocks = source.fetch_blocks(page).await?;
    format_exercises(&blocks, options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FetchError;
    use crate::types::NotionId;

    struct FixedSource(Vec<Block>);

    #[async_trait::async_trait]
    impl BlockSource for FixedSource {
        async fn fetch_blocks(&self, _page: &PageReference) -> Result<Vec<Block>, FetchError> {
            Ok(self.0.clone())
        }
    }

    struct FailingSource;

    #[async_trait::async_trait]
    impl BlockSource for FailingSource {
        async fn fetch_blocks(&self, _page: &PageReference) -> Result<Vec<Block>, FetchError> {
            Err(FetchError::PaginationLimit { max_pages: 1 })
        }
    }

    fn page() -> PageReference {
        PageReference::new(
            "example.notion.site",
            NotionId::parse("0d91ec8678c64230b81f512855125d52").unwrap(),
        )
    }

    #[tokio::test]
    async fn test_extracts_exercises_from_source() {
        let source = FixedSource(vec![
            Block::paragraph("A"),
            Block::divider(),
            Block::paragraph("B"),
            Block::paragraph("C"),
        ]);
        let exercises = extract_exercises(&source, &page(), &FormatOptions::default())
            .await
            .unwrap();
        let texts: Vec<_> = exercises.iter().map(RenderedExercise::as_str).collect();
        assert_eq!(texts, vec!["A", "B\nC"]);
    }

    #[tokio::test]
    async fn test_fetch_failure_returns_no_exercises() {
        let result = extract_exercises(&FailingSource, &page(), &FormatOptions::default()).await;
        assert!(matches!(result, Err(AppError::Fetch(_))));
    }
}
