// src/output/document.rs
//! Lays out rendered exercises as the final output document.

use crate::error::AppError;
use crate::types::RenderedExercise;

/// Shape of the final document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// `== Block N ==` sections, one per exercise
    #[default]
    Sections,
    /// A JSON array of exercise strings
    Json,
}

/// Renders every exercise into one document.
pub fn render_document(
    exercises: &[RenderedExercise],
    format: OutputFormat,
) -> Result<String, AppError> {
    match format {
        OutputFormat::Sections => Ok(exercises
            .iter()
            .enumerate()
            .map(|(i, exercise)| {
                format!("== Block {} ==\n{}\n== End of block ==\n\n", i + 1, exercise)
            })
            .collect()),
        OutputFormat::Json => {
            let items: Vec<&str> = exercises.iter().map(RenderedExercise::as_str).collect();
            let mut json = serde_json::to_string_pretty(&items)?;
            json.push('\n');
            Ok(json)
        }
    }
}
