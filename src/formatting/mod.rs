// src/formatting/mod.rs
//! Renders exercises into display strings.

mod renderers;
mod state;

pub use renderers::{BlockRenderResult, BlockRenderer, HtmlRenderer, PlainRenderer};
pub use state::RenderState;

use crate::constants::CHARS_PER_BLOCK_ESTIMATE;
use crate::error::AppError;
use crate::exercises::{split_exercises, Exercise};
use crate::model::Block;
use crate::types::RenderedExercise;

/// How exercises are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum FormatStyle {
    /// One task per line, children indented
    #[default]
    Plain,
    /// Quill editor HTML, tasks concatenated
    Html,
}

/// Options for rendering exercises.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FormatOptions {
    pub style: FormatStyle,
    /// Fail on block types without a rendering rule instead of falling back.
    pub strict: bool,
}

/// Renders one exercise, keeping block order.
pub fn format_exercise(
    exercise: &Exercise<'_>,
    options: &FormatOptions,
) -> Result<RenderedExercise, AppError> {
    let state = RenderState::for_exercise(exercise.index);

    let results = match options.style {
        FormatStyle::Plain => PlainRenderer {
            strict: options.strict,
        }
        .render_children(exercise.tasks, state)?,
        FormatStyle::Html => HtmlRenderer {
            strict: options.strict,
        }
        .render_children(exercise.tasks, state)?,
    };

    let separator = match options.style {
        FormatStyle::Plain => "\n",
        FormatStyle::Html => "",
    };

    let mut output = String::with_capacity(exercise.tasks.len() * CHARS_PER_BLOCK_ESTIMATE);
    for content in results
        .into_iter()
        .map(|result| result.content)
        .filter(|content| !content.is_empty())
    {
        if !output.is_empty() {
            output.push_str(separator);
        }
        output.push_str(&content);
    }

    Ok(RenderedExercise::new(output))
}

/// Splits `blocks` into exercises and renders each of them.
///
/// Fails as a whole when any exercise fails; no partial list is returned.
pub fn format_exercises(
    blocks: &[Block],
    options: &FormatOptions,
) -> Result<Vec<RenderedExercise>, AppError> {
    let exercises = split_exercises(blocks);
    log::debug!(
        "Formatting {} exercises from {} blocks",
        exercises.len(),
        blocks.len()
    );

    exercises
        .map(|exercise| format_exercise(&exercise, options))
        .collect()
}
