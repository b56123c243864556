// src/main.rs

use anyhow::Context;
use clap::Parser;
use log::LevelFilter;
use log4rs::{
    append::console::{ConsoleAppender, Target},
    append::file::FileAppender,
    config::{Appender, Root},
    encode::pattern::PatternEncoder,
    filter::threshold::ThresholdFilter,
    Config,
};
use notion_exercises::api::{BlockSource, NotionApiClient, PublicPageClient};
use notion_exercises::output::{self, DeliveryTarget, OutputPlan, OutputReport};
use notion_exercises::{
    format_exercises, render_document, AppError, Block, CommandLineInput, ContentSource,
    ExerciseComposer, ExerciseDelivery, PageReference, RenderedExercise, RunConfig, SourceConfig,
};
use std::fs;

/// Sets up logging configuration.
///
/// Console output goes to stderr so exercises printed to stdout stay clean.
fn setup_logging(verbose: bool) -> anyhow::Result<()> {
    let log_level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };

    let log_file_path = std::env::temp_dir().join("notion_exercises.log");
    if let Some(parent) = log_file_path.parent() {
        fs::create_dir_all(parent)?;
    }

    let pattern = if verbose {
        "{d(%Y-%m-%d %H:%M:%S)} [{l}] - {m}{n}"
    } else {
        "{m}{n}"
    };

    let stderr_appender = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new(pattern)))
        .build();

    let file_appender = FileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(
            "{d(%Y-%m-%d %H:%M:%S)} [{l}] - {m}{n}",
        )))
        .build(&log_file_path)?;

    let config = Config::builder()
        .appender(
            Appender::builder()
                .filter(Box::new(ThresholdFilter::new(log_level)))
                .build("stderr", Box::new(stderr_appender)),
        )
        .appender(Appender::builder().build("file", Box::new(file_appender)))
        .build(
            Root::builder()
                .appender("stderr")
                .appender("file")
                .build(LevelFilter::Debug),
        )?;

    log4rs::init_config(config)?;
    log::info!("Logging initialized. Log file: {}", log_file_path.display());
    Ok(())
}

/// Executes the pipeline: fetch → split and format → deliver.
async fn execute_pipeline(config: &RunConfig) -> Result<OutputReport, AppError> {
    let pipeline = ExerciseExtraction::new(config);

    let blocks = pipeline.fetch(&config.page).await?;
    let exercises = pipeline.compose(&blocks)?;
    pipeline.deliver(&exercises)
}

/// Orchestrates retrieval, formatting, and delivery of a page's exercises.
struct ExerciseExtraction<'a> {
    config: &'a RunConfig,
}

impl<'a> ExerciseExtraction<'a> {
    fn new(config: &'a RunConfig) -> Self {
        Self { config }
    }

    /// Builds the block source the configuration asks for.
    fn block_source(&self) -> Result<Box<dyn BlockSource>, AppError> {
        Ok(match &self.config.source {
            SourceConfig::Api(api_key) => {
                log::info!("Using the Notion API with key {}", api_key);
                Box::new(NotionApiClient::new(api_key, self.config.fetch)?)
            }
            SourceConfig::Public => {
                log::info!("Using the public page endpoint on {}", self.config.page.domain());
                Box::new(PublicPageClient::new(self.config.fetch)?)
            }
        })
    }
}

#[async_trait::async_trait]
impl ContentSource for ExerciseExtraction<'_> {
    async fn fetch(&self, page: &PageReference) -> Result<Vec<Block>, AppError> {
        log::info!("Retrieving content for {}", page);
        let source = self.block_source()?;
        Ok(source.fetch_blocks(page).await?)
    }
}

impl ExerciseComposer for ExerciseExtraction<'_> {
    fn compose(&self, blocks: &[Block]) -> Result<Vec<RenderedExercise>, AppError> {
        let exercises = format_exercises(blocks, &self.config.format)?;
        let empty = exercises.iter().filter(|e| e.is_empty()).count();
        log::info!(
            "Extracted {} exercises ({} empty) from {} blocks",
            exercises.len(),
            empty,
            blocks.len()
        );
        Ok(exercises)
    }
}

impl ExerciseDelivery for ExerciseExtraction<'_> {
    fn deliver(&self, exercises: &[RenderedExercise]) -> Result<OutputReport, AppError> {
        let content = render_document(exercises, self.config.output_format)?;

        let target = match &self.config.output_file {
            Some(path) => DeliveryTarget::WriteFile {
                path: path.clone(),
                content,
            },
            None => DeliveryTarget::PrintToStdout { content },
        };

        let report = output::deliver(OutputPlan::new().with_operation(target));

        if !report.is_success() {
            return Err(AppError::DeliveryFailed {
                failures: report.failed.iter().map(|f| f.error.clone()).collect(),
            });
        }

        Ok(report)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CommandLineInput::parse();

    setup_logging(cli.verbose).context("failed to initialize logging")?;

    let config = RunConfig::resolve(cli)?;

    let report = match execute_pipeline(&config).await {
        Ok(report) => report,
        Err(e) => {
            if let AppError::Fetch(fetch) = &e {
                if fetch.notion_code().is_some_and(|code| code.is_transient()) {
                    eprintln!("Notion may be temporarily unavailable; try again shortly.");
                }
            }
            return Err(e.into());
        }
    };

    for completed in &report.completed {
        if let DeliveryTarget::WriteFile { path, .. } = &completed.operation {
            eprintln!("✓ Exercises saved to {}", path.display());
        }
    }

    Ok(())
}
