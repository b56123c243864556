// src/config.rs
use crate::api::FetchOptions;
use crate::constants::{DEFAULT_MAX_RESULT_PAGES, DEFAULT_TIMEOUT_SECS, MAX_CHILD_FETCH_DEPTH};
use crate::error::AppError;
use crate::formatting::{FormatOptions, FormatStyle};
use crate::output::OutputFormat;
use crate::types::{ApiKey, PageReference, ValidationError};
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

/// Environment variable holding the Notion integration token.
pub const API_KEY_ENV: &str = "NOTION_API_KEY";

/// Which Notion endpoint to read the page from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum SourceKind {
    /// Official API, authenticated with NOTION_API_KEY
    #[default]
    Api,
    /// Public endpoint of a page published to the web; no token needed
    Public,
}

/// Parsed and validated command-line input.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct CommandLineInput {
    /// Notion page URL (e.g., "https://it-cat.notion.site/0d91ec8678c64230b81f512855125d52")
    pub url: String,

    /// Where to read the page from
    #[arg(long, value_enum, default_value_t = SourceKind::Api)]
    pub source: SourceKind,

    /// How each exercise is rendered
    #[arg(long, value_enum, default_value_t = FormatStyle::Plain)]
    pub format: FormatStyle,

    /// Emit a JSON array of exercises instead of numbered sections
    #[arg(long, default_value_t = false)]
    pub json: bool,

    /// Fail on block types that have no rendering rule
    #[arg(long, default_value_t = false)]
    pub strict: bool,

    /// Levels of nested child blocks to fetch (official API only)
    #[arg(long, default_value_t = 0)]
    pub depth: u8,

    /// Maximum result pages to follow before giving up
    #[arg(long, default_value_t = DEFAULT_MAX_RESULT_PAGES)]
    pub max_pages: u32,

    /// Request timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout: u64,

    /// Write the exercises to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<String>,

    /// Enable verbose logging (debug level)
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}

/// Where blocks come from, with the credential when one is needed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceConfig {
    Api(ApiKey),
    Public,
}

/// Resolved run configuration, validated and ready to drive every stage.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub page: PageReference,
    pub source: SourceConfig,
    pub fetch: FetchOptions,
    pub format: FormatOptions,
    pub output_format: OutputFormat,
    pub output_file: Option<PathBuf>,
    pub verbose: bool,
}

impl RunConfig {
    /// Resolves a complete configuration from CLI input and the environment.
    pub fn resolve(cli: CommandLineInput) -> Result<Self, AppError> {
        Self::resolve_with_key(cli, std::env::var(API_KEY_ENV).ok())
    }

    /// Resolves a configuration with an explicitly supplied API key.
    pub fn resolve_with_key(
        cli: CommandLineInput,
        api_key: Option<String>,
    ) -> Result<Self, AppError> {
        let page = PageReference::parse(&cli.url)?;

        let source = match cli.source {
            SourceKind::Api => {
                let key = api_key.ok_or_else(|| {
                    AppError::MissingConfiguration(format!(
                        "{} environment variable not set (or use --source public for published pages)",
                        API_KEY_ENV
                    ))
                })?;
                SourceConfig::Api(ApiKey::new(key)?)
            }
            SourceKind::Public => SourceConfig::Public,
        };

        if cli.depth > MAX_CHILD_FETCH_DEPTH {
            return Err(ValidationError::OutOfBounds {
                value: cli.depth as u32,
                min: 0,
                max: MAX_CHILD_FETCH_DEPTH as u32,
            }
            .into());
        }
        if cli.max_pages == 0 {
            return Err(ValidationError::OutOfBounds {
                value: 0,
                min: 1,
                max: u32::MAX,
            }
            .into());
        }
        if cli.timeout == 0 {
            return Err(AppError::MissingConfiguration(
                "timeout must be at least one second".to_string(),
            ));
        }

        Ok(RunConfig {
            page,
            source,
            fetch: FetchOptions {
                timeout: Duration::from_secs(cli.timeout),
                max_pages: cli.max_pages,
                depth: cli.depth,
            },
            format: FormatOptions {
                style: cli.format,
                strict: cli.strict,
            },
            output_format: if cli.json {
                OutputFormat::Json
            } else {
                OutputFormat::Sections
            },
            output_file: cli.output.map(PathBuf::from),
            verbose: cli.verbose,
        })
    }
}
