use thiserror::Error;

mod domain_types;
mod ids;
mod reference;

pub use domain_types::*;
pub use ids::*;
pub use reference::*;

#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Invalid Notion ID format: {0}")]
    InvalidId(String),

    #[error("Invalid URL: {url} - {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Invalid API key format: {reason}")]
    InvalidApiKey { reason: String },

    #[error("Value out of bounds: {value}, expected {min}..={max}")]
    OutOfBounds { value: u32, min: u32, max: u32 },
}
