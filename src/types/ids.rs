use super::ValidationError;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

lazy_static::lazy_static! {
    /// A page identifier at the end of a URL path segment, bare or dashed.
    static ref TRAILING_ID_REGEX: Regex = Regex::new(
        r"(?:^|[^a-fA-F0-9])([a-fA-F0-9]{32}|[a-fA-F0-9]{8}-[a-fA-F0-9]{4}-[a-fA-F0-9]{4}-[a-fA-F0-9]{4}-[a-fA-F0-9]{12})$"
    ).expect("Failed to compile Notion ID regex - this is a bug in the code");
}

/// A Notion object identifier.
///
/// Stored as 32 lowercase hex characters without dashes. The Notion APIs
/// expect the dashed 8-4-4-4-12 form, see [`NotionId::to_hyphenated`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NotionId(String);

impl NotionId {
    /// Returns the ID as a string
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the hyphenated UUID format for API compatibility.
    pub fn to_hyphenated(&self) -> String {
        format!(
            "{}-{}-{}-{}-{}",
            &self.0[0..8],
            &self.0[8..12],
            &self.0[12..16],
            &self.0[16..20],
            &self.0[20..32]
        )
    }

    /// Create a new random v4 ID, used for blocks built outside an API response.
    pub fn new_v4() -> Self {
        NotionId(Uuid::new_v4().as_simple().to_string())
    }

    /// Creates a NotionId from a validated hex string.
    fn from_hex(hex: &str) -> Result<Self, ValidationError> {
        if hex.len() == 32 && hex.chars().all(|c| c.is_ascii_hexdigit()) {
            Ok(NotionId(hex.to_lowercase()))
        } else {
            Err(ValidationError::InvalidId(format!(
                "Invalid Notion ID format: {}",
                hex
            )))
        }
    }

    /// Parses a bare ID, either 32 hex characters or a dashed UUID.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let cleaned = input.trim();

        if let Ok(uuid) = Uuid::parse_str(cleaned) {
            return Ok(NotionId(uuid.as_simple().to_string()));
        }

        Self::from_hex(cleaned)
    }

    /// Extracts the identifier that ends a URL path segment such as
    /// `My-Page-0d91ec8678c64230b81f512855125d52`.
    pub fn from_path_segment(segment: &str) -> Option<Self> {
        let captures = TRAILING_ID_REGEX.captures(segment)?;
        let id = captures.get(1)?.as_str().replace('-', "");
        Self::from_hex(&id).ok()
    }
}

impl fmt::Display for NotionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for NotionId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for NotionId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        NotionId::parse(&s).map_err(serde::de::Error::custom)
    }
}
