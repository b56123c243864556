// src/types/reference.rs
//! Page references parsed from Notion share URLs.

use super::{NotionId, ValidationError};
use std::fmt;
use url::Url;

/// The workspace domain and page identifier a Notion URL points at.
///
/// Derived once from the input URL and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageReference {
    domain: String,
    page_id: NotionId,
}

impl PageReference {
    /// Builds a reference from parts that are already known to be valid.
    pub fn new(domain: impl Into<String>, page_id: NotionId) -> Self {
        Self {
            domain: domain.into(),
            page_id,
        }
    }

    /// Parses a Notion page URL such as
    /// `https://it-cat.notion.site/0d91ec8678c64230b81f512855125d52?pvs=4`.
    ///
    /// The page id is taken from the end of the last non-empty path segment;
    /// the query string and fragment are ignored.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let input = input.trim();
        let invalid = |reason: &str| ValidationError::InvalidUrl {
            url: input.to_string(),
            reason: reason.to_string(),
        };

        let url = Url::parse(input).map_err(|e| invalid(&e.to_string()))?;

        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(invalid("Only HTTP and HTTPS URLs are supported"));
        }

        let host = url.host_str().ok_or_else(|| invalid("URL has no host"))?;
        let domain = match url.port() {
            Some(port) => format!("{}:{}", host, port),
            None => host.to_string(),
        };

        let segment = url
            .path_segments()
            .and_then(|segments| segments.filter(|s| !s.is_empty()).last())
            .ok_or_else(|| invalid("URL has no path"))?;

        let page_id = NotionId::from_path_segment(segment)
            .ok_or_else(|| invalid("no 32-character page identifier found"))?;

        log::debug!("Parsed page {} on {}", page_id, domain);

        Ok(Self { domain, page_id })
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    pub fn page_id(&self) -> &NotionId {
        &self.page_id
    }
}

impl fmt::Display for PageReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.domain, self.page_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_public_site_url_with_query() {
        let reference =
            PageReference::parse("https://it-cat.notion.site/0d91ec8678c64230b81f512855125d52?pvs=4")
                .unwrap();
        assert_eq!(reference.domain(), "it-cat.notion.site");
        assert_eq!(
            reference.page_id().as_str(),
            "0d91ec8678c64230b81f512855125d52"
        );
    }

    #[test]
    fn keeps_explicit_port_in_domain() {
        let reference =
            PageReference::parse("http://127.0.0.1:8080/Page-0d91ec8678c64230b81f512855125d52")
                .unwrap();
        assert_eq!(reference.domain(), "127.0.0.1:8080");
    }

    #[test]
    fn rejects_non_http_scheme() {
        let err = PageReference::parse("ftp://notion.so/0d91ec8678c64230b81f512855125d52")
            .unwrap_err();
        assert!(matches!(err, ValidationError::InvalidUrl { .. }));
    }

    #[test]
    fn rejects_bare_id_without_url() {
        assert!(PageReference::parse("0d91ec8678c64230b81f512855125d52").is_err());
    }
}
