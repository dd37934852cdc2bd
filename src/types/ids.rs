// src/types/ids.rs
use super::ValidationError;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;
use url::Url;
use uuid::Uuid;

static ID_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"([a-fA-F0-9]{32}|[a-fA-F0-9]{8}-[a-fA-F0-9]{4}-[a-fA-F0-9]{4}-[a-fA-F0-9]{4}-[a-fA-F0-9]{12})$",
    )
    .expect("Failed to compile Notion ID regex - this is a bug in the code")
});

/// NotionId - A general-purpose Notion ID that can represent any type of object
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NotionId(String); // Store the non-hyphenated version internally

impl NotionId {
    /// Returns the canonical non-hyphenated ID.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the hyphenated UUID format used in API paths.
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

    /// Parses various Notion ID formats: dashed UUIDs, bare 32-char hex IDs
    /// and page/database URLs.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let cleaned = input.trim().trim_end_matches('/');

        if cleaned.is_empty() {
            return Err(ValidationError::EmptyField("id"));
        }

        // 1. UUID format with dashes
        if let Ok(uuid) = Uuid::parse_str(cleaned) {
            return Ok(NotionId(uuid.as_simple().to_string()));
        }

        // 2. Direct 32-char hex ID
        if cleaned.len() == 32 {
            return Self::from_hex(cleaned);
        }

        // 3. Extract from URLs
        if cleaned.starts_with("http://") || cleaned.starts_with("https://") {
            return Self::extract_from_url(cleaned);
        }

        Err(ValidationError::InvalidId(format!(
            "Could not parse Notion ID from: {}",
            input
        )))
    }

    /// Extracts the ID from the last path segment of a Notion URL.
    fn extract_from_url(raw: &str) -> Result<Self, ValidationError> {
        let parsed = Url::parse(raw)
            .map_err(|e| ValidationError::InvalidId(format!("Invalid URL {}: {}", raw, e)))?;

        let last_segment = parsed
            .path_segments()
            .and_then(|mut segments| segments.rfind(|s| !s.is_empty()))
            .unwrap_or_default();

        if let Some(found) = ID_REGEX.find(last_segment) {
            return Self::from_hex(&found.as_str().replace('-', ""));
        }

        Err(ValidationError::InvalidId(format!(
            "No valid ID found in URL: {}",
            raw
        )))
    }
}

impl fmt::Display for NotionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_parsing() {
        let id = NotionId::parse("550e8400e29b41d4a716446655440000").unwrap();
        assert_eq!(id.as_str(), "550e8400e29b41d4a716446655440000");

        let id = NotionId::parse("550e8400-e29b-41d4-a716-446655440000").unwrap();
        assert_eq!(id.as_str(), "550e8400e29b41d4a716446655440000");

        let id =
            NotionId::parse("https://www.notion.so/Test-Page-550e8400e29b41d4a716446655440000")
                .unwrap();
        assert_eq!(id.as_str(), "550e8400e29b41d4a716446655440000");

        let id = NotionId::parse(
            "https://www.notion.so/workspace/550E8400E29B41D4A716446655440000?v=abc",
        )
        .unwrap();
        assert_eq!(id.as_str(), "550e8400e29b41d4a716446655440000");
    }

    #[test]
    fn test_invalid_ids() {
        assert!(NotionId::parse("too-short").is_err());
        assert!(NotionId::parse("zzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzz").is_err());
        assert!(NotionId::parse("https://www.notion.so/no-id-here").is_err());
        assert_eq!(
            NotionId::parse("   ").unwrap_err(),
            ValidationError::EmptyField("id")
        );
    }

    #[test]
    fn test_to_hyphenated() {
        let id = NotionId::parse("550e8400e29b41d4a716446655440000").unwrap();
        assert_eq!(id.to_hyphenated(), "550e8400-e29b-41d4-a716-446655440000");
    }
}
