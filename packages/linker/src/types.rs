//! Core data types for the linker.
//!
//! [`CitationCode`] is what callers search for; [`TextSegment`] is what
//! linking produces.

use serde::{Deserialize, Serialize};

/// A known regulatory citation code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CitationCode {
    /// Display text searched for in prose (e.g., "Section 801(a)(3)").
    ///
    /// Matched literally; parentheses and other regex syntax have no meaning.
    pub code: String,

    /// Opaque key used to build the link destination (e.g., "801a3").
    #[serde(alias = "slug")]
    pub identifier: String,

    /// Human readable name (e.g., "Adulteration").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl CitationCode {
    /// Create a new citation code without a title.
    #[must_use]
    pub fn new(code: impl Into<String>, identifier: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            identifier: identifier.into(),
            title: None,
        }
    }

    /// Attach a human readable title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
}

/// A contiguous span of linked text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TextSegment {
    /// Literal text, rendered as-is.
    Plain { content: String },

    /// Text that matched a known code.
    ///
    /// `content` is the matched input text with its original casing, not
    /// the catalog's canonical spelling.
    Citation { content: String, identifier: String },
}

impl TextSegment {
    #[must_use]
    pub fn plain(content: impl Into<String>) -> Self {
        Self::Plain {
            content: content.into(),
        }
    }

    #[must_use]
    pub fn citation(content: impl Into<String>, identifier: impl Into<String>) -> Self {
        Self::Citation {
            content: content.into(),
            identifier: identifier.into(),
        }
    }

    /// The text covered by this segment.
    #[must_use]
    pub fn content(&self) -> &str {
        match self {
            Self::Plain { content } | Self::Citation { content, .. } => content,
        }
    }

    /// The identifier of the matched code, if this is a citation.
    #[must_use]
    pub fn identifier(&self) -> Option<&str> {
        match self {
            Self::Plain { .. } => None,
            Self::Citation { identifier, .. } => Some(identifier),
        }
    }

    #[must_use]
    pub fn is_citation(&self) -> bool {
        matches!(self, Self::Citation { .. })
    }
}

/// Concatenate segment contents back into the original text.
///
/// # Examples
/// ```
/// use importwatch_linker::types::{join_segments, TextSegment};
///
/// let segments = vec![
///     TextSegment::plain("See "),
///     TextSegment::citation("403(i)", "403i"),
/// ];
/// assert_eq!(join_segments(&segments), "See 403(i)");
/// ```
#[must_use]
pub fn join_segments(segments: &[TextSegment]) -> String {
    segments.iter().map(TextSegment::content).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segment_accessors() {
        let plain = TextSegment::plain("See ");
        assert_eq!(plain.content(), "See ");
        assert_eq!(plain.identifier(), None);
        assert!(!plain.is_citation());

        let citation = TextSegment::citation("Section 801(a)(3)", "801a3");
        assert_eq!(citation.content(), "Section 801(a)(3)");
        assert_eq!(citation.identifier(), Some("801a3"));
        assert!(citation.is_citation());
    }

    #[test]
    fn test_segment_serialization() {
        assert_eq!(
            serde_json::to_string(&TextSegment::plain("a")).unwrap(),
            r#"{"type":"plain","content":"a"}"#
        );
        assert_eq!(
            serde_json::to_string(&TextSegment::citation("403(i)", "403i")).unwrap(),
            r#"{"type":"citation","content":"403(i)","identifier":"403i"}"#
        );
    }

    #[test]
    fn test_citation_code_accepts_slug_alias() {
        let code: CitationCode =
            serde_yaml::from_str("code: Section 403(i)\nslug: 403i\n").unwrap();
        assert_eq!(code, CitationCode::new("Section 403(i)", "403i"));
    }

    #[test]
    fn test_citation_code_with_title() {
        let code = CitationCode::new("Section 403(i)", "403i").with_title("Label Issues");
        assert_eq!(code.title.as_deref(), Some("Label Issues"));
    }

    #[test]
    fn test_join_segments_empty() {
        assert_eq!(join_segments(&[]), "");
    }
}
