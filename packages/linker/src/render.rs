//! Rendering of linked segments.
//!
//! Renderers are the consumer side of linking: plain segments become
//! literal text and citation segments become links built from the
//! segment identifier (see [`crate::config::citation_href`]).

use std::fmt;
use std::str::FromStr;

use crate::config::citation_href;
use crate::error::Result;
use crate::types::{join_segments, TextSegment};

/// Turns a sequence of segments into a string.
pub trait SegmentRenderer {
    fn render(&self, segments: &[TextSegment]) -> String;
}

/// Renders citations as `<a>` elements, escaping all text.
#[derive(Debug, Clone)]
pub struct HtmlRenderer {
    href_prefix: String,
}

impl HtmlRenderer {
    #[must_use]
    pub fn new(href_prefix: impl Into<String>) -> Self {
        Self {
            href_prefix: href_prefix.into(),
        }
    }
}

impl SegmentRenderer for HtmlRenderer {
    fn render(&self, segments: &[TextSegment]) -> String {
        let mut out = String::new();
        for segment in segments {
            match segment {
                TextSegment::Plain { content } => out.push_str(&escape_html(content)),
                TextSegment::Citation {
                    content,
                    identifier,
                } => {
                    let href = citation_href(&self.href_prefix, identifier);
                    out.push_str(&format!(
                        r#"<a class="citation" href="{}">{}</a>"#,
                        escape_html(&href),
                        escape_html(content)
                    ));
                }
            }
        }
        out
    }
}

/// Renders citations as inline markdown links: `[text](href)`.
///
/// Backslashes and square brackets are escaped in labels and in plain
/// text alike, so input prose cannot open a link of its own or unbalance
/// a citation label.
#[derive(Debug, Clone)]
pub struct MarkdownRenderer {
    href_prefix: String,
}

impl MarkdownRenderer {
    #[must_use]
    pub fn new(href_prefix: impl Into<String>) -> Self {
        Self {
            href_prefix: href_prefix.into(),
        }
    }
}

impl SegmentRenderer for MarkdownRenderer {
    fn render(&self, segments: &[TextSegment]) -> String {
        segments
            .iter()
            .map(|segment| match segment {
                TextSegment::Plain { content } => escape_markdown(content),
                TextSegment::Citation {
                    content,
                    identifier,
                } => format!(
                    "[{}]({})",
                    escape_markdown(content),
                    citation_href(&self.href_prefix, identifier)
                ),
            })
            .collect()
    }
}

/// Renders segments back to the original text.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainRenderer;

impl SegmentRenderer for PlainRenderer {
    fn render(&self, segments: &[TextSegment]) -> String {
        join_segments(segments)
    }
}

/// Output formats supported by [`render_segments`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    Plain,
    Html,
    #[default]
    Markdown,
    Json,
    Yaml,
}

impl OutputFormat {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Plain => "plain",
            Self::Html => "html",
            Self::Markdown => "markdown",
            Self::Json => "json",
            Self::Yaml => "yaml",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "plain" | "text" => Ok(Self::Plain),
            "html" => Ok(Self::Html),
            "markdown" | "md" => Ok(Self::Markdown),
            "json" => Ok(Self::Json),
            "yaml" | "yml" => Ok(Self::Yaml),
            other => Err(format!(
                "unknown format '{other}' (expected plain, html, markdown, json or yaml)"
            )),
        }
    }
}

/// Render `segments` in `format`.
///
/// JSON and YAML serialize the segments themselves; the other formats go
/// through the matching [`SegmentRenderer`].
pub fn render_segments(
    segments: &[TextSegment],
    format: OutputFormat,
    href_prefix: &str,
) -> Result<String> {
    let rendered = match format {
        OutputFormat::Plain => PlainRenderer.render(segments),
        OutputFormat::Html => HtmlRenderer::new(href_prefix).render(segments),
        OutputFormat::Markdown => MarkdownRenderer::new(href_prefix).render(segments),
        OutputFormat::Json => serde_json::to_string_pretty(segments)?,
        OutputFormat::Yaml => serde_yaml::to_string(segments)?,
    };
    Ok(rendered)
}

/// Escape text for HTML element content and attribute values.
///
/// # Examples
/// ```
/// use importwatch_linker::render::escape_html;
///
/// assert_eq!(escape_html("a < b & \"c\""), "a &lt; b &amp; &quot;c&quot;");
/// ```
#[must_use]
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Backslash-escape the characters that delimit markdown link labels.
///
/// # Examples
/// ```
/// use importwatch_linker::render::escape_markdown;
///
/// assert_eq!(escape_markdown(r"[a]\"), r"\[a\]\\");
/// ```
#[must_use]
pub fn escape_markdown(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '\\' | '[' | ']') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample() -> Vec<TextSegment> {
        vec![
            TextSegment::plain("See "),
            TextSegment::citation("801(a)(3)", "801a3"),
            TextSegment::plain(" & more"),
        ]
    }

    #[test]
    fn test_html_renderer() {
        assert_eq!(
            HtmlRenderer::new("/violation/").render(&sample()),
            r#"See <a class="citation" href="/violation/801a3">801(a)(3)</a> &amp; more"#
        );
    }

    #[test]
    fn test_html_renderer_escapes_plain_text() {
        let segments = vec![TextSegment::plain("<script>alert('x')</script>")];
        assert_eq!(
            HtmlRenderer::new("/violation/").render(&segments),
            "&lt;script&gt;alert(&#39;x&#39;)&lt;/script&gt;"
        );
    }

    #[test]
    fn test_html_renderer_sanitizes_identifier() {
        let segments = vec![TextSegment::citation("403(i)", "403i\" onclick=\"x")];
        assert_eq!(
            HtmlRenderer::new("/violation/").render(&segments),
            r#"<a class="citation" href="/violation/403ionclickx">403(i)</a>"#
        );
    }

    #[test]
    fn test_markdown_renderer() {
        assert_eq!(
            MarkdownRenderer::new("/violation/").render(&sample()),
            "See [801(a)(3)](/violation/801a3) & more"
        );
    }

    #[test]
    fn test_markdown_renderer_escapes_brackets() {
        let segments = vec![TextSegment::citation("[x]", "x")];
        assert_eq!(
            MarkdownRenderer::new("/c/").render(&segments),
            r"[\[x\]](/c/x)"
        );
    }

    #[test]
    fn test_markdown_renderer_escapes_trailing_backslash_in_label() {
        let segments = vec![TextSegment::citation(r"x\", "x")];
        assert_eq!(
            MarkdownRenderer::new("/c/").render(&segments),
            r"[x\\](/c/x)"
        );
    }

    #[test]
    fn test_markdown_renderer_escapes_plain_text() {
        let segments = vec![
            TextSegment::plain("[x](javascript:y) "),
            TextSegment::citation("403(i)", "403i"),
            TextSegment::plain(r" C:\dir"),
        ];
        assert_eq!(
            MarkdownRenderer::new("/violation/").render(&segments),
            r"\[x\](javascript:y) [403(i)](/violation/403i) C:\\dir"
        );
    }

    #[test]
    fn test_plain_renderer_round_trips() {
        assert_eq!(PlainRenderer.render(&sample()), "See 801(a)(3) & more");
    }

    #[test]
    fn test_render_segments_json() {
        let json = render_segments(&sample(), OutputFormat::Json, "/violation/").unwrap();
        let parsed: Vec<TextSegment> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, sample());
        assert!(json.contains(r#""type": "citation""#));
    }

    #[test]
    fn test_render_segments_yaml() {
        let yaml = render_segments(&sample(), OutputFormat::Yaml, "/violation/").unwrap();
        assert!(yaml.contains("type: citation"));
        assert!(yaml.contains("identifier: 801a3"));
    }

    #[test]
    fn test_output_format_from_str() {
        assert_eq!("html".parse::<OutputFormat>(), Ok(OutputFormat::Html));
        assert_eq!("MD".parse::<OutputFormat>(), Ok(OutputFormat::Markdown));
        assert_eq!("yml".parse::<OutputFormat>(), Ok(OutputFormat::Yaml));
        assert_eq!("text".parse::<OutputFormat>(), Ok(OutputFormat::Plain));
        assert!("pdf".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_output_format_display() {
        assert_eq!(OutputFormat::Json.to_string(), "json");
        assert_eq!(OutputFormat::default(), OutputFormat::Markdown);
    }
}
