//! Configuration constants, validation and link construction.

use regex::Regex;
use std::path::PathBuf;
use std::sync::LazyLock;

use crate::error::{LinkerError, Result};

/// Default prefix for citation links, matching the violation glossary route.
pub const DEFAULT_HREF_PREFIX: &str = "/violation/";

/// Environment variable holding the path of a YAML citation catalog.
pub const CATALOG_ENV_VAR: &str = "IMPORTWATCH_CATALOG";

/// Environment variable overriding [`DEFAULT_HREF_PREFIX`].
pub const HREF_PREFIX_ENV_VAR: &str = "IMPORTWATCH_HREF_PREFIX";

/// Maximum catalog file size in bytes (1 MB).
///
/// Catalogs are hand-maintained registries of a few dozen codes; anything
/// this large is almost certainly the wrong file.
pub const MAX_CATALOG_SIZE: usize = 1024 * 1024;

/// Maximum number of codes in a catalog.
///
/// Every code is a separate scan over the text, so the catalog size bounds
/// the cost of a single link call.
pub const MAX_CATALOG_CODES: usize = 10_000;

/// Identifier pattern: lowercase slug.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static IDENTIFIER_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9][a-z0-9_-]*$").expect("valid regex"));

/// Validate a citation identifier.
///
/// # Examples
/// ```
/// use importwatch_linker::config::validate_identifier;
///
/// assert!(validate_identifier("801a3").is_ok());
/// assert!(validate_identifier("Section 801").is_err());
/// ```
pub fn validate_identifier(identifier: &str) -> Result<()> {
    if IDENTIFIER_PATTERN.is_match(identifier) {
        Ok(())
    } else {
        Err(LinkerError::InvalidIdentifier(identifier.to_string()))
    }
}

/// Validate an href prefix.
///
/// The prefix is emitted verbatim into `href` attributes and markdown
/// links, so whitespace, quotes and angle brackets are rejected.
pub fn validate_href_prefix(prefix: &str) -> Result<()> {
    let invalid = prefix.is_empty()
        || prefix
            .chars()
            .any(|c| c.is_whitespace() || matches!(c, '"' | '\'' | '<' | '>' | '(' | ')'));

    if invalid {
        Err(LinkerError::InvalidHrefPrefix(prefix.to_string()))
    } else {
        Ok(())
    }
}

/// Sanitize an identifier for use in a link path.
///
/// # Examples
/// ```
/// use importwatch_linker::config::sanitize_identifier;
///
/// assert_eq!(sanitize_identifier("801a3"), "801a3");
/// assert_eq!(sanitize_identifier("403i<script>"), "403iscript");
/// ```
pub fn sanitize_identifier(identifier: &str) -> String {
    identifier
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '-' || *c == '_' || *c == '.' || *c == '~')
        .collect()
}

/// Build the link target for a citation identifier.
///
/// # Examples
/// ```
/// use importwatch_linker::config::{citation_href, DEFAULT_HREF_PREFIX};
///
/// assert_eq!(citation_href(DEFAULT_HREF_PREFIX, "801a3"), "/violation/801a3");
/// ```
pub fn citation_href(prefix: &str, identifier: &str) -> String {
    format!("{prefix}{}", sanitize_identifier(identifier))
}

/// Catalog path from `IMPORTWATCH_CATALOG`, if set and non-blank.
pub fn catalog_path_from_env() -> Option<PathBuf> {
    std::env::var(CATALOG_ENV_VAR)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .map(PathBuf::from)
}

/// Runtime configuration for linking and rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkerConfig {
    /// YAML catalog to load; the built-in catalog is used when absent.
    pub catalog_path: Option<PathBuf>,
    /// Prefix prepended to identifiers when building links.
    pub href_prefix: String,
}

impl LinkerConfig {
    pub fn new() -> Self {
        Self {
            catalog_path: None,
            href_prefix: DEFAULT_HREF_PREFIX.to_string(),
        }
    }

    /// Read configuration from `IMPORTWATCH_CATALOG` and `IMPORTWATCH_HREF_PREFIX`.
    pub fn from_env() -> Result<Self> {
        let catalog_path = catalog_path_from_env();

        let href_prefix =
            std::env::var(HREF_PREFIX_ENV_VAR).unwrap_or_else(|_| DEFAULT_HREF_PREFIX.into());
        validate_href_prefix(&href_prefix)?;

        Ok(Self {
            catalog_path,
            href_prefix,
        })
    }

    pub fn with_catalog_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.catalog_path = Some(path.into());
        self
    }

    /// Override the href prefix, validating it first.
    pub fn with_href_prefix(mut self, prefix: impl Into<String>) -> Result<Self> {
        let prefix = prefix.into();
        validate_href_prefix(&prefix)?;
        self.href_prefix = prefix;
        Ok(self)
    }

    /// Build the link target for `identifier` with this configuration's prefix.
    pub fn href(&self, identifier: &str) -> String {
        citation_href(&self.href_prefix, identifier)
    }
}

impl Default for LinkerConfig {
    fn default() -> Self {
        Self::new()
    }
}
