//! Error types for the citation linker.
//!
//! Linking itself never fails; these errors come from the surfaces around
//! it: loading catalogs, validating configuration and CLI I/O.

use thiserror::Error;

/// Main error type for the linker library.
#[derive(Debug, Error)]
pub enum LinkerError {
    /// Identifier does not look like a slug.
    #[error("Invalid citation identifier: '{0}'. Expected a lowercase slug (e.g., 801a3)")]
    InvalidIdentifier(String),

    /// Catalog entry without any code text.
    #[error("Citation '{identifier}' has an empty code")]
    EmptyCode { identifier: String },

    /// Href prefix cannot be used to build links.
    #[error("Invalid href prefix: '{0}'. Must be non-empty and contain no whitespace or quotes")]
    InvalidHrefPrefix(String),

    /// Catalog file exceeds the size limit.
    #[error("Catalog is {size} bytes, exceeding the maximum of {max} bytes")]
    CatalogTooLarge { size: usize, max: usize },

    /// Catalog holds more entries than allowed.
    #[error("Catalog has {count} codes, exceeding the maximum of {max}")]
    TooManyCodes { count: usize, max: usize },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing or serialization failed.
    #[error("YAML error: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    /// JSON serialization failed.
    #[error("JSON serialization failed: {0}")]
    JsonSerialization(#[from] serde_json::Error),
}

/// Result type alias for linker operations.
pub type Result<T> = std::result::Result<T, LinkerError>;
