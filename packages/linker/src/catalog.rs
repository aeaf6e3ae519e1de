//! Citation catalog: the registry of codes the linker searches for.
//!
//! Catalogs are YAML documents with a single `codes` list:
//!
//! ```yaml
//! codes:
//!   - code: Section 801(a)(3)
//!     identifier: 801a3
//!     title: Adulteration
//! ```
//!
//! Order matters: when two codes match at the same offset, the one listed
//! first wins.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::config::{self, validate_identifier, LinkerConfig};
use crate::error::{LinkerError, Result};
use crate::linker::CitationLinker;
use crate::types::CitationCode;

/// Catalog shipped with the crate: the FDA refusal charges shown on the dashboard.
const BUILTIN_CATALOG: &str = include_str!("../data/violation_codes.yaml");

/// Ordered collection of known citation codes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CitationCatalog {
    codes: Vec<CitationCode>,
}

impl CitationCatalog {
    /// Create a catalog from codes without validating them.
    #[must_use]
    pub fn new(codes: Vec<CitationCode>) -> Self {
        Self { codes }
    }

    /// Load the built-in catalog.
    ///
    /// # Examples
    /// ```
    /// use importwatch_linker::CitationCatalog;
    ///
    /// let catalog = CitationCatalog::builtin().unwrap();
    /// assert_eq!(catalog.get("801a3").unwrap().code, "Section 801(a)(3)");
    /// ```
    pub fn builtin() -> Result<Self> {
        Self::from_yaml_str(BUILTIN_CATALOG)
    }

    /// Parse and validate a catalog from YAML.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - Content exceeds [`config::MAX_CATALOG_SIZE`]
    /// - YAML is invalid
    /// - Validation fails (see [`CitationCatalog::validate`])
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        if content.len() > config::MAX_CATALOG_SIZE {
            tracing::warn!(
                size = content.len(),
                max = config::MAX_CATALOG_SIZE,
                "Catalog content exceeds size limit"
            );
            return Err(LinkerError::CatalogTooLarge {
                size: content.len(),
                max: config::MAX_CATALOG_SIZE,
            });
        }

        let catalog: Self = serde_yaml::from_str(content)?;
        catalog.validate()?;

        tracing::debug!(codes = catalog.codes.len(), "Parsed citation catalog");

        Ok(catalog)
    }

    /// Read a catalog file.
    ///
    /// The file size is checked before anything is read.
    pub fn from_file(path: &Path) -> Result<Self> {
        let size = std::fs::metadata(path)?.len();
        if size > config::MAX_CATALOG_SIZE as u64 {
            tracing::warn!(
                path = %path.display(),
                size,
                max = config::MAX_CATALOG_SIZE,
                "Catalog file exceeds size limit"
            );
            return Err(LinkerError::CatalogTooLarge {
                size: usize::try_from(size).unwrap_or(usize::MAX),
                max: config::MAX_CATALOG_SIZE,
            });
        }

        tracing::debug!(path = %path.display(), size, "Loading citation catalog");
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Load the catalog named by `config`, falling back to the built-in one.
    pub fn load(config: &LinkerConfig) -> Result<Self> {
        match &config.catalog_path {
            Some(path) => Self::from_file(path),
            None => Self::builtin(),
        }
    }

    /// Check catalog limits and every entry.
    ///
    /// Entries need non-blank code text and a slug identifier. Duplicate
    /// code text is allowed; only the first entry can ever match, so it is
    /// logged.
    pub fn validate(&self) -> Result<()> {
        if self.codes.len() > config::MAX_CATALOG_CODES {
            return Err(LinkerError::TooManyCodes {
                count: self.codes.len(),
                max: config::MAX_CATALOG_CODES,
            });
        }

        let mut seen = HashSet::new();
        for entry in &self.codes {
            if entry.code.trim().is_empty() {
                return Err(LinkerError::EmptyCode {
                    identifier: entry.identifier.clone(),
                });
            }
            validate_identifier(&entry.identifier)?;

            if !seen.insert(entry.code.to_lowercase()) {
                tracing::warn!(
                    code = %entry.code,
                    identifier = %entry.identifier,
                    "Duplicate citation code; earlier entry takes precedence"
                );
            }
        }

        Ok(())
    }

    #[must_use]
    pub fn codes(&self) -> &[CitationCode] {
        &self.codes
    }

    /// Look up the first entry with `identifier`.
    #[must_use]
    pub fn get(&self, identifier: &str) -> Option<&CitationCode> {
        self.codes.iter().find(|c| c.identifier == identifier)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Compile a linker for this catalog.
    #[must_use]
    pub fn linker(&self) -> CitationLinker {
        CitationLinker::new(&self.codes)
    }
}
