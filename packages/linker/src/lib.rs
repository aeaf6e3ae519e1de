//! ImportWatch citation linker - Turn regulatory citation codes in prose into links.
//!
//! This crate scans free text for known citation codes such as
//! `Section 801(a)(3)` and splits it into plain and citation segments, so
//! callers can render the citations as links inline with the prose.
//!
//! # Example
//!
//! ```
//! use importwatch_linker::{parse, CitationCode, TextSegment};
//!
//! let codes = [
//!     CitationCode::new("801(a)(3)", "801a3"),
//!     CitationCode::new("402(a)(4)", "402a4"),
//! ];
//! let segments = parse("See 801(a)(3) and also 402(a)(4) for details", &codes);
//!
//! assert_eq!(segments.len(), 5);
//! assert_eq!(segments[1], TextSegment::citation("801(a)(3)", "801a3"));
//! ```
//!
//! # Architecture
//!
//! - [`linker`]: Matching and overlap resolution
//! - [`types`]: Citation codes and text segments
//! - [`catalog`]: Loading and validating citation catalogs
//! - [`render`]: HTML, markdown, JSON and YAML output
//! - [`config`]: Configuration constants, validation and link construction
//! - [`error`]: Error types and Result alias
//! - [`cli`]: Command-line interface

pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod linker;
pub mod render;
pub mod types;

// Re-export main functions
pub use linker::{parse, CitationLinker};

// Re-export commonly used items
pub use catalog::CitationCatalog;
pub use config::LinkerConfig;
pub use error::{LinkerError, Result};
pub use render::{render_segments, OutputFormat, SegmentRenderer};
pub use types::{join_segments, CitationCode, TextSegment};
