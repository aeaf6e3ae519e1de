//! End-to-end tests for linking a refusal report against a catalog file.
//!
//! Uses fixture data under `tests/fixtures/refusal_report`.

use std::fs;
use std::path::{Path, PathBuf};

use pretty_assertions::assert_eq;

use importwatch_linker::render::{render_segments, OutputFormat};
use importwatch_linker::{join_segments, CitationCatalog, LinkerError, TextSegment};

fn fixture_path(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("refusal_report")
        .join(name)
}

/// Load fixture file content.
fn load_fixture(name: &str) -> String {
    let path = fixture_path(name);
    fs::read_to_string(&path).unwrap_or_else(|e| panic!("Failed to load {}: {}", path.display(), e))
}

/// Link the report fixture against the catalog fixture.
fn run_linker() -> (String, Vec<TextSegment>) {
    let catalog = CitationCatalog::from_file(&fixture_path("catalog.yaml"))
        .expect("Failed to load catalog");
    let report = load_fixture("report.txt");
    let segments = catalog.linker().link(&report);
    (report, segments)
}

#[test]
fn test_report_round_trip() {
    let (report, segments) = run_linker();
    assert_eq!(join_segments(&segments), report);
}

#[test]
fn test_report_citations_in_order() {
    let (_, segments) = run_linker();

    let citations: Vec<(&str, &str)> = segments
        .iter()
        .filter_map(|s| match s {
            TextSegment::Citation {
                content,
                identifier,
            } => Some((content.as_str(), identifier.as_str())),
            TextSegment::Plain { .. } => None,
        })
        .collect();

    assert_eq!(
        citations,
        vec![
            ("Section 801(a)(3)", "801a3"),
            ("section 402(A)(4)", "402a4"),
            ("Section 801(a)", "801a"),
            ("Section 403(i)", "403i"),
        ]
    );
}

#[test]
fn test_report_segments_alternate() {
    let (_, segments) = run_linker();

    // Every citation in the report is surrounded by prose.
    assert_eq!(segments.len(), 9);
    for (index, segment) in segments.iter().enumerate() {
        assert_eq!(segment.is_citation(), index % 2 == 1, "segment {index}");
    }
}

#[test]
fn test_report_html_output() {
    let (_, segments) = run_linker();
    let html = render_segments(&segments, OutputFormat::Html, "/violation/").unwrap();

    assert!(html.contains(r#"<a class="citation" href="/violation/801a3">Section 801(a)(3)</a>"#));
    assert!(html.contains(r#"<a class="citation" href="/violation/402a4">section 402(A)(4)</a>"#));
    assert!(html.contains(r#"<a class="citation" href="/violation/801a">Section 801(a)</a> remain"#));
    assert_eq!(html.matches("<a ").count(), 4);
}

#[test]
fn test_report_markdown_output() {
    let (_, segments) = run_linker();
    let markdown = render_segments(&segments, OutputFormat::Markdown, "/violation/").unwrap();

    assert!(markdown.contains("a [Section 403(i)](/violation/403i) violation."));
    assert!(markdown.starts_with("The shipment of frozen shrimp"));
}

#[test]
fn test_report_json_output_parses_back() {
    let (_, segments) = run_linker();
    let json = render_segments(&segments, OutputFormat::Json, "/violation/").unwrap();

    let parsed: Vec<TextSegment> = serde_json::from_str(&json).expect("valid JSON");
    assert_eq!(parsed, segments);
}

#[test]
fn test_builtin_catalog_links_report() {
    let report = load_fixture("report.txt");
    let catalog = CitationCatalog::builtin().unwrap();
    let segments = catalog.linker().link(&report);

    // The built-in catalog has no bare "Section 801(a)" entry.
    let identifiers: Vec<&str> = segments.iter().filter_map(TextSegment::identifier).collect();
    assert_eq!(identifiers, vec!["801a3", "402a4", "403i"]);
    assert_eq!(join_segments(&segments), report);
}

#[test]
fn test_invalid_catalog_fixture() {
    let result = CitationCatalog::from_file(&fixture_path("invalid_catalog.yaml"));
    assert!(matches!(result, Err(LinkerError::InvalidIdentifier(_))));
}

#[test]
fn test_catalog_from_temp_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("codes.yaml");
    fs::write(
        &path,
        "codes:\n  - code: 21 CFR 101.9\n    identifier: cfr-101-9\n",
    )
    .unwrap();

    let catalog = CitationCatalog::from_file(&path).unwrap();
    let segments = catalog.linker().link("Missing nutrition facts (21 cfr 101.9).");
    assert_eq!(
        segments,
        vec![
            TextSegment::plain("Missing nutrition facts ("),
            TextSegment::citation("21 cfr 101.9", "cfr-101-9"),
            TextSegment::plain(")."),
        ]
    );
}
