//! Citation linking: split prose into plain and citation segments.
//!
//! Every known code is searched for literally and case-insensitively. All
//! matches are merged by start offset and resolved greedily left to right:
//! a match is accepted only when it starts at or after the end of the
//! previously accepted one. Anything overlapping an accepted match is
//! dropped outright, never trimmed to a partial match.
//!
//! Case folding never pairs an ASCII character with a non-ASCII one: `ſ`
//! does not match `s` and the Kelvin sign does not match `k`, while `é`
//! still matches `É`.

use regex::{Regex, RegexBuilder};

use crate::types::{CitationCode, TextSegment};

/// A compiled search pattern for one catalog code.
#[derive(Debug)]
struct CodePattern {
    regex: Regex,
    code: String,
    identifier: String,
}

impl CodePattern {
    /// Push every match of this code in `text` onto `out`.
    fn collect_matches<'a>(&'a self, text: &str, out: &mut Vec<Candidate<'a>>) {
        let mut at = 0;
        while let Some(m) = self.regex.find_at(text, at) {
            if folds_within_ascii(&self.code, m.as_str()) {
                out.push(Candidate {
                    start: m.start(),
                    end: m.end(),
                    identifier: self.identifier.as_str(),
                });
                at = m.end();
            } else {
                // A valid match may still start inside the rejected one.
                at = m.start()
                    + text[m.start()..]
                        .chars()
                        .next()
                        .map_or(1, char::len_utf8);
            }
        }
    }
}

/// A match of one code, as byte offsets into the searched text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Candidate<'a> {
    start: usize,
    end: usize,
    identifier: &'a str,
}

/// Reusable linker holding one compiled pattern per known code.
///
/// Construction compiles the patterns once; [`CitationLinker::link`] is a
/// pure function of the text and can be called from any number of threads.
///
/// # Examples
/// ```
/// use importwatch_linker::{CitationCode, CitationLinker, TextSegment};
///
/// let linker = CitationLinker::new(&[CitationCode::new("Section 403(i)", "403i")]);
/// let segments = linker.link("Refused under section 403(I).");
///
/// assert_eq!(
///     segments,
///     vec![
///         TextSegment::plain("Refused under "),
///         TextSegment::citation("section 403(I)", "403i"),
///         TextSegment::plain("."),
///     ]
/// );
/// ```
#[derive(Debug)]
pub struct CitationLinker {
    patterns: Vec<CodePattern>,
}

impl CitationLinker {
    /// Compile a linker for `codes`, preserving their order.
    ///
    /// Codes with empty text are ignored since they would only produce
    /// zero-width citations.
    #[must_use]
    pub fn new(codes: &[CitationCode]) -> Self {
        let patterns: Vec<CodePattern> = codes.iter().filter_map(compile_pattern).collect();

        tracing::debug!(
            codes = codes.len(),
            patterns = patterns.len(),
            "Compiled citation patterns"
        );

        Self { patterns }
    }

    /// Number of codes this linker searches for.
    #[must_use]
    pub fn pattern_count(&self) -> usize {
        self.patterns.len()
    }

    /// Split `text` into plain and citation segments.
    ///
    /// The result always covers the whole input: joining the segment
    /// contents gives back `text`. Without any match the result is a single
    /// plain segment, also for empty input.
    #[must_use]
    pub fn link(&self, text: &str) -> Vec<TextSegment> {
        let candidates = self.collect_candidates(text);
        let candidate_count = candidates.len();
        let accepted = resolve_overlaps(candidates);

        tracing::trace!(
            candidates = candidate_count,
            accepted = accepted.len(),
            "Resolved citation matches"
        );

        build_segments(text, &accepted)
    }

    /// Find every match of every pattern, sorted by start offset.
    fn collect_candidates<'a>(&'a self, text: &str) -> Vec<Candidate<'a>> {
        let mut candidates = Vec::new();
        for pattern in &self.patterns {
            pattern.collect_matches(text, &mut candidates);
        }

        // Stable sort: equal starts keep catalog order.
        candidates.sort_by_key(|c| c.start);
        candidates
    }
}

/// Split `text` into segments using `known_codes`.
///
/// One-shot form of [`CitationLinker`]; prefer building a linker once when
/// linking many texts against the same catalog.
///
/// # Examples
/// ```
/// use importwatch_linker::{parse, CitationCode, TextSegment};
///
/// let segments = parse("", &[CitationCode::new("Section 403(i)", "403i")]);
/// assert_eq!(segments, vec![TextSegment::plain("")]);
/// ```
#[must_use]
pub fn parse(text: &str, known_codes: &[CitationCode]) -> Vec<TextSegment> {
    CitationLinker::new(known_codes).link(text)
}

fn compile_pattern(code: &CitationCode) -> Option<CodePattern> {
    if code.code.is_empty() {
        tracing::debug!(identifier = %code.identifier, "Ignoring citation code without text");
        return None;
    }

    match RegexBuilder::new(&regex::escape(&code.code))
        .case_insensitive(true)
        .build()
    {
        Ok(regex) => Some(CodePattern {
            regex,
            code: code.code.clone(),
            identifier: code.identifier.clone(),
        }),
        Err(e) => {
            tracing::warn!(
                identifier = %code.identifier,
                error = %e,
                "Skipping citation code that cannot be compiled"
            );
            None
        }
    }
}

/// Check that a case-insensitive match pairs ASCII with ASCII only.
///
/// Unicode simple case folding maps one char to one char, so `code` and
/// `matched` line up char by char.
fn folds_within_ascii(code: &str, matched: &str) -> bool {
    code.chars().count() == matched.chars().count()
        && code
            .chars()
            .zip(matched.chars())
            .all(|(c, m)| c.is_ascii() == m.is_ascii())
}

/// Greedy first-fit over candidates sorted by start offset.
fn resolve_overlaps(candidates: Vec<Candidate<'_>>) -> Vec<Candidate<'_>> {
    let mut accepted = Vec::with_capacity(candidates.len());
    let mut accepted_end = 0;

    for candidate in candidates {
        if candidate.start >= accepted_end {
            accepted_end = candidate.end;
            accepted.push(candidate);
        }
    }

    accepted
}

fn build_segments(text: &str, accepted: &[Candidate<'_>]) -> Vec<TextSegment> {
    let mut segments = Vec::with_capacity(accepted.len() * 2 + 1);
    let mut last_end = 0;

    for candidate in accepted {
        if candidate.start > last_end {
            segments.push(TextSegment::plain(&text[last_end..candidate.start]));
        }
        segments.push(TextSegment::citation(
            &text[candidate.start..candidate.end],
            candidate.identifier,
        ));
        last_end = candidate.end;
    }

    if last_end < text.len() {
        segments.push(TextSegment::plain(&text[last_end..]));
    }

    if segments.is_empty() {
        segments.push(TextSegment::plain(text));
    }

    segments
}
