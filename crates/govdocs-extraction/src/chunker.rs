//! Section-aware adaptive chunker (spec §4.H).

use regex::Regex;
use std::sync::LazyLock;

/// One chunk produced by [`SectionAwareChunker::chunk`], not yet bound to a
/// document id — the application layer assigns `(doc_id, chunk_index)` when
/// persisting (chunks are content-addressed by that pair, spec §3).
#[derive(Debug, Clone, PartialEq)]
pub struct ChunkDraft {
    /// Chunk text.
    pub text: String,
    /// Nearest governing section header, if a boundary was captured.
    pub section_header: Option<String>,
    /// Whether this chunk opens at or after a detected section boundary.
    pub has_section: bool,
    /// Character offset of `text` within the source document.
    pub start_offset: usize,
    /// Character length of `text`.
    pub char_len: usize,
}

struct SizePolicy {
    target: usize,
    overlap: usize,
}

/// Size policy by text length, per spec §4.H.
fn size_policy_for(text_len: usize) -> SizePolicy {
    if text_len <= 5_000 {
        SizePolicy { target: 1_200, overlap: 250 }
    } else if text_len <= 20_000 {
        SizePolicy { target: 1_800, overlap: 350 }
    } else if text_len <= 50_000 {
        SizePolicy { target: 2_500, overlap: 500 }
    } else {
        SizePolicy { target: 3_000, overlap: 600 }
    }
}

/// Regexes recognizing section headers at line starts (spec §4.H).
static SECTION_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        Regex::new(r"(?m)^Section\s+\d+(\.\d+){0,2}\b").unwrap(),
        Regex::new(r"(?m)^\d+(\.\d+){0,2}\s+[A-Z][A-Za-z]*").unwrap(),
        Regex::new(r"(?m)^[A-Z][A-Z \t]{2,}:\s*$").unwrap(),
        Regex::new(r"(?m)^Chapter\s+\d+\b").unwrap(),
        Regex::new(r"(?m)^Article\s+\d+\b").unwrap(),
        Regex::new(r"(?m)^Part\s+[IVX]+\b").unwrap(),
        Regex::new(r"(?m)^\d+\)\s+[A-Z][A-Za-z]*").unwrap(),
    ]
});

static SENTENCE_BOUNDARY: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[.?!]\s").unwrap());

/// A detected section boundary: the char offset its header starts at, and
/// the header text itself (to the end of its line).
struct SectionBoundary {
    offset: usize,
    header: String,
}

fn detect_sections(text: &str) -> Vec<SectionBoundary> {
    let mut boundaries: Vec<SectionBoundary> = SECTION_PATTERNS
        .iter()
        .flat_map(|re| re.find_iter(text))
        .map(|m| {
            let line_end = text[m.start()..]
                .find('\n')
                .map_or(text.len(), |idx| m.start() + idx);
            SectionBoundary {
                offset: m.start(),
                header: text[m.start()..line_end].trim().to_string(),
            }
        })
        .collect();
    boundaries.sort_by_key(|b| b.offset);
    boundaries.dedup_by_key(|b| b.offset);
    boundaries
}

/// Section-aware adaptive splitter (spec §4.H).
#[derive(Debug, Default)]
pub struct SectionAwareChunker;

impl SectionAwareChunker {
    /// Construct a chunker. Stateless; a single instance may be shared.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Split `text` into section-bounded, overlapping chunks.
    #[must_use]
    pub fn chunk(&self, text: &str) -> Vec<ChunkDraft> {
        if text.trim().is_empty() {
            return Vec::new();
        }

        let policy = size_policy_for(text.chars().count());
        let boundaries = detect_sections(text);
        let char_indices: Vec<usize> = text.char_indices().map(|(i, _)| i).collect();
        let len_chars = char_indices.len();
        let byte_len = text.len();

        let char_to_byte = |char_idx: usize| -> usize {
            char_indices.get(char_idx).copied().unwrap_or(byte_len)
        };

        let mut drafts = Vec::new();
        let mut start_char = 0usize;

        while start_char < len_chars {
            let ideal_end_char = (start_char + policy.target).min(len_chars);
            let start_byte = char_to_byte(start_char);
            let ideal_end_byte = char_to_byte(ideal_end_char);

            let break_byte = select_break_point(text, &boundaries, start_byte, ideal_end_byte, policy.target);
            let break_char = text[..break_byte].chars().count();

            let chunk_text = text[start_byte..break_byte].to_string();
            if !chunk_text.trim().is_empty() {
                let governing = governing_section(&boundaries, start_byte);
                drafts.push(ChunkDraft {
                    char_len: chunk_text.chars().count(),
                    has_section: governing.is_some(),
                    section_header: governing,
                    start_offset: start_char,
                    text: chunk_text,
                });
            }

            if break_char >= len_chars {
                break;
            }

            // Overlap from the end of the previous chunk, truncated so it
            // never crosses a section boundary (avoids duplicated headers).
            let overlap_start_char = break_char.saturating_sub(policy.overlap);
            let next_start_char =
                clamp_overlap_past_section(text, &boundaries, &char_to_byte, overlap_start_char, break_char);
            start_char = next_start_char.max(start_char + 1);
        }

        drafts
    }
}

fn governing_section(boundaries: &[SectionBoundary], start_byte: usize) -> Option<String> {
    boundaries
        .iter()
        .rev()
        .find(|b| b.offset <= start_byte)
        .map(|b| b.header.clone())
}

/// Truncate the overlap start so it does not precede a section boundary
/// that falls within `(overlap_start, break_point)` — starting the next
/// chunk at the boundary itself instead, so the header is not duplicated.
fn clamp_overlap_past_section(
    text: &str,
    boundaries: &[SectionBoundary],
    char_to_byte: &impl Fn(usize) -> usize,
    overlap_start_char: usize,
    break_char: usize,
) -> usize {
    let overlap_start_byte = char_to_byte(overlap_start_char);
    let break_byte = char_to_byte(break_char);
    match boundaries
        .iter()
        .find(|b| b.offset > overlap_start_byte && b.offset < break_byte)
    {
        Some(boundary) => {
            let boundary_char = text[..boundary.offset].chars().count();
            boundary_char.min(break_char)
        }
        None => overlap_start_char,
    }
}

/// Break-point priority (spec §4.H): (1) section boundary in
/// `(start + 0.5*target, ideal_end]`, (2) nearest sentence boundary to
/// `ideal_end`, (3) `ideal_end` itself.
fn select_break_point(
    text: &str,
    boundaries: &[SectionBoundary],
    start_byte: usize,
    ideal_end_byte: usize,
    target: usize,
) -> usize {
    if ideal_end_byte >= text.len() {
        return text.len();
    }

    let half_target_bytes = start_byte + target / 2;
    if let Some(boundary) = boundaries
        .iter()
        .find(|b| b.offset > half_target_bytes && b.offset <= ideal_end_byte && b.offset > start_byte)
    {
        return boundary.offset;
    }

    let window_start = start_byte.max(ideal_end_byte.saturating_sub(200));
    let window = &text[window_start..ideal_end_byte.min(text.len())];
    if let Some(m) = SENTENCE_BOUNDARY.find_iter(window).last() {
        let candidate = window_start + m.end();
        if candidate > start_byte {
            return candidate;
        }
    }

    ideal_end_byte
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_text_produces_no_chunks() {
        let chunker = SectionAwareChunker::new();
        assert!(chunker.chunk("   \n\t").is_empty());
    }

    #[test]
    fn short_text_produces_a_single_chunk() {
        let chunker = SectionAwareChunker::new();
        let drafts = chunker.chunk("A short policy note about fee waivers.");
        assert_eq!(drafts.len(), 1);
        assert_eq!(drafts[0].start_offset, 0);
    }

    #[test]
    fn section_headers_are_captured_on_the_chunk_they_open() {
        let chunker = SectionAwareChunker::new();
        let text = format!(
            "Intro text before any heading.\n\nSection 1. Scope\n{}",
            "x".repeat(50)
        );
        let drafts = chunker.chunk(&text);
        assert!(drafts.iter().any(|d| d.has_section));
    }

    #[test]
    fn chunks_cover_the_source_text_with_no_gaps() {
        let chunker = SectionAwareChunker::new();
        let text = "Sentence one. Sentence two. ".repeat(400);
        let drafts = chunker.chunk(&text);
        assert!(!drafts.is_empty());
        for pair in drafts.windows(2) {
            let prev_end = pair[0].start_offset + pair[0].char_len;
            assert!(pair[1].start_offset <= prev_end);
        }
    }
}
