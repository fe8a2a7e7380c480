//! Paragraph-or-window text chunker.
//!
//! Splits extracted document text into [`Segment`]s tied to a source
//! filename. Text with real paragraph structure is split on blank lines;
//! anything else is cut into fixed-width character windows.
//!
//! # Algorithm
//!
//! 1. Split the text on blank-line boundaries (two or more consecutive
//!    newlines, `\r\n` included) and drop candidates that are empty once
//!    trimmed.
//! 2. If more than one paragraph remains, keep those whose trimmed length is
//!    above `min_paragraph_chars` and emit one segment per paragraph, labelled
//!    `paragraph-<n>` where `n` is the 1-based position among the candidates.
//! 3. Otherwise slice the raw text into windows of `window_chars`, labelled
//!    `chars-<start>-<start + window_chars>`. The last window may be shorter.
//!
//! Lengths and offsets are counted in `char`s, so multi-byte text is never
//! split inside a character.
//!
//! # Example
//!
//! ```rust
//! use knowledge_console_core::chunk::{chunk_text, ChunkParams};
//!
//! let segments = chunk_text("short note", "notes.txt", &ChunkParams::default());
//! assert_eq!(segments.len(), 1);
//! assert_eq!(segments[0].id, "notes.txt-chunk-0");
//! assert_eq!(segments[0].metadata.section.as_deref(), Some("chars-0-500"));
//! ```

use crate::models::{Segment, SegmentMetadata};

/// Paragraphs at or below this many characters are treated as noise.
pub const DEFAULT_MIN_PARAGRAPH_CHARS: usize = 50;

/// Width of a fallback window, in characters.
pub const DEFAULT_WINDOW_CHARS: usize = 500;

/// Chunking tuning parameters, decoupled from application config.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkParams {
    pub min_paragraph_chars: usize,
    pub window_chars: usize,
}

impl Default for ChunkParams {
    fn default() -> Self {
        Self {
            min_paragraph_chars: DEFAULT_MIN_PARAGRAPH_CHARS,
            window_chars: DEFAULT_WINDOW_CHARS,
        }
    }
}

/// Split `text` into ordered segments attributed to `source`.
///
/// # Guarantees
///
/// - Empty text yields no segments.
/// - Segment ids are `<source>-chunk-<n>`, unique within the call and
///   identical across calls with the same input.
/// - Output order follows the order of the text.
pub fn chunk_text(text: &str, source: &str, params: &ChunkParams) -> Vec<Segment> {
    let paragraphs: Vec<&str> = split_paragraphs(text)
        .into_iter()
        .filter(|p| !p.trim().is_empty())
        .collect();

    if paragraphs.len() > 1 {
        paragraphs
            .iter()
            .enumerate()
            .filter_map(|(index, para)| {
                let trimmed = para.trim();
                if trimmed.chars().count() > params.min_paragraph_chars {
                    Some(make_segment(
                        source,
                        index,
                        trimmed,
                        format!("paragraph-{}", index + 1),
                    ))
                } else {
                    None
                }
            })
            .collect()
    } else {
        chunk_windows(text, source, params.window_chars.max(1))
    }
}

/// Cut `text` into consecutive `window`-char slices.
fn chunk_windows(text: &str, source: &str, window: usize) -> Vec<Segment> {
    let starts: Vec<usize> = text
        .char_indices()
        .map(|(i, _)| i)
        .step_by(window)
        .collect();

    starts
        .iter()
        .enumerate()
        .map(|(n, &start)| {
            let end = starts.get(n + 1).copied().unwrap_or(text.len());
            let offset = n * window;
            make_segment(
                source,
                n,
                &text[start..end],
                format!("chars-{}-{}", offset, offset + window),
            )
        })
        .collect()
}

/// Split on runs of line breaks that contain at least two `\n`.
///
/// Only ASCII bytes are inspected, so every slice boundary is a char boundary.
fn split_paragraphs(text: &str) -> Vec<&str> {
    let bytes = text.as_bytes();
    let mut pieces = Vec::new();
    let mut start = 0;
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] != b'\n' && bytes[i] != b'\r' {
            i += 1;
            continue;
        }
        let run_start = i;
        let mut newlines = 0;
        while i < bytes.len() && (bytes[i] == b'\n' || bytes[i] == b'\r') {
            if bytes[i] == b'\n' {
                newlines += 1;
            }
            i += 1;
        }
        if newlines >= 2 {
            pieces.push(&text[start..run_start]);
            start = i;
        }
    }

    pieces.push(&text[start..]);
    pieces
}

fn make_segment(source: &str, index: usize, content: &str, section: String) -> Segment {
    Segment {
        id: format!("{}-chunk-{}", source, index),
        content: content.to_string(),
        source: source.to_string(),
        metadata: SegmentMetadata {
            filename: source.to_string(),
            page: None,
            section: Some(section),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sections(segments: &[Segment]) -> Vec<&str> {
        segments
            .iter()
            .map(|s| s.metadata.section.as_deref().unwrap_or(""))
            .collect()
    }

    #[test]
    fn test_two_long_paragraphs() {
        let text = "Paragraph one is long enough to survive the filter easily.\n\nParagraph two also clears the fifty character bar with room.";
        let segments = chunk_text(text, "doc.txt", &ChunkParams::default());
        assert_eq!(segments.len(), 2);
        assert_eq!(sections(&segments), vec!["paragraph-1", "paragraph-2"]);
        assert_eq!(segments[0].id, "doc.txt-chunk-0");
        assert_eq!(segments[1].id, "doc.txt-chunk-1");
        assert_eq!(segments[1].source, "doc.txt");
        assert_eq!(segments[1].metadata.filename, "doc.txt");
    }

    #[test]
    fn test_windows_without_blank_lines() {
        let text = "x".repeat(1200);
        let segments = chunk_text(&text, "flat.txt", &ChunkParams::default());
        assert_eq!(segments.len(), 3);
        assert_eq!(
            sections(&segments),
            vec!["chars-0-500", "chars-500-1000", "chars-1000-1500"]
        );
        assert_eq!(segments[0].content.len(), 500);
        assert_eq!(segments[2].content.len(), 200);
    }

    #[test]
    fn test_empty_text() {
        assert!(chunk_text("", "empty.txt", &ChunkParams::default()).is_empty());
    }

    #[test]
    fn test_short_text_single_window() {
        let segments = chunk_text("Hello, world!", "hi.txt", &ChunkParams::default());
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].content, "Hello, world!");
        assert_eq!(sections(&segments), vec!["chars-0-500"]);
    }

    #[test]
    fn test_short_paragraphs_filtered_but_numbering_kept() {
        let long_a = "A".repeat(60);
        let long_b = "B".repeat(51);
        let text = format!("{}\n\ntiny\n\n{}", long_a, long_b);
        let segments = chunk_text(&text, "mix.txt", &ChunkParams::default());
        assert_eq!(segments.len(), 2);
        assert_eq!(sections(&segments), vec!["paragraph-1", "paragraph-3"]);
        assert_eq!(segments[1].id, "mix.txt-chunk-2");
    }

    #[test]
    fn test_exactly_fifty_chars_is_dropped() {
        let fifty = "c".repeat(50);
        let text = format!("{}\n\n{}", fifty, "d".repeat(70));
        let segments = chunk_text(&text, "edge.txt", &ChunkParams::default());
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].content, "d".repeat(70));
    }

    #[test]
    fn test_all_short_paragraphs_yield_nothing() {
        let segments = chunk_text("one\n\ntwo\n\nthree", "short.txt", &ChunkParams::default());
        assert!(segments.is_empty());
    }

    #[test]
    fn test_blank_line_runs_and_crlf() {
        let a = "First paragraph that is comfortably longer than fifty chars.";
        let b = "Second paragraph that is comfortably longer than fifty chars.";
        for sep in ["\n\n\n\n", "\r\n\r\n", "\n\r\n"] {
            let text = format!("{}{}{}", a, sep, b);
            let segments = chunk_text(&text, "f.txt", &ChunkParams::default());
            assert_eq!(segments.len(), 2, "separator {:?}", sep);
            assert_eq!(segments[0].content, a);
            assert_eq!(segments[1].content, b);
        }
    }

    #[test]
    fn test_paragraphs_are_trimmed() {
        let a = "  Leading and trailing spaces around a long enough paragraph.  ";
        let b = "\tAnother paragraph with a tab that clears the fifty char bar.";
        let text = format!("{}\n\n{}", a, b);
        let segments = chunk_text(&text, "t.txt", &ChunkParams::default());
        assert_eq!(segments[0].content, a.trim());
        assert_eq!(segments[1].content, b.trim());
    }

    #[test]
    fn test_windows_cover_text_exactly() {
        let text: String = (0..260).map(|i| format!("w{} ", i)).collect();
        let segments = chunk_text(&text, "cover.txt", &ChunkParams::default());
        let joined: String = segments.iter().map(|s| s.content.as_str()).collect();
        assert_eq!(joined, text);
    }

    #[test]
    fn test_paragraph_coverage_modulo_filter() {
        let paras = [
            "Alpha paragraph with plenty of words to pass the noise filter.",
            "short",
            "Gamma paragraph with plenty of words to pass the noise filter.",
        ];
        let text = paras.join("\n\n");
        let segments = chunk_text(&text, "c.txt", &ChunkParams::default());
        let rebuilt: Vec<&str> = segments.iter().map(|s| s.content.as_str()).collect();
        assert_eq!(rebuilt.join("\n\n"), format!("{}\n\n{}", paras[0], paras[2]));
    }

    #[test]
    fn test_multibyte_windows_split_on_chars() {
        let text = "é".repeat(750);
        let segments = chunk_text(&text, "accents.txt", &ChunkParams::default());
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].content.chars().count(), 500);
        assert_eq!(segments[1].content.chars().count(), 250);
    }

    #[test]
    fn test_custom_params() {
        let params = ChunkParams {
            min_paragraph_chars: 3,
            window_chars: 4,
        };
        let segments = chunk_text("abcdefghij", "p.txt", &params);
        assert_eq!(segments.len(), 3);
        assert_eq!(sections(&segments), vec!["chars-0-4", "chars-4-8", "chars-8-12"]);

        let segments = chunk_text("abcd\n\nab\n\nwxyz", "p.txt", &params);
        assert_eq!(segments.len(), 2);
    }

    #[test]
    fn test_deterministic() {
        let text = "Alpha paragraph that is long enough to be kept by the chunker.\n\nBeta paragraph that is long enough to be kept by the chunker too.";
        let c1 = chunk_text(text, "d.txt", &ChunkParams::default());
        let c2 = chunk_text(text, "d.txt", &ChunkParams::default());
        assert_eq!(c1, c2);
    }
}
