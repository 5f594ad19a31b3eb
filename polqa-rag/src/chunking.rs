//! Document chunking.
//!
//! This module provides the [`Chunker`] trait and the production
//! [`ParagraphChunker`], which splits on blank-line boundaries and
//! re-splits long paragraphs on sentence boundaries.

use crate::config::RetrievalConfig;
use crate::document::Chunk;

/// A strategy for splitting document text into chunks.
///
/// Implementations produce [`Chunk`]s with ordinals assigned in
/// emission order. Empty input yields an empty `Vec` — a valid state,
/// not an error.
pub trait Chunker: Send + Sync {
    /// Split `text` into chunks.
    fn chunk(&self, text: &str) -> Vec<Chunk>;
}

/// Splits text into paragraphs, re-splitting long ones on sentence
/// boundaries and dropping short fragments as noise.
///
/// The algorithm:
///
/// 1. Split on blank-line boundaries (`"\n\n"`) into paragraphs.
/// 2. A paragraph longer than `long_paragraph_len` characters is split
///    on the `". "` delimiter; sentences are greedily accumulated into
///    a buffer that is flushed whenever adding the next sentence would
///    reach or exceed the threshold.
/// 3. A paragraph at or under the threshold is emitted verbatim,
///    trimmed.
/// 4. Chunks with trimmed length under `min_chunk_len` are dropped
///    (page headers, stray whitespace).
///
/// A paragraph containing no `". "` delimiter is emitted as one
/// oversized chunk; the per-retrieval snippet bound is the real cap.
///
/// # Example
///
/// ```rust,ignore
/// use polqa_rag::{ParagraphChunker, RetrievalConfig};
///
/// let chunker = ParagraphChunker::from_config(&RetrievalConfig::default());
/// let chunks = chunker.chunk(&policy_text);
/// ```
#[derive(Debug, Clone)]
pub struct ParagraphChunker {
    long_paragraph_len: usize,
    min_chunk_len: usize,
}

impl ParagraphChunker {
    /// Create a chunker with explicit thresholds.
    pub fn new(long_paragraph_len: usize, min_chunk_len: usize) -> Self {
        Self { long_paragraph_len, min_chunk_len }
    }

    /// Create a chunker from a [`RetrievalConfig`].
    pub fn from_config(config: &RetrievalConfig) -> Self {
        Self::new(config.long_paragraph_len, config.min_chunk_len)
    }

    /// Split one long paragraph on sentence boundaries, accumulating
    /// sentences greedily up to the long-paragraph threshold.
    fn split_long_paragraph(&self, paragraph: &str, out: &mut Vec<String>) {
        let mut buffer = String::new();
        let mut buffer_chars = 0usize;

        for sentence in paragraph.split(". ") {
            let sentence_chars = sentence.chars().count();
            let added = if buffer.is_empty() { sentence_chars } else { sentence_chars + 2 };

            if !buffer.is_empty() && buffer_chars + added >= self.long_paragraph_len {
                flush(&mut buffer, out);
                buffer_chars = 0;
            }

            if !buffer.is_empty() {
                buffer.push_str(". ");
                buffer_chars += 2;
            }
            buffer.push_str(sentence);
            buffer_chars += sentence_chars;
        }

        flush(&mut buffer, out);
    }
}

/// Push the trimmed buffer contents, if any, and reset the buffer.
fn flush(buffer: &mut String, out: &mut Vec<String>) {
    let trimmed = buffer.trim();
    if !trimmed.is_empty() {
        out.push(trimmed.to_string());
    }
    buffer.clear();
}

impl Default for ParagraphChunker {
    fn default() -> Self {
        Self::from_config(&RetrievalConfig::default())
    }
}

impl Chunker for ParagraphChunker {
    fn chunk(&self, text: &str) -> Vec<Chunk> {
        let mut texts: Vec<String> = Vec::new();

        for paragraph in text.split("\n\n") {
            let trimmed = paragraph.trim();
            if trimmed.is_empty() {
                continue;
            }
            if trimmed.chars().count() > self.long_paragraph_len {
                self.split_long_paragraph(trimmed, &mut texts);
            } else {
                texts.push(trimmed.to_string());
            }
        }

        texts
            .into_iter()
            .filter(|t| t.chars().count() >= self.min_chunk_len)
            .enumerate()
            .map(|(ordinal, text)| Chunk { ordinal, text })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chunker() -> ParagraphChunker {
        ParagraphChunker::default()
    }

    #[test]
    fn empty_input_yields_no_chunks() {
        assert!(chunker().chunk("").is_empty());
        assert!(chunker().chunk("\n\n\n\n").is_empty());
    }

    #[test]
    fn short_paragraphs_become_single_chunks() {
        let text = "Maternity expenses are covered after 24 months of continuous coverage.\n\n\
                    Cataract surgery has a waiting period of two years under this policy.";
        let chunks = chunker().chunk(text);
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].ordinal, 0);
        assert_eq!(chunks[1].ordinal, 1);
        assert!(chunks[0].text.starts_with("Maternity"));
        assert!(chunks[1].text.starts_with("Cataract"));
    }

    #[test]
    fn noise_fragments_are_dropped() {
        let text = "Page 3 of 12\n\n\
                    The insured person is entitled to reimbursement of hospitalization \
                    expenses subject to the limits stated in the schedule.";
        let chunks = chunker().chunk(text);
        assert_eq!(chunks.len(), 1);
        assert!(chunks[0].text.starts_with("The insured person"));
    }

    #[test]
    fn long_paragraph_is_split_on_sentences() {
        let sentence = "The policy covers inpatient hospitalization expenses for the insured person";
        // ~77 chars per sentence plus separators; 15 sentences is well over 800.
        let paragraph = vec![sentence; 15].join(". ");
        let chunks = chunker().chunk(&paragraph);

        assert!(chunks.len() > 1, "expected the long paragraph to be split");
        for chunk in &chunks {
            let len = chunk.text.chars().count();
            assert!(len >= 50, "chunk under minimum length: {len}");
            assert!(len <= 800, "chunk over threshold: {len}");
        }
    }

    #[test]
    fn chunk_lengths_stay_within_bounds() {
        let text = "Short noise\n\n".to_string()
            + &vec!["A benefit clause that describes coverage terms in moderate detail"; 20]
                .join(". ")
            + "\n\nRoom rent is limited to one percent of the sum insured per day of admission.";
        let chunks = chunker().chunk(&text);
        assert!(!chunks.is_empty());
        for chunk in &chunks {
            let len = chunk.text.chars().count();
            assert!((50..=800).contains(&len), "length {len} out of bounds");
        }
        // Ordinals are dense and in emission order.
        for (i, chunk) in chunks.iter().enumerate() {
            assert_eq!(chunk.ordinal, i);
        }
    }

    #[test]
    fn run_on_paragraph_without_delimiters_is_one_oversized_chunk() {
        // No ". " anywhere: a single chunk larger than the threshold.
        let text = "x".repeat(1200);
        let chunks = chunker().chunk(&text);
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].text.chars().count(), 1200);
    }

    #[test]
    fn whitespace_around_paragraphs_is_trimmed() {
        let text = "   The grace period for premium payment is thirty days from the due date.   ";
        let chunks = chunker().chunk(text);
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].text, chunks[0].text.trim());
    }
}
