//! Property tests for chunk length invariants and search ordering.

use polqa_rag::chunking::{Chunker, ParagraphChunker};
use polqa_rag::document::Chunk;
use polqa_rag::embedding::{EmbeddingProvider, TermFrequencyEmbedder};
use polqa_rag::index::VectorIndex;
use polqa_rag::retriever::truncate_snippet;
use proptest::prelude::*;

/// **Chunk length invariant**: every chunk a default chunker retains
/// has trimmed length of at least 50 characters, and chunks produced
/// from sentence-delimited text stay at or under the 800-character
/// threshold. (Run-on paragraphs without `". "` are the documented
/// exception and are excluded by the generator.)
mod prop_chunk_lengths {
    use super::*;

    /// Sentence-delimited paragraphs: every sentence is well under the
    /// threshold, so no oversized run-on chunks can appear.
    fn arb_document() -> impl Strategy<Value = String> {
        let sentence = "[a-z ]{10,120}";
        let paragraph = proptest::collection::vec(sentence, 1..12)
            .prop_map(|sentences| sentences.join(". "));
        proptest::collection::vec(paragraph, 0..8).prop_map(|paragraphs| paragraphs.join("\n\n"))
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn retained_chunks_are_within_bounds(text in arb_document()) {
            let chunker = ParagraphChunker::default();
            let chunks = chunker.chunk(&text);

            for (i, chunk) in chunks.iter().enumerate() {
                let len = chunk.text.chars().count();
                prop_assert!(len >= 50, "chunk {i} under minimum: {len}");
                prop_assert!(len <= 800, "chunk {i} over threshold: {len}");
                prop_assert_eq!(chunk.text.trim(), chunk.text.as_str());
                prop_assert_eq!(chunk.ordinal, i);
            }
        }
    }
}

/// **Search ordering**: for any set of chunks and any query, the index
/// SHALL return results ordered by non-decreasing squared-L2 distance,
/// with at most `min(k, len)` results.
mod prop_search_ordering {
    use super::*;

    const VOCABULARY: [&str; 6] = ["alpha", "bravo", "charlie", "delta", "echo", "foxtrot"];

    /// Texts built from the fixed vocabulary so distances vary.
    fn arb_text() -> impl Strategy<Value = String> {
        proptest::collection::vec(proptest::sample::select(&VOCABULARY[..]), 1..12)
            .prop_map(|words| words.join(" "))
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn results_ordered_ascending_and_bounded_by_k(
            texts in proptest::collection::vec(arb_text(), 1..20),
            query in arb_text(),
            k in 1usize..25,
        ) {
            let rt = tokio::runtime::Runtime::new().unwrap();
            let (hits, chunk_count) = rt.block_on(async {
                let embedder = TermFrequencyEmbedder::new(VOCABULARY);
                let chunks: Vec<Chunk> = texts
                    .iter()
                    .enumerate()
                    .map(|(ordinal, text)| Chunk { ordinal, text: text.clone() })
                    .collect();
                let index = VectorIndex::build(&embedder, &chunks).await.unwrap();
                let query_embedding = embedder.embed(&query).await.unwrap();
                (index.search(&query_embedding, k).unwrap(), chunks.len())
            });

            prop_assert!(hits.len() <= k);
            prop_assert!(hits.len() <= chunk_count);
            prop_assert_eq!(hits.len(), k.min(chunk_count));

            for window in hits.windows(2) {
                prop_assert!(
                    window[0].1 <= window[1].1,
                    "results not in ascending distance order: {} > {}",
                    window[0].1,
                    window[1].1,
                );
            }
        }
    }
}

/// **Idempotent truncation**: applying the snippet bound twice yields
/// the same string as applying it once, for any input.
mod prop_truncation_idempotent {
    use super::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        #[test]
        fn truncate_twice_equals_once(text in ".{0,1200}", limit in 0usize..600) {
            let once = truncate_snippet(&text, limit);
            let twice = truncate_snippet(&once, limit);
            prop_assert_eq!(&once, &twice);
            prop_assert!(once.chars().count() <= limit);
        }
    }
}
