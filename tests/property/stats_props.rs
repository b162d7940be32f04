//! Properties of cross-segment statistics and the end-to-end rewrite.

use crate::common::term;
use proptest::prelude::*;
use vannus::{collect_term_stats, MemoryIndex, RelativeTermQuery, Term};

// ============================================================================
// STRATEGIES
// ============================================================================

/// Random word-like strings over a small alphabet, so collisions (shared
/// terms across documents) actually happen.
fn word_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[ab][abc]{0,2}").unwrap()
}

/// Random document text (multiple words).
fn document_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(word_strategy(), 1..6).prop_map(|words| words.join(" "))
}

/// A corpus of documents.
fn corpus_strategy() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(document_strategy(), 1..12)
}

fn index_of(corpus: &[String], num_segments: usize) -> MemoryIndex {
    let docs: Vec<&str> = corpus.iter().map(String::as_str).collect();
    MemoryIndex::from_docs("field", &docs, num_segments)
}

proptest! {
    /// Global statistics are invariant under re-partitioning.
    #[test]
    fn partitioning_does_not_change_statistics(
        corpus in corpus_strategy(),
        num_segments in 1usize..8,
    ) {
        let candidates = [term("a"), term("ab"), term("abc"), term("b")];
        let baseline = collect_term_stats(&index_of(&corpus, 1), &candidates).unwrap();
        let split = collect_term_stats(&index_of(&corpus, num_segments), &candidates).unwrap();
        prop_assert_eq!(baseline, split);
    }

    /// Every resolved df is positive and bounded by the collection size.
    #[test]
    fn resolved_frequencies_are_bounded(
        corpus in corpus_strategy(),
        num_segments in 1usize..8,
    ) {
        let candidates = [term("a"), term("b"), term("ba"), term("cc")];
        let stats = collect_term_stats(&index_of(&corpus, num_segments), &candidates).unwrap();

        prop_assert_eq!(stats.total_docs as usize, corpus.len());
        for (t, df) in &stats.doc_freqs {
            prop_assert!(*df > 0, "df = 0 stored for {t}");
            prop_assert!(*df <= stats.total_docs);
        }
    }

    /// A term that is in no document never appears in a rewrite, regardless
    /// of threshold or floor.
    #[test]
    fn absent_terms_never_selected(
        corpus in corpus_strategy(),
        threshold in 0.000_001f32..=1.0,
        floor in 0usize..6,
    ) {
        // "zzz" cannot be produced by the word strategy.
        let absent = term("zzz");
        let mut query = RelativeTermQuery::with_floor(threshold, floor).unwrap();
        query.add(absent.clone());
        query.add(term("a"));
        query.add(term("b"));

        let rewritten = query.rewrite(&index_of(&corpus, 2)).unwrap();
        prop_assert!(!rewritten.clauses().contains(&absent));
    }

    /// Selected clauses are always drawn from the candidate set.
    #[test]
    fn clauses_are_a_subset_of_candidates(
        corpus in corpus_strategy(),
        threshold in 0.000_001f32..=1.0,
    ) {
        let candidates: Vec<Term> = ["a", "ab", "b", "bc"].iter().map(|t| term(t)).collect();
        let mut query = RelativeTermQuery::new(threshold).unwrap();
        for candidate in &candidates {
            query.add(candidate.clone());
        }

        let rewritten = query.rewrite(&index_of(&corpus, 3)).unwrap();
        for clause in rewritten.clauses() {
            prop_assert!(candidates.contains(clause));
        }
    }
}
