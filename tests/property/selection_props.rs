//! Properties of the threshold/floor selection algorithm.

use proptest::prelude::*;
use vannus::{select_terms, Term, WeightedTerm};

// ============================================================================
// STRATEGIES
// ============================================================================

/// Random positive IDF weights, the realistic range for ln(N/df).
fn idf_strategy() -> impl Strategy<Value = f64> {
    0.001f64..15.0
}

/// A weighted candidate set with distinct term texts.
fn candidates_strategy(max: usize) -> impl Strategy<Value = Vec<WeightedTerm>> {
    prop::collection::vec(idf_strategy(), 1..max).prop_map(|weights| {
        weights
            .into_iter()
            .enumerate()
            .map(|(i, idf)| WeightedTerm {
                term: Term::new("field", format!("t{i}")),
                idf,
            })
            .collect()
    })
}

fn total_idf(candidates: &[WeightedTerm]) -> f64 {
    candidates.iter().map(|w| w.idf).sum()
}

proptest! {
    /// Maximal threshold ⇒ full retention.
    #[test]
    fn threshold_one_retains_every_candidate(candidates in candidates_strategy(12)) {
        let expected = candidates.len();
        let selected = select_terms(candidates, 1.0, 0);
        prop_assert_eq!(selected.len(), expected);
    }

    /// Minimal threshold with no floor ⇒ exactly the heaviest term.
    #[test]
    fn tiny_threshold_keeps_single_heaviest(candidates in candidates_strategy(12)) {
        prop_assume!(candidates.len() >= 2);
        let heaviest = candidates
            .iter()
            .cloned()
            .reduce(|a, b| if b.idf > a.idf { b } else { a })
            .unwrap();

        let selected = select_terms(candidates, 0.000_001, 0);
        prop_assert_eq!(selected.len(), 1);
        prop_assert_eq!(selected[0].clone(), heaviest.term);
    }

    /// Floor dominates threshold: at least k terms always survive.
    #[test]
    fn floor_dominates_threshold(
        candidates in candidates_strategy(12),
        floor in 0usize..12,
        threshold in 0.000_001f32..=1.0,
    ) {
        let len = candidates.len();
        let selected = select_terms(candidates, threshold, floor);
        prop_assert!(selected.len() >= floor.min(len));
    }

    /// Selected terms form a prefix of the weight-sorted candidate list and
    /// never include anything outside the input.
    #[test]
    fn selection_is_a_prefix_of_the_ranking(
        candidates in candidates_strategy(12),
        threshold in 0.000_001f32..=1.0,
        floor in 0usize..6,
    ) {
        let mut ranked = candidates.clone();
        ranked.sort_by(|a, b| b.idf.total_cmp(&a.idf));

        let selected = select_terms(candidates, threshold, floor);
        for (i, term) in selected.iter().enumerate() {
            prop_assert_eq!(term.clone(), ranked[i].term.clone());
        }
    }

    /// The stopping rule: either everything was selected, or the selection's
    /// cumulative share reached the threshold (and the floor was met).
    #[test]
    fn selection_covers_the_threshold(
        candidates in candidates_strategy(12),
        threshold in 0.01f32..=1.0,
        floor in 0usize..6,
    ) {
        let total = total_idf(&candidates);
        let len = candidates.len();
        let mut ranked = candidates.clone();
        ranked.sort_by(|a, b| b.idf.total_cmp(&a.idf));

        let selected = select_terms(candidates, threshold, floor);
        if selected.len() < len {
            let covered: f64 = ranked[..selected.len()].iter().map(|w| w.idf).sum();
            prop_assert!(covered / total >= f64::from(threshold) - 1e-9);
            prop_assert!(selected.len() >= floor);
        }
    }

    /// Selection is deterministic: the same input always gives the same output.
    #[test]
    fn selection_is_deterministic(
        candidates in candidates_strategy(12),
        threshold in 0.000_001f32..=1.0,
        floor in 0usize..6,
    ) {
        let first = select_terms(candidates.clone(), threshold, floor);
        let second = select_terms(candidates, threshold, floor);
        prop_assert_eq!(first, second);
    }
}
