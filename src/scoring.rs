// SPDX-License-Identifier: Apache-2.0

//! Term weighting.
//!
//! # INVARIANTS (DO NOT VIOLATE)
//!
//! ## IDF_FORMULA
//! The weight of a term is exactly `ln(N / df)`. No "+1" smoothing, no
//! floor, no search-engine-specific variants. Downstream selection depends on weights
//! being zero for terms present in every document and undefined for absent
//! ones, so the exclusion of df = 0 happens here, not in the formula.
//!
//! ## DF_POSITIVE
//! `idf` must never be called with `doc_freq == 0`. Absent terms are dropped
//! by [`weigh_terms`] before the formula is applied.

use crate::types::{Term, TermStatistics};

/// Inverse document frequency: `ln(total_docs / doc_freq)`.
///
/// Defined only for `doc_freq > 0`. A term in every document weighs 0; a
/// term in a single document of N weighs `ln(N)`.
#[inline]
pub fn idf(total_docs: u32, doc_freq: u32) -> f64 {
    debug_assert!(doc_freq > 0, "idf is undefined for df = 0");
    debug_assert!(
        doc_freq <= total_docs,
        "df {} exceeds collection size {}",
        doc_freq,
        total_docs
    );
    (f64::from(total_docs) / f64::from(doc_freq)).ln()
}

/// One candidate term with its resolved IDF weight.
#[derive(Debug, Clone, PartialEq)]
pub struct WeightedTerm {
    pub term: Term,
    pub idf: f64,
}

/// Weigh candidates against resolved statistics.
///
/// Candidates absent from the collection (no df entry) are dropped here and
/// never reach selection. Order and duplicates of the input are preserved for
/// the survivors; the selector's tie-break leans on that order.
pub fn weigh_terms(candidates: &[Term], stats: &TermStatistics) -> Vec<WeightedTerm> {
    candidates
        .iter()
        .filter_map(|term| {
            stats.doc_freq(term).map(|df| WeightedTerm {
                term: term.clone(),
                idf: idf(stats.total_docs, df),
            })
        })
        .collect()
}
