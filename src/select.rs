// SPDX-License-Identifier: Apache-2.0

//! Threshold-based term selection.
//!
//! Given weighted candidates, a relative threshold in (0, 1] and a
//! minimum-term floor, keep the highest-IDF terms until their cumulative
//! share of the total weight satisfies the threshold. The stopping check runs
//! *before* each term is added, using the share accumulated so far, so the
//! final selection covers at least `threshold` of the total weight rounded up
//! to whole terms - never an exact cutoff.
//!
//! # INVARIANTS (DO NOT VIOLATE)
//!
//! 1. **DESCENDING_WEIGHT**: candidates are walked in descending IDF order.
//! 2. **STABLE_TIES**: equal-IDF terms keep their insertion order (stable
//!    sort). This is the documented tie-break; equal-weight terms are all
//!    retained, never collapsed.
//! 3. **FLOOR_DOMINATES**: terms keep being added until `min_terms` are
//!    selected, even when the threshold is already satisfied.
//! 4. **FULL_RETENTION_AT_ONE**: threshold = 1.0 keeps every weighted
//!    candidate. This needs an explicit fast path: with a zero-weight term in
//!    the set (df = N), the shares of the others sum to exactly 1.0 and the
//!    running check would otherwise drop the trailing term.

use crate::scoring::WeightedTerm;
use crate::types::Term;

/// Select the subset of weighted candidates to keep, in descending IDF order.
///
/// Candidates must already be filtered to df > 0 (see
/// [`weigh_terms`](crate::scoring::weigh_terms)); a zero *total* weight is
/// still guarded and yields an empty selection rather than a division fault.
pub fn select_terms(
    mut candidates: Vec<WeightedTerm>,
    threshold: f32,
    min_terms: usize,
) -> Vec<Term> {
    if candidates.is_empty() {
        return Vec::new();
    }
    if candidates.len() == 1 {
        // A singleton is selected unconditionally; threshold and floor are
        // irrelevant.
        return vec![candidates.remove(0).term];
    }

    let total: f64 = candidates.iter().map(|w| w.idf).sum();
    if total <= 0.0 {
        // Every candidate is in every document. Nothing is selectable.
        return Vec::new();
    }

    // INVARIANT: DESCENDING_WEIGHT + STABLE_TIES
    candidates.sort_by(|a, b| b.idf.total_cmp(&a.idf));

    // INVARIANT: FULL_RETENTION_AT_ONE
    if threshold >= 1.0 {
        return candidates.into_iter().map(|w| w.term).collect();
    }

    let threshold = f64::from(threshold);
    let mut selected = Vec::new();
    let mut running = 0.0f64;
    for weighted in candidates {
        if running >= threshold && selected.len() >= min_terms {
            break;
        }
        running += weighted.idf / total;
        selected.push(weighted.term);
    }

    debug_assert!(running >= threshold || selected.len() >= min_terms);
    selected
}
