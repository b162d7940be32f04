// SPDX-License-Identifier: Apache-2.0

//! Cross-segment document-frequency resolution.
//!
//! Because a collection is composed of many segments and a term can appear in
//! many of them, every segment must be visited to collect a term's global
//! document frequency. Per-segment counts merge by plain addition, which is
//! commutative and associative, so the parallel variant resolves segments
//! independently and folds the partial maps in a single reduction.
//!
//! # INVARIANTS (DO NOT VIOLATE)
//!
//! 1. **SUM_ACROSS_SEGMENTS**: the global df of a term equals the sum of its
//!    local dfs over every segment. Splitting a corpus differently must not
//!    change any statistic.
//! 2. **NO_ZERO_ENTRIES**: terms absent from every segment are omitted from
//!    the result, never stored with df = 0.
//! 3. **FAIL_LOUD**: a storage error in any segment aborts resolution and is
//!    reported with the failing segment's ordinal. Partial statistics would
//!    silently corrupt the ranking.

use crate::segment::IndexSnapshot;
use crate::types::{Term, TermStatistics};
use std::collections::HashMap;
use std::fmt;
use std::io;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// A segment lookup failed during document-frequency resolution.
///
/// Carries the ordinal of the failing segment so storage problems can be
/// traced back to one partition.
#[derive(Debug)]
pub struct StatsError {
    ord: usize,
    source: io::Error,
}

impl StatsError {
    pub fn new(ord: usize, source: io::Error) -> Self {
        StatsError { ord, source }
    }

    /// Ordinal of the segment whose lookup failed.
    pub fn segment_ord(&self) -> usize {
        self.ord
    }
}

impl fmt::Display for StatsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "segment {}: {}", self.ord, self.source)
    }
}

impl std::error::Error for StatsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.source)
    }
}

/// Resolve global document frequencies for `terms` against `snapshot`.
///
/// Visits every segment once, grouping candidate terms by field so a segment
/// that lacks a field is skipped for that whole group. Duplicate candidates
/// are deduplicated here; each distinct term is looked up once per segment.
///
/// Terms absent from the whole collection are omitted from the result. That
/// is a normal outcome, not an error.
pub fn collect_term_stats(
    snapshot: &dyn IndexSnapshot,
    terms: &[Term],
) -> Result<TermStatistics, StatsError> {
    let by_field = group_by_field(terms);
    let mut doc_freqs: HashMap<Term, u32> = HashMap::new();

    for ord in 0..snapshot.num_segments() {
        let segment = snapshot.segment(ord);
        resolve_segment(segment, ord, &by_field, &mut doc_freqs)?;
    }

    Ok(TermStatistics {
        total_docs: snapshot.num_docs(),
        doc_freqs,
    })
}

/// Parallel resolution: one rayon task per segment, merged by addition.
///
/// Behaves exactly like [`collect_term_stats`]; only the visit order differs,
/// which addition cannot observe.
#[cfg(feature = "parallel")]
pub fn collect_term_stats_parallel(
    snapshot: &dyn IndexSnapshot,
    terms: &[Term],
) -> Result<TermStatistics, StatsError> {
    let by_field = group_by_field(terms);

    // MAP PHASE: resolve each segment independently.
    let partials: Vec<HashMap<Term, u32>> = (0..snapshot.num_segments())
        .into_par_iter()
        .map(|ord| {
            let mut local = HashMap::new();
            resolve_segment(snapshot.segment(ord), ord, &by_field, &mut local)?;
            Ok(local)
        })
        .collect::<Result<_, StatsError>>()?;

    // REDUCE PHASE: fold partial counts into global totals.
    let mut doc_freqs: HashMap<Term, u32> = HashMap::new();
    for partial in partials {
        for (term, df) in partial {
            *doc_freqs.entry(term).or_insert(0) += df;
        }
    }

    Ok(TermStatistics {
        total_docs: snapshot.num_docs(),
        doc_freqs,
    })
}

/// Group distinct candidate terms by field. Insertion order within a group is
/// irrelevant here; only sums come out of resolution.
fn group_by_field(terms: &[Term]) -> HashMap<&str, Vec<&Term>> {
    let mut by_field: HashMap<&str, Vec<&Term>> = HashMap::new();
    for term in terms {
        let group = by_field.entry(term.field.as_str()).or_default();
        if !group.contains(&term) {
            group.push(term);
        }
    }
    by_field
}

/// Add one segment's local document frequencies into `doc_freqs`.
fn resolve_segment(
    segment: &dyn crate::segment::SegmentReader,
    ord: usize,
    by_field: &HashMap<&str, Vec<&Term>>,
    doc_freqs: &mut HashMap<Term, u32>,
) -> Result<(), StatsError> {
    for (field, group) in by_field {
        if !segment.has_field(field) {
            // field does not exist in this segment
            continue;
        }
        for term in group {
            let local = segment
                .doc_freq(term)
                .map_err(|source| StatsError::new(ord, source))?;
            match local {
                Some(df) if df > 0 => {
                    *doc_freqs.entry((*term).clone()).or_insert(0) += df;
                }
                _ => {}
            }
        }
    }
    Ok(())
}
