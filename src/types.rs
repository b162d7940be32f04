// SPDX-License-Identifier: Apache-2.0

//! The building blocks of a term-selection query.
//!
//! # Invariants (the stuff that breaks if you ignore it)
//!
//! - **TermStatistics**: `doc_freq(t) <= total_docs` for every resolved term,
//!   and no entry has `doc_freq == 0`. A term absent from every segment is
//!   simply missing from the map. Both matter downstream: `idf` divides by
//!   `doc_freq` and takes a log of the ratio.
//!
//! Statistics are computed fresh for every rewrite. The underlying collection
//! can change between calls, so nothing here is meant to be cached.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// An immutable (field, token) pair identifying one indexed unit of text.
///
/// Equality and hashing are by value. Terms are supplied by the caller before
/// any resolution happens; the query accumulates them in insertion order,
/// which is what breaks ties between equal-IDF terms during selection.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Term {
    /// Name of the indexed field this token lives in.
    pub field: String,
    /// The token text, already analyzed/normalized by the caller.
    pub text: String,
}

impl Term {
    pub fn new(field: impl Into<String>, text: impl Into<String>) -> Self {
        Term {
            field: field.into(),
            text: text.into(),
        }
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.field, self.text)
    }
}

/// Global document-frequency statistics for one rewrite.
///
/// `total_docs` is the live document count of the whole snapshot, summed
/// across segments. `doc_freqs` holds the cross-segment document frequency of
/// every candidate term that exists somewhere in the collection; terms with
/// df = 0 are omitted rather than stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermStatistics {
    pub total_docs: u32,
    pub doc_freqs: HashMap<Term, u32>,
}

impl TermStatistics {
    /// Statistics for an empty collection: no documents, no resolved terms.
    pub fn empty() -> Self {
        TermStatistics {
            total_docs: 0,
            doc_freqs: HashMap::new(),
        }
    }

    /// Cross-segment document frequency of `term`, or `None` when the term is
    /// absent from the entire collection.
    #[inline]
    pub fn doc_freq(&self, term: &Term) -> Option<u32> {
        self.doc_freqs.get(term).copied()
    }

    /// Number of candidate terms that resolved to a positive frequency.
    pub fn resolved_len(&self) -> usize {
        self.doc_freqs.len()
    }
}
