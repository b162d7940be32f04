// SPDX-License-Identifier: Apache-2.0

//! Read-only views over a partitioned document collection.
//!
//! The collection is split into segments, each holding a subset of documents
//! and its own local term statistics. The selection pipeline only ever needs
//! two things from a segment: its live document count and the local document
//! frequency of a term. Everything else about the storage engine stays behind
//! these traits.
//!
//! `MemorySegment`/`MemoryIndex` are the in-crate reference implementation,
//! built from raw documents with a word-boundary tokenizer. They back the
//! test suite and small embedded use cases; a real engine implements the
//! traits over its own on-disk segments.
//!
//! # INVARIANTS (DO NOT VIOLATE)
//!
//! 1. **DF_BOUNDED**: a segment's local df for any term never exceeds that
//!    segment's `num_docs`.
//! 2. **NO_ZERO_ENTRIES**: `MemorySegment` stores no df = 0 entries; absence
//!    from the map means absence from the segment.

use crate::types::Term;
use crate::utils::normalize;
use std::collections::{HashMap, HashSet};
use std::io;

/// Read-only view of one partition of the collection.
///
/// Lookups are fallible because a real implementation may hit storage
/// (on-disk term dictionaries) on every call.
pub trait SegmentReader: Sync {
    /// Number of live documents in this segment.
    fn num_docs(&self) -> u32;

    /// Whether this segment contains the given field at all. Resolution skips
    /// whole term groups for segments where their field is absent.
    fn has_field(&self, field: &str) -> bool;

    /// Local document frequency of `term`, or `None` when the field or the
    /// term is absent from this segment.
    fn doc_freq(&self, term: &Term) -> io::Result<Option<u32>>;
}

/// Read-only snapshot of the whole partitioned collection.
///
/// A snapshot is fixed for the duration of one rewrite; callers pass a fresh
/// one per retrieval attempt.
pub trait IndexSnapshot: Sync {
    /// Total live documents across every segment.
    fn num_docs(&self) -> u32;

    /// Number of partitions in this snapshot.
    fn num_segments(&self) -> usize;

    /// Borrow one partition by ordinal. Ordinals are `0..num_segments()`.
    fn segment(&self, ord: usize) -> &dyn SegmentReader;
}

/// Word boundary detection: checks if character is a word separator.
fn is_word_boundary(c: char) -> bool {
    !c.is_alphanumeric()
}

/// Tokenize text into normalized words.
///
/// Splits on non-alphanumeric characters and normalizes each word. No
/// stop-word filtering: deciding which common terms to keep is the whole
/// point of the selection pipeline, so the index must retain them.
pub(crate) fn tokenize(text: &str) -> Vec<String> {
    text.split(is_word_boundary)
        .filter(|word| !word.is_empty())
        .map(normalize)
        .collect()
}

/// One in-memory partition: per-field term → document-frequency maps.
#[derive(Debug, Clone, Default)]
pub struct MemorySegment {
    num_docs: u32,
    /// field name → (token → local document frequency)
    fields: HashMap<String, HashMap<String, u32>>,
}

impl MemorySegment {
    pub fn new() -> Self {
        MemorySegment::default()
    }

    /// Index one document given as (field, raw text) pairs.
    ///
    /// Each field's text is tokenized and deduplicated per document, so a
    /// token repeated within one document still counts once toward df.
    pub fn index_doc(&mut self, doc: &[(&str, &str)]) {
        self.num_docs += 1;
        for (field, text) in doc {
            let entry = self.fields.entry((*field).to_string()).or_default();
            let unique: HashSet<String> = tokenize(text).into_iter().collect();
            for token in unique {
                *entry.entry(token).or_insert(0) += 1;
            }
        }
    }

    /// Build a single-field segment from raw documents.
    pub fn from_docs(field: &str, docs: &[&str]) -> Self {
        let mut segment = MemorySegment::new();
        for text in docs {
            segment.index_doc(&[(field, text)]);
        }
        segment
    }
}

impl SegmentReader for MemorySegment {
    fn num_docs(&self) -> u32 {
        self.num_docs
    }

    fn has_field(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    fn doc_freq(&self, term: &Term) -> io::Result<Option<u32>> {
        Ok(self
            .fields
            .get(&term.field)
            .and_then(|terms| terms.get(&term.text))
            .copied())
    }
}

/// An in-memory collection snapshot: a list of segments.
#[derive(Debug, Clone, Default)]
pub struct MemoryIndex {
    segments: Vec<MemorySegment>,
}

impl MemoryIndex {
    pub fn new() -> Self {
        MemoryIndex::default()
    }

    pub fn push_segment(&mut self, segment: MemorySegment) {
        self.segments.push(segment);
    }

    /// Build a single-field index from raw documents, partitioned into
    /// `num_segments` contiguous chunks.
    ///
    /// Partitioning must not change any global statistic; the property tests
    /// split the same corpus at different widths and compare.
    pub fn from_docs(field: &str, docs: &[&str], num_segments: usize) -> Self {
        let num_segments = num_segments.max(1);
        let chunk = docs.len().div_ceil(num_segments).max(1);
        let mut index = MemoryIndex::new();
        for part in docs.chunks(chunk) {
            index.push_segment(MemorySegment::from_docs(field, part));
        }
        index
    }
}

impl IndexSnapshot for MemoryIndex {
    fn num_docs(&self) -> u32 {
        self.segments.iter().map(MemorySegment::num_docs).sum()
    }

    fn num_segments(&self) -> usize {
        self.segments.len()
    }

    fn segment(&self, ord: usize) -> &dyn SegmentReader {
        &self.segments[ord]
    }
}

/// Check that a memory segment is well-formed (debug assertion).
#[cfg(any(debug_assertions, test))]
#[allow(dead_code)]
pub(crate) fn check_segment_well_formed(segment: &MemorySegment) -> bool {
    for terms in segment.fields.values() {
        for df in terms.values() {
            // INVARIANT: NO_ZERO_ENTRIES
            if *df == 0 {
                return false;
            }
            // INVARIANT: DF_BOUNDED
            if *df > segment.num_docs {
                return false;
            }
        }
    }
    true
}
