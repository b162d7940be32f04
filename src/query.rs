// SPDX-License-Identifier: Apache-2.0

//! The relative-term-weight query: accumulate candidates, rewrite once.
//!
//! [`RelativeTermQuery`] is the caller-facing builder: construct it with a
//! threshold (validated eagerly, the only eager check), append candidate
//! terms, then call [`rewrite`](RelativeTermQuery::rewrite) against a
//! collection snapshot. Rewriting never mutates the builder; it returns a new
//! immutable [`RewrittenQuery`] each call and is idempotent for a fixed
//! snapshot. There is no way back from an output to the accumulating side.
//!
//! The output is the leaf/composite split as an enum: a match-nothing query,
//! a single-term leaf, or a disjunction of optional term clauses carrying the
//! overall boost.

use crate::scoring::weigh_terms;
use crate::segment::IndexSnapshot;
use crate::select::select_terms;
use crate::stats::{collect_term_stats, StatsError};
use crate::types::Term;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Errors surfaced by query construction and rewriting.
#[derive(Debug)]
pub enum QueryError {
    /// Threshold outside (0, 1].
    InvalidThreshold(f32),
    /// Document-frequency resolution failed; propagated unchanged from the
    /// snapshot, never retried or masked.
    Stats(StatsError),
}

impl fmt::Display for QueryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryError::InvalidThreshold(value) => {
                write!(f, "threshold must be in (0, 1], got {}", value)
            }
            QueryError::Stats(err) => write!(f, "document frequency resolution failed: {}", err),
        }
    }
}

impl std::error::Error for QueryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            QueryError::InvalidThreshold(_) => None,
            QueryError::Stats(err) => Some(err),
        }
    }
}

impl From<StatsError> for QueryError {
    fn from(err: StatsError) -> Self {
        QueryError::Stats(err)
    }
}

/// Accumulator for candidate terms plus the selection configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelativeTermQuery {
    terms: Vec<Term>,
    threshold: f32,
    min_terms: usize,
    boost: f32,
}

impl RelativeTermQuery {
    /// A query keeping terms until `threshold` of the cumulative IDF weight
    /// is covered, with no minimum-term floor.
    pub fn new(threshold: f32) -> Result<Self, QueryError> {
        Self::with_floor(threshold, 0)
    }

    /// Like [`new`](Self::new) but retaining at least `min_terms` terms
    /// regardless of the threshold.
    ///
    /// `threshold` must lie in (0, 1]; anything else (including NaN) is
    /// rejected here, before any term is accumulated.
    pub fn with_floor(threshold: f32, min_terms: usize) -> Result<Self, QueryError> {
        if !(threshold > 0.0 && threshold <= 1.0) {
            return Err(QueryError::InvalidThreshold(threshold));
        }
        Ok(RelativeTermQuery {
            terms: Vec::new(),
            threshold,
            min_terms,
            boost: 1.0,
        })
    }

    /// Append one candidate term. Duplicates are legal and independent.
    pub fn add(&mut self, term: Term) {
        self.terms.push(term);
    }

    /// Overall boost multiplier carried onto the rewritten query.
    pub fn set_boost(&mut self, boost: f32) {
        self.boost = boost;
    }

    pub fn terms(&self) -> &[Term] {
        &self.terms
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    pub fn min_terms(&self) -> usize {
        self.min_terms
    }

    pub fn boost(&self) -> f32 {
        self.boost
    }

    /// Rewrite against a snapshot: resolve statistics, weigh, select,
    /// assemble.
    ///
    /// Degenerate inputs short-circuit before touching the snapshot: no
    /// candidates yields a match-nothing query, and a single candidate is
    /// kept unconditionally - even one absent from the collection, matching
    /// nothing at execution time rather than here.
    pub fn rewrite(&self, snapshot: &dyn IndexSnapshot) -> Result<RewrittenQuery, QueryError> {
        if self.terms.is_empty() {
            return Ok(RewrittenQuery::MatchNone);
        }
        if let [term] = self.terms.as_slice() {
            return Ok(RewrittenQuery::Term {
                term: term.clone(),
                boost: self.boost,
            });
        }

        let stats = collect_term_stats(snapshot, &self.terms)?;
        let weighted = weigh_terms(&self.terms, &stats);
        let selected = select_terms(weighted, self.threshold, self.min_terms);
        Ok(assemble(selected, self.threshold, self.boost))
    }
}

/// Build the output query from a selection: the small composite-vs-nothing
/// factory. The single-term leaf only comes out of the pre-resolution bypass
/// in [`RelativeTermQuery::rewrite`].
fn assemble(selected: Vec<Term>, threshold: f32, boost: f32) -> RewrittenQuery {
    if selected.is_empty() {
        RewrittenQuery::MatchNone
    } else {
        RewrittenQuery::Disjunction {
            clauses: selected,
            threshold,
            boost,
        }
    }
}

/// The immutable result of a rewrite.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RewrittenQuery {
    /// Matches no documents: no candidates, or nothing selectable.
    MatchNone,
    /// Exact single-term match (the one-candidate bypass).
    Term { term: Term, boost: f32 },
    /// Logical OR over the selected terms, each an optional exact-match
    /// clause. Clauses are in selection order: descending IDF, insertion
    /// order within ties.
    Disjunction {
        clauses: Vec<Term>,
        threshold: f32,
        boost: f32,
    },
}

impl RewrittenQuery {
    /// The term clauses an execution engine should OR together.
    pub fn clauses(&self) -> &[Term] {
        match self {
            RewrittenQuery::MatchNone => &[],
            RewrittenQuery::Term { term, .. } => std::slice::from_ref(term),
            RewrittenQuery::Disjunction { clauses, .. } => clauses,
        }
    }

    /// The effective boost. A match-nothing query scores nothing, so its
    /// boost is the neutral 1.0.
    pub fn boost(&self) -> f32 {
        match self {
            RewrittenQuery::MatchNone => 1.0,
            RewrittenQuery::Term { boost, .. } | RewrittenQuery::Disjunction { boost, .. } => {
                *boost
            }
        }
    }

    pub fn is_match_none(&self) -> bool {
        matches!(self, RewrittenQuery::MatchNone)
    }
}

/// Deterministic human-readable rendering.
///
/// `<t1>, <t2>, ... ~(<threshold>)` for a disjunction, parenthesized with a
/// `^boost` suffix when boost != 1.0; a bare `field:text` for the leaf.
impl fmt::Display for RewrittenQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RewrittenQuery::MatchNone => Ok(()),
            RewrittenQuery::Term { term, boost } => {
                write!(f, "{}", term)?;
                if *boost != 1.0 {
                    write!(f, "^{}", boost)?;
                }
                Ok(())
            }
            RewrittenQuery::Disjunction {
                clauses,
                threshold,
                boost,
            } => {
                let needs_parens = *boost != 1.0;
                if needs_parens {
                    write!(f, "(")?;
                }
                for (i, term) in clauses.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", term)?;
                }
                if needs_parens {
                    write!(f, ")")?;
                }
                write!(f, "~({})", threshold)?;
                if needs_parens {
                    write!(f, "^{}", boost)?;
                }
                Ok(())
            }
        }
    }
}
