// SPDX-License-Identifier: Apache-2.0

//! IDF-weighted term selection for disjunctive full-text queries.
//!
//! Given candidate query terms and a document collection split across index
//! segments, this crate decides which subset of terms should participate in
//! an OR query. Rare, informative terms (high inverse document frequency) are
//! favored; common, low-information terms are dropped once a cumulative
//! weight threshold is satisfied, subject to a caller-specified minimum-term
//! floor.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌──────────────┐     ┌─────────────┐
//! │ segment.rs  │────▶│  stats.rs   │────▶│  scoring.rs  │────▶│  select.rs  │
//! │ (snapshot & │     │ (df summed  │     │ (idf =       │     │ (threshold/ │
//! │  segments)  │     │ per segment)│     │  ln(N/df))   │     │ floor walk) │
//! └─────────────┘     └─────────────┘     └──────────────┘     └─────────────┘
//!            │                                                        │
//!            ▼                                                        ▼
//! ┌──────────────────────────────────────────────────────────────────────────┐
//! │                                query.rs                                  │
//! │       (RelativeTermQuery: accumulate → rewrite → RewrittenQuery)         │
//! └──────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Usage
//!
//! ```
//! use vannus::{MemoryIndex, RelativeTermQuery, Term};
//!
//! let index = MemoryIndex::from_docs(
//!     "field",
//!     &["671 Forest Ave", "128 Colorado Ave", "1081 Ave of the Stars"],
//!     2,
//! );
//!
//! let mut query = RelativeTermQuery::new(0.8)?;
//! query.add(Term::new("field", "ave"));
//! query.add(Term::new("field", "stars"));
//!
//! let rewritten = query.rewrite(&index)?;
//! assert_eq!(rewritten.clauses()[0], Term::new("field", "stars"));
//! # Ok::<(), vannus::QueryError>(())
//! ```
//!
//! The statistics pass visits every segment and may touch storage; everything
//! after it is pure computation over its inputs, safe to run concurrently for
//! independent queries or snapshots.

// Module declarations
mod query;
mod scoring;
mod segment;
mod select;
mod stats;
mod types;
mod utils;

// Re-exports for public API
pub use query::{QueryError, RelativeTermQuery, RewrittenQuery};
pub use scoring::{idf, weigh_terms, WeightedTerm};
pub use segment::{IndexSnapshot, MemoryIndex, MemorySegment, SegmentReader};
pub use select::select_terms;
#[cfg(feature = "parallel")]
pub use stats::collect_term_stats_parallel;
pub use stats::{collect_term_stats, StatsError};
pub use types::{Term, TermStatistics};
pub use utils::normalize;
