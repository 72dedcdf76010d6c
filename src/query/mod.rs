//! Pattern-based querying over the committed graph.
//!
//! Queries read the committed store only; they never see staged mutations
//! and never touch the transaction ledger.

mod pattern;

pub use pattern::{PatternMatch, TriplePattern};

pub(crate) use pattern::evaluate;
