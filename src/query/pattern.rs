//! Typed-triple patterns and their evaluation.

use serde::{Deserialize, Serialize};

use crate::engine::GraphStore;
use crate::model::{Edge, Vertex};

/// A `(source type, edge label, target type)` match pattern.
///
/// This is the only pattern shape in contract; longer chains are future
/// work. All three elements are exact matches against committed data.
///
/// # Example
///
/// ```rust
/// use trellis::TriplePattern;
///
/// let pattern = TriplePattern::new("person", "knows", "person");
/// assert_eq!(pattern, TriplePattern::from(["person", "knows", "person"]));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriplePattern {
    /// Required type of the edge's source vertex.
    pub source_type: String,
    /// Required edge label.
    pub label: String,
    /// Required type of the edge's target vertex.
    pub target_type: String,
}

impl TriplePattern {
    /// Creates a pattern from its three elements.
    pub fn new(
        source_type: impl Into<String>,
        label: impl Into<String>,
        target_type: impl Into<String>,
    ) -> Self {
        Self {
            source_type: source_type.into(),
            label: label.into(),
            target_type: target_type.into(),
        }
    }

    fn matches(&self, source: &Vertex, edge: &Edge, target: &Vertex) -> bool {
        edge.label == self.label
            && source.vertex_type == self.source_type
            && target.vertex_type == self.target_type
    }
}

impl From<[&str; 3]> for TriplePattern {
    fn from([source_type, label, target_type]: [&str; 3]) -> Self {
        Self::new(source_type, label, target_type)
    }
}

/// One match produced by a pattern query: the edge plus both endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternMatch {
    /// The edge's source vertex.
    pub source: Vertex,
    /// The matched edge.
    pub edge: Edge,
    /// The edge's target vertex.
    pub target: Vertex,
}

/// Matches `pattern` against every committed edge.
///
/// Results follow the store's edge order, which is stable for a given
/// snapshot. An empty result is a valid outcome, not an error.
pub(crate) fn evaluate(store: &GraphStore, pattern: &TriplePattern) -> Vec<PatternMatch> {
    store
        .edges()
        .iter()
        .filter_map(|edge| {
            let source = store.vertex(&edge.from)?;
            let target = store.vertex(&edge.to)?;
            pattern
                .matches(source, edge, target)
                .then(|| PatternMatch {
                    source: source.clone(),
                    edge: edge.clone(),
                    target: target.clone(),
                })
        })
        .collect()
}
