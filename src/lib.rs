//! Trellis: an embeddable, in-memory transactional property-graph engine.
//!
//! Callers declare typed vertex schemas, open a transaction, stage vertex
//! and edge mutations validated against those schemas, and atomically
//! commit or roll back the staged work. Committed data is queried with
//! typed-triple patterns. The engine performs no I/O and keeps no
//! background tasks; every operation is synchronous and serialized through
//! the [`GraphEngine`] façade.
//!
//! Validation happens at staging time, never at commit time: a transaction
//! can never reach commit with invalid content, so commit is an atomic,
//! always-consistent merge.

#![warn(missing_docs)]

pub mod engine;
pub mod error;
pub mod logging;
pub mod model;
pub mod query;
pub mod schema;

pub use engine::{
    AppliedOp, EngineConfig, EngineSnapshot, GraphEngine, GraphStore, StagedEdge, StagedVertex,
    Transaction, TxId, TxState,
};
pub use error::{GraphError, Result};
pub use logging::init_logging;
pub use model::{Edge, PropertyType, PropertyValue, Vertex, VertexId};
pub use query::{PatternMatch, TriplePattern};
pub use schema::{PropertyDef, SchemaRegistry, VertexTypeSchema};
