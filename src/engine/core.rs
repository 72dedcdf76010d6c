//! The engine façade: the single entry point callers hold.

use std::collections::BTreeMap;

use parking_lot::Mutex;
use serde::Serialize;

use crate::engine::config::EngineConfig;
use crate::engine::state::EngineState;
use crate::engine::store::GraphStore;
use crate::engine::transaction::{AppliedOp, Transaction, TxId};
use crate::error::Result;
use crate::model::{PropertyValue, Vertex, VertexId};
use crate::query::{PatternMatch, TriplePattern};
use crate::schema::{PropertyDef, VertexTypeSchema};

/// An embeddable, in-memory transactional property-graph engine.
///
/// `GraphEngine` owns the one mutable engine state behind a mutex and
/// applies operations one at a time, in call order. Every operation
/// returns its result together with an [`EngineSnapshot`] of the state the
/// operation produced, so callers can observe state without re-reading it.
/// Snapshots are immutable values and stay valid across later mutations.
///
/// # Example
///
/// ```rust
/// use std::collections::BTreeMap;
/// use trellis::{GraphEngine, PropertyDef, PropertyType, PropertyValue, TriplePattern};
///
/// let engine = GraphEngine::new();
/// engine.define_vertex_type(
///     "person",
///     vec![
///         PropertyDef::required("name", PropertyType::String),
///         PropertyDef::optional("age", PropertyType::Int),
///     ],
/// );
///
/// let (tx, _) = engine.begin_transaction();
/// let alice = BTreeMap::from([("name".to_string(), PropertyValue::from("Alice"))]);
/// let bob = BTreeMap::from([("name".to_string(), PropertyValue::from("Bob"))]);
/// engine.add_vertex(tx, "person", "1", alice).0?;
/// engine.add_vertex(tx, "person", "2", bob).0?;
/// engine.add_edge(tx, "1", "2", "knows").0?;
///
/// let (applied, snapshot) = engine.commit_transaction(tx);
/// assert_eq!(applied?.len(), 3);
/// assert_eq!(snapshot.vertex_count(), 2);
///
/// let (matches, _) = engine.query(&TriplePattern::new("person", "knows", "person"));
/// assert_eq!(matches.len(), 1);
/// # Ok::<(), trellis::GraphError>(())
/// ```
#[derive(Debug)]
pub struct GraphEngine {
    state: Mutex<EngineState>,
}

impl Default for GraphEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl GraphEngine {
    /// Creates an engine with the default configuration.
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    /// Creates an engine with the given configuration.
    pub fn with_config(config: EngineConfig) -> Self {
        Self {
            state: Mutex::new(EngineState::new(config)),
        }
    }

    fn apply<T>(&self, op: impl FnOnce(&mut EngineState) -> T) -> (T, EngineSnapshot) {
        let mut state = self.state.lock();
        let result = op(&mut state);
        let snapshot = EngineSnapshot {
            state: state.clone(),
        };
        (result, snapshot)
    }

    /// Registers or replaces the schema for `vertex_type`.
    ///
    /// Always succeeds; the schema mutation is reported as the returned
    /// state itself, there is no separate result value.
    pub fn define_vertex_type(
        &self,
        vertex_type: &str,
        defs: Vec<PropertyDef>,
    ) -> EngineSnapshot {
        self.apply(|state| state.define_vertex_type(vertex_type, defs))
            .1
    }

    /// Opens a new transaction and returns its id.
    ///
    /// Ids are strictly increasing for the lifetime of the engine and are
    /// never reused.
    pub fn begin_transaction(&self) -> (TxId, EngineSnapshot) {
        self.apply(|state| state.begin())
    }

    /// Stages a vertex into transaction `tx_id` after validating it.
    ///
    /// Validation errors are recoverable and leave the transaction's
    /// staged buffers exactly as they were.
    ///
    /// # Panics
    ///
    /// Panics when `tx_id` was never allocated by this engine.
    pub fn add_vertex(
        &self,
        tx_id: TxId,
        vertex_type: &str,
        vertex_id: impl Into<VertexId>,
        properties: BTreeMap<String, PropertyValue>,
    ) -> (Result<()>, EngineSnapshot) {
        let vertex_id = vertex_id.into();
        self.apply(|state| state.add_vertex(tx_id, vertex_type, vertex_id, properties))
    }

    /// Stages an edge into transaction `tx_id` after validating that both
    /// endpoints are committed or staged in the same transaction.
    ///
    /// # Panics
    ///
    /// Panics when `tx_id` was never allocated by this engine.
    pub fn add_edge(
        &self,
        tx_id: TxId,
        from: impl Into<VertexId>,
        to: impl Into<VertexId>,
        label: &str,
    ) -> (Result<()>, EngineSnapshot) {
        let (from, to) = (from.into(), to.into());
        self.apply(|state| state.add_edge(tx_id, from, to, label))
    }

    /// Atomically merges transaction `tx_id`'s staged mutations into the
    /// committed store.
    ///
    /// Returns one [`AppliedOp`] per merged vertex and edge. Committing a
    /// transaction that is already terminal is the recoverable
    /// [`TransactionClosed`](crate::GraphError::TransactionClosed) error;
    /// content-level failure is impossible because every mutation was
    /// validated at staging time.
    ///
    /// # Panics
    ///
    /// Panics when `tx_id` was never allocated by this engine.
    pub fn commit_transaction(&self, tx_id: TxId) -> (Result<Vec<AppliedOp>>, EngineSnapshot) {
        self.apply(|state| state.commit(tx_id))
    }

    /// Discards transaction `tx_id`'s staged mutations and records `reason`.
    ///
    /// The committed store is never affected. The recorded reason is
    /// returned back for caller-side confirmation. Rolling back an already
    /// rolled-back transaction re-records the reason; rolling back a
    /// committed transaction is refused with
    /// [`TransactionClosed`](crate::GraphError::TransactionClosed).
    ///
    /// # Panics
    ///
    /// Panics when `tx_id` was never allocated by this engine.
    pub fn rollback_transaction(
        &self,
        tx_id: TxId,
        reason: impl Into<String>,
    ) -> (Result<String>, EngineSnapshot) {
        let reason = reason.into();
        self.apply(|state| state.rollback(tx_id, reason))
    }

    /// Matches a typed-triple pattern against the committed store.
    pub fn query(&self, pattern: &TriplePattern) -> (Vec<PatternMatch>, EngineSnapshot) {
        self.apply(|state| state.query(pattern))
    }

    /// Number of committed vertices.
    pub fn vertex_count(&self) -> (usize, EngineSnapshot) {
        self.apply(|state| state.store.vertex_count())
    }

    /// Number of committed edges.
    pub fn edge_count(&self) -> (usize, EngineSnapshot) {
        self.apply(|state| state.store.edge_count())
    }

    /// Returns a snapshot of the current state without applying anything.
    pub fn snapshot(&self) -> EngineSnapshot {
        EngineSnapshot {
            state: self.state.lock().clone(),
        }
    }
}

/// An immutable copy of the engine state after one operation.
///
/// Snapshots never change once returned; inspecting one is always safe
/// regardless of what the engine does afterwards.
#[derive(Debug, Clone, Serialize)]
pub struct EngineSnapshot {
    state: EngineState,
}

impl EngineSnapshot {
    /// Number of committed vertices.
    pub fn vertex_count(&self) -> usize {
        self.state.store.vertex_count()
    }

    /// Number of committed edges.
    pub fn edge_count(&self) -> usize {
        self.state.store.edge_count()
    }

    /// Looks up a committed vertex by id.
    pub fn vertex(&self, id: &str) -> Option<&Vertex> {
        self.state.store.vertex(id)
    }

    /// Read access to the committed store.
    pub fn store(&self) -> &GraphStore {
        &self.state.store
    }

    /// Looks up a transaction record, terminal ones included.
    pub fn transaction(&self, tx_id: TxId) -> Option<&Transaction> {
        self.state.transaction(tx_id)
    }

    /// Looks up the registered schema for `vertex_type`.
    pub fn schema(&self, vertex_type: &str) -> Option<&VertexTypeSchema> {
        self.state.schemas.get(vertex_type)
    }

    /// Matches a typed-triple pattern against this snapshot's store.
    pub fn query(&self, pattern: &TriplePattern) -> Vec<PatternMatch> {
        self.state.query(pattern)
    }

    /// Serializes the snapshot to JSON for export or inspection.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(&self.state)
            .map_err(|e| crate::error::GraphError::Serialization(e.to_string()))
    }
}
