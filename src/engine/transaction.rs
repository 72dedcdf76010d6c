//! Transaction records: staged mutation buffers and lifecycle state.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{GraphError, Result};
use crate::model::{PropertyValue, VertexId};

/// Engine-assigned transaction identifier.
///
/// Ids are allocated sequentially starting at 1 and are never reused for
/// the lifetime of the engine.
pub type TxId = u64;

/// The state of a transaction.
///
/// Transactions progress from `Active` to exactly one terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TxState {
    /// Transaction is active and can accept staged mutations
    Active,
    /// Transaction has been committed into the graph store
    Committed,
    /// Transaction has been rolled back with a recorded reason
    RolledBack,
}

/// A vertex staged inside a transaction, not yet visible to queries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StagedVertex {
    /// Registered vertex type the staging was validated against.
    pub vertex_type: String,
    /// Property map the vertex will carry once committed.
    pub properties: BTreeMap<String, PropertyValue>,
}

/// An edge staged inside a transaction, not yet visible to queries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StagedEdge {
    /// Source vertex id (committed, or staged in the same transaction).
    pub from: VertexId,
    /// Target vertex id (committed, or staged in the same transaction).
    pub to: VertexId,
    /// Edge label.
    pub label: String,
}

/// One mutation applied to the store by a commit.
///
/// [`commit_transaction`](crate::GraphEngine::commit_transaction) returns
/// one entry per merged vertex and edge so callers can observe exactly what
/// a commit changed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AppliedOp {
    /// A staged vertex was merged into the vertex table.
    VertexAdded {
        /// Id of the new vertex.
        id: VertexId,
        /// Its vertex type.
        vertex_type: String,
    },
    /// A staged edge was appended to the edge table.
    EdgeAdded {
        /// Source vertex id.
        from: VertexId,
        /// Target vertex id.
        to: VertexId,
        /// Edge label.
        label: String,
    },
}

/// A transaction: identity, lifecycle state, and private staged buffers.
///
/// Staged mutations are invisible to queries and counts until the
/// transaction commits. Rollback discards the buffers and records a reason.
/// Terminal transactions stay in the ledger as immutable records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    id: TxId,
    state: TxState,
    staged_vertices: BTreeMap<VertexId, StagedVertex>,
    staged_edges: Vec<StagedEdge>,
    rollback_reason: Option<String>,
}

impl Transaction {
    pub(crate) fn new(id: TxId) -> Self {
        Self {
            id,
            state: TxState::Active,
            staged_vertices: BTreeMap::new(),
            staged_edges: Vec::new(),
            rollback_reason: None,
        }
    }

    /// Returns the unique identifier for this transaction.
    pub fn id(&self) -> TxId {
        self.id
    }

    /// Returns the current state of the transaction.
    pub fn state(&self) -> TxState {
        self.state
    }

    /// Vertices staged in this transaction, keyed by vertex id.
    pub fn staged_vertices(&self) -> &BTreeMap<VertexId, StagedVertex> {
        &self.staged_vertices
    }

    /// Edges staged in this transaction, in staging order.
    pub fn staged_edges(&self) -> &[StagedEdge] {
        &self.staged_edges
    }

    /// Total number of staged mutations (vertices plus edges).
    pub fn staged_len(&self) -> usize {
        self.staged_vertices.len() + self.staged_edges.len()
    }

    /// The reason recorded by rollback, if the transaction was rolled back.
    pub fn rollback_reason(&self) -> Option<&str> {
        self.rollback_reason.as_deref()
    }

    /// Whether `vertex_id` is staged in this transaction.
    pub fn is_staged(&self, vertex_id: &str) -> bool {
        self.staged_vertices.contains_key(vertex_id)
    }

    pub(crate) fn ensure_active(&self) -> Result<()> {
        if self.state != TxState::Active {
            return Err(GraphError::TransactionClosed {
                id: self.id,
                state: self.state,
            });
        }
        Ok(())
    }

    /// Inserts a staged vertex. The caller has already validated the
    /// mutation; duplicate ids never reach this point.
    pub(crate) fn stage_vertex(
        &mut self,
        vertex_type: impl Into<String>,
        vertex_id: VertexId,
        properties: BTreeMap<String, PropertyValue>,
    ) {
        self.staged_vertices.insert(
            vertex_id,
            StagedVertex {
                vertex_type: vertex_type.into(),
                properties,
            },
        );
    }

    /// Appends a staged edge. The caller has already validated endpoints.
    pub(crate) fn stage_edge(&mut self, from: VertexId, to: VertexId, label: impl Into<String>) {
        self.staged_edges.push(StagedEdge {
            from,
            to,
            label: label.into(),
        });
    }

    /// Drains the staged buffers and marks the transaction committed.
    pub(crate) fn take_staged_and_commit(
        &mut self,
    ) -> (BTreeMap<VertexId, StagedVertex>, Vec<StagedEdge>) {
        self.state = TxState::Committed;
        (
            std::mem::take(&mut self.staged_vertices),
            std::mem::take(&mut self.staged_edges),
        )
    }

    /// Discards the staged buffers and records the rollback reason.
    pub(crate) fn roll_back(&mut self, reason: String) {
        self.state = TxState::RolledBack;
        self.staged_vertices.clear();
        self.staged_edges.clear();
        self.rollback_reason = Some(reason);
    }

    /// Re-records the reason on an already rolled-back transaction.
    pub(crate) fn record_rollback_reason(&mut self, reason: String) {
        self.rollback_reason = Some(reason);
    }
}
