//! The aggregate engine state and the operations over it.
//!
//! [`EngineState`] is the single value every operation transforms: schema
//! registry, transaction ledger, committed store, and the next transaction
//! id. Operations are synchronous total functions with no I/O; the façade
//! in [`core`](super::core) owns the one mutable instance.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::engine::config::EngineConfig;
use crate::engine::store::GraphStore;
use crate::engine::transaction::{AppliedOp, Transaction, TxId, TxState};
use crate::engine::validate;
use crate::error::{GraphError, Result};
use crate::model::{PropertyValue, VertexId};
use crate::query::{self, PatternMatch, TriplePattern};
use crate::schema::{PropertyDef, SchemaRegistry};

/// Aggregate root: registry + ledger + committed store + id counter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct EngineState {
    pub(crate) config: EngineConfig,
    pub(crate) schemas: SchemaRegistry,
    pub(crate) transactions: BTreeMap<TxId, Transaction>,
    pub(crate) store: GraphStore,
    next_tx_id: TxId,
}

impl EngineState {
    pub(crate) fn new(config: EngineConfig) -> Self {
        Self {
            config,
            schemas: SchemaRegistry::new(),
            transactions: BTreeMap::new(),
            store: GraphStore::default(),
            next_tx_id: 1,
        }
    }

    pub(crate) fn define_vertex_type(&mut self, vertex_type: &str, defs: Vec<PropertyDef>) {
        debug!(vertex_type, properties = defs.len(), "Vertex type defined");
        self.schemas.define(vertex_type, defs);
    }

    pub(crate) fn begin(&mut self) -> TxId {
        let id = self.next_tx_id;
        self.next_tx_id += 1;
        self.transactions.insert(id, Transaction::new(id));
        debug!(tx_id = id, "Transaction started");
        id
    }

    pub(crate) fn transaction(&self, tx_id: TxId) -> Option<&Transaction> {
        self.transactions.get(&tx_id)
    }

    pub(crate) fn add_vertex(
        &mut self,
        tx_id: TxId,
        vertex_type: &str,
        vertex_id: VertexId,
        properties: BTreeMap<String, PropertyValue>,
    ) -> Result<()> {
        let tx = expect_tx(&self.transactions, tx_id);
        validate::vertex_mutation(
            &self.config,
            &self.schemas,
            tx,
            vertex_type,
            &vertex_id,
            &properties,
        )?;

        let tx = expect_tx_mut(&mut self.transactions, tx_id);
        debug!(tx_id, vertex_id = %vertex_id, vertex_type, "Vertex staged");
        tx.stage_vertex(vertex_type, vertex_id, properties);
        Ok(())
    }

    pub(crate) fn add_edge(
        &mut self,
        tx_id: TxId,
        from: VertexId,
        to: VertexId,
        label: &str,
    ) -> Result<()> {
        let tx = expect_tx(&self.transactions, tx_id);
        validate::edge_mutation(&self.config, tx, &self.store, &from, &to)?;

        let tx = expect_tx_mut(&mut self.transactions, tx_id);
        debug!(tx_id, from = %from, to = %to, label, "Edge staged");
        tx.stage_edge(from, to, label);
        Ok(())
    }

    pub(crate) fn commit(&mut self, tx_id: TxId) -> Result<Vec<AppliedOp>> {
        let tx = expect_tx_mut(&mut self.transactions, tx_id);
        tx.ensure_active()?;

        let (staged_vertices, staged_edges) = tx.take_staged_and_commit();
        let vertices = staged_vertices.len();
        let edges = staged_edges.len();
        let applied = self.store.merge(staged_vertices, staged_edges);
        info!(tx_id, vertices, edges, "Transaction committed");
        Ok(applied)
    }

    pub(crate) fn rollback(&mut self, tx_id: TxId, reason: String) -> Result<String> {
        let tx = expect_tx_mut(&mut self.transactions, tx_id);
        match tx.state() {
            TxState::Active => {
                let discarded = tx.staged_len();
                tx.roll_back(reason.clone());
                warn!(tx_id, discarded, reason = %reason, "Transaction rolled back");
                Ok(reason)
            }
            TxState::RolledBack => {
                tx.record_rollback_reason(reason.clone());
                debug!(tx_id, reason = %reason, "Rollback reason re-recorded");
                Ok(reason)
            }
            TxState::Committed => Err(GraphError::TransactionClosed {
                id: tx_id,
                state: TxState::Committed,
            }),
        }
    }

    pub(crate) fn query(&self, pattern: &TriplePattern) -> Vec<PatternMatch> {
        query::evaluate(&self.store, pattern)
    }
}

fn expect_tx(transactions: &BTreeMap<TxId, Transaction>, tx_id: TxId) -> &Transaction {
    transactions
        .get(&tx_id)
        .unwrap_or_else(|| panic!("transaction {tx_id} was never allocated by this engine"))
}

fn expect_tx_mut(transactions: &mut BTreeMap<TxId, Transaction>, tx_id: TxId) -> &mut Transaction {
    transactions
        .get_mut(&tx_id)
        .unwrap_or_else(|| panic!("transaction {tx_id} was never allocated by this engine"))
}
