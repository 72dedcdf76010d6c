//! Staging-time mutation validation.
//!
//! Every mutation is validated here before anything is written to a
//! transaction's staged buffers, so a transaction can never reach commit
//! with invalid content and commit itself never fails on content grounds.
//! All checks are pure reads over the registry, the transaction, and the
//! committed store; a failed validation leaves every buffer untouched.

use std::collections::BTreeMap;

use tracing::warn;

use crate::engine::config::EngineConfig;
use crate::engine::store::GraphStore;
use crate::engine::transaction::Transaction;
use crate::error::{GraphError, Result};
use crate::model::PropertyValue;
use crate::schema::SchemaRegistry;

/// Validates staging a vertex into `tx`.
///
/// Check order: transaction active, staged capacity, vertex type known,
/// vertex id not already staged, required properties present, then (strict
/// mode only) value types against declared types. Properties the schema
/// does not name are accepted as-is.
pub(crate) fn vertex_mutation(
    config: &EngineConfig,
    schemas: &SchemaRegistry,
    tx: &Transaction,
    vertex_type: &str,
    vertex_id: &str,
    properties: &BTreeMap<String, PropertyValue>,
) -> Result<()> {
    tx.ensure_active()?;
    check_staged_capacity(config, tx)?;

    let schema = schemas
        .get(vertex_type)
        .ok_or_else(|| GraphError::UnknownVertexType(vertex_type.to_string()))?;

    if tx.is_staged(vertex_id) {
        return Err(GraphError::DuplicateVertexId {
            tx_id: tx.id(),
            id: vertex_id.to_string(),
        });
    }

    for def in schema.iter().filter(|d| d.required) {
        if !properties.contains_key(&def.name) {
            return Err(GraphError::MissingRequiredProperty {
                vertex_type: vertex_type.to_string(),
                property: def.name.clone(),
            });
        }
    }

    if config.strict_types {
        for def in schema.iter() {
            if let Some(value) = properties.get(&def.name) {
                if value.kind() != def.value_type {
                    return Err(GraphError::PropertyTypeMismatch {
                        property: def.name.clone(),
                        expected: def.value_type,
                        actual: value.kind(),
                    });
                }
            }
        }
    }

    Ok(())
}

/// Validates staging an edge into `tx`.
///
/// Both endpoints must resolve to a vertex that is either committed in the
/// store or staged within the same transaction.
pub(crate) fn edge_mutation(
    config: &EngineConfig,
    tx: &Transaction,
    store: &GraphStore,
    from: &str,
    to: &str,
) -> Result<()> {
    tx.ensure_active()?;
    check_staged_capacity(config, tx)?;

    for id in [from, to] {
        if store.vertex(id).is_none() && !tx.is_staged(id) {
            return Err(GraphError::UnknownVertex(id.to_string()));
        }
    }

    Ok(())
}

fn check_staged_capacity(config: &EngineConfig, tx: &Transaction) -> Result<()> {
    if let Some(limit) = config.max_staged_mutations {
        if tx.staged_len() >= limit {
            warn!(
                tx_id = tx.id(),
                staged = tx.staged_len(),
                limit,
                "Transaction exceeded staged mutation limit"
            );
            return Err(GraphError::StagedLimitExceeded { id: tx.id(), limit });
        }
    }
    Ok(())
}
