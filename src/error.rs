//! Error handling for Trellis operations.
//!
//! All recoverable failures are reported through [`GraphError`]; public
//! APIs return `Result<T, GraphError>`. Validation failures are recoverable
//! by design: they leave the engine state exactly as it was, so the caller
//! can inspect the error and retry or abandon the transaction.
//!
//! Passing a transaction id that was never allocated by
//! [`begin_transaction`](crate::GraphEngine::begin_transaction) is caller
//! misuse, not a business-rule violation, and panics instead of returning
//! an error. The affected operations document this under `# Panics`.

use thiserror::Error;

use crate::engine::{TxId, TxState};
use crate::model::{PropertyType, VertexId};

/// Result type for Trellis operations.
pub type Result<T> = std::result::Result<T, GraphError>;

/// Errors that can occur during graph engine operations.
#[derive(Debug, Error)]
pub enum GraphError {
    /// The vertex type named in a mutation has no registered schema.
    #[error("unknown vertex type '{0}'")]
    UnknownVertexType(String),

    /// The vertex id is already staged within the same transaction.
    #[error("vertex '{id}' is already staged in transaction {tx_id}")]
    DuplicateVertexId {
        /// Transaction holding the earlier staging.
        tx_id: TxId,
        /// The duplicated vertex id.
        id: VertexId,
    },

    /// A property marked `required` by the schema is absent.
    #[error("vertex type '{vertex_type}' requires property '{property}'")]
    MissingRequiredProperty {
        /// The vertex type whose schema was violated.
        vertex_type: String,
        /// Name of the missing property.
        property: String,
    },

    /// A property value does not match its declared type.
    ///
    /// Only raised when strict type checking is enabled, see
    /// [`EngineConfig::strict_types`](crate::EngineConfig::strict_types).
    #[error("property '{property}' expects {expected}, got {actual}")]
    PropertyTypeMismatch {
        /// Name of the offending property.
        property: String,
        /// Type declared by the schema.
        expected: PropertyType,
        /// Type of the supplied value.
        actual: PropertyType,
    },

    /// An edge endpoint resolves to neither a committed nor a staged vertex.
    #[error("unknown vertex '{0}' referenced by edge")]
    UnknownVertex(VertexId),

    /// The transaction has already been committed or rolled back.
    #[error("transaction {id} is no longer active (state: {state:?})")]
    TransactionClosed {
        /// The terminal transaction's id.
        id: TxId,
        /// Its terminal state.
        state: TxState,
    },

    /// The transaction reached the configured staged mutation limit.
    #[error("transaction {id} exceeded staged mutation limit of {limit}")]
    StagedLimitExceeded {
        /// The transaction that hit the limit.
        id: TxId,
        /// The configured limit.
        limit: usize,
    },

    /// Error while serializing a snapshot.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Invalid argument outside the validation rules above.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}
