//! The transaction engine: configuration, ledger, committed store, façade.

mod config;
mod core;
mod state;
mod store;
mod transaction;
mod validate;


pub use config::EngineConfig;
pub use core::{EngineSnapshot, GraphEngine};
pub use store::GraphStore;
pub use transaction::{AppliedOp, StagedEdge, StagedVertex, Transaction, TxId, TxState};
