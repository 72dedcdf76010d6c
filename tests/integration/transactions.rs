use std::collections::BTreeMap;

use trellis::{
    AppliedOp, GraphEngine, GraphError, PropertyDef, PropertyType, PropertyValue, Result, TxState,
};

fn props(entries: &[(&str, PropertyValue)]) -> BTreeMap<String, PropertyValue> {
    entries
        .iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect()
}

fn person_engine() -> GraphEngine {
    let engine = GraphEngine::new();
    engine.define_vertex_type(
        "person",
        vec![PropertyDef::required("name", PropertyType::String)],
    );
    engine
}

#[test]
fn transaction_ids_are_distinct_and_increasing() {
    let engine = person_engine();
    let mut previous = 0;
    for _ in 0..10 {
        let (tx, snapshot) = engine.begin_transaction();
        assert!(tx > previous, "ids must be strictly increasing");
        assert_eq!(snapshot.transaction(tx).expect("tx").state(), TxState::Active);
        previous = tx;
    }
}

#[test]
fn commit_is_atomic() -> Result<()> {
    let engine = person_engine();

    let (tx1, _) = engine.begin_transaction();
    engine
        .add_vertex(tx1, "person", "1", props(&[("name", "Alice".into())]))
        .0?;
    engine
        .add_vertex(tx1, "person", "2", props(&[("name", "Bob".into())]))
        .0?;
    engine.add_edge(tx1, "1", "2", "knows").0?;
    let (applied, snapshot) = engine.commit_transaction(tx1);
    assert_eq!(applied?.len(), 3);
    assert_eq!(snapshot.vertex_count(), 2);
    assert_eq!(snapshot.edge_count(), 1);

    // A second commit adds exactly its own staged work on top.
    let (tx2, _) = engine.begin_transaction();
    engine
        .add_vertex(tx2, "person", "3", props(&[("name", "Carol".into())]))
        .0?;
    engine.add_edge(tx2, "3", "1", "knows").0?;
    let (applied, snapshot) = engine.commit_transaction(tx2);
    assert_eq!(applied?.len(), 2);
    assert_eq!(snapshot.vertex_count(), 3);
    assert_eq!(snapshot.edge_count(), 2);
    Ok(())
}

#[test]
fn rollback_never_touches_committed_state() -> Result<()> {
    let engine = person_engine();

    let (tx1, _) = engine.begin_transaction();
    engine
        .add_vertex(tx1, "person", "1", props(&[("name", "Alice".into())]))
        .0?;
    engine.commit_transaction(tx1).0?;

    let (tx2, _) = engine.begin_transaction();
    for i in 2..=5 {
        engine
            .add_vertex(
                tx2,
                "person",
                i.to_string(),
                props(&[("name", "Ghost".into())]),
            )
            .0?;
    }
    let (before, _) = engine.vertex_count();
    let (reason, snapshot) = engine.rollback_transaction(tx2, "load aborted");
    assert_eq!(reason?, "load aborted");
    assert_eq!(snapshot.vertex_count(), before);
    assert_eq!(snapshot.edge_count(), 0);

    let record = snapshot.transaction(tx2).expect("tx record");
    assert_eq!(record.state(), TxState::RolledBack);
    assert_eq!(record.rollback_reason(), Some("load aborted"));
    Ok(())
}

#[test]
fn edges_may_reference_committed_or_staged_vertices() -> Result<()> {
    let engine = person_engine();

    let (tx1, _) = engine.begin_transaction();
    engine
        .add_vertex(tx1, "person", "1", props(&[("name", "Alice".into())]))
        .0?;
    engine.commit_transaction(tx1).0?;

    let (tx2, _) = engine.begin_transaction();
    engine
        .add_vertex(tx2, "person", "2", props(&[("name", "Bob".into())]))
        .0?;
    // committed -> staged and staged -> committed both resolve.
    engine.add_edge(tx2, "1", "2", "knows").0?;
    engine.add_edge(tx2, "2", "1", "knows").0?;
    engine.commit_transaction(tx2).0?;

    assert_eq!(engine.edge_count().0, 2);
    Ok(())
}

#[test]
fn edge_to_unknown_vertex_is_rejected() -> Result<()> {
    let engine = person_engine();
    let (tx, _) = engine.begin_transaction();
    engine
        .add_vertex(tx, "person", "1", props(&[("name", "Alice".into())]))
        .0?;

    let (result, snapshot) = engine.add_edge(tx, "1", "99", "knows");
    assert!(matches!(
        result,
        Err(GraphError::UnknownVertex(ref id)) if id == "99"
    ));
    assert!(snapshot.transaction(tx).expect("tx").staged_edges().is_empty());

    // The failed edge left the transaction usable.
    engine
        .add_vertex(tx, "person", "99", props(&[("name", "Bob".into())]))
        .0?;
    engine.add_edge(tx, "1", "99", "knows").0?;
    engine.commit_transaction(tx).0?;
    Ok(())
}

#[test]
fn identical_edges_are_not_deduplicated() -> Result<()> {
    let engine = person_engine();
    let (tx, _) = engine.begin_transaction();
    engine
        .add_vertex(tx, "person", "1", props(&[("name", "Alice".into())]))
        .0?;
    engine
        .add_vertex(tx, "person", "2", props(&[("name", "Bob".into())]))
        .0?;
    engine.add_edge(tx, "1", "2", "knows").0?;
    engine.add_edge(tx, "1", "2", "knows").0?;
    let (applied, snapshot) = engine.commit_transaction(tx);

    assert_eq!(snapshot.edge_count(), 2);
    let edge_ops = applied?
        .into_iter()
        .filter(|op| matches!(op, AppliedOp::EdgeAdded { .. }))
        .count();
    assert_eq!(edge_ops, 2);
    Ok(())
}

#[test]
fn terminal_transactions_reject_further_work() -> Result<()> {
    let engine = person_engine();

    let (tx, _) = engine.begin_transaction();
    engine.commit_transaction(tx).0?;
    assert!(matches!(
        engine.commit_transaction(tx).0,
        Err(GraphError::TransactionClosed { .. })
    ));
    assert!(matches!(
        engine
            .add_vertex(tx, "person", "1", props(&[("name", "Late".into())]))
            .0,
        Err(GraphError::TransactionClosed { .. })
    ));
    assert!(matches!(
        engine.rollback_transaction(tx, "too late").0,
        Err(GraphError::TransactionClosed {
            state: TxState::Committed,
            ..
        })
    ));
    Ok(())
}

#[test]
fn rollback_of_rolled_back_transaction_re_records_reason() -> Result<()> {
    let engine = person_engine();
    let (tx, _) = engine.begin_transaction();

    engine.rollback_transaction(tx, "first reason").0?;
    let (reason, snapshot) = engine.rollback_transaction(tx, "second reason");
    assert_eq!(reason?, "second reason");
    assert_eq!(
        snapshot.transaction(tx).expect("tx").rollback_reason(),
        Some("second reason")
    );
    Ok(())
}

#[test]
#[should_panic(expected = "never allocated")]
fn commit_of_never_allocated_transaction_panics() {
    let engine = person_engine();
    let _ = engine.commit_transaction(7);
}

#[test]
#[should_panic(expected = "never allocated")]
fn staging_into_never_allocated_transaction_panics() {
    let engine = person_engine();
    let _ = engine.add_vertex(7, "person", "1", BTreeMap::new());
}
