use std::collections::BTreeMap;

use trellis::{
    GraphEngine, GraphError, PropertyDef, PropertyType, PropertyValue, Result,
};

fn props(entries: &[(&str, PropertyValue)]) -> BTreeMap<String, PropertyValue> {
    entries
        .iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect()
}

#[test]
fn define_then_lookup() {
    let engine = GraphEngine::new();
    let snapshot = engine.define_vertex_type(
        "person",
        vec![
            PropertyDef::required("name", PropertyType::String),
            PropertyDef::optional("age", PropertyType::Int),
        ],
    );

    let schema = snapshot.schema("person").expect("registered schema");
    assert_eq!(schema.len(), 2);
    assert!(schema.get("name").expect("name def").required);
    assert!(!schema.get("age").expect("age def").required);
    assert!(snapshot.schema("company").is_none());
}

#[test]
fn redefining_replaces_without_merging() -> Result<()> {
    let engine = GraphEngine::new();
    engine.define_vertex_type(
        "person",
        vec![PropertyDef::required("name", PropertyType::String)],
    );
    engine.define_vertex_type(
        "person",
        vec![PropertyDef::optional("age", PropertyType::Int)],
    );

    // The old required property is gone, so a nameless vertex now passes.
    let (tx, _) = engine.begin_transaction();
    engine.add_vertex(tx, "person", "1", BTreeMap::new()).0?;
    let (applied, _) = engine.commit_transaction(tx);
    assert_eq!(applied?.len(), 1);
    Ok(())
}

#[test]
fn unknown_vertex_type_is_rejected() {
    let engine = GraphEngine::new();
    let (tx, _) = engine.begin_transaction();

    let (result, snapshot) = engine.add_vertex(tx, "person", "1", BTreeMap::new());
    assert!(matches!(
        result,
        Err(GraphError::UnknownVertexType(ref t)) if t == "person"
    ));
    assert_eq!(snapshot.transaction(tx).expect("tx").staged_len(), 0);
}

#[test]
fn missing_required_property_is_rejected() {
    let engine = GraphEngine::new();
    engine.define_vertex_type(
        "person",
        vec![
            PropertyDef::required("name", PropertyType::String),
            PropertyDef::required("email", PropertyType::String),
        ],
    );

    let (tx, _) = engine.begin_transaction();
    let (result, _) =
        engine.add_vertex(tx, "person", "1", props(&[("name", "Alice".into())]));
    assert!(matches!(
        result,
        Err(GraphError::MissingRequiredProperty { ref property, .. }) if property == "email"
    ));
}

#[test]
fn optional_only_schema_accepts_empty_properties() -> Result<()> {
    let engine = GraphEngine::new();
    engine.define_vertex_type(
        "person",
        vec![PropertyDef::optional("age", PropertyType::Int)],
    );

    let (tx, _) = engine.begin_transaction();
    engine.add_vertex(tx, "person", "1", BTreeMap::new()).0?;
    let (_, snapshot) = engine.commit_transaction(tx);
    assert_eq!(snapshot.vertex_count(), 1);
    Ok(())
}

#[test]
fn declared_types_are_enforced() {
    let engine = GraphEngine::new();
    engine.define_vertex_type(
        "reading",
        vec![
            PropertyDef::required("celsius", PropertyType::Float),
            PropertyDef::optional("sensor_ok", PropertyType::Bool),
        ],
    );

    let (tx, _) = engine.begin_transaction();
    let (result, _) = engine.add_vertex(
        tx,
        "reading",
        "r1",
        props(&[("celsius", PropertyValue::Int(21))]),
    );
    assert!(matches!(
        result,
        Err(GraphError::PropertyTypeMismatch {
            expected: PropertyType::Float,
            actual: PropertyType::Int,
            ..
        })
    ));

    let (result, _) = engine.add_vertex(
        tx,
        "reading",
        "r1",
        props(&[
            ("celsius", PropertyValue::Float(21.5)),
            ("sensor_ok", PropertyValue::Bool(true)),
        ]),
    );
    result.expect("well-typed vertex stages cleanly");
}

#[test]
fn undeclared_properties_pass_through() -> Result<()> {
    let engine = GraphEngine::new();
    engine.define_vertex_type(
        "person",
        vec![PropertyDef::required("name", PropertyType::String)],
    );

    let (tx, _) = engine.begin_transaction();
    engine
        .add_vertex(
            tx,
            "person",
            "1",
            props(&[("name", "Alice".into()), ("nickname", "Al".into())]),
        )
        .0?;
    let (_, snapshot) = engine.commit_transaction(tx);

    let vertex = snapshot.vertex("1").expect("committed vertex");
    assert_eq!(
        vertex.properties.get("nickname"),
        Some(&PropertyValue::from("Al"))
    );
    Ok(())
}
