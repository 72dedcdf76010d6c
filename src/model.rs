//! Core graph value types: property values, committed vertices and edges.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Caller-supplied vertex identifier.
///
/// Identifiers are opaque strings, globally unique across the committed
/// store (not per-type). The engine never assigns vertex ids.
pub type VertexId = String;

/// Declared primitive type of a vertex property.
///
/// This is the closed set of types a [`PropertyDef`](crate::schema::PropertyDef)
/// may declare. Values are checked against it at staging time when strict
/// type checking is enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PropertyType {
    /// UTF-8 string
    String,
    /// 64-bit signed integer
    Int,
    /// 64-bit float
    Float,
    /// Boolean
    Bool,
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyType::String => write!(f, "string"),
            PropertyType::Int => write!(f, "integer"),
            PropertyType::Float => write!(f, "float"),
            PropertyType::Bool => write!(f, "boolean"),
        }
    }
}

/// A property value carried by a vertex.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PropertyValue {
    /// UTF-8 string value
    String(String),
    /// 64-bit signed integer value
    Int(i64),
    /// 64-bit float value
    Float(f64),
    /// Boolean value
    Bool(bool),
}

impl PropertyValue {
    /// Returns the [`PropertyType`] this value inhabits.
    pub fn kind(&self) -> PropertyType {
        match self {
            PropertyValue::String(_) => PropertyType::String,
            PropertyValue::Int(_) => PropertyType::Int,
            PropertyValue::Float(_) => PropertyType::Float,
            PropertyValue::Bool(_) => PropertyType::Bool,
        }
    }
}

impl From<&str> for PropertyValue {
    fn from(value: &str) -> Self {
        PropertyValue::String(value.to_string())
    }
}

impl From<i64> for PropertyValue {
    fn from(value: i64) -> Self {
        PropertyValue::Int(value)
    }
}

impl From<f64> for PropertyValue {
    fn from(value: f64) -> Self {
        PropertyValue::Float(value)
    }
}

impl From<bool> for PropertyValue {
    fn from(value: bool) -> Self {
        PropertyValue::Bool(value)
    }
}

/// A committed vertex.
///
/// Created only when a transaction commit merges a staged vertex into the
/// store; never mutated in place afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vertex {
    /// Globally unique identifier.
    pub id: VertexId,
    /// Name of the registered vertex type this vertex was validated against.
    pub vertex_type: String,
    /// Property map, keyed by property name.
    pub properties: BTreeMap<String, PropertyValue>,
}

impl Vertex {
    /// Creates a vertex with an empty property map.
    pub fn new(id: impl Into<VertexId>, vertex_type: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            vertex_type: vertex_type.into(),
            properties: BTreeMap::new(),
        }
    }
}

/// A committed, labeled, directed edge.
///
/// Edges carry no identity of their own and no uniqueness constraint;
/// committing the same `(from, to, label)` triple twice stores it twice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    /// Source vertex id.
    pub from: VertexId,
    /// Target vertex id.
    pub to: VertexId,
    /// Edge label.
    pub label: String,
}

impl Edge {
    /// Creates an edge.
    pub fn new(
        from: impl Into<VertexId>,
        to: impl Into<VertexId>,
        label: impl Into<String>,
    ) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            label: label.into(),
        }
    }
}
