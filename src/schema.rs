//! Vertex type schemas and the schema registry.
//!
//! A [`VertexTypeSchema`] is an ordered list of property definitions for one
//! vertex type. The [`SchemaRegistry`] maps type names to schemas and is
//! append/overwrite only: re-defining a type replaces its schema wholesale,
//! and there is no deletion operation.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::model::PropertyType;

/// Definition of a single vertex property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyDef {
    /// Property name, unique within one schema.
    pub name: String,
    /// Declared primitive type of the property value.
    pub value_type: PropertyType,
    /// Whether every vertex of the type must carry this property.
    pub required: bool,
}

impl PropertyDef {
    /// Creates a definition for a property every vertex must carry.
    pub fn required(name: impl Into<String>, value_type: PropertyType) -> Self {
        Self {
            name: name.into(),
            value_type,
            required: true,
        }
    }

    /// Creates a definition for a property vertices may omit.
    pub fn optional(name: impl Into<String>, value_type: PropertyType) -> Self {
        Self {
            name: name.into(),
            value_type,
            required: false,
        }
    }
}

/// Ordered set of property definitions for one vertex type.
///
/// Property names are unique within a schema. When built from a list that
/// repeats a name, the last definition wins while keeping the position of
/// the first occurrence.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct VertexTypeSchema {
    defs: Vec<PropertyDef>,
}

impl VertexTypeSchema {
    /// Builds a schema from a list of definitions, deduplicating by name.
    pub fn from_defs(defs: Vec<PropertyDef>) -> Self {
        let mut deduped: Vec<PropertyDef> = Vec::with_capacity(defs.len());
        for def in defs {
            match deduped.iter_mut().find(|d| d.name == def.name) {
                Some(existing) => *existing = def,
                None => deduped.push(def),
            }
        }
        Self { defs: deduped }
    }

    /// Looks up a definition by property name.
    pub fn get(&self, name: &str) -> Option<&PropertyDef> {
        self.defs.iter().find(|d| d.name == name)
    }

    /// Iterates over the definitions in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &PropertyDef> {
        self.defs.iter()
    }

    /// Number of defined properties.
    pub fn len(&self) -> usize {
        self.defs.len()
    }

    /// Whether the schema defines no properties at all.
    pub fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }
}

/// Mapping from vertex type name to its schema.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SchemaRegistry {
    schemas: FxHashMap<String, VertexTypeSchema>,
}

impl SchemaRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers or replaces the schema for `vertex_type`.
    ///
    /// Always succeeds; a second definition of the same type replaces the
    /// first, it never merges with it.
    pub fn define(&mut self, vertex_type: impl Into<String>, defs: Vec<PropertyDef>) {
        self.schemas
            .insert(vertex_type.into(), VertexTypeSchema::from_defs(defs));
    }

    /// Looks up the schema for `vertex_type`.
    pub fn get(&self, vertex_type: &str) -> Option<&VertexTypeSchema> {
        self.schemas.get(vertex_type)
    }

    /// Whether `vertex_type` has been registered.
    pub fn contains(&self, vertex_type: &str) -> bool {
        self.schemas.contains_key(vertex_type)
    }

    /// Number of registered vertex types.
    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    /// Whether no vertex type has been registered yet.
    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }
}
